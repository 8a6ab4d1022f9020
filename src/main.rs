use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use pmr_core::{config::patient_data_file_from_env_value, CoreConfig, PatientService};

/// Main entry point for the PMR application
///
/// Resolves configuration once, then serves the REST API (with Swagger UI) until the
/// process is stopped.
///
/// # Environment Variables
/// - `PMR_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PATIENT_DATA_FILE`: JSON file holding all patient records (default: "patients.json")
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pmr_run=info".parse()?)
                .add_directive("pmr_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("PMR_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let cfg = CoreConfig::new(patient_data_file_from_env_value(
        std::env::var("PATIENT_DATA_FILE").ok(),
    ))?;

    tracing::info!("++ Starting PMR REST on {}", rest_addr);
    tracing::info!("++ Patient data file: {}", cfg.patient_data_file().display());

    let rest_app = router(AppState {
        patient_service: PatientService::from_config(&cfg),
    });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, rest_app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("++ PMR REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
