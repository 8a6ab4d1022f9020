//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, with the OpenAPI/Swagger UI. The workspace's main
//! `pmr-run` binary serves the same router.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use pmr_core::{config::patient_data_file_from_env_value, CoreConfig, PatientService};

/// Main entry point for the PMR REST API server
///
/// # Environment Variables
/// - `PMR_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `PATIENT_DATA_FILE`: JSON data file (default: "patients.json")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the data file path is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("pmr_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("PMR_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let patient_data_file = patient_data_file_from_env_value(std::env::var("PATIENT_DATA_FILE").ok());
    let cfg = CoreConfig::new(patient_data_file)?;

    tracing::info!("-- Starting PMR REST API on {}", addr);
    tracing::info!("-- Patient data file: {}", cfg.patient_data_file().display());

    let app = router(AppState {
        patient_service: PatientService::from_config(&cfg),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
