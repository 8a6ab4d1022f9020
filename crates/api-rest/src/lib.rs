//! # API REST
//!
//! REST API implementation for PMR.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! All patient logic lives in `pmr-core`; handlers only translate between wire types and
//! [`PatientService`] calls.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;
pub mod models;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use pmr_core::PatientService;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub patient_service: PatientService,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Patient Management API",
        description = "API to manage patient health records"
    ),
    paths(
        handlers::health,
        handlers::list_patients,
        handlers::view_patient,
        handlers::sort_patients,
        handlers::create_patient,
        handlers::update_patient,
        handlers::delete_patient,
    ),
    components(schemas(
        models::HealthRes,
        models::MessageRes,
        models::ErrorRes,
        models::PatientRes,
        models::PatientsRes,
        models::PatientMessageRes,
        models::CreatePatientReq,
        models::UpdatePatientReq,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router, including Swagger UI at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/views", get(handlers::list_patients))
        .route("/patient/:patient_id", get(handlers::view_patient))
        .route("/sort", get(handlers::sort_patients))
        .route("/create", post(handlers::create_patient))
        .route("/update/:patient_id", put(handlers::update_patient))
        .route("/delete/:patient_id", delete(handlers::delete_patient))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
