//! Mapping from core and extraction errors to HTTP responses.

use crate::models::ErrorRes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pmr_core::PatientError;

/// Error returned by every handler; rendered as `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    Patient(PatientError),
    Rejected { status: StatusCode, detail: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Patient(err) => match err {
                PatientError::NotFound { .. } => StatusCode::NOT_FOUND,
                PatientError::DuplicateKey(_) => StatusCode::CONFLICT,
                PatientError::InvalidField(_) | PatientError::InvalidOrder(_) => {
                    StatusCode::BAD_REQUEST
                }
                PatientError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Rejected { status, .. } => *status,
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Patient(PatientError::NotFound { id, known_ids }) if known_ids.is_empty() => {
                format!("Patient '{id}' not found. No patients are stored yet")
            }
            ApiError::Patient(PatientError::NotFound { id, known_ids }) => format!(
                "Patient '{id}' not found. Try a valid ID like: {}",
                known_ids.join(", ")
            ),
            ApiError::Patient(err) if err.is_client_error() => err.to_string(),
            ApiError::Patient(_) => "Internal error".to_string(),
            ApiError::Rejected { detail, .. } => detail.clone(),
        }
    }
}

impl From<PatientError> for ApiError {
    fn from(err: PatientError) -> Self {
        ApiError::Patient(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Patient(err) if !err.is_client_error() => {
                tracing::error!("Patient store error: {:?}", err);
            }
            _ => tracing::warn!("Rejected request ({}): {}", status, self.detail()),
        }

        (status, Json(ErrorRes { detail: self.detail() })).into_response()
    }
}
