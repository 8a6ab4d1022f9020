use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};

use crate::error::ApiError;
use crate::models::{
    CreatePatientReq, ErrorRes, HealthRes, MessageRes, PatientMessageRes, PatientRes,
    PatientsRes, SortQuery, UpdatePatientReq,
};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks. Does not touch the data file.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "PMR REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/views",
    responses(
        (status = 200, description = "All patients keyed by ID", body = PatientsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List all patients, keyed by ID in stored order.
#[axum::debug_handler]
pub async fn list_patients(State(state): State<AppState>) -> Result<Json<PatientsRes>, ApiError> {
    let store = state.patient_service.get_all()?;
    let patients = store
        .iter()
        .map(|record| (record.id().to_string(), PatientRes::from(record)))
        .collect();
    Ok(Json(PatientsRes(patients)))
}

#[utoipa::path(
    get,
    path = "/patient/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "ID of the patient", example = "P001")
    ),
    responses(
        (status = 200, description = "Patient record", body = PatientRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Fetch a single patient by ID.
///
/// # Errors
/// Returns `404 Not Found` with the known IDs listed in the detail if the ID is unknown.
#[axum::debug_handler]
pub async fn view_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientRes>, ApiError> {
    let record = state.patient_service.get_one(&patient_id)?;
    Ok(Json(PatientRes::from(&record)))
}

#[utoipa::path(
    get,
    path = "/sort",
    params(SortQuery),
    responses(
        (status = 200, description = "Patients ordered by the requested field", body = [PatientRes]),
        (status = 400, description = "Invalid sort field or order", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Sort all patients by height, weight or BMI.
#[axum::debug_handler]
pub async fn sort_patients(
    State(state): State<AppState>,
    query: Result<Query<SortQuery>, QueryRejection>,
) -> Result<Json<Vec<PatientRes>>, ApiError> {
    let Query(query) = query?;
    let records = state
        .patient_service
        .sort(&query.sort_by, &query.order)?;
    Ok(Json(records.iter().map(PatientRes::from).collect()))
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = PatientMessageRes),
        (status = 409, description = "Patient already exists", body = ErrorRes),
        (status = 422, description = "Invalid patient attributes", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a new patient record
///
/// BMI and verdict are computed from the submitted height and weight.
///
/// # Errors
/// Returns:
/// - `409 Conflict` if the ID is already in use,
/// - `422 Unprocessable Entity` if any attribute is invalid.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<CreatePatientReq>, JsonRejection>,
) -> Result<(StatusCode, Json<PatientMessageRes>), ApiError> {
    let Json(req) = payload?;
    let record = state.patient_service.create(req.into())?;
    Ok((
        StatusCode::CREATED,
        Json(PatientMessageRes {
            message: "Patient created successfully".into(),
            patient: PatientRes::from(&record),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/update/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "ID of the patient", example = "P001")
    ),
    request_body = UpdatePatientReq,
    responses(
        (status = 200, description = "Patient updated", body = PatientMessageRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 422, description = "Invalid patient attributes", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Update an existing patient; omitted fields are left unchanged.
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    payload: Result<Json<UpdatePatientReq>, JsonRejection>,
) -> Result<Json<PatientMessageRes>, ApiError> {
    let Json(req) = payload?;
    let record = state.patient_service.update(&patient_id, req.into())?;
    Ok(Json(PatientMessageRes {
        message: "Patient updated successfully".into(),
        patient: PatientRes::from(&record),
    }))
}

#[utoipa::path(
    delete,
    path = "/delete/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "ID of the patient", example = "P001")
    ),
    responses(
        (status = 200, description = "Patient deleted", body = MessageRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<MessageRes>, ApiError> {
    state.patient_service.delete(&patient_id)?;
    Ok(Json(MessageRes {
        message: "Patient deleted successfully".into(),
    }))
}
