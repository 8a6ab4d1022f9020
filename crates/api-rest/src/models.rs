//! Request and response bodies for the REST API.
//!
//! These are wire types only; they convert to and from the `pmr-core` model at the
//! handler boundary.

use indexmap::IndexMap;
use pmr_core::{NewPatient, PatientRecord, PatientUpdate};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

/// Error body returned for every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

/// A patient record including its derived BMI and verdict.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    #[schema(example = "P001")]
    pub id: String,
    #[schema(example = "Binay")]
    pub name: String,
    #[schema(example = "Mumbai")]
    pub city: String,
    pub age: u32,
    #[schema(example = "male")]
    pub gender: String,
    /// Height in metres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// `weight / height²`, recomputed on every change.
    pub bmi: f64,
    #[schema(example = "Normal")]
    pub verdict: String,
}

impl From<&PatientRecord> for PatientRes {
    fn from(record: &PatientRecord) -> Self {
        let details = record.details();
        Self {
            id: record.id().to_string(),
            name: details.name().to_string(),
            city: details.city().to_string(),
            age: details.age(),
            gender: details.gender().to_string(),
            height: details.height(),
            weight: details.weight(),
            bmi: record.bmi(),
            verdict: record.verdict().to_string(),
        }
    }
}

/// All patients keyed by id, in stored order.
#[derive(Debug, Serialize, ToSchema)]
pub struct PatientsRes(#[schema(value_type = Object)] pub IndexMap<String, PatientRes>);

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientMessageRes {
    pub message: String,
    pub patient: PatientRes,
}

/// Body for `POST /create`. Any `bmi` or `verdict` supplied is ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    #[schema(example = "P001")]
    pub id: String,
    #[schema(example = "Binay")]
    pub name: String,
    #[schema(example = "Mumbai")]
    pub city: String,
    pub age: i64,
    #[schema(example = "male")]
    pub gender: String,
    pub height: f64,
    pub weight: f64,
}

impl From<CreatePatientReq> for NewPatient {
    fn from(req: CreatePatientReq) -> Self {
        NewPatient {
            id: req.id,
            name: req.name,
            city: req.city,
            age: req.age,
            gender: req.gender,
            height: req.height,
            weight: req.weight,
        }
    }
}

/// Body for `PUT /update/{patient_id}`. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePatientReq {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl From<UpdatePatientReq> for PatientUpdate {
    fn from(req: UpdatePatientReq) -> Self {
        PatientUpdate {
            name: req.name,
            city: req.city,
            age: req.age,
            gender: req.gender,
            height: req.height,
            weight: req.weight,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// Field to sort by: `height`, `weight` or `bmi`.
    pub sort_by: String,
    /// Sort order: `asc` (default) or `desc`.
    #[serde(default = "default_order")]
    #[param(default = "asc")]
    pub order: String,
}

fn default_order() -> String {
    "asc".into()
}
