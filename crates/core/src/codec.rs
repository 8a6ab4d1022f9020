//! On-disk representation of a [`PatientStore`].
//!
//! The data file is a single JSON object keyed by patient id, pretty-printed with four
//! spaces of indentation:
//!
//! ```text
//! {
//!     "P001": {
//!         "name": "Ananya Verma",
//!         "city": "Guwahati",
//!         "age": 28,
//!         "gender": "female",
//!         "height": 1.65,
//!         "weight": 90.0,
//!         "bmi": 33.05785123966942,
//!         "verdict": "Obese"
//!     }
//! }
//! ```
//!
//! `bmi` and `verdict` are written for readers of the file but ignored when decoding;
//! they are always recomputed from `height` and `weight`.

use crate::bmi::Verdict;
use crate::constants::DATA_FILE_INDENT;
use crate::patient::{PatientDetails, PatientRecord};
use crate::store::PatientStore;
use crate::validation::validate_id;
use crate::{PatientError, PatientResult};
use indexmap::IndexMap;
use pmr_types::Gender;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct StoredPatientRef<'a> {
    name: &'a str,
    city: &'a str,
    age: u32,
    gender: Gender,
    height: f64,
    weight: f64,
    bmi: f64,
    verdict: Verdict,
}

impl<'a> From<&'a PatientRecord> for StoredPatientRef<'a> {
    fn from(record: &'a PatientRecord) -> Self {
        let details = record.details();
        Self {
            name: details.name(),
            city: details.city(),
            age: details.age(),
            gender: details.gender(),
            height: details.height(),
            weight: details.weight(),
            bmi: record.bmi(),
            verdict: record.verdict(),
        }
    }
}

#[derive(Deserialize)]
struct StoredPatient {
    name: String,
    city: String,
    age: i64,
    gender: String,
    height: f64,
    weight: f64,
}

/// Renders the store as the pretty-printed data file contents.
pub fn encode(store: &PatientStore) -> PatientResult<String> {
    let entries: IndexMap<&str, StoredPatientRef<'_>> = store
        .iter()
        .map(|record| (record.id().as_str(), StoredPatientRef::from(record)))
        .collect();

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(DATA_FILE_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries
        .serialize(&mut serializer)
        .map_err(PatientError::Serialization)?;

    // serde_json only ever emits UTF-8.
    String::from_utf8(buf).map_err(|e| PatientError::InvalidInput(e.to_string()))
}

/// Parses data file contents, validating every record.
///
/// Blank contents decode to an empty store.
pub fn decode(contents: &str) -> PatientResult<PatientStore> {
    let mut store = PatientStore::new();
    if contents.trim().is_empty() {
        return Ok(store);
    }

    let entries: IndexMap<String, StoredPatient> =
        serde_json::from_str(contents).map_err(PatientError::Deserialization)?;

    for (raw_id, stored) in entries {
        to_record(&raw_id, stored)
            .and_then(|record| store.insert(record))
            .map_err(|e| PatientError::InvalidStoredRecord {
                id: raw_id.clone(),
                source: Box::new(e),
            })?;
    }

    Ok(store)
}

fn to_record(raw_id: &str, stored: StoredPatient) -> PatientResult<PatientRecord> {
    let id = validate_id(raw_id)?;
    let details = PatientDetails::new(
        &stored.name,
        &stored.city,
        stored.age,
        &stored.gender,
        stored.height,
        stored.weight,
    )?;
    Ok(PatientRecord::new(id, details))
}
