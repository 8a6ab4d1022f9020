//! Patient record model.
//!
//! A [`PatientRecord`] pairs a caller-assigned [`PatientId`] with validated
//! [`PatientDetails`] and the BMI/verdict derived from them. Records can only be built
//! through [`PatientRecord::new`], which always recomputes the derived fields, so a record
//! never carries a stale BMI.
//!
//! Callers describe new patients with [`NewPatient`] and changes with [`PatientUpdate`];
//! both hold unvalidated input and are checked on conversion.

use crate::bmi::{self, Verdict};
use crate::validation::{
    validate_age, validate_bmi, validate_gender, validate_height, validate_id, validate_text,
    validate_weight,
};
use crate::PatientResult;
use pmr_types::{Gender, NonEmptyText, PatientId};
use serde::Deserialize;

/// Validated patient attributes, excluding the identifier and derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientDetails {
    name: NonEmptyText,
    city: NonEmptyText,
    age: u32,
    gender: Gender,
    height: f64,
    weight: f64,
}

impl PatientDetails {
    /// Validates every attribute, failing on the first invalid field.
    pub fn new(
        name: &str,
        city: &str,
        age: i64,
        gender: &str,
        height: f64,
        weight: f64,
    ) -> PatientResult<Self> {
        let details = Self {
            name: validate_text("name", name)?,
            city: validate_text("city", city)?,
            age: validate_age(age)?,
            gender: validate_gender(gender)?,
            height: validate_height(height)?,
            weight: validate_weight(weight)?,
        };
        validate_bmi(details.height, details.weight)?;
        Ok(details)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn city(&self) -> &str {
        self.city.as_str()
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Height in metres.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Weight in kilograms.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// A stored patient with its derived BMI and verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    id: PatientId,
    details: PatientDetails,
    bmi: f64,
    verdict: Verdict,
}

impl PatientRecord {
    pub fn new(id: PatientId, details: PatientDetails) -> Self {
        let bmi = bmi::compute(details.height, details.weight);
        Self {
            id,
            details,
            bmi,
            verdict: Verdict::from_bmi(bmi),
        }
    }

    pub fn id(&self) -> &PatientId {
        &self.id
    }

    pub fn details(&self) -> &PatientDetails {
        &self.details
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }
}

/// Unvalidated attributes for creating a patient.
///
/// Unknown fields are ignored on deserialisation, so a caller-supplied `bmi` or
/// `verdict` has no effect.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPatient {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
}

impl NewPatient {
    pub fn into_record(self) -> PatientResult<PatientRecord> {
        let id = validate_id(&self.id)?;
        let details = PatientDetails::new(
            &self.name,
            &self.city,
            self.age,
            &self.gender,
            self.height,
            self.weight,
        )?;
        Ok(PatientRecord::new(id, details))
    }
}

/// Partial change to an existing patient. `None` leaves a field unchanged.
///
/// The identifier is deliberately absent: ids are immutable once assigned.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl PatientUpdate {
    /// True when the update changes an input of the BMI.
    pub fn changes_measurements(&self) -> bool {
        self.height.is_some() || self.weight.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.city.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.height.is_none()
            && self.weight.is_none()
    }

    /// Merges this update over `current` and re-validates the merged attributes.
    ///
    /// `current` is left untouched; the returned record has freshly derived fields.
    pub fn apply_to(&self, current: &PatientRecord) -> PatientResult<PatientRecord> {
        let existing = &current.details;
        let gender = self.gender.as_deref().unwrap_or(existing.gender.as_str());

        let details = PatientDetails::new(
            self.name.as_deref().unwrap_or(existing.name()),
            self.city.as_deref().unwrap_or(existing.city()),
            self.age.unwrap_or(i64::from(existing.age)),
            gender,
            self.height.unwrap_or(existing.height),
            self.weight.unwrap_or(existing.weight),
        )?;

        Ok(PatientRecord::new(current.id.clone(), details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatientError;

    fn new_patient(id: &str, height: f64, weight: f64) -> NewPatient {
        NewPatient {
            id: id.into(),
            name: "Ananya Verma".into(),
            city: "Guwahati".into(),
            age: 28,
            gender: "female".into(),
            height,
            weight,
        }
    }

    #[test]
    fn into_record_derives_bmi_and_verdict() {
        let record = new_patient("P002", 1.80, 95.0).into_record().unwrap();

        assert_eq!(record.id().as_str(), "P002");
        assert_eq!(record.bmi(), 95.0 / (1.80 * 1.80));
        assert!((record.bmi() - 29.32).abs() < 0.005);
        assert_eq!(record.verdict(), Verdict::Overweight);
    }

    #[test]
    fn into_record_rejects_negative_height() {
        let err = new_patient("P001", -1.7, 60.0).into_record().unwrap_err();
        assert!(matches!(
            err,
            PatientError::Validation {
                field: "height",
                ..
            }
        ));
    }

    #[test]
    fn into_record_rejects_height_with_infinite_bmi() {
        let err = new_patient("P001", 1e-200, 70.0).into_record().unwrap_err();
        assert!(matches!(
            err,
            PatientError::Validation {
                field: "height",
                ..
            }
        ));
    }

    #[test]
    fn update_to_tiny_height_is_rejected() {
        let record = new_patient("P006", 1.65, 58.0).into_record().unwrap();
        let update = PatientUpdate {
            height: Some(1e-200),
            ..Default::default()
        };
        assert!(matches!(
            update.apply_to(&record),
            Err(PatientError::Validation {
                field: "height",
                ..
            })
        ));
    }

    #[test]
    fn caller_supplied_bmi_is_ignored() {
        let json = r#"{
            "id": "P010", "name": "Kavya", "city": "Pune", "age": 30,
            "gender": "female", "height": 1.60, "weight": 50.0,
            "bmi": 99.0, "verdict": "Obese"
        }"#;
        let record: PatientRecord = serde_json::from_str::<NewPatient>(json)
            .unwrap()
            .into_record()
            .unwrap();

        assert_eq!(record.bmi(), 50.0 / (1.60 * 1.60));
        assert_eq!(record.verdict(), Verdict::Normal);
    }

    #[test]
    fn update_of_weight_recomputes_derived_fields() {
        let record = new_patient("P003", 1.80, 70.0).into_record().unwrap();
        assert_eq!(record.verdict(), Verdict::Normal);

        let update = PatientUpdate {
            weight: Some(110.0),
            ..Default::default()
        };
        assert!(update.changes_measurements());

        let updated = update.apply_to(&record).unwrap();
        assert_eq!(updated.bmi(), 110.0 / (1.80 * 1.80));
        assert_eq!(updated.verdict(), Verdict::Obese);
        assert_eq!(updated.details().name(), "Ananya Verma");
    }

    #[test]
    fn update_of_city_keeps_derived_fields() {
        let record = new_patient("P004", 1.65, 58.0).into_record().unwrap();
        let update = PatientUpdate {
            city: Some("Delhi".into()),
            ..Default::default()
        };
        assert!(!update.changes_measurements());

        let updated = update.apply_to(&record).unwrap();
        assert_eq!(updated.details().city(), "Delhi");
        assert_eq!(updated.bmi(), record.bmi());
        assert_eq!(updated.verdict(), record.verdict());
        assert_eq!(updated.id(), record.id());
    }

    #[test]
    fn invalid_update_is_rejected() {
        let record = new_patient("P005", 1.65, 58.0).into_record().unwrap();
        let update = PatientUpdate {
            gender: Some("robot".into()),
            ..Default::default()
        };
        let err = update.apply_to(&record).unwrap_err();
        assert!(matches!(
            err,
            PatientError::Validation {
                field: "gender",
                ..
            }
        ));
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(PatientUpdate::default().is_empty());
        assert!(!PatientUpdate {
            age: Some(40),
            ..Default::default()
        }
        .is_empty());
    }
}
