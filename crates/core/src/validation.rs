//! Input validation utilities.
//!
//! Each function checks one patient attribute and reports failures as
//! `PatientError::Validation` naming the offending field.

use crate::bmi;
use crate::constants::{MAX_AGE_EXCLUSIVE, MIN_WEIGHT_EXCLUSIVE_KG};
use crate::{PatientError, PatientResult};
use pmr_types::{Gender, NonEmptyText, PatientId};

pub fn validate_id(id: &str) -> PatientResult<PatientId> {
    PatientId::parse(id).map_err(|e| PatientError::validation("id", e.to_string()))
}

/// Validates free text such as `name` or `city`.
pub fn validate_text(field: &'static str, value: &str) -> PatientResult<NonEmptyText> {
    NonEmptyText::new(value).map_err(|e| PatientError::validation(field, e.to_string()))
}

pub fn validate_age(age: i64) -> PatientResult<u32> {
    if age <= 0 || age >= MAX_AGE_EXCLUSIVE {
        return Err(PatientError::validation(
            "age",
            format!("must be greater than 0 and less than {MAX_AGE_EXCLUSIVE}, got {age}"),
        ));
    }
    // Bounded above, so the conversion cannot fail.
    u32::try_from(age).map_err(|e| PatientError::validation("age", e.to_string()))
}

pub fn validate_gender(gender: &str) -> PatientResult<Gender> {
    gender
        .parse::<Gender>()
        .map_err(|e| PatientError::validation("gender", e.to_string()))
}

/// Height in metres: finite and strictly positive.
pub fn validate_height(height: f64) -> PatientResult<f64> {
    if !height.is_finite() || height <= 0.0 {
        return Err(PatientError::validation(
            "height",
            format!("must be a finite number greater than 0, got {height}"),
        ));
    }
    Ok(height)
}

/// Weight in kilograms: finite and above [`MIN_WEIGHT_EXCLUSIVE_KG`].
pub fn validate_weight(weight: f64) -> PatientResult<f64> {
    if !weight.is_finite() || weight <= MIN_WEIGHT_EXCLUSIVE_KG {
        return Err(PatientError::validation(
            "weight",
            format!("must be a finite number greater than {MIN_WEIGHT_EXCLUSIVE_KG}, got {weight}"),
        ));
    }
    Ok(weight)
}

/// Checks that height and weight yield a finite BMI.
///
/// Individually valid measurements can still overflow, e.g. a vanishingly small height.
pub fn validate_bmi(height: f64, weight: f64) -> PatientResult<f64> {
    let bmi = bmi::compute(height, weight);
    if !bmi.is_finite() {
        return Err(PatientError::validation(
            "height",
            format!("too small to derive a BMI for weight {weight}, got {height}"),
        ));
    }
    Ok(bmi)
}
