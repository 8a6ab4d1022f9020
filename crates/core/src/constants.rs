//! Constants used throughout the PMR core crate.

/// Default path of the patient data file when no explicit path is configured.
pub const DEFAULT_PATIENT_DATA_FILE: &str = "patients.json";

/// Indentation used when writing the patient data file.
pub const DATA_FILE_INDENT: &[u8] = b"    ";

/// Suffix appended to the data file name for the temporary file used during saves.
pub const TEMP_FILE_SUFFIX: &str = ".tmp";

/// Ages must lie strictly between 0 and this bound.
pub const MAX_AGE_EXCLUSIVE: i64 = 100;

/// Weights must be strictly greater than this many kilograms.
pub const MIN_WEIGHT_EXCLUSIVE_KG: f64 = 3.0;

/// BMI below this value is `Underweight`.
pub const BMI_NORMAL_LOWER: f64 = 18.5;

/// BMI at or above this value is at least `Overweight`.
pub const BMI_OVERWEIGHT_LOWER: f64 = 25.0;

/// BMI at or above this value is `Obese`.
pub const BMI_OBESE_LOWER: f64 = 30.0;
