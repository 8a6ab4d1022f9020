//! # PMR Types
//!
//! Validated primitives shared by the PMR crates.
//!
//! Each type here can only be constructed through a checking constructor, so code holding
//! one never has to re-validate it:
//! - [`NonEmptyText`] for free-text attributes such as a patient's name or city
//! - [`PatientId`] for the caller-assigned record key
//! - [`Gender`] for the closed set of recorded genders

use std::fmt;
use std::str::FromStr;

/// Maximum length of a patient identifier, in bytes.
pub const MAX_PATIENT_ID_LEN: usize = 64;

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
    /// The input exceeded the permitted length
    #[error("text exceeds maximum length of {max} characters")]
    TooLong { max: usize },
    /// The input contained characters outside the permitted set
    #[error("text contains invalid characters (only alphanumeric, '-', '_' allowed)")]
    InvalidCharacters,
    /// The input did not name a known gender
    #[error("unknown gender '{0}' (expected male, female or other)")]
    UnknownGender(String),
}

/// A string type that guarantees non-empty content.
///
/// Leading and trailing whitespace is trimmed during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText`, rejecting input that is empty once trimmed.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Caller-assigned patient identifier, e.g. `P001`.
///
/// Identifiers appear in URL paths and as JSON object keys, so they are restricted to
/// ASCII alphanumerics plus `-` and `_`, and bounded to [`MAX_PATIENT_ID_LEN`] bytes.
/// Ids are never trimmed: one with surrounding whitespace is rejected, so the stored key
/// is always the exact string callers look it up by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatientId(String);

impl PatientId {
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let input = input.as_ref();
        if input.trim().is_empty() {
            return Err(TextError::Empty);
        }
        if input.len() > MAX_PATIENT_ID_LEN {
            return Err(TextError::TooLong {
                max: MAX_PATIENT_ID_LEN,
            });
        }
        let ok = input
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !ok {
            return Err(TextError::InvalidCharacters);
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Hash and Eq of `PatientId` match those of the inner string.
impl std::borrow::Borrow<str> for PatientId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Recorded gender of a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Wire representation, as stored in the data file.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(TextError::UnknownGender(s.to_owned())),
        }
    }
}
