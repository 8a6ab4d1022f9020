//! Sort view over patient records.

use crate::patient::PatientRecord;
use crate::{PatientError, PatientResult};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Numeric attribute a sort can be keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    pub fn value_of(self, record: &PatientRecord) -> f64 {
        match self {
            SortField::Height => record.details().height(),
            SortField::Weight => record.details().weight(),
            SortField::Bmi => record.bmi(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Height => "height",
            SortField::Weight => "weight",
            SortField::Bmi => "bmi",
        }
    }
}

impl FromStr for SortField {
    type Err = PatientError;

    fn from_str(s: &str) -> PatientResult<Self> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            other => Err(PatientError::InvalidField(other.to_owned())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = PatientError;

    fn from_str(s: &str) -> PatientResult<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(PatientError::InvalidOrder(other.to_owned())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

/// Sorts `records` by `field` in place.
///
/// The sort is stable in both directions: records with equal values keep their
/// incoming order, so descending is not simply the reverse of ascending when ties exist.
pub fn sort_records(records: &mut [PatientRecord], field: SortField, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering: Ordering = field.value_of(a).total_cmp(&field.value_of(b));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
