//! Body Mass Index derivation.
//!
//! BMI and its verdict are pure functions of height and weight. They are never accepted
//! from callers or trusted from storage; every record recomputes them from its inputs.

use crate::constants::{BMI_NORMAL_LOWER, BMI_OBESE_LOWER, BMI_OVERWEIGHT_LOWER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Computes `weight / height²` with height in metres and weight in kilograms.
pub fn compute(height_m: f64, weight_kg: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// Categorical label for a BMI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl Verdict {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < BMI_NORMAL_LOWER {
            Verdict::Underweight
        } else if bmi < BMI_OVERWEIGHT_LOWER {
            Verdict::Normal
        } else if bmi < BMI_OBESE_LOWER {
            Verdict::Overweight
        } else {
            Verdict::Obese
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Underweight => "Underweight",
            Verdict::Normal => "Normal",
            Verdict::Overweight => "Overweight",
            Verdict::Obese => "Obese",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
