//! Unit conversion module
//!
//! All body-composition arithmetic runs in kilograms. Input masses are
//! converted on the way in and re-expressed in the caller's unit on the way
//! out, so business logic never sees pounds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

/// Pounds per kilogram
pub const LB_PER_KG: f64 = 2.20462;

// ============================================================================
// Weight Units
// ============================================================================

/// Mass unit the user entered their measurements in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    #[serde(alias = "lbs")]
    Lb,
}

impl WeightUnit {
    /// Convert a value expressed in this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lb => value * KG_PER_LB,
        }
    }

    /// Convert a value expressed in this unit to pounds
    pub fn to_lb(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value * LB_PER_KG,
            WeightUnit::Lb => value,
        }
    }

    /// Re-express a kilogram value in this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lb => kg * LB_PER_KG,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lb),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

/// Convert `value` in `unit` to kilograms
pub fn to_kg(value: f64, unit: WeightUnit) -> f64 {
    unit.to_kg(value)
}

/// Convert `value` in `unit` to pounds
pub fn to_lb(value: f64, unit: WeightUnit) -> f64 {
    unit.to_lb(value)
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
