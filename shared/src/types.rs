//! Result types produced by the calculator

use crate::units::WeightUnit;
use serde::{Deserialize, Serialize};

/// Body fat classification, evaluated top-down on exclusive upper bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatCategory {
    DangerouslyLow,
    Excellent,
    Good,
    Fair,
    Poor,
    DangerouslyHigh,
}

impl BodyFatCategory {
    /// Get the body fat range (percent) for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BodyFatCategory::DangerouslyLow => (0.0, 10.0),
            BodyFatCategory::Excellent => (10.0, 15.0),
            BodyFatCategory::Good => (15.0, 20.0),
            BodyFatCategory::Fair => (20.0, 25.0),
            BodyFatCategory::Poor => (25.0, 30.0),
            BodyFatCategory::DangerouslyHigh => (30.0, 100.0),
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BodyFatCategory::DangerouslyLow => "Dangerously Low",
            BodyFatCategory::Excellent => "Excellent",
            BodyFatCategory::Good => "Good",
            BodyFatCategory::Fair => "Fair",
            BodyFatCategory::Poor => "Poor",
            BodyFatCategory::DangerouslyHigh => "Dangerously High",
        }
    }
}

/// Where the energy figures came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnergySource {
    /// Katch-McArdle BMR with activity applied
    Estimated,
    /// Supplied by the user from a lab or device
    Measured,
}

/// Daily macronutrient targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroGrams {
    pub protein_grams: f64,
    pub carb_grams: f64,
    pub fat_grams: f64,
}

/// Share of target calories per macro, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroPercentages {
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

/// Masses re-expressed in the unit the user entered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassSummary {
    pub unit: WeightUnit,
    pub lean_mass: f64,
    pub fat_mass: f64,
    pub total_mass: f64,
}

/// Full calculator output.
///
/// Built once from a validated input and never mutated; a changed input
/// means a new result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionResult {
    pub lean_mass_kg: f64,
    pub fat_mass_kg: f64,
    pub body_fat_percent: f64,
    pub body_fat_category: BodyFatCategory,
    pub energy_source: EnergySource,
    pub bmr_kcal: f64,
    pub tdee_kcal: f64,
    pub target_calories_kcal: f64,
    pub macros: MacroGrams,
    pub macro_percentages: MacroPercentages,
    pub display: MassSummary,
}
