//! Input model for the body composition calculator
//!
//! A [`CompositionInput`] is the full answer set collected by the form
//! wizard. It is a plain immutable record: every calculation takes it by
//! reference and produces a fresh result.

use crate::units::WeightUnit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the user describes their body composition.
///
/// Exactly one mode is active, so lean/fat and total/body-fat fields can
/// never be mixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompositionMeasurement {
    /// Lean mass and fat mass entered directly (e.g. from a DEXA scan)
    #[serde(rename_all = "camelCase")]
    ByLeanFat { lean_mass: f64, fat_mass: f64 },
    /// Scale weight plus a body fat percentage
    #[serde(rename_all = "camelCase")]
    ByTotalAndBodyfat {
        total_weight: f64,
        body_fat_percent: f64,
    },
}

/// Gender as collected on the profile step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Direction of the weight goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightGoal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl fmt::Display for WeightGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WeightGoal::Lose => "lose",
            WeightGoal::Maintain => "maintain",
            WeightGoal::Gain => "gain",
        };
        write!(f, "{}", label)
    }
}

/// Dietary approach selected on the nutrition step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DietaryApproach {
    #[default]
    Balanced,
    HighProtein,
    LowCarb,
}

/// Activity presets offered by the metabolism step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtraActive,
}

impl ActivityLevel {
    /// Get the TDEE multiplier for this preset
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtraActive => "Very hard exercise or physical job",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" | "light" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" | "moderate" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "extra_active" | "extra" => Ok(ActivityLevel::ExtraActive),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

/// Everything the wizard collects, in the units the user chose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionInput {
    pub composition: CompositionMeasurement,
    #[serde(default)]
    pub unit: WeightUnit,
    pub age: i32,
    pub gender: Gender,
    /// When true, `measured_bmr`/`measured_tdee` replace the formula
    #[serde(default)]
    pub known_metrics: bool,
    #[serde(default, rename = "measuredBMR", alias = "measuredBmr")]
    pub measured_bmr: Option<f64>,
    #[serde(default, rename = "measuredTDEE", alias = "measuredTdee")]
    pub measured_tdee: Option<f64>,
    /// TDEE multiplier in [1.2, 1.9]
    #[serde(default)]
    pub activity_level: Option<f64>,
    /// Daily active energy in kcal; takes precedence over `activity_level`
    #[serde(default)]
    pub active_energy: Option<f64>,
    #[serde(default)]
    pub weight_goal: WeightGoal,
    /// Signed kcal/day, negative for a deficit
    #[serde(default)]
    pub daily_adjustment: f64,
    #[serde(default)]
    pub dietary_approach: DietaryApproach,
    #[serde(default)]
    pub insulin_resistance: bool,
}

#[cfg(test)]
pub(crate) fn example_input() -> CompositionInput {
    CompositionInput {
        composition: CompositionMeasurement::ByTotalAndBodyfat {
            total_weight: 290.0,
            body_fat_percent: 36.0,
        },
        unit: WeightUnit::Lb,
        age: 62,
        gender: Gender::Male,
        known_metrics: false,
        measured_bmr: None,
        measured_tdee: None,
        activity_level: Some(1.55),
        active_energy: None,
        weight_goal: WeightGoal::Lose,
        daily_adjustment: -1000.0,
        dietary_approach: DietaryApproach::Balanced,
        insulin_resistance: false,
    }
}
