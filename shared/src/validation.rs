//! Input validation
//!
//! Scalar validators return `Result<(), String>` so they can be reused by
//! any surface; the step validators attach field names and collect every
//! failure for a wizard step before reporting.

use crate::models::{CompositionInput, CompositionMeasurement, WeightGoal};
use crate::units::{WeightUnit, KG_PER_LB};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_AGE: i32 = 20;
pub const MAX_AGE: i32 = 69;

/// Upper bound for any entered mass: 1000 lb
pub const MAX_MASS_LB: f64 = 1000.0;
pub const MAX_MASS_KG: f64 = MAX_MASS_LB * KG_PER_LB;

pub const MIN_ACTIVITY_MULTIPLIER: f64 = 1.2;
pub const MAX_ACTIVITY_MULTIPLIER: f64 = 1.9;
pub const MAX_ACTIVE_ENERGY_KCAL: f64 = 5000.0;

pub const MIN_MEASURED_BMR_KCAL: f64 = 800.0;
pub const MAX_MEASURED_BMR_KCAL: f64 = 5000.0;
pub const MAX_MEASURED_TDEE_KCAL: f64 = 10000.0;

fn check_finite(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("must be a valid number".to_string());
    }
    Ok(())
}

/// Validate age in whole years
pub fn validate_age(age: i32) -> Result<(), String> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(format!("must be between {} and {}", MIN_AGE, MAX_AGE));
    }
    Ok(())
}

/// Validate an entered mass (lean, fat or total) in the user's unit
pub fn validate_mass(value: f64, unit: WeightUnit) -> Result<(), String> {
    check_finite(value)?;
    if value < 0.0 {
        return Err("cannot be negative".to_string());
    }
    if unit.to_kg(value) > MAX_MASS_KG {
        return Err(format!(
            "must be at most {} lb ({:.1} kg)",
            MAX_MASS_LB, MAX_MASS_KG
        ));
    }
    Ok(())
}

/// Validate body fat percentage (0-100)
pub fn validate_body_fat_percent(value: f64) -> Result<(), String> {
    check_finite(value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err("must be between 0 and 100".to_string());
    }
    Ok(())
}

/// Validate an activity multiplier
pub fn validate_activity_multiplier(value: f64) -> Result<(), String> {
    check_finite(value)?;
    if !(MIN_ACTIVITY_MULTIPLIER..=MAX_ACTIVITY_MULTIPLIER).contains(&value) {
        return Err(format!(
            "must be between {} and {}",
            MIN_ACTIVITY_MULTIPLIER, MAX_ACTIVITY_MULTIPLIER
        ));
    }
    Ok(())
}

/// Validate daily active energy (kcal)
pub fn validate_active_energy(kcal: f64) -> Result<(), String> {
    check_finite(kcal)?;
    if kcal < 0.0 {
        return Err("cannot be negative".to_string());
    }
    if kcal > MAX_ACTIVE_ENERGY_KCAL {
        return Err(format!("must be at most {} kcal", MAX_ACTIVE_ENERGY_KCAL));
    }
    Ok(())
}

/// Validate a measured BMR (kcal)
pub fn validate_measured_bmr(kcal: f64) -> Result<(), String> {
    check_finite(kcal)?;
    if !(MIN_MEASURED_BMR_KCAL..=MAX_MEASURED_BMR_KCAL).contains(&kcal) {
        return Err(format!(
            "must be between {} and {} kcal",
            MIN_MEASURED_BMR_KCAL, MAX_MEASURED_BMR_KCAL
        ));
    }
    Ok(())
}

/// Validate a measured TDEE (kcal); it can never be below BMR
pub fn validate_measured_tdee(kcal: f64, bmr_kcal: f64) -> Result<(), String> {
    check_finite(kcal)?;
    if kcal < bmr_kcal {
        return Err(format!("cannot be lower than BMR ({:.0} kcal)", bmr_kcal));
    }
    if kcal > MAX_MEASURED_TDEE_KCAL {
        return Err(format!("must be at most {} kcal", MAX_MEASURED_TDEE_KCAL));
    }
    Ok(())
}

/// Validate that the daily adjustment points the same way as the goal.
///
/// Maintenance ignores the adjustment entirely. There is no upper bound on
/// the size; the calorie floor caps deep deficits.
pub fn validate_daily_adjustment(goal: WeightGoal, kcal: f64) -> Result<(), String> {
    if goal == WeightGoal::Maintain {
        return Ok(());
    }
    check_finite(kcal)?;
    match goal {
        WeightGoal::Lose if kcal >= 0.0 => {
            return Err("must be negative when losing weight".to_string())
        }
        WeightGoal::Gain if kcal <= 0.0 => {
            return Err("must be positive when gaining weight".to_string())
        }
        _ => {}
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "lean_mass" => "Lean Mass",
        "fat_mass" => "Fat Mass",
        "total_weight" => "Total Weight",
        "body_fat_percent" => "Body Fat %",
        "age" => "Age",
        "gender" => "Gender",
        "measured_bmr" => "Measured BMR",
        "measured_tdee" => "Measured TDEE",
        "activity_level" => "Activity Level",
        "active_energy" => "Active Energy",
        "weight_goal" => "Weight Goal",
        "daily_adjustment" => "Daily Adjustment",
        "dietary_approach" => "Dietary Approach",
        "input" => "Input",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    #[serde(rename = "label")]
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

// ============================================================================
// Wizard Steps
// ============================================================================

/// One page of the input wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Composition,
    Profile,
    Metabolism,
    Goals,
    Nutrition,
}

impl WizardStep {
    /// Steps in the order the wizard presents them
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Composition,
        WizardStep::Profile,
        WizardStep::Metabolism,
        WizardStep::Goals,
        WizardStep::Nutrition,
    ];

    /// The step after this one, if any
    pub fn next(&self) -> Option<WizardStep> {
        let idx = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            WizardStep::Composition => "composition",
            WizardStep::Profile => "profile",
            WizardStep::Metabolism => "metabolism",
            WizardStep::Goals => "goals",
            WizardStep::Nutrition => "nutrition",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for WizardStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|step| step.name() == normalized)
            .copied()
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|s| s.name()).collect();
                format!(
                    "Unknown wizard step: {}. Must be one of: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}

fn push_err(errors: &mut Vec<ValidationError>, field: &str, result: Result<(), String>) {
    if let Err(msg) = result {
        errors.push(ValidationError::new(field, &msg));
    }
}

fn composition_errors(input: &CompositionInput, errors: &mut Vec<ValidationError>) {
    match input.composition {
        CompositionMeasurement::ByLeanFat {
            lean_mass,
            fat_mass,
        } => {
            push_err(errors, "lean_mass", validate_mass(lean_mass, input.unit));
            push_err(errors, "fat_mass", validate_mass(fat_mass, input.unit));
            if errors.is_empty() && input.unit.to_kg(lean_mass + fat_mass) > MAX_MASS_KG {
                errors.push(ValidationError::new(
                    "fat_mass",
                    &format!("lean and fat mass together exceed {} lb", MAX_MASS_LB),
                ));
            }
        }
        CompositionMeasurement::ByTotalAndBodyfat {
            total_weight,
            body_fat_percent,
        } => {
            push_err(errors, "total_weight", validate_mass(total_weight, input.unit));
            push_err(
                errors,
                "body_fat_percent",
                validate_body_fat_percent(body_fat_percent),
            );
        }
    }
}

fn metabolism_errors(input: &CompositionInput, errors: &mut Vec<ValidationError>) {
    if input.known_metrics {
        match input.measured_bmr {
            Some(bmr) => push_err(errors, "measured_bmr", validate_measured_bmr(bmr)),
            None => errors.push(ValidationError::new(
                "measured_bmr",
                "is required when metrics are known",
            )),
        }
        match input.measured_tdee {
            Some(tdee) => {
                let floor = input
                    .measured_bmr
                    .filter(|bmr| validate_measured_bmr(*bmr).is_ok())
                    .unwrap_or(MIN_MEASURED_BMR_KCAL);
                push_err(errors, "measured_tdee", validate_measured_tdee(tdee, floor));
            }
            None => errors.push(ValidationError::new(
                "measured_tdee",
                "is required when metrics are known",
            )),
        }
        return;
    }

    match (input.active_energy, input.activity_level) {
        (Some(kcal), _) => push_err(errors, "active_energy", validate_active_energy(kcal)),
        (None, Some(level)) => {
            push_err(errors, "activity_level", validate_activity_multiplier(level))
        }
        (None, None) => errors.push(ValidationError::new(
            "activity_level",
            "is required unless active energy is given",
        )),
    }
}

/// Validate the fields owned by one wizard step.
///
/// Every failing field of the step is reported; the wizard advances only on
/// `Ok`.
pub fn validate_step(step: WizardStep, input: &CompositionInput) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match step {
        WizardStep::Composition => composition_errors(input, &mut errors),
        WizardStep::Profile => push_err(&mut errors, "age", validate_age(input.age)),
        WizardStep::Metabolism => metabolism_errors(input, &mut errors),
        WizardStep::Goals => push_err(
            &mut errors,
            "daily_adjustment",
            validate_daily_adjustment(input.weight_goal, input.daily_adjustment),
        ),
        // Dietary approach and insulin resistance are closed choices
        WizardStep::Nutrition => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate every wizard step, collecting all failures in step order
pub fn validate(input: &CompositionInput) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = WizardStep::ALL
        .iter()
        .filter_map(|step| validate_step(*step, input).err())
        .flatten()
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
