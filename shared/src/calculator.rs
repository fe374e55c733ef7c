//! The single entry point: validated input in, immutable result out.

use crate::errors::{CalculationError, ComputationError};
use crate::health_metrics::{
    allocate_macros, calculate_bmr_katch_mcardle, calculate_target_calories, calculate_tdee,
    carb_ratio, classify_body_fat, derive_composition, macro_percentages, protein_multiplier,
    ActivityBasis,
};
use crate::models::CompositionInput;
use crate::types::{CompositionResult, EnergySource, MassSummary};
use crate::units::round_to;
use crate::validation::{validate, ValidationError};
use tracing::debug;

/// Resolved BMR/TDEE pair in whole kcal
struct Energy {
    source: EnergySource,
    bmr: f64,
    tdee: f64,
}

fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, ComputationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ComputationError::NonFinite { quantity })
    }
}

fn missing(field: &str) -> CalculationError {
    CalculationError::Invalid(vec![ValidationError::new(field, "is required")])
}

fn resolve_energy(input: &CompositionInput, lean_mass_kg: f64) -> Result<Energy, CalculationError> {
    if input.known_metrics {
        let bmr = input.measured_bmr.ok_or_else(|| missing("measured_bmr"))?;
        let tdee = input.measured_tdee.ok_or_else(|| missing("measured_tdee"))?;
        return Ok(Energy {
            source: EnergySource::Measured,
            bmr: bmr.round(),
            tdee: tdee.round(),
        });
    }

    let activity = match (input.active_energy, input.activity_level) {
        (Some(kcal), _) => ActivityBasis::ActiveEnergy(kcal),
        (None, Some(multiplier)) => ActivityBasis::Multiplier(multiplier),
        (None, None) => return Err(missing("activity_level")),
    };

    let bmr = ensure_finite("BMR", calculate_bmr_katch_mcardle(lean_mass_kg))?.round();
    let tdee = ensure_finite("TDEE", calculate_tdee(bmr, activity))?.round();

    Ok(Energy {
        source: EnergySource::Estimated,
        bmr,
        tdee,
    })
}

/// Compute body composition, energy and macro targets for one input.
///
/// The input is validated in full first; on any failure every field error
/// is returned and no result is produced.
pub fn compute(input: &CompositionInput) -> Result<CompositionResult, CalculationError> {
    validate(input)?;

    let body = derive_composition(&input.composition, input.unit);
    let body_fat_percent = body.body_fat_percent()?;
    let lean_mass_kg = ensure_finite("lean mass", body.lean_mass_kg)?;
    let fat_mass_kg = ensure_finite("fat mass", body.fat_mass_kg)?;

    let energy = resolve_energy(input, lean_mass_kg)?;
    let target_calories =
        calculate_target_calories(energy.tdee, input.weight_goal, input.daily_adjustment).round();

    let macros = allocate_macros(
        target_calories,
        lean_mass_kg,
        protein_multiplier(input.weight_goal, input.age),
        carb_ratio(input.dietary_approach, input.insulin_resistance),
    );

    debug!(
        body_fat_percent,
        source = ?energy.source,
        bmr = energy.bmr,
        tdee = energy.tdee,
        target = target_calories,
        goal = %input.weight_goal,
        "computed body composition"
    );

    Ok(CompositionResult {
        lean_mass_kg,
        fat_mass_kg,
        body_fat_percent,
        body_fat_category: classify_body_fat(body_fat_percent),
        energy_source: energy.source,
        bmr_kcal: energy.bmr,
        tdee_kcal: energy.tdee,
        target_calories_kcal: target_calories,
        macro_percentages: macro_percentages(&macros, target_calories),
        macros,
        display: MassSummary {
            unit: input.unit,
            lean_mass: round_to(input.unit.from_kg(lean_mass_kg), 1),
            fat_mass: round_to(input.unit.from_kg(fat_mass_kg), 1),
            total_mass: round_to(input.unit.from_kg(body.total_kg()), 1),
        },
    })
}
