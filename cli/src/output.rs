//! Output formatting for CLI commands

use anyhow::Result;
use body_composition_shared::{CompositionResult, EnergySource, ValidationError, WeightUnit};
use std::fmt::Write;

const LABEL_WIDTH: usize = 18;

/// Render a result as an aligned text table
pub fn render_table(result: &CompositionResult, precision: u32) -> String {
    let p = precision as usize;
    let unit = result.display.unit;
    let mass = |display: f64, kg: f64| -> String {
        match unit {
            WeightUnit::Kg => format!("{:.p$} kg", kg),
            WeightUnit::Lb => format!("{:.p$} lb ({:.p$} kg)", display, kg),
        }
    };
    let source = match result.energy_source {
        EnergySource::Estimated => "estimated",
        EnergySource::Measured => "measured",
    };

    let width = LABEL_WIDTH;
    let mut out = String::new();
    let mut row = |label: &str, value: String| {
        let _ = writeln!(out, "  {:<width$}{}", label, value);
    };

    row("Lean mass", mass(result.display.lean_mass, result.lean_mass_kg));
    row("Fat mass", mass(result.display.fat_mass, result.fat_mass_kg));
    row(
        "Total mass",
        mass(result.display.total_mass, result.lean_mass_kg + result.fat_mass_kg),
    );
    row(
        "Body fat",
        format!(
            "{:.1} % ({})",
            result.body_fat_percent,
            result.body_fat_category.description()
        ),
    );
    row(&format!("BMR ({})", source), format!("{:.0} kcal", result.bmr_kcal));
    row(&format!("TDEE ({})", source), format!("{:.0} kcal", result.tdee_kcal));
    row("Target", format!("{:.0} kcal", result.target_calories_kcal));
    row(
        "Protein",
        format!(
            "{:.0} g ({:.1} %)",
            result.macros.protein_grams, result.macro_percentages.protein
        ),
    );
    row(
        "Carbohydrate",
        format!(
            "{:.0} g ({:.1} %)",
            result.macros.carb_grams, result.macro_percentages.carb
        ),
    );
    row(
        "Fat",
        format!(
            "{:.0} g ({:.1} %)",
            result.macros.fat_grams, result.macro_percentages.fat
        ),
    );

    format!("Body Composition\n{}", out)
}

/// Render a result as pretty JSON
pub fn render_json(result: &CompositionResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

fn error_lines(errors: &[ValidationError], prefix: &str) -> String {
    errors
        .iter()
        .map(|e| format!("{}{}", prefix, e.user_message()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render validation failures, one per line
pub fn render_errors(errors: &[ValidationError]) -> String {
    error_lines(errors, "  ✗ ")
}

/// Render validation failures nested under a wizard step line
pub fn render_step_errors(errors: &[ValidationError]) -> String {
    error_lines(errors, "      ")
}

/// Render validation failures as a JSON array
pub fn render_errors_json(errors: &[ValidationError]) -> Result<String> {
    Ok(serde_json::to_string_pretty(errors)?)
}
