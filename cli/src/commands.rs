//! CLI argument definitions and command execution

use crate::config::{AppConfig, OutputFormat};
use crate::input::load_input;
use crate::output::{
    render_errors, render_errors_json, render_json, render_step_errors, render_table,
};
use anyhow::{Context, Result};
use body_composition_shared::{
    compute, validate_step, ActivityLevel, CalculationError, CompositionInput,
    ValidationError, WeightUnit, WizardStep,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

/// Body composition, energy expenditure and macro calculator
#[derive(Parser, Debug)]
#[command(name = "bcc")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute composition, energy and macro targets from an input file
    Compute(ComputeArgs),

    /// Check an input file, optionally for a single wizard step
    Validate(ValidateArgs),

    /// Convert a mass between kilograms and pounds
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Input record (.toml or .json)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format (overrides configuration)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Activity preset (e.g. moderately_active) or raw multiplier (e.g. 1.55)
    #[arg(short, long, value_parser = parse_activity)]
    pub activity: Option<f64>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Input record (.toml or .json)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only validate this wizard step
    #[arg(short, long)]
    pub step: Option<WizardStep>,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Mass to convert
    #[arg(allow_negative_numbers = true)]
    pub value: f64,

    /// Unit the value is expressed in (kg or lb)
    #[arg(long, default_value = "lb")]
    pub from: WeightUnit,
}

/// Accept either an activity preset name or a numeric multiplier
pub fn parse_activity(raw: &str) -> Result<f64, String> {
    if let Ok(multiplier) = raw.trim().parse::<f64>() {
        return Ok(multiplier);
    }
    raw.parse::<ActivityLevel>().map(|level| level.multiplier())
}

/// Replace the input's activity basis with a multiplier from the command line.
///
/// Active energy would otherwise take precedence, so it is dropped.
pub fn apply_activity_override(input: &mut CompositionInput, multiplier: f64) {
    if let Some(kcal) = input.active_energy.take() {
        warn!(active_energy_kcal = kcal, multiplier, "--activity replaces active energy from input");
    }
    input.activity_level = Some(multiplier);
}

/// What a command printed and whether it succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub body: String,
    pub success: bool,
}

impl Report {
    fn success(body: String) -> Self {
        Self {
            body,
            success: true,
        }
    }

    fn failure(body: String) -> Self {
        Self {
            body,
            success: false,
        }
    }
}

/// Run a parsed command against the loaded configuration
pub fn execute(command: &Commands, config: &AppConfig) -> Result<Report> {
    match command {
        Commands::Compute(args) => {
            let mut input = load_input(&args.file)
                .with_context(|| format!("Failed to load input from {}", args.file.display()))?;
            if let Some(multiplier) = args.activity {
                apply_activity_override(&mut input, multiplier);
            }
            let format = args.format.unwrap_or(config.output.format);
            run_compute(&input, format, config.output.precision)
        }
        Commands::Validate(args) => {
            let input = load_input(&args.file)
                .with_context(|| format!("Failed to load input from {}", args.file.display()))?;
            Ok(run_validate(&input, args.step))
        }
        Commands::Convert(args) => Ok(run_convert(args.value, args.from, config.output.precision)),
    }
}

/// Compute and render a single input record
pub fn run_compute(input: &CompositionInput, format: OutputFormat, precision: u32) -> Result<Report> {
    match compute(input) {
        Ok(result) => {
            info!(
                target_kcal = result.target_calories_kcal,
                body_fat_percent = result.body_fat_percent,
                "computation succeeded"
            );
            let body = match format {
                OutputFormat::Table => render_table(&result, precision),
                OutputFormat::Json => render_json(&result)?,
            };
            Ok(Report::success(body))
        }
        Err(CalculationError::Invalid(errors)) => {
            warn!(count = errors.len(), "input failed validation");
            let body = match format {
                OutputFormat::Table => format!("Invalid input:\n{}", render_errors(&errors)),
                OutputFormat::Json => render_errors_json(&errors)?,
            };
            Ok(Report::failure(body))
        }
        Err(err @ CalculationError::Computation(_)) => {
            warn!(error = %err, "computation failed");
            Ok(Report::failure(format!("Computation failed: {}", err)))
        }
    }
}

/// Validate one step, or every step in wizard order
pub fn run_validate(input: &CompositionInput, step: Option<WizardStep>) -> Report {
    let steps: Vec<WizardStep> = match step {
        Some(step) => vec![step],
        None => WizardStep::ALL.to_vec(),
    };

    let mut lines = Vec::new();
    let mut failed: Vec<ValidationError> = Vec::new();
    for step in steps {
        match validate_step(step, input) {
            Ok(()) => lines.push(format!("  ✓ {}", step)),
            Err(errors) => {
                lines.push(format!("  ✗ {}", step));
                lines.push(render_step_errors(&errors));
                failed.extend(errors);
            }
        }
    }

    if failed.is_empty() {
        Report::success(lines.join("\n"))
    } else {
        Report::failure(lines.join("\n"))
    }
}

/// Show a mass in both units
pub fn run_convert(value: f64, from: WeightUnit, precision: u32) -> Report {
    let p = precision as usize;
    let kg = from.to_kg(value);
    let lb = from.to_lb(value);
    Report::success(format!("{:.p$} kg = {:.p$} lb", kg, lb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{parse_input, InputFormat};
    use rstest::rstest;

    const EXAMPLE: &str = r#"
unit = "lb"
age = 62
gender = "male"
activityLevel = 1.55
weightGoal = "LOSE"
dailyAdjustment = -1000

[composition]
mode = "BY_TOTAL_AND_BODYFAT"
totalWeight = 290
bodyFatPercent = 36
"#;

    fn example() -> CompositionInput {
        parse_input(EXAMPLE, InputFormat::Toml).unwrap()
    }

    #[rstest]
    #[case("1.55", 1.55)]
    #[case("sedentary", 1.2)]
    #[case("very_active", 1.725)]
    fn test_parse_activity(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_activity(raw).unwrap(), expected);
    }

    #[test]
    fn test_parse_activity_rejects_garbage() {
        assert!(parse_activity("marathon").is_err());
    }

    #[test]
    fn test_cli_parses_compute() {
        let cli = Cli::try_parse_from(["bcc", "compute", "me.toml", "--format", "json", "-a", "light"])
            .unwrap();
        match cli.command {
            Commands::Compute(args) => {
                assert_eq!(args.file, PathBuf::from("me.toml"));
                assert_eq!(args.format, Some(OutputFormat::Json));
                assert_eq!(args.activity, Some(1.375));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_validate_step_and_convert() {
        let cli = Cli::try_parse_from(["bcc", "validate", "me.json", "--step", "goals"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Validate(ValidateArgs { step: Some(WizardStep::Goals), .. })
        ));

        let cli = Cli::try_parse_from(["bcc", "convert", "290", "--from", "lbs"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Convert(ConvertArgs { from: WeightUnit::Lb, .. })
        ));
    }

    #[test]
    fn test_activity_override_drops_active_energy() {
        let mut input = CompositionInput {
            active_energy: Some(600.0),
            ..example()
        };
        apply_activity_override(&mut input, 1.2);
        assert_eq!(input.active_energy, None);
        assert_eq!(input.activity_level, Some(1.2));

        let result = compute(&input).unwrap();
        assert_eq!(result.tdee_kcal, (result.bmr_kcal * 1.2).round());
    }

    #[test]
    fn test_run_compute_table() {
        let report = run_compute(&example(), OutputFormat::Table, 1).unwrap();
        assert!(report.success);
        assert!(report.body.contains("Dangerously High"));
        assert!(report.body.contains("185 g"));
    }

    #[test]
    fn test_run_compute_invalid_json() {
        let input = CompositionInput {
            age: 15,
            ..example()
        };
        let report = run_compute(&input, OutputFormat::Json, 1).unwrap();
        assert!(!report.success);
        let errors: Vec<ValidationError> = serde_json::from_str(&report.body).unwrap();
        assert_eq!(errors[0].field, "age");
    }

    #[test]
    fn test_run_validate_all_steps() {
        let report = run_validate(&example(), None);
        assert!(report.success);
        assert_eq!(report.body.lines().count(), WizardStep::ALL.len());

        let input = CompositionInput {
            daily_adjustment: 500.0,
            ..example()
        };
        let report = run_validate(&input, Some(WizardStep::Goals));
        assert!(!report.success);
        assert!(report.body.contains("✗ goals"));
        assert!(report.body.contains("Daily Adjustment: must be negative when losing weight"));
    }

    #[test]
    fn test_run_convert() {
        let report = run_convert(100.0, WeightUnit::Lb, 2);
        assert_eq!(report.body, "45.36 kg = 100.00 lb");
        let report = run_convert(1.0, WeightUnit::Kg, 3);
        assert_eq!(report.body, "1.000 kg = 2.205 lb");
    }
}
