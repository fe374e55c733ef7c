//! Body Composition Calculator WASM Module
//!
//! Browser bindings for the form wizard. Records cross the boundary as JSON
//! strings in the same camelCase shape the core serializes, and every call
//! answers with an envelope instead of throwing:
//!
//! ```json
//! { "ok": true, "result": { ... } }
//! { "ok": false, "errors": [{ "field": "age", "message": "...", "label": "Age" }] }
//! ```

use body_composition_shared::health_metrics::calculate_bmr_katch_mcardle;
use body_composition_shared::{
    self as calc, ActivityLevel, CalculationError, CompositionInput, CompositionResult,
    ValidationError, WeightUnit, WizardStep,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<CompositionResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl Envelope {
    fn ok(result: Option<CompositionResult>) -> Self {
        Self {
            ok: true,
            result,
            errors: Vec::new(),
            message: None,
        }
    }

    fn invalid(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: false,
            result: None,
            errors,
            message: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            ok: false,
            result: None,
            errors: Vec::new(),
            message: Some(message),
        }
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"ok":false,"message":"failed to encode response"}"#.to_string())
    }
}

fn parse_input(input_json: &str) -> Result<CompositionInput, Envelope> {
    serde_json::from_str(input_json)
        .map_err(|e| Envelope::invalid(vec![ValidationError::new("input", &e.to_string())]))
}

/// Run the full calculation on a JSON-encoded input record
#[wasm_bindgen]
pub fn compute_composition(input_json: &str) -> String {
    let envelope = match parse_input(input_json) {
        Ok(input) => match calc::compute(&input) {
            Ok(result) => Envelope::ok(Some(result)),
            Err(CalculationError::Invalid(errors)) => Envelope::invalid(errors),
            Err(err @ CalculationError::Computation(_)) => Envelope::failed(err.to_string()),
        },
        Err(envelope) => envelope,
    };
    envelope.to_json()
}

/// Validate one wizard step so the form can decide whether to advance
#[wasm_bindgen(js_name = validate_step)]
pub fn validate_wizard_step(step: &str, input_json: &str) -> String {
    let step: WizardStep = match step.parse() {
        Ok(step) => step,
        Err(msg) => return Envelope::invalid(vec![ValidationError::new("step", &msg)]).to_json(),
    };
    let envelope = match parse_input(input_json) {
        Ok(input) => match calc::validate_step(step, &input) {
            Ok(()) => Envelope::ok(None),
            Err(errors) => Envelope::invalid(errors),
        },
        Err(envelope) => envelope,
    };
    envelope.to_json()
}

/// Convert pounds to kilograms
#[wasm_bindgen]
pub fn lb_to_kg(lb: f64) -> f64 {
    WeightUnit::Lb.to_kg(lb)
}

/// Convert kilograms to pounds
#[wasm_bindgen]
pub fn kg_to_lb(kg: f64) -> f64 {
    WeightUnit::Kg.to_lb(kg)
}

/// Katch-McArdle BMR for live feedback while the user types
#[wasm_bindgen]
pub fn katch_mcardle_bmr(lean_mass_kg: f64) -> f64 {
    if lean_mass_kg < 0.0 || !lean_mass_kg.is_finite() {
        return 0.0;
    }
    calculate_bmr_katch_mcardle(lean_mass_kg)
}

/// Multiplier for a named activity preset, or `undefined` if unknown
#[wasm_bindgen]
pub fn activity_multiplier(preset: &str) -> Option<f64> {
    preset.parse::<ActivityLevel>().ok().map(|level| level.multiplier())
}
