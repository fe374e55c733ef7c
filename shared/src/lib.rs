//! Body Composition Calculator core
//!
//! Pure calculation library shared by the browser (WASM) and command-line
//! front ends: unit conversion, lean/fat derivation, Katch-McArdle energy
//! estimates, macro allocation and per-step input validation.

pub mod calculator;
pub mod errors;
pub mod health_metrics;
pub mod models;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use calculator::compute;
pub use errors::*;
pub use models::*;
pub use types::*;
pub use units::{to_kg, to_lb, WeightUnit};
pub use validation::{validate, validate_step, ValidationError, WizardStep};
