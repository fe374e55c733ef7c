//! Error types for the body composition calculator

use crate::validation::ValidationError;
use thiserror::Error;

/// A derived quantity could not be computed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    #[error("Total body mass is zero; body fat percentage is undefined")]
    ZeroMass,

    #[error("Derived {quantity} is not a finite number")]
    NonFinite { quantity: &'static str },
}

/// Anything `compute` can reject an input with
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Validation failed: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Computation(#[from] ComputationError),
}

impl CalculationError {
    /// Field-tagged validation errors, empty for computation failures
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            CalculationError::Invalid(errors) => errors,
            CalculationError::Computation(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for CalculationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        CalculationError::Invalid(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::user_message)
        .collect::<Vec<_>>()
        .join("; ")
}
