use thiserror::Error;

/// Input validation failures. Each one is recoverable at the form boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("Parameter `{name}` must be a positive finite number, got {value}.")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Initial population `{name}` must be a non-negative finite number, got {value}.")]
    InvalidInitialState { name: &'static str, value: f64 },

    #[error("Invalid simulation horizon: {reason}")]
    InvalidHorizon { reason: String },
}

impl SimulationError {
    pub(crate) fn horizon(reason: impl Into<String>) -> Self {
        SimulationError::InvalidHorizon {
            reason: reason.into(),
        }
    }
}

/// Raised when a form field name is not one of the recognized options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown configuration option `{0}`.")]
pub struct UnknownOption(pub String);
