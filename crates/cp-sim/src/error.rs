//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while constructing or driving an integrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("State vector has length {actual}, expected {expected}")]
    StateLength { expected: usize, actual: usize },

    #[error("Timestep must be positive and finite, got {value}")]
    InvalidTimestep { value: f64 },

    #[error("Run needs {requested} steps, limit is {max_steps}")]
    StepLimit { requested: f64, max_steps: usize },

    #[error("Core error: {0}")]
    Core(#[from] cp_core::CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
