//! Shared application service layer for the cart-pole tools.
//!
//! Turns scenario definitions into typed integrators, runs them, and
//! packages the trajectory and summary for front ends.

pub mod error;
pub mod model_build;
pub mod project_service;
pub mod run_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use model_build::{double_pole_params, integrator_type, single_pole_params};
pub use project_service::{load_scenario, reference_decay, validate_scenario};
pub use run_service::{RunOutput, RunTimingSummary, run_scenario, run_scenario_file};
