//! Fixed-step simulation of cart-pole systems.
//!
//! Provides:
//! - Euler, Heun (RK2) and classic RK4 integrators over any [`cp_dynamics::EquationsOfMotion`]
//! - Single and double precision through one generic implementation
//! - A recording driver with constant or scheduled applied force
//! - Parallel evaluation of independent runs

pub mod batch;
pub mod error;
pub mod integrator;
pub mod sim;

// Re-exports for public API
pub use batch::{BatchJob, BatchOutput, run_batch};
pub use error::{SimError, SimResult};
pub use integrator::{DoublePoleIntegrator, Integrator, IntegratorType, SinglePoleIntegrator};
pub use sim::{DEFAULT_MAX_STEPS, SimOptions, SimRecord, run_sim, run_sim_with};
