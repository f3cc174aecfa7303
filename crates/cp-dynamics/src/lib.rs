//! Cart-pole equations of motion.
//!
//! Provides:
//! - Physical parameter sets with textbook defaults
//! - Closed-form accelerations for a cart carrying one or two hinged poles
//! - The [`EquationsOfMotion`] seam integrators are generic over
//!
//! Everything here is pure arithmetic and generic over [`cp_core::Real`].
//! Degenerate configurations (a vanishing denominator in the cart equation)
//! are not guarded: they surface as Inf/NaN in the returned accelerations.

pub mod double_pole;
pub mod model;
pub mod params;
pub mod single_pole;

pub use double_pole::{DoublePole, DoublePoleAccelerations};
pub use model::{EquationsOfMotion, layout};
pub use params::{DoublePoleParams, PoleParams, SinglePoleParams};
pub use single_pole::{SinglePole, SinglePoleAccelerations};
