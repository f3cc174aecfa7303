//! cp-core: stable foundation for the cart-pole workspace.
//!
//! Contains:
//! - numeric (Real float trait + tolerances + float helpers)
//! - vector (elementwise fused multiply-add over fixed-length buffers)
//! - timing (wall-clock timers, off unless enabled)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod vector;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use vector::{
    fused_multiply_add, fused_multiply_add_array, fused_multiply_add_assign,
    fused_multiply_add_assign_array,
};
