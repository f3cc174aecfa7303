//! EquationsOfMotion trait for pluggable cart-pole models.

use cp_core::Real;

/// State vector index layout.
///
/// Positions and their rates are interleaved: every even slot holds a
/// position-like quantity and the following odd slot holds its rate.
pub mod layout {
    /// Cart position (m)
    pub const X: usize = 0;
    /// Cart velocity (m/s)
    pub const X_DOT: usize = 1;
    /// First pole angle from vertical, clockwise positive (rad)
    pub const THETA1: usize = 2;
    /// First pole angular velocity (rad/s)
    pub const THETA1_DOT: usize = 3;
    /// Second pole angle (rad), double-pole only
    pub const THETA2: usize = 4;
    /// Second pole angular velocity (rad/s), double-pole only
    pub const THETA2_DOT: usize = 5;

    pub const SINGLE_POLE_LEN: usize = 4;
    pub const DOUBLE_POLE_LEN: usize = 6;
}

/// A dynamical system with an `N`-element interleaved state.
///
/// Implementors must be pure: the derivative depends only on `state`,
/// `force` and parameters bound at construction.
pub trait EquationsOfMotion<T: Real, const N: usize> {
    /// Write `d(state)/dt` into `out`.
    ///
    /// Slot `2i` receives `state[2i + 1]` (the rate already in the state) and
    /// slot `2i + 1` receives the computed acceleration.
    fn derivative(&self, state: &[T; N], force: T, out: &mut [T; N]);
}
