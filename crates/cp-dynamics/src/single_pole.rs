//! Cart carrying a single hinged pole.
//!
//! The pole is modeled with its centre of mass at half its length. With
//! `l` the half-length, `m` the pole mass and `M` the cart plus pole mass:
//!
//! ```text
//! ẍ = ( m·g·sinθ·cosθ − 7/3·(F + m·l·θ̇²·sinθ − μc·ẋ) − μp·θ̇·cosθ / l )
//!     / ( m·cos²θ − 7/3·M )
//!
//! θ̈ = 3/(7·l) · ( g·sinθ − ẍ·cosθ − μp·θ̇ / (m·l) )
//! ```
//!
//! `θ` is the clockwise deviation from upright, so `θ = 0` is the unstable
//! equilibrium and `θ = π` hangs straight down.

use cp_core::Real;

use crate::model::{EquationsOfMotion, layout};
use crate::params::SinglePoleParams;

/// Accelerations produced by [`SinglePole::compute_accelerations`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinglePoleAccelerations<T> {
    /// Cart acceleration (m/s²)
    pub cart: T,
    /// Pole angular acceleration (rad/s²)
    pub pole: T,
}

/// Single-pole equations with parameters bound at construction.
#[derive(Clone, Debug)]
pub struct SinglePole<T> {
    params: SinglePoleParams<T>,
    half_length: T,
    total_mass: T,
    seven_thirds: T,
    pole_gain: T,
}

impl<T: Real> Default for SinglePole<T> {
    fn default() -> Self {
        Self::new(SinglePoleParams::default())
    }
}

impl<T: Real> SinglePole<T> {
    pub fn new(params: SinglePoleParams<T>) -> Self {
        let half_length = params.pole.half_length();
        Self {
            params,
            half_length,
            total_mass: params.total_mass(),
            seven_thirds: T::lit(7.0) / T::lit(3.0),
            pole_gain: T::lit(3.0) / (T::lit(7.0) * half_length),
        }
    }

    pub fn params(&self) -> &SinglePoleParams<T> {
        &self.params
    }

    /// Cart and pole accelerations for `state` under horizontal `force` (N).
    pub fn compute_accelerations(&self, state: &[T; 4], force: T) -> SinglePoleAccelerations<T> {
        let p = &self.params;
        let g = p.gravity;
        let m = p.pole.mass;
        let l = self.half_length;

        let x_dot = state[layout::X_DOT];
        let theta_dot = state[layout::THETA1_DOT];
        let (sin, cos) = state[layout::THETA1].sin_cos();

        let numerator = m * g * sin * cos
            - self.seven_thirds
                * (force + m * l * theta_dot * theta_dot * sin - p.track_friction * x_dot)
            - p.pivot_friction * theta_dot * cos / l;
        let denominator = m * cos * cos - self.seven_thirds * self.total_mass;
        let cart = numerator / denominator;

        let pole = self.pole_gain * (g * sin - cart * cos - p.pivot_friction * theta_dot / (m * l));

        SinglePoleAccelerations { cart, pole }
    }

    /// Kinetic plus potential energy, conserved when both friction
    /// coefficients are zero and no force is applied.
    pub fn mechanical_energy(&self, state: &[T; 4]) -> T {
        let m = self.params.pole.mass;
        let l = self.half_length;
        let x_dot = state[layout::X_DOT];
        let theta_dot = state[layout::THETA1_DOT];
        let cos = state[layout::THETA1].cos();

        T::lit(0.5) * self.total_mass * x_dot * x_dot
            + m * l * x_dot * theta_dot * cos
            + T::lit(7.0 / 6.0) * m * l * l * theta_dot * theta_dot
            + m * self.params.gravity * l * cos
    }
}

impl<T: Real> EquationsOfMotion<T, 4> for SinglePole<T> {
    fn derivative(&self, state: &[T; 4], force: T, out: &mut [T; 4]) {
        let acc = self.compute_accelerations(state, force);
        out[layout::X] = state[layout::X_DOT];
        out[layout::X_DOT] = acc.cart;
        out[layout::THETA1] = state[layout::THETA1_DOT];
        out[layout::THETA1_DOT] = acc.pole;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upright_at_rest_has_no_acceleration() {
        let eq = SinglePole::<f64>::default();
        let acc = eq.compute_accelerations(&[0.0; 4], 0.0);
        assert_eq!(acc.cart, 0.0);
        assert_eq!(acc.pole, 0.0);
    }

    #[test]
    fn leaning_pole_keeps_falling() {
        let eq = SinglePole::<f64>::default();
        let acc = eq.compute_accelerations(&[0.0, 0.0, 0.1, 0.0], 0.0);
        assert!(acc.pole > 0.0);
        assert!(acc.cart < 0.0);
    }

    #[test]
    fn push_accelerates_cart_and_tips_pole_back() {
        let eq = SinglePole::<f64>::default();
        let acc = eq.compute_accelerations(&[0.0; 4], 10.0);
        assert!(acc.cart > 0.0);
        assert!(acc.pole < 0.0);
    }

    #[test]
    fn matches_closed_form_by_hand() {
        // Horizontal pole at rest: sin = 1, cos = 0.
        let eq = SinglePole::<f64>::default();
        let theta = std::f64::consts::FRAC_PI_2;
        let acc = eq.compute_accelerations(&[0.0, 0.0, theta, 0.0], 0.0);

        let (m, g, l, big_m) = (0.1, 9.8, 0.5, 1.1);
        let (s, c) = theta.sin_cos();
        let k = 7.0 / 3.0;
        let cart = (m * g * s * c) / (m * c * c - k * big_m);
        let pole = 3.0 / (7.0 * l) * (g * s - cart * c);
        assert!((acc.cart - cart).abs() < 1e-14);
        assert!((acc.pole - pole).abs() < 1e-12);
        assert!((acc.pole - 8.4).abs() < 1e-9);
    }

    #[test]
    fn derivative_slots_follow_layout() {
        let eq = SinglePole::<f64>::default();
        let state = [1.0, 2.0, 0.3, 4.0];
        let mut out = [0.0; 4];
        eq.derivative(&state, 0.5, &mut out);
        let acc = eq.compute_accelerations(&state, 0.5);
        assert_eq!(out, [2.0, acc.cart, 4.0, acc.pole]);
    }

    #[test]
    fn energy_of_hanging_pole_is_minimal() {
        let eq = SinglePole::<f64>::new(SinglePoleParams::default().frictionless());
        let down = eq.mechanical_energy(&[0.0, 0.0, std::f64::consts::PI, 0.0]);
        let up = eq.mechanical_energy(&[0.0; 4]);
        assert!((up - 0.1 * 9.8 * 0.5).abs() < 1e-12);
        assert!((down + 0.1 * 9.8 * 0.5).abs() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mirrored_state_negates_accelerations(
            x_dot in -5.0f64..5.0,
            theta in -3.0f64..3.0,
            theta_dot in -10.0f64..10.0,
            force in -20.0f64..20.0,
        ) {
            let eq = SinglePole::<f64>::default();
            let a = eq.compute_accelerations(&[0.0, x_dot, theta, theta_dot], force);
            let b = eq.compute_accelerations(&[0.0, -x_dot, -theta, -theta_dot], -force);
            prop_assert!((a.cart + b.cart).abs() <= 1e-12 * (1.0 + a.cart.abs()));
            prop_assert!((a.pole + b.pole).abs() <= 1e-12 * (1.0 + a.pole.abs()));
        }

        #[test]
        fn cart_position_does_not_enter(
            x in -100.0f64..100.0,
            theta in -3.0f64..3.0,
            theta_dot in -10.0f64..10.0,
        ) {
            let eq = SinglePole::<f64>::default();
            let a = eq.compute_accelerations(&[0.0, 0.3, theta, theta_dot], 1.0);
            let b = eq.compute_accelerations(&[x, 0.3, theta, theta_dot], 1.0);
            prop_assert_eq!(a, b);
        }
    }
}
