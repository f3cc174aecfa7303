//! Cart carrying two independently hinged poles.
//!
//! Each pole contributes additively to the numerator and denominator of the
//! cart equation; each pole's angular acceleration then follows from the
//! shared cart acceleration and its own angle, rate and half-length.
//!
//! ```text
//! ẍ = ( Σ[m_i·g·sinθ_i·cosθ_i − μp·θ̇_i·cosθ_i / l_i]
//!       − 7/3·(F + Σ m_i·l_i·θ̇_i²·sinθ_i − μc·ẋ) )
//!     / ( Σ m_i·cos²θ_i − 7/3·M )
//!
//! θ̈_i = 3/(7·l_i) · ( g·sinθ_i − ẍ·cosθ_i − μp·θ̇_i / (m_i·l_i) )
//! ```
//!
//! `7/3` is the floating point quotient in every precision.

use cp_core::Real;

use crate::model::{EquationsOfMotion, layout};
use crate::params::{DoublePoleParams, PoleParams};

/// Accelerations produced by [`DoublePole::compute_accelerations`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoublePoleAccelerations<T> {
    pub cart: T,
    pub pole1: T,
    pub pole2: T,
}

/// Per-pole quantities cached at construction.
#[derive(Clone, Copy, Debug)]
struct PoleTerms<T> {
    mass: T,
    half_length: T,
    gain: T,
}

impl<T: Real> PoleTerms<T> {
    fn new(pole: &PoleParams<T>) -> Self {
        let half_length = pole.half_length();
        Self {
            mass: pole.mass,
            half_length,
            gain: T::lit(3.0) / (T::lit(7.0) * half_length),
        }
    }
}

/// Double-pole equations with parameters bound at construction.
#[derive(Clone, Debug)]
pub struct DoublePole<T> {
    params: DoublePoleParams<T>,
    poles: [PoleTerms<T>; 2],
    total_mass: T,
    seven_thirds: T,
}

impl<T: Real> Default for DoublePole<T> {
    fn default() -> Self {
        Self::new(DoublePoleParams::default())
    }
}

impl<T: Real> DoublePole<T> {
    pub fn new(params: DoublePoleParams<T>) -> Self {
        Self {
            params,
            poles: [PoleTerms::new(&params.pole1), PoleTerms::new(&params.pole2)],
            total_mass: params.total_mass(),
            seven_thirds: T::lit(7.0) / T::lit(3.0),
        }
    }

    pub fn params(&self) -> &DoublePoleParams<T> {
        &self.params
    }

    pub fn compute_accelerations(&self, state: &[T; 6], force: T) -> DoublePoleAccelerations<T> {
        let p = &self.params;
        let g = p.gravity;
        let x_dot = state[layout::X_DOT];
        let angles = [state[layout::THETA1], state[layout::THETA2]];
        let rates = [state[layout::THETA1_DOT], state[layout::THETA2_DOT]];
        let trig = [angles[0].sin_cos(), angles[1].sin_cos()];

        let mut gravity_terms = T::zero();
        let mut centripetal = T::zero();
        let mut mass_terms = T::zero();
        for ((pole, &(sin, cos)), &rate) in self.poles.iter().zip(&trig).zip(&rates) {
            gravity_terms = gravity_terms + pole.mass * g * sin * cos
                - p.pivot_friction * rate * cos / pole.half_length;
            centripetal = centripetal + pole.mass * pole.half_length * rate * rate * sin;
            mass_terms = mass_terms + pole.mass * cos * cos;
        }

        let numerator = gravity_terms
            - self.seven_thirds * (force + centripetal - p.track_friction * x_dot);
        let denominator = mass_terms - self.seven_thirds * self.total_mass;
        let cart = numerator / denominator;

        let pole_accel = |i: usize| {
            let pole = &self.poles[i];
            let (sin, cos) = trig[i];
            pole.gain
                * (g * sin - cart * cos - p.pivot_friction * rates[i] / (pole.mass * pole.half_length))
        };

        DoublePoleAccelerations {
            cart,
            pole1: pole_accel(0),
            pole2: pole_accel(1),
        }
    }

    /// Kinetic plus potential energy of cart and both poles.
    pub fn mechanical_energy(&self, state: &[T; 6]) -> T {
        let x_dot = state[layout::X_DOT];
        let mut energy = T::lit(0.5) * self.total_mass * x_dot * x_dot;
        for (pole, (theta, rate)) in self.poles.iter().zip([
            (state[layout::THETA1], state[layout::THETA1_DOT]),
            (state[layout::THETA2], state[layout::THETA2_DOT]),
        ]) {
            let (m, l) = (pole.mass, pole.half_length);
            let cos = theta.cos();
            energy = energy
                + m * l * x_dot * rate * cos
                + T::lit(7.0 / 6.0) * m * l * l * rate * rate
                + m * self.params.gravity * l * cos;
        }
        energy
    }
}

impl<T: Real> EquationsOfMotion<T, 6> for DoublePole<T> {
    fn derivative(&self, state: &[T; 6], force: T, out: &mut [T; 6]) {
        let acc = self.compute_accelerations(state, force);
        out[layout::X] = state[layout::X_DOT];
        out[layout::X_DOT] = acc.cart;
        out[layout::THETA1] = state[layout::THETA1_DOT];
        out[layout::THETA1_DOT] = acc.pole1;
        out[layout::THETA2] = state[layout::THETA2_DOT];
        out[layout::THETA2_DOT] = acc.pole2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upright_at_rest_has_no_acceleration() {
        let eq = DoublePole::<f64>::default();
        let acc = eq.compute_accelerations(&[0.0; 6], 0.0);
        assert_eq!(acc.cart, 0.0);
        assert_eq!(acc.pole1, 0.0);
        assert_eq!(acc.pole2, 0.0);
    }

    #[test]
    fn derivative_slots_follow_layout() {
        let eq = DoublePole::<f64>::default();
        let state = [10.0, 1.0, 0.2, 2.0, -0.1, 3.0];
        let mut out = [0.0; 6];
        eq.derivative(&state, -1.0, &mut out);
        let acc = eq.compute_accelerations(&state, -1.0);
        assert_eq!(out, [1.0, acc.cart, 2.0, acc.pole1, 3.0, acc.pole2]);
    }

    #[test]
    fn shorter_pole_reacts_faster() {
        let eq = DoublePole::<f64>::default();
        let acc = eq.compute_accelerations(&[0.0, 0.0, 0.1, 0.0, 0.1, 0.0], 0.0);
        assert!(acc.pole1 > 0.0);
        assert!(acc.pole2 > acc.pole1);
    }

    #[test]
    fn single_precision_uses_fractional_seven_thirds() {
        let state64 = [0.0, 0.5, 0.7, -1.2, -0.4, 2.0];
        let state32 = state64.map(|v| v as f32);
        let a64 = DoublePole::<f64>::default().compute_accelerations(&state64, 3.0);
        let a32 = DoublePole::<f32>::default().compute_accelerations(&state32, 3.0);
        assert!((a64.cart - a32.cart as f64).abs() < 1e-4 * (1.0 + a64.cart.abs()));
        assert!((a64.pole1 - a32.pole1 as f64).abs() < 1e-4 * (1.0 + a64.pole1.abs()));
        assert!((a64.pole2 - a32.pole2 as f64).abs() < 1e-4 * (1.0 + a64.pole2.abs()));
    }
}
