//! Fixed-step time integrators.
//!
//! One [`Integrator`] type covers Euler, Heun (RK2) and classic RK4. The
//! method is picked at construction through [`IntegratorType`] and stored as
//! a private [`Scheme`] variant that owns exactly the scratch buffers that
//! method needs. Buffers are reused on every step and never escape.

use cp_core::{Real, fused_multiply_add_array, fused_multiply_add_assign_array};
use cp_dynamics::{DoublePole, EquationsOfMotion, SinglePole, layout};

use crate::error::{SimError, SimResult};

/// Integrator selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IntegratorType {
    /// Forward Euler (1st-order, 1 derivative evaluation per step).
    Euler,
    /// Heun's method (2nd-order, 2 derivative evaluations per step).
    Rk2,
    /// Classic 4th-order Runge-Kutta (default, 4 derivative evaluations per step).
    #[default]
    Rk4,
}

impl IntegratorType {
    pub const ALL: [IntegratorType; 3] = [Self::Euler, Self::Rk2, Self::Rk4];

    /// Global order of accuracy.
    pub fn order(self) -> u32 {
        match self {
            Self::Euler => 1,
            Self::Rk2 => 2,
            Self::Rk4 => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Euler => "euler",
            Self::Rk2 => "rk2",
            Self::Rk4 => "rk4",
        }
    }
}

impl std::fmt::Display for IntegratorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-method working buffers.
#[derive(Clone, Debug)]
enum Scheme<T, const N: usize> {
    Euler {
        k1: [T; N],
    },
    Rk2 {
        k1: [T; N],
        k2: [T; N],
        scratch: [T; N],
    },
    Rk4 {
        k1: [T; N],
        k2: [T; N],
        k3: [T; N],
        k4: [T; N],
        scratch: [T; N],
    },
}

impl<T: Real, const N: usize> Scheme<T, N> {
    fn new(kind: IntegratorType) -> Self {
        let zero = [T::zero(); N];
        match kind {
            IntegratorType::Euler => Self::Euler { k1: zero },
            IntegratorType::Rk2 => Self::Rk2 {
                k1: zero,
                k2: zero,
                scratch: zero,
            },
            IntegratorType::Rk4 => Self::Rk4 {
                k1: zero,
                k2: zero,
                k3: zero,
                k4: zero,
                scratch: zero,
            },
        }
    }

    fn kind(&self) -> IntegratorType {
        match self {
            Self::Euler { .. } => IntegratorType::Euler,
            Self::Rk2 { .. } => IntegratorType::Rk2,
            Self::Rk4 { .. } => IntegratorType::Rk4,
        }
    }
}

/// Fixed-step integrator owning its state vector.
///
/// `N` is the state length (4 for one pole, 6 for two). The state is only
/// ever mutated by [`Integrator::advance`]; callers get a read-only view.
#[derive(Clone, Debug)]
pub struct Integrator<T, E, const N: usize> {
    equations: E,
    state: [T; N],
    tau: T,
    half_tau: T,
    tau_over_six: T,
    scheme: Scheme<T, N>,
    steps: u64,
}

pub type SinglePoleIntegrator<T> = Integrator<T, SinglePole<T>, { layout::SINGLE_POLE_LEN }>;
pub type DoublePoleIntegrator<T> = Integrator<T, DoublePole<T>, { layout::DOUBLE_POLE_LEN }>;

impl<T, E, const N: usize> Integrator<T, E, N>
where
    T: Real,
    E: EquationsOfMotion<T, N>,
{
    /// Create an integrator.
    ///
    /// # Errors
    /// - [`SimError::StateLength`] if `initial_state` does not hold exactly `N` values
    /// - [`SimError::InvalidTimestep`] if `tau` is not a positive finite number
    pub fn new(kind: IntegratorType, tau: T, initial_state: &[T], equations: E) -> SimResult<Self> {
        let state: [T; N] = initial_state
            .try_into()
            .map_err(|_| SimError::StateLength {
                expected: N,
                actual: initial_state.len(),
            })?;
        if !tau.is_finite() || tau <= T::zero() {
            return Err(SimError::InvalidTimestep { value: tau.as_f64() });
        }

        tracing::debug!(
            integrator = %kind,
            precision = T::NAME,
            state_len = N,
            tau = tau.as_f64(),
            "integrator constructed"
        );

        Ok(Self {
            equations,
            state,
            tau,
            half_tau: tau * T::lit(0.5),
            tau_over_six: tau / T::lit(6.0),
            scheme: Scheme::new(kind),
            steps: 0,
        })
    }

    /// Advance the owned state by one timestep under a constant `force`.
    pub fn advance(&mut self, force: T) {
        let eq = &self.equations;
        let state = &mut self.state;

        match &mut self.scheme {
            Scheme::Euler { k1 } => {
                eq.derivative(state, force, k1);
                fused_multiply_add_assign_array(state, k1, self.tau);
            }
            Scheme::Rk2 { k1, k2, scratch } => {
                eq.derivative(state, force, k1);
                fused_multiply_add_array(scratch, state, k1, self.tau);
                eq.derivative(scratch, force, k2);
                for i in 0..N {
                    state[i] = (k1[i] + k2[i]).mul_add(self.half_tau, state[i]);
                }
            }
            Scheme::Rk4 {
                k1,
                k2,
                k3,
                k4,
                scratch,
            } => {
                eq.derivative(state, force, k1);

                fused_multiply_add_array(scratch, state, k1, self.half_tau);
                eq.derivative(scratch, force, k2);

                fused_multiply_add_array(scratch, state, k2, self.half_tau);
                eq.derivative(scratch, force, k3);

                fused_multiply_add_array(scratch, state, k3, self.tau);
                eq.derivative(scratch, force, k4);

                let two = T::lit(2.0);
                for i in 0..N {
                    let weighted = k1[i] + two * (k2[i] + k3[i]) + k4[i];
                    state[i] = weighted.mul_add(self.tau_over_six, state[i]);
                }
            }
        }

        self.steps += 1;
    }

    /// Advance `steps` times under the same force.
    pub fn advance_many(&mut self, force: T, steps: usize) {
        for _ in 0..steps {
            self.advance(force);
        }
    }
}

impl<T: Real, E, const N: usize> Integrator<T, E, N> {
    pub fn state(&self) -> &[T; N] {
        &self.state
    }

    pub fn tau(&self) -> T {
        self.tau
    }

    pub fn kind(&self) -> IntegratorType {
        self.scheme.kind()
    }

    pub fn equations(&self) -> &E {
        &self.equations
    }

    /// Number of completed [`Integrator::advance`] calls.
    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    /// Simulated time covered so far.
    pub fn elapsed(&self) -> T {
        T::lit(self.steps as f64) * self.tau
    }
}

impl<T: Real> SinglePoleIntegrator<T> {
    /// Single-pole integrator with default physical parameters.
    pub fn single_pole(kind: IntegratorType, tau: T, initial_state: &[T]) -> SimResult<Self> {
        Self::new(kind, tau, initial_state, SinglePole::default())
    }
}

impl<T: Real> DoublePoleIntegrator<T> {
    /// Double-pole integrator with default physical parameters.
    pub fn double_pole(kind: IntegratorType, tau: T, initial_state: &[T]) -> SimResult<Self> {
        Self::new(kind, tau, initial_state, DoublePole::default())
    }
}
