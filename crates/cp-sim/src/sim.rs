//! Simulation runner and result recording.

use cp_core::{Real, all_finite, ensure_finite};
use cp_dynamics::EquationsOfMotion;

use crate::error::{SimError, SimResult};
use crate::integrator::Integrator;

pub const DEFAULT_MAX_STEPS: usize = 10_000_000;

/// Upper bound on up-front record allocation; longer runs grow on demand.
const MAX_PREALLOCATED_POINTS: usize = 1 << 16;

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions<T> {
    /// Simulated duration (seconds); the run takes `floor(duration / tau)` steps
    pub duration: T,
    /// Constant applied force (N), used by [`run_sim`]
    pub force: T,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
}

impl<T: Real> Default for SimOptions<T> {
    fn default() -> Self {
        Self {
            duration: T::lit(15.0),
            force: T::zero(),
            max_steps: DEFAULT_MAX_STEPS,
            record_every: 1,
        }
    }
}

impl<T: Real> SimOptions<T> {
    pub fn with_duration(duration: T) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Number of integrator steps for timestep `tau`.
    ///
    /// # Errors
    /// [`SimError::StepLimit`] if the count exceeds `max_steps` or cannot be
    /// represented as a `usize`.
    pub fn step_count(&self, tau: T) -> SimResult<usize> {
        let requested = (self.duration / tau).floor();
        let limit = SimError::StepLimit {
            requested: requested.as_f64(),
            max_steps: self.max_steps,
        };
        match requested.to_usize() {
            Some(steps) if steps <= self.max_steps => Ok(steps),
            _ => Err(limit),
        }
    }

    fn validate(&self) -> SimResult<()> {
        ensure_finite(self.duration, "duration")?;
        if self.duration < T::zero() {
            return Err(SimError::InvalidArg {
                what: "duration must be non-negative",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        Ok(())
    }
}

/// Record of simulation results.
#[derive(Clone, Debug, PartialEq)]
pub struct SimRecord<T, const N: usize> {
    /// Time points (seconds)
    pub t: Vec<T>,
    /// State snapshots, taken before the step at the matching time
    pub x: Vec<[T; N]>,
}

impl<T: Real, const N: usize> SimRecord<T, N> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            t: Vec::with_capacity(capacity),
            x: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Time series of one state component.
    ///
    /// # Panics
    /// If `index >= N`.
    pub fn column(&self, index: usize) -> Vec<T> {
        assert!(index < N, "state index {index} out of range for length {N}");
        self.x.iter().map(|s| s[index]).collect()
    }

    /// Index of the first snapshot holding an infinite or NaN component.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.x.iter().position(|s| !all_finite(s))
    }

    pub fn last_state(&self) -> Option<&[T; N]> {
        self.x.last()
    }
}

/// Run a fixed-step simulation under the constant force in `opts`.
pub fn run_sim<T, E, const N: usize>(
    integrator: &mut Integrator<T, E, N>,
    opts: &SimOptions<T>,
) -> SimResult<SimRecord<T, N>>
where
    T: Real,
    E: EquationsOfMotion<T, N>,
{
    let force = opts.force;
    run_sim_with(integrator, opts, |_, _, _| force)
}

/// Run a fixed-step simulation, asking `force_fn(step, t, state)` for the
/// applied force before every step.
///
/// The state is snapshotted before each step at `t = step · tau`. A state that
/// turns non-finite is logged once and the run continues, so the caller
/// decides what divergence means.
pub fn run_sim_with<T, E, F, const N: usize>(
    integrator: &mut Integrator<T, E, N>,
    opts: &SimOptions<T>,
    mut force_fn: F,
) -> SimResult<SimRecord<T, N>>
where
    T: Real,
    E: EquationsOfMotion<T, N>,
    F: FnMut(usize, T, &[T; N]) -> T,
{
    opts.validate()?;

    let tau = integrator.tau();
    let steps = opts.step_count(tau)?;
    let t0 = integrator.elapsed();

    tracing::debug!(
        integrator = %integrator.kind(),
        steps,
        record_every = opts.record_every,
        "starting run"
    );

    let mut record = SimRecord::with_capacity(
        steps
            .div_ceil(opts.record_every)
            .min(MAX_PREALLOCATED_POINTS),
    );
    let mut diverged = false;

    for step in 0..steps {
        let t = t0 + T::lit(step as f64) * tau;
        let state = integrator.state();

        if !diverged && !all_finite(state) {
            diverged = true;
            tracing::warn!(step, t = t.as_f64(), "state became non-finite");
        }
        if step % opts.record_every == 0 {
            record.t.push(t);
            record.x.push(*state);
        }

        let force = force_fn(step, t, state);
        integrator.advance(force);
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntegratorType, SinglePoleIntegrator};

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::<f64>::default();
        assert_eq!(opts.duration, 15.0);
        assert_eq!(opts.force, 0.0);
        assert_eq!(opts.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(opts.record_every, 1);
    }

    #[test]
    fn step_count_floors() {
        let opts = SimOptions::with_duration(15.0);
        assert_eq!(opts.step_count(1.0 / 6.0).unwrap(), 90);
        assert_eq!(opts.step_count(0.4).unwrap(), 37);
        assert_eq!(SimOptions::with_duration(0.0).step_count(0.1).unwrap(), 0);
    }

    #[test]
    fn records_one_snapshot_per_step() {
        let mut integ =
            SinglePoleIntegrator::<f64>::single_pole(IntegratorType::Rk4, 0.1, &[0.0, 0.0, 0.5, 0.0])
                .unwrap();
        let record = run_sim(&mut integ, &SimOptions::with_duration(1.0)).unwrap();
        assert_eq!(record.len(), 10);
        assert_eq!(record.x[0], [0.0, 0.0, 0.5, 0.0]);
        assert_eq!(record.t[0], 0.0);
        assert!((record.t[9] - 0.9).abs() < 1e-12);
        assert_eq!(integ.steps_taken(), 10);
    }

    #[test]
    fn decimation_keeps_every_nth_step() {
        let mut integ =
            SinglePoleIntegrator::<f64>::single_pole(IntegratorType::Euler, 0.01, &[0.0; 4])
                .unwrap();
        let opts = SimOptions {
            duration: 1.0,
            record_every: 25,
            ..SimOptions::default()
        };
        let record = run_sim(&mut integ, &opts).unwrap();
        assert_eq!(record.len(), 4);
        assert!((record.t[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut integ =
            SinglePoleIntegrator::<f64>::single_pole(IntegratorType::Rk2, 0.01, &[0.0; 4]).unwrap();
        let bad = SimOptions {
            record_every: 0,
            ..SimOptions::default()
        };
        assert!(matches!(run_sim(&mut integ, &bad), Err(SimError::InvalidArg { .. })));

        let bad = SimOptions::with_duration(-1.0);
        assert!(run_sim(&mut integ, &bad).is_err());

        let bad = SimOptions::with_duration(f64::NAN);
        assert!(matches!(run_sim(&mut integ, &bad), Err(SimError::Core(_))));

        let bad = SimOptions {
            max_steps: 0,
            ..SimOptions::default()
        };
        assert!(matches!(run_sim(&mut integ, &bad), Err(SimError::InvalidArg { .. })));
        assert_eq!(integ.steps_taken(), 0);
    }

    #[test]
    fn unrepresentable_step_count_is_an_error() {
        let mut integ =
            SinglePoleIntegrator::<f64>::single_pole(IntegratorType::Rk4, 1e-300, &[0.0; 4])
                .unwrap();
        let err = run_sim(&mut integ, &SimOptions::with_duration(15.0)).unwrap_err();
        assert!(matches!(err, SimError::StepLimit { .. }), "{err}");
        assert_eq!(integ.steps_taken(), 0);
    }

    #[test]
    fn step_limit_rejects_before_allocating() {
        let mut integ =
            SinglePoleIntegrator::<f64>::single_pole(IntegratorType::Euler, 1e-12, &[0.0; 4])
                .unwrap();
        let opts = SimOptions {
            duration: 1e6,
            record_every: 1_000_000_000,
            ..SimOptions::default()
        };
        match run_sim(&mut integ, &opts) {
            Err(SimError::StepLimit { max_steps, .. }) => assert_eq!(max_steps, DEFAULT_MAX_STEPS),
            other => panic!("expected step limit, got {other:?}"),
        }
        assert_eq!(integ.steps_taken(), 0);
    }

    #[test]
    fn step_limit_is_inclusive() {
        let opts = SimOptions {
            duration: 1.0,
            max_steps: 10,
            ..SimOptions::default()
        };
        assert_eq!(opts.step_count(0.1).unwrap(), 10);
        assert!(opts.step_count(0.05).is_err());
    }

    #[test]
    fn force_closure_sees_step_time_and_state() {
        let mut integ =
            SinglePoleIntegrator::<f64>::single_pole(IntegratorType::Rk4, 0.5, &[0.0; 4]).unwrap();
        let mut seen = Vec::new();
        run_sim_with(&mut integ, &SimOptions::with_duration(2.0), |step, t, state| {
            seen.push((step, t, state[0]));
            1.0
        })
        .unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], (0, 0.0, 0.0));
        assert_eq!(seen[3].1, 1.5);
        assert!(seen[3].2 > 0.0, "pushed cart should have moved right");
    }

    #[test]
    fn column_and_divergence_helpers() {
        let record = SimRecord {
            t: vec![0.0, 1.0, 2.0],
            x: vec![[0.0, 1.0], [2.0, f64::NAN], [3.0, 4.0]],
        };
        assert_eq!(record.column(0), vec![0.0, 2.0, 3.0]);
        assert_eq!(record.first_non_finite(), Some(1));
        assert_eq!(record.last_state(), Some(&[3.0, 4.0]));
    }
}
