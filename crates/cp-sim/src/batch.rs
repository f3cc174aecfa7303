//! Parallel evaluation of independent runs.
//!
//! Every job owns its integrator outright, so runs share nothing and need no
//! synchronisation. Results come back in job order.

use cp_core::Real;
use cp_dynamics::EquationsOfMotion;
use rayon::prelude::*;

use crate::error::SimResult;
use crate::integrator::Integrator;
use crate::sim::{SimOptions, SimRecord, run_sim};

/// One independent run: an integrator plus the options to drive it with.
#[derive(Clone, Debug)]
pub struct BatchJob<T, E, const N: usize> {
    pub integrator: Integrator<T, E, N>,
    pub options: SimOptions<T>,
}

/// Output of one job: the recorded trajectory and the integrator in its
/// final state.
#[derive(Clone, Debug)]
pub struct BatchOutput<T, E, const N: usize> {
    pub record: SimRecord<T, N>,
    pub integrator: Integrator<T, E, N>,
}

/// Run all jobs on the rayon thread pool.
pub fn run_batch<T, E, const N: usize>(
    jobs: Vec<BatchJob<T, E, N>>,
) -> Vec<SimResult<BatchOutput<T, E, N>>>
where
    T: Real,
    E: EquationsOfMotion<T, N> + Send,
{
    tracing::debug!(jobs = jobs.len(), "running batch");
    jobs.into_par_iter()
        .map(|job| {
            let BatchJob {
                mut integrator,
                options,
            } = job;
            let record = run_sim(&mut integrator, &options)?;
            Ok(BatchOutput { record, integrator })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntegratorType, SinglePoleIntegrator};

    #[test]
    fn batch_matches_sequential_runs() {
        let angles = [0.1, 0.5, 1.0, 2.0, 3.0];
        let make = |theta: f64| BatchJob {
            integrator: SinglePoleIntegrator::single_pole(
                IntegratorType::Rk4,
                0.02,
                &[0.0, 0.0, theta, 0.0],
            )
            .unwrap(),
            options: SimOptions::with_duration(2.0),
        };

        let parallel = run_batch(angles.iter().map(|&a| make(a)).collect());
        assert_eq!(parallel.len(), angles.len());

        for (&theta, out) in angles.iter().zip(parallel) {
            let out = out.unwrap();
            let mut job = make(theta);
            let sequential = run_sim(&mut job.integrator, &job.options).unwrap();
            assert_eq!(out.record, sequential);
            assert_eq!(out.integrator.state(), job.integrator.state());
            assert_eq!(out.record.x[0][2], theta);
        }
    }

    #[test]
    fn one_bad_job_does_not_poison_the_rest() {
        let good = BatchJob {
            integrator: SinglePoleIntegrator::<f32>::single_pole(IntegratorType::Euler, 0.1, &[0.0; 4])
                .unwrap(),
            options: SimOptions::with_duration(1.0f32),
        };
        let bad = BatchJob {
            options: SimOptions {
                record_every: 0,
                ..SimOptions::default()
            },
            ..good.clone()
        };
        let results = run_batch(vec![good, bad]);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
