//! Run summary types.

use std::path::Path;

use cp_core::{Real, all_finite};
use cp_sim::{Integrator, SimRecord};
use serde::{Deserialize, Serialize};

use crate::{ResultsError, ResultsResult};

/// Scenario-level labels carried into a summary.
#[derive(Debug, Clone)]
pub struct SummaryHeader {
    pub name: String,
    pub model: String,
    pub precision: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub name: String,
    pub model: String,
    pub integrator: String,
    pub precision: String,
    pub tau_s: f64,
    pub steps: u64,
    pub points: usize,
    /// State after the last step; non-finite components are `None`.
    pub final_state: Vec<Option<f64>>,
    /// Largest finite |theta| seen, one entry per pole.
    pub max_abs_theta: Vec<f64>,
    pub diverged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_non_finite_point: Option<usize>,
}

impl RunSummary {
    /// Summarise a finished run from its record and the integrator that
    /// produced it.
    pub fn from_run<T, E, const N: usize>(
        header: SummaryHeader,
        integrator: &Integrator<T, E, N>,
        record: &SimRecord<T, N>,
    ) -> ResultsResult<Self>
    where
        T: Real,
    {
        if record.is_empty() {
            return Err(ResultsError::EmptyRecord);
        }

        let final_state = integrator.state();
        // Pole angles sit at the even slots after the cart pair.
        let max_abs_theta = (2..N)
            .step_by(2)
            .map(|i| {
                record
                    .x
                    .iter()
                    .chain(std::iter::once(final_state))
                    .map(|s| s[i].as_f64().abs())
                    .filter(|v| v.is_finite())
                    .fold(0.0, f64::max)
            })
            .collect();

        let first_non_finite_point = record.first_non_finite();
        Ok(Self {
            name: header.name,
            model: header.model,
            integrator: integrator.kind().to_string(),
            precision: header.precision,
            tau_s: integrator.tau().as_f64(),
            steps: integrator.steps_taken(),
            points: record.len(),
            final_state: final_state
                .iter()
                .map(|v| Some(v.as_f64()).filter(|v| v.is_finite()))
                .collect(),
            max_abs_theta,
            diverged: first_non_finite_point.is_some() || !all_finite(final_state),
            first_non_finite_point,
        })
    }
}

pub fn save_summary(path: &Path, summary: &RunSummary) -> ResultsResult<()> {
    let content = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_summary(path: &Path) -> ResultsResult<RunSummary> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
