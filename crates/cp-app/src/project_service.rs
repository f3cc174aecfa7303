//! Scenario loading and construction.

use std::f64::consts::FRAC_PI_2;
use std::path::Path;

use cp_project::{IntegratorDef, LATEST_VERSION, ModelDef, PrecisionDef, Scenario};

use crate::error::AppResult;

/// Load a scenario file (YAML, or JSON by extension) and validate it.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    let scenario = cp_project::load_scenario(path)?;
    tracing::debug!(path = %path.display(), name = %scenario.name, "scenario loaded");
    Ok(scenario)
}

pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    cp_project::validate_scenario(scenario)?;
    Ok(())
}

/// Open-loop decay from horizontal poles: tau = 1/6 s over 15 s, no force.
pub fn reference_decay(
    model: ModelDef,
    integrator: IntegratorDef,
    precision: PrecisionDef,
) -> Scenario {
    let initial_state = match model {
        ModelDef::SinglePole { .. } => vec![0.0, 0.0, FRAC_PI_2, 0.0],
        ModelDef::DoublePole { .. } => vec![0.0, 0.0, FRAC_PI_2, 0.0, FRAC_PI_2, 0.0],
    };
    Scenario {
        version: LATEST_VERSION,
        name: format!("{} reference decay", model.label()),
        model,
        integrator,
        precision,
        tau_s: 1.0 / 6.0,
        duration_s: 15.0,
        force_n: 0.0,
        record_every: 1,
        initial_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scenarios_are_valid() {
        for model in [ModelDef::single_pole(), ModelDef::double_pole()] {
            let scenario = reference_decay(model, IntegratorDef::Rk4, PrecisionDef::F64);
            validate_scenario(&scenario).unwrap();
        }
    }
}
