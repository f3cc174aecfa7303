//! Scenario execution service.

use std::path::Path;

use cp_core::Real;
use cp_core::timing::{AccumulatingTimer, Timer, run_timing};
use cp_dynamics::{DoublePole, EquationsOfMotion, SinglePole};
use cp_project::{ModelDef, PrecisionDef, Scenario};
use cp_results::{RunSummary, SummaryHeader, double_pole_csv, single_pole_csv};
use cp_sim::{Integrator, SimOptions, SimRecord, run_sim};

use crate::error::AppResult;
use crate::model_build;
use crate::project_service;

/// Wall-clock breakdown of one run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub build_time_s: f64,
    pub solve_time_s: f64,
    pub output_time_s: f64,
    pub total_time_s: f64,
}

/// Everything a front end needs from a finished run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub csv: String,
    pub summary: RunSummary,
    pub timing: RunTimingSummary,
}

/// Validate and run a scenario.
pub fn run_scenario(scenario: &Scenario) -> AppResult<RunOutput> {
    project_service::validate_scenario(scenario)?;

    tracing::info!(
        name = %scenario.name,
        model = scenario.model.label(),
        integrator = ?scenario.integrator,
        precision = scenario.precision.label(),
        tau_s = scenario.tau_s,
        duration_s = scenario.duration_s,
        "run started"
    );

    let output = match (&scenario.model, scenario.precision) {
        (ModelDef::SinglePole { .. }, PrecisionDef::F32) => run_single_pole::<f32>(scenario)?,
        (ModelDef::SinglePole { .. }, PrecisionDef::F64) => run_single_pole::<f64>(scenario)?,
        (ModelDef::DoublePole { .. }, PrecisionDef::F32) => run_double_pole::<f32>(scenario)?,
        (ModelDef::DoublePole { .. }, PrecisionDef::F64) => run_double_pole::<f64>(scenario)?,
    };

    tracing::info!(
        name = %scenario.name,
        steps = output.summary.steps,
        points = output.summary.points,
        diverged = output.summary.diverged,
        solve_time_s = output.timing.solve_time_s,
        "run finished"
    );

    Ok(output)
}

/// Load, validate and run a scenario file.
pub fn run_scenario_file(path: &Path) -> AppResult<RunOutput> {
    let scenario = project_service::load_scenario(path)?;
    run_scenario(&scenario)
}

fn run_single_pole<T: Real>(scenario: &Scenario) -> AppResult<RunOutput> {
    let params = model_build::single_pole_params::<T>(&scenario.model)?;
    execute(scenario, SinglePole::new(params), single_pole_csv::<T>)
}

fn run_double_pole<T: Real>(scenario: &Scenario) -> AppResult<RunOutput> {
    let params = model_build::double_pole_params::<T>(&scenario.model)?;
    execute(scenario, DoublePole::new(params), double_pole_csv::<T>)
}

fn execute<T, E, const N: usize>(
    scenario: &Scenario,
    equations: E,
    to_csv: fn(&SimRecord<T, N>) -> String,
) -> AppResult<RunOutput>
where
    T: Real,
    E: EquationsOfMotion<T, N>,
{
    let total = Timer::start("total");

    let build = Timer::start("build");
    let initial_state: Vec<T> = scenario.initial_state.iter().map(|&v| T::lit(v)).collect();
    let mut integrator = Integrator::new(
        model_build::integrator_type(scenario.integrator),
        T::lit(scenario.tau_s),
        &initial_state,
        equations,
    )?;
    let options = SimOptions {
        duration: T::lit(scenario.duration_s),
        force: T::lit(scenario.force_n),
        record_every: scenario.record_every,
        ..SimOptions::default()
    };
    let build_time_s = finish(build, None);

    let solve = Timer::start("solve");
    let record = run_sim(&mut integrator, &options)?;
    let solve_time_s = finish(solve, Some(&run_timing::INTEGRATION));

    let output = Timer::start("output");
    let csv = to_csv(&record);
    let header = SummaryHeader {
        name: scenario.name.clone(),
        model: scenario.model.label().to_string(),
        precision: T::NAME.to_string(),
    };
    let summary = RunSummary::from_run(header, &integrator, &record)?;
    let output_time_s = finish(output, Some(&run_timing::OUTPUT));

    Ok(RunOutput {
        csv,
        summary,
        timing: RunTimingSummary {
            build_time_s,
            solve_time_s,
            output_time_s,
            total_time_s: total.elapsed_s(),
        },
    })
}

/// Close a phase timer: log it, feed the shared accumulator when timing is
/// enabled, and return the elapsed seconds either way.
fn finish(timer: Timer, sink: Option<&AccumulatingTimer>) -> f64 {
    let elapsed_s = timer.elapsed_s();
    tracing::debug!(phase = timer.label(), elapsed_s, "phase finished");
    if let (Some(sink), Some(measured)) = (sink, timer.stop()) {
        sink.record(measured);
    }
    elapsed_s
}
