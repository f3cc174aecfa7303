use clap::{Parser, Subcommand, ValueEnum};
use cp_app::{AppResult, RunOutput, RunTimingSummary, project_service, run_service};
use cp_core::timing::{self, run_timing};
use cp_project::{IntegratorDef, ModelDef, PrecisionDef};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cartpole")]
#[command(about = "Cart-pole simulator - single and double inverted pendulum on a cart", long_about = None)]
struct Cli {
    /// Print a timing breakdown after each run (same as CP_TIMING=1)
    #[arg(long, global = true)]
    timing: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and values
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Run a scenario
    Run {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write a JSON run summary to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },
    /// Run the open-loop decay from horizontal poles
    Demo {
        model: DemoModel,
        #[arg(long, value_enum, default_value_t = IntegratorArg::Rk4)]
        integrator: IntegratorArg,
        #[arg(long, value_enum, default_value_t = PrecisionArg::F64)]
        precision: PrecisionArg,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write a JSON run summary to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DemoModel {
    Single,
    Double,
}

#[derive(Clone, Copy, ValueEnum)]
enum IntegratorArg {
    Euler,
    Rk2,
    Rk4,
}

impl From<IntegratorArg> for IntegratorDef {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Euler => IntegratorDef::Euler,
            IntegratorArg::Rk2 => IntegratorDef::Rk2,
            IntegratorArg::Rk4 => IntegratorDef::Rk4,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PrecisionArg {
    F32,
    F64,
}

impl From<PrecisionArg> for PrecisionDef {
    fn from(arg: PrecisionArg) -> Self {
        match arg {
            PrecisionArg::F32 => PrecisionDef::F32,
            PrecisionArg::F64 => PrecisionDef::F64,
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if cli.timing {
        timing::enable_timing();
    }

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            output,
            summary,
        } => cmd_run(&scenario_path, output.as_deref(), summary.as_deref()),
        Commands::Demo {
            model,
            integrator,
            precision,
            output,
            summary,
        } => cmd_demo(
            model,
            integrator.into(),
            precision.into(),
            output.as_deref(),
            summary.as_deref(),
        ),
    }
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    tracing::info!(path = %scenario_path.display(), "validate");
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = project_service::load_scenario(scenario_path)?;
    println!(
        "✓ Scenario '{}' is valid ({}, {:?}, {})",
        scenario.name,
        scenario.model.label(),
        scenario.integrator,
        scenario.precision.label()
    );
    Ok(())
}

fn cmd_run(scenario_path: &Path, output: Option<&Path>, summary: Option<&Path>) -> AppResult<()> {
    tracing::info!(path = %scenario_path.display(), "run");
    eprintln!("Running scenario: {}", scenario_path.display());
    let result = run_service::run_scenario_file(scenario_path)?;
    emit(&result, output, summary)
}

fn cmd_demo(
    model: DemoModel,
    integrator: IntegratorDef,
    precision: PrecisionDef,
    output: Option<&Path>,
    summary: Option<&Path>,
) -> AppResult<()> {
    let model = match model {
        DemoModel::Single => ModelDef::single_pole(),
        DemoModel::Double => ModelDef::double_pole(),
    };
    let scenario = project_service::reference_decay(model, integrator, precision);
    tracing::info!(
        name = %scenario.name,
        integrator = ?integrator,
        precision = precision.label(),
        "demo"
    );
    eprintln!("Running demo: {}", scenario.name);
    let result = run_service::run_scenario(&scenario)?;
    emit(&result, output, summary)
}

/// Write the CSV (file or stdout) and optional summary. Status text goes to
/// stderr so piped CSV stays clean.
fn emit(result: &RunOutput, output: Option<&Path>, summary: Option<&Path>) -> AppResult<()> {
    match output {
        Some(path) => {
            cp_results::write_csv(path, &result.csv)?;
            eprintln!("✓ Trajectory written to {}", path.display());
        }
        None => print!("{}", result.csv),
    }

    if let Some(path) = summary {
        cp_results::save_summary(path, &result.summary)?;
        eprintln!("✓ Summary written to {}", path.display());
    }

    let s = &result.summary;
    eprintln!(
        "✓ {} steps ({} points) with {} / {}",
        s.steps, s.points, s.integrator, s.precision
    );
    if s.diverged {
        eprintln!(
            "! State became non-finite at recorded point {}",
            s.first_non_finite_point
                .map_or_else(|| "after the last snapshot".to_string(), |i| i.to_string())
        );
    }

    if timing::is_enabled() {
        print_timing_summary(&result.timing);
    }
    Ok(())
}

fn print_timing_summary(timing: &RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    let build_pct = 100.0 * timing.build_time_s / total;
    let solve_pct = 100.0 * timing.solve_time_s / total;
    let output_pct = 100.0 * timing.output_time_s / total;

    eprintln!("\nTiming summary:");
    eprintln!("  Build:   {:.6}s ({:.1}%)", timing.build_time_s, build_pct);
    eprintln!("  Solve:   {:.6}s ({:.1}%)", timing.solve_time_s, solve_pct);
    eprintln!("  Output:  {:.6}s ({:.1}%)", timing.output_time_s, output_pct);
    eprintln!("  Total:   {:.6}s", timing.total_time_s);
    eprintln!(
        "  Integration calls: {} ({:.6}s accumulated)",
        run_timing::INTEGRATION.count(),
        run_timing::INTEGRATION.total_seconds()
    );
}
