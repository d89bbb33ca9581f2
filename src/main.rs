//! Command-line front end for wing external-aerodynamics runs.
//!
//! Plans the CAD → mesh → solve workflow for the CFD engine (dry run with a
//! manifest), sizes the first prism layer from a target y+, and reduces the
//! wall forces the engine records into a lift/drag coefficient table.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Automate CAD → mesh → solve planning and post-processing for a wing
#[derive(Parser, Debug)]
#[command(name = "wing_aero")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wing external aerodynamics: y+ sizing, run planning, coefficient tables", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "WING_AERO_LOGLEVEL", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate inputs and write the run plan (no engine is launched)
    Plan(commands::plan::PlanArgs),
    /// Estimate the first-layer height for a target y+
    Yplus(commands::yplus::YplusArgs),
    /// Turn recorded wall forces into a coefficient table
    ///
    /// Lift and drag are wind-axis components of the body-axis force:
    /// Drag_N = Fx·cos α + Fz·sin α and Lift_N = Fz·cos α − Fx·sin α.
    /// At α = 0 this gives Drag_N = +Fx, so tables written with Drag = −Fx
    /// differ in sign.
    Reduce(commands::reduce::ReduceArgs),
}

fn parse_level(s: &str) -> Level {
    match s.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Yplus(args) => commands::yplus::execute(args),
        Commands::Reduce(args) => commands::reduce::execute(args),
    }
}
