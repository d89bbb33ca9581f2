//! Reduce recorded wall forces to a coefficient table.
//!
//! Reads the per-AoA wall forces the engine exported, replays them through the
//! sweep with the free stream of the solver settings, writes the
//! `AoA_deg, Fx_N, Fy_N, Fz_N, Lift_N, Drag_N, CL, CD` table and prints the
//! polar summary.
//!
//! Drag is positive along the flow, so at zero incidence `Drag_N = +Fx`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::{info, warn};

use wing_aero_calc::results::{read_wall_forces_csv, write_results_csv};
use wing_aero_calc::{PolarSummary, RecordedForces, RunConfig, parse_aoa_list, run_sweep};

/// Force reduction arguments
#[derive(Args, Debug)]
pub struct ReduceArgs {
    /// CSV with columns AoA_deg, Fx_N, Fy_N, Fz_N
    #[arg(long)]
    pub forces: PathBuf,

    /// Run configuration (JSON) providing free stream and reference values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// AoA list to reduce; defaults to every angle in the forces file
    #[arg(long, allow_hyphen_values = true)]
    pub aoa: Option<String>,

    /// Free-stream Mach
    #[arg(long)]
    pub mach: Option<f64>,

    /// Free-stream temperature [K]
    #[arg(long)]
    pub tinf: Option<f64>,

    /// Operating pressure [Pa]
    #[arg(long)]
    pub pop: Option<f64>,

    /// Reference area [m^2]
    #[arg(long)]
    pub ref_area: Option<f64>,

    /// Output CSV
    #[arg(short, long, default_value = "wing_aoa_results.csv")]
    pub output: PathBuf,
}

/// Execute the reduce command
pub fn execute(args: ReduceArgs) -> Result<()> {
    let mut cfg = match &args.config {
        Some(path) => RunConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => RunConfig::default(),
    };
    let solver = &mut cfg.solver;
    if let Some(v) = args.mach {
        solver.mach = v;
    }
    if let Some(v) = args.tinf {
        solver.t_inf = v;
    }
    if let Some(v) = args.pop {
        solver.p_op = v;
    }
    if let Some(v) = args.ref_area {
        solver.ref_area = v;
    }

    let samples = read_wall_forces_csv(&args.forces)
        .with_context(|| format!("reading wall forces from {}", args.forces.display()))?;
    let mut source = RecordedForces::new(samples);
    if source.is_empty() {
        bail!("no wall-force samples in {}", args.forces.display());
    }

    solver.aoa_deg = match &args.aoa {
        Some(list) => parse_aoa_list(list)?,
        None => source.angles(),
    };
    if source.len() != source.angles().len() {
        warn!("duplicate angles in {}; using the last sample of each", args.forces.display());
    }

    let results = run_sweep(&mut source, solver)?;
    let out = write_results_csv(&args.output, &results)?;

    println!("{:>8} {:>10} {:>10} {:>8}", "AoA_deg", "CL", "CD", "L/D");
    for r in &results {
        let ld = r.lift_to_drag().map_or("-".to_string(), |v| format!("{v:.2}"));
        println!("{:>8.2} {:>10.4} {:>10.5} {:>8}", r.aoa_deg, r.cl, r.cd, ld);
    }

    match PolarSummary::from_results(&results) {
        Ok(p) => {
            println!(
                "dCL/dα = {:.4} /deg ({:.3} /rad)",
                p.lift_slope_per_deg, p.lift_slope_per_rad
            );
            if let Some(a0) = p.zero_lift_aoa_deg {
                println!("Zero-lift AoA ≈ {a0:.2} deg");
            }
            println!("CL_max = {:.4} at {:.2} deg", p.cl_max, p.aoa_at_cl_max);
            if let Some((ld, aoa)) = p.best_lift_to_drag {
                println!("(L/D)_max = {ld:.2} at {aoa:.2} deg");
            }
        }
        Err(e) => warn!("no polar summary: {e}"),
    }

    info!("coefficients written to {}", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(forces: PathBuf, output: PathBuf) -> ReduceArgs {
        ReduceArgs {
            forces,
            config: None,
            aoa: None,
            mach: None,
            tinf: None,
            pop: None,
            ref_area: None,
            output,
        }
    }

    #[test]
    fn test_reduce_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let forces = dir.path().join("forces.csv");
        fs::write(&forces, "AoA_deg,Fx_N,Fy_N,Fz_N\n0,2.0,0,30\n4,3.0,0,150\n8,5.0,0,260\n").unwrap();
        let output = dir.path().join("out.csv");

        execute(args(forces, output.clone())).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("AoA_deg,Fx_N,Fy_N,Fz_N,Lift_N,Drag_N,CL,CD"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_reduce_missing_angle() {
        let dir = tempfile::tempdir().unwrap();
        let forces = dir.path().join("forces.csv");
        fs::write(&forces, "AoA_deg,Fx_N,Fy_N,Fz_N\n0,2.0,0,30\n").unwrap();

        let mut a = args(forces, dir.path().join("out.csv"));
        a.aoa = Some("0,2".to_string());
        let err = execute(a).unwrap_err();
        assert!(err.to_string().contains("AoA = 2"));
    }
}
