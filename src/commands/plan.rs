//! Plan a run without launching the CFD engine.
//!
//! Builds the meshing and solver configuration from a JSON file and/or flags,
//! sizes the first prism layer when a target y+ is given, validates the
//! result and stores it as a manifest in a fresh, timestamped run directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Args;
use tracing::{debug, info};

use wing_aero_calc::{RunConfig, RunManifest, Workflow, boundary_layer_thickness, parse_aoa_list};

/// Run planning arguments
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Base configuration (JSON); flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to CAD (.pmdb/.fmd/.step/.iges)
    #[arg(long)]
    pub cad: Option<PathBuf>,

    /// Meshing workflow: fault-tolerant or watertight [default: fault-tolerant]
    #[arg(long)]
    pub workflow: Option<Workflow>,

    /// Farfield zone name [default: farfield]
    #[arg(long)]
    pub farfield: Option<String>,

    /// Comma-separated wing wall zone names [default: wing,wing-tip]
    #[arg(long)]
    pub wing_zones: Option<String>,

    /// Length unit for CAD import (m/mm/in/...) [default: m]
    #[arg(long)]
    pub unit: Option<String>,

    /// Surface min size [m] [default: 0.002]
    #[arg(long)]
    pub surf_min: Option<f64>,

    /// Surface max size [m] [default: 0.05]
    #[arg(long)]
    pub surf_max: Option<f64>,

    /// Hexcore max cell length [m] [default: 0.25]
    #[arg(long)]
    pub hex_max: Option<f64>,

    /// Number of boundary layers [default: 12]
    #[arg(long)]
    pub bl_layers: Option<u32>,

    /// Boundary-layer growth rate [default: 1.2]
    #[arg(long)]
    pub bl_growth: Option<f64>,

    /// Target y+ (computes the absolute first-layer height)
    #[arg(long)]
    pub yplus: Option<f64>,

    /// AoA list "0,2,4" or range "start:step:stop" [default: 0,2,4,6,8,10]
    #[arg(long, allow_hyphen_values = true)]
    pub aoa: Option<String>,

    /// Free-stream Mach [default: 0.2]
    #[arg(long)]
    pub mach: Option<f64>,

    /// Free-stream temperature [K] [default: 288.15]
    #[arg(long)]
    pub tinf: Option<f64>,

    /// Operating pressure [Pa] [default: 101325]
    #[arg(long)]
    pub pop: Option<f64>,

    /// Reference area [m^2] [default: 0.1]
    #[arg(long)]
    pub ref_area: Option<f64>,

    /// Reference length [m] [default: 0.3]
    #[arg(long)]
    pub ref_length: Option<f64>,

    /// Iterations per AoA [default: 250]
    #[arg(long)]
    pub iters: Option<u32>,

    /// Directory to store run outputs
    #[arg(long, default_value = "runs")]
    pub outdir: PathBuf,
}

/// Overlay command-line flags on `cfg`.
fn apply_overrides(cfg: &mut RunConfig, args: &PlanArgs) -> Result<()> {
    let m = &mut cfg.meshing;
    if let Some(cad) = &args.cad {
        m.cad_file = cad.clone();
    }
    if let Some(wf) = args.workflow {
        m.set_workflow(wf);
    }
    if let Some(unit) = &args.unit {
        m.length_unit = unit.clone();
    }
    if let Some(v) = args.surf_min {
        m.surf_min = v;
    }
    if let Some(v) = args.surf_max {
        m.surf_max = v;
    }
    if let Some(v) = args.hex_max {
        m.hex_max_cell_length = v;
    }
    if let Some(v) = args.bl_layers {
        m.bl_n_layers = v;
    }
    if let Some(v) = args.bl_growth {
        m.bl_growth = v;
    }

    let s = &mut cfg.solver;
    if let Some(name) = &args.farfield {
        s.farfield_name = name.clone();
        m.enclosure_name = name.clone();
    }
    if let Some(zones) = &args.wing_zones {
        s.wing_wall_zones = zones
            .split(',')
            .map(str::trim)
            .filter(|z| !z.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(aoa) = &args.aoa {
        s.aoa_deg = parse_aoa_list(aoa)?;
    }
    if let Some(v) = args.mach {
        s.mach = v;
    }
    if let Some(v) = args.tinf {
        s.t_inf = v;
    }
    if let Some(v) = args.pop {
        s.p_op = v;
    }
    if let Some(v) = args.ref_area {
        s.ref_area = v;
    }
    if let Some(v) = args.ref_length {
        s.ref_length = v;
    }
    if let Some(v) = args.iters {
        s.n_iters = v;
    }
    Ok(())
}

fn create_run_dir(outdir: &Path) -> Result<PathBuf> {
    let run_dir = outdir.join(Local::now().format("run_%Y%m%d_%H%M%S").to_string());
    fs::create_dir_all(&run_dir).with_context(|| format!("creating run directory {}", run_dir.display()))?;
    Ok(run_dir)
}

/// Execute the plan command
pub fn execute(args: PlanArgs) -> Result<()> {
    let mut cfg = match &args.config {
        Some(path) => RunConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => {
            if args.cad.is_none() {
                bail!("--cad is required when no --config is given");
            }
            RunConfig::default()
        }
    };
    apply_overrides(&mut cfg, &args)?;

    let cad_path = cfg.meshing.cad_file.canonicalize().ok().filter(|p| p.exists());
    let Some(cad_path) = cad_path else {
        bail!("CAD file not found: {}", cfg.meshing.cad_file.display());
    };
    cfg.meshing.cad_file = cad_path;

    // y+ sizing derives from the free stream, so check that part first
    cfg.validate_solver().context("invalid run configuration")?;

    let wall_distance = match args.yplus {
        Some(y_plus) if !y_plus.is_finite() || y_plus <= 0.0 => {
            bail!("--yplus must be positive and finite, got {y_plus}");
        }
        Some(y_plus) => {
            let wd = cfg.apply_target_yplus(y_plus)?;
            println!(
                "[info] Target y+={:.2} → FirstLayerHeight≈{:.3e} m  (nu={:.3e} m^2/s, u_tau={:.3} m/s)",
                y_plus, wd.first_layer_height, wd.kinematic_viscosity, wd.friction_velocity
            );
            Some(wd)
        }
        None => None,
    };

    cfg.validate_meshing().context("invalid run configuration")?;

    let run_dir = create_run_dir(&args.outdir)?;
    let manifest = RunManifest::new(&cfg, args.yplus, wall_distance);
    let manifest_path = run_dir.join("manifest.json");
    manifest.save(&manifest_path)?;
    debug!("manifest written to {}", manifest_path.display());

    let m = &cfg.meshing;
    let s = &cfg.solver;
    println!("[dry-run] Meshing workflow: {}", m.workflow);
    println!("[dry-run] CAD: {}", m.cad_file.display());
    println!("[dry-run] Surface sizes: {} → {}", m.surf_min, m.surf_max);
    match m.first_layer_height {
        Some(h) => println!(
            "[dry-run] BL layers: {} growth: {} first-layer-height: {:.3e} (stack ≈ {:.3e} m)",
            m.bl_n_layers,
            m.bl_growth,
            h,
            boundary_layer_thickness(h, m.bl_n_layers, m.bl_growth)
        ),
        None => println!(
            "[dry-run] BL layers: {} growth: {} first-layer-height: engine default",
            m.bl_n_layers, m.bl_growth
        ),
    }
    println!("[dry-run] Hexcore max cell length: {}", m.hex_max_cell_length);
    println!("[dry-run] Farfield name: {}", s.farfield_name);
    println!("[dry-run] Wing walls: {}", s.wing_wall_zones.join(", "));
    println!("[dry-run] AoA list: {:?}", s.aoa_deg);
    println!("[dry-run] Mach/T∞/Pₒₚ: {} {} {}", s.mach, s.t_inf, s.p_op);
    println!("[dry-run] Output directory: {}", run_dir.display());

    info!("planned {} run in {}", m.workflow, run_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        plan: PlanArgs,
    }

    fn parse(args: &[&str]) -> PlanArgs {
        let mut argv = vec!["plan"];
        argv.extend_from_slice(args);
        Harness::try_parse_from(argv).unwrap().plan
    }

    #[test]
    fn test_overrides() {
        let args = parse(&[
            "--cad", "wing.step", "--workflow", "watertight", "--wing-zones", "upper, lower,", "--aoa", "-2:2:2",
            "--mach", "0.3", "--farfield", "box",
        ]);
        let mut cfg = RunConfig::default();
        apply_overrides(&mut cfg, &args).unwrap();

        assert_eq!(cfg.meshing.workflow, Workflow::Watertight);
        assert!(!cfg.meshing.create_enclosure);
        assert_eq!(cfg.meshing.enclosure_name, "box");
        assert_eq!(cfg.solver.farfield_name, "box");
        assert_eq!(cfg.solver.wing_wall_zones, vec!["upper", "lower"]);
        assert_eq!(cfg.solver.aoa_deg, vec![-2.0, 0.0, 2.0]);
        assert_eq!(cfg.solver.mach, 0.3);
        // untouched values keep their defaults
        assert_eq!(cfg.meshing.surf_max, 0.05);
        assert_eq!(cfg.solver.n_iters, 250);
    }

    #[test]
    fn test_execute_writes_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let cad = dir.path().join("dummy.step");
        fs::write(&cad, "solid-dummy").unwrap();
        let outdir = dir.path().join("runs");

        let args = parse(&[
            "--cad",
            cad.to_str().unwrap(),
            "--yplus",
            "1.0",
            "--outdir",
            outdir.to_str().unwrap(),
        ]);
        execute(args).unwrap();

        let runs: Vec<_> = fs::read_dir(&outdir).unwrap().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(runs.len(), 1);
        let manifest = fs::read_to_string(runs[0].path().join("manifest.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(json["target_y_plus"], 1.0);
        let h = json["config"]["meshing"]["first_layer_height"].as_f64().unwrap();
        assert!(h > 1e-6 && h < 1e-4);
    }

    fn plan_with(dir: &Path, extra: &[&str]) -> PlanArgs {
        let cad = dir.join("dummy.step");
        fs::write(&cad, "solid-dummy").unwrap();
        let mut argv = vec![
            "--cad".to_string(),
            cad.to_str().unwrap().to_string(),
            "--outdir".to_string(),
            dir.join("runs").to_str().unwrap().to_string(),
        ];
        argv.extend(extra.iter().map(|a| a.to_string()));
        let argv: Vec<&str> = argv.iter().map(String::as_str).collect();
        parse(&argv)
    }

    #[test]
    fn test_execute_bad_temperature_names_solver_key() {
        for tinf in ["-10", "0"] {
            let dir = tempfile::tempdir().unwrap();
            let tinf = format!("--tinf={tinf}");
            let err = execute(plan_with(dir.path(), &[&tinf, "--yplus", "1"])).unwrap_err();
            let msg = format!("{err:#}");
            assert!(msg.contains("solver.t_inf"), "{msg}");
            assert!(!msg.contains("first_layer_height"), "{msg}");
            assert!(!dir.path().join("runs").exists());
        }
    }

    #[test]
    fn test_execute_rejects_non_positive_yplus() {
        let dir = tempfile::tempdir().unwrap();
        let err = execute(plan_with(dir.path(), &["--yplus", "0"])).unwrap_err();
        assert!(err.to_string().contains("--yplus"), "{err}");
    }

    #[test]
    fn test_execute_missing_cad() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(&[
            "--cad",
            dir.path().join("nope.step").to_str().unwrap(),
            "--outdir",
            dir.path().to_str().unwrap(),
        ]);
        let err = execute(args).unwrap_err();
        assert!(err.to_string().contains("CAD file not found"));
    }
}
