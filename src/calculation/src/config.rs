//! Run configuration for the meshing and solver stages.
//!
//! These records describe what the external CFD engine is asked to do: how
//! the wing CAD is meshed (surface sizing, prism layers, volume fill) and how
//! the angle-of-attack sweep is solved and reduced. They are plain data with
//! serde support so a run can be stored next to its results and replayed.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AeroError, Result, UnknownWorkflow};
use crate::freestream::FreeStream;
use crate::wall_distance::{WallDistance, first_layer_height_from_yplus};

/// Meshing workflow offered by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Workflow {
    /// Wraps dirty CAD and can build the far-field enclosure itself
    #[default]
    FaultTolerant,
    /// Expects a closed fluid region in the CAD
    Watertight,
}

impl Workflow {
    /// Whether this workflow creates the far-field box around the geometry.
    pub fn creates_enclosure(self) -> bool {
        matches!(self, Workflow::FaultTolerant)
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Workflow::FaultTolerant => write!(f, "fault-tolerant"),
            Workflow::Watertight => write!(f, "watertight"),
        }
    }
}

impl FromStr for Workflow {
    type Err = UnknownWorkflow;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fault-tolerant" => Ok(Workflow::FaultTolerant),
            "watertight" => Ok(Workflow::Watertight),
            other => Err(UnknownWorkflow(other.to_string())),
        }
    }
}

/// Floating-point precision the engine is launched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// Single precision
    Single,
    /// Double precision
    #[default]
    Double,
}

/// Far-field box size as multiples of the geometry extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBoxRatio {
    /// Upstream extent
    pub x_minus: f64,
    /// Downstream extent
    pub x_plus: f64,
    /// Spanwise extent, negative side
    pub y_minus: f64,
    /// Spanwise extent, positive side
    pub y_plus: f64,
    /// Vertical extent, below
    pub z_minus: f64,
    /// Vertical extent, above
    pub z_plus: f64,
}

impl Default for BoundingBoxRatio {
    fn default() -> Self {
        Self {
            x_minus: 10.0,
            x_plus: 20.0,
            y_minus: 10.0,
            y_plus: 10.0,
            z_minus: 10.0,
            z_plus: 10.0,
        }
    }
}

/// Meshing stage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshingConfig {
    /// CAD file (.pmdb/.fmd/.step/.iges)
    pub cad_file: PathBuf,
    /// Length unit of the CAD ("m", "mm", "in", ...)
    pub length_unit: String,
    /// Meshing workflow
    pub workflow: Workflow,
    /// Build a far-field enclosure around the wing
    pub create_enclosure: bool,
    /// Name of the enclosure boundary
    pub enclosure_name: String,
    /// Enclosure size relative to the geometry
    pub bbox_ratio: BoundingBoxRatio,
    /// Minimum surface cell size (m)
    pub surf_min: f64,
    /// Maximum surface cell size (m)
    pub surf_max: f64,
    /// Number of prism layers
    pub bl_n_layers: u32,
    /// Prism layer growth rate
    pub bl_growth: f64,
    /// Absolute first-layer height (m), usually from a target y+
    pub first_layer_height: Option<f64>,
    /// Volume fill method
    pub volume_fill: String,
    /// Largest hexcore cell edge (m)
    pub hex_max_cell_length: f64,
    /// Engine precision
    pub precision: Precision,
    /// Engine processor count
    pub processors: u32,
}

impl Default for MeshingConfig {
    fn default() -> Self {
        Self {
            cad_file: PathBuf::from("./wing.pmdb"),
            length_unit: "m".to_string(),
            workflow: Workflow::FaultTolerant,
            create_enclosure: true,
            enclosure_name: "farfield".to_string(),
            bbox_ratio: BoundingBoxRatio::default(),
            surf_min: 0.002,
            surf_max: 0.05,
            bl_n_layers: 12,
            bl_growth: 1.2,
            first_layer_height: None,
            volume_fill: "poly-hexcore".to_string(),
            hex_max_cell_length: 0.25,
            precision: Precision::Double,
            processors: 4,
        }
    }
}

impl MeshingConfig {
    /// Select the workflow; the enclosure follows it.
    pub fn set_workflow(&mut self, workflow: Workflow) {
        self.workflow = workflow;
        self.create_enclosure = workflow.creates_enclosure();
    }
}

/// Solver stage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Pressure far-field zone
    pub farfield_name: String,
    /// Wall zones whose forces are integrated
    pub wing_wall_zones: Vec<String>,
    /// Free-stream Mach number
    pub mach: f64,
    /// Free-stream temperature (K)
    pub t_inf: f64,
    /// Operating pressure (Pa)
    pub p_op: f64,
    /// Reference area for coefficients (m²)
    pub ref_area: f64,
    /// Reference length (m)
    pub ref_length: f64,
    /// Angles of attack to sweep (deg)
    pub aoa_deg: Vec<f64>,
    /// Iterations per angle of attack
    pub n_iters: u32,
    /// Engine precision
    pub precision: Precision,
    /// Engine processor count
    pub processors: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            farfield_name: "farfield".to_string(),
            wing_wall_zones: vec!["wing".to_string(), "wing-tip".to_string()],
            mach: 0.20,
            t_inf: 288.15,
            p_op: 101325.0,
            ref_area: 0.10,
            ref_length: 0.30,
            aoa_deg: vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0],
            n_iters: 250,
            precision: Precision::Double,
            processors: 4,
        }
    }
}

impl SolverConfig {
    /// Free-stream state of this configuration.
    pub fn free_stream(&self) -> FreeStream {
        FreeStream::from_mach(self.mach, self.t_inf, self.p_op)
    }
}

/// Complete run description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Meshing settings
    pub meshing: MeshingConfig,
    /// Solver settings
    pub solver: SolverConfig,
}

fn require_positive(key: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(AeroError::invalid_value(key, value, "must be positive and finite"))
    }
}

impl RunConfig {
    /// Load a run configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&content)?;
        debug!("loaded run config from {}", path.display());
        Ok(config)
    }

    /// Save the configuration as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check ranges the engine would otherwise reject late.
    pub fn validate(&self) -> Result<()> {
        self.validate_solver()?;
        self.validate_meshing()
    }

    /// Free-stream and reference values; everything derived from them needs these first.
    pub fn validate_solver(&self) -> Result<()> {
        let s = &self.solver;
        if s.mach.is_nan() || s.mach < 0.0 {
            return Err(AeroError::invalid_value("solver.mach", s.mach, "must be non-negative"));
        }
        require_positive("solver.t_inf", s.t_inf)?;
        require_positive("solver.p_op", s.p_op)?;
        require_positive("solver.ref_area", s.ref_area)?;
        require_positive("solver.ref_length", s.ref_length)?;
        if s.wing_wall_zones.is_empty() {
            return Err(AeroError::invalid_value("solver.wing_wall_zones", "[]", "need at least one wall zone"));
        }
        if s.aoa_deg.is_empty() {
            return Err(AeroError::invalid_value("solver.aoa_deg", "[]", "need at least one angle of attack"));
        }
        Ok(())
    }

    /// Surface sizing and prism-layer settings.
    pub fn validate_meshing(&self) -> Result<()> {
        let m = &self.meshing;
        require_positive("meshing.surf_min", m.surf_min)?;
        require_positive("meshing.surf_max", m.surf_max)?;
        if m.surf_min > m.surf_max {
            return Err(AeroError::invalid_value(
                "meshing.surf_min",
                m.surf_min,
                "must not exceed surf_max",
            ));
        }
        require_positive("meshing.hex_max_cell_length", m.hex_max_cell_length)?;
        if m.bl_n_layers == 0 {
            return Err(AeroError::invalid_value("meshing.bl_n_layers", 0, "need at least one layer"));
        }
        if m.bl_growth.is_nan() || m.bl_growth < 1.0 {
            return Err(AeroError::invalid_value("meshing.bl_growth", m.bl_growth, "must be >= 1"));
        }
        if let Some(h) = m.first_layer_height {
            require_positive("meshing.first_layer_height", h)?;
        }
        Ok(())
    }

    /// Size the first prism layer for `y_plus` at the solver free stream.
    ///
    /// The solver settings are validated first so an out-of-range free stream
    /// is reported by its own key instead of as a NaN layer height.
    pub fn apply_target_yplus(&mut self, y_plus: f64) -> Result<WallDistance> {
        require_positive("target_y_plus", y_plus)?;
        self.validate_solver()?;
        let fs = self.solver.free_stream();
        let wd = first_layer_height_from_yplus(
            y_plus,
            fs.velocity,
            self.solver.ref_length,
            self.solver.t_inf,
            self.solver.p_op,
        )?;
        self.meshing.first_layer_height = Some(wd.first_layer_height);
        info!(
            "target y+ = {y_plus:.2} -> first layer height {:.3e} m",
            wd.first_layer_height
        );
        Ok(wd)
    }
}

/// Record written next to a planned run.
#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    /// Creation time
    pub created: DateTime<Local>,
    /// Crate version that produced the manifest
    pub version: String,
    /// Target y+ if one was requested
    pub target_y_plus: Option<f64>,
    /// Wall-distance estimate for the target y+
    pub wall_distance: Option<WallDistance>,
    /// Free stream of the solver settings
    pub free_stream: FreeStream,
    /// Full configuration
    pub config: RunConfig,
}

impl RunManifest {
    /// Build a manifest stamped with the current time.
    pub fn new(config: &RunConfig, target_y_plus: Option<f64>, wall_distance: Option<WallDistance>) -> Self {
        Self {
            created: Local::now(),
            version: crate::VERSION.to_string(),
            target_y_plus,
            wall_distance,
            free_stream: config.solver.free_stream(),
            config: config.clone(),
        }
    }

    /// Write as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
