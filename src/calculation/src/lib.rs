//! Aerodynamic pre- and post-processing for external wing CFD runs.
//!
//! The meshing and flow solving happen in an external CFD engine. This library
//! provides what surrounds it:
//! - Free-stream gas properties (speed of sound, density, Sutherland viscosity)
//! - First boundary-layer cell height from a target y+
//! - Run configuration for the meshing and solver stages
//! - Angle-of-attack sweep plumbing and force-to-coefficient reduction
//! - CSV tables and a lift polar summary of the results
//!
//! # Example
//!
//! ```
//! use wing_aero_calc::{first_layer_height_from_yplus, free_stream_velocity};
//!
//! let u_inf = free_stream_velocity(0.2, 288.15);
//! let wd = first_layer_height_from_yplus(1.0, u_inf, 0.30, 288.15, 101325.0).unwrap();
//! assert!(wd.first_layer_height > 1e-6 && wd.first_layer_height < 1e-4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::doc_markdown)]

pub mod config;
pub mod constants;
pub mod error;
pub mod freestream;
pub mod polar;
pub mod results;
pub mod sweep;
pub mod wall_distance;

// Re-export key types and functions for easy use
pub use config::{MeshingConfig, RunConfig, RunManifest, SolverConfig, Workflow};
pub use constants::GasConstants;
pub use error::{AeroError, DegenerateInputError, Result};
pub use freestream::{
    FreeStream, density_ideal_gas, dynamic_viscosity_sutherland, free_stream_velocity, speed_of_sound,
};
pub use polar::PolarSummary;
pub use sweep::{AoaResult, ForceSource, RecordedForces, parse_aoa_list, run_sweep};
pub use wall_distance::{
    WallDistance, boundary_layer_thickness, first_layer_height_from_yplus, skin_friction_flat_plate_turbulent,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
