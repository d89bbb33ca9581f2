//! First-layer sizing from a target y+.

use anyhow::Result;
use clap::Args;
use tracing::{debug, info};

use wing_aero_calc::{FreeStream, GasConstants, boundary_layer_thickness, first_layer_height_from_yplus};

/// y+ sizing arguments
#[derive(Args, Debug)]
pub struct YplusArgs {
    /// Target y+
    #[arg(long)]
    pub yplus: f64,

    /// Free-stream Mach
    #[arg(long, default_value = "0.2")]
    pub mach: f64,

    /// Free-stream temperature [K]
    #[arg(long, default_value = "288.15")]
    pub tinf: f64,

    /// Operating pressure [Pa]
    #[arg(long, default_value = "101325")]
    pub pop: f64,

    /// Reference length [m]
    #[arg(long, default_value = "0.3")]
    pub ref_length: f64,

    /// Number of boundary layers
    #[arg(long, default_value = "12")]
    pub bl_layers: u32,

    /// Boundary-layer growth rate
    #[arg(long, default_value = "1.2")]
    pub bl_growth: f64,
}

/// Execute the y+ command
pub fn execute(args: YplusArgs) -> Result<()> {
    for (k, v) in GasConstants::air().summary() {
        debug!("gas {k}: {v}");
    }

    let fs = FreeStream::from_mach(args.mach, args.tinf, args.pop);
    info!(
        "free stream: U = {:.3} m/s, rho = {:.4} kg/m^3, mu = {:.4e} Pa·s",
        fs.velocity, fs.density, fs.dynamic_viscosity
    );

    let wd = first_layer_height_from_yplus(args.yplus, fs.velocity, args.ref_length, args.tinf, args.pop)?;
    let stack = boundary_layer_thickness(wd.first_layer_height, args.bl_layers, args.bl_growth);

    println!("Target y+          : {:.2}", args.yplus);
    println!("Re (L_ref)         : {:.4e}", wd.reynolds_number);
    println!("Cf (flat plate)    : {:.5}", wd.skin_friction);
    println!("nu [m^2/s]         : {:.3e}", wd.kinematic_viscosity);
    println!("u_tau [m/s]        : {:.3}", wd.friction_velocity);
    println!("FirstLayerHeight[m]: {:.3e}", wd.first_layer_height);
    println!(
        "BL stack [m]       : {:.3e} ({} layers, growth {})",
        stack, args.bl_layers, args.bl_growth
    );
    Ok(())
}
