//! First boundary-layer cell height from a target y+.
//!
//! The estimate follows the usual pre-meshing recipe: evaluate the free-stream
//! viscosity and density, form a length-based Reynolds number, take the skin
//! friction of a turbulent flat plate, and invert `y+ = y·u_τ/ν` for `y`.
//!
//! # Degenerate inputs
//!
//! Two degenerate paths are treated differently:
//!
//! - A non-positive Reynolds number does **not** fail. The skin-friction
//!   correlation silently returns the constant `0.003` so the estimator stays
//!   callable during dry runs with zero velocity.
//! - A friction velocity below `1e-12` m/s **does** fail with
//!   [`DegenerateInputError`], since the division by `u_τ` would blow up.
//!
//! With `U_inf == 0` both paths are hit: the Reynolds number is zero, the
//! fallback `Cf` is used, and the resulting zero friction velocity is
//! rejected. Unifying the two contracts would change the output of
//! degenerate sweeps, so they are kept as they are.

use serde::{Deserialize, Serialize};

use crate::constants::GasConstants;
use crate::constants::wall_model::{CF_COEFFICIENT, CF_EXPONENT, CF_FALLBACK, MIN_FRICTION_VELOCITY};
use crate::error::DegenerateInputError;
use crate::freestream::{density_ideal_gas_with, dynamic_viscosity_sutherland_with, reynolds_number};

/// Turbulent flat-plate skin-friction coefficient `0.026 / Re^(1/7)`.
///
/// Returns exactly `0.003` for `re_l <= 0`.
#[inline]
pub fn skin_friction_flat_plate_turbulent(re_l: f64) -> f64 {
    if re_l <= 0.0 {
        return CF_FALLBACK;
    }
    CF_COEFFICIENT / re_l.powf(CF_EXPONENT)
}

/// Result of the y+ inversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallDistance {
    /// First-layer cell height (m)
    pub first_layer_height: f64,
    /// Kinematic viscosity ν (m²/s)
    pub kinematic_viscosity: f64,
    /// Friction velocity u_τ (m/s)
    pub friction_velocity: f64,
    /// Reynolds number based on the reference length
    pub reynolds_number: f64,
    /// Skin-friction coefficient used for u_τ
    pub skin_friction: f64,
}

impl WallDistance {
    /// `(y1, ν, u_τ)`
    pub fn to_tuple(&self) -> (f64, f64, f64) {
        (self.first_layer_height, self.kinematic_viscosity, self.friction_velocity)
    }
}

/// Estimate the first-layer height (m) for dry air.
///
/// # Arguments
/// * `y_plus` - Target non-dimensional wall distance
/// * `u_inf` - Free-stream velocity (m/s)
/// * `l_ref` - Reference length for the Reynolds number (m)
/// * `t` - Static temperature (K)
/// * `p` - Static pressure (Pa)
///
/// # Errors
/// [`DegenerateInputError`] when the friction velocity is below `1e-12` m/s.
pub fn first_layer_height_from_yplus(
    y_plus: f64,
    u_inf: f64,
    l_ref: f64,
    t: f64,
    p: f64,
) -> Result<WallDistance, DegenerateInputError> {
    first_layer_height_from_yplus_with(y_plus, u_inf, l_ref, t, p, &GasConstants::air())
}

/// Same as [`first_layer_height_from_yplus`] with explicit gas constants.
pub fn first_layer_height_from_yplus_with(
    y_plus: f64,
    u_inf: f64,
    l_ref: f64,
    t: f64,
    p: f64,
    gas: &GasConstants,
) -> Result<WallDistance, DegenerateInputError> {
    let mu = dynamic_viscosity_sutherland_with(t, gas.mu_ref, gas.t_ref, gas.sutherland_s);
    let rho = density_ideal_gas_with(p, t, gas.r_specific);
    let nu = mu / rho;

    let re_l = reynolds_number(rho, u_inf, l_ref, mu);
    let cf = skin_friction_flat_plate_turbulent(re_l);
    let u_tau = (0.5 * cf).sqrt() * u_inf;

    // NaN friction velocity is not caught here, same as any other out-of-domain input
    if u_tau < MIN_FRICTION_VELOCITY {
        return Err(DegenerateInputError {
            y_plus,
            velocity: u_inf,
            reference_length: l_ref,
            temperature: t,
            pressure: p,
            friction_velocity: u_tau,
        });
    }

    Ok(WallDistance {
        first_layer_height: y_plus * nu / u_tau,
        kinematic_viscosity: nu,
        friction_velocity: u_tau,
        reynolds_number: re_l,
        skin_friction: cf,
    })
}

/// Total height (m) of a prism-layer stack with geometric growth.
///
/// `y1 · (g^n − 1) / (g − 1)`, or `y1 · n` when `g == 1`.
pub fn boundary_layer_thickness(first_layer_height: f64, n_layers: u32, growth: f64) -> f64 {
    if (growth - 1.0).abs() < f64::EPSILON {
        return first_layer_height * f64::from(n_layers);
    }
    first_layer_height * (growth.powf(f64::from(n_layers)) - 1.0) / (growth - 1.0)
}
