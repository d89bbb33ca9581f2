//! Free-stream gas properties.
//!
//! Closed-form relations for an ideal gas: speed of sound, velocity from
//! Mach number, density from pressure and temperature, and dynamic viscosity
//! from Sutherland's three-coefficient law. All functions are pure and total
//! for positive temperature and pressure. Non-positive temperatures are not
//! guarded and give NaN or meaningless values.

use serde::{Deserialize, Serialize};

use crate::constants::{GAMMA_AIR, GasConstants, MU_REF_AIR, R_AIR, S_AIR, T_REF_AIR};

/// Speed of sound in air (m/s) at temperature `t` (K).
#[inline]
pub fn speed_of_sound(t: f64) -> f64 {
    speed_of_sound_with(t, GAMMA_AIR, R_AIR)
}

/// Speed of sound `sqrt(γ·R·T)` for an arbitrary ideal gas.
#[inline]
pub fn speed_of_sound_with(t: f64, gamma: f64, r_specific: f64) -> f64 {
    (gamma * r_specific * t).sqrt()
}

/// Free-stream velocity (m/s) for Mach `mach` at temperature `t` (K).
#[inline]
pub fn free_stream_velocity(mach: f64, t: f64) -> f64 {
    mach * speed_of_sound(t)
}

/// Air density (kg/m³) from the ideal gas law.
#[inline]
pub fn density_ideal_gas(p: f64, t: f64) -> f64 {
    density_ideal_gas_with(p, t, R_AIR)
}

/// Density `p / (R·T)` for an arbitrary specific gas constant.
#[inline]
pub fn density_ideal_gas_with(p: f64, t: f64, r_specific: f64) -> f64 {
    p / (r_specific * t)
}

/// Dynamic viscosity of air (Pa·s) from Sutherland's law.
#[inline]
pub fn dynamic_viscosity_sutherland(t: f64) -> f64 {
    dynamic_viscosity_sutherland_with(t, MU_REF_AIR, T_REF_AIR, S_AIR)
}

/// Sutherland's three-coefficient law:
///
/// μ = μ_ref · (T/T_ref)^1.5 · (T_ref + S) / (T + S)
///
/// The temperature ratio term is grouped so that `t == t_ref` returns
/// `mu_ref` bit for bit.
#[inline]
pub fn dynamic_viscosity_sutherland_with(t: f64, mu_ref: f64, t_ref: f64, s: f64) -> f64 {
    mu_ref * (t / t_ref).powf(1.5) * ((t_ref + s) / (t + s))
}

/// Reynolds number `ρ·U·L/μ`.
#[inline]
pub fn reynolds_number(density: f64, velocity: f64, length: f64, viscosity: f64) -> f64 {
    density * velocity * length / viscosity
}

/// Dynamic pressure `½·ρ·U²` (Pa).
#[inline]
pub fn dynamic_pressure(density: f64, velocity: f64) -> f64 {
    0.5 * density * velocity * velocity
}

/// Derived free-stream state for a Mach number, temperature and pressure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeStream {
    /// Mach number
    pub mach: f64,
    /// Static temperature (K)
    pub temperature: f64,
    /// Static pressure (Pa)
    pub pressure: f64,
    /// Speed of sound (m/s)
    pub speed_of_sound: f64,
    /// Velocity magnitude (m/s)
    pub velocity: f64,
    /// Density (kg/m³)
    pub density: f64,
    /// Dynamic viscosity (Pa·s)
    pub dynamic_viscosity: f64,
    /// Kinematic viscosity (m²/s)
    pub kinematic_viscosity: f64,
    /// Dynamic pressure (Pa)
    pub dynamic_pressure: f64,
}

impl FreeStream {
    /// Evaluate the free stream of dry air.
    pub fn from_mach(mach: f64, temperature: f64, pressure: f64) -> Self {
        Self::from_mach_with(mach, temperature, pressure, &GasConstants::air())
    }

    /// Evaluate the free stream for an arbitrary gas.
    pub fn from_mach_with(mach: f64, temperature: f64, pressure: f64, gas: &GasConstants) -> Self {
        let a = speed_of_sound_with(temperature, gas.gamma, gas.r_specific);
        let velocity = mach * a;
        let density = density_ideal_gas_with(pressure, temperature, gas.r_specific);
        let mu = dynamic_viscosity_sutherland_with(temperature, gas.mu_ref, gas.t_ref, gas.sutherland_s);

        Self {
            mach,
            temperature,
            pressure,
            speed_of_sound: a,
            velocity,
            density,
            dynamic_viscosity: mu,
            kinematic_viscosity: mu / density,
            dynamic_pressure: dynamic_pressure(density, velocity),
        }
    }

    /// Reynolds number based on `length` (m).
    pub fn reynolds(&self, length: f64) -> f64 {
        reynolds_number(self.density, self.velocity, length, self.dynamic_viscosity)
    }
}
