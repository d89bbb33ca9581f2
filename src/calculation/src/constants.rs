//! Physical constants for free-stream and near-wall calculations.
//!
//! The default gas is dry air at moderate temperatures, with the same
//! Sutherland three-coefficient values the CFD engine is configured with
//! (see `RunConfig`). Every function that uses these values also has a
//! `_with` variant taking explicit overrides, so alternative gases can be
//! evaluated without touching any shared state.

use serde::{Deserialize, Serialize};

/// Specific gas constant of dry air (J/(kg·K)).
pub const R_AIR: f64 = 287.04;

/// Ratio of specific heats of dry air.
pub const GAMMA_AIR: f64 = 1.4;

/// Sutherland reference viscosity of air (Pa·s).
pub const MU_REF_AIR: f64 = 1.716e-5;

/// Sutherland reference temperature of air (K).
pub const T_REF_AIR: f64 = 273.11;

/// Sutherland effective temperature of air (K).
pub const S_AIR: f64 = 110.56;

/// Gas model constants bundled for reporting and per-call overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasConstants {
    /// Ratio of specific heats (cp/cv)
    pub gamma: f64,

    /// Specific gas constant (J/(kg·K))
    pub r_specific: f64,

    /// Sutherland reference viscosity (Pa·s)
    pub mu_ref: f64,

    /// Sutherland reference temperature (K)
    pub t_ref: f64,

    /// Sutherland effective temperature (K)
    pub sutherland_s: f64,
}

impl GasConstants {
    /// Dry air, the default for every calculation in this crate.
    pub const fn air() -> Self {
        Self {
            gamma: GAMMA_AIR,
            r_specific: R_AIR,
            mu_ref: MU_REF_AIR,
            t_ref: T_REF_AIR,
            sutherland_s: S_AIR,
        }
    }

    /// Get a summary of constants as a hash map for reporting.
    pub fn summary(&self) -> std::collections::HashMap<String, String> {
        let mut map = std::collections::HashMap::new();
        map.insert("gamma".to_string(), format!("{:.3}", self.gamma));
        map.insert("R (J/(kg·K))".to_string(), format!("{:.2}", self.r_specific));
        map.insert("mu_ref (Pa·s)".to_string(), format!("{:.4e}", self.mu_ref));
        map.insert("T_ref (K)".to_string(), format!("{:.2}", self.t_ref));
        map.insert("S (K)".to_string(), format!("{:.2}", self.sutherland_s));
        map
    }
}

impl Default for GasConstants {
    fn default() -> Self {
        Self::air()
    }
}

/// Empirical constants of the turbulent flat-plate wall model.
pub mod wall_model {
    /// Numerator of the skin-friction correlation `Cf = 0.026 / Re^(1/7)`.
    pub const CF_COEFFICIENT: f64 = 0.026;

    /// Reynolds-number exponent of the skin-friction correlation.
    pub const CF_EXPONENT: f64 = 1.0 / 7.0;

    /// Skin-friction coefficient returned for non-positive Reynolds numbers.
    pub const CF_FALLBACK: f64 = 0.003;

    /// Smallest friction velocity (m/s) the wall-distance inversion accepts.
    pub const MIN_FRICTION_VELOCITY: f64 = 1e-12;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_defaults() {
        let c = GasConstants::default();
        assert_eq!(c.gamma, 1.4);
        assert_eq!(c.r_specific, 287.04);
        assert_eq!(c.mu_ref, 1.716e-5);
        assert_eq!(c.t_ref, 273.11);
        assert_eq!(c.sutherland_s, 110.56);
    }

    #[test]
    fn test_summary_keys() {
        let summary = GasConstants::air().summary();
        assert_eq!(summary.len(), 5);
        assert_eq!(summary["gamma"], "1.400");
        assert!(summary.contains_key("S (K)"));
    }
}
