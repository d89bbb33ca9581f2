//! Error types for the calculator, configuration and sweep tables.

use polars::prelude::PolarsError;

/// The friction velocity came out too small to invert for a wall distance.
///
/// Raised by the y+ estimator when `u_tau < 1e-12`, typically because the
/// free-stream velocity is zero. Carries the inputs that produced it.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error(
    "friction velocity u_tau = {friction_velocity:e} m/s is ~0 (y_plus = {y_plus}, \
     U_inf = {velocity} m/s, L_ref = {reference_length} m, T = {temperature} K, \
     p = {pressure} Pa); check inputs"
)]
pub struct DegenerateInputError {
    /// Target y+
    pub y_plus: f64,
    /// Free-stream velocity (m/s)
    pub velocity: f64,
    /// Reference length (m)
    pub reference_length: f64,
    /// Temperature (K)
    pub temperature: f64,
    /// Pressure (Pa)
    pub pressure: f64,
    /// The rejected friction velocity (m/s)
    pub friction_velocity: f64,
}

/// A meshing workflow name that is neither `fault-tolerant` nor `watertight`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown meshing workflow '{0}' (expected 'fault-tolerant' or 'watertight')")]
pub struct UnknownWorkflow(pub String);

/// Library-level error.
#[derive(Debug, thiserror::Error)]
pub enum AeroError {
    /// Wall-distance estimate could not be formed
    #[error(transparent)]
    DegenerateInput(#[from] DegenerateInputError),

    /// Malformed angle-of-attack list
    #[error("invalid AoA list '{input}': {reason}")]
    InvalidAoaList {
        /// Raw list as given
        input: String,
        /// What is wrong with it
        reason: String,
    },

    /// Configuration value out of range
    #[error("invalid value for '{key}': {value} - {reason}")]
    InvalidValue {
        /// Configuration key
        key: String,
        /// Offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A required column is absent from a table
    #[error("column '{0}' not found in table")]
    MissingColumn(String),

    /// No recorded forces for the requested angle of attack
    #[error("no recorded wall forces for AoA = {0} deg")]
    MissingSample(f64),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Table read/write error
    #[error("table error: {0}")]
    Table(#[from] PolarsError),
}

impl AeroError {
    /// Shorthand for [`AeroError::InvalidValue`].
    pub fn invalid_value(key: &str, value: impl ToString, reason: &str) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AeroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_message_carries_inputs() {
        let err = DegenerateInputError {
            y_plus: 1.0,
            velocity: 0.0,
            reference_length: 0.3,
            temperature: 288.15,
            pressure: 101325.0,
            friction_velocity: 0.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("U_inf = 0 m/s"));
        assert!(msg.contains("L_ref = 0.3 m"));
        assert!(msg.contains("p = 101325 Pa"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = AeroError::invalid_value("surf_min", -1.0, "must be positive");
        assert!(err.to_string().contains("surf_min"));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_degenerate_converts() {
        let inner = DegenerateInputError {
            y_plus: 1.0,
            velocity: 0.0,
            reference_length: 0.3,
            temperature: 288.15,
            pressure: 101325.0,
            friction_velocity: 0.0,
        };
        let err: AeroError = inner.into();
        assert!(matches!(err, AeroError::DegenerateInput(e) if e == inner));
    }
}
