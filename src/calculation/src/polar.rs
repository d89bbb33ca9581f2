//! Lift polar summary of a finished sweep.
//!
//! A straight line is fitted through CL(α) by least squares, which gives the
//! lift-curve slope and zero-lift angle of the linear range. Peak CL and peak
//! L/D are read off the table directly.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{AeroError, Result};
use crate::sweep::AoaResult;

/// Key numbers of a lift polar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarSummary {
    /// dCL/dα (1/deg)
    pub lift_slope_per_deg: f64,
    /// dCL/dα (1/rad)
    pub lift_slope_per_rad: f64,
    /// Angle where the fitted line crosses CL = 0 (deg)
    pub zero_lift_aoa_deg: Option<f64>,
    /// Largest CL in the sweep
    pub cl_max: f64,
    /// Angle of the largest CL (deg)
    pub aoa_at_cl_max: f64,
    /// Largest L/D with positive drag, and its angle (deg)
    pub best_lift_to_drag: Option<(f64, f64)>,
}

impl PolarSummary {
    /// Summarise a sweep. Needs at least two distinct angles.
    pub fn from_results(results: &[AoaResult]) -> Result<Self> {
        let alpha: Array1<f64> = results.iter().map(|r| r.aoa_deg).collect();
        let cl: Array1<f64> = results.iter().map(|r| r.cl).collect();

        let (Some(alpha_mean), Some(cl_mean)) = (alpha.mean(), cl.mean()) else {
            return Err(AeroError::invalid_value("results", 0, "empty sweep"));
        };
        let d_alpha = &alpha - alpha_mean;
        let sxx = d_alpha.dot(&d_alpha);
        if sxx <= f64::EPSILON {
            return Err(AeroError::invalid_value(
                "results",
                results.len(),
                "need at least two distinct angles of attack",
            ));
        }
        let slope = d_alpha.dot(&(&cl - cl_mean)) / sxx;

        let zero_lift_aoa_deg = (slope.abs() > f64::EPSILON).then(|| alpha_mean - cl_mean / slope);

        // results is non-empty past the mean check
        let (mut cl_max, mut aoa_at_cl_max) = (results[0].cl, results[0].aoa_deg);
        for r in &results[1..] {
            if r.cl > cl_max {
                cl_max = r.cl;
                aoa_at_cl_max = r.aoa_deg;
            }
        }

        let best_lift_to_drag = results
            .iter()
            .filter_map(|r| r.lift_to_drag().map(|ld| (ld, r.aoa_deg)))
            .max_by(|a, b| a.0.total_cmp(&b.0));

        Ok(Self {
            lift_slope_per_deg: slope,
            lift_slope_per_rad: slope.to_degrees(),
            zero_lift_aoa_deg,
            cl_max,
            aoa_at_cl_max,
            best_lift_to_drag,
        })
    }
}
