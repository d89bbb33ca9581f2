//! Angle-of-attack sweep and force reduction.
//!
//! The CFD engine solves each angle of attack and integrates the pressure and
//! shear forces on the wing walls. This module owns everything around that
//! call: parsing the AoA list, turning an angle into a far-field flow
//! direction, and reducing body-axis wall forces to lift, drag and their
//! coefficients. The engine is reached through the [`ForceSource`] trait.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SolverConfig;
use crate::error::{AeroError, Result};

/// Upper bound on the number of angles a range expression may expand to.
const MAX_AOA_POINTS: usize = 10_000;

/// Tolerance when matching recorded angles of attack (deg).
const AOA_MATCH_TOL: f64 = 1e-6;

fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

/// Parse an angle-of-attack list.
///
/// Accepts a comma list `"0,2,4,6"` or an inclusive range
/// `"start:step:stop"` such as `"-4:2:10"`. A zero step yields `[start]`,
/// a step pointing away from `stop` yields an empty list.
pub fn parse_aoa_list(s: &str) -> Result<Vec<f64>> {
    let invalid = |reason: &str| AeroError::InvalidAoaList {
        input: s.to_string(),
        reason: reason.to_string(),
    };

    if s.contains(':') {
        let parts = s
            .split(':')
            .map(|p| p.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| invalid(&e.to_string()))?;
        let [start, step, stop] = parts[..] else {
            return Err(invalid("range must be start:step:stop"));
        };
        if !(start.is_finite() && step.is_finite() && stop.is_finite()) {
            return Err(invalid("range bounds and step must be finite"));
        }
        if step == 0.0 {
            return Ok(vec![start]);
        }

        let mut out = Vec::new();
        let mut x = start;
        while (step > 0.0 && x <= stop) || (step < 0.0 && x >= stop) {
            if out.len() == MAX_AOA_POINTS {
                return Err(invalid("range expands to too many angles"));
            }
            out.push(round6(x));
            x += step;
        }
        return Ok(out);
    }

    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse::<f64>().map_err(|e| invalid(&format!("'{item}': {e}"))))
        .collect()
}

/// Far-field flow direction `[cos α, 0, sin α]` for an AoA in degrees.
///
/// The wing span lies along y, so the angle of attack rotates the flow in the
/// x-z plane.
pub fn flow_direction(aoa_deg: f64) -> [f64; 3] {
    let a = aoa_deg.to_radians();
    [a.cos(), 0.0, a.sin()]
}

/// Anything that can deliver integrated wall forces for one angle of attack.
pub trait ForceSource {
    /// Body-axis force `[Fx, Fy, Fz]` (N) on the wing walls after solving
    /// `iterations` iterations with the far field pointing along `direction`.
    fn wall_forces(&mut self, aoa_deg: f64, direction: [f64; 3], iterations: u32) -> Result<[f64; 3]>;
}

/// One row of engine output: integrated wall force at an angle of attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallForceSample {
    /// Angle of attack (deg)
    pub aoa_deg: f64,
    /// Body-axis force (N)
    pub force: [f64; 3],
}

/// Force source replaying forces recorded from an earlier engine run.
#[derive(Debug, Clone, Default)]
pub struct RecordedForces {
    samples: Vec<WallForceSample>,
}

impl RecordedForces {
    /// Wrap recorded samples.
    pub fn new(samples: Vec<WallForceSample>) -> Self {
        Self { samples }
    }

    /// Distinct recorded angles, ascending.
    pub fn angles(&self) -> Vec<f64> {
        let mut angles: Vec<f64> = Vec::with_capacity(self.samples.len());
        let mut sorted: Vec<f64> = self.samples.iter().map(|s| s.aoa_deg).collect();
        sorted.sort_by(f64::total_cmp);
        for a in sorted {
            if angles.last().is_none_or(|last| (a - last).abs() > AOA_MATCH_TOL) {
                angles.push(a);
            }
        }
        angles
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl ForceSource for RecordedForces {
    fn wall_forces(&mut self, aoa_deg: f64, _direction: [f64; 3], _iterations: u32) -> Result<[f64; 3]> {
        // last sample wins when an angle was recorded twice
        self.samples
            .iter()
            .rev()
            .find(|s| (s.aoa_deg - aoa_deg).abs() <= AOA_MATCH_TOL)
            .map(|s| s.force)
            .ok_or(AeroError::MissingSample(aoa_deg))
    }
}

/// Reduced forces and coefficients at one angle of attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AoaResult {
    /// Angle of attack (deg)
    pub aoa_deg: f64,
    /// Body-axis x force (N)
    pub fx: f64,
    /// Body-axis y force (N)
    pub fy: f64,
    /// Body-axis z force (N)
    pub fz: f64,
    /// Lift, normal to the free stream (N)
    pub lift: f64,
    /// Drag, along the free stream (N)
    pub drag: f64,
    /// Lift coefficient
    pub cl: f64,
    /// Drag coefficient
    pub cd: f64,
}

impl AoaResult {
    /// Lift-to-drag ratio, `None` when drag is not positive.
    pub fn lift_to_drag(&self) -> Option<f64> {
        (self.drag > 0.0).then(|| self.lift / self.drag)
    }
}

/// Project a body-axis force onto wind axes and normalise by `q∞·S`.
pub fn reduce_forces(aoa_deg: f64, force: [f64; 3], q_inf: f64, ref_area: f64) -> AoaResult {
    let [fx, fy, fz] = force;
    let [cos_a, _, sin_a] = flow_direction(aoa_deg);

    let drag = fx * cos_a + fz * sin_a;
    let lift = fz * cos_a - fx * sin_a;
    let q_s = q_inf * ref_area;

    AoaResult {
        aoa_deg,
        fx,
        fy,
        fz,
        lift,
        drag,
        cl: lift / q_s,
        cd: drag / q_s,
    }
}

/// Drive `source` through every angle in `cfg.aoa_deg`.
pub fn run_sweep<S: ForceSource + ?Sized>(source: &mut S, cfg: &SolverConfig) -> Result<Vec<AoaResult>> {
    let fs = cfg.free_stream();
    let q_s = fs.dynamic_pressure * cfg.ref_area;
    if !(q_s > 0.0 && q_s.is_finite()) {
        return Err(AeroError::invalid_value(
            "q_inf * ref_area",
            q_s,
            "must be positive to form coefficients (check mach and ref_area)",
        ));
    }
    info!(
        "sweeping {} angles: U_inf = {:.2} m/s, q_inf = {:.1} Pa",
        cfg.aoa_deg.len(),
        fs.velocity,
        fs.dynamic_pressure
    );

    let mut results = Vec::with_capacity(cfg.aoa_deg.len());
    for &aoa in &cfg.aoa_deg {
        let force = source.wall_forces(aoa, flow_direction(aoa), cfg.n_iters)?;
        let r = reduce_forces(aoa, force, fs.dynamic_pressure, cfg.ref_area);
        debug!("AoA {:>6.2} deg: CL = {:.4}, CD = {:.5}", r.aoa_deg, r.cl, r.cd);
        results.push(r);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_aoa_list_variants() {
        assert_eq!(parse_aoa_list("0,2,4,6").unwrap(), vec![0.0, 2.0, 4.0, 6.0]);
        assert_eq!(parse_aoa_list("-4:2:2").unwrap(), vec![-4.0, -2.0, 0.0, 2.0]);
        assert_eq!(parse_aoa_list("5:0:9").unwrap(), vec![5.0]);
    }

    #[test]
    fn test_parse_aoa_list_edges() {
        assert_eq!(parse_aoa_list(" 1 , ,3,").unwrap(), vec![1.0, 3.0]);
        assert_eq!(parse_aoa_list("10:-5:0").unwrap(), vec![10.0, 5.0, 0.0]);
        assert!(parse_aoa_list("0:-1:5").unwrap().is_empty());
        // accumulated steps are rounded back onto the grid
        assert_eq!(parse_aoa_list("0:0.1:0.35").unwrap(), vec![0.0, 0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_parse_aoa_list_errors() {
        assert!(matches!(parse_aoa_list("0,two"), Err(AeroError::InvalidAoaList { .. })));
        assert!(parse_aoa_list("0:1").is_err());
        assert!(parse_aoa_list("0:1:inf").is_err());
        assert!(parse_aoa_list("0:1e-9:1").is_err());
    }

    #[test]
    fn test_flow_direction() {
        let d = flow_direction(90.0);
        assert_relative_eq!(d[0], 0.0, epsilon = 1e-15);
        assert_relative_eq!(d[2], 1.0);
        assert_eq!(flow_direction(0.0), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_reduce_forces_zero_aoa() {
        let r = reduce_forces(0.0, [2.0, 0.1, 50.0], 250.0, 0.1);
        assert_eq!(r.drag, 2.0);
        assert_eq!(r.lift, 50.0);
        assert_relative_eq!(r.cl, 2.0);
        assert_relative_eq!(r.cd, 0.08);
        assert_relative_eq!(r.lift_to_drag().unwrap(), 25.0);
    }

    #[test]
    fn test_reduce_forces_rotated() {
        // pure lift of 10 N at 30 deg expressed in body axes
        let a = 30.0_f64.to_radians();
        let force = [-10.0 * a.sin(), 0.0, 10.0 * a.cos()];
        let r = reduce_forces(30.0, force, 100.0, 1.0);
        assert_relative_eq!(r.lift, 10.0, epsilon = 1e-12);
        assert_relative_eq!(r.drag, 0.0, epsilon = 1e-12);
        assert_eq!(r.lift_to_drag(), None);
    }

    struct LinearWing {
        calls: Vec<(f64, u32)>,
    }

    impl ForceSource for LinearWing {
        fn wall_forces(&mut self, aoa_deg: f64, direction: [f64; 3], iterations: u32) -> Result<[f64; 3]> {
            self.calls.push((aoa_deg, iterations));
            // 1 N drag, 5 N/deg lift, rotated back to body axes
            let lift = 5.0 * aoa_deg;
            let drag = 1.0;
            let [c, _, s] = direction;
            Ok([drag * c - lift * s, 0.0, drag * s + lift * c])
        }
    }

    #[test]
    fn test_run_sweep_drives_source() {
        let cfg = SolverConfig {
            aoa_deg: vec![0.0, 4.0, 8.0],
            n_iters: 50,
            ..SolverConfig::default()
        };
        let mut wing = LinearWing { calls: Vec::new() };
        let results = run_sweep(&mut wing, &cfg).unwrap();

        assert_eq!(wing.calls, vec![(0.0, 50), (4.0, 50), (8.0, 50)]);
        let q_s = cfg.free_stream().dynamic_pressure * cfg.ref_area;
        for r in &results {
            assert_relative_eq!(r.lift, 5.0 * r.aoa_deg, epsilon = 1e-10);
            assert_relative_eq!(r.drag, 1.0, epsilon = 1e-10);
            assert_relative_eq!(r.cd, 1.0 / q_s, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_run_sweep_rejects_zero_mach() {
        let cfg = SolverConfig {
            mach: 0.0,
            ..SolverConfig::default()
        };
        let mut wing = LinearWing { calls: Vec::new() };
        assert!(matches!(run_sweep(&mut wing, &cfg), Err(AeroError::InvalidValue { .. })));
        assert!(wing.calls.is_empty());
    }

    #[test]
    fn test_recorded_forces() {
        let mut rec = RecordedForces::new(vec![
            WallForceSample { aoa_deg: 2.0, force: [1.0, 0.0, 10.0] },
            WallForceSample { aoa_deg: 0.0, force: [1.0, 0.0, 2.0] },
            WallForceSample { aoa_deg: 2.0, force: [1.0, 0.0, 11.0] },
        ]);
        assert_eq!(rec.len(), 3);
        assert_eq!(rec.angles(), vec![0.0, 2.0]);
        assert_eq!(rec.wall_forces(2.0, flow_direction(2.0), 1).unwrap(), [1.0, 0.0, 11.0]);
        assert!(matches!(
            rec.wall_forces(4.0, flow_direction(4.0), 1),
            Err(AeroError::MissingSample(a)) if a == 4.0
        ));
    }
}
