//! Whole-craft performance totals from a converged evaluation

use serde::{Deserialize, Serialize};

use crate::blade::Blade;
use crate::forces::ForceDistribution;
use crate::math::{self, DOF_PER_NODE};

const LIFT_SLOPE: f64 = 2.0 * std::f64::consts::PI;

/// Craft-level totals and per-element geometry results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Total thrust over all blades and rotors (N)
    pub thrust: f64,
    /// Total torque (N m)
    pub torque: f64,
    /// Total power, induced plus profile (W)
    pub power: f64,
    /// Root bending moment of one blade (N m)
    pub root_moment: f64,
    /// Deformed dihedral angle per element (rad)
    pub dihedral: Vec<f64>,
    /// Jig (build) angle of attack per element (rad)
    pub jig_angle: Vec<f64>,
}

/// Aggregate craft totals from the converged deformation and forces
///
/// The jig angle is the incidence each element must be built with so that
/// the target lift coefficient is reached once the blade twists under
/// load: `cl / (2 pi)` minus the mean elastic twist, plus the inflow
/// angle, minus the collective setting. Thrust, torque and power scale by
/// the blade count and by four rotors in the quad configuration.
#[allow(clippy::too_many_arguments)]
pub fn summarize(
    blade: &Blade,
    forces: &ForceDistribution,
    q: &math::Vec,
    cl: &[f64],
    phi: &[f64],
    collective: f64,
    n_blades: usize,
    quad: bool,
) -> PerformanceSummary {
    let n = blade.num_elements();
    let rotors = if quad { 4.0 } else { 1.0 };
    let scale = n_blades as f64 * rotors;

    let dihedral: Vec<f64> = (0..n)
        .map(|s| {
            let dz = q[(s + 1) * DOF_PER_NODE + 2] - q[s * DOF_PER_NODE + 2];
            dz.atan2(blade.y_node[s + 1] - blade.y_node[s])
        })
        .collect();

    let jig_angle: Vec<f64> = (0..n)
        .map(|s| {
            let twist = (q[s * DOF_PER_NODE + 4] + q[(s + 1) * DOF_PER_NODE + 4]) / 2.0;
            cl[s] / LIFT_SLOPE - twist + phi[s] - collective
        })
        .collect();

    let thrust: f64 = (0..n).map(|s| forces.fz[s] * dihedral[s].cos()).sum::<f64>() * scale;
    let torque: f64 = forces.q.iter().sum::<f64>() * scale;
    let power: f64 =
        (forces.p_i.iter().sum::<f64>() + forces.p_p.iter().sum::<f64>()) * scale;
    let root_moment: f64 = (0..n)
        .map(|s| forces.fz[s] * 0.5 * (blade.y_node[s] + blade.y_node[s + 1]))
        .sum();

    PerformanceSummary {
        thrust,
        torque,
        power,
        root_moment,
        dihedral,
        jig_angle,
    }
}
