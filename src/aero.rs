//! Aerodynamic collaborators for the coupled solve
//!
//! The structural side only needs a [`ForceDistribution`] per iteration, so
//! the aerodynamic model is a trait. A blade-element implementation with
//! annular actuator-disk inflow ships with the crate; a detailed wake model
//! can be substituted through the same trait.

use serde::{Deserialize, Serialize};

use crate::blade::Blade;
use crate::error::{Error, Result};
use crate::forces::ForceDistribution;
use crate::math::{self, DOF_PER_NODE};

/// Source of per-element aerodynamic forces for a given blade deformation
pub trait AeroModel {
    /// Compute the force distribution at the deformation `q`
    fn forces(&self, q: &math::Vec) -> Result<ForceDistribution>;

    /// Inflow angle per element at the deformation `q` (rad)
    fn inflow_angles(&self, _q: &math::Vec) -> Vec<f64> {
        Vec::new()
    }
}

/// Operating point of the rotor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightCondition {
    /// Air density (kg/m^3)
    pub rho: f64,
    /// Air dynamic viscosity (Pa s)
    pub visc: f64,
    /// Climb velocity (m/s)
    pub vc: f64,
    /// Rotor angular velocity (rad/s)
    pub omega: f64,
    /// Blades per rotor
    pub n_blades: usize,
    /// Rotor radius (m)
    pub rotor_radius: f64,
    /// Rotor height above ground, zero disables the ground-effect factor (m)
    pub rotor_height: f64,
    /// Span of the root cutout (m)
    pub ycmax: f64,
}

/// Per-element aerofoil properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AeroSurface {
    /// Lift coefficient distribution
    pub cl: Vec<f64>,
    /// Pitching moment coefficient distribution
    pub cm: Vec<f64>,
    /// Laminar-flow fraction on the upper surface
    pub xt_upper: Vec<f64>,
    /// Laminar-flow fraction on the lower surface
    pub xt_lower: Vec<f64>,
}

/// Blade-element aerodynamic model with actuator-disk inflow
///
/// Thrust is computed per annular ring assuming small angles, the induced
/// velocity from momentum balance over the ring, and profile drag from a
/// mixed laminar/turbulent flat-plate skin friction model. With deformation
/// feedback enabled the elastic twist feeds back into the lift coefficient
/// through a 2-pi lift slope and the lift vector tilts with the local
/// dihedral.
#[derive(Debug, Clone)]
pub struct BladeElementModel {
    y_node: Vec<f64>,
    chord: Vec<f64>,
    surface: AeroSurface,
    condition: FlightCondition,
    deformation_feedback: bool,
}

const LIFT_SLOPE: f64 = 2.0 * std::f64::consts::PI;

impl BladeElementModel {
    /// Create a model for `blade` at the given operating point
    ///
    /// The returned model ignores deformation; see
    /// [`with_deformation_feedback`](Self::with_deformation_feedback).
    pub fn new(blade: &Blade, surface: AeroSurface, condition: FlightCondition) -> Result<Self> {
        let n = blade.num_elements();
        for (name, len) in [
            ("cl", surface.cl.len()),
            ("cm", surface.cm.len()),
            ("xt_upper", surface.xt_upper.len()),
            ("xt_lower", surface.xt_lower.len()),
        ] {
            if len != n {
                return Err(Error::DimensionMismatch(format!(
                    "{name} has {len} entries, expected {n} (one per element)"
                )));
            }
        }
        Ok(Self {
            y_node: blade.y_node.clone(),
            chord: blade.chord.clone(),
            surface,
            condition,
            deformation_feedback: false,
        })
    }

    /// Feed the structural deformation back into the force computation
    pub fn with_deformation_feedback(mut self) -> Self {
        self.deformation_feedback = true;
        self
    }

    fn num_elements(&self) -> usize {
        self.y_node.len() - 1
    }

    /// Fraction of each element outside the root cutout
    ///
    /// Elements fully inside the cutout still count in full; only the
    /// element containing the cutout edge is scaled down.
    fn chord_fraction(&self) -> Vec<f64> {
        let n = self.num_elements();
        let mut frac = vec![1.0; n];
        let ycmax = self.condition.ycmax;
        for s in 0..n {
            if self.y_node[s] < ycmax && ycmax <= self.y_node[s + 1] {
                frac[s] = (self.y_node[s + 1] - ycmax) / (self.y_node[s + 1] - self.y_node[s]);
            }
        }
        frac
    }

    /// Mean elastic twist of each element from the deformation vector (rad)
    fn element_twist(&self, q: &math::Vec) -> Vec<f64> {
        let n = self.num_elements();
        if !self.deformation_feedback || q.len() < (n + 1) * DOF_PER_NODE {
            return vec![0.0; n];
        }
        (0..n)
            .map(|s| (q[s * DOF_PER_NODE + 4] + q[(s + 1) * DOF_PER_NODE + 4]) / 2.0)
            .collect()
    }

    /// Dihedral angle of each element from the deformation vector (rad)
    fn element_dihedral(&self, q: &math::Vec) -> Vec<f64> {
        let n = self.num_elements();
        if !self.deformation_feedback || q.len() < (n + 1) * DOF_PER_NODE {
            return vec![0.0; n];
        }
        (0..n)
            .map(|s| {
                let dz = q[(s + 1) * DOF_PER_NODE + 2] - q[s * DOF_PER_NODE + 2];
                dz.atan2(self.y_node[s + 1] - self.y_node[s])
            })
            .collect()
    }

    /// Small-angle annular thrust per element (N)
    fn thrust(&self, twist: &[f64]) -> Vec<f64> {
        let c = &self.condition;
        let frac = self.chord_fraction();
        (0..self.num_elements())
            .map(|s| {
                let r = 0.5 * (self.y_node[s] + self.y_node[s + 1]);
                let dr = self.y_node[s + 1] - self.y_node[s];
                let cl = self.surface.cl[s] + LIFT_SLOPE * twist[s];
                frac[s] * 0.5 * c.rho * (c.omega * r).powi(2) * cl * self.chord[s] * dr
            })
            .collect()
    }

    /// Momentum-balance induced velocity per annular ring (m/s)
    fn induced_velocity(&self, thrust: &[f64]) -> Vec<f64> {
        let c = &self.condition;
        let ground = if c.rotor_height > 0.0 {
            1.0 + (c.rotor_radius / c.rotor_height / 4.0).powi(2)
        } else {
            1.0
        };
        (0..self.num_elements())
            .map(|s| {
                let r = 0.5 * (self.y_node[s] + self.y_node[s + 1]);
                let dr = self.y_node[s + 1] - self.y_node[s];
                let sq = 0.25 * c.vc.powi(2)
                    + 0.25 * c.n_blades as f64 * thrust[s]
                        / (std::f64::consts::PI * c.rho * r * dr);
                (-0.5 * c.vc + sq.max(0.0).sqrt()) / ground
            })
            .collect()
    }

    /// One-sided flat-plate skin friction with transition at fraction `xt`
    fn skin_friction(re: f64, xt: f64) -> f64 {
        if re <= 0.0 {
            return 0.0;
        }
        let laminar = 1.328 * xt.max(0.0).sqrt() / re.sqrt();
        let turbulent = 0.074 / re.powf(0.2) * (1.0 - xt.clamp(0.0, 1.0).powf(0.8));
        laminar + turbulent
    }
}

impl AeroModel for BladeElementModel {
    fn forces(&self, q: &math::Vec) -> Result<ForceDistribution> {
        let n = self.num_elements();
        let c = &self.condition;
        let frac = self.chord_fraction();
        let twist = self.element_twist(q);
        let dihedral = self.element_dihedral(q);
        let thrust = self.thrust(&twist);
        let vi = self.induced_velocity(&thrust);

        let mut out = ForceDistribution::zeros(n);
        for s in 0..n {
            let r = 0.5 * (self.y_node[s] + self.y_node[s + 1]);
            let dr = self.y_node[s + 1] - self.y_node[s];
            let u_sq = (c.omega * r).powi(2) + (c.vc + vi[s]).powi(2);
            let phi = (vi[s] + c.vc).atan2(c.omega * r);

            let re = c.rho * u_sq.sqrt() * self.chord[s] / c.visc;
            let cd = Self::skin_friction(re, self.surface.xt_upper[s])
                + Self::skin_friction(re, self.surface.xt_lower[s]);

            let lift = thrust[s];
            let drag = frac[s] * 0.5 * c.rho * u_sq * cd * self.chord[s] * dr;

            out.fz[s] = (lift * phi.cos() - drag * phi.sin()) * dihedral[s].cos();
            out.fx[s] = lift * phi.sin() + drag * phi.cos();
            out.my[s] =
                frac[s] * 0.5 * c.rho * u_sq * self.surface.cm[s] * self.chord[s].powi(2) * dr;
            out.q[s] = out.fx[s] * r;
            out.p_i[s] = lift * phi.sin() * c.omega * r;
            out.p_p[s] = drag * phi.cos() * c.omega * r;
        }
        Ok(out)
    }

    fn inflow_angles(&self, q: &math::Vec) -> Vec<f64> {
        let twist = self.element_twist(q);
        let thrust = self.thrust(&twist);
        let vi = self.induced_velocity(&thrust);
        (0..self.num_elements())
            .map(|s| {
                let r = 0.5 * (self.y_node[s] + self.y_node[s + 1]);
                (vi[s] + self.condition.vc).atan2(self.condition.omega * r)
            })
            .collect()
    }
}
