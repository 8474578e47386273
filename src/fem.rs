//! Linear-static finite element solve of the blade spar
//!
//! The spar is modelled as a chain of spanwise Euler-Bernoulli beam
//! elements with six degrees of freedom per node, ordered
//! [dx, dy, dz, rx, ry, rz]. The root node is clamped in all six.

use log::debug;

use crate::blade::{Blade, WireSet};
use crate::config::{Flags, LoadCase, PrescribedLoad};
use crate::error::{Error, Result};
use crate::forces::ForceDistribution;
use crate::math::{
    self, element_stiffness, hermite_point_load, linear_point_load, Mat, Mat12, DOF_PER_NODE,
};

const GRAVITY: f64 = 9.81;

/// Chordwise location of the aerodynamic centre (fraction of chord)
const X_AC: f64 = 0.25;

/// Result of one structural solve
#[derive(Debug, Clone)]
pub struct FemSolution {
    /// Local elastic stiffness matrix of each element
    pub element_stiffness: Vec<Mat12>,
    /// Assembled global stiffness matrix, before the root constraint
    pub k_global: Mat,
    /// Assembled global force vector, before the root constraint
    pub f_global: math::Vec,
    /// Nodal deformation, root entries identically zero
    pub q: math::Vec,
}

impl FemSolution {
    /// Flapwise (z) deflection at each node (m)
    pub fn deflection_z(&self) -> Vec<f64> {
        (0..self.q.len() / DOF_PER_NODE)
            .map(|s| self.q[s * DOF_PER_NODE + 2])
            .collect()
    }

    /// Torsional (y) rotation at each node (rad)
    pub fn twist(&self) -> Vec<f64> {
        (0..self.q.len() / DOF_PER_NODE)
            .map(|s| self.q[s * DOF_PER_NODE + 4])
            .collect()
    }
}

/// Nodal-equivalent load contributions of one element, inboard then
/// outboard node
struct ElementLoads {
    aero: [f64; 6],
    gravity: [f64; 6],
    wire: [f64; 12],
    prescribed: [f64; 12],
}

impl ElementLoads {
    fn zeros() -> Self {
        Self {
            aero: [0.0; 6],
            gravity: [0.0; 6],
            wire: [0.0; 12],
            prescribed: [0.0; 12],
        }
    }
}

/// Solve the clamped-root spar for a given force distribution
///
/// `x_cg` is the combined chordwise CG per element from the mass
/// aggregation. The aerodynamic distribution is ignored for load cases
/// other than [`LoadCase::Aerodynamic`].
pub fn solve(
    blade: &Blade,
    x_cg: &[f64],
    forces: &ForceDistribution,
    wire: &WireSet,
    prescribed: &PrescribedLoad,
    flags: &Flags,
) -> Result<FemSolution> {
    if flags.wing_warp != 0 {
        return Err(Error::UnsupportedWingWarp(flags.wing_warp));
    }
    blade.validate()?;

    let ns = blade.num_elements();
    if x_cg.len() != ns {
        return Err(Error::DimensionMismatch(format!(
            "x_cg has {} entries, expected {ns}",
            x_cg.len()
        )));
    }
    if flags.load == LoadCase::Aerodynamic && forces.len() != ns {
        return Err(Error::DimensionMismatch(format!(
            "force distribution has {} entries, expected {ns}",
            forces.len()
        )));
    }

    let dy = blade.element_lengths();
    let ndof = blade.num_nodes() * DOF_PER_NODE;

    let mut k_global = Mat::zeros(ndof, ndof);
    let mut f_global = math::Vec::zeros(ndof);
    let mut k_elem = Vec::with_capacity(ns);

    for s in 0..ns {
        let sec = blade.section[s];
        let k = element_stiffness(sec.ei_x, sec.ei_z, sec.ea, sec.gj, dy[s]);

        let base = s * DOF_PER_NODE;
        for i in 0..12 {
            for j in 0..12 {
                k_global[(base + i, base + j)] += k[(i, j)];
            }
        }

        let loads = element_loads(blade, x_cg, forces, wire, prescribed, flags, s, dy[s]);

        // Inboard node takes every contribution directly; the outboard node
        // mirrors the aero and gravity terms with the x and z moments flipped.
        for i in 0..6 {
            f_global[base + i] +=
                loads.prescribed[i] + loads.wire[i] + loads.gravity[i] + loads.aero[i];
        }
        let moment_sign = [1.0, 1.0, 1.0, -1.0, 1.0, -1.0];
        for i in 0..6 {
            f_global[base + 6 + i] += loads.prescribed[6 + i]
                + loads.wire[6 + i]
                + moment_sign[i] * (loads.gravity[i] + loads.aero[i]);
        }

        k_elem.push(k);
    }

    // Clamp all six root DOFs: drop their rows and columns, solve the
    // reduced system, then put the zero root deformation back.
    let kc = k_global.view((6, 6), (ndof - 6, ndof - 6)).into_owned();
    let fc = f_global.rows(6, ndof - 6).into_owned();
    let qc = math::solve_constrained(&kc, &fc)?;

    let mut q = math::Vec::zeros(ndof);
    q.rows_mut(6, ndof - 6).copy_from(&qc);

    debug!(
        "solved {ns}-element spar: tip deflection {:.4e} m",
        q[ndof - 4]
    );

    Ok(FemSolution {
        element_stiffness: k_elem,
        k_global,
        f_global,
        q,
    })
}

fn element_loads(
    blade: &Blade,
    x_cg: &[f64],
    forces: &ForceDistribution,
    wire: &WireSet,
    prescribed: &PrescribedLoad,
    flags: &Flags,
    s: usize,
    dy: f64,
) -> ElementLoads {
    let mut loads = ElementLoads::zeros();

    if flags.load == LoadCase::Aerodynamic {
        loads.aero[0] = forces.fx[s] / 2.0;
        loads.aero[2] = forces.fz[s] / 2.0;
        loads.aero[3] = forces.fz[s] * dy / 12.0;
        loads.aero[4] =
            forces.my[s] / 2.0 + (blade.x_ea[s] - X_AC) * blade.chord[s] * forces.fz[s] / 2.0;
        loads.aero[5] = -forces.fx[s] * dy / 12.0;
    }

    if matches!(flags.load, LoadCase::Aerodynamic | LoadCase::GravityOnly) {
        let m = blade.m_spar[s] + blade.m_chord[s];
        loads.gravity[2] = -m * GRAVITY / 2.0;
        loads.gravity[3] = -m * GRAVITY * dy / 12.0;
        loads.gravity[4] = (x_cg[s] - blade.x_ea[s]) * blade.chord[s] * m * GRAVITY / 2.0;

        // Every wire attached inside this element contributes; the interval
        // is half open so an attachment at a node belongs to one element only.
        for w in 0..wire.len() {
            let yw = wire.y_attach[w];
            if yw >= blade.y_node[s] && yw < blade.y_node[s + 1] {
                let theta = wire.z_attach.atan2(yw);
                let a = yw - blade.y_node[s];
                let fx = -theta.cos() * wire.tension[w];
                let fz = -theta.sin() * wire.tension[w];
                let axial = linear_point_load(a, dy);
                let bend = hermite_point_load(a, dy);
                loads.wire[1] += fx * axial[0];
                loads.wire[2] += fz * bend[0];
                loads.wire[3] += fz * bend[1];
                loads.wire[7] += fx * axial[1];
                loads.wire[8] += fz * bend[2];
                loads.wire[9] += fz * bend[3];
            }
        }
    }

    if flags.load == LoadCase::Prescribed {
        if prescribed.y >= blade.y_node[s] && prescribed.y < blade.y_node[s + 1] {
            let a = prescribed.y - blade.y_node[s];
            let bend = hermite_point_load(a, dy);
            let axial = linear_point_load(a, dy);
            loads.prescribed[2] = prescribed.point_z * bend[0];
            loads.prescribed[3] = prescribed.point_z * bend[1];
            loads.prescribed[4] = prescribed.point_m * axial[0];
            loads.prescribed[8] = prescribed.point_z * bend[2];
            loads.prescribed[9] = prescribed.point_z * bend[3];
            loads.prescribed[10] = prescribed.point_m * axial[1];
        }

        loads.prescribed[0] += prescribed.distributed_x * dy / 2.0;
        loads.prescribed[2] += prescribed.distributed_z * dy / 2.0;
        loads.prescribed[3] += prescribed.distributed_z * dy * dy / 12.0;
        loads.prescribed[4] += prescribed.distributed_m * dy / 2.0;
        loads.prescribed[5] -= prescribed.distributed_x * dy * dy / 12.0;
        loads.prescribed[6] += prescribed.distributed_x * dy / 2.0;
        loads.prescribed[8] += prescribed.distributed_z * dy / 2.0;
        loads.prescribed[9] -= prescribed.distributed_z * dy * dy / 12.0;
        loads.prescribed[10] += prescribed.distributed_m * dy / 2.0;
        loads.prescribed[11] += prescribed.distributed_x * dy * dy / 12.0;
    }

    loads
}
