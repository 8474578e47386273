//! Internal force and strain recovery from a structural solution

use serde::{Deserialize, Serialize};

use crate::math::{self, Mat12, DOF_PER_NODE};

/// Internal force resultants at one node
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InternalForce {
    /// Chordwise shear (N)
    pub x_shear: f64,
    /// Axial load (N)
    pub y_axial: f64,
    /// Flapwise shear (N)
    pub z_shear: f64,
    /// Flapwise bending moment (N m)
    pub x_moment: f64,
    /// Torsional moment (N m)
    pub y_torsion: f64,
    /// Chordwise bending moment (N m)
    pub z_moment: f64,
}

/// Strain state of the spar tube at each node
///
/// The four wall positions carry `[axial, hoop, shear]` strain triplets;
/// hoop strain is zero for a thin-walled tube under beam loads. Tip
/// entries are identically zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrainField {
    /// Strain triplet on the upper wall
    pub top: Vec<[f64; 3]>,
    /// Strain triplet on the lower wall
    pub bottom: Vec<[f64; 3]>,
    /// Strain triplet on the trailing wall
    pub back: Vec<[f64; 3]>,
    /// Strain triplet on the leading wall
    pub front: Vec<[f64; 3]>,
    /// Chordwise bending strain at the wall
    pub bending_x: Vec<f64>,
    /// Flapwise bending strain at the wall
    pub bending_z: Vec<f64>,
    /// Axial strain
    pub axial_y: Vec<f64>,
    /// Torsional shear strain at the wall
    pub torsion_y: Vec<f64>,
}

impl StrainField {
    /// An all-zero strain state over `num_nodes` nodes
    pub fn zeros(num_nodes: usize) -> Self {
        Self {
            top: vec![[0.0; 3]; num_nodes],
            bottom: vec![[0.0; 3]; num_nodes],
            back: vec![[0.0; 3]; num_nodes],
            front: vec![[0.0; 3]; num_nodes],
            bending_x: vec![0.0; num_nodes],
            bending_z: vec![0.0; num_nodes],
            axial_y: vec![0.0; num_nodes],
            torsion_y: vec![0.0; num_nodes],
        }
    }
}

/// Recover internal forces and wall strains from the deformation
///
/// Each node `s < N` is evaluated from the element it begins; the tip node
/// carries no load and both outputs are zero there.
///
/// # Arguments
/// * `element_stiffness` - local stiffness matrix of each element
/// * `f_global` - assembled global force vector
/// * `q` - nodal deformation
/// * `d` - spar tube outer diameter per element (m)
/// * `y_node` - node stations (m)
pub fn recover(
    element_stiffness: &[Mat12],
    f_global: &math::Vec,
    q: &math::Vec,
    d: &[f64],
    y_node: &[f64],
) -> (Vec<InternalForce>, StrainField) {
    let ns = element_stiffness.len();
    let mut internal = vec![InternalForce::default(); ns + 1];
    let mut strain = StrainField::zeros(ns + 1);

    for s in 0..ns {
        let base = s * DOF_PER_NODE;
        let dy = y_node[s + 1] - y_node[s];

        let q_elem = q.fixed_rows::<12>(base).into_owned();
        let f_elem = f_global.fixed_rows::<12>(base).into_owned();
        let residual = -(element_stiffness[s] * q_elem - f_elem);

        internal[s] = InternalForce {
            x_shear: residual[0],
            y_axial: residual[1],
            z_shear: residual[2],
            x_moment: residual[3],
            y_torsion: residual[4],
            z_moment: residual[5],
        };

        // Wall offsets from the neutral axis
        let x_hat = d[s] / 2.0;
        let z_hat = d[s] / 2.0;
        let r_hat = d[s] / 2.0;

        strain.bending_x[s] = -(-(6.0 * x_hat) / dy.powi(2) * q_elem[0]
            + (4.0 * x_hat) / dy * q_elem[5]
            + (6.0 * x_hat) / dy.powi(2) * q_elem[6]
            + (2.0 * x_hat) / dy * q_elem[11]);

        strain.bending_z[s] = -(-(6.0 * z_hat) / dy.powi(2) * q_elem[2]
            - (4.0 * z_hat) / dy * q_elem[3]
            + (6.0 * z_hat) / dy.powi(2) * q_elem[8]
            - (2.0 * z_hat) / dy * q_elem[9]);

        strain.axial_y[s] = (q_elem[7] - q_elem[1]) / dy;
        strain.torsion_y[s] = r_hat * (q_elem[10] - q_elem[4]) / dy;

        strain.top[s] = [strain.bending_z[s] + strain.axial_y[s], 0.0, strain.torsion_y[s]];
        strain.bottom[s] = [
            -strain.bending_z[s] + strain.axial_y[s],
            0.0,
            strain.torsion_y[s],
        ];
        strain.back[s] = [strain.bending_x[s] + strain.axial_y[s], 0.0, strain.torsion_y[s]];
        strain.front[s] = [
            -strain.bending_x[s] + strain.axial_y[s],
            0.0,
            strain.torsion_y[s],
        ];
    }

    (internal, strain)
}
