//! Mathematical utilities for the structural solver

use log::warn;
use nalgebra::{DMatrix, DVector, Matrix3, SMatrix};

use crate::error::{Error, Result};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;

/// 12x12 matrix for beam element stiffness
pub type Mat12 = SMatrix<f64, 12, 12>;

/// Degrees of freedom per node: x, y (span), z translation then x, y, z rotation
pub const DOF_PER_NODE: usize = 6;

/// Compute the local elastic stiffness matrix for a spanwise beam element
///
/// DOF ordering per node is [dx, dy, dz, rx, ry, rz] with y the span axis:
/// EIx bending couples x-translation with z-rotation, EIz bending couples
/// z-translation with x-rotation, EA acts on the axial (y) translations and
/// GJ on the torsional (y) rotations. There are no cross-axis coupling terms.
///
/// # Arguments
/// * `ei_x` - bending stiffness, chordwise plane (N m^2)
/// * `ei_z` - bending stiffness, flapwise plane (N m^2)
/// * `ea` - axial stiffness (N)
/// * `gj` - torsional stiffness (N m^2)
/// * `dy` - element length (m)
pub fn element_stiffness(ei_x: f64, ei_z: f64, ea: f64, gj: f64, dy: f64) -> Mat12 {
    let l = dy;
    let l2 = l * l;
    let l3 = l2 * l;

    let mut k = Mat12::zeros();

    // Chordwise bending: x translation (0, 6) with z rotation (5, 11)
    k[(0, 0)] = 12.0 * ei_x / l3;
    k[(0, 5)] = -6.0 * ei_x / l2;
    k[(0, 6)] = -12.0 * ei_x / l3;
    k[(0, 11)] = -6.0 * ei_x / l2;
    k[(5, 5)] = 4.0 * ei_x / l;
    k[(5, 6)] = 6.0 * ei_x / l2;
    k[(5, 11)] = 2.0 * ei_x / l;
    k[(6, 6)] = 12.0 * ei_x / l3;
    k[(6, 11)] = 6.0 * ei_x / l2;
    k[(11, 11)] = 4.0 * ei_x / l;

    // Axial: y translation (1, 7)
    k[(1, 1)] = ea / l;
    k[(1, 7)] = -ea / l;
    k[(7, 7)] = ea / l;

    // Flapwise bending: z translation (2, 8) with x rotation (3, 9)
    k[(2, 2)] = 12.0 * ei_z / l3;
    k[(2, 3)] = 6.0 * ei_z / l2;
    k[(2, 8)] = -12.0 * ei_z / l3;
    k[(2, 9)] = 6.0 * ei_z / l2;
    k[(3, 3)] = 4.0 * ei_z / l;
    k[(3, 8)] = -6.0 * ei_z / l2;
    k[(3, 9)] = 2.0 * ei_z / l;
    k[(8, 8)] = 12.0 * ei_z / l3;
    k[(8, 9)] = -6.0 * ei_z / l2;
    k[(9, 9)] = 4.0 * ei_z / l;

    // Torsion: y rotation (4, 10)
    k[(4, 4)] = gj / l;
    k[(4, 10)] = -gj / l;
    k[(10, 10)] = gj / l;

    // Mirror the upper triangle
    for i in 0..12 {
        for j in (i + 1)..12 {
            k[(j, i)] = k[(i, j)];
        }
    }

    k
}

/// Cubic Hermite nodal-equivalent weights for a unit transverse point load
/// applied a distance `a` into an element of length `l`
///
/// Returns `[w_i, m_i, w_j, m_j]`: transverse force and bending moment at
/// the inboard and outboard nodes.
pub fn hermite_point_load(a: f64, l: f64) -> [f64; 4] {
    let t = a / l;
    [
        2.0 * t.powi(3) - 3.0 * t.powi(2) + 1.0,
        a * (t.powi(2) - 2.0 * t + 1.0),
        -2.0 * t.powi(3) + 3.0 * t.powi(2),
        a * (t.powi(2) - t),
    ]
}

/// Linear nodal-equivalent weights `[n_i, n_j]` for a unit axial point load
pub fn linear_point_load(a: f64, l: f64) -> [f64; 2] {
    let t = a / l;
    [1.0 - t, t]
}

/// In-plane lamina transformation matrix for a ply angle `theta` (radians)
///
/// Transforms stresses from structural axes to material axes. The inverse
/// transformation is `lamina_transformation(-theta)`.
pub fn lamina_transformation(theta: f64) -> Mat3 {
    let (s, c) = theta.sin_cos();
    Mat3::new(
        c * c,
        s * s,
        2.0 * s * c,
        s * s,
        c * c,
        -2.0 * s * c,
        -s * c,
        s * c,
        c * c - s * s,
    )
}

/// Rotate a lamina stiffness matrix `q` into structural axes at ply angle
/// `theta`: Qbar = T^-1 Q T^-T, with T^-1 = T(-theta)
pub fn rotated_lamina_stiffness(q: &Mat3, theta: f64) -> Mat3 {
    let t_inv = lamina_transformation(-theta);
    t_inv * q * t_inv.transpose()
}

/// Solve the reduced (constrained) stiffness system by least squares
///
/// The clamped-root system should always be full rank for valid geometry;
/// rank deficiency is reported as a warning rather than an error so that
/// marginal configurations still produce a (minimum-norm) deformation.
pub fn solve_constrained(k: &Mat, f: &Vec) -> Result<Vec> {
    let n = k.ncols();
    let svd = k.clone().svd(true, true);

    let eps = 1e-12 * svd.singular_values.max();
    let rank = svd.rank(eps);
    if rank < n {
        warn!(
            "reduced stiffness matrix is rank deficient ({rank}/{n}); \
             returning minimum-norm solution"
        );
    }

    svd.solve(f, eps)
        .map_err(|e| Error::SingularSystem(e.to_string()))
}
