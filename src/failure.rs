//! Failure analysis of the spar, wires and quad support truss
//!
//! Material failure samples laminates on the top, bottom, back and front
//! walls of the spar tube. Each wall reports the failure fraction of the
//! cap strip, the plus-angle plies and the minus-angle plies, resolved in
//! the fibre, matrix and shear directions. Buckling covers Euler buckling
//! of the inboard spar under wire tension, torsional shell buckling of the
//! tube between biscuits, and the quad-strut modes.

use serde::{Deserialize, Serialize};

use crate::blade::{Blade, JointStiffness, QuadStrut, WireSet};
use crate::config::Flags;
use crate::materials::Composite;
use crate::math::{lamina_transformation, rotated_lamina_stiffness, Mat3};
use crate::strain::{InternalForce, StrainField};

/// Bending moment reacted by a rotor at the strut attachment (N m)
const ROTOR_MOMENT: f64 = 1400.0;

/// Failure fractions of the laminates on one spar wall
///
/// Rows are `[fibre, matrix, shear]`; the sign follows the stress, so
/// tensile failures are positive and compressive failures negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialFailure {
    /// Unidirectional cap strip, zero where no cap is laid up
    pub cap: Vec<[f64; 3]>,
    /// Plus-angle wrap plies
    pub plus: Vec<[f64; 3]>,
    /// Minus-angle wrap plies
    pub minus: Vec<[f64; 3]>,
}

/// Buckling failure fractions per node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucklingFailure {
    /// Euler buckling of the inboard spar, chordwise plane
    pub x: Vec<f64>,
    /// Euler buckling of the inboard spar, flapwise plane
    pub z: Vec<f64>,
    /// Torsional shell buckling of the tube
    pub torsion: Vec<f64>,
}

/// Every failure mode of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureReport {
    pub top: MaterialFailure,
    pub bottom: MaterialFailure,
    pub back: MaterialFailure,
    pub front: MaterialFailure,
    pub buckling: BucklingFailure,
    /// Euler buckling of the quad strut under thrust
    pub quad_buckling: f64,
    /// Material failure of the strut under the rotor bending moment
    pub quad_bend: f64,
    /// Material failure of the strut under the rotor torque
    pub quad_torsion: f64,
    /// Torsional shell buckling of the strut
    pub quad_torbuck: f64,
    /// Tensile failure fraction of each lift wire
    pub wire: Vec<f64>,
}

/// In-plane stiffness matrix of a lamina, without transverse coupling
fn lamina_stiffness(props: &Composite) -> Mat3 {
    let mut q = Mat3::zeros();
    q[(0, 0)] = props.e_11;
    q[(1, 1)] = props.e_22;
    q[(0, 1)] = props.e_22 * props.v_12;
    q[(1, 0)] = q[(0, 1)];
    q[(2, 2)] = props.g_12;
    q
}

/// Divide a stress by the tensile or compressive ultimate, picked by sign
fn fraction(stress: f64, ultimate_tens: f64, ultimate_comp: f64) -> f64 {
    if stress > 0.0 {
        stress / ultimate_tens
    } else {
        stress / ultimate_comp
    }
}

fn ply_failure(stress: &nalgebra::Vector3<f64>, props: &Composite) -> [f64; 3] {
    [
        fraction(stress[0], props.ultimate_11_tens, props.ultimate_11_comp),
        fraction(stress[1], props.ultimate_22_tens, props.ultimate_22_comp),
        stress[2] / props.ultimate_12,
    ]
}

/// Material failure of the laminates along one spar wall
///
/// `strains` holds one `[axial, hoop, shear]` triplet per node; entries
/// beyond the last element (the tip) stay zero. `n_cap` may be empty for
/// walls that carry no cap strip.
pub fn material_failure(
    strains: &[[f64; 3]],
    theta: &[f64],
    n_cap: &[f64],
    props: &Composite,
) -> MaterialFailure {
    let n = strains.len();
    let mut failure = MaterialFailure {
        cap: vec![[0.0; 3]; n],
        plus: vec![[0.0; 3]; n],
        minus: vec![[0.0; 3]; n],
    };

    let q_tube = lamina_stiffness(props);
    let q_cap = lamina_stiffness(props);

    let evaluated = theta.len().min(n);
    for s in 0..evaluated {
        let qbar_plus = rotated_lamina_stiffness(&q_tube, theta[s]);
        let qbar_minus = rotated_lamina_stiffness(&q_tube, -theta[s]);

        let strain = nalgebra::Vector3::from_column_slice(&strains[s]);

        // Structural-axis stresses, then rotated into each ply's material axes
        let stress_cap = q_cap * strain;
        let stress_plus = lamina_transformation(theta[s]) * (qbar_plus * strain);
        let stress_minus = lamina_transformation(-theta[s]) * (qbar_minus * strain);

        if n_cap.get(s).copied().unwrap_or(0.0) != 0.0 {
            failure.cap[s] = ply_failure(&stress_cap, props);
        }
        failure.plus[s] = ply_failure(&stress_plus, props);
        failure.minus[s] = ply_failure(&stress_minus, props);
    }

    failure
}

/// Torsional shell buckling of a composite tube between biscuit supports
///
/// Empirical critical-torque model for a thin orthotropic cylinder. The
/// presence of cap strips raises the allowable by a validated 1.25 factor.
/// `torque` holds one value per node; entries beyond the element arrays
/// (the tip) stay zero.
pub fn torsional_buckling(
    torque: &[f64],
    d: &[f64],
    theta: &[f64],
    n_tube: &[f64],
    n_cap: &[f64],
    l_biscuit: &[f64],
    props: &Composite,
) -> Vec<f64> {
    let mut failure = vec![0.0; torque.len()];

    let v_21 = props.v_21();
    let mu_x = props.v_12;
    let mu_theta = v_21;

    // Plane-stress elastic constants with the Poisson coupling factor
    let poisson = 1.0 - props.v_12 * v_21;
    let mut q = Mat3::zeros();
    q[(0, 0)] = props.e_11 / poisson;
    q[(1, 1)] = props.e_22 / poisson;
    q[(0, 1)] = props.e_22 * props.v_12 / poisson;
    q[(1, 0)] = q[(0, 1)];
    q[(2, 2)] = props.g_12;

    let evaluated = d.len().min(torque.len());
    for s in 0..evaluated {
        // A wall with no plies or no biscuit bay has no defined critical
        // torque; report zero rather than dividing by zero wall stiffness.
        if n_tube[s] == 0.0 || l_biscuit[s] == 0.0 {
            continue;
        }

        let af = if n_cap.get(s).copied().unwrap_or(0.0) != 0.0 {
            1.25
        } else {
            1.0
        };

        let qbar = rotated_lamina_stiffness(&q, theta[s]);
        let e_x = qbar[(0, 0)];
        let e_theta = qbar[(1, 1)];

        let t_tube = n_tube[s] * props.t_ply;
        let r = (d[s] + t_tube) / 2.0;
        let l = l_biscuit[s];

        let d_x = e_x * t_tube.powi(3) / 12.0;
        let d_theta = e_theta * t_tube.powi(3) / 12.0;
        let b_x = e_x * t_tube;
        let b_theta = e_theta * t_tube;

        let rho = ((d_x * d_theta) / (b_x * b_theta)).powf(0.25);
        let x = r / (rho * 1000.0);
        let gamma = 3.6125e-07 * x.powi(6) - 1.9724e-05 * x.powi(5) + 0.0004283 * x.powi(4)
            - 0.0048315 * x.powi(3)
            + 0.031801 * x.powi(2)
            - 0.12975 * x
            + 0.88309;

        let z = ((b_theta * (1.0 - mu_x * mu_theta) * l.powi(4)) / (12.0 * d_x * r.powi(2)))
            .sqrt();
        let z_s = (d_theta / d_x).powf(5.0 / 6.0) * (b_x / b_theta).sqrt() * z;
        let k_s = 0.89 * z_s.powf(0.75);
        let n_x_theta = gamma * k_s * std::f64::consts::PI.powi(2) * d_x / l.powi(2);

        let critical_torque = af * n_x_theta * 2.0 * std::f64::consts::PI * r.powi(2);
        failure[s] = (torque[s] / critical_torque).abs();
    }

    failure
}

/// Evaluate every failure mode of the blade, wires and quad strut
///
/// `thrust_reaction` is the vertical load carried through the strut by one
/// rotor, thrust minus rotor weight.
#[allow(clippy::too_many_arguments)]
pub fn evaluate(
    blade: &Blade,
    joint: &JointStiffness,
    quad: &QuadStrut,
    wire: &WireSet,
    internal: &[InternalForce],
    strain: &StrainField,
    thrust_reaction: f64,
    flags: &Flags,
) -> FailureReport {
    let props = flags.cfrp_type.properties();
    let ns = blade.num_elements();

    let top = material_failure(&strain.top, &blade.theta, &blade.n_cap, &props);
    let bottom = material_failure(&strain.bottom, &blade.theta, &blade.n_cap, &props);
    let back = material_failure(&strain.back, &blade.theta, &[], &props);
    let front = material_failure(&strain.front, &blade.theta, &[], &props);

    // Euler buckling of the spar inboard of the first wire attachment.
    // Fixed-pinned effective length factor; the wire provides the pinned end.
    let mut buckling_x = vec![0.0; ns + 1];
    let mut buckling_z = vec![0.0; ns + 1];
    if !wire.is_empty() {
        let k = 0.7;
        let y_wire = wire.y_attach[0];
        let theta_wire = wire.z_attach.atan2(y_wire);
        let force = wire.tension[0] * theta_wire.cos() + wire.te_tension;
        let denom = (k * y_wire).powi(2);
        for s in 0..ns {
            if blade.y_node[s] <= y_wire && force != 0.0 {
                let critical_x = std::f64::consts::PI.powi(2) * joint.ei_x / denom;
                let critical_z = std::f64::consts::PI.powi(2) * joint.ei_z / denom;
                if critical_x != 0.0 {
                    buckling_x[s] = force / critical_x;
                }
                if critical_z != 0.0 {
                    buckling_z[s] = force / critical_z;
                }
            }
        }
    }

    let torque: Vec<f64> = internal.iter().map(|f| f.y_torsion).collect();
    let torsion = torsional_buckling(
        &torque,
        &blade.d,
        &blade.theta,
        &blade.n_tube,
        &blade.n_cap,
        &blade.l_biscuit,
        &props,
    );

    let (quad_buckling, quad_bend) = if quad.is_present() {
        let l = (quad.radius.powi(2) + quad.height.powi(2)).sqrt();
        let alpha = quad.height.atan2(quad.radius);
        let axial = thrust_reaction / alpha.sin();
        let critical = std::f64::consts::PI.powi(2) * quad.ei / l.powi(2);

        // Bending from the bottom-wire reaction plus the rotor moment,
        // evaluated on the compression side of the strut
        let bottom_wire = thrust_reaction / alpha.tan();
        let bm = bottom_wire * wire.z_attach + ROTOR_MOMENT;
        let bend_strain = [-bm * (quad.d / 2.0) / quad.ei, 0.0, 0.0];
        let mf = material_failure(&[bend_strain], &[quad.theta], &[], &props);
        (axial / critical, mf.plus[0][0].abs())
    } else {
        (0.0, 0.0)
    };

    let quad_torsion = if quad.gj != 0.0 {
        let torsion_strain = [0.0, 0.0, (quad.d / 2.0) * ROTOR_MOMENT / quad.gj];
        let mf = material_failure(&[torsion_strain], &[quad.theta], &[], &props);
        mf.plus[0][0].abs()
    } else {
        0.0
    };

    let quad_torbuck = if quad.is_present() && quad.n_tube != 0.0 {
        torsional_buckling(
            &[ROTOR_MOMENT],
            &[quad.d],
            &[quad.theta],
            &[quad.n_tube],
            &[0.0],
            &[quad.l_biscuit],
            &props,
        )[0]
    } else {
        0.0
    };

    let wire_props = flags.wire_type.properties();
    let wire_fail: Vec<f64> = (0..wire.len())
        .map(|i| wire.tension[i] / wire.cross_section() / wire_props.ultimate)
        .collect();

    FailureReport {
        top,
        bottom,
        back,
        front,
        buckling: BucklingFailure {
            x: buckling_x,
            z: buckling_z,
            torsion,
        },
        quad_buckling,
        quad_bend,
        quad_torsion,
        quad_torbuck,
        wire: wire_fail,
    }
}
