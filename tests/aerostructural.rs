//! End-to-end tests of the coupled evaluation pipeline

use std::cell::Cell;

use approx::assert_relative_eq;

use aerostruct::prelude::*;
use aerostruct::{coupling, failure, fem, math};

const EI: f64 = 23704.0;

fn uniform_blade(n: usize, span: f64) -> Blade {
    Blade {
        y_node: (0..=n).map(|i| span * i as f64 / n as f64).collect(),
        section: vec![SectionStiffness::new(EI, EI, 1.82e7, 2.28e4); n],
        d: vec![0.0843; n],
        theta: vec![0.3581; n],
        n_tube: vec![4.0; n],
        n_cap: vec![0.0; n],
        l_biscuit: vec![0.36; n],
        chord: vec![1.0; n],
        x_ea: vec![0.2734; n],
        m_spar: vec![0.2571; n],
        m_chord: vec![0.25; n],
        x_cg_chord: vec![0.4278; n],
    }
}

fn hover_models(blade: &Blade) -> (BladeElementModel, BladeElementModel, AeroSurface) {
    let n = blade.num_elements();
    let surface = AeroSurface {
        cl: vec![1.3; n],
        cm: vec![-0.025; n],
        xt_upper: vec![0.15; n],
        xt_lower: vec![0.3; n],
    };
    let condition = FlightCondition {
        rho: 1.18,
        visc: 1.78e-5,
        vc: 0.0,
        omega: 1.0571,
        n_blades: 2,
        rotor_radius: 10.0,
        rotor_height: 1.5,
        ycmax: 1.4,
    };
    let initial = BladeElementModel::new(blade, surface.clone(), condition.clone()).unwrap();
    let updated = BladeElementModel::new(blade, surface.clone(), condition)
        .unwrap()
        .with_deformation_feedback();
    (initial, updated, surface)
}

fn hover_rotor(blade: Blade) -> Rotor {
    Rotor {
        joint: JointStiffness { ei_x: EI, ei_z: EI },
        quad: QuadStrut {
            d: 0.1016,
            theta: 0.6109,
            n_tube: 4.0,
            l_biscuit: 0.3048,
            radius: 9.0,
            height: 3.0,
            ei: 2.0e4,
            gj: 1.0e4,
            mass: 1.8,
        },
        wire: WireSet {
            y_attach: vec![5.8],
            z_attach: 1.0,
            thickness: 0.0016,
            tension: vec![1100.0],
            te_tension: 50.0,
        },
        flags: Flags::default(),
        prescribed: PrescribedLoad::default(),
        masses: FixedMasses {
            rotor_else: 1.5,
            centre: 10.0,
            per_radius: 0.15,
            pilot: 71.0,
        },
        n_blades: 2,
        radius: 10.0,
        ycmax: 1.4,
        collective: 0.0,
        blade,
    }
}

/// Aerodynamic model stub that counts how often it is queried
struct CountingModel {
    forces: ForceDistribution,
    calls: Cell<usize>,
}

impl CountingModel {
    fn constant(n: usize, fz: f64) -> Self {
        let mut forces = ForceDistribution::zeros(n);
        forces.fz = vec![fz; n];
        Self {
            forces,
            calls: Cell::new(0),
        }
    }
}

impl AeroModel for CountingModel {
    fn forces(&self, _q: &math::Vec) -> Result<ForceDistribution> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.forces.clone())
    }
}

#[test]
fn evaluation_clamps_root_and_zeroes_tip() {
    let n = 10;
    let blade = uniform_blade(n, 10.0);
    let (initial, updated, surface) = hover_models(&blade);
    let rotor = hover_rotor(blade);

    let eval = rotor
        .evaluate(&initial, &updated, &surface.cl, &CouplingOptions::default())
        .unwrap();

    for i in 0..6 {
        assert_eq!(eval.deformation[i], 0.0);
    }
    assert_eq!(eval.strain.top[n], [0.0; 3]);
    assert_eq!(eval.strain.bottom[n], [0.0; 3]);
    assert_eq!(eval.internal[n].y_torsion, 0.0);
    assert_eq!(eval.failure.buckling.torsion[n], 0.0);
    assert_eq!(eval.failure.buckling.x[n], 0.0);
}

#[test]
fn zero_load_case_leaves_blade_undeformed() {
    let n = 8;
    let mut blade = uniform_blade(n, 10.0);
    blade.m_spar = vec![0.0; n];
    blade.m_chord = vec![0.0; n];
    let flags = Flags {
        load: LoadCase::GravityOnly,
        ..Flags::default()
    };
    let solution = fem::solve(
        &blade,
        &vec![0.0; n],
        &ForceDistribution::zeros(n),
        &WireSet::none(),
        &PrescribedLoad::default(),
        &flags,
    )
    .unwrap();
    for i in 0..solution.q.len() {
        assert_relative_eq!(solution.q[i], 0.0, epsilon = 1e-12);
    }
}

#[test]
fn self_weight_tip_deflection_matches_beam_theory() {
    let n = 20;
    let span = 10.0;
    let mut blade = uniform_blade(n, span);
    let m = 0.5;
    blade.m_spar = vec![m; n];
    blade.m_chord = vec![0.0; n];
    blade.x_ea = vec![0.4; n];
    let flags = Flags {
        load: LoadCase::GravityOnly,
        ..Flags::default()
    };
    let solution = fem::solve(
        &blade,
        &vec![0.4; n],
        &ForceDistribution::zeros(n),
        &WireSet::none(),
        &PrescribedLoad::default(),
        &flags,
    )
    .unwrap();
    let w = m * 9.81 / (span / n as f64);
    let expected = -w * span.powi(4) / (8.0 * EI);
    let tip = solution.q[n * 6 + 2];
    assert_relative_eq!(tip, expected, max_relative = 0.05);
}

#[test]
fn self_weight_deflection_stable_under_refinement() {
    // Consistent nodal loads keep the solution nodally exact, so
    // refinement must never move the tip away from beam theory
    let span = 10.0;
    let total_mass = 10.0;
    let tip_at = |n: usize| {
        let mut blade = uniform_blade(n, span);
        blade.m_spar = vec![total_mass / n as f64; n];
        blade.m_chord = vec![0.0; n];
        blade.x_ea = vec![0.4; n];
        let flags = Flags {
            load: LoadCase::GravityOnly,
            ..Flags::default()
        };
        fem::solve(
            &blade,
            &vec![0.4; n],
            &ForceDistribution::zeros(n),
            &WireSet::none(),
            &PrescribedLoad::default(),
            &flags,
        )
        .unwrap()
        .q[n * 6 + 2]
    };
    let coarse = tip_at(5);
    let fine = tip_at(20);
    let w = total_mass * 9.81 / span;
    let expected = -w * span.powi(4) / (8.0 * EI);
    assert_relative_eq!(coarse, expected, max_relative = 0.05);
    assert_relative_eq!(fine, expected, max_relative = 0.05);
    assert!((fine - expected).abs() <= (coarse - expected).abs() + 1e-9);
}

#[test]
fn coupler_queries_initial_model_exactly_once() {
    let n = 8;
    let blade = uniform_blade(n, 10.0);
    let initial = CountingModel::constant(n, 30.0);
    let updated = CountingModel::constant(n, 25.0);

    let result = coupling::couple(
        &initial,
        &updated,
        &blade,
        &vec![0.4; n],
        &WireSet::none(),
        &PrescribedLoad::default(),
        &Flags::default(),
        &CouplingOptions::default(),
    )
    .unwrap();

    assert_eq!(initial.calls.get(), 1);
    assert!(updated.calls.get() >= 1);
    // The converged state reflects the updated model, not the initial one
    assert_relative_eq!(result.forces.fz[0], 25.0);
    // Constant updated forces settle in exactly three solves: initial,
    // first updated (changes q), second updated (no change)
    assert_eq!(result.iterations, 3);
}

#[test]
fn evaluation_is_deterministic() {
    let n = 10;
    let blade = uniform_blade(n, 10.0);
    let (initial, updated, surface) = hover_models(&blade);
    let rotor = hover_rotor(blade);

    let a = rotor
        .evaluate(&initial, &updated, &surface.cl, &CouplingOptions::default())
        .unwrap();
    let b = rotor
        .evaluate(&initial, &updated, &surface.cl, &CouplingOptions::default())
        .unwrap();

    assert_eq!(a.deformation, b.deformation);
    assert_eq!(a.summary.thrust, b.summary.thrust);
    assert_eq!(a.summary.power, b.summary.power);
    assert_eq!(a.iterations, b.iterations);
}

#[test]
fn absent_hardware_yields_zero_failure_modes() {
    let n = 10;
    let blade = uniform_blade(n, 10.0);
    let (initial, updated, surface) = hover_models(&blade);
    let mut rotor = hover_rotor(blade);
    rotor.quad = QuadStrut::absent();
    rotor.wire = WireSet::none();
    rotor.flags.quad = false;

    let eval = rotor
        .evaluate(&initial, &updated, &surface.cl, &CouplingOptions::default())
        .unwrap();

    assert_eq!(eval.failure.quad_buckling, 0.0);
    assert_eq!(eval.failure.quad_bend, 0.0);
    assert_eq!(eval.failure.quad_torsion, 0.0);
    assert_eq!(eval.failure.quad_torbuck, 0.0);
    assert!(eval.failure.wire.is_empty());
    assert!(eval.failure.buckling.x.iter().all(|&v| v == 0.0));
    assert!(eval.failure.buckling.z.iter().all(|&v| v == 0.0));
    // No caps laid up anywhere, so cap failure is zero everywhere
    assert!(eval.failure.top.cap.iter().all(|row| *row == [0.0; 3]));

    // A strut with a layup but no stiffness is absent all the same
    let blade = uniform_blade(n, 10.0);
    let (initial, updated, surface) = hover_models(&blade);
    let mut rotor = hover_rotor(blade);
    rotor.quad = QuadStrut {
        d: 0.1,
        theta: 0.61,
        n_tube: 4.0,
        l_biscuit: 0.25,
        radius: 1.8,
        height: 0.4,
        ei: 0.0,
        gj: 0.0,
        mass: 0.5,
    };

    let eval = rotor
        .evaluate(&initial, &updated, &surface.cl, &CouplingOptions::default())
        .unwrap();

    assert_eq!(eval.failure.quad_buckling, 0.0);
    assert_eq!(eval.failure.quad_bend, 0.0);
    assert_eq!(eval.failure.quad_torsion, 0.0);
    assert_eq!(eval.failure.quad_torbuck, 0.0);
}

#[test]
fn zero_wire_tension_disables_euler_buckling() {
    let n = 10;
    let blade = uniform_blade(n, 10.0);
    let (initial, updated, surface) = hover_models(&blade);
    let mut rotor = hover_rotor(blade);
    rotor.wire.tension = vec![0.0];
    rotor.wire.te_tension = 0.0;

    let eval = rotor
        .evaluate(&initial, &updated, &surface.cl, &CouplingOptions::default())
        .unwrap();

    assert!(eval.failure.buckling.x.iter().all(|&v| v == 0.0));
    assert!(eval.failure.buckling.z.iter().all(|&v| v == 0.0));
    assert_eq!(eval.failure.wire[0], 0.0);
}

#[test]
fn failure_fractions_follow_stress_sign() {
    let props = CfrpType::Nct301Hs40.properties();
    let tension = failure::material_failure(&[[1e-3, 0.0, 0.0]], &[0.0], &[], &props);
    let compression = failure::material_failure(&[[-1e-3, 0.0, 0.0]], &[0.0], &[], &props);
    assert!(tension.plus[0][0] > 0.0);
    assert!(compression.plus[0][0] < 0.0);
    // The compressive allowable is lower, so the same strain magnitude
    // produces a larger failure fraction
    assert!(compression.plus[0][0].abs() > tension.plus[0][0].abs());
}

#[test]
fn torsional_buckling_fraction_scales_linearly_with_torque() {
    let props = CfrpType::Nct301Hs40.properties();
    let base = failure::torsional_buckling(
        &[5.0, 0.0],
        &[0.0843],
        &[0.3581],
        &[4.0],
        &[0.0],
        &[0.36],
        &props,
    );
    let tripled = failure::torsional_buckling(
        &[15.0, 0.0],
        &[0.0843],
        &[0.3581],
        &[4.0],
        &[0.0],
        &[0.36],
        &props,
    );
    assert_relative_eq!(tripled[0], 3.0 * base[0], max_relative = 1e-12);
    // Longer unsupported length weakens the tube
    let longer = failure::torsional_buckling(
        &[5.0, 0.0],
        &[0.0843],
        &[0.3581],
        &[4.0],
        &[0.0],
        &[0.72],
        &props,
    );
    assert!(longer[0] > base[0]);
}

#[test]
fn quad_configuration_quadruples_totals() {
    let n = 10;
    let blade = uniform_blade(n, 10.0);
    let (initial, updated, surface) = hover_models(&blade);

    let quad_rotor = hover_rotor(blade.clone());
    let mut single_rotor = hover_rotor(blade);
    single_rotor.flags.quad = false;

    let quad = quad_rotor
        .evaluate(&initial, &updated, &surface.cl, &CouplingOptions::default())
        .unwrap();
    let single = single_rotor
        .evaluate(&initial, &updated, &surface.cl, &CouplingOptions::default())
        .unwrap();

    assert_relative_eq!(quad.summary.thrust, 4.0 * single.summary.thrust, max_relative = 1e-9);
    assert_relative_eq!(quad.summary.power, 4.0 * single.summary.power, max_relative = 1e-9);
    // Per-blade structural results do not depend on the rotor count
    assert_eq!(quad.deformation, single.deformation);
}

#[test]
fn wing_warp_constraint_is_rejected() {
    let n = 8;
    let blade = uniform_blade(n, 10.0);
    let (initial, updated, surface) = hover_models(&blade);
    let mut rotor = hover_rotor(blade);
    rotor.flags.wing_warp = 3;

    let result = rotor.evaluate(&initial, &updated, &surface.cl, &CouplingOptions::default());
    assert!(matches!(result, Err(Error::UnsupportedWingWarp(3))));
}

#[test]
fn prescribed_bench_load_matches_point_load_theory() {
    let n = 10;
    let span = 10.0;
    let mut blade = uniform_blade(n, span);
    blade.m_spar = vec![0.0; n];
    blade.m_chord = vec![0.0; n];
    let flags = Flags {
        load: LoadCase::Prescribed,
        ..Flags::default()
    };
    let prescribed = PrescribedLoad::default();
    let solution = fem::solve(
        &blade,
        &vec![0.0; n],
        &ForceDistribution::zeros(n),
        &WireSet::none(),
        &prescribed,
        &flags,
    )
    .unwrap();
    let expected = prescribed.point_z * span.powi(3) / (3.0 * EI);
    assert_relative_eq!(solution.q[n * 6 + 2], expected, max_relative = 1e-3);
}
