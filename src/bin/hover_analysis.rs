//! Hover analysis of a human-powered helicopter rotor blade

use aerostruct::prelude::*;

fn main() {
    env_logger::init();

    println!("=== Aerostruct Example: Hover Analysis ===\n");

    // 10-element blade of a 10 m radius, two-blade rotor. Section
    // stiffness is uniform here; a real design tapers it along the span.
    let n = 10;
    let radius = 10.0;
    let blade = Blade {
        y_node: (0..=n).map(|i| radius * i as f64 / n as f64).collect(),
        section: vec![SectionStiffness::new(23704.0, 23704.0, 1.82e7, 2.28e4); n],
        d: vec![0.0843; n],
        theta: vec![0.3581; n],
        n_tube: vec![4.0; n],
        n_cap: vec![0.0; n],
        l_biscuit: vec![0.36; n],
        chord: vec![
            0.4287, 1.0586, 1.2202, 1.0563, 0.9437, 0.8611, 0.7994, 0.7501, 0.7021, 0.6293,
        ],
        x_ea: vec![0.2734; n],
        m_spar: vec![0.2571; n],
        m_chord: vec![
            0.1033, 0.3026, 0.3836, 0.3205, 0.2781, 0.2477, 0.2251, 0.2071, 0.1897, 0.1639,
        ],
        x_cg_chord: vec![0.4278; n],
    };

    let rotor = Rotor {
        blade: blade.clone(),
        joint: JointStiffness {
            ei_x: 23704.0,
            ei_z: 23704.0,
        },
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
            y_attach: vec![5.8674],
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
        radius,
        ycmax: 1.4656,
        collective: 0.0,
    };

    let surface = AeroSurface {
        cl: vec![
            0.9, 1.28, 1.38, 1.41, 1.42, 1.43, 1.44, 1.44, 1.45, 1.45,
        ],
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
        rotor_radius: radius,
        rotor_height: 1.5,
        ycmax: 1.4656,
    };

    let initial = BladeElementModel::new(&blade, surface.clone(), condition.clone())
        .expect("aero model setup failed");
    let updated = BladeElementModel::new(&blade, surface.clone(), condition)
        .expect("aero model setup failed")
        .with_deformation_feedback();

    println!("Running coupled aerostructural analysis...\n");
    let eval = rotor
        .evaluate(&initial, &updated, &surface.cl, &CouplingOptions::default())
        .expect("evaluation failed");

    println!("Converged in {} iterations\n", eval.iterations);

    println!("Mass:");
    println!("  Total craft mass: {:.2} kg", eval.mass.total);
    println!("  Wire mass (one blade): {:.3} kg", eval.mass.wire);

    println!("\nPerformance:");
    println!("  Thrust: {:.1} N", eval.summary.thrust);
    println!("  Torque: {:.1} N·m", eval.summary.torque);
    println!("  Power:  {:.1} W", eval.summary.power);
    println!("  Root bending moment: {:.1} N·m", eval.summary.root_moment);

    let tip = eval.deformation.len() - 6;
    println!("\nDeformation:");
    println!("  Tip deflection: {:.4} m", eval.deformation[tip + 2]);
    println!("  Tip twist: {:.5} rad", eval.deformation[tip + 4]);

    let max_ply = eval
        .failure
        .top
        .plus
        .iter()
        .chain(&eval.failure.bottom.plus)
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |acc, &v| acc.max(v.abs()));
    println!("\nFailure fractions:");
    println!("  Max wrap-ply (top/bottom): {:.4}", max_ply);
    println!("  Wire tension: {:.4}", eval.failure.wire[0]);
    println!("  Quad strut buckling: {:.4}", eval.failure.quad_buckling);

    let json = serde_json::to_string_pretty(&eval.summary).expect("serialization failed");
    println!("\nSummary (JSON):\n{json}");

    println!("\n=== Analysis Complete ===");
}
