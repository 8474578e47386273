//! Top-level evaluation of one rotor configuration

use serde::Serialize;

use crate::aero::AeroModel;
use crate::blade::{Blade, JointStiffness, QuadStrut, WireSet};
use crate::config::{CouplingOptions, Flags, PrescribedLoad};
use crate::coupling;
use crate::error::{Error, Result};
use crate::failure::{self, FailureReport};
use crate::forces::ForceDistribution;
use crate::mass::{self, FixedMasses, MassBreakdown};
use crate::math;
use crate::results::{self, PerformanceSummary};
use crate::strain::{self, InternalForce, StrainField};

const GRAVITY: f64 = 9.81;

/// A complete rotor configuration ready for evaluation
#[derive(Debug, Clone)]
pub struct Rotor {
    /// Discretized blade properties
    pub blade: Blade,
    /// Spar stiffness at the wire joint
    pub joint: JointStiffness,
    /// Quad support strut
    pub quad: QuadStrut,
    /// Lift wires
    pub wire: WireSet,
    /// Evaluation flags
    pub flags: Flags,
    /// Bench-test load, used only in the prescribed load case
    pub prescribed: PrescribedLoad,
    /// Design-independent masses
    pub masses: FixedMasses,
    /// Blades per rotor
    pub n_blades: usize,
    /// Rotor radius (m)
    pub radius: f64,
    /// Span of the root cutout (m)
    pub ycmax: f64,
    /// Collective pitch setting (rad)
    pub collective: f64,
}

/// Everything one evaluation produces
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Mass and CG aggregation
    pub mass: MassBreakdown,
    /// Converged nodal deformation
    #[serde(skip)]
    pub deformation: math::Vec,
    /// Converged force distribution
    pub forces: ForceDistribution,
    /// Internal force resultants per node
    pub internal: Vec<InternalForce>,
    /// Wall strains per node
    pub strain: StrainField,
    /// Every failure mode
    pub failure: FailureReport,
    /// Craft-level totals
    pub summary: PerformanceSummary,
    /// Coupled iterations used
    pub iterations: usize,
}

impl Rotor {
    /// Run the full evaluation pipeline once
    ///
    /// Mass aggregation, the coupled aero/structure solve, strain recovery,
    /// failure analysis and the performance summary, in that order. `cl` is
    /// the target lift coefficient distribution the jig angles are sized
    /// for, one entry per element.
    pub fn evaluate(
        &self,
        initial: &dyn AeroModel,
        updated: &dyn AeroModel,
        cl: &[f64],
        options: &CouplingOptions,
    ) -> Result<Evaluation> {
        self.blade.validate()?;
        let n = self.blade.num_elements();
        if cl.len() != n {
            return Err(Error::DimensionMismatch(format!(
                "cl has {} entries, expected {n} (one per element)",
                cl.len()
            )));
        }

        let mass = mass::mass_breakdown(
            &self.blade,
            &self.wire,
            &self.quad,
            &self.flags,
            &self.masses,
            self.n_blades,
            self.ycmax,
            self.radius,
        );

        let coupled = coupling::couple(
            initial,
            updated,
            &self.blade,
            &mass.x_cg,
            &self.wire,
            &self.prescribed,
            &self.flags,
            options,
        )?;

        let (internal, strain) = strain::recover(
            &coupled.solution.element_stiffness,
            &coupled.solution.f_global,
            &coupled.solution.q,
            &self.blade.d,
            &self.blade.y_node,
        );

        // Vertical load one rotor carries into the strut: thrust of all
        // blades minus the rotor's own weight share
        let blade_mass: f64 = self
            .blade
            .m_spar
            .iter()
            .zip(&self.blade.m_chord)
            .map(|(a, b)| a + b)
            .sum();
        let thrust_reaction = coupled.forces.total_vertical_force() * self.n_blades as f64
            - (blade_mass * self.n_blades as f64 + self.masses.rotor_else / 4.0) * GRAVITY;

        let failure = failure::evaluate(
            &self.blade,
            &self.joint,
            &self.quad,
            &self.wire,
            &internal,
            &strain,
            thrust_reaction,
            &self.flags,
        );

        let mut phi = updated.inflow_angles(&coupled.solution.q);
        phi.resize(n, 0.0);

        let summary = results::summarize(
            &self.blade,
            &coupled.forces,
            &coupled.solution.q,
            cl,
            &phi,
            self.collective,
            self.n_blades,
            self.flags.quad,
        );

        Ok(Evaluation {
            mass,
            deformation: coupled.solution.q,
            forces: coupled.forces,
            internal,
            strain,
            failure,
            summary,
            iterations: coupled.iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aero::{AeroSurface, BladeElementModel, FlightCondition};
    use crate::blade::SectionStiffness;
    use crate::materials::{CfrpType, WireType};

    fn hover_rotor(n: usize) -> (Rotor, AeroSurface, FlightCondition) {
        let blade = Blade {
            y_node: (0..=n).map(|i| 10.0 * i as f64 / n as f64).collect(),
            section: vec![SectionStiffness::new(23704.0, 23704.0, 1.82e7, 2.28e4); n],
            d: vec![0.05; n],
            theta: vec![0.35; n],
            n_tube: vec![4.0; n],
            n_cap: vec![0.0; n],
            l_biscuit: vec![0.3; n],
            chord: vec![1.0; n],
            x_ea: vec![0.3; n],
            m_spar: vec![0.25; n],
            m_chord: vec![0.45; n],
            x_cg_chord: vec![0.4; n],
        };
        let rotor = Rotor {
            blade,
            joint: JointStiffness {
                ei_x: 23704.0,
                ei_z: 23704.0,
            },
            quad: QuadStrut {
                d: 0.1,
                theta: 0.61,
                n_tube: 4.0,
                l_biscuit: 0.36,
                radius: 9.0,
                height: 3.0,
                ei: 2.0e4,
                gj: 1.0e4,
                mass: 2.0,
            },
            wire: WireSet {
                y_attach: vec![5.8],
                z_attach: 1.0,
                thickness: 0.0016,
                tension: vec![1100.0],
                te_tension: 50.0,
            },
            flags: Flags {
                quad: true,
                cover: false,
                wire_type: WireType::Pianowire,
                cfrp_type: CfrpType::Nct301Hs40,
                ..Flags::default()
            },
            prescribed: PrescribedLoad::default(),
            masses: FixedMasses {
                rotor_else: 2.0,
                centre: 10.0,
                per_radius: 0.2,
                pilot: 72.0,
            },
            n_blades: 2,
            radius: 10.0,
            ycmax: 1.4,
            collective: 0.0,
        };
        let surface = AeroSurface {
            cl: vec![1.2; n],
            cm: vec![-0.02; n],
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
        (rotor, surface, condition)
    }

    #[test]
    fn test_full_evaluation_pipeline() {
        let n = 10;
        let (rotor, surface, condition) = hover_rotor(n);
        let cl = surface.cl.clone();
        let initial =
            BladeElementModel::new(&rotor.blade, surface.clone(), condition.clone()).unwrap();
        let updated = BladeElementModel::new(&rotor.blade, surface, condition)
            .unwrap()
            .with_deformation_feedback();

        let eval = rotor
            .evaluate(&initial, &updated, &cl, &CouplingOptions::default())
            .unwrap();

        assert!(eval.mass.total > 72.0);
        assert!(eval.summary.thrust > 0.0);
        assert!(eval.iterations >= 2);
        // Clamped root
        for i in 0..6 {
            assert_eq!(eval.deformation[i], 0.0);
        }
        // Tip rows of the recovered fields are zero
        assert_eq!(eval.strain.top[n], [0.0; 3]);
        assert_eq!(eval.internal[n].x_moment, 0.0);
        // Wires are loaded, so the Euler buckling check is active inboard
        assert!(eval.failure.buckling.x[0] > 0.0);
        assert!(eval.failure.wire[0] > 0.0);
        assert!(eval.failure.quad_buckling != 0.0);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let n = 8;
        let (rotor, surface, condition) = hover_rotor(n);
        let cl = surface.cl.clone();
        let initial =
            BladeElementModel::new(&rotor.blade, surface.clone(), condition.clone()).unwrap();
        let updated = BladeElementModel::new(&rotor.blade, surface, condition)
            .unwrap()
            .with_deformation_feedback();

        let a = rotor
            .evaluate(&initial, &updated, &cl, &CouplingOptions::default())
            .unwrap();
        let b = rotor
            .evaluate(&initial, &updated, &cl, &CouplingOptions::default())
            .unwrap();
        assert_eq!(a.summary.thrust, b.summary.thrust);
        assert_eq!(a.deformation, b.deformation);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_cl_length_checked() {
        let n = 8;
        let (rotor, surface, condition) = hover_rotor(n);
        let initial =
            BladeElementModel::new(&rotor.blade, surface.clone(), condition.clone()).unwrap();
        let result = rotor.evaluate(
            &initial,
            &initial,
            &[1.2; 3],
            &CouplingOptions::default(),
        );
        assert!(matches!(result, Err(Error::DimensionMismatch(_))));
    }
}
