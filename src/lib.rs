//! Aerostruct - coupled aerostructural analysis of human-powered rotor blades
//!
//! This library evaluates a single rotor-blade configuration end to end:
//! - Mass and CG aggregation of the whole craft
//! - Linear-static FE solve of the clamped spar (Euler-Bernoulli beams,
//!   six degrees of freedom per node)
//! - Internal force and strain recovery
//! - Material, Euler buckling and torsional shell buckling failure modes,
//!   plus the wire and quad-strut checks
//! - Fixed-point coupling against a pluggable aerodynamic model
//!
//! ## Example
//! ```rust
//! use aerostruct::prelude::*;
//!
//! let n = 10;
//! let blade = Blade {
//!     y_node: (0..=n).map(|i| 10.0 * i as f64 / n as f64).collect(),
//!     section: vec![SectionStiffness::new(23704.0, 23704.0, 1.82e7, 2.28e4); n],
//!     d: vec![0.05; n],
//!     theta: vec![0.35; n],
//!     n_tube: vec![4.0; n],
//!     n_cap: vec![0.0; n],
//!     l_biscuit: vec![0.3; n],
//!     chord: vec![1.0; n],
//!     x_ea: vec![0.3; n],
//!     m_spar: vec![0.25; n],
//!     m_chord: vec![0.45; n],
//!     x_cg_chord: vec![0.4; n],
//! };
//!
//! let surface = AeroSurface {
//!     cl: vec![1.2; n],
//!     cm: vec![-0.02; n],
//!     xt_upper: vec![0.15; n],
//!     xt_lower: vec![0.3; n],
//! };
//! let condition = FlightCondition {
//!     rho: 1.18,
//!     visc: 1.78e-5,
//!     vc: 0.0,
//!     omega: 1.0571,
//!     n_blades: 2,
//!     rotor_radius: 10.0,
//!     rotor_height: 1.5,
//!     ycmax: 1.4,
//! };
//!
//! let rotor = Rotor {
//!     blade: blade.clone(),
//!     joint: JointStiffness { ei_x: 23704.0, ei_z: 23704.0 },
//!     quad: QuadStrut::absent(),
//!     wire: WireSet::none(),
//!     flags: Flags { quad: false, ..Flags::default() },
//!     prescribed: PrescribedLoad::default(),
//!     masses: FixedMasses::default(),
//!     n_blades: 2,
//!     radius: 10.0,
//!     ycmax: 1.4,
//!     collective: 0.0,
//! };
//!
//! let initial = BladeElementModel::new(&blade, surface.clone(), condition.clone()).unwrap();
//! let updated = BladeElementModel::new(&blade, surface.clone(), condition)
//!     .unwrap()
//!     .with_deformation_feedback();
//!
//! let eval = rotor
//!     .evaluate(&initial, &updated, &surface.cl, &CouplingOptions::default())
//!     .unwrap();
//! assert!(eval.summary.thrust > 0.0);
//! ```

pub mod aero;
pub mod blade;
pub mod config;
pub mod coupling;
pub mod error;
pub mod failure;
pub mod fem;
pub mod forces;
pub mod mass;
pub mod materials;
pub mod math;
pub mod results;
pub mod rotor;
pub mod strain;

// Re-export common types
pub mod prelude {
    pub use crate::aero::{AeroModel, AeroSurface, BladeElementModel, FlightCondition};
    pub use crate::blade::{Blade, JointStiffness, QuadStrut, SectionStiffness, WireSet};
    pub use crate::config::{CouplingOptions, Flags, LoadCase, PrescribedLoad};
    pub use crate::coupling::CoupledSolution;
    pub use crate::error::{Error, Result};
    pub use crate::failure::FailureReport;
    pub use crate::forces::{ForceDistribution, ForceSource};
    pub use crate::mass::{FixedMasses, MassBreakdown};
    pub use crate::materials::{CfrpType, Composite, Wire, WireType};
    pub use crate::results::PerformanceSummary;
    pub use crate::rotor::{Evaluation, Rotor};
    pub use crate::strain::{InternalForce, StrainField};
}
