//! Configuration flags and options for a single blade evaluation

use serde::{Deserialize, Serialize};

use crate::materials::{CfrpType, WireType};

/// Which load systems the FE solver applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadCase {
    /// Aerodynamic forces plus gravity and wire tension (normal run)
    Aerodynamic,
    /// Gravity and wire tension only
    GravityOnly,
    /// Prescribed point/distributed load only (bench test configuration)
    Prescribed,
}

impl Default for LoadCase {
    fn default() -> Self {
        Self::Aerodynamic
    }
}

/// Configuration flags for a blade evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flags {
    /// Load systems applied by the structural solve
    pub load: LoadCase,
    /// Cover over the root section of the rotor blades
    pub cover: bool,
    /// Quad-rotor configuration (secondary support truss present)
    pub quad: bool,
    /// Wing-warp constraint station; nonzero is unsupported and rejected
    pub wing_warp: usize,
    /// Lift-wire material
    pub wire_type: WireType,
    /// Carbon fibre prepreg used for spar tube and caps
    pub cfrp_type: CfrpType,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            load: LoadCase::Aerodynamic,
            cover: false,
            quad: true,
            wing_warp: 0,
            wire_type: WireType::Pianowire,
            cfrp_type: CfrpType::Nct301Hs40,
        }
    }
}

/// Prescribed load applied when the load case is [`LoadCase::Prescribed`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescribedLoad {
    /// Point load location along the span (m)
    pub y: f64,
    /// Point force in z (N)
    pub point_z: f64,
    /// Point pitching moment (N m)
    pub point_m: f64,
    /// Distributed force in x (N/m)
    pub distributed_x: f64,
    /// Distributed force in z (N/m)
    pub distributed_z: f64,
    /// Distributed pitching moment (N m / m)
    pub distributed_m: f64,
}

impl Default for PrescribedLoad {
    fn default() -> Self {
        Self {
            y: 9.9999,
            point_z: 0.15 * 9.8,
            point_m: 0.0,
            distributed_x: 0.0,
            distributed_z: 0.0,
            distributed_m: 0.0,
        }
    }
}

/// Options for the aerostructural fixed-point iteration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouplingOptions {
    /// Convergence tolerance on the max-abs change of the deformation vector
    pub tolerance: f64,
    /// Maximum number of coupled iterations before giving up
    pub max_iterations: usize,
}

impl Default for CouplingOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 100,
        }
    }
}

impl CouplingOptions {
    /// Set convergence tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }
}
