//! Per-element aerodynamic force distribution

use serde::{Deserialize, Serialize};

/// Which aerodynamic source the coupler is consuming
///
/// The first structural solve always uses the initial (deformation
/// independent) estimate; every later solve uses the updated model. The
/// transition happens exactly once per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceSource {
    /// Deformation-independent blade-element estimate
    Initial,
    /// Deformation-dependent estimate
    Updated,
}

/// Aerodynamic forces, moments and power contributions per blade element
///
/// Produced fresh by an aerodynamic model each coupling iteration and
/// treated as immutable by the structural solve that consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForceDistribution {
    /// Chordwise (drag-direction) force per element (N)
    pub fx: Vec<f64>,
    /// Vertical force per element (N)
    pub fz: Vec<f64>,
    /// Pitching moment per element (N m)
    pub my: Vec<f64>,
    /// Torque contribution per element (N m)
    pub q: Vec<f64>,
    /// Induced power contribution per element (W)
    pub p_i: Vec<f64>,
    /// Profile power contribution per element (W)
    pub p_p: Vec<f64>,
}

impl ForceDistribution {
    /// Create an all-zero distribution for `n` elements
    pub fn zeros(n: usize) -> Self {
        Self {
            fx: vec![0.0; n],
            fz: vec![0.0; n],
            my: vec![0.0; n],
            q: vec![0.0; n],
            p_i: vec![0.0; n],
            p_p: vec![0.0; n],
        }
    }

    /// Number of elements covered by this distribution
    pub fn len(&self) -> usize {
        self.fz.len()
    }

    /// True when the distribution covers no elements
    pub fn is_empty(&self) -> bool {
        self.fz.is_empty()
    }

    /// Sum of the vertical force over all elements (N)
    pub fn total_vertical_force(&self) -> f64 {
        self.fz.iter().sum()
    }
}
