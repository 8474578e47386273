//! Fixed-point coupling of the aerodynamic and structural solves
//!
//! The first structural solve consumes the initial aerodynamic model at
//! zero deformation; every following iteration feeds the previous
//! deformation to the updated model and solves again, until the deformation
//! stops changing.

use log::debug;

use crate::aero::AeroModel;
use crate::blade::{Blade, WireSet};
use crate::config::{CouplingOptions, Flags, PrescribedLoad};
use crate::error::{Error, Result};
use crate::fem::{self, FemSolution};
use crate::forces::{ForceDistribution, ForceSource};
use crate::math::{self, DOF_PER_NODE};

/// Converged state of the coupled solve
#[derive(Debug, Clone)]
pub struct CoupledSolution {
    /// Force distribution of the last iteration
    pub forces: ForceDistribution,
    /// Structural solution of the last iteration
    pub solution: FemSolution,
    /// Number of coupled iterations performed
    pub iterations: usize,
}

/// Iterate aerodynamics against structure until the deformation settles
///
/// Convergence is the max-abs change of the deformation vector between
/// iterations dropping to `options.tolerance`. Hitting the iteration cap
/// is an error. The check also runs after the first solve, so a
/// configuration whose initial deformation is already within tolerance of
/// zero returns without ever querying the updated model, with `forces`
/// taken from the initial estimate.
#[allow(clippy::too_many_arguments)]
pub fn couple(
    initial: &dyn AeroModel,
    updated: &dyn AeroModel,
    blade: &Blade,
    x_cg: &[f64],
    wire: &WireSet,
    prescribed: &PrescribedLoad,
    flags: &Flags,
    options: &CouplingOptions,
) -> Result<CoupledSolution> {
    let mut q = math::Vec::zeros(blade.num_nodes() * DOF_PER_NODE);
    let mut source = ForceSource::Initial;
    let mut residual = f64::INFINITY;

    for iteration in 1..=options.max_iterations {
        let forces = match source {
            ForceSource::Initial => initial.forces(&q)?,
            ForceSource::Updated => updated.forces(&q)?,
        };
        source = ForceSource::Updated;

        let solution = fem::solve(blade, x_cg, &forces, wire, prescribed, flags)?;

        residual = (&solution.q - &q).abs().max();
        debug!("coupling iteration {iteration}: residual {residual:.3e}");

        q = solution.q.clone();
        if residual <= options.tolerance {
            return Ok(CoupledSolution {
                forces,
                solution,
                iterations: iteration,
            });
        }
    }

    Err(Error::NotConverged {
        iterations: options.max_iterations,
        residual,
    })
}
