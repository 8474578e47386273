//! Mass and CG aggregation for the whole craft
//!
//! Feeds the gravitational load terms of the structural solve (per-element
//! blade CG) and the outer evaluation (total mass).

use serde::{Deserialize, Serialize};

use crate::blade::{Blade, QuadStrut, WireSet};
use crate::config::Flags;

/// Fixed masses that do not scale with the blade design
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixedMasses {
    /// Per-rotor hardware mass (kg)
    pub rotor_else: f64,
    /// Centre-structure mass (kg)
    pub centre: f64,
    /// Mass that scales with rotor radius (kg/m)
    pub per_radius: f64,
    /// Pilot mass (kg)
    pub pilot: f64,
}

/// Aggregated mass properties of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassBreakdown {
    /// Total craft mass (kg)
    pub total: f64,
    /// Chordwise CG per blade element (fraction of chord)
    pub x_cg: Vec<f64>,
    /// Mass of the root cover, zero without the cover flag (kg)
    pub cover: f64,
    /// Mass of all lift wires on one blade (kg)
    pub wire: f64,
}

/// Compute the total mass and per-element CG of the craft
///
/// # Arguments
/// * `blade` - per-element blade properties
/// * `wire` - lift-wire set
/// * `quad` - support strut (mass counted only in the quad configuration)
/// * `flags` - cover/quad selection and wire material
/// * `fixed` - design-independent masses
/// * `n_blades` - blades per rotor
/// * `ycmax` - span of the root cutout governing the cover size (m)
/// * `rotor_radius` - rotor radius (m)
pub fn mass_breakdown(
    blade: &Blade,
    wire: &WireSet,
    quad: &QuadStrut,
    flags: &Flags,
    fixed: &FixedMasses,
    n_blades: usize,
    ycmax: f64,
    rotor_radius: f64,
) -> MassBreakdown {
    let n = blade.num_elements();
    let b = n_blades as f64;

    // Combined chordwise CG of spar and chord mass, element by element
    let mut x_cg = vec![0.0; n];
    for s in 0..n {
        let m = blade.m_chord[s] + blade.m_spar[s];
        if m > 0.0 {
            x_cg[s] =
                (blade.x_cg_chord[s] * blade.m_chord[s] + blade.x_ea[s] * blade.m_spar[s]) / m;
        }
    }

    let cover = if flags.cover {
        (ycmax.powi(2) * 0.0528 + ycmax * 0.605 / 4.0) * 1.15
    } else {
        0.0
    };

    let rho_wire = flags.wire_type.properties().rho;
    let wire_mass: f64 = (0..wire.len())
        .map(|i| wire.cross_section() * rho_wire * wire.wire_length(i))
        .sum();

    let m_spar: f64 = blade.m_spar.iter().sum();
    let m_chord: f64 = blade.m_chord.iter().sum();

    let fixed_total =
        fixed.rotor_else + fixed.centre + fixed.per_radius * rotor_radius + fixed.pilot;

    let total = if flags.quad {
        (m_spar * b + m_chord * b + wire_mass * b + quad.mass + cover) * 4.0 + fixed_total
    } else {
        m_spar * b + m_chord * b + wire_mass * b + cover + fixed_total
    };

    MassBreakdown {
        total,
        x_cg,
        cover,
        wire: wire_mass,
    }
}
