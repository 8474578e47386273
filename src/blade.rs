//! Blade definition: per-element structural properties, lift wires and the
//! quad-rotor support strut
//!
//! Arrays are indexed by element (length N) or node (length N+1); element
//! `s` spans nodes `s` and `s + 1`, with node 0 at the root.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Section stiffness of one blade element
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SectionStiffness {
    /// Bending stiffness in the chordwise plane (N m^2)
    pub ei_x: f64,
    /// Bending stiffness in the flapwise plane (N m^2)
    pub ei_z: f64,
    /// Axial stiffness (N)
    pub ea: f64,
    /// Torsional stiffness (N m^2)
    pub gj: f64,
}

impl SectionStiffness {
    /// Create a section stiffness set
    pub fn new(ei_x: f64, ei_z: f64, ea: f64, gj: f64) -> Self {
        Self { ei_x, ei_z, ea, gj }
    }
}

/// Spar bending stiffness at the wire-joint station, used for the Euler
/// buckling check of the inboard spar
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct JointStiffness {
    /// Chordwise bending stiffness at the joint (N m^2)
    pub ei_x: f64,
    /// Flapwise bending stiffness at the joint (N m^2)
    pub ei_z: f64,
}

/// Flattened per-element description of a single rotor blade
///
/// Produced upstream by the property discretization (spar, chord and joint
/// property models); consumed read-only by the structural solver, strain
/// recovery and failure analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blade {
    /// Node stations along the span, root first (m); length N+1
    pub y_node: Vec<f64>,
    /// Section stiffness per element
    pub section: Vec<SectionStiffness>,
    /// Spar tube outer diameter per element (m)
    pub d: Vec<f64>,
    /// Composite wrap angle per element (rad)
    pub theta: Vec<f64>,
    /// Number of tube plies per element
    pub n_tube: Vec<f64>,
    /// Number of cap strips per element (0 disables cap failure)
    pub n_cap: Vec<f64>,
    /// Unsupported biscuit length per element (m)
    pub l_biscuit: Vec<f64>,
    /// Chord per element (m)
    pub chord: Vec<f64>,
    /// Elastic axis location per element (fraction of chord)
    pub x_ea: Vec<f64>,
    /// Spar mass per element (kg)
    pub m_spar: Vec<f64>,
    /// Chord (rib/skin) mass per element (kg)
    pub m_chord: Vec<f64>,
    /// Chordwise CG of the chord mass per element (fraction of chord)
    pub x_cg_chord: Vec<f64>,
}

impl Blade {
    /// Number of elements
    pub fn num_elements(&self) -> usize {
        self.y_node.len().saturating_sub(1)
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.y_node.len()
    }

    /// Length of each element (m)
    pub fn element_lengths(&self) -> Vec<f64> {
        self.y_node.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Mid-span station of each element (m)
    pub fn element_centres(&self) -> Vec<f64> {
        self.y_node.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }

    /// Blade span from root to tip (m)
    pub fn span(&self) -> f64 {
        self.y_node.last().copied().unwrap_or(0.0) - self.y_node.first().copied().unwrap_or(0.0)
    }

    /// Check that every array has a consistent element/node length
    pub fn validate(&self) -> Result<()> {
        if self.y_node.len() < 2 {
            return Err(Error::InvalidGeometry(
                "blade needs at least one element (two node stations)".to_string(),
            ));
        }
        for w in self.y_node.windows(2) {
            if w[1] <= w[0] {
                return Err(Error::InvalidGeometry(format!(
                    "node stations must be strictly increasing: {} then {}",
                    w[0], w[1]
                )));
            }
        }

        let n = self.num_elements();
        let lengths = [
            ("section", self.section.len()),
            ("d", self.d.len()),
            ("theta", self.theta.len()),
            ("n_tube", self.n_tube.len()),
            ("n_cap", self.n_cap.len()),
            ("l_biscuit", self.l_biscuit.len()),
            ("chord", self.chord.len()),
            ("x_ea", self.x_ea.len()),
            ("m_spar", self.m_spar.len()),
            ("m_chord", self.m_chord.len()),
            ("x_cg_chord", self.x_cg_chord.len()),
        ];
        for (name, len) in lengths {
            if len != n {
                return Err(Error::DimensionMismatch(format!(
                    "{name} has {len} entries, expected {n} (one per element)"
                )));
            }
        }
        Ok(())
    }
}

/// Lift-wire bracing attached to the blade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSet {
    /// Span station of each wire attachment (m)
    pub y_attach: Vec<f64>,
    /// Depth of the wire anchor below the rotor plane (m)
    pub z_attach: f64,
    /// Wire diameter (m)
    pub thickness: f64,
    /// Tension carried by each wire (N)
    pub tension: Vec<f64>,
    /// Trailing-edge tension reacted through the spar (N)
    pub te_tension: f64,
}

impl WireSet {
    /// A configuration with no wires
    pub fn none() -> Self {
        Self {
            y_attach: Vec::new(),
            z_attach: 0.0,
            thickness: 0.0,
            tension: Vec::new(),
            te_tension: 0.0,
        }
    }

    /// Number of wires
    pub fn len(&self) -> usize {
        self.y_attach.len()
    }

    /// True when no wires are fitted
    pub fn is_empty(&self) -> bool {
        self.y_attach.is_empty()
    }

    /// Straight-line length of wire `i` from anchor to attachment (m)
    pub fn wire_length(&self, i: usize) -> f64 {
        (self.z_attach.powi(2) + self.y_attach[i].powi(2)).sqrt()
    }

    /// Wire cross-sectional area (m^2)
    pub fn cross_section(&self) -> f64 {
        std::f64::consts::PI * (self.thickness / 2.0).powi(2)
    }
}

/// Quad-rotor support strut description
///
/// A zero bending stiffness marks the strut as absent; every quad failure
/// mode is then defined to be zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuadStrut {
    /// Strut tube diameter (m)
    pub d: f64,
    /// Composite wrap angle of the strut tube (rad)
    pub theta: f64,
    /// Number of tube plies
    pub n_tube: f64,
    /// Unsupported biscuit length (m)
    pub l_biscuit: f64,
    /// Horizontal distance from craft centre to rotor centre (m)
    pub radius: f64,
    /// Height of the truss (m)
    pub height: f64,
    /// Strut bending stiffness (N m^2); zero when the quad is absent
    pub ei: f64,
    /// Strut torsional stiffness (N m^2)
    pub gj: f64,
    /// Mass of the strut (kg)
    pub mass: f64,
}

impl QuadStrut {
    /// A configuration without a support truss
    pub fn absent() -> Self {
        Self {
            d: 0.0,
            theta: 0.0,
            n_tube: 0.0,
            l_biscuit: 0.0,
            radius: 0.0,
            height: 0.0,
            ei: 0.0,
            gj: 0.0,
            mass: 0.0,
        }
    }

    /// True when the truss is present (nonzero bending stiffness)
    pub fn is_present(&self) -> bool {
        self.ei != 0.0
    }
}
