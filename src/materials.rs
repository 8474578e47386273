//! Material property tables for composite prepregs and lift wires
//!
//! Ultimate strengths are stored as positive magnitudes; tension and
//! compression limits are distinct and selected by the sign of the applied
//! stress during failure analysis.

use serde::{Deserialize, Serialize};

/// Orthotropic lamina properties of a carbon fibre prepreg
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Composite {
    /// Density (kg/m^3)
    pub rho: f64,
    /// Cured thickness of a single ply (m)
    pub t_ply: f64,
    /// Modulus in the fibre direction (Pa)
    pub e_11: f64,
    /// Modulus transverse to the fibre (Pa)
    pub e_22: f64,
    /// In-plane shear modulus (Pa)
    pub g_12: f64,
    /// Major Poisson ratio
    pub v_12: f64,
    /// Ultimate tensile stress, fibre direction (Pa)
    pub ultimate_11_tens: f64,
    /// Ultimate compressive stress, fibre direction (Pa)
    pub ultimate_11_comp: f64,
    /// Ultimate tensile stress, matrix direction (Pa)
    pub ultimate_22_tens: f64,
    /// Ultimate compressive stress, matrix direction (Pa)
    pub ultimate_22_comp: f64,
    /// Ultimate in-plane shear stress (Pa)
    pub ultimate_12: f64,
}

impl Composite {
    /// Minor Poisson ratio v21 = v12 * E22 / E11
    pub fn v_21(&self) -> f64 {
        self.v_12 * (self.e_22 / self.e_11)
    }
}

/// Available carbon fibre prepregs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CfrpType {
    /// NCT301-1X HS40 G150 33 +/-2%RW
    Nct301Hs40,
    /// MTM28-1B/M46J-140-37%RW
    Mtm28M46J,
}

impl CfrpType {
    /// Lamina properties for this prepreg
    pub fn properties(self) -> Composite {
        match self {
            CfrpType::Nct301Hs40 => Composite {
                rho: 1.5806e3,
                t_ply: 1.4173e-4,
                e_11: 2.1066e11,
                e_22: 6.8067e9,
                g_12: 4.4211e9,
                v_12: 0.27,
                ultimate_11_tens: 2.0469e9,
                ultimate_11_comp: 8.4593e8,
                ultimate_22_tens: 3.4903e7,
                ultimate_22_comp: 2.0806e8,
                ultimate_12: 1.1974e8,
            },
            CfrpType::Mtm28M46J => Composite {
                rho: 1.5879e3,
                t_ply: 1.5276e-4,
                e_11: 2.2493e11,
                e_22: 6.4839e9,
                g_12: 4.2258e9,
                v_12: 0.28,
                ultimate_11_tens: 1.9536e9,
                ultimate_11_comp: 7.8384e8,
                ultimate_22_tens: 3.2370e7,
                ultimate_22_comp: 1.9446e8,
                ultimate_12: 1.1073e8,
            },
        }
    }
}

/// Isotropic properties of a lift-wire material
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wire {
    /// Density (kg/m^3)
    pub rho: f64,
    /// Young's modulus (Pa)
    pub e: f64,
    /// Ultimate tensile stress (Pa)
    pub ultimate: f64,
}

/// Available lift-wire materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireType {
    Pianowire,
    Vectran,
}

impl WireType {
    /// Material properties for this wire
    pub fn properties(self) -> Wire {
        match self {
            WireType::Pianowire => Wire {
                rho: 7.85e3,
                e: 2.10e11,
                ultimate: 2.62e9,
            },
            WireType::Vectran => Wire {
                rho: 1.1065e3,
                e: 3.921e10,
                ultimate: 9.828e8,
            },
        }
    }
}
