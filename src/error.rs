//! Error types for aerostructural analysis

use thiserror::Error;

/// Main error type for analysis operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("wing-warp constraint index {0} is not supported (only 0 is valid)")]
    UnsupportedWingWarp(usize),

    #[error("aerostructural coupling failed to converge after {iterations} iterations (residual {residual:.3e})")]
    NotConverged { iterations: usize, residual: f64 },

    #[error("constrained stiffness system could not be solved: {0}")]
    SingularSystem(String),

    #[error("invalid blade geometry: {0}")]
    InvalidGeometry(String),

    #[error("array length mismatch: {0}")]
    DimensionMismatch(String),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, Error>;
