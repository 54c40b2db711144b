//! Error types for the resampler core and the filter designer.

use thiserror::Error;

/// Errors surfaced by [`crate::resampler::Resampler`] construction and re-tapping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResamplerError {
    #[error("resampling ratio must be positive, got {0}")]
    InvalidRate(f32),

    #[error("filter count N must be at least 1, got {0}")]
    InvalidFilterCount(usize),

    #[error("prototype tap vector must not be empty")]
    EmptyTaps,
}

/// Errors surfaced by the optimal-FIR tap designer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignerError {
    #[error("band edges must be non-decreasing and lie within the sampling range, got {0:?}")]
    InvalidBandEdges(Vec<f64>),

    #[error("filter gain must be positive, got {0}")]
    InvalidGain(f64),

    #[error("Remez exchange failed: {0}")]
    Remez(#[from] RemezError),
}

/// Errors surfaced by a [`crate::designer::remez::RemezEngine`] implementation.
///
/// Treated as an opaque external collaborator: the designer forwards whatever
/// the engine reports without reinterpreting it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemezError {
    #[error("Remez exchange did not converge after {iterations} iterations")]
    DidNotConverge { iterations: u32 },

    #[error("degenerate band specification: {0}")]
    DegenerateBands(String),

    #[error("Remez engine error: {0}")]
    Other(String),
}
