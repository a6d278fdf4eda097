use thiserror::Error;

use crate::Crs;

/// Errors raised when an operation receives arguments it cannot work
/// with.
///
/// Geometric degeneracies (collinear points, shared vertices, rings
/// around a pole) are not errors; the algorithms handle those inputs
/// directly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("cannot combine points of different dimensions: {expected} != {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("a point needs at least 2 coordinates, got {0}")]
    TooFewCoordinates(usize),

    #[error("coordinates must be finite")]
    NonFiniteCoordinate,

    #[error("a {kind} needs at least {min} distinct points, got {found}")]
    TooFewPoints {
        kind: &'static str,
        min: usize,
        found: usize,
    },

    #[error("mismatched coordinate reference systems: {left} != {right}")]
    CrsMismatch { left: Crs, right: Crs },

    #[error("only 2-dimensional points are supported here, got {0} dimensions")]
    UnsupportedDimension(usize),

    #[error("{operation} is not supported for {shape}")]
    Unsupported {
        operation: &'static str,
        shape: &'static str,
    },

    #[error("invalid linear reference: {0}")]
    InvalidReference(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
