//! Error types for grid construction.

use std::fmt;

/// Errors arising from grid construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceError {
    /// The dimension is not 1, 2, or 3.
    UnsupportedDimension {
        /// The rejected dimension.
        dimension: usize,
    },
    /// Attempted to construct a grid with zero cells.
    EmptySpace,
    /// `extent^dimension` does not fit in `usize`.
    GridTooLarge {
        /// Cells per axis.
        extent: usize,
        /// Number of axes.
        dimension: usize,
    },
    /// A flat buffer length is not `extent^dimension` for any extent.
    ShapeMismatch {
        /// Number of axes the buffer was expected to span.
        dimension: usize,
        /// The offending buffer length.
        len: usize,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedDimension { dimension } => {
                write!(f, "unsupported dimension {dimension}, expected 1, 2, or 3")
            }
            Self::EmptySpace => write!(f, "grid must have at least one cell"),
            Self::GridTooLarge { extent, dimension } => {
                write!(f, "grid {extent}^{dimension} overflows the cell index range")
            }
            Self::ShapeMismatch { dimension, len } => {
                write!(
                    f,
                    "buffer of {len} cells is not a {dimension}-dimensional hypercube"
                )
            }
        }
    }
}

impl std::error::Error for SpaceError {}
