//! Error types for operator evaluation.

use std::error::Error;
use std::fmt;

use zeno_space::SpaceError;

/// Errors from evaluating an operator against a field buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorError {
    /// The requested dimension is not 1, 2, or 3.
    UnsupportedDimension {
        /// The rejected dimension.
        dimension: usize,
    },
    /// The buffer length does not match the grid's cell count.
    ShapeMismatch {
        /// Cell count of the grid. When the grid is inferred from the
        /// buffer, the nearest `extent^dimension`.
        expected: usize,
        /// Length of the buffer.
        actual: usize,
    },
    /// A quantized amplitude indexed past the end of the partition table.
    ///
    /// Quantization clamps to `MAX_N - 1`, so this only fires for tables
    /// built with a smaller bound than the quantizer assumes.
    InvalidTableIndex {
        /// The offending index.
        index: usize,
        /// Number of entries in the table.
        len: usize,
    },
    /// A partition count does not fit in 128 bits.
    TableOverflow {
        /// The requested `n`.
        n: usize,
    },
    /// The buffer does not describe a valid grid.
    Grid(SpaceError),
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedDimension { dimension } => {
                write!(f, "unsupported dimension {dimension}, expected 1, 2, or 3")
            }
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: grid has {expected} cells, buffer has {actual}")
            }
            Self::InvalidTableIndex { index, len } => {
                write!(f, "partition table index {index} out of range for {len} entries")
            }
            Self::TableOverflow { n } => {
                write!(f, "p({n}) exceeds the exact 128-bit range")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for OperatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for OperatorError {
    fn from(e: SpaceError) -> Self {
        match e {
            SpaceError::UnsupportedDimension { dimension } => {
                Self::UnsupportedDimension { dimension }
            }
            SpaceError::ShapeMismatch { dimension, len } => Self::ShapeMismatch {
                expected: nearest_hypercube(len, dimension),
                actual: len,
            },
            other => Self::Grid(other),
        }
    }
}

fn nearest_hypercube(len: usize, dimension: usize) -> usize {
    let extent = (len as f64).powf(1.0 / dimension as f64).round().max(1.0) as usize;
    extent.saturating_pow(dimension as u32)
}
