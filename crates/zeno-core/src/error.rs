//! Error types for field buffers.

use std::error::Error;
use std::fmt;

use crate::values::Dtype;

/// Errors from combining two field buffers.
///
/// Both variants are fatal to a run: a delta that does not match the
/// field it is applied to is never truncated, broadcast, or cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// The buffers have different cell counts.
    ShapeMismatch {
        /// Cell count of the receiving buffer.
        expected: usize,
        /// Cell count of the incoming buffer.
        actual: usize,
    },
    /// The buffers have different element types.
    DtypeMismatch {
        /// Element type of the receiving buffer.
        expected: Dtype,
        /// Element type of the incoming buffer.
        actual: Dtype,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected} cells, got {actual}")
            }
            Self::DtypeMismatch { expected, actual } => {
                write!(f, "dtype mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl Error for FieldError {}
