//! Dense per-cell buffers and their element type tag.

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::amplitude::Amplitude;
use crate::error::FieldError;

/// Element type of a field buffer.
///
/// Fixed when a field is allocated. The symbolic variants need
/// [`Dtype::Complex`] because their delta is scaled by `-i`; the
/// classical baseline runs on [`Dtype::Real`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    /// `f64` per cell.
    Real,
    /// [`Complex64`] per cell.
    Complex,
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real => write!(f, "real"),
            Self::Complex => write!(f, "complex"),
        }
    }
}

/// A dense, flat (row-major) buffer of per-cell values.
///
/// The same type carries field state, operator terms, and deltas, so
/// shape and dtype checks are uniform across the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dtype", content = "values", rename_all = "lowercase")]
pub enum FieldValues {
    /// Real-valued cells.
    Real(Vec<f64>),
    /// Complex-valued cells.
    Complex(Vec<Complex64>),
}

impl FieldValues {
    /// A zero-filled buffer of `len` cells.
    pub fn zeros(dtype: Dtype, len: usize) -> Self {
        match dtype {
            Dtype::Real => Self::Real(vec![0.0; len]),
            Dtype::Complex => Self::Complex(vec![Complex64::default(); len]),
        }
    }

    /// Element type of this buffer.
    pub fn dtype(&self) -> Dtype {
        match self {
            Self::Real(_) => Dtype::Real,
            Self::Complex(_) => Dtype::Complex,
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            Self::Real(v) => v.len(),
            Self::Complex(v) => v.len(),
        }
    }

    /// `true` if the buffer has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow as a real slice, if this is a real buffer.
    pub fn as_real(&self) -> Option<&[f64]> {
        match self {
            Self::Real(v) => Some(v),
            Self::Complex(_) => None,
        }
    }

    /// Borrow as a complex slice, if this is a complex buffer.
    pub fn as_complex(&self) -> Option<&[Complex64]> {
        match self {
            Self::Complex(v) => Some(v),
            Self::Real(_) => None,
        }
    }

    /// Value at `index`, widened to complex. `None` if out of range.
    pub fn get(&self, index: usize) -> Option<Complex64> {
        match self {
            Self::Real(v) => v.get(index).map(|&x| Complex64::from_real(x)),
            Self::Complex(v) => v.get(index).copied(),
        }
    }

    /// `Σ |v|` over all cells.
    pub fn abs_sum(&self) -> f64 {
        match self {
            Self::Real(v) => abs_sum(v),
            Self::Complex(v) => abs_sum(v),
        }
    }

    /// `true` if every cell is finite.
    pub fn all_finite(&self) -> bool {
        match self {
            Self::Real(v) => all_finite(v),
            Self::Complex(v) => all_finite(v),
        }
    }

    /// In-place `self += delta * dt`.
    ///
    /// # Errors
    ///
    /// [`FieldError::DtypeMismatch`] if the element types differ and
    /// [`FieldError::ShapeMismatch`] if the lengths differ. Nothing is
    /// written on error.
    pub fn add_scaled(&mut self, delta: &FieldValues, dt: f64) -> Result<(), FieldError> {
        if self.len() != delta.len() {
            return Err(FieldError::ShapeMismatch {
                expected: self.len(),
                actual: delta.len(),
            });
        }
        match (self, delta) {
            (Self::Real(v), Self::Real(d)) => add_scaled(v, d, dt),
            (Self::Complex(v), Self::Complex(d)) => add_scaled(v, d, dt),
            (this, delta) => {
                return Err(FieldError::DtypeMismatch {
                    expected: this.dtype(),
                    actual: delta.dtype(),
                })
            }
        }
        Ok(())
    }
}

impl From<Vec<f64>> for FieldValues {
    fn from(v: Vec<f64>) -> Self {
        Self::Real(v)
    }
}

impl From<Vec<Complex64>> for FieldValues {
    fn from(v: Vec<Complex64>) -> Self {
        Self::Complex(v)
    }
}

fn abs_sum<T: Amplitude>(values: &[T]) -> f64 {
    values.iter().map(|v| v.magnitude()).sum()
}

fn all_finite<T: Amplitude>(values: &[T]) -> bool {
    values.iter().all(|&v| v.is_finite())
}

fn add_scaled<T: Amplitude>(values: &mut [T], delta: &[T], dt: f64) {
    for (v, &d) in values.iter_mut().zip(delta) {
        *v += d.scale(dt);
    }
}
