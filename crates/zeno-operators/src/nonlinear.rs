//! Cubic self-interaction `N = |v|² · v`.
//!
//! Purely local: no neighbour access and no partition table.

use zeno_core::Amplitude;
use zeno_space::PeriodicGrid;

use crate::error::OperatorError;
use crate::kernel::{check_len, map_cells};

/// Nonlinear term of `values`.
///
/// `dimension` is validated like every other operator's even though
/// the computation never looks at neighbours.
///
/// # Errors
///
/// [`OperatorError::UnsupportedDimension`], [`OperatorError::ShapeMismatch`] when
/// the length is not a hypercube, or [`OperatorError::Grid`] when it is zero.
///
/// # Examples
///
/// ```
/// use zeno_operators::nonlinear;
///
/// let n = nonlinear(&[1.0f64, 2.0, -3.0], 1).unwrap();
/// assert_eq!(n, vec![1.0, 8.0, -27.0]);
/// ```
pub fn nonlinear<T: Amplitude>(values: &[T], dimension: usize) -> Result<Vec<T>, OperatorError> {
    let grid = PeriodicGrid::for_len(dimension, values.len())?;
    nonlinear_on(&grid, values)
}

/// Nonlinear term of `values` on a prebuilt grid.
///
/// # Errors
///
/// [`OperatorError::ShapeMismatch`] if `values` does not match `grid`.
pub fn nonlinear_on<T: Amplitude>(
    grid: &PeriodicGrid,
    values: &[T],
) -> Result<Vec<T>, OperatorError> {
    check_len(grid, values.len())?;
    Ok(map_cells(grid, |i| {
        let v = values[i];
        v.scale(v.norm_sqr())
    }))
}
