//! Entropy-gradient feedback `S = −‖∇v‖ · v`.
//!
//! Uses raw (not quantized) periodic central differences:
//!
//! ```text
//! g_axis = 0.5 · (forward − backward)
//! S      = −sqrt(Σ_axes g_axis²) · v
//! ```
//!
//! Squares and the square root are the element type's own operations,
//! so for complex fields they are the complex square and the principal
//! complex root.

use zeno_core::Amplitude;
use zeno_space::PeriodicGrid;

use crate::error::OperatorError;
use crate::kernel::{check_len, map_cells};

/// Entropy term of `values`, a flat `dimension`-D hypercube.
///
/// # Errors
///
/// [`OperatorError::UnsupportedDimension`], [`OperatorError::ShapeMismatch`] when
/// the length is not a hypercube, or [`OperatorError::Grid`] when it is zero.
pub fn entropy<T: Amplitude>(values: &[T], dimension: usize) -> Result<Vec<T>, OperatorError> {
    let grid = PeriodicGrid::for_len(dimension, values.len())?;
    entropy_on(&grid, values)
}

/// Entropy term of `values` on a prebuilt grid.
///
/// # Errors
///
/// [`OperatorError::ShapeMismatch`] if `values` does not match `grid`.
pub fn entropy_on<T: Amplitude>(grid: &PeriodicGrid, values: &[T]) -> Result<Vec<T>, OperatorError> {
    check_len(grid, values.len())?;
    Ok(map_cells(grid, |i| {
        let mut grad_sq = T::default();
        for axis in 0..grid.dimension() {
            let (back, fwd) = grid.axis_neighbours(i, axis);
            let g = (values[fwd] - values[back]).scale(0.5);
            grad_sq += g * g;
        }
        -(grad_sq.sqrt() * values[i])
    }))
}
