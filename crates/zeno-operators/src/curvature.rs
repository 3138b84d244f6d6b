//! Symbolic curvature `R`: a discrete Laplacian over partition counts.
//!
//! For each cell with quantized index `c` and each of its `2·dim`
//! periodic neighbours `n`:
//!
//! ```text
//! R[cell] = Σ_n ( p[q(c)] − p[q(n)] )
//! ```
//!
//! The result carries the input's element type; for complex input the
//! imaginary part is zero.

use zeno_core::Amplitude;
use zeno_space::PeriodicGrid;

use crate::error::OperatorError;
use crate::kernel::{check_len, map_cells};
use crate::partition::PartitionTable;
use crate::quantize::partition_weights;

/// Curvature of `values`, a flat `dimension`-D hypercube.
///
/// # Errors
///
/// - [`OperatorError::UnsupportedDimension`] if `dimension` is not 1, 2, or 3.
/// - [`OperatorError::ShapeMismatch`] if `values.len()` is not `n^dimension`.
/// - [`OperatorError::Grid`] if `values` is empty.
/// - [`OperatorError::InvalidTableIndex`] if `table` is too small.
///
/// # Examples
///
/// ```
/// use zeno_operators::{curvature, PartitionTable};
///
/// let table = PartitionTable::reference();
/// // Uniform field: every neighbour difference cancels.
/// let r = curvature(&[0.5f64; 16], 2, table).unwrap();
/// assert!(r.iter().all(|&v| v == 0.0));
/// ```
pub fn curvature<T: Amplitude>(
    values: &[T],
    dimension: usize,
    table: &PartitionTable,
) -> Result<Vec<T>, OperatorError> {
    let grid = PeriodicGrid::for_len(dimension, values.len())?;
    curvature_on(&grid, values, table)
}

/// Curvature of `values` on a prebuilt grid.
///
/// # Errors
///
/// [`OperatorError::ShapeMismatch`] if `values` does not match `grid`,
/// or [`OperatorError::InvalidTableIndex`] if `table` is too small.
pub fn curvature_on<T: Amplitude>(
    grid: &PeriodicGrid,
    values: &[T],
    table: &PartitionTable,
) -> Result<Vec<T>, OperatorError> {
    check_len(grid, values.len())?;
    let weights = partition_weights(values, table)?;
    Ok(map_cells(grid, |i| {
        let centre = weights[i];
        let r: f64 = grid
            .neighbours(i)
            .iter()
            .map(|&n| centre - weights[n])
            .sum();
        T::from_real(r)
    }))
}
