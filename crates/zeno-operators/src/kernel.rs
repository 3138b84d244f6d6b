//! Per-cell kernel driver shared by every grid operator.
//!
//! Each output cell depends only on the frozen input buffer, never on
//! another freshly written output cell, so cells are independent and
//! can be computed on any worker in any order.

use rayon::prelude::*;
use zeno_space::PeriodicGrid;

use crate::error::OperatorError;

/// Grids with at least this many cells are evaluated on the rayon pool.
///
/// Below it the scheduling overhead outweighs the work per cell.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Evaluate `kernel` once per cell, in flat index order.
pub(crate) fn map_cells<T, F>(grid: &PeriodicGrid, kernel: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    let n = grid.cell_count();
    if n >= PARALLEL_THRESHOLD {
        (0..n).into_par_iter().map(kernel).collect()
    } else {
        (0..n).map(kernel).collect()
    }
}

/// Fail with [`OperatorError::ShapeMismatch`] unless `len` matches the grid.
pub(crate) fn check_len(grid: &PeriodicGrid, len: usize) -> Result<(), OperatorError> {
    if grid.cell_count() != len {
        return Err(OperatorError::ShapeMismatch {
            expected: grid.cell_count(),
            actual: len,
        });
    }
    Ok(())
}
