//! Mapping continuous amplitudes onto partition-table indices.
//!
//! `index(v) = clamp(floor(|v| · SCALE), 0, MAX_N − 1)`

use rayon::prelude::*;
use zeno_core::Amplitude;

use crate::error::OperatorError;
use crate::kernel::PARALLEL_THRESHOLD;
use crate::partition::PartitionTable;

/// Amplitude-to-index scale factor.
pub const SCALE: f64 = 50.0;

/// Reference partition-table bound. Quantized indices lie in `[0, MAX_N)`.
pub const MAX_N: usize = 500;

/// Quantize a magnitude to a table index.
///
/// Non-finite input saturates: NaN maps to 0 and +∞ to `MAX_N − 1`.
#[inline]
pub fn quantize(magnitude: f64) -> usize {
    // Float-to-int `as` saturates and maps NaN to 0.
    let scaled = (magnitude.abs() * SCALE).floor() as usize;
    scaled.min(MAX_N - 1)
}

/// `p[quantize(|v|)]` for every cell.
///
/// Curvature and torsion only ever look at the table through this
/// mapping, so computing it once per cell keeps each table lookup out of
/// the neighbour loops.
///
/// # Errors
///
/// [`OperatorError::InvalidTableIndex`] if `table` is smaller than the
/// quantizer's range.
pub fn partition_weights<T: Amplitude>(
    values: &[T],
    table: &PartitionTable,
) -> Result<Vec<f64>, OperatorError> {
    if values.len() >= PARALLEL_THRESHOLD {
        values
            .par_iter()
            .map(|v| table.weight(quantize(v.magnitude())))
            .collect()
    } else {
        values
            .iter()
            .map(|v| table.weight(quantize(v.magnitude())))
            .collect()
    }
}
