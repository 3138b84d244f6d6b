//! Symbolic torsion `T`: directional partition-weighted differences.
//!
//! ```text
//! T[cell] = Σ_axes ( p[q(forward)] − p[q(backward)] )
//! ```
//!
//! Unlike curvature the cell's own amplitude never enters; only the
//! signed forward-minus-backward difference along each axis does.

use zeno_core::Amplitude;
use zeno_space::PeriodicGrid;

use crate::error::OperatorError;
use crate::kernel::{check_len, map_cells};
use crate::partition::PartitionTable;
use crate::quantize::partition_weights;

/// Torsion of `values`, a flat `dimension`-D hypercube.
///
/// # Errors
///
/// Same as [`curvature`](fn@crate::curvature).
pub fn torsion<T: Amplitude>(
    values: &[T],
    dimension: usize,
    table: &PartitionTable,
) -> Result<Vec<T>, OperatorError> {
    let grid = PeriodicGrid::for_len(dimension, values.len())?;
    torsion_on(&grid, values, table)
}

/// Torsion of `values` on a prebuilt grid.
///
/// # Errors
///
/// Same as [`curvature_on`](crate::curvature_on).
pub fn torsion_on<T: Amplitude>(
    grid: &PeriodicGrid,
    values: &[T],
    table: &PartitionTable,
) -> Result<Vec<T>, OperatorError> {
    check_len(grid, values.len())?;
    let weights = partition_weights(values, table)?;
    Ok(map_cells(grid, |i| {
        let t: f64 = (0..grid.dimension())
            .map(|axis| {
                let (back, fwd) = grid.axis_neighbours(i, axis);
                weights[fwd] - weights[back]
            })
            .sum();
        T::from_real(t)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeno_core::Complex64;

    fn table() -> &'static PartitionTable {
        PartitionTable::reference()
    }

    #[test]
    fn uniform_field_is_zero_in_every_dimension() {
        for (dimension, len) in [(1, 7), (2, 16), (3, 8)] {
            let t = torsion(&vec![0.5f64; len], dimension, table()).unwrap();
            assert!(t.iter().all(|&v| v == 0.0), "dim {dimension}");
        }
        let c = torsion(&vec![Complex64::new(0.3, 0.4); 16], 2, table()).unwrap();
        assert!(c.iter().all(|&z| z == Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn ramp_is_antisymmetric_around_step() {
        let t = table();
        let values = [0.0f64, 0.0, 0.2, 0.2];
        let out = torsion(&values, 1, t).unwrap();
        let lo = t.weight(0).unwrap();
        let hi = t.weight(10).unwrap();
        // Cell 1: forward = cell 2 (hi), backward = cell 0 (lo).
        assert_eq!(out[1], hi - lo);
        // Cell 3: forward wraps to cell 0 (lo), backward = cell 2 (hi).
        assert_eq!(out[3], lo - hi);
        // Torsion sums to zero over a periodic ring.
        assert_eq!(out.iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn ignores_centre_amplitude() {
        let a = torsion(&[0.0f64, 5.0, 0.0], 1, table()).unwrap();
        let b = torsion(&[0.0f64, 0.0, 0.0], 1, table()).unwrap();
        assert_eq!(a[1], b[1]);
    }

    #[test]
    fn sums_across_axes_in_two_dimensions() {
        let t = table();
        let mut values = vec![0.0f64; 9];
        values[5] = 0.2; // (1, 2): forward along axis 1 from the centre
        values[7] = 0.2; // (2, 1): forward along axis 0 from the centre
        let out = torsion(&values, 2, t).unwrap();
        let d = t.weight(10).unwrap() - t.weight(0).unwrap();
        assert_eq!(out[4], 2.0 * d);
    }

    #[test]
    fn unsupported_dimension() {
        assert_eq!(
            torsion(&[0.0f64; 8], 5, table()),
            Err(OperatorError::UnsupportedDimension { dimension: 5 })
        );
    }
}
