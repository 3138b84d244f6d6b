//! Standard periodic second-difference Laplacian.
//!
//! ```text
//! L[cell] = Σ_axes ( v[backward] + v[forward] ) − 2·dim·v[cell]
//! ```
//!
//! Drives the classical diffusion baseline.

use zeno_core::Amplitude;
use zeno_space::PeriodicGrid;

use crate::error::OperatorError;
use crate::kernel::{check_len, map_cells};

/// Laplacian of `values`, a flat `dimension`-D hypercube.
///
/// # Errors
///
/// [`OperatorError::UnsupportedDimension`], [`OperatorError::ShapeMismatch`] when
/// the length is not a hypercube, or [`OperatorError::Grid`] when it is zero.
///
/// # Examples
///
/// ```
/// use zeno_operators::laplacian;
///
/// let l = laplacian(&[0.0f64, 1.0, 0.0, 0.0], 1).unwrap();
/// assert_eq!(l, vec![1.0, -2.0, 1.0, 0.0]);
/// ```
pub fn laplacian<T: Amplitude>(values: &[T], dimension: usize) -> Result<Vec<T>, OperatorError> {
    let grid = PeriodicGrid::for_len(dimension, values.len())?;
    laplacian_on(&grid, values)
}

/// Laplacian of `values` on a prebuilt grid.
///
/// # Errors
///
/// [`OperatorError::ShapeMismatch`] if `values` does not match `grid`.
pub fn laplacian_on<T: Amplitude>(
    grid: &PeriodicGrid,
    values: &[T],
) -> Result<Vec<T>, OperatorError> {
    check_len(grid, values.len())?;
    let centre_weight = -2.0 * grid.dimension() as f64;
    Ok(map_cells(grid, |i| {
        let mut acc = values[i].scale(centre_weight);
        for axis in 0..grid.dimension() {
            let (back, fwd) = grid.axis_neighbours(i, axis);
            acc += values[back];
            acc += values[fwd];
        }
        acc
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeno_core::Complex64;

    #[test]
    fn constant_field_has_zero_laplacian() {
        for (dimension, len) in [(1, 8), (2, 16), (3, 27)] {
            let l = laplacian(&vec![3.0f64; len], dimension).unwrap();
            assert!(l.iter().all(|&v| v == 0.0), "dim {dimension}");
        }
    }

    #[test]
    fn point_source_in_two_dimensions() {
        let mut values = vec![0.0f64; 16];
        values[5] = 1.0; // (1, 1) on a 4x4 grid
        let l = laplacian(&values, 2).unwrap();
        assert_eq!(l[5], -4.0);
        for n in [1, 4, 6, 9] {
            assert_eq!(l[n], 1.0);
        }
        assert_eq!(l.iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn point_source_in_three_dimensions() {
        let mut values = vec![0.0f64; 27];
        values[13] = 1.0; // centre of 3x3x3
        let l = laplacian(&values, 3).unwrap();
        assert_eq!(l[13], -6.0);
        assert_eq!(l.iter().filter(|&&v| v == 1.0).count(), 6);
    }

    #[test]
    fn wraps_at_the_boundary() {
        let l = laplacian(&[1.0f64, 0.0, 0.0, 0.0, 0.0], 1).unwrap();
        assert_eq!(l, vec![-2.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn complex_is_componentwise() {
        let values = vec![
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, -1.0),
            Complex64::new(0.0, 0.0),
        ];
        let l = laplacian(&values, 1).unwrap();
        assert_eq!(l[1], Complex64::new(-2.0, 2.0));
        assert_eq!(l[0], Complex64::new(1.0, -1.0));
    }
}
