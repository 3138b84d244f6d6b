//! The [`PeriodicGrid`] lattice.

use std::ops::RangeInclusive;

use smallvec::SmallVec;
use zeno_core::Coord;

use crate::error::SpaceError;

/// Highest supported number of axes.
pub const MAX_DIMENSION: usize = 3;

/// Dimensions accepted by [`PeriodicGrid::new`].
pub const SUPPORTED_DIMENSIONS: RangeInclusive<usize> = 1..=MAX_DIMENSION;

/// A hypercubic lattice with periodic (torus) boundaries.
///
/// Every cell has exactly `2 * dimension` axis-aligned neighbours; an
/// out-of-range step along an axis wraps to the opposite side.
///
/// # Examples
///
/// ```
/// use zeno_space::PeriodicGrid;
///
/// let grid = PeriodicGrid::new(2, 4).unwrap();
/// assert_eq!(grid.cell_count(), 16);
///
/// // Cell (0, 0) wraps to (3, 0) going backward along axis 0.
/// let (back, fwd) = grid.axis_neighbours(0, 0);
/// assert_eq!(back, 12);
/// assert_eq!(fwd, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PeriodicGrid {
    dimension: usize,
    extent: usize,
    cell_count: usize,
    strides: [usize; MAX_DIMENSION],
}

impl PeriodicGrid {
    /// Create a grid with `extent` cells along each of `dimension` axes.
    ///
    /// # Errors
    ///
    /// - [`SpaceError::UnsupportedDimension`] if `dimension` is not 1, 2, or 3.
    /// - [`SpaceError::EmptySpace`] if `extent == 0`.
    /// - [`SpaceError::GridTooLarge`] if `extent^dimension` overflows.
    pub fn new(dimension: usize, extent: usize) -> Result<Self, SpaceError> {
        if !SUPPORTED_DIMENSIONS.contains(&dimension) {
            return Err(SpaceError::UnsupportedDimension { dimension });
        }
        if extent == 0 {
            return Err(SpaceError::EmptySpace);
        }
        let cell_count = u32::try_from(dimension)
            .ok()
            .and_then(|d| extent.checked_pow(d))
            .ok_or(SpaceError::GridTooLarge { extent, dimension })?;

        let mut strides = [0usize; MAX_DIMENSION];
        let mut stride = 1usize;
        for axis in (0..dimension).rev() {
            strides[axis] = stride;
            stride *= extent;
        }

        Ok(Self {
            dimension,
            extent,
            cell_count,
            strides,
        })
    }

    /// Recover the grid that a flat buffer of `len` cells spans.
    ///
    /// The dimension is checked first, so an unsupported dimension is
    /// reported as such even when `len` is also malformed.
    ///
    /// # Errors
    ///
    /// [`SpaceError::UnsupportedDimension`], [`SpaceError::EmptySpace`],
    /// or [`SpaceError::ShapeMismatch`] if `len` is not a perfect
    /// `dimension`-th power.
    pub fn for_len(dimension: usize, len: usize) -> Result<Self, SpaceError> {
        if !SUPPORTED_DIMENSIONS.contains(&dimension) {
            return Err(SpaceError::UnsupportedDimension { dimension });
        }
        if len == 0 {
            return Err(SpaceError::EmptySpace);
        }
        let extent = integer_root(len, dimension)
            .ok_or(SpaceError::ShapeMismatch { dimension, len })?;
        Self::new(dimension, extent)
    }

    /// Number of axes.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Cells per axis.
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Shape as one extent per axis.
    pub fn shape(&self) -> SmallVec<[usize; MAX_DIMENSION]> {
        (0..self.dimension).map(|_| self.extent).collect()
    }

    /// Coordinate of the cell at flat `index`.
    ///
    /// `index` must be below [`cell_count`](Self::cell_count).
    pub fn coord(&self, index: usize) -> Coord {
        (0..self.dimension)
            .map(|axis| self.axis_position(index, axis))
            .collect()
    }

    /// Flat index of `coord`, or `None` if it has the wrong rank or any
    /// component is out of range.
    pub fn index(&self, coord: &[usize]) -> Option<usize> {
        if coord.len() != self.dimension {
            return None;
        }
        coord.iter().enumerate().try_fold(0usize, |acc, (axis, &c)| {
            (c < self.extent).then(|| acc + c * self.strides[axis])
        })
    }

    /// Flat index of the cell `offset` steps from `index` along `axis`,
    /// wrapping periodically.
    pub fn neighbour(&self, index: usize, axis: usize, offset: isize) -> usize {
        let pos = self.axis_position(index, axis);
        let wrapped = wrap_axis(pos as isize + offset, self.extent);
        index - pos * self.strides[axis] + wrapped * self.strides[axis]
    }

    /// `(backward, forward)` neighbours of `index` along `axis`.
    #[inline]
    pub fn axis_neighbours(&self, index: usize, axis: usize) -> (usize, usize) {
        (self.neighbour(index, axis, -1), self.neighbour(index, axis, 1))
    }

    /// All `2 * dimension` neighbours of `index`, ordered
    /// `[axis0 backward, axis0 forward, axis1 backward, ...]`.
    pub fn neighbours(&self, index: usize) -> SmallVec<[usize; 2 * MAX_DIMENSION]> {
        let mut result = SmallVec::new();
        for axis in 0..self.dimension {
            let (back, fwd) = self.axis_neighbours(index, axis);
            result.push(back);
            result.push(fwd);
        }
        result
    }

    /// Iterate over every coordinate in flat (row-major) order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.cell_count).map(move |i| self.coord(i))
    }

    #[inline]
    fn axis_position(&self, index: usize, axis: usize) -> usize {
        (index / self.strides[axis]) % self.extent
    }
}

/// Wrap an axis position into `[0, len)`.
#[inline]
pub(crate) fn wrap_axis(val: isize, len: usize) -> usize {
    let len = len as isize;
    (((val % len) + len) % len) as usize
}

/// Exact integer `dimension`-th root of `len`, if one exists.
fn integer_root(len: usize, dimension: usize) -> Option<usize> {
    if dimension == 1 {
        return Some(len);
    }
    let guess = (len as f64).powf(1.0 / dimension as f64).round() as usize;
    let exp = u32::try_from(dimension).ok()?;
    [guess.saturating_sub(1), guess, guess + 1]
        .into_iter()
        .find(|&r| r > 0 && r.checked_pow(exp) == Some(len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use smallvec::smallvec;

    #[test]
    fn rejects_unsupported_dimensions() {
        for dimension in [0, 4, 7] {
            assert_eq!(
                PeriodicGrid::new(dimension, 4),
                Err(SpaceError::UnsupportedDimension { dimension })
            );
            assert_eq!(
                PeriodicGrid::for_len(dimension, 16),
                Err(SpaceError::UnsupportedDimension { dimension })
            );
        }
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(PeriodicGrid::new(2, 0), Err(SpaceError::EmptySpace));
        assert_eq!(PeriodicGrid::for_len(1, 0), Err(SpaceError::EmptySpace));
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(
            PeriodicGrid::new(3, usize::MAX / 2),
            Err(SpaceError::GridTooLarge {
                extent: usize::MAX / 2,
                dimension: 3
            })
        );
    }

    #[test]
    fn for_len_infers_extent() {
        assert_eq!(PeriodicGrid::for_len(1, 10).unwrap().extent(), 10);
        assert_eq!(PeriodicGrid::for_len(2, 16).unwrap().extent(), 4);
        assert_eq!(PeriodicGrid::for_len(3, 125).unwrap().extent(), 5);
        assert_eq!(PeriodicGrid::for_len(3, 64 * 64 * 64).unwrap().extent(), 64);
    }

    #[test]
    fn for_len_rejects_non_hypercube() {
        assert_eq!(
            PeriodicGrid::for_len(2, 15),
            Err(SpaceError::ShapeMismatch {
                dimension: 2,
                len: 15
            })
        );
    }

    #[test]
    fn wrap_axis_cases() {
        assert_eq!(wrap_axis(-1, 5), 4);
        assert_eq!(wrap_axis(5, 5), 0);
        assert_eq!(wrap_axis(7, 5), 2);
        assert_eq!(wrap_axis(2, 5), 2);
    }

    #[test]
    fn one_dimensional_ring() {
        let g = PeriodicGrid::new(1, 8).unwrap();
        assert_eq!(g.axis_neighbours(0, 0), (7, 1));
        assert_eq!(g.axis_neighbours(7, 0), (6, 0));
        assert_eq!(g.neighbours(3).as_slice(), &[2, 4]);
    }

    #[test]
    fn two_dimensional_corner_wraps() {
        let g = PeriodicGrid::new(2, 3).unwrap();
        // (0,0): axis0 back=(2,0)=6, fwd=(1,0)=3; axis1 back=(0,2)=2, fwd=(0,1)=1
        assert_eq!(g.neighbours(0).as_slice(), &[6, 3, 2, 1]);
    }

    #[test]
    fn three_dimensional_has_six_neighbours() {
        let g = PeriodicGrid::new(3, 4).unwrap();
        let idx = g.index(&[0, 3, 1]).unwrap();
        let nbs = g.neighbours(idx);
        assert_eq!(nbs.len(), 6);
        assert_eq!(nbs[0], g.index(&[3, 3, 1]).unwrap());
        assert_eq!(nbs[1], g.index(&[1, 3, 1]).unwrap());
        assert_eq!(nbs[2], g.index(&[0, 2, 1]).unwrap());
        assert_eq!(nbs[3], g.index(&[0, 0, 1]).unwrap());
        assert_eq!(nbs[4], g.index(&[0, 3, 0]).unwrap());
        assert_eq!(nbs[5], g.index(&[0, 3, 2]).unwrap());
    }

    #[test]
    fn extent_one_is_its_own_neighbour() {
        let g = PeriodicGrid::new(2, 1).unwrap();
        assert_eq!(g.neighbours(0).as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn coord_is_row_major() {
        let g = PeriodicGrid::new(2, 4).unwrap();
        let expected: Coord = smallvec![1, 2];
        assert_eq!(g.coord(6), expected);
        assert_eq!(g.index(&[1, 2]), Some(6));
        assert_eq!(g.index(&[4, 0]), None);
        assert_eq!(g.index(&[1]), None);
        assert_eq!(g.shape().as_slice(), &[4, 4]);
    }

    proptest! {
        #[test]
        fn coord_index_roundtrip(dimension in 1usize..=3, extent in 1usize..8, seed in 0usize..10_000) {
            let g = PeriodicGrid::new(dimension, extent).unwrap();
            let i = seed % g.cell_count();
            prop_assert_eq!(g.index(&g.coord(i)), Some(i));
        }

        #[test]
        fn forward_then_backward_is_identity(dimension in 1usize..=3, extent in 1usize..8, seed in 0usize..10_000) {
            let g = PeriodicGrid::new(dimension, extent).unwrap();
            let i = seed % g.cell_count();
            for axis in 0..dimension {
                let (_, fwd) = g.axis_neighbours(i, axis);
                prop_assert_eq!(g.axis_neighbours(fwd, axis).0, i);
            }
        }
    }
}
