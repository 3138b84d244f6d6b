//! The [`Coord`] type alias.

use smallvec::SmallVec;

/// A grid coordinate: one non-negative index per axis.
///
/// Grids are at most three-dimensional, so the inline capacity of 3
/// keeps every coordinate on the stack.
pub type Coord = SmallVec<[usize; 3]>;
