//! Integer partition counts `p(n)`.
//!
//! Two independent code paths compute the same sequence:
//!
//! - [`PartitionTable::build`] fills `p[0..=max_n]` bottom-up. This is the
//!   lookup the curvature and torsion operators use. Build it once per
//!   run and share it by reference; it is immutable after construction.
//! - [`PartitionMemo`] evaluates a single `p(n)` top-down by recursion
//!   with a bounded LRU cache, for ad hoc lookups.
//!
//! Both use Euler's pentagonal-number recurrence
//!
//! ```text
//! p(n) = Σ_{k≥1} s(k) · [ p(n − k(3k−1)/2) + p(n − k(3k+1)/2) ]
//! ```
//!
//! with `s(k) = +1` for odd `k`, `−1` for even `k`, and `p(n) = 0` for
//! `n < 0`.

use std::cell::RefCell;
use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::error::OperatorError;
use crate::quantize::MAX_N;

/// Largest `n` whose recurrence stays inside exact 128-bit arithmetic.
///
/// Partial sums of the recurrence never exceed `4·p(n)`, and
/// `4·p(1395) < i128::MAX`.
pub const MAX_EXACT_N: usize = 1395;

const _: () = assert!(MAX_N <= MAX_EXACT_N);

/// Default capacity of a [`PartitionMemo`].
pub const MEMO_CAPACITY: usize = 2048;

/// Generalized pentagonal offsets `(k(3k−1)/2, k(3k+1)/2)`.
#[inline]
fn pentagonal(k: usize) -> (usize, usize) {
    (k * (3 * k - 1) / 2, k * (3 * k + 1) / 2)
}

#[inline]
fn sign(k: usize) -> i128 {
    if k % 2 == 1 {
        1
    } else {
        -1
    }
}

/// Immutable lookup of `p(0)..=p(max_n)`.
///
/// Counts are held exactly; [`weight`](Self::weight) exposes them as
/// `f64` for operator arithmetic.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionTable {
    counts: Vec<u128>,
    weights: Vec<f64>,
}

impl PartitionTable {
    /// Build the table for `0..=max_n`. O(max_n^1.5).
    ///
    /// # Errors
    ///
    /// [`OperatorError::TableOverflow`] if `max_n > MAX_EXACT_N`.
    pub fn build(max_n: usize) -> Result<Self, OperatorError> {
        if max_n > MAX_EXACT_N {
            return Err(OperatorError::TableOverflow { n: max_n });
        }
        let mut p = vec![0i128; max_n + 1];
        p[0] = 1;
        for n in 1..=max_n {
            let mut total = 0i128;
            for k in 1.. {
                let (g1, g2) = pentagonal(k);
                if g1 > n {
                    break;
                }
                total += sign(k) * p[n - g1];
                if g2 <= n {
                    total += sign(k) * p[n - g2];
                }
            }
            p[n] = total;
        }
        let counts: Vec<u128> = p.into_iter().map(|v| v as u128).collect();
        let weights = counts.iter().map(|&c| c as f64).collect();
        Ok(Self { counts, weights })
    }

    /// Process-wide table for the reference bound [`MAX_N`].
    pub fn reference() -> &'static Self {
        static TABLE: OnceLock<PartitionTable> = OnceLock::new();
        TABLE.get_or_init(|| Self::build(MAX_N).expect("MAX_N is below MAX_EXACT_N"))
    }

    /// The bound the table was built for.
    pub fn max_n(&self) -> usize {
        self.counts.len() - 1
    }

    /// Number of entries (`max_n + 1`).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always `false`: every table holds at least `p(0)`.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Exact `p(n)`, or `None` past the table bound.
    pub fn count(&self, n: usize) -> Option<u128> {
        self.counts.get(n).copied()
    }

    /// All exact counts.
    pub fn counts(&self) -> &[u128] {
        &self.counts
    }

    /// `p(index)` as `f64`.
    ///
    /// # Errors
    ///
    /// [`OperatorError::InvalidTableIndex`] if `index > max_n`.
    #[inline]
    pub fn weight(&self, index: usize) -> Result<f64, OperatorError> {
        self.weights
            .get(index)
            .copied()
            .ok_or(OperatorError::InvalidTableIndex {
                index,
                len: self.weights.len(),
            })
    }

    /// All counts as `f64`.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Recursive `p(n)` with a bounded least-recently-used cache.
///
/// Independent of [`PartitionTable`]; the two agree on every `n` both
/// can represent.
#[derive(Debug)]
pub struct PartitionMemo {
    cache: IndexMap<usize, u128>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl PartitionMemo {
    /// Create a memo holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            cache: IndexMap::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// `p(n)`. Negative `n` yields 0.
    ///
    /// # Errors
    ///
    /// [`OperatorError::TableOverflow`] if `n > MAX_EXACT_N`.
    pub fn get(&mut self, n: i64) -> Result<u128, OperatorError> {
        if n < 0 {
            return Ok(0);
        }
        let n = n as usize;
        if n > MAX_EXACT_N {
            return Err(OperatorError::TableOverflow { n });
        }
        Ok(self.lookup(n) as u128)
    }

    /// Entries currently cached.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Maximum number of cached entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `(hits, misses)` since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    fn lookup(&mut self, n: usize) -> i128 {
        if n == 0 {
            return 1;
        }
        if let Some(idx) = self.cache.get_index_of(&n) {
            self.hits += 1;
            let last = self.cache.len() - 1;
            self.cache.move_index(idx, last);
            return self.cache[last] as i128;
        }
        self.misses += 1;

        let mut total = 0i128;
        for k in 1.. {
            let (g1, g2) = pentagonal(k);
            if g1 > n {
                break;
            }
            total += sign(k) * self.lookup(n - g1);
            if g2 <= n {
                total += sign(k) * self.lookup(n - g2);
            }
        }

        if self.cache.len() >= self.capacity {
            self.cache.shift_remove_index(0);
        }
        self.cache.insert(n, total as u128);
        total
    }
}

impl Default for PartitionMemo {
    fn default() -> Self {
        Self::new(MEMO_CAPACITY)
    }
}

thread_local! {
    static MEMO: RefCell<PartitionMemo> = RefCell::new(PartitionMemo::default());
}

/// `p(n)` through a per-thread [`PartitionMemo`] of [`MEMO_CAPACITY`].
///
/// Negative `n` yields 0.
///
/// # Errors
///
/// [`OperatorError::TableOverflow`] if `n > MAX_EXACT_N`.
pub fn partition_count(n: i64) -> Result<u128, OperatorError> {
    MEMO.with(|memo| memo.borrow_mut().get(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        let t = PartitionTable::build(200).unwrap();
        assert_eq!(t.count(0), Some(1));
        assert_eq!(t.count(1), Some(1));
        assert_eq!(t.count(4), Some(5));
        assert_eq!(t.count(10), Some(42));
        assert_eq!(t.count(50), Some(204_226));
        assert_eq!(t.count(100), Some(190_569_292));
        assert_eq!(t.count(200), Some(3_972_999_029_388));
        assert_eq!(t.count(201), None);
    }

    #[test]
    fn reference_table_reaches_past_u64() {
        let t = PartitionTable::reference();
        assert_eq!(t.max_n(), MAX_N);
        assert_eq!(t.len(), MAX_N + 1);
        assert_eq!(t.count(500), Some(2_300_165_032_574_323_995_027));
        assert!(t.count(499).unwrap() > u64::MAX as u128);
    }

    #[test]
    fn table_matches_memo_for_small_n() {
        let t = PartitionTable::build(50).unwrap();
        let mut memo = PartitionMemo::default();
        for n in 0..=50usize {
            assert_eq!(t.count(n).unwrap(), memo.get(n as i64).unwrap(), "n = {n}");
        }
    }

    #[test]
    fn table_is_non_decreasing_after_one() {
        let t = PartitionTable::reference();
        assert!(t.counts()[1..].windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn negative_n_is_zero() {
        let mut memo = PartitionMemo::default();
        assert_eq!(memo.get(-1).unwrap(), 0);
        assert_eq!(memo.get(-500).unwrap(), 0);
        assert_eq!(partition_count(-3).unwrap(), 0);
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(
            PartitionTable::build(MAX_EXACT_N + 1),
            Err(OperatorError::TableOverflow { n: MAX_EXACT_N + 1 })
        );
        let mut memo = PartitionMemo::default();
        assert_eq!(
            memo.get(MAX_EXACT_N as i64 + 1),
            Err(OperatorError::TableOverflow { n: MAX_EXACT_N + 1 })
        );
        assert!(PartitionTable::build(MAX_EXACT_N).is_ok());
    }

    #[test]
    fn weight_out_of_range_is_invalid_index() {
        let t = PartitionTable::build(10).unwrap();
        assert_eq!(t.weight(10).unwrap(), 42.0);
        assert_eq!(
            t.weight(11),
            Err(OperatorError::InvalidTableIndex { index: 11, len: 11 })
        );
    }

    #[test]
    fn memo_stays_within_capacity_and_stays_correct() {
        let t = PartitionTable::build(30).unwrap();
        let mut memo = PartitionMemo::new(8);
        for n in (0..=30usize).rev() {
            assert_eq!(memo.get(n as i64).unwrap(), t.count(n).unwrap());
            assert!(memo.len() <= memo.capacity());
        }
    }

    #[test]
    fn memo_records_hits() {
        let mut memo = PartitionMemo::default();
        memo.get(30).unwrap();
        let (_, misses) = memo.stats();
        memo.get(30).unwrap();
        let (hits, misses_after) = memo.stats();
        assert_eq!(misses, misses_after);
        assert!(hits >= 1);
    }

    #[test]
    fn thread_local_count_matches_table() {
        let t = PartitionTable::reference();
        assert_eq!(partition_count(500).unwrap(), t.count(500).unwrap());
    }
}
