//! Composite update rules.
//!
//! Each rule evaluates its operator terms against the same frozen input
//! and folds them into one delta. Every computed term is returned next
//! to the delta so callers can report per-term energies without any
//! shared "last computed" state.
//!
//! | Rule | Delta |
//! |---|---|
//! | [`pgns`] | `−i · (R + λT + κN + βS)` |
//! | [`rehte`] | `−i · (R + βS + λT)` |
//! | [`classical`] | `Δv` |

use std::fmt;

use zeno_core::{Amplitude, Complex64};
use zeno_space::PeriodicGrid;

use crate::curvature::curvature_on;
use crate::entropy::entropy_on;
use crate::error::OperatorError;
use crate::kernel::map_cells;
use crate::laplacian::laplacian_on;
use crate::nonlinear::nonlinear_on;
use crate::partition::PartitionTable;
use crate::torsion::torsion_on;

/// Weights of the torsion, nonlinear, and entropy terms.
///
/// Curvature always enters with weight 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    /// Torsion weight `λ`.
    pub lambda: f64,
    /// Nonlinear weight `κ`. Ignored by [`rehte`].
    pub kappa: f64,
    /// Entropy weight `β`.
    pub beta: f64,
}

impl Coefficients {
    /// Reference torsion weight.
    pub const DEFAULT_LAMBDA: f64 = 0.4;
    /// Reference nonlinear weight.
    pub const DEFAULT_KAPPA: f64 = 0.9;
    /// Reference entropy weight.
    pub const DEFAULT_BETA: f64 = 0.3;
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            lambda: Self::DEFAULT_LAMBDA,
            kappa: Self::DEFAULT_KAPPA,
            beta: Self::DEFAULT_BETA,
        }
    }
}

/// One of the operator terms a composite rule can include.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// Partition-table curvature `R`.
    Curvature,
    /// Partition-table torsion `T`.
    Torsion,
    /// Cubic self-interaction `N`.
    Nonlinear,
    /// Entropy-gradient feedback `S`.
    Entropy,
}

impl TermKind {
    /// Every term, in the order composite rules sum them.
    pub const ALL: [TermKind; 4] = [
        TermKind::Curvature,
        TermKind::Torsion,
        TermKind::Nonlinear,
        TermKind::Entropy,
    ];

    /// Lower-case name used in logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Curvature => "curvature",
            Self::Torsion => "torsion",
            Self::Nonlinear => "nonlinear",
            Self::Entropy => "entropy",
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of a symbolic rule: the delta plus every term it summed.
#[derive(Clone, Debug, PartialEq)]
pub struct Composite {
    /// Combined, `−i`-scaled update.
    pub delta: Vec<Complex64>,
    /// Curvature term.
    pub curvature: Vec<Complex64>,
    /// Torsion term.
    pub torsion: Vec<Complex64>,
    /// Nonlinear term; `None` for rules that omit it.
    pub nonlinear: Option<Vec<Complex64>>,
    /// Entropy term.
    pub entropy: Vec<Complex64>,
}

impl Composite {
    /// Borrow one term, or `None` if this rule did not compute it.
    pub fn term(&self, kind: TermKind) -> Option<&[Complex64]> {
        match kind {
            TermKind::Curvature => Some(&self.curvature),
            TermKind::Torsion => Some(&self.torsion),
            TermKind::Nonlinear => self.nonlinear.as_deref(),
            TermKind::Entropy => Some(&self.entropy),
        }
    }

    /// `Σ |term|` for `kind`, or `0.0` if the term was not computed.
    pub fn energy(&self, kind: TermKind) -> f64 {
        self.term(kind)
            .map(|t| t.iter().map(|z| z.norm()).sum())
            .unwrap_or(0.0)
    }
}

/// Multiply by `−i`: `(a + bi)·(−i) = b − ai`.
#[inline]
fn times_neg_i(z: Complex64) -> Complex64 {
    Complex64::new(z.im, -z.re)
}

/// Primary symbolic rule: `−i · (R + λT + κN + βS)`.
///
/// # Errors
///
/// Any [`OperatorError`] raised by the individual terms.
pub fn pgns(
    grid: &PeriodicGrid,
    values: &[Complex64],
    table: &PartitionTable,
    coeffs: &Coefficients,
) -> Result<Composite, OperatorError> {
    let curvature = curvature_on(grid, values, table)?;
    let torsion = torsion_on(grid, values, table)?;
    let nonlinear = nonlinear_on(grid, values)?;
    let entropy = entropy_on(grid, values)?;

    let delta = map_cells(grid, |i| {
        times_neg_i(
            curvature[i]
                + torsion[i].scale(coeffs.lambda)
                + nonlinear[i].scale(coeffs.kappa)
                + entropy[i].scale(coeffs.beta),
        )
    });

    Ok(Composite {
        delta,
        curvature,
        torsion,
        nonlinear: Some(nonlinear),
        entropy,
    })
}

/// Alternate symbolic rule: `−i · (R + βS + λT)`, without the nonlinear
/// term. `coeffs.kappa` is ignored.
///
/// # Errors
///
/// Any [`OperatorError`] raised by the individual terms.
pub fn rehte(
    grid: &PeriodicGrid,
    values: &[Complex64],
    table: &PartitionTable,
    coeffs: &Coefficients,
) -> Result<Composite, OperatorError> {
    let curvature = curvature_on(grid, values, table)?;
    let entropy = entropy_on(grid, values)?;
    let torsion = torsion_on(grid, values, table)?;

    let delta = map_cells(grid, |i| {
        times_neg_i(
            curvature[i] + entropy[i].scale(coeffs.beta) + torsion[i].scale(coeffs.lambda),
        )
    });

    Ok(Composite {
        delta,
        curvature,
        torsion,
        nonlinear: None,
        entropy,
    })
}

/// Classical diffusion baseline: the delta is the plain Laplacian.
///
/// # Errors
///
/// [`OperatorError::ShapeMismatch`] if `values` does not match `grid`.
pub fn classical<T: Amplitude>(grid: &PeriodicGrid, values: &[T]) -> Result<Vec<T>, OperatorError> {
    laplacian_on(grid, values)
}
