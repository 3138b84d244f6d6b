//! The three update rules a simulation can run.
//!
//! A [`Variant`] is resolved once from configuration and then dispatched
//! by `match` every step.

use std::fmt;

use zeno_core::{Dtype, FieldError, FieldValues};
use zeno_operators::composite::{self, Composite};
use zeno_operators::{Coefficients, PartitionTable, TermKind};
use zeno_space::PeriodicGrid;

use crate::error::StepError;
use crate::metrics::TermEnergies;

/// A resolved update rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Variant {
    /// `−i · (R + λT + κN + βS)` on a complex field.
    Pgns(Coefficients),
    /// `−i · (R + βS + λT)` on a complex field.
    Rehte(Coefficients),
    /// Plain Laplacian diffusion on a real field.
    Classical,
}

/// One step's delta plus the energies of the terms that built it.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Update to apply, scaled by the time step.
    pub delta: FieldValues,
    /// `Σ |term|` per operator term.
    pub energies: TermEnergies,
}

impl Variant {
    /// Short name used in logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pgns(_) => "pgns",
            Self::Rehte(_) => "rehte",
            Self::Classical => "classical",
        }
    }

    /// Element type the field must be allocated with.
    pub fn dtype(&self) -> Dtype {
        match self {
            Self::Pgns(_) | Self::Rehte(_) => Dtype::Complex,
            Self::Classical => Dtype::Real,
        }
    }

    /// Evaluate the rule against the frozen field `values`.
    ///
    /// # Errors
    ///
    /// [`StepError::Field`] if a symbolic rule is handed a real buffer,
    /// or [`StepError::Operator`] if any term fails.
    pub fn evaluate(
        &self,
        grid: &PeriodicGrid,
        values: &FieldValues,
        table: &PartitionTable,
    ) -> Result<Evaluation, StepError> {
        match self {
            Self::Pgns(coeffs) | Self::Rehte(coeffs) => {
                let psi = values.as_complex().ok_or(FieldError::DtypeMismatch {
                    expected: Dtype::Complex,
                    actual: values.dtype(),
                })?;
                let out = if matches!(self, Self::Pgns(_)) {
                    composite::pgns(grid, psi, table, coeffs)?
                } else {
                    composite::rehte(grid, psi, table, coeffs)?
                };
                let energies = energies(&out);
                Ok(Evaluation {
                    delta: FieldValues::Complex(out.delta),
                    energies,
                })
            }
            Self::Classical => {
                let delta = match values {
                    FieldValues::Real(v) => FieldValues::Real(composite::classical(grid, v)?),
                    FieldValues::Complex(v) => {
                        FieldValues::Complex(composite::classical(grid, v)?)
                    }
                };
                Ok(Evaluation {
                    delta,
                    energies: TermEnergies::default(),
                })
            }
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn energies(out: &Composite) -> TermEnergies {
    TermEnergies {
        curvature: out.energy(TermKind::Curvature),
        torsion: out.energy(TermKind::Torsion),
        nonlinear: out.energy(TermKind::Nonlinear),
        entropy: out.energy(TermKind::Entropy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeno_core::Complex64;

    fn grid(dimension: usize, extent: usize) -> PeriodicGrid {
        PeriodicGrid::new(dimension, extent).unwrap()
    }

    #[test]
    fn dtypes_and_names() {
        let k = Coefficients::default();
        assert_eq!(Variant::Pgns(k).dtype(), Dtype::Complex);
        assert_eq!(Variant::Rehte(k).dtype(), Dtype::Complex);
        assert_eq!(Variant::Classical.dtype(), Dtype::Real);
        assert_eq!(Variant::Rehte(k).to_string(), "rehte");
    }

    #[test]
    fn classical_has_zero_term_energies() {
        let g = grid(1, 4);
        let values = FieldValues::Real(vec![0.0, 1.0, 0.0, 0.0]);
        let eval = Variant::Classical
            .evaluate(&g, &values, PartitionTable::reference())
            .unwrap();
        assert_eq!(eval.delta, FieldValues::Real(vec![1.0, -2.0, 1.0, 0.0]));
        assert_eq!(eval.energies, TermEnergies::default());
    }

    #[test]
    fn pgns_reports_all_four_energies() {
        let g = grid(1, 4);
        let values = FieldValues::Complex(
            [0.0, 0.3, 0.6, 0.1]
                .iter()
                .map(|&v| Complex64::new(v, 0.0))
                .collect(),
        );
        let eval = Variant::Pgns(Coefficients::default())
            .evaluate(&g, &values, PartitionTable::reference())
            .unwrap();
        assert_eq!(eval.delta.dtype(), Dtype::Complex);
        assert!(eval.energies.curvature > 0.0);
        assert!(eval.energies.torsion > 0.0);
        assert!(eval.energies.nonlinear > 0.0);
        assert!(eval.energies.entropy > 0.0);
    }

    #[test]
    fn rehte_has_no_nonlinear_energy() {
        let g = grid(1, 4);
        let values = FieldValues::Complex(vec![Complex64::new(0.5, 0.0); 4]);
        let eval = Variant::Rehte(Coefficients::default())
            .evaluate(&g, &values, PartitionTable::reference())
            .unwrap();
        assert_eq!(eval.energies.nonlinear, 0.0);
        assert_eq!(eval.delta.abs_sum(), 0.0);
    }

    #[test]
    fn symbolic_rule_rejects_real_buffer() {
        let g = grid(1, 4);
        let values = FieldValues::Real(vec![0.0; 4]);
        assert_eq!(
            Variant::Pgns(Coefficients::default()).evaluate(&g, &values, PartitionTable::reference()),
            Err(StepError::Field(FieldError::DtypeMismatch {
                expected: Dtype::Complex,
                actual: Dtype::Real
            }))
        );
    }
}
