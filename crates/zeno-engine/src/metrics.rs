//! Per-step scalar summaries of a run.
//!
//! [`MetricsAccumulator`] is append-only: records are never dropped,
//! reordered, or edited once recorded.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeno_core::FieldValues;

/// `Σ |term|` for each operator term evaluated in one step.
///
/// Terms a variant does not compute stay at `0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TermEnergies {
    /// Curvature energy.
    pub curvature: f64,
    /// Torsion energy.
    pub torsion: f64,
    /// Nonlinear energy.
    pub nonlinear: f64,
    /// Entropy energy.
    pub entropy: f64,
}

/// One recorded step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Step index, starting at 1 for the first completed step.
    pub step: u64,
    /// Simulated time after the step.
    pub time: f64,
    /// `Σ |v|` of the field after the step.
    pub field_energy: f64,
    /// `Σ |R|`.
    pub curvature_energy: f64,
    /// `Σ |T|`.
    pub torsion_energy: f64,
    /// `Σ |N|`.
    pub nonlinear_energy: f64,
    /// `Σ |S|`.
    pub entropy_energy: f64,
}

/// Ordered, append-only metrics store for one run.
#[derive(Clone, Debug, Default)]
pub struct MetricsAccumulator {
    records: Vec<MetricsRecord>,
}

impl MetricsAccumulator {
    /// An empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record built from the post-step field and the step's
    /// term energies.
    pub fn record(
        &mut self,
        step: u64,
        time: f64,
        field: &FieldValues,
        terms: &TermEnergies,
    ) -> &MetricsRecord {
        self.records.push(MetricsRecord {
            step,
            time,
            field_energy: field.abs_sum(),
            curvature_energy: terms.curvature,
            torsion_energy: terms.torsion,
            nonlinear_energy: terms.nonlinear,
            entropy_energy: terms.entropy,
        });
        &self.records[self.records.len() - 1]
    }

    /// Every record, in recording order.
    pub fn records(&self) -> &[MetricsRecord] {
        &self.records
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&MetricsRecord> {
        self.records.last()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Final-step summary, or `None` before the first record.
    pub fn summary(&self) -> Option<MetricsSummary> {
        let last = self.records.last()?;
        let peak_field_energy = self
            .records
            .iter()
            .map(|r| r.field_energy)
            .fold(f64::NEG_INFINITY, f64::max);
        Some(MetricsSummary {
            records: self.records.len(),
            last: last.clone(),
            peak_field_energy,
        })
    }
}

/// Condensed view of a finished (or in-progress) run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsSummary {
    /// Number of records.
    pub records: usize,
    /// The most recent record.
    pub last: MetricsRecord,
    /// Largest `field_energy` seen.
    pub peak_field_energy: f64,
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "final step {}: field={:.2}, curvature={:.2}, torsion={:.2}",
            self.last.step,
            self.last.field_energy,
            self.last.curvature_energy,
            self.last.torsion_energy,
        )
    }
}
