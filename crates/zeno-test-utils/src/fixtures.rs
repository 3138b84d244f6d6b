//! Configurations, initializers, buffers, and sinks for tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use zeno_core::{Complex64, FieldValues};
use zeno_engine::{
    Field, FieldSnapshot, MetricsRecord, MetricsSink, SimConfig, SinkError, SnapshotSink,
};

// ── Configurations ────────────────────────────────────────────────

/// Classical baseline with progress logging off.
pub fn classical_config(dimension: usize, grid_size: usize, total_steps: u64) -> SimConfig {
    SimConfig {
        dimension,
        grid_size,
        total_steps,
        operator: "pgns".into(),
        mode: "classical".into(),
        show_progress: false,
        ..SimConfig::default()
    }
}

/// PGNS with progress logging off.
pub fn pgns_config(dimension: usize, grid_size: usize, total_steps: u64) -> SimConfig {
    SimConfig {
        dimension,
        grid_size,
        total_steps,
        operator: "pgns".into(),
        mode: "symbolic".into(),
        show_progress: false,
        ..SimConfig::default()
    }
}

/// REHTE with progress logging off.
pub fn rehte_config(dimension: usize, grid_size: usize, total_steps: u64) -> SimConfig {
    SimConfig {
        operator: "rehte".into(),
        ..pgns_config(dimension, grid_size, total_steps)
    }
}

// ── Initializers ──────────────────────────────────────────────────

/// Leaves the zero-filled allocation as is.
pub fn zero_field(_field: &mut Field) {}

/// Every cell set to `value`.
pub fn uniform_field(value: f64) -> impl FnOnce(&mut Field) {
    move |field: &mut Field| field.fill_real(|_| value)
}

/// `(−1)^(Σ coords)`: `+1` at the origin.
pub fn checkerboard_field(field: &mut Field) {
    field.fill_real(|c| parity_sign(c.iter().sum()));
}

/// Uniform noise in `[−amplitude, amplitude)` from `seed`.
pub fn noise_field(amplitude: f64, seed: u64) -> impl FnOnce(&mut Field) {
    move |field: &mut Field| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        field.fill_real(|_| amplitude * (2.0 * rng.random::<f64>() - 1.0));
    }
}

// ── Buffers ───────────────────────────────────────────────────────

fn parity_sign(sum: usize) -> f64 {
    if sum % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Row-major `(−1)^(Σ coords)` buffer of `extent^dimension` cells.
pub fn checkerboard(extent: usize, dimension: usize) -> Vec<f64> {
    let len = extent.pow(dimension as u32);
    (0..len)
        .map(|mut i| {
            let mut sum = 0;
            for _ in 0..dimension {
                sum += i % extent;
                i /= extent;
            }
            parity_sign(sum)
        })
        .collect()
}

/// Widen a real buffer to complex with zero imaginary parts.
pub fn to_complex(values: &[f64]) -> Vec<Complex64> {
    values.iter().map(|&v| Complex64::new(v, 0.0)).collect()
}

/// `len` uniform draws in `[−amplitude, amplitude)` from `seed`.
pub fn random_real(len: usize, amplitude: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| amplitude * (2.0 * rng.random::<f64>() - 1.0))
        .collect()
}

/// Real buffer of a snapshot, panicking if it is complex.
pub fn real_values(snapshot: &FieldSnapshot) -> &[f64] {
    match &snapshot.values {
        FieldValues::Real(v) => v,
        FieldValues::Complex(_) => panic!("expected a real snapshot"),
    }
}

// ── Sinks ─────────────────────────────────────────────────────────

/// Keeps every exported metrics sequence.
#[derive(Debug, Default)]
pub struct RecordingMetricsSink {
    pub exports: Vec<Vec<MetricsRecord>>,
}

impl RecordingMetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records from the most recent export.
    pub fn last(&self) -> Option<&[MetricsRecord]> {
        self.exports.last().map(Vec::as_slice)
    }
}

impl MetricsSink for RecordingMetricsSink {
    fn export(&mut self, records: &[MetricsRecord]) -> Result<(), SinkError> {
        self.exports.push(records.to_vec());
        Ok(())
    }
}

/// Counts persisted snapshots and keeps the latest.
#[derive(Debug, Default)]
pub struct RecordingSnapshotSink {
    pub calls: usize,
    pub latest: Option<FieldSnapshot>,
}

impl RecordingSnapshotSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotSink for RecordingSnapshotSink {
    fn persist(&mut self, snapshot: FieldSnapshot) -> Result<(), SinkError> {
        self.calls += 1;
        self.latest = Some(snapshot);
        Ok(())
    }
}

/// Refuses everything it is handed.
#[derive(Debug, Default)]
pub struct FailingSink {
    pub attempts: usize,
}

impl FailingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn refuse(&mut self) -> Result<(), SinkError> {
        self.attempts += 1;
        Err(SinkError::Rejected {
            reason: "failing sink".to_string(),
        })
    }
}

impl MetricsSink for FailingSink {
    fn export(&mut self, _records: &[MetricsRecord]) -> Result<(), SinkError> {
        self.refuse()
    }
}

impl SnapshotSink for FailingSink {
    fn persist(&mut self, _snapshot: FieldSnapshot) -> Result<(), SinkError> {
        self.refuse()
    }
}
