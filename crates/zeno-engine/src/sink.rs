//! Boundaries where a run hands data to the outside world.
//!
//! The engine never persists, renders, or encodes anything itself. It
//! hands detached [`FieldSnapshot`]s and metrics records to three sink
//! traits:
//!
//! - [`FrameSink`]: once per step, for 1D and 2D fields.
//! - [`SnapshotSink`]: once, at finalization, with the final field.
//! - [`MetricsSink`]: once, at finalization, with every record.

use std::error::Error;
use std::fmt;
use std::io;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::warn;

use crate::field::FieldSnapshot;
use crate::metrics::MetricsRecord;

// ── SinkError ──────────────────────────────────────────────────────

/// Errors raised by a sink at finalization.
#[derive(Debug)]
pub enum SinkError {
    /// Writing to the underlying stream failed.
    Io(io::Error),
    /// Encoding the payload failed.
    Encode(serde_json::Error),
    /// The sink refused the payload.
    Rejected {
        /// Why the sink refused.
        reason: String,
    },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Encode(e) => write!(f, "encode: {e}"),
            Self::Rejected { reason } => write!(f, "rejected: {reason}"),
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Rejected { .. } => None,
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}

// ── Traits ─────────────────────────────────────────────────────────

/// Receives one snapshot per rendered step.
pub trait FrameSink {
    /// Accept the field as it stands after `step`.
    fn frame(&mut self, step: u64, snapshot: FieldSnapshot);
}

/// Receives the full metrics sequence at finalization.
pub trait MetricsSink {
    /// Export every record, in order.
    fn export(&mut self, records: &[MetricsRecord]) -> Result<(), SinkError>;
}

/// Receives the final field at finalization.
pub trait SnapshotSink {
    /// Persist the final snapshot.
    fn persist(&mut self, snapshot: FieldSnapshot) -> Result<(), SinkError>;
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn frame(&mut self, step: u64, snapshot: FieldSnapshot) {
        (**self).frame(step, snapshot);
    }
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn frame(&mut self, step: u64, snapshot: FieldSnapshot) {
        (**self).frame(step, snapshot);
    }
}

/// Finalization sinks for one run. Either may be absent.
#[derive(Default)]
pub struct Sinks<'a> {
    metrics: Option<&'a mut dyn MetricsSink>,
    snapshot: Option<&'a mut dyn SnapshotSink>,
}

impl<'a> Sinks<'a> {
    /// No sinks: finalization exports nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Export metrics to `sink`.
    pub fn metrics(mut self, sink: &'a mut dyn MetricsSink) -> Self {
        self.metrics = Some(sink);
        self
    }

    /// Persist the final snapshot to `sink`.
    pub fn snapshot(mut self, sink: &'a mut dyn SnapshotSink) -> Self {
        self.snapshot = Some(sink);
        self
    }

    pub(crate) fn persist(&mut self, snapshot: FieldSnapshot) -> Result<(), SinkError> {
        match self.snapshot.as_deref_mut() {
            Some(sink) => sink.persist(snapshot),
            None => Ok(()),
        }
    }

    pub(crate) fn export(&mut self, records: &[MetricsRecord]) -> Result<(), SinkError> {
        match self.metrics.as_deref_mut() {
            Some(sink) => sink.export(records),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Sinks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sinks")
            .field("metrics", &self.metrics.is_some())
            .field("snapshot", &self.snapshot.is_some())
            .finish()
    }
}

// ── Stock sinks ────────────────────────────────────────────────────

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn frame(&mut self, _step: u64, _snapshot: FieldSnapshot) {}
}

impl MetricsSink for NullSink {
    fn export(&mut self, _records: &[MetricsRecord]) -> Result<(), SinkError> {
        Ok(())
    }
}

impl SnapshotSink for NullSink {
    fn persist(&mut self, _snapshot: FieldSnapshot) -> Result<(), SinkError> {
        Ok(())
    }
}

/// A rendered step: its index and the field after it.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Step index.
    pub step: u64,
    /// Field state after the step.
    pub snapshot: FieldSnapshot,
}

/// Keeps every frame in memory, in step order.
#[derive(Clone, Debug, Default)]
pub struct FrameCollector {
    frames: Vec<Frame>,
}

impl FrameCollector {
    /// An empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected frames.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of collected frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Take ownership of the frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl FrameSink for FrameCollector {
    fn frame(&mut self, step: u64, snapshot: FieldSnapshot) {
        self.frames.push(Frame { step, snapshot });
    }
}

/// Forwards frames to another thread (an encoder, a viewer).
///
/// A bounded channel that is full drops the frame instead of stalling
/// the step loop; dropped frames are counted. A disconnected receiver
/// also drops frames.
#[derive(Debug)]
pub struct ChannelFrameSink {
    tx: Sender<Frame>,
    dropped: u64,
}

impl ChannelFrameSink {
    /// A sink over an unbounded channel. Never drops while the receiver lives.
    pub fn unbounded() -> (Self, Receiver<Frame>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx, dropped: 0 }, rx)
    }

    /// A sink over a channel holding at most `capacity` pending frames.
    pub fn bounded(capacity: usize) -> (Self, Receiver<Frame>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self { tx, dropped: 0 }, rx)
    }

    /// Frames dropped because the channel was full or disconnected.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl FrameSink for ChannelFrameSink {
    fn frame(&mut self, step: u64, snapshot: FieldSnapshot) {
        match self.tx.try_send(Frame { step, snapshot }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
            }
            Err(TrySendError::Disconnected(_)) => {
                if self.dropped == 0 {
                    warn!(step, "frame receiver disconnected; dropping frames");
                }
                self.dropped += 1;
            }
        }
    }
}

/// Keeps persisted snapshots in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySnapshotSink {
    snapshots: Vec<FieldSnapshot>,
}

impl MemorySnapshotSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every persisted snapshot.
    pub fn snapshots(&self) -> &[FieldSnapshot] {
        &self.snapshots
    }

    /// The most recently persisted snapshot.
    pub fn last(&self) -> Option<&FieldSnapshot> {
        self.snapshots.last()
    }
}

impl SnapshotSink for MemorySnapshotSink {
    fn persist(&mut self, snapshot: FieldSnapshot) -> Result<(), SinkError> {
        self.snapshots.push(snapshot);
        Ok(())
    }
}

/// Writes the metrics sequence as a pretty-printed JSON array.
#[derive(Debug)]
pub struct JsonMetricsSink<W: io::Write> {
    writer: W,
}

impl<W: io::Write> JsonMetricsSink<W> {
    /// Write to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> MetricsSink for JsonMetricsSink<W> {
    fn export(&mut self, records: &[MetricsRecord]) -> Result<(), SinkError> {
        serde_json::to_writer_pretty(&mut self.writer, records)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeno_core::FieldValues;

    fn snap(v: f64) -> FieldSnapshot {
        FieldSnapshot {
            dimension: 1,
            grid_size: 2,
            values: FieldValues::Real(vec![v; 2]),
        }
    }

    fn record(step: u64) -> MetricsRecord {
        MetricsRecord {
            step,
            time: step as f64 * 0.5,
            field_energy: 1.0,
            curvature_energy: 0.0,
            torsion_energy: 0.0,
            nonlinear_energy: 0.0,
            entropy_energy: 0.0,
        }
    }

    #[test]
    fn collector_keeps_order() {
        let mut c = FrameCollector::new();
        c.frame(1, snap(1.0));
        c.frame(2, snap(2.0));
        let steps: Vec<u64> = c.frames().iter().map(|f| f.step).collect();
        assert_eq!(steps, vec![1, 2]);
        assert_eq!(c.into_frames()[1].snapshot, snap(2.0));
    }

    fn push<F: FrameSink>(mut sink: F) {
        sink.frame(1, snap(0.0));
    }

    #[test]
    fn boxed_and_borrowed_sinks_forward() {
        let mut c = FrameCollector::new();
        push(&mut c);
        push(&mut c as &mut dyn FrameSink);
        assert_eq!(c.len(), 2);
        push(Box::new(NullSink) as Box<dyn FrameSink>);
    }

    #[test]
    fn bounded_channel_drops_when_full() {
        let (mut sink, rx) = ChannelFrameSink::bounded(1);
        sink.frame(1, snap(1.0));
        sink.frame(2, snap(2.0));
        assert_eq!(sink.dropped(), 1);
        assert_eq!(rx.try_recv().unwrap().step, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_counts_disconnected_drops() {
        let (mut sink, rx) = ChannelFrameSink::unbounded();
        drop(rx);
        sink.frame(1, snap(1.0));
        assert_eq!(sink.dropped(), 1);
    }

    #[test]
    fn frames_cross_threads() {
        let (mut sink, rx) = ChannelFrameSink::unbounded();
        let handle = std::thread::spawn(move || rx.iter().map(|f| f.step).collect::<Vec<_>>());
        for step in 1..=3 {
            sink.frame(step, snap(step as f64));
        }
        drop(sink);
        assert_eq!(handle.join().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn json_sink_writes_array() {
        let mut sink = JsonMetricsSink::new(Vec::new());
        sink.export(&[record(1), record(2)]).unwrap();
        let parsed: Vec<MetricsRecord> = serde_json::from_slice(&sink.into_inner()).unwrap();
        assert_eq!(parsed, vec![record(1), record(2)]);
    }

    #[test]
    fn sinks_skip_missing_targets() {
        let mut sinks = Sinks::new();
        assert!(sinks.persist(snap(0.0)).is_ok());
        assert!(sinks.export(&[record(1)]).is_ok());

        let mut mem = MemorySnapshotSink::new();
        let mut sinks = Sinks::new().snapshot(&mut mem);
        sinks.persist(snap(3.0)).unwrap();
        drop(sinks);
        assert_eq!(mem.last(), Some(&snap(3.0)));
    }

    #[test]
    fn sink_error_sources() {
        let e = SinkError::from(io::Error::other("disk full"));
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "io: disk full");
        let e = SinkError::Rejected {
            reason: "read-only".into(),
        };
        assert!(e.source().is_none());
    }
}
