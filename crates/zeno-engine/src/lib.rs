//! Simulation engine for Zeno fields.
//!
//! Drives a [`Field`] through the PGNS, REHTE, or classical update rule:
//!
//! 1. [`SimConfig`] is validated and a [`Variant`] is resolved
//!    ([`resolve_variant`]) before anything is allocated.
//! 2. The [`Field`] is allocated with the variant's dtype and handed to a
//!    scene initializer ([`SceneRegistry`] or any closure).
//! 3. [`Simulation::step`] evaluates the variant read-only, applies the
//!    delta, advances the clock, records metrics, and emits a frame.
//! 4. [`Simulation::finalize`] hands the final snapshot and metrics to
//!    the caller's [`Sinks`].
//!
//! Logging goes through `tracing`; the crate installs no subscriber.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod error;
pub mod field;
pub mod metrics;
pub mod scene;
pub mod simulation;
pub mod sink;
pub mod variant;

pub use config::{ConfigError, SimConfig};
pub use controller::{resolve_variant, run_scene, run_simulation};
pub use error::{FinalizeError, RunError, StepError};
pub use field::{Field, FieldSnapshot};
pub use metrics::{MetricsAccumulator, MetricsRecord, MetricsSummary, TermEnergies};
pub use scene::{SceneFn, SceneRegistry};
pub use simulation::{Phase, RunSummary, Simulation, StepReport};
pub use sink::{
    ChannelFrameSink, Frame, FrameCollector, FrameSink, JsonMetricsSink, MemorySnapshotSink,
    MetricsSink, NullSink, SinkError, Sinks, SnapshotSink,
};
pub use variant::{Evaluation, Variant};
