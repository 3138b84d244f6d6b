//! Zeno: a field simulator driven by integer-partition geometry.
//!
//! This is the top-level facade crate that re-exports the public API from
//! every Zeno sub-crate.
//!
//! # Quick start
//!
//! ```rust
//! use zeno::prelude::*;
//!
//! let config = SimConfig {
//!     dimension: 2,
//!     grid_size: 8,
//!     total_steps: 4,
//!     operator: "pgns".into(),
//!     mode: "symbolic".into(),
//!     scene: "Checkerboard_2D".into(),
//!     show_progress: false,
//!     ..SimConfig::default()
//! };
//! let mut frames = FrameCollector::new();
//! let summary = run_scene(
//!     config,
//!     &SceneRegistry::standard(),
//!     &mut frames,
//!     &mut Sinks::new(),
//! )
//! .unwrap();
//! assert_eq!(summary.steps, 4);
//! assert_eq!(frames.len(), 4);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `zeno-core` | `Amplitude`, `FieldValues`, `Dtype`, field errors |
//! | [`space`] | `zeno-space` | `PeriodicGrid` and neighbour indexing |
//! | [`operators`] | `zeno-operators` | Partition table, operators, composite rules |
//! | [`engine`] | `zeno-engine` | Config, `Field`, `Simulation`, metrics, sinks, scenes |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Scalar abstraction and field buffers (`zeno-core`).
pub use zeno_core as types;

/// Periodic lattice topology (`zeno-space`).
pub use zeno_space as space;

/// Partition table, per-cell operators, and composite update rules
/// (`zeno-operators`).
pub use zeno_operators as operators;

/// Simulation driver (`zeno-engine`).
///
/// [`engine::Simulation`] for step-by-step control,
/// [`engine::run_simulation`] and [`engine::run_scene`] for whole runs.
pub use zeno_engine as engine;

/// Common imports for typical Zeno usage.
///
/// ```rust
/// use zeno::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use zeno_core::{Amplitude, Complex64, Dtype, FieldError, FieldValues};

    // Space
    pub use zeno_space::PeriodicGrid;

    // Operators
    pub use zeno_operators::{Coefficients, OperatorError, PartitionTable, TermKind};

    // Engine
    pub use zeno_engine::{
        run_scene, run_simulation, ConfigError, Field, FieldSnapshot, FrameCollector, FrameSink,
        MetricsRecord, MetricsSink, NullSink, Phase, RunError, RunSummary, SceneRegistry,
        SimConfig, Simulation, Sinks, SnapshotSink, StepError, Variant,
    };
}
