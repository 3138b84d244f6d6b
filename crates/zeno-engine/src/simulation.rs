//! The simulation state machine.
//!
//! [`Simulation`] owns the field, the clock, and the metrics for one run.
//! It moves through three phases:
//!
//! ```text
//! Initialized ──step()──▶ Stepping ──finalize()──▶ Finalized
//! ```
//!
//! # Step discipline
//!
//! Each [`step()`](Simulation::step) evaluates every operator term
//! against the unmutated field, then applies the combined delta in one
//! pass. Step N+1 never starts before step N's delta is applied; only
//! the per-cell work inside one evaluation runs in parallel.
//!
//! # Ownership model
//!
//! `Simulation` is [`Send`] whenever its frame sink is. Sinks only ever
//! receive [`FieldSnapshot`] copies, never references into live state.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};
use zeno_operators::PartitionTable;

use crate::config::{ConfigError, SimConfig};
use crate::controller::resolve_variant;
use crate::error::{FinalizeError, RunError, StepError};
use crate::field::{Field, FieldSnapshot};
use crate::metrics::{MetricsAccumulator, MetricsRecord, TermEnergies};
use crate::sink::{FrameSink, NullSink, Sinks};
use crate::variant::Variant;

// Compile-time assertion: the default simulation is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

/// Frames are only produced for grids of at most this many axes.
pub const MAX_FRAME_DIMENSION: usize = 2;

// ── Phase ──────────────────────────────────────────────────────────

/// Lifecycle phase of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Constructed and initialized; no step has run.
    Initialized,
    /// At least one step has run.
    Stepping,
    /// Final outputs have been handed off. Terminal.
    Finalized,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized => write!(f, "initialized"),
            Self::Stepping => write!(f, "stepping"),
            Self::Finalized => write!(f, "finalized"),
        }
    }
}

// ── Reports ────────────────────────────────────────────────────────

/// Outcome of one successful [`Simulation::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// Step index just completed (1-based).
    pub step: u64,
    /// Simulated time after the step.
    pub time: f64,
    /// `Σ |v|` of the field after the step.
    pub field_energy: f64,
    /// Term energies from this step's evaluation.
    pub energies: TermEnergies,
}

/// Outcome of a finalized run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Variant that ran.
    pub variant: Variant,
    /// Steps completed.
    pub steps: u64,
    /// Simulated time at the end.
    pub final_time: f64,
    /// Wall-clock time from the first step to finalization.
    pub wall_time: Duration,
    /// The last metrics record, if metrics were recorded.
    pub last: Option<MetricsRecord>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} steps, t={:.4}, {:.2}s",
            self.variant,
            self.steps,
            self.final_time,
            self.wall_time.as_secs_f64()
        )?;
        if let Some(last) = &self.last {
            write!(
                f,
                ", field={:.2}, curvature={:.2}, torsion={:.2}",
                last.field_energy, last.curvature_energy, last.torsion_energy
            )?;
        }
        Ok(())
    }
}

// ── Simulation ─────────────────────────────────────────────────────

/// One simulation run.
///
/// Built from a [`SimConfig`] and a scene initializer via
/// [`new()`](Simulation::new). The frame sink `F` receives a snapshot
/// after every step of a 1D or 2D run; it defaults to [`NullSink`].
///
/// # Example
///
/// ```
/// use zeno_engine::{SimConfig, Simulation, Sinks};
///
/// let config = SimConfig {
///     dimension: 1,
///     grid_size: 8,
///     total_steps: 3,
///     mode: "classical".into(),
///     ..SimConfig::default()
/// };
/// let mut sim = Simulation::new(config, |f| f.fill_real(|_| 0.0)).unwrap();
/// let summary = sim.run(&mut Sinks::new()).unwrap();
/// assert_eq!(summary.steps, 3);
/// ```
pub struct Simulation<F = NullSink> {
    config: SimConfig,
    variant: Variant,
    field: Field,
    table: &'static PartitionTable,
    time: f64,
    step: u64,
    phase: Phase,
    metrics: MetricsAccumulator,
    frames: F,
    started: Option<Instant>,
    // The final snapshot has reached the snapshot sink.
    persisted: bool,
}

impl Simulation {
    /// Validate `config`, resolve its variant, allocate the field, and
    /// run `initializer` on it.
    ///
    /// Nothing is allocated and `initializer` is not called if the
    /// configuration is rejected.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`], including
    /// [`UnsupportedConfiguration`](ConfigError::UnsupportedConfiguration).
    pub fn new<I>(config: SimConfig, initializer: I) -> Result<Self, ConfigError>
    where
        I: FnOnce(&mut Field),
    {
        config.validate()?;
        let variant = resolve_variant(&config)?;
        let field = Field::initialize(&config, variant.dtype(), initializer)?;

        info!(
            variant = %variant,
            dimension = config.dimension,
            grid_size = config.grid_size,
            total_steps = config.total_steps,
            time_step = config.time_step,
            "simulation initialized"
        );

        Ok(Self {
            table: PartitionTable::reference(),
            variant,
            field,
            time: 0.0,
            step: 0,
            phase: Phase::Initialized,
            metrics: MetricsAccumulator::new(),
            frames: NullSink,
            started: None,
            persisted: false,
            config,
        })
    }
}

impl<F: FrameSink> Simulation<F> {
    /// Replace the frame sink.
    pub fn with_frame_sink<G: FrameSink>(self, frames: G) -> Simulation<G> {
        Simulation {
            config: self.config,
            variant: self.variant,
            field: self.field,
            table: self.table,
            time: self.time,
            step: self.step,
            phase: self.phase,
            metrics: self.metrics,
            frames,
            started: self.started,
            persisted: self.persisted,
        }
    }

    /// Advance one step.
    ///
    /// # Errors
    ///
    /// - [`StepError::Finalized`] after [`finalize()`](Self::finalize).
    /// - [`StepError::BudgetExhausted`] once `total_steps` steps have run.
    /// - [`StepError::Operator`] or [`StepError::Field`] if evaluation or
    ///   the update fails; the field is unchanged in that case.
    pub fn step(&mut self) -> Result<StepReport, StepError> {
        if self.phase == Phase::Finalized {
            return Err(StepError::Finalized);
        }
        if self.step >= self.config.total_steps {
            return Err(StepError::BudgetExhausted {
                total_steps: self.config.total_steps,
            });
        }
        self.started.get_or_insert_with(Instant::now);

        let eval = self
            .variant
            .evaluate(self.field.grid(), self.field.values(), self.table)?;
        self.field.apply_delta(&eval.delta, self.config.time_step)?;

        self.step += 1;
        self.time += self.config.time_step;
        self.phase = Phase::Stepping;

        let field_energy = self.field.values().abs_sum();
        if !self.field.values().all_finite() {
            warn!(step = self.step, field_energy, "field is no longer finite");
        }
        if self.config.record_metrics {
            self.metrics
                .record(self.step, self.time, self.field.values(), &eval.energies);
        }
        if self.config.render_frames && self.field.dimension() <= MAX_FRAME_DIMENSION {
            self.frames.frame(self.step, self.field.snapshot());
        }

        debug!(
            step = self.step,
            time = self.time,
            field_energy,
            curvature = eval.energies.curvature,
            torsion = eval.energies.torsion,
            "step complete"
        );
        if self.config.show_progress
            && self.config.progress_interval > 0
            && self.step % self.config.progress_interval == 0
        {
            info!(
                variant = %self.variant,
                step = self.step,
                total_steps = self.config.total_steps,
                "progress"
            );
        }

        Ok(StepReport {
            step: self.step,
            time: self.time,
            field_energy,
            energies: eval.energies,
        })
    }

    /// Hand the final snapshot and every metrics record to `sinks`, then
    /// enter [`Phase::Finalized`].
    ///
    /// On a sink error the phase is left unchanged, so the caller may
    /// retry with different sinks. A snapshot that was already persisted
    /// is not handed off again; the retry only exports the metrics.
    ///
    /// # Errors
    ///
    /// [`FinalizeError::BudgetRemaining`] before the budget is spent,
    /// [`FinalizeError::Finalized`] on a second call, or
    /// [`FinalizeError::Sink`].
    pub fn finalize(&mut self, sinks: &mut Sinks<'_>) -> Result<RunSummary, FinalizeError> {
        if self.phase == Phase::Finalized {
            return Err(FinalizeError::Finalized);
        }
        let remaining = self.remaining_steps();
        if remaining > 0 {
            return Err(FinalizeError::BudgetRemaining { remaining });
        }

        if !self.persisted {
            sinks.persist(self.field.snapshot())?;
            self.persisted = true;
        }
        sinks.export(self.metrics.records())?;
        self.phase = Phase::Finalized;

        let summary = RunSummary {
            variant: self.variant,
            steps: self.step,
            final_time: self.time,
            wall_time: self.started.map(|t| t.elapsed()).unwrap_or_default(),
            last: self.metrics.last().cloned(),
        };
        match self.metrics.summary() {
            Some(m) => info!(summary = %summary, metrics = %m, "simulation finalized"),
            None => info!(summary = %summary, "simulation finalized"),
        }
        Ok(summary)
    }

    /// Step through the remaining budget, then finalize.
    ///
    /// # Errors
    ///
    /// The first [`StepError`] or [`FinalizeError`]. A failed step aborts
    /// the run before anything is exported.
    pub fn run(&mut self, sinks: &mut Sinks<'_>) -> Result<RunSummary, RunError> {
        info!(
            variant = %self.variant,
            remaining = self.remaining_steps(),
            "run starting"
        );
        while self.step < self.config.total_steps {
            if let Err(e) = self.step() {
                error!(step = self.step + 1, error = %e, "run aborted");
                return Err(e.into());
            }
        }
        Ok(self.finalize(sinks)?)
    }

    /// Configuration this run was built from.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Resolved update rule.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The live field.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Independent copy of the current field.
    pub fn snapshot(&self) -> FieldSnapshot {
        self.field.snapshot()
    }

    /// Simulated time elapsed.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps completed.
    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// Steps left in the budget.
    pub fn remaining_steps(&self) -> u64 {
        self.config.total_steps.saturating_sub(self.step)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Recorded metrics.
    pub fn metrics(&self) -> &MetricsAccumulator {
        &self.metrics
    }

    /// Borrow the frame sink.
    pub fn frame_sink(&self) -> &F {
        &self.frames
    }

    /// Consume the simulation, returning its frame sink.
    pub fn into_frame_sink(self) -> F {
        self.frames
    }
}

impl<F> fmt::Debug for Simulation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("variant", &self.variant)
            .field("dimension", &self.config.dimension)
            .field("grid_size", &self.config.grid_size)
            .field("step", &self.step)
            .field("total_steps", &self.config.total_steps)
            .field("time", &self.time)
            .field("phase", &self.phase)
            .finish()
    }
}
