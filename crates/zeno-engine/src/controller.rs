//! Variant selection and whole-run entry points.

use tracing::info;

use crate::config::{ConfigError, SimConfig};
use crate::error::RunError;
use crate::field::Field;
use crate::scene::SceneRegistry;
use crate::simulation::{RunSummary, Simulation};
use crate::sink::{FrameSink, Sinks};
use crate::variant::Variant;

/// Resolve the update rule named by `config.operator` and `config.mode`.
///
/// Names are compared case-insensitively:
///
/// | operator | mode | variant |
/// |---|---|---|
/// | `pgns` | `symbolic` | [`Variant::Pgns`] |
/// | `rehte` | `symbolic` | [`Variant::Rehte`] |
/// | any | `classical` | [`Variant::Classical`] |
///
/// Setting `config.classical` selects [`Variant::Classical`] regardless.
///
/// # Errors
///
/// [`ConfigError::UnsupportedConfiguration`] for any other pair.
pub fn resolve_variant(config: &SimConfig) -> Result<Variant, ConfigError> {
    if config.classical {
        return Ok(Variant::Classical);
    }
    let operator = config.operator.to_lowercase();
    let mode = config.mode.to_lowercase();
    match (operator.as_str(), mode.as_str()) {
        ("pgns", "symbolic") => Ok(Variant::Pgns(config.coefficients())),
        ("rehte", "symbolic") => Ok(Variant::Rehte(config.coefficients())),
        (_, "classical") => Ok(Variant::Classical),
        _ => Err(ConfigError::UnsupportedConfiguration { operator, mode }),
    }
}

/// Build, run, and finalize a simulation in one call.
///
/// # Errors
///
/// [`RunError::Config`] before anything is allocated, otherwise the
/// first step or finalization error.
pub fn run_simulation<I, F>(
    config: SimConfig,
    initializer: I,
    frames: F,
    sinks: &mut Sinks<'_>,
) -> Result<RunSummary, RunError>
where
    I: FnOnce(&mut Field),
    F: FrameSink,
{
    let mut sim = Simulation::new(config, initializer)?.with_frame_sink(frames);
    let summary = sim.run(sinks)?;
    info!(summary = %summary, "run complete");
    Ok(summary)
}

/// [`run_simulation`] with the initializer looked up from `registry`
/// by `config.scene`, seeded from `config.seed`.
///
/// # Errors
///
/// [`ConfigError::UnknownScene`] (as [`RunError::Config`]) before
/// anything is allocated, otherwise as [`run_simulation`].
pub fn run_scene<F: FrameSink>(
    config: SimConfig,
    registry: &SceneRegistry,
    frames: F,
    sinks: &mut Sinks<'_>,
) -> Result<RunSummary, RunError> {
    let initializer = registry.initializer(&config.scene, config.seed)?;
    run_simulation(config, initializer, frames, sinks)
}
