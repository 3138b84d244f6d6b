//! Benchmark profiles for the Zeno simulation framework.
//!
//! Provides pre-built [`SimConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 128x128 PGNS run seeded with `RTI_2D`
//! - [`stress_profile`]: 512x512 PGNS run (~262K cells)
//! - [`volume_profile`]: 32^3 REHTE run seeded with `Pulse_3D`
//! - [`classical_profile`]: 128x128 classical diffusion
//!
//! Every profile disables progress logging and frames, and carries a
//! step budget large enough that a benchmark loop never exhausts it.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use zeno_engine::{ConfigError, SceneRegistry, SimConfig, Simulation};

/// Step budget for every profile.
pub const BENCH_STEP_BUDGET: u64 = u64::MAX;

fn profile(dimension: usize, grid_size: usize, operator: &str, scene: &str, seed: u64) -> SimConfig {
    SimConfig {
        dimension,
        grid_size,
        total_steps: BENCH_STEP_BUDGET,
        operator: operator.to_string(),
        mode: "symbolic".to_string(),
        scene: scene.to_string(),
        record_metrics: false,
        render_frames: false,
        show_progress: false,
        seed,
        ..SimConfig::default()
    }
}

/// 128x128 PGNS on the Rayleigh–Taylor scene (16K cells).
pub fn reference_profile(seed: u64) -> SimConfig {
    profile(2, 128, "pgns", "RTI_2D", seed)
}

/// Same pipeline as [`reference_profile`] at 16x the cell count.
pub fn stress_profile(seed: u64) -> SimConfig {
    profile(2, 512, "pgns", "RTI_2D", seed)
}

/// 32^3 REHTE on the radial pulse (32K cells).
pub fn volume_profile(seed: u64) -> SimConfig {
    profile(3, 32, "rehte", "Pulse_3D", seed)
}

/// 128x128 classical diffusion on the Rayleigh–Taylor scene.
pub fn classical_profile(seed: u64) -> SimConfig {
    SimConfig {
        mode: "classical".to_string(),
        ..reference_profile(seed)
    }
}

/// Build a simulation from `config`, initialized from its named scene.
pub fn build(config: SimConfig) -> Result<Simulation, ConfigError> {
    let init = SceneRegistry::standard().initializer(&config.scene, config.seed)?;
    Simulation::new(config, init)
}
