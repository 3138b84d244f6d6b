//! Run configuration, validation, and configuration errors.
//!
//! [`SimConfig`] is plain data. External loaders (TOML files, CLI
//! overrides, HTTP payloads) deserialize into it; missing keys take the
//! reference defaults. [`validate()`](SimConfig::validate) checks every
//! structural invariant before anything is allocated.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use zeno_operators::Coefficients;
use zeno_space::{PeriodicGrid, SpaceError, SUPPORTED_DIMENSIONS};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected before a simulation allocates its field.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `dimension` is not 1, 2, or 3.
    UnsupportedDimension {
        /// The rejected dimension.
        dimension: usize,
    },
    /// The operator/mode pair has no matching variant.
    UnsupportedConfiguration {
        /// Configured operator name.
        operator: String,
        /// Configured mode name.
        mode: String,
    },
    /// `grid_size` is zero.
    InvalidGridSize {
        /// The configured size.
        grid_size: usize,
    },
    /// `time_step` is NaN, infinite, zero, or negative.
    InvalidTimeStep {
        /// The invalid value.
        value: f64,
    },
    /// `total_steps` is zero.
    InvalidTotalSteps,
    /// A composite coefficient is not finite.
    InvalidCoefficient {
        /// Coefficient name (`lambda`, `kappa`, or `beta`).
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// `grid_size^dimension` does not fit in `usize`.
    GridTooLarge {
        /// The configured size.
        grid_size: usize,
        /// The configured dimension.
        dimension: usize,
    },
    /// No scene initializer is registered under this name.
    UnknownScene {
        /// The requested scene.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedDimension { dimension } => {
                write!(f, "unsupported dimension {dimension}, expected 1, 2, or 3")
            }
            Self::UnsupportedConfiguration { operator, mode } => {
                write!(
                    f,
                    "unsupported configuration: operator={operator}, mode={mode}"
                )
            }
            Self::InvalidGridSize { grid_size } => {
                write!(f, "grid_size must be at least 1, got {grid_size}")
            }
            Self::InvalidTimeStep { value } => {
                write!(f, "time_step must be finite and positive, got {value}")
            }
            Self::InvalidTotalSteps => write!(f, "total_steps must be at least 1"),
            Self::InvalidCoefficient { name, value } => {
                write!(f, "coefficient {name} must be finite, got {value}")
            }
            Self::GridTooLarge {
                grid_size,
                dimension,
            } => {
                write!(f, "grid {grid_size}^{dimension} overflows the cell count")
            }
            Self::UnknownScene { name } => write!(f, "unknown scene: {name}"),
        }
    }
}

impl Error for ConfigError {}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for one simulation run.
///
/// Every field has a reference default, so `SimConfig::default()` is a
/// runnable 2D PGNS configuration and partial documents deserialize
/// cleanly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of grid axes (1, 2, or 3). Default: 2.
    pub dimension: usize,
    /// Cells per axis. Default: 128.
    pub grid_size: usize,
    /// Simulated time advanced per step. Default: 0.01.
    pub time_step: f64,
    /// Step budget. Default: 1000.
    pub total_steps: u64,
    /// Operator name, case-insensitive (`pgns`, `rehte`). Default: `pgns`.
    pub operator: String,
    /// Mode name, case-insensitive (`symbolic`, `classical`). Default: `symbolic`.
    pub mode: String,
    /// Scene initializer name. Default: `RTI_2D`.
    pub scene: String,
    /// Torsion weight `λ`. Default: 0.4.
    pub lambda: f64,
    /// Nonlinear weight `κ`. Default: 0.9.
    pub kappa: f64,
    /// Entropy weight `β`. Default: 0.3.
    pub beta: f64,
    /// Force the classical baseline regardless of operator and mode.
    pub classical: bool,
    /// Record one metrics entry per step. Default: true.
    pub record_metrics: bool,
    /// Hand a snapshot to the frame sink each step (1D and 2D only). Default: true.
    pub render_frames: bool,
    /// Log a progress line every `progress_interval` steps. Default: true.
    pub show_progress: bool,
    /// Steps between progress lines; 0 disables them. Default: 100.
    pub progress_interval: u64,
    /// Seed for scenes that inject noise. Default: 0.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dimension: 2,
            grid_size: 128,
            time_step: 0.01,
            total_steps: 1000,
            operator: "pgns".to_string(),
            mode: "symbolic".to_string(),
            scene: "RTI_2D".to_string(),
            lambda: Coefficients::DEFAULT_LAMBDA,
            kappa: Coefficients::DEFAULT_KAPPA,
            beta: Coefficients::DEFAULT_BETA,
            classical: false,
            record_metrics: true,
            render_frames: true,
            show_progress: true,
            progress_interval: 100,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Validate all structural invariants.
    ///
    /// Does not resolve the operator/mode pair; see
    /// [`resolve_variant`](crate::controller::resolve_variant).
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Dimension in {1, 2, 3}.
        if !SUPPORTED_DIMENSIONS.contains(&self.dimension) {
            return Err(ConfigError::UnsupportedDimension {
                dimension: self.dimension,
            });
        }
        // 2. Non-empty grid whose cell count fits in usize.
        if self.grid_size == 0 {
            return Err(ConfigError::InvalidGridSize {
                grid_size: self.grid_size,
            });
        }
        self.grid()?;
        // 3. Positive, finite time step.
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(ConfigError::InvalidTimeStep {
                value: self.time_step,
            });
        }
        // 4. At least one step.
        if self.total_steps == 0 {
            return Err(ConfigError::InvalidTotalSteps);
        }
        // 5. Finite coefficients.
        for (name, value) in [
            ("lambda", self.lambda),
            ("kappa", self.kappa),
            ("beta", self.beta),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidCoefficient { name, value });
            }
        }
        Ok(())
    }

    /// The periodic grid this configuration describes.
    pub fn grid(&self) -> Result<PeriodicGrid, ConfigError> {
        PeriodicGrid::new(self.dimension, self.grid_size).map_err(|e| match e {
            SpaceError::UnsupportedDimension { dimension } => {
                ConfigError::UnsupportedDimension { dimension }
            }
            SpaceError::EmptySpace => ConfigError::InvalidGridSize {
                grid_size: self.grid_size,
            },
            _ => ConfigError::GridTooLarge {
                grid_size: self.grid_size,
                dimension: self.dimension,
            },
        })
    }

    /// Composite weights `(λ, κ, β)`.
    pub fn coefficients(&self) -> Coefficients {
        Coefficients {
            lambda: self.lambda,
            kappa: self.kappa,
            beta: self.beta,
        }
    }
}
