//! Named scene initializers.
//!
//! A scene writes a field's starting values. The registry maps names to
//! plain function pointers taking the field and a noise seed, so lookups
//! happen (and unknown names fail) before anything is allocated.
//!
//! | Scene | Initial values |
//! |---|---|
//! | `RTI_2D` | `−1` / `+1` halves along axis 1 (axis 0 in 1D) plus `N(0, 0.05²)` noise |
//! | `Pulse_1D` | `exp(−100·x²)` over the last axis, `x ∈ [−1, 1]` |
//! | `Checkerboard_2D` | `(−1)^(Σ coords)` |
//! | `Pulse_3D` | `exp(−50·r²)`, `r² = Σ x_axis²` |

use std::f64::consts::TAU;

use indexmap::IndexMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::ConfigError;
use crate::field::Field;

/// A scene initializer: writes starting values, drawing any noise from
/// `seed`.
pub type SceneFn = fn(&mut Field, u64);

/// Standard deviation of the noise added by `RTI_2D`.
pub const RTI_NOISE_STD: f64 = 0.05;

/// Ordered map from scene name to initializer.
#[derive(Clone, Debug, Default)]
pub struct SceneRegistry {
    scenes: IndexMap<String, SceneFn>,
}

impl SceneRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The four stock scenes.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("RTI_2D", rti_2d);
        registry.register("Pulse_1D", pulse_1d);
        registry.register("Checkerboard_2D", checkerboard);
        registry.register("Pulse_3D", pulse_3d);
        registry
    }

    /// Add or replace a scene. Replacing keeps the original position.
    pub fn register(&mut self, name: impl Into<String>, init: SceneFn) {
        self.scenes.insert(name.into(), init);
    }

    /// Look up a scene by exact name.
    pub fn get(&self, name: &str) -> Option<SceneFn> {
        self.scenes.get(name).copied()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// `true` if no scenes are registered.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// A one-shot initializer for `name` bound to `seed`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownScene`] if `name` is not registered.
    pub fn initializer(&self, name: &str, seed: u64) -> Result<impl FnOnce(&mut Field), ConfigError> {
        let init = self.get(name).ok_or_else(|| ConfigError::UnknownScene {
            name: name.to_string(),
        })?;
        Ok(move |field: &mut Field| init(field, seed))
    }
}

/// `n` evenly spaced points on `[−1, 1]`; a single point sits at `−1`.
fn linspace(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![-1.0];
    }
    let step = 2.0 / (n - 1) as f64;
    (0..n).map(|i| -1.0 + i as f64 * step).collect()
}

/// One standard-normal draw (Box–Muller, cosine branch).
fn standard_normal(rng: &mut ChaCha8Rng) -> f64 {
    // 1 - [0, 1) keeps the log argument away from zero.
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Axis `RTI_2D` splits along.
pub const RTI_SPLIT_AXIS: usize = 1;

/// Rayleigh–Taylor setup: a sharp interface across axis
/// [`RTI_SPLIT_AXIS`], or axis 0 for a 1D field.
pub fn rti_2d(field: &mut Field, seed: u64) {
    let axis = RTI_SPLIT_AXIS.min(field.dimension() - 1);
    let mid = field.grid_size() / 2;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    field.fill_real(|c| {
        let base = if c[axis] < mid { -1.0 } else { 1.0 };
        base + RTI_NOISE_STD * standard_normal(&mut rng)
    });
}

/// Narrow Gaussian pulse along the last axis.
pub fn pulse_1d(field: &mut Field, _seed: u64) {
    let x = linspace(field.grid_size());
    let axis = field.dimension() - 1;
    field.fill_real(|c| (-100.0 * x[c[axis]] * x[c[axis]]).exp());
}

/// Alternating `+1` / `−1` cells.
pub fn checkerboard(field: &mut Field, _seed: u64) {
    field.fill_real(|c| {
        if c.iter().sum::<usize>() % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    });
}

/// Radially symmetric Gaussian pulse centred on the grid.
pub fn pulse_3d(field: &mut Field, _seed: u64) {
    let x = linspace(field.grid_size());
    field.fill_real(|c| {
        let r2: f64 = c.iter().map(|&i| x[i] * x[i]).sum();
        (-50.0 * r2).exp()
    });
}
