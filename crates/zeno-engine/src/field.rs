//! The [`Field`] container and its detached [`FieldSnapshot`].

use serde::{Deserialize, Serialize};
use zeno_core::{Complex64, Coord, Dtype, FieldError, FieldValues};
use zeno_space::PeriodicGrid;

use crate::config::{ConfigError, SimConfig};

/// A dense field on a periodic grid.
///
/// Shape and dtype are fixed at construction. The buffer is only ever
/// mutated by the initializer (once, before the first step) and by
/// [`apply_delta`](Field::apply_delta).
#[derive(Clone, Debug)]
pub struct Field {
    grid: PeriodicGrid,
    values: FieldValues,
    time_step: f64,
}

impl Field {
    /// Allocate a zero-filled field for `config` and run `initializer`
    /// on it exactly once.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `config` does not describe a valid grid.
    pub fn initialize<I>(config: &SimConfig, dtype: Dtype, initializer: I) -> Result<Self, ConfigError>
    where
        I: FnOnce(&mut Field),
    {
        let grid = config.grid()?;
        let mut field = Self {
            values: FieldValues::zeros(dtype, grid.cell_count()),
            grid,
            time_step: config.time_step,
        };
        initializer(&mut field);
        Ok(field)
    }

    /// In-place `values += delta * dt`.
    ///
    /// # Errors
    ///
    /// [`FieldError::ShapeMismatch`] or [`FieldError::DtypeMismatch`].
    /// The field is left untouched on error.
    pub fn apply_delta(&mut self, delta: &FieldValues, dt: f64) -> Result<(), FieldError> {
        self.values.add_scaled(delta, dt)
    }

    /// Independent copy of the current state.
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            dimension: self.grid.dimension(),
            grid_size: self.grid.extent(),
            values: self.values.clone(),
        }
    }

    /// Set every cell from its coordinate. Complex fields get a zero
    /// imaginary part.
    pub fn fill_real<F>(&mut self, mut f: F)
    where
        F: FnMut(&Coord) -> f64,
    {
        self.update_real(|coord, _| f(coord));
    }

    /// Replace every cell with `f(coord, current real part)`, in flat
    /// index order. Complex fields get a zero imaginary part.
    pub fn update_real<F>(&mut self, mut f: F)
    where
        F: FnMut(&Coord, f64) -> f64,
    {
        let grid = &self.grid;
        match &mut self.values {
            FieldValues::Real(v) => {
                for (i, x) in v.iter_mut().enumerate() {
                    *x = f(&grid.coord(i), *x);
                }
            }
            FieldValues::Complex(v) => {
                for (i, z) in v.iter_mut().enumerate() {
                    *z = Complex64::new(f(&grid.coord(i), z.re), 0.0);
                }
            }
        }
    }

    /// Set one cell. Returns `false` if `index` is out of range.
    pub fn set_real(&mut self, index: usize, value: f64) -> bool {
        match &mut self.values {
            FieldValues::Real(v) => v.get_mut(index).map(|x| *x = value).is_some(),
            FieldValues::Complex(v) => v
                .get_mut(index)
                .map(|z| *z = Complex64::new(value, 0.0))
                .is_some(),
        }
    }

    /// The grid this field lives on.
    pub fn grid(&self) -> &PeriodicGrid {
        &self.grid
    }

    /// Number of axes.
    pub fn dimension(&self) -> usize {
        self.grid.dimension()
    }

    /// Cells per axis.
    pub fn grid_size(&self) -> usize {
        self.grid.extent()
    }

    /// Element type.
    pub fn dtype(&self) -> Dtype {
        self.values.dtype()
    }

    /// Borrow the live buffer.
    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Configured time step.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }
}

/// A detached copy of a field, handed to sinks.
///
/// Owns its buffer; nothing a consumer does to it reaches the live
/// simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// Number of axes.
    pub dimension: usize,
    /// Cells per axis.
    pub grid_size: usize,
    /// Row-major cell values.
    pub values: FieldValues,
}

impl FieldSnapshot {
    /// Shape as one extent per axis.
    pub fn shape(&self) -> Vec<usize> {
        vec![self.grid_size; self.dimension]
    }

    /// Element type.
    pub fn dtype(&self) -> Dtype {
        self.values.dtype()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` if there are no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take ownership of the buffer.
    pub fn into_values(self) -> FieldValues {
        self.values
    }
}
