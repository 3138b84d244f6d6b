//! Periodic lattice topology for Zeno simulations.
//!
//! A [`PeriodicGrid`] is a hypercubic lattice of `extent^dimension` cells
//! (dimension 1, 2, or 3) with wrap-around boundaries on every axis.
//! Cells are stored flat in row-major order: axis 0 varies slowest.
//!
//! Every operator resolves neighbours through this crate, so the
//! periodic indexing rule lives in exactly one place.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;

pub use error::SpaceError;
pub use grid::{PeriodicGrid, MAX_DIMENSION, SUPPORTED_DIMENSIONS};
