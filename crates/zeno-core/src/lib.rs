//! Core types and traits for the Zeno simulation framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the scalar abstraction shared by every operator ([`Amplitude`]), the
//! dense per-cell buffer ([`FieldValues`]) with its element type tag
//! ([`Dtype`]), the [`Coord`] alias, and field-level error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod amplitude;
pub mod error;
pub mod id;
pub mod values;

pub use amplitude::Amplitude;
pub use error::FieldError;
pub use id::Coord;
pub use num_complex::Complex64;
pub use values::{Dtype, FieldValues};
