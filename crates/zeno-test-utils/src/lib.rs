//! Test fixtures for Zeno development.
//!
//! Provides ready-made configurations, scene initializers, raw field
//! buffers, and sinks that record (or refuse) what a run hands them.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;
