//! Partition-geometry operators for the Zeno simulation framework.
//!
//! Every operator reads a flat field buffer on a [`PeriodicGrid`] and
//! returns a freshly allocated buffer of the same length and element
//! type. Inputs are never mutated, so all per-cell kernels are free to
//! run in parallel.
//!
//! # Operators
//!
//! | Operator | Uses the partition table | Neighbour access |
//! |---|---|---|
//! | [`curvature()`] | yes | all `2·dim` neighbours |
//! | [`torsion()`] | yes | forward minus backward, per axis |
//! | [`nonlinear()`] | no | none (`|v|²·v`) |
//! | [`entropy()`] | no | raw central differences |
//! | [`laplacian()`] | no | all `2·dim` neighbours |
//!
//! [`composite`] assembles these into the per-step deltas of the PGNS,
//! REHTE, and classical update rules.
//!
//! [`PeriodicGrid`]: zeno_space::PeriodicGrid

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod composite;
pub mod curvature;
pub mod entropy;
pub mod error;
pub(crate) mod kernel;
pub mod laplacian;
pub mod nonlinear;
pub mod partition;
pub mod quantize;
pub mod torsion;

pub use composite::{Coefficients, Composite, TermKind};
pub use curvature::{curvature, curvature_on};
pub use entropy::{entropy, entropy_on};
pub use error::OperatorError;
pub use kernel::PARALLEL_THRESHOLD;
pub use laplacian::{laplacian, laplacian_on};
pub use nonlinear::{nonlinear, nonlinear_on};
pub use partition::{partition_count, PartitionMemo, PartitionTable, MAX_EXACT_N, MEMO_CAPACITY};
pub use quantize::{partition_weights, quantize, MAX_N, SCALE};
pub use torsion::{torsion, torsion_on};
