//! Error types for stepping, finalizing, and running a simulation.
//!
//! Every variant is fatal to the run that raised it; nothing in the
//! engine retries.

use std::error::Error;
use std::fmt;

use zeno_core::FieldError;
use zeno_operators::OperatorError;

use crate::config::ConfigError;
use crate::sink::SinkError;

/// Errors from [`Simulation::step`](crate::Simulation::step).
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// An operator term failed to evaluate.
    Operator(OperatorError),
    /// The delta did not fit the field.
    Field(FieldError),
    /// Every configured step has already run.
    BudgetExhausted {
        /// The configured step budget.
        total_steps: u64,
    },
    /// The simulation has been finalized.
    Finalized,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator(e) => write!(f, "operator: {e}"),
            Self::Field(e) => write!(f, "field: {e}"),
            Self::BudgetExhausted { total_steps } => {
                write!(f, "step budget of {total_steps} exhausted")
            }
            Self::Finalized => write!(f, "simulation already finalized"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Operator(e) => Some(e),
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<OperatorError> for StepError {
    fn from(e: OperatorError) -> Self {
        Self::Operator(e)
    }
}

impl From<FieldError> for StepError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

/// Errors from [`Simulation::finalize`](crate::Simulation::finalize).
#[derive(Debug)]
pub enum FinalizeError {
    /// Steps remain in the budget.
    BudgetRemaining {
        /// Steps not yet run.
        remaining: u64,
    },
    /// The simulation has already been finalized.
    Finalized,
    /// A sink refused the final snapshot or metrics.
    Sink(SinkError),
}

impl fmt::Display for FinalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetRemaining { remaining } => {
                write!(f, "cannot finalize with {remaining} steps remaining")
            }
            Self::Finalized => write!(f, "simulation already finalized"),
            Self::Sink(e) => write!(f, "sink: {e}"),
        }
    }
}

impl Error for FinalizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sink(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SinkError> for FinalizeError {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}

/// Errors from a whole run: construction, stepping, or finalization.
#[derive(Debug)]
pub enum RunError {
    /// The configuration was rejected before allocation.
    Config(ConfigError),
    /// A step failed; nothing was exported.
    Step(StepError),
    /// Finalization failed.
    Finalize(FinalizeError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Step(e) => write!(f, "step: {e}"),
            Self::Finalize(e) => write!(f, "finalize: {e}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Step(e) => Some(e),
            Self::Finalize(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StepError> for RunError {
    fn from(e: StepError) -> Self {
        Self::Step(e)
    }
}

impl From<FinalizeError> for RunError {
    fn from(e: FinalizeError) -> Self {
        Self::Finalize(e)
    }
}
