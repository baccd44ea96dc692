//! Error taxonomy surfaced to the co-simulation framework.

use pfcosim_core::CoreError;
use thiserror::Error;

use crate::engine::{CommandKind, EngineError};

/// Errors raised by setup and step.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Bad or missing configuration. Fatal at setup.
    #[error(transparent)]
    Configuration(#[from] CoreError),

    /// The active study case has no command of the requested kind. Fatal at setup.
    #[error("no {kind} command ({class}) in the active study case", class = .kind.class_name())]
    Resolution {
        kind: CommandKind,
        #[source]
        source: Option<EngineError>,
    },

    /// A solver option could not be applied. Fatal at setup.
    #[error("failed to apply solver option '{name}': {source}")]
    OptionRejected {
        name: String,
        #[source]
        source: EngineError,
    },

    /// The command ran but reported a failure code. Fatal to the current step.
    #[error("calculation {command} failed with result code {code}")]
    SolverExecution { command: String, code: i32 },

    /// An engine call failed outright.
    #[error("engine call {operation} failed: {source}")]
    Engine {
        operation: &'static str,
        #[source]
        source: EngineError,
    },

    /// A step was requested at or before the last completed step.
    #[error("step to {requested}s does not advance past the last completed step at {last_completed}s")]
    TimeRegression { requested: u64, last_completed: u64 },

    /// The call is not allowed in the controller's current state.
    #[error("cannot {operation} while {state}")]
    InvalidState {
        state: &'static str,
        operation: String,
    },
}

impl AdapterError {
    /// Whether the error only fails the current step and leaves the session usable.
    pub fn is_step_failure(&self) -> bool {
        matches!(
            self,
            AdapterError::SolverExecution { .. } | AdapterError::TimeRegression { .. }
        )
    }
}

/// Result type alias for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;
