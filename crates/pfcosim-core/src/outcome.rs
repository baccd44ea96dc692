//! Classification of raw engine execution codes.

use serde::{Deserialize, Serialize};

/// Raw code the engine returns for a successful command execution.
pub const EXECUTION_SUCCESS_CODE: i32 = 0;

/// Outcome of executing one solver command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// The command completed.
    Ok,
    /// The command reported a failure code.
    ExecutionFailed { code: i32 },
}

impl ExecutionOutcome {
    /// Classify a raw engine code. Anything other than zero is a failure.
    pub fn from_raw(code: i32) -> Self {
        if code == EXECUTION_SUCCESS_CODE {
            ExecutionOutcome::Ok
        } else {
            ExecutionOutcome::ExecutionFailed { code }
        }
    }

    /// Whether the command reported success.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Ok)
    }

    /// The raw code this outcome was built from.
    pub fn code(&self) -> i32 {
        match self {
            ExecutionOutcome::Ok => EXECUTION_SUCCESS_CODE,
            ExecutionOutcome::ExecutionFailed { code } => *code,
        }
    }
}
