//! Outbound interface to the external power-flow engine.
//!
//! The engine itself (project database, study cases, numerical load flow) lives
//! outside this crate. Bindings implement [`SolverEngine`]; the adapter only
//! ever talks to the engine through it.

use std::fmt;

use pfcosim_core::{AttributeValue, CaseTime};

/// Error reported by an engine binding.
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for engine calls.
pub type EngineResult<T> = Result<T, EngineError>;

/// Kind of execution command stored in a study case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Load-flow calculation command.
    LoadFlow,
}

impl CommandKind {
    /// Engine class name of the command object.
    pub fn class_name(&self) -> &'static str {
        match self {
            CommandKind::LoadFlow => "ComLdf",
        }
    }

    /// Calculation name used in log messages.
    pub fn calculation(&self) -> &'static str {
        match self {
            CommandKind::LoadFlow => "load flow",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::LoadFlow => write!(f, "load-flow"),
        }
    }
}

/// Opaque handle to a command object inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandHandle(u64);

impl CommandHandle {
    /// Wrap an engine-assigned identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Engine-assigned identifier.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Operations the adapter needs from an engine binding.
///
/// All calls are blocking. The adapter serializes them; a binding never sees
/// two calls at once.
pub trait SolverEngine {
    /// Activate the named project.
    fn activate_project(&mut self, project: &str) -> EngineResult<()>;

    /// Activate a study case of the active project.
    fn activate_study_case(&mut self, study_case: &str) -> EngineResult<()>;

    /// Look up the command of the given kind in the active study case.
    ///
    /// Returns `Ok(None)` when the study case has no such object.
    fn resolve_command(&mut self, kind: CommandKind) -> EngineResult<Option<CommandHandle>>;

    /// Assign one attribute on a command object.
    fn set_attribute(
        &mut self,
        command: CommandHandle,
        name: &str,
        value: &AttributeValue,
    ) -> EngineResult<()>;

    /// Set the date-time of the active study case.
    fn set_case_time(&mut self, time: CaseTime) -> EngineResult<()>;

    /// Execute a command and return the engine's raw result code.
    fn execute(&mut self, command: CommandHandle) -> EngineResult<i32>;

    /// Human-readable name of a command, used in diagnostics.
    fn command_name(&self, command: CommandHandle) -> String;
}
