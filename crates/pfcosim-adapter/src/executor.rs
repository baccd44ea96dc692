//! Step executor capability and its load-flow implementation.
//!
//! A solver mode is described by how it finds its command, how it configures
//! it once, and how it runs one step. The controller is generic over this
//! trait, so other modes are additional implementations rather than variants
//! of the load-flow type.

use pfcosim_core::{ExecutionOutcome, SolverOptions};
use tracing::debug;

use crate::configurator::apply_options;
use crate::engine::{CommandHandle, CommandKind, SolverEngine};
use crate::error::{AdapterError, AdapterResult};
use crate::resolver::CommandResolver;
use crate::session::SimulatorSession;

/// One solver mode driven by the step controller.
pub trait StepExecutor<E: SolverEngine> {
    /// Command kind this executor drives.
    fn kind(&self) -> CommandKind;

    /// Resolve (or return the cached) command handle.
    fn resolve_command(&mut self, session: &mut SimulatorSession<E>) -> AdapterResult<CommandHandle>;

    /// Apply solver options once, after the command is resolved.
    fn configure(
        &mut self,
        session: &mut SimulatorSession<E>,
        options: &SolverOptions,
    ) -> AdapterResult<()>;

    /// Execute the command once and classify its result code.
    ///
    /// A failure code is returned as an outcome; `Err` is reserved for the
    /// engine call itself failing.
    fn run_step(&mut self, session: &mut SimulatorSession<E>) -> AdapterResult<ExecutionOutcome>;
}

/// Drives the study case's load-flow command.
#[derive(Debug, Clone)]
pub struct LoadFlowExecutor {
    resolver: CommandResolver,
}

impl LoadFlowExecutor {
    /// Executor with an unresolved load-flow command.
    pub fn new() -> Self {
        Self {
            resolver: CommandResolver::new(CommandKind::LoadFlow),
        }
    }

    /// Handle of the load-flow command once resolved.
    pub fn command(&self) -> Option<CommandHandle> {
        self.resolver.cached()
    }
}

impl Default for LoadFlowExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SolverEngine> StepExecutor<E> for LoadFlowExecutor {
    fn kind(&self) -> CommandKind {
        self.resolver.kind()
    }

    fn resolve_command(&mut self, session: &mut SimulatorSession<E>) -> AdapterResult<CommandHandle> {
        self.resolver.resolve(session)
    }

    fn configure(
        &mut self,
        session: &mut SimulatorSession<E>,
        options: &SolverOptions,
    ) -> AdapterResult<()> {
        let command = self.resolver.resolve(session)?;
        apply_options(session, command, options)
    }

    fn run_step(&mut self, session: &mut SimulatorSession<E>) -> AdapterResult<ExecutionOutcome> {
        let command = self.resolver.resolve(session)?;
        let code = session
            .engine_mut()
            .execute(command)
            .map_err(|source| AdapterError::Engine {
                operation: "execute",
                source,
            })?;

        let outcome = ExecutionOutcome::from_raw(code);
        debug!(code, success = outcome.is_success(), "load flow executed");
        Ok(outcome)
    }
}
