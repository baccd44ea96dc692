//! Lookup and caching of the command object driven on every step.

use tracing::debug;

use crate::engine::{CommandHandle, CommandKind, SolverEngine};
use crate::error::{AdapterError, AdapterResult};
use crate::session::SimulatorSession;

/// Resolves the command of one kind once and hands out the cached handle after.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    kind: CommandKind,
    cached: Option<CommandHandle>,
}

impl CommandResolver {
    /// Resolver for `kind` with nothing cached yet.
    pub fn new(kind: CommandKind) -> Self {
        Self { kind, cached: None }
    }

    /// Kind of command this resolver looks up.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// The handle, if it has been resolved.
    pub fn cached(&self) -> Option<CommandHandle> {
        self.cached
    }

    /// Return the cached handle, querying the engine only on first use.
    pub fn resolve<E: SolverEngine>(
        &mut self,
        session: &mut SimulatorSession<E>,
    ) -> AdapterResult<CommandHandle> {
        if let Some(handle) = self.cached {
            return Ok(handle);
        }

        let handle = session
            .engine_mut()
            .resolve_command(self.kind)
            .map_err(|source| AdapterError::Resolution {
                kind: self.kind,
                source: Some(source),
            })?
            .ok_or(AdapterError::Resolution {
                kind: self.kind,
                source: None,
            })?;

        debug!(
            class = self.kind.class_name(),
            name = %session.engine().command_name(handle),
            "command resolved"
        );
        self.cached = Some(handle);
        Ok(handle)
    }
}
