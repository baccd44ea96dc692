//! One-time application of solver options onto the resolved command.

use pfcosim_core::SolverOptions;
use tracing::debug;

use crate::engine::{CommandHandle, SolverEngine};
use crate::error::{AdapterError, AdapterResult};
use crate::session::SimulatorSession;

/// Apply every option to `command` in declaration order.
///
/// Stops at the first rejected assignment; options already applied are not
/// rolled back and setup is treated as failed.
pub fn apply_options<E: SolverEngine>(
    session: &mut SimulatorSession<E>,
    command: CommandHandle,
    options: &SolverOptions,
) -> AdapterResult<()> {
    for (name, value) in options.iter() {
        session
            .engine_mut()
            .set_attribute(command, name, value)
            .map_err(|source| AdapterError::OptionRejected {
                name: name.to_string(),
                source,
            })?;
        debug!(option = name, %value, "solver option applied");
    }
    Ok(())
}
