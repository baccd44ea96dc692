//! Step controller: the per-step protocol between framework and engine.
//!
//! ```text
//! Uninitialized --setup--> Configured --step--> Stepping --step--> Stepping
//!                                                   |
//!                                               terminate
//!                                                   v
//!                                              Terminated
//! ```
//!
//! Each step translates the requested time, applies it as case time, executes
//! the command exactly once and classifies the result. A failed step leaves the
//! last completed time untouched.

use std::fmt;

use pfcosim_core::{CoreError, ExecutionOutcome, SimulatorConfig, TimeTranslator};
use tracing::{debug, error, info, Span};

use crate::engine::SolverEngine;
use crate::error::{AdapterError, AdapterResult};
use crate::executor::StepExecutor;
use crate::session::SimulatorSession;

/// Lifecycle state of a [`StepController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    Uninitialized,
    Configured,
    Stepping,
    Terminated,
}

impl ControllerState {
    /// Lowercase name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerState::Uninitialized => "uninitialized",
            ControllerState::Configured => "configured",
            ControllerState::Stepping => "stepping",
            ControllerState::Terminated => "terminated",
        }
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drives one executor against one session.
pub struct StepController<E, X> {
    executor: X,
    state: ControllerState,
    session: Option<SimulatorSession<E>>,
    config: Option<SimulatorConfig>,
    translator: TimeTranslator,
    last_completed: Option<u64>,
    completed_steps: u64,
    span: Span,
}

impl<E, X> StepController<E, X>
where
    E: SolverEngine,
    X: StepExecutor<E>,
{
    /// Create a controller that logs inside `span`.
    pub fn new(executor: X, span: Span) -> Self {
        Self {
            executor,
            state: ControllerState::Uninitialized,
            session: None,
            config: None,
            translator: TimeTranslator::default(),
            last_completed: None,
            completed_steps: 0,
            span,
        }
    }

    /// Resolve the command and apply solver options.
    ///
    /// On failure the session is dropped and the controller stays
    /// uninitialized.
    pub fn setup(
        &mut self,
        mut session: SimulatorSession<E>,
        config: SimulatorConfig,
    ) -> AdapterResult<()> {
        let span = self.span.clone();
        let _entered = span.enter();

        if self.state != ControllerState::Uninitialized {
            return Err(self.invalid_state("set up"));
        }

        let command = self.executor.resolve_command(&mut session)?;
        self.executor
            .configure(&mut session, &config.solver_options)?;

        info!(
            kind = %self.executor.kind(),
            command = %session.engine().command_name(command),
            options = config.solver_options.len(),
            step_size = config.step_size.seconds(),
            "controller configured"
        );

        self.translator = config.time_translator();
        self.config = Some(config);
        self.session = Some(session);
        self.state = ControllerState::Configured;
        Ok(())
    }

    /// Run one step at `elapsed_seconds` and return the next requested time.
    pub fn step(&mut self, elapsed_seconds: u64) -> AdapterResult<u64> {
        let span = self.span.clone();
        let _entered = span.enter();

        if !matches!(
            self.state,
            ControllerState::Configured | ControllerState::Stepping
        ) {
            return Err(self.invalid_state(format!("step to {}s", elapsed_seconds)));
        }

        if let Some(last_completed) = self.last_completed {
            if elapsed_seconds <= last_completed {
                return Err(AdapterError::TimeRegression {
                    requested: elapsed_seconds,
                    last_completed,
                });
            }
        }

        let step_size = self.step_size_seconds();
        let case_time = self.translator.translate(elapsed_seconds)?;
        let next_time = elapsed_seconds.checked_add(step_size).ok_or_else(|| {
            CoreError::TimeOutOfRange {
                reference: self.translator.reference(),
                elapsed_seconds,
            }
        })?;

        let state = self.state;
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| AdapterError::InvalidState {
                state: state.as_str(),
                operation: "step without a session".to_string(),
            })?;

        session.set_case_time(case_time)?;
        debug!(elapsed = elapsed_seconds, %case_time, "case time applied");

        match self.executor.run_step(session)? {
            ExecutionOutcome::Ok => {}
            ExecutionOutcome::ExecutionFailed { code } => {
                let command = self.executor.resolve_command(session)?;
                let name = session.engine().command_name(command);
                error!(command = %name, code, elapsed = elapsed_seconds, "calculation failed");
                return Err(AdapterError::SolverExecution {
                    command: name,
                    code,
                });
            }
        }

        self.last_completed = Some(elapsed_seconds);
        self.completed_steps += 1;
        self.state = ControllerState::Stepping;
        debug!(elapsed = elapsed_seconds, next = next_time, "step completed");
        Ok(next_time)
    }

    /// End the session and hand the engine session back to its owner.
    pub fn terminate(&mut self) -> Option<SimulatorSession<E>> {
        let _entered = self.span.enter();
        if self.state != ControllerState::Terminated {
            info!(steps = self.completed_steps, "controller terminated");
        }
        self.state = ControllerState::Terminated;
        self.session.take()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Configuration accepted at setup.
    pub fn config(&self) -> Option<&SimulatorConfig> {
        self.config.as_ref()
    }

    /// The owned engine session, if set up and not terminated.
    pub fn session(&self) -> Option<&SimulatorSession<E>> {
        self.session.as_ref()
    }

    /// The executor driving each step.
    pub fn executor(&self) -> &X {
        &self.executor
    }

    /// Time of the last step that completed successfully.
    pub fn last_completed(&self) -> Option<u64> {
        self.last_completed
    }

    /// Number of steps that completed successfully.
    pub fn completed_steps(&self) -> u64 {
        self.completed_steps
    }

    /// Span every controller event is emitted in.
    pub fn span(&self) -> &Span {
        &self.span
    }

    fn step_size_seconds(&self) -> u64 {
        self.config
            .as_ref()
            .map(|config| config.step_size.seconds())
            .unwrap_or_default()
    }

    fn invalid_state(&self, operation: impl Into<String>) -> AdapterError {
        AdapterError::InvalidState {
            state: self.state.as_str(),
            operation: operation.into(),
        }
    }
}
