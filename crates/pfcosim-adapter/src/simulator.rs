//! Framework-facing simulator: `setup` once, then `step` until the end.

use pfcosim_core::{CoreError, SimulatorMeta, SimulatorOptions};
use tracing::{debug, field, info_span, Span};

use crate::controller::{ControllerState, StepController};
use crate::engine::SolverEngine;
use crate::error::{AdapterError, AdapterResult};
use crate::executor::{LoadFlowExecutor, StepExecutor};
use crate::session::SimulatorSession;

/// Simulator driving the load-flow command.
pub type LoadFlowSimulator<E> = Simulator<E, LoadFlowExecutor>;

/// Adapter between the co-simulation framework and one engine.
pub struct Simulator<E, X> {
    engine: Option<E>,
    controller: StepController<E, X>,
    meta: Option<SimulatorMeta>,
}

impl<E: SolverEngine> Simulator<E, LoadFlowExecutor> {
    /// Load-flow simulator logging into a fresh `pfcosim` span.
    pub fn load_flow(engine: E) -> Self {
        Self::with_span(engine, LoadFlowExecutor::new(), default_span())
    }
}

impl<E, X> Simulator<E, X>
where
    E: SolverEngine,
    X: StepExecutor<E>,
{
    /// Build a simulator whose controller logs inside `span`.
    ///
    /// If the span declares a `sid` field it is filled in at setup.
    pub fn with_span(engine: E, executor: X, span: Span) -> Self {
        Self {
            engine: Some(engine),
            controller: StepController::new(executor, span),
            meta: None,
        }
    }

    /// Activate the project, resolve and configure the command.
    ///
    /// Returns the meta descriptor for the framework.
    pub fn setup(
        &mut self,
        sid: &str,
        project_name: &str,
        options: Option<SimulatorOptions>,
    ) -> AdapterResult<SimulatorMeta> {
        if sid.trim().is_empty() {
            return Err(CoreError::Configuration("simulator id must not be empty".to_string()).into());
        }
        if project_name.trim().is_empty() {
            return Err(CoreError::Configuration("project name must not be empty".to_string()).into());
        }
        let config = options.unwrap_or_default().validate()?;

        let state = self.controller.state();
        let engine = self.engine.take().ok_or_else(|| AdapterError::InvalidState {
            state: state.as_str(),
            operation: match state {
                // The engine went down with the session of a failed setup.
                ControllerState::Uninitialized => "retry a failed setup".to_string(),
                _ => "set up".to_string(),
            },
        })?;

        let span = self.controller.span().clone();
        span.record("sid", sid);
        let session = span.in_scope(|| {
            SimulatorSession::open(engine, project_name, config.study_case.as_deref())
        })?;

        let step_size = config.step_size.seconds();
        let study_case = config.study_case.clone();
        self.controller.setup(session, config)?;

        let kind = self.controller.executor().kind();
        span.in_scope(|| {
            debug!("{} will be calculated every {} seconds", kind.calculation(), step_size);
        });

        let meta = SimulatorMeta::time_based(
            sid,
            project_name,
            study_case,
            step_size,
            kind.class_name(),
        );
        self.meta = Some(meta.clone());
        Ok(meta)
    }

    /// Advance to `elapsed_seconds`; returns the next time to be stepped at.
    pub fn step(&mut self, elapsed_seconds: u64) -> AdapterResult<u64> {
        self.controller.step(elapsed_seconds)
    }

    /// Tear down and return the engine, if the simulator still owns one.
    pub fn terminate(&mut self) -> Option<E> {
        let session = self.controller.terminate();
        session
            .map(SimulatorSession::into_engine)
            .or_else(|| self.engine.take())
    }

    /// Current controller state.
    pub fn state(&self) -> ControllerState {
        self.controller.state()
    }

    /// Meta descriptor returned by the last successful setup.
    pub fn meta(&self) -> Option<&SimulatorMeta> {
        self.meta.as_ref()
    }

    /// The step controller, for inspection.
    pub fn controller(&self) -> &StepController<E, X> {
        &self.controller
    }
}

fn default_span() -> Span {
    info_span!("pfcosim", sid = field::Empty)
}
