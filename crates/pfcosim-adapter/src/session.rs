//! Live connection to the engine and its active project.

use pfcosim_core::CaseTime;
use tracing::debug;

use crate::engine::SolverEngine;
use crate::error::{AdapterError, AdapterResult};

/// The engine plus the project and study case it has activated.
///
/// Owned by exactly one controller for its whole lifetime.
#[derive(Debug)]
pub struct SimulatorSession<E> {
    engine: E,
    project: String,
    study_case: Option<String>,
}

impl<E: SolverEngine> SimulatorSession<E> {
    /// Activate `project` (and `study_case`, if given) on the engine.
    pub fn open(mut engine: E, project: &str, study_case: Option<&str>) -> AdapterResult<Self> {
        engine
            .activate_project(project)
            .map_err(|source| AdapterError::Engine {
                operation: "activate_project",
                source,
            })?;
        debug!(project, "project activated");

        if let Some(case) = study_case {
            engine
                .activate_study_case(case)
                .map_err(|source| AdapterError::Engine {
                    operation: "activate_study_case",
                    source,
                })?;
            debug!(study_case = case, "study case activated");
        }

        Ok(Self {
            engine,
            project: project.to_string(),
            study_case: study_case.map(str::to_string),
        })
    }

    /// Apply case time to the active study case.
    pub fn set_case_time(&mut self, time: CaseTime) -> AdapterResult<()> {
        self.engine
            .set_case_time(time)
            .map_err(|source| AdapterError::Engine {
                operation: "set_case_time",
                source,
            })
    }

    /// Shared access to the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Exclusive access to the engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Name of the active project.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Study case activated at open, if any.
    pub fn study_case(&self) -> Option<&str> {
        self.study_case.as_deref()
    }

    /// Give the engine back, ending the session.
    pub fn into_engine(self) -> E {
        self.engine
    }
}
