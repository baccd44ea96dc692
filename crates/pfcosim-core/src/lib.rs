//! Core types for the pfcosim load-flow co-simulation adapter.
//!
//! This crate holds everything the step controller needs that does not touch
//! the external engine:
//!
//! - [`config`]: setup options, defaults and validation
//! - [`solver_options`]: ordered solver attribute assignments
//! - [`time`]: elapsed seconds to study-case time
//! - [`outcome`]: classification of raw execution codes
//! - [`meta`]: capability descriptor returned to the framework
//! - [`error`]: configuration and time errors

pub mod config;
pub mod error;
pub mod meta;
pub mod outcome;
pub mod solver_options;
pub mod time;

pub use config::{SimulatorConfig, SimulatorOptions, StepSize, DEFAULT_STEP_SIZE};
pub use error::{CoreError, CoreResult};
pub use meta::{ModelMeta, SimulatorKind, SimulatorMeta, API_VERSION};
pub use outcome::ExecutionOutcome;
pub use solver_options::{AttributeValue, SolverOptions};
pub use time::{CaseTime, TimeTranslator};
