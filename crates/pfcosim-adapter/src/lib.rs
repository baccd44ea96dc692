//! Co-simulation adapter for an external load-flow engine.
//!
//! The framework calls [`Simulator::setup`] once and then [`Simulator::step`]
//! with increasing elapsed times. Each step sets the study-case time, runs the
//! load-flow command once and reports either the next requested time or an
//! [`AdapterError`].
//!
//! ```text
//! framework ──setup──> Simulator ──open──> SimulatorSession ──> SolverEngine
//!           ──step───>     └─ StepController ─ StepExecutor ──┘
//! ```
//!
//! The engine binding implements [`SolverEngine`]; this crate never talks to
//! the engine any other way.

pub mod configurator;
pub mod controller;
pub mod engine;
pub mod error;
pub mod executor;
pub mod logging;
pub mod resolver;
pub mod session;
pub mod simulator;

pub use controller::{ControllerState, StepController};
pub use engine::{CommandHandle, CommandKind, EngineError, EngineResult, SolverEngine};
pub use error::{AdapterError, AdapterResult};
pub use executor::{LoadFlowExecutor, StepExecutor};
pub use logging::init_tracing;
pub use resolver::CommandResolver;
pub use session::SimulatorSession;
pub use simulator::{LoadFlowSimulator, Simulator};
