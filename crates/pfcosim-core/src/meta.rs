//! Capability descriptor returned to the co-simulation framework at setup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Version of the framework API this adapter speaks.
pub const API_VERSION: &str = "3.0";

/// How the framework schedules the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulatorKind {
    /// Stepped at times the simulator requests.
    TimeBased,
}

/// Public description of one entity model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMeta {
    pub public: bool,
    pub params: Vec<String>,
    pub attrs: Vec<String>,
}

/// Meta descriptor of a configured simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorMeta {
    pub api_version: String,
    #[serde(rename = "type")]
    pub kind: SimulatorKind,
    pub sid: String,
    pub project: String,
    pub study_case: Option<String>,
    pub step_size: u64,
    /// Engine command class driven on each step, e.g. `ComLdf`.
    pub command: String,
    pub models: BTreeMap<String, ModelMeta>,
}

impl SimulatorMeta {
    /// Descriptor of a time-based simulator with no entity models.
    pub fn time_based(
        sid: impl Into<String>,
        project: impl Into<String>,
        study_case: Option<String>,
        step_size: u64,
        command: impl Into<String>,
    ) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: SimulatorKind::TimeBased,
            sid: sid.into(),
            project: project.into(),
            study_case,
            step_size,
            command: command.into(),
            models: BTreeMap::new(),
        }
    }

    /// Serialize for the framework's JSON channel.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
