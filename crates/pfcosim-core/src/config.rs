//! Simulator configuration supplied by the co-simulation framework.
//!
//! [`SimulatorOptions`] is the raw, partially specified form passed to setup,
//! either as a JSON object from the framework or as a TOML file. Unspecified
//! values use defaults. [`SimulatorOptions::validate`] turns it into an
//! immutable [`SimulatorConfig`].

use std::num::NonZeroU64;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::solver_options::SolverOptions;
use crate::time::TimeTranslator;

/// Default seconds between two load-flow calculations.
pub const DEFAULT_STEP_SIZE: i64 = 900;

/// Seconds per simulation step. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StepSize(NonZeroU64);

impl StepSize {
    /// Validate a raw step size.
    pub fn new(seconds: i64) -> CoreResult<Self> {
        u64::try_from(seconds)
            .ok()
            .and_then(NonZeroU64::new)
            .map(StepSize)
            .ok_or_else(|| {
                CoreError::Configuration(format!(
                    "step_size must be a positive number of seconds, got {}",
                    seconds
                ))
            })
    }

    /// Step size in seconds.
    pub fn seconds(&self) -> u64 {
        self.0.get()
    }
}

impl Default for StepSize {
    fn default() -> Self {
        StepSize(NonZeroU64::new(DEFAULT_STEP_SIZE as u64).unwrap_or(NonZeroU64::MIN))
    }
}

/// Raw options recognised at setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorOptions {
    /// Seconds per step. Kept signed so negative values surface as a
    /// configuration error rather than a parse error.
    pub step_size: i64,

    /// Case time at elapsed zero. Defaults to the Unix epoch.
    ///
    /// Accepts an RFC 3339 string or a native TOML offset date-time.
    #[serde(alias = "ref_date_time", deserialize_with = "deserialize_reference_time")]
    pub reference_start_time: Option<DateTime<Utc>>,

    /// Study case to activate before resolving the command.
    pub study_case: Option<String>,

    /// Solver attributes applied to the command once at setup.
    #[serde(alias = "ldf_options")]
    pub solver_options: Option<SolverOptions>,
}

impl Default for SimulatorOptions {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP_SIZE,
            reference_start_time: None,
            study_case: None,
            solver_options: None,
        }
    }
}

impl SimulatorOptions {
    /// Parse options from a framework JSON payload.
    pub fn from_json(payload: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Parse options from TOML text.
    pub fn from_toml(contents: &str) -> CoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load options from a TOML file.
    pub fn load_from(path: &Path) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Check every value and freeze the configuration.
    pub fn validate(self) -> CoreResult<SimulatorConfig> {
        let step_size = StepSize::new(self.step_size)?;

        let study_case = match self.study_case {
            Some(case) if case.trim().is_empty() => {
                return Err(CoreError::Configuration(
                    "study_case must not be empty when given".to_string(),
                ));
            }
            other => other,
        };

        Ok(SimulatorConfig {
            step_size,
            reference_start_time: self.reference_start_time.unwrap_or(DateTime::UNIX_EPOCH),
            study_case,
            solver_options: self
                .solver_options
                .unwrap_or_else(SolverOptions::load_flow_defaults),
        })
    }
}

/// Reads the reference start time from a string or a TOML date-time.
fn deserialize_reference_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawReferenceTime {
        Text(DateTime<Utc>),
        Native(toml::value::Datetime),
    }

    match Option::<RawReferenceTime>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawReferenceTime::Text(time)) => Ok(Some(time)),
        Some(RawReferenceTime::Native(native)) => {
            native_to_utc(&native).map(Some).map_err(de::Error::custom)
        }
    }
}

/// Local TOML dates and times carry no offset and are rejected.
fn native_to_utc(native: &toml::value::Datetime) -> CoreResult<DateTime<Utc>> {
    if native.date.is_none() || native.time.is_none() || native.offset.is_none() {
        return Err(CoreError::Configuration(format!(
            "reference_start_time {} must be a date-time with an offset",
            native
        )));
    }
    DateTime::parse_from_rfc3339(&native.to_string())
        .map(|time| time.with_timezone(&Utc))
        .map_err(|err| {
            CoreError::Configuration(format!("reference_start_time {}: {}", native, err))
        })
}

/// Validated, immutable simulator configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatorConfig {
    pub step_size: StepSize,
    pub reference_start_time: DateTime<Utc>,
    pub study_case: Option<String>,
    pub solver_options: SolverOptions,
}

impl SimulatorConfig {
    /// Translator anchored at this configuration's reference start time.
    pub fn time_translator(&self) -> TimeTranslator {
        TimeTranslator::new(self.reference_start_time)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            step_size: StepSize::default(),
            reference_start_time: DateTime::UNIX_EPOCH,
            study_case: None,
            solver_options: SolverOptions::load_flow_defaults(),
        }
    }
}
