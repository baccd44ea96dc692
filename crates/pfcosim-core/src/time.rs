//! Translation from co-simulation time to study-case time.
//!
//! The framework counts integer seconds from its logical time zero. The solver
//! expects an absolute date-time for the active study case. Translation is a
//! pure function of the reference start time and the elapsed seconds; it never
//! reads the wall clock, so a replayed step always sees the same case time.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Absolute date-time of the solver's study case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CaseTime(DateTime<Utc>);

impl CaseTime {
    /// Wrap an absolute UTC date-time.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// The wrapped date-time.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Seconds since the Unix epoch, the representation most engines store.
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }
}

impl fmt::Display for CaseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Maps elapsed co-simulation seconds to [`CaseTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeTranslator {
    reference: DateTime<Utc>,
}

impl TimeTranslator {
    /// Translator whose elapsed zero maps to `reference`.
    pub fn new(reference: DateTime<Utc>) -> Self {
        Self { reference }
    }

    /// Reference start time (case time at elapsed zero).
    pub fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    /// Translate `elapsed_seconds` since logical time zero into case time.
    pub fn translate(&self, elapsed_seconds: u64) -> CoreResult<CaseTime> {
        let out_of_range = || CoreError::TimeOutOfRange {
            reference: self.reference,
            elapsed_seconds,
        };

        let seconds = i64::try_from(elapsed_seconds).map_err(|_| out_of_range())?;
        let delta = TimeDelta::try_seconds(seconds).ok_or_else(out_of_range)?;
        self.reference
            .checked_add_signed(delta)
            .map(CaseTime)
            .ok_or_else(out_of_range)
    }
}

impl Default for TimeTranslator {
    fn default() -> Self {
        Self::new(DateTime::UNIX_EPOCH)
    }
}
