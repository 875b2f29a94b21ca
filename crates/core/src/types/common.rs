//! Common types and utilities shared across domain models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Duration in whole seconds
///
/// Episode lengths and playback positions are tracked at second
/// granularity; fractional seconds are truncated by whoever produced the
/// value, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Duration(u64);

impl Duration {
    /// Zero duration constant
    pub const ZERO: Self = Self(0);

    /// Creates a duration from whole seconds
    pub fn from_seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the duration in whole seconds
    pub fn as_seconds(&self) -> u64 {
        self.0
    }

    /// Returns true if the duration is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds seconds, saturating at `u64::MAX`
    pub fn saturating_add(&self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    /// Subtracts seconds, saturating at zero
    pub fn saturating_sub(&self, seconds: u64) -> Self {
        Self(self.0.saturating_sub(seconds))
    }

    /// Clamps the duration to `max`
    pub fn min(&self, max: Duration) -> Self {
        Self(self.0.min(max.0))
    }

    /// Formats as HH:MM:SS with every field zero-padded to two digits
    ///
    /// Hours grow past two digits for durations of 100 hours or more.
    pub fn as_hms(&self) -> String {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }

    /// Converts to a `std::time::Duration`
    pub fn to_std(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.0)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hms())
    }
}

impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        Self(d.as_secs())
    }
}
