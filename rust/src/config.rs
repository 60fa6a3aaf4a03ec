//! Configuration types for schedule generation and the live timeline.

use chrono::Duration;
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Default session length used when the caller does not supply one.
pub const DEFAULT_SESSION_MINUTES: f64 = 40.0;

/// Largest roster the shipped front ends accept. The generator itself has no upper bound.
pub const MAX_PARTICIPANTS: usize = 10;

/// Convert a caller-supplied session length in minutes to seconds.
pub fn session_seconds(minutes: f64) -> f64 {
    minutes * 60.0
}

/// Seat bands used by the schedule generator.
///
/// Seats `[0, goalkeeper_slots)` keep goal, the next `outfield_slots` seats play
/// outfield, and every remaining seat sits on the bench.
#[cfg_attr(feature = "python", pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RotationConfig {
    /// Number of goalkeeper seats per shift
    pub goalkeeper_slots: usize,
    /// Number of outfield seats per shift
    pub outfield_slots: usize,
    /// Verbosity level: 0=silent, 1=transitions, 2=ticks, 3=debug.
    pub verbosity: u8,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            goalkeeper_slots: 1,
            outfield_slots: 4,
            verbosity: 0,
        }
    }
}

impl RotationConfig {
    /// Smallest roster that fills every playing seat.
    pub fn min_participants(&self) -> usize {
        self.goalkeeper_slots + self.outfield_slots
    }

    /// Bench seats per shift for a roster of `count` participants.
    pub fn bench_slots(&self, count: usize) -> usize {
        count.saturating_sub(self.min_participants())
    }

    /// Whether `count` lies inside the roster range the front ends allow.
    pub fn supports(&self, count: usize) -> bool {
        (self.min_participants()..=MAX_PARTICIPANTS).contains(&count)
    }

    /// Reject band layouts that cannot produce a goalkeeper.
    pub fn validate(&self) -> Result<(), String> {
        if self.goalkeeper_slots == 0 {
            return Err("goalkeeper_slots must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl RotationConfig {
    #[new]
    #[pyo3(signature = (goalkeeper_slots=None, outfield_slots=None, verbosity=None))]
    fn py_new(
        goalkeeper_slots: Option<usize>,
        outfield_slots: Option<usize>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            goalkeeper_slots: goalkeeper_slots.unwrap_or(defaults.goalkeeper_slots),
            outfield_slots: outfield_slots.unwrap_or(defaults.outfield_slots),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "RotationConfig(goalkeeper_slots={}, outfield_slots={}, verbosity={})",
            self.goalkeeper_slots, self.outfield_slots, self.verbosity
        )
    }
}

/// Configuration for the live countdown.
#[cfg_attr(feature = "python", pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineConfig {
    /// Length of the half-time intermission (zero disables it)
    pub break_duration: Duration,
    /// A role change is flagged as imminent at or below this much remaining time
    pub change_warning: Duration,
    /// Verbosity level: 0=silent, 1=transitions, 2=ticks, 3=debug.
    pub verbosity: u8,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            break_duration: Duration::minutes(5),
            change_warning: Duration::seconds(30),
            verbosity: 0,
        }
    }
}

impl TimelineConfig {
    /// Break length in whole seconds; negative durations count as zero.
    pub fn break_seconds(&self) -> u32 {
        whole_seconds(self.break_duration)
    }

    /// Imminent-change threshold in whole seconds.
    pub fn warning_seconds(&self) -> u32 {
        whole_seconds(self.change_warning)
    }
}

fn whole_seconds(duration: Duration) -> u32 {
    u32::try_from(duration.num_seconds().max(0)).unwrap_or(u32::MAX)
}

#[cfg(feature = "python")]
#[pymethods]
impl TimelineConfig {
    #[new]
    #[pyo3(signature = (break_duration=None, change_warning=None, verbosity=None))]
    fn py_new(
        break_duration: Option<Duration>,
        change_warning: Option<Duration>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            break_duration: break_duration.unwrap_or(defaults.break_duration),
            change_warning: change_warning.unwrap_or(defaults.change_warning),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TimelineConfig(break_seconds={}, warning_seconds={})",
            self.break_seconds(),
            self.warning_seconds()
        )
    }
}
