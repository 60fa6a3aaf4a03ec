//! Mutable state owned by the timeline controller.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use std::fmt;

/// Lifecycle phase of a session countdown.
#[cfg_attr(feature = "python", pyclass(eq, eq_int))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not started yet, or reset
    Idle,
    Running,
    Paused,
    /// Half-time intermission; the session clock is frozen
    OnBreak,
    Finished,
}

impl Phase {
    /// Whether the one-second clock should be delivering ticks.
    pub fn is_ticking(&self) -> bool {
        matches!(self, Phase::Running | Phase::OnBreak)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::OnBreak => "on break",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Countdown state for one session.
///
/// Invariants: `elapsed` never exceeds the session length and
/// `break_remaining` never exceeds the configured break length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineState {
    /// Seconds of play elapsed since kick-off
    pub elapsed: u32,
    pub phase: Phase,
    /// Seconds left in the intermission (counts down while on break)
    pub break_remaining: u32,
    /// Set when the intermission starts so it cannot retrigger
    pub break_taken: bool,
}

impl TimelineState {
    /// Fresh state for a session whose intermission lasts `break_seconds`.
    pub fn new(break_seconds: u32) -> Self {
        Self {
            elapsed: 0,
            phase: Phase::Idle,
            break_remaining: break_seconds,
            break_taken: false,
        }
    }

    pub fn is_on_break(&self) -> bool {
        self.phase == Phase::OnBreak
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}
