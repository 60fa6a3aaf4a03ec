//! Session countdown controller.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use std::fmt;

#[cfg(feature = "python")]
use crate::python::{EntryReport, LineupReport, TickReport};
use thiserror::Error;

use crate::config::{RotationConfig, TimelineConfig};
use crate::models::{Participant, Schedule, Shift};
use crate::schedule::{generate_schedule_with, rotate_roster, ScheduleError};
use crate::{log_ticks, log_transitions};

use super::clock::{Clock, TickToken};
use super::queries::{self, EntryStatus, Lineup, Snapshot};
use super::state::{Phase, TimelineState};

/// Commands accepted by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    SkipBreak,
    Seek,
    AdvanceSession,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::SkipBreak => "skip the break",
            Command::Seek => "seek",
            Command::AdvanceSession => "advance to the next session",
        };
        f.write_str(name)
    }
}

/// Errors raised by timeline commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    #[error("Cannot {command} while {phase}")]
    InvalidCommand { command: Command, phase: Phase },
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Play clock moved forward one second within the same shift
    Advanced,
    /// Play clock moved forward and a new shift began
    ShiftChanged(u32),
    /// Midpoint reached; the intermission started instead of advancing
    BreakStarted,
    /// One second of the intermission elapsed
    BreakTick,
    /// Intermission over; play resumes on the next tick
    BreakEnded,
    /// Play clock reached the end of the session
    Finished,
    /// Tick belonged to a stopped or superseded clock run and was ignored
    Stale,
}

impl TickOutcome {
    /// Stable snake_case name of the outcome.
    pub fn kind(&self) -> &'static str {
        match self {
            TickOutcome::Advanced => "advanced",
            TickOutcome::ShiftChanged(_) => "shift_changed",
            TickOutcome::BreakStarted => "break_started",
            TickOutcome::BreakTick => "break_tick",
            TickOutcome::BreakEnded => "break_ended",
            TickOutcome::Finished => "finished",
            TickOutcome::Stale => "stale",
        }
    }

    /// Index of the shift that just began, for `ShiftChanged`.
    pub fn shift_index(&self) -> Option<u32> {
        match self {
            TickOutcome::ShiftChanged(index) => Some(*index),
            _ => None,
        }
    }
}

/// Live countdown over a generated rotation schedule.
///
/// Owns the roster, its schedule and the play/pause/break state machine. All
/// commands and ticks take `&mut self`, so they are applied one at a time.
/// A clone of a running timeline gets a clock run of its own.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Clone, Debug)]
pub struct Timeline {
    roster: Vec<Participant>,
    total_seconds: f64,
    schedule: Schedule,
    rotation: RotationConfig,
    config: TimelineConfig,
    state: TimelineState,
    clock: Clock,
}

impl Timeline {
    /// Build a timeline for a new session.
    pub fn new(
        roster: Vec<Participant>,
        total_seconds: f64,
        rotation: RotationConfig,
        config: TimelineConfig,
    ) -> Result<Self, ScheduleError> {
        let schedule = generate_schedule_with(&roster, total_seconds, &rotation)?;
        let state = TimelineState::new(config.break_seconds());
        log_transitions!(
            config.verbosity,
            "[timeline] new session: {} participants, {} shifts, {}s",
            roster.len(),
            schedule.len(),
            schedule.total_seconds()
        );
        Ok(Self {
            roster,
            total_seconds,
            schedule,
            rotation,
            config,
            state,
            clock: Clock::default(),
        })
    }

    /// Build a timeline with the default seat bands and countdown settings.
    pub fn with_defaults(
        roster: Vec<Participant>,
        total_seconds: f64,
    ) -> Result<Self, ScheduleError> {
        Self::new(
            roster,
            total_seconds,
            RotationConfig::default(),
            TimelineConfig::default(),
        )
    }

    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn elapsed(&self) -> u32 {
        self.state.elapsed
    }

    /// Session length in whole seconds.
    pub fn total_seconds(&self) -> u32 {
        self.schedule.total_seconds()
    }

    /// Seconds left on the session countdown.
    pub fn remaining_seconds(&self) -> u32 {
        self.total_seconds().saturating_sub(self.state.elapsed)
    }

    /// Length of the first shift, as shown on the session footer.
    pub fn shift_duration(&self) -> u32 {
        self.schedule.first().duration()
    }

    /// Token for the running clock, if ticks are currently expected.
    pub fn active_token(&self) -> Option<TickToken> {
        self.clock.active()
    }

    pub fn current_shift(&self) -> &Shift {
        queries::current_shift(&self.schedule, self.state.elapsed)
    }

    pub fn next_shift(&self) -> Option<&Shift> {
        queries::next_shift(&self.schedule, self.state.elapsed)
    }

    pub fn time_until_next_change(&self) -> u32 {
        queries::time_until_next_change(&self.schedule, self.state.elapsed)
    }

    pub fn is_change_imminent(&self) -> bool {
        queries::is_change_imminent(
            &self.schedule,
            self.state.elapsed,
            self.state.is_on_break(),
            self.config.warning_seconds(),
        )
    }

    /// Who keeps goal, plays outfield and sits out right now.
    pub fn lineup(&self) -> Lineup<'_> {
        queries::lineup(&self.roster, self.current_shift())
    }

    pub fn upcoming_entry(&self, participant_id: &str) -> Option<EntryStatus> {
        queries::upcoming_entry(&self.schedule, participant_id, self.state.elapsed)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.schedule, &self.state, self.config.warning_seconds())
    }

    /// Start or resume play and arm the clock.
    pub fn start(&mut self) -> Result<TickToken, TimelineError> {
        match self.state.phase {
            Phase::Idle | Phase::Paused if self.state.elapsed < self.total_seconds() => {
                self.enter(Phase::Running);
                Ok(self.clock.arm())
            }
            phase => Err(TimelineError::InvalidCommand {
                command: Command::Start,
                phase,
            }),
        }
    }

    /// Pause play and stop the clock.
    pub fn pause(&mut self) -> Result<(), TimelineError> {
        if self.state.phase != Phase::Running {
            return Err(TimelineError::InvalidCommand {
                command: Command::Pause,
                phase: self.state.phase,
            });
        }
        self.clock.disarm();
        self.enter(Phase::Paused);
        Ok(())
    }

    /// Play/pause button: pause while running, otherwise start or resume.
    ///
    /// Returns the new clock token when play starts.
    pub fn toggle(&mut self) -> Result<Option<TickToken>, TimelineError> {
        if self.state.is_running() {
            self.pause()?;
            Ok(None)
        } else {
            self.start().map(Some)
        }
    }

    /// Stop the clock and return to the start of the session.
    pub fn reset(&mut self) {
        self.clock.disarm();
        self.state = TimelineState::new(self.config.break_seconds());
        log_transitions!(self.config.verbosity, "[timeline] reset");
    }

    /// End the intermission early. The clock keeps running.
    pub fn skip_break(&mut self) -> Result<(), TimelineError> {
        if !self.state.is_on_break() {
            return Err(TimelineError::InvalidCommand {
                command: Command::SkipBreak,
                phase: self.state.phase,
            });
        }
        self.state.break_remaining = 0;
        self.enter(Phase::Running);
        Ok(())
    }

    /// Move the play clock to `elapsed`, clamped to the session length.
    ///
    /// Not allowed during the intermission or after the session ends. Seeking
    /// back across the midpoint never re-arms a break that was already taken.
    pub fn seek(&mut self, elapsed: u32) -> Result<(), TimelineError> {
        if matches!(self.state.phase, Phase::OnBreak | Phase::Finished) {
            return Err(TimelineError::InvalidCommand {
                command: Command::Seek,
                phase: self.state.phase,
            });
        }
        self.state.elapsed = elapsed.min(self.total_seconds());
        log_ticks!(
            self.config.verbosity,
            "[timeline] seek to {}s",
            self.state.elapsed
        );
        if self.state.elapsed == self.total_seconds() {
            self.finish();
        }
        Ok(())
    }

    /// Start the next session of a finished one: rotate the roster one seat,
    /// regenerate the schedule and return to `Idle`.
    pub fn advance_session(&mut self) -> Result<(), TimelineError> {
        if self.state.phase != Phase::Finished {
            return Err(TimelineError::InvalidCommand {
                command: Command::AdvanceSession,
                phase: self.state.phase,
            });
        }
        let roster = rotate_roster(&self.roster);
        self.replace_roster(roster, self.total_seconds)?;
        Ok(())
    }

    /// Begin a new session with a new roster and length.
    ///
    /// On error the current session is left untouched.
    pub fn replace_roster(
        &mut self,
        roster: Vec<Participant>,
        total_seconds: f64,
    ) -> Result<(), ScheduleError> {
        let schedule = generate_schedule_with(&roster, total_seconds, &self.rotation)?;
        self.roster = roster;
        self.total_seconds = total_seconds;
        self.schedule = schedule;
        self.reset();
        log_transitions!(
            self.config.verbosity,
            "[timeline] new session: {} participants, {} shifts",
            self.roster.len(),
            self.schedule.len()
        );
        Ok(())
    }

    /// Apply one second of the external clock.
    ///
    /// Ticks from a stopped or superseded run are ignored without touching state.
    pub fn tick(&mut self, token: TickToken) -> TickOutcome {
        if !self.clock.accepts(token) {
            log_ticks!(self.config.verbosity, "[timeline] stale tick ignored");
            return TickOutcome::Stale;
        }

        match self.state.phase {
            Phase::Running => self.tick_running(),
            Phase::OnBreak => self.tick_break(),
            // An armed clock always means Running or OnBreak.
            Phase::Idle | Phase::Paused | Phase::Finished => TickOutcome::Stale,
        }
    }

    fn tick_running(&mut self) -> TickOutcome {
        let break_seconds = self.config.break_seconds();
        if break_seconds > 0
            && !self.state.break_taken
            && self.state.elapsed >= self.schedule.midpoint()
        {
            self.state.break_taken = true;
            self.state.break_remaining = break_seconds;
            self.enter(Phase::OnBreak);
            return TickOutcome::BreakStarted;
        }

        let before = self.current_shift().index;
        self.state.elapsed += 1;
        log_ticks!(
            self.config.verbosity,
            "[timeline] tick {}/{}",
            self.state.elapsed,
            self.total_seconds()
        );

        if self.state.elapsed >= self.total_seconds() {
            self.state.elapsed = self.total_seconds();
            self.finish();
            return TickOutcome::Finished;
        }

        let after = self.current_shift().index;
        if after != before {
            log_transitions!(self.config.verbosity, "[timeline] shift {} begins", after);
            TickOutcome::ShiftChanged(after)
        } else {
            TickOutcome::Advanced
        }
    }

    fn tick_break(&mut self) -> TickOutcome {
        self.state.break_remaining = self.state.break_remaining.saturating_sub(1);
        log_ticks!(
            self.config.verbosity,
            "[timeline] break {}s left",
            self.state.break_remaining
        );
        if self.state.break_remaining == 0 {
            self.enter(Phase::Running);
            TickOutcome::BreakEnded
        } else {
            TickOutcome::BreakTick
        }
    }

    fn finish(&mut self) {
        self.clock.disarm();
        self.enter(Phase::Finished);
    }

    fn enter(&mut self, phase: Phase) {
        log_transitions!(
            self.config.verbosity,
            "[timeline] {} -> {} at {}s",
            self.state.phase,
            phase,
            self.state.elapsed
        );
        self.state.phase = phase;
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl Timeline {
    #[new]
    #[pyo3(signature = (participants, total_minutes=crate::config::DEFAULT_SESSION_MINUTES, rotation=None, config=None))]
    fn py_new(
        participants: Vec<Participant>,
        total_minutes: f64,
        rotation: Option<RotationConfig>,
        config: Option<TimelineConfig>,
    ) -> PyResult<Self> {
        Ok(Self::new(
            participants,
            crate::config::session_seconds(total_minutes),
            rotation.unwrap_or_default(),
            config.unwrap_or_default(),
        )?)
    }

    #[getter(phase)]
    fn py_phase(&self) -> Phase {
        self.phase()
    }

    #[getter(elapsed)]
    fn py_elapsed(&self) -> u32 {
        self.elapsed()
    }

    #[getter(roster)]
    fn py_roster(&self) -> Vec<Participant> {
        self.roster.clone()
    }

    #[getter(schedule)]
    fn py_schedule(&self) -> Vec<Shift> {
        self.schedule.shifts().to_vec()
    }

    #[pyo3(name = "start")]
    fn py_start(&mut self) -> PyResult<TickToken> {
        Ok(self.start()?)
    }

    #[pyo3(name = "pause")]
    fn py_pause(&mut self) -> PyResult<()> {
        Ok(self.pause()?)
    }

    #[pyo3(name = "toggle")]
    fn py_toggle(&mut self) -> PyResult<Option<TickToken>> {
        Ok(self.toggle()?)
    }

    #[pyo3(name = "reset")]
    fn py_reset(&mut self) {
        self.reset();
    }

    #[pyo3(name = "skip_break")]
    fn py_skip_break(&mut self) -> PyResult<()> {
        Ok(self.skip_break()?)
    }

    #[pyo3(name = "seek")]
    fn py_seek(&mut self, elapsed: u32) -> PyResult<()> {
        Ok(self.seek(elapsed)?)
    }

    #[pyo3(name = "advance_session")]
    fn py_advance_session(&mut self) -> PyResult<()> {
        Ok(self.advance_session()?)
    }

    #[pyo3(name = "tick")]
    fn py_tick(&mut self, token: TickToken) -> TickReport {
        self.tick(token).into()
    }

    #[pyo3(name = "snapshot")]
    fn py_snapshot(&self) -> Snapshot {
        self.snapshot()
    }

    #[pyo3(name = "current_shift")]
    fn py_current_shift(&self) -> Shift {
        self.current_shift().clone()
    }

    #[pyo3(name = "next_shift")]
    fn py_next_shift(&self) -> Option<Shift> {
        self.next_shift().cloned()
    }

    #[pyo3(name = "lineup")]
    fn py_lineup(&self) -> LineupReport {
        self.lineup().into()
    }

    /// None when the id is not on the roster.
    #[pyo3(name = "upcoming_entry")]
    fn py_upcoming_entry(&self, participant_id: &str) -> Option<EntryReport> {
        self.upcoming_entry(participant_id).map(EntryReport::from)
    }

    fn __repr__(&self) -> String {
        format!(
            "Timeline(phase={}, elapsed={}, shifts={})",
            self.phase(),
            self.elapsed(),
            self.schedule.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::Duration;

    fn roster(n: usize) -> Vec<Participant> {
        (1..=n)
            .map(|i| Participant::new(i.to_string(), format!("Player {}", i)))
            .collect()
    }

    fn timeline_with_break(n: usize, total_seconds: f64, break_seconds: i64) -> Timeline {
        let config = TimelineConfig {
            break_duration: Duration::seconds(break_seconds),
            ..TimelineConfig::default()
        };
        Timeline::new(roster(n), total_seconds, RotationConfig::default(), config).unwrap()
    }

    /// Tick `n` times with the active token.
    fn run(timeline: &mut Timeline, n: usize) -> Vec<TickOutcome> {
        (0..n)
            .map(|_| {
                let token = timeline.active_token().expect("clock armed");
                timeline.tick(token)
            })
            .collect()
    }

    #[test]
    fn test_new_session_is_idle() {
        let timeline = Timeline::with_defaults(roster(5), 2400.0).unwrap();
        assert_eq!(timeline.phase(), Phase::Idle);
        assert_eq!(timeline.elapsed(), 0);
        assert_eq!(timeline.remaining_seconds(), 2400);
        assert_eq!(timeline.shift_duration(), 480);
        assert_eq!(timeline.state().break_remaining, 300);
        assert!(timeline.active_token().is_none());
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(matches!(
            Timeline::with_defaults(roster(4), 600.0),
            Err(ScheduleError::InsufficientParticipants { .. })
        ));
        assert!(matches!(
            Timeline::with_defaults(roster(5), 0.0),
            Err(ScheduleError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_start_pause_resume() {
        let mut timeline = timeline_with_break(5, 300.0, 0);
        let token = timeline.start().unwrap();
        assert_eq!(timeline.phase(), Phase::Running);
        assert_eq!(timeline.tick(token), TickOutcome::Advanced);
        assert_eq!(timeline.elapsed(), 1);

        timeline.pause().unwrap();
        assert_eq!(timeline.phase(), Phase::Paused);
        assert_eq!(timeline.tick(token), TickOutcome::Stale);
        assert_eq!(timeline.elapsed(), 1);

        let resumed = timeline.start().unwrap();
        assert_ne!(resumed, token);
        assert_eq!(timeline.tick(token), TickOutcome::Stale);
        assert_eq!(timeline.tick(resumed), TickOutcome::Advanced);
        assert_eq!(timeline.elapsed(), 2);
    }

    #[test]
    fn test_invalid_commands() {
        let mut timeline = timeline_with_break(5, 300.0, 0);
        assert_eq!(
            timeline.pause(),
            Err(TimelineError::InvalidCommand {
                command: Command::Pause,
                phase: Phase::Idle
            })
        );
        assert!(timeline.skip_break().is_err());
        assert!(timeline.advance_session().is_err());

        timeline.start().unwrap();
        let err = timeline.start().unwrap_err();
        assert_eq!(err.to_string(), "Cannot start while running");
    }

    #[test]
    fn test_toggle() {
        let mut timeline = timeline_with_break(5, 300.0, 0);
        assert!(timeline.toggle().unwrap().is_some());
        assert_eq!(timeline.phase(), Phase::Running);
        assert!(timeline.toggle().unwrap().is_none());
        assert_eq!(timeline.phase(), Phase::Paused);
        assert!(timeline.toggle().unwrap().is_some());
        assert_eq!(timeline.phase(), Phase::Running);
    }

    #[test]
    fn test_shift_change_reported() {
        let mut timeline = timeline_with_break(5, 300.0, 0);
        timeline.start().unwrap();
        let outcomes = run(&mut timeline, 60);
        assert!(outcomes[..59].iter().all(|o| *o == TickOutcome::Advanced));
        assert_eq!(outcomes[59], TickOutcome::ShiftChanged(2));
        assert_eq!(timeline.current_shift().index, 2);
        assert_eq!(timeline.time_until_next_change(), 60);
    }

    #[test]
    fn test_half_time_trigger_holds_clock() {
        let mut timeline = timeline_with_break(5, 600.0, 120);
        timeline.start().unwrap();
        run(&mut timeline, 300);
        assert_eq!(timeline.elapsed(), 300);
        assert_eq!(timeline.phase(), Phase::Running);

        let outcome = run(&mut timeline, 1)[0];
        assert_eq!(outcome, TickOutcome::BreakStarted);
        assert_eq!(timeline.phase(), Phase::OnBreak);
        assert_eq!(timeline.elapsed(), 300);
        assert!(timeline.state().break_taken);
        assert_eq!(timeline.state().break_remaining, 120);
    }

    #[test]
    fn test_break_runs_down_then_play_resumes() {
        let mut timeline = timeline_with_break(5, 600.0, 3);
        timeline.seek(300).unwrap();
        timeline.start().unwrap();
        let outcomes = run(&mut timeline, 5);
        assert_eq!(
            outcomes,
            vec![
                TickOutcome::BreakStarted,
                TickOutcome::BreakTick,
                TickOutcome::BreakTick,
                TickOutcome::BreakEnded,
                TickOutcome::Advanced,
            ]
        );
        assert_eq!(timeline.elapsed(), 301);
        assert_eq!(timeline.state().break_remaining, 0);
    }

    #[test]
    fn test_no_change_warning_during_break() {
        let mut timeline = timeline_with_break(5, 600.0, 60);
        // 120s shifts: at 335 the 360 change is 25s away
        timeline.seek(335).unwrap();
        timeline.start().unwrap();
        assert_eq!(run(&mut timeline, 1)[0], TickOutcome::BreakStarted);
        assert_eq!(timeline.time_until_next_change(), 25);
        assert!(!timeline.is_change_imminent());

        timeline.skip_break().unwrap();
        assert!(timeline.is_change_imminent());
    }

    #[test]
    fn test_skip_break() {
        let mut timeline = timeline_with_break(5, 600.0, 120);
        timeline.seek(300).unwrap();
        let token = timeline.start().unwrap();
        assert_eq!(timeline.tick(token), TickOutcome::BreakStarted);

        timeline.skip_break().unwrap();
        assert_eq!(timeline.phase(), Phase::Running);
        assert_eq!(timeline.state().break_remaining, 0);
        // same run of the clock continues
        assert_eq!(timeline.tick(token), TickOutcome::Advanced);
        assert_eq!(timeline.elapsed(), 301);
    }

    #[test]
    fn test_break_never_retriggers() {
        let mut timeline = timeline_with_break(5, 600.0, 1);
        timeline.seek(300).unwrap();
        timeline.start().unwrap();
        run(&mut timeline, 3);
        assert_eq!(timeline.elapsed(), 301);

        timeline.seek(250).unwrap();
        let outcomes = run(&mut timeline, 100);
        assert!(!outcomes.contains(&TickOutcome::BreakStarted));
        assert_eq!(timeline.elapsed(), 350);
        assert_eq!(timeline.phase(), Phase::Running);
    }

    #[test]
    fn test_zero_break_disables_intermission() {
        let mut timeline = timeline_with_break(5, 600.0, 0);
        timeline.seek(300).unwrap();
        timeline.start().unwrap();
        assert_eq!(run(&mut timeline, 1)[0], TickOutcome::Advanced);
        assert!(!timeline.state().break_taken);
    }

    #[test]
    fn test_finish_stops_clock() {
        let mut timeline = timeline_with_break(5, 300.0, 0);
        timeline.seek(298).unwrap();
        let token = timeline.start().unwrap();
        assert_eq!(timeline.tick(token), TickOutcome::Advanced);
        assert_eq!(timeline.tick(token), TickOutcome::Finished);
        assert_eq!(timeline.phase(), Phase::Finished);
        assert_eq!(timeline.elapsed(), 300);
        assert_eq!(timeline.remaining_seconds(), 0);
        assert_eq!(timeline.current_shift().index, 5);
        assert!(timeline.next_shift().is_none());
        assert_eq!(timeline.time_until_next_change(), 0);

        assert_eq!(timeline.tick(token), TickOutcome::Stale);
        assert_eq!(timeline.elapsed(), 300);
        assert!(timeline.start().is_err());
    }

    #[test]
    fn test_clone_runs_its_own_clock() {
        let mut original = timeline_with_break(5, 300.0, 0);
        let token = original.start().unwrap();
        let mut copy = original.clone();
        original.pause().unwrap();

        assert_eq!(copy.phase(), Phase::Running);
        assert_eq!(copy.tick(token), TickOutcome::Stale);
        assert_eq!(copy.elapsed(), 0);

        let own = copy.active_token().unwrap();
        assert_eq!(copy.tick(own), TickOutcome::Advanced);
        assert_eq!(original.tick(own), TickOutcome::Stale);
        assert_eq!(original.elapsed(), 0);
    }

    #[test]
    fn test_tick_outcome_kind() {
        assert_eq!(TickOutcome::ShiftChanged(3).kind(), "shift_changed");
        assert_eq!(TickOutcome::ShiftChanged(3).shift_index(), Some(3));
        assert_eq!(TickOutcome::BreakStarted.kind(), "break_started");
        assert_eq!(TickOutcome::Finished.shift_index(), None);
        assert_eq!(TickOutcome::Stale.kind(), "stale");
    }

    #[test]
    fn test_reset_cancels_outstanding_ticks() {
        let mut timeline = timeline_with_break(5, 600.0, 60);
        timeline.seek(300).unwrap();
        let token = timeline.start().unwrap();
        timeline.tick(token);
        assert!(timeline.state().is_on_break());

        timeline.reset();
        assert_eq!(timeline.tick(token), TickOutcome::Stale);
        assert_eq!(*timeline.state(), TimelineState::new(60));
        assert!(timeline.active_token().is_none());
    }

    #[test]
    fn test_seek_clamps_and_finishes() {
        let mut timeline = timeline_with_break(5, 300.0, 0);
        timeline.start().unwrap();
        timeline.seek(10_000).unwrap();
        assert_eq!(timeline.elapsed(), 300);
        assert_eq!(timeline.phase(), Phase::Finished);
        assert!(timeline.active_token().is_none());
        assert!(timeline.seek(10).is_err());
    }

    #[test]
    fn test_lineup_follows_clock() {
        let mut timeline = timeline_with_break(6, 360.0, 0);
        let lineup = timeline.lineup();
        assert_eq!(lineup.goalkeeper().map(|p| p.id.as_str()), Some("1"));
        assert_eq!(lineup.bench.len(), 1);
        assert_eq!(lineup.bench[0].id, "6");

        timeline.seek(60).unwrap();
        let lineup = timeline.lineup();
        assert_eq!(lineup.goalkeeper().map(|p| p.id.as_str()), Some("6"));
        assert_eq!(lineup.outfield.len(), 4);
        assert_eq!(lineup.bench[0].id, "5");
        assert_eq!(timeline.upcoming_entry("1"), Some(EntryStatus::OnField));
        assert_eq!(
            timeline.upcoming_entry("5"),
            Some(EntryStatus::EntersIn {
                seconds: 60,
                shift_index: 3,
                role: Role::GoalKeeper
            })
        );
    }

    #[test]
    fn test_advance_session_rotates_roster() {
        let mut timeline = timeline_with_break(5, 300.0, 0);
        timeline.seek(300).unwrap();
        assert_eq!(timeline.phase(), Phase::Finished);

        timeline.advance_session().unwrap();
        assert_eq!(timeline.phase(), Phase::Idle);
        assert_eq!(timeline.elapsed(), 0);
        let ids: Vec<&str> = timeline.roster().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "4", "5", "1"]);
        assert_eq!(
            timeline.current_shift().role_of("2"),
            Some(Role::GoalKeeper)
        );
    }

    #[test]
    fn test_replace_roster_failure_keeps_session() {
        let mut timeline = timeline_with_break(5, 300.0, 0);
        timeline.start().unwrap();
        assert!(timeline.replace_roster(roster(3), 300.0).is_err());
        assert_eq!(timeline.phase(), Phase::Running);
        assert_eq!(timeline.roster().len(), 5);

        timeline.replace_roster(roster(7), 700.0).unwrap();
        assert_eq!(timeline.phase(), Phase::Idle);
        assert_eq!(timeline.schedule().len(), 7);
        assert!(timeline.active_token().is_none());
    }

    #[test]
    fn test_snapshot_matches_queries() {
        let mut timeline = timeline_with_break(5, 300.0, 0);
        timeline.seek(45).unwrap();
        let snapshot = timeline.snapshot();
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.current_shift, timeline.current_shift().index);
        assert_eq!(snapshot.next_shift, timeline.next_shift().map(|s| s.index));
        assert_eq!(snapshot.time_until_change, timeline.time_until_next_change());
        assert_eq!(snapshot.change_imminent, timeline.is_change_imminent());
        assert_eq!(snapshot.remaining, 255);
    }
}
