//! Fair rotation schedules for small-sided squads, plus the live countdown
//! that tracks which rotation is on the pitch.
//!
//! A roster of `N` players is split into `N` equal shifts. Each shift gives
//! one player goal, four players outfield and benches the rest, rotating
//! seats so that over the whole session every player does each job equally.

pub mod config;
mod format;
pub mod logging;
mod models;
pub mod schedule;
pub mod timeline;

#[cfg(feature = "python")]
mod python;

pub use config::{
    session_seconds, RotationConfig, TimelineConfig, DEFAULT_SESSION_MINUTES, MAX_PARTICIPANTS,
};
pub use format::{format_duration, format_time};
pub use models::{Participant, Role, RoleTally, Schedule, Shift};
pub use schedule::{
    generate_schedule, generate_schedule_with, rotate_roster, role_tally, seat_role, ScheduleError,
};
pub use timeline::{
    drive, Command, EntryStatus, Lineup, Phase, Snapshot, TickOutcome, TickToken, Timeline,
    TimelineError, TimelineState,
};
