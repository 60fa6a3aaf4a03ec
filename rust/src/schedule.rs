//! Rotation schedule generation.
//!
//! A roster of `N` participants produces exactly `N` shifts. In shift `s` the
//! participant at roster position `i` sits in seat `(i + s) mod N`, and the
//! seat decides the role. As `s` runs over `0..N` every participant visits
//! every seat once, so each participant keeps goal, plays outfield and sits
//! on the bench the same number of times.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::HashMap;
use thiserror::Error;

use crate::config::RotationConfig;
use crate::log_debug;
use crate::models::{Participant, Role, RoleTally, Schedule, Shift};

/// Errors that can occur while generating a schedule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Minimum {required} players required, got {actual}")]
    InsufficientParticipants { required: usize, actual: usize },
    #[error("Invalid session duration: {0} seconds")]
    InvalidDuration(f64),
    #[error("Duplicate participant id: {0}")]
    DuplicateParticipant(String),
    #[error("Invalid rotation configuration: {0}")]
    InvalidConfig(String),
}

/// Role held by whoever sits in `seat`.
pub fn seat_role(seat: usize, config: &RotationConfig) -> Role {
    if seat < config.goalkeeper_slots {
        Role::GoalKeeper
    } else if seat < config.min_participants() {
        Role::Outfield
    } else {
        Role::Bench
    }
}

/// Generate a schedule with the standard one goalkeeper, four outfield layout.
pub fn generate_schedule(
    participants: &[Participant],
    total_seconds: f64,
) -> Result<Schedule, ScheduleError> {
    generate_schedule_with(participants, total_seconds, &RotationConfig::default())
}

/// Generate a schedule for `participants` covering `total_seconds`.
///
/// # Errors
/// * `InsufficientParticipants` if the roster cannot fill every playing seat
/// * `InvalidDuration` if the duration is not finite and positive, or too short
///   to give every shift at least one second
/// * `DuplicateParticipant` if two roster entries share an id
/// * `InvalidConfig` if the seat bands have no goalkeeper
pub fn generate_schedule_with(
    participants: &[Participant],
    total_seconds: f64,
    config: &RotationConfig,
) -> Result<Schedule, ScheduleError> {
    config.validate().map_err(ScheduleError::InvalidConfig)?;

    let count = participants.len();
    if count < config.min_participants() {
        return Err(ScheduleError::InsufficientParticipants {
            required: config.min_participants(),
            actual: count,
        });
    }
    if !total_seconds.is_finite() || total_seconds <= 0.0 {
        return Err(ScheduleError::InvalidDuration(total_seconds));
    }
    // Every shift must last at least one whole second after flooring.
    if total_seconds.floor() < count as f64 || total_seconds > f64::from(u32::MAX) {
        return Err(ScheduleError::InvalidDuration(total_seconds));
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for participant in participants {
        if !seen.insert(participant.id.as_str()) {
            return Err(ScheduleError::DuplicateParticipant(participant.id.clone()));
        }
    }

    // Boundaries come from the exact cumulative sum, floored one at a time, so
    // rounding never accumulates and the last shift ends on floor(total).
    let boundary = |k: usize| -> u32 {
        let exact = if k == count {
            total_seconds
        } else {
            total_seconds * k as f64 / count as f64
        };
        exact.floor() as u32
    };

    let shifts: Vec<Shift> = (0..count)
        .map(|s| {
            let assignments: HashMap<String, Role> = participants
                .iter()
                .enumerate()
                .map(|(index, participant)| {
                    let seat = (index + s) % count;
                    (participant.id.clone(), seat_role(seat, config))
                })
                .collect();

            let shift = Shift {
                index: (s + 1) as u32,
                start_time: boundary(s),
                end_time: boundary(s + 1),
                assignments,
            };
            log_debug!(
                config.verbosity,
                "[schedule] shift {} [{}, {})",
                shift.index,
                shift.start_time,
                shift.end_time
            );
            shift
        })
        .collect();

    Ok(Schedule::from_shifts(shifts))
}

/// Count how many shifts each participant spends in each role.
pub fn role_tally(schedule: &Schedule) -> FxHashMap<String, RoleTally> {
    let mut tally: FxHashMap<String, RoleTally> = FxHashMap::default();
    for shift in schedule {
        for (id, role) in &shift.assignments {
            tally.entry(id.clone()).or_default().record(*role);
        }
    }
    tally
}

/// Roster for the next session: everyone moves up one seat and the first
/// participant goes to the end.
pub fn rotate_roster(participants: &[Participant]) -> Vec<Participant> {
    let mut rotated = participants.to_vec();
    if !rotated.is_empty() {
        rotated.rotate_left(1);
    }
    rotated
}
