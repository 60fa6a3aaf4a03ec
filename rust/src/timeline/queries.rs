//! Pure queries over a schedule and an elapsed-time value.
//!
//! Nothing here caches: every answer is recomputed from the schedule and the
//! authoritative elapsed counter, so it cannot drift out of sync with the clock.

#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::models::{Participant, Role, Schedule, Shift};

use super::state::{Phase, TimelineState};

/// Position of the shift covering `elapsed`, or the last shift once the
/// session is over.
///
/// Shifts tile the session contiguously from zero, so the first shift ending
/// after `elapsed` is the one that contains it. Uses binary search.
pub fn current_position(schedule: &Schedule, elapsed: u32) -> usize {
    let idx = schedule
        .shifts()
        .partition_point(|shift| shift.end_time <= elapsed);
    idx.min(schedule.len() - 1)
}

/// Shift whose `[start_time, end_time)` contains `elapsed`.
///
/// At the final boundary (`elapsed == total`) nothing matches and the last
/// shift is returned.
pub fn current_shift(schedule: &Schedule, elapsed: u32) -> &Shift {
    &schedule.shifts()[current_position(schedule, elapsed)]
}

/// First shift starting strictly after `elapsed`, if any.
pub fn next_shift(schedule: &Schedule, elapsed: u32) -> Option<&Shift> {
    let idx = schedule
        .shifts()
        .partition_point(|shift| shift.start_time <= elapsed);
    schedule.shifts().get(idx)
}

/// Seconds until the current shift ends.
pub fn time_until_next_change(schedule: &Schedule, elapsed: u32) -> u32 {
    current_shift(schedule, elapsed)
        .end_time
        .saturating_sub(elapsed)
}

/// True while a role change is due within `threshold` seconds and play is live.
pub fn is_change_imminent(
    schedule: &Schedule,
    elapsed: u32,
    on_break: bool,
    threshold: u32,
) -> bool {
    let remaining = time_until_next_change(schedule, elapsed);
    !on_break && remaining > 0 && remaining <= threshold
}

/// Roster split by role for one shift, each group in roster order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lineup<'a> {
    pub goalkeepers: Vec<&'a Participant>,
    pub outfield: Vec<&'a Participant>,
    pub bench: Vec<&'a Participant>,
}

impl<'a> Lineup<'a> {
    /// The goalkeeper (first one, if the bands allow several).
    pub fn goalkeeper(&self) -> Option<&'a Participant> {
        self.goalkeepers.first().copied()
    }
}

/// Group `roster` by the roles assigned in `shift`.
///
/// Participants missing from the shift's assignments are left out.
pub fn lineup<'a>(roster: &'a [Participant], shift: &Shift) -> Lineup<'a> {
    let mut lineup = Lineup::default();
    for participant in roster {
        match shift.role_of(&participant.id) {
            Some(Role::GoalKeeper) => lineup.goalkeepers.push(participant),
            Some(Role::Outfield) => lineup.outfield.push(participant),
            Some(Role::Bench) => lineup.bench.push(participant),
            None => {}
        }
    }
    lineup
}

/// When a participant next takes the pitch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryStatus {
    /// Already playing in the current shift
    OnField,
    /// Comes on at the start of shift `shift_index`, `seconds` from now
    EntersIn {
        seconds: u32,
        shift_index: u32,
        role: Role,
    },
    /// Stays on the bench for the rest of the session
    NoFurtherEntry,
}

impl EntryStatus {
    pub fn kind(&self) -> &'static str {
        match self {
            EntryStatus::OnField => "on_field",
            EntryStatus::EntersIn { .. } => "enters_in",
            EntryStatus::NoFurtherEntry => "no_further_entry",
        }
    }
}

/// Scan forward from the current shift for the participant's next playing role.
///
/// Returns `None` when the participant is not on the schedule.
pub fn upcoming_entry(
    schedule: &Schedule,
    participant_id: &str,
    elapsed: u32,
) -> Option<EntryStatus> {
    let position = current_position(schedule, elapsed);
    let role = schedule.shifts()[position].role_of(participant_id)?;
    if role.is_playing() {
        return Some(EntryStatus::OnField);
    }

    let entry = schedule.shifts()[position + 1..].iter().find_map(|shift| {
        shift
            .role_of(participant_id)
            .filter(Role::is_playing)
            .map(|role| EntryStatus::EntersIn {
                seconds: shift.start_time.saturating_sub(elapsed),
                shift_index: shift.index,
                role,
            })
    });
    Some(entry.unwrap_or(EntryStatus::NoFurtherEntry))
}

/// Every derived value the display needs, captured at one instant.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: Phase,
    pub elapsed: u32,
    /// Seconds left on the session clock
    pub remaining: u32,
    pub current_shift: u32,
    pub next_shift: Option<u32>,
    pub shift_count: u32,
    pub time_until_change: u32,
    pub change_imminent: bool,
    pub break_remaining: u32,
}

impl Snapshot {
    /// Derive a snapshot from the schedule and countdown state.
    pub fn capture(schedule: &Schedule, state: &TimelineState, warning_seconds: u32) -> Self {
        let elapsed = state.elapsed;
        let on_break = state.is_on_break();
        Self {
            phase: state.phase,
            elapsed,
            remaining: schedule.total_seconds().saturating_sub(elapsed),
            current_shift: current_shift(schedule, elapsed).index,
            next_shift: next_shift(schedule, elapsed).map(|shift| shift.index),
            shift_count: schedule.len() as u32,
            time_until_change: time_until_next_change(schedule, elapsed),
            change_imminent: is_change_imminent(schedule, elapsed, on_break, warning_seconds),
            break_remaining: state.break_remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::generate_schedule;

    fn roster(n: usize) -> Vec<Participant> {
        (1..=n)
            .map(|i| Participant::new(format!("p{}", i), format!("Player {}", i)))
            .collect()
    }

    fn ids<'a>(group: &[&'a Participant]) -> Vec<&'a str> {
        group.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_current_shift_half_open() {
        let schedule = generate_schedule(&roster(5), 300.0).unwrap();
        assert_eq!(current_shift(&schedule, 0).index, 1);
        assert_eq!(current_shift(&schedule, 59).index, 1);
        // boundary second belongs to the shift that starts there
        assert_eq!(current_shift(&schedule, 60).index, 2);
        assert_eq!(current_shift(&schedule, 240).index, 5);
        assert_eq!(current_shift(&schedule, 299).index, 5);
    }

    #[test]
    fn test_current_shift_at_session_end_is_last() {
        let schedule = generate_schedule(&roster(5), 300.0).unwrap();
        assert_eq!(current_shift(&schedule, 300).index, 5);
        assert_eq!(current_shift(&schedule, 10_000).index, 5);
    }

    #[test]
    fn test_next_shift() {
        let schedule = generate_schedule(&roster(5), 300.0).unwrap();
        assert_eq!(next_shift(&schedule, 0).map(|s| s.index), Some(2));
        assert_eq!(next_shift(&schedule, 60).map(|s| s.index), Some(3));
        assert_eq!(next_shift(&schedule, 239).map(|s| s.index), Some(5));
        assert!(next_shift(&schedule, 240).is_none());
        assert!(next_shift(&schedule, 300).is_none());
    }

    #[test]
    fn test_time_until_change() {
        let schedule = generate_schedule(&roster(5), 300.0).unwrap();
        assert_eq!(time_until_next_change(&schedule, 0), 60);
        assert_eq!(time_until_next_change(&schedule, 45), 15);
        assert_eq!(time_until_next_change(&schedule, 60), 60);
        assert_eq!(time_until_next_change(&schedule, 300), 0);
    }

    #[test]
    fn test_change_imminent_window() {
        let schedule = generate_schedule(&roster(5), 300.0).unwrap();
        assert!(!is_change_imminent(&schedule, 29, false, 30));
        assert!(is_change_imminent(&schedule, 30, false, 30));
        assert!(is_change_imminent(&schedule, 59, false, 30));
        assert!(!is_change_imminent(&schedule, 59, true, 30));
        assert!(!is_change_imminent(&schedule, 300, false, 30));
    }

    #[test]
    fn test_lineup_keeps_roster_order() {
        let players = roster(7);
        let schedule = generate_schedule(&players, 700.0).unwrap();
        // shift 3: seat = (i + 2) mod 7, so p6 (i=5) keeps goal
        let lineup = lineup(&players, &schedule.shifts()[2]);

        assert_eq!(lineup.goalkeeper().map(|p| p.id.as_str()), Some("p6"));
        assert_eq!(ids(&lineup.outfield), vec!["p1", "p2", "p3", "p7"]);
        assert_eq!(ids(&lineup.bench), vec!["p4", "p5"]);
    }

    #[test]
    fn test_lineup_outfield_size() {
        let players = roster(7);
        let schedule = generate_schedule(&players, 700.0).unwrap();
        for shift in &schedule {
            let lineup = lineup(&players, shift);
            assert_eq!(lineup.goalkeepers.len(), 1);
            assert_eq!(lineup.outfield.len(), 4);
            assert_eq!(lineup.bench.len(), 2);
        }
    }

    #[test]
    fn test_upcoming_entry_for_benched_player() {
        let players = roster(6);
        let schedule = generate_schedule(&players, 360.0).unwrap();
        // p6 (i=5) sits in seat 5 during shift 1 and seat 0 during shift 2
        assert_eq!(
            upcoming_entry(&schedule, "p6", 20),
            Some(EntryStatus::EntersIn {
                seconds: 40,
                shift_index: 2,
                role: Role::GoalKeeper
            })
        );
        assert_eq!(upcoming_entry(&schedule, "p1", 20), Some(EntryStatus::OnField));
        assert_eq!(upcoming_entry(&schedule, "nobody", 20), None);
    }

    #[test]
    fn test_upcoming_entry_bench_to_the_end() {
        let players = roster(6);
        let schedule = generate_schedule(&players, 360.0).unwrap();
        // last shift: seat = (i + 5) mod 6 puts p1 on seat 5
        assert_eq!(schedule.last().role_of("p1"), Some(Role::Bench));
        assert_eq!(
            upcoming_entry(&schedule, "p1", 330),
            Some(EntryStatus::NoFurtherEntry)
        );
        assert_eq!(EntryStatus::NoFurtherEntry.kind(), "no_further_entry");
        assert_ne!(EntryStatus::OnField.kind(), EntryStatus::NoFurtherEntry.kind());
    }

    #[test]
    fn test_upcoming_entry_skips_bench_streak() {
        let players = roster(8);
        let schedule = generate_schedule(&players, 800.0).unwrap();
        // p6 (i=5): seats 5, 6, 7, 0 -> benched for three shifts, keeps goal in shift 4
        assert_eq!(
            upcoming_entry(&schedule, "p6", 0),
            Some(EntryStatus::EntersIn {
                seconds: 300,
                shift_index: 4,
                role: Role::GoalKeeper
            })
        );
    }

    #[test]
    fn test_snapshot_capture() {
        let schedule = generate_schedule(&roster(5), 300.0).unwrap();
        let mut state = TimelineState::new(60);
        state.elapsed = 45;
        state.phase = Phase::Running;

        let snapshot = Snapshot::capture(&schedule, &state, 30);
        assert_eq!(snapshot.remaining, 255);
        assert_eq!(snapshot.current_shift, 1);
        assert_eq!(snapshot.next_shift, Some(2));
        assert_eq!(snapshot.shift_count, 5);
        assert_eq!(snapshot.time_until_change, 15);
        assert!(snapshot.change_imminent);
        assert_eq!(snapshot.break_remaining, 60);

        state.phase = Phase::OnBreak;
        assert!(!Snapshot::capture(&schedule, &state, 30).change_imminent);
    }
}
