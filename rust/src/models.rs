//! Core data types for the rotation system.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use std::collections::HashMap;
use std::fmt;

// Note: We use std HashMap here for PyO3 interface compatibility

/// A roster entry. Identity is the `id`; names may repeat.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl Participant {
    #[new]
    fn py_new(id: String, name: String) -> Self {
        Self { id, name }
    }

    fn __repr__(&self) -> String {
        format!("Participant(id={:?}, name={:?})", self.id, self.name)
    }
}

/// Duty held by a participant during one shift.
#[cfg_attr(feature = "python", pyclass(eq, eq_int))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    GoalKeeper,
    Outfield,
    Bench,
}

impl Role {
    /// Short label shown on the pitch display.
    pub fn label(&self) -> &'static str {
        match self {
            Role::GoalKeeper => "GK",
            Role::Outfield => "Outfield",
            Role::Bench => "Bench",
        }
    }

    /// Whether the role puts the participant on the pitch.
    pub fn is_playing(&self) -> bool {
        !matches!(self, Role::Bench)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One time-bounded assignment of roles to the whole roster.
///
/// Covers the half-open interval `[start_time, end_time)` in session seconds.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, PartialEq)]
pub struct Shift {
    /// 1-based ordinal for display
    pub index: u32,
    pub start_time: u32,
    pub end_time: u32,
    /// participant id -> role
    pub assignments: HashMap<String, Role>,
}

impl Shift {
    /// Length of the shift in seconds.
    pub fn duration(&self) -> u32 {
        self.end_time.saturating_sub(self.start_time)
    }

    /// Role assigned to a participant, if they are on this shift's roster.
    pub fn role_of(&self, participant_id: &str) -> Option<Role> {
        self.assignments.get(participant_id).copied()
    }

    /// Whether `elapsed` falls inside `[start_time, end_time)`.
    #[inline]
    pub fn contains(&self, elapsed: u32) -> bool {
        self.start_time <= elapsed && elapsed < self.end_time
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl Shift {
    #[pyo3(name = "role_of")]
    fn py_role_of(&self, participant_id: &str) -> Option<Role> {
        self.role_of(participant_id)
    }

    #[pyo3(name = "duration")]
    fn py_duration(&self) -> u32 {
        self.duration()
    }

    fn __repr__(&self) -> String {
        format!(
            "Shift(index={}, start={}, end={}, assignments={})",
            self.index,
            self.start_time,
            self.end_time,
            self.assignments.len()
        )
    }
}

/// Ordered, gap-free sequence of shifts covering a whole session.
///
/// Only the generator builds these, so a schedule always holds at least one shift.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    shifts: Vec<Shift>,
}

impl Schedule {
    pub(crate) fn from_shifts(shifts: Vec<Shift>) -> Self {
        debug_assert!(!shifts.is_empty(), "schedule must contain a shift");
        Self { shifts }
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shift> {
        self.shifts.iter()
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    /// Always false for a generated schedule.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    pub fn first(&self) -> &Shift {
        &self.shifts[0]
    }

    pub fn last(&self) -> &Shift {
        &self.shifts[self.shifts.len() - 1]
    }

    /// Session length in whole seconds (end of the last shift).
    pub fn total_seconds(&self) -> u32 {
        self.last().end_time
    }

    /// Second at which the half-time intermission falls due.
    pub fn midpoint(&self) -> u32 {
        self.total_seconds() / 2
    }

    pub fn into_shifts(self) -> Vec<Shift> {
        self.shifts
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Shift;
    type IntoIter = std::slice::Iter<'a, Shift>;

    fn into_iter(self) -> Self::IntoIter {
        self.shifts.iter()
    }
}

/// Number of shifts a participant spends in each role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleTally {
    pub goalkeeper: usize,
    pub outfield: usize,
    pub bench: usize,
}

impl RoleTally {
    pub fn record(&mut self, role: Role) {
        match role {
            Role::GoalKeeper => self.goalkeeper += 1,
            Role::Outfield => self.outfield += 1,
            Role::Bench => self.bench += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.goalkeeper + self.outfield + self.bench
    }
}
