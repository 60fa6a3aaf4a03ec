//! Python bindings (`squad_rotation` module).

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{session_seconds, RotationConfig, TimelineConfig};
use crate::models::{Participant, Role, Shift};
use crate::schedule::{self, ScheduleError};
use crate::timeline::{
    EntryStatus, Lineup, Phase, Snapshot, TickOutcome, TickToken, Timeline, TimelineError,
};

impl From<ScheduleError> for PyErr {
    fn from(err: ScheduleError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

impl From<TimelineError> for PyErr {
    fn from(err: TimelineError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Result of `Timeline.tick()`.
///
/// `kind` is one of `advanced`, `shift_changed`, `break_started`, `break_tick`,
/// `break_ended`, `finished` or `stale`.
#[pyclass(name = "TickOutcome", get_all, frozen)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TickReport {
    pub kind: String,
    /// Set only for `shift_changed`
    pub shift_index: Option<u32>,
}

impl From<TickOutcome> for TickReport {
    fn from(outcome: TickOutcome) -> Self {
        Self {
            kind: outcome.kind().to_string(),
            shift_index: outcome.shift_index(),
        }
    }
}

#[pymethods]
impl TickReport {
    /// False for a tick from a stopped or superseded clock run.
    #[getter]
    fn applied(&self) -> bool {
        self.kind != TickOutcome::Stale.kind()
    }

    fn __repr__(&self) -> String {
        match self.shift_index {
            Some(index) => format!("TickOutcome({}, shift_index={})", self.kind, index),
            None => format!("TickOutcome({})", self.kind),
        }
    }
}

/// Result of `Timeline.upcoming_entry()`.
///
/// `kind` is `on_field`, `enters_in` or `no_further_entry`. The other fields
/// are set only for `enters_in`.
#[pyclass(name = "EntryStatus", get_all, frozen)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EntryReport {
    pub kind: String,
    pub seconds: Option<u32>,
    pub shift_index: Option<u32>,
    pub role: Option<Role>,
}

impl From<EntryStatus> for EntryReport {
    fn from(status: EntryStatus) -> Self {
        let kind = status.kind().to_string();
        match status {
            EntryStatus::EntersIn {
                seconds,
                shift_index,
                role,
            } => Self {
                kind,
                seconds: Some(seconds),
                shift_index: Some(shift_index),
                role: Some(role),
            },
            EntryStatus::OnField | EntryStatus::NoFurtherEntry => Self {
                kind,
                seconds: None,
                shift_index: None,
                role: None,
            },
        }
    }
}

#[pymethods]
impl EntryReport {
    fn __repr__(&self) -> String {
        match (self.seconds, self.shift_index) {
            (Some(seconds), Some(index)) => {
                format!("EntryStatus({}, seconds={}, shift_index={})", self.kind, seconds, index)
            }
            _ => format!("EntryStatus({})", self.kind),
        }
    }
}

/// Roster grouped by role for the current shift, each list in roster order.
#[pyclass(name = "Lineup", get_all, frozen)]
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LineupReport {
    pub goalkeepers: Vec<Participant>,
    pub outfield: Vec<Participant>,
    pub bench: Vec<Participant>,
}

impl From<Lineup<'_>> for LineupReport {
    fn from(lineup: Lineup<'_>) -> Self {
        let owned = |group: Vec<&Participant>| group.into_iter().cloned().collect();
        Self {
            goalkeepers: owned(lineup.goalkeepers),
            outfield: owned(lineup.outfield),
            bench: owned(lineup.bench),
        }
    }
}

#[pymethods]
impl LineupReport {
    /// The (first) goalkeeper.
    #[getter]
    fn goalkeeper(&self) -> Option<Participant> {
        self.goalkeepers.first().cloned()
    }
}

/// Generate the rotation schedule for a roster.
///
/// # Arguments
/// * `participants` - Roster in seat order
/// * `total_minutes` - Session length in minutes (default 40)
/// * `config` - Seat bands (default one goalkeeper, four outfield)
///
/// # Raises
/// * ValueError if the roster is too small, ids repeat, or the duration is invalid
#[pyfunction]
#[pyo3(name = "generate_schedule", signature = (participants, total_minutes=crate::config::DEFAULT_SESSION_MINUTES, config=None))]
fn py_generate_schedule(
    participants: Vec<Participant>,
    total_minutes: f64,
    config: Option<RotationConfig>,
) -> PyResult<Vec<Shift>> {
    let config = config.unwrap_or_default();
    let schedule =
        schedule::generate_schedule_with(&participants, session_seconds(total_minutes), &config)?;
    Ok(schedule.into_shifts())
}

/// Format whole seconds as `MM:SS`.
#[pyfunction]
#[pyo3(name = "format_time")]
fn py_format_time(seconds: u64) -> String {
    crate::format::format_time(seconds)
}

/// Roster for the next session (first participant moved to the end).
#[pyfunction]
#[pyo3(name = "rotate_roster")]
fn py_rotate_roster(participants: Vec<Participant>) -> Vec<Participant> {
    schedule::rotate_roster(&participants)
}

/// The squad_rotation Python module.
#[pymodule]
fn squad_rotation(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Participant>()?;
    m.add_class::<Role>()?;
    m.add_class::<Shift>()?;

    // Config types
    m.add_class::<RotationConfig>()?;
    m.add_class::<TimelineConfig>()?;

    // Timeline
    m.add_class::<Phase>()?;
    m.add_class::<Snapshot>()?;
    m.add_class::<TickToken>()?;
    m.add_class::<TickReport>()?;
    m.add_class::<EntryReport>()?;
    m.add_class::<LineupReport>()?;
    m.add_class::<Timeline>()?;

    m.add_function(wrap_pyfunction!(py_generate_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_format_time, m)?)?;
    m.add_function(wrap_pyfunction!(py_rotate_roster, m)?)?;

    Ok(())
}
