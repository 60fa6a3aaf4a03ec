//! Live session timeline driven by a one-second clock.
//!
//! The controller owns the play/pause/break state machine; every derived
//! value (current shift, next change, lineups) comes from the pure functions
//! in `queries`.

mod clock;
mod controller;
pub mod queries;
mod state;

pub use clock::{drive, TickToken};
pub use controller::{Command, TickOutcome, Timeline, TimelineError};
pub use queries::{EntryStatus, Lineup, Snapshot};
pub use state::{Phase, TimelineState};
