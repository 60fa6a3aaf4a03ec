//! One-second clock plumbing for the timeline.
//!
//! Each time the controller starts ticking it arms the clock and hands out a
//! [`TickToken`] for that run. Run epochs come from one process-wide counter,
//! so a token is accepted by exactly one clock and only until that clock is
//! disarmed or re-armed.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use super::controller::{TickOutcome, Timeline};

/// Proof that a tick belongs to the current run of the clock.
#[cfg_attr(feature = "python", pyclass(frozen, eq))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickToken {
    epoch: u64,
}

/// Epoch 0 is never handed out, so a default clock accepts nothing.
static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

/// Arming state of the periodic tick source.
#[derive(Debug, Default)]
pub(crate) struct Clock {
    epoch: u64,
    armed: bool,
}

impl Clone for Clock {
    /// An armed copy starts a run of its own; the original's token is stale on it.
    fn clone(&self) -> Self {
        let mut clock = Clock::default();
        if self.armed {
            clock.arm();
        }
        clock
    }
}

impl Clock {
    /// Start a new run and return its token. Any earlier token goes stale.
    pub(crate) fn arm(&mut self) -> TickToken {
        self.epoch = next_epoch();
        self.armed = true;
        TickToken { epoch: self.epoch }
    }

    /// Stop delivering ticks; outstanding tokens go stale.
    pub(crate) fn disarm(&mut self) {
        self.armed = false;
    }

    pub(crate) fn accepts(&self, token: TickToken) -> bool {
        self.armed && token.epoch == self.epoch
    }

    /// Token for the active run, if the clock is armed.
    pub(crate) fn active(&self) -> Option<TickToken> {
        self.armed.then_some(TickToken { epoch: self.epoch })
    }
}

/// Drive `timeline` with one tick per `interval` until the clock stops.
///
/// Runs on the calling thread. `observer` sees every tick outcome before the
/// next tick is taken and may issue commands (pause, reset, skip the break);
/// a command that stops the clock ends the loop. Returning
/// `ControlFlow::Break` also ends it, leaving the clock armed.
///
/// Returns the number of ticks delivered.
pub fn drive<F>(timeline: &mut Timeline, interval: Duration, mut observer: F) -> usize
where
    F: FnMut(&mut Timeline, TickOutcome) -> ControlFlow<()>,
{
    let mut delivered = 0;
    while let Some(token) = timeline.active_token() {
        if !interval.is_zero() {
            thread::sleep(interval);
        }
        let outcome = timeline.tick(token);
        delivered += 1;
        if observer(timeline, outcome).is_break() {
            break;
        }
    }
    delivered
}
