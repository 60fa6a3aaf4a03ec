//! Logging macros for the rotation timeline with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0).
//! Verbosity levels:
//! - 0: SILENT (nothing)
//! - 1: TRANSITIONS (phase changes, session starts, shift changes)
//! - 2: TICKS (per-tick decisions, rejected ticks)
//! - 3: DEBUG (full schedule dumps, seat arithmetic)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_TRANSITIONS: u8 = 1;
pub const VERBOSITY_TICKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at TRANSITIONS level (verbosity >= 1).
///
/// Used for: phase changes, half-time, session rotation.
#[macro_export]
macro_rules! log_transitions {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_TRANSITIONS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at TICKS level (verbosity >= 2).
#[macro_export]
macro_rules! log_ticks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_TICKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: generated schedules and per-seat role decisions.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_TRANSITIONS);
        assert!(VERBOSITY_TRANSITIONS < VERBOSITY_TICKS);
        assert!(VERBOSITY_TICKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_log_macros_compile() {
        let verbosity = VERBOSITY_SILENT;
        log_transitions!(verbosity, "phase {}", "Running");
        log_ticks!(verbosity, "tick {}", 2);
        log_debug!(verbosity, "seat {}", 3);
    }
}
