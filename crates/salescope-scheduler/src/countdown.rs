use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDateTime};

use crate::engine::TriggerState;

/// Read-only countdown view over the scheduler state.
///
/// Two-tier fallback: the engine's resolved next-fire time is authoritative;
/// until it exists, the nominal interval cached at install keeps the display
/// sane (a calendar trigger has no fixed interval to show otherwise); with
/// nothing installed the countdown is 0.
#[derive(Clone)]
pub struct Countdown {
    state: Arc<Mutex<TriggerState>>,
}

impl Countdown {
    pub(crate) fn new(state: Arc<Mutex<TriggerState>>) -> Self {
        Self { state }
    }

    /// Whole seconds until the next firing, clamped at 0.
    ///
    /// Both sides of the subtraction are naive local time, matching the
    /// scheduler's own arithmetic.
    pub fn seconds_remaining(&self) -> i64 {
        self.seconds_remaining_at(Local::now().naive_local())
    }

    pub(crate) fn seconds_remaining_at(&self, now: NaiveDateTime) -> i64 {
        let state = self.state.lock().unwrap();
        if let Some(due) = state.active.as_ref().and_then(|a| a.next_fire) {
            return (due - now).num_seconds().max(0);
        }
        state.fallback.map(|d| d.num_seconds()).unwrap_or(0)
    }
}
