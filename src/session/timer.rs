//! Timer requests handed from the controller to whatever drives it.

use std::time::Duration;

/// Identifies one scheduled timer. Ids are never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerRequest {
    /// Fire `id` every `every` until cancelled.
    Repeat { id: TimerId, every: Duration },
    /// Fire `id` once after `after`.
    Once { id: TimerId, after: Duration },
    Cancel(TimerId),
}

#[derive(Debug, Default)]
pub(crate) struct TimerIds {
    next: u64,
}

impl TimerIds {
    pub(crate) fn next(&mut self) -> TimerId {
        self.next += 1;
        TimerId(self.next)
    }
}
