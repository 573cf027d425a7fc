//! Countdown state machine
//!
//! Remaining time is always recomputed from a monotonic deadline, never by
//! decrementing a counter, so pause/resume and slow frames do not drift.
//! Pausing freezes the remaining amount; resuming derives a fresh deadline
//! from it. All methods take `now` explicitly so the machine is testable
//! without sleeping.

use std::time::{Duration, Instant};

use crate::db::TableDump;

/// Countdown phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Finished,
}

/// A countdown toward a monotonic deadline
#[derive(Debug)]
pub struct Countdown {
    total: Duration,
    remaining: Duration,
    phase: Phase,
    deadline: Instant,
}

impl Countdown {
    #[must_use]
    pub fn new(total: Duration, now: Instant) -> Self {
        Self { total, remaining: total, phase: Phase::Running, deadline: now + total }
    }

    /// Back to Running with the full configured time; valid from any phase
    pub fn reset(&mut self, now: Instant) {
        self.remaining = self.total;
        self.phase = Phase::Running;
        self.deadline = now + self.total;
    }

    /// Toggle Running↔Paused. No effect once Finished.
    pub fn toggle_pause(&mut self, now: Instant) {
        match self.phase {
            Phase::Running => {
                self.remaining = self.deadline.saturating_duration_since(now);
                self.phase = Phase::Paused;
            }
            Phase::Paused => {
                self.deadline = now + self.remaining;
                self.phase = Phase::Running;
            }
            Phase::Finished => {}
        }
    }

    /// Recompute remaining time. Returns true exactly once, on the tick that
    /// reaches zero.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.remaining = self.deadline.saturating_duration_since(now);
        if self.remaining.is_zero() {
            self.phase = Phase::Finished;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Whole-second MM:SS rendering of the remaining time
    #[must_use]
    pub fn display(&self) -> String {
        let secs = self.remaining.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Outcome of the background table query, deposited in a single-slot
/// hand-off. "No outcome yet" is represented by the empty slot itself.
#[derive(Debug)]
pub enum FetchOutcome {
    Table(TableDump),
    Failed(String),
}
