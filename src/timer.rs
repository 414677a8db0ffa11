//! Countdown state machine.
//!
//! Remaining time is always derived from `(total, start_epoch, now)` while
//! running, never accumulated frame by frame, so irregular frame delays do not
//! cause drift.

use crate::Millis;
use log::info;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Clone, Debug)]
pub struct Countdown {
    total_ms: Millis,
    remaining_ms: Millis,
    start_epoch: Millis,
    phase: Phase,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            total_ms: 0.0,
            remaining_ms: 0.0,
            start_epoch: 0.0,
            phase: Phase::Idle,
        }
    }

    /// Start a fresh countdown of `duration_ms`, whatever the current phase.
    ///
    /// Negative or NaN durations are treated as zero; such a countdown
    /// finishes on its first tick.
    pub fn start(&mut self, duration_ms: Millis, now: Millis) {
        let duration = duration_ms.max(0.0);
        self.total_ms = duration;
        self.remaining_ms = duration;
        self.start_epoch = now;
        self.phase = Phase::Running;
        info!("Countdown started: {} ms", duration);
    }

    /// Pause a running countdown or resume a paused one.
    ///
    /// Returns `false` when there was nothing to toggle (idle or finished).
    pub fn toggle_pause(&mut self, now: Millis) -> bool {
        match self.phase {
            Phase::Running => {
                self.remaining_ms = self.remaining_at(now);
                if self.remaining_ms <= 0.0 {
                    self.finish();
                } else {
                    self.phase = Phase::Paused;
                    info!("Countdown paused with {} ms left", self.remaining_ms);
                }
                true
            }
            Phase::Paused => {
                self.start_epoch = now - (self.total_ms - self.remaining_ms);
                self.phase = Phase::Running;
                info!("Countdown resumed with {} ms left", self.remaining_ms);
                true
            }
            Phase::Idle | Phase::Finished => false,
        }
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.remaining_ms = self.total_ms;
        info!("Countdown reset to {} ms", self.total_ms);
    }

    /// Advance the countdown to `now`.
    ///
    /// Returns `true` only on the tick that moves the countdown into
    /// [`Phase::Finished`].
    pub fn tick(&mut self, now: Millis) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.remaining_ms = self.remaining_at(now);
        if self.remaining_ms <= 0.0 {
            self.finish();
            return true;
        }
        false
    }

    /// Fraction of the total duration still remaining, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.total_ms <= 0.0 {
            return 1.0;
        }
        (self.remaining_ms / self.total_ms).clamp(0.0, 1.0)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_ms(&self) -> Millis {
        self.remaining_ms
    }

    pub fn total_ms(&self) -> Millis {
        self.total_ms
    }

    pub fn start_epoch(&self) -> Millis {
        self.start_epoch
    }

    fn remaining_at(&self, now: Millis) -> Millis {
        // A frame timestamp may predate the click that started the run.
        let elapsed = (now - self.start_epoch).max(0.0);
        (self.total_ms - elapsed).max(0.0)
    }

    fn finish(&mut self) {
        self.remaining_ms = 0.0;
        self.phase = Phase::Finished;
        info!("Countdown finished");
    }
}
