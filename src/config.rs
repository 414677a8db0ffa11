//! Application-level configuration constants.

use log::Level;

pub const LOG_LEVEL: Level = Level::Info;

// Stepper buttons: one step on press, then repeat while held
pub const HOLD_REPEAT_MS: u32 = 80;
pub const HOLD_DELAY_TICKS: u32 = 5;

// Field limits
pub const MAX_MINUTES: u64 = 59;
pub const MAX_SECONDS: u64 = 59;
/// Seconds stepper increment; set to 15 to snap to quarter minutes.
pub const SECONDS_STEP: u64 = 1;

// Default values for input fields
pub const DEFAULT_HOURS: u64 = 0;
pub const DEFAULT_MINUTES: u64 = 5;
pub const DEFAULT_SECONDS: u64 = 0;
