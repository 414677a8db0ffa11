//! Countdown timer with an animated wave background whose fill level tracks
//! the remaining time.
//!
//! The crate is split into a host-independent core (timer state machine, wave
//! field, easing, tick loop) and the browser glue in the binary. The core talks
//! to the outside world only through the [`surface::Surface`] and
//! [`frame::Stage`] traits, so it runs and tests on the host as well as in WASM.

/// Timestamp or duration in milliseconds, in `performance.now()` units.
pub type Millis = f64;

/// Default timing and rendering parameters
pub mod defaults {
    /// Fixed part of the refill animation after a reset, in seconds.
    pub const REFILL_BASE_SECS: f64 = 0.5;
    /// Pixel density used when the host reports none.
    pub const PIXEL_DENSITY: f64 = 1.0;
    pub const MS_PER_SECOND: f64 = 1000.0;
}

/// Format a remaining time as `HH:MM:SS`.
///
/// The value is rounded *up* to the next whole second, so a countdown shows
/// `00:00:01` until it actually reaches zero. Hours are not wrapped at 24.
///
/// # Examples
/// ```
/// use wave_timer::format_countdown;
/// assert_eq!(format_countdown(2_500.0), "00:00:03");
/// assert_eq!(format_countdown(90_061_000.0), "25:01:01");
/// ```
pub fn format_countdown(remaining_ms: Millis) -> String {
    let secs = if remaining_ms.is_finite() && remaining_ms > 0.0 {
        (remaining_ms / defaults::MS_PER_SECOND).ceil() as u64
    } else {
        0
    };
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

pub mod easing;
pub mod frame;
pub mod surface;
pub mod timer;
pub mod wave;

pub use frame::{ControlState, PrimaryAction, Stage, WaveTimer};
pub use surface::{BlendMode, Surface, Viewport};
pub use timer::{Countdown, Phase};
pub use wave::{Wave, WaveConfig, WaveConfigError};
