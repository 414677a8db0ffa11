use crate::config::{MAX_MINUTES, MAX_SECONDS, SECONDS_STEP};
use once_cell::sync::Lazy;
use regex::Regex;
use wave_timer::Millis;

static NON_DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D+").unwrap());

/// One of the three duration input fields.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
}

impl TimeField {
    pub fn label(self) -> &'static str {
        match self {
            TimeField::Hours => "Hours",
            TimeField::Minutes => "Minutes",
            TimeField::Seconds => "Seconds",
        }
    }

    /// Largest accepted value; hours are unbounded.
    pub fn max(self) -> Option<u64> {
        match self {
            TimeField::Hours => None,
            TimeField::Minutes => Some(MAX_MINUTES),
            TimeField::Seconds => Some(MAX_SECONDS),
        }
    }

    /// Stepper increment for this field.
    pub fn step(self) -> u64 {
        match self {
            TimeField::Seconds => SECONDS_STEP.max(1),
            TimeField::Hours | TimeField::Minutes => 1,
        }
    }

    pub fn clamp(self, value: u64) -> u64 {
        match self.max() {
            Some(max) => value.min(max),
            None => value,
        }
    }
}

/// Strip everything but ASCII digits.
pub fn sanitize_digits(input: &str) -> String {
    NON_DIGIT_REGEX.replace_all(input, "").into_owned()
}

/// Read a field's text as a number, treating anything unreadable as zero.
///
/// Digit strings too long for `u64` saturate rather than reset to zero.
pub fn parse_or_zero(input: &str) -> u64 {
    let digits = sanitize_digits(input);
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Move a field's value one step up (`direction > 0`) or down.
pub fn step_value(field: TimeField, value: u64, direction: i64) -> u64 {
    snap_step(field.clamp(value), direction, field.step(), field.max())
}

/// Step `value` to the next multiple of `step` in `direction`.
///
/// Decrements stop at zero; increments stop at the highest multiple of
/// `step` not above `max`.
pub fn snap_step(value: u64, direction: i64, step: u64, max: Option<u64>) -> u64 {
    let step = step.max(1);
    let next = match direction.signum() {
        1 => (value / step).saturating_add(1).saturating_mul(step),
        -1 if value % step != 0 => value - value % step,
        -1 => value.saturating_sub(step),
        _ => value,
    };
    match max {
        Some(max) => next.min(max - max % step),
        None => next,
    }
}

/// Total countdown length for the three field values.
pub fn duration_ms(hours: u64, minutes: u64, seconds: u64) -> Millis {
    (hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64) * 1000.0
}

/// Canonical two-digit text for a committed field value.
pub fn format_field(value: u64) -> String {
    format!("{:02}", value)
}
