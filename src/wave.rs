//! Animated wave fills.
//!
//! A wave is a row of sample points across the viewport. Each point carries a
//! fixed phase offset into the ripple oscillation; the whole row sits at a
//! baseline that follows the countdown progress.

use crate::defaults::{MS_PER_SECOND, REFILL_BASE_SECS};
use crate::easing::{oscillate, Easing, Tween};
use crate::surface::{BlendMode, Surface, Viewport};
use crate::Millis;
use log::debug;
use serde::Deserialize;
use std::fmt;

const PRESETS_JSON: &str = include_str!("waves.json");

#[derive(Debug)]
pub enum WaveConfigError {
    Parse(serde_json::Error),
    InvalidAmplitude(f64),
    InvalidSweep(f64),
    InvalidFrequency(f64),
    NoSegments,
    Empty,
}

impl fmt::Display for WaveConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveConfigError::Parse(e) => write!(f, "Failed to parse wave presets: {}", e),
            WaveConfigError::InvalidAmplitude(a) => {
                write!(f, "Wave amplitude must be a non-negative number, got {}", a)
            }
            WaveConfigError::InvalidSweep(s) => {
                write!(f, "Wave sweep duration must be positive, got {}", s)
            }
            WaveConfigError::InvalidFrequency(v) => {
                write!(f, "Wave frequency must be a non-negative number, got {}", v)
            }
            WaveConfigError::NoSegments => write!(f, "A wave needs at least one segment"),
            WaveConfigError::Empty => write!(f, "At least one wave must be configured"),
        }
    }
}

impl std::error::Error for WaveConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WaveConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for WaveConfigError {
    fn from(e: serde_json::Error) -> Self {
        WaveConfigError::Parse(e)
    }
}

/// Static look of one wave. Missing fields fall back to [`Default`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Peak-to-peak ripple height in pixels.
    pub amplitude: f64,
    /// Seconds for one sweep of the ripple from crest to trough.
    pub sweep_secs: f64,
    /// Ripple phase advance across the full width, in sweeps.
    pub frequency: f64,
    pub segments: usize,
    /// Any CSS colour.
    pub fill: String,
    pub blend: BlendMode,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            amplitude: 50.0,
            sweep_secs: 2.0,
            frequency: 2.0,
            segments: 100,
            fill: "rgba(0, 150, 255, 0.5)".to_string(),
            blend: BlendMode::default(),
        }
    }
}

impl WaveConfig {
    /// The bundled three-layer wave set, back to front.
    pub fn presets() -> Result<Vec<WaveConfig>, WaveConfigError> {
        Self::parse_list(PRESETS_JSON)
    }

    /// Parse and validate a JSON array of wave configurations.
    pub fn parse_list(json: &str) -> Result<Vec<WaveConfig>, WaveConfigError> {
        let configs: Vec<WaveConfig> = serde_json::from_str(json)?;
        if configs.is_empty() {
            return Err(WaveConfigError::Empty);
        }
        for config in &configs {
            config.validate()?;
        }
        Ok(configs)
    }

    pub fn validate(&self) -> Result<(), WaveConfigError> {
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(WaveConfigError::InvalidAmplitude(self.amplitude));
        }
        if !self.sweep_secs.is_finite() || self.sweep_secs <= 0.0 {
            return Err(WaveConfigError::InvalidSweep(self.sweep_secs));
        }
        if !self.frequency.is_finite() || self.frequency < 0.0 {
            return Err(WaveConfigError::InvalidFrequency(self.frequency));
        }
        if self.segments == 0 {
            return Err(WaveConfigError::NoSegments);
        }
        Ok(())
    }

    /// Duration of one full ripple cycle (down and back up) in seconds.
    pub fn period_secs(&self) -> f64 {
        2.0 * self.sweep_secs
    }
}

/// One sample along the top edge of a wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RipplePoint {
    pub x: f64,
    /// Fixed phase offset into the oscillation, in sweeps.
    pub offset: f64,
    /// Current oscillation value in `[-1, 1]`.
    pub y: f64,
}

#[derive(Clone, Debug)]
pub struct Wave {
    config: WaveConfig,
    points: Vec<RipplePoint>,
    width: f64,
    height: f64,
    baseline: f64,
    refill: Option<Tween>,
    epoch: Millis,
}

impl Wave {
    /// Build a wave over `viewport`; its ripple clock starts at `epoch`.
    pub fn new(config: WaveConfig, viewport: &Viewport, epoch: Millis) -> Self {
        let mut wave = Self {
            config,
            points: Vec::new(),
            width: viewport.width,
            height: viewport.height,
            baseline: 0.0,
            refill: None,
            epoch,
        };
        wave.initialize(viewport.width);
        wave
    }

    /// Regenerate the sample points for `width`, discarding ripple state.
    pub fn initialize(&mut self, width: f64) {
        let segments = self.config.segments.max(1);
        let interval = width / segments as f64;
        self.width = width;
        self.points = (0..=segments)
            .map(|i| {
                let norm = i as f64 / segments as f64;
                let offset = norm * self.config.frequency;
                RipplePoint {
                    x: i as f64 * interval,
                    offset,
                    y: oscillate(0.0, self.config.sweep_secs, offset),
                }
            })
            .collect();
    }

    /// Re-sample the ripple at `now`.
    pub fn advance_oscillation(&mut self, now: Millis) {
        let elapsed = (now - self.epoch) / MS_PER_SECOND;
        let sweep = self.config.sweep_secs;
        for point in &mut self.points {
            point.y = oscillate(elapsed, sweep, point.offset);
        }
    }

    /// Apply any running refill transition, then re-sample the ripple.
    pub fn advance(&mut self, now: Millis) {
        if let Some(tween) = &self.refill {
            self.baseline = tween.value_at(now);
            if tween.is_complete(now) {
                self.refill = None;
            }
        }
        self.advance_oscillation(now);
    }

    /// Move the baseline straight to `target`, cancelling a refill in flight.
    pub fn set_target_height(&mut self, target: f64) {
        self.refill = None;
        self.baseline = target;
    }

    /// Begin easing the baseline back to the top of the viewport.
    ///
    /// The transition takes longer the further the wave has drained.
    pub fn refill(&mut self, now: Millis) {
        let depth = if self.height > 0.0 {
            self.baseline / self.height
        } else {
            0.0
        };
        let duration = depth.max(0.0) + REFILL_BASE_SECS;
        debug!(
            "Refilling wave from {:.1}px over {:.2}s",
            self.baseline, duration
        );
        self.refill = Some(Tween::new(now, self.baseline, 0.0, duration, Easing::SineOut));
    }

    /// Stretch the sample points over a new viewport, keeping ripple phase.
    pub fn resize(&mut self, width: f64, height: f64) {
        let segments = self.points.len().saturating_sub(1).max(1);
        let interval = width / segments as f64;
        for (i, point) in self.points.iter_mut().enumerate() {
            point.x = i as f64 * interval;
        }
        self.width = width;
        self.height = height;
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some((first, rest)) = self.points.split_first() else {
            return;
        };
        let half = self.config.amplitude / 2.0;

        surface.set_blend(self.config.blend);
        surface.set_fill_color(&self.config.fill);
        surface.begin_path();
        surface.move_to(first.x, self.baseline + first.y * half);
        for point in rest {
            surface.line_to(point.x, self.baseline + point.y * half);
        }
        surface.line_to(self.width, self.height);
        surface.line_to(0.0, self.height);
        surface.close_path();
        surface.fill();
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn points(&self) -> &[RipplePoint] {
        &self.points
    }

    /// Distance of the resting fill level from the top of the viewport.
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn is_refilling(&self) -> bool {
        self.refill.is_some()
    }
}
