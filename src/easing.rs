//! Time-based interpolation.
//!
//! Every animated value is a pure function of the current timestamp: a
//! transition stores only where and when it started, and the oscillation is
//! evaluated from the elapsed time on each frame.

use crate::defaults::MS_PER_SECOND;
use crate::Millis;
use std::f64::consts::{FRAC_PI_2, PI};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Easing {
    Linear,
    SineIn,
    SineOut,
    SineInOut,
}

impl Easing {
    /// Map a linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SineIn => 1.0 - (t * FRAC_PI_2).cos(),
            Easing::SineOut => (t * FRAC_PI_2).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Value of the perpetual ripple oscillation, in `[-1, 1]`.
///
/// The value sweeps from `+1` to `-1` over `sweep_secs` along an ease-in-out
/// sine curve, then sweeps back, forever. `offset` shifts the starting point
/// by a number of sweeps (`0.5` starts half way down the first sweep, `1.0`
/// starts at the bottom). One full cycle therefore lasts `2 * sweep_secs`.
pub fn oscillate(elapsed_secs: f64, sweep_secs: f64, offset: f64) -> f64 {
    if sweep_secs <= 0.0 || !sweep_secs.is_finite() {
        return 1.0;
    }
    let sweeps = (elapsed_secs / sweep_secs + offset).max(0.0);
    let cycle = sweeps.floor();
    let mut local = sweeps - cycle;
    if cycle as u64 % 2 == 1 {
        local = 1.0 - local;
    }
    lerp(1.0, -1.0, Easing::SineInOut.apply(local))
}

/// A single eased transition from one value to another.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    start: Millis,
    from: f64,
    to: f64,
    duration_secs: f64,
    easing: Easing,
}

impl Tween {
    pub fn new(start: Millis, from: f64, to: f64, duration_secs: f64, easing: Easing) -> Self {
        Self {
            start,
            from,
            to,
            duration_secs: duration_secs.max(0.0),
            easing,
        }
    }

    /// Linear progress of the transition at `now`, clamped to `[0, 1]`.
    pub fn progress(&self, now: Millis) -> f64 {
        if self.duration_secs == 0.0 {
            return 1.0;
        }
        let elapsed = (now - self.start) / MS_PER_SECOND;
        (elapsed / self.duration_secs).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now: Millis) -> f64 {
        lerp(self.from, self.to, self.easing.apply(self.progress(now)))
    }

    pub fn is_complete(&self, now: Millis) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::WaveConfig;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[rstest]
    #[case(Easing::Linear)]
    #[case(Easing::SineIn)]
    #[case(Easing::SineOut)]
    #[case(Easing::SineInOut)]
    fn test_easing_endpoints(#[case] easing: Easing) {
        assert!(close(easing.apply(0.0), 0.0));
        assert!(close(easing.apply(1.0), 1.0));
        assert!(close(easing.apply(-2.0), 0.0));
        assert!(close(easing.apply(3.0), 1.0));
    }

    #[test]
    fn test_sine_in_out_is_symmetric() {
        assert!(close(Easing::SineInOut.apply(0.5), 0.5));
        let a = Easing::SineInOut.apply(0.2);
        let b = Easing::SineInOut.apply(0.8);
        assert!(close(a + b, 1.0));
    }

    #[test]
    fn test_sine_out_front_loads() {
        assert!(Easing::SineOut.apply(0.5) > 0.5);
        assert!(Easing::SineIn.apply(0.5) < 0.5);
    }

    #[test]
    fn test_oscillate_seed_values() {
        assert!(close(oscillate(0.0, 2.0, 0.0), 1.0));
        assert!(close(oscillate(1.0, 2.0, 0.0), 0.0));
        assert!(close(oscillate(2.0, 2.0, 0.0), -1.0));
        assert!(close(oscillate(3.0, 2.0, 0.0), 0.0));
        assert!(close(oscillate(0.0, 2.0, 0.5), 0.0));
        assert!(close(oscillate(0.0, 2.0, 1.0), -1.0));
    }

    #[test]
    fn test_oscillate_is_periodic() {
        let config = WaveConfig {
            sweep_secs: 1.5,
            ..WaveConfig::default()
        };
        let (sweep, period) = (config.sweep_secs, config.period_secs());
        for offset in [0.0, 0.25, 1.3, 2.9] {
            for step in 0..20 {
                let t = step as f64 * 0.137;
                let a = oscillate(t, sweep, offset);
                let b = oscillate(t + period, sweep, offset);
                let c = oscillate(t + 5.0 * period, sweep, offset);
                assert!((a - b).abs() < 1e-6, "t={} offset={}", t, offset);
                assert!((a - c).abs() < 1e-6, "t={} offset={}", t, offset);
            }
        }
    }

    #[test]
    fn test_oscillate_stays_in_range() {
        for step in 0..500 {
            let y = oscillate(step as f64 * 0.031, 0.7, 0.4);
            assert!((-1.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn test_oscillate_degenerate_sweep() {
        assert_eq!(oscillate(3.0, 0.0, 0.5), 1.0);
    }

    #[test]
    fn test_tween_eases_toward_target() {
        let tween = Tween::new(1_000.0, 400.0, 0.0, 2.0, Easing::SineOut);
        assert_eq!(tween.target(), 0.0);
        assert_eq!(tween.duration_secs(), 2.0);
        assert_eq!(tween.value_at(1_000.0), 400.0);
        assert_eq!(tween.value_at(500.0), 400.0);

        let mid = tween.value_at(2_000.0);
        assert!(mid < 200.0, "ease-out should be past half way, got {}", mid);
        assert!(mid > 0.0);
        assert!(!tween.is_complete(2_000.0));

        assert!(close(tween.value_at(3_000.0), 0.0));
        assert!(tween.is_complete(3_000.0));
        assert!(close(tween.value_at(10_000.0), 0.0));
    }

    #[test]
    fn test_zero_length_tween_completes_immediately() {
        let tween = Tween::new(0.0, 5.0, 1.0, 0.0, Easing::Linear);
        assert!(tween.is_complete(0.0));
        assert_eq!(tween.value_at(0.0), 1.0);
    }
}
