//! Per-frame driver tying the countdown to the wave field.

use crate::surface::{Surface, Viewport};
use crate::timer::{Countdown, Phase};
use crate::wave::{Wave, WaveConfig};
use crate::{format_countdown, Millis};
use log::{debug, info};

/// What the start/pause button does when pressed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PrimaryAction {
    Start,
    Pause,
    Resume,
}

impl PrimaryAction {
    pub fn label(self) -> &'static str {
        match self {
            PrimaryAction::Start => "Start",
            PrimaryAction::Pause => "Pause",
            PrimaryAction::Resume => "Resume",
        }
    }
}

/// Enabled state of the controls for a given phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ControlState {
    pub primary: PrimaryAction,
    pub reset_enabled: bool,
}

impl ControlState {
    pub fn for_phase(phase: Phase) -> Self {
        let primary = match phase {
            Phase::Idle | Phase::Finished => PrimaryAction::Start,
            Phase::Running => PrimaryAction::Pause,
            Phase::Paused => PrimaryAction::Resume,
        };
        Self {
            primary,
            reset_enabled: phase != Phase::Idle,
        }
    }
}

/// Everything the frame loop needs from its host page.
pub trait Stage {
    type Surface: Surface;

    /// Current viewport as reported by the environment.
    fn measure(&self) -> Viewport;
    /// Resize the drawing surface's backing store.
    fn fit(&mut self, viewport: &Viewport);
    fn surface(&mut self) -> &mut Self::Surface;
    fn show_time(&mut self, text: &str);
    /// Move the fill-level indicator to `top` pixels from the viewport top.
    fn place_indicator(&mut self, top: f64);
    fn show_controls(&mut self, controls: ControlState);
}

/// Application state owned by the frame loop.
pub struct WaveTimer {
    timer: Countdown,
    waves: Vec<Wave>,
    viewport: Viewport,
    resize_pending: bool,
    label_stale: bool,
    finish_pending: bool,
}

impl WaveTimer {
    pub fn new(configs: Vec<WaveConfig>, viewport: Viewport, now: Millis) -> Self {
        let waves = configs
            .into_iter()
            .map(|config| Wave::new(config, &viewport, now))
            .collect();
        Self {
            timer: Countdown::new(),
            waves,
            viewport,
            resize_pending: false,
            label_stale: true,
            finish_pending: false,
        }
    }

    /// Handle the start/pause button: start a new countdown when none is in
    /// progress, otherwise pause or resume the current one.
    pub fn press_primary(&mut self, duration_ms: Millis, now: Millis) {
        match self.timer.phase() {
            Phase::Idle | Phase::Finished => self.start(duration_ms, now),
            Phase::Running | Phase::Paused => {
                self.toggle_pause(now);
            }
        }
    }

    pub fn start(&mut self, duration_ms: Millis, now: Millis) {
        self.timer.start(duration_ms, now);
        self.finish_pending = false;
        self.label_stale = true;
    }

    /// Pause or resume. A pause that lands past the deadline finishes the
    /// countdown, and the next frame treats it like a finishing tick.
    pub fn toggle_pause(&mut self, now: Millis) -> bool {
        let toggled = self.timer.toggle_pause(now);
        if toggled {
            self.label_stale = true;
            if self.timer.phase() == Phase::Finished {
                self.finish_pending = true;
            }
        }
        toggled
    }

    /// Return to idle and let every wave ease back to the top.
    pub fn reset(&mut self, now: Millis) {
        self.timer.reset();
        self.finish_pending = false;
        for wave in &mut self.waves {
            wave.refill(now);
        }
        self.label_stale = true;
    }

    /// Flag a viewport change; it is applied at the start of the next frame.
    pub fn notify_resize(&mut self) {
        self.resize_pending = true;
    }

    pub fn frame<S: Stage>(&mut self, now: Millis, stage: &mut S) {
        if self.resize_pending {
            self.viewport = stage.measure();
            stage.fit(&self.viewport);
            for wave in &mut self.waves {
                wave.resize(self.viewport.width, self.viewport.height);
            }
            self.resize_pending = false;
            debug!(
                "Viewport resized to {}x{} @{}x",
                self.viewport.width, self.viewport.height, self.viewport.pixel_density
            );
        }

        let ticked_to_finish = self.timer.tick(now);
        let just_finished = ticked_to_finish || std::mem::take(&mut self.finish_pending);
        let running = self.timer.phase() == Phase::Running;

        if running || just_finished {
            let target = self.viewport.height * (1.0 - self.timer.progress());
            for wave in &mut self.waves {
                wave.set_target_height(target);
            }
        }
        for wave in &mut self.waves {
            wave.advance(now);
        }

        if running || just_finished || self.label_stale {
            stage.show_time(&format_countdown(self.timer.remaining_ms()));
            self.label_stale = false;
        }
        if just_finished {
            info!("Wave fully drained");
        }

        let surface = stage.surface();
        surface.clear(&self.viewport);
        for wave in &self.waves {
            wave.render(surface);
        }

        if let Some(front) = self.waves.first() {
            stage.place_indicator(front.baseline());
        }
        stage.show_controls(ControlState::for_phase(self.timer.phase()));
    }

    pub fn timer(&self) -> &Countdown {
        &self.timer
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::{Op, RecordingSurface};

    struct FakeStage {
        viewport: Viewport,
        fitted: Vec<Viewport>,
        surface: RecordingSurface,
        labels: Vec<String>,
        indicator: Option<f64>,
        controls: Option<ControlState>,
    }

    impl FakeStage {
        fn new(viewport: Viewport) -> Self {
            Self {
                viewport,
                fitted: Vec::new(),
                surface: RecordingSurface::default(),
                labels: Vec::new(),
                indicator: None,
                controls: None,
            }
        }
    }

    impl Stage for FakeStage {
        type Surface = RecordingSurface;

        fn measure(&self) -> Viewport {
            self.viewport
        }
        fn fit(&mut self, viewport: &Viewport) {
            self.fitted.push(*viewport);
        }
        fn surface(&mut self) -> &mut RecordingSurface {
            &mut self.surface
        }
        fn show_time(&mut self, text: &str) {
            self.labels.push(text.to_string());
        }
        fn place_indicator(&mut self, top: f64) {
            self.indicator = Some(top);
        }
        fn show_controls(&mut self, controls: ControlState) {
            self.controls = Some(controls);
        }
    }

    fn app() -> (WaveTimer, FakeStage) {
        let viewport = Viewport::new(400.0, 1_000.0, 1.0);
        let app = WaveTimer::new(WaveConfig::presets().unwrap(), viewport, 0.0);
        (app, FakeStage::new(viewport))
    }

    #[test]
    fn test_idle_frame_paints_full_waves() {
        let (mut app, mut stage) = app();
        app.frame(16.0, &mut stage);

        assert_eq!(stage.labels, vec!["00:00:00".to_string()]);
        assert_eq!(stage.surface.ops[0], Op::Clear(400.0, 1_000.0));
        assert_eq!(stage.surface.paints(), 3);
        assert_eq!(stage.indicator, Some(0.0));
        assert_eq!(
            stage.controls,
            Some(ControlState {
                primary: PrimaryAction::Start,
                reset_enabled: false,
            })
        );

        // Nothing changed, so the label is not redrawn.
        app.frame(32.0, &mut stage);
        assert_eq!(stage.labels.len(), 1);
        assert_eq!(stage.surface.paints(), 6);
    }

    #[test]
    fn test_running_drains_waves() {
        let (mut app, mut stage) = app();
        app.press_primary(10_000.0, 0.0);
        app.frame(2_500.0, &mut stage);

        assert_eq!(app.timer().phase(), Phase::Running);
        assert!(app.waves().iter().all(|w| w.baseline() == 250.0));
        assert_eq!(stage.indicator, Some(250.0));
        assert_eq!(stage.labels.last().unwrap(), "00:00:08");
        assert_eq!(stage.controls.unwrap().primary, PrimaryAction::Pause);
        assert!(stage.controls.unwrap().reset_enabled);
    }

    #[test]
    fn test_finish_drains_completely_and_reports_once() {
        let (mut app, mut stage) = app();
        app.start(5_000.0, 0.0);
        app.frame(2_500.0, &mut stage);
        assert_eq!(stage.labels.last().unwrap(), "00:00:03");

        app.frame(5_000.0, &mut stage);
        assert_eq!(app.timer().phase(), Phase::Finished);
        assert_eq!(stage.labels.last().unwrap(), "00:00:00");
        assert!(app.waves().iter().all(|w| w.baseline() == 1_000.0));
        assert_eq!(stage.controls.unwrap().primary, PrimaryAction::Start);

        let labels = stage.labels.len();
        app.frame(6_000.0, &mut stage);
        assert_eq!(stage.labels.len(), labels);
    }

    #[test]
    fn test_paused_frames_hold_level_and_label() {
        let (mut app, mut stage) = app();
        app.press_primary(10_000.0, 0.0);
        app.frame(3_000.0, &mut stage);
        app.press_primary(0.0, 3_000.0);
        assert_eq!(app.timer().phase(), Phase::Paused);

        let labels = stage.labels.len();
        app.frame(9_000.0, &mut stage);
        assert_eq!(stage.labels.len(), labels);
        assert_eq!(app.timer().remaining_ms(), 7_000.0);
        assert!(app.waves().iter().all(|w| (w.baseline() - 300.0).abs() < 1e-9));
        assert_eq!(stage.controls.unwrap().primary, PrimaryAction::Resume);

        app.press_primary(0.0, 9_000.0);
        app.frame(9_500.0, &mut stage);
        assert_eq!(app.timer().remaining_ms(), 6_500.0);
    }

    #[test]
    fn test_reset_refills_smoothly() {
        let (mut app, mut stage) = app();
        app.start(1_000.0, 0.0);
        app.frame(1_000.0, &mut stage);
        assert_eq!(app.timer().phase(), Phase::Finished);

        app.reset(2_000.0);
        assert_eq!(app.timer().phase(), Phase::Idle);
        assert_eq!(app.timer().remaining_ms(), 1_000.0);
        assert!(app.waves().iter().all(|w| w.is_refilling()));

        // Fully drained: 1.0 + 0.5 = 1.5 s to refill.
        app.frame(2_000.0, &mut stage);
        assert_eq!(stage.labels.last().unwrap(), "00:00:01");
        assert_eq!(stage.indicator, Some(1_000.0));

        app.frame(2_750.0, &mut stage);
        let mid = stage.indicator.unwrap();
        assert!(mid > 0.0 && mid < 1_000.0);

        app.frame(3_500.0, &mut stage);
        assert!(stage.indicator.unwrap().abs() < 1e-9);
        assert!(app.waves().iter().all(|w| !w.is_refilling()));
        assert_eq!(
            stage.controls,
            Some(ControlState {
                primary: PrimaryAction::Start,
                reset_enabled: false,
            })
        );
    }

    #[test]
    fn test_resize_is_applied_on_next_frame() {
        let (mut app, mut stage) = app();
        stage.viewport = Viewport::new(800.0, 500.0, 2.0);

        app.notify_resize();
        assert_eq!(app.viewport().width, 400.0);
        assert!(stage.fitted.is_empty());

        app.frame(16.0, &mut stage);
        assert_eq!(stage.fitted, vec![Viewport::new(800.0, 500.0, 2.0)]);
        assert_eq!(app.viewport().height, 500.0);
        for wave in app.waves() {
            assert!((wave.points().last().unwrap().x - 800.0).abs() < 1e-9);
            assert_eq!(wave.points().len(), wave.config().segments + 1);
        }

        app.frame(32.0, &mut stage);
        assert_eq!(stage.fitted.len(), 1);
    }

    #[test]
    fn test_start_from_finished_restarts() {
        let (mut app, mut stage) = app();
        app.press_primary(500.0, 0.0);
        app.frame(600.0, &mut stage);
        assert_eq!(app.timer().phase(), Phase::Finished);

        app.press_primary(2_000.0, 1_000.0);
        app.frame(1_500.0, &mut stage);
        assert_eq!(app.timer().phase(), Phase::Running);
        assert_eq!(app.timer().remaining_ms(), 1_500.0);
    }

    #[test]
    fn test_pause_past_deadline_shows_finished() {
        let (mut app, mut stage) = app();
        app.press_primary(1_000.0, 0.0);
        app.frame(990.0, &mut stage);
        assert_eq!(stage.labels.last().map(String::as_str), Some("00:00:01"));

        // The click arrives after the deadline but before the next frame.
        assert!(app.toggle_pause(1_005.0));
        assert_eq!(app.timer().phase(), Phase::Finished);

        app.frame(1_010.0, &mut stage);
        assert_eq!(stage.labels.last().map(String::as_str), Some("00:00:00"));
        for wave in app.waves() {
            assert_eq!(wave.baseline(), 1_000.0);
        }
        assert_eq!(stage.indicator, Some(1_000.0));

        let labels = stage.labels.len();
        app.frame(2_000.0, &mut stage);
        assert_eq!(stage.labels.len(), labels);
        assert_eq!(stage.indicator, Some(1_000.0));
        assert_eq!(
            stage.controls.map(|c| c.primary),
            Some(PrimaryAction::Start)
        );
    }

    #[test]
    fn test_pause_refreshes_label_across_second_boundary() {
        let (mut app, mut stage) = app();
        app.press_primary(10_000.0, 0.0);
        app.frame(2_999.5, &mut stage);
        assert_eq!(stage.labels.last().map(String::as_str), Some("00:00:08"));

        app.press_primary(0.0, 3_000.5);
        assert_eq!(app.timer().phase(), Phase::Paused);
        assert_eq!(app.timer().remaining_ms(), 6_999.5);

        app.frame(3_010.0, &mut stage);
        assert_eq!(stage.labels.last().map(String::as_str), Some("00:00:07"));

        let labels = stage.labels.len();
        app.frame(5_000.0, &mut stage);
        assert_eq!(stage.labels.len(), labels);
    }
}
