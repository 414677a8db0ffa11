//! Main module for the wave countdown timer using Yew.
//! Mounts the canvas, wires the controls and runs the per-frame loop.

use log::{error, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wave_timer::{format_countdown, ControlState, Phase, Stage, Viewport, WaveConfig, WaveTimer};
use web_sys::{HtmlCanvasElement, HtmlElement};
use yew::prelude::*;

mod canvas;
mod components;
mod config;
mod hooks;
mod pump;
mod utils;

use canvas::{measure_viewport, now_ms, CanvasSurface, SetupError};
use components::{Controls, TimeFieldInput, TimerLabel};
use config::*;
use hooks::use_time_field;
use pump::{FramePump, ResizeListener};
use utils::{duration_ms, TimeField};

type SharedTimer = Rc<RefCell<Option<WaveTimer>>>;

/// The live page as seen by the frame loop.
struct DomStage {
    surface: CanvasSurface,
    indicator: HtmlElement,
    label: UseStateHandle<String>,
    controls: UseStateHandle<ControlState>,
}

impl Stage for DomStage {
    type Surface = CanvasSurface;

    fn measure(&self) -> Viewport {
        measure_viewport()
    }

    fn fit(&mut self, viewport: &Viewport) {
        if let Err(e) = self.surface.fit(viewport) {
            warn!("Canvas resize failed: {}", e);
        }
    }

    fn surface(&mut self) -> &mut CanvasSurface {
        &mut self.surface
    }

    fn show_time(&mut self, text: &str) {
        self.label.set(text.to_string());
    }

    fn place_indicator(&mut self, top: f64) {
        if let Err(e) = self
            .indicator
            .style()
            .set_property("top", &format!("{}px", top))
        {
            warn!("Indicator move failed: {:?}", e);
        }
    }

    fn show_controls(&mut self, controls: ControlState) {
        // Equal values do not re-render.
        self.controls.set(controls);
    }
}

/// Keeps the frame loop and resize subscription alive while mounted.
struct Session {
    _pump: FramePump,
    _resize: ResizeListener,
}

fn mount(
    timer: SharedTimer,
    canvas_ref: &NodeRef,
    indicator_ref: &NodeRef,
    label: UseStateHandle<String>,
    controls: UseStateHandle<ControlState>,
) -> Result<Session, SetupError> {
    let canvas = canvas_ref
        .cast::<HtmlCanvasElement>()
        .ok_or(SetupError::MissingElement("canvas"))?;
    let indicator = indicator_ref
        .cast::<HtmlElement>()
        .ok_or(SetupError::MissingElement("wave indicator"))?;

    let viewport = measure_viewport();
    let mut surface = CanvasSurface::new(canvas)?;
    surface.fit(&viewport)?;

    let waves = WaveConfig::presets()?;
    info!(
        "Starting {} waves on a {}x{} viewport @{}x",
        waves.len(),
        viewport.width,
        viewport.height,
        viewport.pixel_density
    );
    *timer.borrow_mut() = Some(WaveTimer::new(waves, viewport, now_ms()));

    let mut stage = DomStage {
        surface,
        indicator,
        label,
        controls,
    };
    let frame_timer = timer.clone();
    let pump = FramePump::start(move |_| {
        if let Some(app) = frame_timer.borrow_mut().as_mut() {
            app.frame(now_ms(), &mut stage);
        }
    })?;

    let resize = ResizeListener::attach(move || {
        if let Some(app) = timer.borrow_mut().as_mut() {
            app.notify_resize();
        }
    })?;

    Ok(Session {
        _pump: pump,
        _resize: resize,
    })
}

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let hours = use_time_field(TimeField::Hours, DEFAULT_HOURS);
    let minutes = use_time_field(TimeField::Minutes, DEFAULT_MINUTES);
    let seconds = use_time_field(TimeField::Seconds, DEFAULT_SECONDS);

    let label = use_state_eq(|| format_countdown(0.0));
    let controls = use_state_eq(|| ControlState::for_phase(Phase::Idle));
    let canvas_ref = use_node_ref();
    let indicator_ref = use_node_ref();
    let timer: SharedTimer = use_mut_ref(|| None);

    {
        let timer = timer.clone();
        let canvas_ref = canvas_ref.clone();
        let indicator_ref = indicator_ref.clone();
        let label = label.clone();
        let controls = controls.clone();
        use_effect_with((), move |_| {
            let session = match mount(timer, &canvas_ref, &indicator_ref, label, controls) {
                Ok(session) => Some(session),
                Err(e) => {
                    error!("Failed to start the wave timer: {}", e);
                    None
                }
            };
            move || drop(session)
        });
    }

    let on_primary = {
        let timer = timer.clone();
        let duration = duration_ms(hours.value, minutes.value, seconds.value);
        Callback::from(move |_: ()| {
            if let Some(app) = timer.borrow_mut().as_mut() {
                app.press_primary(duration, now_ms());
            }
        })
    };

    let on_reset = {
        let timer = timer.clone();
        Callback::from(move |_: ()| {
            if let Some(app) = timer.borrow_mut().as_mut() {
                app.reset(now_ms());
            }
        })
    };

    html! {
        <>
            <canvas id="canvas" ref={canvas_ref} />
            <div id="wave-indicator" ref={indicator_ref} />
            <main class="timer">
                <div class="time-fields">
                    <TimeFieldInput handle={hours} />
                    <TimeFieldInput handle={minutes} />
                    <TimeFieldInput handle={seconds} />
                </div>
                <TimerLabel text={(*label).clone()} />
                <Controls state={*controls} on_primary={on_primary} on_reset={on_reset} />
            </main>
        </>
    }
}

/// Entry point: installs logging and renders the App component.
fn main() {
    console_error_panic_hook::set_once();
    // Logging is optional; the timer works without a console.
    let _ = console_log::init_with_level(LOG_LEVEL);
    yew::Renderer::<App>::new().render();
}
