//! `Surface` implementation over a 2D canvas context.

use gloo_utils::window;
use log::warn;
use std::fmt;
use wasm_bindgen::{JsCast, JsValue};
use wave_timer::{BlendMode, Millis, Surface, Viewport, WaveConfigError};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Failures while wiring the page up; there is nothing to retry, so these are
/// logged and the background stays blank.
#[derive(Debug)]
pub enum SetupError {
    MissingElement(&'static str),
    ContextUnavailable,
    Waves(WaveConfigError),
    Js(String),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::MissingElement(name) => write!(f, "Element not mounted: {}", name),
            SetupError::ContextUnavailable => write!(f, "2D canvas context is not available"),
            SetupError::Waves(e) => write!(f, "{}", e),
            SetupError::Js(msg) => write!(f, "JavaScript error: {}", msg),
        }
    }
}

impl std::error::Error for SetupError {}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        let message = match value.dyn_ref::<js_sys::Error>() {
            Some(error) => String::from(error.message()),
            None => value.as_string().unwrap_or_else(|| format!("{:?}", value)),
        };
        SetupError::Js(message)
    }
}

impl From<WaveConfigError> for SetupError {
    fn from(e: WaveConfigError) -> Self {
        SetupError::Waves(e)
    }
}

/// Current time from `performance.now()`, or 0 where it is unavailable.
pub fn now_ms() -> Millis {
    window().performance().map(|p| p.now()).unwrap_or(0.0)
}

/// Read the window size and device pixel ratio.
pub fn measure_viewport() -> Viewport {
    let win = window();
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport::new(
        dimension(win.inner_width()),
        dimension(win.inner_height()),
        win.device_pixel_ratio(),
    )
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    blend: Option<BlendMode>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SetupError> {
        let context = canvas
            .get_context("2d")?
            .ok_or(SetupError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SetupError::ContextUnavailable)?;
        Ok(Self {
            canvas,
            context,
            blend: None,
        })
    }

    /// Size the backing store in device pixels and draw in CSS pixels.
    pub fn fit(&mut self, viewport: &Viewport) -> Result<(), SetupError> {
        let (width, height) = viewport.device_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", viewport.width))?;
        style.set_property("height", &format!("{}px", viewport.height))?;

        // Resizing the canvas resets its state, so the scale is set, not multiplied.
        let density = viewport.pixel_density;
        self.context
            .set_transform(density, 0.0, 0.0, density, 0.0, 0.0)?;
        self.blend = None;
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, viewport: &Viewport) {
        self.context
            .clear_rect(0.0, 0.0, viewport.width, viewport.height);
    }

    fn set_blend(&mut self, mode: BlendMode) {
        if self.blend == Some(mode) {
            return;
        }
        match self.context.set_global_composite_operation(mode.as_str()) {
            Ok(()) => self.blend = Some(mode),
            Err(e) => warn!("Blend mode {} rejected: {:?}", mode.as_str(), e),
        }
    }

    fn set_fill_color(&mut self, color: &str) {
        self.context.set_fill_style_str(color);
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn fill(&mut self) {
        self.context.fill();
    }
}
