//! Drawing surface abstraction the waves paint onto.

use crate::defaults;
use serde::Deserialize;

/// Visible drawing area in CSS pixels.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_density: f64,
}

impl Viewport {
    /// Negative or non-finite dimensions collapse to zero, and a missing or
    /// nonsensical pixel density falls back to 1.
    pub fn new(width: f64, height: f64, pixel_density: f64) -> Self {
        let sane = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let pixel_density = if pixel_density.is_finite() && pixel_density > 0.0 {
            pixel_density
        } else {
            defaults::PIXEL_DENSITY
        };
        Self {
            width: sane(width),
            height: sane(height),
            pixel_density,
        }
    }

    /// Backing-store size in device pixels.
    pub fn device_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_density).round() as u32,
            (self.height * self.pixel_density).round() as u32,
        )
    }
}

/// Compositing operation used when filling a shape.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    SourceOver,
    #[default]
    SoftLight,
    Screen,
    Lighter,
    Overlay,
    Multiply,
}

impl BlendMode {
    /// Name understood by `CanvasRenderingContext2D.globalCompositeOperation`.
    pub fn as_str(self) -> &'static str {
        match self {
            BlendMode::SourceOver => "source-over",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Screen => "screen",
            BlendMode::Lighter => "lighter",
            BlendMode::Overlay => "overlay",
            BlendMode::Multiply => "multiply",
        }
    }
}

/// Minimal 2D path API, modelled on the canvas 2D context.
pub trait Surface {
    fn clear(&mut self, viewport: &Viewport);
    fn set_blend(&mut self, mode: BlendMode);
    fn set_fill_color(&mut self, color: &str);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    pub enum Op {
        Clear(f64, f64),
        Blend(BlendMode),
        Fill(String),
        Begin,
        MoveTo(f64, f64),
        LineTo(f64, f64),
        Close,
        Paint,
    }

    /// Records every call so tests can inspect what was drawn.
    #[derive(Default, Debug)]
    pub struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        /// Number of filled shapes.
        pub fn paints(&self) -> usize {
            self.ops.iter().filter(|op| **op == Op::Paint).count()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, viewport: &Viewport) {
            self.ops.push(Op::Clear(viewport.width, viewport.height));
        }
        fn set_blend(&mut self, mode: BlendMode) {
            self.ops.push(Op::Blend(mode));
        }
        fn set_fill_color(&mut self, color: &str) {
            self.ops.push(Op::Fill(color.to_string()));
        }
        fn begin_path(&mut self) {
            self.ops.push(Op::Begin);
        }
        fn move_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::MoveTo(x, y));
        }
        fn line_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::LineTo(x, y));
        }
        fn close_path(&mut self) {
            self.ops.push(Op::Close);
        }
        fn fill(&mut self) {
            self.ops.push(Op::Paint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_normalizes_input() {
        let vp = Viewport::new(-10.0, f64::NAN, 0.0);
        assert_eq!(vp.width, 0.0);
        assert_eq!(vp.height, 0.0);
        assert_eq!(vp.pixel_density, 1.0);
    }

    #[test]
    fn test_device_size_scales_by_density() {
        let vp = Viewport::new(800.0, 601.5, 2.0);
        assert_eq!(vp.device_size(), (1600, 1203));
    }

    #[test]
    fn test_blend_mode_names() {
        assert_eq!(BlendMode::default().as_str(), "soft-light");
        let mode: BlendMode = serde_json::from_str("\"source-over\"").unwrap();
        assert_eq!(mode, BlendMode::SourceOver);
    }
}
