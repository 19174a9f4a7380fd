//! Draw sink abstraction.
//!
//! The engine renders through an immediate-mode 2D surface supplied by the
//! host: an HTML canvas, a software rasterizer, an SVG writer. The sink is a
//! pure consumer; the engine issues path and style commands and never reads
//! state back (arena extent travels separately via [`crate::Arena`]).
//!
//! # Example
//!
//! ```ignore
//! struct CanvasSink { /* wraps the host 2D context */ }
//!
//! impl DrawSink for CanvasSink {
//!     fn begin_path(&mut self) { /* ctx.beginPath() */ }
//!     // ...
//! }
//!
//! system.draw(&mut sink);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color with components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#rgb`, `#rrggbb` or `#rrggbbaa` hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let byte = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
        match digits.len() {
            3 => {
                let nibble = |s: &str| {
                    u8::from_str_radix(s, 16).ok().map(|v| (v * 17) as f32 / 255.0)
                };
                Some(Self {
                    r: nibble(&digits[0..1])?,
                    g: nibble(&digits[1..2])?,
                    b: nibble(&digits[2..3])?,
                    a: 1.0,
                })
            }
            6 => Some(Self {
                r: byte(&digits[0..2])?,
                g: byte(&digits[2..4])?,
                b: byte(&digits[4..6])?,
                a: 1.0,
            }),
            8 => Some(Self {
                r: byte(&digits[0..2])?,
                g: byte(&digits[2..4])?,
                b: byte(&digits[4..6])?,
                a: byte(&digits[6..8])?,
            }),
            _ => None,
        }
    }
}

/// A single stop in a gradient, with `offset` in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

/// Fill styles the sink must understand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FillStyle {
    Solid(Color),
    LinearGradient {
        from: Vec2,
        to: Vec2,
        stops: Vec<ColorStop>,
    },
    RadialGradient {
        center: Vec2,
        radius: f32,
        stops: Vec<ColorStop>,
    },
}

/// Stroke end-cap style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// Immediate-mode 2D drawing surface consumed by the engine.
///
/// Semantics follow the common canvas model: style setters apply to
/// subsequent `fill`/`stroke` calls, paths accumulate between `begin_path`
/// and the fill/stroke that consumes them.
pub trait DrawSink {
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    fn close_path(&mut self);
    /// Append a full circle to the current path.
    fn circle(&mut self, center: Vec2, radius: f32);
    /// Append an axis-aligned rectangle to the current path.
    fn rect(&mut self, origin: Vec2, size: Vec2);

    fn set_fill_style(&mut self, style: FillStyle);
    fn set_stroke_color(&mut self, color: Color);
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_line_width(&mut self, width: f32);
    fn set_line_cap(&mut self, cap: LineCap);
    /// Dash pattern as on/off run lengths; empty slice means solid.
    fn set_line_dash(&mut self, pattern: &[f32]);
    fn set_shadow(&mut self, color: Color, blur: f32);
    fn clear_shadow(&mut self);

    fn fill(&mut self);
    fn stroke(&mut self);
    /// Draw `text` centered at `at` with the given font size.
    fn fill_text(&mut self, text: &str, at: Vec2, size: f32);
}

/// A sink that discards everything. Useful for headless ticking and benches.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DrawSink for NullSink {
    fn begin_path(&mut self) {}
    fn move_to(&mut self, _p: Vec2) {}
    fn line_to(&mut self, _p: Vec2) {}
    fn close_path(&mut self) {}
    fn circle(&mut self, _center: Vec2, _radius: f32) {}
    fn rect(&mut self, _origin: Vec2, _size: Vec2) {}
    fn set_fill_style(&mut self, _style: FillStyle) {}
    fn set_stroke_color(&mut self, _color: Color) {}
    fn set_global_alpha(&mut self, _alpha: f32) {}
    fn set_line_width(&mut self, _width: f32) {}
    fn set_line_cap(&mut self, _cap: LineCap) {}
    fn set_line_dash(&mut self, _pattern: &[f32]) {}
    fn set_shadow(&mut self, _color: Color, _blur: f32) {}
    fn clear_shadow(&mut self) {}
    fn fill(&mut self) {}
    fn stroke(&mut self) {}
    fn fill_text(&mut self, _text: &str, _at: Vec2, _size: f32) {}
}

#[cfg(test)]
pub(crate) mod recording {
    //! A sink that records every command, for asserting draw output in tests.

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        BeginPath,
        MoveTo(Vec2),
        LineTo(Vec2),
        ClosePath,
        Circle(Vec2, f32),
        Rect(Vec2, Vec2),
        FillStyle(FillStyle),
        StrokeColor(Color),
        GlobalAlpha(f32),
        LineWidth(f32),
        LineCap(LineCap),
        LineDash(Vec<f32>),
        Shadow(Color, f32),
        ClearShadow,
        Fill,
        Stroke,
        FillText(String, Vec2, f32),
    }

    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub ops: Vec<Op>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
            self.ops.iter().filter(|op| pred(op)).count()
        }
    }

    impl DrawSink for RecordingSink {
        fn begin_path(&mut self) {
            self.ops.push(Op::BeginPath);
        }
        fn move_to(&mut self, p: Vec2) {
            self.ops.push(Op::MoveTo(p));
        }
        fn line_to(&mut self, p: Vec2) {
            self.ops.push(Op::LineTo(p));
        }
        fn close_path(&mut self) {
            self.ops.push(Op::ClosePath);
        }
        fn circle(&mut self, center: Vec2, radius: f32) {
            self.ops.push(Op::Circle(center, radius));
        }
        fn rect(&mut self, origin: Vec2, size: Vec2) {
            self.ops.push(Op::Rect(origin, size));
        }
        fn set_fill_style(&mut self, style: FillStyle) {
            self.ops.push(Op::FillStyle(style));
        }
        fn set_stroke_color(&mut self, color: Color) {
            self.ops.push(Op::StrokeColor(color));
        }
        fn set_global_alpha(&mut self, alpha: f32) {
            self.ops.push(Op::GlobalAlpha(alpha));
        }
        fn set_line_width(&mut self, width: f32) {
            self.ops.push(Op::LineWidth(width));
        }
        fn set_line_cap(&mut self, cap: LineCap) {
            self.ops.push(Op::LineCap(cap));
        }
        fn set_line_dash(&mut self, pattern: &[f32]) {
            self.ops.push(Op::LineDash(pattern.to_vec()));
        }
        fn set_shadow(&mut self, color: Color, blur: f32) {
            self.ops.push(Op::Shadow(color, blur));
        }
        fn clear_shadow(&mut self) {
            self.ops.push(Op::ClearShadow);
        }
        fn fill(&mut self) {
            self.ops.push(Op::Fill);
        }
        fn stroke(&mut self) {
            self.ops.push(Op::Stroke);
        }
        fn fill_text(&mut self, text: &str, at: Vec2, size: f32) {
            self.ops.push(Op::FillText(text.to_string(), at, size));
        }
    }
}
