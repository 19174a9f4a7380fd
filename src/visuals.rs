//! Shape and line-style rendering.
//!
//! Everything here is presentation: it reads simulation state (position,
//! size, life) and settings, and emits path commands into a [`DrawSink`].
//! Nothing in this module feeds back into the simulation.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::draw::{DrawSink, FillStyle, LineCap};
use crate::settings::{
    AppearanceSettings, BackgroundSettings, ConnectionAppearance, GradientDirection,
};

/// Particle silhouettes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParticleShape {
    Circle,
    Square,
    Triangle,
    Plus,
    Hexagon,
    Pentagon,
    Star,
    Diamond,
    /// A random alphanumeric character chosen at spawn.
    Glyph,
}

/// Connection line styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    Solid,
    Dotted,
    Dashed,
    Wavy,
    Zigzag,
    Double,
}

const DOTTED_DASH: [f32; 2] = [2.0, 4.0];
const DASHED_DASH: [f32; 2] = [8.0, 4.0];

const WAVE_LENGTH: f32 = 25.0;
const WAVE_AMPLITUDE: f32 = 8.0;
const WAVE_SMOOTHNESS: f32 = 20.0;

const ZIGZAG_LENGTH: f32 = 20.0;
const ZIGZAG_AMPLITUDE: f32 = 6.0;
const ZIGZAG_SMOOTHNESS: f32 = 7.0;

/// Below this length wavy/zigzag lines degrade to a straight segment.
const MIN_STYLED_LENGTH: f32 = 10.0;

/// Paint the configured background over the whole arena.
pub(crate) fn paint_background(
    sink: &mut dyn DrawSink,
    background: &BackgroundSettings,
    arena: &Arena,
) {
    let style = match background {
        BackgroundSettings::Color(color) => FillStyle::Solid(*color),
        BackgroundSettings::LinearGradient { direction, stops } => {
            let (from, to) = match direction {
                GradientDirection::Horizontal => (Vec2::ZERO, Vec2::new(arena.width, 0.0)),
                GradientDirection::Vertical => (Vec2::ZERO, Vec2::new(0.0, arena.height)),
                GradientDirection::Diagonal => {
                    (Vec2::ZERO, Vec2::new(arena.width, arena.height))
                }
                GradientDirection::DiagonalReverse => {
                    (Vec2::new(arena.width, 0.0), Vec2::new(0.0, arena.height))
                }
            };
            FillStyle::LinearGradient {
                from,
                to,
                stops: stops.clone(),
            }
        }
        BackgroundSettings::RadialGradient { stops } => FillStyle::RadialGradient {
            center: arena.center(),
            radius: arena.width.max(arena.height) / 2.0,
            stops: stops.clone(),
        },
    };

    sink.set_global_alpha(1.0);
    sink.set_fill_style(style);
    sink.begin_path();
    sink.rect(Vec2::ZERO, Vec2::new(arena.width, arena.height));
    sink.fill();
}

/// Draw one particle. `life` scales the alpha; fully faded particles are
/// skipped entirely.
pub(crate) fn draw_particle(
    sink: &mut dyn DrawSink,
    position: Vec2,
    size: f32,
    life: f32,
    shape: ParticleShape,
    glyph: char,
    appearance: &AppearanceSettings,
) {
    let alpha = appearance.opacity * life;
    if alpha <= 0.0 {
        return;
    }

    sink.set_fill_style(FillStyle::Solid(appearance.color));
    sink.set_stroke_color(appearance.color);
    sink.set_global_alpha(alpha);
    if appearance.shadow.enabled {
        sink.set_shadow(appearance.shadow.color, appearance.shadow.radius);
    }

    let r = size;
    sink.begin_path();
    match shape {
        ParticleShape::Circle => sink.circle(position, r),
        ParticleShape::Square => {
            sink.rect(position - Vec2::splat(r), Vec2::splat(r * 2.0));
        }
        ParticleShape::Triangle => {
            sink.move_to(position + Vec2::new(0.0, -r));
            sink.line_to(position + Vec2::new(-r, r));
            sink.line_to(position + Vec2::new(r, r));
            sink.close_path();
        }
        ParticleShape::Plus => {
            sink.set_line_width((r / 3.0).max(1.0));
            sink.set_line_cap(LineCap::Round);
            sink.move_to(position + Vec2::new(-r, 0.0));
            sink.line_to(position + Vec2::new(r, 0.0));
            sink.move_to(position + Vec2::new(0.0, -r));
            sink.line_to(position + Vec2::new(0.0, r));
            sink.stroke();
            finish(sink, appearance.shadow.enabled);
            return;
        }
        ParticleShape::Hexagon => regular_polygon(sink, position, r, 6, 0.0),
        ParticleShape::Pentagon => regular_polygon(sink, position, r, 5, -PI / 2.0),
        ParticleShape::Star => star(sink, position, r),
        ParticleShape::Diamond => {
            sink.move_to(position + Vec2::new(0.0, -r));
            sink.line_to(position + Vec2::new(r, 0.0));
            sink.line_to(position + Vec2::new(0.0, r));
            sink.line_to(position + Vec2::new(-r, 0.0));
            sink.close_path();
        }
        ParticleShape::Glyph => {
            let mut buf = [0u8; 4];
            sink.fill_text(glyph.encode_utf8(&mut buf), position, r * 2.0);
            finish(sink, appearance.shadow.enabled);
            return;
        }
    }
    sink.fill();
    finish(sink, appearance.shadow.enabled);
}

/// Draw one connection line between two particle centers. `life` scales
/// both the alpha and the stroke width.
pub(crate) fn draw_connection(
    sink: &mut dyn DrawSink,
    start: Vec2,
    end: Vec2,
    life: f32,
    appearance: &ConnectionAppearance,
) {
    let alpha = appearance.opacity * life;
    if alpha <= 0.0 {
        return;
    }
    let delta = end - start;
    let length = delta.length();
    if length <= 0.0 {
        return;
    }

    sink.set_stroke_color(appearance.color);
    sink.set_global_alpha(alpha);
    sink.set_line_width(appearance.line_width * life);
    sink.set_line_cap(LineCap::Round);
    if appearance.shadow.enabled {
        sink.set_shadow(appearance.shadow.color, appearance.shadow.radius);
    }

    match appearance.line_style {
        LineStyle::Solid => straight(sink, start, end),
        LineStyle::Dotted => {
            sink.set_line_dash(&DOTTED_DASH);
            straight(sink, start, end);
            sink.set_line_dash(&[]);
        }
        LineStyle::Dashed => {
            sink.set_line_dash(&DASHED_DASH);
            straight(sink, start, end);
            sink.set_line_dash(&[]);
        }
        LineStyle::Wavy => wavy(sink, start, end, delta, length),
        LineStyle::Zigzag => zigzag(sink, start, end, delta, length),
        LineStyle::Double => double(sink, start, end, delta, length, appearance.line_width),
    }

    finish(sink, appearance.shadow.enabled);
}

fn finish(sink: &mut dyn DrawSink, shadow_was_set: bool) {
    if shadow_was_set {
        sink.clear_shadow();
    }
    sink.set_global_alpha(1.0);
}

fn straight(sink: &mut dyn DrawSink, start: Vec2, end: Vec2) {
    sink.begin_path();
    sink.move_to(start);
    sink.line_to(end);
    sink.stroke();
}

fn regular_polygon(sink: &mut dyn DrawSink, center: Vec2, r: f32, sides: u32, phase: f32) {
    for i in 0..sides {
        let angle = 2.0 * PI / sides as f32 * i as f32 + phase;
        let p = center + r * Vec2::new(angle.cos(), angle.sin());
        if i == 0 {
            sink.move_to(p);
        } else {
            sink.line_to(p);
        }
    }
    sink.close_path();
}

fn star(sink: &mut dyn DrawSink, center: Vec2, r: f32) {
    const SPIKES: u32 = 5;
    let inner = r / 2.0;
    for i in 0..SPIKES * 2 {
        let angle = PI / SPIKES as f32 * i as f32 - PI / 2.0;
        let rad = if i % 2 == 0 { r } else { inner };
        let p = center + rad * Vec2::new(angle.cos(), angle.sin());
        if i == 0 {
            sink.move_to(p);
        } else {
            sink.line_to(p);
        }
    }
    sink.close_path();
}

fn wavy(sink: &mut dyn DrawSink, start: Vec2, end: Vec2, delta: Vec2, length: f32) {
    if length < MIN_STYLED_LENGTH {
        straight(sink, start, end);
        return;
    }

    let cycles = length / WAVE_LENGTH;
    let segments = ((cycles * WAVE_SMOOTHNESS) as usize).max(10);
    let perp = Vec2::new(-delta.y, delta.x) / length;

    sink.begin_path();
    sink.move_to(start);
    for i in 1..=segments {
        let t = i as f32 / segments as f32;
        let phase = t * cycles * 2.0 * PI;
        let offset = phase.sin() * WAVE_AMPLITUDE;
        sink.line_to(start + delta * t + perp * offset);
    }
    sink.line_to(end);
    sink.stroke();
}

fn zigzag(sink: &mut dyn DrawSink, start: Vec2, end: Vec2, delta: Vec2, length: f32) {
    if length < MIN_STYLED_LENGTH {
        straight(sink, start, end);
        return;
    }

    let cycles = length / ZIGZAG_LENGTH;
    let segments = ((cycles * ZIGZAG_SMOOTHNESS) as usize).max(8);
    let perp = Vec2::new(-delta.y, delta.x) / length;

    sink.begin_path();
    sink.move_to(start);
    for i in 1..=segments {
        let t = i as f32 / segments as f32;
        let phase = t * cycles * 2.0 * PI;
        // Triangle wave, smoother than a raw sawtooth.
        let offset = (2.0 / PI) * phase.sin().asin() * ZIGZAG_AMPLITUDE;
        sink.line_to(start + delta * t + perp * offset);
    }
    sink.line_to(end);
    sink.stroke();
}

fn double(
    sink: &mut dyn DrawSink,
    start: Vec2,
    end: Vec2,
    delta: Vec2,
    length: f32,
    line_width: f32,
) {
    let gap = line_width + 2.0;
    let perp = Vec2::new(-delta.y, delta.x) / length * (gap / 2.0);

    sink.begin_path();
    sink.move_to(start + perp);
    sink.line_to(end + perp);
    sink.move_to(start - perp);
    sink.line_to(end - perp);
    sink.stroke();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::recording::{Op, RecordingSink};
    use crate::draw::Color;

    fn appearance() -> AppearanceSettings {
        AppearanceSettings::default()
    }

    #[test]
    fn test_circle_emits_fill() {
        let mut sink = RecordingSink::new();
        draw_particle(
            &mut sink,
            Vec2::new(10.0, 20.0),
            4.0,
            1.0,
            ParticleShape::Circle,
            'a',
            &appearance(),
        );
        assert!(sink.ops.contains(&Op::Circle(Vec2::new(10.0, 20.0), 4.0)));
        assert_eq!(sink.count(|op| matches!(op, Op::Fill)), 1);
    }

    #[test]
    fn test_faded_particle_skipped() {
        let mut sink = RecordingSink::new();
        draw_particle(
            &mut sink,
            Vec2::ZERO,
            4.0,
            0.0,
            ParticleShape::Circle,
            'a',
            &appearance(),
        );
        assert!(sink.ops.is_empty());
    }

    #[test]
    fn test_plus_strokes_instead_of_filling() {
        let mut sink = RecordingSink::new();
        draw_particle(
            &mut sink,
            Vec2::ZERO,
            6.0,
            1.0,
            ParticleShape::Plus,
            'a',
            &appearance(),
        );
        assert_eq!(sink.count(|op| matches!(op, Op::Stroke)), 1);
        assert_eq!(sink.count(|op| matches!(op, Op::Fill)), 0);
        assert!(sink.ops.contains(&Op::LineWidth(2.0)));
    }

    #[test]
    fn test_glyph_uses_text() {
        let mut sink = RecordingSink::new();
        draw_particle(
            &mut sink,
            Vec2::new(1.0, 2.0),
            5.0,
            1.0,
            ParticleShape::Glyph,
            'Q',
            &appearance(),
        );
        assert!(sink
            .ops
            .contains(&Op::FillText("Q".to_string(), Vec2::new(1.0, 2.0), 10.0)));
    }

    #[test]
    fn test_hexagon_closes_with_six_vertices() {
        let mut sink = RecordingSink::new();
        draw_particle(
            &mut sink,
            Vec2::ZERO,
            10.0,
            1.0,
            ParticleShape::Hexagon,
            'a',
            &appearance(),
        );
        assert_eq!(sink.count(|op| matches!(op, Op::MoveTo(_))), 1);
        assert_eq!(sink.count(|op| matches!(op, Op::LineTo(_))), 5);
        assert_eq!(sink.count(|op| matches!(op, Op::ClosePath)), 1);
    }

    #[test]
    fn test_dotted_connection_sets_and_resets_dash() {
        let mut appearance = ConnectionAppearance::default();
        appearance.line_style = LineStyle::Dotted;
        let mut sink = RecordingSink::new();
        draw_connection(
            &mut sink,
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            1.0,
            &appearance,
        );
        assert!(sink.ops.contains(&Op::LineDash(vec![2.0, 4.0])));
        assert!(sink.ops.contains(&Op::LineDash(vec![])));
    }

    #[test]
    fn test_connection_width_scales_with_life() {
        let mut sink = RecordingSink::new();
        draw_connection(
            &mut sink,
            Vec2::ZERO,
            Vec2::new(50.0, 0.0),
            0.5,
            &ConnectionAppearance::default(),
        );
        assert!(sink.ops.contains(&Op::LineWidth(1.5)));
        assert!(sink.ops.contains(&Op::GlobalAlpha(0.5)));
    }

    #[test]
    fn test_short_wavy_line_falls_back_to_straight() {
        let mut appearance = ConnectionAppearance::default();
        appearance.line_style = LineStyle::Wavy;
        let mut sink = RecordingSink::new();
        draw_connection(&mut sink, Vec2::ZERO, Vec2::new(5.0, 0.0), 1.0, &appearance);
        assert_eq!(sink.count(|op| matches!(op, Op::LineTo(_))), 1);
    }

    #[test]
    fn test_double_line_has_two_segments() {
        let mut appearance = ConnectionAppearance::default();
        appearance.line_style = LineStyle::Double;
        let mut sink = RecordingSink::new();
        draw_connection(
            &mut sink,
            Vec2::ZERO,
            Vec2::new(40.0, 0.0),
            1.0,
            &appearance,
        );
        assert_eq!(sink.count(|op| matches!(op, Op::MoveTo(_))), 2);
        assert_eq!(sink.count(|op| matches!(op, Op::LineTo(_))), 2);
    }

    #[test]
    fn test_zero_length_connection_skipped() {
        let mut sink = RecordingSink::new();
        draw_connection(
            &mut sink,
            Vec2::new(7.0, 7.0),
            Vec2::new(7.0, 7.0),
            1.0,
            &ConnectionAppearance::default(),
        );
        assert!(sink.ops.is_empty());
    }

    #[test]
    fn test_background_gradient_spans_arena() {
        let arena = Arena::new(800.0, 600.0);
        let background = BackgroundSettings::LinearGradient {
            direction: GradientDirection::Vertical,
            stops: vec![
                crate::draw::ColorStop {
                    offset: 0.0,
                    color: Color::rgb(0.1, 0.1, 0.2),
                },
                crate::draw::ColorStop {
                    offset: 1.0,
                    color: Color::rgb(0.0, 0.0, 0.0),
                },
            ],
        };
        let mut sink = RecordingSink::new();
        paint_background(&mut sink, &background, &arena);
        assert!(sink.ops.iter().any(|op| matches!(
            op,
            Op::FillStyle(FillStyle::LinearGradient { to, .. }) if *to == Vec2::new(0.0, 600.0)
        )));
        assert!(sink
            .ops
            .contains(&Op::Rect(Vec2::ZERO, Vec2::new(800.0, 600.0))));
    }
}
