//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in board coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let (s1, c1) = theta1.sin_cos();
        let (s2, c2) = theta2.sin_cos();
        let inner1 = center + Vec2::new(c1, s1) * inner_radius;
        let outer1 = center + Vec2::new(c1, s1) * outer_radius;
        let inner2 = center + Vec2::new(c2, s2) * inner_radius;
        let outer2 = center + Vec2::new(c2, s2) * outer_radius;

        quad(&mut vertices, inner1, outer1, inner2, outer2, color);
    }

    vertices
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    let max = min + size;
    quad(
        &mut vertices,
        min,
        Vec2::new(max.x, min.y),
        Vec2::new(min.x, max.y),
        max,
        color,
    );
    vertices
}

/// Rectangle outline centered on its edges
pub fn rect_outline(min: Vec2, size: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    let tl = min;
    let tr = Vec2::new(max.x, min.y);
    let bl = Vec2::new(min.x, max.y);
    let br = max;

    let mut vertices = Vec::with_capacity(24);
    for (a, b) in [(tl, tr), (tr, br), (br, bl), (bl, tl)] {
        vertices.extend(line(a, b, width, color));
    }
    vertices
}

/// Thick line with square caps
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let cap = dir * (width / 2.0);
    segment(a - cap, b + cap, width, color)
}

/// Thick line with flat ends exactly at `a` and `b`
pub fn segment(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let mut vertices = Vec::with_capacity(6);
    quad(&mut vertices, a + perp, a - perp, b + perp, b - perp, color);
    vertices
}

/// Dashed polyline: `dash` units drawn, `gap` units skipped, continuing
/// the pattern across vertices
pub fn dashed_polyline(
    points: &[Vec2],
    dash: f32,
    gap: f32,
    width: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let period = dash + gap;
    if dash <= 0.0 || period <= 0.0 {
        return Vec::new();
    }

    let mut vertices = Vec::new();
    let mut phase = 0.0;

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let len = a.distance(b);
        if len <= f32::EPSILON {
            continue;
        }
        let dir = (b - a) / len;

        let mut t = 0.0;
        while t < len {
            if phase < dash {
                let step = (dash - phase).min(len - t);
                vertices.extend(segment(a + dir * t, a + dir * (t + step), width, color));
                t += step;
                phase += step;
            } else {
                let step = (period - phase).min(len - t);
                t += step;
                phase += step;
            }
            if phase >= period {
                phase -= period;
            }
        }
    }

    vertices
}

/// Seven-segment strokes in a unit cell (x right, y down)
const SEGMENTS: [(Vec2, Vec2); 7] = [
    (Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)), // top
    (Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.5)), // upper right
    (Vec2::new(1.0, 0.5), Vec2::new(1.0, 1.0)), // lower right
    (Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)), // bottom
    (Vec2::new(0.0, 0.5), Vec2::new(0.0, 1.0)), // lower left
    (Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.5)), // upper left
    (Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.5)), // middle
];

/// Segment masks for 0-9
const DIGITS: [u8; 10] = [0x3f, 0x06, 0x5b, 0x4f, 0x66, 0x6d, 0x7d, 0x07, 0x7f, 0x6f];

/// Glyph cell width relative to its height
const GLYPH_ASPECT: f32 = 0.55;
/// Space between glyphs relative to height
const GLYPH_SPACING: f32 = 0.3;

/// Unit-cell strokes for a character; None for unsupported characters
fn glyph(c: char) -> Option<Vec<(Vec2, Vec2)>> {
    match c {
        '0'..='9' => {
            let mask = DIGITS[c as usize - '0' as usize];
            Some(
                SEGMENTS
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, s)| *s)
                    .collect(),
            )
        }
        '+' => Some(vec![
            (Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.5)),
            (Vec2::new(0.5, 0.2), Vec2::new(0.5, 0.8)),
        ]),
        _ => None,
    }
}

/// Width of `s` rendered by [`text`] at `height`
pub fn text_width(s: &str, height: f32) -> f32 {
    let n = s.chars().count() as f32;
    if n == 0.0 {
        return 0.0;
    }
    n * height * GLYPH_ASPECT + (n - 1.0) * height * GLYPH_SPACING
}

/// Segment-style text for digits and '+', horizontally centered on
/// `anchor.x` with its bottom edge at `anchor.y`
pub fn text(s: &str, anchor: Vec2, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let cell = Vec2::new(height * GLYPH_ASPECT, height);
    let thickness = height * 0.16;
    let mut origin = Vec2::new(anchor.x - text_width(s, height) / 2.0, anchor.y - height);

    let mut vertices = Vec::new();
    for c in s.chars() {
        if let Some(strokes) = glyph(c) {
            for (a, b) in strokes {
                vertices.extend(line(origin + a * cell, origin + b * cell, thickness, color));
            }
        }
        origin.x += cell.x + height * GLYPH_SPACING;
    }
    vertices
}

/// Push two triangles for the quad (a, b, c, d) where a-b and c-d are
/// opposite edges
fn quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));

    out.push(Vertex::new(c.x, c.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(d.x, d.y, color));
}
