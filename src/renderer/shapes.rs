//! Shape generation for 2D primitives
//!
//! All coordinates are surface pixels, origin top-left, +y down. Every shape is emitted as a
//! plain triangle list.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::font;
use super::vertex::Vertex;

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_rect(&mut vertices, min, size, color);
    vertices
}

fn push_rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let max = min + size;

    // Two triangles
    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(min.x, max.y, color));

    out.push(Vertex::new(min.x, max.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
}

/// Quarter-circle fan around `center`, sweeping from `start` radians
fn push_corner(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    start: f32,
    color: [f32; 4],
    segments: u32,
) {
    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * FRAC_PI_2;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * FRAC_PI_2;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Filled rectangle with rounded corners. The radius is clamped to half the shorter side.
pub fn rounded_rect(
    min: Vec2,
    size: Vec2,
    radius: f32,
    color: [f32; 4],
    corner_segments: u32,
) -> Vec<Vertex> {
    let r = radius.clamp(0.0, size.x.min(size.y) / 2.0);
    if r <= 0.0 || corner_segments == 0 {
        return rect(min, size, color);
    }

    let segments = corner_segments as usize;
    let mut vertices = Vec::with_capacity(3 * 6 + 4 * segments * 3);
    let max = min + size;

    // Center column, then the left and right strips between the corners
    let side = Vec2::new(r, size.y - 2.0 * r);
    push_rect(
        &mut vertices,
        Vec2::new(min.x + r, min.y),
        Vec2::new(size.x - 2.0 * r, size.y),
        color,
    );
    push_rect(&mut vertices, Vec2::new(min.x, min.y + r), side, color);
    push_rect(&mut vertices, Vec2::new(max.x - r, min.y + r), side, color);

    // Screen space: angle 0 points right, FRAC_PI_2 points down
    let corners = [
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), FRAC_PI_2),
        (Vec2::new(min.x + r, min.y + r), PI),
        (Vec2::new(max.x - r, min.y + r), PI + FRAC_PI_2),
    ];
    for (center, start) in corners {
        push_corner(&mut vertices, center, r, start, color, corner_segments);
    }

    vertices
}

/// Bitmap text with its top-left at `origin`; each font pixel is `scale` surface pixels
pub fn text(origin: Vec2, text: &str, scale: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let pixel = Vec2::splat(scale);
    let mut pen = origin;

    for ch in text.chars() {
        let rows = font::glyph(ch);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..font::GLYPH_WIDTH {
                if (bits >> (font::GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                    continue;
                }
                let min = pen + Vec2::new(col as f32, row as f32) * scale;
                push_rect(&mut vertices, min, pixel, color);
            }
        }
        pen.x += font::ADVANCE as f32 * scale;
    }

    vertices
}

/// Bitmap text horizontally centered on `center_x`, top edge at `top`
pub fn text_centered(
    center_x: f32,
    top: f32,
    label: &str,
    scale: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let width = font::text_width(label) as f32 * scale;
    text(Vec2::new(center_x - width / 2.0, top), label, scale, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        let mut lo = Vec2::splat(f32::MAX);
        let mut hi = Vec2::splat(f32::MIN);
        for v in vertices {
            let p = Vec2::from(v.position);
            lo = lo.min(p);
            hi = hi.max(p);
        }
        (lo, hi)
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(5.0, 5.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        assert_eq!(bounds(&v), (Vec2::new(10.0, 20.0), Vec2::new(15.0, 25.0)));
    }

    #[test]
    fn test_empty_rect_emits_nothing() {
        assert!(rect(Vec2::ZERO, Vec2::new(0.0, 4.0), [1.0; 4]).is_empty());
    }

    #[test]
    fn test_rounded_rect_stays_in_bounds() {
        let v = rounded_rect(Vec2::new(40.0, 60.0), Vec2::new(20.0, 20.0), 5.0, [1.0; 4], 4);
        assert_eq!(v.len() % 3, 0);
        let (lo, hi) = bounds(&v);
        assert!(lo.x >= 40.0 - 1e-3 && lo.y >= 60.0 - 1e-3);
        assert!(hi.x <= 60.0 + 1e-3 && hi.y <= 80.0 + 1e-3);
        // Corners are cut: no vertex sits exactly on the bounding box corner
        assert!(!v.iter().any(|p| p.position == [40.0, 60.0]));
    }

    #[test]
    fn test_rounded_rect_zero_radius_is_rect() {
        let v = rounded_rect(Vec2::ZERO, Vec2::splat(8.0), 0.0, [1.0; 4], 4);
        assert_eq!(v, rect(Vec2::ZERO, Vec2::splat(8.0), [1.0; 4]));
    }

    #[test]
    fn test_text_pixel_count() {
        // One quad per lit font pixel
        let lit: u32 = font::glyph('I').iter().map(|r| r.count_ones()).sum();
        let v = text(Vec2::ZERO, "I", 2.0, [1.0; 4]);
        assert_eq!(v.len() as u32, lit * 6);
    }

    #[test]
    fn test_text_centered() {
        let v = text_centered(100.0, 0.0, "HI", 1.0, [1.0; 4]);
        let (lo, hi) = bounds(&v);
        assert!(((lo.x + hi.x) / 2.0 - 100.0).abs() < 1.0);
    }
}
