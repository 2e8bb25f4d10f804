//! Shape generation for 2D primitives
//!
//! Every function returns a triangle list in pixel space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Linear interpolation between two colors
pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    quad(min, size, [color; 4])
}

/// Rectangle with per-corner colors: top-left, top-right, bottom-left, bottom-right
fn quad(min: Vec2, size: Vec2, corners: [[f32; 4]; 4]) -> Vec<Vertex> {
    let max = min + size;
    let [tl, tr, bl, br] = corners;
    vec![
        Vertex::new(min.x, min.y, tl),
        Vertex::new(max.x, min.y, tr),
        Vertex::new(min.x, max.y, bl),
        Vertex::new(min.x, max.y, bl),
        Vertex::new(max.x, min.y, tr),
        Vertex::new(max.x, max.y, br),
    ]
}

/// Rectangle outline drawn inside-out around the given box
pub fn rect_outline(min: Vec2, size: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = width / 2.0;
    let outer_min = min - Vec2::splat(half);
    let outer = size + Vec2::splat(width);

    let mut vertices = Vec::with_capacity(24);
    // Top, bottom, left, right strips
    vertices.extend(rect(outer_min, Vec2::new(outer.x, width), color));
    vertices.extend(rect(
        Vec2::new(outer_min.x, min.y + size.y - half),
        Vec2::new(outer.x, width),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(outer_min.x, min.y + half),
        Vec2::new(width, size.y - width),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(min.x + size.x - half, min.y + half),
        Vec2::new(width, size.y - width),
        color,
    ));
    vertices
}

/// Full-width vertical gradient through `(offset, color)` stops, offsets in [0, 1]
pub fn vertical_gradient(min: Vec2, size: Vec2, stops: &[(f32, [f32; 4])]) -> Vec<Vertex> {
    match stops {
        [] => Vec::new(),
        [(_, only)] => rect(min, size, *only),
        _ => stops
            .windows(2)
            .flat_map(|pair| {
                let (t0, c0) = pair[0];
                let (t1, c1) = pair[1];
                let band_min = Vec2::new(min.x, min.y + size.y * t0);
                let band_size = Vec2::new(size.x, size.y * (t1 - t0));
                quad(band_min, band_size, [c0, c0, c1, c1])
            })
            .collect(),
    }
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    radial_gradient(center, radius, color, color, segments)
}

/// Disc fading from `inner` at the centre to `outer` at the rim
pub fn radial_gradient(
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, inner));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            outer,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            outer,
        ));
    }

    vertices
}

/// Generate vertices for a ring whose color fades from `inner` to `outer`
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, inner));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer));
        vertices.push(Vertex::new(inner2.x, inner2.y, inner));

        vertices.push(Vertex::new(inner2.x, inner2.y, inner));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer));
        vertices.push(Vertex::new(outer2.x, outer2.y, outer));
    }

    vertices
}
