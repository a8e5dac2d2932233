//! Shape tessellation into triangle lists
//!
//! All coordinates are canvas pixels (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

fn push_quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, c, d, a] {
        vertices.push(Vertex::new(p.x, p.y, color));
    }
}

/// Axis-aligned filled rectangle from its top-left corner
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [
            pos,
            pos + Vec2::new(size.x, 0.0),
            pos + size,
            pos + Vec2::new(0.0, size.y),
        ],
        color,
    );
    vertices
}

/// Rectangle rotated by `angle` radians about its top-left corner
pub fn rotated_rect(origin: Vec2, size: Vec2, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let corner = |local: Vec2| origin + rot.rotate(local);
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [
            corner(Vec2::ZERO),
            corner(Vec2::new(size.x, 0.0)),
            corner(size),
            corner(Vec2::new(0.0, size.y)),
        ],
        color,
    );
    vertices
}

/// Filled circle as a triangle fan
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

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

/// Dashed line of the given stroke width; the last dash is cut at `to`
pub fn dashed_line(
    from: Vec2,
    to: Vec2,
    dash: f32,
    gap: f32,
    width: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let length = from.distance(to);
    let period = dash + gap;
    if length <= 0.0 || dash <= 0.0 || period <= 0.0 {
        return Vec::new();
    }
    let dir = (to - from) / length;
    let half = dir.perp() * (width / 2.0);

    let mut vertices = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + dash).min(length);
        let a = from + dir * start;
        let b = from + dir * end;
        push_quad(&mut vertices, [a + half, b + half, b - half, a - half], color);
        start += period;
    }
    vertices
}
