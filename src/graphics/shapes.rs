//! Shape generation for 2D primitives

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

/// Generate vertices for a thick line segment (a quad)
pub fn quad_line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = dir.perp() * (width / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertices_on_radius() {
        let center = Vec2::new(10.0, 20.0);
        let verts = circle(center, 5.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 16 * 3);
        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [10.0, 20.0]);
            let edge = Vec2::from(tri[1].position);
            assert!(((edge - center).length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_quad_line_width() {
        let verts = quad_line(Vec2::ZERO, Vec2::new(10.0, 0.0), 4.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[0].position, [0.0, 2.0]);
        assert_eq!(verts[1].position, [0.0, -2.0]);
    }
}
