//! Tessellation of body outlines into triangles

use glam::DVec2;

use super::vertex::Vertex;

/// Maps playfield coordinates onto clip space ([-1, 1] on both axes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min: DVec2,
    pub max: DVec2,
}

impl Viewport {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    pub fn to_clip(&self, p: DVec2) -> [f32; 2] {
        let size = self.max - self.min;
        let t = (p - self.min) / size;
        [(t.x * 2.0 - 1.0) as f32, (t.y * 2.0 - 1.0) as f32]
    }

    /// Whether any part of the outline's bounding box is on screen
    pub fn intersects(&self, points: &[DVec2]) -> bool {
        let Some(first) = points.first() else {
            return false;
        };
        let (lo, hi) = points
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        hi.x >= self.min.x && lo.x <= self.max.x && hi.y >= self.min.y && lo.y <= self.max.y
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DVec2::ZERO, DVec2::ONE)
    }
}

/// Triangle fan over a convex outline, anchored at `center`
pub fn convex_polygon(points: &[DVec2], center: DVec2, color: [f32; 4], viewport: &Viewport) -> Vec<Vertex> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let c = viewport.to_clip(center);
    let mut vertices = Vec::with_capacity(n * 3);

    for i in 0..n {
        let p1 = viewport.to_clip(points[i]);
        let p2 = viewport.to_clip(points[(i + 1) % n]);

        // Triangle from center to edge
        vertices.push(Vertex::new(c[0], c[1], color));
        vertices.push(Vertex::new(p1[0], p1[1], color));
        vertices.push(Vertex::new(p2[0], p2[1], color));
    }

    vertices
}
