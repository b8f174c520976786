//! Collision detection between convex polygons
//!
//! Separating axis test over the edge normals of both shapes, preceded by a
//! bounding-circle rejection so distant pairs cost a single distance check.

use glam::DVec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the shapes overlap
    pub hit: bool,
    /// Unit axis of least overlap, pointing from the first shape to the second
    pub axis: DVec2,
    /// Overlap depth along `axis`
    pub penetration: f64,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            axis: DVec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Project a polygon onto an axis, returning (min, max)
fn project(points: &[DVec2], axis: DVec2) -> (f64, f64) {
    points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
        let d = p.dot(axis);
        (lo.min(d), hi.max(d))
    })
}

/// Check the edge normals of `edges_of` as candidate separating axes.
///
/// Returns `None` if a separating axis exists, otherwise the axis with the
/// smallest overlap.
fn min_overlap_axis(edges_of: &[DVec2], a: &[DVec2], b: &[DVec2]) -> Option<(DVec2, f64)> {
    let n = edges_of.len();
    let mut best: Option<(DVec2, f64)> = None;

    for i in 0..n {
        let edge = edges_of[(i + 1) % n] - edges_of[i];
        let axis = edge.perp().normalize_or_zero();
        if axis == DVec2::ZERO {
            continue;
        }

        let (a_min, a_max) = project(a, axis);
        let (b_min, b_max) = project(b, axis);
        let overlap = a_max.min(b_max) - a_min.max(b_min);
        if overlap <= 0.0 {
            return None;
        }

        if best.is_none_or(|(_, o)| overlap < o) {
            best = Some((axis, overlap));
        }
    }

    best
}

/// Separating axis test between two convex polygons
///
/// The returned axis is oriented from `a`'s centroid toward `b`'s.
pub fn find_collision(a: &[DVec2], a_center: DVec2, b: &[DVec2], b_center: DVec2) -> CollisionResult {
    if a.len() < 2 || b.len() < 2 {
        return CollisionResult::miss();
    }

    let Some((axis_a, overlap_a)) = min_overlap_axis(a, a, b) else {
        return CollisionResult::miss();
    };
    let Some((axis_b, overlap_b)) = min_overlap_axis(b, a, b) else {
        return CollisionResult::miss();
    };

    let (mut axis, penetration) = if overlap_a <= overlap_b {
        (axis_a, overlap_a)
    } else {
        (axis_b, overlap_b)
    };

    if axis.dot(b_center - a_center) < 0.0 {
        axis = -axis;
    }

    CollisionResult {
        hit: true,
        axis,
        penetration,
    }
}

/// Cheap rejection test on bounding circles
#[inline]
pub fn bounds_overlap(a_center: DVec2, a_radius: f64, b_center: DVec2, b_radius: f64) -> bool {
    let reach = a_radius + b_radius;
    a_center.distance_squared(b_center) <= reach * reach
}
