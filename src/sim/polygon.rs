//! Convex polygon helpers
//!
//! Shapes are stored as world-space vertex lists in counter-clockwise order.
//! Circles are approximated by regular polygons.

use glam::DVec2;
use std::f64::consts::TAU;

/// Signed area (positive for counter-clockwise winding)
pub fn area(points: &[DVec2]) -> f64 {
    let n = points.len();
    let mut twice_area = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice_area += a.perp_dot(b);
    }
    twice_area / 2.0
}

/// Area-weighted centroid
///
/// Falls back to the vertex average for degenerate (zero-area) outlines.
pub fn centroid(points: &[DVec2]) -> DVec2 {
    if points.is_empty() {
        return DVec2::ZERO;
    }

    let a = area(points);
    if a.abs() < 1e-12 {
        return points.iter().copied().sum::<DVec2>() / points.len() as f64;
    }

    let n = points.len();
    let mut acc = DVec2::ZERO;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        acc += (p + q) * p.perp_dot(q);
    }
    acc / (6.0 * a)
}

/// Translate every vertex by `offset`
pub fn translate(points: &mut [DVec2], offset: DVec2) {
    for p in points.iter_mut() {
        *p += offset;
    }
}

/// Rotate every vertex by `angle` radians about `pivot`
pub fn rotate(points: &mut [DVec2], angle: f64, pivot: DVec2) {
    let rot = DVec2::from_angle(angle);
    for p in points.iter_mut() {
        *p = pivot + rot.rotate(*p - pivot);
    }
}

/// Rotate a single point about `pivot`
#[inline]
pub fn rotate_point(point: DVec2, angle: f64, pivot: DVec2) -> DVec2 {
    pivot + DVec2::from_angle(angle).rotate(point - pivot)
}

/// Regular polygon approximating a circle centred at the origin
pub fn circle(radius: f64, points: usize) -> Vec<DVec2> {
    let points = points.max(3);
    (0..points)
        .map(|i| {
            let theta = TAU * i as f64 / points as f64;
            DVec2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// Axis-aligned rectangle centred at the origin
pub fn rect(width: f64, height: f64) -> Vec<DVec2> {
    let hw = width / 2.0;
    let hh = height / 2.0;
    vec![
        DVec2::new(-hw, -hh),
        DVec2::new(hw, -hh),
        DVec2::new(hw, hh),
        DVec2::new(-hw, hh),
    ]
}

/// Largest distance from `center` to any vertex
pub fn bounding_radius(points: &[DVec2], center: DVec2) -> f64 {
    points
        .iter()
        .map(|p| p.distance(center))
        .fold(0.0, f64::max)
}
