//! Rigid bodies owned by a [`Scene`](super::Scene)

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::polygon;

/// Stable body handle
///
/// IDs are handed out in increasing order and never reused, so they stay valid
/// (and sorted) after removed bodies are purged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// RGB color in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

/// A convex polygon body carrying a user payload `T`
#[derive(Debug, Clone)]
pub struct Body<T> {
    pub(super) id: BodyId,
    shape: Vec<DVec2>,
    centroid: DVec2,
    velocity: DVec2,
    mass: f64,
    color: Rgb,
    info: T,
    /// Radius of the smallest centroid-centred circle containing the shape
    bound: f64,
    force: DVec2,
    impulse: DVec2,
    removed: bool,
}

impl<T> Body<T> {
    /// Create a body from a polygon outline; the centroid is derived from it.
    ///
    /// `mass` may be `f64::INFINITY` for immovable bodies.
    pub fn new(shape: Vec<DVec2>, mass: f64, color: Rgb, info: T) -> Self {
        let centroid = polygon::centroid(&shape);
        let bound = polygon::bounding_radius(&shape, centroid);
        Self {
            id: BodyId(0),
            shape,
            centroid,
            velocity: DVec2::ZERO,
            mass,
            color,
            info,
            bound,
            force: DVec2::ZERO,
            impulse: DVec2::ZERO,
            removed: false,
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn shape(&self) -> &[DVec2] {
        &self.shape
    }

    pub fn centroid(&self) -> DVec2 {
        self.centroid
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn info(&self) -> &T {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut T {
        &mut self.info
    }

    pub fn bounding_radius(&self) -> f64 {
        self.bound
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Whether the body cannot be moved by forces or impulses
    pub fn is_immovable(&self) -> bool {
        self.mass.is_infinite()
    }

    /// Move the body so its centroid lands on `centroid`
    pub fn set_centroid(&mut self, centroid: DVec2) {
        polygon::translate(&mut self.shape, centroid - self.centroid);
        self.centroid = centroid;
    }

    pub fn set_velocity(&mut self, velocity: DVec2) {
        self.velocity = velocity;
    }

    /// Rigidly rotate the shape and centroid about `pivot`
    pub fn rotate_about(&mut self, angle: f64, pivot: DVec2) {
        polygon::rotate(&mut self.shape, angle, pivot);
        self.centroid = polygon::rotate_point(self.centroid, angle, pivot);
    }

    /// Accumulate a continuous force for the current tick
    pub fn add_force(&mut self, force: DVec2) {
        self.force += force;
    }

    /// Accumulate an instantaneous impulse for the current tick
    pub fn add_impulse(&mut self, impulse: DVec2) {
        self.impulse += impulse;
    }

    /// Mark the body for removal at the end of the scene tick
    pub fn remove(&mut self) {
        self.removed = true;
    }

    /// Integrate accumulated forces and impulses over `dt`, then clear them.
    ///
    /// Uses the average of the old and new velocity for the position update.
    pub fn tick(&mut self, dt: f64) {
        let old_velocity = self.velocity;
        if !self.is_immovable() {
            self.velocity += self.force / self.mass * dt + self.impulse / self.mass;
        }
        self.force = DVec2::ZERO;
        self.impulse = DVec2::ZERO;

        let displacement = (old_velocity + self.velocity) * 0.5 * dt;
        if displacement != DVec2::ZERO {
            self.set_centroid(self.centroid + displacement);
        }
    }
}
