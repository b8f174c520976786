//! Pairwise interactions registered with a scene
//!
//! Two families: continuous forces that accumulate every tick (Newtonian
//! attraction) and collisions. Elastic collisions act on every tick of a
//! contact; handlers fire once per contact onset.

use glam::DVec2;

use super::body::BodyId;
use super::scene::Scene;

/// Below this separation attraction is skipped to avoid the singularity
pub const MIN_GRAVITY_DISTANCE: f64 = 5.0;

/// Callback fired when two bodies start touching.
///
/// Receives the scene explicitly, the two bodies in registration order and the
/// collision axis (pointing from the first body to the second).
pub type CollisionHandler<T> = fn(&mut Scene<T>, BodyId, BodyId, DVec2);

/// What happens when a registered pair collides
pub enum CollisionKind<T> {
    /// Impulse exchange with the given coefficient of restitution
    Elastic { elasticity: f64 },
    /// Arbitrary callback
    Handler(CollisionHandler<T>),
}

impl<T> Clone for CollisionKind<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CollisionKind<T> {}

impl<T> std::fmt::Debug for CollisionKind<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionKind::Elastic { elasticity } => {
                f.debug_struct("Elastic").field("elasticity", elasticity).finish()
            }
            CollisionKind::Handler(_) => f.write_str("Handler"),
        }
    }
}

/// A registered pairwise interaction
#[derive(Debug)]
pub enum Interaction<T> {
    /// Mutual inverse-square attraction
    Gravity { g: f64, a: BodyId, b: BodyId },
    /// Collision response between two bodies
    Collision {
        a: BodyId,
        b: BodyId,
        kind: CollisionKind<T>,
        /// Whether the pair overlapped on the previous check
        touching: bool,
    },
}

impl<T> Interaction<T> {
    /// Whether this interaction names `id`
    pub fn involves(&self, id: BodyId) -> bool {
        match *self {
            Interaction::Gravity { a, b, .. } | Interaction::Collision { a, b, .. } => {
                a == id || b == id
            }
        }
    }

    /// The two bodies in registration order
    pub fn bodies(&self) -> (BodyId, BodyId) {
        match *self {
            Interaction::Gravity { a, b, .. } | Interaction::Collision { a, b, .. } => (a, b),
        }
    }
}

/// Force on the body at `a_pos` from the body at `b_pos` (points toward `b`)
pub fn newtonian_force(g: f64, a_pos: DVec2, a_mass: f64, b_pos: DVec2, b_mass: f64) -> DVec2 {
    let delta = b_pos - a_pos;
    let distance = delta.length();
    if distance < MIN_GRAVITY_DISTANCE {
        return DVec2::ZERO;
    }
    let magnitude = g * a_mass * b_mass / (distance * distance);
    delta / distance * magnitude
}

/// `1 / mass`, zero for immovable bodies
pub fn inverse_mass(mass: f64) -> f64 {
    if mass.is_infinite() { 0.0 } else { 1.0 / mass }
}

/// Reduced mass of a pair; an infinite mass collapses to the other mass
pub fn reduced_mass(a_mass: f64, b_mass: f64) -> f64 {
    match (a_mass.is_infinite(), b_mass.is_infinite()) {
        (true, true) => 0.0,
        (true, false) => b_mass,
        (false, true) => a_mass,
        (false, false) => a_mass * b_mass / (a_mass + b_mass),
    }
}

/// Impulse applied to the first body of a colliding pair (the second gets
/// the negation).
///
/// `J = μ (1 + e) (u_b − u_a)` along `axis`, where `u` are the velocity
/// components along the axis.
pub fn elastic_impulse(
    elasticity: f64,
    axis: DVec2,
    a_mass: f64,
    a_vel: DVec2,
    b_mass: f64,
    b_vel: DVec2,
) -> DVec2 {
    let u_a = a_vel.dot(axis);
    let u_b = b_vel.dot(axis);
    let j = reduced_mass(a_mass, b_mass) * (1.0 + elasticity) * (u_b - u_a);
    axis * j
}
