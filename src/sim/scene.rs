//! Scene container: bodies plus the interactions registered between them

use glam::DVec2;

use super::body::{Body, BodyId};
use super::collision::{bounds_overlap, find_collision};
use super::forces::{
    CollisionHandler, CollisionKind, Interaction, elastic_impulse, inverse_mass, newtonian_force,
};

/// Owns every body and every registered interaction
///
/// Bodies are kept sorted by ID (IDs only grow), which gives stable iteration
/// order and O(log n) lookup.
#[derive(Debug)]
pub struct Scene<T> {
    bodies: Vec<Body<T>>,
    interactions: Vec<Interaction<T>>,
    next_id: u32,
}

impl<T> Default for Scene<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scene<T> {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            interactions: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a body and return its handle
    pub fn add_body(&mut self, mut body: Body<T>) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.id = id;
        self.bodies.push(body);
        id
    }

    /// Number of bodies currently listed (removed bodies stay listed until the
    /// end of the tick that removed them)
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Body at a list position
    pub fn get(&self, index: usize) -> Option<&Body<T>> {
        self.bodies.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body<T>> {
        self.bodies.iter()
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.binary_search_by_key(&id, |b| b.id).ok()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body<T>> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body<T>> {
        self.index_of(id).map(move |i| &mut self.bodies[i])
    }

    /// Mark a body as removed; it is purged at the end of the current tick
    pub fn remove_body(&mut self, id: BodyId) {
        if let Some(body) = self.body_mut(id) {
            body.remove();
        }
    }

    /// Whether `id` is removed (purged bodies count as removed)
    pub fn is_removed(&self, id: BodyId) -> bool {
        self.body(id).is_none_or(|b| b.is_removed())
    }

    /// All registered interactions
    pub fn interactions(&self) -> &[Interaction<T>] {
        &self.interactions
    }

    /// Bounce `a` and `b` off each other with the given restitution
    ///
    /// Acts on every tick the pair overlaps: the bodies are pushed apart and,
    /// while still closing, exchange an impulse.
    pub fn create_physics_collision(&mut self, elasticity: f64, a: BodyId, b: BodyId) {
        self.interactions.push(Interaction::Collision {
            a,
            b,
            kind: CollisionKind::Elastic { elasticity },
            touching: false,
        });
    }

    /// Mutual inverse-square attraction between `a` and `b`
    pub fn create_newtonian_gravity(&mut self, g: f64, a: BodyId, b: BodyId) {
        self.interactions.push(Interaction::Gravity { g, a, b });
    }

    /// Call `handler(scene, a, b, axis)` when `a` and `b` start touching
    ///
    /// Fires once per contact; the pair must separate before it fires again.
    pub fn create_collision(&mut self, a: BodyId, b: BodyId, handler: CollisionHandler<T>) {
        self.interactions.push(Interaction::Collision {
            a,
            b,
            kind: CollisionKind::Handler(handler),
            touching: false,
        });
    }

    /// Advance the scene by `dt`
    ///
    /// Applies every interaction (including ones registered by handlers during
    /// this pass), integrates every body, then purges removed bodies together
    /// with the interactions that name them.
    pub fn tick(&mut self, dt: f64) {
        let mut i = 0;
        while i < self.interactions.len() {
            self.apply_interaction(i);
            i += 1;
        }

        for body in &mut self.bodies {
            body.tick(dt);
        }

        self.purge_removed();
    }

    fn apply_interaction(&mut self, index: usize) {
        let (a, b) = self.interactions[index].bodies();
        let (Some(ia), Some(ib)) = (self.index_of(a), self.index_of(b)) else {
            return;
        };
        if self.bodies[ia].is_removed() || self.bodies[ib].is_removed() {
            return;
        }

        match self.interactions[index] {
            Interaction::Gravity { g, .. } => {
                let (pa, ma) = (self.bodies[ia].centroid(), self.bodies[ia].mass());
                let (pb, mb) = (self.bodies[ib].centroid(), self.bodies[ib].mass());
                let force = newtonian_force(g, pa, ma, pb, mb);
                self.bodies[ia].add_force(force);
                self.bodies[ib].add_force(-force);
            }
            Interaction::Collision { kind, touching, .. } => {
                let contact = self.contact(ia, ib);
                if let Interaction::Collision { touching: t, .. } = &mut self.interactions[index] {
                    *t = contact.is_some();
                }
                let Some((axis, penetration)) = contact else {
                    return;
                };

                match kind {
                    CollisionKind::Elastic { elasticity } => {
                        self.resolve_elastic(ia, ib, axis, penetration, elasticity)
                    }
                    CollisionKind::Handler(handler) => {
                        if !touching {
                            handler(self, a, b, axis);
                        }
                    }
                }
            }
        }
    }

    /// Separate an overlapping pair and bounce it if it is still closing
    ///
    /// Runs on every tick of a contact, so sustained contact (a ball sliding
    /// along a wall) keeps getting pushed out instead of sinking through.
    fn resolve_elastic(&mut self, ia: usize, ib: usize, axis: DVec2, penetration: f64, elasticity: f64) {
        let body_a = &self.bodies[ia];
        let body_b = &self.bodies[ib];
        let inv_a = inverse_mass(body_a.mass());
        let inv_b = inverse_mass(body_b.mass());
        let inv_total = inv_a + inv_b;
        if inv_total == 0.0 {
            return;
        }

        let closing = (body_a.velocity() - body_b.velocity()).dot(axis);
        let impulse = (closing > 0.0).then(|| {
            elastic_impulse(
                elasticity,
                axis,
                body_a.mass(),
                body_a.velocity(),
                body_b.mass(),
                body_b.velocity(),
            )
        });

        // Split the push-out by inverse mass; immovable bodies stay put
        let correction = axis * (penetration / inv_total);
        if inv_a > 0.0 {
            let centroid = self.bodies[ia].centroid() - correction * inv_a;
            self.bodies[ia].set_centroid(centroid);
        }
        if inv_b > 0.0 {
            let centroid = self.bodies[ib].centroid() + correction * inv_b;
            self.bodies[ib].set_centroid(centroid);
        }

        if let Some(impulse) = impulse {
            self.bodies[ia].add_impulse(impulse);
            self.bodies[ib].add_impulse(-impulse);
        }
    }

    /// Collision axis and overlap depth between two listed bodies
    fn contact(&self, ia: usize, ib: usize) -> Option<(DVec2, f64)> {
        let body_a = &self.bodies[ia];
        let body_b = &self.bodies[ib];
        if !bounds_overlap(
            body_a.centroid(),
            body_a.bounding_radius(),
            body_b.centroid(),
            body_b.bounding_radius(),
        ) {
            return None;
        }

        let result = find_collision(body_a.shape(), body_a.centroid(), body_b.shape(), body_b.centroid());
        result.hit.then_some((result.axis, result.penetration))
    }

    fn purge_removed(&mut self) {
        if !self.bodies.iter().any(|b| b.is_removed()) {
            return;
        }

        let removed: Vec<BodyId> = self
            .bodies
            .iter()
            .filter(|b| b.is_removed())
            .map(|b| b.id)
            .collect();
        self.interactions
            .retain(|inter| !removed.iter().any(|&id| inter.involves(id)));
        self.bodies.retain(|b| !b.is_removed());
    }
}
