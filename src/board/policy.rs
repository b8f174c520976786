//! Interaction policy: which interaction a new ball gets with each body
//!
//! Decided purely by the other body's tag, once, when the ball is created.

use glam::DVec2;

use super::freeze::freeze;
use super::layout::ball_body;
use super::tag::{BoardScene, EntityTag};
use crate::consts::{BALL_ELASTICITY, G, PEG_ELASTICITY};
use crate::sim::BodyId;

/// Register one interaction between `ball` and every other live body
///
/// | other body    | interaction                           |
/// |---------------|---------------------------------------|
/// | Ball          | elastic, `BALL_ELASTICITY`            |
/// | Obstacle      | elastic, `PEG_ELASTICITY`             |
/// | Frozen        | [`freeze`] callback, ordered (ball, frozen) |
/// | GravitySource | Newtonian attraction with constant `G` |
pub fn register_interactions(scene: &mut BoardScene, ball: BodyId) {
    let others: Vec<(BodyId, EntityTag)> = scene
        .iter()
        .filter(|b| b.id() != ball && !b.is_removed())
        .map(|b| (b.id(), *b.info()))
        .collect();

    for (other, tag) in others {
        match tag {
            EntityTag::Ball => scene.create_physics_collision(BALL_ELASTICITY, ball, other),
            EntityTag::Obstacle => scene.create_physics_collision(PEG_ELASTICITY, ball, other),
            EntityTag::Frozen => scene.create_collision(ball, other, freeze),
            EntityTag::GravitySource => scene.create_newtonian_gravity(G, other, ball),
        }
    }
}

/// Create a falling ball and wire it to everything already on the board
pub fn add_ball(scene: &mut BoardScene, center: DVec2, velocity: DVec2) -> BodyId {
    let ball = scene.add_body(ball_body(center, velocity, EntityTag::Ball));
    register_interactions(scene, ball);
    ball
}
