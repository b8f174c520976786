//! Freeze cascade
//!
//! A ball that touches the floor or a settled ball is replaced by a frozen
//! copy, and every ball still falling learns to freeze on that copy.

use glam::DVec2;

use super::layout::ball_body;
use super::tag::{BoardScene, EntityTag};
use crate::sim::BodyId;

/// Collision handler registered as `(ball, frozen)`
///
/// Idempotent: a ball that is already removed is left alone, so several
/// contacts reported in one tick freeze it only once.
pub fn freeze(scene: &mut BoardScene, ball: BodyId, _target: BodyId, _axis: DVec2) {
    let Some(body) = scene.body(ball) else {
        return;
    };
    if body.is_removed() {
        return;
    }
    let center = body.centroid();

    scene.remove_body(ball);
    let frozen = scene.add_body(ball_body(center, DVec2::ZERO, EntityTag::Frozen));
    log::debug!("{:?} froze at ({:.2}, {:.2}) as {:?}", ball, center.x, center.y, frozen);

    let falling: Vec<BodyId> = scene
        .iter()
        .filter(|b| *b.info() == EntityTag::Ball && !b.is_removed())
        .map(|b| b.id())
        .collect();
    for other in falling {
        scene.create_collision(other, frozen, freeze);
    }
}
