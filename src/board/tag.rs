//! Entity taxonomy

use serde::{Deserialize, Serialize};

use crate::sim::{Body, Scene};

/// Closed classification of every body on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    /// Falling ball; the only kind that is ever removed
    Ball,
    /// Settled ball or the floor; freezes balls that touch it
    Frozen,
    /// Peg or funnel wall; elastic reflector
    Obstacle,
    /// Far-away mass that pulls every ball down
    GravitySource,
}

impl EntityTag {
    /// Whether bodies with this tag may ever be removed
    pub fn is_mortal(self) -> bool {
        matches!(self, EntityTag::Ball)
    }
}

/// Body carrying an entity tag
pub type Entity = Body<EntityTag>;

/// Scene of tagged entities
pub type BoardScene = Scene<EntityTag>;

/// Number of live (not removed) bodies with the given tag
pub fn count_live(scene: &BoardScene, tag: EntityTag) -> usize {
    scene
        .iter()
        .filter(|b| !b.is_removed() && *b.info() == tag)
        .count()
}
