//! Rigid-body scene
//!
//! Generic over the payload attached to each body. Knows nothing about the
//! board: it integrates forces, detects overlaps and fires whatever
//! interactions were registered.
//! - Stable iteration order (by body ID)
//! - Interactions registered during a tick take part in that same tick
//! - Removed bodies are purged at the end of the tick

pub mod body;
pub mod collision;
pub mod forces;
pub mod polygon;
pub mod scene;

pub use body::{Body, BodyId, Rgb};
pub use collision::{CollisionResult, bounds_overlap, find_collision};
pub use forces::{CollisionHandler, CollisionKind, Interaction};
pub use scene::Scene;
