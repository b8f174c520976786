//! Board orchestration
//!
//! Decides which bodies exist and how they interact; the `sim` scene does the
//! actual physics.
//! - Every body carries exactly one [`EntityTag`]
//! - Interactions for a ball are registered once, when it is created
//! - Frozen replacements re-wire every falling ball (the freeze cascade)

pub mod freeze;
pub mod layout;
pub mod policy;
pub mod session;
pub mod spawner;
pub mod tag;

pub use freeze::freeze;
pub use layout::{Board, build_board, peg_center, peg_rows};
pub use policy::{add_ball, register_interactions};
pub use session::{MAX_FRAME_DT, Session};
pub use spawner::Spawner;
pub use tag::{BoardScene, Entity, EntityTag, count_live};
