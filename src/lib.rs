//! Galton Drop - a Plinko/Galton board where settled balls become obstacles
//!
//! Core modules:
//! - `board`: Orchestration (entity tags, interaction policy, freeze cascade, spawning, session loop)
//! - `sim`: Rigid-body scene (polygons, collisions, forces, integration)
//! - `renderer`: CPU tessellation into GPU-ready vertex batches
//! - `platform`: Frame clocks for native and test hosts
//! - `settings`: Host-level runtime settings
//! - `tally`: Histogram of settled balls
//! - `web`: Browser host bindings (wasm32 only)

pub mod board;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tally;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use board::{EntityTag, Session};
pub use settings::Settings;
pub use tally::PileTally;

/// Board configuration constants
pub mod consts {
    use glam::DVec2;

    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f64 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Top-right corner of the playfield (bottom-left is the origin)
    pub const MAX: DVec2 = DVec2::new(80.0, 80.0);

    /// Peg rows, numbered 1..=N_ROWS
    pub const N_ROWS: usize = 11;
    pub const ROW_SPACING: f64 = 3.6;
    pub const COL_SPACING: f64 = 3.5;
    pub const PEG_RADIUS: f64 = 0.5;

    pub const WALL_WIDTH: f64 = 1.0;

    pub const BALL_RADIUS: f64 = 1.0;
    pub const BALL_MASS: f64 = 2.0;
    /// Vertices used to approximate circles
    pub const CIRCLE_POINTS: usize = 40;

    /// Seconds between drops
    pub const DROP_INTERVAL: f64 = 1.0;
    /// Width of the horizontal jitter window around the centre line
    pub const DELTA_X: f64 = 1.0;
    pub const DROP_Y: f64 = MAX.y - 3.0;
    pub const START_VELOCITY: DVec2 = DVec2::new(0.0, -8.0);

    /// Restitution for ball-on-peg and ball-on-wall bounces
    pub const PEG_ELASTICITY: f64 = 0.3;
    /// Restitution for ball-on-ball bounces
    pub const BALL_ELASTICITY: f64 = 0.7;

    /// Gravitational constant (N m^2 / kg^2)
    pub const G: f64 = 6.67e-11;
    /// Mass of the gravity source (kg)
    pub const M: f64 = 6e24;
    /// Desired surface acceleration (m / s^2)
    pub const SURFACE_GRAVITY: f64 = 9.8;

    /// Funnel wall tilt, matching the slope of the peg lattice edges
    pub fn wall_angle() -> f64 {
        ROW_SPACING.atan2(COL_SPACING / 2.0)
    }

    /// Funnel wall length: corner to top centre
    pub fn wall_length() -> f64 {
        (MAX.x / 2.0).hypot(MAX.y)
    }

    /// Depth of the gravity source below the playfield, `sqrt(G * M / g)`
    pub fn gravity_depth() -> f64 {
        (G * M / SURFACE_GRAVITY).sqrt()
    }
}
