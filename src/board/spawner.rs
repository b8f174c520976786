//! Periodic ball drops

use glam::DVec2;
use rand::Rng;

use super::policy::add_ball;
use super::tag::BoardScene;
use crate::consts::{DELTA_X, DROP_INTERVAL, DROP_Y, MAX, START_VELOCITY};
use crate::sim::BodyId;

/// Drops one ball every `DROP_INTERVAL` seconds of simulated time
#[derive(Debug, Clone)]
pub struct Spawner {
    time_since_drop: f64,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    /// The first tick always drops a ball
    pub fn new() -> Self {
        Self {
            time_since_drop: f64::INFINITY,
        }
    }

    pub fn time_since_drop(&self) -> f64 {
        self.time_since_drop
    }

    /// Advance the drop timer by `dt`, dropping a ball once it exceeds the
    /// interval
    pub fn tick<R: Rng>(&mut self, scene: &mut BoardScene, dt: f64, rng: &mut R) -> Option<BodyId> {
        self.time_since_drop += dt;
        if self.time_since_drop <= DROP_INTERVAL {
            return None;
        }
        self.time_since_drop = 0.0;

        let center = drop_point(rng.random::<f64>());
        let ball = add_ball(scene, center, START_VELOCITY);
        log::debug!("Dropped {:?} at x={:.3}", ball, center.x);
        Some(ball)
    }
}

/// Drop position for a uniform sample `u` in [0, 1)
pub fn drop_point(u: f64) -> DVec2 {
    DVec2::new(MAX.x / 2.0 + (u - 0.5) * DELTA_X, DROP_Y)
}
