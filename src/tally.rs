//! Galton histogram of settled balls
//!
//! Counts frozen balls by horizontal bin so a host can report how the pile
//! is shaping up.

use serde::{Deserialize, Serialize};

use crate::board::{BoardScene, EntityTag};
use crate::consts::{BALL_RADIUS, COL_SPACING, MAX};
use crate::sim::BodyId;

/// Number of bins across the playfield, each one peg column wide
pub fn bin_count() -> usize {
    (MAX.x / COL_SPACING).ceil() as usize
}

/// Bin index for a horizontal position (clamped to the playfield)
pub fn bin_of(x: f64) -> usize {
    let last = bin_count() - 1;
    if x <= 0.0 {
        return 0;
    }
    ((x / COL_SPACING) as usize).min(last)
}

/// Snapshot of the pile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileTally {
    /// Settled balls per bin, left to right
    pub bins: Vec<u32>,
    /// Top of the highest settled ball (0 when nothing has settled)
    pub peak: f64,
}

impl Default for PileTally {
    fn default() -> Self {
        Self {
            bins: vec![0; bin_count()],
            peak: 0.0,
        }
    }
}

impl PileTally {
    /// Tally every frozen body except the floor
    pub fn from_scene(scene: &BoardScene, floor: BodyId) -> Self {
        let mut tally = Self::default();
        for body in scene.iter() {
            if body.is_removed() || body.id() == floor || *body.info() != EntityTag::Frozen {
                continue;
            }
            tally.record(body.centroid().x, body.centroid().y);
        }
        tally
    }

    /// Add one settled ball at `(x, y)`
    pub fn record(&mut self, x: f64, y: f64) {
        self.bins[bin_of(x)] += 1;
        self.peak = self.peak.max(y + BALL_RADIUS);
    }

    pub fn total(&self) -> u32 {
        self.bins.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Index of the fullest bin (leftmost on ties)
    pub fn mode(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let max = self.bins.iter().copied().max().unwrap_or(0);
        self.bins.iter().position(|&c| c == max)
    }

    /// Mean horizontal bin index, weighted by count
    pub fn mean_bin(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: f64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &c)| i as f64 * c as f64)
            .sum();
        Some(weighted / total as f64)
    }

    /// One-line text histogram, e.g. `[0 0 1 4 9 4 1 0]`
    pub fn render_line(&self) -> String {
        let counts: Vec<String> = self.bins.iter().map(|c| c.to_string()).collect();
        format!("[{}]", counts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{build_board, freeze};
    use crate::board::policy::add_ball;
    use glam::DVec2;

    #[test]
    fn test_bins_cover_playfield() {
        assert_eq!(bin_count(), 23);
        assert_eq!(bin_of(-5.0), 0);
        assert_eq!(bin_of(0.0), 0);
        assert_eq!(bin_of(3.4), 0);
        assert_eq!(bin_of(3.6), 1);
        assert_eq!(bin_of(MAX.x), bin_count() - 1);
        assert_eq!(bin_of(1.0e9), bin_count() - 1);
    }

    #[test]
    fn test_record_and_stats() {
        let mut tally = PileTally::default();
        assert!(tally.is_empty());
        assert_eq!(tally.mode(), None);
        assert_eq!(tally.mean_bin(), None);

        tally.record(40.0, 2.0);
        tally.record(40.5, 4.0);
        tally.record(33.0, 2.0);

        assert_eq!(tally.total(), 3);
        assert_eq!(tally.mode(), Some(bin_of(40.0)));
        assert_eq!(tally.peak, 5.0);
        let mean = tally.mean_bin().unwrap_or_default();
        assert!((mean - (2.0 * 11.0 + 9.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_scene_ignores_floor_and_falling_balls() {
        let mut scene = BoardScene::new();
        let board = build_board(&mut scene);
        let settled = add_ball(&mut scene, DVec2::new(40.0, 2.0), DVec2::ZERO);
        add_ball(&mut scene, DVec2::new(40.0, 60.0), DVec2::ZERO);
        freeze(&mut scene, settled, board.floor, DVec2::NEG_Y);

        let tally = PileTally::from_scene(&scene, board.floor);
        assert_eq!(tally.total(), 1);
        assert_eq!(tally.bins[bin_of(40.0)], 1);
        assert_eq!(tally.render_line().matches(' ').count(), bin_count() - 1);
    }
}
