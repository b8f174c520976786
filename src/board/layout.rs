//! Static board geometry: pegs, funnel walls, floor and the gravity source
//!
//! Everything here runs once at session start.

use glam::DVec2;

use super::tag::{BoardScene, EntityTag, Entity};
use crate::consts::*;
use crate::sim::{BodyId, Rgb, polygon};

pub const BALL_COLOR: Rgb = Rgb::new(1.0, 0.0, 0.0);
pub const PEG_COLOR: Rgb = Rgb::new(0.0, 1.0, 0.0);
pub const WALL_COLOR: Rgb = Rgb::new(0.0, 0.0, 1.0);

/// Handles to the bodies created by [`build_board`]
#[derive(Debug, Clone)]
pub struct Board {
    pub gravity_source: BodyId,
    pub pegs: Vec<BodyId>,
    pub walls: [BodyId; 2],
    pub floor: BodyId,
}

/// Centre of the peg at `col` in `row`
///
/// Alternate rows are staggered by half a column, so the lattice widens by one
/// peg per row.
pub fn peg_center(row: usize, col: usize) -> DVec2 {
    DVec2::new(
        MAX.x / 2.0 + (col as f64 - row as f64 * 0.5) * COL_SPACING,
        MAX.y - (row as f64 + 1.0) * ROW_SPACING,
    )
}

/// Peg centres grouped by row; row `i` (1-based) holds `i + 1` pegs
pub fn peg_rows(n_rows: usize) -> Vec<Vec<DVec2>> {
    (1..=n_rows)
        .map(|row| (0..=row).map(|col| peg_center(row, col)).collect())
        .collect()
}

/// Ball-shaped body at `center`
///
/// Used for falling balls and for their frozen replacements.
pub fn ball_body(center: DVec2, velocity: DVec2, tag: EntityTag) -> Entity {
    let mut ball = Entity::new(
        polygon::circle(BALL_RADIUS, CIRCLE_POINTS),
        BALL_MASS,
        BALL_COLOR,
        tag,
    );
    ball.set_centroid(center);
    ball.set_velocity(velocity);
    ball
}

/// Place the massive body whose inverse-square pull stands in for uniform
/// gravity.
///
/// At depth `R = sqrt(G * M / g)` below the floor the attraction on a ball at
/// the floor is exactly `g`. It weakens with height as `(R / (R + y))^2`;
/// with `R` in the millions of metres that variation over an 80 m playfield
/// is a few parts per million. The approximation is intentional.
pub fn add_gravity_source(scene: &mut BoardScene) -> BodyId {
    // Offscreen, so the shape only matters for culling
    let mut body = Entity::new(polygon::rect(1.0, 1.0), M, WALL_COLOR, EntityTag::GravitySource);
    body.set_centroid(DVec2::new(MAX.x / 2.0, -gravity_depth()));
    scene.add_body(body)
}

/// Add one immovable circular obstacle per peg
pub fn add_pegs(scene: &mut BoardScene) -> Vec<BodyId> {
    peg_rows(N_ROWS)
        .into_iter()
        .flatten()
        .map(|center| {
            let mut peg = Entity::new(
                polygon::circle(PEG_RADIUS, CIRCLE_POINTS),
                f64::INFINITY,
                PEG_COLOR,
                EntityTag::Obstacle,
            );
            peg.set_centroid(center);
            scene.add_body(peg)
        })
        .collect()
}

/// Add the two funnel walls, anchored at the bottom corners and tilted inward
pub fn add_walls(scene: &mut BoardScene) -> [BodyId; 2] {
    let length = wall_length();
    let angle = wall_angle();

    let mut left = Entity::new(
        polygon::rect(length, WALL_WIDTH),
        f64::INFINITY,
        WALL_COLOR,
        EntityTag::Obstacle,
    );
    left.set_centroid(DVec2::new(length / 2.0, 0.0));
    left.rotate_about(angle, DVec2::ZERO);

    let mut right = Entity::new(
        polygon::rect(length, WALL_WIDTH),
        f64::INFINITY,
        WALL_COLOR,
        EntityTag::Obstacle,
    );
    right.set_centroid(DVec2::new(MAX.x - length / 2.0, 0.0));
    right.rotate_about(-angle, DVec2::new(MAX.x, 0.0));

    [scene.add_body(left), scene.add_body(right)]
}

/// Add the full-width floor
///
/// Tagged `Frozen` like a settled ball, so landing on the ground and landing
/// on a pile go through the same freeze rule.
pub fn add_floor(scene: &mut BoardScene) -> BodyId {
    let mut floor = Entity::new(
        polygon::rect(MAX.x, WALL_WIDTH),
        f64::INFINITY,
        WALL_COLOR,
        EntityTag::Frozen,
    );
    floor.set_centroid(DVec2::new(MAX.x / 2.0, WALL_WIDTH / 2.0));
    scene.add_body(floor)
}

/// Lay out the whole static board
pub fn build_board(scene: &mut BoardScene) -> Board {
    let gravity_source = add_gravity_source(scene);
    let pegs = add_pegs(scene);
    let walls = add_walls(scene);
    let floor = add_floor(scene);

    log::info!(
        "Board built: {} pegs, gravity source at depth {:.0}",
        pegs.len(),
        gravity_depth()
    );

    Board {
        gravity_source,
        pegs,
        walls,
        floor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::forces::newtonian_force;
    use proptest::prelude::*;

    #[test]
    fn test_peg_rows_widen_by_one() {
        let rows = peg_rows(N_ROWS);
        assert_eq!(rows.len(), N_ROWS);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), i + 2, "row {} should hold {} pegs", i + 1, i + 2);
        }
    }

    #[test]
    fn test_first_rows_match_closed_form() {
        // Row 1: two pegs straddling the centre line
        assert_eq!(peg_center(1, 0), DVec2::new(40.0 - 1.75, 80.0 - 7.2));
        assert_eq!(peg_center(1, 1), DVec2::new(40.0 + 1.75, 80.0 - 7.2));
        // Row 2: the middle peg sits on the centre line
        assert_eq!(peg_center(2, 1).x, 40.0);
    }

    proptest! {
        #[test]
        fn prop_peg_grid_closed_form(row in 1usize..=N_ROWS, col_frac in 0.0f64..1.0) {
            let col = ((row + 1) as f64 * col_frac) as usize;
            let rows = peg_rows(N_ROWS);
            let peg = rows[row - 1][col];
            let x = MAX.x / 2.0 + (col as f64 - row as f64 * 0.5) * COL_SPACING;
            let y = MAX.y - (row as f64 + 1.0) * ROW_SPACING;
            prop_assert!((peg.x - x).abs() < 1e-12);
            prop_assert!((peg.y - y).abs() < 1e-12);
        }

        #[test]
        fn prop_rows_symmetric_about_centre(row in 1usize..=N_ROWS) {
            let first = peg_center(row, 0);
            let last = peg_center(row, row);
            prop_assert!((first.x + last.x - MAX.x).abs() < 1e-9);
        }
    }

    #[test]
    fn test_walls_form_funnel() {
        let mut scene = BoardScene::new();
        let [left, right] = add_walls(&mut scene);
        let left = scene.body(left).map(|b| b.centroid()).unwrap_or_default();
        let right = scene.body(right).map(|b| b.centroid()).unwrap_or_default();

        // Mirror images about the centre line, leaning inward and up
        assert!((left.x + right.x - MAX.x).abs() < 1e-9);
        assert!((left.y - right.y).abs() < 1e-9);
        assert!(left.y > 0.0);
        assert!(left.x < MAX.x / 2.0);

        // Left wall is parallel to the left edge of the peg lattice
        let expected = wall_length() / 2.0 * DVec2::from_angle(wall_angle());
        assert!((left - expected).length() < 1e-9);
    }

    #[test]
    fn test_build_board_tags() {
        let mut scene = BoardScene::new();
        let board = build_board(&mut scene);

        let peg_count: usize = (1..=N_ROWS).map(|i| i + 1).sum();
        assert_eq!(board.pegs.len(), peg_count);
        assert_eq!(scene.len(), peg_count + 2 + 1 + 1);
        assert_eq!(scene.body(board.floor).map(|b| *b.info()), Some(EntityTag::Frozen));
        assert_eq!(
            scene.body(board.gravity_source).map(|b| *b.info()),
            Some(EntityTag::GravitySource)
        );
        assert!(board.pegs.iter().chain(board.walls.iter()).all(|&id| {
            scene.body(id).map(|b| *b.info()) == Some(EntityTag::Obstacle)
        }));
    }

    #[test]
    fn test_gravity_source_pulls_with_surface_gravity() {
        let source = DVec2::new(MAX.x / 2.0, -gravity_depth());
        let accel_at = |y: f64| {
            newtonian_force(G, DVec2::new(MAX.x / 2.0, y), BALL_MASS, source, M).length() / BALL_MASS
        };

        let bottom = accel_at(0.0);
        let top = accel_at(MAX.y);
        assert!((bottom - SURFACE_GRAVITY).abs() < 1e-6);
        // Pull weakens with height, but by far less than 1%
        assert!(top < bottom);
        assert!((bottom - top) / bottom < 0.01);
    }
}
