//! Per-frame simulation driver
//!
//! Lifecycle mirrors the host: [`Session::new`] initialises, [`Session::frame`]
//! advances one frame, dropping the session tears everything down.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::layout::{Board, build_board};
use super::spawner::Spawner;
use super::tag::{BoardScene, EntityTag, count_live};
use crate::consts::{MAX, MAX_SUBSTEPS, SIM_DT};
use crate::renderer::Renderer;

/// Largest frame delta fed into the accumulator (seconds)
pub const MAX_FRAME_DT: f64 = 0.1;

/// One running board
pub struct Session {
    scene: BoardScene,
    board: Board,
    spawner: Spawner,
    rng: Pcg32,
    seed: u64,
    accumulator: f64,
    /// Simulated seconds since the session started
    elapsed: f64,
    steps: u64,
}

impl Session {
    /// Build the board and arm the spawner
    pub fn new(seed: u64) -> Self {
        let mut scene = BoardScene::new();
        let board = build_board(&mut scene);
        log::info!("Session started with seed {}", seed);

        Self {
            scene,
            board,
            spawner: Spawner::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            accumulator: 0.0,
            elapsed: 0.0,
            steps: 0,
        }
    }

    /// Playfield rectangle (min, max) handed to the renderer
    pub fn bounds() -> (DVec2, DVec2) {
        (DVec2::ZERO, MAX)
    }

    pub fn scene(&self) -> &BoardScene {
        &self.scene
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Balls still falling
    pub fn falling(&self) -> usize {
        count_live(&self.scene, EntityTag::Ball)
    }

    /// Balls that have settled (frozen bodies other than the floor)
    pub fn settled(&self) -> usize {
        count_live(&self.scene, EntityTag::Frozen).saturating_sub(1)
    }

    /// Advance the board by exactly `dt`: maybe drop a ball, then run physics
    pub fn step(&mut self, dt: f64) {
        self.spawner.tick(&mut self.scene, dt, &mut self.rng);
        self.scene.tick(dt);
        self.elapsed += dt;
        self.steps += 1;
        log::trace!(
            "step {}: {} bodies, {} interactions",
            self.steps,
            self.scene.len(),
            self.scene.interactions().len()
        );
    }

    /// Advance by a wall-clock frame delta and draw the result
    ///
    /// The delta is clamped to [`MAX_FRAME_DT`] (NaN and infinities count as
    /// zero) and consumed in fixed
    /// [`SIM_DT`] steps, at most [`MAX_SUBSTEPS`] per frame. Returns the number
    /// of steps taken.
    pub fn frame<R: Renderer>(&mut self, dt: f64, renderer: &mut R) -> u32 {
        // A non-finite delta would poison the accumulator for good
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        renderer.draw(&self.scene);
        substeps
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        log::info!(
            "Session {} ended after {:.1}s ({} steps): {} settled, {} falling, {} bodies released",
            self.seed,
            self.elapsed,
            self.steps,
            self.settled(),
            self.falling(),
            self.scene.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::freeze::freeze;
    use crate::board::layout::{PEG_COLOR, add_floor, add_gravity_source};
    use crate::board::policy::add_ball;
    use crate::board::tag::Entity;
    use crate::consts::*;
    use crate::renderer::MeshRenderer;
    use crate::sim::{BodyId, polygon};

    /// Floor and gravity source only, no pegs or walls
    fn bare_scene() -> (BoardScene, BodyId) {
        let mut scene = BoardScene::new();
        add_gravity_source(&mut scene);
        let floor = add_floor(&mut scene);
        (scene, floor)
    }

    fn frozen_balls(scene: &BoardScene, floor: BodyId) -> Vec<DVec2> {
        scene
            .iter()
            .filter(|b| *b.info() == EntityTag::Frozen && b.id() != floor)
            .map(|b| b.centroid())
            .collect()
    }

    #[test]
    fn test_single_ball_freezes_on_floor() {
        let (mut scene, floor) = bare_scene();
        let ball = add_ball(&mut scene, DVec2::new(MAX.x / 2.0, 20.0), DVec2::new(0.0, -8.0));

        for _ in 0..(5.0 / SIM_DT) as usize {
            scene.tick(SIM_DT);
        }

        assert!(scene.is_removed(ball));
        let frozen = frozen_balls(&scene, floor);
        assert_eq!(frozen.len(), 1);
        // Resting on top of the floor, directly below the drop point
        assert!((frozen[0].x - MAX.x / 2.0).abs() < 1e-6);
        assert!(frozen[0].y > WALL_WIDTH);
        assert!(frozen[0].y < WALL_WIDTH + BALL_RADIUS + 0.1);
    }

    #[test]
    fn test_second_ball_stacks_on_first() {
        let (mut scene, floor) = bare_scene();
        let x = MAX.x / 2.0;
        add_ball(&mut scene, DVec2::new(x, DROP_Y), START_VELOCITY);
        for _ in 0..(0.5 / SIM_DT) as usize {
            scene.tick(SIM_DT);
        }
        add_ball(&mut scene, DVec2::new(x, DROP_Y), START_VELOCITY);

        for _ in 0..(8.0 / SIM_DT) as usize {
            scene.tick(SIM_DT);
        }

        assert_eq!(count_live(&scene, EntityTag::Ball), 0);
        let mut frozen = frozen_balls(&scene, floor);
        assert_eq!(frozen.len(), 2);
        frozen.sort_by(|a, b| a.y.total_cmp(&b.y));
        // The second ball sits on the first, never inside it
        assert!(frozen[1].y - frozen[0].y > BALL_RADIUS);
        assert!((frozen[1].x - frozen[0].x).abs() < 1e-6);
    }

    #[test]
    fn test_ball_bounces_off_obstacle() {
        let (mut scene, _floor) = bare_scene();
        let mut peg = Entity::new(
            polygon::circle(PEG_RADIUS, CIRCLE_POINTS),
            f64::INFINITY,
            PEG_COLOR,
            EntityTag::Obstacle,
        );
        peg.set_centroid(DVec2::new(MAX.x / 2.0 + 0.5, 40.0));
        scene.add_body(peg);

        let ball = add_ball(&mut scene, DVec2::new(MAX.x / 2.0, 45.0), DVec2::new(0.0, -8.0));
        let mut deflected = false;
        for _ in 0..(2.0 / SIM_DT) as usize {
            scene.tick(SIM_DT);
            if scene.body(ball).is_some_and(|b| b.velocity().x < -0.5) {
                deflected = true;
                break;
            }
        }
        assert!(deflected, "ball should be knocked away from an off-centre peg");
    }

    #[test]
    fn test_freeze_during_tick_wires_same_tick() {
        // A ball already overlapping a freshly frozen ball freezes in the
        // same tick the cascade registers it
        let (mut scene, floor) = bare_scene();
        let low = add_ball(&mut scene, DVec2::new(40.0, 1.9), DVec2::ZERO);
        let high = add_ball(&mut scene, DVec2::new(40.0, 3.7), DVec2::ZERO);

        freeze(&mut scene, low, floor, DVec2::NEG_Y);
        scene.tick(SIM_DT);

        assert!(scene.is_removed(high));
        assert_eq!(frozen_balls(&scene, floor).len(), 2);
    }

    #[test]
    fn test_session_tags_stay_exclusive() {
        use std::collections::HashMap;

        let mut session = Session::new(1234);
        let pegs_and_walls = session.board().pegs.len() + 2;
        let mut tags: HashMap<BodyId, EntityTag> = HashMap::new();

        for _ in 0..(20.0 / SIM_DT) as usize {
            session.step(SIM_DT);

            for body in session.scene().iter() {
                let tag = *tags.entry(body.id()).or_insert(*body.info());
                assert_eq!(tag, *body.info(), "{:?} changed tag", body.id());
            }
            for (id, tag) in &tags {
                if session.scene().is_removed(*id) {
                    assert!(tag.is_mortal(), "{:?} {:?} was removed", tag, id);
                }
            }
        }

        assert_eq!(count_live(session.scene(), EntityTag::Obstacle), pegs_and_walls);
        assert_eq!(count_live(session.scene(), EntityTag::GravitySource), 1);
        // 20 s at one drop per second, the first one immediate
        let dropped = session.falling() + session.settled();
        assert!((19..=21).contains(&dropped), "dropped {}", dropped);
        assert!(session.settled() > 0);
    }

    #[test]
    fn test_session_is_deterministic() {
        let mut a = Session::new(99);
        let mut b = Session::new(99);
        for _ in 0..(6.0 / SIM_DT) as usize {
            a.step(SIM_DT);
            b.step(SIM_DT);
        }
        let pa: Vec<DVec2> = a.scene().iter().map(|b| b.centroid()).collect();
        let pb: Vec<DVec2> = b.scene().iter().map(|b| b.centroid()).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_frame_substeps_and_draws() {
        let mut session = Session::new(5);
        let mut renderer = MeshRenderer::default();
        let (min, max) = Session::bounds();
        renderer.init(min, max);

        // 1/30 s is four 1/120 s steps
        let steps = session.frame(1.0 / 30.0 + 1e-9, &mut renderer);
        assert_eq!(steps, 4);
        assert_eq!(session.steps(), 4);
        assert_eq!(session.seed(), 5);
        assert!(!renderer.vertices().is_empty());

        // Huge deltas are clamped and capped
        let steps = session.frame(5.0, &mut renderer);
        assert_eq!(steps, MAX_SUBSTEPS);
        assert_eq!(session.falling(), 1);
    }

    #[test]
    fn test_non_finite_frame_delta_is_ignored() {
        let mut session = Session::new(5);
        let mut renderer = MeshRenderer::default();

        assert_eq!(session.frame(f64::NAN, &mut renderer), 0);
        assert_eq!(session.frame(f64::INFINITY, &mut renderer), 0);
        assert_eq!(session.frame(f64::NEG_INFINITY, &mut renderer), 0);

        // The accumulator still works afterwards
        let steps = session.frame(0.05, &mut renderer);
        assert!(steps >= 5, "only {} steps after a NaN frame", steps);
        assert!(session.elapsed().is_finite());
    }

    #[test]
    fn test_balls_stay_inside_playfield() {
        for seed in [2, 5, 42] {
            let mut session = Session::new(seed);
            for _ in 0..(100.0 / SIM_DT) as usize {
                session.step(SIM_DT);
                for body in session.scene().iter() {
                    if body.is_removed() || *body.info() != EntityTag::Ball {
                        continue;
                    }
                    let c = body.centroid();
                    assert!(
                        (0.0..=MAX.x).contains(&c.x) && c.y >= 0.0,
                        "seed {}: {:?} left the board at ({:.2}, {:.2}) after {:.1}s",
                        seed,
                        body.id(),
                        c.x,
                        c.y,
                        session.elapsed()
                    );
                }
            }
        }
    }
}
