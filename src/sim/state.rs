//! Game state and the body registry
//!
//! Everything a tick reads or writes lives here. The paddle and barrier are
//! plain fields; bricks and balls live in vectors kept in creation order, so
//! iteration order is stable and a run is reproducible from its seed.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::barrier::Barrier;
use super::brick::{Brick, BrickKind};
use super::contact::{Collider, Contact};
use super::geom::Aabb;
use super::paddle::Paddle;
use super::stage::{LevelLayout, StageBuilder, StageError};
use crate::renderer::Shape;
use crate::settings::Settings;

/// Stable identity of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Monotonic id allocator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdGen {
    next: u32,
}

impl IdGen {
    pub fn next_id(&mut self) -> BodyId {
        let id = BodyId(self.next);
        self.next += 1;
        id
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Level cleared; the next one loads at `resume_at`
    Cleared { resume_at: u64 },
    /// Run ended
    Over { won: bool },
}

/// Borrowed view of any body in the registry
#[derive(Debug, Clone, Copy)]
pub enum Body<'a> {
    Paddle(&'a Paddle),
    Barrier(&'a Barrier),
    Brick(&'a Brick),
    Ball(&'a Ball),
}

impl Body<'_> {
    pub fn id(&self) -> BodyId {
        match self {
            Body::Paddle(p) => p.id,
            Body::Barrier(b) => b.id,
            Body::Brick(b) => b.id,
            Body::Ball(b) => b.id,
        }
    }

    pub fn probe(&self, incoming: &Aabb) -> Contact {
        match self {
            Body::Paddle(p) => p.probe(incoming),
            Body::Barrier(b) => b.probe(incoming),
            Body::Brick(b) => b.probe(incoming),
            Body::Ball(b) => b.probe(incoming),
        }
    }

    pub fn draw(&self, out: &mut Vec<Shape>) {
        match self {
            Body::Paddle(p) => p.draw(out),
            Body::Barrier(b) => b.draw(out),
            Body::Brick(b) => b.draw(out),
            Body::Ball(b) => b.draw(out),
        }
    }

    /// Paddle and barrier are permanent
    pub fn is_marked(&self) -> bool {
        match self {
            Body::Paddle(_) | Body::Barrier(_) => false,
            Body::Brick(b) => b.marked,
            Body::Ball(b) => b.marked,
        }
    }
}

/// What the end-of-tick sweep removed and triggered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub bricks_destroyed: usize,
    pub balls_lost: usize,
    pub balls_spawned: usize,
    pub paddle_elongated: bool,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub seed: u64,
    pub settings: Settings,
    rng: Pcg32,
    ids: IdGen,
    pub level: u32,
    pub phase: GamePhase,
    /// Ticks since the run started (not counting pauses)
    pub time_ticks: u64,
    /// Playing ticks spent on the current level
    pub level_ticks: u64,
    pub paddle: Paddle,
    pub barrier: Barrier,
    /// Safety bricks first, then the level's bricks in layout order
    pub bricks: Vec<Brick>,
    pub balls: Vec<Ball>,
}

impl GameState {
    /// Create a new run at level 1
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut ids = IdGen::default();
        let paddle = Paddle::new(ids.next_id(), &settings.paddle, &settings.arena);
        let barrier = Barrier::new(ids.next_id(), &settings.arena);

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ids,
            level: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            level_ticks: 0,
            paddle,
            barrier,
            bricks: Vec::new(),
            balls: Vec::new(),
            settings,
        };
        state.next_level();
        state
    }

    /// Start over from level 1 with the same settings
    pub fn restart(&mut self) {
        let seed = self.seed.wrapping_add(1);
        log::info!("Restarting with seed {}", seed);
        *self = Self::new(seed, self.settings.clone());
    }

    /// Every body in contact-check order: paddle, barrier, bricks, balls
    pub fn bodies(&self) -> impl Iterator<Item = Body<'_>> {
        [Body::Paddle(&self.paddle), Body::Barrier(&self.barrier)]
            .into_iter()
            .chain(self.bricks.iter().map(Body::Brick))
            .chain(self.balls.iter().map(Body::Ball))
    }

    /// Current anchor point of the body with this id, if it has one
    pub fn anchor_of(&self, id: BodyId) -> Option<Vec2> {
        (id == self.paddle.id).then(|| self.paddle.anchor())
    }

    /// Spawn a ball resting on the paddle
    pub fn spawn_ball_attached(&mut self) -> BodyId {
        let id = self.ids.next_id();
        let mut ball = Ball::attached(id, self.paddle.id, self.settings.ball.radius);
        ball.sit_on(self.paddle.anchor());
        self.balls.push(ball);
        id
    }

    /// Release the first attached ball
    pub fn release_ball(&mut self) -> Option<BodyId> {
        let ball = self.balls.iter_mut().find(|b| b.is_attached())?;
        ball.detach(&self.settings.ball, &mut self.rng);
        log::debug!("Released ball {:?} with velocity {:?}", ball.id, ball.vel);
        Some(ball.id)
    }

    /// Bricks that must go before the level is cleared
    pub fn remaining_bricks(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| b.kind != BrickKind::Safety)
            .count()
    }

    pub fn safety_bricks(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| b.kind == BrickKind::Safety)
            .count()
    }

    pub fn attached_balls(&self) -> usize {
        self.balls.iter().filter(|b| b.is_attached()).count()
    }

    /// Apply brick effects, then drop every marked brick and ball
    pub fn sweep(&mut self) -> SweepReport {
        let now = self.time_ticks;
        let mut report = SweepReport::default();

        for brick in self.bricks.iter().filter(|b| b.marked) {
            report.bricks_destroyed += 1;
            match brick.kind {
                BrickKind::Regular | BrickKind::Safety => {}
                BrickKind::ExtraBall => report.balls_spawned += 1,
                BrickKind::LongPaddle => {
                    if self.paddle.elongate(now, &self.settings.paddle) {
                        log::debug!("Paddle elongated until tick {}", now + self.settings.paddle.elongation_ticks);
                        report.paddle_elongated = true;
                    }
                }
            }
        }
        self.bricks.retain(|b| !b.marked);

        let before = self.balls.len();
        self.balls.retain(|b| !b.marked);
        report.balls_lost = before - self.balls.len();
        if report.balls_lost > 0 {
            log::debug!("Lost {} ball(s), {} left", report.balls_lost, self.balls.len());
        }

        for _ in 0..report.balls_spawned {
            let id = self.spawn_ball_attached();
            log::debug!("Extra ball {:?} spawned on the paddle", id);
        }

        report
    }

    /// Load the level after the current one, or end the run
    pub fn next_level(&mut self) {
        let level = self.level + 1;
        match self.build_level(level) {
            Ok(true) => {
                log::info!(
                    "Level {} started: {} bricks, {} safety bricks",
                    level,
                    self.remaining_bricks(),
                    self.safety_bricks()
                );
            }
            Ok(false) => {
                log::info!("No layout for level {}, the player wins", level);
                self.phase = GamePhase::Over { won: true };
            }
            Err(err) => {
                log::error!("Could not build level {}: {}", level, err);
                self.phase = GamePhase::Over { won: false };
            }
        }
    }

    /// Replace bricks and balls with a fresh stage; `Ok(false)` if there is no such level
    fn build_level(&mut self, level: u32) -> Result<bool, StageError> {
        let builder = StageBuilder::new(&self.settings);
        let bricks = if level == 1 {
            builder.random_level(&mut self.rng, &mut self.ids)
        } else {
            let dir = self.settings.stage.levels_dir.as_deref();
            let Some(layout) = LevelLayout::load(level, dir)? else {
                return Ok(false);
            };
            builder.from_layout(level, &layout, &mut self.rng, &mut self.ids)?
        };

        let mut safety = builder.safety_row(builder.safety_count(level), &mut self.ids);
        safety.extend(bricks);
        self.bricks = safety;
        self.balls.clear();
        self.spawn_ball_attached();

        self.level = level;
        self.level_ticks = 0;
        self.phase = GamePhase::Playing;
        Ok(true)
    }

    /// Draw list for the current frame, in registry order
    pub fn draw(&self) -> Vec<Shape> {
        let mut out = Vec::with_capacity(self.bricks.len() + self.balls.len() + 8);
        for body in self.bodies() {
            body.draw(&mut out);
        }
        out
    }
}
