//! Fixed timestep simulation tick
//!
//! One call advances the whole game by one frame: input, paddle, every ball
//! in registry order, the end-of-frame sweep and the level status check.

use super::ball::Surroundings;
use super::paddle::{Spin, Steer};
use super::state::{GamePhase, GameState};
use crate::consts::TICKS_PER_SECOND;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// New steering command; `None` keeps the current one
    pub steer: Option<Steer>,
    /// Turn the paddle one step
    pub rotate: Option<Spin>,
    /// Release the first attached ball
    pub release: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start over after the run ended
    pub restart: bool,
}

impl TickInput {
    /// Demo player: chase the lowest falling ball and serve right away
    pub fn autopilot(state: &GameState) -> Self {
        let paddle = &state.paddle;
        let target = state
            .balls
            .iter()
            .filter(|b| !b.is_attached() && b.vel.y > 0.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map_or(state.barrier.center_x(), |b| b.pos.x);

        // Distance the paddle still coasts once it stops accelerating
        let friction = state.settings.paddle.friction;
        let coast = if friction > 0.0 {
            paddle.vel.abs() * (1.0 - friction) / friction
        } else {
            0.0
        };
        let slack = paddle.width / 8.0 + coast;

        let offset = target - paddle.pos.x;
        let steer = if offset > slack {
            Steer::Right
        } else if offset < -slack {
            Steer::Left
        } else {
            Steer::Stop
        };

        Self {
            steer: Some(steer),
            release: state.attached_balls() > 0,
            ..Default::default()
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart && matches!(state.phase, GamePhase::Over { .. }) {
        state.restart();
        return;
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::Over { .. } => return,
        GamePhase::Cleared { resume_at } => {
            state.time_ticks += 1;
            if state.time_ticks >= resume_at {
                state.next_level();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.level_ticks += 1;
    let now = state.time_ticks;

    if let Some(steer) = input.steer {
        state.paddle.steer(steer, &state.settings.paddle);
    }
    if let Some(spin) = input.rotate {
        state.paddle.rotate(spin, &state.settings.paddle);
    }
    if input.release {
        state.release_ball();
    }

    state.paddle.advance(now, &state.barrier, &state.settings.paddle);
    advance_balls(state);
    state.sweep();
    check_status(state);
}

/// Move every ball once, in registry order
fn advance_balls(state: &mut GameState) {
    let floor = state.settings.arena.height;
    for index in 0..state.balls.len() {
        let anchor = state.balls[index]
            .attached_to
            .and_then(|id| state.anchor_of(id));

        let (before, rest) = state.balls.split_at_mut(index);
        let Some((ball, after)) = rest.split_first_mut() else {
            break;
        };
        let mut world = Surroundings {
            barrier: &state.barrier,
            paddle: &state.paddle,
            bricks: &mut state.bricks,
            before,
            after,
            anchor,
            floor,
        };
        ball.advance(&mut world, &state.settings);
    }
}

/// Level cleared or last ball gone
fn check_status(state: &mut GameState) {
    if state.remaining_bricks() == 0 {
        let resume_at = state.time_ticks + state.settings.stage.level_break_ticks;
        log::info!(
            "Level {} cleared in {:.1}s",
            state.level,
            state.level_ticks as f32 / TICKS_PER_SECOND as f32
        );
        state.phase = GamePhase::Cleared { resume_at };
    } else if state.balls.is_empty() {
        log::info!("Game over on level {}", state.level);
        state.phase = GamePhase::Over { won: false };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::brick::BrickKind;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn state() -> GameState {
        GameState::new(12345, Settings::default())
    }

    #[test]
    fn test_tick_release() {
        let mut state = state();
        tick(&mut state, &TickInput::default());
        assert!(state.balls[0].is_attached());

        let input = TickInput {
            release: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(!state.balls[0].is_attached());
        assert!(state.balls[0].vel.y > 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = state();
        let release = TickInput {
            release: true,
            ..Default::default()
        };
        tick(&mut state, &release);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        // Nothing moves while paused
        let frozen = state.balls[0].pos;
        let ticks = state.time_ticks;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.balls[0].pos, frozen);
        assert_eq!(state.time_ticks, ticks);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_ne!(state.balls[0].pos, frozen);
    }

    #[test]
    fn test_tick_steers_paddle() {
        let mut state = state();
        let input = TickInput {
            steer: Some(Steer::Right),
            rotate: Some(Spin::Clockwise),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.paddle.pos.x > 400.0);
        assert_eq!(state.paddle.rotation, state.settings.paddle.rotation_step);
        // The attached ball follows its anchor
        assert_eq!(state.balls[0].pos.x, state.paddle.anchor().x);
    }

    #[test]
    fn test_level_clear_and_next_level() {
        let mut state = state();
        state.bricks.retain(|b| b.kind == BrickKind::Safety);
        tick(&mut state, &TickInput::default());

        let resume_at = state.time_ticks + state.settings.stage.level_break_ticks;
        assert_eq!(state.phase, GamePhase::Cleared { resume_at });

        for _ in 0..state.settings.stage.level_break_ticks {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.remaining_bricks(), 46);
        assert_eq!(state.level_ticks, 0);
    }

    #[test]
    fn test_losing_last_ball_ends_game() {
        let mut state = state();
        state.balls[0].attached_to = None;
        state.balls[0].pos = Vec2::new(400.0, 700.0);
        tick(&mut state, &TickInput::default());
        assert!(state.balls.is_empty());
        assert_eq!(state.phase, GamePhase::Over { won: false });

        // Frozen until restart
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Over { won: false });

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = state();
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.seed, 12345);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_autopilot_serves_and_chases() {
        let mut state = state();
        let input = TickInput::autopilot(&state);
        assert!(input.release);
        assert_eq!(input.steer, Some(Steer::Stop));

        tick(&mut state, &input);
        state.balls[0].pos = Vec2::new(150.0, 300.0);
        state.balls[0].vel = Vec2::new(0.0, 4.0);
        let input = TickInput::autopilot(&state);
        assert!(!input.release);
        assert_eq!(input.steer, Some(Steer::Left));
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut state = state();
            for _ in 0..1200 {
                let input = TickInput::autopilot(&state);
                tick(&mut state, &input);
            }
            state
        };
        let (a, b) = (run(), run());
        assert_eq!(a.balls, b.balls);
        assert_eq!(a.bricks, b.bricks);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.paddle, b.paddle);
    }

    #[test]
    fn test_autopilot_breaks_bricks() {
        let mut state = state();
        let start = state.remaining_bricks() + state.safety_bricks();
        for _ in 0..(TICKS_PER_SECOND * 60) {
            let input = TickInput::autopilot(&state);
            tick(&mut state, &input);
        }
        assert!(state.level > 1 || state.remaining_bricks() + state.safety_bricks() < start);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_every_ball_moves_once_per_tick(seed in any::<u64>(), ticks in 1usize..400) {
            let mut state = GameState::new(seed, Settings::default());
            for _ in 0..ticks {
                let before: HashMap<_, _> = state.balls.iter().map(|b| (b.id, b.phase)).collect();
                let was_playing = state.phase == GamePhase::Playing;
                let input = TickInput::autopilot(&state);
                tick(&mut state, &input);

                if was_playing {
                    for ball in &state.balls {
                        if let Some(phase) = before.get(&ball.id) {
                            prop_assert_ne!(*phase, ball.phase);
                        }
                    }
                }
            }
        }
    }
}
