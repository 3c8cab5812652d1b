//! Brick Breaker - collision and motion engine for a 2D ball-and-paddle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, contact probes, tick loop, stages)
//! - `renderer`: Draw-list primitives handed to whatever renders the game
//! - `settings`: Data-driven tuning loaded from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
///
/// Distances are in pixels, speeds in pixels per tick.
pub mod consts {
    /// Simulation rate the tick counters are expressed in
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;
    /// Height of the score banner above the play field
    pub const BANNER_HEIGHT: f32 = 40.0;

    /// Barrier ("n" shaped wall) thickness and gap to the window edge
    pub const BARRIER_WIDTH: f32 = 10.0;
    pub const BARRIER_BUFFER: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.0;
    pub const BALL_MAX_SPEED: f32 = 8.0;
    /// Fraction of max speed a released ball leaves the paddle with
    pub const BALL_RELEASE_FACTOR: f32 = 0.75;
    /// Max sideways speed added on release
    pub const BALL_RELEASE_SPREAD: f32 = 0.25;
    /// Multiplier applied every tick a velocity component is over the cap
    pub const BALL_DAMPING: f32 = 0.99;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    /// Distance from the window bottom to the paddle's top edge
    pub const PADDLE_FLOOR_OFFSET: f32 = 40.0;
    pub const PADDLE_ACCELERATION: f32 = 0.9;
    /// Fraction of velocity lost per tick
    pub const PADDLE_FRICTION: f32 = 1.0 / 13.0;
    /// Rotation limit and step, degrees
    pub const PADDLE_MAX_ROTATION: f32 = 30.0;
    pub const PADDLE_ROTATION_STEP: f32 = 3.0;
    /// Share of the paddle's normal velocity handed to a rebounding ball
    pub const PADDLE_TRANSFER: f32 = 1.1;
    pub const PADDLE_ELONGATION_FACTOR: f32 = 1.5;
    pub const PADDLE_ELONGATION_TICKS: u64 = 10 * TICKS_PER_SECOND as u64;

    /// Stage layout defaults
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_SEPARATION: f32 = 4.0;
    pub const BRICKS_PER_LINE: usize = 12;
    pub const BRICK_ROWS: usize = 5;
    /// Empty rows above the first level's bricks
    pub const EMPTY_ROWS: usize = 3;
    pub const SPECIAL_BRICKS: usize = 6;
    /// Safety bricks on level 1, one fewer each level after
    pub const SAFETY_BRICKS: usize = 10;
    /// Pause between a cleared level and the next one
    pub const LEVEL_BREAK_TICKS: u64 = 3 * TICKS_PER_SECOND as u64;
}

/// Rotate `v` by `degrees` (positive turns +x toward +y)
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}
