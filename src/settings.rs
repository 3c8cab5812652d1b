//! Game tuning and configuration
//!
//! Every field has a default from [`crate::consts`]; a JSON file only needs to
//! name the values it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Window and barrier geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: f32,
    pub height: f32,
    pub banner_height: f32,
    pub barrier_width: f32,
    pub barrier_buffer: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            banner_height: BANNER_HEIGHT,
            barrier_width: BARRIER_WIDTH,
            barrier_buffer: BARRIER_BUFFER,
        }
    }
}

/// Ball tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    /// Per-component speed above which the ball is damped
    pub max_speed: f32,
    pub release_factor: f32,
    pub release_spread: f32,
    pub damping: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            max_speed: BALL_MAX_SPEED,
            release_factor: BALL_RELEASE_FACTOR,
            release_spread: BALL_RELEASE_SPREAD,
            damping: BALL_DAMPING,
        }
    }
}

/// Paddle tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleSettings {
    pub width: f32,
    pub height: f32,
    pub floor_offset: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub max_rotation: f32,
    pub rotation_step: f32,
    pub transfer: f32,
    pub elongation_factor: f32,
    pub elongation_ticks: u64,
}

impl Default for PaddleSettings {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            floor_offset: PADDLE_FLOOR_OFFSET,
            acceleration: PADDLE_ACCELERATION,
            friction: PADDLE_FRICTION,
            max_rotation: PADDLE_MAX_ROTATION,
            rotation_step: PADDLE_ROTATION_STEP,
            transfer: PADDLE_TRANSFER,
            elongation_factor: PADDLE_ELONGATION_FACTOR,
            elongation_ticks: PADDLE_ELONGATION_TICKS,
        }
    }
}

/// Stage layout and level progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSettings {
    pub brick_height: f32,
    pub brick_separation: f32,
    pub bricks_per_line: usize,
    pub brick_rows: usize,
    pub empty_rows: usize,
    pub special_bricks: usize,
    pub safety_bricks: usize,
    pub level_break_ticks: u64,
    /// Directory holding `<level>.txt` layouts for levels after the first
    pub levels_dir: Option<PathBuf>,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            brick_height: BRICK_HEIGHT,
            brick_separation: BRICK_SEPARATION,
            bricks_per_line: BRICKS_PER_LINE,
            brick_rows: BRICK_ROWS,
            empty_rows: EMPTY_ROWS,
            special_bricks: SPECIAL_BRICKS,
            safety_bricks: SAFETY_BRICKS,
            level_break_ticks: LEVEL_BREAK_TICKS,
            levels_dir: None,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: ArenaSettings,
    pub ball: BallSettings,
    pub paddle: PaddleSettings,
    pub stage: StageSettings,
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
