//! 2D primitives emitted by the simulation

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single filled primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Circle around `center`
    Circle {
        center: Vec2,
        radius: f32,
        fill: [f32; 4],
        outline: Option<[f32; 4]>,
    },
    /// Rectangle whose top-left corner is `origin` before rotation
    ///
    /// `rotation` is in degrees and pivots around `pivot` (absolute coordinates).
    Rect {
        origin: Vec2,
        size: Vec2,
        rotation: f32,
        pivot: Vec2,
        fill: [f32; 4],
    },
}

impl Shape {
    /// Axis-aligned, unrotated rectangle
    pub fn rect(origin: Vec2, size: Vec2, fill: [f32; 4]) -> Self {
        Shape::Rect {
            origin,
            size,
            rotation: 0.0,
            pivot: origin,
            fill,
        }
    }

    pub fn circle(center: Vec2, radius: f32, fill: [f32; 4]) -> Self {
        Shape::Circle {
            center,
            radius,
            fill,
            outline: None,
        }
    }
}
