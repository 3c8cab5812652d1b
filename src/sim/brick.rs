//! Rectangular bricks, destroyed on contact

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::contact::{Collider, Contact};
use super::geom::Aabb;
use super::state::BodyId;
use crate::renderer::{Shape, colors};

/// What a brick does besides disappearing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Regular,
    /// Bottom-row rebound brick; does not count toward clearing a level
    Safety,
    /// Spawns a ball attached to the paddle
    ExtraBall,
    /// Temporarily lengthens the paddle
    LongPaddle,
}

impl BrickKind {
    /// Specials a random special slot can turn into
    pub const SPECIALS: [BrickKind; 2] = [BrickKind::ExtraBall, BrickKind::LongPaddle];

    pub fn is_special(&self) -> bool {
        matches!(self, BrickKind::ExtraBall | BrickKind::LongPaddle)
    }

    pub fn color(&self) -> [f32; 4] {
        match self {
            BrickKind::Regular => colors::BRICK,
            BrickKind::Safety => colors::SAFETY_BRICK,
            BrickKind::ExtraBall | BrickKind::LongPaddle => colors::SPECIAL_BRICK,
        }
    }
}

/// A brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: BodyId,
    pub kind: BrickKind,
    pub bounds: Aabb,
    /// Set when hit; the registry removes it at the end of the tick
    pub marked: bool,
}

impl Brick {
    pub fn new(id: BodyId, kind: BrickKind, bounds: Aabb) -> Self {
        Self {
            id,
            kind,
            bounds,
            marked: false,
        }
    }

    pub fn draw(&self, out: &mut Vec<Shape>) {
        out.push(Shape::rect(self.bounds.min, self.bounds.size, self.kind.color()));
    }
}

impl Collider for Brick {
    fn probe(&self, incoming: &Aabb) -> Contact {
        let bounds = &self.bounds;
        if !bounds.intersects(incoming) {
            return Contact::None;
        }

        let center = incoming.center();
        let radius = incoming.inscribed_radius();

        // Top or bottom of the ball poking into the brick
        if bounds.contains(Vec2::new(center.x, incoming.top()))
            || bounds.contains(Vec2::new(center.x, incoming.bottom()))
        {
            return Contact::FLAT;
        }

        // Left or right of the ball poking into the brick
        if bounds.contains(Vec2::new(incoming.left(), center.y))
            || bounds.contains(Vec2::new(incoming.right(), center.y))
        {
            return Contact::Horizontal;
        }

        // Corner inside the ball
        for point in bounds.corners() {
            if center.distance(point) < radius {
                return Contact::Corner { point };
            }
        }

        // Boxes overlap but the circle misses the rectangle
        Contact::None
    }
}
