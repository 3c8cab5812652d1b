//! The player's paddle: a rotatable bar with rounded ends

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::barrier::Barrier;
use super::contact::{Collider, Contact};
use super::geom::{Aabb, circles_overlap, distance_to_line};
use super::state::BodyId;
use crate::renderer::{Shape, colors};
use crate::rotate_degrees;
use crate::settings::{ArenaSettings, PaddleSettings};

/// Horizontal steering command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Steer {
    Left,
    Right,
    Stop,
}

/// Rotation command (clockwise on screen is positive degrees)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub id: BodyId,
    /// Top-centre point of the level paddle; the bar rotates about `center()`
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Degrees, within ±max rotation
    pub rotation: f32,
    /// X velocity (the paddle never moves vertically)
    pub vel: f32,
    pub accel: f32,
    /// Tick at which an elongated paddle returns to normal width
    pub elongated_until: Option<u64>,
}

impl Paddle {
    pub fn new(id: BodyId, settings: &PaddleSettings, arena: &ArenaSettings) -> Self {
        Self {
            id,
            pos: Vec2::new(arena.width / 2.0, arena.height - settings.floor_offset),
            width: settings.width,
            height: settings.height,
            rotation: 0.0,
            vel: 0.0,
            accel: 0.0,
            elongated_until: None,
        }
    }

    /// Point balls attach to: middle of the top face, following the tilt
    #[inline]
    pub fn anchor(&self) -> Vec2 {
        self.center() + rotate_degrees(Vec2::new(0.0, -self.height / 2.0), self.rotation)
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vel, 0.0)
    }

    /// Midpoint of the long axis
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, self.height / 2.0)
    }

    /// Radius of the rounded ends
    #[inline]
    pub fn end_radius(&self) -> f32 {
        self.height / 2.0
    }

    /// Unit vector along the long axis, left to right
    fn axis(&self) -> Vec2 {
        Vec2::from_angle(self.rotation.to_radians())
    }

    /// Centres of the left and right end circles
    pub fn ends(&self) -> (Vec2, Vec2) {
        let half = self.axis() * (self.width / 2.0);
        let center = self.center();
        (center - half, center + half)
    }

    /// Bounding box of the rectangular face
    pub fn face_bounds(&self) -> Aabb {
        let (left, right) = self.ends();
        let normal = self.axis().perp() * self.end_radius();
        Aabb::from_points(&[left - normal, right - normal, right + normal, left + normal])
    }

    pub fn is_elongated(&self, now: u64) -> bool {
        self.elongated_until.is_some_and(|until| now < until)
    }

    pub fn steer(&mut self, steer: Steer, settings: &PaddleSettings) {
        self.accel = match steer {
            Steer::Left => -settings.acceleration,
            Steer::Right => settings.acceleration,
            Steer::Stop => 0.0,
        };
    }

    /// Turn one step, never past the rotation limit
    pub fn rotate(&mut self, spin: Spin, settings: &PaddleSettings) {
        let step = match spin {
            Spin::Clockwise => settings.rotation_step,
            Spin::CounterClockwise => -settings.rotation_step,
        };
        self.rotation = (self.rotation + step).clamp(-settings.max_rotation, settings.max_rotation);
    }

    /// Start an elongation; ignored while one is already running
    pub fn elongate(&mut self, now: u64, settings: &PaddleSettings) -> bool {
        if self.is_elongated(now) {
            return false;
        }
        self.width = settings.width * settings.elongation_factor;
        self.elongated_until = Some(now + settings.elongation_ticks);
        true
    }

    /// One tick of paddle motion
    pub fn advance(&mut self, now: u64, barrier: &Barrier, settings: &PaddleSettings) {
        if self.elongated_until.is_some() && !self.is_elongated(now) {
            self.width = settings.width;
            self.elongated_until = None;
            log::debug!("Paddle back to normal width");
        }

        let (left, right) = self.ends();
        let radius = self.end_radius();
        let touching = [
            self.face_bounds(),
            Aabb::around_circle(left, radius),
            Aabb::around_circle(right, radius),
        ]
        .iter()
        .any(|bounds| barrier.probe(bounds).is_hit());

        if touching {
            // Back off the wall and stop
            self.pos.x += if self.pos.x < barrier.center_x() { 1.0 } else { -1.0 };
            self.accel = 0.0;
            self.vel = 0.0;
        }

        self.vel += self.accel;
        self.vel -= self.vel * settings.friction;
        self.pos.x += self.vel;
    }

    pub fn draw(&self, out: &mut Vec<Shape>) {
        let center = self.center();
        let (left, right) = self.ends();
        out.push(Shape::Rect {
            origin: center - Vec2::new(self.width, self.height) / 2.0,
            size: Vec2::new(self.width, self.height),
            rotation: self.rotation,
            pivot: center,
            fill: colors::DEFAULT,
        });
        out.push(Shape::circle(left, self.end_radius(), colors::DEFAULT));
        out.push(Shape::circle(right, self.end_radius(), colors::DEFAULT));
    }
}

impl Collider for Paddle {
    fn probe(&self, incoming: &Aabb) -> Contact {
        let center = incoming.center();
        let radius = incoming.inscribed_radius();
        let (left, right) = self.ends();

        // Flat face: between the end circles and within reach of the long axis
        if self.face_bounds().intersects(incoming)
            && center.x > left.x
            && center.x < right.x
            && distance_to_line(center, left, right) < radius + self.end_radius()
        {
            return Contact::Vertical {
                tilt: self.rotation,
                velocity: self.velocity(),
            };
        }

        // Rounded ends
        for end in [left, right] {
            if Aabb::around_circle(end, self.end_radius()).intersects(incoming)
                && circles_overlap(end, self.end_radius(), center, radius)
            {
                return Contact::Side {
                    center: end,
                    velocity: self.velocity(),
                };
            }
        }

        Contact::None
    }
}
