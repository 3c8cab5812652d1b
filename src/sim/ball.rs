//! Balls and the per-tick ball motion controller
//!
//! Each tick a free ball checks, in this order, whether it left the field,
//! then the barrier, the paddle, every brick and every other ball. The first
//! contact found is resolved and the rest are skipped, so a ball resolves at
//! most one collision per tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::barrier::Barrier;
use super::brick::Brick;
use super::contact::{Collider, Contact, ContactFrame};
use super::geom::Aabb;
use super::paddle::Paddle;
use super::state::BodyId;
use crate::renderer::{Shape, colors};
use crate::settings::{BallSettings, Settings};

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Body whose anchor this ball rides on until released
    pub attached_to: Option<BodyId>,
    /// Flipped once per tick; balls on the other phase already moved this tick
    pub phase: bool,
    /// Set when the ball leaves the field
    pub marked: bool,
}

/// What a ball collided with during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Barrier,
    Paddle,
    Brick(BodyId),
    Ball(BodyId),
}

/// Result of advancing one ball by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Riding an anchor, no collision checks
    Attached,
    /// Dropped out of the bottom of the field and marked for removal
    Lost,
    /// Moved freely, possibly after resolving one contact
    Moved(Option<Hit>),
}

/// Everything a ball may collide with, borrowed from the registry for one step
pub struct Surroundings<'a> {
    pub barrier: &'a Barrier,
    pub paddle: &'a Paddle,
    pub bricks: &'a mut [Brick],
    /// Balls before this one in registry order
    pub before: &'a mut [Ball],
    /// Balls after this one in registry order
    pub after: &'a mut [Ball],
    /// Current anchor point when the ball is attached
    pub anchor: Option<Vec2>,
    /// Y coordinate past which a ball is out of play
    pub floor: f32,
}

impl Ball {
    /// A ball already in flight
    pub fn free(id: BodyId, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            attached_to: None,
            phase: false,
            marked: false,
        }
    }

    /// A motionless ball riding `anchor`
    pub fn attached(id: BodyId, anchor: BodyId, radius: f32) -> Self {
        Self {
            attached_to: Some(anchor),
            ..Self::free(id, Vec2::ZERO, Vec2::ZERO, radius)
        }
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached_to.is_some()
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::around_circle(self.pos, self.radius)
    }

    /// Put the ball on top of `anchor`
    pub fn sit_on(&mut self, anchor: Vec2) {
        self.pos = Vec2::new(anchor.x, anchor.y - self.radius);
    }

    /// Release an attached ball
    ///
    /// The ball is sent down into its anchor and stepped back by one tick of
    /// that motion, so the next tick bounces it off the paddle at the paddle's
    /// current angle. A small random sideways speed breaks up repeating paths.
    pub fn detach(&mut self, settings: &BallSettings, rng: &mut impl Rng) {
        if !self.is_attached() {
            return;
        }
        self.vel = Vec2::new(0.0, settings.max_speed * settings.release_factor);
        self.pos -= self.vel;
        let spread = settings.release_spread;
        self.vel.x = rng.random_range(-spread..=spread);
        self.attached_to = None;
    }

    pub fn draw(&self, out: &mut Vec<Shape>) {
        out.push(Shape::Circle {
            center: self.pos,
            radius: self.radius,
            fill: colors::DEFAULT,
            outline: Some(colors::BALL_OUTLINE),
        });
    }

    /// Advance by one tick
    pub fn advance(&mut self, world: &mut Surroundings<'_>, settings: &Settings) -> Step {
        let mut hit = None;

        if !self.is_attached() {
            let bounds = self.bounds();
            if bounds.top() > world.floor {
                self.marked = true;
                return Step::Lost;
            }

            hit = self.resolve_contact(&bounds, world, settings.paddle.transfer);
            if let Some(hit) = hit {
                log::trace!("Ball {:?} hit {:?}", self.id, hit);
                // Half a step out of the overlap so the contact doesn't retrigger
                self.pos += self.vel * 0.5;
            }
        }

        self.phase = !self.phase;

        if self.is_attached() {
            match world.anchor {
                Some(anchor) => self.sit_on(anchor),
                None => log::warn!("Ball {:?} is attached to a missing body", self.id),
            }
        }

        let max = settings.ball.max_speed;
        if self.vel.x.abs() > max || self.vel.y.abs() > max {
            self.vel *= settings.ball.damping;
        }

        self.pos += self.vel;

        if self.is_attached() {
            Step::Attached
        } else {
            Step::Moved(hit)
        }
    }

    /// Barrier, paddle, bricks, balls; stops at the first contact
    fn resolve_contact(&mut self, bounds: &Aabb, world: &mut Surroundings<'_>, transfer: f32) -> Option<Hit> {
        if self.bounce_off_barrier(bounds, world.barrier) {
            return Some(Hit::Barrier);
        }
        if self.bounce_off_paddle(bounds, world.paddle, transfer) {
            return Some(Hit::Paddle);
        }
        if let Some(id) = self.bounce_off_bricks(bounds, world.bricks) {
            return Some(Hit::Brick(id));
        }
        self.collide_with_balls(bounds, world.before, world.after)
            .map(Hit::Ball)
    }

    /// Flip a velocity component for axis-aligned contacts
    fn bounce_simple(&mut self, contact: Contact) -> bool {
        match contact {
            Contact::Horizontal => {
                self.vel.x = -self.vel.x;
                true
            }
            Contact::Vertical { .. } => {
                self.vel.y = -self.vel.y;
                true
            }
            _ => false,
        }
    }

    fn bounce_off_barrier(&mut self, bounds: &Aabb, barrier: &Barrier) -> bool {
        self.bounce_simple(barrier.probe(bounds))
    }

    fn bounce_off_paddle(&mut self, bounds: &Aabb, paddle: &Paddle, transfer: f32) -> bool {
        let (frame, paddle_vel) = match paddle.probe(bounds) {
            // Face: the contact normal is the paddle's own normal
            Contact::Vertical { tilt, velocity } => (ContactFrame::new(-tilt), velocity),
            // Rounded end: normal runs from the end circle's centre to ours
            Contact::Side { center, velocity } => (ContactFrame::between(self.pos, center), velocity),
            _ => return false,
        };
        self.vel = frame.reflect_with_transfer(self.vel, paddle_vel, transfer);
        true
    }

    /// Scan bricks in registry order; only the first brick touched counts
    ///
    /// Bricks marked earlier this tick are still solid until the sweep, so a
    /// second ball reaching the same brick bounces too.
    fn bounce_off_bricks(&mut self, bounds: &Aabb, bricks: &mut [Brick]) -> Option<BodyId> {
        for brick in bricks.iter_mut() {
            let contact = brick.probe(bounds);
            if !contact.is_hit() {
                continue;
            }
            brick.marked = true;

            if self.bounce_simple(contact) {
                return Some(brick.id);
            }
            if let Contact::Corner { point } = contact {
                self.vel = ContactFrame::between(self.pos, point).reflect(self.vel);
                return Some(brick.id);
            }
        }
        None
    }

    /// Elastic exchange with the first touching ball still on our phase
    fn collide_with_balls(&mut self, bounds: &Aabb, before: &mut [Ball], after: &mut [Ball]) -> Option<BodyId> {
        for other in before.iter_mut().chain(after.iter_mut()) {
            // A ball on the other phase already resolved its contacts this tick
            if other.phase != self.phase || other.marked {
                continue;
            }
            if let Contact::Circle { center, velocity } = other.probe(bounds) {
                let frame = ContactFrame::between(self.pos, center);
                let (mine, theirs) = frame.exchange(self.vel, velocity);
                self.vel = mine;
                other.vel = theirs;
                return Some(other.id);
            }
        }
        None
    }
}

impl Collider for Ball {
    fn probe(&self, incoming: &Aabb) -> Contact {
        if self.is_attached() {
            return Contact::None;
        }

        let distance = self.pos.distance(incoming.center());
        // The lower bound rejects a coincident pair (distance rounding to ~0)
        if distance < incoming.inscribed_radius() + self.radius && distance > self.radius / 4.0 {
            Contact::Circle {
                center: self.pos,
                velocity: self.vel,
            }
        } else {
            Contact::None
        }
    }
}
