//! Contact probes and contact-frame collision response
//!
//! Every body answers the same question: "does a circle with this bounding box
//! touch you, and if so how?" The answer is a [`Contact`]. Angled responses are
//! resolved by rotating velocities into a frame where the contact normal is
//! vertical, applying a one-line rule on the y component, and rotating back.

use glam::Vec2;

use super::geom::Aabb;
use crate::rotate_degrees;

/// Outcome of probing a body with a ball's bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// No contact
    None,
    /// Hit a vertical face; flip the x velocity
    Horizontal,
    /// Hit a horizontal face; flip the y velocity
    ///
    /// `tilt` is the face's rotation in degrees and `velocity` the face's own
    /// velocity. Both are zero for static, axis-aligned faces.
    Vertical { tilt: f32, velocity: Vec2 },
    /// Hit a rectangle corner at `point`
    Corner { point: Vec2 },
    /// Hit a rounded paddle end centred at `center`
    Side { center: Vec2, velocity: Vec2 },
    /// Hit another ball centred at `center`
    Circle { center: Vec2, velocity: Vec2 },
}

impl Contact {
    /// A static horizontal face
    pub const FLAT: Contact = Contact::Vertical {
        tilt: 0.0,
        velocity: Vec2::ZERO,
    };

    #[inline]
    pub fn is_hit(&self) -> bool {
        !matches!(self, Contact::None)
    }
}

/// Anything a ball can run into
pub trait Collider {
    /// Classify contact with the circle bounded by `incoming`
    ///
    /// `incoming` is square; its half-width is the circle's radius.
    fn probe(&self, incoming: &Aabb) -> Contact;
}

/// Angle (degrees) that turns the line from `body` to `contact` vertical
///
/// A contact level with the body (purely tangential) maps to exactly 90°.
pub fn contact_angle(body: Vec2, contact: Vec2) -> f32 {
    let dy = body.y - contact.y;
    if dy == 0.0 {
        90.0
    } else {
        ((body.x - contact.x) / dy).atan().to_degrees()
    }
}

/// A rotated coordinate system whose y axis is a contact normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactFrame {
    angle: f32,
}

impl ContactFrame {
    pub fn new(angle: f32) -> Self {
        Self { angle }
    }

    /// Frame for the contact between a body centre and a contact point
    pub fn between(body: Vec2, contact: Vec2) -> Self {
        Self::new(contact_angle(body, contact))
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// World velocity into frame coordinates
    #[inline]
    pub fn enter(&self, v: Vec2) -> Vec2 {
        rotate_degrees(v, self.angle)
    }

    /// Frame velocity back to world coordinates
    #[inline]
    pub fn leave(&self, v: Vec2) -> Vec2 {
        rotate_degrees(v, -self.angle)
    }

    /// Mirror `v` across the contact plane
    pub fn reflect(&self, v: Vec2) -> Vec2 {
        let mut local = self.enter(v);
        local.y = -local.y;
        self.leave(local)
    }

    /// Mirror `v` and add `transfer` times the other body's normal velocity
    pub fn reflect_with_transfer(&self, v: Vec2, other: Vec2, transfer: f32) -> Vec2 {
        let mut local = self.enter(v);
        let other = self.enter(other);
        local.y = -local.y + other.y * transfer;
        self.leave(local)
    }

    /// Equal-mass elastic exchange: the normal components trade places
    pub fn exchange(&self, a: Vec2, b: Vec2) -> (Vec2, Vec2) {
        let mut a = self.enter(a);
        let mut b = self.enter(b);
        std::mem::swap(&mut a.y, &mut b.y);
        (self.leave(a), self.leave(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_contact_angle_degenerate_is_ninety() {
        assert_eq!(contact_angle(Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0)), 90.0);
    }

    #[test]
    fn test_contact_angle_makes_line_vertical() {
        let body = Vec2::new(3.0, 1.0);
        let contact = Vec2::new(7.0, 4.0);
        let frame = ContactFrame::between(body, contact);
        let line = frame.enter(body - contact);
        assert!(line.x.abs() < 1e-4);
    }

    #[test]
    fn test_contact_angle_directly_below_is_zero() {
        assert_eq!(contact_angle(Vec2::new(2.0, 0.0), Vec2::new(2.0, 6.0)), 0.0);
    }

    #[test]
    fn test_reflect_flat_frame_flips_y() {
        let frame = ContactFrame::new(0.0);
        assert!(close(frame.reflect(Vec2::new(3.0, 4.0)), Vec2::new(3.0, -4.0)));
    }

    #[test]
    fn test_reflect_tangential_frame_flips_x() {
        let frame = ContactFrame::new(90.0);
        assert!(close(frame.reflect(Vec2::new(3.0, 2.0)), Vec2::new(-3.0, 2.0)));
    }

    #[test]
    fn test_reflect_with_transfer_adds_normal_speed() {
        let frame = ContactFrame::new(0.0);
        let v = frame.reflect_with_transfer(Vec2::new(1.0, 4.0), Vec2::new(0.0, -2.0), 1.1);
        assert!(close(v, Vec2::new(1.0, -6.2)));
    }

    #[test]
    fn test_reflect_with_transfer_ignores_tangential_motion() {
        // Flat paddle sliding sideways contributes nothing along the normal
        let frame = ContactFrame::new(0.0);
        let v = frame.reflect_with_transfer(Vec2::new(2.0, 5.0), Vec2::new(3.0, 0.0), 1.1);
        assert!(close(v, Vec2::new(2.0, -5.0)));
    }

    #[test]
    fn test_exchange_head_on_vertical() {
        let frame = ContactFrame::new(0.0);
        let (a, b) = frame.exchange(Vec2::new(1.0, 5.0), Vec2::new(-2.0, -5.0));
        assert!(close(a, Vec2::new(1.0, -5.0)));
        assert!(close(b, Vec2::new(-2.0, 5.0)));
    }

    #[test]
    fn test_exchange_head_on_horizontal() {
        let frame = ContactFrame::new(90.0);
        let (a, b) = frame.exchange(Vec2::new(4.0, 0.0), Vec2::new(-3.0, 0.0));
        assert!(close(a, Vec2::new(-3.0, 0.0)));
        assert!(close(b, Vec2::new(4.0, 0.0)));
    }

    #[test]
    fn test_probe_result_is_hit() {
        assert!(!Contact::None.is_hit());
        assert!(Contact::Horizontal.is_hit());
        assert!(Contact::FLAT.is_hit());
    }

    proptest! {
        #[test]
        fn prop_reflect_preserves_speed(
            angle in -180.0f32..180.0,
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
        ) {
            let v = Vec2::new(vx, vy);
            let out = ContactFrame::new(angle).reflect(v);
            prop_assert!((out.length() - v.length()).abs() < 1e-3);
        }

        #[test]
        fn prop_exchange_preserves_momentum(
            angle in -180.0f32..180.0,
            ax in -10.0f32..10.0, ay in -10.0f32..10.0,
            bx in -10.0f32..10.0, by in -10.0f32..10.0,
        ) {
            let (a, b) = (Vec2::new(ax, ay), Vec2::new(bx, by));
            let (a2, b2) = ContactFrame::new(angle).exchange(a, b);
            prop_assert!(((a + b) - (a2 + b2)).length() < 1e-3);
        }

        #[test]
        fn prop_leave_undoes_enter(angle in -360.0f32..360.0, vx in -10.0f32..10.0, vy in -10.0f32..10.0) {
            let v = Vec2::new(vx, vy);
            let frame = ContactFrame::new(angle);
            prop_assert!((frame.leave(frame.enter(v)) - v).length() < 1e-3);
        }
    }
}
