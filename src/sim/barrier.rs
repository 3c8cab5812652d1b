//! The "n" shaped wall that closes the play field on the left, top and right

use serde::{Deserialize, Serialize};

use super::contact::{Collider, Contact};
use super::geom::Aabb;
use super::state::BodyId;
use crate::renderer::{Shape, colors};
use crate::settings::ArenaSettings;

/// Three immovable wall segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub id: BodyId,
    pub left: Aabb,
    pub top: Aabb,
    pub right: Aabb,
}

impl Barrier {
    pub fn new(id: BodyId, arena: &ArenaSettings) -> Self {
        let wall = arena.barrier_width;
        let buffer = arena.barrier_buffer;
        let top_edge = buffer + arena.banner_height;
        let side_height = arena.height - buffer - arena.banner_height;

        Self {
            id,
            left: Aabb::new(buffer, top_edge, wall, side_height),
            top: Aabb::new(buffer, top_edge, arena.width - 2.0 * buffer - wall, wall),
            right: Aabb::new(arena.width - buffer - wall, top_edge, wall, side_height),
        }
    }

    pub fn draw(&self, out: &mut Vec<Shape>) {
        for wall in [&self.left, &self.top, &self.right] {
            out.push(Shape::rect(wall.min, wall.size, colors::DEFAULT));
        }
    }

    /// Inner edges of the field: (left wall's right edge, top wall's bottom edge, right wall's left edge)
    pub fn inner_edges(&self) -> (f32, f32, f32) {
        (self.left.right(), self.top.bottom(), self.right.left())
    }

    /// Horizontal centre of the field
    pub fn center_x(&self) -> f32 {
        (self.left.left() + self.right.right()) * 0.5
    }
}

impl Collider for Barrier {
    fn probe(&self, incoming: &Aabb) -> Contact {
        if self.left.intersects(incoming) || self.right.intersects(incoming) {
            Contact::Horizontal
        } else if self.top.intersects(incoming) {
            Contact::FLAT
        } else {
            Contact::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn barrier() -> Barrier {
        Barrier::new(BodyId(1), &ArenaSettings::default())
    }

    #[test]
    fn test_geometry_forms_an_n() {
        let b = barrier();
        let (left, top, right) = b.inner_edges();
        assert_eq!(left, 15.0);
        assert_eq!(top, 55.0);
        assert_eq!(right, 785.0);
        // Side walls run to the bottom of the window
        assert_eq!(b.left.bottom(), 600.0);
        assert_eq!(b.top.left(), b.left.left());
    }

    #[test]
    fn test_side_walls_are_horizontal_contacts() {
        let b = barrier();
        let ball = Aabb::around_circle(Vec2::new(18.0, 300.0), 7.0);
        assert_eq!(b.probe(&ball), Contact::Horizontal);
        let ball = Aabb::around_circle(Vec2::new(782.0, 300.0), 7.0);
        assert_eq!(b.probe(&ball), Contact::Horizontal);
    }

    #[test]
    fn test_top_wall_is_vertical_contact() {
        let b = barrier();
        let ball = Aabb::around_circle(Vec2::new(400.0, 58.0), 7.0);
        assert_eq!(b.probe(&ball), Contact::FLAT);
    }

    #[test]
    fn test_open_field_is_no_contact() {
        let b = barrier();
        let ball = Aabb::around_circle(Vec2::new(400.0, 300.0), 7.0);
        assert_eq!(b.probe(&ball), Contact::None);
    }
}
