//! Axis-aligned boxes and the small amount of geometry shared by the probes

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (`min` is the top-left corner, y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            size: Vec2::new(width, height),
        }
    }

    /// Bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            min: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
        }
    }

    /// Smallest box holding every point
    pub fn from_points(points: &[Vec2]) -> Self {
        let (min, max) = points.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), &p| (min.min(p), max.max(p)),
        );
        Self {
            min,
            size: max - min,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Radius of the circle this box was built around
    #[inline]
    pub fn inscribed_radius(&self) -> f32 {
        self.size.x * 0.5
    }

    /// Overlap with positive area (touching edges do not count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        let lo = self.min.max(other.min);
        let hi = self.max().min(other.max());
        lo.x < hi.x && lo.y < hi.y
    }

    /// Whether `p` lies strictly inside the box
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.left() && p.x < self.right() && p.y > self.top() && p.y < self.bottom()
    }

    /// Corners in probe order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.right(), self.top()),
            self.max(),
            Vec2::new(self.left(), self.bottom()),
        ]
    }
}

/// Whether two circles overlap
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Distance from `p` to the infinite line through `a` and `b`
pub fn distance_to_line(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let axis = b - a;
    let offset = p - a;
    let len_sq = axis.length_squared();
    if len_sq == 0.0 {
        return offset.length();
    }
    let along = offset.dot(axis) / len_sq;
    (offset - axis * along).length()
}
