//! Draw-list output consumed by a renderer
//!
//! The simulation never touches a window. Each body appends the primitives it
//! is made of to a [`Vec<Shape>`]; the front end turns those into pixels.

pub mod shapes;

pub use shapes::Shape;

/// Colors for game elements
pub mod colors {
    pub const DEFAULT: [f32; 4] = [0.86, 0.86, 0.86, 1.0];
    pub const BRICK: [f32; 4] = [0.1, 0.78, 0.9, 1.0];
    pub const SAFETY_BRICK: [f32; 4] = [0.85, 0.2, 0.2, 1.0];
    pub const SPECIAL_BRICK: [f32; 4] = [0.95, 0.75, 0.2, 1.0];
    /// Thin outline around every ball
    pub const BALL_OUTLINE: [f32; 4] = DEFAULT;
}
