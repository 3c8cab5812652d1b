//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (registry order)
//! - No rendering or platform dependencies beyond emitting draw lists

pub mod ball;
pub mod barrier;
pub mod brick;
pub mod contact;
pub mod geom;
pub mod paddle;
pub mod stage;
pub mod state;
pub mod tick;

pub use ball::{Ball, Hit, Step, Surroundings};
pub use barrier::Barrier;
pub use brick::{Brick, BrickKind};
pub use contact::{Collider, Contact, ContactFrame, contact_angle};
pub use geom::Aabb;
pub use paddle::{Paddle, Spin, Steer};
pub use stage::{LevelLayout, StageBuilder, StageError};
pub use state::{Body, BodyId, GamePhase, GameState, IdGen, SweepReport};
pub use tick::{TickInput, tick};
