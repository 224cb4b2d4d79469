//! Simulation module
//!
//! Geometry, intersection and collision response for the bouncing ball:
//! - Single-threaded and frame driven
//! - The obstacle list is static for a session
//! - No rendering or platform dependencies beyond the `Painter` contract

pub mod collision;
pub mod intersect;
pub mod primitives;
pub mod referential;
pub mod state;
pub mod tick;

pub use collision::{Contact, bounce, dynamic_collide, move_ball, static_collide};
pub use intersect::{Hit, intersect, intersect_box_rounded};
pub use primitives::{BoxRounded, Caps, Cylinder, Disk, Plane, Primitive, Quad, Segment, Sphere};
pub use referential::Referential;
pub use state::{Ball, Obstacle, Scene, arena_walls};
pub use tick::{GamePhase, GameState, TickInput, clamp_frame_time, tick};
