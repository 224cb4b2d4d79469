//! Bouncing Sphere - a ball bouncing in an arena of rounded boxes
//!
//! Core modules:
//! - `math`: Named vector/quaternion operations and coordinate systems
//! - `sim`: Geometry, intersections, collision response and the frame loop
//! - `renderer`: The drawing contract primitives render through
//! - `camera`: Orbital camera state
//! - `settings`: Runtime configuration

pub mod camera;
pub mod math;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Simulation constants
pub mod consts {
    /// Tolerance for parallel/degenerate detection and boundary inclusion
    pub const EPSILON: f32 = 1.0e-6;

    /// Target frame rate
    pub const FPS: u32 = 60;
    /// Largest frame time fed to the simulation (half the target rate)
    pub const MAX_FRAME_TIME: f32 = 2.0 / FPS as f32;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 10.0;
    /// Ball mass used for the angular impulse
    pub const MASS: f32 = 2.0;
}

/// True when `val` is within `EPSILON` of zero
#[inline]
pub fn approx_zero(val: f32) -> bool {
    val.abs() < consts::EPSILON
}
