//! Ball, obstacles and scene setup
//!
//! The obstacle list is built once per session and never mutated; the ball
//! is mutated in place by every simulation step.

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::primitives::{BoxRounded, Sphere};
use super::referential::Referential;
use crate::consts::MASS;
use crate::math::{axis_angle, normalize};
use crate::renderer::Painter;
use crate::renderer::color::{self, Color};

/// Distance from the arena center to each wall's center
pub const WALL_DISTANCE: f32 = 10.5;
/// Half-thickness of each arena wall
pub const WALL_HALF_THICKNESS: f32 = 0.5;
/// Half-size of the arena walls along their two long axes
pub const WALL_HALF_SIZE: f32 = 10.0;

/// The bouncing sphere
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub r: f32,
    pub pos: Vec3,
    /// Velocity
    pub motion: Vec3,
    /// Accumulated angular impulse (axis scaled by magnitude)
    pub rotation_axis: Vec3,
    pub rotation_angle: f32,
    /// Spin applied once per frame
    pub rotation_quaternion: Quat,
    /// Cumulative orientation, for rendering
    pub rotation: Quat,
    pub color: Color,
}

impl Ball {
    pub fn new(pos: Vec3, r: f32, motion: Vec3, color: Color) -> Self {
        Self {
            r,
            pos,
            motion,
            rotation_axis: Vec3::ZERO,
            rotation_angle: 0.0,
            rotation_quaternion: Quat::IDENTITY,
            rotation: Quat::IDENTITY,
            color,
        }
    }

    /// Random radius in [0.75, 1.25) launched mostly downward at 5-8 units/s
    pub fn random(rng: &mut impl Rng, pos: Vec3, color: Color) -> Self {
        let r = 0.75 + rng.random::<f32>() / 2.0;
        let direction = Vec3::new(
            rng.random_range(-1.0..1.0),
            0.9 * rng.random::<f32>() - 1.0,
            rng.random_range(-1.0..1.0),
        );
        let speed = 5.0 + 3.0 * rng.random::<f32>();
        Self::new(pos, r, normalize(direction) * speed, color)
    }

    /// Solid sphere: 2/5 m r²
    pub fn moment_of_inertia(&self) -> f32 {
        2.0 * MASS * self.r * self.r / 5.0
    }

    /// Compose the current spin onto the orientation (once per frame)
    pub fn apply_spin(&mut self) {
        self.rotation = (self.rotation * self.rotation_quaternion).normalize();
    }

    pub fn draw(&self, painter: &mut impl Painter) {
        Sphere::new(self.pos, self.r).draw(self.rotation, self.color, painter);
    }
}

/// An authored static obstacle: a rounded box with a colour
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub frame: Referential,
    pub ext: Vec3,
    pub r: f32,
    pub color: Color,
}

impl Obstacle {
    pub fn new(frame: Referential, ext: Vec3, r: f32, color: Color) -> Self {
        Self { frame, ext, r, color }
    }

    /// Randomly oriented and sized orange obstacle centered on `pos`
    pub fn random(rng: &mut impl Rng, pos: Vec3) -> Self {
        let axis = Vec3::new(rng.random(), rng.random(), rng.random());
        let angle: f32 = rng.random();
        let ext = Vec3::new(
            rng.random::<f32>() * 1.5,
            rng.random::<f32>(),
            rng.random::<f32>() * 1.5,
        );
        let r = 0.25 + rng.random::<f32>() / 4.0;
        Self::new(Referential::local(pos, axis_angle(axis, angle)), ext, r, color::ORANGE)
    }

    /// Axis-aligned sharp slab, as used for the arena walls
    pub fn wall(center: Vec3, ext: Vec3, color: Color) -> Self {
        Self::new(Referential::local(center, Quat::IDENTITY), ext, 0.0, color)
    }

    pub fn as_box(&self) -> BoxRounded {
        BoxRounded::new(self.frame, self.ext, self.r)
    }

    /// The box grown by `extra`, e.g. a moving sphere's radius
    pub fn with_radius(&self, extra: f32) -> BoxRounded {
        BoxRounded::new(self.frame, self.ext, self.r + extra)
    }

    pub fn draw(&self, painter: &mut impl Painter) {
        if !self.color.is_visible() {
            return;
        }
        self.as_box().draw(self.color, painter);
    }
}

/// The six walls enclosing the arena; the ceiling is invisible
pub fn arena_walls() -> Vec<Obstacle> {
    let d = WALL_DISTANCE;
    let t = WALL_HALF_THICKNESS;
    let s = WALL_HALF_SIZE;
    vec![
        Obstacle::wall(Vec3::new(0.0, -d, 0.0), Vec3::new(s, t, s), color::TRANSPARENT_PINK),
        Obstacle::wall(Vec3::new(0.0, d, 0.0), Vec3::new(s, t, s), color::BLANK),
        Obstacle::wall(Vec3::new(-d, 0.0, 0.0), Vec3::new(t, s, s), color::TRANSPARENT_PINK),
        Obstacle::wall(Vec3::new(d, 0.0, 0.0), Vec3::new(t, s, s), color::TRANSPARENT_PINK),
        Obstacle::wall(Vec3::new(0.0, 0.0, -d), Vec3::new(s, s, t), color::TRANSPARENT_PINK),
        Obstacle::wall(Vec3::new(0.0, 0.0, d), Vec3::new(s, s, t), color::TRANSPARENT_PINK),
    ]
}

/// Ball plus obstacle list for one session
#[derive(Debug, Clone)]
pub struct Scene {
    pub ball: Ball,
    pub obstacles: Vec<Obstacle>,
}

impl Scene {
    /// A 3x3 grid of random obstacles at y = -5 inside the walled arena
    pub fn generate(seed: u64, ball_start: Vec3) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::random(&mut rng, ball_start, color::BLUE);

        let mut obstacles = Vec::with_capacity(9 + 6);
        for x in [-5.0, 0.0, 5.0] {
            for z in [-5.0, 0.0, 5.0] {
                obstacles.push(Obstacle::random(&mut rng, Vec3::new(x, -5.0, z)));
            }
        }
        obstacles.extend(arena_walls());

        log::info!(
            "Scene {}: ball r={:.2} motion={:?}, {} obstacles",
            seed,
            ball.r,
            ball.motion,
            obstacles.len()
        );
        Self { ball, obstacles }
    }

    pub fn draw(&self, painter: &mut impl Painter) {
        self.ball.draw(painter);
        for obstacle in &self.obstacles {
            obstacle.draw(painter);
        }
    }
}
