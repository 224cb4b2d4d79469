//! Drawing contract
//!
//! The simulation never emits vertices itself. Every primitive renders by
//! calling into a `Painter`, which a real backend turns into triangles and
//! lines. `DrawList` records the calls so frames can be inspected headless.

pub mod color;

pub use color::Color;

use glam::{Quat, Vec2, Vec3};

use crate::sim::primitives::Caps;

/// Filled surface or wireframe outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Solid,
    Wires,
}

/// The external drawing collaborator
pub trait Painter {
    /// Rectangle in the rotated x-z plane, `size` being its half-extents
    fn quad(&mut self, rotation: Quat, center: Vec3, size: Vec2, mode: DrawMode, color: Color);

    /// Disk in the rotated x-z plane
    fn disk(&mut self, rotation: Quat, center: Vec3, radius: f32, mode: DrawMode, color: Color);

    fn sphere(&mut self, rotation: Quat, center: Vec3, radius: f32, mode: DrawMode, color: Color);

    #[allow(clippy::too_many_arguments)]
    fn cylinder(
        &mut self,
        rotation: Quat,
        start: Vec3,
        end: Vec3,
        radius: f32,
        caps: Caps,
        mode: DrawMode,
        color: Color,
    );

    fn line(&mut self, start: Vec3, end: Vec3, color: Color);
}

/// A single recorded painter call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Quad {
        rotation: Quat,
        center: Vec3,
        size: Vec2,
        mode: DrawMode,
        color: Color,
    },
    Disk {
        rotation: Quat,
        center: Vec3,
        radius: f32,
        mode: DrawMode,
        color: Color,
    },
    Sphere {
        rotation: Quat,
        center: Vec3,
        radius: f32,
        mode: DrawMode,
        color: Color,
    },
    Cylinder {
        rotation: Quat,
        start: Vec3,
        end: Vec3,
        radius: f32,
        caps: Caps,
        mode: DrawMode,
        color: Color,
    },
    Line {
        start: Vec3,
        end: Vec3,
        color: Color,
    },
}

/// Painter that stores every call in order
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of solid (non-wireframe, non-line) calls
    pub fn solid_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| match c {
                DrawCommand::Quad { mode, .. }
                | DrawCommand::Disk { mode, .. }
                | DrawCommand::Sphere { mode, .. }
                | DrawCommand::Cylinder { mode, .. } => *mode == DrawMode::Solid,
                DrawCommand::Line { .. } => false,
            })
            .count()
    }
}

impl Painter for DrawList {
    fn quad(&mut self, rotation: Quat, center: Vec3, size: Vec2, mode: DrawMode, color: Color) {
        self.commands.push(DrawCommand::Quad {
            rotation,
            center,
            size,
            mode,
            color,
        });
    }

    fn disk(&mut self, rotation: Quat, center: Vec3, radius: f32, mode: DrawMode, color: Color) {
        self.commands.push(DrawCommand::Disk {
            rotation,
            center,
            radius,
            mode,
            color,
        });
    }

    fn sphere(&mut self, rotation: Quat, center: Vec3, radius: f32, mode: DrawMode, color: Color) {
        self.commands.push(DrawCommand::Sphere {
            rotation,
            center,
            radius,
            mode,
            color,
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn cylinder(
        &mut self,
        rotation: Quat,
        start: Vec3,
        end: Vec3,
        radius: f32,
        caps: Caps,
        mode: DrawMode,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Cylinder {
            rotation,
            start,
            end,
            radius,
            caps,
            mode,
            color,
        });
    }

    fn line(&mut self, start: Vec3, end: Vec3, color: Color) {
        self.commands.push(DrawCommand::Line { start, end, color });
    }
}
