//! Analytic geometric primitives
//!
//! Flat primitives (quads, disks) live in the i-k plane of their referential
//! with `j` as the normal. A rounded box decomposes into 6 offset face quads
//! and 12 capsule edges.

use glam::{Quat, Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

use super::referential::Referential;
use crate::approx_zero;
use crate::consts::EPSILON;
use crate::math::{axis_angle, dot, normalize, rotation_between};
use crate::renderer::color::{self, Color};
use crate::renderer::{DrawMode, Painter};

/// End-cap style of a finite cylinder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Caps {
    /// Open tube
    None,
    /// Flat disks at both ends
    #[default]
    Flat,
    /// Hemispheres at both ends (a capsule)
    Rounded,
}

/// Finite straight path from `pt1` to `pt2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub pt1: Vec3,
    pub pt2: Vec3,
}

impl Segment {
    pub const fn new(pt1: Vec3, pt2: Vec3) -> Self {
        Self { pt1, pt2 }
    }

    pub fn as_vector(&self) -> Vec3 {
        self.pt2 - self.pt1
    }

    /// Point at parameter `t` (0 at `pt1`, 1 at `pt2`)
    pub fn at(&self, t: f32) -> Vec3 {
        self.pt1 + self.as_vector() * t
    }

    pub fn draw(&self, painter: &mut impl Painter) {
        painter.line(self.pt1, self.pt2, color::BLACK);
        painter.sphere(Quat::IDENTITY, self.pt1, 0.05, DrawMode::Solid, color::DARKGRAY);
        painter.sphere(Quat::IDENTITY, self.pt2, 0.03, DrawMode::Solid, color::BLACK);
    }
}

/// Implicit plane `dot(p, n) = d`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub n: Vec3,
    pub d: f32,
}

impl Plane {
    pub fn new(n: Vec3, d: f32) -> Self {
        Self { n, d }
    }

    /// Plane through `point` with unit normal `n`
    pub fn through(point: Vec3, n: Vec3) -> Self {
        Self { n, d: dot(point, n) }
    }

    pub fn signed_distance(&self, p: Vec3) -> f32 {
        dot(p, self.n) - self.d
    }

    /// Draws a 2x2 patch centered on `center`, which must lie on the plane
    pub fn draw(&self, center: Vec3, color: Color, painter: &mut impl Painter) {
        if !approx_zero(self.signed_distance(center)) {
            return;
        }
        let q = rotation_between(Vec3::Y, self.n);
        let size = Vec2::new(2.0, 2.0);
        painter.quad(q, center, size, DrawMode::Solid, color);
        painter.quad(q, center, size, DrawMode::Wires, color::DARKGRAY);
    }
}

/// Rectangle centered on `frame.origin` in its i-k plane, half-extents `ext`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub frame: Referential,
    pub ext: Vec2,
}

impl Quad {
    pub fn new(frame: Referential, ext: Vec2) -> Self {
        Self { frame, ext }
    }

    pub fn as_plane(&self) -> Plane {
        Plane::through(self.frame.origin, self.frame.j)
    }

    pub fn draw(&self, color: Color, painter: &mut impl Painter) {
        if self.ext.x < -EPSILON || self.ext.y < -EPSILON {
            return;
        }
        let q = self.frame.orientation();
        painter.quad(q, self.frame.origin, self.ext, DrawMode::Solid, color);
        painter.quad(q, self.frame.origin, self.ext, DrawMode::Wires, color::DARKGRAY);
    }
}

/// Disk centered on `frame.origin` in its i-k plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    pub frame: Referential,
    pub r: f32,
}

impl Disk {
    pub fn new(frame: Referential, r: f32) -> Self {
        Self { frame, r }
    }

    pub fn as_plane(&self) -> Plane {
        Plane::through(self.frame.origin, self.frame.j)
    }

    pub fn draw(&self, color: Color, painter: &mut impl Painter) {
        if self.r < 0.0 {
            return;
        }
        let q = self.frame.orientation();
        painter.disk(q, self.frame.origin, self.r, DrawMode::Solid, color);
        painter.disk(q, self.frame.origin, self.r, DrawMode::Wires, color::DARKGRAY);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub r: f32,
}

impl Sphere {
    pub fn new(center: Vec3, r: f32) -> Self {
        Self { center, r }
    }

    pub fn draw(&self, rotation: Quat, color: Color, painter: &mut impl Painter) {
        if self.r < 0.0 {
            return;
        }
        painter.sphere(rotation, self.center, self.r, DrawMode::Solid, color);
        painter.sphere(rotation, self.center, self.r, DrawMode::Wires, color::DARKGRAY);
    }
}

/// Right circular cylinder between the end-cap centers `pt1` and `pt2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub pt1: Vec3,
    pub pt2: Vec3,
    pub r: f32,
}

impl Cylinder {
    pub fn new(pt1: Vec3, pt2: Vec3, r: f32) -> Self {
        Self { pt1, pt2, r }
    }

    pub fn axis(&self) -> Vec3 {
        self.pt2 - self.pt1
    }

    pub fn axis_normalized(&self) -> Vec3 {
        normalize(self.axis())
    }

    /// Flat cap at `pt1`, normal along the axis
    pub fn bottom(&self) -> Disk {
        let rotation = rotation_between(Vec3::Y, self.axis_normalized());
        let frame = Referential::local(self.pt1, rotation);
        Disk::new(frame, self.r)
    }

    /// Flat cap at `pt2`, normal against the axis
    pub fn top(&self) -> Disk {
        let rotation = rotation_between(Vec3::Y, -self.axis_normalized());
        let frame = Referential::local(self.pt2, rotation);
        Disk::new(frame, self.r)
    }

    pub fn bottom_sphere(&self) -> Sphere {
        Sphere::new(self.pt1, self.r)
    }

    pub fn top_sphere(&self) -> Sphere {
        Sphere::new(self.pt2, self.r)
    }

    /// Rotation of `angle` about the cylinder's own axis
    pub fn rotation_about_axis(&self, angle: f32) -> Quat {
        axis_angle(self.axis(), angle)
    }

    pub fn draw(&self, rotation: Quat, caps: Caps, color: Color, painter: &mut impl Painter) {
        if self.r < 0.0 {
            return;
        }
        let (pt1, pt2, r) = (self.pt1, self.pt2, self.r);
        painter.cylinder(rotation, pt1, pt2, r, caps, DrawMode::Solid, color);
        painter.cylinder(rotation, pt1, pt2, r, caps, DrawMode::Wires, color::DARKGRAY);
    }
}

/// Box of half-extents `ext` inflated by a sphere of radius `r`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxRounded {
    pub frame: Referential,
    pub ext: Vec3,
    pub r: f32,
}

impl BoxRounded {
    pub fn new(frame: Referential, ext: Vec3, r: f32) -> Self {
        Self { frame, ext, r }
    }

    /// The six faces, each pushed out by `r` along its normal
    ///
    /// Order: top, bottom, right, left, front, back.
    pub fn quads(&self) -> [Quad; 6] {
        let Vec3 { x, y, z } = self.ext;
        let f = &self.frame;
        let r = self.r;
        [
            Quad::new(f.translated(Vec3::new(0.0, y + r, 0.0)), Vec2::new(x, z)),
            Quad::new(
                f.translated(Vec3::new(0.0, -(y + r), 0.0)).rotated(axis_angle(f.i, PI)),
                Vec2::new(x, z),
            ),
            Quad::new(
                f.translated(Vec3::new(x + r, 0.0, 0.0)).rotated(axis_angle(f.k, -FRAC_PI_2)),
                Vec2::new(y, z),
            ),
            Quad::new(
                f.translated(Vec3::new(-(x + r), 0.0, 0.0)).rotated(axis_angle(f.k, FRAC_PI_2)),
                Vec2::new(y, z),
            ),
            Quad::new(
                f.translated(Vec3::new(0.0, 0.0, z + r)).rotated(axis_angle(f.i, FRAC_PI_2)),
                Vec2::new(x, y),
            ),
            Quad::new(
                f.translated(Vec3::new(0.0, 0.0, -(z + r))).rotated(axis_angle(f.i, -FRAC_PI_2)),
                Vec2::new(x, y),
            ),
        ]
    }

    /// Corner of the core box with the given sign on each local axis
    fn corner(&self, sx: f32, sy: f32, sz: f32) -> Vec3 {
        self.frame
            .to_global_pos(Vec3::new(sx * self.ext.x, sy * self.ext.y, sz * self.ext.z))
    }

    /// The twelve edges of the core box as radius-`r` cylinders
    pub fn cylinders(&self) -> [Cylinder; 12] {
        let bfl = self.corner(-1.0, -1.0, 1.0);
        let bfr = self.corner(1.0, -1.0, 1.0);
        let bbl = self.corner(-1.0, -1.0, -1.0);
        let bbr = self.corner(1.0, -1.0, -1.0);
        let tfl = self.corner(-1.0, 1.0, 1.0);
        let tfr = self.corner(1.0, 1.0, 1.0);
        let tbl = self.corner(-1.0, 1.0, -1.0);
        let tbr = self.corner(1.0, 1.0, -1.0);
        let r = self.r;
        [
            Cylinder::new(bfl, bfr, r),
            Cylinder::new(bfr, bbr, r),
            Cylinder::new(bbr, bbl, r),
            Cylinder::new(bbl, bfl, r),
            Cylinder::new(bfl, tfl, r),
            Cylinder::new(bfr, tfr, r),
            Cylinder::new(bbr, tbr, r),
            Cylinder::new(bbl, tbl, r),
            Cylinder::new(tfl, tfr, r),
            Cylinder::new(tfr, tbr, r),
            Cylinder::new(tbr, tbl, r),
            Cylinder::new(tbl, tfl, r),
        ]
    }

    /// Edges only contribute surface when the rounding is non-degenerate
    pub fn has_rounded_edges(&self) -> bool {
        self.r >= EPSILON
    }

    pub fn draw(&self, color: Color, painter: &mut impl Painter) {
        for quad in self.quads() {
            quad.draw(color, painter);
        }
        if self.has_rounded_edges() {
            for cylinder in self.cylinders() {
                cylinder.draw(Quat::IDENTITY, Caps::Rounded, color, painter);
            }
        }
    }
}

/// The closed set of primitives a segment can be tested against
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Plane(Plane),
    Quad(Quad),
    Disk(Disk),
    Sphere(Sphere),
    /// Unbounded along its axis
    InfiniteCylinder(Cylinder),
    Cylinder(Cylinder, Caps),
    RoundedBox(BoxRounded),
}

impl From<Quad> for Primitive {
    fn from(q: Quad) -> Self {
        Primitive::Quad(q)
    }
}

impl From<Disk> for Primitive {
    fn from(d: Disk) -> Self {
        Primitive::Disk(d)
    }
}

impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Self {
        Primitive::Sphere(s)
    }
}

impl From<BoxRounded> for Primitive {
    fn from(b: BoxRounded) -> Self {
        Primitive::RoundedBox(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList};

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    fn unit_box(r: f32) -> BoxRounded {
        BoxRounded::new(Referential::IDENTITY, Vec3::new(1.0, 2.0, 3.0), r)
    }

    #[test]
    fn test_box_quads_face_outward() {
        let b = unit_box(0.5);
        let quads = b.quads();
        let expected = [
            (Vec3::new(0.0, 2.5, 0.0), Vec3::Y, Vec2::new(1.0, 3.0)),
            (Vec3::new(0.0, -2.5, 0.0), Vec3::NEG_Y, Vec2::new(1.0, 3.0)),
            (Vec3::new(1.5, 0.0, 0.0), Vec3::X, Vec2::new(2.0, 3.0)),
            (Vec3::new(-1.5, 0.0, 0.0), Vec3::NEG_X, Vec2::new(2.0, 3.0)),
            (Vec3::new(0.0, 0.0, 3.5), Vec3::Z, Vec2::new(1.0, 2.0)),
            (Vec3::new(0.0, 0.0, -3.5), Vec3::NEG_Z, Vec2::new(1.0, 2.0)),
        ];
        for (quad, (origin, normal, ext)) in quads.iter().zip(expected) {
            assert!(close(quad.frame.origin, origin), "{:?}", quad.frame.origin);
            assert!(close(quad.frame.j, normal), "{:?}", quad.frame.j);
            assert_eq!(quad.ext, ext);
        }
    }

    #[test]
    fn test_box_quad_extents_follow_local_axes() {
        // The right face's local x spans the box height
        let right = unit_box(0.0).quads()[2];
        assert!(close(right.frame.i.abs(), Vec3::Y));
        assert!(close(right.frame.k.abs(), Vec3::Z));
    }

    #[test]
    fn test_box_cylinders_are_edges() {
        let b = unit_box(0.25);
        let cylinders = b.cylinders();
        assert_eq!(cylinders.len(), 12);
        for c in &cylinders {
            assert_eq!(c.r, 0.25);
            // Each edge runs along exactly one axis
            let axis = c.axis().abs();
            let nonzero = [axis.x, axis.y, axis.z].iter().filter(|v| **v > 1e-4).count();
            assert_eq!(nonzero, 1);
        }
        // Vertical edges span the full height
        assert!((cylinders[4].axis().length() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_cylinder_caps() {
        let c = Cylinder::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), 0.5);
        assert!(close(c.bottom().frame.j, Vec3::Z));
        assert!(close(c.top().frame.j, Vec3::NEG_Z));
        assert_eq!(c.top().frame.origin, c.pt2);
        assert_eq!(c.bottom_sphere(), Sphere::new(Vec3::ZERO, 0.5));
        assert!(close(c.rotation_about_axis(PI) * Vec3::X, Vec3::NEG_X));
    }

    #[test]
    fn test_box_draw_emits_faces_and_edges() {
        let mut list = DrawList::new();
        unit_box(0.5).draw(color::ORANGE, &mut list);
        // Solid + wireframe per sub-primitive
        assert_eq!(list.len(), (6 + 12) * 2);
        assert_eq!(list.solid_count(), 18);
        assert!(list.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Cylinder {
                caps: Caps::Rounded,
                ..
            }
        )));
    }

    #[test]
    fn test_sharp_box_skips_edges() {
        let mut list = DrawList::new();
        unit_box(0.0).draw(color::ORANGE, &mut list);
        assert_eq!(list.solid_count(), 6);
    }

    #[test]
    fn test_degenerate_primitives_are_not_drawn() {
        let mut list = DrawList::new();
        Sphere::new(Vec3::ZERO, -1.0).draw(Quat::IDENTITY, color::BLUE, &mut list);
        Quad::new(Referential::IDENTITY, Vec2::new(-1.0, 1.0)).draw(color::BLUE, &mut list);
        Plane::new(Vec3::Y, 1.0).draw(Vec3::ZERO, color::BLUE, &mut list);
        assert!(list.is_empty());

        Plane::new(Vec3::Y, 1.0).draw(Vec3::new(3.0, 1.0, 0.0), color::BLUE, &mut list);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_segment_draw() {
        let mut list = DrawList::new();
        Segment::new(Vec3::ZERO, Vec3::X).draw(&mut list);
        assert!(matches!(list.commands[0], DrawCommand::Line { .. }));
        assert_eq!(list.len(), 3);
    }
}
