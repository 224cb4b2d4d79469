//! Vector and quaternion algebra
//!
//! Thin named wrappers over glam so the geometry code reads as plain
//! operations, plus the spherical/cylindrical coordinate systems used by the
//! camera.

use glam::{Quat, Vec3};
use std::f32::consts::TAU;

use crate::consts::EPSILON;

#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    a + b
}

#[inline]
pub fn scale(v: Vec3, s: f32) -> Vec3 {
    v * s
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.dot(b)
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(b)
}

#[inline]
pub fn length_squared(v: Vec3) -> f32 {
    v.length_squared()
}

/// Unit vector along `v`, or zero for a (near) zero-length input
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq < EPSILON * EPSILON {
        Vec3::ZERO
    } else {
        v / len_sq.sqrt()
    }
}

/// Mirror `v` about the plane with unit normal `n`: v' = v - 2(v·n)n
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[inline]
pub fn rotate_by_quaternion(v: Vec3, q: Quat) -> Vec3 {
    q * v
}

/// Rotation of `angle` radians about `axis` (normalized here, identity for a zero axis)
#[inline]
pub fn axis_angle(axis: Vec3, angle: f32) -> Quat {
    let axis = normalize(axis);
    if axis == Vec3::ZERO {
        Quat::IDENTITY
    } else {
        Quat::from_axis_angle(axis, angle)
    }
}

/// Shortest rotation taking direction `from` onto direction `to`
#[inline]
pub fn rotation_between(from: Vec3, to: Vec3) -> Quat {
    Quat::from_rotation_arc(normalize(from), normalize(to))
}

/// Spherical coordinates with `y` as the polar axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub rho: f32,
    /// Azimuth around the y axis
    pub theta: f32,
    /// Polar angle from +y
    pub phi: f32,
}

impl Spherical {
    pub const fn new(rho: f32, theta: f32, phi: f32) -> Self {
        Self { rho, theta, phi }
    }

    pub fn offset(self, delta: Spherical) -> Self {
        Self::new(self.rho + delta.rho, self.theta + delta.theta, self.phi + delta.phi)
    }

    pub fn to_cartesian(self) -> Vec3 {
        Vec3::new(
            self.rho * self.phi.sin() * self.theta.cos(),
            self.rho * self.phi.cos(),
            self.rho * self.phi.sin() * self.theta.sin(),
        )
    }
}

/// Cylindrical coordinates around the y axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylindrical {
    pub rho: f32,
    /// Angle from +z toward +x, in [0, 2π)
    pub theta: f32,
    pub y: f32,
}

impl Cylindrical {
    pub const fn new(rho: f32, theta: f32, y: f32) -> Self {
        Self { rho, theta, y }
    }

    pub fn offset(self, delta: Cylindrical) -> Self {
        Self::new(self.rho + delta.rho, self.theta + delta.theta, self.y + delta.y)
    }

    pub fn to_cartesian(self) -> Vec3 {
        Vec3::new(self.rho * self.theta.sin(), self.y, self.rho * self.theta.cos())
    }

    pub fn from_cartesian(p: Vec3) -> Self {
        let rho = (p.x * p.x + p.z * p.z).sqrt();
        let theta = if rho < EPSILON {
            0.0
        } else {
            p.x.atan2(p.z).rem_euclid(TAU)
        };
        Self { rho, theta, y: p.y }
    }
}
