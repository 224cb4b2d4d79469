//! Local orthonormal frames
//!
//! A referential is an origin plus a right-handed orthonormal basis `i, j, k`.
//! Obstacles and flat primitives are expressed in one, and points move
//! between world and local space through it.

use glam::{Mat3, Quat, Vec3};

use crate::math::{dot, rotate_by_quaternion};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Referential {
    pub origin: Vec3,
    pub i: Vec3,
    pub j: Vec3,
    pub k: Vec3,
}

impl Default for Referential {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Referential {
    /// World axes at the world origin
    pub const IDENTITY: Self = Self {
        origin: Vec3::ZERO,
        i: Vec3::X,
        j: Vec3::Y,
        k: Vec3::Z,
    };

    /// Frame at `origin` whose axes are the world axes rotated by `rotation`
    pub fn local(origin: Vec3, rotation: Quat) -> Self {
        Self::IDENTITY.translated(origin).rotated(rotation)
    }

    /// Move the origin by `translate`, expressed in this frame's own axes
    pub fn translated(&self, translate: Vec3) -> Self {
        Self {
            origin: self.origin + self.to_global_vect(translate),
            ..*self
        }
    }

    /// Rotate the basis vectors, keeping the origin fixed
    pub fn rotated(&self, rotation: Quat) -> Self {
        Self {
            origin: self.origin,
            i: rotate_by_quaternion(self.i, rotation),
            j: rotate_by_quaternion(self.j, rotation),
            k: rotate_by_quaternion(self.k, rotation),
        }
    }

    pub fn to_global_vect(&self, v: Vec3) -> Vec3 {
        self.i * v.x + self.j * v.y + self.k * v.z
    }

    /// Inverse of `to_global_vect`; relies on the basis being orthonormal
    pub fn to_local_vect(&self, v: Vec3) -> Vec3 {
        Vec3::new(dot(v, self.i), dot(v, self.j), dot(v, self.k))
    }

    pub fn to_global_pos(&self, p: Vec3) -> Vec3 {
        self.to_global_vect(p) + self.origin
    }

    pub fn to_local_pos(&self, p: Vec3) -> Vec3 {
        self.to_local_vect(p - self.origin)
    }

    /// Orientation taking the world axes onto `i, j, k`
    pub fn orientation(&self) -> Quat {
        Quat::from_mat3(&Mat3::from_cols(self.i, self.j, self.k))
    }
}
