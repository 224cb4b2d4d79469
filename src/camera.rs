//! Orbital camera
//!
//! The camera orbits a center point on a sphere. Drag orbits, the wheel
//! zooms and ctrl-drag pans the center in the view plane. All state lives
//! in `OrbitalCamera` and is threaded through `update` each frame.

use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_4, PI, TAU};

use crate::math::{Spherical, cross, normalize};
use crate::sim::Referential;

/// Zoom, orbit and orbit speeds (per unit of wheel / mouse movement per second)
const SPEED: Spherical = Spherical::new(20.0, 0.3, 0.3);
const RHO_MIN: f32 = 2.0;
const RHO_MAX: f32 = 50.0;
const PHI_MIN: f32 = PI / 100.0;
const PHI_MAX: f32 = 0.99 * PI;
const PAN_SPEED: f32 = 0.7;

/// Pointer state sampled once per frame
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraInput {
    /// Cursor position in screen pixels
    pub mouse: Vec2,
    /// Wheel movement this frame (positive zooms in)
    pub wheel: f32,
    /// Primary button held
    pub button_down: bool,
    /// Either control key held
    pub ctrl: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalCamera {
    /// Eye position relative to `center`
    pub spherical: Spherical,
    pub center: Vec3,
    pub prev_mouse: Vec2,
}

impl Default for OrbitalCamera {
    fn default() -> Self {
        Self {
            spherical: Spherical::new(10.0, FRAC_PI_4, FRAC_PI_4),
            center: Vec3::ZERO,
            prev_mouse: Vec2::ZERO,
        }
    }
}

impl OrbitalCamera {
    pub fn update(&mut self, input: &CameraInput, dt: f32) {
        let mouse_delta = input.mouse - self.prev_mouse;
        self.prev_mouse = input.mouse;

        let orbiting = input.button_down && !input.ctrl;
        let delta = Spherical::new(
            -input.wheel * SPEED.rho * dt,
            if orbiting { mouse_delta.x * SPEED.theta * dt } else { 0.0 },
            if orbiting { -mouse_delta.y * SPEED.phi * dt } else { 0.0 },
        );
        let moved = self.spherical.offset(delta);
        self.spherical = Spherical::new(
            moved.rho.clamp(RHO_MIN, RHO_MAX),
            moved.theta,
            moved.phi.clamp(PHI_MIN, PHI_MAX),
        );

        if input.button_down && input.ctrl {
            let view = self.view_frame();
            let pan = Vec3::new(mouse_delta.x, mouse_delta.y, 0.0) * PAN_SPEED * dt;
            self.center += view.to_global_vect(pan);
        }
    }

    /// Frame at the center with `j` the screen up, `k` towards the eye
    fn view_frame(&self) -> Referential {
        let eye = self.spherical.to_cartesian();

        // Up is the eye direction tilted back by a quarter turn
        let mut up = Spherical::new(
            self.spherical.rho,
            self.spherical.theta,
            (self.spherical.phi - PI / 2.0).rem_euclid(TAU),
        );
        if up.phi > PI {
            up.phi = TAU - up.phi;
            up.theta += PI;
        }
        let up = up.to_cartesian();
        let right = cross(eye, up);

        Referential {
            origin: self.center,
            i: normalize(right),
            j: normalize(up),
            k: normalize(eye),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.spherical.to_cartesian() + self.center
    }

    pub fn target(&self) -> Vec3 {
        self.center
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(from: Vec2, to: Vec2, ctrl: bool) -> OrbitalCamera {
        let mut camera = OrbitalCamera {
            prev_mouse: from,
            ..Default::default()
        };
        let input = CameraInput {
            mouse: to,
            button_down: true,
            ctrl,
            ..Default::default()
        };
        camera.update(&input, 0.1);
        camera
    }

    #[test]
    fn test_default_position() {
        let camera = OrbitalCamera::default();
        let expected = Vec3::new(5.0, 10.0 * FRAC_PI_4.cos(), 5.0);
        assert!((camera.position() - expected).length() < 1e-4);
        assert_eq!(camera.target(), Vec3::ZERO);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = OrbitalCamera::default();
        let zoom_in = CameraInput {
            wheel: 100.0,
            ..Default::default()
        };
        camera.update(&zoom_in, 0.1);
        assert_eq!(camera.spherical.rho, RHO_MIN);

        let zoom_out = CameraInput {
            wheel: -100.0,
            ..Default::default()
        };
        camera.update(&zoom_out, 0.1);
        assert_eq!(camera.spherical.rho, RHO_MAX);
    }

    #[test]
    fn test_orbit_drag() {
        let camera = drag(Vec2::ZERO, Vec2::new(10.0, 0.0), false);
        assert!((camera.spherical.theta - (FRAC_PI_4 + 0.3)).abs() < 1e-5);
        assert_eq!(camera.center, Vec3::ZERO);

        // Dragging far down the screen pins the eye just short of the pole
        let camera = drag(Vec2::ZERO, Vec2::new(0.0, 1000.0), false);
        assert_eq!(camera.spherical.phi, PHI_MIN);
    }

    #[test]
    fn test_mouse_without_button_only_tracks() {
        let mut camera = OrbitalCamera::default();
        let input = CameraInput {
            mouse: Vec2::new(40.0, 25.0),
            ..Default::default()
        };
        camera.update(&input, 0.1);
        assert_eq!(camera.prev_mouse, input.mouse);
        assert_eq!(camera.spherical, OrbitalCamera::default().spherical);
    }

    #[test]
    fn test_pan_stays_in_view_plane() {
        let camera = drag(Vec2::ZERO, Vec2::new(10.0, 5.0), true);
        assert_eq!(camera.spherical, OrbitalCamera::default().spherical);

        let moved = camera.center;
        assert!(moved.length() > 0.1);
        let view_dir = camera.position() - camera.target();
        assert!(moved.dot(view_dir).abs() < 1e-4);
    }

    #[test]
    fn test_view_frame_is_orthonormal() {
        let frame = OrbitalCamera::default().view_frame();
        assert!(frame.i.dot(frame.j).abs() < 1e-5);
        assert!(frame.j.dot(frame.k).abs() < 1e-5);
        assert!((frame.i.length() - 1.0).abs() < 1e-5);
        // Screen up points towards +y
        assert!(frame.j.y > 0.0);
    }
}
