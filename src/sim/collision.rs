//! Collision resolution and bounce response
//!
//! The ball is a sphere of radius r, so every obstacle is grown by r and the
//! ball is handled as a point. An overlapping ball is pushed out first
//! (resting contact); otherwise its path for the frame is swept against the
//! grown boxes and reflected at each contact until the remaining path is
//! clear.

use glam::Vec3;

use super::intersect::{Hit, intersect_box_rounded};
use super::primitives::{BoxRounded, Segment};
use super::state::{Ball, Obstacle};
use crate::consts::{EPSILON, MASS};
use crate::math::{axis_angle, cross, length_squared, normalize, reflect};

/// Outcome of moving the ball for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// No obstacle touched
    Free,
    /// The ball overlapped an obstacle and was pushed out
    Resting,
    /// The path hit obstacles `bounces` times
    Swept { bounces: usize },
}

impl Contact {
    /// Whether anything was hit (drives the bounce sound)
    pub fn occurred(&self) -> bool {
        !matches!(self, Contact::Free)
    }

    pub fn bounces(&self) -> usize {
        match self {
            Contact::Free => 0,
            Contact::Resting => 1,
            Contact::Swept { bounces } => *bounces,
        }
    }
}

/// Reflect the ball's motion about `normal` and feed the impulse into its spin
pub fn bounce(ball: &mut Ball, point: Vec3, normal: Vec3, dt: f32) {
    let old = ball.motion;
    ball.motion = reflect(ball.motion, normal);
    let delta_motion = old - ball.motion;

    ball.rotation_axis += MASS * cross(point, delta_motion);
    let inertia = ball.moment_of_inertia();
    if inertia > EPSILON {
        ball.rotation_angle += ball.rotation_axis.length() * dt / inertia;
    }
    ball.rotation_quaternion = axis_angle(ball.rotation_axis, ball.rotation_angle);

    log::debug!(
        "Bounce at {:?} n={:?}: motion {:?} -> {:?}",
        point,
        normal,
        old,
        ball.motion
    );
}

/// Surface point and outward normal (both local) for a point inside the core box
///
/// The point leaves through the face it is closest to.
fn nearest_face_exit(local: Vec3, ext: Vec3) -> (Vec3, Vec3) {
    let depth = ext - local.abs();
    let axis = if depth.x <= depth.y && depth.x <= depth.z {
        Vec3::X
    } else if depth.y <= depth.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let sign = if local.dot(axis) < 0.0 { -1.0 } else { 1.0 };
    let normal = axis * sign;
    // Replace the chosen coordinate with the face position
    let surface = local * (Vec3::ONE - axis) + normal * ext;
    (surface, normal)
}

/// Push the ball out of the first box it overlaps, then bounce off it
pub fn static_collide(boxes: &[BoxRounded], ball: &mut Ball, dt: f32) -> bool {
    for rounded in boxes {
        let local = rounded.frame.to_local_pos(ball.pos);
        let in_box = local.clamp(-rounded.ext, rounded.ext);
        let push = local - in_box;
        if length_squared(push) >= rounded.r * rounded.r - EPSILON {
            continue;
        }

        let (surface, local_normal) = if length_squared(push) < EPSILON * EPSILON {
            nearest_face_exit(local, rounded.ext)
        } else {
            (in_box, normalize(push))
        };
        ball.pos = rounded.frame.to_global_pos(surface + local_normal * rounded.r);
        let normal = rounded.frame.to_global_vect(local_normal);
        log::debug!("Resting contact, pushed out to {:?}", ball.pos);
        bounce(ball, ball.pos, normal, dt);
        return true;
    }
    false
}

/// Nearest hit along `segment` among all boxes except `except`
fn first_hit(
    segment: &Segment,
    boxes: &[BoxRounded],
    except: Option<usize>,
) -> Option<(usize, Hit)> {
    boxes
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != except)
        .filter_map(|(index, rounded)| {
            intersect_box_rounded(segment, rounded).map(|hit| (index, hit))
        })
        .min_by(|(_, a), (_, b)| {
            let da = length_squared(a.point - segment.pt1);
            let db = length_squared(b.point - segment.pt1);
            da.total_cmp(&db)
        })
}

/// Sweep the ball from `start` to `end`, bouncing at every contact
///
/// After a bounce the rest of the path is reflected about the contact normal
/// and swept again from the contact point, ignoring the box just hit. The
/// number of passes is capped at `boxes.len() + 1`; if the cap is reached
/// the ball stays at its last contact point. Returns the number of bounces.
pub fn dynamic_collide(
    boxes: &[BoxRounded],
    ball: &mut Ball,
    start: Vec3,
    end: Vec3,
    dt: f32,
) -> usize {
    let mut segment = Segment::new(start, end);
    let mut except = None;
    let mut bounces = 0;

    for _ in 0..=boxes.len() {
        let Some((index, hit)) = first_hit(&segment, boxes, except) else {
            ball.pos = segment.pt2;
            return bounces;
        };
        let rest = reflect(segment.pt2 - hit.point, hit.normal);
        bounce(ball, hit.point, hit.normal, dt);
        bounces += 1;
        segment = Segment::new(hit.point, hit.point + rest);
        except = Some(index);
    }

    log::warn!("Sweep stopped after {} bounces, holding ball at last contact", bounces);
    ball.pos = segment.pt1;
    bounces
}

/// Advance the ball by `dt` through the obstacle field
pub fn move_ball(ball: &mut Ball, obstacles: &[Obstacle], dt: f32) -> Contact {
    let end = ball.pos + ball.motion * dt;
    let boxes: Vec<BoxRounded> = obstacles.iter().map(|o| o.with_radius(ball.r)).collect();

    if static_collide(&boxes, ball, dt) {
        return Contact::Resting;
    }
    match dynamic_collide(&boxes, ball, ball.pos, end, dt) {
        0 => Contact::Free,
        bounces => Contact::Swept { bounces },
    }
}
