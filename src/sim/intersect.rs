//! Exact segment-vs-primitive intersection
//!
//! Every test returns the first point where the segment meets the surface,
//! together with an outward unit normal. The segment parameter is accepted
//! in `[-EPSILON, 1 + EPSILON]`; degenerate inputs (parallel segments,
//! zero-length segments or axes) are reported as misses.

use glam::Vec3;

use super::primitives::{BoxRounded, Caps, Cylinder, Disk, Plane, Primitive, Quad, Segment, Sphere};
use crate::approx_zero;
use crate::consts::EPSILON;
use crate::math::{cross, dot, length_squared, normalize};

/// Contact between a segment and a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub point: Vec3,
    /// Unit surface normal, facing the side the segment came from
    pub normal: Vec3,
}

impl Hit {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }
}

#[inline]
fn in_segment_range(t: f32) -> bool {
    (-EPSILON..=1.0 + EPSILON).contains(&t)
}

/// Smallest root of `a t² + b t + c = 0`, the entry parameter of the segment
///
/// A discriminant within `EPSILON` of zero is a tangent contact. Returns
/// `None` for `a ≈ 0` (no quadratic to solve) or no real root.
fn entry_root(a: f32, b: f32, c: f32) -> Option<f32> {
    if approx_zero(a) {
        return None;
    }
    let delta = b * b - 4.0 * a * c;
    if delta < -EPSILON {
        return None;
    }
    if delta < EPSILON {
        return Some(-b / (2.0 * a));
    }
    let sqrt = delta.sqrt();
    Some(((-b - sqrt) / (2.0 * a)).min((-b + sqrt) / (2.0 * a)))
}

pub fn intersect_plane(segment: &Segment, plane: &Plane) -> Option<Hit> {
    let ab = segment.as_vector();
    let ab_n = dot(ab, plane.n);
    if approx_zero(ab_n) {
        return None;
    }
    let t = (plane.d - dot(segment.pt1, plane.n)) / ab_n;
    if !in_segment_range(t) {
        return None;
    }
    let normal = if ab_n < 0.0 { plane.n } else { -plane.n };
    Some(Hit::new(segment.at(t), normal))
}

pub fn intersect_quad(segment: &Segment, quad: &Quad) -> Option<Hit> {
    let hit = intersect_plane(segment, &quad.as_plane())?;
    let local = quad.frame.to_local_pos(hit.point);
    if local.x.abs() > quad.ext.x + EPSILON || local.z.abs() > quad.ext.y + EPSILON {
        return None;
    }
    Some(hit)
}

pub fn intersect_disk(segment: &Segment, disk: &Disk) -> Option<Hit> {
    let hit = intersect_plane(segment, &disk.as_plane())?;
    if length_squared(hit.point - disk.frame.origin) > disk.r * disk.r + EPSILON {
        return None;
    }
    Some(hit)
}

/// A segment starting inside the sphere has a negative entry root and misses
pub fn intersect_sphere(segment: &Segment, sphere: &Sphere) -> Option<Hit> {
    let ab = segment.as_vector();
    let ca = segment.pt1 - sphere.center;
    let a = length_squared(ab);
    let b = 2.0 * dot(ab, ca);
    let c = length_squared(ca) - sphere.r * sphere.r;

    let t = entry_root(a, b, c)?;
    if !in_segment_range(t) {
        return None;
    }
    let point = segment.at(t);
    let normal = normalize(point - sphere.center);
    if normal == Vec3::ZERO {
        return None;
    }
    Some(Hit::new(point, normal))
}

/// Entry point through the lateral surface of the infinite cylinder, plus the
/// unit axis used to derive its normal
fn lateral_entry(segment: &Segment, cylinder: &Cylinder) -> Option<(Vec3, Vec3)> {
    let ab = segment.as_vector();
    let pq = cylinder.axis();
    let pq2 = length_squared(pq);
    if approx_zero(pq2) {
        return None;
    }
    let pa = segment.pt1 - cylinder.pt1;

    // Components perpendicular to the axis
    let i = ab - pq * (dot(ab, pq) / pq2);
    let j = pa - pq * (dot(pa, pq) / pq2);

    let a = length_squared(i);
    let b = 2.0 * dot(i, j);
    let c = length_squared(j) - cylinder.r * cylinder.r;

    let t = entry_root(a, b, c)?;
    if !in_segment_range(t) {
        return None;
    }
    Some((segment.at(t), pq / pq2.sqrt()))
}

/// Outward normal at `point` on the lateral surface
fn lateral_normal(cylinder: &Cylinder, u: Vec3, point: Vec3) -> Option<Vec3> {
    let pm = point - cylinder.pt1;
    let foot = cylinder.pt1 + u * dot(pm, u);
    let normal = normalize(point - foot);
    (normal != Vec3::ZERO).then_some(normal)
}

pub fn intersect_cylinder_infinite(segment: &Segment, cylinder: &Cylinder) -> Option<Hit> {
    let (point, u) = lateral_entry(segment, cylinder)?;
    let normal = lateral_normal(cylinder, u, point)?;
    Some(Hit::new(point, normal))
}

/// Finite cylinder with the given end caps
///
/// When the lateral entry lies beyond an end, the segment can only reach the
/// solid through that end's cap: a disk for `Caps::Flat`, a hemisphere for
/// `Caps::Rounded`, nothing for an open tube.
pub fn intersect_cylinder(segment: &Segment, cylinder: &Cylinder, caps: Caps) -> Option<Hit> {
    let pq = cylinder.axis();
    let pq2 = length_squared(pq);
    if approx_zero(pq2) {
        // A zero-length capsule is still a sphere
        return match caps {
            Caps::Rounded => intersect_sphere(segment, &cylinder.bottom_sphere()),
            Caps::None | Caps::Flat => None,
        };
    }
    let u = pq / pq2.sqrt();
    let pa = segment.pt1 - cylinder.pt1;
    let r2 = cylinder.r * cylinder.r;

    let start_outside = length_squared(cross(pa, u)) > r2 + EPSILON;
    let (point, pm) = if start_outside {
        let (point, _) = lateral_entry(segment, cylinder)?;
        (point, point - cylinder.pt1)
    } else {
        // Within the lateral bound: only an end cap can be reached
        (segment.pt1, pa)
    };

    let pm_pq = dot(pm, pq);
    if pm_pq < EPSILON {
        match caps {
            Caps::None => None,
            Caps::Flat => intersect_disk(segment, &cylinder.bottom()),
            Caps::Rounded => intersect_sphere(segment, &cylinder.bottom_sphere()),
        }
    } else if pm_pq > pq2 - EPSILON {
        match caps {
            Caps::None => None,
            Caps::Flat => intersect_disk(segment, &cylinder.top()),
            Caps::Rounded => intersect_sphere(segment, &cylinder.top_sphere()),
        }
    } else if start_outside {
        let normal = lateral_normal(cylinder, u, point)?;
        Some(Hit::new(point, normal))
    } else {
        // Segment starts inside the solid body
        None
    }
}

/// Nearest hit over the 6 face quads and 12 capsule edges
///
/// Only entering hits count: faces the segment travels away from are culled
/// and edge hits whose outward normal points along the segment are dropped,
/// so a path leaving the surface is never turned back in.
pub fn intersect_box_rounded(segment: &Segment, rounded: &BoxRounded) -> Option<Hit> {
    let ab = segment.as_vector();

    let quad_hits = rounded
        .quads()
        .into_iter()
        .filter(|quad| dot(ab, quad.frame.j) < 0.0)
        .filter_map(|quad| intersect_quad(segment, &quad));

    let edge_hits = rounded
        .has_rounded_edges()
        .then(|| rounded.cylinders())
        .into_iter()
        .flatten()
        .filter_map(|cylinder| intersect_cylinder(segment, &cylinder, Caps::Rounded))
        .filter(|hit| dot(ab, hit.normal) < 0.0);

    quad_hits.chain(edge_hits).min_by(|a, b| {
        let da = length_squared(a.point - segment.pt1);
        let db = length_squared(b.point - segment.pt1);
        da.total_cmp(&db)
    })
}

/// Dispatch over the closed primitive set
pub fn intersect(segment: &Segment, primitive: &Primitive) -> Option<Hit> {
    match primitive {
        Primitive::Plane(plane) => intersect_plane(segment, plane),
        Primitive::Quad(quad) => intersect_quad(segment, quad),
        Primitive::Disk(disk) => intersect_disk(segment, disk),
        Primitive::Sphere(sphere) => intersect_sphere(segment, sphere),
        Primitive::InfiniteCylinder(cylinder) => intersect_cylinder_infinite(segment, cylinder),
        Primitive::Cylinder(cylinder, caps) => intersect_cylinder(segment, cylinder, *caps),
        Primitive::RoundedBox(rounded) => intersect_box_rounded(segment, rounded),
    }
}
