//! Swept collision primitives
//!
//! Pure geometry for continuous collision detection: a moving circle swept
//! along a displacement against boxes and circles. Times of impact are
//! normalized to the displacement, so a valid hit has `t` in `[0, 1)`.
//! The y axis grows downward, matching the screen convention, so `top` is
//! the smaller y coordinate of a box.

use crate::foundation::math::{length_squared, Vec2};

/// Axis-aligned box edges in world coordinates, `top < bottom`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxBounds {
    /// Smallest x coordinate
    pub left: f32,
    /// Largest x coordinate
    pub right: f32,
    /// Smallest y coordinate
    pub top: f32,
    /// Largest y coordinate
    pub bottom: f32,
}

/// A resolved time of impact along a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Normalized time of impact, in `[0, 1)`
    pub t: f32,
    /// Unit surface normal at the contact point, pointing away from the
    /// obstacle
    pub normal: Vec2,
}

/// Smallest non-negative `t` where `origin + t * delta` lies on the circle
/// of the given center and radius. Returns `None` for a degenerate ray or
/// when the ray misses.
pub fn ray_circle(origin: Vec2, delta: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let e = origin - center;
    let a = length_squared(delta);
    if a < 1e-12 {
        return None;
    }
    let b = 2.0 * e.dot(&delta);
    let c = length_squared(e) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let t0 = (-b - root) / (2.0 * a);
    let t1 = (-b + root) / (2.0 * a);
    if t0 >= 0.0 {
        Some(t0)
    } else if t1 >= 0.0 {
        Some(t1)
    } else {
        None
    }
}

/// Sweep a circle along `delta` against an axis-aligned box.
///
/// Works on the Minkowski expansion of the box: the four edges pushed out
/// by the radius (with their spans restricted to the original box) plus a
/// radius-sized circle at each corner. The earliest candidate in `[0, 1)`
/// wins.
pub fn sweep_circle_box(
    center: Vec2,
    radius: f32,
    delta: Vec2,
    bounds: &BoxBounds,
) -> Option<SweepHit> {
    let mut best: Option<SweepHit> = None;

    let mut consider = |t: f32, normal: Vec2| {
        if t >= 0.0 && t < 1.0 && best.map_or(true, |hit| t < hit.t) {
            best = Some(SweepHit { t, normal });
        }
    };

    // Flat edges. Only the face the motion approaches can be struck, and
    // the crossing point must lie within the edge's span.
    if delta.x > 0.0 {
        let t = (bounds.left - radius - center.x) / delta.x;
        let y = center.y + t * delta.y;
        if y >= bounds.top && y <= bounds.bottom {
            consider(t, Vec2::new(-1.0, 0.0));
        }
    } else if delta.x < 0.0 {
        let t = (bounds.right + radius - center.x) / delta.x;
        let y = center.y + t * delta.y;
        if y >= bounds.top && y <= bounds.bottom {
            consider(t, Vec2::new(1.0, 0.0));
        }
    }
    if delta.y > 0.0 {
        let t = (bounds.top - radius - center.y) / delta.y;
        let x = center.x + t * delta.x;
        if x >= bounds.left && x <= bounds.right {
            consider(t, Vec2::new(0.0, -1.0));
        }
    } else if delta.y < 0.0 {
        let t = (bounds.bottom + radius - center.y) / delta.y;
        let x = center.x + t * delta.x;
        if x >= bounds.left && x <= bounds.right {
            consider(t, Vec2::new(0.0, 1.0));
        }
    }

    // Rounded corners.
    let corners = [
        Vec2::new(bounds.left, bounds.top),
        Vec2::new(bounds.right, bounds.top),
        Vec2::new(bounds.left, bounds.bottom),
        Vec2::new(bounds.right, bounds.bottom),
    ];
    for corner in corners {
        if let Some(t) = ray_circle(center, delta, corner, radius) {
            if t < 1.0 {
                let contact = center + delta * t;
                let offset = contact - corner;
                let distance = offset.norm();
                if distance > 1e-6 {
                    consider(t, offset / distance);
                }
            }
        }
    }

    best
}

/// Sweep a moving circle along `delta` against a stationary circle by
/// reducing to a ray against the summed-radius circle
pub fn sweep_circle_circle(
    center: Vec2,
    radius: f32,
    delta: Vec2,
    other_center: Vec2,
    other_radius: f32,
) -> Option<SweepHit> {
    let t = ray_circle(center, delta, other_center, radius + other_radius)?;
    if t >= 1.0 {
        return None;
    }
    let contact = center + delta * t;
    let offset = contact - other_center;
    let distance = offset.norm();
    if distance <= 1e-6 {
        return None;
    }
    Some(SweepHit {
        t,
        normal: offset / distance,
    })
}
