//! Stateless 2D math shared by the eye model, the animations and hit testing.

pub mod bezier;
pub mod clip;
pub mod hit_testing;
pub mod triangulate;

use egui::{Pos2, Vec2};
use std::f32::consts::{PI, TAU};

/// Lengths below this are treated as zero when normalizing directions.
pub const EPSILON: f32 = 1e-6;

/// Returns the point at `radius` from `center` in the direction of `point`.
///
/// A point sitting exactly on the center has no direction, so it is projected
/// straight to the right (angle 0).
pub fn project_onto_circle(point: Pos2, center: Pos2, radius: f32) -> Pos2 {
    let delta = point - center;
    let len = delta.length();
    if len < EPSILON {
        return center + Vec2::new(radius, 0.0);
    }
    center + delta * (radius / len)
}

/// Returns the point at `target_distance` from `pivot`, opposite to `handle`.
///
/// Returns `None` when `handle` coincides with `pivot`; callers keep the
/// opposite point where it was.
pub fn mirror_across_pivot(pivot: Pos2, handle: Pos2, target_distance: f32) -> Option<Pos2> {
    let delta = handle - pivot;
    let len = delta.length();
    if len < EPSILON {
        return None;
    }
    Some(pivot - delta * (target_distance / len))
}

/// Wraps an angle into `(-PI, PI]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Interpolates from `a` to `b` along the shorter arc.
pub fn lerp_angle(a: f32, b: f32, t: f32) -> f32 {
    a + normalize_angle(b - a) * t
}

pub fn lerp_pos(a: Pos2, b: Pos2, t: f32) -> Pos2 {
    a + (b - a) * t
}

pub fn lerp_vec(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Polar offset `(radius, angle)` of `point` as seen from `origin`.
pub fn polar_offset(origin: Pos2, point: Pos2) -> (f32, f32) {
    let delta = point - origin;
    (delta.length(), delta.y.atan2(delta.x))
}

pub fn from_polar(origin: Pos2, radius: f32, angle: f32) -> Pos2 {
    origin + Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Shortens `v` to at most `max_len`, keeping its direction.
pub fn clamp_length(v: Vec2, max_len: f32) -> Vec2 {
    let max_len = max_len.max(0.0);
    let len = v.length();
    if len <= max_len {
        v
    } else if len < EPSILON {
        Vec2::ZERO
    } else {
        v * (max_len / len)
    }
}
