//! Small vector helpers over `[f64; 3]` positions.

use std::f64::consts::PI;

pub type Point = [f64; 3];

pub fn sub(a: Point, b: Point) -> Point {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn dot(a: Point, b: Point) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: Point, b: Point) -> Point {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn length(a: Point) -> f64 {
    dot(a, a).sqrt()
}

/// Drops the z coordinate.
pub fn project_2d(a: Point) -> Point {
    [a[0], a[1], 0.0]
}

/// Unit vector pointing from `from` to `to`; zero if the points coincide.
pub fn direction_vector(from: Point, to: Point) -> Point {
    let d = sub(to, from);
    let len = length(d);
    if len <= f64::EPSILON {
        return [0.0; 3];
    }
    [d[0] / len, d[1] / len, d[2] / len]
}

/// Unsigned angle between two vectors, in `[0, π]`.
pub fn angle_to(a: Point, b: Point) -> f64 {
    let la = length(a);
    let lb = length(b);
    if la <= f64::EPSILON || lb <= f64::EPSILON {
        return 0.0;
    }
    (dot(a, b) / (la * lb)).clamp(-1.0, 1.0).acos()
}

/// Counterclockwise angle from `a` to `b` in the xy plane, in `[0, 2π)`.
pub fn signed_angle_to(a: Point, b: Point) -> f64 {
    let a = project_2d(a);
    let b = project_2d(b);
    let angle = angle_to(a, b);
    if a[0] * b[1] - a[1] * b[0] < -1e-6 {
        2.0 * PI - angle
    } else {
        angle
    }
}

/// `a · (b × c)`; positive when `a`, `b`, `c` form a right-handed triple.
pub fn signed_volume(a: Point, b: Point, c: Point) -> f64 {
    dot(a, cross(b, c))
}
