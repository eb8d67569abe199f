// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orientation and segment-crossing predicates.
//!
//! The integer forms are exact for every `i32` input: all products are taken
//! in `i128`. The float form is only used by the area sweep, where inputs are
//! integer-valued and well inside the range `f64` represents exactly.

use kurbo::Line;

use crate::types::Position;

/// Twice the signed area of the triangle `a, b, c`.
///
/// Positive when the points turn counter-clockwise (in `x`/`z` axes),
/// negative when clockwise, zero when collinear.
pub fn orient(a: Position, b: Position, c: Position) -> i128 {
    let abx = i128::from(b.x) - i128::from(a.x);
    let abz = i128::from(b.z) - i128::from(a.z);
    let acx = i128::from(c.x) - i128::from(a.x);
    let acz = i128::from(c.z) - i128::from(a.z);
    abx * acz - abz * acx
}

/// Whether segments `a0–a1` and `b0–b1` cross at a single interior point.
///
/// Touching at an endpoint, T-junctions and collinear overlap do not count:
/// links that merely share a beacon or end on another link never cross.
///
/// ```
/// use territory_field::{Position, segments_cross};
///
/// let p = Position::new;
/// assert!(segments_cross(p(0, 0), p(10, 10), p(0, 10), p(10, 0)));
/// assert!(!segments_cross(p(0, 0), p(10, 10), p(10, 10), p(20, 0)));
/// ```
pub fn segments_cross(a0: Position, a1: Position, b0: Position, b1: Position) -> bool {
    let o1 = orient(a0, a1, b0).signum();
    let o2 = orient(a0, a1, b1).signum();
    let o3 = orient(b0, b1, a0).signum();
    let o4 = orient(b0, b1, a1).signum();
    o1 * o2 < 0 && o3 * o4 < 0
}

/// The `x` coordinate where two lines cross strictly inside both segments.
pub(crate) fn crossing_x(a: Line, b: Line) -> Option<f64> {
    let r = a.p1 - a.p0;
    let s = b.p1 - b.p0;
    let denom = r.cross(s);
    if denom == 0.0 {
        return None;
    }
    let w = b.p0 - a.p0;
    let t = w.cross(s) / denom;
    let u = w.cross(r) / denom;
    (t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0).then(|| a.p0.x + t * r.x)
}
