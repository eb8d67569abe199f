// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plane positions and team identifiers.

use core::fmt;

use kurbo::Point;

/// An integer block position on the game plane.
///
/// The world's vertical axis plays no part in territory logic, so a position
/// is just the horizontal `(x, z)` pair. When converted to a kurbo [`Point`],
/// `z` becomes the point's `y`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// East-west coordinate.
    pub x: i32,
    /// North-south coordinate.
    pub z: i32,
}

impl Position {
    /// Create a new position.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The position shifted by `(dx, dz)`, saturating at the `i32` range.
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            z: self.z.saturating_add(dz),
        }
    }

    /// This position as a kurbo point.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.z))
    }

    /// Exact squared Euclidean distance to another position.
    pub fn distance_sq(self, other: Self) -> u64 {
        let dx = (i64::from(self.x) - i64::from(other.x)).unsigned_abs();
        let dz = (i64::from(self.z) - i64::from(other.z)).unsigned_abs();
        dx.saturating_mul(dx).saturating_add(dz.saturating_mul(dz))
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, z): (i32, i32)) -> Self {
        Self::new(x, z)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Opaque identifier of a team.
///
/// Identifiers are handed out by whoever keeps the team roster (the registry
/// interns team names); this crate only compares them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(u16);

impl TeamId {
    /// Wrap a raw roster index.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw roster index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
