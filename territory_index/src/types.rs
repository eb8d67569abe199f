// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boxes and the scalar abstraction they are generic over.

use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// Edges are part of the box: two boxes sharing an edge overlap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x.
    pub min_x: T,
    /// Minimum y.
    pub min_y: T,
    /// Maximum x.
    pub max_x: T,
    /// Maximum y.
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    #[inline(always)]
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether the two boxes share at least one point.
    ///
    /// ```
    /// use territory_index::Aabb2D;
    ///
    /// let a = Aabb2D::new(0, 0, 10, 10);
    /// assert!(a.overlaps(&Aabb2D::new(10, 0, 20, 10)));
    /// assert!(!a.overlaps(&Aabb2D::new(11, 0, 20, 10)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// A square box of half-extent `radius` around a center point.
    #[inline]
    pub fn around(x: T, y: T, radius: T) -> Self {
        Self {
            min_x: T::sub(x, radius),
            min_y: T::sub(y, radius),
            max_x: T::add(x, radius),
            max_y: T::add(y, radius),
        }
    }

    /// Center of the box, rounded toward -∞.
    #[inline]
    pub fn center(&self) -> (T, T) {
        (
            T::mid(self.min_x, self.max_x),
            T::mid(self.min_y, self.max_y),
        )
    }

    /// Squared distance from the box center to a point, widened so it
    /// cannot overflow.
    #[inline]
    pub fn center_distance_sq(&self, x: T, y: T) -> T::Acc {
        let (cx, cy) = self.center();
        let dx = T::widen(cx) - T::widen(x);
        let dy = T::widen(cy) - T::widen(y);
        dx * dx + dy * dy
    }
}

/// Integer coordinate type the index can bucket and measure.
///
/// `Acc` must hold squared distances between any two `i32` block positions.
pub trait Scalar: Copy + Ord + Debug {
    /// Widened accumulator for distance computations.
    type Acc: Copy
        + Ord
        + core::ops::Add<Output = Self::Acc>
        + core::ops::Sub<Output = Self::Acc>
        + core::ops::Mul<Output = Self::Acc>
        + Debug;

    /// Saturating `a + b`.
    fn add(a: Self, b: Self) -> Self;

    /// Saturating `a - b`.
    fn sub(a: Self, b: Self) -> Self;

    /// Midpoint of `a` and `b`, rounded toward -∞.
    fn mid(a: Self, b: Self) -> Self;

    /// Convert to the accumulator type.
    fn widen(v: Self) -> Self::Acc;
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        (a & b) + ((a ^ b) >> 1)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        i128::from(v)
    }
}
