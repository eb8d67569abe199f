// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend for 2D AABBs.
//!
//! Boxes are bucketed into fixed-size cells and queries touch only the cells
//! overlapping the query primitive. Beacon footprints are tiny compared to a
//! cell, so almost every box lives in exactly one bucket.

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::backend::Backend;
use crate::types::{Aabb2D, Scalar};

/// Scalar types supported by the grid backend.
pub trait GridScalar: Scalar {
    /// Map a coordinate to its cell along one axis, rounding toward -∞ and
    /// saturating to the `i32` range.
    fn cell_coord(value: Self, cell_size: Self) -> i32;
}

impl GridScalar for i64 {
    #[inline]
    fn cell_coord(value: Self, cell_size: Self) -> i32 {
        debug_assert!(cell_size > 0, "grid cell_size must be strictly positive");
        let coord = value.div_euclid(cell_size);
        i32::try_from(coord).unwrap_or(if coord < 0 { i32::MIN } else { i32::MAX })
    }
}

/// Uniform grid backend with fixed cell size and origin at zero.
pub struct Grid<T: GridScalar> {
    cell_size: T,
    cells: HashMap<(i32, i32), SmallVec<[usize; 8]>>,
    slots: Vec<Option<SlotEntry<T>>>,
}

#[derive(Clone, Debug)]
struct SlotEntry<T> {
    aabb: Aabb2D<T>,
    cells: SmallVec<[(i32, i32); 4]>,
}

impl<T: GridScalar> Debug for Grid<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let live_slots = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Grid")
            .field("cell_size", &self.cell_size)
            .field("live_slots", &live_slots)
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

impl<T: GridScalar> Grid<T> {
    /// Create a grid backend with the given cell size.
    pub fn new(cell_size: T) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
            slots: Vec::new(),
        }
    }

    fn covered_cells(&self, aabb: &Aabb2D<T>) -> SmallVec<[(i32, i32); 4]> {
        let (ix0, ix1) = self.cell_range(aabb.min_x, aabb.max_x);
        let (iy0, iy1) = self.cell_range(aabb.min_y, aabb.max_y);
        let mut out = SmallVec::new();
        for ix in ix0..=ix1 {
            for iy in iy0..=iy1 {
                out.push((ix, iy));
            }
        }
        out
    }

    fn cell_range(&self, min: T, max: T) -> (i32, i32) {
        let c0 = T::cell_coord(min, self.cell_size);
        let c1 = T::cell_coord(max, self.cell_size);
        if c0 <= c1 { (c0, c1) } else { (c1, c0) }
    }

    fn detach(&mut self, slot: usize, cells: &[(i32, i32)]) {
        for cell in cells {
            let Some(bucket) = self.cells.get_mut(cell) else {
                continue;
            };
            if let Some(pos) = bucket.iter().position(|&s| s == slot) {
                bucket.swap_remove(pos);
            }
            if bucket.is_empty() {
                self.cells.remove(cell);
            }
        }
    }

    fn attach(&mut self, slot: usize, aabb: Aabb2D<T>) {
        let cells = self.covered_cells(&aabb);
        for &cell in &cells {
            self.cells.entry(cell).or_default().push(slot);
        }
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
        self.slots[slot] = Some(SlotEntry { aabb, cells });
    }

    fn aabb_of(&self, slot: usize) -> Option<&Aabb2D<T>> {
        self.slots.get(slot)?.as_ref().map(|e| &e.aabb)
    }
}

impl<T: GridScalar> Backend<T> for Grid<T> {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) {
        self.remove(slot);
        self.attach(slot, aabb);
    }

    fn remove(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot).and_then(Option::take) {
            self.detach(slot, &entry.cells);
        }
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, mut f: F) {
        let (ix0, ix1) = self.cell_range(rect.min_x, rect.max_x);
        let (iy0, iy1) = self.cell_range(rect.min_y, rect.max_y);
        let mut seen: HashSet<usize> = HashSet::new();
        let mut visit_bucket = |bucket: &SmallVec<[usize; 8]>| {
            for &slot in bucket {
                if seen.insert(slot) && self.aabb_of(slot).is_some_and(|b| b.overlaps(&rect)) {
                    f(slot);
                }
            }
        };
        let span = (i64::from(ix1) - i64::from(ix0) + 1)
            .saturating_mul(i64::from(iy1) - i64::from(iy0) + 1);
        if usize::try_from(span).map_or(true, |span| span > self.cells.len()) {
            // Fewer occupied cells than cells in range: scan the occupied ones.
            for (&(ix, iy), bucket) in &self.cells {
                if (ix0..=ix1).contains(&ix) && (iy0..=iy1).contains(&iy) {
                    visit_bucket(bucket);
                }
            }
            return;
        }
        for ix in ix0..=ix1 {
            for iy in iy0..=iy1 {
                if let Some(bucket) = self.cells.get(&(ix, iy)) {
                    visit_bucket(bucket);
                }
            }
        }
    }
}

/// Grid backend over `i64` coordinates.
pub type GridI64 = Grid<i64>;
