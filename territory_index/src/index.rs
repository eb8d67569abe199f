// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::GridI64;
use crate::types::{Aabb2D, Scalar};

/// Generational handle for entries.
///
/// A handle goes stale when its entry is removed; a stale handle never
/// resolves, even after its slot is reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key(u32, u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Index keys are 32-bit; the index never grows past u32::MAX slots."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Entry<T, P> {
    generation: u32,
    aabb: Aabb2D<T>,
    payload: P,
}

/// An AABB index parameterized by a spatial backend.
///
/// Every mutation reaches the backend immediately, so queries always observe
/// the latest state.
#[derive(Debug)]
pub struct IndexGeneric<T, P, B> {
    entries: Vec<Option<Entry<T, P>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    backend: B,
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Scalar,
    P: Copy + Debug,
    B: Backend<T>,
{
    /// Create an empty index around a backend instance.
    pub fn with_backend(backend: B) -> Self {
        Self {
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            backend,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len() - self.free_list.len()
    }

    /// Whether the index holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a new AABB with payload. Returns a stable handle `Key`.
    pub fn insert(&mut self, aabb: Aabb2D<T>, payload: P) -> Key {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generations[idx] = self.generations[idx].wrapping_add(1);
            idx
        } else {
            self.entries.push(None);
            self.generations.push(1);
            self.entries.len() - 1
        };
        let generation = self.generations[idx];
        self.entries[idx] = Some(Entry {
            generation,
            aabb,
            payload,
        });
        self.backend.insert(idx, aabb);
        Key::new(idx, generation)
    }

    /// Remove an entry, returning its payload. Stale keys return `None`.
    pub fn remove(&mut self, key: Key) -> Option<P> {
        let e = self.entries.get(key.idx())?.as_ref()?;
        if e.generation != key.1 {
            return None;
        }
        let payload = e.payload;
        self.entries[key.idx()] = None;
        self.free_list.push(key.idx());
        self.backend.remove(key.idx());
        Some(payload)
    }

    /// Look up an entry's box and payload.
    pub fn get(&self, key: Key) -> Option<(Aabb2D<T>, P)> {
        let e = self.entries.get(key.idx())?.as_ref()?;
        (e.generation == key.1).then_some((e.aabb, e.payload))
    }

    /// Entries whose box center lies within `radius` of the point, boundary
    /// inclusive. The order is backend-dependent.
    ///
    /// The backend culls with the bounding square of the disk; the exact test
    /// runs in the widened accumulator so coordinates stay exact.
    pub fn query_radius(&self, x: T, y: T, radius: T) -> impl Iterator<Item = (Key, P)> + '_ {
        let limit = T::widen(radius) * T::widen(radius);
        let mut out = Vec::new();
        self.backend.visit_rect(Aabb2D::around(x, y, radius), |i| {
            if let Some(Some(e)) = self.entries.get(i)
                && e.aabb.center_distance_sq(x, y) <= limit
            {
                out.push((Key::new(i, e.generation), e.payload));
            }
        });
        out.into_iter()
    }
}

/// Index over `i64` coordinates backed by a uniform grid.
pub type Index<P> = IndexGeneric<i64, P, GridI64>;

impl<P: Copy + Debug> Index<P> {
    /// Create a grid-backed index with the given cell size.
    pub fn with_grid(cell_size: i64) -> Self {
        Self::with_backend(GridI64::new(cell_size))
    }
}
