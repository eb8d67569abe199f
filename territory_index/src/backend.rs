// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use crate::types::Aabb2D;

/// Spatial backend abstraction used by [`IndexGeneric`][crate::IndexGeneric].
///
/// Backends only know about slots and boxes; payloads and generations live in
/// the index. Visitors may report slots in any order but never twice per query.
pub trait Backend<T> {
    /// Insert a slot, replacing any box it already had.
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>);

    /// Remove a slot. Unknown slots are ignored.
    fn remove(&mut self, slot: usize);

    /// Visit slots whose AABB intersects the rectangle.
    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, f: F);
}
