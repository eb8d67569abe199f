// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Territory Index: a 2D AABB index answering radius queries.
//!
//! - Insert and remove axis-aligned bounding boxes (AABBs) with small `Copy` payloads.
//! - Query by radius around a point, measured from each box's center.
//! - Stable generational [`Key`]s: a removed entry's key never resolves again.
//!
//! The territory registry feeds it the 3×3 footprint of every beacon and uses it to
//! answer "which beacons are near this position" without scanning the world.
//! Boxes are bucketed by a uniform grid ([`backends::GridI64`]) behind the
//! [`Backend`] trait.
//!
//! # Example
//!
//! ```rust
//! use territory_index::{Aabb2D, Index};
//!
//! let mut idx = Index::<u32>::with_grid(32);
//! let k1 = idx.insert(Aabb2D::around(0, 0, 1), 1);
//! let _k2 = idx.insert(Aabb2D::around(100, 0, 1), 2);
//!
//! let near: Vec<_> = idx.query_radius(3, 0, 10).collect();
//! assert_eq!(near, [(k1, 1)]);
//!
//! idx.remove(k1);
//! assert_eq!(idx.query_radius(3, 0, 10).count(), 0);
//! ```

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;
mod index;
mod types;

pub use backend::Backend;
pub use index::{Index, IndexGeneric, Key};
pub use types::{Aabb2D, Scalar};
