// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Territory Field: the geometry of controlled territory.
//!
//! Teams claim land by linking beacons; three mutually linked beacons span a
//! [`TriangleField`]. This crate holds the plane geometry those fields need,
//! built on [`kurbo`]:
//!
//! - [`Position`]: integer `(x, z)` block coordinates.
//! - [`orient`] and [`segments_cross`]: exact integer predicates used to
//!   reject links that would cut across an existing link.
//! - [`TriangleField`]: a field with its owner, cached area and closed
//!   containment test.
//! - [`UnionArea`], [`total_area`] and [`score_for_team`]: the area covered by
//!   a set of possibly overlapping fields, counting every block once.
//!
//! It knows nothing about beacons or registries; `territory_engine` builds
//! those on top.
//!
//! # Example
//!
//! ```rust
//! use territory_field::{Position, TeamId, TriangleField, blocks, score_for_team};
//!
//! let red = TeamId::new(0);
//! let p = Position::new;
//! let fields = [
//!     TriangleField::new(p(0, 0), p(10, 0), p(0, 10), Some(red)),
//!     TriangleField::new(p(10, 0), p(0, 10), p(10, 10), Some(red)),
//! ];
//! assert!(fields[0].contains(p(2, 3)));
//! assert_eq!(blocks(score_for_team(&fields, red)), 100);
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` targets.
//! - `serde`: derives `Serialize`/`Deserialize` for [`Position`].

#![no_std]

extern crate alloc;

mod predicates;
mod triangle;
mod types;
mod union;

pub use predicates::{orient, segments_cross};
pub use triangle::TriangleField;
pub use types::{Position, TeamId};
pub use union::{UnionArea, blocks, score_for_team, total_area};
