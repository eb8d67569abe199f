// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Territory Engine: beacons, links, fields and territory scores.
//!
//! Teams hold point-like *beacons* on a shared plane. Beacons are linked in
//! pairs, and three mutually linked beacons of one team span a triangular
//! *field*. A team's score is the area its fields cover, with overlaps
//! counted once.
//!
//! - [`Registry`] owns every beacon, link and field. It enforces the link
//!   invariants (symmetric, at most [`MAX_LINKS`] per beacon, no duplicates),
//!   forms fields when a link closes a same-team triangle, and drops fields
//!   when a defining link, vertex or owner goes away.
//! - Spatial lookups are constant time by exact position or by footprint
//!   cell, and grid-accelerated by radius (see `territory_index`).
//! - Scores come from `territory_field`'s union-area sweep.
//! - [`Snapshot`] flattens a registry to serde records and back.
//!
//! The registry is single-threaded; hosts that share it wrap the whole
//! registry in one lock.
//!
//! Routine refusals are values ([`LinkResult::Rejected`], `Ok(false)`,
//! `Ok(None)`); precondition violations are [`Error`]s; a broken internal
//! invariant poisons the registry.
//!
//! # Example
//!
//! ```rust
//! use territory_engine::{LinkRejection, LinkResult, Position, Registry};
//!
//! let mut reg = Registry::new();
//! let red = reg.team("red").unwrap();
//! let blue = reg.team("blue").unwrap();
//! let p = Position::new;
//!
//! let a = reg.create_beacon(p(50, 50), 64, Some(red)).unwrap();
//! let b = reg.create_beacon(p(60, 50), 64, Some(red)).unwrap();
//! let c = reg.create_beacon(p(60, 60), 64, Some(red)).unwrap();
//! for (x, y) in [(a, b), (b, c), (c, a)] {
//!     reg.add_beacon_link(x, y).unwrap();
//! }
//! assert_eq!(
//!     reg.add_beacon_link(a, b).unwrap(),
//!     LinkResult::Rejected(LinkRejection::AlreadyLinked)
//! );
//! assert_eq!(reg.triangles_at(p(58, 52)).count(), 1);
//!
//! // Capturing a vertex dissolves the field but keeps the links.
//! let dropped = reg.change_owner(c, Some(blue)).unwrap();
//! assert_eq!(dropped.len(), 1);
//! assert_eq!(reg.score_for_team(red), 0.0);
//! assert_eq!(reg.beacon(c).unwrap().degree(), 2);
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: forwards to `territory_field/std`.
//! - `libm`: forwards to `territory_field/libm` for `no_std` targets.

#![no_std]

extern crate alloc;

mod beacon;
mod config;
mod error;
mod integrity;
mod link;
mod query;
mod registry;
mod snapshot;
mod team;

pub use beacon::{Beacon, BeaconFlags, BeaconId, footprint, neighborhood};
pub use config::{MAX_LINKS, RegistryConfig};
pub use error::{Error, IntegrityError};
pub use link::{BeaconLink, LinkRejection, LinkRemoval, LinkResult, LinkStamp};
pub use registry::{BeaconRemoval, Registry};
pub use snapshot::{BeaconRecord, LinkRecord, Snapshot, TriangleRecord};

pub use territory_field::{Position, TeamId, TriangleField};
