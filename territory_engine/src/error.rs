// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Only precondition violations and broken invariants are errors. Routine
//! outcomes (a rejected link, a duplicate field, a pair that was never
//! linked) come back as values.

use territory_field::{Position, TeamId};

use crate::beacon::BeaconId;

/// Errors returned by [`Registry`](crate::Registry) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The identifier does not resolve to a live beacon.
    #[error("beacon {0:?} is not live")]
    UnknownBeacon(BeaconId),
    /// No beacon stands at a triangle vertex.
    #[error("no beacon stands at {0}")]
    InvalidVertex(Position),
    /// A triangle vertex is held by a different team (or by nobody).
    #[error("beacon at {vertex} is held by {found:?}, expected {expected:?}")]
    MixedOwnership {
        /// Team the triangle was requested for.
        expected: TeamId,
        /// The offending vertex.
        vertex: Position,
        /// Actual owner of the beacon there.
        found: Option<TeamId>,
    },
    /// A cell of the new beacon's 3×3 footprint already belongs to a beacon.
    #[error("footprint cell {0} is already taken")]
    Occupied(Position),
    /// The team identifier was not issued by this registry's roster.
    #[error("team {0:?} is not on the roster")]
    UnnamedTeam(TeamId),
    /// The roster cannot intern another team name.
    #[error("team roster is full")]
    RosterFull,
    /// An internal invariant is broken; the registry is now poisoned.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
    /// An earlier integrity failure poisoned the registry.
    #[error("registry is poisoned by an earlier integrity failure")]
    Poisoned,
}

/// A broken registry invariant, found by an audit or detected mid-mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    /// `from` lists `to` as linked but not the other way round.
    #[error("link {from:?} -> {to:?} has no reverse entry")]
    AsymmetricLink {
        /// Beacon holding the one-sided entry.
        from: BeaconId,
        /// Beacon missing the reverse entry.
        to: BeaconId,
    },
    /// A beacon holds more links than the cap allows.
    #[error("beacon {beacon:?} has {degree} links")]
    DegreeExceeded {
        /// The overfull beacon.
        beacon: BeaconId,
        /// Its link count.
        degree: usize,
    },
    /// The primary index and a beacon disagree about a position.
    #[error("primary index entry at {0} does not match its beacon")]
    PrimaryIndexMismatch(Position),
    /// A beacon's footprint cell is missing from the neighbourhood index.
    #[error("beacon {beacon:?} has no neighbourhood entry at {cell}")]
    MissingNeighborEntry {
        /// The beacon.
        beacon: BeaconId,
        /// The missing footprint cell.
        cell: Position,
    },
    /// A neighbourhood entry points at no live beacon's footprint.
    #[error("neighbourhood entry at {0} belongs to no live beacon")]
    OrphanedNeighborEntry(Position),
    /// A link points at a beacon that is no longer live.
    #[error("beacon {from:?} links to dead beacon {to:?}")]
    DanglingLink {
        /// The live end.
        from: BeaconId,
        /// The dead end.
        to: BeaconId,
    },
    /// A live field has a vertex with no beacon.
    #[error("field vertex {0} has no beacon")]
    DanglingFieldVertex(Position),
}
