// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Beacons: identifiers, flags, footprints and the per-beacon link list.

use smallvec::SmallVec;
use territory_field::{Position, TeamId};
use territory_index::Key as IndexKey;

use crate::config::MAX_LINKS;
use crate::link::LinkStamp;

/// Identifier for a beacon in a [`Registry`](crate::Registry) (generational).
///
/// Ids order by slot, then generation; the registry uses that order to break
/// ties deterministically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BeaconId(pub(crate) u32, pub(crate) u32);

impl BeaconId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "BeaconId uses 32-bit slot indices by design."
    )]
    pub(crate) const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Auxiliary beacon state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BeaconFlags: u8 {
        /// Ownership changed hands and the capture has not been processed yet.
        const RECENTLY_CAPTURED = 0b0000_0001;
        /// Placed by the system as an unowned corner beacon.
        const CORNER            = 0b0000_0010;
    }
}

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The eight cells around `center`, centre excluded.
pub fn neighborhood(center: Position) -> [Position; 8] {
    NEIGHBOR_OFFSETS.map(|(dx, dz)| center.offset(dx, dz))
}

/// The full 3×3 footprint of a beacon at `center`, centre first.
pub fn footprint(center: Position) -> [Position; 9] {
    let ring = neighborhood(center);
    core::array::from_fn(|i| if i == 0 { center } else { ring[i - 1] })
}

/// One side of a link, stored on both beacons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LinkEnd {
    pub(crate) peer: BeaconId,
    pub(crate) created: LinkStamp,
    pub(crate) owner: Option<TeamId>,
}

/// A beacon: a point of the plane that a team can hold and link.
///
/// Position and altitude never change. Everything else is mutated through the
/// registry, which keeps links symmetric.
#[derive(Clone, Debug)]
pub struct Beacon {
    id: BeaconId,
    position: Position,
    altitude: i32,
    pub(crate) owner: Option<TeamId>,
    pub(crate) flags: BeaconFlags,
    pub(crate) last_mined: Option<u64>,
    pub(crate) links: SmallVec<[LinkEnd; MAX_LINKS]>,
    pub(crate) index_key: IndexKey,
}

impl Beacon {
    pub(crate) fn new(
        id: BeaconId,
        position: Position,
        altitude: i32,
        owner: Option<TeamId>,
        flags: BeaconFlags,
        index_key: IndexKey,
    ) -> Self {
        Self {
            id,
            position,
            altitude,
            owner,
            flags,
            last_mined: None,
            links: SmallVec::new(),
            index_key,
        }
    }

    /// This beacon's id.
    pub fn id(&self) -> BeaconId {
        self.id
    }

    /// Centre of the footprint.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Altitude it was placed at; plays no part in territory logic.
    pub fn altitude(&self) -> i32 {
        self.altitude
    }

    /// Owning team; `None` for unowned beacons.
    pub fn owner(&self) -> Option<TeamId> {
        self.owner
    }

    /// Auxiliary flags.
    pub fn flags(&self) -> BeaconFlags {
        self.flags
    }

    /// Whether the last ownership change has not been acknowledged.
    pub fn is_recently_captured(&self) -> bool {
        self.flags.contains(BeaconFlags::RECENTLY_CAPTURED)
    }

    /// Whether this is a system-placed corner beacon.
    pub fn is_corner(&self) -> bool {
        self.flags.contains(BeaconFlags::CORNER)
    }

    /// Timestamp of the last mining, in the caller's clock.
    pub fn last_mined(&self) -> Option<u64> {
        self.last_mined
    }

    /// Number of links.
    pub fn degree(&self) -> usize {
        self.links.len()
    }

    /// Ids of linked beacons, oldest link first.
    pub fn linked(&self) -> impl Iterator<Item = BeaconId> + '_ {
        self.links.iter().map(|end| end.peer)
    }

    /// Whether this beacon is linked to `other`.
    pub fn is_linked_to(&self, other: BeaconId) -> bool {
        self.links.iter().any(|end| end.peer == other)
    }

    /// The eight cells around this beacon.
    pub fn neighborhood(&self) -> [Position; 8] {
        neighborhood(self.position)
    }

    pub(crate) fn link_end(&self, peer: BeaconId) -> Option<&LinkEnd> {
        self.links.iter().find(|end| end.peer == peer)
    }

    /// Drop the link to `peer`; `false` if there was none.
    pub(crate) fn detach(&mut self, peer: BeaconId) -> bool {
        let before = self.links.len();
        self.links.retain(|end| end.peer != peer);
        self.links.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_is_centre_plus_ring() {
        let c = Position::new(10, -4);
        let cells = footprint(c);
        assert_eq!(cells[0], c);
        assert_eq!(&cells[1..], &neighborhood(c));
        for (i, a) in cells.iter().enumerate() {
            assert!(a.x.abs_diff(c.x) <= 1 && a.z.abs_diff(c.z) <= 1);
            assert!(cells[i + 1..].iter().all(|b| b != a), "cells are distinct");
        }
    }

    #[test]
    fn ids_order_by_slot_then_generation() {
        assert!(BeaconId(0, 9) < BeaconId(1, 1));
        assert!(BeaconId(2, 1) < BeaconId(2, 2));
    }
}
