// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial lookups over beacons and fields.

use alloc::vec::Vec;

use territory_field::{Position, TeamId, TriangleField};
use tracing::trace;

use crate::beacon::Beacon;
use crate::registry::Registry;

impl Registry {
    /// The beacon centred exactly at `position`.
    pub fn beacon_at(&self, position: Position) -> Option<&Beacon> {
        self.by_position
            .get(&position)
            .and_then(|&id| self.beacon(id))
    }

    /// The beacon whose footprint ring contains `position`.
    ///
    /// The centre is not part of the ring; use [`beacon_at`](Self::beacon_at)
    /// for that.
    pub fn beacon_from_neighbor_position(&self, position: Position) -> Option<&Beacon> {
        self.by_neighbor
            .get(&position)
            .and_then(|&id| self.beacon(id))
    }

    /// Every field containing `position`, boundary included.
    pub fn triangles_at(&self, position: Position) -> impl Iterator<Item = &TriangleField> + '_ {
        self.fields.iter().filter(move |f| f.contains(position))
    }

    /// Beacons centred within `radius` blocks of `center` (inclusive),
    /// nearest first.
    pub fn nearby_beacons(&self, center: Position, radius: u32) -> Vec<&Beacon> {
        let mut found: Vec<&Beacon> = self
            .spatial()
            .query_radius(
                i64::from(center.x),
                i64::from(center.z),
                i64::from(radius),
            )
            .filter_map(|(_, id)| self.beacon(id))
            .collect();
        found.sort_by_key(|b| (b.position().distance_sq(center), b.id()));
        trace!(center = %center, radius, found = found.len(), "nearby beacons");
        found
    }

    /// Beacons held by `team`, in slot order.
    pub fn team_beacons(&self, team: TeamId) -> impl Iterator<Item = &Beacon> + '_ {
        self.beacons().filter(move |b| b.owner() == Some(team))
    }
}
