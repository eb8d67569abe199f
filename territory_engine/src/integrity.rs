// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full-registry invariant audit.

use crate::beacon::neighborhood;
use crate::error::{Error, IntegrityError};
use crate::registry::Registry;

impl Registry {
    /// Check every structural invariant without changing anything.
    ///
    /// Verifies link symmetry and the degree cap, that every live beacon has
    /// its primary entry and all eight neighbourhood entries, that no index
    /// entry points at a dead beacon or a foreign cell, and that every field
    /// vertex holds a beacon.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        let cap = self.config().link_cap();
        for beacon in self.beacons() {
            let id = beacon.id();
            if self.by_position.get(&beacon.position()) != Some(&id) {
                return Err(IntegrityError::PrimaryIndexMismatch(beacon.position()));
            }
            for cell in neighborhood(beacon.position()) {
                if self.by_neighbor.get(&cell) != Some(&id) {
                    return Err(IntegrityError::MissingNeighborEntry { beacon: id, cell });
                }
            }
            if beacon.degree() > cap {
                return Err(IntegrityError::DegreeExceeded {
                    beacon: id,
                    degree: beacon.degree(),
                });
            }
            for peer in beacon.linked() {
                let Some(other) = self.beacon(peer) else {
                    return Err(IntegrityError::DanglingLink { from: id, to: peer });
                };
                // Both ends carry the stamp of the same link.
                let here = beacon.link_end(peer).map(|end| end.created);
                let there = other.link_end(id).map(|end| end.created);
                if there != here {
                    return Err(IntegrityError::AsymmetricLink { from: id, to: peer });
                }
            }
        }
        for (&position, &id) in &self.by_position {
            if self.beacon(id).is_none_or(|b| b.position() != position) {
                return Err(IntegrityError::PrimaryIndexMismatch(position));
            }
        }
        for (&cell, &id) in &self.by_neighbor {
            if self
                .beacon(id)
                .is_none_or(|b| !b.neighborhood().contains(&cell))
            {
                return Err(IntegrityError::OrphanedNeighborEntry(cell));
            }
        }
        for field in self.triangles() {
            if let Some(vertex) = field
                .vertices()
                .into_iter()
                .find(|v| self.beacon_at(*v).is_none())
            {
                return Err(IntegrityError::DanglingFieldVertex(vertex));
            }
        }
        Ok(())
    }

    /// Check every invariant and poison the registry if one is broken.
    pub fn audit(&mut self) -> Result<(), Error> {
        match self.check_integrity() {
            Ok(()) => Ok(()),
            Err(err) => Err(self.poison(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beacon::BeaconId;
    use territory_field::Position;

    fn p(x: i32, z: i32) -> Position {
        Position::new(x, z)
    }

    fn linked_pair() -> (Registry, BeaconId, BeaconId) {
        let mut reg = Registry::new();
        let a = reg.create_beacon(p(0, 0), 0, None).unwrap();
        let b = reg.create_beacon(p(10, 0), 0, None).unwrap();
        reg.add_beacon_link(a, b).unwrap();
        (reg, a, b)
    }

    #[test]
    fn healthy_registry_passes() {
        let (mut reg, _, _) = linked_pair();
        assert_eq!(reg.check_integrity(), Ok(()));
        assert_eq!(reg.audit(), Ok(()));
        assert!(!reg.is_poisoned());
    }

    #[test]
    fn one_sided_link_is_detected_and_poisons() {
        let (mut reg, a, b) = linked_pair();
        reg.beacon_mut(b).unwrap().detach(a);
        assert_eq!(
            reg.check_integrity(),
            Err(IntegrityError::AsymmetricLink { from: a, to: b })
        );
        // Still writable until something notices.
        assert!(!reg.is_poisoned());

        assert_eq!(
            reg.remove_beacon_link(a, b),
            Err(Error::Integrity(IntegrityError::AsymmetricLink {
                from: a,
                to: b
            }))
        );
        assert!(reg.is_poisoned());
        assert_eq!(reg.create_beacon(p(50, 50), 0, None), Err(Error::Poisoned));
        assert_eq!(reg.add_beacon_link(a, b), Err(Error::Poisoned));
        // Reads keep working.
        assert!(reg.beacon_at(p(0, 0)).is_some());
    }

    #[test]
    fn missing_neighbour_entry_is_detected() {
        let (mut reg, a, _) = linked_pair();
        reg.by_neighbor.remove(&p(1, 1));
        assert_eq!(
            reg.check_integrity(),
            Err(IntegrityError::MissingNeighborEntry {
                beacon: a,
                cell: p(1, 1)
            })
        );
        assert!(matches!(reg.audit(), Err(Error::Integrity(_))));
        assert!(reg.is_poisoned());
    }

    #[test]
    fn orphaned_entries_are_detected() {
        let (mut reg, a, _) = linked_pair();
        reg.by_neighbor.insert(p(-40, -40), a);
        assert_eq!(
            reg.check_integrity(),
            Err(IntegrityError::OrphanedNeighborEntry(p(-40, -40)))
        );
        reg.by_neighbor.remove(&p(-40, -40));
        reg.by_position.insert(p(-40, -40), a);
        assert_eq!(
            reg.check_integrity(),
            Err(IntegrityError::PrimaryIndexMismatch(p(-40, -40)))
        );
    }

    #[test]
    fn field_without_beacon_is_detected() {
        let mut reg = Registry::new();
        let red = reg.team("red").unwrap();
        for pos in [p(0, 0), p(10, 0), p(0, 10)] {
            reg.create_beacon(pos, 0, Some(red)).unwrap();
        }
        reg.add_triangle(p(0, 0), p(10, 0), p(0, 10), red).unwrap();
        reg.fields[0] =
            territory_field::TriangleField::new(p(0, 0), p(10, 0), p(0, 20), Some(red));
        assert_eq!(
            reg.check_integrity(),
            Err(IntegrityError::DanglingFieldVertex(p(0, 20)))
        );
    }
}
