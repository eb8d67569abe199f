// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Beacon links: creation, removal and the field side effects of both.

use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use kurbo::Line;
use smallvec::SmallVec;
use territory_field::{Position, TeamId, TriangleField, segments_cross};
use tracing::{debug, trace};

use crate::beacon::{BeaconId, LinkEnd};
use crate::config::MAX_LINKS;
use crate::error::{Error, IntegrityError};
use crate::registry::Registry;

/// Logical creation time of a link.
///
/// Stamps come from a per-registry counter, so no two links share one and
/// their order is the order the links were made in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkStamp(pub(crate) u64);

impl LinkStamp {
    /// The raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A read-only view of one link.
///
/// Equality and hashing only look at the unordered pair of ends: `{a, b}`
/// equals `{b, a}`. Sort by [`created`](Self::created) for chronological
/// order.
#[derive(Clone, Copy, Debug)]
pub struct BeaconLink {
    ends: [BeaconId; 2],
    positions: [Position; 2],
    created: LinkStamp,
    owner: Option<TeamId>,
}

impl BeaconLink {
    pub(crate) fn new(
        (a, pa): (BeaconId, Position),
        (b, pb): (BeaconId, Position),
        created: LinkStamp,
        owner: Option<TeamId>,
    ) -> Self {
        let (ends, positions) = if a <= b {
            ([a, b], [pa, pb])
        } else {
            ([b, a], [pb, pa])
        };
        Self {
            ends,
            positions,
            created,
            owner,
        }
    }

    /// Both ends, lower id first.
    pub fn ends(&self) -> [BeaconId; 2] {
        self.ends
    }

    /// Positions of the ends, in the same order as [`ends`](Self::ends).
    pub fn positions(&self) -> [Position; 2] {
        self.positions
    }

    /// When the link was made.
    pub fn created(&self) -> LinkStamp {
        self.created
    }

    /// Team of the initiating beacon when the link was made.
    ///
    /// Not updated when either end later changes hands.
    pub fn owner(&self) -> Option<TeamId> {
        self.owner
    }

    /// Whether `id` is one of the ends.
    pub fn involves(&self, id: BeaconId) -> bool {
        self.ends.contains(&id)
    }

    /// The end opposite `id`, if `id` is an end.
    pub fn other(&self, id: BeaconId) -> Option<BeaconId> {
        match self.ends {
            [a, b] if a == id => Some(b),
            [a, b] if b == id => Some(a),
            _ => None,
        }
    }

    /// The link as a segment in plane coordinates.
    pub fn segment(&self) -> Line {
        Line::new(self.positions[0].to_point(), self.positions[1].to_point())
    }

    /// Exact squared length.
    pub fn length_sq(&self) -> u64 {
        self.positions[0].distance_sq(self.positions[1])
    }
}

impl PartialEq for BeaconLink {
    fn eq(&self, other: &Self) -> bool {
        self.ends == other.ends
    }
}

impl Eq for BeaconLink {}

impl Hash for BeaconLink {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ends.hash(state);
    }
}

/// Why a link was not made. Nothing was mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkRejection {
    /// Both ends are the same beacon.
    SelfLink,
    /// This end already holds the maximum number of links.
    AtCapacity(BeaconId),
    /// The pair is already linked.
    AlreadyLinked,
}

/// Outcome of [`Registry::add_beacon_link`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkResult {
    /// The link was made and closed these new fields.
    Linked {
        /// Fields formed by this link, possibly none.
        fields: Vec<TriangleField>,
    },
    /// The link was refused.
    Rejected(LinkRejection),
}

impl LinkResult {
    /// Whether the link was made.
    pub fn success(&self) -> bool {
        matches!(self, Self::Linked { .. })
    }

    /// Fields formed by the link.
    pub fn fields(&self) -> &[TriangleField] {
        match self {
            Self::Linked { fields } => fields,
            Self::Rejected(_) => &[],
        }
    }

    /// Number of fields formed by the link; zero when rejected.
    pub fn fields_created(&self) -> usize {
        self.fields().len()
    }
}

/// A removed link and the fields that went with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkRemoval {
    /// One end.
    pub a: BeaconId,
    /// The other end.
    pub b: BeaconId,
    /// Fields that had this link as an edge.
    pub removed_fields: Vec<TriangleField>,
}

impl Registry {
    /// Link two beacons and form every field the new link closes.
    ///
    /// A third beacon `c` closes a field when it is linked to both ends and
    /// all three beacons belong to the same team. Unowned beacons never close
    /// fields, and three collinear beacons span no territory.
    ///
    /// Self links, links to a beacon at the cap and duplicate links are
    /// refused with [`LinkResult::Rejected`] and change nothing.
    pub fn add_beacon_link(&mut self, a: BeaconId, b: BeaconId) -> Result<LinkResult, Error> {
        self.ensure_writable()?;
        let beacon_a = self.live(a)?;
        let beacon_b = self.live(b)?;
        if a == b {
            return Ok(LinkResult::Rejected(LinkRejection::SelfLink));
        }
        let forward = beacon_a.is_linked_to(b);
        let backward = beacon_b.is_linked_to(a);
        if forward && backward {
            return Ok(LinkResult::Rejected(LinkRejection::AlreadyLinked));
        }
        if forward != backward {
            let (from, to) = if forward { (a, b) } else { (b, a) };
            return Err(self.poison(IntegrityError::AsymmetricLink { from, to }));
        }
        let cap = self.config().link_cap();
        if beacon_a.degree() >= cap {
            return Ok(LinkResult::Rejected(LinkRejection::AtCapacity(a)));
        }
        if beacon_b.degree() >= cap {
            return Ok(LinkResult::Rejected(LinkRejection::AtCapacity(b)));
        }
        let owner = beacon_a.owner();
        self.attach(a, b, owner);
        let fields = self.close_fields(a, b);
        self.fields.extend(fields.iter().copied());
        debug!(
            a = ?a,
            b = ?b,
            owner = ?owner,
            fields = fields.len(),
            "beacons linked"
        );
        Ok(LinkResult::Linked { fields })
    }

    /// Remove the link between `a` and `b` and every field it was an edge of.
    ///
    /// Returns `Ok(None)` when the pair was not linked.
    pub fn remove_beacon_link(
        &mut self,
        a: BeaconId,
        b: BeaconId,
    ) -> Result<Option<LinkRemoval>, Error> {
        self.ensure_writable()?;
        let beacon_a = self.live(a)?;
        let beacon_b = self.live(b)?;
        let (pa, pb) = (beacon_a.position(), beacon_b.position());
        match (beacon_a.is_linked_to(b), beacon_b.is_linked_to(a)) {
            (false, false) => return Ok(None),
            (true, false) => {
                return Err(self.poison(IntegrityError::AsymmetricLink { from: a, to: b }));
            }
            (false, true) => {
                return Err(self.poison(IntegrityError::AsymmetricLink { from: b, to: a }));
            }
            (true, true) => {}
        }
        if let Some(beacon) = self.beacon_mut(a) {
            beacon.detach(b);
        }
        if let Some(beacon) = self.beacon_mut(b) {
            beacon.detach(a);
        }
        let removed_fields = self.drain_fields(|f| f.has_edge(pa, pb));
        debug!(
            a = ?a,
            b = ?b,
            fields = removed_fields.len(),
            "beacon link removed"
        );
        Ok(Some(LinkRemoval {
            a,
            b,
            removed_fields,
        }))
    }

    /// Remove the longest link of `beacon`.
    ///
    /// Among links of equal length the one to the lowest neighbour id goes.
    /// Returns `Ok(None)` when the beacon has no links.
    pub fn remove_longest_link(&mut self, beacon: BeaconId) -> Result<Option<LinkRemoval>, Error> {
        self.ensure_writable()?;
        let origin = self.live(beacon)?.position();
        let peers: SmallVec<[BeaconId; MAX_LINKS]> = self.live(beacon)?.linked().collect();
        let mut longest: Option<(u64, BeaconId)> = None;
        for peer in peers {
            let Some(end) = self.beacon(peer) else {
                return Err(self.poison(IntegrityError::DanglingLink {
                    from: beacon,
                    to: peer,
                }));
            };
            let length = origin.distance_sq(end.position());
            if longest.is_none_or(|(best, best_peer)| {
                length > best || (length == best && peer < best_peer)
            }) {
                longest = Some((length, peer));
            }
        }
        match longest {
            Some((_, peer)) => self.remove_beacon_link(beacon, peer),
            None => Ok(None),
        }
    }

    /// Views of every link of `beacon`, oldest first; empty for stale ids.
    pub fn links_of(&self, beacon: BeaconId) -> impl Iterator<Item = BeaconLink> + '_ {
        let mut links: SmallVec<[BeaconLink; MAX_LINKS]> = self
            .beacon(beacon)
            .into_iter()
            .flat_map(|b| b.links.iter().filter_map(move |end| self.view(b.id(), end)))
            .collect();
        links.sort_by_key(BeaconLink::created);
        links.into_iter()
    }

    /// Every link once, in no particular order.
    pub fn links(&self) -> impl Iterator<Item = BeaconLink> + '_ {
        self.beacons().flat_map(move |b| {
            b.links
                .iter()
                .filter(move |end| b.id() < end.peer)
                .filter_map(move |end| self.view(b.id(), end))
        })
    }

    /// Links made by `team`, oldest first.
    ///
    /// A link belongs to the team that owned the initiating beacon when it was
    /// made.
    pub fn team_links(&self, team: TeamId) -> Vec<BeaconLink> {
        let mut links: Vec<_> = self.links().filter(|l| l.owner() == Some(team)).collect();
        links.sort_by_key(BeaconLink::created);
        trace!(team = ?team, links = links.len(), "team links");
        links
    }

    /// Existing links whose segments cross the segment `from`–`to`.
    ///
    /// Only proper crossings count: links sharing an endpoint with the
    /// segment, or ending on it, do not.
    pub fn crossing_links(&self, from: Position, to: Position) -> Vec<BeaconLink> {
        self.links()
            .filter(|l| {
                let [p, q] = l.positions();
                segments_cross(from, to, p, q)
            })
            .collect()
    }

    /// Add both link ends with one shared stamp, without forming fields.
    pub(crate) fn attach(&mut self, a: BeaconId, b: BeaconId, owner: Option<TeamId>) {
        let created = self.tick();
        if let Some(beacon) = self.beacon_mut(a) {
            beacon.links.push(LinkEnd {
                peer: b,
                created,
                owner,
            });
        }
        if let Some(beacon) = self.beacon_mut(b) {
            beacon.links.push(LinkEnd {
                peer: a,
                created,
                owner,
            });
        }
    }

    /// New fields closed by the link `a`–`b`; not yet registered.
    fn close_fields(&self, a: BeaconId, b: BeaconId) -> Vec<TriangleField> {
        let mut created = Vec::new();
        let (Some(beacon_a), Some(beacon_b)) = (self.beacon(a), self.beacon(b)) else {
            return created;
        };
        let Some(team) = beacon_a.owner().filter(|&t| beacon_b.owner() == Some(t)) else {
            return created;
        };
        for c in beacon_a.linked() {
            if c == b || !beacon_b.is_linked_to(c) {
                continue;
            }
            let Some(beacon_c) = self.beacon(c) else {
                continue;
            };
            if beacon_c.owner() != Some(team) {
                continue;
            }
            let field = TriangleField::new(
                beacon_a.position(),
                beacon_b.position(),
                beacon_c.position(),
                Some(team),
            );
            if field.is_degenerate() {
                trace!(a = ?a, b = ?b, c = ?c, "collinear beacons close no field");
                continue;
            }
            if self.fields.contains(&field) || created.contains(&field) {
                continue;
            }
            created.push(field);
        }
        created
    }

    fn view(&self, from: BeaconId, end: &LinkEnd) -> Option<BeaconLink> {
        let a = self.beacon(from)?;
        let b = self.beacon(end.peer)?;
        Some(BeaconLink::new(
            (from, a.position()),
            (end.peer, b.position()),
            end.created,
            end.owner,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use alloc::vec;

    const EPSILON: f64 = 1e-9;

    fn p(x: i32, z: i32) -> Position {
        Position::new(x, z)
    }

    /// A registry with one team and beacons at the given positions.
    fn setup(positions: &[Position]) -> (Registry, TeamId, Vec<BeaconId>) {
        let mut reg = Registry::new();
        let red = reg.team("red").unwrap();
        let ids = positions
            .iter()
            .map(|&pos| reg.create_beacon(pos, 64, Some(red)).unwrap())
            .collect();
        (reg, red, ids)
    }

    #[test]
    fn linking_is_symmetric() {
        let (mut reg, red, ids) = setup(&[p(0, 0), p(10, 0)]);
        let result = reg.add_beacon_link(ids[0], ids[1]).unwrap();
        assert!(result.success());
        assert_eq!(result.fields_created(), 0);
        assert!(reg.beacon(ids[0]).unwrap().is_linked_to(ids[1]));
        assert!(reg.beacon(ids[1]).unwrap().is_linked_to(ids[0]));

        let links: Vec<_> = reg.links_of(ids[1]).collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].ends(), [ids[0], ids[1]]);
        assert_eq!(links[0].owner(), Some(red));
        assert_eq!(links[0].length_sq(), 100);
        assert_eq!(links[0].other(ids[1]), Some(ids[0]));
        assert_eq!(reg.links_of(ids[0]).next(), Some(links[0]));
    }

    #[test]
    fn links_of_is_oldest_first_after_relinking() {
        let (mut reg, _, ids) = setup(&[p(0, 0), p(10, 0), p(0, 10), p(-10, 0)]);
        for peer in [ids[1], ids[2], ids[3]] {
            reg.add_beacon_link(peer, ids[0]).unwrap();
        }
        reg.remove_beacon_link(ids[0], ids[2]).unwrap().unwrap();
        reg.add_beacon_link(ids[2], ids[0]).unwrap();

        let links: Vec<_> = reg.links_of(ids[0]).collect();
        let peers: Vec<_> = links.iter().filter_map(|l| l.other(ids[0])).collect();
        assert_eq!(peers, [ids[1], ids[3], ids[2]]);
        assert!(links.windows(2).all(|w| w[0].created() < w[1].created()));
    }

    #[test]
    fn duplicate_and_self_links_are_rejected_without_mutation() {
        let (mut reg, _, ids) = setup(&[p(0, 0), p(10, 0)]);
        reg.add_beacon_link(ids[0], ids[1]).unwrap();
        let stamp = reg.links_of(ids[0]).next().unwrap().created();

        let again = reg.add_beacon_link(ids[1], ids[0]).unwrap();
        assert_eq!(again, LinkResult::Rejected(LinkRejection::AlreadyLinked));
        assert!(!again.success());
        assert_eq!(again.fields_created(), 0);
        assert_eq!(reg.beacon(ids[0]).unwrap().degree(), 1);
        assert_eq!(reg.beacon(ids[1]).unwrap().degree(), 1);
        assert_eq!(reg.links_of(ids[0]).next().unwrap().created(), stamp);

        assert_eq!(
            reg.add_beacon_link(ids[0], ids[0]).unwrap(),
            LinkResult::Rejected(LinkRejection::SelfLink)
        );
    }

    #[test]
    fn link_cap_is_enforced() {
        let mut positions = vec![p(0, 0)];
        positions.extend((1..=9).map(|i| p(i * 10, 50)));
        let (mut reg, _, ids) = setup(&positions);
        for &other in &ids[1..9] {
            assert!(reg.add_beacon_link(ids[0], other).unwrap().success());
        }
        assert_eq!(
            reg.add_beacon_link(ids[9], ids[0]).unwrap(),
            LinkResult::Rejected(LinkRejection::AtCapacity(ids[0]))
        );
        assert_eq!(reg.beacon(ids[0]).unwrap().degree(), 8);
        assert_eq!(reg.beacon(ids[9]).unwrap().degree(), 0);
    }

    #[test]
    fn configured_cap_below_eight() {
        let mut reg = Registry::with_config(RegistryConfig::new().with_max_links(1));
        let a = reg.create_beacon(p(0, 0), 0, None).unwrap();
        let b = reg.create_beacon(p(10, 0), 0, None).unwrap();
        let c = reg.create_beacon(p(20, 0), 0, None).unwrap();
        assert!(reg.add_beacon_link(a, b).unwrap().success());
        assert_eq!(
            reg.add_beacon_link(c, b).unwrap(),
            LinkResult::Rejected(LinkRejection::AtCapacity(b))
        );
    }

    #[test]
    fn closing_a_triangle_forms_one_field() {
        let (mut reg, red, ids) = setup(&[p(0, 0), p(10, 0), p(0, 10)]);
        reg.add_beacon_link(ids[0], ids[1]).unwrap();
        reg.add_beacon_link(ids[1], ids[2]).unwrap();
        let result = reg.add_beacon_link(ids[2], ids[0]).unwrap();
        assert_eq!(result.fields_created(), 1);
        let field = result.fields()[0];
        assert_eq!(field.owner(), Some(red));
        assert!((field.area() - 50.0).abs() < EPSILON);
        assert_eq!(reg.triangles(), &[field]);
    }

    #[test]
    fn one_link_can_close_several_fields() {
        // a and b are both linked to c and d; linking a-b closes two fields.
        let (mut reg, _, ids) = setup(&[p(0, 0), p(20, 0), p(10, 10), p(10, -10)]);
        let [a, b, c, d] = [ids[0], ids[1], ids[2], ids[3]];
        for (x, y) in [(a, c), (b, c), (a, d), (b, d)] {
            reg.add_beacon_link(x, y).unwrap();
        }
        assert!(reg.triangles().is_empty());
        assert_eq!(reg.add_beacon_link(a, b).unwrap().fields_created(), 2);
        assert!((reg.total_area() - 200.0).abs() < EPSILON);
    }

    #[test]
    fn mixed_or_unowned_triangles_form_no_field() {
        let mut reg = Registry::new();
        let red = reg.team("red").unwrap();
        let blue = reg.team("blue").unwrap();
        let a = reg.create_beacon(p(0, 0), 0, Some(red)).unwrap();
        let b = reg.create_beacon(p(10, 0), 0, Some(red)).unwrap();
        let c = reg.create_beacon(p(0, 10), 0, Some(blue)).unwrap();
        let d = reg.create_corner_beacon(p(10, 10), 0).unwrap();
        for (x, y) in [(a, b), (b, c), (c, a), (b, d), (d, a)] {
            assert_eq!(reg.add_beacon_link(x, y).unwrap().fields_created(), 0);
        }
        assert!(reg.triangles().is_empty());
    }

    #[test]
    fn collinear_triangle_forms_no_field() {
        let (mut reg, _, ids) = setup(&[p(0, 0), p(10, 0), p(20, 0)]);
        reg.add_beacon_link(ids[0], ids[1]).unwrap();
        reg.add_beacon_link(ids[1], ids[2]).unwrap();
        assert_eq!(reg.add_beacon_link(ids[0], ids[2]).unwrap().fields_created(), 0);
    }

    #[test]
    fn removing_a_defining_link_removes_exactly_that_field() {
        // Two fields sharing the edge b-c; a third link a-d is unrelated.
        let (mut reg, _, ids) = setup(&[p(0, 0), p(10, 0), p(0, 10), p(10, 10)]);
        let [a, b, c, d] = [ids[0], ids[1], ids[2], ids[3]];
        for (x, y) in [(a, b), (b, c), (c, a), (b, d), (d, c)] {
            reg.add_beacon_link(x, y).unwrap();
        }
        assert_eq!(reg.triangles().len(), 2);

        let removal = reg.remove_beacon_link(a, b).unwrap().unwrap();
        assert_eq!(removal.removed_fields.len(), 1);
        assert!(removal.removed_fields[0].has_vertex(p(0, 0)));
        assert_eq!(reg.triangles().len(), 1);
        assert!(!reg.triangles()[0].has_vertex(p(0, 0)));
        assert!(!reg.beacon(a).unwrap().is_linked_to(b));
        assert!(!reg.beacon(b).unwrap().is_linked_to(a));

        assert_eq!(reg.remove_beacon_link(a, b).unwrap(), None);
    }

    #[test]
    fn removing_a_shared_edge_removes_both_fields() {
        let (mut reg, _, ids) = setup(&[p(0, 0), p(10, 0), p(0, 10), p(10, 10)]);
        let [a, b, c, d] = [ids[0], ids[1], ids[2], ids[3]];
        for (x, y) in [(a, b), (b, c), (c, a), (b, d), (d, c)] {
            reg.add_beacon_link(x, y).unwrap();
        }
        let removal = reg.remove_beacon_link(c, b).unwrap().unwrap();
        assert_eq!(removal.removed_fields.len(), 2);
        assert!(reg.triangles().is_empty());
    }

    #[test]
    fn longest_link_goes_first() {
        let (mut reg, _, ids) = setup(&[p(0, 0), p(10, 0), p(0, 30), p(-20, 0)]);
        for &other in &ids[1..] {
            reg.add_beacon_link(ids[0], other).unwrap();
        }
        let removal = reg.remove_longest_link(ids[0]).unwrap().unwrap();
        assert_eq!((removal.a, removal.b), (ids[0], ids[2]));
        let removal = reg.remove_longest_link(ids[0]).unwrap().unwrap();
        assert_eq!(removal.b, ids[3]);
        reg.remove_longest_link(ids[0]).unwrap();
        assert_eq!(reg.remove_longest_link(ids[0]).unwrap(), None);
    }

    #[test]
    fn longest_link_tie_goes_to_lowest_id() {
        let (mut reg, _, ids) = setup(&[p(0, 0), p(0, 10), p(10, 0), p(-10, 0)]);
        reg.add_beacon_link(ids[0], ids[3]).unwrap();
        reg.add_beacon_link(ids[0], ids[2]).unwrap();
        reg.add_beacon_link(ids[0], ids[1]).unwrap();
        let removal = reg.remove_longest_link(ids[0]).unwrap().unwrap();
        assert_eq!(removal.b, ids[1]);
    }

    #[test]
    fn team_links_are_chronological() {
        let mut reg = Registry::new();
        let red = reg.team("red").unwrap();
        let blue = reg.team("blue").unwrap();
        let a = reg.create_beacon(p(0, 0), 0, Some(red)).unwrap();
        let b = reg.create_beacon(p(10, 0), 0, Some(red)).unwrap();
        let c = reg.create_beacon(p(20, 0), 0, Some(red)).unwrap();
        let d = reg.create_beacon(p(30, 0), 0, Some(blue)).unwrap();
        reg.add_beacon_link(c, b).unwrap();
        reg.add_beacon_link(d, c).unwrap();
        reg.add_beacon_link(a, b).unwrap();

        let links = reg.team_links(red);
        assert_eq!(links.len(), 2);
        assert!(links[0].created() < links[1].created());
        assert_eq!(links[0].ends(), [b, c]);
        assert_eq!(links[1].ends(), [a, b]);
        assert_eq!(reg.team_links(blue).len(), 1);
        assert_eq!(reg.links().count(), 3);
    }

    #[test]
    fn crossing_links_ignore_shared_endpoints() {
        let (mut reg, _, ids) = setup(&[p(0, 0), p(10, 10), p(20, 0)]);
        reg.add_beacon_link(ids[0], ids[1]).unwrap();
        reg.add_beacon_link(ids[1], ids[2]).unwrap();

        let crossing = reg.crossing_links(p(0, 10), p(10, 0));
        assert_eq!(crossing.len(), 1);
        assert!(crossing[0].involves(ids[0]));
        // Ends exactly on the beacon at (10, 10).
        assert!(reg.crossing_links(p(10, 10), p(10, 30)).is_empty());
        assert!(reg.crossing_links(p(0, 0), p(20, 0)).is_empty());
    }

    #[test]
    fn unknown_beacons_are_errors() {
        let (mut reg, _, ids) = setup(&[p(0, 0), p(10, 0)]);
        reg.destroy_beacon(ids[1]).unwrap();
        assert_eq!(
            reg.add_beacon_link(ids[0], ids[1]),
            Err(Error::UnknownBeacon(ids[1]))
        );
        assert_eq!(
            reg.remove_longest_link(ids[1]),
            Err(Error::UnknownBeacon(ids[1]))
        );
        assert_eq!(reg.links_of(ids[1]).count(), 0);
    }

    #[test]
    fn link_equality_is_unordered() {
        let a = BeaconId::new(0, 1);
        let b = BeaconId::new(1, 1);
        let x = BeaconLink::new((a, p(0, 0)), (b, p(1, 1)), LinkStamp(1), None);
        let y = BeaconLink::new((b, p(1, 1)), (a, p(0, 0)), LinkStamp(7), None);
        assert_eq!(x, y);
        assert_eq!(x.ends(), y.ends());
        assert_eq!(x.positions(), y.positions());
        assert_eq!(x.segment(), y.segment());
    }
}
