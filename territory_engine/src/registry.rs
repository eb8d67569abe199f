// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The beacon registry: storage, beacon lifecycle, fields and scoring.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use territory_field::{Position, TeamId, TriangleField, score_for_team, total_area};
use territory_index::{Aabb2D, Index};
use tracing::{debug, error, trace};

use crate::beacon::{Beacon, BeaconFlags, BeaconId, footprint, neighborhood};
use crate::config::RegistryConfig;
use crate::error::{Error, IntegrityError};
use crate::team::Roster;

/// Owner of every beacon, link and field of one world.
///
/// Beacons live in a generational arena: a destroyed beacon's id never
/// resolves again, even after its slot is reused. Each beacon claims a 3×3
/// footprint; the centre goes in the primary index and the eight cells
/// around it in the neighbourhood index, so both lookups are a single hash
/// probe.
///
/// Every mutation either completes or leaves the registry untouched, except
/// when it detects a broken invariant: it then poisons the registry and all
/// later mutations fail with [`Error::Poisoned`].
///
/// ## Example
///
/// ```rust
/// use territory_engine::{Position, Registry};
///
/// let mut reg = Registry::new();
/// let red = reg.team("red").unwrap();
/// let a = reg.create_beacon(Position::new(0, 0), 64, Some(red)).unwrap();
/// let b = reg.create_beacon(Position::new(10, 0), 64, Some(red)).unwrap();
/// let c = reg.create_beacon(Position::new(0, 10), 64, Some(red)).unwrap();
///
/// reg.add_beacon_link(a, b).unwrap();
/// reg.add_beacon_link(b, c).unwrap();
/// let closed = reg.add_beacon_link(c, a).unwrap();
/// assert_eq!(closed.fields_created(), 1);
/// assert!((reg.score_for_team(red) - 50.0).abs() < 1e-9);
/// ```
pub struct Registry {
    config: RegistryConfig,
    /// slots
    beacons: Vec<Option<Beacon>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    /// slots whose generation is spent; never reused
    retired: usize,
    pub(crate) by_position: HashMap<Position, BeaconId>,
    pub(crate) by_neighbor: HashMap<Position, BeaconId>,
    by_map: HashMap<u32, BeaconId>,
    spatial: Index<BeaconId>,
    pub(crate) fields: Vec<TriangleField>,
    pub(crate) teams: Roster,
    clock: u64,
    poisoned: bool,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("beacons_alive", &self.len())
            .field("free_list", &self.free_list.len())
            .field("retired", &self.retired)
            .field("fields", &self.fields.len())
            .field("teams", &self.teams)
            .field("clock", &self.clock)
            .field("poisoned", &self.poisoned)
            .finish_non_exhaustive()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// A destroyed beacon and the fields that went with it.
#[derive(Clone, Debug)]
pub struct BeaconRemoval {
    /// The beacon as it was; its link list still names its former peers.
    pub beacon: Beacon,
    /// Fields that had the beacon as a vertex.
    pub removed_fields: Vec<TriangleField>,
}

impl Registry {
    /// Create an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            beacons: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            retired: 0,
            by_position: HashMap::new(),
            by_neighbor: HashMap::new(),
            by_map: HashMap::new(),
            spatial: Index::with_grid(config.cell_size()),
            fields: Vec::new(),
            teams: Roster::default(),
            clock: 0,
            poisoned: false,
        }
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of live beacons.
    pub fn len(&self) -> usize {
        self.beacons.len() - self.free_list.len() - self.retired
    }

    /// Whether there are no live beacons.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an integrity failure has disabled all mutations.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Returns true if `id` refers to a live beacon.
    pub fn is_alive(&self, id: BeaconId) -> bool {
        self.beacon(id).is_some()
    }

    // --- teams ---

    /// The id for the team called `name`, adding it to the roster if new.
    pub fn team(&mut self, name: &str) -> Result<TeamId, Error> {
        self.teams.intern(name)
    }

    /// The id for `name` if the team is on the roster.
    pub fn find_team(&self, name: &str) -> Option<TeamId> {
        self.teams.get(name)
    }

    /// The name a team was registered under.
    pub fn team_name(&self, team: TeamId) -> Option<&str> {
        self.teams.name(team)
    }

    /// All teams, in registration order.
    pub fn teams(&self) -> impl Iterator<Item = (TeamId, &str)> + '_ {
        self.teams.iter()
    }

    // --- beacon lifecycle ---

    /// Place a beacon owned by `owner` (or by nobody).
    ///
    /// Fails with [`Error::Occupied`] if any cell of the new 3×3 footprint
    /// already belongs to another beacon's footprint.
    pub fn create_beacon(
        &mut self,
        position: Position,
        altitude: i32,
        owner: Option<TeamId>,
    ) -> Result<BeaconId, Error> {
        self.ensure_writable()?;
        if let Some(team) = owner {
            self.teams.check(team)?;
        }
        self.insert_beacon(position, altitude, owner, BeaconFlags::empty())
    }

    /// Place an unowned system beacon at a world corner.
    pub fn create_corner_beacon(
        &mut self,
        position: Position,
        altitude: i32,
    ) -> Result<BeaconId, Error> {
        self.ensure_writable()?;
        self.insert_beacon(position, altitude, None, BeaconFlags::CORNER)
    }

    /// Destroy a beacon.
    ///
    /// Its links are severed on both sides, every field it is a vertex of is
    /// dropped, and its nine index entries, grid entry and map binding are
    /// removed.
    pub fn destroy_beacon(&mut self, id: BeaconId) -> Result<BeaconRemoval, Error> {
        self.ensure_writable()?;
        let position = self.live(id)?.position();
        let peers: Vec<BeaconId> = self.live(id)?.linked().collect();
        for peer in peers {
            let Some(other) = self.beacon_mut(peer) else {
                return Err(self.poison(IntegrityError::DanglingLink { from: id, to: peer }));
            };
            if !other.detach(id) {
                return Err(self.poison(IntegrityError::AsymmetricLink { from: id, to: peer }));
            }
        }
        let removed_fields = self.drain_fields(|f| f.has_vertex(position));
        let Some(beacon) = self.beacons[id.idx()].take() else {
            return Err(Error::UnknownBeacon(id));
        };
        self.release(id.idx());
        self.by_position.remove(&position);
        for cell in neighborhood(position) {
            if self.by_neighbor.get(&cell) == Some(&id) {
                self.by_neighbor.remove(&cell);
            }
        }
        self.spatial.remove(beacon.index_key);
        self.by_map.retain(|_, bound| *bound != id);
        debug!(
            beacon = ?id,
            position = %position,
            fields = removed_fields.len(),
            "beacon destroyed"
        );
        Ok(BeaconRemoval {
            beacon,
            removed_fields,
        })
    }

    /// Hand a beacon to another team (or to nobody).
    ///
    /// Links stay in place. Fields with the beacon as a vertex are dropped and
    /// returned. Capturing for a team raises the recently-captured flag.
    /// Setting the current owner again changes nothing.
    pub fn change_owner(
        &mut self,
        id: BeaconId,
        owner: Option<TeamId>,
    ) -> Result<Vec<TriangleField>, Error> {
        self.ensure_writable()?;
        if let Some(team) = owner {
            self.teams.check(team)?;
        }
        let beacon = self.beacon_mut(id).ok_or(Error::UnknownBeacon(id))?;
        let previous = beacon.owner;
        if previous == owner {
            return Ok(Vec::new());
        }
        beacon.owner = owner;
        if owner.is_some() {
            beacon.flags.insert(BeaconFlags::RECENTLY_CAPTURED);
        }
        let position = beacon.position();
        let removed = self.drain_fields(|f| f.has_vertex(position));
        debug!(
            beacon = ?id,
            from = ?previous,
            to = ?owner,
            fields = removed.len(),
            "beacon changed owner"
        );
        Ok(removed)
    }

    /// Record that the beacon was mined at `now`.
    pub fn mark_mined(&mut self, id: BeaconId, now: u64) -> Result<(), Error> {
        self.ensure_writable()?;
        let beacon = self.beacon_mut(id).ok_or(Error::UnknownBeacon(id))?;
        beacon.last_mined = Some(now);
        Ok(())
    }

    /// Whether the beacon was mined less than `cooldown` ago.
    pub fn is_mining_cooldown(&self, id: BeaconId, now: u64, cooldown: u64) -> Result<bool, Error> {
        let beacon = self.live(id)?;
        Ok(beacon
            .last_mined()
            .is_some_and(|at| now.saturating_sub(at) < cooldown))
    }

    /// Acknowledge a capture. Returns whether the flag was set.
    pub fn clear_recent_capture(&mut self, id: BeaconId) -> Result<bool, Error> {
        self.ensure_writable()?;
        let beacon = self.beacon_mut(id).ok_or(Error::UnknownBeacon(id))?;
        let was = beacon.is_recently_captured();
        beacon.flags.remove(BeaconFlags::RECENTLY_CAPTURED);
        Ok(was)
    }

    /// Bind an item map id to a beacon. Returns the previous binding.
    pub fn bind_map(&mut self, map_id: u32, id: BeaconId) -> Result<Option<BeaconId>, Error> {
        self.ensure_writable()?;
        self.live(id)?;
        Ok(self.by_map.insert(map_id, id))
    }

    /// The beacon a map id is bound to.
    pub fn beacon_for_map(&self, map_id: u32) -> Option<&Beacon> {
        self.by_map.get(&map_id).and_then(|&id| self.beacon(id))
    }

    // --- fields ---

    /// Register a field directly, independent of links.
    ///
    /// Every vertex must hold a beacon owned by `team`. Returns `Ok(false)`
    /// if an equal field (same vertices, any order) is already registered.
    ///
    /// No links are created. Unless its corners are linked later, the field
    /// only goes away through [`change_owner`](Self::change_owner),
    /// [`destroy_beacon`](Self::destroy_beacon) or
    /// [`replace_triangles`](Self::replace_triangles). A snapshot of it
    /// reloads with its three edges linked.
    pub fn add_triangle(
        &mut self,
        p1: Position,
        p2: Position,
        p3: Position,
        team: TeamId,
    ) -> Result<bool, Error> {
        self.ensure_writable()?;
        let field = self.validated_field([p1, p2, p3], team)?;
        if self.fields.contains(&field) {
            return Ok(false);
        }
        self.fields.push(field);
        debug!(vertices = ?field.vertices(), team = ?team, "field added");
        Ok(true)
    }

    /// Live fields, oldest first.
    pub fn triangles(&self) -> &[TriangleField] {
        &self.fields
    }

    /// Fields held by `team`.
    pub fn team_triangles(&self, team: TeamId) -> impl Iterator<Item = &TriangleField> + '_ {
        self.fields.iter().filter(move |f| f.owner() == Some(team))
    }

    /// Replace every field at once.
    ///
    /// All entries are validated as in [`add_triangle`](Self::add_triangle)
    /// before anything changes; on error the old fields stay. Duplicates
    /// collapse. Returns the number of fields now registered.
    pub fn replace_triangles<I>(&mut self, triangles: I) -> Result<usize, Error>
    where
        I: IntoIterator<Item = ([Position; 3], TeamId)>,
    {
        self.ensure_writable()?;
        let mut fields: Vec<TriangleField> = Vec::new();
        for (vertices, team) in triangles {
            let field = self.validated_field(vertices, team)?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        debug!(
            before = self.fields.len(),
            after = fields.len(),
            "fields replaced"
        );
        self.fields = fields;
        Ok(self.fields.len())
    }

    /// Area covered by all fields, overlaps counted once.
    pub fn total_area(&self) -> f64 {
        total_area(&self.fields)
    }

    /// Area covered by `team`'s fields, overlaps counted once.
    pub fn score_for_team(&self, team: TeamId) -> f64 {
        score_for_team(&self.fields, team)
    }

    // --- internals ---

    /// Look up a live beacon.
    pub fn beacon(&self, id: BeaconId) -> Option<&Beacon> {
        self.beacons
            .get(id.idx())?
            .as_ref()
            .filter(|b| b.id() == id)
    }

    /// Live beacons in slot order.
    pub fn beacons(&self) -> impl Iterator<Item = &Beacon> + '_ {
        self.beacons.iter().flatten()
    }

    pub(crate) fn beacon_mut(&mut self, id: BeaconId) -> Option<&mut Beacon> {
        self.beacons
            .get_mut(id.idx())?
            .as_mut()
            .filter(|b| b.id() == id)
    }

    pub(crate) fn live(&self, id: BeaconId) -> Result<&Beacon, Error> {
        self.beacon(id).ok_or(Error::UnknownBeacon(id))
    }

    pub(crate) fn ensure_writable(&self) -> Result<(), Error> {
        if self.poisoned {
            Err(Error::Poisoned)
        } else {
            Ok(())
        }
    }

    /// Mark the registry unusable and wrap the failure.
    pub(crate) fn poison(&mut self, err: IntegrityError) -> Error {
        error!(error = %err, "registry poisoned");
        self.poisoned = true;
        Error::Integrity(err)
    }

    pub(crate) fn tick(&mut self) -> crate::link::LinkStamp {
        self.clock += 1;
        crate::link::LinkStamp(self.clock)
    }

    pub(crate) fn insert_beacon(
        &mut self,
        position: Position,
        altitude: i32,
        owner: Option<TeamId>,
        flags: BeaconFlags,
    ) -> Result<BeaconId, Error> {
        if let Some(cell) = footprint(position)
            .into_iter()
            .find(|c| self.by_position.contains_key(c) || self.by_neighbor.contains_key(c))
        {
            return Err(Error::Occupied(cell));
        }
        let id = self.allocate();
        let key = self.spatial.insert(footprint_bounds(position), id);
        self.beacons[id.idx()] = Some(Beacon::new(id, position, altitude, owner, flags, key));
        self.by_position.insert(position, id);
        for cell in neighborhood(position) {
            self.by_neighbor.insert(cell, id);
        }
        debug!(
            beacon = ?id,
            position = %position,
            owner = ?owner,
            corner = flags.contains(BeaconFlags::CORNER),
            "beacon created"
        );
        Ok(id)
    }

    fn allocate(&mut self) -> BeaconId {
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx] + 1;
            self.generations[idx] = generation;
            BeaconId::new(idx, generation)
        } else {
            self.beacons.push(None);
            self.generations.push(1);
            BeaconId::new(self.beacons.len() - 1, 1)
        }
    }

    /// Return a vacated slot to the free list, or retire it for good once
    /// its generation cannot advance.
    fn release(&mut self, idx: usize) {
        if self.generations[idx] == u32::MAX {
            trace!(slot = idx, "slot retired");
            self.retired += 1;
        } else {
            self.free_list.push(idx);
        }
    }

    /// Remove and return every field matching `pred`.
    pub(crate) fn drain_fields(
        &mut self,
        mut pred: impl FnMut(&TriangleField) -> bool,
    ) -> Vec<TriangleField> {
        let mut removed = Vec::new();
        self.fields.retain(|f| {
            if pred(f) {
                removed.push(*f);
                false
            } else {
                true
            }
        });
        removed
    }

    pub(crate) fn validated_field(
        &self,
        vertices: [Position; 3],
        team: TeamId,
    ) -> Result<TriangleField, Error> {
        self.teams.check(team)?;
        for vertex in vertices {
            let beacon = self
                .beacon_at(vertex)
                .ok_or(Error::InvalidVertex(vertex))?;
            if beacon.owner() != Some(team) {
                return Err(Error::MixedOwnership {
                    expected: team,
                    vertex,
                    found: beacon.owner(),
                });
            }
        }
        let [a, b, c] = vertices;
        Ok(TriangleField::new(a, b, c, Some(team)))
    }

    pub(crate) fn spatial(&self) -> &Index<BeaconId> {
        &self.spatial
    }
}

/// Grid bounds of a beacon's footprint.
pub(crate) fn footprint_bounds(position: Position) -> Aabb2D<i64> {
    Aabb2D::around(i64::from(position.x), i64::from(position.z), 1)
}
