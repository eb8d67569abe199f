// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistence records.
//!
//! A [`Snapshot`] is the registry flattened to plain records keyed by
//! position and team name, ready for any serde format. Loading rebuilds the
//! indices and adjacency directly; it does not replay link history and never
//! forms fields on its own.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use territory_field::{Position, TeamId};
use tracing::{debug, warn};

use crate::beacon::{BeaconFlags, BeaconId};
use crate::config::RegistryConfig;
use crate::error::Error;
use crate::registry::Registry;

/// A persisted beacon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconRecord {
    /// Centre of the footprint.
    pub position: Position,
    /// Placement altitude.
    #[serde(default)]
    pub altitude: i32,
    /// Owning team's name; absent for unowned beacons.
    #[serde(default)]
    pub owner: Option<String>,
    /// System-placed corner beacon.
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub corner: bool,
}

/// A persisted link, by the positions of its ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Both ends.
    pub ends: [Position; 2],
    /// Team the link was made under; absent when it was made by an unowned
    /// beacon.
    #[serde(default)]
    pub owner: Option<String>,
}

/// A persisted field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleRecord {
    /// The three corners.
    pub vertices: [Position; 3],
    /// Owning team's name.
    pub owner: String,
}

/// Everything needed to rebuild a [`Registry`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All beacons.
    pub beacons: Vec<BeaconRecord>,
    /// Links, oldest first. Field edges are restored even when absent here.
    #[serde(default)]
    pub links: Vec<LinkRecord>,
    /// All fields.
    #[serde(default)]
    pub triangles: Vec<TriangleRecord>,
}

impl Registry {
    /// Rebuild a registry from a snapshot.
    ///
    /// Records that cannot be applied are skipped with a warning: overlapping
    /// beacons, links or fields naming empty positions, mixed-owner fields,
    /// and links past the cap. Links come first, in record order. Each field
    /// then links its missing edges; a field whose edges cannot all be linked
    /// is skipped, so every restored field has its three links.
    pub fn from_snapshot(snapshot: &Snapshot, config: RegistryConfig) -> Result<Self, Error> {
        let mut reg = Self::with_config(config);
        for record in &snapshot.beacons {
            let owner = match &record.owner {
                Some(name) => Some(reg.team(name)?),
                None => None,
            };
            let flags = if record.corner {
                BeaconFlags::CORNER
            } else {
                BeaconFlags::empty()
            };
            if let Err(err) = reg.insert_beacon(record.position, record.altitude, owner, flags) {
                warn!(position = %record.position, error = %err, "skipping beacon record");
            }
        }
        for record in &snapshot.links {
            let owner = match &record.owner {
                Some(name) => Some(reg.team(name)?),
                None => None,
            };
            let [p, q] = record.ends;
            reg.restore_link(p, q, owner);
        }
        let mut restored = Vec::with_capacity(snapshot.triangles.len());
        for record in &snapshot.triangles {
            let team = reg.team(&record.owner)?;
            match reg.validated_field(record.vertices, team) {
                Ok(field) if restored.contains(&field) => {}
                Ok(field) => {
                    if reg.restore_field_edges(record.vertices, team) {
                        restored.push(field);
                    } else {
                        warn!(
                            vertices = ?record.vertices,
                            "skipping field whose edges exceed the link cap"
                        );
                    }
                }
                Err(err) => {
                    warn!(vertices = ?record.vertices, error = %err, "skipping field record");
                }
            }
        }
        reg.fields = restored;
        debug!(
            beacons = reg.len(),
            fields = reg.fields.len(),
            "registry restored"
        );
        Ok(reg)
    }

    /// Flatten the registry into records.
    ///
    /// Links are written oldest first. Fields with no owner, which only
    /// arise from foreign team ids, are left out.
    pub fn to_snapshot(&self) -> Snapshot {
        let beacons = self
            .beacons()
            .map(|b| BeaconRecord {
                position: b.position(),
                altitude: b.altitude(),
                owner: b.owner().and_then(|t| self.owned_name(t)),
                corner: b.is_corner(),
            })
            .collect();
        let mut links: Vec<_> = self.links().collect();
        links.sort_by_key(|l| l.created());
        let links = links
            .into_iter()
            .map(|l| LinkRecord {
                ends: l.positions(),
                owner: l.owner().and_then(|t| self.owned_name(t)),
            })
            .collect();
        let triangles = self
            .triangles()
            .iter()
            .filter_map(|f| {
                Some(TriangleRecord {
                    vertices: f.vertices(),
                    owner: self.owned_name(f.owner()?)?,
                })
            })
            .collect();
        Snapshot {
            beacons,
            links,
            triangles,
        }
    }

    fn owned_name(&self, team: TeamId) -> Option<String> {
        self.team_name(team).map(ToString::to_string)
    }

    /// Link the beacons at `p` and `q` under `owner` without forming fields.
    fn restore_link(&mut self, p: Position, q: Position, owner: Option<TeamId>) {
        let (Some(a), Some(b)) = (self.id_at(p), self.id_at(q)) else {
            warn!(from = %p, to = %q, "skipping link with no beacon at an end");
            return;
        };
        let (Some(beacon_a), Some(beacon_b)) = (self.beacon(a), self.beacon(b)) else {
            return;
        };
        if a == b || beacon_a.is_linked_to(b) {
            return;
        }
        let cap = self.config().link_cap();
        if beacon_a.degree() >= cap || beacon_b.degree() >= cap {
            warn!(from = %p, to = %q, "skipping link past the cap");
            return;
        }
        self.attach(a, b, owner);
    }

    /// Link every missing edge of a field, or nothing if any corner would
    /// pass the cap. Returns whether all three edges are now linked.
    fn restore_field_edges(&mut self, vertices: [Position; 3], team: TeamId) -> bool {
        let [Some(a), Some(b), Some(c)] = vertices.map(|v| self.id_at(v)) else {
            return false;
        };
        let mut missing: SmallVec<[(BeaconId, BeaconId); 3]> = SmallVec::new();
        for (x, y) in [(a, b), (b, c), (c, a)] {
            let pair = (x.min(y), x.max(y));
            if x == y || missing.contains(&pair) {
                continue;
            }
            let Some(beacon) = self.beacon(x) else {
                return false;
            };
            if !beacon.is_linked_to(y) {
                missing.push(pair);
            }
        }
        let cap = self.config().link_cap();
        let fits = [a, b, c].iter().all(|&id| {
            let extra = missing.iter().filter(|&&(x, y)| x == id || y == id).count();
            self.beacon(id).is_some_and(|beacon| beacon.degree() + extra <= cap)
        });
        if !fits {
            return false;
        }
        for (x, y) in missing {
            self.attach(x, y, Some(team));
        }
        true
    }

    fn id_at(&self, position: Position) -> Option<BeaconId> {
        self.beacon_at(position).map(|b| b.id())
    }
}
