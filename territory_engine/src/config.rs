// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Hard upper bound on links per beacon.
pub const MAX_LINKS: usize = 8;

/// Tunables for a [`Registry`](crate::Registry).
///
/// Missing keys take their default when deserialized, so a host can load a
/// partial config file.
///
/// ```
/// use territory_engine::RegistryConfig;
///
/// let config = RegistryConfig::default().with_max_links(4).with_index_cell_size(32);
/// assert_eq!(config.link_cap(), 4);
/// assert_eq!(RegistryConfig::default().with_max_links(20).link_cap(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Links allowed per beacon. Values above [`MAX_LINKS`] are clamped.
    pub max_links: usize,
    /// Cell size, in blocks, of the grid behind
    /// [`nearby_beacons`](crate::Registry::nearby_beacons).
    pub index_cell_size: i64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_links: MAX_LINKS,
            index_cell_size: 64,
        }
    }
}

impl RegistryConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-beacon link cap.
    pub fn with_max_links(mut self, max_links: usize) -> Self {
        self.max_links = max_links;
        self
    }

    /// Set the spatial grid cell size.
    pub fn with_index_cell_size(mut self, cell_size: i64) -> Self {
        self.index_cell_size = cell_size;
        self
    }

    /// The link cap actually enforced.
    pub fn link_cap(&self) -> usize {
        self.max_links.min(MAX_LINKS)
    }

    /// The grid cell size actually used; never below one block.
    pub fn cell_size(&self) -> i64 {
        self.index_cell_size.max(1)
    }
}
