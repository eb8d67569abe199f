// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Team roster: interns team names to compact [`TeamId`]s.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use territory_field::TeamId;

use crate::error::Error;

#[derive(Clone, Debug, Default)]
pub(crate) struct Roster {
    names: Vec<String>,
    by_name: HashMap<String, TeamId>,
}

impl Roster {
    /// The id for `name`, registering it on first sight.
    pub(crate) fn intern(&mut self, name: &str) -> Result<TeamId, Error> {
        if let Some(&team) = self.by_name.get(name) {
            return Ok(team);
        }
        let raw = u16::try_from(self.names.len()).map_err(|_| Error::RosterFull)?;
        let team = TeamId::new(raw);
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), team);
        Ok(team)
    }

    pub(crate) fn get(&self, name: &str) -> Option<TeamId> {
        self.by_name.get(name).copied()
    }

    pub(crate) fn name(&self, team: TeamId) -> Option<&str> {
        self.names.get(team.index()).map(String::as_str)
    }

    pub(crate) fn check(&self, team: TeamId) -> Result<(), Error> {
        if team.index() < self.names.len() {
            Ok(())
        } else {
            Err(Error::UnnamedTeam(team))
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (TeamId, &str)> + '_ {
        self.names.iter().enumerate().map(|(i, name)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Interning caps the roster at u16::MAX + 1 names."
            )]
            (TeamId::new(i as u16), name.as_str())
        })
    }
}
