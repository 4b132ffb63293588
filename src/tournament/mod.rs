pub mod models;
pub mod placeholder;

pub use placeholder::{parse_fixture_label, Placeholder};

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{EngineError, Result};
use models::*;

/// Everything one pipeline run needs: the drawn teams, every result played
/// so far (group and knockout), and the organisers' knockout slot table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub teams: Vec<Team>,
    #[serde(default)]
    pub results: Vec<MatchResult>,
    #[serde(default)]
    pub bracket: Vec<BracketSlot>,
}

impl Tournament {
    /// Read a tournament document from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tournament file {}", path.display()))?;
        let tournament: Tournament = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse tournament file {}", path.display()))?;
        debug!(
            "Loaded {} teams, {} results, {} bracket slots from {}",
            tournament.teams.len(),
            tournament.results.len(),
            tournament.bracket.len(),
            path.display()
        );
        Ok(tournament)
    }

    /// Check the draw: twelve groups A–L of four teams, unique ids and names.
    ///
    /// Returns the teams keyed by group letter.
    pub fn groups(&self) -> Result<BTreeMap<char, Vec<Team>>> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        let mut groups: BTreeMap<char, Vec<Team>> =
            GROUP_LETTERS.iter().map(|g| (*g, Vec::new())).collect();

        for team in &self.teams {
            if !ids.insert(team.id) || !names.insert(team.name.as_str()) {
                return Err(EngineError::DuplicateTeam(team.name.clone()));
            }
            groups
                .get_mut(&team.group)
                .ok_or(EngineError::InvalidGroup(team.group))?
                .push(team.clone());
        }

        for (group, teams) in &groups {
            if teams.len() != TEAMS_PER_GROUP {
                return Err(EngineError::InvalidGroupSize {
                    group: *group,
                    found: teams.len(),
                    expected: TEAMS_PER_GROUP,
                });
            }
        }
        Ok(groups)
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Hex SHA-256 of the canonical JSON encoding; a cache key for callers.
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_full_draw_is_valid() {
        let t = fixtures::tournament();
        let groups = t.groups().unwrap();
        assert_eq!(groups.len(), 12);
        assert!(groups.values().all(|teams| teams.len() == 4));
    }

    #[test]
    fn test_rejects_short_group() {
        let mut t = fixtures::tournament();
        t.teams.retain(|team| team.name != "Team B4");
        assert_eq!(
            t.groups(),
            Err(EngineError::InvalidGroupSize {
                group: 'B',
                found: 3,
                expected: 4
            })
        );
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let mut t = fixtures::tournament();
        t.teams[1].name = t.teams[0].name.clone();
        assert!(matches!(t.groups(), Err(EngineError::DuplicateTeam(_))));
    }

    #[test]
    fn test_rejects_unknown_group_letter() {
        let mut t = fixtures::tournament();
        t.teams[0].group = 'M';
        assert_eq!(t.groups(), Err(EngineError::InvalidGroup('M')));
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let t = fixtures::tournament();
        let fingerprint = t.fingerprint().unwrap();
        assert_eq!(fingerprint, t.clone().fingerprint().unwrap());
        assert_eq!(fingerprint.len(), 64);
        assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        let mut changed = t.clone();
        changed.results[0].home_goals += 1;
        assert_ne!(fingerprint, changed.fingerprint().unwrap());
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let t = fixtures::tournament();
        let path = std::env::temp_dir().join(format!("wc-engine-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&t).unwrap()).unwrap();
        let loaded = Tournament::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, t);
    }
}
