use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::bracket::{resolve_bracket, BracketInputs};
use super::standings::group_table;
use super::third_place::rank_third_placed_from_tables;
use crate::error::{EngineError, Result};
use crate::tournament::models::*;
use crate::tournament::Tournament;

/// Computed state of the tournament for one input snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub groups: BTreeMap<char, GroupTable>,
    pub third_place: ThirdPlaceRanking,
    pub bracket: Vec<ResolvedMatch>,
    pub groups_complete: usize,
}

impl TournamentSnapshot {
    pub fn is_group_stage_complete(&self) -> bool {
        self.groups_complete == self.groups.len()
    }
}

/// Run the whole pipeline: group tables, third-place ranking, bracket.
///
/// Pure: the same `tournament` always yields the same snapshot.
pub fn compute_snapshot(tournament: &Tournament) -> Result<TournamentSnapshot> {
    let draw = tournament.groups()?;

    let mut group_results: BTreeMap<char, Vec<MatchResult>> = BTreeMap::new();
    let mut knockout_results = Vec::new();
    for result in &tournament.results {
        match result.group {
            Some(group) => group_results.entry(group).or_default().push(result.clone()),
            None if result.match_number.is_some() => knockout_results.push(result.clone()),
            None => return Err(EngineError::UnnumberedKnockout(result.label())),
        }
    }
    if let Some(group) = group_results.keys().find(|g| !draw.contains_key(*g)) {
        return Err(EngineError::InvalidGroup(*group));
    }

    let mut groups = BTreeMap::new();
    for (group, teams) in &draw {
        let results = group_results.get(group).map(Vec::as_slice).unwrap_or(&[]);
        groups.insert(*group, group_table(*group, teams, results)?);
    }
    let groups_complete = groups.values().filter(|t| t.complete).count();

    let tables: Vec<GroupTable> = groups.values().cloned().collect();
    let third_place = rank_third_placed_from_tables(&tables)?;
    if third_place.provisional {
        warn!(
            "{} of {} groups still in progress; third-place slots stay pending",
            tables.len() - groups_complete,
            tables.len()
        );
    }

    let inputs = BracketInputs {
        group_tables: &tables,
        third_place: Some(&third_place),
        knockout_results: &knockout_results,
    };
    let bracket = resolve_bracket(&inputs, &tournament.bracket)?;

    info!(
        "Snapshot: {}/{} groups complete, {} knockout results, {} bracket fixtures",
        groups_complete,
        groups.len(),
        knockout_results.len(),
        bracket.len()
    );

    Ok(TournamentSnapshot {
        groups,
        third_place,
        bracket,
        groups_complete,
    })
}
