use std::collections::HashSet;

use tracing::debug;

use super::tiebreak::{self, HeadToHead};
use crate::error::{EngineError, Result};
use crate::tournament::models::*;

/// Rank the twelve third-placed teams as one pool and mark the best eight.
///
/// Third-placed teams never met each other, so head-to-head yields nothing
/// and ties go straight to fair play and then the drawing of lots.
pub fn rank_third_placed(
    candidates: Vec<GroupStanding>,
    provisional: bool,
) -> Result<ThirdPlaceRanking> {
    if candidates.len() != GROUP_LETTERS.len() {
        return Err(EngineError::ThirdPlacePoolSize(candidates.len()));
    }
    let mut groups = HashSet::new();
    for c in &candidates {
        if !is_group_letter(c.group) {
            return Err(EngineError::InvalidGroup(c.group));
        }
        if c.rank != 3 {
            return Err(EngineError::NotThirdPlaced {
                team: c.team_name.clone(),
                group: c.group,
                rank: c.rank,
            });
        }
        if !groups.insert(c.group) {
            return Err(EngineError::DuplicateThirdPlaceGroup(c.group));
        }
    }

    let ranked = tiebreak::rank(candidates, &HeadToHead::none());
    let candidates: Vec<ThirdPlaceCandidate> = ranked
        .into_iter()
        .enumerate()
        .map(|(i, standing)| ThirdPlaceCandidate {
            group: standing.group,
            position: (i + 1) as u8,
            qualified: i < THIRD_PLACE_QUALIFIERS,
            standing,
        })
        .collect();

    let ranking = ThirdPlaceRanking {
        candidates,
        provisional,
    };
    debug!(
        "Third-place qualifiers {} ({})",
        ranking.combination(),
        if provisional { "provisional" } else { "final" }
    );
    Ok(ranking)
}

/// Pull the rank-3 team out of every group table and rank them.
///
/// The ranking is provisional while any group is incomplete.
pub fn rank_third_placed_from_tables(tables: &[GroupTable]) -> Result<ThirdPlaceRanking> {
    let provisional = tables.iter().any(|t| !t.complete);
    let candidates = tables.iter().filter_map(|t| t.third().cloned()).collect();
    rank_third_placed(candidates, provisional)
}
