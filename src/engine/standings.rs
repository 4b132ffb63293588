use std::collections::HashSet;

use tracing::debug;

use super::tiebreak::{self, HeadToHead};
use crate::error::{EngineError, Result};
use crate::tournament::models::*;

/// Aggregate one group's results into per-team records.
///
/// `teams` must be the four teams drawn into `group`; `results` holds the
/// group's played matches (0–6). Records come back in `teams` order with
/// rank 0; see [`rank_group`] for ordering.
pub fn calculate_standings(
    group: char,
    teams: &[Team],
    results: &[MatchResult],
) -> Result<Vec<GroupStanding>> {
    if !is_group_letter(group) {
        return Err(EngineError::InvalidGroup(group));
    }
    if teams.len() != TEAMS_PER_GROUP {
        return Err(EngineError::InvalidGroupSize {
            group,
            found: teams.len(),
            expected: TEAMS_PER_GROUP,
        });
    }
    if let Some(team) = teams.iter().find(|t| t.group != group) {
        return Err(EngineError::TeamNotInGroup {
            team: team.name.clone(),
            expected: group,
            found: team.group,
        });
    }

    let mut standings: Vec<GroupStanding> = teams.iter().map(GroupStanding::new).collect();
    let mut fixtures_seen = HashSet::new();

    for result in results {
        validate_result(group, &standings, result)?;
        let pair = (
            result.home_team.min(result.away_team),
            result.home_team.max(result.away_team),
        );
        if !fixtures_seen.insert(pair) {
            return Err(EngineError::DuplicateFixture(pair.0, pair.1));
        }

        for standing in standings.iter_mut() {
            let Some((scored, conceded)) = result.score_for(standing.team_id) else {
                continue;
            };
            let cards = if standing.team_id == result.home_team {
                result.home_cards
            } else {
                result.away_cards
            };
            apply_result(standing, scored, conceded, cards.unwrap_or_default());
        }
    }

    for s in standings.iter_mut() {
        s.goal_difference = s.goals_for as i32 - s.goals_against as i32;
    }
    Ok(standings)
}

fn validate_result(group: char, standings: &[GroupStanding], result: &MatchResult) -> Result<()> {
    let tagged = result
        .group
        .ok_or_else(|| EngineError::NotAGroupMatch(result.label()))?;
    if tagged != group {
        return Err(EngineError::GroupMismatch {
            match_label: result.label(),
            expected: group,
            found: tagged,
        });
    }
    if result.home_team == result.away_team {
        return Err(EngineError::SelfMatch(result.label()));
    }
    for team in [result.home_team, result.away_team] {
        if !standings.iter().any(|s| s.team_id == team) {
            return Err(EngineError::UnknownTeam {
                match_label: result.label(),
                team,
                group,
            });
        }
    }
    Ok(())
}

fn apply_result(standing: &mut GroupStanding, scored: u32, conceded: u32, cards: CardCounts) {
    standing.played += 1;
    standing.goals_for += scored;
    standing.goals_against += conceded;
    standing.fair_play_points += cards.fair_play_points();
    match scored.cmp(&conceded) {
        std::cmp::Ordering::Greater => {
            standing.won += 1;
            standing.points += 3;
        }
        std::cmp::Ordering::Equal => {
            standing.drawn += 1;
            standing.points += 1;
        }
        std::cmp::Ordering::Less => standing.lost += 1,
    }
}

/// Order a group's standings with the tie-break cascade and assign ranks 1–4.
pub fn rank_group(standings: Vec<GroupStanding>, results: &[MatchResult]) -> Vec<GroupStanding> {
    let mut ranked = tiebreak::rank(standings, &HeadToHead::new(results));
    for (i, s) in ranked.iter_mut().enumerate() {
        s.rank = (i + 1) as u8;
    }
    ranked
}

/// Standings, ranking and completeness for one group.
pub fn group_table(group: char, teams: &[Team], results: &[MatchResult]) -> Result<GroupTable> {
    let standings = calculate_standings(group, teams, results)?;
    let standings = rank_group(standings, results);
    let complete = results.len() == MATCHES_PER_GROUP;
    debug!(
        "Group {}: {}/{} matches played, leader {}",
        group,
        results.len(),
        MATCHES_PER_GROUP,
        standings
            .first()
            .map(|s| s.team_name.as_str())
            .unwrap_or("-")
    );
    Ok(GroupTable {
        group,
        standings,
        matches_played: results.len(),
        complete,
    })
}
