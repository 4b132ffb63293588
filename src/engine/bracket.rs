//! Knockout bracket resolution.
//!
//! Fills each [`BracketSlot`] side with a concrete team where its
//! prerequisites are decided, and leaves the rest as labelled placeholders.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::tournament::models::*;
use crate::tournament::Placeholder;

/// Decided state the resolver reads from
#[derive(Debug, Clone, Copy)]
pub struct BracketInputs<'a> {
    pub group_tables: &'a [GroupTable],
    /// Only a non-provisional ranking fills third-place slots
    pub third_place: Option<&'a ThirdPlaceRanking>,
    /// Results with no group and a match number
    pub knockout_results: &'a [MatchResult],
}

/// Side of a fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Side {
    Home,
    Away,
}

struct ThirdSlot<'s> {
    match_number: u32,
    side: Side,
    placeholder: &'s Placeholder,
    groups: &'s [char],
}

/// Resolve every slot of `slots`, passing venue, kickoff and numbering through.
///
/// Fixtures are resolved in match-number order so a knockout result can only
/// feed later rounds once its own fixture is decided. Unresolvable sides are
/// returned with `team: None`; only broken configuration or inconsistent
/// results are errors.
pub fn resolve_bracket(inputs: &BracketInputs<'_>, slots: &[BracketSlot]) -> Result<Vec<ResolvedMatch>> {
    let tables: HashMap<char, &GroupTable> = inputs.group_tables.iter().map(|t| (t.group, t)).collect();

    let mut numbers = HashSet::new();
    for slot in slots {
        if !numbers.insert(slot.match_number) {
            return Err(EngineError::DuplicateBracketSlot(slot.match_number));
        }
        for placeholder in [&slot.home, &slot.away] {
            if let Some(group) = placeholder.groups().into_iter().find(|g| !tables.contains_key(g)) {
                return Err(EngineError::UnknownGroupInBracket {
                    match_number: slot.match_number,
                    label: placeholder.to_string(),
                    group,
                });
            }
        }
    }
    validate_knockout_results(inputs.knockout_results, &numbers)?;

    let thirds = match inputs.third_place {
        Some(ranking) if !ranking.provisional => allocate_third_places(slots, ranking)?,
        _ => HashMap::new(),
    };

    let mut by_number: Vec<&BracketSlot> = slots.iter().collect();
    by_number.sort_by_key(|slot| slot.match_number);

    let mut decided: HashMap<u32, ResolvedMatch> = HashMap::with_capacity(slots.len());
    for slot in by_number {
        let home = resolve_side(inputs, &tables, &thirds, &decided, slot, Side::Home)?;
        let away = resolve_side(inputs, &tables, &thirds, &decided, slot, Side::Away)?;
        decided.insert(
            slot.match_number,
            ResolvedMatch {
                match_number: slot.match_number,
                round: slot.round,
                venue: slot.venue.clone(),
                kickoff_at: slot.kickoff_at,
                home,
                away,
            },
        );
    }

    let resolved: Vec<ResolvedMatch> = slots
        .iter()
        .filter_map(|slot| decided.remove(&slot.match_number))
        .collect();

    info!(
        "Resolved {}/{} knockout fixtures",
        resolved.iter().filter(|m| m.is_resolved()).count(),
        resolved.len()
    );
    Ok(resolved)
}

/// One result per match, and only for matches in the slot table.
fn validate_knockout_results(results: &[MatchResult], numbers: &HashSet<u32>) -> Result<()> {
    let mut reported = HashSet::new();
    for result in results {
        let match_number = result
            .match_number
            .ok_or_else(|| EngineError::UnnumberedKnockout(result.label()))?;
        if !numbers.contains(&match_number) {
            return Err(EngineError::UnknownKnockoutMatch(match_number));
        }
        if !reported.insert(match_number) {
            return Err(EngineError::DuplicateKnockoutResult(match_number));
        }
    }
    Ok(())
}

fn resolve_side(
    inputs: &BracketInputs<'_>,
    tables: &HashMap<char, &GroupTable>,
    thirds: &HashMap<(u32, Side), TeamRef>,
    decided: &HashMap<u32, ResolvedMatch>,
    slot: &BracketSlot,
    side: Side,
) -> Result<SlotResolution> {
    let placeholder = match side {
        Side::Home => &slot.home,
        Side::Away => &slot.away,
    };

    let team = match placeholder {
        Placeholder::GroupWinner(g) => tables
            .get(g)
            .filter(|t| t.complete)
            .and_then(|t| t.winner())
            .map(GroupStanding::team_ref),
        Placeholder::GroupRunnerUp(g) => tables
            .get(g)
            .filter(|t| t.complete)
            .and_then(|t| t.runner_up())
            .map(GroupStanding::team_ref),
        Placeholder::BestThird(_) => thirds.get(&(slot.match_number, side)).cloned(),
        Placeholder::MatchWinner(n) => knockout_team(inputs, decided, *n, MatchResult::winner)?,
        Placeholder::MatchLoser(n) => knockout_team(inputs, decided, *n, MatchResult::loser)?,
    };

    Ok(match team {
        Some(team) => SlotResolution::resolved(placeholder, team),
        None => {
            debug!("Match {}: '{}' not yet decided", slot.match_number, placeholder);
            SlotResolution::unresolved(placeholder)
        }
    })
}

/// Winner or loser of `match_number`, once that fixture's sides are known and
/// its result names exactly those two teams.
fn knockout_team(
    inputs: &BracketInputs<'_>,
    decided: &HashMap<u32, ResolvedMatch>,
    match_number: u32,
    pick: fn(&MatchResult) -> Option<TeamId>,
) -> Result<Option<TeamRef>> {
    let Some(result) = inputs
        .knockout_results
        .iter()
        .find(|r| r.match_number == Some(match_number))
    else {
        return Ok(None);
    };
    let Some((home, away)) = decided
        .get(&match_number)
        .and_then(|m| Some((m.home.team.as_ref()?, m.away.team.as_ref()?)))
    else {
        debug!("Match {}: result held until the fixture is decided", match_number);
        return Ok(None);
    };

    let mut drawn = [home.id, away.id];
    let mut played = [result.home_team, result.away_team];
    drawn.sort_unstable();
    played.sort_unstable();
    if drawn != played {
        return Err(EngineError::KnockoutTeamMismatch {
            match_number,
            expected: (home.id, away.id),
            found: (result.home_team, result.away_team),
        });
    }

    let id = pick(result).ok_or(EngineError::UndecidedKnockout(match_number))?;
    Ok([home, away].into_iter().find(|t| t.id == id).cloned())
}

/// Assign qualified third-placed teams to the `3rd Place` sides of `slots`.
///
/// Sides are filled in slot order, each taking the best-ranked unassigned
/// qualifier from its groups. If that would leave a later side with no
/// eligible team, earlier choices are revisited; the first complete
/// assignment in this order is returned.
pub(crate) fn allocate_third_places(
    slots: &[BracketSlot],
    ranking: &ThirdPlaceRanking,
) -> Result<HashMap<(u32, Side), TeamRef>> {
    let mut sides = Vec::new();
    for slot in slots {
        for (side, placeholder) in [(Side::Home, &slot.home), (Side::Away, &slot.away)] {
            if let Placeholder::BestThird(groups) = placeholder {
                sides.push(ThirdSlot {
                    match_number: slot.match_number,
                    side,
                    placeholder,
                    groups,
                });
            }
        }
    }

    let pool: Vec<&ThirdPlaceCandidate> = ranking.qualifiers().collect();
    let mut taken = vec![false; pool.len()];
    let mut picks = Vec::with_capacity(sides.len());
    let mut stuck = 0;

    if !assign(&sides, &pool, &mut taken, &mut picks, &mut stuck) {
        let side = &sides[stuck];
        return Err(EngineError::NoEligibleThirdPlace {
            match_number: side.match_number,
            label: side.placeholder.to_string(),
        });
    }

    Ok(sides
        .iter()
        .zip(picks)
        .map(|(side, i)| ((side.match_number, side.side), pool[i].standing.team_ref()))
        .collect())
}

fn assign(
    sides: &[ThirdSlot<'_>],
    pool: &[&ThirdPlaceCandidate],
    taken: &mut [bool],
    picks: &mut Vec<usize>,
    stuck: &mut usize,
) -> bool {
    let depth = picks.len();
    let Some(side) = sides.get(depth) else {
        return true;
    };
    for (i, candidate) in pool.iter().enumerate() {
        if taken[i] || !side.groups.contains(&candidate.group) {
            continue;
        }
        taken[i] = true;
        picks.push(i);
        if assign(sides, pool, taken, picks, stuck) {
            return true;
        }
        picks.pop();
        taken[i] = false;
    }
    *stuck = (*stuck).max(depth);
    false
}
