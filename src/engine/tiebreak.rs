//! Tie-break cascade for group and third-place rankings.
//!
//! Criteria, each applied only to the teams still level after the previous one:
//!   1. points
//!   2. goal difference
//!   3. goals scored
//!   4. head-to-head mini-league among the level teams (points, GD, goals)
//!   5. fair-play points (closest to zero first)
//!   6. drawing of lots: SHA-256 of the team name, lowest value first
//!
//! A level mini-league falls straight through to fair play; head-to-head is
//! not re-applied to a residual subset.

use std::cmp::Ordering;
use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::tournament::models::{GroupStanding, MatchResult, TeamId};

/// Anything the cascade can order.
pub trait Rankable {
    fn team_id(&self) -> TeamId;
    /// Stable natural key fed to the drawing of lots
    fn identity(&self) -> &str;
    fn points(&self) -> u32;
    fn goal_difference(&self) -> i32;
    fn goals_for(&self) -> u32;
    fn fair_play_points(&self) -> i32;
}

impl Rankable for GroupStanding {
    fn team_id(&self) -> TeamId {
        self.team_id
    }
    fn identity(&self) -> &str {
        &self.team_name
    }
    fn points(&self) -> u32 {
        self.points
    }
    fn goal_difference(&self) -> i32 {
        self.goal_difference
    }
    fn goals_for(&self) -> u32 {
        self.goals_for
    }
    fn fair_play_points(&self) -> i32 {
        self.fair_play_points
    }
}

/// A team's record in the matches played among a tied subset only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MiniRecord {
    pub points: u32,
    pub goal_difference: i32,
    pub goals_for: u32,
}

/// Results the head-to-head criterion may draw on.
#[derive(Debug, Clone, Copy)]
pub struct HeadToHead<'a> {
    results: &'a [MatchResult],
}

impl<'a> HeadToHead<'a> {
    pub fn new(results: &'a [MatchResult]) -> Self {
        HeadToHead { results }
    }

    /// No shared matches, e.g. third-placed teams from different groups.
    pub fn none() -> HeadToHead<'static> {
        HeadToHead { results: &[] }
    }

    /// Mini-league over the matches in which both sides belong to `teams`.
    pub fn mini_league(&self, teams: &[TeamId]) -> HashMap<TeamId, MiniRecord> {
        let mut table: HashMap<TeamId, MiniRecord> =
            teams.iter().map(|t| (*t, MiniRecord::default())).collect();

        for result in self.results {
            if !teams.contains(&result.home_team) || !teams.contains(&result.away_team) {
                continue;
            }
            for team in [result.home_team, result.away_team] {
                let Some((scored, conceded)) = result.score_for(team) else {
                    continue;
                };
                let record = table.entry(team).or_default();
                record.goals_for += scored;
                record.goal_difference += scored as i32 - conceded as i32;
                record.points += match scored.cmp(&conceded) {
                    Ordering::Greater => 3,
                    Ordering::Equal => 1,
                    Ordering::Less => 0,
                };
            }
        }
        table
    }
}

/// Drawing-of-lots value: first 8 bytes of SHA-256(identity), big-endian.
///
/// Independent of process, platform and run.
pub fn lot_value(identity: &str) -> u64 {
    let digest = Sha256::digest(identity.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Points,
    GoalDifference,
    GoalsScored,
    HeadToHead,
    FairPlay,
    DrawingOfLots,
}

/// The full cascade, in application order.
pub const CASCADE: [Criterion; 6] = [
    Criterion::Points,
    Criterion::GoalDifference,
    Criterion::GoalsScored,
    Criterion::HeadToHead,
    Criterion::FairPlay,
    Criterion::DrawingOfLots,
];

impl Criterion {
    /// `Less` means `a` ranks above `b`.
    ///
    /// `mini` is only read by [`Criterion::HeadToHead`]; teams missing from it
    /// count as having no head-to-head record.
    pub fn compare<T: Rankable>(
        self,
        a: &T,
        b: &T,
        mini: &HashMap<TeamId, MiniRecord>,
    ) -> Ordering {
        match self {
            Criterion::Points => b.points().cmp(&a.points()),
            Criterion::GoalDifference => b.goal_difference().cmp(&a.goal_difference()),
            Criterion::GoalsScored => b.goals_for().cmp(&a.goals_for()),
            Criterion::HeadToHead => {
                let ra = mini.get(&a.team_id()).copied().unwrap_or_default();
                let rb = mini.get(&b.team_id()).copied().unwrap_or_default();
                rb.points
                    .cmp(&ra.points)
                    .then_with(|| rb.goal_difference.cmp(&ra.goal_difference))
                    .then_with(|| rb.goals_for.cmp(&ra.goals_for))
            }
            Criterion::FairPlay => b.fair_play_points().cmp(&a.fair_play_points()),
            Criterion::DrawingOfLots => lot_value(a.identity()).cmp(&lot_value(b.identity())),
        }
    }
}

/// Order `entries` best first using the full cascade.
///
/// The result is a strict total order whenever identities are distinct, and
/// does not depend on the input order.
pub fn rank<T: Rankable>(entries: Vec<T>, h2h: &HeadToHead<'_>) -> Vec<T> {
    rank_with(entries, &CASCADE, h2h)
}

/// Apply `criteria[0]`, then recurse into every run it leaves level.
pub fn rank_with<T: Rankable>(
    mut entries: Vec<T>,
    criteria: &[Criterion],
    h2h: &HeadToHead<'_>,
) -> Vec<T> {
    let Some((criterion, rest)) = criteria.split_first() else {
        return entries;
    };
    if entries.len() < 2 {
        return entries;
    }

    let mini = if *criterion == Criterion::HeadToHead {
        let ids: Vec<TeamId> = entries.iter().map(|e| e.team_id()).collect();
        h2h.mini_league(&ids)
    } else {
        HashMap::new()
    };

    entries.sort_by(|a, b| criterion.compare(a, b, &mini));

    let mut ranked = Vec::with_capacity(entries.len());
    let mut level: Vec<T> = Vec::new();
    for entry in entries {
        if let Some(last) = level.last() {
            if criterion.compare(last, &entry, &mini) != Ordering::Equal {
                ranked.extend(rank_with(std::mem::take(&mut level), rest, h2h));
            }
        }
        level.push(entry);
    }
    ranked.extend(rank_with(level, rest, h2h));
    ranked
}
