use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::placeholder::Placeholder;

pub type TeamId = u32;

/// Group letters of the 48-team format, in draw order.
pub const GROUP_LETTERS: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L'];
pub const TEAMS_PER_GROUP: usize = 4;
/// Single round robin among four teams.
pub const MATCHES_PER_GROUP: usize = 6;
pub const THIRD_PLACE_QUALIFIERS: usize = 8;

pub fn is_group_letter(c: char) -> bool {
    GROUP_LETTERS.contains(&c)
}

// ── Teams & results ───────────────────────────────────────────────────────────

/// A national team as drawn into its group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Display name; also the identity used for the draw of lots
    pub name: String,
    #[serde(default)]
    pub fifa_code: Option<String>,
    pub group: char,
}

/// Disciplinary cards shown to one side in one match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardCounts {
    pub yellow: u32,
    /// Second yellow in the same match (indirect red)
    pub second_yellow: u32,
    /// Direct red
    pub red: u32,
}

impl CardCounts {
    /// Fair-play deduction: yellow −1, second yellow −3, direct red −4.
    pub fn fair_play_points(&self) -> i32 {
        -(self.yellow as i32) - 3 * self.second_yellow as i32 - 4 * self.red as i32
    }
}

/// Penalty shoot-out score after a level knockout match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyShootout {
    pub home: u32,
    pub away: u32,
}

/// A played match, normalised by the data-fetch layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Tournament match number (1–104); required for knockout results
    #[serde(default)]
    pub match_number: Option<u32>,
    /// Group letter; `None` for knockout matches
    #[serde(default)]
    pub group: Option<char>,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub home_goals: u32,
    pub away_goals: u32,
    #[serde(default)]
    pub home_cards: Option<CardCounts>,
    #[serde(default)]
    pub away_cards: Option<CardCounts>,
    #[serde(default)]
    pub penalties: Option<PenaltyShootout>,
}

impl MatchResult {
    /// Short label for error messages and logs
    pub fn label(&self) -> String {
        match self.match_number {
            Some(n) => format!("#{n}"),
            None => format!("{} v {}", self.home_team, self.away_team),
        }
    }

    /// `(goals_for, goals_against)` from `team`'s perspective
    pub fn score_for(&self, team: TeamId) -> Option<(u32, u32)> {
        if team == self.home_team {
            Some((self.home_goals, self.away_goals))
        } else if team == self.away_team {
            Some((self.away_goals, self.home_goals))
        } else {
            None
        }
    }

    /// Winner on goals, then on penalties. `None` when level with no shoot-out.
    pub fn winner(&self) -> Option<TeamId> {
        let (home, away) = match self.home_goals.cmp(&self.away_goals) {
            std::cmp::Ordering::Equal => {
                let shootout = self.penalties?;
                (shootout.home, shootout.away)
            }
            _ => (self.home_goals, self.away_goals),
        };
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => Some(self.home_team),
            std::cmp::Ordering::Less => Some(self.away_team),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn loser(&self) -> Option<TeamId> {
        self.winner().map(|w| {
            if w == self.home_team {
                self.away_team
            } else {
                self.home_team
            }
        })
    }
}

// ── Standings ─────────────────────────────────────────────────────────────────

/// A team's aggregated record within its group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStanding {
    pub team_id: TeamId,
    pub team_name: String,
    pub group: char,
    /// 1–4 once ranked; 0 straight out of the standings calculator
    pub rank: u8,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    /// Always ≤ 0; closer to zero is better
    pub fair_play_points: i32,
}

impl GroupStanding {
    pub fn new(team: &Team) -> Self {
        GroupStanding {
            team_id: team.id,
            team_name: team.name.clone(),
            group: team.group,
            rank: 0,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            fair_play_points: 0,
        }
    }

    pub fn team_ref(&self) -> TeamRef {
        TeamRef {
            id: self.team_id,
            name: self.team_name.clone(),
        }
    }
}

/// Ranked standings of one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTable {
    pub group: char,
    /// Ordered by rank, 1 first
    pub standings: Vec<GroupStanding>,
    pub matches_played: usize,
    /// All six fixtures have a result
    pub complete: bool,
}

impl GroupTable {
    pub fn at_rank(&self, rank: u8) -> Option<&GroupStanding> {
        self.standings.iter().find(|s| s.rank == rank)
    }

    pub fn winner(&self) -> Option<&GroupStanding> {
        self.at_rank(1)
    }

    pub fn runner_up(&self) -> Option<&GroupStanding> {
        self.at_rank(2)
    }

    pub fn third(&self) -> Option<&GroupStanding> {
        self.at_rank(3)
    }
}

/// A third-placed team in the cross-group ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPlaceCandidate {
    pub group: char,
    /// 1–12 across all groups
    pub position: u8,
    pub qualified: bool,
    pub standing: GroupStanding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPlaceRanking {
    /// All twelve candidates, best first
    pub candidates: Vec<ThirdPlaceCandidate>,
    /// Set while at least one group is still being played
    pub provisional: bool,
}

impl ThirdPlaceRanking {
    pub fn qualifiers(&self) -> impl Iterator<Item = &ThirdPlaceCandidate> {
        self.candidates.iter().filter(|c| c.qualified)
    }

    /// Sorted letters of the qualifying groups, e.g. `"ABCDEFGH"`.
    pub fn combination(&self) -> String {
        let mut groups: Vec<char> = self.qualifiers().map(|c| c.group).collect();
        groups.sort_unstable();
        groups.into_iter().collect()
    }
}

// ── Knockout stage ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    RoundOf32,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    ThirdPlacePlayoff,
    Final,
}

/// A knockout fixture whose participants are still symbolic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlot {
    pub match_number: u32,
    pub round: Round,
    pub venue: String,
    pub kickoff_at: DateTime<Utc>,
    pub home: Placeholder,
    pub away: Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
}

/// One side of a knockout fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResolution {
    pub placeholder: Placeholder,
    /// Canonical label of `placeholder`, e.g. "Winner A" or "3rd Place C/D/E"
    pub label: String,
    /// `None` until the prerequisite groups/matches are decided
    pub team: Option<TeamRef>,
}

impl SlotResolution {
    pub fn unresolved(placeholder: &Placeholder) -> Self {
        SlotResolution {
            label: placeholder.to_string(),
            placeholder: placeholder.clone(),
            team: None,
        }
    }

    pub fn resolved(placeholder: &Placeholder, team: TeamRef) -> Self {
        SlotResolution {
            team: Some(team),
            ..Self::unresolved(placeholder)
        }
    }

    /// Team name, or "TBD — <label>"
    pub fn display_name(&self) -> String {
        match &self.team {
            Some(t) => t.name.clone(),
            None => format!("TBD — {}", self.label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMatch {
    pub match_number: u32,
    pub round: Round,
    pub venue: String,
    pub kickoff_at: DateTime<Utc>,
    pub home: SlotResolution,
    pub away: SlotResolution,
}

impl ResolvedMatch {
    pub fn is_resolved(&self) -> bool {
        self.home.team.is_some() && self.away.team.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(home_goals: u32, away_goals: u32) -> MatchResult {
        crate::fixtures::knockout(73, 1, 2, home_goals, away_goals)
    }

    #[test]
    fn test_fair_play_weights() {
        let cards = CardCounts {
            yellow: 2,
            second_yellow: 1,
            red: 1,
        };
        assert_eq!(cards.fair_play_points(), -9);
        assert_eq!(CardCounts::default().fair_play_points(), 0);
    }

    #[test]
    fn test_winner_on_goals() {
        let r = result(2, 1);
        assert_eq!(r.winner(), Some(1));
        assert_eq!(r.loser(), Some(2));
    }

    #[test]
    fn test_winner_on_penalties() {
        let mut r = result(1, 1);
        assert_eq!(r.winner(), None);
        r.penalties = Some(PenaltyShootout { home: 3, away: 4 });
        assert_eq!(r.winner(), Some(2));
        assert_eq!(r.loser(), Some(1));
    }

    #[test]
    fn test_score_for_perspective() {
        let r = result(3, 0);
        assert_eq!(r.score_for(1), Some((3, 0)));
        assert_eq!(r.score_for(2), Some((0, 3)));
        assert_eq!(r.score_for(9), None);
    }

    #[test]
    fn test_unresolved_display_name() {
        let slot = SlotResolution::unresolved(&Placeholder::GroupWinner('A'));
        assert_eq!(slot.display_name(), "TBD — Winner A");

        let third: Placeholder = "3rd Place EDC".parse().unwrap();
        let slot = SlotResolution::unresolved(&third);
        assert_eq!(slot.label, "3rd Place C/D/E");
    }
}
