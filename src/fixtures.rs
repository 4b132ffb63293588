//! Shared test data: a fully played 48-team group stage and the 2026
//! knockout slot table.
//!
//! In every group seed 1 beats everyone, seed 2 beats seeds 3 and 4, and
//! seed 3 beats seed 4 by `1 + index % 4` goals while collecting `index`
//! yellow cards, so the third-placed order is D H L C G K B F | J A E I.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::tournament::models::*;
use crate::tournament::{parse_fixture_label, Tournament};

pub fn team_id(group: char, seed: u32) -> TeamId {
    (group_index(group) + 1) * 10 + seed
}

fn group_index(group: char) -> u32 {
    group as u32 - 'A' as u32
}

pub fn teams() -> Vec<Team> {
    GROUP_LETTERS
        .iter()
        .flat_map(|g| {
            (1..=4).map(move |seed| Team {
                id: team_id(*g, seed),
                name: format!("Team {g}{seed}"),
                fifa_code: None,
                group: *g,
            })
        })
        .collect()
}

pub fn group_result(match_number: u32, group: char, home: u32, away: u32, score: (u32, u32)) -> MatchResult {
    MatchResult {
        match_number: Some(match_number),
        group: Some(group),
        home_team: team_id(group, home),
        away_team: team_id(group, away),
        home_goals: score.0,
        away_goals: score.1,
        home_cards: None,
        away_cards: None,
        penalties: None,
    }
}

/// Match number of the sixth fixture of `group`
pub fn last_group_match(group: char) -> u32 {
    group_index(group) * 6 + 6
}

pub fn group_results(group: char) -> Vec<MatchResult> {
    let i = group_index(group);
    let n = |k: u32| i * 6 + k;
    let mut third_vs_fourth = group_result(n(2), group, 3, 4, (1 + i % 4, 0));
    third_vs_fourth.home_cards = Some(CardCounts {
        yellow: i,
        ..Default::default()
    });
    vec![
        group_result(n(1), group, 1, 2, (1, 0)),
        third_vs_fourth,
        group_result(n(3), group, 1, 3, (2, 0)),
        group_result(n(4), group, 2, 4, (2, 0)),
        group_result(n(5), group, 2, 3, (1, 0)),
        group_result(n(6), group, 1, 4, (3, 0)),
    ]
}

/// Group A result between two team ids, no cards
pub fn result(home: TeamId, away: TeamId, home_goals: u32, away_goals: u32) -> MatchResult {
    MatchResult {
        match_number: None,
        group: Some('A'),
        home_team: home,
        away_team: away,
        home_goals,
        away_goals,
        home_cards: None,
        away_cards: None,
        penalties: None,
    }
}

pub fn knockout(match_number: u32, home: TeamId, away: TeamId, home_goals: u32, away_goals: u32) -> MatchResult {
    MatchResult {
        match_number: Some(match_number),
        group: None,
        home_team: home,
        away_team: away,
        home_goals,
        away_goals,
        home_cards: None,
        away_cards: None,
        penalties: None,
    }
}

pub fn kickoff(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 28, 19, 0, 0).unwrap() + Duration::hours(hours)
}

const KNOCKOUT_TABLE: [(u32, Round, &str); 32] = [
    (73, Round::RoundOf32, "Runner-up A vs Runner-up B"),
    (74, Round::RoundOf32, "Winner E vs 3rd Place A/B/C/D/F"),
    (75, Round::RoundOf32, "Winner F vs Runner-up C"),
    (76, Round::RoundOf32, "Winner C vs Runner-up F"),
    (77, Round::RoundOf32, "Winner I vs 3rd Place C/D/F/G/H"),
    (78, Round::RoundOf32, "Runner-up E vs Runner-up I"),
    (79, Round::RoundOf32, "Winner A vs 3rd Place C/E/F/H/I"),
    (80, Round::RoundOf32, "Winner L vs 3rd Place E/H/I/J/K"),
    (81, Round::RoundOf32, "Winner D vs 3rd Place B/E/F/I/J"),
    (82, Round::RoundOf32, "Winner G vs 3rd Place A/E/H/I/J"),
    (83, Round::RoundOf32, "Runner-up K vs Runner-up L"),
    (84, Round::RoundOf32, "Winner H vs Runner-up J"),
    (85, Round::RoundOf32, "Winner B vs 3rd Place E/F/G/I/J"),
    (86, Round::RoundOf32, "Winner J vs Runner-up H"),
    (87, Round::RoundOf32, "Winner K vs 3rd Place D/E/I/J/L"),
    (88, Round::RoundOf32, "Runner-up D vs Runner-up G"),
    (89, Round::RoundOf16, "Winner Match 74 vs Winner Match 77"),
    (90, Round::RoundOf16, "Winner Match 73 vs Winner Match 75"),
    (91, Round::RoundOf16, "Winner Match 76 vs Winner Match 78"),
    (92, Round::RoundOf16, "Winner Match 79 vs Winner Match 80"),
    (93, Round::RoundOf16, "Winner Match 83 vs Winner Match 84"),
    (94, Round::RoundOf16, "Winner Match 81 vs Winner Match 82"),
    (95, Round::RoundOf16, "Winner Match 86 vs Winner Match 88"),
    (96, Round::RoundOf16, "Winner Match 85 vs Winner Match 87"),
    (97, Round::QuarterFinal, "Winner Match 89 vs Winner Match 90"),
    (98, Round::QuarterFinal, "Winner Match 93 vs Winner Match 94"),
    (99, Round::QuarterFinal, "Winner Match 91 vs Winner Match 92"),
    (100, Round::QuarterFinal, "Winner Match 95 vs Winner Match 96"),
    (101, Round::SemiFinal, "Winner Match 97 vs Winner Match 98"),
    (102, Round::SemiFinal, "Winner Match 99 vs Winner Match 100"),
    (103, Round::ThirdPlacePlayoff, "Loser Match 101 vs Loser Match 102"),
    (104, Round::Final, "Winner Match 101 vs Winner Match 102"),
];

pub fn bracket() -> Vec<BracketSlot> {
    KNOCKOUT_TABLE
        .iter()
        .enumerate()
        .map(|(i, (match_number, round, fixture))| {
            let (home, away) = parse_fixture_label(fixture).unwrap();
            BracketSlot {
                match_number: *match_number,
                round: *round,
                venue: format!("Stadium {}", i % 16 + 1),
                kickoff_at: kickoff(i as i64 * 4),
                home,
                away,
            }
        })
        .collect()
}

pub fn tournament() -> Tournament {
    Tournament {
        teams: teams(),
        results: GROUP_LETTERS.iter().flat_map(|g| group_results(*g)).collect(),
        bracket: bracket(),
    }
}
