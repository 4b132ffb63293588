//! Symbolic knockout participants and their human-readable labels.
//!
//! Labels follow the fixture table wording: `Winner A`, `Runner-up B`,
//! `3rd Place C/D/E/F/G`, `Winner Match 73`, `Loser Match 101`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::models::is_group_letter;
use crate::error::EngineError;

/// A knockout participant named by where it comes from.
///
/// Labels render in canonical form: third-place group lists are sorted,
/// deduplicated and slash-separated, so `3rd Place GFEDC` reads back as
/// `3rd Place C/D/E/F/G`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Placeholder {
    GroupWinner(char),
    GroupRunnerUp(char),
    /// Best remaining qualified third-placed team from any of these groups
    BestThird(Vec<char>),
    MatchWinner(u32),
    MatchLoser(u32),
}

impl Placeholder {
    /// Groups this slot draws from (empty for later-round slots)
    pub fn groups(&self) -> Vec<char> {
        match self {
            Placeholder::GroupWinner(g) | Placeholder::GroupRunnerUp(g) => vec![*g],
            Placeholder::BestThird(groups) => groups.clone(),
            Placeholder::MatchWinner(_) | Placeholder::MatchLoser(_) => Vec::new(),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::GroupWinner(g) => write!(f, "Winner {g}"),
            Placeholder::GroupRunnerUp(g) => write!(f, "Runner-up {g}"),
            Placeholder::BestThird(groups) => {
                let joined: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
                write!(f, "3rd Place {}", joined.join("/"))
            }
            Placeholder::MatchWinner(n) => write!(f, "Winner Match {n}"),
            Placeholder::MatchLoser(n) => write!(f, "Loser Match {n}"),
        }
    }
}

fn parse_group(s: &str, label: &str) -> Result<char, EngineError> {
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(g), None) if is_group_letter(g.to_ascii_uppercase()) => Ok(g.to_ascii_uppercase()),
        _ => Err(EngineError::InvalidPlaceholder(label.to_string())),
    }
}

fn parse_match_number(s: &str, label: &str) -> Result<u32, EngineError> {
    s.trim()
        .parse()
        .map_err(|_| EngineError::InvalidPlaceholder(label.to_string()))
}

impl FromStr for Placeholder {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if let Some(rest) = label.strip_prefix("Winner Match ") {
            return Ok(Placeholder::MatchWinner(parse_match_number(rest, label)?));
        }
        if let Some(rest) = label.strip_prefix("Loser Match ") {
            return Ok(Placeholder::MatchLoser(parse_match_number(rest, label)?));
        }
        if let Some(rest) = label.strip_prefix("Winner ") {
            return Ok(Placeholder::GroupWinner(parse_group(rest, label)?));
        }
        if let Some(rest) = label.strip_prefix("Runner-up ") {
            return Ok(Placeholder::GroupRunnerUp(parse_group(rest, label)?));
        }
        if let Some(rest) = label.strip_prefix("3rd Place ") {
            // "C/D/E" and "CDE" are both seen in fixture tables
            let mut groups = rest
                .chars()
                .filter(|c| *c != '/' && !c.is_whitespace())
                .map(|c| parse_group(&c.to_string(), label))
                .collect::<Result<Vec<_>, _>>()?;
            groups.sort_unstable();
            groups.dedup();
            if groups.is_empty() {
                return Err(EngineError::InvalidPlaceholder(label.to_string()));
            }
            return Ok(Placeholder::BestThird(groups));
        }
        Err(EngineError::InvalidPlaceholder(label.to_string()))
    }
}

impl TryFrom<String> for Placeholder {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Placeholder> for String {
    fn from(value: Placeholder) -> Self {
        value.to_string()
    }
}

/// Split a fixture label such as `"Winner A vs Runner-up B"` into its two sides.
pub fn parse_fixture_label(label: &str) -> Result<(Placeholder, Placeholder), EngineError> {
    let (home, away) = label
        .split_once(" vs ")
        .ok_or_else(|| EngineError::InvalidPlaceholder(label.to_string()))?;
    Ok((home.parse()?, away.parse()?))
}
