use thiserror::Error;

use crate::tournament::models::TeamId;

/// Validation and configuration failures.
///
/// Incomplete groups and unresolved bracket slots are not errors; they are
/// carried in the normal return values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("'{0}' is not a valid group letter (expected A-L)")]
    InvalidGroup(char),

    #[error("group {group} has {found} teams, expected {expected}")]
    InvalidGroupSize {
        group: char,
        found: usize,
        expected: usize,
    },

    #[error("duplicate team {0}")]
    DuplicateTeam(String),

    #[error("{team} is drawn in group {found}, not group {expected}")]
    TeamNotInGroup {
        team: String,
        expected: char,
        found: char,
    },

    #[error("match {match_label} references team {team} which is not in group {group}")]
    UnknownTeam {
        match_label: String,
        team: TeamId,
        group: char,
    },

    #[error("match {match_label} is tagged group {found} but was submitted for group {expected}")]
    GroupMismatch {
        match_label: String,
        expected: char,
        found: char,
    },

    #[error("match {0} has no group and cannot count towards group standings")]
    NotAGroupMatch(String),

    #[error("match {0} has the same team on both sides")]
    SelfMatch(String),

    #[error("teams {0} and {1} have more than one result in the same group")]
    DuplicateFixture(TeamId, TeamId),

    #[error("third-place pool has {0} candidates, expected 12")]
    ThirdPlacePoolSize(usize),

    #[error("group {0} contributes more than one third-place candidate")]
    DuplicateThirdPlaceGroup(char),

    #[error("{team} is ranked {rank} in group {group}, not third")]
    NotThirdPlaced { team: String, group: char, rank: u8 },

    #[error("no qualified third-placed team available for match {match_number} slot '{label}'")]
    NoEligibleThirdPlace { match_number: u32, label: String },

    #[error("match {match_number} slot '{label}' refers to group {group} which is not in the tournament")]
    UnknownGroupInBracket {
        match_number: u32,
        label: String,
        group: char,
    },

    #[error("knockout result {0} has no match number")]
    UnnumberedKnockout(String),

    #[error("knockout slot table lists match {0} more than once")]
    DuplicateBracketSlot(u32),

    #[error("knockout result for match {0}, which is not in the slot table")]
    UnknownKnockoutMatch(u32),

    #[error("knockout match {0} has more than one result")]
    DuplicateKnockoutResult(u32),

    #[error("knockout match {match_number} was drawn as {expected:?} but the result lists {found:?}")]
    KnockoutTeamMismatch {
        match_number: u32,
        expected: (TeamId, TeamId),
        found: (TeamId, TeamId),
    },

    #[error("knockout match {0} finished level without a penalty shoot-out winner")]
    UndecidedKnockout(u32),

    #[error("cannot parse placeholder '{0}'")]
    InvalidPlaceholder(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
