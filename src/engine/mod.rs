pub mod bracket;
pub mod pipeline;
pub mod standings;
pub mod third_place;
pub mod tiebreak;

pub use bracket::{resolve_bracket, BracketInputs};
pub use pipeline::{compute_snapshot, TournamentSnapshot};
pub use standings::{calculate_standings, group_table, rank_group};
pub use third_place::{rank_third_placed, rank_third_placed_from_tables};
pub use tiebreak::{lot_value, Criterion, HeadToHead, Rankable};
