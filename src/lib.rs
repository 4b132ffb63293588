//! Group standings, third-place qualification and knockout bracket
//! resolution for the 48-team World Cup format.
//!
//! Every entry point is a pure function of its inputs; callers own fetching,
//! persistence and caching.

pub mod engine;
pub mod error;
pub mod tournament;

#[cfg(test)]
mod fixtures;

pub use engine::{compute_snapshot, TournamentSnapshot};
pub use error::EngineError;
pub use tournament::Tournament;
