//! Rules: the engine trait, results, and movement eligibility.
//!
//! Games implement `RulesEngine` to define:
//! - Legal choices for each seat
//! - How choices modify the game
//! - When the game ends and who placed where

pub mod engine;
pub mod eligibility;

pub use engine::{Choice, GameResult, Ranking, RulesEngine};
pub use eligibility::{can_move, movable_tokens, TokenIndices, ENTRY_ROLL};
