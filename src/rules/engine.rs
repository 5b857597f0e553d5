//! Rules engine trait and game results.
//!
//! A game implements `RulesEngine` to expose:
//! - Which choices are legal for a seat right now
//! - How a choice changes the game
//! - Whether the game is over, and the final ranking
//!
//! Drivers such as simulations and benchmarks work against the trait and
//! never touch board internals.

use serde::{Deserialize, Serialize};

use crate::core::{Color, Dice, EngineError, PlayerId};

/// A finishing position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    /// 1-based finishing position.
    pub position: u8,
    pub name: String,
    pub color: Color,
}

/// Result of a completed game: everyone ranked, first to last.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub rankings: Vec<Ranking>,
}

impl GameResult {
    /// The first-placed color.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.rankings.first().map(|r| r.color)
    }

    /// Finishing position of `color`, if ranked.
    #[must_use]
    pub fn position_of(&self, color: Color) -> Option<u8> {
        self.rankings.iter().find(|r| r.color == color).map(|r| r.position)
    }
}

/// Something a seat can do on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// Roll the dice.
    Roll,
    /// Move the token with this index.
    Move(u8),
    /// Give up the turn; only legal when nothing can move.
    Pass,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_choices`: Return empty if the seat can't act
/// - `apply_choice`: Must be deterministic given the dice
/// - `is_terminal`: Return None if the game continues
pub trait RulesEngine {
    /// Seat whose turn it is.
    fn active_player(&self) -> PlayerId;

    /// Legal choices for a seat.
    fn legal_choices(&self, player: PlayerId) -> Vec<Choice>;

    /// Apply a choice. Rolls draw from `dice`.
    fn apply_choice(
        &mut self,
        player: PlayerId,
        choice: Choice,
        dice: &mut impl Dice,
    ) -> Result<(), EngineError>;

    /// Returns `Some(result)` if the game has ended.
    fn is_terminal(&self) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Drive the game until it ends or `max_choices` have been applied.
    ///
    /// `policy` picks an index into the legal choices of the current seat.
    fn play_out(
        &mut self,
        dice: &mut impl Dice,
        mut policy: impl FnMut(&[Choice]) -> usize,
        max_choices: usize,
    ) -> Option<GameResult> {
        for _ in 0..max_choices {
            if let Some(result) = self.is_terminal() {
                return Some(result);
            }

            let player = self.active_player();
            let choices = self.legal_choices(player);
            if choices.is_empty() {
                break;
            }

            let pick = policy(&choices).min(choices.len() - 1);
            if self.apply_choice(player, choices[pick], dice).is_err() {
                break;
            }
        }

        self.is_terminal()
    }
}
