//! Serializable game snapshots.
//!
//! A snapshot is everything a presentation layer reads (current player, dice,
//! token states, rankings) plus the RNG state, so a game can be checkpointed
//! and resumed with the same dice sequence.

use serde::{Deserialize, Serialize};

use crate::core::{Color, GameRngState, Player, PlayerId, PlayerMap};
use crate::rules::Ranking;
use crate::tokens::TokenState;

use super::game::TokenSet;

/// Read-only view of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: PlayerMap<Player>,
    pub tokens: PlayerMap<TokenSet>,
    pub current_player: PlayerId,
    pub dice_value: u8,
    pub has_rolled: bool,
    pub extra_turn_pending: bool,
    pub round: u32,
    pub finished_colors: Vec<Color>,
    pub rankings: Vec<Ranking>,
    pub game_over: bool,
    pub rng: GameRngState,
}

impl GameSnapshot {
    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    /// Token states of `color` by index, if seated.
    #[must_use]
    pub fn token_states(&self, color: Color) -> Option<[TokenState; 4]> {
        let (seat, _) = self.players.iter().find(|(_, p)| p.color == color)?;
        Some(self.tokens.get(seat)?.map(|t| t.state()))
    }

    /// Encode with bincode for checkpointing.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a checkpoint produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
