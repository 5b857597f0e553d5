//! Actions taken during a game and their recorded outcomes.
//!
//! Every roll, move and pass is appended to the game history as an
//! `ActionRecord`. Moves carry a `MoveOutcome` describing what happened on
//! the board, so a history can be replayed or rendered without re-running
//! the rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::tokens::TokenRef;

/// What a single token move did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Left base onto the entry cell.
    Entered { cell: u8 },

    /// Moved along the ring. `captured` lists opposing tokens sent to base.
    /// SmallVec: captures are almost always zero or one token.
    Advanced {
        from: u8,
        to: u8,
        captured: SmallVec<[TokenRef; 4]>,
    },

    /// Left the ring into the home lane.
    ReachedHome { slot: u8 },
}

/// Result of a successful move request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The token that moved.
    pub token: TokenRef,

    pub kind: MoveKind,

    /// The mover's color finished with this move.
    pub finished: bool,

    /// The game ended with this move.
    pub game_over: bool,
}

impl MoveOutcome {
    /// Tokens captured by this move.
    #[must_use]
    pub fn captured(&self) -> &[TokenRef] {
        match &self.kind {
            MoveKind::Advanced { captured, .. } => captured,
            _ => &[],
        }
    }
}

/// A game action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Dice rolled.
    Roll(u8),

    /// A token moved.
    Move(MoveOutcome),

    /// Turn passed with no movable token.
    Pass,
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that took this action.
    pub player: PlayerId,

    pub action: Action,

    /// Round when the action was taken.
    pub round: u32,

    /// Sequence number within the game (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, round: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            round,
            sequence,
        }
    }
}
