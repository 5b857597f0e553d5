//! Error types.
//!
//! Rejections are normal play (a move offered at the wrong time) and leave
//! state untouched. Precondition violations mean the caller passed input that
//! can never be valid for this game; they also leave state untouched.

use thiserror::Error;

use super::color::Color;
use crate::tokens::TokenState;

/// Errors from turn engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("the game is over")]
    GameOver,

    #[error("it is {current}'s turn, not {requested}'s")]
    NotYourTurn { current: Color, requested: Color },

    #[error("the dice have not been rolled this turn")]
    DiceNotRolled,

    #[error("the dice have already been rolled this turn")]
    AlreadyRolled,

    #[error("{0} has a movable token and cannot pass")]
    MovesAvailable(Color),

    #[error("{color} token {index} cannot move with a roll of {dice}")]
    TokenNotMovable { color: Color, index: usize, dice: u8 },

    #[error("{0} is not seated in this game")]
    UnknownColor(Color),

    #[error("token index {0} is out of range (0..4)")]
    TokenIndexOutOfRange(usize),

    #[error("seat {0} does not exist in this game")]
    UnknownSeat(u8),

    #[error("die roll {0} is out of range (1..=6)")]
    DieOutOfRange(u8),

    #[error("token state {0:?} is off the board")]
    PositionOutOfRange(TokenState),
}

impl EngineError {
    /// True for illegal-but-well-formed requests, false for malformed input.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            EngineError::UnknownColor(_)
                | EngineError::TokenIndexOutOfRange(_)
                | EngineError::UnknownSeat(_)
                | EngineError::DieOutOfRange(_)
                | EngineError::PositionOutOfRange(_)
        )
    }
}

/// Errors from assembling a game's roster.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a game needs 2 to 6 players, got {0}")]
    PlayerCount(usize),

    #[error("color {0} is used by more than one player")]
    DuplicateColor(Color),

    #[error("name {0:?} is used by more than one player")]
    DuplicateName(String),

    #[error("current seat {0} is not in the roster")]
    CurrentSeat(u8),

    #[error("{color} token {index} is not a valid token on this board")]
    InvalidToken { color: Color, index: usize },

    #[error("dice value {0} is out of range (1..=6)")]
    DiceValue(u8),

    #[error("finished colors and rankings do not agree")]
    InconsistentRankings,
}

/// Errors from the room registry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("room {0} not found")]
    RoomNotFound(String),

    #[error("room {0} is full")]
    RoomFull(String),

    #[error("name {0:?} is already taken in this room")]
    NameTaken(String),

    #[error("room {0} has already started its game")]
    GameAlreadyStarted(String),

    #[error("player name must not be empty")]
    InvalidName,

    #[error("invalid room code {0:?}")]
    InvalidRoomCode(String),

    #[error("only the host can start the game")]
    NotHost,

    #[error("player {0:?} is not in this room")]
    PlayerNotFound(String),

    #[error("a game needs at least 2 players, room has {0}")]
    NotEnoughPlayers(usize),

    #[error("no free room code of length {0}")]
    NoFreeRoomCode(usize),

    #[error(transparent)]
    Setup(#[from] SetupError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_category() {
        assert!(EngineError::GameOver.is_rejection());
        assert!(EngineError::DiceNotRolled.is_rejection());
        assert!(EngineError::TokenNotMovable { color: Color::Red, index: 0, dice: 3 }.is_rejection());
        assert!(!EngineError::UnknownColor(Color::Purple).is_rejection());
        assert!(!EngineError::TokenIndexOutOfRange(4).is_rejection());
        assert!(!EngineError::DieOutOfRange(0).is_rejection());
        assert!(!EngineError::PositionOutOfRange(TokenState::Active(60)).is_rejection());
    }

    #[test]
    fn test_messages() {
        let err = EngineError::NotYourTurn { current: Color::Red, requested: Color::Blue };
        assert_eq!(err.to_string(), "it is red's turn, not blue's");
        assert_eq!(RoomError::NotEnoughPlayers(1).to_string(), "a game needs at least 2 players, room has 1");
    }
}
