//! Core engine types: colors, players, RNG and dice, configuration, errors,
//! actions.
//!
//! These are shared by the board, the rules and the room registry.

pub mod color;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;

pub use color::{Color, ParseColorError};
pub use player::{Player, PlayerId, PlayerMap, MAX_PLAYERS, MIN_PLAYERS};
pub use rng::{roll_die, Dice, GameRng, GameRngState, LoadedDice, DIE_FACES};
pub use config::GameConfig;
pub use error::{EngineError, RoomError, SetupError};
pub use action::{Action, ActionRecord, MoveKind, MoveOutcome};
