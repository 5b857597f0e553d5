//! # ludo-engine
//!
//! Turn and movement rule engine for cross-and-circle race games (Ludo
//! family), for two to six players.
//!
//! ## Design Principles
//!
//! 1. **Illegal states are unrepresentable**: each token is exactly one of
//!    `InBase`, `Active(cell)` or `Home(slot)`.
//!
//! 2. **Deterministic**: dice come from an injected [`Dice`] source, so a seed
//!    (or a loaded sequence) replays a game exactly.
//!
//! 3. **No timers, no globals**: the engine reports "nothing can move" and the
//!    caller decides when to pass. Rooms live in an explicit registry.
//!
//! ## Modules
//!
//! - `core`: Colors, players, RNG and dice, configuration, errors, actions
//! - `board`: Ring, home lanes, entry and safe cells
//! - `tokens`: Token state and transitions
//! - `rules`: RulesEngine trait, results, movement eligibility
//! - `games`: The Ludo turn engine
//! - `room`: In-memory room registry
//!
//! ## Example
//!
//! ```
//! use ludo_engine::{Color, LoadedDice, LudoGame, TokenState};
//!
//! let mut game = LudoGame::builder()
//!     .player("Ada", Color::Red)
//!     .player("Bo", Color::Blue)
//!     .build()
//!     .unwrap();
//!
//! game.roll_dice_with(&mut LoadedDice::new([6])).unwrap();
//! assert_eq!(game.movable_tokens(Color::Red).unwrap().len(), 4);
//!
//! game.move_token(Color::Red, 0).unwrap();
//! assert_eq!(game.token(Color::Red, 0).unwrap().state(), TokenState::Active(1));
//! ```

pub mod core;
pub mod board;
pub mod tokens;
pub mod rules;
pub mod games;
pub mod room;

// Re-export commonly used types
pub use crate::core::{
    Color, Player, PlayerId, PlayerMap,
    Dice, GameRng, GameRngState, LoadedDice, roll_die,
    GameConfig,
    EngineError, RoomError, SetupError,
    Action, ActionRecord, MoveKind, MoveOutcome,
};

pub use crate::board::{board_geometry, is_safe_cell, BoardGeometry};

pub use crate::tokens::{Token, TokenRef, TokenState};

pub use crate::rules::{can_move, movable_tokens, Choice, GameResult, Ranking, RulesEngine};

pub use crate::games::ludo::{GameSnapshot, LudoGame, LudoGameBuilder};

pub use crate::room::{Room, RoomRegistry};
