//! Ludo: two to six players race four tokens each around a shared 52-cell
//! ring and into their home lanes.
//!
//! - A six brings a token out of base and earns another turn
//! - Landing on an opponent outside a safe cell sends it back to base
//! - A color finishes when all four tokens are home; the game ends when at
//!   most one color is still racing

mod game;
mod snapshot;

pub use game::{LudoGame, LudoGameBuilder, TokenSet};
pub use snapshot::GameSnapshot;
