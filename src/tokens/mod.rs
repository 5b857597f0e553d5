//! Tokens: one tagged state per token (`InBase | Active(cell) | Home(slot)`).

pub mod token;

pub use token::{Token, TokenRef, TokenState};
