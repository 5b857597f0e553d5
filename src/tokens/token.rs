//! Token state and transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::{board_geometry, is_safe_cell, LAST_HOME_SLOT, RING_SIZE};
use crate::core::Color;

/// Where a token is.
///
/// Legal transitions: `InBase -> Active`, `Active -> Active` (ring movement),
/// `Active -> Home`, and `Active -> InBase` (captured). `Home` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenState {
    #[default]
    InBase,
    /// On the ring at the given cell (0..52).
    Active(u8),
    /// In the home lane at the given slot (0..4).
    Home(u8),
}

impl TokenState {
    /// Whether moving from `self` to `next` is a legal transition.
    #[must_use]
    pub fn can_transition_to(self, next: TokenState) -> bool {
        match (self, next) {
            (TokenState::InBase, TokenState::Active(_)) => true,
            (TokenState::Active(_), TokenState::Active(_)) => true,
            (TokenState::Active(_), TokenState::Home(_)) => true,
            (TokenState::Active(_), TokenState::InBase) => true,
            _ => false,
        }
    }

    /// Whether the state names a real cell or slot.
    #[must_use]
    pub fn is_on_board(self) -> bool {
        match self {
            TokenState::InBase => true,
            TokenState::Active(pos) => pos < RING_SIZE,
            TokenState::Home(slot) => slot <= LAST_HOME_SLOT,
        }
    }

    #[must_use]
    pub fn ring_position(self) -> Option<u8> {
        match self {
            TokenState::Active(pos) => Some(pos),
            _ => None,
        }
    }

    #[must_use]
    pub fn home_slot(self) -> Option<u8> {
        match self {
            TokenState::Home(slot) => Some(slot),
            _ => None,
        }
    }
}

/// Identifies a token by owner color and index (0..4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef {
    pub color: Color,
    pub index: u8,
}

impl TokenRef {
    #[must_use]
    pub const fn new(color: Color, index: u8) -> Self {
        Self { color, index }
    }
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.color, self.index)
    }
}

/// A single token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    id: TokenRef,
    state: TokenState,
}

impl Token {
    /// A new token in its base.
    #[must_use]
    pub const fn new(color: Color, index: u8) -> Self {
        Self {
            id: TokenRef::new(color, index),
            state: TokenState::InBase,
        }
    }

    #[must_use]
    pub fn id(&self) -> TokenRef {
        self.id
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.id.color
    }

    #[must_use]
    pub fn state(&self) -> TokenState {
        self.state
    }

    #[must_use]
    pub fn is_in_base(&self) -> bool {
        self.state == TokenState::InBase
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        matches!(self.state, TokenState::Home(_))
    }

    /// True iff the token is on the ring at a safe cell.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.state.ring_position().is_some_and(is_safe_cell)
    }

    /// Move from base to the color's entry cell. Returns the entry cell.
    pub(crate) fn enter_play(&mut self) -> u8 {
        let cell = board_geometry(self.color()).entry_cell;
        self.transition(TokenState::Active(cell));
        cell
    }

    /// Place on the ring at `position`.
    pub(crate) fn move_to(&mut self, position: u8) {
        debug_assert!(position < RING_SIZE, "ring position out of range: {position}");
        self.transition(TokenState::Active(position));
    }

    /// Park in the home lane at `slot`.
    pub(crate) fn enter_home(&mut self, slot: u8) {
        debug_assert!(slot <= LAST_HOME_SLOT, "home slot out of range: {slot}");
        self.transition(TokenState::Home(slot));
    }

    /// Send back to base after a capture.
    pub(crate) fn capture(&mut self) {
        self.transition(TokenState::InBase);
    }

    /// Overwrite the state without transition checks (scenario setup).
    pub(crate) fn place(&mut self, state: TokenState) {
        self.state = state;
    }

    fn transition(&mut self, next: TokenState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal token transition for {}: {:?} -> {:?}",
            self.id,
            self.state,
            next
        );
        self.state = next;
    }
}
