//! Movement eligibility queries.

use smallvec::SmallVec;

use crate::tokens::{Token, TokenState};

/// Value a token in base needs to enter play.
pub const ENTRY_ROLL: u8 = 6;

/// Token indices, at most four per player.
pub type TokenIndices = SmallVec<[u8; 4]>;

/// Whether a token in `state` can move with `dice`.
///
/// Home tokens never move, base tokens need a six, active tokens always move.
#[must_use]
pub fn can_move(state: TokenState, dice: u8) -> bool {
    match state {
        TokenState::Home(_) => false,
        TokenState::InBase => dice == ENTRY_ROLL,
        TokenState::Active(_) => true,
    }
}

/// Indices of `tokens` that can move with `dice`, in index order.
#[must_use]
pub fn movable_tokens(tokens: &[Token], dice: u8) -> TokenIndices {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| can_move(token.state(), dice))
        .map(|(i, _)| i as u8)
        .collect()
}
