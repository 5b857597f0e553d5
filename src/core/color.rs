//! Player colors.
//!
//! A color is both the identity of a seated player and of the four tokens
//! that player owns. Colors have a canonical order which is used for seat
//! assignment in rooms and for turn order when a game starts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six token colors.
///
/// The first four (red, blue, green, yellow) are the canonical board colors
/// with a home lane. Orange and purple exist for five- and six-player games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
}

impl Color {
    /// All colors in canonical order.
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Purple,
    ];

    /// Position in canonical order (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name, as used in display and serialization.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Purple => "purple",
        }
    }

    /// Whether this color has a home lane on the standard board.
    #[must_use]
    pub const fn is_canonical(self) -> bool {
        matches!(self, Color::Red | Color::Blue | Color::Green | Color::Yellow)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown color name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown color: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Color::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}
