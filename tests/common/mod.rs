//! Shared helpers for integration tests.

#![allow(dead_code)]

use ludo_engine::{Color, LoadedDice, LudoGame};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test log subscriber once.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Game with the four canonical colors in canonical order.
pub fn four_player_game() -> LudoGame {
    init_logging();
    game_with(&[Color::Red, Color::Blue, Color::Green, Color::Yellow])
}

/// Game seating one player per color, named after the color.
pub fn game_with(colors: &[Color]) -> LudoGame {
    init_logging();
    colors
        .iter()
        .fold(LudoGame::builder(), |b, &c| b.player(c.name(), c))
        .seed(42)
        .build()
        .unwrap()
}

/// Roll a fixed value for the current player.
pub fn roll(game: &mut LudoGame, value: u8) {
    game.roll_dice_with(&mut LoadedDice::new([value])).unwrap();
}
