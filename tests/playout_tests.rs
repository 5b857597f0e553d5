//! Full-game playouts through the `RulesEngine` trait.
//!
//! Random policies drive games from the first roll to the final ranking and
//! check the engine's invariants along the way.

mod common;

use std::collections::HashSet;

use common::game_with;
use ludo_engine::board::{LAST_HOME_SLOT, RING_SIZE};
use ludo_engine::core::PlayerId;
use ludo_engine::{Choice, Color, GameRng, LudoGame, RulesEngine, TokenState};

const MAX_CHOICES: usize = 200_000;

fn random_policy(seed: u64) -> impl FnMut(&[Choice]) -> usize {
    let mut picker = GameRng::new(seed);
    move |choices| picker.gen_range_usize(0..choices.len())
}

fn assert_tokens_in_range(game: &LudoGame) {
    for (_, player) in game.players() {
        for token in game.tokens(player.color).unwrap() {
            match token.state() {
                TokenState::Active(pos) => assert!(pos < RING_SIZE),
                TokenState::Home(slot) => assert!(slot <= LAST_HOME_SLOT),
                TokenState::InBase => {}
            }
        }
    }
}

/// Games with canonical colors always finish with a complete ranking.
#[test]
fn test_random_games_finish() {
    let rosters: [&[Color]; 3] = [
        &[Color::Red, Color::Green],
        &[Color::Red, Color::Blue, Color::Yellow],
        &[Color::Red, Color::Blue, Color::Green, Color::Yellow],
    ];

    for (i, roster) in rosters.into_iter().enumerate() {
        let mut game = game_with(roster);
        let mut dice = GameRng::new(100 + i as u64);

        let result = game
            .play_out(&mut dice, random_policy(i as u64), MAX_CHOICES)
            .expect("game should finish");

        assert_eq!(result.rankings.len(), roster.len());
        let positions: Vec<u8> = result.rankings.iter().map(|r| r.position).collect();
        assert_eq!(positions, (1..=roster.len() as u8).collect::<Vec<_>>());
        let colors: HashSet<_> = result.rankings.iter().map(|r| r.color).collect();
        assert_eq!(colors.len(), roster.len());

        assert_eq!(game.finished_colors().len(), roster.len() - 1);
        assert_tokens_in_range(&game);
    }
}

/// Stepping choice by choice keeps every token in range and the history in
/// sequence.
#[test]
fn test_invariants_hold_every_step() {
    let mut game = game_with(&[Color::Red, Color::Blue, Color::Green, Color::Yellow]);
    let mut dice = GameRng::new(7);
    let mut policy = random_policy(8);

    for _ in 0..MAX_CHOICES {
        if game.is_terminal().is_some() {
            break;
        }
        let seat = game.active_player();
        let choices = game.legal_choices(seat);
        assert!(!choices.is_empty());

        // Off-turn seats never have choices.
        for (other, _) in game.players().filter(|&(p, _)| p != seat) {
            assert!(game.legal_choices(other).is_empty());
        }

        let pick = policy(&choices);
        game.apply_choice(seat, choices[pick], &mut dice).unwrap();
        assert_tokens_in_range(&game);
    }

    assert!(game.is_game_over());
    let sequences: Vec<u32> = game.history().iter().map(|r| r.sequence).collect();
    assert_eq!(sequences, (0..sequences.len() as u32).collect::<Vec<_>>());
}

/// Same seeds, same game.
#[test]
fn test_deterministic_replay() {
    let play = || {
        let mut game = game_with(&[Color::Red, Color::Blue, Color::Green]);
        let mut dice = GameRng::new(2024);
        let result = game.play_out(&mut dice, random_policy(3), MAX_CHOICES);
        (result, game.round(), game.history().len())
    };

    assert_eq!(play(), play());
}

/// With five seats the extra color can never finish, so it is ranked last
/// once the four canonical colors are home.
#[test]
fn test_five_player_game_ranks_orange_last() {
    let mut game = game_with(&[Color::Red, Color::Blue, Color::Green, Color::Yellow, Color::Orange]);
    let mut dice = GameRng::new(55);

    let result = game
        .play_out(&mut dice, random_policy(56), MAX_CHOICES)
        .expect("game should finish");

    assert_eq!(result.rankings.len(), 5);
    assert_eq!(result.rankings[4].color, Color::Orange);
    assert!(!game.finished_colors().contains(&Color::Orange));
}

/// With two colors lacking a home lane the game cannot end; it must still
/// run without breaking any invariant.
#[test]
fn test_six_player_game_keeps_running() {
    let mut game = game_with(&Color::ALL);
    let mut dice = GameRng::new(66);

    let result = game.play_out(&mut dice, random_policy(67), 20_000);

    assert!(result.is_none());
    assert!(!game.is_game_over());
    assert!(game.finished_colors().len() <= 4);
    assert_tokens_in_range(&game);
}

/// Choices for the wrong seat are refused.
#[test]
fn test_apply_choice_checks_seat() {
    let mut game = game_with(&[Color::Red, Color::Blue]);
    let mut dice = GameRng::new(1);

    let err = game.apply_choice(PlayerId::new(1), Choice::Roll, &mut dice).unwrap_err();
    assert!(err.is_rejection());

    let err = game.apply_choice(PlayerId::new(5), Choice::Roll, &mut dice).unwrap_err();
    assert!(!err.is_rejection());
}
