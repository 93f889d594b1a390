//! highcard-rs: a high-card duel between the player and a robot
//!
//! Goals:
//! - Round resolution engine independent of any front end
//! - Explicit, caller-owned game state (no globals)
//! - No panics in the engine; contract violations come back as `Result`
//!
//! The deck holds the numbered cards `-11..=11` plus one mega card (100).
//! Each round the player and then the robot draw one card; the higher card
//! scores. Once fewer than two cards remain the next draw ends the game.
//!
//! ## Quick start
//! ```
//! use highcard_rs::cards::Card;
//! use highcard_rs::deck::Deck;
//! use highcard_rs::game::{DrawOutcome, Game, DRAW_COOLDOWN};
//! use highcard_rs::round::{GameResult, RoundOutcome};
//! use std::time::Instant;
//!
//! let deck = Deck::stacked(vec![Card::new(5).unwrap(), Card::new(3).unwrap()]).unwrap();
//! let mut game = Game::new();
//! game.start_game_with_deck(deck);
//!
//! let now = Instant::now();
//! let DrawOutcome::Round(round) = game.draw_round_at(now).unwrap() else { unreachable!() };
//! assert_eq!(round.outcome, RoundOutcome::PlayerWins);
//!
//! let DrawOutcome::GameOver(summary) = game.draw_round_at(now + DRAW_COOLDOWN).unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(summary.result, GameResult::PlayerChampion);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin highcard-rs
//! ```

pub mod agents;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod game;
pub mod round;
pub mod sim;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
