// Engine boundary. Presentation layers (TUI, agents, simulations) drive the
// duel through this trait instead of reaching into `Game` internals. It is
// implemented for the core `Game` type.

use crate::game::{DrawOutcome, Game, GameError, GameEvent, Phase, RoundReport};
use crate::round::GameResult;
use std::time::Instant;

pub trait DuelEngine {
    // Lifecycle
    fn start_game(&mut self);
    fn draw_round_at(&mut self, now: Instant) -> Result<DrawOutcome, GameError>;

    // Queries
    fn player_score(&self) -> u32;
    fn robot_score(&self) -> u32;
    fn cards_remaining(&self) -> usize;
    fn phase(&self) -> Phase;
    fn draw_in_flight_at(&self, now: Instant) -> bool;
    fn last_round(&self) -> Option<RoundReport>;
    fn result(&self) -> Option<GameResult>;

    // Notifications
    fn take_events(&mut self) -> Vec<GameEvent>;
}

impl DuelEngine for Game {
    fn start_game(&mut self) {
        self.start_game();
    }
    fn draw_round_at(&mut self, now: Instant) -> Result<DrawOutcome, GameError> {
        self.draw_round_at(now)
    }

    fn player_score(&self) -> u32 {
        self.player_score
    }
    fn robot_score(&self) -> u32 {
        self.robot_score
    }
    fn cards_remaining(&self) -> usize {
        self.deck.remaining()
    }
    fn phase(&self) -> Phase {
        self.phase
    }
    fn draw_in_flight_at(&self, now: Instant) -> bool {
        self.latch.is_held_at(now)
    }
    fn last_round(&self) -> Option<RoundReport> {
        self.last_round().copied()
    }
    fn result(&self) -> Option<GameResult> {
        self.result()
    }
    fn take_events(&mut self) -> Vec<GameEvent> {
        self.drain_events().collect()
    }
}
