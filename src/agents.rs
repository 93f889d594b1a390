//! Agents: drivers that trigger draws on the player's behalf.
//!
//! The robot's card is drawn by the engine itself, so the only seat an agent
//! can fill is the player's. `AutoDraw` keeps pressing "draw" for a
//! hands-free game, paced no faster than the draw latch allows.

use crate::engine::DuelEngine;
use crate::game::{DrawOutcome, GameError, Phase};
use std::time::{Duration, Instant};

/// Something that may trigger a draw when polled.
pub trait DrawAgent {
    /// Called on every controller tick. Returns whether a round was resolved.
    fn on_tick(&mut self, engine: &mut dyn DuelEngine, now: Instant) -> Result<bool, GameError>;
}

/// Draws automatically while the game is active.
#[derive(Debug, Clone)]
pub struct AutoDraw {
    min_delay: Duration,
    next_draw_at: Option<Instant>,
}

impl AutoDraw {
    pub fn new(min_delay: Duration) -> Self {
        Self { min_delay, next_draw_at: None }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Forget any pending pacing deadline.
    pub fn reset(&mut self) {
        self.next_draw_at = None;
    }
}

impl Default for AutoDraw {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl DrawAgent for AutoDraw {
    fn on_tick(&mut self, engine: &mut dyn DuelEngine, now: Instant) -> Result<bool, GameError> {
        if engine.phase() != Phase::Active || engine.draw_in_flight_at(now) {
            return Ok(false);
        }
        if let Some(next) = self.next_draw_at {
            if now < next {
                return Ok(false);
            }
        }
        let acted = match engine.draw_round_at(now)? {
            DrawOutcome::Round(_) => true,
            DrawOutcome::GameOver(_) | DrawOutcome::Ignored => false,
        };
        if acted && !self.min_delay.is_zero() {
            self.next_draw_at = Some(now + self.min_delay);
        }
        Ok(acted)
    }
}
