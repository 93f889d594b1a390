use crate::cards::Card;
use crate::deck::{Deck, DeckError, DECK_SIZE};
use crate::round::{resolve, GameResult, RoundOutcome};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Most rounds a single game can resolve (two cards per round).
pub const MAX_ROUNDS: u32 = (DECK_SIZE / 2) as u32;

/// Minimum interval between accepted draws.
pub const DRAW_COOLDOWN: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Phase {
    Idle,
    Active,
    Ended,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("cannot draw while the game is {phase:?}")]
    InvalidPhase { phase: Phase },
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Everything the presentation layer needs after a resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundReport {
    /// 1-based round number within the current game
    pub round: u32,
    pub player_card: Card,
    pub robot_card: Card,
    pub outcome: RoundOutcome,
    pub player_score: u32,
    pub robot_score: u32,
    pub cards_remaining: usize,
}

/// Final tally of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct GameSummary {
    pub player_score: u32,
    pub robot_score: u32,
    pub rounds_played: u32,
    /// Unpaired trailing card left in the deck (0 or 1)
    pub cards_discarded: usize,
    pub result: GameResult,
}

/// Result of a `draw_round` call that was not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DrawOutcome {
    Round(RoundReport),
    GameOver(GameSummary),
    /// Dropped because a previous draw is still cooling down.
    Ignored,
}

/// Outbound notifications, queued in emission order until drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameEvent {
    Started { cards_remaining: usize },
    RoundResolved(RoundReport),
    Ended(GameSummary),
}

/// Re-entrancy guard for draws.
///
/// Engaged by an accepted draw and released once `cooldown` has elapsed.
/// Locking it makes it permanent until the next `release`.
#[derive(Debug, Clone)]
pub struct DrawLatch {
    cooldown: Duration,
    engaged_at: Option<Instant>,
    locked: bool,
}

impl DrawLatch {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown, engaged_at: None, locked: false }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn is_held_at(&self, now: Instant) -> bool {
        if self.locked {
            return true;
        }
        match self.engaged_at {
            Some(at) => now.saturating_duration_since(at) < self.cooldown,
            None => false,
        }
    }

    /// Release the latch if its cooldown has elapsed. Returns whether it was released.
    pub fn release_if_due(&mut self, now: Instant) -> bool {
        if self.locked || self.engaged_at.is_none() || self.is_held_at(now) {
            return false;
        }
        self.engaged_at = None;
        true
    }

    /// When the current cooldown ends, if one is running.
    pub fn releases_at(&self) -> Option<Instant> {
        if self.locked {
            return None;
        }
        self.engaged_at.map(|at| at + self.cooldown)
    }

    fn engage(&mut self, now: Instant) {
        self.engaged_at = Some(now);
    }

    fn lock(&mut self) {
        self.locked = true;
    }

    fn release(&mut self) {
        self.engaged_at = None;
        self.locked = false;
    }
}

impl Default for DrawLatch {
    fn default() -> Self {
        Self::new(DRAW_COOLDOWN)
    }
}

/// One duel between the player and the robot.
#[derive(Debug)]
pub struct Game {
    pub(crate) player_score: u32,
    pub(crate) robot_score: u32,
    pub(crate) deck: Deck,
    pub(crate) phase: Phase,
    pub(crate) latch: DrawLatch,
    history: Vec<RoundReport>,
    events: VecDeque<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A game that has not been started yet.
    pub fn new() -> Self {
        Self {
            player_score: 0,
            robot_score: 0,
            deck: Deck::ordered(),
            phase: Phase::Idle,
            latch: DrawLatch::default(),
            history: Vec::with_capacity(MAX_ROUNDS as usize),
            events: VecDeque::new(),
        }
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn robot_score(&self) -> u32 {
        self.robot_score
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn latch(&self) -> &DrawLatch {
        &self.latch
    }

    pub fn draw_in_flight_at(&self, now: Instant) -> bool {
        self.latch.is_held_at(now)
    }

    pub fn draw_in_flight(&self) -> bool {
        self.draw_in_flight_at(Instant::now())
    }

    pub fn rounds_played(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn last_round(&self) -> Option<&RoundReport> {
        self.history.last()
    }

    /// Final result; `None` until the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        if self.phase == Phase::Ended {
            Some(GameResult::from_scores(self.player_score, self.robot_score))
        } else {
            None
        }
    }

    /// Final tally; `None` until the game has ended.
    pub fn summary(&self) -> Option<GameSummary> {
        let result = self.result()?;
        Some(GameSummary {
            player_score: self.player_score,
            robot_score: self.robot_score,
            rounds_played: self.rounds_played(),
            cards_discarded: self.deck.remaining(),
            result,
        })
    }

    /// Every round played so far, oldest first.
    pub fn history(&self) -> &[RoundReport] {
        &self.history
    }

    pub fn history_recent(&self, n: usize) -> Vec<RoundReport> {
        if n == 0 {
            return Vec::new();
        }
        let len = self.history.len();
        let start = len.saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<RoundReport> {
        if n == 0 {
            return Vec::new();
        }
        let len = self.history.len();
        if len == 0 {
            return Vec::new();
        }
        let max_offset = len.saturating_sub(n);
        let offset = offset.min(max_offset);
        let end = len.saturating_sub(offset);
        let start = end.saturating_sub(n);
        self.history[start..end].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Start (or restart) with a freshly shuffled deck.
    pub fn start_game(&mut self) {
        self.reset_with(Deck::create());
    }

    /// Start (or restart) with a reproducible shuffle.
    pub fn start_game_seeded(&mut self, seed: u64) {
        self.reset_with(Deck::shuffled_seeded(seed));
    }

    /// Start (or restart) with a prepared deck.
    pub fn start_game_with_deck(&mut self, deck: Deck) {
        self.reset_with(deck);
    }

    fn reset_with(&mut self, deck: Deck) {
        let restarted = self.phase == Phase::Active;
        self.player_score = 0;
        self.robot_score = 0;
        self.deck = deck;
        self.phase = Phase::Active;
        self.latch.release();
        self.history.clear();
        self.events.clear();
        let cards_remaining = self.deck.remaining();
        info!(cards_remaining, restarted, "game started");
        self.events.push_back(GameEvent::Started { cards_remaining });
    }

    /// Resolve one round now.
    pub fn draw_round(&mut self) -> Result<DrawOutcome, GameError> {
        self.draw_round_at(Instant::now())
    }

    /// Resolve one round, treating `now` as the current time for the draw latch.
    ///
    /// A draw while the latch is held is dropped and reported as
    /// [`DrawOutcome::Ignored`]. With fewer than two cards left the game ends
    /// instead and the latch stays held until the next start.
    pub fn draw_round_at(&mut self, now: Instant) -> Result<DrawOutcome, GameError> {
        if self.phase != Phase::Active {
            warn!(phase = ?self.phase, "draw requested outside an active game");
            return Err(GameError::InvalidPhase { phase: self.phase });
        }
        self.latch.release_if_due(now);
        if self.latch.is_held_at(now) {
            trace!("draw ignored while cooling down");
            return Ok(DrawOutcome::Ignored);
        }
        if self.deck.remaining() <= 1 {
            return Ok(DrawOutcome::GameOver(self.finish()));
        }

        self.latch.engage(now);
        let player_card = self.deck.draw()?;
        let robot_card = self.deck.draw()?;
        let outcome = resolve(player_card, robot_card);
        match outcome {
            RoundOutcome::PlayerWins => self.player_score += 1,
            RoundOutcome::RobotWins => self.robot_score += 1,
            RoundOutcome::Tie => {}
        }
        let report = RoundReport {
            round: self.rounds_played() + 1,
            player_card,
            robot_card,
            outcome,
            player_score: self.player_score,
            robot_score: self.robot_score,
            cards_remaining: self.deck.remaining(),
        };
        debug!(
            round = report.round,
            player = player_card.value(),
            robot = robot_card.value(),
            ?outcome,
            cards_remaining = report.cards_remaining,
            "round resolved"
        );
        self.history.push(report);
        self.events.push_back(GameEvent::RoundResolved(report));
        Ok(DrawOutcome::Round(report))
    }

    fn finish(&mut self) -> GameSummary {
        self.phase = Phase::Ended;
        self.latch.lock();
        let summary = GameSummary {
            player_score: self.player_score,
            robot_score: self.robot_score,
            rounds_played: self.rounds_played(),
            cards_discarded: self.deck.remaining(),
            result: GameResult::from_scores(self.player_score, self.robot_score),
        };
        info!(
            player_score = summary.player_score,
            robot_score = summary.robot_score,
            discarded = summary.cards_discarded,
            result = ?summary.result,
            "game over"
        );
        self.events.push_back(GameEvent::Ended(summary));
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(v: i32) -> Card {
        Card::new(v).expect("valid card")
    }

    fn stacked_game(values: &[i32]) -> Game {
        let deck = Deck::stacked(values.iter().map(|&v| c(v)).collect()).expect("unique cards");
        let mut g = Game::new();
        g.start_game_with_deck(deck);
        g
    }

    #[test]
    fn new_game_is_idle_and_rejects_draws() {
        let mut g = Game::new();
        assert_eq!(g.phase(), Phase::Idle);
        assert_eq!(g.draw_round(), Err(GameError::InvalidPhase { phase: Phase::Idle }));
        assert_eq!(g.result(), None);
    }

    #[test]
    fn player_card_is_drawn_first() {
        let mut g = stacked_game(&[5, 3]);
        let now = Instant::now();
        let DrawOutcome::Round(r) = g.draw_round_at(now).unwrap() else {
            panic!("expected a round");
        };
        assert_eq!(r.player_card, c(5));
        assert_eq!(r.robot_card, c(3));
        assert_eq!(r.outcome, RoundOutcome::PlayerWins);
        assert_eq!((g.player_score, g.robot_score), (1, 0));
        assert_eq!(r.cards_remaining, 0);
    }

    #[test]
    fn latch_drops_draws_until_cooldown_elapses() {
        let mut g = stacked_game(&[1, 2, 3, 4]);
        let t0 = Instant::now();
        assert!(matches!(g.draw_round_at(t0), Ok(DrawOutcome::Round(_))));
        assert!(g.draw_in_flight_at(t0));
        assert_eq!(g.draw_round_at(t0 + Duration::from_millis(999)), Ok(DrawOutcome::Ignored));
        assert_eq!(g.cards_remaining(), 2);
        assert!(matches!(g.draw_round_at(t0 + DRAW_COOLDOWN), Ok(DrawOutcome::Round(_))));
        assert_eq!(g.cards_remaining(), 0);
    }

    #[test]
    fn ending_locks_the_latch_for_good() {
        let mut g = stacked_game(&[9]);
        let t0 = Instant::now();
        let DrawOutcome::GameOver(summary) = g.draw_round_at(t0).unwrap() else {
            panic!("expected game over");
        };
        assert_eq!(summary.cards_discarded, 1);
        assert_eq!(summary.result, GameResult::Draw);
        assert_eq!(g.phase(), Phase::Ended);
        assert!(g.draw_in_flight_at(t0 + Duration::from_secs(3600)));
        assert_eq!(g.latch().releases_at(), None);
        assert_eq!(
            g.draw_round_at(t0 + Duration::from_secs(3600)),
            Err(GameError::InvalidPhase { phase: Phase::Ended })
        );
    }

    #[test]
    fn summary_only_exists_once_the_game_ends() {
        let mut g = Game::new();
        g.start_game_seeded(1);
        let t0 = Instant::now();
        assert!(matches!(g.draw_round_at(t0), Ok(DrawOutcome::Round(_))));
        assert_eq!(g.phase(), Phase::Active);
        assert_eq!(g.summary(), None);
        assert_eq!(g.result(), None);

        let mut now = t0;
        let ended = loop {
            now += DRAW_COOLDOWN;
            if let DrawOutcome::GameOver(s) = g.draw_round_at(now).unwrap() {
                break s;
            }
        };
        assert_eq!(g.summary(), Some(ended));
        assert!(ended.cards_discarded <= 1);
        assert_eq!(g.result(), Some(ended.result));
    }

    #[test]
    fn history_borrows_every_round_in_order() {
        let mut g = stacked_game(&[1, 2, 3, 4, 5, 6]);
        let t0 = Instant::now();
        g.draw_round_at(t0).unwrap();
        g.draw_round_at(t0 + DRAW_COOLDOWN).unwrap();
        let rounds: Vec<u32> = g.history().iter().map(|r| r.round).collect();
        assert_eq!(rounds, vec![1, 2]);
        assert_eq!(g.history(), g.history_recent(g.history_len()).as_slice());
    }

    #[test]
    fn restart_releases_latch_and_clears_history() {
        let mut g = stacked_game(&[-4, 8]);
        let t0 = Instant::now();
        g.draw_round_at(t0).unwrap();
        assert_eq!(g.history_len(), 1);
        g.start_game_seeded(3);
        assert!(!g.draw_in_flight_at(t0));
        assert_eq!(g.history_len(), 0);
        assert_eq!((g.player_score(), g.robot_score()), (0, 0));
        assert_eq!(g.cards_remaining(), DECK_SIZE);
    }

    #[test]
    fn events_are_queued_in_order() {
        let mut g = stacked_game(&[2, -2]);
        let t0 = Instant::now();
        g.draw_round_at(t0).unwrap();
        g.draw_round_at(t0 + DRAW_COOLDOWN).unwrap();
        let events: Vec<GameEvent> = g.drain_events().collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], GameEvent::Started { cards_remaining: 2 });
        assert!(matches!(events[1], GameEvent::RoundResolved(r) if r.round == 1));
        assert!(
            matches!(events[2], GameEvent::Ended(s) if s.result == GameResult::PlayerChampion)
        );
        assert_eq!(g.pending_events(), 0);
    }

    #[test]
    fn history_offset_pages_from_the_end() {
        let mut g = stacked_game(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let mut now = Instant::now();
        for _ in 0..4 {
            g.draw_round_at(now).unwrap();
            now += DRAW_COOLDOWN;
        }
        assert_eq!(g.history_len(), 4);
        let window = g.history_recent_offset(2, 0);
        assert_eq!(window.iter().map(|r| r.round).collect::<Vec<_>>(), vec![3, 4]);
        let older = g.history_recent_offset(2, 2);
        assert_eq!(older.iter().map(|r| r.round).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(g.history_recent_offset(2, 99), older);
        assert!(g.history_recent(0).is_empty());
    }
}
