use crate::agents::{AutoDraw, DrawAgent};
use crate::game::{DrawOutcome, Game, GameEvent, Phase};
use crate::round::{GameResult, RoundOutcome};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Start,
    Table,
}

/// Colour hint for the round / final message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Tone {
    Win,
    Lose,
    Tie,
}

impl From<RoundOutcome> for Tone {
    fn from(outcome: RoundOutcome) -> Self {
        match outcome {
            RoundOutcome::PlayerWins => Tone::Win,
            RoundOutcome::RobotWins => Tone::Lose,
            RoundOutcome::Tie => Tone::Tie,
        }
    }
}

impl From<GameResult> for Tone {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::PlayerChampion => Tone::Win,
            GameResult::RobotChampion => Tone::Lose,
            GameResult::Draw => Tone::Tie,
        }
    }
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuApply,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    Draw,
    Restart,
    ToggleAuto,
    Quit,
}

/// Runtime options for the front end; the game rules themselves are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct AppConfig {
    /// Base seed for reproducible shuffles; each new game uses `seed + games_started`.
    pub seed: Option<u64>,
    /// Extra pacing for auto-draw on top of the draw cooldown.
    pub auto_delay_ms: u64,
}

impl AppConfig {
    pub fn new(seed: Option<u64>, auto_delay_ms: u64) -> Self {
        Self { seed, auto_delay_ms }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub scene: Scene,
    pub started: Instant,
    // Core engine instance, owned here and nowhere else
    pub game: Game,
    pub config: AppConfig,
    pub menu_index: usize,
    pub games_started: u64,
    auto: Option<AutoDraw>,
    message: Option<(String, Tone)>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
    should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(AppConfig::default())
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 12;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            scene: Scene::Start,
            started: Instant::now(),
            game: Game::new(),
            config,
            menu_index: 0,
            games_started: 0,
            auto: None,
            message: None,
            help_open: false,
            history_open: false,
            history_offset: 0,
            action_error: None,
            action_error_at: None,
            should_quit: false,
        }
    }

    pub fn message(&self) -> Option<(&str, Tone)> {
        self.message.as_ref().map(|(text, tone)| (text.as_str(), *tone))
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub fn auto_enabled(&self) -> bool {
        self.auto.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    pub(crate) fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Whether the draw key is live at `now`.
    pub fn can_draw_at(&self, now: Instant) -> bool {
        self.scene == Scene::Table
            && self.game.phase() == Phase::Active
            && !self.game.draw_in_flight_at(now)
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        self.handle_input_at(action, Instant::now())
    }

    /// Apply an input at `now`. Returns true when a round was resolved.
    pub fn handle_input_at(&mut self, action: InputAction, now: Instant) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.game.history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Start {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Start {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Start {
                    self.apply_menu();
                }
                false
            }
            InputAction::Draw => self.draw_at(now),
            InputAction::Restart => {
                if self.scene == Scene::Table {
                    self.start_game();
                }
                false
            }
            InputAction::ToggleAuto => {
                self.toggle_auto();
                false
            }
            InputAction::Quit => {
                self.request_quit();
                false
            }
        }
    }

    /// Start (or restart) a game and show the table.
    pub fn start_game(&mut self) {
        match self.config.seed {
            Some(seed) => self.game.start_game_seeded(seed.wrapping_add(self.games_started)),
            None => self.game.start_game(),
        }
        self.games_started += 1;
        if let Some(agent) = self.auto.as_mut() {
            agent.reset();
        }
        self.history_offset = 0;
        self.clear_action_error();
        self.scene = Scene::Table;
        self.sync_events();
    }

    fn draw_at(&mut self, now: Instant) -> bool {
        if self.scene != Scene::Table || self.help_open || self.history_open {
            return false;
        }
        if self.game.phase() != Phase::Active {
            return false;
        }
        let drew = match self.game.draw_round_at(now) {
            Ok(DrawOutcome::Round(_)) => {
                self.clear_action_error();
                true
            }
            Ok(DrawOutcome::GameOver(_)) | Ok(DrawOutcome::Ignored) => false,
            Err(err) => {
                self.set_action_error(err.to_string(), now);
                false
            }
        };
        self.sync_events();
        drew
    }

    pub fn toggle_auto(&mut self) {
        self.auto = match self.auto {
            Some(_) => None,
            None => Some(AutoDraw::new(Duration::from_millis(self.config.auto_delay_ms))),
        };
        debug!(enabled = self.auto.is_some(), "auto draw toggled");
    }

    /// Periodic work: expire stale errors and let the auto-draw agent act.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(at) = self.action_error_at {
            if now.saturating_duration_since(at) >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        if self.scene != Scene::Table || self.help_open || self.history_open {
            return;
        }
        if let Some(agent) = self.auto.as_mut() {
            if let Err(err) = agent.on_tick(&mut self.game, now) {
                self.set_action_error(err.to_string(), now);
            }
        }
        self.sync_events();
    }

    fn set_action_error(&mut self, err: String, now: Instant) {
        self.action_error = Some(err);
        self.action_error_at = Some(now);
    }

    /// Fold pending engine notifications into the message line.
    fn sync_events(&mut self) {
        let events: Vec<GameEvent> = self.game.drain_events().collect();
        for event in events {
            match event {
                GameEvent::Started { .. } => self.message = None,
                GameEvent::RoundResolved(report) => {
                    let outcome = report.outcome;
                    self.message = Some((outcome.message().to_string(), outcome.into()));
                }
                GameEvent::Ended(summary) => {
                    let result = summary.result;
                    self.message = Some((result.message().to_string(), result.into()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::deck::Deck;
    use crate::game::DRAW_COOLDOWN;

    #[test]
    fn draw_ignored_on_start_screen() {
        let mut app = AppState::default();
        assert!(!app.handle_input(InputAction::Draw));
        assert_eq!(app.game.phase(), Phase::Idle);
        assert!(app.action_error().is_none());
    }

    #[test]
    fn final_message_follows_result() {
        let mut app = AppState::default();
        app.start_game();
        let deck = Deck::stacked(vec![Card::new(-5).unwrap(), Card::MEGA]).unwrap();
        app.game.start_game_with_deck(deck);
        app.sync_events();
        let t0 = Instant::now();
        assert!(app.handle_input_at(InputAction::Draw, t0));
        assert_eq!(app.message(), Some(("Robot wins this round!", Tone::Lose)));
        assert!(!app.handle_input_at(InputAction::Draw, t0 + DRAW_COOLDOWN));
        assert_eq!(app.message(), Some(("Game Over! The Robot is the CHAMPION!", Tone::Lose)));
    }
}
