//! Headless batch play: run many complete games and tally the results.

use crate::game::{DrawOutcome, Game, GameError};
use crate::round::GameResult;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct SimulationReport {
    pub games: u32,
    pub player_champions: u32,
    pub robot_champions: u32,
    pub draws: u32,
    /// Rounds the player won holding the mega card
    pub player_mega_wins: u32,
    /// Rounds the robot won holding the mega card
    pub robot_mega_wins: u32,
    pub total_rounds: u64,
}

impl SimulationReport {
    pub fn average_rounds(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / f64::from(self.games)
    }

    fn record(&mut self, game: &Game) {
        self.games += 1;
        match game.result() {
            Some(GameResult::PlayerChampion) => self.player_champions += 1,
            Some(GameResult::RobotChampion) => self.robot_champions += 1,
            _ => self.draws += 1,
        }
        for r in game.history() {
            if r.player_card.is_mega() {
                self.player_mega_wins += 1;
            } else if r.robot_card.is_mega() {
                self.robot_mega_wins += 1;
            }
        }
        self.total_rounds += u64::from(game.rounds_played());
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "games:            {}", self.games)?;
        writeln!(f, "player champion:  {}", self.player_champions)?;
        writeln!(f, "robot champion:   {}", self.robot_champions)?;
        writeln!(f, "draws:            {}", self.draws)?;
        writeln!(f, "mega (player):    {}", self.player_mega_wins)?;
        writeln!(f, "mega (robot):     {}", self.robot_mega_wins)?;
        write!(f, "avg rounds/game:  {:.2}", self.average_rounds())
    }
}

/// Play one game to completion, stepping a synthetic clock past every cooldown.
pub fn play_out(game: &mut Game, start: Instant) -> Result<(), GameError> {
    let step = game.latch().cooldown();
    let mut now = start;
    loop {
        match game.draw_round_at(now)? {
            DrawOutcome::GameOver(_) => return Ok(()),
            DrawOutcome::Round(_) | DrawOutcome::Ignored => now += step,
        }
    }
}

/// Run `games` seeded games. The same `seed` always yields the same report.
pub fn simulate(games: u32, seed: u64) -> Result<SimulationReport, GameError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut report = SimulationReport::default();
    let mut game = Game::new();
    let start = Instant::now();
    for i in 0..games {
        let game_seed: u64 = rng.random();
        game.start_game_seeded(game_seed);
        play_out(&mut game, start)?;
        debug!(game = i, seed = game_seed, result = ?game.result(), "simulated game");
        report.record(&game);
    }
    info!(
        games = report.games,
        player = report.player_champions,
        robot = report.robot_champions,
        draws = report.draws,
        "simulation finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Phase, MAX_ROUNDS};

    #[test]
    fn same_seed_same_report() {
        let a = simulate(25, 11).unwrap();
        let b = simulate(25, 11).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_game_plays_all_rounds() {
        let report = simulate(40, 5).unwrap();
        assert_eq!(report.games, 40);
        assert_eq!(report.player_champions + report.robot_champions + report.draws, 40);
        assert_eq!(report.total_rounds, 40 * u64::from(MAX_ROUNDS));
        // mega card is drawn exactly once per full game
        assert_eq!(report.player_mega_wins + report.robot_mega_wins, 40);
    }

    #[test]
    fn play_out_ends_the_game() {
        let mut g = Game::new();
        g.start_game_seeded(1);
        play_out(&mut g, Instant::now()).unwrap();
        assert_eq!(g.phase(), Phase::Ended);
        assert_eq!(g.cards_remaining(), 0);
        assert_eq!(g.player_score() + g.robot_score(), MAX_ROUNDS);
    }

    #[test]
    fn empty_batch() {
        let report = simulate(0, 0).unwrap();
        assert_eq!(report.games, 0);
        assert_eq!(report.average_rounds(), 0.0);
    }
}
