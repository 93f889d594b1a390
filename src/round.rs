//! Round resolution: comparing two drawn cards and deriving the final result.

use crate::cards::Card;

/// Outcome of a single round, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RoundOutcome {
    PlayerWins,
    RobotWins,
    Tie,
}

impl RoundOutcome {
    pub fn message(self) -> &'static str {
        match self {
            RoundOutcome::PlayerWins => "You win this round!",
            RoundOutcome::RobotWins => "Robot wins this round!",
            RoundOutcome::Tie => "It's a tie! No points awarded this round.",
        }
    }
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum GameResult {
    PlayerChampion,
    RobotChampion,
    Draw,
}

impl GameResult {
    pub fn from_scores(player_score: u32, robot_score: u32) -> Self {
        match player_score.cmp(&robot_score) {
            std::cmp::Ordering::Greater => GameResult::PlayerChampion,
            std::cmp::Ordering::Less => GameResult::RobotChampion,
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            GameResult::PlayerChampion => "Game Over! You are the CHAMPION!",
            GameResult::RobotChampion => "Game Over! The Robot is the CHAMPION!",
            GameResult::Draw => "Game Over! It's a DRAW!",
        }
    }
}

/// Compare the player's card against the robot's.
///
/// ```
/// use highcard_rs::cards::Card;
/// use highcard_rs::round::{resolve, RoundOutcome};
///
/// let four = Card::new(4).unwrap();
/// assert_eq!(resolve(Card::MEGA, four), RoundOutcome::PlayerWins);
/// assert_eq!(resolve(four, four), RoundOutcome::Tie);
/// ```
pub fn resolve(player: Card, robot: Card) -> RoundOutcome {
    match player.cmp(&robot) {
        std::cmp::Ordering::Greater => RoundOutcome::PlayerWins,
        std::cmp::Ordering::Less => RoundOutcome::RobotWins,
        std::cmp::Ordering::Equal => RoundOutcome::Tie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(v: i32) -> Card {
        Card::new(v).expect("valid card")
    }

    #[test]
    fn higher_card_wins() {
        assert_eq!(resolve(c(5), c(3)), RoundOutcome::PlayerWins);
        assert_eq!(resolve(c(-11), c(-10)), RoundOutcome::RobotWins);
        assert_eq!(resolve(c(0), c(-1)), RoundOutcome::PlayerWins);
    }

    #[test]
    fn mega_beats_every_numbered_card() {
        for card in Card::all().filter(|c| !c.is_mega()) {
            assert_eq!(resolve(Card::MEGA, card), RoundOutcome::PlayerWins);
            assert_eq!(resolve(card, Card::MEGA), RoundOutcome::RobotWins);
        }
    }

    #[test]
    fn equal_cards_tie() {
        assert_eq!(resolve(c(4), c(4)), RoundOutcome::Tie);
    }

    #[test]
    fn result_from_scores() {
        assert_eq!(GameResult::from_scores(7, 5), GameResult::PlayerChampion);
        assert_eq!(GameResult::from_scores(2, 10), GameResult::RobotChampion);
        assert_eq!(GameResult::from_scores(6, 6), GameResult::Draw);
        assert_eq!(GameResult::from_scores(0, 0), GameResult::Draw);
    }

    #[test]
    fn messages_match_outcomes() {
        assert_eq!(RoundOutcome::Tie.message(), "It's a tie! No points awarded this round.");
        assert!(GameResult::Draw.message().ends_with("DRAW!"));
    }
}
