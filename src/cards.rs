use std::fmt;
use std::str::FromStr;

/// Lowest numbered card.
pub const MIN_VALUE: i32 = -11;
/// Highest numbered card.
pub const MAX_VALUE: i32 = 11;
/// Value of the single mega card, above every numbered card.
pub const MEGA_VALUE: i32 = 100;

/// A card in the duel deck: a numbered card in `-11..=11` or the mega card (100).
///
/// Cards order by plain numeric value, so the mega card beats everything.
///
/// ```
/// use highcard_rs::cards::Card;
///
/// let low = Card::new(-3).unwrap();
/// assert!(Card::MEGA > low);
/// assert!(Card::new(12).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(i8);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("card value out of range: {0} (expected -11..=11 or 100)")]
    OutOfRange(i32),
    #[error("invalid card: '{0}'")]
    Parse(String),
}

/// Presentation class of a card; UIs colour cards by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CardKind {
    Negative,
    Zero,
    Positive,
    Mega,
}

impl Card {
    pub const MEGA: Card = Card(MEGA_VALUE as i8);

    pub fn new(value: i32) -> Result<Self, CardError> {
        if (MIN_VALUE..=MAX_VALUE).contains(&value) || value == MEGA_VALUE {
            Ok(Card(value as i8))
        } else {
            Err(CardError::OutOfRange(value))
        }
    }

    pub const fn value(self) -> i32 {
        self.0 as i32
    }

    pub const fn is_mega(self) -> bool {
        self.0 as i32 == MEGA_VALUE
    }

    pub const fn kind(self) -> CardKind {
        match self.0 {
            100 => CardKind::Mega,
            v if v < 0 => CardKind::Negative,
            0 => CardKind::Zero,
            _ => CardKind::Positive,
        }
    }

    /// Every card value in ascending order: `-11..=11` followed by the mega card.
    pub fn all() -> impl Iterator<Item = Card> {
        (MIN_VALUE..=MAX_VALUE).map(|v| Card(v as i8)).chain(std::iter::once(Card::MEGA))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Card {
    type Error = CardError;
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Card::new(value)
    }
}

impl From<Card> for i32 {
    fn from(card: Card) -> Self {
        card.value()
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("mega") || t.eq_ignore_ascii_case("m") {
            return Ok(Card::MEGA);
        }
        let v = t.parse::<i32>().map_err(|_| CardError::Parse(s.to_string()))?;
        Card::new(v)
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use highcard_rs::cards::{parse_cards, Card};
///
/// let cards = parse_cards("5, -3 mega").unwrap();
/// assert_eq!(cards, vec![Card::new(5).unwrap(), Card::new(-3).unwrap(), Card::MEGA]);
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_enforced() {
        assert!(Card::new(-11).is_ok());
        assert!(Card::new(11).is_ok());
        assert_eq!(Card::new(100).unwrap(), Card::MEGA);
        assert_eq!(Card::new(-12), Err(CardError::OutOfRange(-12)));
        assert_eq!(Card::new(12), Err(CardError::OutOfRange(12)));
        assert_eq!(Card::new(99), Err(CardError::OutOfRange(99)));
    }

    #[test]
    fn all_lists_24_ascending_values() {
        let xs: Vec<i32> = Card::all().map(Card::value).collect();
        assert_eq!(xs.len(), 24);
        assert_eq!(xs.first(), Some(&-11));
        assert_eq!(xs.last(), Some(&100));
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn kinds_follow_sign() {
        assert_eq!(Card::new(-1).unwrap().kind(), CardKind::Negative);
        assert_eq!(Card::new(0).unwrap().kind(), CardKind::Zero);
        assert_eq!(Card::new(11).unwrap().kind(), CardKind::Positive);
        assert_eq!(Card::MEGA.kind(), CardKind::Mega);
    }

    #[test]
    fn display_and_from_str() {
        assert_eq!(Card::new(-7).unwrap().to_string(), "-7");
        assert_eq!(Card::MEGA.to_string(), "100");
        assert_eq!(Card::from_str(" 4 ").unwrap(), Card::new(4).unwrap());
        assert_eq!(Card::from_str("MEGA").unwrap(), Card::MEGA);
        assert!(matches!(Card::from_str("x"), Err(CardError::Parse(_))));
        assert!(matches!(Card::from_str("50"), Err(CardError::OutOfRange(50))));
    }

    #[test]
    fn mega_outranks_eleven() {
        assert!(Card::MEGA > Card::new(MAX_VALUE).unwrap());
        assert!(Card::MEGA.is_mega());
        assert!(!Card::new(11).unwrap().is_mega());
    }
}
