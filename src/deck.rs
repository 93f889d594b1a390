use crate::cards::Card;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of cards in a full duel deck (23 numbered cards plus the mega card).
pub const DECK_SIZE: usize = 24;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("cannot draw from an empty deck")]
    Empty,
    #[error("duplicate card in deck: {0}")]
    Duplicate(Card),
    #[error("deck holds at most 24 cards, got {0}")]
    Oversized(usize),
}

/// The duel deck. Cards are drawn from the tail; the deck is never refilled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Full deck in ascending order, unshuffled.
    ///
    /// ```
    /// use highcard_rs::deck::Deck;
    ///
    /// let deck = Deck::ordered();
    /// assert_eq!(deck.remaining(), 24);
    /// ```
    pub fn ordered() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        cards.extend(Card::all());
        Self { cards }
    }

    /// Full deck shuffled with thread-local entropy.
    pub fn create() -> Self {
        Self::shuffled(&mut rand::rng())
    }

    /// Full deck shuffled with the provided RNG.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::ordered();
        deck.shuffle_with(rng);
        deck
    }

    /// Full deck shuffled with a seeded RNG for reproducibility.
    pub fn shuffled_seeded(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// A deck whose draws return `draw_order` front to back.
    ///
    /// Values must be unique, as in a real deck.
    ///
    /// ```
    /// use highcard_rs::cards::Card;
    /// use highcard_rs::deck::Deck;
    ///
    /// let five = Card::new(5).unwrap();
    /// let three = Card::new(3).unwrap();
    /// let mut deck = Deck::stacked(vec![five, three]).unwrap();
    /// assert_eq!(deck.draw(), Ok(five));
    /// assert_eq!(deck.draw(), Ok(three));
    /// assert!(deck.draw().is_err());
    /// ```
    pub fn stacked(draw_order: Vec<Card>) -> Result<Self, DeckError> {
        if draw_order.len() > DECK_SIZE {
            return Err(DeckError::Oversized(draw_order.len()));
        }
        let mut seen = draw_order.clone();
        seen.sort_unstable();
        if let Some(w) = seen.windows(2).find(|w| w[0] == w[1]) {
            return Err(DeckError::Duplicate(w[0]));
        }
        let mut cards = draw_order;
        cards.reverse();
        Ok(Self { cards })
    }

    /// Shuffle in place (Fisher–Yates via `SliceRandom`).
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in storage order; the last element is drawn next.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Draw the next card.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::ordered()
    }
}
