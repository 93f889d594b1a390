use highcard_rs::cards::Card;
use highcard_rs::deck::{Deck, DeckError, DECK_SIZE};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn sorted_values(deck: &Deck) -> Vec<i32> {
    let mut xs: Vec<i32> = deck.cards().iter().map(|c| c.value()).collect();
    xs.sort_unstable();
    xs
}

fn expected_values() -> Vec<i32> {
    (-11..=11).chain(std::iter::once(100)).collect()
}

proptest! {
    #[test]
    fn every_shuffle_is_a_permutation_of_the_full_set(seed in any::<u64>()) {
        let deck = Deck::shuffled_seeded(seed);
        prop_assert_eq!(deck.remaining(), DECK_SIZE);
        prop_assert_eq!(sorted_values(&deck), expected_values());
    }

    #[test]
    fn draining_yields_each_card_once(seed in any::<u64>()) {
        let mut deck = Deck::shuffled_seeded(seed);
        let mut drawn = Vec::with_capacity(DECK_SIZE);
        while let Ok(card) = deck.draw() {
            drawn.push(card.value());
        }
        prop_assert_eq!(deck.draw(), Err(DeckError::Empty));
        drawn.sort_unstable();
        prop_assert_eq!(drawn, expected_values());
    }
}

#[test]
fn unseeded_create_is_complete() {
    let deck = Deck::create();
    assert_eq!(sorted_values(&deck), expected_values());
}

#[test]
fn shuffle_positions_are_uniform() {
    const TRIALS: usize = 24_000;
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let index = |c: Card| -> usize {
        if c.is_mega() {
            DECK_SIZE - 1
        } else {
            (c.value() + 11) as usize
        }
    };

    // counts[value][position]
    let mut counts = vec![[0u32; DECK_SIZE]; DECK_SIZE];
    for _ in 0..TRIALS {
        let deck = Deck::shuffled(&mut rng);
        for (pos, &card) in deck.cards().iter().enumerate() {
            counts[index(card)][pos] += 1;
        }
    }

    let expected = TRIALS as f64 / DECK_SIZE as f64;
    let mut chi_square = 0.0;
    for row in &counts {
        for &observed in row {
            let diff = f64::from(observed) - expected;
            chi_square += diff * diff / expected;
            assert!(
                (f64::from(observed) - expected).abs() < expected * 0.25,
                "cell count {observed} too far from {expected}"
            );
        }
    }
    // 23 * 23 degrees of freedom: mean 529, sd ~32.5; allow ~6 sd
    assert!(chi_square < 725.0, "chi-square {chi_square} suggests a biased shuffle");
}
