use highcard_rs::cards::Card;
use highcard_rs::round::{resolve, GameResult, RoundOutcome};
use proptest::prelude::*;

fn any_card() -> impl Strategy<Value = Card> {
    prop_oneof![
        20 => (-11i32..=11).prop_map(|v| Card::new(v).expect("in range")),
        1 => Just(Card::MEGA),
    ]
}

proptest! {
    #[test]
    fn resolve_is_antisymmetric(a in any_card(), b in any_card()) {
        let forward = resolve(a, b);
        let backward = resolve(b, a);
        prop_assert_eq!(forward == RoundOutcome::PlayerWins, backward == RoundOutcome::RobotWins);
        prop_assert_eq!(forward == RoundOutcome::Tie, backward == RoundOutcome::Tie);
    }

    #[test]
    fn resolve_is_reflexive_tie(a in any_card()) {
        prop_assert_eq!(resolve(a, a), RoundOutcome::Tie);
    }

    #[test]
    fn resolve_matches_numeric_order(a in any_card(), b in any_card()) {
        let expected = match a.value().cmp(&b.value()) {
            std::cmp::Ordering::Greater => RoundOutcome::PlayerWins,
            std::cmp::Ordering::Less => RoundOutcome::RobotWins,
            std::cmp::Ordering::Equal => RoundOutcome::Tie,
        };
        prop_assert_eq!(resolve(a, b), expected);
    }

    #[test]
    fn result_swaps_with_scores(p in 0u32..=12, r in 0u32..=12) {
        let swapped = match GameResult::from_scores(p, r) {
            GameResult::PlayerChampion => GameResult::RobotChampion,
            GameResult::RobotChampion => GameResult::PlayerChampion,
            other => other,
        };
        prop_assert_eq!(GameResult::from_scores(r, p), swapped);
    }
}

#[test]
fn tie_only_through_resolve() {
    let four = Card::new(4).unwrap();
    assert_eq!(resolve(four, four), RoundOutcome::Tie);
}
