//! Invariants checked over random deals and random play.

use std::collections::BTreeSet;

use memorito_core::*;
use proptest::prelude::*;

#[derive(Copy, Clone, Debug)]
enum Step {
    Flip(Position),
    Resolve,
    Reset,
}

fn arb_shape() -> impl Strategy<Value = BoardShape> {
    (1..=8u8, 1..=8u8)
        .prop_filter("even cell count", |&(columns, rows)| {
            (columns as u16 * rows as u16) % 2 == 0
        })
        .prop_map(|(columns, rows)| BoardShape::new_unchecked(columns, rows))
}

fn arb_steps() -> impl Strategy<Value = Vec<Step>> {
    let step = prop_oneof![
        8 => (0..20u16).prop_map(Step::Flip),
        3 => Just(Step::Resolve),
        1 => Just(Step::Reset),
    ];
    prop::collection::vec(step, 0..200)
}

/// Reference bookkeeping kept next to the session.
#[derive(Default)]
struct Shadow {
    seen: BTreeSet<Position>,
    revealed: BTreeSet<PairId>,
    lead_revealed: bool,
}

proptest! {
    #[test]
    fn deals_hold_every_pair_twice(seed in any::<u64>(), shape in arb_shape()) {
        let deck = RandomBoardGenerator::new(seed).generate(shape);

        prop_assert_eq!(deck.len(), usize::from(shape.total_cells()));
        prop_assert!(deck.validate().is_ok());

        let mut pair_ids: Vec<_> = deck.cards().iter().map(|card| card.pair_id).collect();
        pair_ids.sort();
        let mut expected: Vec<_> = paired_cards(shape)
            .iter()
            .map(|card| card.pair_id)
            .collect();
        expected.sort();
        prop_assert_eq!(pair_ids, expected);
    }

    #[test]
    fn random_play_keeps_counters_honest(seed in any::<u64>(), steps in arb_steps()) {
        let mut session = GameSession::seeded(seed, SessionConfig::default());
        session.start_round(BoardShape::PORTRAIT).unwrap();
        let mut shadow = Shadow::default();
        let mut completions = 0;

        for step in steps {
            let before = session.counters();
            match step {
                Step::Flip(position) => {
                    let card = session.card_at(position).unwrap();
                    let accepted = session.is_active()
                        && card.state.is_face_down()
                        && session.selection().len() < 2;
                    let cards_before = session.cards().to_vec();
                    let outcome = session.flip(position).unwrap();

                    prop_assert_eq!(outcome.has_update(), accepted);
                    if accepted {
                        if session.selection().len() == 1 {
                            shadow.lead_revealed = shadow.revealed.contains(&card.pair_id);
                        }
                        shadow.seen.insert(position);
                        if session.positions_of(card.pair_id).all(|p| shadow.seen.contains(&p)) {
                            shadow.revealed.insert(card.pair_id);
                        }
                        prop_assert_eq!(session.counters().flips, before.flips + 1);
                        prop_assert_eq!(
                            session.card_at(position).unwrap().state,
                            CardState::FaceUp
                        );
                    } else {
                        prop_assert_eq!(session.counters(), before);
                        prop_assert_eq!(session.cards(), cards_before.as_slice());
                    }
                }
                Step::Resolve => {
                    let outcome = session.resolve_pending();
                    let after = session.counters();
                    prop_assert_eq!(after.flips, before.flips);
                    match outcome {
                        ResolveOutcome::Stale => prop_assert_eq!(after, before),
                        ResolveOutcome::Matched { .. } => {
                            prop_assert_eq!(after.matched_pairs, before.matched_pairs + 1);
                            prop_assert_eq!(after.misses, before.misses);
                        }
                        ResolveOutcome::RoundComplete { .. } => {
                            completions += 1;
                            prop_assert_eq!(after.matched_pairs, session.total_pairs());
                            prop_assert!(!session.is_active());
                        }
                        ResolveOutcome::Mismatched { missed, .. } => {
                            prop_assert_eq!(missed, shadow.lead_revealed);
                            prop_assert_eq!(after.misses, before.misses + u32::from(missed));
                            prop_assert_eq!(after.matched_pairs, before.matched_pairs);
                        }
                    }
                }
                Step::Reset => {
                    session.reset();
                    shadow = Shadow::default();
                    completions = 0;
                    prop_assert_eq!(session.counters(), Counters::default());
                }
            }

            let seen: BTreeSet<_> = session.seen_positions().collect();
            prop_assert_eq!(&seen, &shadow.seen);
            let revealed: BTreeSet<_> = session.revealed_pairs().iter().copied().collect();
            prop_assert_eq!(&revealed, &shadow.revealed);
            prop_assert!(completions <= 1);
        }
    }
}
