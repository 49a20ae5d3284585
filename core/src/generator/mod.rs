use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(&mut self, shape: BoardShape) -> Deck;
}

/// Uniform integer source behind the shuffle, swapped for a scripted one in tests.
pub trait UniformSource {
    /// Draws uniformly from `0..=upper`.
    fn draw_inclusive(&mut self, upper: usize) -> usize;
}

impl<T: UniformSource + ?Sized> UniformSource for &mut T {
    fn draw_inclusive(&mut self, upper: usize) -> usize {
        (**self).draw_inclusive(upper)
    }
}

/// Two face-down cards per pair index, in pair order, positions still unassigned.
pub fn paired_cards(shape: BoardShape) -> Vec<Card> {
    let pairs_needed = shape.total_pairs();
    let mut cards = Vec::with_capacity(usize::from(shape.total_cells()));
    for index in 0..pairs_needed {
        let pair_id = PairId(index);
        cards.push(Card::face_down(pair_id, 0));
        cards.push(Card::face_down(pair_id, 0));
    }
    cards
}

/// In-place Fisher-Yates: walking down from the last slot, swap each with a uniform pick at or below it.
pub fn shuffle<T, S: UniformSource + ?Sized>(items: &mut [T], source: &mut S) {
    for i in (1..items.len()).rev() {
        let j = source.draw_inclusive(i);
        debug_assert!(j <= i, "uniform source overshot: {j} > {i}");
        items.swap(i, j.min(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec;

    /// Replays fixed draws, mainly to enumerate every possible shuffle.
    struct ScriptedSource {
        draws: Vec<usize>,
        next: usize,
    }

    impl UniformSource for ScriptedSource {
        fn draw_inclusive(&mut self, upper: usize) -> usize {
            let draw = self.draws[self.next];
            self.next += 1;
            assert!(draw <= upper);
            draw
        }
    }

    #[test]
    fn paired_cards_emit_each_pair_twice() {
        let cards = paired_cards(BoardShape::PORTRAIT);

        assert_eq!(cards.len(), 20);
        for pair in 0..10 {
            let count = cards.iter().filter(|card| card.pair_id == PairId(pair)).count();
            assert_eq!(count, 2);
        }
        assert!(cards.iter().all(|card| card.state == CardState::FaceDown));
    }

    #[test]
    fn every_draw_sequence_yields_a_distinct_permutation() {
        let mut permutations = BTreeSet::new();
        for a in 0..=3 {
            for b in 0..=2 {
                for c in 0..=1 {
                    let mut items = [0u8, 1, 2, 3];
                    let mut source = ScriptedSource {
                        draws: vec![a, b, c],
                        next: 0,
                    };
                    shuffle(&mut items, &mut source);
                    assert_eq!(source.next, 3);
                    permutations.insert(items);
                }
            }
        }

        // 4! draw sequences map onto 4! permutations, so a uniform source gives a uniform shuffle
        assert_eq!(permutations.len(), 24);
    }

    #[test]
    fn zero_draws_leave_order_rotated_predictably() {
        let mut items = [0u8, 1, 2];
        let mut source = ScriptedSource {
            draws: vec![0, 0],
            next: 0,
        };
        shuffle(&mut items, &mut source);
        assert_eq!(items, [1, 2, 0]);
    }

    #[test]
    fn shuffle_handles_trivial_slices() {
        let mut source = ScriptedSource {
            draws: vec![],
            next: 0,
        };
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut source);
        let mut single = [7u8];
        shuffle(&mut single, &mut source);
        assert_eq!(single, [7]);
    }
}
