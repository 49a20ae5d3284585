use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform source backed by a seeded `SmallRng`, the same seed always deals the same boards.
#[derive(Clone, Debug)]
pub struct SeededSource {
    seed: u64,
    rng: SmallRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl UniformSource for SeededSource {
    fn draw_inclusive(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..=upper)
    }
}

/// Deals paired cards and shuffles them with the wrapped source.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator<S = SeededSource> {
    source: S,
}

impl RandomBoardGenerator<SeededSource> {
    pub fn new(seed: u64) -> Self {
        Self::with_source(SeededSource::new(seed))
    }
}

impl<S: UniformSource> RandomBoardGenerator<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: UniformSource> BoardGenerator for RandomBoardGenerator<S> {
    fn generate(&mut self, shape: BoardShape) -> Deck {
        let mut cards = paired_cards(shape);
        shuffle(&mut cards, &mut self.source);
        let deck = Deck::from_dealt(shape, cards);

        // double check pair layout
        if let Err(err) = deck.validate() {
            log::warn!(
                "Dealt deck failed validation for {}x{}: {}",
                shape.columns,
                shape.rows,
                err
            );
        }
        log::trace!(
            "Dealt {} cards on a {}x{} board",
            deck.len(),
            shape.columns,
            shape.rows
        );
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dealt_deck_is_a_permutation_of_the_pairs() {
        let mut generator = RandomBoardGenerator::new(7);
        let deck = generator.generate(BoardShape::LANDSCAPE);

        assert_eq!(deck.len(), 20);
        assert!(deck.validate().is_ok());
        for (index, card) in deck.cards().iter().enumerate() {
            assert_eq!(usize::from(card.position), index);
            assert_eq!(card.face, CardFace::for_pair_index(card.pair_id.0));
        }
    }

    #[test]
    fn same_seed_deals_same_board() {
        let a = RandomBoardGenerator::new(42).generate(BoardShape::PORTRAIT);
        let b = RandomBoardGenerator::new(42).generate(BoardShape::PORTRAIT);
        assert_eq!(a, b);
    }

    #[test]
    fn successive_deals_reshuffle() {
        let mut generator = RandomBoardGenerator::new(3);
        let first = generator.generate(BoardShape::PORTRAIT);
        let second = generator.generate(BoardShape::PORTRAIT);
        assert_ne!(first, second);
    }

    #[test]
    fn shuffle_frequencies_are_flat() {
        let mut source = SeededSource::new(0x5eed);
        let mut counts = [0u32; 6];
        let rounds = 60_000;

        for _ in 0..rounds {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut source);
            let slot = match items {
                [0, 1, 2] => 0,
                [0, 2, 1] => 1,
                [1, 0, 2] => 2,
                [1, 2, 0] => 3,
                [2, 0, 1] => 4,
                [2, 1, 0] => 5,
                _ => unreachable!(),
            };
            counts[slot] += 1;
        }

        let expected = rounds / 6;
        for count in counts {
            // a 5% band is far outside the sampling noise at this size
            assert!(count.abs_diff(expected) < expected / 20, "{counts:?}");
        }
    }
}
