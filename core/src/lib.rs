#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use card::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod card;
mod error;
mod generator;
mod session;
mod types;

/// Viewports wider than this aspect ratio get the landscape board.
pub const LANDSCAPE_ASPECT_THRESHOLD: f64 = 1.2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardShape {
    pub columns: Dim,
    pub rows: Dim,
}

impl BoardShape {
    pub const LANDSCAPE: Self = Self::new_unchecked(5, 4);
    pub const PORTRAIT: Self = Self::new_unchecked(4, 5);

    pub const fn new_unchecked(columns: Dim, rows: Dim) -> Self {
        Self { columns, rows }
    }

    pub fn new(columns: Dim, rows: Dim) -> Result<Self> {
        Self::new_unchecked(columns, rows).validate()
    }

    pub fn validate(self) -> Result<Self> {
        let cells = self.total_cells();
        if cells < 2 || cells % 2 != 0 {
            Err(GameError::InvalidShape)
        } else {
            Ok(self)
        }
    }

    pub const fn total_cells(&self) -> Position {
        mult(self.columns, self.rows)
    }

    pub const fn total_pairs(&self) -> Position {
        self.total_cells() / 2
    }

    pub const fn is_landscape(&self) -> bool {
        self.columns > self.rows
    }

    pub fn coords_of(&self, position: Position) -> Option<Coord2> {
        if position >= self.total_cells() {
            return None;
        }
        let columns = Position::from(self.columns);
        let column = (position % columns).try_into().ok()?;
        let row = (position / columns).try_into().ok()?;
        Some((column, row))
    }

    pub fn position_at(&self, (column, row): Coord2) -> Option<Position> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(Position::from(row) * Position::from(self.columns) + Position::from(column))
    }
}

impl Default for BoardShape {
    fn default() -> Self {
        Self::PORTRAIT
    }
}

/// Picks the board for a viewport, a NaN ratio (zero-sized viewport) falls back to portrait.
pub fn determine_shape(viewport_width: f64, viewport_height: f64) -> BoardShape {
    let aspect_ratio = viewport_width / viewport_height;
    if aspect_ratio > LANDSCAPE_ASPECT_THRESHOLD {
        BoardShape::LANDSCAPE
    } else {
        BoardShape::PORTRAIT
    }
}

/// Cards of one round laid out by position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    shape: BoardShape,
    cards: Vec<Card>,
}

impl Deck {
    /// Takes cards in their final order and stamps each with its index as position.
    pub(crate) fn from_dealt(shape: BoardShape, mut cards: Vec<Card>) -> Self {
        for (index, card) in cards.iter_mut().enumerate() {
            card.position = index as Position;
        }
        Self { shape, cards }
    }

    /// Builds a deck from an explicit layout, `pair_ids[p]` is the pair at position `p`.
    pub fn from_pair_ids(shape: BoardShape, pair_ids: &[u16]) -> Result<Self> {
        let shape = shape.validate()?;
        if pair_ids.len() != usize::from(shape.total_cells()) {
            return Err(GameError::InvalidShape);
        }

        let cards = pair_ids
            .iter()
            .enumerate()
            .map(|(index, &pair)| Card::face_down(PairId(pair), index as Position))
            .collect();
        let deck = Self { shape, cards };
        deck.validate()?;
        Ok(deck)
    }

    /// Checks that positions follow the order and every pair occurs exactly twice.
    pub fn validate(&self) -> Result<()> {
        if self.cards.len() != usize::from(self.shape.total_cells()) {
            return Err(GameError::InvalidShape);
        }

        let mut counts: Vec<u8> = alloc::vec![0; self.cards.len()];
        for (index, card) in self.cards.iter().enumerate() {
            if usize::from(card.position) != index {
                return Err(GameError::InvalidDeck);
            }
            let slot = counts
                .get_mut(usize::from(card.pair_id.0))
                .ok_or(GameError::InvalidDeck)?;
            if *slot == 2 {
                return Err(GameError::InvalidDeck);
            }
            *slot += 1;
        }

        if counts.iter().all(|&count| count == 0 || count == 2) {
            Ok(())
        } else {
            Err(GameError::InvalidDeck)
        }
    }

    pub fn shape(&self) -> BoardShape {
        self.shape
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn positions_of(&self, pair_id: PairId) -> impl Iterator<Item = Position> + '_ {
        self.cards
            .iter()
            .filter(move |card| card.pair_id == pair_id)
            .map(|card| card.position)
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl Index<Position> for Deck {
    type Output = Card;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cards[usize::from(position)]
    }
}

/// Handle for a pending pair, redeemed through [`GameSession::resolve`] once the reveal delay elapsed.
///
/// A ticket from before the last start or reset is stale and resolves to nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTicket {
    pub(crate) generation: u32,
    pub first: Position,
    pub second: Position,
}

impl ResolutionTicket {
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

/// Notification for a renderer, one per visible transition.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Flipped { position: Position, card: Card },
    Matched { first: Position, second: Position },
    Mismatched { first: Position, second: Position },
    RoundComplete { flip_count: u32, miss_count: u32 },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    NoChange,
    Flipped {
        card: Card,
        pending: Option<ResolutionTicket>,
    },
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Flipped { .. } => true,
        }
    }

    pub const fn pending(self) -> Option<ResolutionTicket> {
        match self {
            Self::NoChange => None,
            Self::Flipped { pending, .. } => pending,
        }
    }

    pub fn event(self) -> Option<SessionEvent> {
        match self {
            Self::NoChange => None,
            Self::Flipped { card, .. } => Some(SessionEvent::Flipped {
                position: card.position,
                card,
            }),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResolveOutcome {
    /// The ticket belongs to a previous round or was already redeemed.
    Stale,
    Matched {
        first: Position,
        second: Position,
    },
    Mismatched {
        first: Position,
        second: Position,
        /// The pair had been fully revealed before this attempt.
        missed: bool,
    },
    RoundComplete {
        first: Position,
        second: Position,
        summary: RoundSummary,
    },
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        use ResolveOutcome::*;
        match self {
            Stale => false,
            Matched { .. } => true,
            Mismatched { .. } => true,
            RoundComplete { .. } => true,
        }
    }

    pub const fn summary(self) -> Option<RoundSummary> {
        match self {
            Self::RoundComplete { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn events(self) -> SmallVec<[SessionEvent; 2]> {
        use ResolveOutcome::*;
        let mut events = SmallVec::new();
        match self {
            Stale => {}
            Matched { first, second } => events.push(SessionEvent::Matched { first, second }),
            Mismatched { first, second, .. } => {
                events.push(SessionEvent::Mismatched { first, second })
            }
            RoundComplete {
                first,
                second,
                summary,
            } => {
                events.push(SessionEvent::Matched { first, second });
                events.push(SessionEvent::RoundComplete {
                    flip_count: summary.flip_count,
                    miss_count: summary.miss_count,
                });
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_picks_landscape_and_portrait() {
        assert_eq!(determine_shape(1920.0, 1080.0), BoardShape::LANDSCAPE);
        assert_eq!(determine_shape(1080.0, 1920.0), BoardShape::PORTRAIT);
        // exactly at the threshold stays portrait
        assert_eq!(determine_shape(1200.0, 1000.0), BoardShape::PORTRAIT);
        assert_eq!(determine_shape(0.0, 0.0), BoardShape::PORTRAIT);
    }

    #[test]
    fn stock_shapes_hold_ten_pairs() {
        for shape in [BoardShape::LANDSCAPE, BoardShape::PORTRAIT] {
            assert_eq!(shape.total_cells(), 20);
            assert_eq!(shape.total_pairs(), 10);
            assert!(shape.validate().is_ok());
        }
    }

    #[test]
    fn odd_or_empty_shapes_are_rejected() {
        assert_eq!(BoardShape::new(3, 3), Err(GameError::InvalidShape));
        assert_eq!(BoardShape::new(1, 1), Err(GameError::InvalidShape));
        assert_eq!(BoardShape::new(0, 4), Err(GameError::InvalidShape));
        assert!(BoardShape::new(1, 2).is_ok());
    }

    #[test]
    fn coords_follow_row_major_order() {
        let shape = BoardShape::LANDSCAPE;
        assert_eq!(shape.coords_of(0), Some((0, 0)));
        assert_eq!(shape.coords_of(6), Some((1, 1)));
        assert_eq!(shape.coords_of(19), Some((4, 3)));
        assert_eq!(shape.coords_of(20), None);
        assert_eq!(shape.position_at((1, 1)), Some(6));
        assert_eq!(shape.position_at((5, 0)), None);
    }

    #[test]
    fn deck_layout_requires_exact_pairs() {
        let shape = BoardShape::new(2, 2).unwrap();
        assert!(Deck::from_pair_ids(shape, &[0, 1, 1, 0]).is_ok());
        assert_eq!(
            Deck::from_pair_ids(shape, &[0, 0, 0, 1]),
            Err(GameError::InvalidDeck)
        );
        assert_eq!(
            Deck::from_pair_ids(shape, &[0, 1, 1]),
            Err(GameError::InvalidShape)
        );
        assert_eq!(
            Deck::from_pair_ids(shape, &[0, 9, 9, 0]),
            Err(GameError::InvalidDeck)
        );

        let large = BoardShape::new(16, 16).unwrap();
        assert_eq!(
            Deck::from_pair_ids(large, &[0; 256]),
            Err(GameError::InvalidDeck)
        );
    }

    #[test]
    fn round_complete_expands_to_match_and_completion_events() {
        let summary = RoundSummary {
            shape: BoardShape::PORTRAIT,
            card_count: 20,
            flip_count: 24,
            miss_count: 1,
            efficiency: None,
        };
        let events = ResolveOutcome::RoundComplete {
            first: 3,
            second: 7,
            summary,
        }
        .events();

        assert_eq!(
            events.as_slice(),
            &[
                SessionEvent::Matched {
                    first: 3,
                    second: 7
                },
                SessionEvent::RoundComplete {
                    flip_count: 24,
                    miss_count: 1
                },
            ]
        );
        assert!(ResolveOutcome::Stale.events().is_empty());
    }
}
