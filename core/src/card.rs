use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of a single card within a round.
///
/// Valid transitions:
/// - FaceDown -> FaceUp
/// - FaceUp -> FaceDown (mismatch)
/// - FaceUp -> Matched
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    #[default]
    FaceDown,
    FaceUp,
    Matched,
}

impl CardState {
    pub const fn is_face_down(self) -> bool {
        matches!(self, Self::FaceDown)
    }

    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

    pub const fn symbol(self) -> char {
        use Suit::*;
        match self {
            Spade => '♠',
            Heart => '♥',
            Diamond => '♦',
            Club => '♣',
        }
    }

    /// Hearts and diamonds are drawn red.
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Heart | Self::Diamond)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub const fn label(self) -> &'static str {
        use Rank::*;
        match self {
            Ace => "A",
            Two => "2",
            Three => "3",
            Four => "4",
            Five => "5",
            Six => "6",
            Seven => "7",
            Eight => "8",
            Nine => "9",
            Ten => "10",
            Jack => "J",
            Queen => "Q",
            King => "K",
        }
    }
}

/// Cosmetic label printed on a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFace {
    pub rank: Rank,
    pub suit: Suit,
}

impl CardFace {
    /// Suit cycles fastest, so the first four pairs are the four aces. Labels wrap after 52 pairs.
    pub const fn for_pair_index(index: u16) -> Self {
        let index = index as usize;
        Self {
            rank: Rank::ALL[(index / Suit::ALL.len()) % Rank::ALL.len()],
            suit: Suit::ALL[index % Suit::ALL.len()],
        }
    }
}

impl fmt::Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub pair_id: PairId,
    pub face: CardFace,
    pub position: Position,
    pub state: CardState,
}

impl Card {
    pub(crate) const fn face_down(pair_id: PairId, position: Position) -> Self {
        Self {
            pair_id,
            face: CardFace::for_pair_index(pair_id.0),
            position,
            state: CardState::FaceDown,
        }
    }

    pub const fn pairs_with(&self, other: &Card) -> bool {
        self.pair_id.0 == other.pair_id.0 && self.position != other.position
    }

    /// What a player may see of this card.
    pub const fn view(&self) -> CardView {
        match self.state {
            CardState::FaceDown => CardView::FaceDown,
            CardState::FaceUp => CardView::FaceUp(self.face),
            CardState::Matched => CardView::Matched(self.face),
        }
    }
}

/// Player-visible state of a grid cell, the face is hidden while the card is down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardView {
    #[default]
    FaceDown,
    FaceUp(CardFace),
    Matched(CardFace),
}

impl CardView {
    pub const fn face(self) -> Option<CardFace> {
        match self {
            Self::FaceDown => None,
            Self::FaceUp(face) | Self::Matched(face) => Some(face),
        }
    }
}
