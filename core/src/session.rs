use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::time::Duration;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Lines shown before play opens when the intro is enabled.
pub const INTRO_MESSAGES: [&str; 3] = ["LEVEL 1", "FIND MATCHING CARDS", "GO!"];

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long both cards of a pair stay visible before the caller resolves them.
    pub resolve_delay: Duration,
    /// Pause between the last match and showing the results.
    pub completion_delay: Duration,
    /// Hold each round in the intro phase until [`GameSession::finish_intro`].
    pub with_intro: bool,
    /// Fill in the efficiency percentage of round summaries.
    pub track_efficiency: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            resolve_delay: Duration::from_secs(1),
            completion_delay: Duration::from_secs(2),
            with_intro: false,
            track_efficiency: false,
        }
    }
}

/// Valid transitions:
/// - Idle -> Intro -> Active
/// - Idle -> Active
/// - Active -> Complete
/// - any -> Intro | Active (start or reset)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No round dealt yet
    #[default]
    Idle,
    /// Round dealt, waiting for the intro to finish
    Intro,
    /// Accepting flips
    Active,
    /// All pairs matched
    Complete,
}

impl SessionPhase {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub matched_pairs: Position,
    pub flips: u32,
    pub misses: u32,
}

impl Counters {
    /// Percentage of flips that ended up in a match, `None` before the first flip.
    pub fn efficiency(&self) -> Option<u8> {
        if self.flips == 0 {
            return None;
        }
        let matched_flips = u64::from(self.matched_pairs) * 2 * 100;
        let flips = u64::from(self.flips);
        let rounded = (matched_flips + flips / 2) / flips;
        Some(rounded.min(100) as u8)
    }
}

/// Final numbers of a completed round, what the caller logs to history.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub shape: BoardShape,
    pub card_count: Position,
    pub flip_count: u32,
    pub miss_count: u32,
    pub efficiency: Option<u8>,
}

/// One round of the memory game, from dealing to the last match.
///
/// The session never sleeps: a second flip hands back a [`ResolutionTicket`] and the caller redeems it with
/// [`GameSession::resolve`] once its own timer fired. Flips arriving in the meantime are ignored.
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomBoardGenerator> {
    generator: G,
    config: SessionConfig,
    shape: BoardShape,
    cards: Vec<Card>,
    selection: SmallVec<[Position; 2]>,
    /// Whether the first card of the open attempt belonged to an already revealed pair.
    lead_was_revealed: bool,
    seen_positions: BTreeSet<Position>,
    /// Insertion ordered, a pair is pushed once both of its cards have been seen.
    revealed_pairs: Vec<PairId>,
    counters: Counters,
    phase: SessionPhase,
    generation: u32,
}

impl GameSession<RandomBoardGenerator> {
    pub fn seeded(seed: u64, config: SessionConfig) -> Self {
        Self::new(RandomBoardGenerator::new(seed), config)
    }
}

impl<G: BoardGenerator> GameSession<G> {
    pub fn new(generator: G, config: SessionConfig) -> Self {
        Self {
            generator,
            config,
            shape: BoardShape::default(),
            cards: Vec::new(),
            selection: SmallVec::new(),
            lead_was_revealed: false,
            seen_positions: BTreeSet::new(),
            revealed_pairs: Vec::new(),
            counters: Counters::default(),
            phase: SessionPhase::Idle,
            generation: 0,
        }
    }

    /// Deals a fresh board and clears every counter and memory set.
    pub fn start_round(&mut self, shape: BoardShape) -> Result<()> {
        let shape = shape.validate()?;
        self.deal(shape);
        Ok(())
    }

    /// Starts over with the last used shape, outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.deal(self.shape);
    }

    /// Opens play after the intro messages were shown, returns whether anything changed.
    pub fn finish_intro(&mut self) -> bool {
        if matches!(self.phase, SessionPhase::Intro) {
            log::debug!("intro finished, round {} open", self.generation);
            self.phase = SessionPhase::Active;
            true
        } else {
            false
        }
    }

    /// Re-deals only when a running round switches between landscape and portrait.
    pub fn on_viewport_change(&mut self, viewport_width: f64, viewport_height: f64) -> bool {
        let shape = determine_shape(viewport_width, viewport_height);
        if !self.phase.is_active() || shape == self.shape {
            return false;
        }
        log::debug!(
            "viewport changed orientation, re-dealing {}x{}",
            shape.columns,
            shape.rows
        );
        self.deal(shape);
        true
    }

    fn deal(&mut self, shape: BoardShape) {
        let deck = self.generator.generate(shape);
        debug_assert_eq!(deck.shape(), shape);

        self.shape = shape;
        self.cards = deck.into_cards();
        self.selection.clear();
        self.lead_was_revealed = false;
        self.seen_positions.clear();
        self.revealed_pairs.clear();
        self.counters = Counters::default();
        self.generation = self.generation.wrapping_add(1);
        self.phase = if self.config.with_intro {
            SessionPhase::Intro
        } else {
            SessionPhase::Active
        };
        log::debug!(
            "round {} dealt on {}x{}, {:?}",
            self.generation,
            shape.columns,
            shape.rows,
            self.phase
        );
    }

    /// Turns a face-down card up.
    ///
    /// Ignored (no error) while inactive, on a card that is already up or matched, or while a pair is
    /// waiting for resolution.
    pub fn flip(&mut self, position: Position) -> Result<FlipOutcome> {
        let index = self.validate_position(position)?;

        if !self.phase.is_active() {
            return Ok(FlipOutcome::NoChange);
        }
        if !self.cards[index].state.is_face_down() {
            return Ok(FlipOutcome::NoChange);
        }
        if self.selection.len() >= 2 {
            log::trace!("flip at {} ignored, pair pending", position);
            return Ok(FlipOutcome::NoChange);
        }

        let pair_id = self.cards[index].pair_id;
        if self.selection.is_empty() {
            self.lead_was_revealed = self.is_revealed(pair_id);
        }

        self.seen_positions.insert(position);
        self.note_if_revealed(pair_id);

        self.cards[index].state = CardState::FaceUp;
        self.selection.push(position);
        self.counters.flips += 1;
        log::trace!(
            "flipped {} at {}, flip count {}",
            self.cards[index].face,
            position,
            self.counters.flips
        );

        Ok(FlipOutcome::Flipped {
            card: self.cards[index],
            pending: self.pending_ticket(),
        })
    }

    /// Adds the pair to the revealed set once every position holding it has been seen.
    fn note_if_revealed(&mut self, pair_id: PairId) {
        if self.is_revealed(pair_id) {
            return;
        }
        let all_seen = self
            .positions_of(pair_id)
            .all(|position| self.seen_positions.contains(&position));
        if all_seen {
            log::trace!("pair {} revealed", pair_id);
            self.revealed_pairs.push(pair_id);
        }
    }

    /// Settles the two face-up cards the ticket was issued for.
    pub fn resolve(&mut self, ticket: ResolutionTicket) -> ResolveOutcome {
        if ticket.generation != self.generation
            || self.selection.as_slice() != [ticket.first, ticket.second]
        {
            log::debug!(
                "stale resolution for round {}, current round {}",
                ticket.generation,
                self.generation
            );
            return ResolveOutcome::Stale;
        }

        let (first, second) = (ticket.first, ticket.second);
        let (first_index, second_index) = (usize::from(first), usize::from(second));
        self.selection.clear();

        if self.cards[first_index].pairs_with(&self.cards[second_index]) {
            self.cards[first_index].state = CardState::Matched;
            self.cards[second_index].state = CardState::Matched;
            self.counters.matched_pairs += 1;
            log::debug!(
                "matched {} at {} and {}, {}/{} pairs",
                self.cards[first_index].face,
                first,
                second,
                self.counters.matched_pairs,
                self.total_pairs()
            );

            if self.counters.matched_pairs == self.total_pairs() {
                self.phase = SessionPhase::Complete;
                let summary = self.summary();
                log::debug!(
                    "round {} complete, {} flips, {} misses",
                    self.generation,
                    summary.flip_count,
                    summary.miss_count
                );
                ResolveOutcome::RoundComplete {
                    first,
                    second,
                    summary,
                }
            } else {
                ResolveOutcome::Matched { first, second }
            }
        } else {
            let missed = self.lead_was_revealed;
            if missed {
                self.counters.misses += 1;
            }
            self.cards[first_index].state = CardState::FaceDown;
            self.cards[second_index].state = CardState::FaceDown;
            log::debug!(
                "mismatch at {} and {}, missed: {}, miss count {}",
                first,
                second,
                missed,
                self.counters.misses
            );
            ResolveOutcome::Mismatched {
                first,
                second,
                missed,
            }
        }
    }

    /// Resolves whatever pair is currently waiting, for callers that keep no ticket around.
    pub fn resolve_pending(&mut self) -> ResolveOutcome {
        match self.pending_ticket() {
            Some(ticket) => self.resolve(ticket),
            None => ResolveOutcome::Stale,
        }
    }

    pub fn pending_ticket(&self) -> Option<ResolutionTicket> {
        match self.selection.as_slice() {
            &[first, second] => Some(ResolutionTicket {
                generation: self.generation,
                first,
                second,
            }),
            _ => None,
        }
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            shape: self.shape,
            card_count: self.shape.total_cells(),
            flip_count: self.counters.flips,
            miss_count: self.counters.misses,
            efficiency: if self.config.track_efficiency {
                self.counters.efficiency()
            } else {
                None
            },
        }
    }

    fn validate_position(&self, position: Position) -> Result<usize> {
        let index = usize::from(position);
        if index < self.cards.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    pub fn card_at(&self, position: Position) -> Result<Card> {
        let index = self.validate_position(position)?;
        Ok(self.cards[index])
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn shape(&self) -> BoardShape {
        self.shape
    }

    pub fn total_pairs(&self) -> Position {
        self.shape.total_pairs()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn selection(&self) -> &[Position] {
        &self.selection
    }

    pub fn is_seen(&self, position: Position) -> bool {
        self.seen_positions.contains(&position)
    }

    pub fn seen_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.seen_positions.iter().copied()
    }

    pub fn is_revealed(&self, pair_id: PairId) -> bool {
        self.revealed_pairs.contains(&pair_id)
    }

    /// Revealed pairs in the order they were completed.
    pub fn revealed_pairs(&self) -> &[PairId] {
        &self.revealed_pairs
    }

    pub fn revealed_faces(&self) -> impl Iterator<Item = CardFace> + '_ {
        self.revealed_pairs
            .iter()
            .map(|pair_id| CardFace::for_pair_index(pair_id.0))
    }

    pub fn positions_of(&self, pair_id: PairId) -> impl Iterator<Item = Position> + use<'_, G> {
        self.cards
            .iter()
            .filter(move |card| card.pair_id == pair_id)
            .map(|card| card.position)
    }

    /// Player-visible board, indexed `[row, column]`.
    pub fn grid_view(&self) -> Array2<CardView> {
        let dims = (usize::from(self.shape.rows), usize::from(self.shape.columns));
        let columns = dims.1;
        Array2::from_shape_fn(dims, |(row, column)| {
            self.cards
                .get(row * columns + column)
                .map(Card::view)
                .unwrap_or_default()
        })
    }
}
