use crate::card::{Card, Rank, Suit};
use crate::error::EngineError;
use crate::hand::Hand;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A round never starts on a deck with fewer cards than this; the deck is
/// rebuilt and reshuffled instead. Never evaluated mid-round.
pub const RESHUFFLE_THRESHOLD: usize = 40;

const DECK_SIZE: usize = 52;

#[derive(Debug, Clone)]
pub struct Deck {
    pub(crate) cards: Vec<Card>,
    pub(crate) cursor: usize,
    rng: ChaCha8Rng,
}

impl Deck {
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Deterministic deck for tests and replayable simulations.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(DECK_SIZE),
            cursor: 0,
            rng,
        };
        deck.reset();
        deck
    }

    /// Rebuild the full 52-card sequence, shuffle it, and rewind the cursor.
    pub fn reset(&mut self) {
        self.cards.clear();
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                self.cards.push(Card::new(suit, rank));
            }
        }
        self.cards.shuffle(&mut self.rng);
        self.cursor = 0;
    }

    pub fn draw(&mut self) -> Result<Card, EngineError> {
        let card = self
            .cards
            .get(self.cursor)
            .copied()
            .ok_or(EngineError::DeckExhausted)?;
        self.cursor += 1;
        Ok(card)
    }

    pub fn deal_to(&mut self, hand: &mut Hand) -> Result<(), EngineError> {
        let card = self.draw()?;
        hand.add_card(card);
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    pub fn needs_shuffle(&self) -> bool {
        self.remaining() < RESHUFFLE_THRESHOLD
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
