//! The shared deck: a draw pile and a discard pile.
//!
//! Cards are drawn from the top of the draw pile. When the draw pile runs
//! dry mid-draw, the whole discard pile is shuffled into a fresh draw pile
//! and drawing continues. Running out of both piles is not an error; the
//! caller simply receives fewer cards than it asked for.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::{standard_deck, Card};
use crate::core::GameRng;

/// Draw pile plus discard pile, with its own shuffle stream.
#[derive(Clone, Debug)]
pub struct Deck {
    /// Top of the pile is the end of the vector.
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    rng: GameRng,
}

impl Deck {
    /// A shuffled standard 40-card deck.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        let mut deck = Self::from_piles(standard_deck(), Vec::new(), rng);
        deck.shuffle();
        deck
    }

    /// A deck with exactly the given piles, unshuffled.
    #[must_use]
    pub fn from_piles(draw_pile: Vec<Card>, discard_pile: Vec<Card>, rng: GameRng) -> Self {
        Self {
            draw_pile,
            discard_pile,
            rng,
        }
    }

    /// Shuffle the draw pile in place.
    pub fn shuffle(&mut self) {
        self.rng.shuffle(&mut self.draw_pile);
    }

    /// Draw up to `n` cards, reshuffling the discard pile when needed.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    break;
                }
                self.reshuffle_discards();
            }
            if let Some(card) = self.draw_pile.pop() {
                drawn.push(card);
            }
        }
        if drawn.len() < n {
            debug!(requested = n, drawn = drawn.len(), "short draw");
        }
        drawn
    }

    /// Put a played card on the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    fn reshuffle_discards(&mut self) {
        debug!(cards = self.discard_pile.len(), "reshuffling discard pile into draw pile");
        self.draw_pile.append(&mut self.discard_pile);
        self.shuffle();
    }

    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }

    /// Cards currently held by the deck (both piles).
    #[must_use]
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Public view of the deck for snapshots.
    #[must_use]
    pub fn snapshot(&self) -> DeckSnapshot {
        DeckSnapshot {
            draw_pile: self.draw_pile.len(),
            discard_pile: self.discard_pile.clone(),
        }
    }
}

/// Draw-pile size and the face-up discard pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSnapshot {
    pub draw_pile: usize,
    pub discard_pile: Vec<Card>,
}
