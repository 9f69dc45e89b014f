//! Cards and the shared deck.
//!
//! ## Key Types
//!
//! - `Card`: immutable (suit, rank) value with an attack value
//! - `Deck`: draw pile + discard pile, reshuffled on exhaustion

pub mod card;
pub mod deck;

pub use card::{standard_deck, Card, Rank, Suit, DECK_SIZE};
pub use deck::{Deck, DeckSnapshot};
