//! Playing cards: suit, rank and derived attack value.
//!
//! Only Ace through Ten are ever dealt. Face ranks appear solely as ladder
//! stage labels (see [`crate::combatant::StageLabel`]).

use serde::{Deserialize, Serialize};

/// Card suit. The suit picks the action family when the card is played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs];

    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        };
        f.write_str(name)
    }
}

/// Playable rank, Ace low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
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
}

impl Rank {
    pub const ALL: [Rank; 10] = [
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
    ];

    /// Numeric value; Ace counts 1.
    pub const fn value(self) -> u32 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Ace => f.write_str("Ace"),
            other => write!(f, "{}", other.value()),
        }
    }
}

/// An immutable playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Magnitude used for damage, healing and AI scoring.
    #[must_use]
    pub const fn attack_value(self) -> u32 {
        self.rank.value()
    }

    #[must_use]
    pub fn is_ace(self) -> bool {
        self.rank == Rank::Ace
    }

    /// Short label such as `7♣`.
    #[must_use]
    pub fn short(self) -> String {
        match self.rank {
            Rank::Ace => format!("A{}", self.suit.symbol()),
            r => format!("{}{}", r.value(), self.suit.symbol()),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = Suit::ALL.len() * Rank::ALL.len();

/// All 40 cards in suit-major order.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .into_iter()
        .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(suit, rank)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_attack_values() {
        assert_eq!(Card::new(Suit::Spades, Rank::Ace).attack_value(), 1);
        assert_eq!(Card::new(Suit::Hearts, Rank::Seven).attack_value(), 7);
        assert_eq!(Card::new(Suit::Clubs, Rank::Ten).attack_value(), 10);
    }

    #[test]
    fn test_standard_deck_is_unique() {
        let deck = standard_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck.len(), 40);

        let unique: HashSet<_> = deck.iter().collect();
        assert_eq!(unique.len(), 40);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Suit::Diamonds, Rank::Ace).to_string(), "Ace of Diamonds");
        assert_eq!(Card::new(Suit::Clubs, Rank::Nine).short(), "9♣");
        assert_eq!(Card::new(Suit::Hearts, Rank::Ace).short(), "A♥");
    }
}
