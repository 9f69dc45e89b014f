//! # ladder-duel
//!
//! A two-combatant, turn-based card battle engine.
//!
//! A human and a computer opponent share one 40-card deck (Ace to Ten in
//! four suits). Each defends a three-stage ladder of Jack, Queen and King
//! health pools and plays cards from a hand of up to five. Suit decides what
//! a card does:
//!
//! | Suit | Effect |
//! |---|---|
//! | Hearts | attack or heal |
//! | Diamonds | attack or defend |
//! | Clubs | attack for double value |
//! | Spades | attack combined with a second card |
//! | any Ace | 1 damage and refill the hand |
//!
//! Whoever clears the opponent's King first wins.
//!
//! ## Modules
//!
//! - `core`: sides, configuration, errors, RNG
//! - `cards`: cards and the shared deck
//! - `combatant`: ladders and per-side state
//! - `rules`: card rules and action resolution
//! - `ai`: Easy, Medium and Hard planners
//! - `engine`: the turn state machine and its events
//!
//! ## Example
//!
//! ```
//! use ladder_duel::{Difficulty, Duel, Side};
//!
//! let duel = Duel::with_seed(Difficulty::Medium, 42);
//! assert_eq!(duel.combatant(Side::Player).hand().len(), 5);
//! assert_eq!(duel.card_count(), 40);
//! ```

pub mod ai;
pub mod cards;
pub mod combatant;
pub mod core;
pub mod engine;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, DuelError, GameRng, MatchConfig, RngStream, Side, SideMap,
};

pub use crate::cards::{Card, Deck, DeckSnapshot, Rank, Suit, DECK_SIZE};

pub use crate::combatant::{Combatant, HitReport, Ladder, LadderStage, StageLabel};

pub use crate::rules::{ActionResolver, CardRule, Effect, Play, SubAction};

pub use crate::ai::{planner_for, Decision, Difficulty, Planner, PlannerView};

pub use crate::engine::{
    ActionHistory, CombatantSnapshot, Duel, MatchSnapshot, PlayerPrompt, ResolutionEvent,
    TurnPhase,
};
