//! Error types for duel operations and configuration loading.
//!
//! Every `DuelError` is recoverable: the rejected call leaves the match
//! untouched and the caller may re-prompt.

use thiserror::Error;

use crate::cards::Card;
use crate::rules::SubAction;

/// A rejected duel operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DuelError {
    #[error("card index {index} is out of range for a hand of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no cards to combine with Spades")]
    IllegalComboPlay,
    #[error("card {index} cannot be its own combo partner")]
    InvalidComboPartner { index: usize },
    #[error("{card} needs a choice of action")]
    MissingSubAction { card: Card },
    #[error("{choice} is not an option for {card}")]
    InvalidSubAction { choice: SubAction, card: Card },
    #[error("no Jester charges left")]
    NoRefreshCharges,
    #[error("cannot {operation} during {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: &'static str,
    },
    #[error("the match is over")]
    MatchOver,
}

/// Configuration loading error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}
