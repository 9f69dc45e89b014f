//! Match configuration.
//!
//! Defaults reproduce the standard duel: five-card hands, two Jester
//! charges per side and a Jack/Queen/King ladder of 15/25/40 health.
//! Any field may be omitted from a TOML document and falls back to its
//! default.
//!
//! ```
//! use ladder_duel::core::MatchConfig;
//!
//! let config = MatchConfig::from_toml_str("seed = 9\njester_charges = 1").unwrap();
//! assert_eq!(config.seed, 9);
//! assert_eq!(config.jester_charges, 1);
//! assert_eq!(config.max_hand_size, 5);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::DECK_SIZE;

/// Tunable duel parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Hand-size cap for both sides.
    #[serde(default = "default_max_hand_size")]
    pub max_hand_size: usize,

    /// Hand refreshes available to each side.
    #[serde(default = "default_jester_charges")]
    pub jester_charges: u8,

    /// Max health of the Jack, Queen and King stages, in ladder order.
    #[serde(default = "default_ladder_health")]
    pub ladder_health: [u32; 3],

    /// Number of event messages retained in the action history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Seed for the deck and AI streams.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_hand_size: default_max_hand_size(),
            jester_charges: default_jester_charges(),
            ladder_health: default_ladder_health(),
            history_limit: default_history_limit(),
            seed: default_seed(),
        }
    }
}

fn default_max_hand_size() -> usize {
    5
}
fn default_jester_charges() -> u8 {
    2
}
fn default_ladder_health() -> [u32; 3] {
    [15, 25, 40]
}
fn default_history_limit() -> usize {
    15
}
fn default_seed() -> u64 {
    42
}

impl MatchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    pub fn with_jester_charges(mut self, charges: u8) -> Self {
        self.jester_charges = charges;
        self
    }

    pub fn with_ladder_health(mut self, health: [u32; 3]) -> Self {
        self.ladder_health = health;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations a duel cannot be played with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // A Spades combo needs a second card in hand.
        if self.max_hand_size < 2 {
            return Err(ConfigError::ValidationError(
                "max_hand_size must be at least 2".to_string(),
            ));
        }
        // Both opening hands, plus one draw each, must come out of the deck.
        if (self.max_hand_size + 1) * 2 > DECK_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "max_hand_size {} is too large for a {}-card deck",
                self.max_hand_size, DECK_SIZE
            )));
        }
        if self.ladder_health.contains(&0) {
            return Err(ConfigError::ValidationError(
                "every ladder stage needs positive health".to_string(),
            ));
        }
        Ok(())
    }
}
