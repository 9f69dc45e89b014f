//! Core types: sides, RNG, configuration and errors.

pub mod config;
pub mod error;
pub mod rng;
pub mod side;

pub use config::MatchConfig;
pub use error::{ConfigError, DuelError};
pub use rng::{GameRng, RngStream};
pub use side::{Side, SideMap};
