//! Turn engine: phases, the `Duel` state machine, and its events.

pub mod duel;
pub mod event;
pub mod phase;

pub use duel::{CombatantSnapshot, Duel, MatchSnapshot};
pub use event::{ActionHistory, PlayerPrompt, ResolutionEvent};
pub use phase::TurnPhase;
