//! Combatants and their health ladders.

#[allow(clippy::module_inception)]
pub mod combatant;
pub mod ladder;

pub use combatant::{Combatant, Hand, HitReport};
pub use ladder::{Ladder, LadderStage, StageLabel, LADDER_STAGES};
