//! Structured effects reported back to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::combatant::HitReport;

/// What a resolved action did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// The opponent's active stage was hit.
    Damage(HitReport),
    /// The actor's active stage was healed by `restored` of `amount`.
    Heal { amount: u32, restored: u32 },
    /// The actor raised a defense against the next hit.
    Defense,
    /// The actor spent a Jester and drew `drawn` fresh cards.
    Refresh { drawn: usize },
    /// The actor had nothing to play.
    NoAction,
}

impl Effect {
    /// Damage that reached the opponent's ladder.
    #[must_use]
    pub fn damage_dealt(&self) -> u32 {
        match self {
            Effect::Damage(hit) => hit.dealt,
            _ => 0,
        }
    }
}
