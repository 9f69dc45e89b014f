//! Turn phases.
//!
//! The human side's sub-action and combo-partner prompts are explicit
//! suspend points: the engine parks in `AwaitingSubAction` or
//! `AwaitingComboCard` and the presentation layer resumes it by calling
//! back into [`crate::engine::Duel`]. The pending card stays in the hand
//! until the play completes.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::Side;
use crate::rules::SubAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the human to pick a card (or use a Jester).
    PlayerTurn,
    /// A Hearts or Diamonds card awaits its sub-action.
    AwaitingSubAction {
        index: usize,
        card: Card,
        options: [SubAction; 2],
    },
    /// A Spades card awaits its partner.
    AwaitingComboCard { index: usize, card: Card },
    /// The computer acts next.
    AiTurn,
    /// Absorbing terminal state.
    GameOver { winner: Side },
}

impl TurnPhase {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TurnPhase::PlayerTurn => "the player's turn",
            TurnPhase::AwaitingSubAction { .. } => "a sub-action prompt",
            TurnPhase::AwaitingComboCard { .. } => "a combo prompt",
            TurnPhase::AiTurn => "the AI's turn",
            TurnPhase::GameOver { .. } => "game over",
        }
    }

    /// Side expected to act, `None` once the match is over.
    #[must_use]
    pub fn active_side(&self) -> Option<Side> {
        match self {
            TurnPhase::PlayerTurn
            | TurnPhase::AwaitingSubAction { .. }
            | TurnPhase::AwaitingComboCard { .. } => Some(Side::Player),
            TurnPhase::AiTurn => Some(Side::Ai),
            TurnPhase::GameOver { .. } => None,
        }
    }

    #[must_use]
    pub fn turn_of(side: Side) -> Self {
        match side {
            Side::Player => TurnPhase::PlayerTurn,
            Side::Ai => TurnPhase::AiTurn,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self, TurnPhase::GameOver { .. })
    }
}
