//! Resolution events, player prompts and the action history.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::combatant::StageLabel;
use crate::core::Side;
use crate::rules::{Applied, CardRule, Effect, Play, SubAction};

/// One completed action, ready for the action-history log and rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionEvent {
    pub actor: Side,
    /// The play, `None` for a refresh or a pass.
    pub play: Option<Play>,
    pub effect: Effect,
    /// Headline message for the history log.
    pub message: String,
    /// Follow-up messages: refills, cleared stages, game over.
    pub notes: Vec<String>,
}

impl ResolutionEvent {
    /// Every message the event carries, headline first.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.message.as_str()).chain(self.notes.iter().map(String::as_str))
    }
}

/// Answer to `Duel::submit_player_card`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerPrompt {
    /// The card resolved immediately.
    Resolved(ResolutionEvent),
    /// Pick one of `options` with `Duel::submit_player_sub_action`.
    NeedsSubAction { card: Card, options: [SubAction; 2] },
    /// Pick a partner with `Duel::submit_player_combo_partner`.
    NeedsComboPartner { card: Card },
}

/// Bounded log of event messages, oldest dropped first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionHistory {
    entries: VecDeque<String>,
    limit: usize,
}

impl ActionHistory {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        if self.limit == 0 {
            return;
        }
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(message.into());
    }

    pub fn record(&mut self, event: &ResolutionEvent) {
        for message in event.messages() {
            self.push(message);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Headline for an applied play. `stage` is the actor's active stage, used
/// by heal messages.
pub(crate) fn describe_play(actor: Side, applied: &Applied, stage: Option<StageLabel>) -> String {
    let mut message = match (applied.play, applied.effect) {
        (_, Effect::Heal { amount, .. }) => {
            let stage = stage.map_or_else(|| "stage".to_string(), |s| s.to_string());
            match actor {
                Side::Player => format!("You healed your {stage} for {amount} health!"),
                Side::Ai => format!("AI healed its {stage} for {amount} health!"),
            }
        }
        (_, Effect::Defense) => match actor {
            Side::Player => "You have activated defense!".to_string(),
            Side::Ai => "AI has activated defense!".to_string(),
        },
        (play, Effect::Damage(hit)) => {
            let dealt = hit.dealt;
            let how = match play {
                Play::Combo { .. } => " with Spades combo",
                Play::Single { card, .. } => match CardRule::of(card) {
                    CardRule::Ace => " with an Ace",
                    CardRule::DoubleAttack => " with Clubs (double damage)",
                    _ => "",
                },
            };
            match actor {
                Side::Player => format!("You attacked for {dealt} damage{how}!"),
                Side::Ai => format!("AI attacked you for {dealt} damage{how}!"),
            }
        }
        (_, Effect::Refresh { .. }) => describe_refresh(actor),
        (_, Effect::NoAction) => describe_pass(actor),
    };
    if let Effect::Damage(hit) = applied.effect {
        if hit.mitigated {
            message.push_str(&format!(" ({} halved by defense)", hit.raw));
        }
    }
    message
}

pub(crate) fn describe_refresh(actor: Side) -> String {
    match actor {
        Side::Player => "You have refreshed your hand using a Jester!".to_string(),
        Side::Ai => "AI has refreshed its hand using a Jester!".to_string(),
    }
}

pub(crate) fn describe_pass(actor: Side) -> String {
    match actor {
        Side::Player => "You have no cards to play.".to_string(),
        Side::Ai => "AI has no cards to play.".to_string(),
    }
}

pub(crate) fn describe_refill(actor: Side, drawn: usize) -> String {
    match actor {
        Side::Player => format!("You refilled your hand with {drawn} cards!"),
        Side::Ai => format!("AI refilled its hand with {drawn} cards!"),
    }
}

pub(crate) fn describe_empty_hand(actor: Side, drawn: usize) -> String {
    match actor {
        Side::Player => format!("Your hand was empty! Drawing {drawn} new cards."),
        Side::Ai => format!("AI's hand was empty! AI draws {drawn} new cards."),
    }
}

pub(crate) fn describe_cleared(defender: Side, stage: StageLabel) -> String {
    match defender {
        Side::Player => format!("Your {stage} has fallen!"),
        Side::Ai => format!("The AI's {stage} has fallen!"),
    }
}

pub(crate) fn describe_winner(winner: Side) -> String {
    match winner {
        Side::Player => "You have won the game!".to_string(),
        Side::Ai => "You have been defeated!".to_string(),
    }
}
