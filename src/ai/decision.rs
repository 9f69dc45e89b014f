//! Planner input and output.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::combatant::{Combatant, LadderStage};
use crate::rules::{CardRule, SubAction};

/// What the AI wants to do this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Play one card; `choice` is set for Hearts and Diamonds.
    PlaySingle {
        index: usize,
        card: Card,
        choice: Option<SubAction>,
    },
    /// Play a Spades card with a partner from the same hand.
    PlayCombo {
        lead: usize,
        partner: usize,
        lead_card: Card,
        partner_card: Card,
    },
    /// Spend a Jester charge to redraw the hand.
    UseRefresh,
    /// Nothing playable.
    NoAction,
}

/// Everything a planner may look at.
#[derive(Clone, Copy, Debug)]
pub struct PlannerView<'a> {
    pub hand: &'a [Card],
    pub own_stage: LadderStage,
    pub own_defense_active: bool,
    pub opponent_stage: LadderStage,
    pub opponent_defense_active: bool,
    pub jester_charges: u8,
}

impl<'a> PlannerView<'a> {
    /// View for `actor` facing `opponent`. `None` if either is defeated.
    #[must_use]
    pub fn new(actor: &'a Combatant, opponent: &Combatant) -> Option<Self> {
        Some(Self {
            hand: actor.hand(),
            own_stage: *actor.active_stage()?,
            own_defense_active: actor.defense_active(),
            opponent_stage: *opponent.active_stage()?,
            opponent_defense_active: opponent.defense_active(),
            jester_charges: actor.jester_charges(),
        })
    }

    /// Whether the card at `index` can be played on its own or as a combo lead.
    #[must_use]
    pub fn is_playable(&self, index: usize) -> bool {
        match self.hand.get(index) {
            Some(&card) => CardRule::of(card) != CardRule::Combo || self.hand.len() >= 2,
            None => false,
        }
    }

    /// Indices of playable cards, in hand order.
    pub fn playable(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.hand.len()).filter(move |&i| self.is_playable(i))
    }

    /// Mean attack value of the hand, 0 for an empty hand.
    #[must_use]
    pub fn mean_value(&self) -> f64 {
        if self.hand.is_empty() {
            return 0.0;
        }
        let total: u32 = self.hand.iter().map(|c| c.attack_value()).sum();
        f64::from(total) / self.hand.len() as f64
    }
}

/// First index with the largest key (ties keep the earlier card).
pub(crate) fn first_max_by_key(
    indices: impl IntoIterator<Item = usize>,
    mut key: impl FnMut(usize) -> i64,
) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for i in indices {
        let k = key(i);
        if best.map_or(true, |(_, b)| k > b) {
            best = Some((i, k));
        }
    }
    best.map(|(i, _)| i)
}
