//! A combatant: hand, ladder, defense flag and Jester charges.
//!
//! Human and AI sides share this type; only the source of their decisions
//! differs.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::ladder::{Ladder, LadderStage, StageLabel};
use crate::cards::{Card, Deck};
use crate::core::{DuelError, MatchConfig};

/// Cards in hand. Sized so a capped hand never spills to the heap.
pub type Hand = SmallVec<[Card; 8]>;

/// What one incoming hit did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitReport {
    /// Damage before mitigation.
    pub raw: u32,
    /// Damage actually subtracted from the stage.
    pub dealt: u32,
    /// A defense was consumed by this hit.
    pub mitigated: bool,
    /// Stage cleared by this hit.
    pub cleared: Option<StageLabel>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combatant {
    hand: Hand,
    ladder: Ladder,
    defense_active: bool,
    jester_charges: u8,
    max_hand_size: usize,
}

impl Combatant {
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            hand: Hand::new(),
            ladder: Ladder::new(config.ladder_health),
            defense_active: false,
            jester_charges: config.jester_charges,
            max_hand_size: config.max_hand_size,
        }
    }

    /// Replace the hand outright. Intended for scenario setup.
    pub fn with_hand(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        self.hand = cards.into_iter().collect();
        self
    }

    /// Replace the ladder outright. Intended for scenario setup.
    pub fn with_ladder(mut self, ladder: Ladder) -> Self {
        self.ladder = ladder;
        self
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn ladder(&self) -> &Ladder {
        &self.ladder
    }

    #[must_use]
    pub fn active_stage(&self) -> Option<&LadderStage> {
        self.ladder.active_stage()
    }

    #[must_use]
    pub fn defense_active(&self) -> bool {
        self.defense_active
    }

    #[must_use]
    pub fn jester_charges(&self) -> u8 {
        self.jester_charges
    }

    #[must_use]
    pub fn max_hand_size(&self) -> usize {
        self.max_hand_size
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.ladder.is_defeated()
    }

    /// Draw `min(n, room in hand)` cards. Returns how many arrived.
    pub fn draw_up_to(&mut self, deck: &mut Deck, n: usize) -> usize {
        let room = self.max_hand_size.saturating_sub(self.hand.len());
        let drawn = deck.draw(n.min(room));
        let count = drawn.len();
        self.hand.extend(drawn);
        count
    }

    /// Draw until the hand is full (or the deck runs out).
    pub fn refill(&mut self, deck: &mut Deck) -> usize {
        self.draw_up_to(deck, self.max_hand_size)
    }

    /// Remove and return the card at `index`.
    pub fn play_card(&mut self, index: usize) -> Result<Card, DuelError> {
        if index >= self.hand.len() {
            return Err(DuelError::IndexOutOfRange {
                index,
                len: self.hand.len(),
            });
        }
        Ok(self.hand.remove(index))
    }

    /// Subtract from the active stage. No mitigation is applied here.
    pub fn receive_damage(&mut self, amount: u32) -> Option<StageLabel> {
        self.ladder.receive_damage(amount)
    }

    /// Take an incoming hit, consuming an active defense first.
    ///
    /// An active defense halves the hit (floor) and clears itself, so one
    /// activation absorbs exactly one hit whatever its source.
    pub fn take_hit(&mut self, raw: u32) -> HitReport {
        let mitigated = self.defense_active;
        let dealt = if mitigated {
            self.defense_active = false;
            raw / 2
        } else {
            raw
        };
        let cleared = self.receive_damage(dealt);
        debug!(raw, dealt, mitigated, ?cleared, "hit taken");
        HitReport {
            raw,
            dealt,
            mitigated,
            cleared,
        }
    }

    /// Heal the active stage up to its max. Returns health restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.ladder.heal(amount)
    }

    pub fn activate_defense(&mut self) {
        self.defense_active = true;
    }

    /// Spend one Jester: discard the whole hand and draw a full one.
    ///
    /// Returns the number of cards drawn.
    pub fn use_refresh(&mut self, deck: &mut Deck) -> Result<usize, DuelError> {
        if self.jester_charges == 0 {
            return Err(DuelError::NoRefreshCharges);
        }
        self.jester_charges -= 1;
        for card in self.hand.drain(..) {
            deck.discard(card);
        }
        Ok(self.refill(deck))
    }
}
