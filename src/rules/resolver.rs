//! Action resolution: the suit rule table and its application.
//!
//! Resolution happens in two steps:
//!
//! 1. [`resolve`] is pure. It maps a [`Play`] to a [`Resolution`]: the
//!    outcome before mitigation, which cards go to the discard pile, and
//!    whether the actor refills its hand.
//! 2. [`ActionResolver`] validates a play against a hand, then applies the
//!    resolution through `Combatant` and `Deck` methods. A rejected play
//!    never mutates anything.
//!
//! ## Rule table
//!
//! | Card | Family | Effect |
//! |---|---|---|
//! | Ace (any suit) | special | 1 damage, then refill hand |
//! | Hearts | Attack / Heal | value damage, or heal own stage by value |
//! | Diamonds | Attack / Defense | value damage, or raise defense |
//! | Clubs | attack | 2 × value damage |
//! | Spades | combo | value + partner value damage, both discarded |

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, warn};

use super::effect::Effect;
use crate::cards::{Card, Deck, Suit};
use crate::combatant::Combatant;
use crate::core::DuelError;

/// The choice offered by Hearts and Diamonds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubAction {
    Attack,
    Heal,
    Defend,
}

impl std::fmt::Display for SubAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SubAction::Attack => "Attack",
            SubAction::Heal => "Heal",
            SubAction::Defend => "Defense",
        };
        f.write_str(name)
    }
}

/// Which rule governs a card when it is played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardRule {
    /// Fixed 1 damage plus a hand refill. Checked before suit.
    Ace,
    /// Player picks one of two sub-actions.
    Choice([SubAction; 2]),
    /// Forced attack at double value.
    DoubleAttack,
    /// Needs a partner card from the same hand.
    Combo,
}

impl CardRule {
    #[must_use]
    pub fn of(card: Card) -> Self {
        if card.is_ace() {
            return CardRule::Ace;
        }
        match card.suit {
            Suit::Hearts => CardRule::Choice([SubAction::Attack, SubAction::Heal]),
            Suit::Diamonds => CardRule::Choice([SubAction::Attack, SubAction::Defend]),
            Suit::Clubs => CardRule::DoubleAttack,
            Suit::Spades => CardRule::Combo,
        }
    }

    /// Sub-actions the card offers, if it offers a choice.
    #[must_use]
    pub fn options(self) -> Option<[SubAction; 2]> {
        match self {
            CardRule::Choice(options) => Some(options),
            _ => None,
        }
    }
}

/// Multiplier applied to Clubs.
pub const CLUBS_MULTIPLIER: u32 = 2;

/// Damage dealt by an Ace, whatever its suit.
pub const ACE_DAMAGE: u32 = 1;

/// A fully specified play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Play {
    Single {
        card: Card,
        choice: Option<SubAction>,
    },
    Combo {
        lead: Card,
        partner: Card,
    },
}

/// Effect of a play before defense mitigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Damage(u32),
    Heal(u32),
    Defend,
}

/// Outcome plus discard and refill instructions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub discards: SmallVec<[Card; 2]>,
    pub refill_hand: bool,
}

impl Resolution {
    fn single(outcome: Outcome, card: Card) -> Self {
        Self {
            outcome,
            discards: smallvec![card],
            refill_hand: false,
        }
    }
}

/// Map a play to its resolution. Pure.
pub fn resolve(play: &Play) -> Result<Resolution, DuelError> {
    match *play {
        Play::Single { card, choice } => {
            let rule = CardRule::of(card);
            match (rule, choice) {
                (CardRule::Ace, None) => Ok(Resolution {
                    outcome: Outcome::Damage(ACE_DAMAGE),
                    discards: smallvec![card],
                    refill_hand: true,
                }),
                (CardRule::DoubleAttack, None) => Ok(Resolution::single(
                    Outcome::Damage(card.attack_value() * CLUBS_MULTIPLIER),
                    card,
                )),
                (CardRule::Combo, _) => Err(DuelError::IllegalComboPlay),
                (CardRule::Choice(_), None) => Err(DuelError::MissingSubAction { card }),
                (CardRule::Choice(options), Some(choice)) if options.contains(&choice) => {
                    let value = card.attack_value();
                    let outcome = match choice {
                        SubAction::Attack => Outcome::Damage(value),
                        SubAction::Heal => Outcome::Heal(value),
                        SubAction::Defend => Outcome::Defend,
                    };
                    Ok(Resolution::single(outcome, card))
                }
                (_, Some(choice)) => Err(DuelError::InvalidSubAction { choice, card }),
            }
        }
        Play::Combo { lead, partner } => {
            if CardRule::of(lead) != CardRule::Combo {
                return Err(DuelError::IllegalComboPlay);
            }
            Ok(Resolution {
                outcome: Outcome::Damage(lead.attack_value() + partner.attack_value()),
                discards: smallvec![lead, partner],
                refill_hand: false,
            })
        }
    }
}

/// A resolution after it has been applied to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub play: Play,
    pub effect: Effect,
    /// Cards drawn by an Ace refill.
    pub refilled: usize,
}

/// Applies plays to a pair of combatants and the deck.
pub struct ActionResolver;

impl ActionResolver {
    /// Play the card at `index`, with `choice` for Hearts and Diamonds.
    pub fn play_single(
        actor: &mut Combatant,
        opponent: &mut Combatant,
        deck: &mut Deck,
        index: usize,
        choice: Option<SubAction>,
    ) -> Result<Applied, DuelError> {
        let card = Self::card_at(actor, index)?;
        let play = Play::Single { card, choice };
        let resolution = resolve(&play)?;
        actor.play_card(index)?;
        Ok(Self::apply(actor, opponent, deck, play, resolution))
    }

    /// Play the Spades card at `lead` together with the card at `partner`.
    pub fn play_combo(
        actor: &mut Combatant,
        opponent: &mut Combatant,
        deck: &mut Deck,
        lead: usize,
        partner: usize,
    ) -> Result<Applied, DuelError> {
        let lead_card = Self::card_at(actor, lead)?;
        if actor.hand().len() < 2 {
            warn!(card = %lead_card, "combo rejected, no partner in hand");
            return Err(DuelError::IllegalComboPlay);
        }
        let partner_card = Self::card_at(actor, partner)?;
        if partner == lead {
            return Err(DuelError::InvalidComboPartner { index: partner });
        }

        let play = Play::Combo {
            lead: lead_card,
            partner: partner_card,
        };
        let resolution = resolve(&play)?;

        // Remove the higher index first so the lower one stays valid.
        let (first, second) = if lead > partner { (lead, partner) } else { (partner, lead) };
        actor.play_card(first)?;
        actor.play_card(second)?;
        Ok(Self::apply(actor, opponent, deck, play, resolution))
    }

    fn card_at(actor: &Combatant, index: usize) -> Result<Card, DuelError> {
        actor
            .hand()
            .get(index)
            .copied()
            .ok_or(DuelError::IndexOutOfRange {
                index,
                len: actor.hand().len(),
            })
    }

    /// Apply a resolution whose cards have already left the actor's hand.
    pub fn apply(
        actor: &mut Combatant,
        opponent: &mut Combatant,
        deck: &mut Deck,
        play: Play,
        resolution: Resolution,
    ) -> Applied {
        let effect = match resolution.outcome {
            Outcome::Damage(amount) => Effect::Damage(opponent.take_hit(amount)),
            Outcome::Heal(amount) => Effect::Heal {
                amount,
                restored: actor.heal(amount),
            },
            Outcome::Defend => {
                actor.activate_defense();
                Effect::Defense
            }
        };

        let refilled = if resolution.refill_hand {
            actor.refill(deck)
        } else {
            0
        };

        for card in resolution.discards {
            deck.discard(card);
        }

        debug!(?play, ?effect, refilled, "play resolved");
        Applied {
            play,
            effect,
            refilled,
        }
    }
}
