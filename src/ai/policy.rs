//! Planner trait, difficulty selection and the two heuristic tiers.
//!
//! - `EasyPlanner`: random, avoiding Diamonds when it can
//! - `MediumPlanner`: health-ratio gated greedy choice
//! - `HardPlanner`: exhaustive scored search (see `search.rs`)

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::decision::{first_max_by_key, Decision, PlannerView};
use super::search::HardPlanner;
use crate::cards::Suit;
use crate::core::GameRng;
use crate::rules::{CardRule, SubAction};

/// Health ratio below which a side plays for survival.
pub const CRITICAL_HEALTH_RATIO: f64 = 0.3;

/// Value band Medium prefers when nobody is in danger.
pub const MEDIUM_VALUE_BAND: std::ops::RangeInclusive<u32> = 4..=7;

// =============================================================================
// Planner trait
// =============================================================================

/// Chooses the AI's action for one turn.
pub trait Planner: Send + Sync {
    /// Decide from `view`. Must be a pure function of the view and `rng`.
    fn decide(&self, view: &PlannerView<'_>, rng: &mut GameRng) -> Decision;

    fn difficulty(&self) -> Difficulty;
}

/// AI strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = std::convert::Infallible;

    /// Case-insensitive; anything unrecognised selects `Easy`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            other => {
                warn!(difficulty = other, "unknown difficulty, using Easy");
                Difficulty::Easy
            }
        })
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

/// Planner implementing `difficulty`.
#[must_use]
pub fn planner_for(difficulty: Difficulty) -> Box<dyn Planner> {
    match difficulty {
        Difficulty::Easy => Box::new(EasyPlanner),
        Difficulty::Medium => Box::new(MediumPlanner),
        Difficulty::Hard => Box::new(HardPlanner),
    }
}

// =============================================================================
// Decision builders
// =============================================================================

pub(crate) fn single(view: &PlannerView<'_>, index: usize, choice: Option<SubAction>) -> Decision {
    Decision::PlaySingle {
        index,
        card: view.hand[index],
        choice,
    }
}

pub(crate) fn combo(view: &PlannerView<'_>, lead: usize, partner: usize) -> Decision {
    Decision::PlayCombo {
        lead,
        partner,
        lead_card: view.hand[lead],
        partner_card: view.hand[partner],
    }
}

/// Play `index` as an attack, picking the strongest partner for Spades.
pub(crate) fn attack_with(view: &PlannerView<'_>, index: usize) -> Decision {
    match CardRule::of(view.hand[index]) {
        CardRule::Combo => {
            let partner = first_max_by_key(
                (0..view.hand.len()).filter(|&j| j != index),
                |j| i64::from(view.hand[j].attack_value()),
            );
            match partner {
                Some(partner) => combo(view, index, partner),
                None => Decision::NoAction,
            }
        }
        CardRule::Choice(_) => single(view, index, Some(SubAction::Attack)),
        CardRule::Ace | CardRule::DoubleAttack => single(view, index, None),
    }
}

/// Uniformly random play of a uniformly random card from `pool`.
pub(crate) fn random_play(view: &PlannerView<'_>, pool: &[usize], rng: &mut GameRng) -> Decision {
    let Some(&index) = rng.choose(pool) else {
        return Decision::NoAction;
    };
    match CardRule::of(view.hand[index]) {
        CardRule::Combo => {
            let others: Vec<usize> = (0..view.hand.len()).filter(|&j| j != index).collect();
            match rng.choose(&others) {
                Some(&partner) => combo(view, index, partner),
                None => Decision::NoAction,
            }
        }
        CardRule::Choice(options) => single(view, index, rng.choose(&options).copied()),
        CardRule::Ace | CardRule::DoubleAttack => single(view, index, None),
    }
}

// =============================================================================
// Easy
// =============================================================================

/// Random play, skipping Diamonds unless nothing else is left.
#[derive(Clone, Debug, Default)]
pub struct EasyPlanner;

impl Planner for EasyPlanner {
    fn decide(&self, view: &PlannerView<'_>, rng: &mut GameRng) -> Decision {
        let playable: Vec<usize> = view.playable().collect();
        let non_diamonds: Vec<usize> = playable
            .iter()
            .copied()
            .filter(|&i| view.hand[i].suit != Suit::Diamonds)
            .collect();
        let pool = if non_diamonds.is_empty() { &playable } else { &non_diamonds };
        random_play(view, pool, rng)
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }
}

// =============================================================================
// Medium
// =============================================================================

/// Greedy play gated on both sides' health ratios.
///
/// 1. Own stage critical: strongest heal, else strongest defense.
/// 2. Opponent stage critical: strongest non-Hearts attack.
/// 3. Otherwise: random mid-value card, else weakest non-Hearts, else random.
#[derive(Clone, Debug, Default)]
pub struct MediumPlanner;

impl MediumPlanner {
    fn strongest_offering(view: &PlannerView<'_>, sub_action: SubAction) -> Option<usize> {
        first_max_by_key(
            view.playable().filter(|&i| {
                CardRule::of(view.hand[i])
                    .options()
                    .is_some_and(|options| options.contains(&sub_action))
            }),
            |i| i64::from(view.hand[i].attack_value()),
        )
    }
}

impl Planner for MediumPlanner {
    fn decide(&self, view: &PlannerView<'_>, rng: &mut GameRng) -> Decision {
        let playable: Vec<usize> = view.playable().collect();
        if playable.is_empty() {
            return Decision::NoAction;
        }
        let non_hearts: Vec<usize> = playable
            .iter()
            .copied()
            .filter(|&i| view.hand[i].suit != Suit::Hearts)
            .collect();

        if view.own_stage.health_ratio() < CRITICAL_HEALTH_RATIO {
            if let Some(i) = Self::strongest_offering(view, SubAction::Heal) {
                debug!(card = %view.hand[i], "medium: healing");
                return single(view, i, Some(SubAction::Heal));
            }
            if let Some(i) = Self::strongest_offering(view, SubAction::Defend) {
                debug!(card = %view.hand[i], "medium: defending");
                return single(view, i, Some(SubAction::Defend));
            }
        }

        if view.opponent_stage.health_ratio() < CRITICAL_HEALTH_RATIO {
            if let Some(i) = first_max_by_key(non_hearts.iter().copied(), |i| {
                i64::from(view.hand[i].attack_value())
            }) {
                debug!(card = %view.hand[i], "medium: finishing");
                return attack_with(view, i);
            }
        }

        let mid: Vec<usize> = playable
            .iter()
            .copied()
            .filter(|&i| MEDIUM_VALUE_BAND.contains(&view.hand[i].attack_value()))
            .collect();
        if let Some(&i) = rng.choose(&mid) {
            return attack_with(view, i);
        }

        if let Some(i) = first_max_by_key(non_hearts.iter().copied(), |i| {
            -i64::from(view.hand[i].attack_value())
        }) {
            return attack_with(view, i);
        }

        random_play(view, &playable, rng)
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }
}
