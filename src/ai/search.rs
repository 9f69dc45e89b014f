//! Hard tier: exhaustive scored search over every legal play.
//!
//! ## Algorithm
//!
//! 1. **Refresh**: a weak hand (mean value below 4) with a Jester left is
//!    thrown away.
//! 2. **Survival**: with the own stage below 30% health, the best heal wins
//!    outright.
//! 3. **Search**: every single play and every Spades pairing is scored; the
//!    strictly highest score wins and ties go to the earlier candidate.
//! 4. **Fallback**: with nothing scored, a random playable card.
//!
//! ## Scores
//!
//! With `h` the opponent's active-stage health and `v` the card value:
//!
//! | Play | Score |
//! |---|---|
//! | Heal | `2 × min(missing, v)` |
//! | Defense | `missing`, halved while the opponent defends |
//! | Clubs | `3h − max(0, 2v − h)` |
//! | Spades + partner | `4h − max(0, v + v' − h)`, minus a wasted-Clubs penalty |
//! | Other attack | `2h − max(0, v − h)` |

use tracing::debug;

use super::decision::{Decision, PlannerView};
use super::policy::{
    combo, random_play, single, Difficulty, Planner, CRITICAL_HEALTH_RATIO,
};
use crate::cards::Card;
use crate::core::GameRng;
use crate::rules::{CardRule, SubAction, CLUBS_MULTIPLIER};

/// Hands averaging below this value are refreshed when possible.
pub const REFRESH_MEAN_THRESHOLD: f64 = 4.0;

/// Defense is only worth raising below this health ratio.
pub const DEFENSE_HEALTH_RATIO: f64 = 0.6;

/// One scored option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub decision: Decision,
    pub score: i64,
}

/// Exhaustive scored-search planner.
#[derive(Clone, Debug, Default)]
pub struct HardPlanner;

impl HardPlanner {
    /// Every legal play with its score, in hand order.
    ///
    /// Heals and defenses are listed where eligible; a Hearts or Diamonds
    /// card that is not is scored as a plain attack instead.
    #[must_use]
    pub fn candidates(view: &PlannerView<'_>) -> Vec<Candidate> {
        let h = i64::from(view.opponent_stage.health);
        let mut out = Vec::new();

        for (i, &card) in view.hand.iter().enumerate() {
            let v = i64::from(card.attack_value());
            match CardRule::of(card) {
                CardRule::Ace => out.push(Candidate {
                    decision: single(view, i, None),
                    score: plain_attack_score(h, v),
                }),
                CardRule::DoubleAttack => out.push(Candidate {
                    decision: single(view, i, None),
                    score: 3 * h - (i64::from(CLUBS_MULTIPLIER) * v - h).max(0),
                }),
                CardRule::Combo => {
                    for (j, &partner) in view.hand.iter().enumerate() {
                        if j == i {
                            continue;
                        }
                        out.push(Candidate {
                            decision: combo(view, i, j),
                            score: combo_score(h, card, partner),
                        });
                    }
                }
                CardRule::Choice(options) => {
                    let special = if options.contains(&SubAction::Heal) {
                        heal_score(view, v).map(|s| (SubAction::Heal, s))
                    } else {
                        defense_score(view).map(|s| (SubAction::Defend, s))
                    };
                    let (choice, score) =
                        special.unwrap_or((SubAction::Attack, plain_attack_score(h, v)));
                    out.push(Candidate {
                        decision: single(view, i, Some(choice)),
                        score,
                    });
                }
            }
        }
        out
    }
}

fn plain_attack_score(h: i64, v: i64) -> i64 {
    2 * h - (v - h).max(0)
}

fn heal_score(view: &PlannerView<'_>, v: i64) -> Option<i64> {
    let missing = i64::from(view.own_stage.missing_health());
    (missing > 0).then(|| 2 * missing.min(v))
}

fn defense_score(view: &PlannerView<'_>) -> Option<i64> {
    if view.own_defense_active || view.own_stage.health_ratio() >= DEFENSE_HEALTH_RATIO {
        return None;
    }
    let missing = i64::from(view.own_stage.missing_health());
    Some(if view.opponent_defense_active { missing / 2 } else { missing })
}

fn combo_score(h: i64, lead: Card, partner: Card) -> i64 {
    let combined = i64::from(lead.attack_value() + partner.attack_value());
    let mut score = 4 * h - (combined - h).max(0);
    if CardRule::of(partner) == CardRule::DoubleAttack {
        let solo = i64::from(partner.attack_value() * CLUBS_MULTIPLIER);
        if solo > combined {
            score -= 3 * (solo - combined);
        }
    }
    score
}

impl Planner for HardPlanner {
    fn decide(&self, view: &PlannerView<'_>, rng: &mut GameRng) -> Decision {
        if view.hand.is_empty() {
            return Decision::NoAction;
        }

        if view.jester_charges > 0 && view.mean_value() < REFRESH_MEAN_THRESHOLD {
            debug!(mean = view.mean_value(), "hard: refreshing weak hand");
            return Decision::UseRefresh;
        }

        let candidates = Self::candidates(view);

        if view.own_stage.health_ratio() < CRITICAL_HEALTH_RATIO {
            let heal = best(candidates.iter().filter(|c| {
                matches!(c.decision, Decision::PlaySingle { choice: Some(SubAction::Heal), .. })
            }));
            if let Some(heal) = heal {
                debug!(score = heal.score, "hard: survival heal");
                return heal.decision;
            }
        }

        match best(candidates.iter()) {
            Some(winner) => {
                debug!(score = winner.score, decision = ?winner.decision, "hard: best play");
                winner.decision
            }
            None => {
                let playable: Vec<usize> = view.playable().collect();
                random_play(view, &playable, rng)
            }
        }
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }
}

/// Strictly highest score; the first candidate wins ties.
fn best<'a>(candidates: impl Iterator<Item = &'a Candidate>) -> Option<&'a Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in candidates {
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best
}
