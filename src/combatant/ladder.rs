//! The three-stage health ladder.
//!
//! Stages are fought in fixed order Jack → Queen → King. Only the active
//! stage takes damage or healing; clearing it advances exactly one stage,
//! however large the overkill. Once the King falls the ladder is defeated.

use serde::{Deserialize, Serialize};

/// Face-card label of a ladder stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageLabel {
    Jack,
    Queen,
    King,
}

impl StageLabel {
    pub const ORDER: [StageLabel; 3] = [StageLabel::Jack, StageLabel::Queen, StageLabel::King];
}

impl std::fmt::Display for StageLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageLabel::Jack => "Jack",
            StageLabel::Queen => "Queen",
            StageLabel::King => "King",
        };
        f.write_str(name)
    }
}

/// One stage: `0 <= health <= max_health`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderStage {
    pub label: StageLabel,
    pub health: u32,
    pub max_health: u32,
}

impl LadderStage {
    #[must_use]
    pub fn new(label: StageLabel, max_health: u32) -> Self {
        Self {
            label,
            health: max_health,
            max_health,
        }
    }

    /// Health as a fraction of max.
    #[must_use]
    pub fn health_ratio(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        f64::from(self.health) / f64::from(self.max_health)
    }

    #[must_use]
    pub fn missing_health(&self) -> u32 {
        self.max_health - self.health
    }
}

/// Number of stages on every ladder.
pub const LADDER_STAGES: usize = 3;

/// Fixed sequence of three stages plus the index of the active one.
///
/// `active == LADDER_STAGES` means the ladder is defeated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ladder {
    stages: [LadderStage; LADDER_STAGES],
    active: usize,
}

impl Ladder {
    /// Fresh ladder with the given Jack/Queen/King max health.
    #[must_use]
    pub fn new(max_health: [u32; LADDER_STAGES]) -> Self {
        let mut i = 0;
        let stages = StageLabel::ORDER.map(|label| {
            let stage = LadderStage::new(label, max_health[i]);
            i += 1;
            stage
        });
        Self { stages, active: 0 }
    }

    #[must_use]
    pub fn stages(&self) -> &[LadderStage; LADDER_STAGES] {
        &self.stages
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The stage currently taking hits, `None` once defeated.
    #[must_use]
    pub fn active_stage(&self) -> Option<&LadderStage> {
        self.stages.get(self.active)
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.active >= LADDER_STAGES
    }

    /// Apply damage to the active stage.
    ///
    /// Health floors at 0; reaching 0 advances exactly one stage. Returns the
    /// cleared stage, if any. Zero damage is a no-op.
    pub fn receive_damage(&mut self, amount: u32) -> Option<StageLabel> {
        if amount == 0 {
            return None;
        }
        let stage = self.stages.get_mut(self.active)?;
        stage.health = stage.health.saturating_sub(amount);
        if stage.health == 0 {
            let cleared = stage.label;
            self.active += 1;
            Some(cleared)
        } else {
            None
        }
    }

    /// Heal the active stage, capped at its max. Returns health restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        match self.stages.get_mut(self.active) {
            Some(stage) => {
                let restored = amount.min(stage.missing_health());
                stage.health += restored;
                restored
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> Ladder {
        Ladder::new([15, 25, 40])
    }

    #[test]
    fn test_fresh_ladder() {
        let l = ladder();
        assert_eq!(l.active_index(), 0);
        let stage = l.active_stage().unwrap();
        assert_eq!(stage.label, StageLabel::Jack);
        assert_eq!(stage.health, 15);
        assert_eq!(l.stages()[2].max_health, 40);
    }

    #[test]
    fn test_overkill_advances_one_stage() {
        let mut l = ladder();
        l.receive_damage(14);
        assert_eq!(l.active_stage().unwrap().health, 1);

        let cleared = l.receive_damage(10);

        assert_eq!(cleared, Some(StageLabel::Jack));
        assert_eq!(l.stages()[0].health, 0);
        assert_eq!(l.active_index(), 1);
        assert_eq!(l.active_stage().unwrap().health, 25);
    }

    #[test]
    fn test_zero_damage_is_noop() {
        let mut l = ladder();
        let before = l.clone();
        assert_eq!(l.receive_damage(0), None);
        assert_eq!(l, before);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut l = ladder();
        l.receive_damage(4);
        assert_eq!(l.heal(10), 4);
        assert_eq!(l.active_stage().unwrap().health, 15);
    }

    #[test]
    fn test_heal_only_active_stage() {
        let mut l = ladder();
        l.receive_damage(15);
        l.receive_damage(5);
        assert_eq!(l.heal(3), 3);
        assert_eq!(l.stages()[0].health, 0);
        assert_eq!(l.stages()[1].health, 23);
    }

    #[test]
    fn test_defeat() {
        let mut l = ladder();
        l.receive_damage(100);
        l.receive_damage(100);
        assert!(!l.is_defeated());
        assert_eq!(l.receive_damage(100), Some(StageLabel::King));
        assert!(l.is_defeated());
        assert!(l.active_stage().is_none());

        // Further hits and heals do nothing.
        assert_eq!(l.receive_damage(5), None);
        assert_eq!(l.heal(5), 0);
        assert_eq!(l.active_index(), LADDER_STAGES);
    }

    #[test]
    fn test_health_ratio() {
        let mut l = Ladder::new([40, 40, 40]);
        l.receive_damage(30);
        assert!((l.active_stage().unwrap().health_ratio() - 0.25).abs() < 1e-9);
    }
}
