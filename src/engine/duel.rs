//! The turn engine.
//!
//! `Duel` exclusively owns both combatants, the deck and the AI's random
//! stream for one match. Every mutation flows through it, one side at a
//! time:
//!
//! ```text
//! PlayerTurn ──card──▶ AwaitingSubAction ──choice──┐
//!     │      └─Spades─▶ AwaitingComboCard ──partner─┤
//!     └──────────── forced card / Jester ───────────┤
//!                                                   ▼
//!                 AiTurn ◀────────── resolve, check terminal, replenish
//!                   │
//!                   └── advance_ai_turn ──▶ PlayerTurn … GameOver
//! ```
//!
//! ## Example
//!
//! ```
//! use ladder_duel::ai::Difficulty;
//! use ladder_duel::engine::{Duel, PlayerPrompt, TurnPhase};
//! use ladder_duel::rules::SubAction;
//!
//! let mut duel = Duel::with_seed(Difficulty::Hard, 7);
//! assert_eq!(duel.phase(), TurnPhase::PlayerTurn);
//!
//! match duel.submit_player_card(0).unwrap() {
//!     PlayerPrompt::Resolved(_) => {}
//!     PlayerPrompt::NeedsSubAction { .. } => {
//!         duel.submit_player_sub_action(SubAction::Attack).unwrap();
//!     }
//!     PlayerPrompt::NeedsComboPartner { .. } => {
//!         duel.submit_player_combo_partner(1).unwrap();
//!     }
//! }
//!
//! if duel.phase() == TurnPhase::AiTurn {
//!     duel.advance_ai_turn().unwrap();
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::event::{
    describe_cleared, describe_empty_hand, describe_pass, describe_play, describe_refill,
    describe_refresh, describe_winner, ActionHistory, PlayerPrompt, ResolutionEvent,
};
use super::phase::TurnPhase;
use crate::ai::{planner_for, Decision, Difficulty, Planner, PlannerView};
use crate::cards::{Card, Deck, DeckSnapshot};
use crate::combatant::{Combatant, Ladder};
use crate::core::{ConfigError, DuelError, GameRng, MatchConfig, RngStream, Side, SideMap};
use crate::rules::{ActionResolver, Applied, CardRule, Effect, SubAction};

/// One match between the human and the AI.
pub struct Duel {
    config: MatchConfig,
    difficulty: Difficulty,
    planner: Box<dyn Planner>,
    combatants: SideMap<Combatant>,
    deck: Deck,
    ai_rng: GameRng,
    phase: TurnPhase,
    history: ActionHistory,
    turn: u32,
}

impl Duel {
    /// New match with the default configuration and a fresh random seed.
    /// The seed is logged so the deal can be replayed with [`Duel::with_seed`].
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self::deal(difficulty, MatchConfig::default().with_seed(rand::random()))
    }

    /// New match with the default configuration and the given seed.
    #[must_use]
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::deal(difficulty, MatchConfig::default().with_seed(seed))
    }

    /// New match with a custom configuration.
    pub fn with_config(difficulty: Difficulty, config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::deal(difficulty, config))
    }

    fn deal(difficulty: Difficulty, config: MatchConfig) -> Self {
        let deck = Deck::new(GameRng::for_stream(config.seed, RngStream::Deck));
        let combatants = SideMap::new(|_| Combatant::new(&config));
        let mut duel = Self::from_parts(difficulty, config, combatants, deck);
        for side in Side::ALL {
            duel.combatants[side].refill(&mut duel.deck);
        }
        info!(%difficulty, seed = duel.config.seed, "match started");
        duel
    }

    /// Match over explicit combatants and deck, starting on the player's
    /// turn. No cards are dealt.
    #[must_use]
    pub fn from_parts(
        difficulty: Difficulty,
        config: MatchConfig,
        combatants: SideMap<Combatant>,
        deck: Deck,
    ) -> Self {
        let ai_rng = GameRng::for_stream(config.seed, RngStream::Ai);
        let history = ActionHistory::new(config.history_limit);
        Self {
            planner: planner_for(difficulty),
            difficulty,
            config,
            combatants,
            deck,
            ai_rng,
            phase: TurnPhase::PlayerTurn,
            history,
            turn: 1,
        }
    }

    /// Swap in a custom planner for the AI side.
    #[must_use]
    pub fn with_planner(mut self, planner: Box<dyn Planner>) -> Self {
        self.difficulty = planner.difficulty();
        self.planner = planner;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side]
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            TurnPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Cards in both hands and both piles. Always the full deck.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.combatants.iter().map(|(_, c)| c.hand().len()).sum::<usize>() + self.deck.len()
    }

    // === Human side ===

    /// Select the card at `index` from the player's hand.
    ///
    /// Forced cards (Clubs, Aces) resolve immediately. Hearts and Diamonds
    /// park the engine on a sub-action prompt; Spades on a partner prompt.
    pub fn submit_player_card(&mut self, index: usize) -> Result<PlayerPrompt, DuelError> {
        self.require(TurnPhase::PlayerTurn, "play a card")?;

        let hand = self.combatants[Side::Player].hand();
        let card = *hand.get(index).ok_or(DuelError::IndexOutOfRange {
            index,
            len: hand.len(),
        })?;

        match CardRule::of(card) {
            CardRule::Choice(options) => {
                self.phase = TurnPhase::AwaitingSubAction {
                    index,
                    card,
                    options,
                };
                Ok(PlayerPrompt::NeedsSubAction { card, options })
            }
            CardRule::Combo => {
                if hand.len() < 2 {
                    warn!(%card, "no cards to combine with Spades");
                    return Err(DuelError::IllegalComboPlay);
                }
                self.phase = TurnPhase::AwaitingComboCard { index, card };
                Ok(PlayerPrompt::NeedsComboPartner { card })
            }
            CardRule::Ace | CardRule::DoubleAttack => {
                let applied = self.play_single(Side::Player, index, None)?;
                Ok(PlayerPrompt::Resolved(self.finish_play(Side::Player, applied)))
            }
        }
    }

    /// Resume a Hearts or Diamonds play with the chosen sub-action.
    ///
    /// An invalid choice is rejected and the prompt stays open.
    pub fn submit_player_sub_action(
        &mut self,
        choice: SubAction,
    ) -> Result<ResolutionEvent, DuelError> {
        let TurnPhase::AwaitingSubAction {
            index,
            card,
            options,
        } = self.phase
        else {
            return Err(self.wrong_phase("choose a sub-action"));
        };
        if !options.contains(&choice) {
            return Err(DuelError::InvalidSubAction { choice, card });
        }
        let applied = self.play_single(Side::Player, index, Some(choice))?;
        Ok(self.finish_play(Side::Player, applied))
    }

    /// Resume a Spades play with the partner at `partner`.
    ///
    /// A bad partner index is rejected and the prompt stays open.
    pub fn submit_player_combo_partner(
        &mut self,
        partner: usize,
    ) -> Result<ResolutionEvent, DuelError> {
        let TurnPhase::AwaitingComboCard { index, .. } = self.phase else {
            return Err(self.wrong_phase("choose a combo partner"));
        };
        let applied = self.play_combo(Side::Player, index, partner)?;
        Ok(self.finish_play(Side::Player, applied))
    }

    /// Spend one of the player's Jester charges. Ends the turn.
    pub fn use_player_refresh(&mut self) -> Result<ResolutionEvent, DuelError> {
        self.require(TurnPhase::PlayerTurn, "use a Jester")?;
        self.refresh(Side::Player)
    }

    // === AI side ===

    /// Let the planner act for the AI and resolve its choice.
    pub fn advance_ai_turn(&mut self) -> Result<ResolutionEvent, DuelError> {
        self.require(TurnPhase::AiTurn, "advance the AI")?;

        let decision = {
            let ai = &self.combatants[Side::Ai];
            let player = &self.combatants[Side::Player];
            match PlannerView::new(ai, player) {
                Some(view) => self.planner.decide(&view, &mut self.ai_rng),
                None => Decision::NoAction,
            }
        };
        debug!(difficulty = %self.difficulty, ?decision, "AI decided");

        let applied = match decision {
            Decision::PlaySingle { index, choice, .. } => self.play_single(Side::Ai, index, choice),
            Decision::PlayCombo { lead, partner, .. } => self.play_combo(Side::Ai, lead, partner),
            Decision::UseRefresh => match self.refresh(Side::Ai) {
                Ok(event) => return Ok(event),
                Err(err) => Err(err),
            },
            Decision::NoAction => return Ok(self.pass(Side::Ai)),
        };

        match applied {
            Ok(applied) => Ok(self.finish_play(Side::Ai, applied)),
            Err(err) => {
                warn!(%err, ?decision, "AI decision rejected");
                Ok(self.pass(Side::Ai))
            }
        }
    }

    // === Turn flow ===

    fn play_single(
        &mut self,
        actor: Side,
        index: usize,
        choice: Option<SubAction>,
    ) -> Result<Applied, DuelError> {
        let (me, them) = self.combatants.split_mut(actor);
        ActionResolver::play_single(me, them, &mut self.deck, index, choice)
    }

    fn play_combo(
        &mut self,
        actor: Side,
        lead: usize,
        partner: usize,
    ) -> Result<Applied, DuelError> {
        let (me, them) = self.combatants.split_mut(actor);
        ActionResolver::play_combo(me, them, &mut self.deck, lead, partner)
    }

    fn refresh(&mut self, actor: Side) -> Result<ResolutionEvent, DuelError> {
        let drawn = self.combatants[actor].use_refresh(&mut self.deck)?;
        info!(side = ?actor, drawn, "Jester used");
        let event = ResolutionEvent {
            actor,
            play: None,
            effect: Effect::Refresh { drawn },
            message: describe_refresh(actor),
            notes: Vec::new(),
        };
        Ok(self.end_turn(event))
    }

    fn pass(&mut self, actor: Side) -> ResolutionEvent {
        let event = ResolutionEvent {
            actor,
            play: None,
            effect: Effect::NoAction,
            message: describe_pass(actor),
            notes: Vec::new(),
        };
        self.end_turn(event)
    }

    fn finish_play(&mut self, actor: Side, applied: Applied) -> ResolutionEvent {
        let stage = self.combatants[actor].active_stage().map(|s| s.label);
        let mut event = ResolutionEvent {
            actor,
            play: Some(applied.play),
            effect: applied.effect,
            message: describe_play(actor, &applied, stage),
            notes: Vec::new(),
        };
        if applied.refilled > 0 {
            event.notes.push(describe_refill(actor, applied.refilled));
        }
        if let Effect::Damage(hit) = applied.effect {
            if let Some(cleared) = hit.cleared {
                info!(defender = ?actor.opponent(), stage = %cleared, "stage cleared");
                event.notes.push(describe_cleared(actor.opponent(), cleared));
            }
        }
        self.end_turn(event)
    }

    /// Check for a winner, replenish, hand the turn over, and log.
    fn end_turn(&mut self, mut event: ResolutionEvent) -> ResolutionEvent {
        let actor = event.actor;
        let opponent = actor.opponent();

        if self.combatants[opponent].is_defeated() {
            info!(winner = ?actor, turn = self.turn, "match over");
            self.phase = TurnPhase::GameOver { winner: actor };
            event.notes.push(describe_winner(actor));
        } else {
            if self.combatants[actor].hand().is_empty() {
                let drawn = self.combatants[actor].refill(&mut self.deck);
                event.notes.push(describe_empty_hand(actor, drawn));
            }
            self.phase = TurnPhase::turn_of(opponent);
            self.turn += 1;
            self.begin_turn(opponent, &mut event.notes);
        }

        self.history.record(&event);
        event
    }

    /// Start-of-turn replenishment: one card if short, a full hand if empty.
    fn begin_turn(&mut self, side: Side, notes: &mut Vec<String>) {
        let combatant = &mut self.combatants[side];
        if combatant.hand().len() < combatant.max_hand_size() {
            combatant.draw_up_to(&mut self.deck, 1);
        }
        if combatant.hand().is_empty() {
            let drawn = combatant.refill(&mut self.deck);
            notes.push(describe_empty_hand(side, drawn));
        }
    }

    fn require(&self, phase: TurnPhase, operation: &'static str) -> Result<(), DuelError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(self.wrong_phase(operation))
        }
    }

    fn wrong_phase(&self, operation: &'static str) -> DuelError {
        if self.phase.is_over() {
            return DuelError::MatchOver;
        }
        DuelError::WrongPhase {
            operation,
            phase: self.phase.name(),
        }
    }

    // === Snapshot ===

    /// Everything the presentation layer needs to draw the table.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.phase,
            difficulty: self.difficulty,
            turn: self.turn,
            combatants: SideMap::new(|side| CombatantSnapshot::of(&self.combatants[side])),
            deck: self.deck.snapshot(),
            history: self.history.iter().map(str::to_string).collect(),
        }
    }
}

/// Public state of one combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub hand: Vec<Card>,
    pub ladder: Ladder,
    pub defense_active: bool,
    pub jester_charges: u8,
}

impl CombatantSnapshot {
    fn of(combatant: &Combatant) -> Self {
        Self {
            hand: combatant.hand().to_vec(),
            ladder: combatant.ladder().clone(),
            defense_active: combatant.defense_active(),
            jester_charges: combatant.jester_charges(),
        }
    }
}

/// Serializable view of a whole match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub phase: TurnPhase,
    pub difficulty: Difficulty,
    pub turn: u32,
    pub combatants: SideMap<CombatantSnapshot>,
    pub deck: DeckSnapshot,
    pub history: Vec<String>,
}

impl MatchSnapshot {
    /// Cards across both hands and both piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.combatants.iter().map(|(_, c)| c.hand.len()).sum::<usize>()
            + self.deck.draw_pile
            + self.deck.discard_pile.len()
    }
}
