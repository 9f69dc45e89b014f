//! Turn engine integration tests.
//!
//! Scenarios drive a `Duel` through the public API only, with hands built
//! by hand and the remaining cards in the draw pile.

use ladder_duel::ai::Difficulty;
use ladder_duel::cards::{standard_deck, Card, Deck, Rank, Suit};
use ladder_duel::combatant::Combatant;
use ladder_duel::core::{ConfigError, DuelError, GameRng, MatchConfig, Side, SideMap};
use ladder_duel::engine::{Duel, MatchSnapshot, PlayerPrompt, TurnPhase};
use ladder_duel::rules::{CardRule, Effect, SubAction};
use ladder_duel::{Decision, Planner, PlannerView};

fn c(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

/// Duel with explicit hands; every other card is in the draw pile.
fn scripted_duel(player: &[Card], ai: &[Card], difficulty: Difficulty) -> Duel {
    let config = MatchConfig::default();
    let rest: Vec<Card> = standard_deck()
        .into_iter()
        .filter(|card| !player.contains(card) && !ai.contains(card))
        .collect();
    let combatants = SideMap::new(|side| {
        let combatant = Combatant::new(&config);
        match side {
            Side::Player => combatant.with_hand(player.iter().copied()),
            Side::Ai => combatant.with_hand(ai.iter().copied()),
        }
    });
    let deck = Deck::from_piles(rest, Vec::new(), GameRng::new(9));
    Duel::from_parts(difficulty, config, combatants, deck)
}

/// Always attacks with the first card in hand.
struct FirstCardPlanner;

impl Planner for FirstCardPlanner {
    fn decide(&self, view: &PlannerView<'_>, _rng: &mut GameRng) -> Decision {
        match view.hand.first() {
            Some(&card) => Decision::PlaySingle {
                index: 0,
                card,
                choice: CardRule::of(card).options().map(|_| SubAction::Attack),
            },
            None => Decision::NoAction,
        }
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }
}

fn filler_hand() -> Vec<Card> {
    vec![
        c(Suit::Clubs, Rank::Five),
        c(Suit::Clubs, Rank::Six),
        c(Suit::Clubs, Rank::Seven),
        c(Suit::Clubs, Rank::Eight),
        c(Suit::Clubs, Rank::Nine),
    ]
}

// =============================================================================
// Suit rules through the engine
// =============================================================================

#[test]
fn test_ace_deals_one_and_refills() {
    let mut duel = scripted_duel(
        &[c(Suit::Diamonds, Rank::Ace), c(Suit::Hearts, Rank::Two)],
        &filler_hand(),
        Difficulty::Easy,
    );

    let PlayerPrompt::Resolved(event) = duel.submit_player_card(0).unwrap() else {
        panic!("Ace must resolve without a prompt");
    };

    assert_eq!(event.effect.damage_dealt(), 1);
    assert_eq!(event.message, "You attacked for 1 damage with an Ace!");
    assert_eq!(duel.combatant(Side::Player).hand().len(), 5);
    assert_eq!(duel.deck().discard_pile(), &[c(Suit::Diamonds, Rank::Ace)]);
    assert!(event.notes.contains(&"You refilled your hand with 4 cards!".to_string()));
    assert_eq!(
        duel.combatant(Side::Ai).active_stage().unwrap().health,
        14
    );
}

#[test]
fn test_hearts_heal_on_active_stage() {
    let mut duel = scripted_duel(
        &[c(Suit::Clubs, Rank::Two), c(Suit::Hearts, Rank::Six)],
        &filler_hand(),
        Difficulty::Easy,
    )
    .with_planner(Box::new(FirstCardPlanner));

    duel.submit_player_card(0).unwrap();
    // AI hits the player's Jack for 10.
    duel.advance_ai_turn().unwrap();
    assert_eq!(duel.combatant(Side::Player).active_stage().unwrap().health, 5);

    duel.submit_player_card(0).unwrap();
    let event = duel.submit_player_sub_action(SubAction::Heal).unwrap();
    assert_eq!(
        event.effect,
        Effect::Heal {
            amount: 6,
            restored: 6
        }
    );
    assert_eq!(event.message, "You healed your Jack for 6 health!");
    assert_eq!(duel.combatant(Side::Player).active_stage().unwrap().health, 11);
}

#[test]
fn test_defense_halves_next_hit_once() {
    let mut duel = scripted_duel(
        &[
            c(Suit::Diamonds, Rank::Four),
            c(Suit::Hearts, Rank::Two),
            c(Suit::Hearts, Rank::Three),
        ],
        &filler_hand(),
        Difficulty::Easy,
    )
    .with_planner(Box::new(FirstCardPlanner));

    duel.submit_player_card(0).unwrap();
    duel.submit_player_sub_action(SubAction::Defend).unwrap();
    assert!(duel.combatant(Side::Player).defense_active());

    // Clubs 5 doubles to 10, halved to 5.
    let event = duel.advance_ai_turn().unwrap();
    assert_eq!(event.effect.damage_dealt(), 5);
    assert_eq!(
        event.message,
        "AI attacked you for 5 damage with Clubs (double damage)! (10 halved by defense)"
    );
    assert!(!duel.combatant(Side::Player).defense_active());
    assert_eq!(duel.combatant(Side::Player).active_stage().unwrap().health, 10);

    duel.submit_player_card(0).unwrap();
    duel.submit_player_sub_action(SubAction::Attack).unwrap();

    // Clubs 6 lands in full and clears the Jack.
    let event = duel.advance_ai_turn().unwrap();
    assert_eq!(event.effect.damage_dealt(), 12);
    assert!(event.notes.contains(&"Your Jack has fallen!".to_string()));
    assert_eq!(duel.combatant(Side::Player).ladder().active_index(), 1);
}

#[test]
fn test_combo_with_single_card_keeps_state() {
    let spades = c(Suit::Spades, Rank::Ten);
    let mut duel = scripted_duel(&[spades], &filler_hand(), Difficulty::Easy);

    assert_eq!(duel.submit_player_card(0), Err(DuelError::IllegalComboPlay));
    assert_eq!(duel.combatant(Side::Player).hand(), &[spades]);
    assert_eq!(duel.deck().discard_pile_len(), 0);
    assert_eq!(duel.phase(), TurnPhase::PlayerTurn);

    // A Jester is still available.
    assert!(duel.use_player_refresh().is_ok());
}

#[test]
fn test_index_out_of_range_is_recoverable() {
    let mut duel = Duel::with_seed(Difficulty::Easy, 3);
    let before = duel.snapshot();

    assert_eq!(
        duel.submit_player_card(9),
        Err(DuelError::IndexOutOfRange { index: 9, len: 5 })
    );
    assert_eq!(duel.snapshot(), before);
}

// =============================================================================
// AI turns
// =============================================================================

#[test]
fn test_ai_draws_at_turn_start() {
    let mut duel = scripted_duel(
        &[c(Suit::Clubs, Rank::Two), c(Suit::Clubs, Rank::Three)],
        &[c(Suit::Spades, Rank::Nine)],
        Difficulty::Hard,
    );
    duel.submit_player_card(0).unwrap();
    assert_eq!(duel.combatant(Side::Ai).hand().len(), 2);

    // With a partner in hand the Spades card is playable.
    let event = duel.advance_ai_turn().unwrap();
    assert!(matches!(event.effect, Effect::Damage(_)));
}

/// Plays the first card with no sub-action, which Hearts rejects.
struct CarelessPlanner;

impl Planner for CarelessPlanner {
    fn decide(&self, view: &PlannerView<'_>, _rng: &mut GameRng) -> Decision {
        Decision::PlaySingle {
            index: 0,
            card: view.hand[0],
            choice: None,
        }
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }
}

#[test]
fn test_rejected_ai_play_becomes_pass() {
    let ai_hand = [
        c(Suit::Hearts, Rank::Nine),
        c(Suit::Clubs, Rank::Five),
        c(Suit::Clubs, Rank::Six),
        c(Suit::Clubs, Rank::Seven),
        c(Suit::Clubs, Rank::Eight),
    ];
    let mut duel = scripted_duel(
        &[c(Suit::Clubs, Rank::Two), c(Suit::Clubs, Rank::Three)],
        &ai_hand,
        Difficulty::Easy,
    )
    .with_planner(Box::new(CarelessPlanner));
    assert_eq!(duel.difficulty(), Difficulty::Medium);

    duel.submit_player_card(0).unwrap();
    let event = duel.advance_ai_turn().unwrap();

    assert_eq!(event.effect, Effect::NoAction);
    assert_eq!(event.message, "AI has no cards to play.");
    assert_eq!(duel.combatant(Side::Ai).hand(), &ai_hand);
    assert_eq!(duel.phase(), TurnPhase::PlayerTurn);
}

#[test]
fn test_hard_ai_refreshes_weak_hand() {
    let weak = [
        c(Suit::Clubs, Rank::Two),
        c(Suit::Hearts, Rank::Three),
        c(Suit::Diamonds, Rank::Two),
        c(Suit::Hearts, Rank::Ace),
    ];
    let mut duel = scripted_duel(
        &[c(Suit::Clubs, Rank::Ten), c(Suit::Clubs, Rank::Nine)],
        &weak,
        Difficulty::Hard,
    );
    duel.submit_player_card(1).unwrap();

    // Four weak cards plus one draw: (2 + 3 + 2 + 1 + x) / 5 stays below 4
    // for any x.
    let event = duel.advance_ai_turn().unwrap();

    assert_eq!(event.effect, Effect::Refresh { drawn: 5 });
    assert_eq!(event.message, "AI has refreshed its hand using a Jester!");
    assert_eq!(duel.combatant(Side::Ai).jester_charges(), 1);
    assert_eq!(duel.combatant(Side::Ai).hand().len(), 5);
    assert_eq!(duel.phase(), TurnPhase::PlayerTurn);
}

#[test]
fn test_refresh_without_charges() {
    let config = MatchConfig::default().with_jester_charges(0);
    let mut duel = Duel::with_config(Difficulty::Easy, config).unwrap();
    let before = duel.snapshot();

    assert_eq!(duel.use_player_refresh(), Err(DuelError::NoRefreshCharges));
    assert_eq!(duel.snapshot(), before);
}

// =============================================================================
// Whole matches
// =============================================================================

/// Attack with the first non-Spades card, or pair the first two cards.
fn play_player_turn(duel: &mut Duel) {
    let hand = duel.combatant(Side::Player).hand().to_vec();
    let index = hand.iter().position(|card| card.suit != Suit::Spades).unwrap_or(0);
    match duel.submit_player_card(index).unwrap() {
        PlayerPrompt::Resolved(_) => {}
        PlayerPrompt::NeedsSubAction { .. } => {
            duel.submit_player_sub_action(SubAction::Attack).unwrap();
        }
        PlayerPrompt::NeedsComboPartner { .. } => {
            duel.submit_player_combo_partner(1).unwrap();
        }
    }
}

fn run_to_end(duel: &mut Duel, max_steps: usize) {
    for _ in 0..max_steps {
        match duel.phase() {
            TurnPhase::PlayerTurn => play_player_turn(duel),
            TurnPhase::AiTurn => {
                duel.advance_ai_turn().unwrap();
            }
            TurnPhase::GameOver { .. } => return,
            other => panic!("left a prompt open: {other:?}"),
        }
        assert_eq!(duel.card_count(), 40);
    }
}

#[test]
fn test_full_match_every_difficulty() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let mut duel = Duel::with_seed(difficulty, 2024);
        run_to_end(&mut duel, 2_000);

        assert!(duel.is_over(), "{difficulty} match did not finish");
        let winner = duel.winner().unwrap();
        assert!(duel.combatant(winner.opponent()).is_defeated());
        assert!(!duel.combatant(winner).is_defeated());
        assert!(duel.history().len() <= 15);
    }
}

#[test]
fn test_same_seed_same_match() {
    let mut a = Duel::with_seed(Difficulty::Medium, 77);
    let mut b = Duel::with_seed(Difficulty::Medium, 77);
    run_to_end(&mut a, 2_000);
    run_to_end(&mut b, 2_000);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_new_matches_deal_independently() {
    let duels: Vec<Duel> = (0..8).map(|_| Duel::new(Difficulty::Easy)).collect();
    let first = duels[0].combatant(Side::Player).hand();
    assert!(duels
        .iter()
        .any(|duel| duel.combatant(Side::Player).hand() != first));

    // The drawn seed replays the same deal.
    let replay = Duel::with_seed(Difficulty::Easy, duels[0].config().seed);
    assert_eq!(replay.combatant(Side::Player).hand(), first);
    assert_eq!(replay.snapshot(), duels[0].snapshot());
}

#[test]
fn test_deck_order_independent_of_difficulty() {
    let easy = Duel::with_seed(Difficulty::Easy, 5);
    let hard = Duel::with_seed(Difficulty::Hard, 5);
    assert_eq!(
        easy.combatant(Side::Player).hand(),
        hard.combatant(Side::Player).hand()
    );
}

#[test]
fn test_history_tracks_latest_messages() {
    let mut duel = Duel::with_seed(Difficulty::Easy, 8);
    run_to_end(&mut duel, 2_000);
    let last = duel.history().iter().last().unwrap();
    assert!(last == "You have won the game!" || last == "You have been defeated!");
}

// =============================================================================
// Configuration and snapshots
// =============================================================================

#[test]
fn test_config_from_toml() {
    let config = MatchConfig::from_toml_str(
        r#"
        seed = 17
        jester_charges = 1
        ladder_health = [5, 10, 20]
        "#,
    )
    .unwrap();
    let duel = Duel::with_config(Difficulty::Hard, config).unwrap();

    let snapshot = duel.snapshot();
    assert_eq!(snapshot.combatants[Side::Ai].jester_charges, 1);
    assert_eq!(snapshot.combatants[Side::Ai].ladder.stages()[2].max_health, 20);
    assert_eq!(snapshot.difficulty, Difficulty::Hard);
}

#[test]
fn test_invalid_config_rejected() {
    let config = MatchConfig::default().with_ladder_health([0, 25, 40]);
    assert!(matches!(
        Duel::with_config(Difficulty::Easy, config),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn test_snapshot_round_trip_mid_prompt() {
    let mut duel = scripted_duel(
        &[c(Suit::Hearts, Rank::Seven), c(Suit::Clubs, Rank::Two)],
        &filler_hand(),
        Difficulty::Medium,
    );
    duel.submit_player_card(0).unwrap();

    let snapshot = duel.snapshot();
    assert!(matches!(snapshot.phase, TurnPhase::AwaitingSubAction { index: 0, .. }));
    assert_eq!(snapshot.total_cards(), 40);

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: MatchSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}
