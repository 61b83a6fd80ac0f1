//! Linear deck tests.
//!
//! These tests drive the single-deck variant:
//! - Play, shuffle and hold tick costs
//! - Prepared Strike growth and the bonus reset rule
//! - Running out of cards

use cinder_engine::campaign::{EngineBuilder, LinearGame, View};
use cinder_engine::cards::{ids, Catalog};
use cinder_engine::core::{BonusReset, Rejected, RulesConfig, ScriptedRng};
use cinder_engine::zones::{HoldMove, LinearDeck, Table, TableView};
use cinder_engine::Engine;

/// One Prepared Strike and three Guards. All-zero rolls rotate the deck
/// left by one, so the Strike ends up last.
fn strike_last() -> Engine<LinearDeck, ScriptedRng> {
    let catalog = Catalog::standard().with_linear_starter(vec![
        ids::PREPARED_STRIKE,
        ids::GUARD,
        ids::GUARD,
        ids::GUARD,
    ]);
    EngineBuilder::new()
        .catalog(catalog)
        .build_with_rng(ScriptedRng::default())
}

#[test]
fn test_starter_deck() {
    let game = LinearGame::new(5);

    assert_eq!(game.table().card_count(), 4);
    let names: Vec<_> = game.table().cards().into_iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names.iter().filter(|n| **n == "Prepared Strike").count(), 2);
    assert_eq!(names.iter().filter(|n| **n == "Defend").count(), 2);
}

#[test]
fn test_guard_adds_block() {
    let mut game = strike_last();
    assert_eq!(game.table().active().unwrap().name, "Defend");

    game.play_active().unwrap();

    assert_eq!(game.ledger().player_block, 12);
    assert_eq!(game.ledger().ticks, 2);
    assert_eq!(game.log().latest(), Some("PLAY: Defend (+12 Block)."));
}

#[test]
fn test_shuffled_strike_hits_harder() {
    let mut game = strike_last();
    // Hold the three Guards out of the way: stash one, play two.
    game.play_active().unwrap();
    game.play_active().unwrap();
    game.hold().unwrap();
    assert_eq!(game.table().active().unwrap().name, "Prepared Strike");

    // Cycle the Strike twice (it is alone in the deck).
    game.shuffle().unwrap();
    game.shuffle().unwrap();
    let outcome = game.play_active().unwrap();

    let effect = outcome.effect.unwrap();
    assert_eq!(effect.value, 30);
    assert_eq!(game.log().latest(), Some("PLAY: Prepared Strike (30 DMG)."));
}

#[test]
fn test_hold_release_when_deck_empty() {
    let mut game = strike_last();
    while game.table().deck().len() > 1 {
        game.play_active().unwrap();
    }

    // Deck has one card left: stash it, then release it.
    assert!(matches!(game.hold(), Ok((HoldMove::Stashed(_), _))));
    assert_eq!(game.view(), View::Combat);
    assert!(matches!(game.hold(), Ok((HoldMove::Released(_), _))));
    assert_eq!(game.table().deck().len(), 1);
}

#[test]
fn test_out_of_cards_is_game_over() {
    let mut game = strike_last();
    for _ in 0..3 {
        game.play_active().unwrap();
    }
    let outcome = game.play_active().unwrap();

    assert_eq!(outcome.view, View::GameOver);
    assert_eq!(game.log().latest(), Some("CRITICAL: Out of ammunition."));
    assert_eq!(game.shuffle(), Err(Rejected::WrongView(View::GameOver)));
}

#[test]
fn test_bonus_persists_into_next_fight_by_default() {
    let catalog = Catalog::standard().with_linear_starter(vec![ids::PREPARED_STRIKE; 6]);
    let mut game: Engine<LinearDeck, ScriptedRng> = EngineBuilder::new()
        .catalog(catalog)
        .build_with_rng(ScriptedRng::default());

    game.shuffle().unwrap();
    game.escape().unwrap();

    assert_eq!(game.fight_index(), 1);
    assert!(game.table().cards().iter().any(|c| c.bonus == 10));
}

#[test]
fn test_bonus_reset_per_fight() {
    let catalog = Catalog::standard().with_linear_starter(vec![ids::PREPARED_STRIKE; 6]);
    let rules = RulesConfig::default().with_bonus_reset(BonusReset::PerFight);
    let mut game: Engine<LinearDeck, ScriptedRng> = EngineBuilder::new()
        .rules(rules)
        .catalog(catalog)
        .build_with_rng(ScriptedRng::default());

    game.shuffle().unwrap();
    game.escape().unwrap();

    assert!(game.table().cards().iter().all(|c| c.bonus == 0));
}

#[test]
fn test_held_card_returns_at_fight_start() {
    let mut game = strike_last();
    game.hold().unwrap();
    assert!(game.table().held().is_some());

    game.escape().unwrap();

    assert!(game.table().held().is_none());
    assert_eq!(game.table().card_count(), 4);
}

#[test]
fn test_snapshot_shows_active_next_and_held() {
    let mut game = strike_last();
    game.hold().unwrap();

    let TableView::Linear(view) = game.snapshot().table else {
        panic!("linear snapshot should carry a deck view");
    };
    assert_eq!(view.deck_count, 3);
    assert_eq!(view.held.unwrap().name, "Defend");
    assert_eq!(view.active.unwrap().name, "Defend");
    assert_eq!(view.next.unwrap().name, "Defend");
}
