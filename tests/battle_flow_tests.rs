//! Battle flow tests driven through the session's per-tick input.

use std::time::Duration;
use taleplay::{
    ActorSpec, AssetSet, BattleOutcome, CombatStats, DialogueLine, GameConfig, GameEvent,
    GameSession, InputSample, InteractionMenu, MenuOption, Mode, Position, SceneDataset,
    SceneDescriptor, SoundCue,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// One scene with the given actors standing next to the player's spawn point.
fn session_with(npcs: Vec<ActorSpec>, minions: Vec<ActorSpec>) -> GameSession {
    let mut first = SceneDescriptor::fallback();
    first.npcs = npcs;
    first.minions = minions;
    let mut session = GameSession::new(
        SceneDataset::new(vec![first, SceneDescriptor::fallback()]),
        GameConfig::default(),
        Box::new(AssetSet::new()),
        99,
    )
    .unwrap();
    session.drain_events();
    session
}

fn near_spawn() -> Position {
    Position::new(220.0, 128.0)
}

/// Confirms twice: once to open the menu on the nearby actor, once to pick the selection.
fn engage(session: &mut GameSession) {
    session.update(&InputSample::confirm(), ms(16));
    assert!(session.is_menu_active(), "menu should open next to the actor");
    session.update(&InputSample::confirm(), ms(16));
}

fn fight_npc(session: &mut GameSession) {
    session.update(&InputSample::confirm(), ms(16));
    assert!(session.is_menu_active());
    session.update(&InputSample::navigate(false), ms(16));
    session.update(&InputSample::confirm(), ms(16));
    assert!(session.is_battle_active());
}

#[test]
fn test_minion_victory_levels_up_player() {
    let imp = ActorSpec::minion("Imp")
        .at(near_spawn())
        .with_stats(CombatStats::new(95, 5, 0));
    let mut session = session_with(vec![], vec![imp]);
    session.player_mut().experience = 95;

    engage(&mut session);
    assert!(session.is_battle_active());

    // five strikes of 20 take 95 hp, then the view closes
    session.update(&InputSample::idle(), Duration::from_secs(10));

    assert_eq!(session.mode(), &Mode::FreeRoam);
    let player = session.player();
    assert_eq!(player.level, 2);
    assert_eq!(player.experience, 45);
    assert_eq!(player.skill_points, 10);
    assert_eq!(player.hp, player.max_hp);
    assert!(session.scene().actors.is_empty());
    assert!(session.dataset().get(0).unwrap().minions[0].defeated);

    let events = session.drain_events();
    let hits = events
        .iter()
        .filter(|e| **e == GameEvent::Sound(SoundCue::Hit))
        .count();
    assert_eq!(hits, 9);
    assert!(events.contains(&GameEvent::BattleResolved {
        outcome: BattleOutcome::Victory
    }));
    assert!(events.contains(&GameEvent::Sound(SoundCue::LevelUp)));
    assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Message { text, .. } if text == "Level Up!"
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::ActorDefeated { name, removed: true, .. } if name == "Imp"
    )));
}

#[test]
fn test_npc_victory_leaves_chat_only_actor() {
    let sage = ActorSpec::npc("Sage")
        .at(near_spawn())
        .with_stats(CombatStats::new(20, 10, 0))
        .with_dialogue(vec![DialogueLine::new("Sage", "Well fought.")]);
    let mut session = session_with(vec![sage], vec![]);

    fight_npc(&mut session);
    session.update(&InputSample::idle(), Duration::from_secs(4));
    assert_eq!(session.mode(), &Mode::FreeRoam);

    let actor = &session.scene().actors[0];
    assert!(actor.disabled);
    assert_eq!(actor.name, "Sage");
    assert!(session.dataset().get(0).unwrap().npcs[0].defeated);

    session.update(&InputSample::confirm(), ms(16));
    let Mode::Menu(menu) = session.mode() else {
        panic!("expected the menu, got {}", session.mode().name());
    };
    assert!(menu.is_enabled(MenuOption::Chat));
    assert!(!menu.is_enabled(MenuOption::Fight));

    // toggling cannot reach Fight
    session.update(&InputSample::navigate(true), ms(16));
    session.update(&InputSample::confirm(), ms(16));
    assert!(session.is_dialogue_active());
}

#[test]
fn test_defeat_heals_player_and_rematch_starts_fresh() {
    let giant = ActorSpec::npc("Giant")
        .at(near_spawn())
        .with_stats(CombatStats::new(1000, 200, 100));
    let mut session = session_with(vec![giant], vec![]);

    fight_npc(&mut session);
    session.update(&InputSample::idle(), ms(1200));
    let Mode::Battle(battle) = session.mode() else {
        panic!("expected a battle");
    };
    assert_eq!(battle.target_stats().hp, 999);
    assert_eq!(session.scene().actors[0].stats.hp, 1000);

    session.update(&InputSample::idle(), Duration::from_secs(5));

    assert_eq!(session.mode(), &Mode::FreeRoam);
    assert_eq!(session.player().hp, session.player().max_hp);
    assert_eq!(session.player().experience, 0);
    assert_eq!(session.player().level, 1);

    let actor = &session.scene().actors[0];
    assert!(!actor.disabled);
    assert_eq!(actor.stats.hp, 1000);
    assert!(!session.dataset().get(0).unwrap().npcs[0].defeated);

    let events = session.drain_events();
    assert!(events.contains(&GameEvent::BattleResolved {
        outcome: BattleOutcome::Defeat
    }));
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::ActorDefeated { .. })));

    // the menu still offers both choices
    session.update(&InputSample::confirm(), ms(16));
    let Mode::Menu(menu) = session.mode() else {
        panic!("expected the menu");
    };
    assert!(menu.is_enabled(MenuOption::Fight));

    // the rematch opens against a giant at full health
    session.update(&InputSample::navigate(false), ms(16));
    session.update(&InputSample::confirm(), ms(16));
    let Mode::Battle(battle) = session.mode() else {
        panic!("expected a rematch, got {}", session.mode().name());
    };
    assert_eq!(battle.target_name(), "Giant");
    assert_eq!(battle.target_stats().hp, 1000);
    assert_eq!(battle.target_stats().max_hp, 1000);
}

#[test]
fn test_movement_frozen_during_battle() {
    let imp = ActorSpec::minion("Imp")
        .at(near_spawn())
        .with_stats(CombatStats::new(500, 1, 50));
    let mut session = session_with(vec![], vec![imp]);

    engage(&mut session);
    assert!(session.is_battle_active());
    let before = session.player().position;

    for _ in 0..10 {
        session.update(&InputSample::moving(0, 1).with_run(), ms(100));
    }
    assert_eq!(session.player().position, before);
    assert!(session.is_battle_active());

    let Mode::Battle(battle) = session.mode() else {
        panic!("expected a battle");
    };
    assert_eq!(battle.target_name(), "Imp");
    assert!(battle.log().starts_with("Hit"));
}

#[test]
fn test_menu_for_minion_starts_on_fight() {
    let imp = ActorSpec::minion("Imp").at(near_spawn());
    let mut session = session_with(vec![], vec![imp]);

    session.update(&InputSample::confirm(), ms(16));
    let Mode::Menu(menu) = session.mode() else {
        panic!("expected the menu");
    };
    assert_eq!(menu.selection(), MenuOption::Fight);
    assert!(!menu.is_enabled(MenuOption::Chat));

    let target = session.scene().actors[0].clone();
    let fresh = InteractionMenu::open(&target, false).unwrap();
    assert_eq!(&fresh, menu);
}
