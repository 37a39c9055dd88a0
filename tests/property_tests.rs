//! Property-based tests for combat math, progression, spawn placement and the session loop.

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;
use taleplay::{
    compute_damage, ActorSpec, AssetSet, CombatStats, DialogueLine, GameConfig, GameSession,
    InputSample, Mode, PlayerState, Position, ProgressionConfig, Rect, SceneDataset,
    SceneDescriptor, SceneLoader, SpawnPlanner, StatKind,
};

fn building() -> impl Strategy<Value = Rect> {
    (0.0f32..2500.0, 0.0f32..1400.0, 20.0f32..300.0, 20.0f32..300.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn placed() -> impl Strategy<Value = Position> {
    (100.0f32..2460.0, 100.0f32..1340.0).prop_map(|(x, y)| Position::new(x, y))
}

fn input() -> impl Strategy<Value = InputSample> {
    prop_oneof![
        Just(InputSample::idle()),
        (-1i8..=1, -1i8..=1).prop_map(|(x, y)| InputSample::moving(x, y)),
        (-1i8..=1, -1i8..=1).prop_map(|(x, y)| InputSample::moving(x, y).with_run()),
        Just(InputSample::confirm()),
        Just(InputSample::cancel()),
        any::<bool>().prop_map(InputSample::navigate),
        Just(InputSample::toggle_profile()),
        prop_oneof![
            Just(StatKind::Hp),
            Just(StatKind::Attack),
            Just(StatKind::Defense)
        ]
        .prop_map(InputSample::allocate),
    ]
}

fn crowded_session(seed: u64) -> GameSession {
    let mut first = SceneDescriptor::fallback();
    first.npcs = vec![
        ActorSpec::npc("Sage")
            .at(Position::new(220.0, 128.0))
            .with_dialogue(vec![
                DialogueLine::new("Sage", "Hello."),
                DialogueLine::new("Hero", "Hi."),
            ]),
        ActorSpec::npc("Knight")
            .at(Position::new(128.0, 230.0))
            .with_stats(CombatStats::new(300, 40, 15)),
    ];
    first.minions = vec![ActorSpec::minion("Imp").at(Position::new(240.0, 240.0))];
    GameSession::new(
        SceneDataset::new(vec![first, SceneDescriptor::fallback()]),
        GameConfig::default(),
        Box::new(AssetSet::new()),
        seed,
    )
    .unwrap()
}

proptest! {
    #[test]
    fn damage_is_never_zero(attack in any::<u32>(), defense in any::<u32>()) {
        let damage = compute_damage(attack, defense);
        prop_assert!(damage >= 1);
        prop_assert!(damage <= attack.max(1));
    }

    #[test]
    fn experience_carries_over(start in 0u32..100, gained in 0u32..10_000) {
        let rules = ProgressionConfig::default();
        let mut player = PlayerState::new("Hero", Position::origin());
        player.experience = start;

        let levels = player.award_experience(gained, &rules);

        prop_assert_eq!(levels, (start + gained) / 100);
        prop_assert_eq!(player.level, 1 + levels);
        prop_assert_eq!(player.experience, (start + gained) % 100);
        prop_assert_eq!(player.skill_points, 5 + 5 * levels);
    }

    #[test]
    fn obstacles_never_reach_teleport_band(buildings in prop::collection::vec(building(), 0..20)) {
        let config = GameConfig::default();
        let loader = SceneLoader::new(&config);
        let clearance = config.world.teleport_clearance;

        let obstacles = loader.obstacle_buildings(&buildings);
        for b in &obstacles {
            prop_assert!(b.x >= clearance);
            prop_assert!(b.right() <= config.world.width - clearance);
        }
        let kept_outside = buildings
            .iter()
            .filter(|b| b.x >= clearance && b.right() <= config.world.width - clearance)
            .count();
        prop_assert_eq!(obstacles.len(), kept_outside);
    }

    #[test]
    fn session_keeps_one_mode_and_valid_hp(
        seed in any::<u64>(),
        steps in prop::collection::vec((input(), 1u64..1500), 1..120),
    ) {
        let mut session = crowded_session(seed);

        for (sample, millis) in steps {
            let before = session.player().position;
            let was_modal = session.mode().is_modal();

            session.update(&sample, Duration::from_millis(millis));

            let active = [
                session.is_menu_active(),
                session.is_dialogue_active(),
                session.is_battle_active(),
            ]
            .iter()
            .filter(|on| **on)
            .count();
            prop_assert!(active <= 1);
            prop_assert_eq!(active == 0, session.mode() == &Mode::FreeRoam);

            let player = session.player();
            prop_assert!(player.hp <= player.max_hp);
            prop_assert!(player.hp > 0 || session.is_battle_active());

            if was_modal && session.scene().index == 0 {
                prop_assert_eq!(player.position, before);
            }
            session.drain_events();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn spawn_search_usually_succeeds(
        seed in any::<u64>(),
        buildings in prop::collection::vec(building(), 0..6),
        existing in prop::collection::vec(placed(), 0..4),
    ) {
        let planner = SpawnPlanner::new(&GameConfig::default().world);
        let mut rng = StdRng::seed_from_u64(seed);

        let trials = 50;
        let successes = (0..trials)
            .filter(|_| {
                let point = planner.find_safe_spawn(&mut rng, &buildings, &existing, 150);
                planner.is_safe(point, &buildings, &existing)
            })
            .count();
        prop_assert!(successes * 10 >= trials * 9, "{} of {} spawns were safe", successes, trials);
    }
}
