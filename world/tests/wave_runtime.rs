use std::time::Duration;

use path_defence_core::{
    ArchetypeId, Command, Difficulty, EnemyUnitId, Event, PathPoint, TowerKindId, UnitState,
    WaveId,
};
use path_defence_roster::Roster;
use path_defence_world::{apply, query, WavePhase, World, WorldConfig};
use pretty_assertions::assert_eq;

fn world_with_route(length: f32) -> World {
    let config = WorldConfig {
        seed: 99,
        route: vec![PathPoint::new(0.0, 0.0), PathPoint::new(length, 0.0)],
        ..WorldConfig::default()
    };
    World::with_roster(Roster::standard(), config)
}

fn tick(world: &mut World, millis: u64) -> Vec<Event> {
    let mut events = Vec::new();
    apply(
        world,
        Command::Tick {
            dt: Duration::from_millis(millis),
        },
        &mut events,
    );
    events
}

fn start(world: &mut World, time_scale: f32) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, Command::StartNextWave { time_scale }, &mut events);
    events
}

fn run_until_idle(world: &mut World, step_ms: u64) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..100_000 {
        events.extend(tick(world, step_ms));
        if query::phase(world) == WavePhase::Idle {
            return events;
        }
    }
    panic!("wave never completed");
}

fn spawned_archetypes(events: &[Event]) -> Vec<ArchetypeId> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::EnemySpawned { unit } => Some(unit.archetype.clone()),
            _ => None,
        })
        .collect()
}

fn spawn_interval(world: &World) -> u64 {
    u64::from(
        query::composition(world)
            .expect("composition")
            .scaling()
            .spawn_interval_ms(),
    )
}

#[test]
fn starting_while_a_wave_is_in_flight_is_rejected() {
    let mut world = World::new();
    let mut events = Vec::new();
    assert!(world.start_next_wave(1.0, &mut events));
    let composition = query::composition(&world).cloned();
    let pending = query::pending_spawns(&world);

    events.clear();
    assert!(!world.start_next_wave(1.0, &mut events));
    assert_eq!(
        events,
        vec![Event::WaveStartRejected {
            active_wave: WaveId::new(1)
        }]
    );
    assert_eq!(query::current_wave(&world), WaveId::new(1));
    assert_eq!(query::composition(&world).cloned(), composition);
    assert_eq!(query::pending_spawns(&world), pending);
}

#[test]
fn wave_runs_from_start_to_completion() {
    let mut world = world_with_route(20.0);
    let started = start(&mut world, 1.0);
    let enemy_count = match started.as_slice() {
        [Event::WaveStarted {
            wave,
            enemy_count,
            boss_count,
            ..
        }] => {
            assert_eq!(*wave, WaveId::new(1));
            assert_eq!(*boss_count, 0);
            *enemy_count as usize
        }
        other => panic!("unexpected events {other:?}"),
    };
    assert_eq!(query::phase(&world), WavePhase::Spawning);

    let events = run_until_idle(&mut world, 100);

    let spawned = spawned_archetypes(&events);
    assert_eq!(spawned.len(), enemy_count);
    assert_eq!(
        spawned,
        query::composition(&world).expect("composition").sequence().to_vec()
    );

    let escaped = events
        .iter()
        .filter(|event| matches!(event, Event::EnemyReachedBase { damage: 1, .. }))
        .count();
    assert_eq!(escaped, enemy_count);

    let finished = events
        .iter()
        .position(|event| matches!(event, Event::SpawningFinished { .. }))
        .expect("spawning finished");
    let completed = events
        .iter()
        .position(|event| matches!(event, Event::WaveComplete { .. }))
        .expect("wave complete");
    assert!(finished < completed);
    assert_eq!(
        events[completed],
        Event::WaveComplete {
            next_wave: WaveId::new(2),
            bonus_gold: 16
        }
    );
    assert_eq!(query::current_wave(&world), WaveId::new(1));
    assert_eq!(query::pending_spawns(&world), 0);

    let mut events = Vec::new();
    assert!(world.start_next_wave(1.0, &mut events));
    assert_eq!(query::current_wave(&world), WaveId::new(2));
}

#[test]
fn spawns_follow_the_interval() {
    let mut world = World::new();
    let _ = start(&mut world, 1.0);
    let interval = spawn_interval(&world);

    assert_eq!(spawned_archetypes(&tick(&mut world, 0)).len(), 1);
    let early = tick(&mut world, interval - 10);
    assert!(spawned_archetypes(&early).is_empty());
    assert_eq!(spawned_archetypes(&tick(&mut world, 20)).len(), 1);
}

#[test]
fn time_scale_accelerates_spawn_timers() {
    let mut world = World::new();
    let _ = start(&mut world, 2.0);
    let interval = spawn_interval(&world);

    assert_eq!(spawned_archetypes(&tick(&mut world, 0)).len(), 1);
    assert_eq!(
        spawned_archetypes(&tick(&mut world, interval / 2 + 5)).len(),
        1
    );
    let elapsed = query::wave_clock(&world).as_secs_f64() * 1_000.0;
    assert!((elapsed - (interval / 2 + 5) as f64 * 2.0).abs() < 1e-3);

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::SetTimeScale { time_scale: 0.0 },
        &mut events,
    );
    assert_eq!(query::time_scale(&world), 1.0);
}

#[test]
fn pausing_never_changes_spawn_order() {
    let mut steady = World::new();
    let mut paused = World::new();
    let _ = start(&mut steady, 1.0);
    let _ = start(&mut paused, 1.0);

    let steady_events = run_until_idle(&mut steady, 250);

    let mut paused_events = Vec::new();
    for _ in 0..6 {
        paused_events.extend(tick(&mut paused, 250));
    }
    let mut events = Vec::new();
    apply(&mut paused, Command::PauseSpawning, &mut events);
    assert!(query::spawning_paused(&paused));
    let pending = query::pending_spawns(&paused);
    let clock = query::wave_clock(&paused);
    for _ in 0..40 {
        let during_pause = tick(&mut paused, 250);
        assert!(spawned_archetypes(&during_pause).is_empty());
        paused_events.extend(during_pause);
    }
    assert_eq!(query::pending_spawns(&paused), pending);
    assert_eq!(query::wave_clock(&paused), clock);
    apply(&mut paused, Command::ResumeSpawning, &mut events);
    paused_events.extend(run_until_idle(&mut paused, 250));

    assert_eq!(
        spawned_archetypes(&paused_events),
        spawned_archetypes(&steady_events)
    );
}

#[test]
fn scripted_sessions_replay_identically() {
    fn run() -> Vec<Event> {
        let mut world = World::new();
        let mut events = Vec::new();
        let script = vec![
            Command::SetDifficulty {
                difficulty: Difficulty::Hard.multipliers(),
            },
            Command::StartNextWave { time_scale: 1.5 },
            Command::Tick {
                dt: Duration::from_millis(1_200),
            },
            Command::ResolveHit {
                unit: EnemyUnitId::new(0),
                tower: TowerKindId::new("cannon"),
                base_damage: 18,
            },
            Command::PauseSpawning,
            Command::Tick {
                dt: Duration::from_millis(3_000),
            },
            Command::ResumeSpawning,
            Command::Tick {
                dt: Duration::from_millis(2_500),
            },
            Command::ReportEnemyDied {
                unit: EnemyUnitId::new(1),
            },
            Command::Tick {
                dt: Duration::from_millis(60_000),
            },
            Command::Tick {
                dt: Duration::from_millis(60_000),
            },
        ];
        for command in script {
            apply(&mut world, command, &mut events);
        }
        events
    }

    assert_eq!(run(), run());
}

#[test]
fn lethal_hits_defeat_units_and_remove_them_next_tick() {
    let mut world = World::new();
    let _ = start(&mut world, 1.0);
    let events = tick(&mut world, 0);
    let unit = match events.as_slice() {
        [Event::TimeAdvanced { .. }, Event::EnemySpawned { unit }] => unit.clone(),
        other => panic!("unexpected events {other:?}"),
    };

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ResolveHit {
            unit: unit.id,
            tower: TowerKindId::new("archer"),
            base_damage: 10_000,
        },
        &mut events,
    );
    match events.as_slice() {
        [Event::EnemyDamaged {
            unit: damaged,
            amount,
            remaining: 0,
        }, Event::EnemyDefeated {
            unit: defeated,
            reward,
        }] => {
            assert_eq!(*damaged, unit.id);
            assert!(*amount > 0);
            assert_eq!(*defeated, unit.id);
            assert_eq!(*reward, unit.reward);
        }
        other => panic!("unexpected events {other:?}"),
    }
    assert_eq!(
        query::unit(&world, unit.id).map(|snapshot| snapshot.state),
        Some(UnitState::Dead)
    );

    let _ = tick(&mut world, 1);
    assert!(query::unit(&world, unit.id).is_none());

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ResolveHit {
            unit: unit.id,
            tower: TowerKindId::new("archer"),
            base_damage: 10,
        },
        &mut events,
    );
    assert!(events.is_empty());
}

#[test]
fn immune_units_shrug_off_hits() {
    let roster = Roster::from_toml_str(
        r#"
[[enemy]]
id = "ghoul"
health = 30
speed = 10.0
reward = 4
tags = ["undead"]

[[tower]]
id = "vial"
cost = 40
damage = 12
range = 90.0
fire_interval_ms = 700
primary = "poison"
"#,
    )
    .expect("roster parses");
    let mut world = World::with_roster(roster, WorldConfig::default());
    let _ = start(&mut world, 1.0);
    let _ = tick(&mut world, 0);

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ResolveHit {
            unit: EnemyUnitId::new(0),
            tower: TowerKindId::new("vial"),
            base_damage: 12,
        },
        &mut events,
    );
    let unit = query::unit(&world, EnemyUnitId::new(0)).expect("ghoul alive");
    assert_eq!(
        events,
        vec![Event::EnemyDamaged {
            unit: unit.id,
            amount: 0,
            remaining: unit.max_health
        }]
    );
    assert_eq!(unit.state, UnitState::Alive);
}

#[test]
fn reported_deaths_are_consumed_on_the_next_tick() {
    let mut world = World::new();
    let _ = start(&mut world, 1.0);
    let _ = tick(&mut world, 0);
    let unit = query::active_units(&world)
        .pop()
        .expect("first unit spawned");

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ReportEnemyDied { unit: unit.id },
        &mut events,
    );
    apply(
        &mut world,
        Command::ReportEnemyDied { unit: unit.id },
        &mut events,
    );
    assert_eq!(
        events,
        vec![Event::EnemyDefeated {
            unit: unit.id,
            reward: unit.reward
        }]
    );
    assert_eq!(query::active_units(&world).len(), 1);

    let _ = tick(&mut world, 1);
    assert!(query::active_units(&world).is_empty());
}

#[test]
fn clear_cancels_the_wave_and_keeps_the_counter() {
    let mut world = World::new();
    let _ = start(&mut world, 1.0);
    let _ = tick(&mut world, 2_000);
    assert!(!query::active_units(&world).is_empty());

    let mut events = Vec::new();
    apply(&mut world, Command::Clear, &mut events);
    assert!(events.is_empty());
    assert_eq!(query::phase(&world), WavePhase::Idle);
    assert_eq!(query::pending_spawns(&world), 0);
    assert!(query::active_units(&world).is_empty());

    let after = tick(&mut world, 60_000);
    assert_eq!(after.len(), 1);

    let started = start(&mut world, 1.0);
    assert!(matches!(
        started.as_slice(),
        [Event::WaveStarted { wave, .. }] if *wave == WaveId::new(2)
    ));
}

#[test]
fn difficulty_applies_to_waves_started_afterwards() {
    let mut normal = World::new();
    let mut hard = World::new();
    let mut events = Vec::new();
    apply(
        &mut hard,
        Command::SetDifficulty {
            difficulty: Difficulty::Hard.multipliers(),
        },
        &mut events,
    );
    assert_eq!(query::difficulty(&hard), Difficulty::Hard.multipliers());

    let normal_count = query_enemy_count(&start(&mut normal, 1.0));
    let hard_count = query_enemy_count(&start(&mut hard, 1.0));
    assert!(hard_count > normal_count);

    let health = |world: &World| {
        query::composition(world)
            .expect("composition")
            .scaling()
            .health()
    };
    assert!(health(&hard) > health(&normal));
}

fn query_enemy_count(events: &[Event]) -> u32 {
    events
        .iter()
        .find_map(|event| match event {
            Event::WaveStarted { enemy_count, .. } => Some(*enemy_count),
            _ => None,
        })
        .expect("wave started")
}
