//! Property-based тесты детерминизма
//!
//! Полный raid-сценарий (player + AI-оборона) с одинаковым seed должен
//! давать побайтово идентичные снепшоты.

use bevy::prelude::*;
use breach_simulation::components::Position;
use breach_simulation::spawn::{generate_patrol_points, spawn_ai_operator, spawn_player};
use breach_simulation::{
    create_stepped_app, AiState, Alertness, Health, LosOracle, OpenField, Operator, SoundEvent,
    SoundKind, Team,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_raid_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 600;

    let snapshot1 = run_raid_and_snapshot(SEED, TICK_COUNT);
    let snapshot2 = run_raid_and_snapshot(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_raid_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 300;

    // Запускаем 5 раз — все должны быть идентичны
    let snapshots: Vec<_> = (0..5)
        .map(|_| run_raid_and_snapshot(SEED, TICK_COUNT))
        .collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

/// Запускает raid-сценарий и возвращает snapshot мира
///
/// Сценарий: player-штурмовик движется к обороне, 4 AI-защитника
/// патрулируют, в начале — gunshot для пробуждения FSM.
fn run_raid_and_snapshot(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_stepped_app(seed);
    app.insert_resource(LosOracle::new(OpenField));

    {
        let world = app.world_mut();
        let mut commands = world.commands();
        let mut route_rng = ChaCha8Rng::seed_from_u64(seed);

        spawn_player(&mut commands, Operator::Ash, Vec2::new(100.0, 100.0));

        for (i, operator) in Operator::roster(Team::Defender).into_iter().enumerate() {
            let origin = Vec2::new(700.0 + 150.0 * i as f32, 600.0);
            let route = generate_patrol_points(&mut route_rng, origin, 4);
            spawn_ai_operator(&mut commands, operator, origin, route);
        }

        world.flush();
    }

    app.world_mut().send_event(SoundEvent {
        kind: SoundKind::Gunshot,
        position: Vec2::new(100.0, 100.0),
        radius: 800.0,
    });

    for _ in 0..tick_count {
        app.update();
    }

    create_raid_snapshot(app.world_mut())
}

/// Snapshot состояния raid'а (position, health, alertness, FSM state)
fn create_raid_snapshot(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &Position, &Health)>();
    let mut data: Vec<_> = query.iter(world).collect();
    data.sort_by_key(|(e, _, _)| e.index());
    for (entity, position, health) in data {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(&position.0.x.to_le_bytes());
        snapshot.extend_from_slice(&position.0.y.to_le_bytes());
        snapshot.extend_from_slice(&health.current.to_le_bytes());
        snapshot.extend_from_slice(&health.max.to_le_bytes());
    }

    let mut ai_query = world.query::<(Entity, &AiState, &Alertness)>();
    let mut ai_data: Vec<_> = ai_query.iter(world).collect();
    ai_data.sort_by_key(|(e, _, _)| e.index());
    for (entity, state, alertness) in ai_data {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", state).as_bytes());
        snapshot.extend_from_slice(&alertness.value().to_le_bytes());
    }

    snapshot
}
