//! End-to-end тесты AI pipeline: sound → perception → FSM → behavior
//!
//! Каждый тест гоняет полноценный App (все plugins, fixed 60Hz
//! с ручным шагом часов) и проверяет наблюдаемое поведение агентов.

use bevy::prelude::*;
use breach_simulation::components::{MovementCommand, Position};
use breach_simulation::spawn::{spawn_ai_operator, spawn_player};
use breach_simulation::{
    create_stepped_app, AiState, Alertness, Health, HeardSound, HitReport, LosOracle, OpenField,
    Operator, SoundEvent, SoundKind, TileMap, TileType,
};

/// Helper: app + AI защитник без патрульного маршрута (держит позицию)
fn app_with_ai(seed: u64, ai_pos: Vec2) -> (App, Entity) {
    let mut app = create_stepped_app(seed);

    let ai = {
        let world = app.world_mut();
        let mut commands = world.commands();
        let ai = spawn_ai_operator(&mut commands, Operator::Rook, ai_pos, Vec::new());
        world.flush();
        ai
    };

    (app, ai)
}

/// Gunshot в радиусе: alertness растёт по линейному falloff'у,
/// state уходит в Investigate; вне радиуса — глухо.
#[test]
fn test_gunshot_alertness_falloff() {
    let mut app = create_stepped_app(1);

    let (near, edge, far) = {
        let world = app.world_mut();
        let mut commands = world.commands();
        // 200, 250 и 600 px от источника, радиус 500
        let near = spawn_ai_operator(&mut commands, Operator::Rook, Vec2::new(200.0, 0.0), Vec::new());
        let edge = spawn_ai_operator(&mut commands, Operator::Mute, Vec2::new(250.0, 0.0), Vec::new());
        let far = spawn_ai_operator(&mut commands, Operator::Jager, Vec2::new(600.0, 0.0), Vec::new());
        world.flush();
        (near, edge, far)
    };

    app.world_mut().send_event(SoundEvent {
        kind: SoundKind::Gunshot,
        position: Vec2::ZERO,
        radius: 500.0,
    });

    // Два кадра: первый может уйти на инициализацию часов
    app.update();
    app.update();

    let world = app.world();

    // 1 - 200/500 = 0.6 (минус тик-другой decay)
    let near_alertness = world.get::<Alertness>(near).unwrap().value();
    assert!(
        (near_alertness - 0.6).abs() < 0.01,
        "near alertness: {}",
        near_alertness
    );
    assert_eq!(*world.get::<AiState>(near).unwrap(), AiState::Investigate);
    assert!(world.get::<HeardSound>(near).unwrap().0.is_some());

    // 1 - 250/500 = 0.5
    let edge_alertness = world.get::<Alertness>(edge).unwrap().value();
    assert!(
        (edge_alertness - 0.5).abs() < 0.01,
        "edge alertness: {}",
        edge_alertness
    );

    // 600 >= 500: вне радиуса, звук не слышен
    let far_alertness = world.get::<Alertness>(far).unwrap().value();
    assert_eq!(far_alertness, 0.0, "far alertness: {}", far_alertness);
    assert_eq!(*world.get::<AiState>(far).unwrap(), AiState::Patrol);
}

/// Визуальный контакт форсирует Attack + alertness 1.0 за один тик
#[test]
fn test_visual_contact_forces_attack() {
    let (mut app, ai) = app_with_ai(2, Vec2::new(300.0, 0.0));
    app.insert_resource(LosOracle::new(OpenField));

    {
        let world = app.world_mut();
        let mut commands = world.commands();
        spawn_player(&mut commands, Operator::Ash, Vec2::ZERO);
        world.flush();
    }

    app.update();
    app.update();

    let world = app.world();
    assert_eq!(*world.get::<AiState>(ai).unwrap(), AiState::Attack);
    assert_eq!(world.get::<Alertness>(ai).unwrap().value(), 1.0);

    // Alertness держится на 1.0 пока контакт не потерян
    for _ in 0..100 {
        app.update();
    }
    assert_eq!(app.world().get::<Alertness>(ai).unwrap().value(), 1.0);
}

/// Attack держит stand-off дистанцию: с 300 px агент сближается
/// и останавливается в полосе вокруг optimal range
#[test]
fn test_attack_standoff_distance() {
    let (mut app, ai) = app_with_ai(3, Vec2::new(300.0, 0.0));
    app.insert_resource(LosOracle::new(OpenField));

    {
        let world = app.world_mut();
        let mut commands = world.commands();
        spawn_player(&mut commands, Operator::Ash, Vec2::ZERO);
        world.flush();
    }

    for _ in 0..300 {
        app.update();
    }

    let ai_pos = app.world().get::<Position>(ai).unwrap().0;
    let dist = ai_pos.length();
    assert!(
        (160.0..=245.0).contains(&dist),
        "AI не удержал stand-off дистанцию: {}",
        dist
    );
}

/// Без стимулов alertness монотонно спадает и агент возвращается в Patrol
#[test]
fn test_alertness_decays_to_patrol() {
    let (mut app, ai) = app_with_ai(4, Vec2::new(350.0, 0.0));

    // 1 - 350/500 = 0.3 → Alert
    app.world_mut().send_event(SoundEvent {
        kind: SoundKind::Gunshot,
        position: Vec2::ZERO,
        radius: 500.0,
    });
    app.update();
    app.update();
    assert_eq!(*app.world().get::<AiState>(ai).unwrap(), AiState::Alert);

    // Спад 0.01/s: через ~12 секунд должны пройти порог 0.2
    let mut previous = app.world().get::<Alertness>(ai).unwrap().value();
    for _ in 0..7 {
        for _ in 0..100 {
            app.update();
        }
        let current = app.world().get::<Alertness>(ai).unwrap().value();
        assert!(
            current < previous,
            "alertness перестал спадать: {} -> {}",
            previous,
            current
        );
        previous = current;
    }

    assert!(previous < 0.2, "alertness не спал ниже порога: {}", previous);
    assert_eq!(*app.world().get::<AiState>(ai).unwrap(), AiState::Patrol);
}

/// Шаги движущегося player'а слышны рядом даже без line of sight
#[test]
fn test_footsteps_alert_nearby_ai() {
    // LOS oracle отсутствует: can_see всегда false, работает только слух
    let (mut app, ai) = app_with_ai(5, Vec2::new(100.0, 0.0));

    {
        let world = app.world_mut();
        let mut commands = world.commands();
        let player = spawn_player(&mut commands, Operator::Ash, Vec2::ZERO);
        commands.entity(player).insert(MovementCommand::Move {
            velocity: Vec2::new(30.0, 0.0),
        });
        world.flush();
    }

    for _ in 0..120 {
        app.update();
    }

    let world = app.world();
    assert!(
        world.get::<Alertness>(ai).unwrap().value() > 0.5,
        "AI не услышал шаги"
    );
    assert_ne!(*world.get::<AiState>(ai).unwrap(), AiState::Patrol);
    assert_ne!(*world.get::<AiState>(ai).unwrap(), AiState::Attack);
}

/// Стена блокирует визуальный контакт: агент остаётся в Patrol
#[test]
fn test_wall_blocks_visual_contact() {
    let (mut app, ai) = app_with_ai(6, Vec2::new(750.0, 250.0));

    // Сплошная стена по колонке тайлов x=10 (tile_size 50)
    let mut map = TileMap::open(20, 20, 50.0);
    for y in 0..20 {
        map.set_tile(10, y, TileType::Wall);
    }
    app.insert_resource(LosOracle::new(map));

    {
        let world = app.world_mut();
        let mut commands = world.commands();
        spawn_player(&mut commands, Operator::Ash, Vec2::new(250.0, 250.0));
        world.flush();
    }

    for _ in 0..30 {
        app.update();
    }

    let world = app.world();
    assert_eq!(*world.get::<AiState>(ai).unwrap(), AiState::Patrol);
    assert_eq!(world.get::<Alertness>(ai).unwrap().value(), 0.0);
}

/// Летальный HitReport: entity умирает и убирается из мира за тик
#[test]
fn test_lethal_hit_despawns_target() {
    let (mut app, ai) = app_with_ai(7, Vec2::new(400.0, 0.0));

    let player = {
        let world = app.world_mut();
        let mut commands = world.commands();
        let player = spawn_player(&mut commands, Operator::Ash, Vec2::ZERO);
        world.flush();
        player
    };

    app.world_mut().send_event(HitReport {
        shooter: player,
        target: ai,
        damage: 500,
    });
    app.update();
    app.update();

    assert!(
        app.world().get::<Health>(ai).is_none(),
        "мёртвый AI не убран из мира"
    );
}
