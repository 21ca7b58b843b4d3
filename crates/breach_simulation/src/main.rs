//! Headless симуляция BREACHPOINT
//!
//! Прогоняет raid-сценарий без рендера: игрок-штурмовик против
//! AI-обороны, gunshot в начале для проверки sound propagation.

use bevy::prelude::*;
use breach_simulation::components::{MovementCommand, Position};
use breach_simulation::spawn::{generate_patrol_points, spawn_ai_operator, spawn_player};
use breach_simulation::{
    create_stepped_app, AiState, Alertness, LosOracle, OpenField, Operator, SoundEvent, SoundKind,
    Team,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    let seed = 42;
    println!("Starting BREACHPOINT headless simulation (seed: {})", seed);

    let mut app = create_stepped_app(seed);

    // Открытое поле: LOS не блокируется
    app.insert_resource(LosOracle::new(OpenField));

    {
        let world = app.world_mut();
        let mut commands = world.commands();
        let mut route_rng = ChaCha8Rng::seed_from_u64(seed);

        let player = spawn_player(&mut commands, Operator::Ash, Vec2::new(100.0, 100.0));

        for (i, operator) in Operator::roster(Team::Defender).into_iter().enumerate() {
            let origin = Vec2::new(600.0 + 120.0 * i as f32, 500.0);
            let route = generate_patrol_points(&mut route_rng, origin, 4);
            spawn_ai_operator(&mut commands, operator, origin, route);
        }

        // Игрок двигается к точке обороны
        commands.entity(player).insert(MovementCommand::Move {
            velocity: Vec2::new(120.0, 90.0),
        });

        world.flush();
    }

    // Одиночный выстрел в начале: вся оборона должна отреагировать
    app.world_mut().send_event(SoundEvent {
        kind: SoundKind::Gunshot,
        position: Vec2::new(100.0, 100.0),
        radius: 800.0,
    });

    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            let world = app.world_mut();
            let mut query = world.query::<(&AiState, &Alertness, &Position)>();
            let states: Vec<_> = query
                .iter(world)
                .map(|(state, alertness, _)| format!("{:?}({:.2})", state, alertness.value()))
                .collect();
            println!("Tick {}: {}", tick, states.join(" "));
        }
    }

    println!("Simulation complete!");
}
