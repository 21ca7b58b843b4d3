//! Spawn helpers: сборка бойцов из operator data
//!
//! Позиции спавна и патрульные seed'ы — opaque входы от map provider'а;
//! симуляция их не генерирует (кроме случайного разброса патрульных
//! точек вокруг seed'а).

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{AiControlled, PatrolRoute};
use crate::components::{Actor, FootstepTimer, Health, MovementSpeed, Player, Position};
use crate::combat::Weapon;
use crate::config::Operator;
use crate::geometry;

/// Spawn бойца с полным набором компонентов из operator data
pub fn spawn_operator(commands: &mut Commands, operator: Operator, position: Vec2) -> Entity {
    let data = operator.data();

    commands
        .spawn((
            Actor { team: data.team },
            Health::new(data.health),
            Position(position),
            MovementSpeed {
                speed: data.move_speed(),
            },
            Weapon::from_config(data.weapon),
        ))
        .id()
}

/// Spawn protagonist'а (Player marker + footstep timer)
pub fn spawn_player(commands: &mut Commands, operator: Operator, position: Vec2) -> Entity {
    let entity = spawn_operator(commands, operator, position);
    commands
        .entity(entity)
        .insert((Player, FootstepTimer::default()));

    crate::log_info(&format!(
        "Player {} spawned at {:?}",
        operator.data().name,
        position
    ));
    entity
}

/// Spawn AI бойца с патрульным маршрутом
pub fn spawn_ai_operator(
    commands: &mut Commands,
    operator: Operator,
    position: Vec2,
    patrol_points: Vec<Vec2>,
) -> Entity {
    let entity = spawn_operator(commands, operator, position);
    commands
        .entity(entity)
        .insert((AiControlled, PatrolRoute::new(patrol_points)));

    crate::log_info(&format!(
        "AI {} spawned at {:?}",
        operator.data().name,
        position
    ));
    entity
}

/// Генерация патрульного маршрута от seed-позиции
///
/// Seed + count случайных шагов по 100–200 px в произвольном направлении,
/// каждый от предыдущей точки.
pub fn generate_patrol_points<R: Rng>(rng: &mut R, seed: Vec2, count: usize) -> Vec<Vec2> {
    let mut points = vec![seed];

    for _ in 0..count {
        let last = *points.last().expect("seeded with at least one point");
        points.push(geometry::ring_point(rng, last, 100.0, 200.0));
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_patrol_points_step_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let points = generate_patrol_points(&mut rng, Vec2::new(50.0, 50.0), 3);

        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Vec2::new(50.0, 50.0));
        for pair in points.windows(2) {
            let step = (pair[1] - pair[0]).length();
            assert!(step >= 100.0 - 1e-3 && step <= 200.0 + 1e-3, "step = {}", step);
        }
    }

    #[test]
    fn test_spawned_operator_components() {
        let mut world = World::new();
        let entity = {
            let mut commands = world.commands();
            spawn_operator(&mut commands, Operator::Rook, Vec2::new(10.0, 20.0))
        };
        world.flush();

        let health = world.get::<Health>(entity).unwrap();
        assert_eq!(health.current, 110);

        let weapon = world.get::<Weapon>(entity).unwrap();
        assert_eq!(weapon.capacity, 30);
        assert_eq!(weapon.magazine, 30);

        let speed = world.get::<MovementSpeed>(entity).unwrap();
        assert_eq!(speed.speed, 175.0);

        // Required components дотянулись через Actor
        assert!(world.get::<crate::components::Facing>(entity).is_some());
        assert!(world.get::<crate::components::MovementCommand>(entity).is_some());
    }
}
