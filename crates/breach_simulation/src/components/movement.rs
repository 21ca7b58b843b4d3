//! Movement компоненты: команды перемещения, скорость

use bevy::prelude::*;

/// Команда движения бойца (выход Behavior Executor'а)
///
/// Архитектура:
/// - AI/player системы пишут MovementCommand (velocity intent)
/// - `apply_movement` интегрирует velocity в Position каждый fixed tick
/// - External adapter может читать команду вместо integrator'а
///   (например для engine-side collision resolution)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum MovementCommand {
    /// Стоять на месте
    Idle,
    /// Двигаться с заданной velocity (px/s, постоянная магнитуда)
    Move { velocity: Vec2 },
}

impl Default for MovementCommand {
    fn default() -> Self {
        Self::Idle
    }
}

impl MovementCommand {
    /// Текущая velocity команды (ZERO для Idle)
    pub fn velocity(&self) -> Vec2 {
        match self {
            MovementCommand::Idle => Vec2::ZERO,
            MovementCommand::Move { velocity } => *velocity,
        }
    }

    pub fn is_moving(&self) -> bool {
        match self {
            MovementCommand::Idle => false,
            MovementCommand::Move { velocity } => velocity.length_squared() > f32::EPSILON,
        }
    }
}

/// Базовая скорость движения бойца (px/s)
///
/// Задаётся из operator data при spawn; behavior multipliers (0.7× patrol,
/// 0.8× alert, 0.9× investigate/search) применяются поверх.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 200.0 }
    }
}

/// Система интеграции MovementCommand → Position (headless режим)
///
/// position += velocity * dt. Работает в FixedUpdate для детерминизма.
pub fn apply_movement(
    mut movers: Query<(&MovementCommand, &mut crate::components::Position)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (command, mut position) in movers.iter_mut() {
        let velocity = command.velocity();
        if velocity.length_squared() > 0.0 {
            position.0 += velocity * delta;
        }
    }
}
