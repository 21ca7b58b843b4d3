//! Позиционирование в 2D мире: Position, Facing

use bevy::prelude::*;

/// Позиция бойца в мировых координатах (px)
///
/// Симуляция authoritative для позиций: behavior выдаёт MovementCommand,
/// integrator применяет velocity к Position. External adapter (рендер,
/// collision resolution) может скорректировать позицию между тиками.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Position(pub Vec2);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Направление взгляда (радианы, atan2 convention)
///
/// Обновляется behavior'ами: обычно совпадает с направлением движения,
/// кроме Attack retreat (пятимся, но смотрим на цель).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Facing {
    pub angle: f32,
}
