//! Базовые компоненты бойцов: Actor, Team, Health

use bevy::prelude::*;

/// Фракция бойца (две стороны рейда)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Team {
    Attacker,
    Defender,
}

impl Team {
    /// Противоположная фракция
    pub fn opposing(&self) -> Team {
        match self {
            Team::Attacker => Team::Defender,
            Team::Defender => Team::Attacker,
        }
    }
}

/// Боец (player или AI enemy) — базовый компонент живого combatant'а
///
/// Автоматически добавляет Position, Facing, Health, MovementCommand,
/// MovementSpeed через Required Components.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(
    Health,
    crate::components::Position,
    crate::components::Facing,
    crate::components::MovementCommand,
    crate::components::MovementSpeed
)]
pub struct Actor {
    pub team: Team,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            team: Team::Defender,
        }
    }
}

/// Здоровье бойца
///
/// Инвариант: 0 ≤ current ≤ max. Урон только уменьшает current,
/// смерть при current == 0.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}
