//! Игровая конфигурация (immutable resource)
//!
//! Все tunables передаются в симуляцию явно при конструировании App —
//! никаких глобальных registries. Operator roster захардкожен как данные
//! (baseline balance), буде понадобится — загрузка через serde уже готова.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::Team;

/// Корневой config симуляции
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub ai: AiTuning,
    pub sound: SoundRadii,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ai: AiTuning::default(),
            sound: SoundRadii::default(),
        }
    }
}

/// AI tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiTuning {
    /// Скорость спада alertness (единиц в секунду)
    pub alertness_decay: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            alertness_decay: 0.01,
        }
    }
}

/// Радиусы распространения звуков (px)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundRadii {
    pub footstep: f32,
    pub gunshot: f32,
    pub wall_break: f32,
    pub glass_break: f32,
    pub explosion: f32,
}

impl Default for SoundRadii {
    fn default() -> Self {
        Self {
            footstep: 150.0,
            gunshot: 800.0,
            wall_break: 500.0,
            glass_break: 600.0,
            explosion: 1000.0,
        }
    }
}

/// Оператор (класс бойца)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    // Attackers
    Sledge,
    Thatcher,
    Ash,
    Thermite,
    // Defenders
    Mute,
    Rook,
    Jager,
    Valkyrie,
}

/// Данные оператора (read-only, применяются при spawn)
#[derive(Debug, Clone)]
pub struct OperatorData {
    pub name: &'static str,
    pub team: Team,
    pub health: u32,
    /// Speed rating 1–3 (конвертируется в px/s через move_speed())
    pub speed: u32,
    pub weapon: WeaponConfig,
}

/// Характеристики оружия оператора
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Урон за пулю
    pub damage: u32,
    /// Скорострельность (rounds per minute)
    pub rate_of_fire: f32,
    /// Ёмкость магазина
    pub capacity: u32,
    /// Запас патронов
    pub reserve: u32,
}

impl OperatorData {
    /// Скорость движения в px/s: base 150 + 25 за каждый speed rating
    pub fn move_speed(&self) -> f32 {
        150.0 + self.speed as f32 * 25.0
    }
}

impl Operator {
    pub fn data(&self) -> OperatorData {
        match self {
            Operator::Sledge => OperatorData {
                name: "Sledge",
                team: Team::Attacker,
                health: 100,
                speed: 3,
                weapon: WeaponConfig {
                    damage: 45,
                    rate_of_fire: 600.0,
                    capacity: 30,
                    reserve: 150,
                },
            },
            Operator::Thatcher => OperatorData {
                name: "Thatcher",
                team: Team::Attacker,
                health: 100,
                speed: 2,
                weapon: WeaponConfig {
                    damage: 40,
                    rate_of_fire: 650.0,
                    capacity: 30,
                    reserve: 150,
                },
            },
            Operator::Ash => OperatorData {
                name: "Ash",
                team: Team::Attacker,
                health: 90,
                speed: 3,
                weapon: WeaponConfig {
                    damage: 35,
                    rate_of_fire: 800.0,
                    capacity: 30,
                    reserve: 150,
                },
            },
            Operator::Thermite => OperatorData {
                name: "Thermite",
                team: Team::Attacker,
                health: 100,
                speed: 2,
                weapon: WeaponConfig {
                    damage: 40,
                    rate_of_fire: 600.0,
                    capacity: 30,
                    reserve: 150,
                },
            },
            Operator::Mute => OperatorData {
                name: "Mute",
                team: Team::Defender,
                health: 100,
                speed: 2,
                weapon: WeaponConfig {
                    damage: 40,
                    rate_of_fire: 600.0,
                    capacity: 25,
                    reserve: 125,
                },
            },
            Operator::Rook => OperatorData {
                name: "Rook",
                team: Team::Defender,
                health: 110,
                speed: 1,
                weapon: WeaponConfig {
                    damage: 45,
                    rate_of_fire: 550.0,
                    capacity: 30,
                    reserve: 150,
                },
            },
            Operator::Jager => OperatorData {
                name: "Jager",
                team: Team::Defender,
                health: 100,
                speed: 2,
                weapon: WeaponConfig {
                    damage: 40,
                    rate_of_fire: 700.0,
                    capacity: 30,
                    reserve: 150,
                },
            },
            Operator::Valkyrie => OperatorData {
                name: "Valkyrie",
                team: Team::Defender,
                health: 90,
                speed: 2,
                weapon: WeaponConfig {
                    damage: 35,
                    rate_of_fire: 800.0,
                    capacity: 30,
                    reserve: 150,
                },
            },
        }
    }

    /// Все операторы команды
    pub fn roster(team: Team) -> Vec<Operator> {
        use Operator::*;
        [Sledge, Thatcher, Ash, Thermite, Mute, Rook, Jager, Valkyrie]
            .into_iter()
            .filter(|op| op.data().team == team)
            .collect()
    }
}
