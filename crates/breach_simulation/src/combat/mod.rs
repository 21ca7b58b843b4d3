//! Combat подсистема
//!
//! ECS ответственность:
//! - Weapon state: магазин, запас, cooldown, перезарядка
//! - Приём попаданий (HitReport) → health → смерть
//! - Outbound запросы: FireRequest, ParticleRequest, gunshot SoundEvent
//!
//! Внешний weapons layer ответственность:
//! - Баллистика projectile'ов, collision detection
//! - Конвертация FireRequest → полёт пули → HitReport

use bevy::prelude::*;

pub mod damage;
pub mod systems;
pub mod weapon;

// Re-export основных типов
pub use damage::{apply_hits, despawn_dead, EntityDied};
pub use systems::{fire_weapon, process_reload_requests, process_trigger_pulls};
pub use weapon::{tick_weapons, Weapon};

use crate::events::{FireRequest, HitReport, ParticleRequest, ReloadRequest, TriggerPull};
use crate::SimulationSet;

/// Combat Plugin
///
/// Порядок выполнения (внутри Combat фазы):
/// 1. tick_weapons — таймеры (shot cooldown, reload)
/// 2. process_trigger_pulls / process_reload_requests — player запросы
/// 3. apply_hits — попадания от внешнего слоя
/// Cleanup фаза: despawn_dead (после всех петель тика).
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireRequest>()
            .add_event::<ParticleRequest>()
            .add_event::<TriggerPull>()
            .add_event::<ReloadRequest>()
            .add_event::<HitReport>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (
                (
                    tick_weapons,
                    process_trigger_pulls,
                    process_reload_requests,
                    apply_hits,
                )
                    .chain()
                    .in_set(SimulationSet::Combat),
                despawn_dead.in_set(SimulationSet::Cleanup),
            ),
        );
    }
}
