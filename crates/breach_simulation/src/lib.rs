//! BREACHPOINT Simulation Core
//!
//! ECS-симуляция top-down tactical raid'а на Bevy 0.16 (strategic layer).
//! Ядро: sound propagation → perception → alertness FSM → behavior
//! execution, один логический тик на FixedUpdate кадр (60Hz).
//!
//! Рендер, аудио, баллистика и collision resolution — внешние слои:
//! они дренируют FireRequest / ParticleRequest / SoundEvent после тика
//! и возвращают HitReport / TriggerPull.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod events;
pub mod geometry;
pub mod logger;
pub mod sound;
pub mod spawn;
pub mod vision;

// Re-export базовых типов для удобства
pub use ai::{AiControlled, AiPlugin, AiState, Alertness, HeardSound, PatrolRoute, PlayerContact};
pub use combat::{CombatPlugin, EntityDied, Weapon};
pub use components::*;
pub use config::{GameConfig, Operator, OperatorData, WeaponConfig};
pub use events::{
    FireRequest, HitReport, ParticleKind, ParticleRequest, ReloadRequest, TriggerPull,
};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use sound::{SoundEvent, SoundKind, SoundPlugin};
pub use vision::{LineOfSight, LosOracle, OpenField, TileMap, TileType};

/// Фазы симуляционного тика (FixedUpdate, последовательный chain)
///
/// Sounds до Perception: звуки прошлого тика должны поднять alertness
/// до того, как FSM оценит агентов. События, выпущенные в Behavior/Combat
/// (выстрелы), догонят слушателей на следующем тике.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Propagation звуковых событий прошлого тика
    Sounds,
    /// Visibility запросы (LOS oracle)
    Perception,
    /// Alertness decay + FSM transitions
    Decisions,
    /// Per-state движение/прицел/огонь
    Behavior,
    /// Weapon таймеры, player запросы, попадания
    Combat,
    /// Интеграция MovementCommand → Position
    Physics,
    /// Уборка мёртвых (mark-and-compact)
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42));

        // Config и oracle caller может вставить заранее — не перетираем
        app.init_resource::<GameConfig>();
        app.init_resource::<LosOracle>();

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Sounds,
                SimulationSet::Perception,
                SimulationSet::Decisions,
                SimulationSet::Behavior,
                SimulationSet::Combat,
                SimulationSet::Physics,
                SimulationSet::Cleanup,
            )
                .chain(),
        );

        app.add_plugins((SoundPlugin, CombatPlugin, AiPlugin));
        app.add_systems(
            FixedUpdate,
            components::movement::apply_movement.in_set(SimulationSet::Physics),
        );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Headless app с ручным шагом часов: каждый app.update() продвигает
/// время ровно на один 60Hz кадр
///
/// Для тестов и batch-прогонов: реальные часы дали бы недетерминированное
/// число FixedUpdate тиков на update.
pub fn create_stepped_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
        std::time::Duration::from_nanos(16_666_667),
    ));
    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Сортировка по Entity ID + сериализация через Debug — простейший
/// детерминированный формат для побайтового сравнения прогонов.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
