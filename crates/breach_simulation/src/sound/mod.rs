//! Sound Propagation Service
//!
//! Звук — эфемерное broadcast-событие (origin + radius). Propagation
//! конвертирует его в alertness-дельты слушателей с linear falloff и
//! запоминает origin как heard-sound локацию. Никаких state transitions
//! здесь — это работа FSM на следующей фазе тика.
//!
//! Ordering: события, выпущенные во время behavior/combat фаз (выстрелы,
//! шаги), читаются propagation'ом только на следующем тике. Однотиковая
//! задержка — осознанное упрощение, не баг.

use bevy::prelude::*;

use crate::ai::{Alertness, HeardSound};
use crate::components::{Facing, FootstepTimer, Health, MovementCommand, Player, Position};
use crate::config::{GameConfig, SoundRadii};
use crate::events::{ParticleKind, ParticleRequest};
use crate::geometry;

/// Sound Plugin
///
/// propagate_sounds — первая фаза тика (Sounds): дренирует события
/// прошлого тика до того, как FSM оценит затронутых агентов.
/// emit_footsteps — Behavior фаза (свежесть MovementCommand).
pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SoundEvent>();
        app.add_systems(
            FixedUpdate,
            (
                propagate_sounds.in_set(crate::SimulationSet::Sounds),
                emit_footsteps
                    .in_set(crate::SimulationSet::Physics)
                    .after(crate::components::movement::apply_movement),
            ),
        );
    }
}

/// Тип звука (определяет радиус распространения)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum SoundKind {
    Footstep,
    Gunshot,
    WallBreak,
    GlassBreak,
    Explosion,
}

impl SoundKind {
    /// Радиус распространения из config
    pub fn radius(&self, radii: &SoundRadii) -> f32 {
        match self {
            SoundKind::Footstep => radii.footstep,
            SoundKind::Gunshot => radii.gunshot,
            SoundKind::WallBreak => radii.wall_break,
            SoundKind::GlassBreak => radii.glass_break,
            SoundKind::Explosion => radii.explosion,
        }
    }
}

/// Event: эмиссия звука в мире
///
/// Производится выстрелами, шагами, breach-зарядами; потребляется один раз
/// propagation-системой (и внешним audio layer'ом) и отбрасывается.
#[derive(Event, Debug, Clone)]
pub struct SoundEvent {
    pub kind: SoundKind,
    pub position: Vec2,
    pub radius: f32,
}

/// Система: propagation звуков → alertness слушателей
///
/// Для каждого живого AI агента в радиусе: alertness += 1 − d/radius
/// (0 на краю, 1 в эпицентре, clamp до 1.0), heard-sound := origin.
/// Агенты вне радиуса не затрагиваются.
///
/// Defensive clamping обязателен: события приходят от внешних caller'ов
/// (breach charges, scripted explosions) и могут содержать мусор.
/// NaN/отрицательный radius → событие молча пропускается.
pub fn propagate_sounds(
    mut sounds: EventReader<SoundEvent>,
    mut listeners: Query<(Entity, &Position, &Health, &mut Alertness, &mut HeardSound)>,
) {
    for sound in sounds.read() {
        if !geometry::is_finite(sound.position) || !sound.radius.is_finite() || sound.radius <= 0.0
        {
            continue;
        }

        let radius_sq = sound.radius * sound.radius;

        for (entity, position, health, mut alertness, mut heard) in listeners.iter_mut() {
            if !health.is_alive() {
                continue;
            }

            let dist_sq = geometry::distance_sq(position.0, sound.position);
            if !dist_sq.is_finite() || dist_sq > radius_sq {
                continue;
            }

            // Linear falloff: 1 в эпицентре, 0 на краю радиуса
            let increase = 1.0 - dist_sq.sqrt() / sound.radius;
            alertness.raise(increase);
            heard.0 = Some(sound.position);

            crate::log(&format!(
                "🔊 {:?} heard {:?} at {:.0} px (alertness +{:.2} → {:.2})",
                entity,
                sound.kind,
                dist_sq.sqrt(),
                increase,
                alertness.value()
            ));
        }
    }
}

/// Система: footstep эмиссия для движущегося player'а
///
/// Каждые 300ms движения: footstep SoundEvent (radius из config) +
/// footstep particle. Стоячий player таймер не расходует.
pub fn emit_footsteps(
    mut players: Query<(&Position, &Facing, &MovementCommand, &mut FootstepTimer), With<Player>>,
    config: Res<GameConfig>,
    time: Res<Time<Fixed>>,
    mut sounds: EventWriter<SoundEvent>,
    mut particles: EventWriter<ParticleRequest>,
) {
    let delta = time.delta_secs();

    for (position, facing, command, mut timer) in players.iter_mut() {
        if !command.is_moving() {
            continue;
        }

        timer.remaining -= delta;
        if timer.remaining > 0.0 {
            continue;
        }
        timer.remaining = FootstepTimer::INTERVAL;

        sounds.write(SoundEvent {
            kind: SoundKind::Footstep,
            position: position.0,
            radius: config.sound.footstep,
        });
        particles.write(ParticleRequest {
            kind: ParticleKind::Footstep,
            position: position.0,
            angle: facing.angle,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_kind_radius() {
        let radii = SoundRadii::default();
        assert_eq!(SoundKind::Footstep.radius(&radii), 150.0);
        assert_eq!(SoundKind::Gunshot.radius(&radii), 800.0);
        assert_eq!(SoundKind::Explosion.radius(&radii), 1000.0);
    }
}
