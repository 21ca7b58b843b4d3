//! Урон и смерть

use bevy::prelude::*;

use crate::components::{Actor, Health, Position};
use crate::events::{HitReport, ParticleKind, ParticleRequest};
use crate::geometry;

/// Event: боец умер (health достиг 0)
///
/// Эмитится один раз, непосредственно перед despawn'ом.
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
}

/// Система: применение HitReport → урон по health
///
/// Внешний weapons layer сообщает попадания; мы списываем health и
/// просим blood particle. Self-hit отбрасывается.
pub fn apply_hits(
    mut hits: EventReader<HitReport>,
    mut targets: Query<(&mut Health, &Position)>,
    shooters: Query<&Position>,
    mut particles: EventWriter<ParticleRequest>,
) {
    for hit in hits.read() {
        if hit.shooter == hit.target {
            crate::log_warning(&format!("self-hit from {:?} dropped", hit.shooter));
            continue;
        }

        let Ok((mut health, target_pos)) = targets.get_mut(hit.target) else {
            continue; // Цель уже убрана из симуляции
        };
        if !health.is_alive() {
            continue;
        }

        health.take_damage(hit.damage);

        // Угол брызг — по направлению прилёта пули (если стрелок ещё жив)
        let angle = shooters
            .get(hit.shooter)
            .map(|shooter_pos| geometry::angle_to(shooter_pos.0, target_pos.0))
            .unwrap_or(0.0);
        particles.write(ParticleRequest {
            kind: ParticleKind::Blood,
            position: target_pos.0,
            angle,
        });

        crate::log(&format!(
            "💥 {:?} hit {:?} for {} (HP → {})",
            hit.shooter, hit.target, hit.damage, health.current
        ));
    }
}

/// Система: уборка мёртвых (mark-and-compact, конец тика)
///
/// Все behavior/combat петли за тик уже отработали — удаление здесь
/// не ломает итерацию по живым. Despawn идёт через deferred Commands.
pub fn despawn_dead(
    dead: Query<(Entity, &Health), With<Actor>>,
    mut died_events: EventWriter<EntityDied>,
    mut commands: Commands,
) {
    for (entity, health) in dead.iter() {
        if health.is_alive() {
            continue;
        }

        died_events.write(EntityDied { entity });
        commands.entity(entity).despawn();
        crate::log_info(&format!("☠ {:?} died, removed from simulation", entity));
    }
}
