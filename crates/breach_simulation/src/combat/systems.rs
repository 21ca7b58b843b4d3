//! Combat системы: стрельба по запросу, перезарядка

use bevy::prelude::*;

use crate::combat::Weapon;
use crate::components::{Facing, Health, Position};
use crate::config::GameConfig;
use crate::events::{FireRequest, ParticleKind, ParticleRequest, ReloadRequest, TriggerPull};
use crate::sound::{SoundEvent, SoundKind};

/// Смещение дульного среза от центра бойца (px)
const MUZZLE_OFFSET: f32 = 20.0;

/// Выстрел из оружия бойца
///
/// Общий путь для AI (Attack behavior) и player'а (TriggerPull):
/// списывает патрон, эмитит FireRequest + muzzle flash + gunshot звук.
/// false если оружие не готово (cooldown/reload/пустой магазин —
/// последний сам запускает автоперезарядку).
pub fn fire_weapon(
    shooter: Entity,
    position: Vec2,
    angle: f32,
    weapon: &mut Weapon,
    gunshot_radius: f32,
    fire_requests: &mut EventWriter<FireRequest>,
    sounds: &mut EventWriter<SoundEvent>,
    particles: &mut EventWriter<ParticleRequest>,
) -> bool {
    if !weapon.try_fire() {
        return false;
    }

    let muzzle = position + Vec2::new(angle.cos(), angle.sin()) * MUZZLE_OFFSET;

    fire_requests.write(FireRequest {
        shooter,
        origin: muzzle,
        angle,
        damage: weapon.damage,
    });
    particles.write(ParticleRequest {
        kind: ParticleKind::MuzzleFlash,
        position: muzzle,
        angle,
    });
    sounds.write(SoundEvent {
        kind: SoundKind::Gunshot,
        position,
        radius: gunshot_radius,
    });

    true
}

/// Система: обработка TriggerPull от внешнего driver'а
///
/// Player стреляет с тем же weapon gating что и AI (интервал из
/// rate of fire, блок на время перезарядки).
pub fn process_trigger_pulls(
    mut triggers: EventReader<TriggerPull>,
    mut shooters: Query<(&Position, &Facing, &Health, &mut Weapon)>,
    config: Res<GameConfig>,
    mut fire_requests: EventWriter<FireRequest>,
    mut sounds: EventWriter<SoundEvent>,
    mut particles: EventWriter<ParticleRequest>,
) {
    for trigger in triggers.read() {
        let Ok((position, facing, health, mut weapon)) = shooters.get_mut(trigger.entity) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        fire_weapon(
            trigger.entity,
            position.0,
            facing.angle,
            &mut weapon,
            config.sound.gunshot,
            &mut fire_requests,
            &mut sounds,
            &mut particles,
        );
    }
}

/// Система: ручная перезарядка по запросу
pub fn process_reload_requests(
    mut requests: EventReader<ReloadRequest>,
    mut shooters: Query<(&Health, &mut Weapon)>,
) {
    for request in requests.read() {
        let Ok((health, mut weapon)) = shooters.get_mut(request.entity) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        if weapon.start_reload() {
            crate::log(&format!(
                "{:?} reloading ({}/{} in reserve)",
                request.entity, weapon.magazine, weapon.reserve
            ));
        }
    }
}
