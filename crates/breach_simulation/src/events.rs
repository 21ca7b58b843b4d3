//! События на границе симуляции
//!
//! Симуляция не рендерит, не играет аудио и не трассирует пули — вместо
//! ambient publish/subscribe наружу идут явные типизированные очереди
//! (Bevy Events), которые внешние слои дренируют после тика:
//! - Outbound: FireRequest, ParticleRequest (+ SoundEvent из sound модуля)
//! - Inbound:  TriggerPull, ReloadRequest, HitReport

use bevy::prelude::*;

/// Тип визуального эффекта (потребляется внешним рендером)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ParticleKind {
    MuzzleFlash,
    Impact,
    Debris,
    Blood,
    Footstep,
    Explosion,
}

/// Event (outbound): запрос на спавн частицы
#[derive(Event, Debug, Clone)]
pub struct ParticleRequest {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub angle: f32,
}

/// Event (outbound): запрос на выстрел
///
/// Внешний weapons layer спавнит projectile и ведёт его физику;
/// попадания возвращаются через HitReport.
#[derive(Event, Debug, Clone)]
pub struct FireRequest {
    pub shooter: Entity,
    pub origin: Vec2,
    pub angle: f32,
    /// Урон пули (из Weapon компонента)
    pub damage: u32,
}

/// Event (inbound): внешний driver нажал спусковой крючок player'а
#[derive(Event, Debug, Clone)]
pub struct TriggerPull {
    pub entity: Entity,
}

/// Event (inbound): ручная перезарядка
#[derive(Event, Debug, Clone)]
pub struct ReloadRequest {
    pub entity: Entity,
}

/// Event (inbound): projectile попал в цель (от внешнего weapons layer'а)
#[derive(Event, Debug, Clone)]
pub struct HitReport {
    /// Кто выстрелил (self-hit отбрасывается)
    pub shooter: Entity,
    pub target: Entity,
    pub damage: u32,
}
