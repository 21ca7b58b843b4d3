//! Player (protagonist) marker и сопутствующие компоненты

use bevy::prelude::*;

/// Marker: этот Actor — protagonist
///
/// AI perception проверяет видимость именно против Player entity.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Таймер шагов (footstep sound emission)
///
/// Пока player движется, таймер тикает вниз; на нуле эмитится
/// footstep SoundEvent + particle, таймер перезаряжается.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct FootstepTimer {
    pub remaining: f32,
}

impl FootstepTimer {
    /// Интервал между шагами (300ms)
    pub const INTERVAL: f32 = 0.3;
}

impl Default for FootstepTimer {
    fn default() -> Self {
        Self {
            remaining: Self::INTERVAL,
        }
    }
}
