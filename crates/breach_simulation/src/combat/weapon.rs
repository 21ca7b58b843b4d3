//! Weapon component: магазин, запас, скорострельность, перезарядка
//!
//! ECS хранит только state (патроны, таймеры) и принимает решение
//! "выстрел разрешён". Баллистика и попадания — во внешнем weapons layer,
//! который слушает FireRequest и возвращает HitReport.

use bevy::prelude::*;

use crate::config::WeaponConfig;

/// Оружие бойца
///
/// Инварианты: magazine ≤ capacity; reserve не уходит в минус
/// (u32 + saturating арифметика). Таймеры тикают вниз до 0.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    /// Урон за пулю
    pub damage: u32,
    /// Скорострельность (rounds per minute)
    pub rate_of_fire: f32,
    /// Патронов в магазине
    pub magazine: u32,
    /// Ёмкость магазина
    pub capacity: u32,
    /// Запас патронов
    pub reserve: u32,
    /// Перезарядка в процессе
    pub reloading: bool,
    /// Оставшееся время перезарядки (секунды)
    pub reload_timer: f32,
    /// Оставшееся время до следующего разрешённого выстрела (секунды)
    pub shot_timer: f32,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::from_config(WeaponConfig {
            damage: 40,
            rate_of_fire: 600.0,
            capacity: 30,
            reserve: 150,
        })
    }
}

impl Weapon {
    /// Длительность перезарядки (секунды)
    pub const RELOAD_TIME: f32 = 2.0;

    pub fn from_config(config: WeaponConfig) -> Self {
        Self {
            damage: config.damage,
            rate_of_fire: config.rate_of_fire,
            magazine: config.capacity,
            capacity: config.capacity,
            reserve: config.reserve,
            reloading: false,
            reload_timer: 0.0,
            shot_timer: 0.0,
        }
    }

    /// Интервал между выстрелами в секундах
    ///
    /// Единая конверсия rounds-per-minute → seconds-per-round для
    /// player и AI. Невалидный rate of fire → стрельба запрещена.
    pub fn shot_interval(&self) -> f32 {
        if self.rate_of_fire > 0.0 && self.rate_of_fire.is_finite() {
            60.0 / self.rate_of_fire
        } else {
            f32::INFINITY
        }
    }

    /// Разрешён ли выстрел прямо сейчас
    pub fn can_fire(&self) -> bool {
        !self.reloading && self.magazine > 0 && self.shot_timer <= 0.0
    }

    /// Попытка выстрела
    ///
    /// true → патрон списан, shot timer взведён. Пустой магазин без
    /// активной перезарядки автоматически запускает reload; огонь
    /// возобновится после её завершения.
    pub fn try_fire(&mut self) -> bool {
        if self.can_fire() {
            self.magazine -= 1;
            self.shot_timer = self.shot_interval();
            return true;
        }

        if self.magazine == 0 && !self.reloading {
            self.start_reload();
        }
        false
    }

    /// Запуск перезарядки
    ///
    /// No-op если уже перезаряжаемся, магазин полон или запас пуст.
    pub fn start_reload(&mut self) -> bool {
        if self.reloading || self.magazine == self.capacity || self.reserve == 0 {
            return false;
        }
        self.reloading = true;
        self.reload_timer = Self::RELOAD_TIME;
        true
    }

    /// Завершение перезарядки: переливаем из запаса в магазин
    fn finish_reload(&mut self) {
        let needed = self.capacity - self.magazine;
        let moved = needed.min(self.reserve);
        self.magazine += moved;
        self.reserve -= moved;
        self.reloading = false;
        self.reload_timer = 0.0;
    }

    /// Тик таймеров оружия
    pub fn tick(&mut self, delta: f32) {
        if self.shot_timer > 0.0 {
            self.shot_timer = (self.shot_timer - delta).max(0.0);
        }
        if self.reloading {
            self.reload_timer -= delta;
            if self.reload_timer <= 0.0 {
                self.finish_reload();
            }
        }
    }
}

/// Система: обновление weapon таймеров (shot cooldown + reload)
pub fn tick_weapons(mut weapons: Query<&mut Weapon>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();
    for mut weapon in weapons.iter_mut() {
        weapon.tick(delta);
    }
}
