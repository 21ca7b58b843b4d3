//! Векторные helpers для 2D top-down мира (px координаты)
//!
//! Общая математика для sound propagation, поведений и spawn логики.
//! Все сравнения расстояний идут через квадрат — sqrt только там,
//! где нужен linear falloff.

use bevy::math::Vec2;
use rand::Rng;

/// Квадрат расстояния между двумя точками
pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    (b - a).length_squared()
}

/// Нормализованное направление from → to
///
/// None если точки совпадают (или почти совпадают) — caller решает
/// что делать со "стоим на цели".
pub fn direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    if delta.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(delta.normalize())
}

/// Угол (радианы) от from к to, atan2 convention
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Случайная точка в кольце [min_radius, max_radius] вокруг center
///
/// Используется Alert/Search поведениями и генерацией патрульных маршрутов.
pub fn ring_point<R: Rng>(rng: &mut R, center: Vec2, min_radius: f32, max_radius: f32) -> Vec2 {
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    let radius = min_radius + rng.gen::<f32>() * (max_radius - min_radius);
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Обе координаты конечны (защита от NaN/inf из внешних событий)
pub fn is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
