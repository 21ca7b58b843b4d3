//! Line-of-sight oracle (fog-of-war подсистема)
//!
//! Архитектура:
//! - `LineOfSight` — контракт внешнего visibility collaborator'а
//! - `LosOracle` — resource-держатель; отсутствие oracle трактуется как
//!   "не видно" (консервативный default: неполная информация не должна
//!   эскалировать агрессию AI)
//! - `TileMap` — встроенная grid-реализация поверх статической карты

use bevy::math::Vec2;

use crate::geometry;

/// Контракт visibility oracle: видно ли точку to из точки from
///
/// Один детерминированный bool на пару точек за тик. Должен учитывать
/// occluding стены карты.
pub trait LineOfSight: Send + Sync {
    fn can_see(&self, from: Vec2, to: Vec2) -> bool;
}

/// Resource-держатель line-of-sight oracle
#[derive(bevy::prelude::Resource, Default)]
pub struct LosOracle {
    oracle: Option<Box<dyn LineOfSight>>,
}

impl LosOracle {
    pub fn new(oracle: impl LineOfSight + 'static) -> Self {
        Self {
            oracle: Some(Box::new(oracle)),
        }
    }

    /// Oracle отсутствует — все проверки вернут false
    pub fn unavailable() -> Self {
        Self { oracle: None }
    }

    /// Проверка видимости с защитой от NaN/inf координат
    pub fn can_see(&self, from: Vec2, to: Vec2) -> bool {
        if !geometry::is_finite(from) || !geometry::is_finite(to) {
            return false;
        }
        match self.oracle.as_ref() {
            Some(oracle) => oracle.can_see(from, to),
            None => false,
        }
    }
}

/// Открытое поле без препятствий (headless демо, тесты)
pub struct OpenField;

impl LineOfSight for OpenField {
    fn can_see(&self, _from: Vec2, _to: Vec2) -> bool {
        true
    }
}

/// Тип тайла статической карты
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileType {
    Floor,
    Wall,
    DestructibleWall,
    ReinforcedWall,
    Furniture,
    Window,
    Vent,
}

impl TileType {
    /// Блокирует ли тайл линию взгляда
    ///
    /// Мебель и окна простреливаются взглядом, стены (любые) — нет.
    pub fn blocks_sight(&self) -> bool {
        matches!(
            self,
            TileType::Wall | TileType::DestructibleWall | TileType::ReinforcedWall
        )
    }
}

/// Статическая тайловая карта (row-major grid)
pub struct TileMap {
    width: usize,
    height: usize,
    tile_size: f32,
    tiles: Vec<TileType>,
}

impl TileMap {
    /// Карта из floor-тайлов заданного размера
    pub fn open(width: usize, height: usize, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            tiles: vec![TileType::Floor; width * height],
        }
    }

    pub fn set_tile(&mut self, x: usize, y: usize, tile: TileType) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = tile;
        }
    }

    /// Тайл по индексам; за границами карты — открытое пространство
    pub fn tile_at(&self, x: i32, y: i32) -> TileType {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return TileType::Floor;
        }
        self.tiles[y as usize * self.width + x as usize]
    }

    fn to_tile_coords(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.tile_size).floor() as i32,
            (p.y / self.tile_size).floor() as i32,
        )
    }
}

impl LineOfSight for TileMap {
    /// Grid walk (Bresenham) между тайлами from → to
    ///
    /// Начальный и конечный тайлы не блокируют: боец, стоящий в дверном
    /// проёме разрушенной стены, всё ещё виден.
    fn can_see(&self, from: Vec2, to: Vec2) -> bool {
        let (x0, y0) = self.to_tile_coords(from);
        let (x1, y1) = self.to_tile_coords(to);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let (mut x, mut y) = (x0, y0);
        loop {
            if (x, y) != (x0, y0) && (x, y) != (x1, y1) && self.tile_at(x, y).blocks_sight() {
                return false;
            }
            if x == x1 && y == y1 {
                return true;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_oracle_is_blind() {
        let oracle = LosOracle::unavailable();
        assert!(!oracle.can_see(Vec2::ZERO, Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_nan_coords_not_visible() {
        let oracle = LosOracle::new(OpenField);
        assert!(!oracle.can_see(Vec2::new(f32::NAN, 0.0), Vec2::ZERO));
        assert!(!oracle.can_see(Vec2::ZERO, Vec2::new(0.0, f32::INFINITY)));
    }

    #[test]
    fn test_open_map_sees_everything() {
        let map = TileMap::open(10, 10, 30.0);
        assert!(map.can_see(Vec2::new(15.0, 15.0), Vec2::new(285.0, 285.0)));
    }

    #[test]
    fn test_wall_blocks_sight() {
        let mut map = TileMap::open(10, 10, 30.0);
        // Вертикальная стена x=5
        for y in 0..10 {
            map.set_tile(5, y, TileType::Wall);
        }

        let left = Vec2::new(45.0, 135.0); // tile (1, 4)
        let right = Vec2::new(255.0, 135.0); // tile (8, 4)
        assert!(!map.can_see(left, right));
        assert!(!map.can_see(right, left));

        // Вдоль стены (не пересекая её) видимость есть
        assert!(map.can_see(Vec2::new(45.0, 15.0), Vec2::new(45.0, 285.0)));
    }

    #[test]
    fn test_window_does_not_block() {
        let mut map = TileMap::open(10, 10, 30.0);
        for y in 0..10 {
            map.set_tile(5, y, TileType::Wall);
        }
        map.set_tile(5, 4, TileType::Window);

        // Через окно — видно
        let left = Vec2::new(45.0, 135.0);
        let right = Vec2::new(255.0, 135.0);
        assert!(map.can_see(left, right));
    }

    #[test]
    fn test_endpoint_tiles_do_not_block() {
        let mut map = TileMap::open(10, 10, 30.0);
        map.set_tile(1, 1, TileType::Wall);
        map.set_tile(8, 1, TileType::Wall);

        // Оба бойца "в" блокирующих тайлах — промежуточных стен нет
        let a = Vec2::new(45.0, 45.0);
        let b = Vec2::new(255.0, 45.0);
        assert!(map.can_see(a, b));
    }

    #[test]
    fn test_out_of_bounds_is_open() {
        let map = TileMap::open(4, 4, 30.0);
        assert!(map.can_see(Vec2::new(-100.0, -100.0), Vec2::new(500.0, 500.0)));
    }
}
