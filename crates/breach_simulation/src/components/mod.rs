//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики бойца (team, health)
//! - world: позиционирование (Position, Facing)
//! - movement: команды перемещения (MovementCommand, MovementSpeed)
//! - player: protagonist marker + footstep timer

pub mod actor;
pub mod movement;
pub mod player;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use player::*;
pub use world::*;
