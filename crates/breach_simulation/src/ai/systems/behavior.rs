//! Behavior Executor: одна policy на state, вызывается после FSM
//!
//! Все policy выдают MovementCommand с velocity постоянной магнитуды
//! и поворачивают Facing по направлению движения (кроме Attack retreat —
//! пятимся, но держим цель в прицеле). Сравнения дистанций — через
//! квадрат, sqrt не нужен.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{
    AiControlled, AiState, HeardSound, MoveTarget, PatrolRoute, PlayerContact,
};
use crate::combat::{fire_weapon, Weapon};
use crate::components::{Facing, Health, MovementCommand, MovementSpeed, Player, Position};
use crate::config::GameConfig;
use crate::events::{FireRequest, ParticleRequest};
use crate::geometry;
use crate::sound::SoundEvent;
use crate::DeterministicRng;

/// Радиус прибытия: 10 px (сравнивается квадрат)
const ARRIVE_DIST_SQ: f32 = 100.0;

/// Скоростные множители по state
const PATROL_SPEED: f32 = 0.7;
const ALERT_SPEED: f32 = 0.8;
const INVESTIGATE_SPEED: f32 = 0.9;
const SEARCH_SPEED: f32 = 0.9;

/// Шанс перевыбора точки осмотра за тик в Alert
const ALERT_RETARGET_CHANCE: f32 = 0.01;

/// Кольца выбора случайных точек (px)
const ALERT_RING: (f32, f32) = (50.0, 150.0);
const SEARCH_RING: (f32, f32) = (50.0, 200.0);

/// Stand-off дистанция Attack (px): ближе 0.8× — отступаем,
/// дальше 1.2× — сближаемся, между — держим позицию
const OPTIMAL_RANGE: f32 = 200.0;

/// Система: исполнение behavior policy текущего state
pub fn execute_behaviors(
    mut agents: Query<
        (
            Entity,
            &AiState,
            &Position,
            &MovementSpeed,
            &Health,
            &mut Facing,
            &mut MovementCommand,
            &mut PatrolRoute,
            &mut HeardSound,
            &mut MoveTarget,
            &PlayerContact,
            &mut Weapon,
        ),
        With<AiControlled>,
    >,
    players: Query<&Position, (With<Player>, Without<AiControlled>)>,
    mut rng: ResMut<DeterministicRng>,
    config: Res<GameConfig>,
    mut fire_requests: EventWriter<FireRequest>,
    mut sounds: EventWriter<SoundEvent>,
    mut particles: EventWriter<ParticleRequest>,
) {
    let player_pos = players.iter().next().map(|p| p.0);

    for (
        entity,
        state,
        position,
        speed,
        health,
        mut facing,
        mut command,
        mut route,
        mut heard,
        mut target,
        contact,
        mut weapon,
    ) in agents.iter_mut()
    {
        if !health.is_alive() {
            continue;
        }

        match state {
            AiState::Patrol => {
                patrol(position.0, speed.speed, &mut route, &mut facing, &mut command);
            }
            AiState::Alert => {
                alert(
                    &mut rng,
                    position.0,
                    speed.speed,
                    &mut target,
                    &mut facing,
                    &mut command,
                );
            }
            AiState::Investigate => {
                investigate(position.0, speed.speed, &mut heard, &mut facing, &mut command);
            }
            AiState::Search => {
                search(
                    &mut rng,
                    position.0,
                    speed.speed,
                    contact,
                    &heard,
                    &mut target,
                    &mut facing,
                    &mut command,
                );
            }
            AiState::Attack => {
                attack(
                    entity,
                    position.0,
                    speed.speed,
                    player_pos,
                    &mut facing,
                    &mut command,
                    &mut weapon,
                    &config,
                    &mut fire_requests,
                    &mut sounds,
                    &mut particles,
                );
            }
        }
    }
}

/// Движение к цели с постоянной скоростью
///
/// true — прибыли (квадрат дистанции < порога), команда сброшена в Idle.
fn steer_towards(
    from: Vec2,
    to: Vec2,
    speed: f32,
    facing: &mut Facing,
    command: &mut MovementCommand,
) -> bool {
    if geometry::distance_sq(from, to) < ARRIVE_DIST_SQ {
        *command = MovementCommand::Idle;
        return true;
    }

    match geometry::direction(from, to) {
        Some(dir) => {
            *command = MovementCommand::Move {
                velocity: dir * speed,
            };
            facing.angle = dir.y.atan2(dir.x);
            false
        }
        None => {
            *command = MovementCommand::Idle;
            true
        }
    }
}

/// Patrol: 0.7× скорости между waypoint'ами, wrap-around по кругу
///
/// Пустой маршрут — агент держит позицию (no-op, не ошибка).
fn patrol(
    position: Vec2,
    base_speed: f32,
    route: &mut PatrolRoute,
    facing: &mut Facing,
    command: &mut MovementCommand,
) {
    let Some(waypoint) = route.current_point() else {
        *command = MovementCommand::Idle;
        return;
    };

    if steer_towards(position, waypoint, base_speed * PATROL_SPEED, facing, command) {
        route.advance();
    }
}

/// Alert: изредка (1% за тик) выбираем точку в кольце 50–150 px
/// вокруг себя и осматриваем её на 0.8× скорости
fn alert(
    rng: &mut DeterministicRng,
    position: Vec2,
    base_speed: f32,
    target: &mut MoveTarget,
    facing: &mut Facing,
    command: &mut MovementCommand,
) {
    if rng.rng.gen::<f32>() < ALERT_RETARGET_CHANCE {
        target.0 = Some(geometry::ring_point(
            &mut rng.rng,
            position,
            ALERT_RING.0,
            ALERT_RING.1,
        ));
    }

    match target.0 {
        Some(point) => {
            if steer_towards(position, point, base_speed * ALERT_SPEED, facing, command) {
                target.0 = None;
            }
        }
        None => *command = MovementCommand::Idle,
    }
}

/// Investigate: идём к услышанному звуку на 0.9× скорости
///
/// По прибытии heard-sound очищается — следующая FSM-оценка провалится
/// сквозь Investigate-условие обратно в Alert.
fn investigate(
    position: Vec2,
    base_speed: f32,
    heard: &mut HeardSound,
    facing: &mut Facing,
    command: &mut MovementCommand,
) {
    match heard.0 {
        Some(sound_pos) => {
            if steer_towards(position, sound_pos, base_speed * INVESTIGATE_SPEED, facing, command) {
                heard.0 = None;
            }
        }
        None => *command = MovementCommand::Idle,
    }
}

/// Search: прочёсываем кольцо 50–200 px вокруг последней известной
/// позиции protagonist'а; по прибытии — новая точка (поиск продолжается
/// пока alertness не спадёт из Search-диапазона)
fn search(
    rng: &mut DeterministicRng,
    position: Vec2,
    base_speed: f32,
    contact: &PlayerContact,
    heard: &HeardSound,
    target: &mut MoveTarget,
    facing: &mut Facing,
    command: &mut MovementCommand,
) {
    // Якорь поиска: last_known позиция player'а, fallback — услышанный звук
    let Some(anchor) = contact.last_known.or(heard.0) else {
        *command = MovementCommand::Idle;
        return;
    };

    if target.0.is_none() {
        target.0 = Some(geometry::ring_point(
            &mut rng.rng,
            anchor,
            SEARCH_RING.0,
            SEARCH_RING.1,
        ));
    }

    if let Some(point) = target.0 {
        if steer_towards(position, point, base_speed * SEARCH_SPEED, facing, command) {
            target.0 = None;
        }
    }
}

/// Attack: прицел на player'а, stand-off дистанция, огонь по готовности
///
/// Дальше 1.2× optimal — сближаемся; ближе 0.8× — пятимся, не отводя
/// прицела; в полосе — держим позицию. Выстрел каждый раз когда
/// weapon interval истёк (пустой магазин сам уходит в reload).
#[allow(clippy::too_many_arguments)]
fn attack(
    entity: Entity,
    position: Vec2,
    base_speed: f32,
    player_pos: Option<Vec2>,
    facing: &mut Facing,
    command: &mut MovementCommand,
    weapon: &mut Weapon,
    config: &GameConfig,
    fire_requests: &mut EventWriter<FireRequest>,
    sounds: &mut EventWriter<SoundEvent>,
    particles: &mut EventWriter<ParticleRequest>,
) {
    let Some(player_pos) = player_pos else {
        *command = MovementCommand::Idle;
        return;
    };

    facing.angle = geometry::angle_to(position, player_pos);

    let dist_sq = geometry::distance_sq(position, player_pos);
    let approach_at = OPTIMAL_RANGE * 1.2;
    let retreat_at = OPTIMAL_RANGE * 0.8;

    if dist_sq > approach_at * approach_at {
        if let Some(dir) = geometry::direction(position, player_pos) {
            *command = MovementCommand::Move {
                velocity: dir * base_speed,
            };
        }
    } else if dist_sq < retreat_at * retreat_at {
        // Слишком близко: пятимся, facing остаётся на цели
        if let Some(dir) = geometry::direction(position, player_pos) {
            *command = MovementCommand::Move {
                velocity: -dir * base_speed,
            };
        }
    } else {
        *command = MovementCommand::Idle;
    }

    fire_weapon(
        entity,
        position,
        facing.angle,
        weapon,
        config.sound.gunshot,
        fire_requests,
        sounds,
        particles,
    );
}
