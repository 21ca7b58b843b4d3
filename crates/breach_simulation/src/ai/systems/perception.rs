//! Perception: visibility запросы против protagonist'а

use bevy::prelude::*;

use crate::ai::{AiControlled, PlayerContact};
use crate::components::{Health, Player, Position};
use crate::vision::LosOracle;

/// Система: обновление PlayerContact каждого AI агента
///
/// Один детерминированный can_see запрос на агента за тик. Пока player
/// виден, его позиция записывается как last_known (якорь для Search).
/// Нет player'а в мире (умер, не заспавнен) — никто его не видит;
/// недоступный oracle даёт тот же консервативный ответ внутри LosOracle.
pub fn update_player_contact(
    mut agents: Query<(&Position, &Health, &mut PlayerContact), With<AiControlled>>,
    players: Query<&Position, (With<Player>, Without<AiControlled>)>,
    oracle: Res<LosOracle>,
) {
    let player_pos = players.iter().next();

    for (position, health, mut contact) in agents.iter_mut() {
        if !health.is_alive() {
            continue;
        }

        match player_pos {
            Some(player_pos) => {
                contact.visible = oracle.can_see(position.0, player_pos.0);
                if contact.visible {
                    contact.last_known = Some(player_pos.0);
                }
            }
            None => {
                contact.visible = false;
            }
        }
    }
}
