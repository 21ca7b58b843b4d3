//! FSM: alertness decay + state transitions
//!
//! Порядок приоритетов (за тик, на каждого живого AI агента):
//! 1. Visible → Attack, alertness = 1.0 (видимость всегда доминирует:
//!    агент, видящий угрозу, не бывает "слегка" насторожен)
//! 2. Иначе — decay, затем выбор state по порогам на уже спавшем
//!    значении (alertness плавно дрейфует к Patrol, без скачков)
//!
//! Timestamp перехода обновляется только при фактической смене state.

use bevy::prelude::*;

use crate::ai::{AiControlled, AiState, Alertness, HeardSound, MoveTarget, PlayerContact, StateChangedAt};
use crate::components::Health;
use crate::config::GameConfig;

/// Система: пересчёт alertness и behavioral state
pub fn alertness_transitions(
    mut agents: Query<
        (
            Entity,
            &Health,
            &PlayerContact,
            &HeardSound,
            &mut Alertness,
            &mut AiState,
            &mut StateChangedAt,
            &mut MoveTarget,
        ),
        With<AiControlled>,
    >,
    config: Res<GameConfig>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();
    let delta = time.delta_secs();

    for (entity, health, contact, heard, mut alertness, mut state, mut changed, mut target) in
        agents.iter_mut()
    {
        if !health.is_alive() {
            continue;
        }

        // Приоритет 1: визуальный контакт форсирует Attack
        if contact.visible {
            alertness.set_full();
            if *state != AiState::Attack {
                crate::log(&format!("⚔️ {:?} {:?} → Attack (visual contact)", entity, *state));
                *state = AiState::Attack;
                changed.at = now;
                target.0 = None;
            }
            continue;
        }

        // Приоритет 2: спад alertness за прошедший тик
        alertness.decay(config.ai.alertness_decay * delta);

        // Приоритет 3: выбор state по порогам на спавшем значении
        let selected = AiState::from_alertness(alertness.value(), heard.0.is_some());
        if *state != selected {
            crate::log(&format!(
                "{:?} {:?} → {:?} (alertness {:.2})",
                entity,
                *state,
                selected,
                alertness.value()
            ));
            *state = selected;
            changed.at = now;
            // Цель движения прежнего state больше не актуальна
            target.0 = None;
        }
    }
}
