//! AI decision-making module
//!
//! Alertness-driven FSM на пять состояний (Patrol / Alert / Investigate /
//! Search / Attack). Входы: visibility oracle + услышанные звуки;
//! выход: MovementCommand + Facing + fire requests.

use bevy::prelude::*;

pub mod components;
pub mod systems;

// Re-export основных типов
pub use components::{
    AiControlled, AiState, Alertness, HeardSound, MoveTarget, PatrolRoute, PlayerContact,
    StateChangedAt, ALERT_THRESHOLD, INVESTIGATE_THRESHOLD, SEARCH_THRESHOLD,
};
pub use systems::{alertness_transitions, execute_behaviors, update_player_contact};

use crate::SimulationSet;

/// AI Plugin
///
/// Порядок выполнения за тик:
/// 1. update_player_contact — LOS запросы (Perception)
/// 2. alertness_transitions — FSM state update (Decisions)
/// 3. execute_behaviors — movement/aim/fire policy (Behavior)
/// Sound propagation идёт ДО perception (Sounds фаза, SoundPlugin).
pub struct AiPlugin;

impl Plugin for AiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                update_player_contact.in_set(SimulationSet::Perception),
                alertness_transitions.in_set(SimulationSet::Decisions),
                execute_behaviors.in_set(SimulationSet::Behavior),
            ),
        );
    }
}
