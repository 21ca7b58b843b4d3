//! AI системы: perception, FSM transitions, behavior execution

pub mod behavior;
pub mod fsm;
pub mod perception;

pub use behavior::execute_behaviors;
pub use fsm::alertness_transitions;
pub use perception::update_player_contact;
