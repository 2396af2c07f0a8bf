//! Phase controller
//!
//! The one phase-independent system allowed to talk to the phase state
//! machine. Other systems request transitions by spawning a
//! `ChangePhase` component; this system forwards them and removes the
//! carrier entity. It also kicks off the initial Pregame phase.

use crate::ecs::{ComponentKind, ComponentStore, Phase, PhaseControl, System};

pub struct GamePhaseSystem;

impl GamePhaseSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for GamePhaseSystem {
    fn startup(&mut self, _store: &mut ComponentStore, phases: &mut PhaseControl) {
        phases.set(Phase::Pregame);
    }

    fn update(&mut self, store: &mut ComponentStore, phases: &mut PhaseControl, _frame: u64) {
        for entity in store.view(&[ComponentKind::ChangePhase]) {
            if let Some(change) = store.change_phases.get(entity) {
                phases.set(change.target);
            }
            store.remove_entity(entity);
        }
    }
}
