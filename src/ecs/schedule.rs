//! System Scheduler
//!
//! Runs registered systems in registration order once per animation
//! frame and drives the phase state machine. A tick is strictly:
//!
//! 1. `update` on every active system (phase-independent, or tagged
//!    with the current phase), in registration order;
//! 2. flush of the store's deferred deletion queue;
//! 3. if a phase transition is pending: `teardown` on every
//!    outgoing-phase system, *then* `startup` on every incoming-phase
//!    system, then the new phase is committed.
//!
//! Teardown/startup therefore always observe a world with this tick's
//! deletions already applied, and a `set` issued mid-update only takes
//! effect at the tick boundary, never mid-tick.
//!
//! Everything is single-threaded and cooperative: one tick runs to
//! completion before the host's frame timer invokes the next.

use super::store::ComponentStore;
use serde::{Deserialize, Serialize};

/// Top-level game mode. Exactly one is current at a time; systems
/// tagged with a phase only update while that phase is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen, credit insertion, player-count selection.
    Pregame,
    /// The shooter itself.
    Game,
}

/// The phase state machine's knobs, handed to system hooks so gameplay
/// can request transitions without a reference cycle back into the
/// scheduler.
#[derive(Debug, Default)]
pub struct PhaseControl {
    current: Option<Phase>,
    pending: Option<Phase>,
}

impl PhaseControl {
    /// The committed phase. `None` until the first transition completes.
    pub fn current(&self) -> Option<Phase> {
        self.current
    }

    /// Request a transition for the next tick boundary. Requesting the
    /// current phase is a no-op; a later request this tick overwrites
    /// an earlier one.
    pub fn set(&mut self, phase: Phase) {
        if self.current != Some(phase) {
            self.pending = Some(phase);
        }
    }

    /// The transition waiting for the next tick boundary, if any.
    pub fn pending(&self) -> Option<Phase> {
        self.pending
    }
}

/// A unit of per-frame logic. All hooks default to no-ops so systems
/// only spell out what they use.
///
/// Systems hold no entity state of their own; anything cached (like a
/// sheet-id lookup map) is local memoization only.
pub trait System {
    /// `None` means phase-independent: always active, started once by
    /// [`Scheduler::startup`].
    fn phase(&self) -> Option<Phase> {
        None
    }

    fn startup(&mut self, _store: &mut ComponentStore, _phases: &mut PhaseControl) {}

    fn update(&mut self, _store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {}

    fn teardown(&mut self, _store: &mut ComponentStore) {}
}

/// Owns the systems and the phase state machine.
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
    phases: PhaseControl,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            phases: PhaseControl::default(),
        }
    }

    /// Registration order is execution order, for every hook.
    pub fn register(&mut self, system: impl System + 'static) {
        self.systems.push(Box::new(system));
    }

    /// The committed phase (for the host loop / tests).
    pub fn current_phase(&self) -> Option<Phase> {
        self.phases.current()
    }

    /// Run `startup` once on every phase-independent system. Phase-scoped
    /// systems start when their phase is first entered; the phase
    /// controller system requests the initial phase from here.
    pub fn startup(&mut self, store: &mut ComponentStore) {
        let Self { systems, phases } = self;
        for system in systems.iter_mut() {
            if system.phase().is_none() {
                system.startup(store, phases);
            }
        }
    }

    /// One scheduler tick. See the module docs for the exact ordering.
    pub fn update(&mut self, store: &mut ComponentStore, frame: u64) {
        let Self { systems, phases } = self;

        for system in systems.iter_mut() {
            let active = match system.phase() {
                None => true,
                Some(phase) => Some(phase) == phases.current,
            };
            if active {
                system.update(store, phases, frame);
            }
        }

        store.flush_removals();

        if let Some(next) = phases.pending.take() {
            // All outgoing teardowns complete before any incoming startup.
            if let Some(outgoing) = phases.current {
                for system in systems.iter_mut() {
                    if system.phase() == Some(outgoing) {
                        system.teardown(store);
                    }
                }
            }
            for system in systems.iter_mut() {
                if system.phase() == Some(next) {
                    system.startup(store, phases);
                }
            }
            phases.current = Some(next);
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Probe that records every hook invocation into a shared log.
    struct Probe {
        name: &'static str,
        phase: Option<Phase>,
        log: Log,
        /// Phase to request during update, once.
        request: Option<Phase>,
    }

    impl Probe {
        fn new(name: &'static str, phase: Option<Phase>, log: &Log) -> Self {
            Self {
                name,
                phase,
                log: Rc::clone(log),
                request: None,
            }
        }

        fn requesting(mut self, phase: Phase) -> Self {
            self.request = Some(phase);
            self
        }
    }

    impl System for Probe {
        fn phase(&self) -> Option<Phase> {
            self.phase
        }

        fn startup(&mut self, _store: &mut ComponentStore, phases: &mut PhaseControl) {
            self.log.borrow_mut().push(format!("{}:startup", self.name));
            if self.phase.is_none() {
                if let Some(request) = self.request.take() {
                    phases.set(request);
                }
            }
        }

        fn update(&mut self, _store: &mut ComponentStore, phases: &mut PhaseControl, _frame: u64) {
            self.log.borrow_mut().push(format!("{}:update", self.name));
            if let Some(request) = self.request.take() {
                phases.set(request);
            }
        }

        fn teardown(&mut self, _store: &mut ComponentStore) {
            self.log
                .borrow_mut()
                .push(format!("{}:teardown", self.name));
        }
    }

    #[test]
    fn test_startup_only_runs_phase_independent_systems() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut store = ComponentStore::new();
        let mut scheduler = Scheduler::new();
        scheduler.register(Probe::new("free", None, &log));
        scheduler.register(Probe::new("pregame", Some(Phase::Pregame), &log));

        scheduler.startup(&mut store);
        assert_eq!(*log.borrow(), vec!["free:startup"]);
        assert_eq!(scheduler.current_phase(), None);
    }

    #[test]
    fn test_systems_run_in_registration_order() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut store = ComponentStore::new();
        let mut scheduler = Scheduler::new();
        scheduler.register(Probe::new("a", None, &log));
        scheduler.register(Probe::new("b", None, &log));

        scheduler.update(&mut store, 0);
        assert_eq!(*log.borrow(), vec!["a:update", "b:update"]);
    }

    #[test]
    fn test_phase_scoped_systems_only_run_in_their_phase() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut store = ComponentStore::new();
        let mut scheduler = Scheduler::new();
        scheduler.register(Probe::new("ctl", None, &log).requesting(Phase::Pregame));
        scheduler.register(Probe::new("pre", Some(Phase::Pregame), &log));
        scheduler.register(Probe::new("game", Some(Phase::Game), &log));

        scheduler.startup(&mut store);
        // Tick 1: no phase yet, only the controller updates; the pending
        // transition starts the Pregame systems at the boundary.
        scheduler.update(&mut store, 0);
        assert_eq!(
            *log.borrow(),
            vec!["ctl:startup", "ctl:update", "pre:startup"]
        );
        assert_eq!(scheduler.current_phase(), Some(Phase::Pregame));

        // Tick 2: Pregame systems now update; Game systems stay silent.
        log.borrow_mut().clear();
        scheduler.update(&mut store, 1);
        assert_eq!(*log.borrow(), vec!["ctl:update", "pre:update"]);
    }

    #[test]
    fn test_transition_runs_teardown_before_startup_within_one_tick() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut store = ComponentStore::new();
        let mut scheduler = Scheduler::new();
        // Game-phase system registered *before* the pregame one, so an
        // interleaved single pass would start it too early.
        scheduler.register(Probe::new("game", Some(Phase::Game), &log));
        scheduler.register(
            Probe::new("pre", Some(Phase::Pregame), &log).requesting(Phase::Game),
        );
        scheduler.register(Probe::new("ctl", None, &log).requesting(Phase::Pregame));

        scheduler.startup(&mut store);
        scheduler.update(&mut store, 0); // enters Pregame
        log.borrow_mut().clear();

        // Pregame's update requests Game; the swap happens this same
        // tick, after the update pass, teardown strictly first.
        scheduler.update(&mut store, 1);
        assert_eq!(
            *log.borrow(),
            vec!["pre:update", "ctl:update", "pre:teardown", "game:startup"]
        );
        // The committed phase reads Game only from now on.
        assert_eq!(scheduler.current_phase(), Some(Phase::Game));

        log.borrow_mut().clear();
        scheduler.update(&mut store, 2);
        assert_eq!(*log.borrow(), vec!["ctl:update", "game:update"]);
    }

    #[test]
    fn test_transition_happens_after_deletion_flush() {
        struct Deleter {
            entity: Option<crate::ecs::EntityId>,
        }
        impl System for Deleter {
            fn phase(&self) -> Option<Phase> {
                Some(Phase::Pregame)
            }
            fn update(
                &mut self,
                store: &mut ComponentStore,
                phases: &mut PhaseControl,
                _frame: u64,
            ) {
                if let Some(entity) = self.entity.take() {
                    store.remove_entity(entity);
                    phases.set(Phase::Game);
                }
            }
        }

        /// Asserts at startup that the deleted entity is already gone.
        struct Checker;
        impl System for Checker {
            fn phase(&self) -> Option<Phase> {
                Some(Phase::Game)
            }
            fn startup(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl) {
                assert!(
                    store.view(&[crate::ecs::ComponentKind::Enemy]).is_empty(),
                    "startup must observe this tick's deletions"
                );
            }
        }

        let mut store = ComponentStore::new();
        let enemy = store.create_entity();
        store.enemies.insert(
            enemy,
            crate::ecs::Enemy {
                health: 1,
                points: 60,
                fire_cooldown: 0,
            },
        );

        let mut scheduler = Scheduler::new();
        scheduler.register(Deleter {
            entity: Some(enemy),
        });
        scheduler.register(Checker);

        // Force Pregame current so Deleter runs.
        scheduler.phases.current = Some(Phase::Pregame);
        scheduler.update(&mut store, 0);
        assert_eq!(scheduler.current_phase(), Some(Phase::Game));
    }

    #[test]
    fn test_setting_the_current_phase_is_a_noop() {
        let mut phases = PhaseControl::default();
        phases.current = Some(Phase::Game);
        phases.set(Phase::Game);
        assert!(phases.pending.is_none());

        // A later request overwrites an earlier one.
        phases.set(Phase::Pregame);
        phases.current = None;
        phases.set(Phase::Game);
        assert_eq!(phases.pending, Some(Phase::Game));
    }
}
