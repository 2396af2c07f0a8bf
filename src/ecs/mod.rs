//! ECS Core
//!
//! A minimal Entity-Component-System tailored for a small arcade shooter.
//! Inspired by Bevy's patterns but simplified for the specific needs of
//! this game.
//!
//! Key concepts:
//! - Entity: monotonically increasing id, never reused
//! - Component: plain data structs attached to entities, one per kind
//! - ComponentStore: typed, insertion-ordered columns plus a deferred
//!   deletion queue flushed once per tick
//! - System: per-frame logic with startup/update/teardown hooks,
//!   optionally scoped to a phase
//! - Scheduler: runs systems in registration order and drives phase
//!   transitions at tick boundaries
//!
//! Design philosophy:
//! - Simple over flexible (we know what game we're making)
//! - No runtime type registration (compile-time known components)
//! - No hidden globals: the store and scheduler are constructed once and
//!   passed by reference into every system hook

pub mod column;
pub mod components;
pub mod entity;
pub mod schedule;
pub mod store;

pub use column::Column;
pub use components::*;
pub use entity::{EntityAllocator, EntityId};
pub use schedule::{Phase, PhaseControl, Scheduler, System};
pub use store::{ComponentKind, ComponentStore};
