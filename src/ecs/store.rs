//! Component Store
//!
//! The store is the single shared mutable resource of the game: every
//! component instance lives in exactly one typed column here, and every
//! system receives `&mut ComponentStore` each tick.
//!
//! Mutation protocol (create-now / delete-later):
//! - Adds are synchronous and visible to any view computed afterwards,
//!   including later in the same tick.
//! - Removals are deferred: a remove request lands in a command buffer
//!   and only materializes when [`flush_removals`](ComponentStore::flush_removals)
//!   runs, once per tick after all systems have updated. A system can
//!   therefore request "delete entity X" while another system is still
//!   walking a result set containing X, and both observe one consistent
//!   world state for the whole tick.
//!
//! Views are point-in-time results recomputed per use; they do not track
//! later mutations.

use super::column::{AnyColumn, Column};
use super::components::*;
use super::entity::{EntityAllocator, EntityId};

/// Closed set of component kinds. One enum variant per typed column;
/// adding a component type means adding a variant, a column field, and
/// a dispatch arm - the compiler points out every spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    AnimationState,
    Background,
    ChangePhase,
    CollidingWith,
    CollisionRadius,
    Credits,
    Enemy,
    ExtraLife,
    GamepadButtonPress,
    Impulse,
    KeyPress,
    Laser,
    ModifyScore,
    Player,
    PlaySoundEffect,
    Position,
    SoundEffect,
    Sprite,
    SpriteSheet,
    StartGame,
    TitleScreen,
    Velocity,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 22] = [
        ComponentKind::AnimationState,
        ComponentKind::Background,
        ComponentKind::ChangePhase,
        ComponentKind::CollidingWith,
        ComponentKind::CollisionRadius,
        ComponentKind::Credits,
        ComponentKind::Enemy,
        ComponentKind::ExtraLife,
        ComponentKind::GamepadButtonPress,
        ComponentKind::Impulse,
        ComponentKind::KeyPress,
        ComponentKind::Laser,
        ComponentKind::ModifyScore,
        ComponentKind::Player,
        ComponentKind::PlaySoundEffect,
        ComponentKind::Position,
        ComponentKind::SoundEffect,
        ComponentKind::Sprite,
        ComponentKind::SpriteSheet,
        ComponentKind::StartGame,
        ComponentKind::TitleScreen,
        ComponentKind::Velocity,
    ];
}

/// All entities and their components, plus the deferred deletion queue.
///
/// Columns are public fields on purpose: systems borrow the columns
/// they need directly, and the borrow checker keeps simultaneous
/// mutable access to *different* columns safe without any locking.
pub struct ComponentStore {
    entities: EntityAllocator,
    /// Pending (kind, entity) removals, applied at the per-tick flush.
    delete_queue: Vec<(ComponentKind, EntityId)>,

    pub animation_states: Column<AnimationState>,
    pub backgrounds: Column<Background>,
    pub change_phases: Column<ChangePhase>,
    pub colliding_withs: Column<CollidingWith>,
    pub collision_radii: Column<CollisionRadius>,
    pub credits: Column<Credits>,
    pub enemies: Column<Enemy>,
    pub extra_lives: Column<ExtraLife>,
    pub gamepad_buttons: Column<GamepadButtonPress>,
    pub impulses: Column<Impulse>,
    pub key_presses: Column<KeyPress>,
    pub lasers: Column<Laser>,
    pub score_deltas: Column<ModifyScore>,
    pub players: Column<Player>,
    pub sound_requests: Column<PlaySoundEffect>,
    pub positions: Column<Position>,
    pub sound_effects: Column<SoundEffect>,
    pub sprites: Column<Sprite>,
    pub sprite_sheets: Column<SpriteSheet>,
    pub start_games: Column<StartGame>,
    pub title_screens: Column<TitleScreen>,
    pub velocities: Column<Velocity>,
}

impl ComponentStore {
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            delete_queue: Vec::new(),

            animation_states: Column::new(ComponentKind::AnimationState),
            backgrounds: Column::new(ComponentKind::Background),
            change_phases: Column::new(ComponentKind::ChangePhase),
            colliding_withs: Column::new(ComponentKind::CollidingWith),
            collision_radii: Column::new(ComponentKind::CollisionRadius),
            credits: Column::new(ComponentKind::Credits),
            enemies: Column::new(ComponentKind::Enemy),
            extra_lives: Column::new(ComponentKind::ExtraLife),
            gamepad_buttons: Column::new(ComponentKind::GamepadButtonPress),
            impulses: Column::new(ComponentKind::Impulse),
            key_presses: Column::new(ComponentKind::KeyPress),
            lasers: Column::new(ComponentKind::Laser),
            score_deltas: Column::new(ComponentKind::ModifyScore),
            players: Column::new(ComponentKind::Player),
            sound_requests: Column::new(ComponentKind::PlaySoundEffect),
            positions: Column::new(ComponentKind::Position),
            sound_effects: Column::new(ComponentKind::SoundEffect),
            sprites: Column::new(ComponentKind::Sprite),
            sprite_sheets: Column::new(ComponentKind::SpriteSheet),
            start_games: Column::new(ComponentKind::StartGame),
            title_screens: Column::new(ComponentKind::TitleScreen),
            velocities: Column::new(ComponentKind::Velocity),
        }
    }

    /// Allocate a fresh entity id. The entity has no components until a
    /// system attaches some.
    pub fn create_entity(&mut self) -> EntityId {
        self.entities.allocate()
    }

    // =========================================================================
    // Kind-indexed dispatch
    // =========================================================================

    fn column(&self, kind: ComponentKind) -> &dyn AnyColumn {
        match kind {
            ComponentKind::AnimationState => &self.animation_states,
            ComponentKind::Background => &self.backgrounds,
            ComponentKind::ChangePhase => &self.change_phases,
            ComponentKind::CollidingWith => &self.colliding_withs,
            ComponentKind::CollisionRadius => &self.collision_radii,
            ComponentKind::Credits => &self.credits,
            ComponentKind::Enemy => &self.enemies,
            ComponentKind::ExtraLife => &self.extra_lives,
            ComponentKind::GamepadButtonPress => &self.gamepad_buttons,
            ComponentKind::Impulse => &self.impulses,
            ComponentKind::KeyPress => &self.key_presses,
            ComponentKind::Laser => &self.lasers,
            ComponentKind::ModifyScore => &self.score_deltas,
            ComponentKind::Player => &self.players,
            ComponentKind::PlaySoundEffect => &self.sound_requests,
            ComponentKind::Position => &self.positions,
            ComponentKind::SoundEffect => &self.sound_effects,
            ComponentKind::Sprite => &self.sprites,
            ComponentKind::SpriteSheet => &self.sprite_sheets,
            ComponentKind::StartGame => &self.start_games,
            ComponentKind::TitleScreen => &self.title_screens,
            ComponentKind::Velocity => &self.velocities,
        }
    }

    fn column_mut(&mut self, kind: ComponentKind) -> &mut dyn AnyColumn {
        match kind {
            ComponentKind::AnimationState => &mut self.animation_states,
            ComponentKind::Background => &mut self.backgrounds,
            ComponentKind::ChangePhase => &mut self.change_phases,
            ComponentKind::CollidingWith => &mut self.colliding_withs,
            ComponentKind::CollisionRadius => &mut self.collision_radii,
            ComponentKind::Credits => &mut self.credits,
            ComponentKind::Enemy => &mut self.enemies,
            ComponentKind::ExtraLife => &mut self.extra_lives,
            ComponentKind::GamepadButtonPress => &mut self.gamepad_buttons,
            ComponentKind::Impulse => &mut self.impulses,
            ComponentKind::KeyPress => &mut self.key_presses,
            ComponentKind::Laser => &mut self.lasers,
            ComponentKind::ModifyScore => &mut self.score_deltas,
            ComponentKind::Player => &mut self.players,
            ComponentKind::PlaySoundEffect => &mut self.sound_requests,
            ComponentKind::Position => &mut self.positions,
            ComponentKind::SoundEffect => &mut self.sound_effects,
            ComponentKind::Sprite => &mut self.sprites,
            ComponentKind::SpriteSheet => &mut self.sprite_sheets,
            ComponentKind::StartGame => &mut self.start_games,
            ComponentKind::TitleScreen => &mut self.title_screens,
            ComponentKind::Velocity => &mut self.velocities,
        }
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Entities holding *all* of the requested kinds.
    ///
    /// Ordering: insertion order of the first requested kind's column
    /// (an entity satisfying the whole join necessarily appears there).
    /// The result is a point-in-time snapshot; recompute it per use.
    /// An empty kind list is not a meaningful query and yields nothing.
    pub fn view(&self, kinds: &[ComponentKind]) -> Vec<EntityId> {
        let Some((&first, rest)) = kinds.split_first() else {
            return Vec::new();
        };
        self.column(first)
            .entity_ids()
            .into_iter()
            .filter(|&entity| rest.iter().all(|&kind| self.column(kind).contains(entity)))
            .collect()
    }

    /// Which kinds currently have an instance for this entity - the
    /// component snapshot of one entity, for cross-referencing.
    pub fn kinds_of(&self, entity: EntityId) -> Vec<ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(|&kind| self.column(kind).contains(entity))
            .collect()
    }

    /// Live population per kind, for the debug HUD. Pending deferred
    /// removals are not reflected.
    pub fn stats(&self) -> Vec<(ComponentKind, usize)> {
        ComponentKind::ALL
            .into_iter()
            .map(|kind| (kind, self.column(kind).len()))
            .collect()
    }

    // =========================================================================
    // Deferred removal
    // =========================================================================

    /// Enqueue removal of one component. No effect until the flush.
    pub fn remove_component(&mut self, kind: ComponentKind, entity: EntityId) {
        self.delete_queue.push((kind, entity));
    }

    /// Enqueue removal of every component the entity holds *right now*.
    /// Components added after this call (but before the flush) survive.
    pub fn remove_entity(&mut self, entity: EntityId) {
        for kind in self.kinds_of(entity) {
            self.delete_queue.push((kind, entity));
        }
    }

    /// Enqueue removal of every current instance of a kind.
    pub fn remove_all_instances(&mut self, kind: ComponentKind) {
        for entity in self.column(kind).entity_ids() {
            self.delete_queue.push((kind, entity));
        }
    }

    /// Synchronously clear a kind's column. Collision detection uses
    /// this to rebuild `CollidingWith` atomically within one tick; every
    /// other removal goes through the deferred queue.
    pub fn clear_kind_now(&mut self, kind: ComponentKind) {
        self.column_mut(kind).clear();
    }

    /// Apply every queued removal, then clear the queue. Targets that
    /// no longer exist are skipped silently: the same entity is often
    /// queued twice in one tick (e.g. `remove_entity` plus an explicit
    /// component removal) and that must stay harmless.
    pub fn flush_removals(&mut self) {
        let queue = std::mem::take(&mut self.delete_queue);
        for (kind, entity) in queue {
            self.column_mut(kind).remove_id(entity);
        }
    }

    /// Number of removals currently queued (diagnostics only).
    pub fn pending_removals(&self) -> usize {
        self.delete_queue.len()
    }
}

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new()
    }
}
