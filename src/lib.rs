//! # hearth-events
//!
//! Event dispatch and reactive-ability engine for a two-player card game.
//!
//! Game logic announces state changes with [`Game::broadcast`]; the engine
//! delivers each event, in a fixed total order, to card abilities, general
//! listeners, quests/sidequests/secrets and tick hooks, and keeps a
//! replayable history of everything that happened.
//!
//! ## Design Principles
//!
//! 1. **Typed payloads**: each event kind is an [`Event`] variant carrying
//!    its own payload. A kind can never be paired with the wrong shape.
//!
//! 2. **Explicit context**: every callback receives `&mut Game`. There is
//!    no global engine state; one `Game` is one timeline.
//!
//! 3. **Deterministic order**: subscribers are walked over id snapshots in
//!    registration order, so callbacks may add or remove subscribers while a
//!    broadcast is in flight.
//!
//! 4. **Facts are never hidden**: suppression stops reactions, not
//!    recording. Suppressed events still land in history and the
//!    occurrence table.
//!
//! ## Modules
//!
//! - `core`: entity and player ids, configuration, the `Game` context
//! - `cards`: blueprints with ability slots, runtime card instances
//! - `events`: event catalog, history, occurrence table, listeners,
//!   quests, tick hooks, suppression state
//! - `dispatch`: the broadcast orchestrator and quest engine
//! - `error`: `EngineError`
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use hearth_events::{CardRegistry, Event, EventKind, Game, Lifespan, ListenerMessage, PlayerId};
//!
//! let mut game = Game::new(CardRegistry::new());
//! let seen = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&seen);
//!
//! game.add_listener(EventKind::TakeDamage, Lifespan::Times(2), move |_, _, _| {
//!     counter.set(counter.get() + 1);
//!     Ok(ListenerMessage::Success)
//! });
//!
//! for _ in 0..3 {
//!     game.broadcast(Event::TakeDamage(1), Some(PlayerId::FIRST)).unwrap();
//! }
//!
//! assert_eq!(seen.get(), 2);
//! assert_eq!(game.events.history.len(), 3);
//! ```

pub mod cards;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod events;

// Re-export commonly used types
pub use crate::core::{EngineConfig, EntityId, Game, HistoryConfig, Notification, PlayerId, PlayerMap};

pub use crate::cards::{Ability, AbilityContext, Card, CardBlueprint, CardId, CardRegistry, CardType, Enchantment};

pub use crate::events::{
    Event, EventKind, History, KindFilter, Lifespan, ListenerHandle, ListenerMessage, Quest,
    QuestContext, QuestKind, QuestTemplate, Target, TickHookHandle, Zone,
};

pub use crate::dispatch::SuppressedScope;

pub use crate::error::{EngineError, Result};
