//! Events and the state the broadcast orchestrator keeps about them.
//!
//! ## Key Types
//!
//! - `Event` / `EventKind`: the catalog, one variant per kind
//! - `History`: turn-indexed, append-only log of every broadcast
//! - `OccurrenceTable`: per-kind, per-player log for "how many times" queries
//! - `Suppression`: suppressed and forced kinds
//! - `ListenerRegistry`: lifespan-bounded, kind-filtered subscribers
//! - `Quest`: progress-tracked subscribers living in player lists
//! - `TickHooks`: callbacks run on every tick
//! - `EventManager`: owns all of the above for one game
//!
//! Dispatch itself lives in [`crate::dispatch`].

pub mod event;
pub mod history;
pub mod listener;
pub mod manager;
pub mod occurrence;
pub mod quest;
pub mod stats;
pub mod suppression;
pub mod tick;

pub use event::{Event, EventKind, KindFilter, Target, Zone};
pub use history::{History, HistoryEntry, HistoryLine};
pub use listener::{
    Lifespan, ListenerFn, ListenerHandle, ListenerId, ListenerMessage, ListenerRegistry,
};
pub use manager::EventManager;
pub use occurrence::{Occurrence, OccurrenceTable};
pub use quest::{Progress, Quest, QuestContext, QuestFn, QuestId, QuestKind, QuestTemplate};
pub use stats::Stats;
pub use suppression::{Suppression, SuppressionMode, SuppressionToken};
pub use tick::{TickHookFn, TickHookHandle, TickHookId, TickHooks};
