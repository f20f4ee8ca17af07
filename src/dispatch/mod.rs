//! Dispatch: how an event reaches its subscribers.
//!
//! Everything here is implemented as methods on [`Game`](crate::core::Game):
//!
//! - `broadcast`: the orchestrator (tick, history, occurrences, suppression,
//!   passives, listeners, quests)
//! - `add_quest` / `progress_quest`: the quest engine
//! - `suppress` / `force` / `with_suppressed`: suppression, with a scoped
//!   guard that always restores

mod broadcast;
mod quest;
mod scope;

pub use scope::SuppressedScope;
