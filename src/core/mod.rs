//! Core engine types: entities, players, configuration, and the game itself.
//!
//! `Game` is the one context object every callback receives; nothing in the
//! engine is global.

pub mod config;
pub mod entity;
pub mod game;
pub mod player;

pub use config::{EngineConfig, HistoryConfig};
pub use entity::EntityId;
pub use game::{Game, Notification};
pub use player::{Player, PlayerId, PlayerMap, PLAYER_COUNT};
