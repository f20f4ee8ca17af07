//! Error types for the event engine.
//!
//! Designed early exits (suppression, a broadcast without an originating
//! player, a saturated quest) are not errors: they surface as `Ok(false)`.
//! Everything here is either a lookup that should never fail in a
//! well-formed game, or a failure raised by card content.

use thiserror::Error;

use crate::cards::{Ability, CardId};
use crate::core::EntityId;

/// Engine error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown card blueprint: {0}")]
    UnknownCard(CardId),

    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),

    #[error("broadcast nested {depth} levels deep")]
    RecursionLimit { depth: u32 },

    #[error("{ability} ability of {card} failed: {message}")]
    Ability {
        card: EntityId,
        ability: Ability,
        message: String,
    },
}

impl EngineError {
    /// Convenience for card content signalling a failed ability.
    pub fn ability(card: EntityId, ability: Ability, message: impl Into<String>) -> Self {
        Self::Ability {
            card,
            ability,
            message: message.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;
