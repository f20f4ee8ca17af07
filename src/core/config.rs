//! Engine configuration.
//!
//! Games configure the engine at startup by providing:
//! - `HistoryConfig`: which event kinds show up in readable history, and
//!   which have their value redacted for players who did not cause them
//! - `EngineConfig`: quest-list limits, the broadcast recursion limit, and
//!   the history configuration
//!
//! Both deserialize with defaults for any missing field, so a game can load
//! a partial config file.

use serde::{Deserialize, Serialize};

use crate::events::EventKind;

/// Presentation settings consumed by [`History::readable`](crate::events::History::readable).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Kinds shown in readable history. Debug output shows every kind.
    pub whitelisted_kinds: Vec<EventKind>,

    /// Kinds whose value is hidden unless the viewer caused the event.
    pub hidden_value_kinds: Vec<EventKind>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        use EventKind::*;

        Self {
            whitelisted_kinds: vec![
                HealthRestored,
                UnspentMana,
                GainOverload,
                GainHeroAttack,
                TakeDamage,
                PlayCard,
                SummonCard,
                DestroyCard,
                DamageCard,
                SilenceCard,
                DiscardCard,
                TradeCard,
                ForgeCard,
                FreezeCard,
                RevealCard,
                AddCardToDeck,
                AddCardToHand,
                DrawCard,
                Attack,
                HeroPower,
                TargetSelectionStarts,
                TargetSelected,
                CardEvent,
            ],
            hidden_value_kinds: vec![DrawCard, ForgeCard, AddCardToHand, AddCardToDeck],
        }
    }
}

impl HistoryConfig {
    /// Is this kind shown in readable history?
    #[must_use]
    pub fn is_whitelisted(&self, kind: EventKind) -> bool {
        self.whitelisted_kinds.contains(&kind)
    }

    /// Is this kind's value redacted for other viewers?
    #[must_use]
    pub fn hides_value(&self, kind: EventKind) -> bool {
        self.hidden_value_kinds.contains(&kind)
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Nested broadcasts deeper than this fail with `RecursionLimit`.
    pub max_broadcast_depth: u32,

    /// Active quests a player may hold.
    pub max_quests: usize,

    /// Active sidequests a player may hold.
    pub max_sidequests: usize,

    /// Active secrets a player may hold.
    pub max_secrets: usize,

    pub history: HistoryConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_broadcast_depth: 64,
            max_quests: 1,
            max_sidequests: 3,
            max_secrets: 3,
            history: HistoryConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the broadcast recursion limit.
    #[must_use]
    pub fn with_max_broadcast_depth(mut self, depth: u32) -> Self {
        assert!(depth > 0, "Broadcast depth limit must be positive");
        self.max_broadcast_depth = depth;
        self
    }

    /// Set the history presentation settings.
    #[must_use]
    pub fn with_history(mut self, history: HistoryConfig) -> Self {
        self.history = history;
        self
    }
}
