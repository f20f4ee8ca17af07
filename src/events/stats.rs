//! Free-form per-player counters kept by card content.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    counters: FxHashMap<String, PlayerMap<i64>>,
}

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to a player's counter and return the new value.
    pub fn increment(&mut self, player: PlayerId, key: &str, amount: i64) -> i64 {
        let counter = self
            .counters
            .entry(key.to_string())
            .or_insert_with(PlayerMap::with_default);

        counter[player] += amount;
        counter[player]
    }

    #[must_use]
    pub fn get(&self, player: PlayerId, key: &str) -> i64 {
        self.counters.get(key).map_or(0, |c| c[player])
    }
}
