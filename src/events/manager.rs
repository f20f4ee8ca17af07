//! Per-game event state.

use super::history::History;
use super::listener::ListenerRegistry;
use super::occurrence::OccurrenceTable;
use super::quest::QuestId;
use super::stats::Stats;
use super::suppression::Suppression;
use super::tick::TickHooks;

/// Everything the broadcast orchestrator reads and writes, apart from the
/// players' zones and quest lists.
///
/// One `EventManager` belongs to one [`Game`](crate::core::Game); a new game
/// starts with a fresh one.
#[derive(Debug, Default)]
pub struct EventManager {
    pub history: History,
    pub occurrences: OccurrenceTable,
    pub stats: Stats,
    pub suppression: Suppression,
    pub listeners: ListenerRegistry,
    pub tick_hooks: TickHooks,

    /// Nesting level of the broadcast in flight (0 when idle).
    pub(crate) depth: u32,

    next_quest_id: u64,
}

impl EventManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current broadcast nesting level.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub(crate) fn next_quest_id(&mut self) -> QuestId {
        let id = QuestId(self.next_quest_id);
        self.next_quest_id += 1;
        id
    }
}
