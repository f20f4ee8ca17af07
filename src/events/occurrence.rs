//! Per-kind occurrence table.
//!
//! For every event kind that has been dispatched, each player gets an
//! ordered log of `(event, turn)` pairs. The log is created lazily on first
//! use with a sentinel entry (no event, turn zero) for both players; the
//! sentinel is never counted and never popped.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::event::{Event, EventKind};
use crate::core::{PlayerId, PlayerMap};

/// One logged occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// `None` only for the sentinel.
    pub event: Option<Event>,
    pub turn: u32,
}

impl Occurrence {
    const SENTINEL: Self = Self {
        event: None,
        turn: 0,
    };
}

/// Occurrence log keyed by kind, then player.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OccurrenceTable {
    logs: FxHashMap<EventKind, PlayerMap<Vec<Occurrence>>>,
}

impl OccurrenceTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event for `player`.
    pub fn record(&mut self, player: PlayerId, event: &Event, turn: u32) {
        let log = self
            .logs
            .entry(event.kind())
            .or_insert_with(|| PlayerMap::new(|_| vec![Occurrence::SENTINEL]));

        log[player].push(Occurrence {
            event: Some(event.clone()),
            turn,
        });
    }

    /// Recorded occurrences of a kind for a player, oldest first.
    pub fn iter(&self, kind: EventKind, player: PlayerId) -> impl Iterator<Item = &Occurrence> {
        self.logs
            .get(&kind)
            .into_iter()
            .flat_map(move |log| log[player].iter())
            .filter(|o| o.event.is_some())
    }

    /// How many times a kind happened for a player this game.
    #[must_use]
    pub fn count(&self, kind: EventKind, player: PlayerId) -> usize {
        self.iter(kind, player).count()
    }

    /// How many times a kind happened for a player during `turn`.
    #[must_use]
    pub fn count_in_turn(&self, kind: EventKind, player: PlayerId, turn: u32) -> usize {
        self.iter(kind, player).filter(|o| o.turn == turn).count()
    }

    /// The most recent occurrence.
    #[must_use]
    pub fn last(&self, kind: EventKind, player: PlayerId) -> Option<&Occurrence> {
        self.iter(kind, player).last()
    }

    /// Remove and return the most recent occurrence. The sentinel stays.
    pub fn pop_last(&mut self, kind: EventKind, player: PlayerId) -> Option<Occurrence> {
        let log = &mut self.logs.get_mut(&kind)?[player];
        if log.last().is_some_and(|o| o.event.is_some()) {
            log.pop()
        } else {
            None
        }
    }

    /// Has this kind ever been recorded (for either player)?
    #[must_use]
    pub fn is_initialized(&self, kind: EventKind) -> bool {
        self.logs.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;

    #[test]
    fn test_lazy_sentinel_for_both_players() {
        let mut table = OccurrenceTable::new();
        assert!(!table.is_initialized(EventKind::PlayCard));

        table.record(PlayerId::FIRST, &Event::PlayCard(EntityId(1)), 1);

        assert!(table.is_initialized(EventKind::PlayCard));
        assert_eq!(table.count(EventKind::PlayCard, PlayerId::FIRST), 1);
        assert_eq!(table.count(EventKind::PlayCard, PlayerId::SECOND), 0);
        assert_eq!(table.logs[&EventKind::PlayCard][PlayerId::SECOND].len(), 1);
    }

    #[test]
    fn test_counts() {
        let mut table = OccurrenceTable::new();
        table.record(PlayerId::FIRST, &Event::TakeDamage(1), 1);
        table.record(PlayerId::FIRST, &Event::TakeDamage(2), 2);
        table.record(PlayerId::FIRST, &Event::TakeDamage(3), 2);

        assert_eq!(table.count(EventKind::TakeDamage, PlayerId::FIRST), 3);
        assert_eq!(table.count_in_turn(EventKind::TakeDamage, PlayerId::FIRST, 2), 2);
        assert_eq!(table.count_in_turn(EventKind::TakeDamage, PlayerId::FIRST, 0), 0);
        assert_eq!(
            table.last(EventKind::TakeDamage, PlayerId::FIRST).unwrap().event,
            Some(Event::TakeDamage(3))
        );
        assert!(table.last(EventKind::DrawCard, PlayerId::FIRST).is_none());
    }

    #[test]
    fn test_pop_last_keeps_sentinel() {
        let mut table = OccurrenceTable::new();
        table.record(PlayerId::SECOND, &Event::TakeDamage(1), 1);

        let popped = table.pop_last(EventKind::TakeDamage, PlayerId::SECOND).unwrap();
        assert_eq!(popped.event, Some(Event::TakeDamage(1)));
        assert!(table.pop_last(EventKind::TakeDamage, PlayerId::SECOND).is_none());
        assert!(table.pop_last(EventKind::TakeDamage, PlayerId::FIRST).is_none());
        assert!(table.pop_last(EventKind::DrawCard, PlayerId::FIRST).is_none());
    }
}
