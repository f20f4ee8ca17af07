//! The history log.
//!
//! Every broadcast with history enabled appends one [`HistoryEntry`] under
//! the current turn, whether or not the event was later suppressed. Entries
//! are never modified; card payloads are captured as snapshots so that later
//! changes to the live card do not rewrite the record.
//!
//! Storage is persistent (`im`), so cloning a `History` for replay or
//! diagnostics is O(1).

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::event::{Event, EventKind};
use crate::cards::Card;
use crate::core::{EntityId, HistoryConfig, PlayerId};

/// One recorded broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub event: Event,

    /// The player who caused the event. `None` for system events.
    pub player: Option<PlayerId>,

    /// Copies of every card the payload referenced, taken at broadcast time.
    pub snapshots: SmallVec<[Card; 2]>,
}

impl HistoryEntry {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }

    /// The snapshot of a referenced card.
    #[must_use]
    pub fn snapshot(&self, card: EntityId) -> Option<&Card> {
        self.snapshots.iter().find(|c| c.entity_id == card)
    }
}

/// One line of human-readable history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryLine {
    pub turn: u32,
    pub player: PlayerId,
    pub text: String,
}

/// Turn-indexed, append-only event log.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct History {
    turns: OrdMap<u32, Vector<HistoryEntry>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry under `turn`.
    pub fn record(&mut self, turn: u32, entry: HistoryEntry) {
        match self.turns.get_mut(&turn) {
            Some(entries) => entries.push_back(entry),
            None => {
                self.turns.insert(turn, Vector::unit(entry));
            }
        }
    }

    /// Entries recorded during a turn, oldest first.
    pub fn turn(&self, turn: u32) -> impl Iterator<Item = &HistoryEntry> {
        self.turns.get(&turn).into_iter().flat_map(|entries| entries.iter())
    }

    /// All entries with their turn, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &HistoryEntry)> {
        self.turns
            .iter()
            .flat_map(|(turn, entries)| entries.iter().map(move |e| (*turn, e)))
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.turns.get_max().and_then(|(_, entries)| entries.last())
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.values().map(Vector::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries of one kind.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.iter().filter(|(_, e)| e.kind() == kind).count()
    }

    /// Human-readable history as seen by `viewer`.
    ///
    /// Without `debug`, only whitelisted kinds are shown and the cards in
    /// hidden-value kinds are redacted unless `viewer` owns them or they were
    /// revealed by some visible event. System events (no player) are never
    /// shown.
    #[must_use]
    pub fn readable(&self, viewer: PlayerId, config: &HistoryConfig, debug: bool) -> Vec<HistoryLine> {
        let mut lines = Vec::new();

        for (&turn, entries) in self.turns.iter() {
            let mut previous: Option<&HistoryEntry> = None;

            for entry in entries.iter() {
                let prior = previous.replace(entry);
                let Some(player) = entry.player else {
                    continue;
                };

                let kind = entry.kind();
                if !debug && !config.is_whitelisted(kind) {
                    continue;
                }

                // A draw is already reported as such.
                if kind == EventKind::AddCardToHand
                    && prior.is_some_and(|p| {
                        p.kind() == EventKind::DrawCard && p.event.card() == entry.event.card()
                    })
                {
                    continue;
                }

                let hide = !debug && config.hides_value(kind);
                let mut render = |card: EntityId| {
                    let Some(snapshot) = entry.snapshot(card) else {
                        return card.to_string();
                    };

                    if !hide || snapshot.owner == viewer {
                        snapshot.name.clone()
                    } else if self.is_revealed(card, config) {
                        format!("Hidden > Revealed as: {}", snapshot.name)
                    } else {
                        "Hidden".to_string()
                    }
                };

                lines.push(HistoryLine {
                    turn,
                    player,
                    text: entry.event.describe(&player.to_string(), &mut render),
                });
            }
        }

        lines
    }

    /// Has the card appeared in a visible, non-redacted entry?
    fn is_revealed(&self, card: EntityId, config: &HistoryConfig) -> bool {
        self.iter().any(|(_, entry)| {
            let kind = entry.kind();
            config.is_whitelisted(kind)
                && !config.hides_value(kind)
                && entry.event.cards().contains(&card)
        })
    }
}
