//! Quests, sidequests and secrets.
//!
//! A quest is a subscriber bound to one event kind with a progress counter.
//! Each successful callback advances progress by one; the broadcast on which
//! the callback was told it was `done` completes the quest. Completion can
//! chain into a follow-up card (a questline).
//!
//! The three kinds share one engine and differ in which player list they
//! live in: secrets belong to the player who did *not* cause the event.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::event::{Event, EventKind};
use super::listener::ListenerMessage;
use crate::cards::CardId;
use crate::core::{EntityId, Game, PlayerId};
use crate::error::Result;

/// Which player list a quest lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestKind {
    Quest,
    Sidequest,
    Secret,
}

impl std::fmt::Display for QuestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Unique identifier for a quest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestId(pub u64);

impl std::fmt::Display for QuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Quest({})", self.0)
    }
}

/// `current / max`. `current` never exceeds `max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Progress {
    current: u32,
    max: u32,
}

impl Progress {
    /// Panics if `max` is zero.
    #[must_use]
    pub fn new(max: u32) -> Self {
        assert!(max > 0, "Quest must require at least 1 step");
        Self { current: 0, max }
    }

    #[must_use]
    pub const fn current(self) -> u32 {
        self.current
    }

    #[must_use]
    pub const fn max(self) -> u32 {
        self.max
    }

    #[must_use]
    pub const fn is_saturated(self) -> bool {
        self.current == self.max
    }

    /// Will the next step complete the quest?
    #[must_use]
    pub const fn next_completes(self) -> bool {
        self.current + 1 >= self.max
    }

    /// Advance by `amount`, capped at `max`.
    pub fn advance(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

/// Arguments passed to a quest callback.
#[derive(Clone, Copy, Debug)]
pub struct QuestContext<'a> {
    pub quest: QuestId,

    /// The card that started the quest.
    pub card: EntityId,

    pub owner: PlayerId,

    pub event: &'a Event,

    /// True if a `Success` now completes the quest.
    pub done: bool,
}

/// Quest callback.
pub type QuestFn = Rc<dyn Fn(&mut Game, &QuestContext<'_>) -> Result<ListenerMessage>>;

/// A live quest in a player's list.
#[derive(Clone)]
pub struct Quest {
    pub id: QuestId,
    pub kind: QuestKind,

    /// Name of the originating card. Secrets and sidequests are unique by
    /// name per player.
    pub name: String,

    pub owner: PlayerId,
    pub card: EntityId,
    pub trigger: EventKind,
    pub progress: Progress,

    /// Follow-up card created and cast on completion.
    pub next: Option<CardId>,

    callback: QuestFn,
}

impl std::fmt::Debug for Quest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quest")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("card", &self.card)
            .field("trigger", &self.trigger)
            .field("progress", &self.progress)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

impl Quest {
    /// Get a handle to the callback.
    #[must_use]
    pub fn callback(&self) -> QuestFn {
        Rc::clone(&self.callback)
    }
}

/// Everything card content supplies when starting a quest. The engine fills
/// in the id, name and owner from the originating card.
///
/// ```
/// use hearth_events::events::{EventKind, ListenerMessage, QuestKind, QuestTemplate};
/// use hearth_events::cards::CardId;
/// use hearth_events::core::EntityId;
///
/// let template = QuestTemplate::new(QuestKind::Quest, EntityId(1), EventKind::PlayCard, 3, |_, ctx| {
///     Ok(if ctx.event.card() == Some(ctx.card) {
///         ListenerMessage::Skip
///     } else {
///         ListenerMessage::Success
///     })
/// })
/// .with_next(CardId::new(7));
///
/// assert_eq!(template.max, 3);
/// ```
#[derive(Clone)]
pub struct QuestTemplate {
    pub kind: QuestKind,
    pub card: EntityId,
    pub trigger: EventKind,
    pub max: u32,
    pub next: Option<CardId>,
    callback: QuestFn,
}

impl std::fmt::Debug for QuestTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestTemplate")
            .field("kind", &self.kind)
            .field("card", &self.card)
            .field("trigger", &self.trigger)
            .field("max", &self.max)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

impl QuestTemplate {
    #[must_use]
    pub fn new(
        kind: QuestKind,
        card: EntityId,
        trigger: EventKind,
        max: u32,
        callback: impl Fn(&mut Game, &QuestContext<'_>) -> Result<ListenerMessage> + 'static,
    ) -> Self {
        Self {
            kind,
            card,
            trigger,
            max,
            next: None,
            callback: Rc::new(callback),
        }
    }

    /// Chain a follow-up card (builder pattern).
    #[must_use]
    pub fn with_next(mut self, next: CardId) -> Self {
        self.next = Some(next);
        self
    }

    /// Build the live quest.
    ///
    /// Panics if `max` is zero.
    #[must_use]
    pub fn into_quest(self, id: QuestId, name: String, owner: PlayerId) -> Quest {
        Quest {
            id,
            kind: self.kind,
            name,
            owner,
            card: self.card,
            trigger: self.trigger,
            progress: Progress::new(self.max),
            next: self.next,
            callback: self.callback,
        }
    }
}
