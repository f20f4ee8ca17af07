//! General-purpose event listeners.
//!
//! A listener is a kind-filtered callback with a lifespan. Each successful
//! firing counts against the lifespan; when the count reaches a finite
//! lifespan the listener is removed. The callback steers its own lifecycle
//! through the [`ListenerMessage`] it returns.
//!
//! A firing is reserved before the callback runs, so a broadcast nested
//! inside the callback sees the budget as already taken. A `Times(1)`
//! listener that re-broadcasts its own kind is not re-entered.
//!
//! ## Identity
//!
//! Ids come from a monotonically increasing counter and are never reused, so
//! a stale [`ListenerHandle`] can never reach a newer listener. Dispatch
//! order is registration order (ids are kept in a `BTreeMap`).

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::event::{Event, EventKind, KindFilter};
use crate::core::{Game, PlayerId};
use crate::error::Result;

/// Unique identifier for a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

impl ListenerId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

/// Destroy handle returned by [`Game::add_listener`].
///
/// Destroying through the handle is idempotent: only the first call that
/// actually removes the listener returns true.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    id: ListenerId,
}

impl ListenerHandle {
    pub(crate) const fn new(id: ListenerId) -> Self {
        Self { id }
    }

    #[must_use]
    pub const fn id(self) -> ListenerId {
        self.id
    }

    /// Remove the listener. Returns false if it was already gone.
    pub fn destroy(self, game: &mut Game) -> bool {
        game.destroy_listener(self)
    }
}

/// What a listener or quest callback asks the engine to do next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerMessage {
    /// Count this firing.
    #[default]
    Success,
    /// The firing does not count.
    Skip,
    /// Start the lifespan over.
    Reset,
    /// Remove the subscriber now.
    Destroy,
}

/// How many successful firings a listener gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifespan {
    Times(u32),
    /// Only removed by `Destroy` or the handle.
    Unbounded,
}

impl Lifespan {
    /// Has a listener that fired `times` times used up its lifespan?
    #[must_use]
    pub fn is_spent(self, times: u32) -> bool {
        match self {
            Self::Times(n) => times >= n,
            Self::Unbounded => false,
        }
    }
}

/// Listener callback. Receives the event and the player who caused it.
pub type ListenerFn = Rc<dyn Fn(&mut Game, &Event, PlayerId) -> Result<ListenerMessage>>;

struct Listener {
    filter: KindFilter,
    lifespan: Lifespan,
    times_fired: u32,
    /// Firings whose callback is still running.
    in_flight: u32,
    callback: ListenerFn,
}

/// Storage for listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: BTreeMap<ListenerId, Listener>,
    next_id: u64,
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener and return its id.
    ///
    /// Panics on a zero lifespan.
    pub fn register(&mut self, filter: KindFilter, lifespan: Lifespan, callback: ListenerFn) -> ListenerId {
        assert!(
            lifespan != Lifespan::Times(0),
            "Listener lifespan must be at least 1"
        );

        let id = ListenerId(self.next_id);
        self.next_id += 1;

        self.listeners.insert(
            id,
            Listener {
                filter,
                lifespan,
                times_fired: 0,
                in_flight: 0,
                callback,
            },
        );
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Ids of every live listener, in dispatch order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ListenerId> {
        self.listeners.keys().copied().collect()
    }

    /// Reserve a firing for `kind` and return the callback to run.
    ///
    /// None if the listener is gone, wants another kind, or has its whole
    /// remaining lifespan reserved by callbacks still running. Every
    /// reservation is settled by [`record_firing`](Self::record_firing) or
    /// [`cancel_firing`](Self::cancel_firing).
    pub fn reserve_firing(&mut self, id: ListenerId, kind: EventKind) -> Option<ListenerFn> {
        let listener = self.listeners.get_mut(&id)?;
        if !listener.filter.matches(kind)
            || listener.lifespan.is_spent(listener.times_fired + listener.in_flight)
        {
            return None;
        }

        listener.in_flight += 1;
        Some(Rc::clone(&listener.callback))
    }

    /// Drop a reservation whose callback failed. Nothing is counted.
    pub fn cancel_firing(&mut self, id: ListenerId) {
        if let Some(listener) = self.listeners.get_mut(&id) {
            listener.in_flight = listener.in_flight.saturating_sub(1);
        }
    }

    /// Settle a reserved firing with the callback's outcome. Returns true if
    /// the listener was removed.
    pub fn record_firing(&mut self, id: ListenerId, message: ListenerMessage) -> bool {
        let Some(listener) = self.listeners.get_mut(&id) else {
            return false;
        };
        listener.in_flight = listener.in_flight.saturating_sub(1);

        let remove = match message {
            ListenerMessage::Destroy => true,
            ListenerMessage::Reset => {
                listener.times_fired = 0;
                false
            }
            ListenerMessage::Skip => false,
            ListenerMessage::Success => {
                listener.times_fired += 1;
                listener.lifespan.is_spent(listener.times_fired)
            }
        };

        if remove {
            self.listeners.remove(&id);
        }
        remove
    }

    /// How many counted firings a listener has.
    #[must_use]
    pub fn times_fired(&self, id: ListenerId) -> Option<u32> {
        self.listeners.get(&id).map(|l| l.times_fired)
    }

    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
