//! Tick hooks: callbacks run on every broadcast's tick phase, whatever the
//! event kind, and even for suppressed events.
//!
//! A hook that is already running is skipped by nested broadcasts it causes,
//! so a hook that creates a card (which broadcasts `CreateCard`) cannot feed
//! itself.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::event::Event;
use crate::core::{Game, PlayerId};
use crate::error::Result;

/// Unique identifier for a tick hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TickHookId(pub u64);

impl std::fmt::Display for TickHookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TickHook({})", self.0)
    }
}

/// Undo handle returned by [`Game::hook_to_tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHookHandle {
    id: TickHookId,
}

impl TickHookHandle {
    pub(crate) const fn new(id: TickHookId) -> Self {
        Self { id }
    }

    #[must_use]
    pub const fn id(self) -> TickHookId {
        self.id
    }

    /// Unhook. Returns false if already unhooked.
    pub fn unhook(self, game: &mut Game) -> bool {
        game.unhook_from_tick(self)
    }
}

/// Tick hook callback. The player is `None` for system events.
pub type TickHookFn = Rc<dyn Fn(&mut Game, &Event, Option<PlayerId>) -> Result<()>>;

struct TickHook {
    callback: TickHookFn,
    running: bool,
}

#[derive(Default)]
pub struct TickHooks {
    hooks: BTreeMap<TickHookId, TickHook>,
    next_id: u64,
}

impl std::fmt::Debug for TickHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHooks")
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl TickHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, callback: TickHookFn) -> TickHookId {
        let id = TickHookId(self.next_id);
        self.next_id += 1;

        self.hooks.insert(
            id,
            TickHook {
                callback,
                running: false,
            },
        );
        id
    }

    pub fn remove(&mut self, id: TickHookId) -> bool {
        self.hooks.remove(&id).is_some()
    }

    /// Ids of every hook, in registration order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TickHookId> {
        self.hooks.keys().copied().collect()
    }

    /// Mark a hook as running and hand out its callback.
    ///
    /// Returns `None` if the hook is gone or already running.
    pub fn enter(&mut self, id: TickHookId) -> Option<TickHookFn> {
        let hook = self.hooks.get_mut(&id)?;
        if hook.running {
            return None;
        }

        hook.running = true;
        Some(Rc::clone(&hook.callback))
    }

    /// Clear the running mark set by [`enter`](Self::enter).
    pub fn exit(&mut self, id: TickHookId) {
        if let Some(hook) = self.hooks.get_mut(&id) {
            hook.running = false;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
