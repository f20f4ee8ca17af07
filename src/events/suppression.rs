//! Suppressed and forced event kinds.
//!
//! A suppressed kind is still ticked, recorded in history and logged in the
//! occurrence table; only subscriber dispatch is skipped. A forced kind is
//! dispatched even while suppressed.
//!
//! Both lists are multisets: suppressing the same kind twice needs two
//! releases. Each `suppress`/`force` call hands back a token that releases
//! exactly the entry it added.

use serde::{Deserialize, Serialize};

use super::event::EventKind;

/// Which list a token belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuppressionMode {
    Suppress,
    Force,
}

/// Undo handle returned by [`Suppression::suppress`] and [`Suppression::force`].
///
/// Each token owns one entry, identified by a counter value that is never
/// reused. Releasing it again, or after another caller re-suppressed the
/// same kind, touches nothing.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping the token leaves the kind suppressed or forced"]
pub struct SuppressionToken {
    id: u64,
    kind: EventKind,
    mode: SuppressionMode,
}

impl SuppressionToken {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    #[must_use]
    pub const fn mode(&self) -> SuppressionMode {
        self.mode
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Suppression {
    suppressed: Vec<(u64, EventKind)>,
    forced: Vec<(u64, EventKind)>,
    next_id: u64,
}

impl Suppression {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suppress(&mut self, kind: EventKind) -> SuppressionToken {
        self.add(kind, SuppressionMode::Suppress)
    }

    pub fn force(&mut self, kind: EventKind) -> SuppressionToken {
        self.add(kind, SuppressionMode::Force)
    }

    fn add(&mut self, kind: EventKind, mode: SuppressionMode) -> SuppressionToken {
        let id = self.next_id;
        self.next_id += 1;

        self.list_mut(mode).push((id, kind));
        SuppressionToken { id, kind, mode }
    }

    fn list_mut(&mut self, mode: SuppressionMode) -> &mut Vec<(u64, EventKind)> {
        match mode {
            SuppressionMode::Suppress => &mut self.suppressed,
            SuppressionMode::Force => &mut self.forced,
        }
    }

    /// Undo the entry a token added. Returns false if it was already undone.
    pub fn release(&mut self, token: &SuppressionToken) -> bool {
        let list = self.list_mut(token.mode);

        match list.iter().position(|&(id, _)| id == token.id) {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_suppressed(&self, kind: EventKind) -> bool {
        self.suppressed.iter().any(|&(_, k)| k == kind)
    }

    #[must_use]
    pub fn is_forced(&self, kind: EventKind) -> bool {
        self.forced.iter().any(|&(_, k)| k == kind)
    }

    /// Should subscriber dispatch be skipped for this kind?
    #[must_use]
    pub fn blocks(&self, kind: EventKind) -> bool {
        self.is_suppressed(kind) && !self.is_forced(kind)
    }
}
