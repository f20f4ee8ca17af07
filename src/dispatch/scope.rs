//! Suppression, plain and scoped.
//!
//! [`Game::suppress`] and [`Game::force`] hand back tokens the caller must
//! release. [`Game::suppressed`] and [`Game::with_suppressed`] release their
//! tokens on every exit path: normal return, `?`, and unwinding.

use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::core::Game;
use crate::error::Result;
use crate::events::{EventKind, SuppressionToken};

impl Game {
    /// Stop subscriber dispatch for a kind until the token is released.
    pub fn suppress(&mut self, kind: EventKind) -> SuppressionToken {
        trace!(%kind, "suppressing");
        self.events.suppression.suppress(kind)
    }

    /// Dispatch a kind even while it is suppressed, until the token is
    /// released.
    pub fn force(&mut self, kind: EventKind) -> SuppressionToken {
        trace!(%kind, "forcing");
        self.events.suppression.force(kind)
    }

    /// Undo one `suppress` or `force`. Returns false if that token was
    /// already released.
    pub fn release(&mut self, token: &SuppressionToken) -> bool {
        self.events.suppression.release(token)
    }

    /// Suppress kinds for as long as the returned guard lives.
    ///
    /// The guard dereferences to the game.
    pub fn suppressed(&mut self, kinds: impl IntoIterator<Item = EventKind>) -> SuppressedScope<'_> {
        let tokens = kinds.into_iter().map(|kind| self.suppress(kind)).collect();
        SuppressedScope { game: self, tokens }
    }

    /// Run `body` with kinds suppressed. The suppression is lifted however
    /// `body` exits.
    ///
    /// ```
    /// use hearth_events::cards::CardRegistry;
    /// use hearth_events::core::{Game, PlayerId};
    /// use hearth_events::events::{Event, EventKind};
    ///
    /// let mut game = Game::new(CardRegistry::new());
    /// let dispatched = game
    ///     .with_suppressed([EventKind::TakeDamage], |game| {
    ///         game.broadcast(Event::TakeDamage(3), Some(PlayerId::FIRST))
    ///     })
    ///     .unwrap();
    ///
    /// assert!(!dispatched);
    /// assert!(!game.events.suppression.is_suppressed(EventKind::TakeDamage));
    /// ```
    pub fn with_suppressed<T>(
        &mut self,
        kinds: impl IntoIterator<Item = EventKind>,
        body: impl FnOnce(&mut Game) -> Result<T>,
    ) -> Result<T> {
        let mut scope = self.suppressed(kinds);
        body(&mut *scope)
    }
}

/// Releases its suppressions when dropped.
#[derive(Debug)]
#[must_use = "the suppression ends as soon as the scope is dropped"]
pub struct SuppressedScope<'g> {
    game: &'g mut Game,
    tokens: Vec<SuppressionToken>,
}

impl Deref for SuppressedScope<'_> {
    type Target = Game;

    fn deref(&self) -> &Game {
        self.game
    }
}

impl DerefMut for SuppressedScope<'_> {
    fn deref_mut(&mut self) -> &mut Game {
        self.game
    }
}

impl Drop for SuppressedScope<'_> {
    fn drop(&mut self) {
        for token in self.tokens.drain(..).rev() {
            self.game.release(&token);
        }
    }
}
