//! The broadcast orchestrator.
//!
//! ## Order
//!
//! Every broadcast runs these steps, in this order:
//!
//! 1. Tick: hand cards (condition, enchantments, `HandTick`, cost clamp),
//!    living board cards (`Tick`), then tick hooks. Runs for every event,
//!    suppressed or not. `DestroyCard` first counts down infuse in the
//!    causing player's hand.
//! 2. History write, when requested, with snapshots of referenced cards.
//! 3. Stop with `false` if no player caused the event.
//! 4. Occurrence table append.
//! 5. Stop with `false` if the kind is suppressed and not forced.
//! 6. Passives: board, then each player's hand, hero and weapon. Then
//!    listeners.
//! 7. Quests: the opponent's secrets, the player's sidequests, the player's
//!    quests.
//!
//! Every walk iterates a snapshot of ids taken when the step starts, so
//! callbacks may freely add or remove cards, listeners and hooks.

use tracing::{debug, trace, warn};

use crate::cards::Ability;
use crate::core::{EntityId, Game, PlayerId};
use crate::error::{EngineError, Result};
use crate::events::{Event, HistoryEntry, QuestKind};

impl Game {
    /// Announce an event, recording it in history.
    ///
    /// Returns true if reactive dispatch ran. `false` means the event was
    /// suppressed or had no causing player; it is not an error. Errors from
    /// callbacks propagate unchanged.
    pub fn broadcast(&mut self, event: Event, player: Option<PlayerId>) -> Result<bool> {
        self.broadcast_with(event, player, true)
    }

    /// Run listeners and tick hooks without leaving a history entry.
    pub fn broadcast_dummy(&mut self, player: PlayerId) -> Result<bool> {
        self.broadcast_with(Event::Dummy, Some(player), false)
    }

    /// Announce an event, choosing whether it goes into history.
    ///
    /// Fails with [`EngineError::RecursionLimit`] when broadcasts nest deeper
    /// than `config.max_broadcast_depth`.
    pub fn broadcast_with(
        &mut self,
        event: Event,
        player: Option<PlayerId>,
        record_history: bool,
    ) -> Result<bool> {
        let depth = self.events.depth + 1;
        if depth > self.config.max_broadcast_depth {
            warn!(kind = %event.kind(), depth, "broadcast recursion limit reached");
            return Err(EngineError::RecursionLimit { depth });
        }

        self.events.depth = depth;
        let result = self.dispatch(&event, player, record_history);
        self.events.depth = depth - 1;
        result
    }

    fn dispatch(&mut self, event: &Event, player: Option<PlayerId>, record_history: bool) -> Result<bool> {
        let kind = event.kind();
        debug!(%kind, ?player, turn = self.turn(), depth = self.events.depth, "broadcast");

        self.tick(event, player)?;

        if record_history {
            self.record_history(event, player);
        }

        let Some(player) = player else {
            return Ok(false);
        };

        let turn = self.turn();
        self.events.occurrences.record(player, event, turn);

        if self.events.suppression.blocks(kind) {
            trace!(%kind, "suppressed");
            return Ok(false);
        }

        self.dispatch_passives(event, player)?;
        self.dispatch_listeners(event, player)?;

        self.update_quests(QuestKind::Secret, event, player.opponent())?;
        self.update_quests(QuestKind::Sidequest, event, player)?;
        self.update_quests(QuestKind::Quest, event, player)?;

        Ok(true)
    }

    fn record_history(&mut self, event: &Event, player: Option<PlayerId>) {
        let snapshots = event
            .cards()
            .into_iter()
            .filter_map(|id| self.card(id).ok().cloned())
            .collect();

        let turn = self.turn();
        self.events.history.record(
            turn,
            HistoryEntry {
                event: event.clone(),
                player,
                snapshots,
            },
        );
    }

    // === Tick ===

    fn tick(&mut self, event: &Event, player: Option<PlayerId>) -> Result<()> {
        if let (Event::DestroyCard(_), Some(causer)) = (event, player) {
            self.tick_infuse(event, causer)?;
        }

        let turn = self.turn();
        for owner in PlayerId::both() {
            for card in self.players[owner].hand.clone() {
                self.tick_hand_card(card, turn, event, player)?;
            }

            for card in self.players[owner].board.clone() {
                if self.card(card)?.is_alive() {
                    self.trigger(card, Ability::Tick, Some(event), player)?;
                }
            }
        }

        for id in self.events.tick_hooks.snapshot() {
            // Skipped while already running further up the stack.
            let Some(hook) = self.events.tick_hooks.enter(id) else {
                continue;
            };

            trace!(hook = %id, "running tick hook");
            let result = hook(self, event, player);
            self.events.tick_hooks.exit(id);
            result?;
        }

        Ok(())
    }

    fn tick_hand_card(
        &mut self,
        card: EntityId,
        turn: u32,
        event: &Event,
        player: Option<PlayerId>,
    ) -> Result<()> {
        let card_id = self.card(card)?.card_id;
        if let Some(condition) = self.registry.blueprint(card_id)?.condition() {
            let met = condition(self, card);
            self.card_mut(card)?.condition_met = met;
        }

        self.card_mut(card)?.refresh_enchantments(turn);
        self.trigger(card, Ability::HandTick, Some(event), player)?;

        let instance = self.card_mut(card)?;
        instance.cost = instance.cost.max(0);
        Ok(())
    }

    fn tick_infuse(&mut self, event: &Event, player: PlayerId) -> Result<()> {
        for card in self.players[player].hand.clone() {
            if self.card_mut(card)?.tick_infuse() {
                debug!(%card, "infused");
                self.trigger(card, Ability::Infuse, Some(event), Some(player))?;
            }
        }
        Ok(())
    }

    // === Passives and listeners ===

    fn dispatch_passives(&mut self, event: &Event, player: PlayerId) -> Result<()> {
        let causer = Some(player);

        for owner in PlayerId::both() {
            for card in self.players[owner].board.clone() {
                // Skip minions killed earlier in this broadcast.
                if self.card(card)?.is_alive() {
                    self.trigger(card, Ability::Passive, Some(event), causer)?;
                }
            }
        }

        for owner in PlayerId::both() {
            for card in self.players[owner].hand.clone() {
                self.trigger(card, Ability::HandPassive, Some(event), causer)?;

                if self.card(card)?.card_type.is_spell_like() {
                    self.trigger(card, Ability::Passive, Some(event), causer)?;
                }
            }

            if let Some(hero) = self.players[owner].hero {
                self.trigger(hero, Ability::Passive, Some(event), causer)?;
            }

            if let Some(weapon) = self.players[owner].weapon {
                self.trigger(weapon, Ability::Passive, Some(event), causer)?;
            }
        }

        Ok(())
    }

    fn dispatch_listeners(&mut self, event: &Event, player: PlayerId) -> Result<()> {
        let kind = event.kind();

        for id in self.events.listeners.snapshot() {
            // Skipped while its remaining lifespan is reserved further up the stack.
            let Some(callback) = self.events.listeners.reserve_firing(id, kind) else {
                continue;
            };

            trace!(listener = %id, %kind, "invoking listener");
            let message = match callback(self, event, player) {
                Ok(message) => message,
                Err(err) => {
                    self.events.listeners.cancel_firing(id);
                    return Err(err);
                }
            };

            if self.events.listeners.record_firing(id, message) {
                trace!(listener = %id, ?message, "listener removed");
            }
        }

        Ok(())
    }
}
