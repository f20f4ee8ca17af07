//! The game: the explicit context handed to every callback.
//!
//! `Game` owns the card arena, both players' zones and quest lists, the
//! blueprint registry, and the [`EventManager`]. Ability, listener, quest and
//! tick-hook callbacks all receive `&mut Game` and may call back into
//! [`broadcast`](Game::broadcast).
//!
//! ## Card arena
//!
//! Card instances live in one map keyed by [`EntityId`]; zones hold ids.
//! Instances are never removed from the arena, so an id captured by a
//! callback or written to history always resolves.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::config::EngineConfig;
use super::entity::EntityId;
use super::player::{Player, PlayerId, PlayerMap};
use crate::cards::{Ability, AbilityContext, Card, CardId, CardRegistry};
use crate::error::{EngineError, Result};
use crate::events::{
    Event, EventManager, HistoryLine, KindFilter, Lifespan, ListenerHandle, ListenerMessage,
    TickHookHandle,
};

/// Something the engine wants the presentation layer to show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// `triggered_by` set off a secret belonging to `owner`.
    SecretTriggered {
        owner: PlayerId,
        triggered_by: PlayerId,
        name: String,
    },
}

/// One game instance.
#[derive(Debug)]
pub struct Game {
    pub players: PlayerMap<Player>,

    pub registry: CardRegistry,

    pub events: EventManager,

    pub config: EngineConfig,

    cards: FxHashMap<EntityId, Card>,

    turn: u32,

    next_entity_id: EntityId,

    notifications: Vec<Notification>,
}

impl Game {
    /// Create a game on turn 1 with empty zones.
    #[must_use]
    pub fn new(registry: CardRegistry) -> Self {
        Self {
            players: PlayerMap::new(Player::new),
            registry,
            events: EventManager::new(),
            config: EngineConfig::default(),
            cards: FxHashMap::default(),
            turn: 1,
            next_entity_id: EntityId(1),
            notifications: Vec::new(),
        }
    }

    /// Set the engine configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    // === Clock ===

    /// Current turn. History is keyed by this.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Move to the next turn and return it.
    pub fn advance_turn(&mut self) -> u32 {
        self.turn += 1;
        self.turn
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    // === Cards ===

    /// Look up a card instance.
    pub fn card(&self, id: EntityId) -> Result<&Card> {
        self.cards.get(&id).ok_or(EngineError::UnknownEntity(id))
    }

    /// Look up a card instance mutably.
    pub fn card_mut(&mut self, id: EntityId) -> Result<&mut Card> {
        self.cards.get_mut(&id).ok_or(EngineError::UnknownEntity(id))
    }

    /// Instantiate a blueprint for `owner` without announcing it.
    ///
    /// The card is not placed in any zone.
    pub fn spawn_card(&mut self, card_id: CardId, owner: PlayerId) -> Result<EntityId> {
        let blueprint = self.registry.blueprint(card_id)?;
        let id = self.next_entity_id;
        let card = Card::from_blueprint(id, blueprint, owner);

        self.next_entity_id = id.next();
        self.cards.insert(id, card);
        Ok(id)
    }

    /// Instantiate a blueprint and broadcast `CreateCard`.
    pub fn create_card(&mut self, card_id: CardId, owner: PlayerId) -> Result<EntityId> {
        let id = self.spawn_card(card_id, owner)?;
        self.broadcast(Event::CreateCard(id), Some(owner))?;
        Ok(id)
    }

    /// Put a card in its owner's hand.
    pub fn add_to_hand(&mut self, id: EntityId) -> Result<()> {
        let owner = self.card(id)?.owner;
        self.players[owner].hand.push(id);
        Ok(())
    }

    /// Put a card on its owner's board.
    pub fn summon(&mut self, id: EntityId) -> Result<()> {
        let owner = self.card(id)?.owner;
        self.players[owner].board.push(id);
        Ok(())
    }

    /// Make a card its owner's hero.
    pub fn set_hero(&mut self, id: EntityId) -> Result<()> {
        let owner = self.card(id)?.owner;
        self.players[owner].hero = Some(id);
        Ok(())
    }

    /// Equip a weapon for its owner, replacing any current one.
    pub fn equip_weapon(&mut self, id: EntityId) -> Result<()> {
        let owner = self.card(id)?.owner;
        self.players[owner].weapon = Some(id);
        Ok(())
    }

    /// Run one of a card's ability slots.
    ///
    /// Returns false if the blueprint leaves the slot empty. Errors from the
    /// ability propagate unchanged.
    pub fn trigger(
        &mut self,
        card: EntityId,
        ability: Ability,
        event: Option<&Event>,
        player: Option<PlayerId>,
    ) -> Result<bool> {
        let card_id = self.card(card)?.card_id;
        let Some(callback) = self.registry.blueprint(card_id)?.ability(ability) else {
            return Ok(false);
        };

        trace!(%card, %ability, "triggering ability");
        let ctx = AbilityContext {
            card,
            ability,
            event,
            player,
        };
        callback(self, &ctx)?;
        Ok(true)
    }

    // === Subscriptions ===

    /// Register a listener. Keep the handle to destroy it early.
    ///
    /// Panics on `Lifespan::Times(0)`.
    pub fn add_listener(
        &mut self,
        filter: impl Into<KindFilter>,
        lifespan: Lifespan,
        callback: impl Fn(&mut Game, &Event, PlayerId) -> Result<ListenerMessage> + 'static,
    ) -> ListenerHandle {
        let id = self
            .events
            .listeners
            .register(filter.into(), lifespan, Rc::new(callback));
        ListenerHandle::new(id)
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn destroy_listener(&mut self, handle: ListenerHandle) -> bool {
        self.events.listeners.remove(handle.id())
    }

    /// Register a tick hook.
    pub fn hook_to_tick(
        &mut self,
        callback: impl Fn(&mut Game, &Event, Option<PlayerId>) -> Result<()> + 'static,
    ) -> TickHookHandle {
        let id = self.events.tick_hooks.register(Rc::new(callback));
        TickHookHandle::new(id)
    }

    /// Remove a tick hook. Returns false if it was already gone.
    pub fn unhook_from_tick(&mut self, handle: TickHookHandle) -> bool {
        self.events.tick_hooks.remove(handle.id())
    }

    // === Stats, history, notifications ===

    /// Add to a per-player counter and return the new value.
    pub fn increment_stat(&mut self, player: PlayerId, key: &str, amount: i64) -> i64 {
        self.events.stats.increment(player, key, amount)
    }

    /// History as `viewer` is allowed to see it.
    #[must_use]
    pub fn readable_history(&self, viewer: PlayerId, debug: bool) -> Vec<HistoryLine> {
        self.events.history.readable(viewer, &self.config.history, debug)
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Take every pending notification.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
