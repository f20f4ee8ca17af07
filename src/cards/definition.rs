//! Card blueprints - static card data and ability slots.
//!
//! `CardBlueprint` holds the immutable properties of a card type along with
//! the callbacks card content registers for each [`Ability`] slot. The
//! engine never interprets what an ability does; it only decides when each
//! slot is invoked.
//!
//! Instance-specific data (cost after enchantments, health, infuse counter)
//! is stored separately in [`Card`](super::Card).

use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Game, PlayerId};
use crate::error::Result;
use crate::events::Event;

/// Unique identifier for a card blueprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Minion,
    Spell,
    Weapon,
    Hero,
    Location,
    HeroPower,
}

impl CardType {
    /// Spell-like cards are consumed when played, so their `Passive` slot is
    /// also driven while they sit in hand.
    #[must_use]
    pub const fn is_spell_like(self) -> bool {
        matches!(self, Self::Spell)
    }
}

/// Ability slots a blueprint may fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// The card's primary effect (battlecry / spell text).
    Cast,
    /// Reacts to events while on the board (or in hand, for spells).
    Passive,
    /// Reacts to events while in hand.
    HandPassive,
    /// Runs on every tick while on the board.
    Tick,
    /// Runs on every tick while in hand.
    HandTick,
    /// Fires when the infuse counter reaches zero.
    Infuse,
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Arguments passed to an ability callback.
#[derive(Clone, Copy, Debug)]
pub struct AbilityContext<'a> {
    /// The card whose ability is running.
    pub card: EntityId,

    /// Which slot was invoked.
    pub ability: Ability,

    /// The event being dispatched, for event-driven slots.
    pub event: Option<&'a Event>,

    /// The player who caused the event, if any.
    pub player: Option<PlayerId>,
}

/// Ability callback. Receives the game as an explicit context and may call
/// back into [`Game::broadcast`].
pub type AbilityFn = Rc<dyn Fn(&mut Game, &AbilityContext<'_>) -> Result<()>>;

/// Condition predicate, re-evaluated on every tick while the card is in hand.
pub type ConditionFn = Rc<dyn Fn(&Game, EntityId) -> bool>;

/// Static card definition.
///
/// ## Example
///
/// ```
/// use hearth_events::cards::{Ability, CardBlueprint, CardId, CardType};
///
/// let bolt = CardBlueprint::new(CardId::new(1), "Lightning Bolt", CardType::Spell)
///     .with_cost(1)
///     .with_ability(Ability::Cast, |_game, _ctx| Ok(()));
///
/// assert!(bolt.has_ability(Ability::Cast));
/// assert!(!bolt.has_ability(Ability::Passive));
/// ```
#[derive(Clone)]
pub struct CardBlueprint {
    pub id: CardId,

    pub name: String,

    pub card_type: CardType,

    /// Base cost before enchantments.
    pub cost: i64,

    /// Starting health. `None` for cards without health.
    pub health: Option<i64>,

    /// Starting infuse counter. `None` for cards without infuse.
    pub infuse: Option<u32>,

    abilities: FxHashMap<Ability, AbilityFn>,

    condition: Option<ConditionFn>,
}

impl std::fmt::Debug for CardBlueprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut abilities: Vec<_> = self.abilities.keys().collect();
        abilities.sort_by_key(|a| format!("{a}"));

        f.debug_struct("CardBlueprint")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("card_type", &self.card_type)
            .field("cost", &self.cost)
            .field("health", &self.health)
            .field("infuse", &self.infuse)
            .field("abilities", &abilities)
            .field("has_condition", &self.condition.is_some())
            .finish()
    }
}

impl CardBlueprint {
    /// Create a new blueprint with no abilities.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            cost: 0,
            health: None,
            infuse: None,
            abilities: FxHashMap::default(),
            condition: None,
        }
    }

    /// Set the base cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    /// Set the starting health (builder pattern).
    #[must_use]
    pub fn with_health(mut self, health: i64) -> Self {
        self.health = Some(health);
        self
    }

    /// Set the infuse counter (builder pattern).
    #[must_use]
    pub fn with_infuse(mut self, infuse: u32) -> Self {
        self.infuse = Some(infuse);
        self
    }

    /// Fill an ability slot (builder pattern).
    #[must_use]
    pub fn with_ability(
        mut self,
        ability: Ability,
        callback: impl Fn(&mut Game, &AbilityContext<'_>) -> Result<()> + 'static,
    ) -> Self {
        self.abilities.insert(ability, Rc::new(callback));
        self
    }

    /// Set the condition predicate (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: impl Fn(&Game, EntityId) -> bool + 'static) -> Self {
        self.condition = Some(Rc::new(condition));
        self
    }

    /// Does this blueprint fill the slot?
    #[must_use]
    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains_key(&ability)
    }

    /// Get a handle to an ability callback.
    #[must_use]
    pub fn ability(&self, ability: Ability) -> Option<AbilityFn> {
        self.abilities.get(&ability).cloned()
    }

    /// Get a handle to the condition predicate.
    #[must_use]
    pub fn condition(&self) -> Option<ConditionFn> {
        self.condition.clone()
    }
}
