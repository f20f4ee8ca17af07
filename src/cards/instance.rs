//! Card instances - runtime card state.
//!
//! `Card` represents a specific card in a game at a specific moment. It is
//! plain data: history snapshots are made by cloning it, so later mutation
//! of the live instance never changes what history recorded.

use serde::{Deserialize, Serialize};

use super::definition::{CardBlueprint, CardId, CardType};
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;

/// A time-limited cost modifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enchantment {
    /// Added to the base cost.
    pub cost_delta: i64,

    /// Last turn this enchantment applies on. `None` lasts forever.
    pub expires_after_turn: Option<u32>,

    /// The card that applied it, if any.
    pub source: Option<EntityId>,
}

impl Enchantment {
    /// A permanent cost modifier.
    #[must_use]
    pub fn cost(delta: i64) -> Self {
        Self {
            cost_delta: delta,
            expires_after_turn: None,
            source: None,
        }
    }

    /// Limit to turns up to and including `turn` (builder pattern).
    #[must_use]
    pub fn until_turn(mut self, turn: u32) -> Self {
        self.expires_after_turn = Some(turn);
        self
    }

    /// Record the card that applied it (builder pattern).
    #[must_use]
    pub fn from_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    /// Does this still apply on `turn`?
    #[must_use]
    pub fn is_active(&self, turn: u32) -> bool {
        self.expires_after_turn.is_none_or(|last| turn <= last)
    }
}

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique entity ID for this instance.
    pub entity_id: EntityId,

    /// Reference to the card blueprint.
    pub card_id: CardId,

    pub name: String,

    pub card_type: CardType,

    pub owner: PlayerId,

    /// Current cost, recomputed from `base_cost` and enchantments each tick.
    pub cost: i64,

    pub base_cost: i64,

    /// Current health. `None` for cards without health.
    pub health: Option<i64>,

    /// Remaining infuse count. `None` once spent or for non-infuse cards.
    pub infuse: Option<u32>,

    pub enchantments: Vec<Enchantment>,

    /// Result of the last condition evaluation.
    pub condition_met: bool,
}

impl Card {
    /// Instantiate a blueprint.
    #[must_use]
    pub fn from_blueprint(entity_id: EntityId, blueprint: &CardBlueprint, owner: PlayerId) -> Self {
        Self {
            entity_id,
            card_id: blueprint.id,
            name: blueprint.name.clone(),
            card_type: blueprint.card_type,
            owner,
            cost: blueprint.cost,
            base_cost: blueprint.cost,
            health: blueprint.health,
            infuse: blueprint.infuse,
            enchantments: Vec::new(),
            condition_met: false,
        }
    }

    /// Cards without health are always alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health.is_none_or(|h| h > 0)
    }

    /// Apply an enchantment. Takes effect on the next refresh.
    pub fn enchant(&mut self, enchantment: Enchantment) {
        self.enchantments.push(enchantment);
    }

    /// Drop expired enchantments and recompute cost from the base.
    ///
    /// The result may be negative; the tick clamps it afterwards.
    pub fn refresh_enchantments(&mut self, turn: u32) {
        self.enchantments.retain(|e| e.is_active(turn));
        self.cost = self.base_cost + self.enchantments.iter().map(|e| e.cost_delta).sum::<i64>();
    }

    /// Count down infuse. Returns true exactly when the counter hits zero.
    pub fn tick_infuse(&mut self) -> bool {
        match self.infuse {
            Some(n) if n > 1 => {
                self.infuse = Some(n - 1);
                false
            }
            Some(1) => {
                self.infuse = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_card() -> Card {
        let blueprint = CardBlueprint::new(CardId::new(1), "Test", CardType::Minion)
            .with_cost(3)
            .with_health(2)
            .with_infuse(2);
        Card::from_blueprint(EntityId(10), &blueprint, PlayerId::FIRST)
    }

    #[test]
    fn test_from_blueprint() {
        let card = test_card();

        assert_eq!(card.entity_id, EntityId(10));
        assert_eq!(card.card_id, CardId::new(1));
        assert_eq!(card.owner, PlayerId::FIRST);
        assert_eq!(card.cost, 3);
        assert_eq!(card.health, Some(2));
        assert!(card.is_alive());
    }

    #[test]
    fn test_alive() {
        let mut card = test_card();
        card.health = Some(0);
        assert!(!card.is_alive());

        card.health = None;
        assert!(card.is_alive());
    }

    #[test]
    fn test_enchantment_refresh() {
        let mut card = test_card();
        card.enchant(Enchantment::cost(-2));
        card.enchant(Enchantment::cost(-4).until_turn(3));

        card.refresh_enchantments(3);
        assert_eq!(card.cost, -3);

        card.refresh_enchantments(4);
        assert_eq!(card.cost, 1);
        assert_eq!(card.enchantments.len(), 1);
    }

    #[test]
    fn test_infuse_countdown() {
        let mut card = test_card();

        assert!(!card.tick_infuse());
        assert_eq!(card.infuse, Some(1));
        assert!(card.tick_infuse());
        assert_eq!(card.infuse, None);
        assert!(!card.tick_infuse());
    }

    #[test]
    fn test_card_serialization() {
        let mut card = test_card();
        card.enchant(Enchantment::cost(1).from_source(EntityId(4)));

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
