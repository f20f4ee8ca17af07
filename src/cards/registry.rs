//! Card registry for blueprint lookup.

use rustc_hash::FxHashMap;

use super::definition::{CardBlueprint, CardId};
use crate::error::{EngineError, Result};

/// Registry of card blueprints.
///
/// ## Example
///
/// ```
/// use hearth_events::cards::{CardBlueprint, CardId, CardRegistry, CardType};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardBlueprint::new(CardId::new(1), "Coin", CardType::Spell));
///
/// let found = registry.blueprint(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Coin");
/// assert!(registry.blueprint(CardId::new(2)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardBlueprint>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card blueprint.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardBlueprint) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Register a blueprint (builder pattern).
    #[must_use]
    pub fn with(mut self, card: CardBlueprint) -> Self {
        self.register(card);
        self
    }

    /// Look up a blueprint.
    pub fn blueprint(&self, id: CardId) -> Result<&CardBlueprint> {
        self.cards.get(&id).ok_or(EngineError::UnknownCard(id))
    }

    /// Check if a card exists.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
