//! Card system: blueprints, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card blueprints
//! - `CardBlueprint`: Static card data plus ability-slot callbacks
//! - `Card`: Runtime card state (owner, cost, health, enchantments)
//! - `CardRegistry`: Blueprint lookup

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{
    Ability, AbilityContext, AbilityFn, CardBlueprint, CardId, CardType, ConditionFn,
};
pub use instance::{Card, Enchantment};
pub use registry::CardRegistry;
