//! The event catalog.
//!
//! Every event is a variant of [`Event`] carrying its own payload, so a kind
//! can never be paired with the wrong payload shape. [`EventKind`] is the
//! payload-free discriminant used for subscriptions, suppression, and the
//! occurrence table.
//!
//! Card payloads are [`EntityId`]s referring to live instances; history
//! records a snapshot of each referenced card at broadcast time.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Ability;
use crate::core::{EntityId, PlayerId};

/// Something that can be targeted: a player's hero or a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Player(PlayerId),
    Card(EntityId),
}

impl Target {
    /// The targeted card, if this is not a player.
    #[must_use]
    pub fn card(self) -> Option<EntityId> {
        match self {
            Self::Card(c) => Some(c),
            Self::Player(_) => None,
        }
    }
}

/// Where a card lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Out of play.
    None,
    Deck,
    Hand,
    Board,
    Hero,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Event kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    FatalDamage,
    EndTurn,
    StartTurn,
    HealthRestored,
    UnspentMana,
    GainOverload,
    GainHeroAttack,
    TakeDamage,
    PlayCard,
    PlayCardUnsafe,
    SummonCard,
    DestroyCard,
    DamageCard,
    SilenceCard,
    DiscardCard,
    CancelCard,
    TradeCard,
    ForgeCard,
    FreezeCard,
    CreateCard,
    RevealCard,
    BurnCard,
    Titan,
    AddCardToDeck,
    AddCardToHand,
    DrawCard,
    ChangeLocation,
    ChangeHero,
    SpellDealsDamage,
    Attack,
    HeroPower,
    TargetSelectionStarts,
    TargetSelected,
    CardEvent,
    Dummy,
    Eval,
    Input,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// An event and its payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    FatalDamage,
    /// The turn that is ending.
    EndTurn(u32),
    /// The turn that is starting.
    StartTurn(u32),
    /// Health after the restore.
    HealthRestored(i64),
    /// Mana left at end of turn.
    UnspentMana(i64),
    GainOverload(i64),
    GainHeroAttack(i64),
    /// Damage taken by the originating player's hero.
    TakeDamage(i64),
    /// Fired after the card's text resolves.
    PlayCard(EntityId),
    /// Fired before the card's text resolves; the play may still be cancelled.
    PlayCardUnsafe(EntityId),
    SummonCard(EntityId),
    DestroyCard(EntityId),
    DamageCard(EntityId, i64),
    SilenceCard(EntityId),
    DiscardCard(EntityId),
    CancelCard(EntityId, Ability),
    TradeCard(EntityId),
    ForgeCard(EntityId),
    FreezeCard(EntityId),
    CreateCard(EntityId),
    /// The card and the reason it was revealed.
    RevealCard(EntityId, String),
    BurnCard(EntityId),
    /// The titan, then the ability card it used.
    Titan(EntityId, EntityId),
    AddCardToDeck(EntityId),
    AddCardToHand(EntityId),
    DrawCard(EntityId),
    ChangeLocation(EntityId, Zone),
    ChangeHero {
        old: Option<EntityId>,
        new: EntityId,
    },
    SpellDealsDamage(Target, i64),
    /// Attacker, then defender.
    Attack(Target, Target),
    /// The hero power's class.
    HeroPower(String),
    TargetSelectionStarts {
        prompt: String,
        host: Option<EntityId>,
    },
    TargetSelected {
        host: Option<EntityId>,
        target: Target,
    },
    /// A card announcing something about itself.
    CardEvent(EntityId, String),
    /// Kick-starts listeners and tick hooks. Never listen for it.
    Dummy,
    Eval(String),
    Input(String),
}

impl Event {
    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::FatalDamage => EventKind::FatalDamage,
            Self::EndTurn(_) => EventKind::EndTurn,
            Self::StartTurn(_) => EventKind::StartTurn,
            Self::HealthRestored(_) => EventKind::HealthRestored,
            Self::UnspentMana(_) => EventKind::UnspentMana,
            Self::GainOverload(_) => EventKind::GainOverload,
            Self::GainHeroAttack(_) => EventKind::GainHeroAttack,
            Self::TakeDamage(_) => EventKind::TakeDamage,
            Self::PlayCard(_) => EventKind::PlayCard,
            Self::PlayCardUnsafe(_) => EventKind::PlayCardUnsafe,
            Self::SummonCard(_) => EventKind::SummonCard,
            Self::DestroyCard(_) => EventKind::DestroyCard,
            Self::DamageCard(..) => EventKind::DamageCard,
            Self::SilenceCard(_) => EventKind::SilenceCard,
            Self::DiscardCard(_) => EventKind::DiscardCard,
            Self::CancelCard(..) => EventKind::CancelCard,
            Self::TradeCard(_) => EventKind::TradeCard,
            Self::ForgeCard(_) => EventKind::ForgeCard,
            Self::FreezeCard(_) => EventKind::FreezeCard,
            Self::CreateCard(_) => EventKind::CreateCard,
            Self::RevealCard(..) => EventKind::RevealCard,
            Self::BurnCard(_) => EventKind::BurnCard,
            Self::Titan(..) => EventKind::Titan,
            Self::AddCardToDeck(_) => EventKind::AddCardToDeck,
            Self::AddCardToHand(_) => EventKind::AddCardToHand,
            Self::DrawCard(_) => EventKind::DrawCard,
            Self::ChangeLocation(..) => EventKind::ChangeLocation,
            Self::ChangeHero { .. } => EventKind::ChangeHero,
            Self::SpellDealsDamage(..) => EventKind::SpellDealsDamage,
            Self::Attack(..) => EventKind::Attack,
            Self::HeroPower(_) => EventKind::HeroPower,
            Self::TargetSelectionStarts { .. } => EventKind::TargetSelectionStarts,
            Self::TargetSelected { .. } => EventKind::TargetSelected,
            Self::CardEvent(..) => EventKind::CardEvent,
            Self::Dummy => EventKind::Dummy,
            Self::Eval(_) => EventKind::Eval,
            Self::Input(_) => EventKind::Input,
        }
    }

    /// The card this event is primarily about, if any.
    #[must_use]
    pub fn card(&self) -> Option<EntityId> {
        match self {
            Self::PlayCard(c)
            | Self::PlayCardUnsafe(c)
            | Self::SummonCard(c)
            | Self::DestroyCard(c)
            | Self::DamageCard(c, _)
            | Self::SilenceCard(c)
            | Self::DiscardCard(c)
            | Self::CancelCard(c, _)
            | Self::TradeCard(c)
            | Self::ForgeCard(c)
            | Self::FreezeCard(c)
            | Self::CreateCard(c)
            | Self::RevealCard(c, _)
            | Self::BurnCard(c)
            | Self::AddCardToDeck(c)
            | Self::AddCardToHand(c)
            | Self::DrawCard(c)
            | Self::Titan(c, _)
            | Self::ChangeLocation(c, _)
            | Self::CardEvent(c, _) => Some(*c),
            Self::ChangeHero { new, .. } => Some(*new),
            Self::SpellDealsDamage(Target::Card(c), _) | Self::Attack(Target::Card(c), _) => {
                Some(*c)
            }
            Self::TargetSelectionStarts { host, .. } => *host,
            Self::TargetSelected { host, .. } => *host,
            _ => None,
        }
    }

    /// Every card referenced by the payload, in payload order.
    #[must_use]
    pub fn cards(&self) -> SmallVec<[EntityId; 2]> {
        let mut cards = SmallVec::new();

        match self {
            Self::SpellDealsDamage(target, _) => cards.extend(target.card()),
            Self::Attack(attacker, defender) => {
                cards.extend(attacker.card());
                cards.extend(defender.card());
            }
            Self::TargetSelected { host, target } => {
                cards.extend(*host);
                cards.extend(target.card());
            }
            Self::Titan(titan, ability) => cards.extend([*titan, *ability]),
            Self::ChangeHero { old, new } => {
                cards.extend(*old);
                cards.push(*new);
            }
            other => cards.extend(other.card()),
        }

        cards
    }

    /// One-line sentence for readable history.
    ///
    /// `actor` names the player who caused the event; `card` renders a card
    /// reference (and is where redaction happens).
    pub fn describe(&self, actor: &str, card: &mut dyn FnMut(EntityId) -> String) -> String {
        match self {
            Self::FatalDamage => format!("{actor} was dealt fatal damage"),
            Self::EndTurn(_) => format!("{actor} ended their turn"),
            Self::StartTurn(_) => format!("{actor} started their turn"),
            Self::HealthRestored(v) => format!("{actor} restored to {v} health"),
            Self::UnspentMana(v) => format!("{actor} ended their turn with {v} unspent mana"),
            Self::GainOverload(v) => format!("{actor} gained {v} overload"),
            Self::GainHeroAttack(v) => format!("{actor} gained {v} attack"),
            Self::TakeDamage(v) => format!("{actor} took {v} damage"),
            Self::PlayCard(c) => format!("{actor} played {}", card(*c)),
            Self::PlayCardUnsafe(c) => format!("{actor} is trying to play {}", card(*c)),
            Self::SummonCard(c) => format!("{actor} summoned {}", card(*c)),
            Self::DestroyCard(c) => format!("{} was destroyed", card(*c)),
            Self::DamageCard(c, amount) => format!("{} was dealt {amount} damage", card(*c)),
            Self::SilenceCard(c) => format!("{} was silenced", card(*c)),
            Self::DiscardCard(c) => format!("{} was discarded", card(*c)),
            Self::CancelCard(c, ability) => format!("{}'s {ability} was cancelled", card(*c)),
            Self::TradeCard(c) => format!("{} was traded", card(*c)),
            Self::ForgeCard(c) => format!("{} was forged", card(*c)),
            Self::FreezeCard(c) => format!("{} was frozen", card(*c)),
            Self::CreateCard(c) => format!("{} was created", card(*c)),
            Self::RevealCard(c, reason) => format!("{} was revealed due to {reason}", card(*c)),
            Self::BurnCard(c) => format!("{} was burned due to a lack of hand space", card(*c)),
            Self::AddCardToDeck(c) => format!("{} was added to {actor}'s deck", card(*c)),
            Self::AddCardToHand(c) => format!("{} was added to {actor}'s hand", card(*c)),
            Self::DrawCard(c) => format!("{actor} drew {}", card(*c)),
            Self::Titan(titan, ability) => {
                let titan = card(*titan);
                format!("{titan}'s titan ability ({}) was triggered", card(*ability))
            }
            Self::ChangeLocation(c, zone) => format!("{}'s location was changed to {zone}", card(*c)),
            Self::ChangeHero { new, .. } => format!("{actor}'s hero has become {}", card(*new)),
            Self::SpellDealsDamage(t, amount) => {
                format!("{} dealt {amount} damage", render_target(t, card))
            }
            Self::Attack(attacker, defender) => {
                let attacker = render_target(attacker, card);
                format!("{attacker} attacked {}", render_target(defender, card))
            }
            Self::HeroPower(_) => format!("{actor} used their hero power"),
            Self::TargetSelectionStarts { prompt, host } => {
                let host = host.map_or_else(|| "Game".to_string(), |h| card(h));
                format!("{actor} started selecting a target [Prompt: \"{prompt}\", Host: {host}]")
            }
            Self::TargetSelected { host, target: t } => {
                let host = host.map_or_else(|| "Game".to_string(), |h| card(h));
                format!("{actor} selected {} [Host: {host}]", render_target(t, card))
            }
            Self::CardEvent(c, what) => format!("{} said: {what}", card(*c)),
            Self::Dummy => "Dummy Event (Test)".to_string(),
            Self::Eval(code) => format!("{actor} eval'd: {code}"),
            Self::Input(input) => format!("{actor} typed: {input}"),
        }
    }
}

fn render_target(target: &Target, card: &mut dyn FnMut(EntityId) -> String) -> String {
    match target {
        Target::Player(p) => p.to_string(),
        Target::Card(c) => card(*c),
    }
}

/// Which events a listener wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KindFilter {
    /// Every event.
    Any,
    Kind(EventKind),
}

impl KindFilter {
    #[must_use]
    pub fn matches(self, kind: EventKind) -> bool {
        match self {
            Self::Any => true,
            Self::Kind(k) => k == kind,
        }
    }
}

impl From<EventKind> for KindFilter {
    fn from(kind: EventKind) -> Self {
        Self::Kind(kind)
    }
}
