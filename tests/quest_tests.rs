//! Quest, sidequest and secret integration tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use hearth_events::cards::{Ability, CardBlueprint, CardId, CardRegistry, CardType};
use hearth_events::core::{EngineConfig, EntityId, Game, Notification, PlayerId};
use hearth_events::events::{Event, EventKind, ListenerMessage, QuestKind, QuestTemplate, Target};

const QUEST_CARD: CardId = CardId::new(1);
const REWARD: CardId = CardId::new(2);
const WISP: CardId = CardId::new(3);
const TRAP: CardId = CardId::new(4);
const OTHER_TRAP: CardId = CardId::new(5);

struct Fixture {
    game: Game,
    reward_casts: Rc<Cell<u32>>,
}

fn fixture() -> Fixture {
    let reward_casts = Rc::new(Cell::new(0));
    let counter = Rc::clone(&reward_casts);

    let registry = CardRegistry::new()
        .with(CardBlueprint::new(QUEST_CARD, "Raid the Sky Temple", CardType::Spell))
        .with(
            CardBlueprint::new(REWARD, "Ascendant Scroll", CardType::Spell).with_ability(
                Ability::Cast,
                move |_, _| {
                    counter.set(counter.get() + 1);
                    Ok(())
                },
            ),
        )
        .with(CardBlueprint::new(WISP, "Wisp", CardType::Minion).with_health(1))
        .with(CardBlueprint::new(TRAP, "Explosive Trap", CardType::Spell))
        .with(CardBlueprint::new(OTHER_TRAP, "Freezing Trap", CardType::Spell));

    Fixture {
        game: Game::new(registry),
        reward_casts,
    }
}

/// Counts every card played except the quest's own card.
fn play_counter(kind: QuestKind, card: EntityId, max: u32) -> QuestTemplate {
    QuestTemplate::new(kind, card, EventKind::PlayCard, max, |_, ctx| {
        Ok(if ctx.event.card() == Some(ctx.card) {
            ListenerMessage::Skip
        } else {
            ListenerMessage::Success
        })
    })
}

fn play(game: &mut Game, player: PlayerId) -> EntityId {
    let card = game.spawn_card(WISP, player).unwrap();
    game.broadcast(Event::PlayCard(card), Some(player)).unwrap();
    card
}

/// Three plays complete the quest and cast the follow-up exactly once.
#[test]
fn test_questline_chain() {
    let Fixture {
        mut game,
        reward_casts,
    } = fixture();
    let p1 = PlayerId::FIRST;

    let quest_card = game.spawn_card(QUEST_CARD, p1).unwrap();
    assert!(game
        .add_quest(play_counter(QuestKind::Quest, quest_card, 3).with_next(REWARD))
        .unwrap());

    // Playing the quest card itself does not count.
    game.broadcast(Event::PlayCard(quest_card), Some(p1)).unwrap();
    assert_eq!(game.player(p1).quests[0].progress.current(), 0);

    play(&mut game, p1);
    play(&mut game, p1);
    assert_eq!(game.player(p1).quests[0].progress.current(), 2);
    assert_eq!(reward_casts.get(), 0);

    play(&mut game, p1);
    assert!(game.player(p1).quests.is_empty());
    assert_eq!(reward_casts.get(), 1);

    // The reward was created for the owner.
    assert_eq!(game.events.history.count(EventKind::CreateCard), 1);
    let created = game.events.history.last().unwrap();
    assert_eq!(created.player, Some(p1));

    play(&mut game, p1);
    assert_eq!(reward_casts.get(), 1);
}

/// The opponent's plays do not advance a player's quest.
#[test]
fn test_quests_follow_the_causing_player() {
    let Fixture { mut game, .. } = fixture();

    let quest_card = game.spawn_card(QUEST_CARD, PlayerId::FIRST).unwrap();
    game.add_quest(play_counter(QuestKind::Quest, quest_card, 2))
        .unwrap();

    play(&mut game, PlayerId::SECOND);
    play(&mut game, PlayerId::SECOND);

    assert_eq!(game.player(PlayerId::FIRST).quests[0].progress.current(), 0);
}

/// Secrets trigger on the opponent's events and notify.
#[test]
fn test_secret_triggers_on_opponent() {
    let Fixture { mut game, .. } = fixture();
    let owner = PlayerId::SECOND;
    let attacker = PlayerId::FIRST;

    let trap = game.spawn_card(TRAP, owner).unwrap();
    let template = QuestTemplate::new(QuestKind::Secret, trap, EventKind::Attack, 1, |_, _| {
        Ok(ListenerMessage::Success)
    });
    assert!(game.add_quest(template).unwrap());

    let attack = Event::Attack(Target::Player(owner), Target::Player(attacker));

    // The owner's own attack does not spring it.
    game.broadcast(attack.clone(), Some(owner)).unwrap();
    assert_eq!(game.player(owner).secrets.len(), 1);
    assert!(game.notifications().is_empty());

    let attack = Event::Attack(Target::Player(attacker), Target::Player(owner));
    game.broadcast(attack, Some(attacker)).unwrap();

    assert!(game.player(owner).secrets.is_empty());
    assert_eq!(
        game.drain_notifications(),
        vec![Notification::SecretTriggered {
            owner,
            triggered_by: attacker,
            name: "Explosive Trap".into(),
        }]
    );
}

/// Sidequests complete without notifying.
#[test]
fn test_sidequest_completes() {
    let Fixture {
        mut game,
        reward_casts,
    } = fixture();

    let card = game.spawn_card(QUEST_CARD, PlayerId::FIRST).unwrap();
    game.add_quest(play_counter(QuestKind::Sidequest, card, 1).with_next(REWARD))
        .unwrap();

    play(&mut game, PlayerId::FIRST);

    assert!(game.player(PlayerId::FIRST).sidequests.is_empty());
    assert!(game.notifications().is_empty());
    assert_eq!(reward_casts.get(), 1);
}

/// Only one quest at a time; rejected cards go back to hand.
#[test]
fn test_quest_limit() {
    let Fixture { mut game, .. } = fixture();
    let p1 = PlayerId::FIRST;

    let first = game.spawn_card(QUEST_CARD, p1).unwrap();
    let second = game.spawn_card(QUEST_CARD, p1).unwrap();

    assert!(game.add_quest(play_counter(QuestKind::Quest, first, 3)).unwrap());
    assert!(!game.add_quest(play_counter(QuestKind::Quest, second, 3)).unwrap());

    assert_eq!(game.player(p1).quests.len(), 1);
    assert_eq!(game.player(p1).hand, vec![second]);
}

/// Secrets are unique by name and capped at three.
#[test]
fn test_secret_admission() {
    let Fixture { mut game, .. } = fixture();
    let p2 = PlayerId::SECOND;

    let secret = |card| {
        QuestTemplate::new(QuestKind::Secret, card, EventKind::Attack, 1, |_, _| {
            Ok(ListenerMessage::Success)
        })
    };

    let trap = game.spawn_card(TRAP, p2).unwrap();
    let duplicate = game.spawn_card(TRAP, p2).unwrap();
    let other = game.spawn_card(OTHER_TRAP, p2).unwrap();

    assert!(game.add_quest(secret(trap)).unwrap());
    assert!(!game.add_quest(secret(duplicate)).unwrap());
    assert!(game.add_quest(secret(other)).unwrap());
    assert_eq!(game.player(p2).hand, vec![duplicate]);

    let mut game = game.with_config(EngineConfig {
        max_secrets: 2,
        ..EngineConfig::default()
    });
    let third = game.spawn_card(QUEST_CARD, p2).unwrap();
    assert!(!game.add_quest(secret(third)).unwrap());
    assert_eq!(game.player(p2).secrets.len(), 2);
}

/// A quest pushed to its maximum completes on the next matching broadcast
/// without running its callback.
#[test]
fn test_manual_progress_finalizes_without_callback() {
    let Fixture {
        mut game,
        reward_casts,
    } = fixture();
    let p1 = PlayerId::FIRST;
    let calls = Rc::new(Cell::new(0));

    let card = game.spawn_card(QUEST_CARD, p1).unwrap();
    let counter = Rc::clone(&calls);
    let template = QuestTemplate::new(QuestKind::Quest, card, EventKind::PlayCard, 3, move |_, _| {
        counter.set(counter.get() + 1);
        Ok(ListenerMessage::Success)
    })
    .with_next(REWARD);
    game.add_quest(template).unwrap();

    assert_eq!(game.progress_quest(p1, "Raid the Sky Temple", 10), Some(3));
    assert_eq!(game.progress_quest(p1, "Missing", 1), None);
    assert_eq!(game.progress_quest(PlayerId::SECOND, "Raid the Sky Temple", 1), None);

    play(&mut game, p1);

    assert_eq!(calls.get(), 0);
    assert!(game.player(p1).quests.is_empty());
    assert_eq!(reward_casts.get(), 1);
}

/// Destroy removes the quest without completing it.
#[test]
fn test_destroy_skips_completion() {
    let Fixture {
        mut game,
        reward_casts,
    } = fixture();

    let card = game.spawn_card(QUEST_CARD, PlayerId::FIRST).unwrap();
    let template = QuestTemplate::new(QuestKind::Quest, card, EventKind::PlayCard, 1, |_, _| {
        Ok(ListenerMessage::Destroy)
    })
    .with_next(REWARD);
    game.add_quest(template).unwrap();

    play(&mut game, PlayerId::FIRST);

    assert!(game.player(PlayerId::FIRST).quests.is_empty());
    assert_eq!(reward_casts.get(), 0);
}

/// Reset sends progress back to zero; Skip leaves it alone.
#[test]
fn test_reset_and_skip() {
    let Fixture { mut game, .. } = fixture();
    let script: Rc<RefCell<VecDeque<ListenerMessage>>> = Rc::new(RefCell::new(
        [
            ListenerMessage::Success,
            ListenerMessage::Skip,
            ListenerMessage::Reset,
            ListenerMessage::Success,
        ]
        .into(),
    ));

    let card = game.spawn_card(QUEST_CARD, PlayerId::FIRST).unwrap();
    let messages = Rc::clone(&script);
    let template = QuestTemplate::new(QuestKind::Quest, card, EventKind::PlayCard, 3, move |_, _| {
        Ok(messages.borrow_mut().pop_front().unwrap_or_default())
    });
    game.add_quest(template).unwrap();

    let progress = |game: &Game| game.player(PlayerId::FIRST).quests[0].progress.current();

    play(&mut game, PlayerId::FIRST);
    assert_eq!(progress(&game), 1);
    play(&mut game, PlayerId::FIRST);
    assert_eq!(progress(&game), 1);
    play(&mut game, PlayerId::FIRST);
    assert_eq!(progress(&game), 0);
    play(&mut game, PlayerId::FIRST);
    assert_eq!(progress(&game), 1);
}

/// A follow-up quest started by the reward is live after the chain.
#[test]
fn test_multi_stage_questline() {
    let stage_two = CardId::new(10);
    let finale_casts = Rc::new(Cell::new(0));
    let counter = Rc::clone(&finale_casts);

    let registry = CardRegistry::new()
        .with(CardBlueprint::new(QUEST_CARD, "Stage One", CardType::Spell))
        .with(CardBlueprint::new(WISP, "Wisp", CardType::Minion))
        .with(
            CardBlueprint::new(stage_two, "Stage Two", CardType::Spell).with_ability(
                Ability::Cast,
                |game, ctx| {
                    let template =
                        QuestTemplate::new(QuestKind::Quest, ctx.card, EventKind::PlayCard, 1, |_, _| {
                            Ok(ListenerMessage::Success)
                        })
                        .with_next(REWARD);
                    game.add_quest(template)?;
                    Ok(())
                },
            ),
        )
        .with(
            CardBlueprint::new(REWARD, "Finale", CardType::Spell).with_ability(
                Ability::Cast,
                move |_, _| {
                    counter.set(counter.get() + 1);
                    Ok(())
                },
            ),
        );

    let mut game = Game::new(registry);
    let p1 = PlayerId::FIRST;
    let card = game.spawn_card(QUEST_CARD, p1).unwrap();
    game.add_quest(play_counter(QuestKind::Quest, card, 1).with_next(stage_two))
        .unwrap();

    play(&mut game, p1);
    assert_eq!(game.player(p1).quests.len(), 1);
    assert_eq!(game.player(p1).quests[0].name, "Stage Two");
    assert_eq!(finale_casts.get(), 0);

    play(&mut game, p1);
    assert!(game.player(p1).quests.is_empty());
    assert_eq!(finale_casts.get(), 1);
}
