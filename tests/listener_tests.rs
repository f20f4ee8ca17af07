//! Listener lifecycle integration tests.

use std::cell::Cell;
use std::rc::Rc;

use hearth_events::cards::CardRegistry;
use hearth_events::core::{Game, PlayerId};
use hearth_events::events::{Event, EventKind, KindFilter, Lifespan, ListenerHandle, ListenerMessage};

fn play(game: &mut Game) -> bool {
    game.broadcast(Event::TakeDamage(1), Some(PlayerId::FIRST))
        .unwrap()
}

fn counting_listener(
    game: &mut Game,
    filter: impl Into<KindFilter>,
    lifespan: Lifespan,
    message: ListenerMessage,
) -> (ListenerHandle, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let handle = game.add_listener(filter, lifespan, move |_, _, _| {
        counter.set(counter.get() + 1);
        Ok(message)
    });
    (handle, calls)
}

/// A listener with lifespan 3 fires three times, then is gone.
#[test]
fn test_lifespan_three() {
    let mut game = Game::new(CardRegistry::new());
    let (handle, calls) = counting_listener(
        &mut game,
        EventKind::TakeDamage,
        Lifespan::Times(3),
        ListenerMessage::Success,
    );

    for expected in 1..=3 {
        play(&mut game);
        assert_eq!(calls.get(), expected);
    }
    assert!(!game.events.listeners.contains(handle.id()));

    play(&mut game);
    assert_eq!(calls.get(), 3);
    assert!(!handle.destroy(&mut game));
}

/// Skipped firings never count against the lifespan.
#[test]
fn test_skip_is_free() {
    let mut game = Game::new(CardRegistry::new());
    let (handle, calls) = counting_listener(
        &mut game,
        KindFilter::Any,
        Lifespan::Times(1),
        ListenerMessage::Skip,
    );

    for _ in 0..10 {
        play(&mut game);
    }

    assert_eq!(calls.get(), 10);
    assert_eq!(game.events.listeners.times_fired(handle.id()), Some(0));
}

/// Reset gives the listener a fresh lifespan.
#[test]
fn test_reset_restarts_lifespan() {
    let mut game = Game::new(CardRegistry::new());
    let calls = Rc::new(Cell::new(0));

    let counter = Rc::clone(&calls);
    let handle = game.add_listener(KindFilter::Any, Lifespan::Times(2), move |_, _, _| {
        counter.set(counter.get() + 1);
        // Success, Reset, Success, Success
        Ok(if counter.get() == 2 {
            ListenerMessage::Reset
        } else {
            ListenerMessage::Success
        })
    });

    play(&mut game);
    play(&mut game);
    assert_eq!(game.events.listeners.times_fired(handle.id()), Some(0));

    play(&mut game);
    assert!(game.events.listeners.contains(handle.id()));
    play(&mut game);
    assert!(!game.events.listeners.contains(handle.id()));
    assert_eq!(calls.get(), 4);
}

/// Destroy removes an unbounded listener.
#[test]
fn test_destroy_message() {
    let mut game = Game::new(CardRegistry::new());
    let (handle, calls) = counting_listener(
        &mut game,
        KindFilter::Any,
        Lifespan::Unbounded,
        ListenerMessage::Destroy,
    );

    play(&mut game);
    play(&mut game);

    assert_eq!(calls.get(), 1);
    assert!(!handle.destroy(&mut game));
}

/// Only the first destroy through the handle succeeds.
#[test]
fn test_destroy_handle_is_idempotent() {
    let mut game = Game::new(CardRegistry::new());
    let (handle, calls) = counting_listener(
        &mut game,
        KindFilter::Any,
        Lifespan::Unbounded,
        ListenerMessage::Success,
    );

    assert!(handle.destroy(&mut game));
    assert!(!handle.destroy(&mut game));
    assert!(!game.destroy_listener(handle));

    play(&mut game);
    assert_eq!(calls.get(), 0);
}

/// Listeners only see the kind they asked for.
#[test]
fn test_kind_filter() {
    let mut game = Game::new(CardRegistry::new());
    let (_, damage) = counting_listener(
        &mut game,
        EventKind::TakeDamage,
        Lifespan::Unbounded,
        ListenerMessage::Success,
    );
    let (_, any) = counting_listener(
        &mut game,
        KindFilter::Any,
        Lifespan::Unbounded,
        ListenerMessage::Success,
    );

    play(&mut game);
    game.broadcast(Event::GainOverload(2), Some(PlayerId::SECOND))
        .unwrap();

    assert_eq!(damage.get(), 1);
    assert_eq!(any.get(), 2);
}

/// A listener registered mid-dispatch waits for the next broadcast.
#[test]
fn test_listener_added_during_dispatch() {
    let mut game = Game::new(CardRegistry::new());
    let inner_calls = Rc::new(Cell::new(0));

    let counter = Rc::clone(&inner_calls);
    game.add_listener(KindFilter::Any, Lifespan::Times(1), move |game, _, _| {
        let counter = Rc::clone(&counter);
        game.add_listener(KindFilter::Any, Lifespan::Unbounded, move |_, _, _| {
            counter.set(counter.get() + 1);
            Ok(ListenerMessage::Success)
        });
        Ok(ListenerMessage::Success)
    });

    play(&mut game);
    assert_eq!(inner_calls.get(), 0);
    assert_eq!(game.events.listeners.len(), 1);

    play(&mut game);
    assert_eq!(inner_calls.get(), 1);
}

/// A listener destroyed by an earlier one in the same dispatch never runs.
#[test]
fn test_listener_destroyed_during_dispatch() {
    let mut game = Game::new(CardRegistry::new());
    let victim: Rc<Cell<Option<ListenerHandle>>> = Rc::default();

    let target = Rc::clone(&victim);
    let killer = game.add_listener(KindFilter::Any, Lifespan::Unbounded, move |game, _, _| {
        if let Some(handle) = target.take() {
            assert!(handle.destroy(game));
        }
        Ok(ListenerMessage::Success)
    });

    let (handle, calls) = counting_listener(
        &mut game,
        KindFilter::Any,
        Lifespan::Unbounded,
        ListenerMessage::Success,
    );
    victim.set(Some(handle));

    play(&mut game);

    assert_eq!(calls.get(), 0);
    assert_eq!(game.events.listeners.snapshot(), vec![killer.id()]);
}

/// A listener that destroys itself and then reports success is not
/// double-removed.
#[test]
fn test_self_destroy_then_success() {
    let mut game = Game::new(CardRegistry::new());
    let own: Rc<Cell<Option<ListenerHandle>>> = Rc::default();

    let me = Rc::clone(&own);
    let handle = game.add_listener(KindFilter::Any, Lifespan::Times(5), move |game, _, _| {
        if let Some(handle) = me.get() {
            handle.destroy(game);
        }
        Ok(ListenerMessage::Success)
    });
    own.set(Some(handle));

    assert!(play(&mut game));
    assert!(game.events.listeners.is_empty());
}

/// Ids keep growing across destruction.
#[test]
fn test_ids_are_not_reused() {
    let mut game = Game::new(CardRegistry::new());
    let (first, _) = counting_listener(
        &mut game,
        KindFilter::Any,
        Lifespan::Unbounded,
        ListenerMessage::Success,
    );
    first.destroy(&mut game);

    let (second, _) = counting_listener(
        &mut game,
        KindFilter::Any,
        Lifespan::Unbounded,
        ListenerMessage::Success,
    );

    assert!(second.id() > first.id());
    assert!(!first.destroy(&mut game));
    assert!(game.events.listeners.contains(second.id()));
}

/// A one-shot listener that re-broadcasts its own kind runs exactly once.
#[test]
fn test_one_shot_listener_not_reentered() {
    let mut game = Game::new(CardRegistry::new());
    let calls = Rc::new(Cell::new(0));

    let counter = Rc::clone(&calls);
    let handle = game.add_listener(EventKind::TakeDamage, Lifespan::Times(1), move |game, _, player| {
        counter.set(counter.get() + 1);
        game.broadcast(Event::TakeDamage(1), Some(player))?;
        Ok(ListenerMessage::Success)
    });

    assert!(play(&mut game));
    assert_eq!(calls.get(), 1);
    assert!(!game.events.listeners.contains(handle.id()));
    assert_eq!(game.events.history.len(), 2);
}

/// Nested firings never push a listener past its lifespan.
#[test]
fn test_nested_firings_respect_lifespan() {
    let mut game = Game::new(CardRegistry::new());
    let calls = Rc::new(Cell::new(0));

    let counter = Rc::clone(&calls);
    game.add_listener(EventKind::TakeDamage, Lifespan::Times(3), move |game, _, player| {
        counter.set(counter.get() + 1);
        game.broadcast(Event::TakeDamage(1), Some(player))?;
        Ok(ListenerMessage::Success)
    });

    play(&mut game);
    assert_eq!(calls.get(), 3);
    assert!(game.events.listeners.is_empty());
    assert_eq!(game.events.depth(), 0);
}

/// A callback error gives the reserved firing back.
#[test]
fn test_failed_callback_releases_reservation() {
    use hearth_events::EngineError;

    let mut game = Game::new(CardRegistry::new());
    let fail = Rc::new(Cell::new(true));

    let failing = Rc::clone(&fail);
    let handle = game.add_listener(KindFilter::Any, Lifespan::Times(1), move |_, _, _| {
        if failing.replace(false) {
            return Err(EngineError::RecursionLimit { depth: 0 });
        }
        Ok(ListenerMessage::Success)
    });

    assert!(game.broadcast(Event::TakeDamage(1), Some(PlayerId::FIRST)).is_err());
    assert_eq!(game.events.listeners.times_fired(handle.id()), Some(0));

    assert!(play(&mut game));
    assert!(!game.events.listeners.contains(handle.id()));
}
