use super::*;
use crate::foundation::core::Direction;
use std::cell::RefCell;
use std::rc::Rc;

fn event(kind: EventKind) -> AnimationEvent {
    AnimationEvent::now(kind, Direction::Forward, 0.5, false)
}

#[test]
fn listeners_receive_events_in_emission_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut bus = EventBus::default();

    let a = seen.clone();
    bus.subscribe(move |e| a.borrow_mut().push(("a", e.kind)));
    let b = seen.clone();
    bus.subscribe(move |e| b.borrow_mut().push(("b", e.kind)));

    bus.dispatch(&event(EventKind::Played));
    bus.dispatch(&event(EventKind::Paused));

    assert_eq!(
        *seen.borrow(),
        vec![
            ("a", EventKind::Played),
            ("b", EventKind::Played),
            ("a", EventKind::Paused),
            ("b", EventKind::Paused),
        ]
    );
}

#[test]
fn unsubscribe_stops_delivery() {
    let seen = Rc::new(RefCell::new(0u32));
    let mut bus = EventBus::default();

    let counter = seen.clone();
    let id = bus.subscribe(move |_| *counter.borrow_mut() += 1);

    bus.dispatch(&event(EventKind::Changed));
    assert!(bus.unsubscribe(id));
    bus.dispatch(&event(EventKind::Changed));

    assert_eq!(*seen.borrow(), 1);
    assert!(!bus.unsubscribe(id));
}

#[test]
fn snapshots_carry_the_timeline_state() {
    let e = AnimationEvent::now(EventKind::Completed, Direction::Reverse, 0.0, true);
    assert_eq!(e.kind, EventKind::Completed);
    assert_eq!(e.direction, Direction::Reverse);
    assert_eq!(e.progress, 0.0);
    assert!(e.is_complete);
    assert!(e.timestamp_ms > 0);
}
