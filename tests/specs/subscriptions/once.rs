//! One-shot subscription specs

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn once_fires_exactly_once() {
    let calls = Calls::new();
    let bus = EventBus::new();
    bus.once("x", Some(&calls.handler("h")), None);

    for _ in 0..5 {
        bus.trigger("x", &[]).unwrap();
    }
    assert_eq!(calls.take(), lines(&["h x"]));
}

#[test]
fn once_is_unregistered_right_after_first_invocation() {
    let bus = EventBus::new();
    let calls = Calls::new();
    let sink = calls.clone();
    bus.once(
        "x",
        Some(&Callback::new(move |event| {
            let remaining = event.bus().map_or(0, |bus| bus.handler_count("x"));
            sink.push(format!("remaining {}", remaining));
            Ok(())
        })),
        None,
    );

    bus.trigger("x", &[]).unwrap();
    assert_eq!(calls.take(), lines(&["remaining 0"]));
    assert!(bus.is_empty());
}

#[test]
fn once_on_wildcard_fires_once_even_when_wildcard_is_triggered() {
    let calls = Calls::new();
    let bus = EventBus::new();
    bus.once("all", Some(&calls.handler("h")), None);

    bus.trigger("all", &[]).unwrap();
    assert_eq!(calls.take(), lines(&["h all"]));
}

#[test]
fn once_removable_by_original_callback() {
    let calls = Calls::new();
    let bus = EventBus::new();
    let h = calls.handler("h");
    bus.once("x y", Some(&h), None);

    bus.off(None, Some(&h), None);
    bus.trigger("x y", &[]).unwrap();
    assert!(calls.take().is_empty());
}
