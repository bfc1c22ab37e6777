//! Registration specs

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn space_separated_names_equal_separate_registrations() {
    let calls = Calls::new();
    let combined = EventBus::new();
    let separate = EventBus::new();
    let h = calls.handler("h");
    combined.on("change blur", Some(&h), None);
    separate.on("change", Some(&h), None).on("blur", Some(&h), None);

    assert_eq!(combined.event_names(), separate.event_names());

    combined.trigger("change", &[]).unwrap();
    combined.trigger("blur", &[]).unwrap();
    let from_combined = calls.take();
    separate.trigger("change", &[]).unwrap();
    separate.trigger("blur", &[]).unwrap();
    assert_eq!(from_combined, calls.take());
    assert_eq!(from_combined, lines(&["h change", "h blur"]));
}

#[test]
fn event_map_binds_each_name_to_its_callback() {
    let calls = Calls::new();
    let bus = EventBus::new();
    let map = EventMap::new()
        .with("foo", &calls.handler("f1"))
        .with("bar", &calls.handler("f2"));
    bus.on(map, None, None);

    bus.trigger("foo", &[]).unwrap();
    assert_eq!(calls.take(), lines(&["f1 foo"]));
    bus.trigger("bar", &[]).unwrap();
    assert_eq!(calls.take(), lines(&["f2 bar"]));
}

#[test]
fn context_reaches_the_handler() {
    let bus = EventBus::new();
    let calls = Calls::new();
    let context = Context::value("sidebar".to_string());
    let sink = calls.clone();
    bus.on(
        "render",
        Some(&Callback::new(move |event| {
            let who = event.context().downcast_ref::<String>().cloned().unwrap_or_default();
            sink.push(who);
            Ok(())
        })),
        Some(&context),
    );

    bus.trigger("render", &[]).unwrap();
    assert_eq!(calls.take(), lines(&["sidebar"]));
}

#[test]
fn registration_chains() {
    let calls = Calls::new();
    let bus = EventBus::new();
    bus.on("a", Some(&calls.handler("1")), None)
        .once("a", Some(&calls.handler("2")), None)
        .on("b", Some(&calls.handler("3")), None)
        .trigger("a b", &[])
        .unwrap();

    assert_eq!(calls.take(), lines(&["1 a", "2 a", "3 b"]));
}
