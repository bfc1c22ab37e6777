//! Wildcard specs
//!
//! `"all"` handlers observe every trigger with the event name first.

use crate::prelude::*;
use evbus_core::BusConfig;
use similar_asserts::assert_eq;

#[test]
fn wildcard_gets_event_name_prepended() {
    let calls = Calls::new();
    let bus = EventBus::new();
    bus.on("all", Some(&calls.handler("h")), None);

    bus.trigger("x", &[json!(1), json!(2)]).unwrap();
    assert_eq!(calls.take(), lines(&["h x \"x\",1,2"]));
}

#[test]
fn wildcard_fires_for_every_name() {
    let calls = Calls::new();
    let bus = EventBus::new();
    bus.on("all", Some(&calls.handler("h")), None);

    bus.trigger("open close", &[]).unwrap();
    bus.trigger("resize", &[]).unwrap();
    assert_eq!(
        calls.take(),
        lines(&["h open \"open\"", "h close \"close\"", "h resize \"resize\""])
    );
}

#[test]
fn wildcard_follows_exact_handlers() {
    let calls = Calls::new();
    let bus = EventBus::new();
    bus.on("all", Some(&calls.handler("all")), None)
        .on("x", Some(&calls.handler("x")), None);

    bus.trigger("x", &[]).unwrap();
    assert_eq!(calls.take(), lines(&["x x", "all x \"x\""]));
}

#[test]
fn wildcard_survives_self_unsubscribing_exact_handler() {
    let calls = Calls::new();
    let bus = EventBus::new();
    bus.once("x", Some(&calls.handler("once")), None)
        .on("all", Some(&calls.handler("all")), None);

    bus.trigger("x", &[]).unwrap();
    bus.trigger("x", &[]).unwrap();
    assert_eq!(calls.take(), lines(&["once x", "all x \"x\"", "all x \"x\""]));
}

#[test]
fn configured_wildcard_replaces_all() {
    let calls = Calls::new();
    let config = BusConfig::from_toml_str("wildcard = \"*\"").unwrap();
    let bus = EventBus::with_config(config);
    bus.on("*", Some(&calls.handler("star")), None)
        .on("all", Some(&calls.handler("all")), None);

    bus.trigger("x", &[]).unwrap();
    assert_eq!(calls.take(), lines(&["star x \"x\""]));
}
