//! Inversion-of-control listening specs

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn stop_listening_to_one_source_leaves_no_residue() {
    let calls = Calls::new();
    let a = EventBus::new();
    let b = EventBus::new();
    a.listen_to(&b, "evt", Some(&calls.handler("cb")));

    a.stop_listening(Some(&b), None, None);
    b.trigger("evt", &[]).unwrap();

    assert!(calls.take().is_empty());
    assert!(b.is_empty());
    assert_eq!(b.listener_count(), 0);
    assert_eq!(a.listening_to_count(), 0);
}

#[test]
fn stop_listening_without_arguments_clears_all_tracking() {
    let calls = Calls::new();
    let a = EventBus::new();
    let b = EventBus::new();
    a.listen_to(&b, "evt", Some(&calls.handler("cb1")))
        .listen_to(&b, "evt2", Some(&calls.handler("cb2")));

    b.trigger("evt evt2", &[]).unwrap();
    assert_eq!(calls.take(), lines(&["cb1 evt", "cb2 evt2"]));

    a.stop_listening(None, None, None);
    b.trigger("evt evt2", &[]).unwrap();
    assert!(calls.take().is_empty());
    assert_eq!(a.listening_to_count(), 0);
    assert_eq!(b.listener_count(), 0);
}

#[test]
fn listen_to_once_detaches_after_first_event() {
    let calls = Calls::new();
    let a = EventBus::new();
    let b = EventBus::new();
    a.listen_to_once(&b, "ready", Some(&calls.handler("boot")));

    b.trigger("ready", &[json!("v1")]).unwrap();
    b.trigger("ready", &[json!("v2")]).unwrap();

    assert_eq!(calls.take(), lines(&["boot ready \"v1\""]));
    assert!(!a.is_listening_to(&b));
    assert_eq!(b.listener_count(), 0);
}

#[test]
fn source_reset_releases_the_listener() {
    let calls = Calls::new();
    let a = EventBus::new();
    let b = EventBus::new();
    a.listen_to(&b, "evt", Some(&calls.handler("cb")));

    b.off(None, None, None);
    assert!(!a.is_listening_to(&b));
    assert_eq!(a.listening_to_count(), 0);
}

#[test]
fn listener_survives_a_dropped_source() {
    let calls = Calls::new();
    let a = EventBus::new();
    let c = EventBus::new();
    {
        let b = EventBus::new();
        a.listen_to(&b, "evt", Some(&calls.handler("b")));
    }
    a.listen_to(&c, "evt", Some(&calls.handler("c")));

    a.stop_listening(None, None, None);
    c.trigger("evt", &[]).unwrap();
    assert!(calls.take().is_empty());
    assert_eq!(a.listening_to_count(), 0);
    assert_eq!(c.listener_count(), 0);
}
