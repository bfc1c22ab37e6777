// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus: registration, removal and dispatch of named-event handlers

use super::callback::{Callback, Context, Event};
use super::listening::Listening;
use super::names::{events_api, EventMap, EventSpec};
use crate::config::BusConfig;
use crate::error::EventError;
use crate::id::{BusId, CallbackId, IdGen, SequentialIdGen};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, Weak};
use tracing::{debug, trace, warn};

/// One registered handler
pub(super) struct HandlerRecord {
    pub(super) callback: Callback,
    /// Context given at registration, matched by `off`
    pub(super) context: Option<Context>,
    /// Context the handler is invoked with
    pub(super) ctx: Context,
    pub(super) listening: Option<Arc<Listening>>,
}

impl HandlerRecord {
    /// Whether this record is kept by an `off` with the given criteria
    fn survives(&self, callback: Option<CallbackId>, context: Option<&Context>) -> bool {
        callback.is_some_and(|id| !self.callback.answers_to(id))
            || context.is_some_and(|c| self.context.as_ref() != Some(c))
    }
}

#[derive(Default)]
pub(super) struct BusState {
    /// Event name to handlers in registration order; never holds an empty list
    pub(super) events: HashMap<String, Vec<Arc<HandlerRecord>>>,
    /// Inbound: buses listening to this one, keyed by listener id
    pub(super) listeners: HashMap<BusId, Arc<Listening>>,
    /// Outbound: buses this one listens to, keyed by source id
    pub(super) listening_to: HashMap<BusId, Arc<Listening>>,
}

pub(super) struct Shared {
    config: BusConfig,
    id: OnceLock<BusId>,
    state: Mutex<BusState>,
}

/// In-process publish/subscribe bus.
///
/// Clones share state. Handlers run synchronously on the triggering thread
/// and the internal lock is never held while a handler runs, so handlers may
/// subscribe, unsubscribe or trigger on any bus, this one included.
///
/// A handler that captures a strong clone of its own bus keeps that bus
/// alive; capture a [`WeakBus`] or use [`Event::bus`] instead.
#[derive(Clone)]
pub struct EventBus {
    shared: Arc<Shared>,
}

/// Non-owning handle to an [`EventBus`]
#[derive(Clone)]
pub struct WeakBus {
    shared: Weak<Shared>,
}

impl WeakBus {
    pub fn upgrade(&self) -> Option<EventBus> {
        self.shared.upgrade().map(|shared| EventBus { shared })
    }

    pub fn ptr_eq(&self, other: &WeakBus) -> bool {
        Weak::ptr_eq(&self.shared, &other.shared)
    }
}

impl fmt::Debug for WeakBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self
            .shared
            .upgrade()
            .and_then(|shared| shared.id.get().cloned());
        f.debug_struct("WeakBus").field("id", &id).finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    pub fn with_config(config: BusConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                id: OnceLock::new(),
                state: Mutex::new(BusState::default()),
            }),
        }
    }

    pub fn config(&self) -> &BusConfig {
        &self.shared.config
    }

    pub fn downgrade(&self) -> WeakBus {
        WeakBus {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Whether both handles refer to the same bus
    pub fn ptr_eq(&self, other: &EventBus) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Identity token, issued on first call
    pub fn id(&self) -> BusId {
        self.shared
            .id
            .get_or_init(|| BusId(SequentialIdGen::shared(&self.shared.config.id_prefix).next()))
            .clone()
    }

    /// Identity token, if one has been issued
    pub fn peek_id(&self) -> Option<BusId> {
        self.shared.id.get().cloned()
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, BusState> {
        self.shared.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Bind `callback` to every name in `events`.
    ///
    /// Absent callbacks register nothing. Without an explicit `context` the
    /// handler is invoked with this bus as its context. For a map, each entry
    /// uses its own callback and `callback` is ignored.
    pub fn on(
        &self,
        events: impl Into<EventSpec>,
        callback: Option<&Callback>,
        context: Option<&Context>,
    ) -> &Self {
        self.internal_on(&events.into(), callback, context, None);
        self
    }

    /// Like [`on`](Self::on), but each handler removes itself before its
    /// first run.
    pub fn once(
        &self,
        events: impl Into<EventSpec>,
        callback: Option<&Callback>,
        context: Option<&Context>,
    ) -> &Self {
        let bus = self.downgrade();
        let map = once_map(&events.into(), callback, move |name, id| {
            if let Some(bus) = bus.upgrade() {
                bus.off_api(Some(&EventSpec::from(name)), Some(id), None);
            }
        });
        self.on(map, None, context)
    }

    /// Remove handlers.
    ///
    /// `events` of `None` targets every name. A callback matches handlers
    /// registered with it, including `once` wrappers built from it. A context
    /// matches handlers registered with that explicit context. With no
    /// arguments at all every handler and every inbound listening
    /// relationship is dropped.
    pub fn off(
        &self,
        events: Option<EventSpec>,
        callback: Option<&Callback>,
        context: Option<&Context>,
    ) -> &Self {
        self.off_api(events.as_ref(), callback.map(Callback::id), context);
        self
    }

    /// Fire `events` (one name or several, whitespace separated) with `args`.
    ///
    /// Handlers run in registration order over the handler lists as they were
    /// when each name began dispatching. Wildcard handlers run after the
    /// exact-name handlers and receive the event name as their first argument.
    /// The first handler error stops dispatch and is returned.
    pub fn trigger(&self, events: &str, args: &[Value]) -> Result<&Self, EventError> {
        let empty = self.lock().events.is_empty();
        if empty {
            return Ok(self);
        }
        events_api(Ok(()), &EventSpec::from(events), None, |result, name, _| {
            result.and_then(|()| self.trigger_api(name, args))
        })?;
        Ok(self)
    }

    pub fn has_handlers(&self, name: &str) -> bool {
        self.lock().events.contains_key(name)
    }

    pub fn handler_count(&self, name: &str) -> usize {
        self.lock().events.get(name).map_or(0, Vec::len)
    }

    /// Registered event names, sorted
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().events.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.lock().events.is_empty()
    }

    /// Number of buses listening to this one
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Number of buses this one listens to
    pub fn listening_to_count(&self) -> usize {
        self.lock().listening_to.len()
    }

    pub fn is_listening_to(&self, source: &EventBus) -> bool {
        match source.peek_id() {
            Some(id) => self.lock().listening_to.contains_key(&id),
            None => false,
        }
    }

    /// Live handlers this bus has registered on `source` via `listen_to`
    pub fn listening_count(&self, source: &EventBus) -> usize {
        let Some(id) = source.peek_id() else {
            return 0;
        };
        self.lock()
            .listening_to
            .get(&id)
            .map_or(0, |listening| listening.count())
    }

    /// Shared registration path of `on` and `listen_to`; returns handlers added
    pub(super) fn internal_on(
        &self,
        spec: &EventSpec,
        callback: Option<&Callback>,
        context: Option<&Context>,
        listening: Option<&Arc<Listening>>,
    ) -> usize {
        let own = Context::bus(self);
        let mut state = self.lock();
        let added = events_api(0, spec, callback, |added, name, cb| {
            let Some(cb) = cb else {
                return added;
            };
            if let Some(listening) = listening {
                listening.retain();
            }
            state
                .events
                .entry(name.to_string())
                .or_default()
                .push(Arc::new(HandlerRecord {
                    callback: cb.clone(),
                    context: context.cloned(),
                    ctx: context.cloned().unwrap_or_else(|| own.clone()),
                    listening: listening.cloned(),
                }));
            trace!(event = name, callback = %cb.id(), "handler registered");
            added + 1
        });
        if let Some(listening) = listening {
            if listening.count() > 0 {
                state
                    .listeners
                    .insert(listening.listener_id.clone(), Arc::clone(listening));
            }
        }
        debug!(bus_id = ?self.peek_id(), handlers = added, "on");
        added
    }

    pub(super) fn off_api(
        &self,
        spec: Option<&EventSpec>,
        callback: Option<CallbackId>,
        context: Option<&Context>,
    ) {
        let detached = {
            let mut state = self.lock();
            if state.events.is_empty() {
                return;
            }

            if spec.is_none() && callback.is_none() && context.is_none() {
                state.events.clear();
                let detached: Vec<_> = state.listeners.drain().map(|(_, l)| l).collect();
                debug!(bus_id = ?self.peek_id(), listeners = detached.len(), "off: reset");
                detached
            } else {
                let targets: Vec<(String, Option<CallbackId>)> = match spec {
                    Some(spec) => events_api(Vec::new(), spec, None, |mut targets, name, cb| {
                        targets.push((name.to_string(), cb.map(Callback::id).or(callback)));
                        targets
                    }),
                    None => state.events.keys().map(|n| (n.clone(), callback)).collect(),
                };

                let mut detached = Vec::new();
                for (name, callback) in targets {
                    let Some(handlers) = state.events.remove(&name) else {
                        continue;
                    };
                    let before = handlers.len();
                    let mut remaining = Vec::with_capacity(before);
                    for handler in handlers {
                        if handler.survives(callback, context) {
                            remaining.push(handler);
                            continue;
                        }
                        if let Some(listening) = &handler.listening {
                            if listening.release() {
                                let tracked = state
                                    .listeners
                                    .get(&listening.listener_id)
                                    .is_some_and(|l| Arc::ptr_eq(l, listening));
                                if tracked {
                                    state.listeners.remove(&listening.listener_id);
                                }
                                detached.push(Arc::clone(listening));
                            }
                        }
                    }
                    debug!(
                        bus_id = ?self.peek_id(),
                        event = %name,
                        removed = before - remaining.len(),
                        "off"
                    );
                    if !remaining.is_empty() {
                        state.events.insert(name, remaining);
                    }
                }
                detached
            }
        };

        for listening in detached {
            if let Some(listener) = listening.listener.upgrade() {
                listener.forget_listening_to(&listening);
            }
        }
    }

    /// Drop `listening` from the outbound map if it is still the tracked record
    pub(super) fn forget_listening_to(&self, listening: &Arc<Listening>) {
        let mut state = self.lock();
        let tracked = state
            .listening_to
            .get(&listening.source_id)
            .is_some_and(|l| Arc::ptr_eq(l, listening));
        if tracked {
            state.listening_to.remove(&listening.source_id);
            debug!(
                source_id = %listening.source_id,
                listener_id = %listening.listener_id,
                "listening released"
            );
        }
    }

    fn trigger_api(&self, name: &str, args: &[Value]) -> Result<(), EventError> {
        let (handlers, wildcard) = {
            let state = self.lock();
            (
                state.events.get(name).cloned(),
                state.events.get(&self.shared.config.wildcard).cloned(),
            )
        };
        trace!(
            bus_id = ?self.peek_id(),
            event = name,
            handlers = handlers.as_ref().map_or(0, Vec::len),
            wildcard = wildcard.as_ref().map_or(0, Vec::len),
            "trigger"
        );

        if let Some(handlers) = handlers {
            dispatch(name, &handlers, args)?;
        }
        if let Some(wildcard) = wildcard {
            let mut all_args = Vec::with_capacity(args.len() + 1);
            all_args.push(Value::String(name.to_string()));
            all_args.extend_from_slice(args);
            dispatch(name, &wildcard, &all_args)?;
        }
        Ok(())
    }
}

fn dispatch(name: &str, handlers: &[Arc<HandlerRecord>], args: &[Value]) -> Result<(), EventError> {
    for handler in handlers {
        let event = Event::new(name, args, &handler.ctx);
        if let Err(source) = handler.callback.call(&event) {
            warn!(
                event = name,
                callback = %handler.callback.id(),
                error = %source,
                "handler failed, dispatch aborted"
            );
            return Err(EventError::Handler {
                event: name.to_string(),
                source,
            });
        }
    }
    Ok(())
}

/// Build an event map of run-once wrappers; `offer` unsubscribes a wrapper
/// given its event name and id.
pub(super) fn once_map<O>(spec: &EventSpec, callback: Option<&Callback>, offer: O) -> EventMap
where
    O: Fn(&str, CallbackId) + Clone + Send + Sync + 'static,
{
    events_api(EventMap::new(), spec, callback, |mut map, name, cb| {
        if let Some(cb) = cb {
            let offer = offer.clone();
            let event = name.to_string();
            map.insert(name, Callback::once(cb, move |id| offer(&event, id)));
        }
        map
    })
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("EventBus")
            .field("id", &self.peek_id())
            .field("events", &state.events.len())
            .field("listeners", &state.listeners.len())
            .field("listening_to", &state.listening_to.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
