// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inversion-of-control listening
//!
//! `a.listen_to(&b, ..)` registers handlers on `b` but lets `a` own the
//! bookkeeping, so `a.stop_listening(..)` can later detach them in bulk.

use super::bus::{once_map, EventBus};
use super::callback::{Callback, Context};
use super::listening::Listening;
use super::names::EventSpec;
use crate::id::{BusId, CallbackId};
use std::sync::Arc;
use tracing::debug;

impl EventBus {
    /// Register `callback` for `events` on `source`, invoked with this bus as
    /// its context and tracked by this bus.
    pub fn listen_to(
        &self,
        source: &EventBus,
        events: impl Into<EventSpec>,
        callback: Option<&Callback>,
    ) -> &Self {
        let source_id = source.id();
        let listening = {
            let mut state = self.lock();
            Arc::clone(
                state
                    .listening_to
                    .entry(source_id.clone())
                    .or_insert_with(|| Arc::new(Listening::new(self, source))),
            )
        };

        let added = source.internal_on(
            &events.into(),
            callback,
            Some(&Context::bus(self)),
            Some(&listening),
        );

        // Nothing was registered for a fresh record; don't keep it around
        if listening.count() == 0 {
            self.forget_listening_to(&listening);
        }
        debug!(
            listener_id = %listening.listener_id,
            source_id = %source_id,
            handlers = added,
            "listen_to"
        );
        self
    }

    /// Like [`listen_to`](Self::listen_to), but each handler stops listening
    /// before its first run.
    pub fn listen_to_once(
        &self,
        source: &EventBus,
        events: impl Into<EventSpec>,
        callback: Option<&Callback>,
    ) -> &Self {
        let listener = self.downgrade();
        let target = source.downgrade();
        let map = once_map(&events.into(), callback, move |name, id| {
            if let (Some(listener), Some(source)) = (listener.upgrade(), target.upgrade()) {
                listener.stop_listening_api(Some(&source), Some(&EventSpec::from(name)), Some(id));
            }
        });
        self.listen_to(source, map, None)
    }

    /// Detach handlers this bus registered through `listen_to`.
    ///
    /// Narrows to one `source`, to `events`, and to `callback` when given.
    /// With no arguments every outbound relationship is released.
    pub fn stop_listening(
        &self,
        source: Option<&EventBus>,
        events: Option<EventSpec>,
        callback: Option<&Callback>,
    ) -> &Self {
        self.stop_listening_api(source, events.as_ref(), callback.map(Callback::id));
        self
    }

    fn stop_listening_api(
        &self,
        source: Option<&EventBus>,
        spec: Option<&EventSpec>,
        callback: Option<CallbackId>,
    ) {
        let ids: Vec<BusId> = {
            let state = self.lock();
            if state.listening_to.is_empty() {
                return;
            }
            match source {
                Some(source) => source.peek_id().into_iter().collect(),
                None => state.listening_to.keys().cloned().collect(),
            }
        };

        let me = Context::bus(self);
        for id in ids {
            // Released by an earlier iteration, or never tracked
            let listening = self.lock().listening_to.get(&id).cloned();
            let Some(listening) = listening else {
                continue;
            };
            match listening.source.upgrade() {
                Some(source) => source.off_api(spec, callback, Some(&me)),
                None => {
                    debug!(source_id = %id, "stop_listening: source dropped");
                    self.forget_listening_to(&listening);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "listen_tests.rs"]
mod tests;
