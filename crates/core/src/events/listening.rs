// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bookkeeping for one bus listening to another
//!
//! A record is shared by three kinds of owner while alive:
//!   - the listener's outbound map, keyed by source id
//!   - the source's inbound map, keyed by listener id
//!   - every handler registered on the source through `listen_to`
//!
//! Buses are referenced weakly so neither side keeps the other alive.

use super::bus::{EventBus, WeakBus};
use crate::id::BusId;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
pub(crate) struct Listening {
    pub(crate) source: WeakBus,
    pub(crate) listener: WeakBus,
    pub(crate) source_id: BusId,
    pub(crate) listener_id: BusId,
    /// Live handler records referencing this record
    count: AtomicUsize,
}

impl Listening {
    pub(crate) fn new(listener: &EventBus, source: &EventBus) -> Self {
        Self {
            source: source.downgrade(),
            listener: listener.downgrade(),
            source_id: source.id(),
            listener_id: listener.id(),
            count: AtomicUsize::new(0),
        }
    }

    pub(crate) fn retain(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    /// Drop one handler reference; true when it was the last one
    pub(crate) fn release(&self) -> bool {
        self.count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            == Ok(1)
    }

    pub(crate) fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}
