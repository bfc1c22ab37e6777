// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events system
//!
//! This module provides:
//! - `EventBus` - Register named-event handlers and trigger them synchronously
//! - `EventSpec` / `EventMap` - Single, space-separated and mapped event names
//! - `Callback` / `Context` / `Event` - What handlers are and what they receive
//! - Inversion-of-control listening (`listen_to`, `stop_listening`)

mod bus;
mod callback;
mod listen;
mod listening;
mod names;

pub use bus::{EventBus, WeakBus};
pub use callback::{Callback, Context, Event};
pub use names::{events_api, resolve, EventMap, EventSpec};
