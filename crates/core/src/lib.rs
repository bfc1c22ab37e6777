// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! evbus-core: in-process publish/subscribe event bus
//!
//! This crate provides:
//! - Named-event registration (`on`, `once`) and synchronous dispatch (`trigger`)
//! - Removal by name, callback or context (`off`)
//! - Inversion-of-control listening between buses (`listen_to`, `stop_listening`)
//! - A wildcard event (`"all"` by default) that observes every trigger

pub mod config;
pub mod error;
pub mod events;
pub mod id;

// Re-exports
pub use config::BusConfig;
pub use error::{EventError, HandlerError};
pub use events::{events_api, resolve, Callback, Context, Event, EventBus, EventMap, EventSpec, WeakBus};
pub use id::{BusId, CallbackId, IdGen, SequentialIdGen};
