// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the event bus

use thiserror::Error;

/// Error returned by a handler callback
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by bus operations
#[derive(Debug, Error)]
pub enum EventError {
    /// A handler failed; remaining handlers for that trigger were not run
    #[error("handler for '{event}' failed: {source}")]
    Handler {
        event: String,
        #[source]
        source: HandlerError,
    },
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
