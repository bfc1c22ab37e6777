// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bus configuration

use crate::error::EventError;
use serde::Deserialize;

/// Default wildcard event name
pub const WILDCARD: &str = "all";

/// Default prefix for bus identity tokens
pub const ID_PREFIX: &str = "l";

/// Configuration for an [`EventBus`](crate::EventBus)
///
/// ```toml
/// wildcard = "all"
/// id_prefix = "l"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusConfig {
    /// Pseudo-event whose handlers receive every triggered event
    pub wildcard: String,
    /// Prefix of identity tokens issued to buses built with this config
    pub id_prefix: String,
}

impl BusConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self, EventError> {
        let config: BusConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard = wildcard.into();
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Check the constraints deserialization cannot express
    pub fn validate(&self) -> Result<(), EventError> {
        if self.wildcard.is_empty() {
            return Err(EventError::InvalidConfig(
                "wildcard must not be empty".to_string(),
            ));
        }
        // A wildcard with whitespace would be split into several names on registration
        if self.wildcard.chars().any(char::is_whitespace) {
            return Err(EventError::InvalidConfig(format!(
                "wildcard must be a single event name, got '{}'",
                self.wildcard
            )));
        }
        if self.id_prefix.is_empty() {
            return Err(EventError::InvalidConfig(
                "id_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            wildcard: WILDCARD.to_string(),
            id_prefix: ID_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
