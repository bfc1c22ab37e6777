// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event-name arguments and their normalization
//!
//! Every registration, removal and dispatch call accepts an [`EventSpec`]:
//!   - Single name: `"change"`
//!   - Space-separated names: `"change blur"` behaves like two calls
//!   - Event map: `{"change": f1, "blur": f2}`, every entry using its own callback

use super::callback::Callback;

/// Ordered mapping from event name to callback
#[derive(Clone, Debug, Default)]
pub struct EventMap {
    entries: Vec<(String, Callback)>,
}

impl EventMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, callback: &Callback) -> Self {
        self.insert(name, callback.clone());
        self
    }

    /// Insert or replace the callback for `name`.
    ///
    /// A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, callback: Callback) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = callback,
            None => self.entries.push((name, callback)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Callback> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, cb)| cb)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Callback)> {
        self.entries.iter().map(|(n, cb)| (n.as_str(), cb))
    }
}

impl<N: Into<String>> FromIterator<(N, Callback)> for EventMap {
    fn from_iter<I: IntoIterator<Item = (N, Callback)>>(iter: I) -> Self {
        let mut map = EventMap::new();
        for (name, callback) in iter {
            map.insert(name, callback);
        }
        map
    }
}

/// The `name` argument of bus operations
#[derive(Clone, Debug)]
pub enum EventSpec {
    /// One name, or several separated by whitespace
    Names(String),
    /// Per-name callbacks; the callback argument of the call is ignored
    Map(EventMap),
}

impl From<&str> for EventSpec {
    fn from(names: &str) -> Self {
        EventSpec::Names(names.to_string())
    }
}

impl From<String> for EventSpec {
    fn from(names: String) -> Self {
        EventSpec::Names(names)
    }
}

impl From<&String> for EventSpec {
    fn from(names: &String) -> Self {
        EventSpec::Names(names.clone())
    }
}

impl From<EventMap> for EventSpec {
    fn from(map: EventMap) -> Self {
        EventSpec::Map(map)
    }
}

impl From<&EventMap> for EventSpec {
    fn from(map: &EventMap) -> Self {
        EventSpec::Map(map.clone())
    }
}

/// Apply `iteratee` once per individual `(name, callback)` pair of `spec`,
/// threading `acc` through each application in map/split order.
pub fn events_api<A, F>(acc: A, spec: &EventSpec, callback: Option<&Callback>, mut iteratee: F) -> A
where
    F: FnMut(A, &str, Option<&Callback>) -> A,
{
    match spec {
        EventSpec::Map(map) => map.iter().fold(acc, |acc, (names, cb)| {
            names_api(acc, names, Some(cb), &mut iteratee)
        }),
        EventSpec::Names(names) => names_api(acc, names, callback, &mut iteratee),
    }
}

fn names_api<A, F>(acc: A, names: &str, callback: Option<&Callback>, iteratee: &mut F) -> A
where
    F: FnMut(A, &str, Option<&Callback>) -> A,
{
    if names.contains(char::is_whitespace) {
        names
            .split_whitespace()
            .fold(acc, |acc, name| iteratee(acc, name, callback))
    } else {
        iteratee(acc, names, callback)
    }
}

/// Normalize `spec` into its ordered `(name, callback)` pairs
pub fn resolve(spec: &EventSpec, callback: Option<&Callback>) -> Vec<(String, Option<Callback>)> {
    events_api(Vec::new(), spec, callback, |mut pairs, name, cb| {
        pairs.push((name.to_string(), cb.cloned()));
        pairs
    })
}

#[cfg(test)]
#[path = "names_tests.rs"]
mod tests;
