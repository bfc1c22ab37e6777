// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler callbacks, invocation context and the event passed to handlers

use super::bus::{EventBus, WeakBus};
use crate::error::HandlerError;
use crate::id::CallbackId;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type HandlerFn = dyn Fn(&Event<'_>) -> Result<(), HandlerError> + Send + Sync;

/// A registered handler function.
///
/// Identity is fixed at construction and shared by clones, which is what
/// `off` compares against.
#[derive(Clone)]
pub struct Callback {
    id: CallbackId,
    /// The callback a run-once wrapper was built from
    origin: Option<CallbackId>,
    func: Arc<HandlerFn>,
}

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Event<'_>) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        Self::build(CallbackId::next(), None, f)
    }

    fn build<F>(id: CallbackId, origin: Option<CallbackId>, f: F) -> Self
    where
        F: Fn(&Event<'_>) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        Self {
            id,
            origin,
            func: Arc::new(f),
        }
    }

    /// Wrap `original` so it runs at most once.
    ///
    /// On first call the wrapper hands its own id to `offer` (which
    /// unsubscribes it) and then runs `original`. Later calls do nothing.
    pub(crate) fn once<O>(original: &Callback, offer: O) -> Self
    where
        O: Fn(CallbackId) + Send + Sync + 'static,
    {
        let id = CallbackId::next();
        let fired = AtomicBool::new(false);
        let inner = original.clone();
        Self::build(id, Some(original.id), move |event| {
            if fired.swap(true, Ordering::SeqCst) {
                return Ok(());
            }
            offer(id);
            inner.call(event)
        })
    }

    pub fn id(&self) -> CallbackId {
        self.id
    }

    pub fn origin(&self) -> Option<CallbackId> {
        self.origin
    }

    pub fn call(&self, event: &Event<'_>) -> Result<(), HandlerError> {
        (self.func)(event)
    }

    /// Whether `id` names this callback or the callback it wraps
    pub(crate) fn answers_to(&self, id: CallbackId) -> bool {
        self.id == id || self.origin == Some(id)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("id", &self.id)
            .field("origin", &self.origin)
            .finish()
    }
}

/// The receiver a handler is invoked with
#[derive(Clone)]
pub enum Context {
    /// A bus, held weakly
    Bus(WeakBus),
    /// Any shared value
    Value(Arc<dyn Any + Send + Sync>),
}

impl Context {
    pub fn bus(bus: &EventBus) -> Self {
        Context::Bus(bus.downgrade())
    }

    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Context::Value(Arc::new(value))
    }

    /// The bus this context refers to, if it is a bus and still alive
    pub fn as_bus(&self) -> Option<EventBus> {
        match self {
            Context::Bus(weak) => weak.upgrade(),
            Context::Value(_) => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Context::Value(value) => value.as_ref().downcast_ref::<T>(),
            Context::Bus(_) => None,
        }
    }
}

/// Contexts compare by identity, never by value
impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Context::Bus(a), Context::Bus(b)) => a.ptr_eq(b),
            (Context::Value(a), Context::Value(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

impl Eq for Context {}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Bus(weak) => f.debug_tuple("Bus").field(weak).finish(),
            Context::Value(value) => f
                .debug_tuple("Value")
                .field(&(Arc::as_ptr(value) as *const ()))
                .finish(),
        }
    }
}

/// What a handler receives when an event fires
#[derive(Clone, Copy, Debug)]
pub struct Event<'a> {
    name: &'a str,
    args: &'a [Value],
    context: &'a Context,
}

impl<'a> Event<'a> {
    pub fn new(name: &'a str, args: &'a [Value], context: &'a Context) -> Self {
        Self {
            name,
            args,
            context,
        }
    }

    /// The triggered event name
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Trigger arguments; wildcard handlers see the event name first
    pub fn args(&self) -> &'a [Value] {
        self.args
    }

    pub fn arg(&self, index: usize) -> Option<&'a Value> {
        self.args.get(index)
    }

    pub fn context(&self) -> &'a Context {
        self.context
    }

    /// The context as a bus
    pub fn bus(&self) -> Option<EventBus> {
        self.context.as_bus()
    }
}

#[cfg(test)]
#[path = "callback_tests.rs"]
mod tests;
