//! # Topmost Coordinator Layer
//!
//! The [`Topmost`] is the root of one decoration chain: it owns the set of
//! capabilities the decoration intercepts and the stack of [`Behavior`]
//! layers every descendant's hooks dispatch through. One topmost is created
//! per wrapped resource and shared (via `Arc`) by every child entity, so
//! hook dispatch never walks a tree.
//!
//! # Call state machine
//!
//! [`Topmost::dispatch`] drives one intercepted call:
//!
//! 1. **Before** — every layer, outermost first.
//! 2. **Call** — the call chain; the terminal invokes the current original.
//! 3. **After** — on success: every layer, innermost first, with the raw
//!    result; then sub-resources in the result are adopted into the chain.
//! 4. **Error** — on failure: the error chain; the terminal re-raises. A
//!    result produced by a recovering layer is adopted like a successful
//!    one, but After hooks do not run for it.

use crate::behavior::{Behavior, CallCx, NextCall, NextError};
use crate::capability::{Capability, CapabilitySet};
use crate::decorated::Decorated;
use crate::error::CallError;
use crate::proxy::Proxy;
use crate::target::Handle;
use crate::value::Value;
use std::sync::Arc;

/// The coordinator of one decoration chain.
pub struct Topmost {
    intercepts: CapabilitySet,
    layers: Vec<Box<dyn Behavior>>,
}

impl Topmost {
    /// Create a coordinator owning the given capability set and behavior
    /// stack (outermost layer first). The capability set is closed over
    /// supertypes: intercepting a capability intercepts every method it
    /// inherits.
    pub fn new(intercepts: CapabilitySet, layers: Vec<Box<dyn Behavior>>) -> Arc<Self> {
        Arc::new(Self {
            intercepts: intercepts.close(),
            layers,
        })
    }

    /// Whether the decoration owns methods declared by this capability.
    pub fn owns(&self, capability: &Capability) -> bool {
        self.intercepts.contains(capability)
    }

    /// The intercepted capability set.
    pub fn intercepted(&self) -> &CapabilitySet {
        &self.intercepts
    }

    /// Run the Before hooks, outermost first.
    pub fn before(&self, cx: &CallCx<'_>) {
        for layer in &self.layers {
            layer.before_global(cx);
        }
    }

    /// Run the call chain only.
    pub fn call(&self, cx: &CallCx<'_>) -> Result<Value, CallError> {
        NextCall::new(&self.layers).run(cx)
    }

    /// Run the After hooks, innermost first.
    pub fn after(&self, cx: &CallCx<'_>, result: &Value) {
        for layer in self.layers.iter().rev() {
            layer.after_global(cx, result);
        }
    }

    /// Run the error chain.
    pub fn recover(&self, cx: &CallCx<'_>, error: CallError) -> Result<Value, CallError> {
        NextError::new(&self.layers).run(cx, error)
    }

    /// Drive one intercepted call through the full state machine.
    pub fn dispatch(&self, cx: &CallCx<'_>) -> Result<Value, CallError> {
        self.before(cx);
        match self.call(cx) {
            Ok(result) => {
                self.after(cx, &result);
                Ok(self.adopt(cx, result))
            }
            Err(error) => self
                .recover(cx, error)
                .map(|recovered| self.adopt(cx, recovered)),
        }
    }

    /// Wrap every sub-resource in a result into the decoration chain,
    /// firing `on_wrap` for each child created.
    fn adopt(&self, cx: &CallCx<'_>, value: Value) -> Value {
        match value {
            Value::Resource(handle) => Value::Resource(self.adopt_child(cx, handle)),
            Value::List(items) => {
                Value::List(items.into_iter().map(|item| self.adopt(cx, item)).collect())
            }
            other => other,
        }
    }

    fn adopt_child(&self, cx: &CallCx<'_>, handle: Handle) -> Handle {
        let child = Decorated::new(handle, cx.entity().topmost().clone());
        for layer in &self.layers {
            layer.on_wrap(cx, &child);
        }
        Proxy::activate(child)
    }
}
