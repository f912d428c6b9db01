//! # Behavior Layer
//!
//! The override surface of the interception engine. A [`Behavior`] is the
//! strategy object replacing the source system's inheritance-based hook
//! overrides: the topmost coordinator holds a stack of behaviors, and each
//! hook of the call state machine runs through that stack.
//!
//! # Hook protocol
//!
//! For every intercepted call: `before_global` runs exactly once, then
//! `call_global`, then exactly one of `after_global` (success) or
//! `on_error_global` (failure) — never both, never zero.
//!
//! `call_global` and `on_error_global` chain: each layer receives a `next`
//! continuation for the rest of the stack. The terminal of the call chain
//! invokes the method on the entity's current original; the terminal of the
//! error chain re-raises. A layer that does not recognize a failure must
//! delegate to `next` — swallowing unrecognized errors is a defect, not a
//! supported path.

use crate::decorated::Decorated;
use crate::error::CallError;
use crate::method::Method;
use crate::target::Handle;
use crate::value::Value;
use std::sync::Arc;

/// Per-call context handed to every hook.
pub struct CallCx<'a> {
    pub(crate) entity: &'a Arc<Decorated>,
    pub(crate) receiver: &'a Handle,
    pub(crate) method: &'a Method,
    pub(crate) args: &'a [Value],
}

impl<'a> CallCx<'a> {
    /// The decorated entity the call was issued on.
    pub fn entity(&self) -> &Arc<Decorated> {
        self.entity
    }

    /// The proxy the call arrived through.
    pub fn receiver(&self) -> &Handle {
        self.receiver
    }

    /// The invoked method.
    pub fn method(&self) -> &Method {
        self.method
    }

    /// The call arguments.
    pub fn args(&self) -> &[Value] {
        self.args
    }

    /// The entity's current underlying handle.
    pub fn target(&self) -> Handle {
        self.entity.original()
    }

    /// Attempt the method on the current original, once, bypassing the
    /// behavior stack.
    pub fn call_original(&self) -> Result<Value, CallError> {
        self.target().invoke(self.method, self.args)
    }

    /// Re-run the call chain from the top.
    ///
    /// Runs the Call step only — never the error chain — which is what
    /// bounds a recovering behavior to one internal re-call per failure.
    pub fn recall(&self) -> Result<Value, CallError> {
        self.entity.topmost().call(self)
    }
}

/// Continuation for the remainder of the call chain.
#[derive(Clone, Copy)]
pub struct NextCall<'a> {
    chain: &'a [Box<dyn Behavior>],
}

impl<'a> NextCall<'a> {
    pub(crate) fn new(chain: &'a [Box<dyn Behavior>]) -> Self {
        Self { chain }
    }

    /// Run the rest of the call chain; the terminal invokes the method on
    /// the entity's current original.
    pub fn run(&self, cx: &CallCx<'_>) -> Result<Value, CallError> {
        match self.chain.split_first() {
            Some((layer, rest)) => layer.call_global(cx, NextCall::new(rest)),
            None => cx.call_original(),
        }
    }
}

/// Continuation for the remainder of the error chain.
#[derive(Clone, Copy)]
pub struct NextError<'a> {
    chain: &'a [Box<dyn Behavior>],
}

impl<'a> NextError<'a> {
    pub(crate) fn new(chain: &'a [Box<dyn Behavior>]) -> Self {
        Self { chain }
    }

    /// Run the rest of the error chain; the terminal re-raises.
    pub fn run(&self, cx: &CallCx<'_>, error: CallError) -> Result<Value, CallError> {
        match self.chain.split_first() {
            Some((layer, rest)) => layer.on_error_global(cx, error, NextError::new(rest)),
            None => Err(error),
        }
    }
}

/// A cross-cutting concern layered onto a decoration chain.
///
/// All hooks default to pass-through, so a behavior overrides only the
/// steps it cares about.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Behavior`",
    label = "missing `Behavior` implementation",
    note = "Behaviors layer onto a decoration chain via `Decorator::layer`."
)]
pub trait Behavior: Send + Sync + 'static {
    /// Runs once before every intercepted call.
    fn before_global(&self, cx: &CallCx<'_>) {
        let _ = cx;
    }

    /// The Call step. Default: delegate to the rest of the chain.
    fn call_global(&self, cx: &CallCx<'_>, next: NextCall<'_>) -> Result<Value, CallError> {
        next.run(cx)
    }

    /// Runs once after a successful call, with the raw (unwrapped) result.
    fn after_global(&self, cx: &CallCx<'_>, result: &Value) {
        let _ = (cx, result);
    }

    /// The Error step. Default: delegate to the rest of the chain, whose
    /// terminal re-raises.
    fn on_error_global(
        &self,
        cx: &CallCx<'_>,
        error: CallError,
        next: NextError<'_>,
    ) -> Result<Value, CallError> {
        next.run(cx, error)
    }

    /// Runs once for every child entity created from a call's result,
    /// before the wrapped result reaches the caller.
    fn on_wrap(&self, cx: &CallCx<'_>, child: &Arc<Decorated>) {
        let _ = (cx, child);
    }
}
