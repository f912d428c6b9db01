//! Stale-reference recovery.
//!
//! A located sub-resource can go stale when the underlying structure
//! mutates. [`StaleRecovery`] transparently rediscovers it — once per
//! failing call — through the search context and locator recorded when the
//! sub-resource was first located, then re-runs the failed call. Callers'
//! existing references stay valid: only the entity's underlying handle is
//! swapped, in place.

use lacquer_core::{
    Anchor, Behavior, CallCx, CallError, Decorated, NextError, Semantics, Value, unwrap_handle,
};
use std::sync::Arc;

/// The stale-tolerance behavior.
///
/// Per-entity recovery state lives on the entities themselves (their
/// [`Anchor`]s), so one stateless layer serves the whole chain: every
/// anchored descendant rediscovers through its own context/locator pair.
/// Rediscovering a parent never repairs a stale grandchild.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaleRecovery;

impl StaleRecovery {
    /// Create the behavior.
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for StaleRecovery {
    fn on_wrap(&self, cx: &CallCx<'_>, child: &Arc<Decorated>) {
        // Only single-locates are rediscoverable: re-running a locate-many
        // would not say which of its results this child was.
        if cx.method().semantics() == Semantics::LocateOne {
            child.set_anchor(Anchor {
                context: cx.receiver().clone(),
                method: *cx.method(),
                args: cx.args().to_vec(),
            });
        }
    }

    fn on_error_global(
        &self,
        cx: &CallCx<'_>,
        error: CallError,
        next: NextError<'_>,
    ) -> Result<Value, CallError> {
        if !error.is_stale() {
            return next.run(cx, error);
        }
        let Some(anchor) = cx.entity().anchor() else {
            return next.run(cx, error);
        };

        match anchor.context.invoke(&anchor.method, &anchor.args) {
            Ok(found) => match found.into_resource() {
                Some(replacement) => {
                    cx.entity().swap_original(unwrap_handle(&replacement));
                    // One re-call, through the call chain only: a second
                    // failure of any kind propagates as-is.
                    cx.recall()
                }
                None => next.run(cx, error),
            },
            // The caller's problem is the staleness they observed, not the
            // rediscovery miss.
            Err(rediscovery) if rediscovery.is_not_found() => Err(error),
            Err(rediscovery) => Err(rediscovery),
        }
    }
}
