//! Structured call logging.

use lacquer_core::{Behavior, CallCx, CallError, NextError, Value};

/// A behavior that logs every intercepted call via `tracing`.
///
/// Purely observational: results and errors pass through untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallLogger;

impl CallLogger {
    /// Create the behavior.
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for CallLogger {
    fn before_global(&self, cx: &CallCx<'_>) {
        tracing::debug!(
            method = %cx.method(),
            on = %cx.target().describe(),
            args = ?cx.args(),
            "invoking"
        );
    }

    fn after_global(&self, cx: &CallCx<'_>, result: &Value) {
        tracing::trace!(method = %cx.method(), ?result, "returned");
    }

    fn on_error_global(
        &self,
        cx: &CallCx<'_>,
        error: CallError,
        next: NextError<'_>,
    ) -> Result<Value, CallError> {
        tracing::warn!(method = %cx.method(), error = %error, "failed");
        next.run(cx, error)
    }
}
