//! Error types for Lacquer.
//!
//! This module provides the failure taxonomy of the interception engine
//! using `thiserror`:
//!
//! - [`CallError`] - every way an intercepted call can fail
//! - [`BoxError`] - boxed error type for pass-through failures
//!
//! Specializations intercept only the variants they are designed for;
//! everything else falls through to the terminal re-raise. There is no
//! global catch-all.

use std::time::Duration;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures surfaced by an intercepted call.
#[derive(Error, Debug)]
pub enum CallError {
    /// A previously obtained sub-resource handle no longer corresponds to a
    /// live underlying structure.
    #[error("stale resource handle: {0}")]
    Stale(String),

    /// A locate operation found nothing.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The target does not realize the capability declaring the method.
    #[error("target does not support `{method}`")]
    Unsupported {
        /// Name of the unsupported method.
        method: &'static str,
    },

    /// A wait was interrupted. Always fatal, never retried.
    #[error("interrupted while waiting")]
    Interrupted,

    /// A retry policy's time budget elapsed without an accepted attempt.
    #[error("time limit of {limit:?} exceeded")]
    LimitExceeded {
        /// The exhausted budget.
        limit: Duration,
        /// The last failure seen before the deadline.
        #[source]
        cause: Box<CallError>,
    },

    /// A result an acceptance predicate refused. Only ever surfaces as the
    /// cause of a [`CallError::LimitExceeded`].
    #[error("result not accepted: {0}")]
    Rejected(String),

    /// A pass-through failure; propagated unchanged.
    #[error(transparent)]
    Other(BoxError),
}

impl CallError {
    /// Wrap an arbitrary error as a pass-through failure.
    pub fn other(err: impl Into<BoxError>) -> Self {
        CallError::Other(err.into())
    }

    /// Whether this is a stale-reference failure.
    pub fn is_stale(&self) -> bool {
        matches!(self, CallError::Stale(_))
    }

    /// Whether this is (or wraps, through a limit-exceeded failure) a
    /// not-found failure.
    ///
    /// Seeing through [`CallError::LimitExceeded`] matters when a retry
    /// layer sits between a recovery layer and the resource: a rediscovery
    /// that times out waiting for a missing resource still classifies as
    /// not-found.
    pub fn is_not_found(&self) -> bool {
        match self {
            CallError::NotFound(_) => true,
            CallError::LimitExceeded { cause, .. } => cause.is_not_found(),
            _ => false,
        }
    }

    /// Whether this is an interruption.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, CallError::Interrupted)
    }
}

impl From<BoxError> for CallError {
    fn from(err: BoxError) -> Self {
        CallError::Other(err)
    }
}
