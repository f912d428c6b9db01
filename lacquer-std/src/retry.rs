//! Timed retry — the implicit-wait behavior.
//!
//! Re-attempts a fallible operation until it succeeds or a time budget
//! elapses, masking failures that are expected to resolve as asynchronous
//! state converges. The retry loop blocks the calling thread between
//! attempts; there is no non-blocking variant.
//!
//! [`TimedRetry`] overrides the Call step directly: it substitutes its own
//! retrying attempt loop around the original, deliberately bypassing the
//! generic error chain for each individual attempt.

use lacquer_core::{Behavior, CallCx, CallError, NextCall, Semantics, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default total time budget.
pub const DEFAULT_LIMIT: Duration = Duration::from_millis(10_000);

/// Default sleep between attempts.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

type ErrorPredicate = Arc<dyn Fn(&CallError) -> bool + Send + Sync>;
type ResultPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A source of time and sleep.
///
/// Injected so retry loops are testable without wall-clock waits. A sleep
/// that is interrupted must report [`CallError::Interrupted`]; the retry
/// loop treats it as fatal.
pub trait Clock: Send + Sync + 'static {
    /// The current instant.
    fn now(&self) -> Instant;

    /// Block for the given duration.
    fn sleep(&self, duration: Duration) -> Result<(), CallError>;
}

/// The wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> Result<(), CallError> {
        std::thread::sleep(duration);
        Ok(())
    }
}

/// A time-budgeted retry loop.
///
/// An attempt is repeated while it raises an ignored failure or returns a
/// rejected result. Any other failure returns immediately; interruption is
/// always fatal. When the budget elapses, the last remembered failure is
/// surfaced wrapped in [`CallError::LimitExceeded`].
pub struct Trier {
    limit: Duration,
    interval: Duration,
    clock: Arc<dyn Clock>,
    ignored: ErrorPredicate,
    rejected: ResultPredicate,
}

impl Trier {
    /// A trier with the given budget and interval, ignoring not-found
    /// failures and accepting every result.
    pub fn new(limit: Duration, interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            limit,
            interval,
            clock,
            ignored: Arc::new(CallError::is_not_found),
            rejected: Arc::new(|_| false),
        }
    }

    /// Replace the ignored-failure predicate.
    pub fn ignoring(mut self, ignored: impl Fn(&CallError) -> bool + Send + Sync + 'static) -> Self {
        self.ignored = Arc::new(ignored);
        self
    }

    /// Replace the rejected-result predicate.
    pub fn rejecting(mut self, rejected: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.rejected = Arc::new(rejected);
        self
    }

    /// Attempt `op` until it is accepted or the budget elapses.
    pub fn try_to(
        &self,
        mut op: impl FnMut() -> Result<Value, CallError>,
    ) -> Result<Value, CallError> {
        let start = self.clock.now();
        loop {
            let last = match op() {
                Ok(value) if !(self.rejected)(&value) => return Ok(value),
                Ok(value) => CallError::Rejected(format!("{value:?}")),
                Err(CallError::Interrupted) => return Err(CallError::Interrupted),
                Err(error) if (self.ignored)(&error) => error,
                Err(error) => return Err(error),
            };
            if self.clock.now().saturating_duration_since(start) >= self.limit {
                return Err(CallError::LimitExceeded {
                    limit: self.limit,
                    cause: Box::new(last),
                });
            }
            self.clock.sleep(self.interval)?;
        }
    }
}

/// The implicit-wait behavior.
///
/// Per method semantics:
///
/// - `LocateOne` — retry ignoring the configured failure set; the deadline
///   raises [`CallError::LimitExceeded`].
/// - `LocateMany` — retry while the result list is empty; the deadline
///   degrades to an empty list. The asymmetry with `LocateOne` is
///   deliberate: a locate-many caller asked an optional-existence question,
///   a locate-one caller a required-existence one.
/// - `Action` — retry ignoring the configured failure set; the deadline
///   raises.
/// - `Query` — no retry unless an acceptance predicate opts queries in.
pub struct TimedRetry {
    limit: Duration,
    interval: Duration,
    clock: Arc<dyn Clock>,
    ignored: ErrorPredicate,
    accept: Option<ResultPredicate>,
}

impl TimedRetry {
    /// The default policy: 10 s budget, 500 ms interval, wall clock,
    /// not-found failures ignored, queries not retried.
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            interval: DEFAULT_INTERVAL,
            clock: Arc::new(SystemClock),
            ignored: Arc::new(CallError::is_not_found),
            accept: None,
        }
    }

    /// Set the total time budget.
    pub fn limit(mut self, limit: Duration) -> Self {
        self.limit = limit;
        self
    }

    /// Set the sleep between attempts.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Inject a clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the ignored-failure predicate.
    pub fn ignoring(mut self, ignored: impl Fn(&CallError) -> bool + Send + Sync + 'static) -> Self {
        self.ignored = Arc::new(ignored);
        self
    }

    /// Opt queries into retry-until-accepted with the given predicate.
    pub fn accepting(mut self, accept: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.accept = Some(Arc::new(accept));
        self
    }

    fn trier(&self) -> Trier {
        Trier {
            limit: self.limit,
            interval: self.interval,
            clock: self.clock.clone(),
            ignored: self.ignored.clone(),
            rejected: Arc::new(|_| false),
        }
    }
}

impl Default for TimedRetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for TimedRetry {
    fn call_global(&self, cx: &CallCx<'_>, next: NextCall<'_>) -> Result<Value, CallError> {
        match cx.method().semantics() {
            Semantics::LocateOne => self.trier().try_to(|| cx.call_original()),
            Semantics::LocateMany => {
                let attempt = self
                    .trier()
                    .rejecting(|value| matches!(value, Value::List(items) if items.is_empty()))
                    .try_to(|| cx.call_original());
                match attempt {
                    Err(CallError::LimitExceeded { .. }) => Ok(Value::List(Vec::new())),
                    other => other,
                }
            }
            Semantics::Action => self.trier().try_to(|| cx.call_original()),
            Semantics::Query => match &self.accept {
                Some(accept) => {
                    let accept = accept.clone();
                    self.trier()
                        .rejecting(move |value| !accept(value))
                        .try_to(|| cx.call_original())
                }
                None => next.run(cx),
            },
        }
    }
}
