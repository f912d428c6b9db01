//! Testing utilities for Lacquer.
//!
//! This module provides fakes to make testing behaviors and decoration
//! chains easier.
//!
//! # Features
//!
//! - [`FakeResource`]: a scriptable target with stubbed and queued
//!   responses, recording every invocation
//! - [`FakeClock`]: manual time — sleeping advances it, and interruptions
//!   can be injected
//! - [`RecordingObserver`]: an observer that journals every event it sees

use crate::events::{CallEvent, Observer};
use crate::retry::Clock;
use lacquer_core::{Capability, CapabilitySet, CallError, Method, Target, Value};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

// ============================================================================
// Fake Resource
// ============================================================================

type Key = (&'static str, &'static str);

fn key(method: &Method) -> Key {
    (method.capability().name(), method.name())
}

/// One recorded invocation.
#[derive(Clone, Debug)]
pub struct CallRecord {
    /// The invoked method.
    pub method: Method,
    /// The arguments it was invoked with.
    pub args: Vec<Value>,
}

/// A scriptable target.
///
/// Responses come from a one-shot queue per method (consumed in order),
/// falling back to a persistent stub, then to a persistent failure script;
/// methods with none of these fail with [`CallError::Unsupported`]. Every
/// invocation is recorded.
///
/// # Example
///
/// ```rust,ignore
/// let session = FakeResource::new("session", &[&SESSION]);
/// session.enqueue(&FIND, Err(CallError::NotFound("#save".into())));
/// session.stub(&FIND, Value::Resource(widget.clone()));
/// ```
pub struct FakeResource {
    name: String,
    caps: Vec<&'static Capability>,
    stubs: Mutex<HashMap<Key, Value>>,
    failures: Mutex<HashMap<Key, FailureFactory>>,
    queued: Mutex<HashMap<Key, VecDeque<Result<Value, CallError>>>>,
    calls: Mutex<Vec<CallRecord>>,
}

type FailureFactory = Box<dyn Fn() -> CallError + Send + Sync>;

impl FakeResource {
    /// A fake declaring the given capabilities.
    pub fn new(name: impl Into<String>, caps: &[&'static Capability]) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            caps: caps.to_vec(),
            stubs: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            queued: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Set the persistent response for a method.
    pub fn stub(&self, method: &Method, value: Value) {
        self.stubs.lock().insert(key(method), value);
    }

    /// Make a method fail persistently with errors built by `failure`.
    pub fn fail_with(
        &self,
        method: &Method,
        failure: impl Fn() -> CallError + Send + Sync + 'static,
    ) {
        self.failures.lock().insert(key(method), Box::new(failure));
    }

    /// Queue a one-shot response for a method; queued responses are served
    /// before the stub.
    pub fn enqueue(&self, method: &Method, response: Result<Value, CallError>) {
        self.queued
            .lock()
            .entry(key(method))
            .or_default()
            .push_back(response);
    }

    /// Every invocation recorded so far.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().clone()
    }

    /// How many times the given method was invoked.
    pub fn calls_of(&self, method: &Method) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|record| record.method == *method)
            .count()
    }
}

impl Target for FakeResource {
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::from_declared(&self.caps)
    }

    fn invoke(&self, method: &Method, args: &[Value]) -> Result<Value, CallError> {
        self.calls.lock().push(CallRecord {
            method: *method,
            args: args.to_vec(),
        });

        if let Some(queue) = self.queued.lock().get_mut(&key(method)) {
            if let Some(response) = queue.pop_front() {
                return response;
            }
        }
        if let Some(value) = self.stubs.lock().get(&key(method)) {
            return Ok(value.clone());
        }
        if let Some(failure) = self.failures.lock().get(&key(method)) {
            return Err(failure());
        }
        Err(CallError::Unsupported {
            method: method.name(),
        })
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

// ============================================================================
// Fake Clock
// ============================================================================

/// A clock under manual control.
///
/// `now` starts at an arbitrary epoch; `sleep` advances it without
/// blocking. [`FakeClock::interrupt_after_sleeps`] scripts an interruption:
/// the n-th subsequent sleep fails with [`CallError::Interrupted`] instead
/// of advancing.
pub struct FakeClock {
    epoch: Instant,
    elapsed: Mutex<Duration>,
    interrupt_in: Mutex<Option<usize>>,
}

impl FakeClock {
    /// A clock at its epoch.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            epoch: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            interrupt_in: Mutex::new(None),
        })
    }

    /// Advance time manually.
    pub fn advance(&self, duration: Duration) {
        *self.elapsed.lock() += duration;
    }

    /// Total time slept or advanced.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }

    /// Script the n-th subsequent sleep (1-based) to be interrupted.
    pub fn interrupt_after_sleeps(&self, sleeps: usize) {
        *self.interrupt_in.lock() = Some(sleeps);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.epoch + *self.elapsed.lock()
    }

    fn sleep(&self, duration: Duration) -> Result<(), CallError> {
        {
            let mut interrupt_in = self.interrupt_in.lock();
            if let Some(remaining) = *interrupt_in {
                if remaining <= 1 {
                    *interrupt_in = None;
                    return Err(CallError::Interrupted);
                }
                *interrupt_in = Some(remaining - 1);
            }
        }
        self.advance(duration);
        Ok(())
    }
}

// ============================================================================
// Recording Observer
// ============================================================================

/// An observer that journals every event it sees.
///
/// Entries look like `"before widget.click"` and `"after search.find"`.
pub struct RecordingObserver {
    journal: Mutex<Vec<String>>,
}

impl RecordingObserver {
    /// An empty journal.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            journal: Mutex::new(Vec::new()),
        })
    }

    /// A copy of the journal.
    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().clone()
    }

    /// Number of journal entries.
    pub fn count(&self) -> usize {
        self.journal.lock().len()
    }

    /// Forget everything journaled so far.
    pub fn clear(&self) {
        self.journal.lock().clear();
    }
}

impl Observer for RecordingObserver {
    fn before_call(&self, event: &CallEvent<'_>) {
        self.journal.lock().push(format!("before {}", event.method()));
    }

    fn after_call(&self, event: &CallEvent<'_>, _result: Option<&Value>) {
        self.journal.lock().push(format!("after {}", event.method()));
    }
}
