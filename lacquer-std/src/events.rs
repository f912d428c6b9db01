//! Event broadcast.
//!
//! [`EventBroadcast`] notifies registered observers before and after every
//! intercepted call. Errors bypass the broadcast layer: an observer sees a
//! before event for a failing call, but never an after event.
//!
//! Observers receive the wrapped original as receiver, never the decorator,
//! so an observer can compare handles against resources it obtained by
//! unwrapping.

use lacquer_core::{Behavior, CallCx, Handle, Method, Value};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// One intercepted call, as observers see it.
pub struct CallEvent<'a> {
    target: Handle,
    method: &'a Method,
    args: &'a [Value],
}

impl<'a> CallEvent<'a> {
    /// The original resource the call executes on.
    pub fn target(&self) -> &Handle {
        &self.target
    }

    /// The invoked method.
    pub fn method(&self) -> &Method {
        self.method
    }

    /// The call arguments.
    pub fn args(&self) -> &[Value] {
        self.args
    }
}

/// A registered call observer.
///
/// Both hooks default to no-ops, so an observer implements only the side
/// it cares about.
pub trait Observer: Send + Sync + 'static {
    /// Called before the underlying call is invoked.
    fn before_call(&self, event: &CallEvent<'_>) {
        let _ = event;
    }

    /// Called after the underlying call succeeds. `result` is `None` for
    /// calls without an interesting result.
    fn after_call(&self, event: &CallEvent<'_>, result: Option<&Value>) {
        let _ = (event, result);
    }
}

/// A shared, mutable collection of observers.
///
/// Cloning is cheap and clones share the same underlying collection, so a
/// set handed to [`EventBroadcast`] can keep being mutated afterwards.
/// Broadcast iterates a snapshot: mutating the set during a broadcast
/// affects only calls issued after the mutation.
#[derive(Clone, Default)]
pub struct ObserverSet {
    inner: Arc<RwLock<Vec<Arc<dyn Observer>>>>,
}

impl ObserverSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.
    pub fn register(&self, observer: Arc<dyn Observer>) {
        self.inner.write().push(observer);
    }

    /// Remove a previously registered observer (by handle identity).
    pub fn unregister(&self, observer: &Arc<dyn Observer>) {
        self.inner.write().retain(|o| !Arc::ptr_eq(o, observer));
    }

    /// Remove every observer.
    pub fn clear_all(&self) {
        self.inner.write().clear();
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    fn snapshot(&self) -> Vec<Arc<dyn Observer>> {
        self.inner.read().clone()
    }
}

/// The event-broadcast behavior.
pub struct EventBroadcast {
    observers: ObserverSet,
}

impl EventBroadcast {
    /// Broadcast to the given observer set.
    pub fn new(observers: ObserverSet) -> Self {
        Self { observers }
    }

    /// The observer set this behavior broadcasts to.
    pub fn observers(&self) -> &ObserverSet {
        &self.observers
    }

    fn event<'a>(cx: &'a CallCx<'_>) -> CallEvent<'a> {
        CallEvent {
            target: cx.target(),
            method: cx.method(),
            args: cx.args(),
        }
    }
}

impl Behavior for EventBroadcast {
    fn before_global(&self, cx: &CallCx<'_>) {
        let event = Self::event(cx);
        for observer in self.observers.snapshot() {
            observer.before_call(&event);
        }
    }

    fn after_global(&self, cx: &CallCx<'_>, result: &Value) {
        let event = Self::event(cx);
        let result = if result.is_unit() { None } else { Some(result) };
        for observer in self.observers.snapshot() {
            observer.after_call(&event, result);
        }
    }
}

type Key = (&'static str, &'static str);

fn key(method: &Method) -> Key {
    (method.capability().name(), method.name())
}

type BeforeHandler = Box<dyn Fn(&CallEvent<'_>) + Send + Sync>;
type AfterHandler = Box<dyn Fn(&CallEvent<'_>, Option<&Value>) + Send + Sync>;

/// An observer built from an explicit registration table.
///
/// Handlers are keyed by the method statics themselves, replacing the
/// source system's name-and-signature matching: a handler can only be
/// registered for a method that exists, so the silent mismatch failure
/// mode cannot be expressed. Methods without a handler are no-ops by
/// [`Observer`]'s default semantics.
#[derive(Default)]
pub struct CallbackObserver {
    before: HashMap<Key, BeforeHandler>,
    after: HashMap<Key, AfterHandler>,
}

impl CallbackObserver {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a before-call handler for one method.
    pub fn on_before(
        mut self,
        method: &'static Method,
        handler: impl Fn(&CallEvent<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.before.insert(key(method), Box::new(handler));
        self
    }

    /// Register an after-call handler for one method.
    pub fn on_after(
        mut self,
        method: &'static Method,
        handler: impl Fn(&CallEvent<'_>, Option<&Value>) + Send + Sync + 'static,
    ) -> Self {
        self.after.insert(key(method), Box::new(handler));
        self
    }
}

impl Observer for CallbackObserver {
    fn before_call(&self, event: &CallEvent<'_>) {
        if let Some(handler) = self.before.get(&key(event.method())) {
            handler(event);
        }
    }

    fn after_call(&self, event: &CallEvent<'_>, result: Option<&Value>) {
        if let Some(handler) = self.after.get(&key(event.method())) {
            handler(event, result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        befores: AtomicUsize,
        afters: AtomicUsize,
    }

    impl Counting {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                befores: AtomicUsize::new(0),
                afters: AtomicUsize::new(0),
            })
        }
    }

    impl Observer for Counting {
        fn before_call(&self, _event: &CallEvent<'_>) {
            self.befores.fetch_add(1, Ordering::SeqCst);
        }

        fn after_call(&self, _event: &CallEvent<'_>, _result: Option<&Value>) {
            self.afters.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_register_unregister_clear() {
        let set = ObserverSet::new();
        let first = Counting::new();
        let second = Counting::new();

        set.register(first.clone());
        set.register(second.clone());
        assert_eq!(set.len(), 2);

        set.unregister(&(first.clone() as Arc<dyn Observer>));
        assert_eq!(set.len(), 1);

        set.clear_all();
        assert!(set.is_empty());
    }

    #[test]
    fn test_clones_share_the_collection() {
        let set = ObserverSet::new();
        let shared = set.clone();
        set.register(Counting::new());
        assert_eq!(shared.len(), 1);
    }
}
