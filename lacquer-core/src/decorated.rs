//! # Decorated Entity Layer
//!
//! A [`Decorated`] wraps exactly one original [`Handle`] and ties it to the
//! [`Topmost`] coordinator of its decoration chain. Children created for
//! sub-resources share the parent's coordinator, so the topmost of a chain
//! is reachable from every entity in O(1).
//!
//! The original lives in a swappable owned slot: stale-reference recovery
//! replaces the underlying handle in place, so callers' long-lived
//! references to the entity (through its proxy) stay valid across a silent
//! rediscovery.

use crate::target::Handle;
use crate::topmost::Topmost;
use crate::{Method, Value};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;

/// Provenance of a located sub-resource, recorded for rediscovery.
///
/// The context is the (decorated) resource the entity was found through, so
/// a rediscovery re-enters the full decoration chain; the method and args
/// are the locate invocation that produced it.
#[derive(Clone)]
pub struct Anchor {
    /// The resource the entity was located through.
    pub context: Handle,
    /// The locate method.
    pub method: Method,
    /// The locate arguments.
    pub args: Vec<Value>,
}

/// One decorated entity: an original handle bound to a decoration chain.
pub struct Decorated {
    original: RwLock<Handle>,
    topmost: Arc<Topmost>,
    anchor: Mutex<Option<Anchor>>,
}

impl Decorated {
    /// Bind an original handle to a decoration chain.
    pub fn new(original: Handle, topmost: Arc<Topmost>) -> Arc<Self> {
        Arc::new(Self {
            original: RwLock::new(original),
            topmost,
            anchor: Mutex::new(None),
        })
    }

    /// The current underlying handle.
    pub fn original(&self) -> Handle {
        self.original.read().clone()
    }

    /// Replace the underlying handle in place.
    ///
    /// The entity keeps its identity; only the handle changes. This is the
    /// single-writer cell that recovery mutates.
    pub fn swap_original(&self, replacement: Handle) {
        *self.original.write() = replacement;
    }

    /// The coordinator of this entity's decoration chain.
    pub fn topmost(&self) -> &Arc<Topmost> {
        &self.topmost
    }

    /// The recorded locate provenance, if any.
    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor.lock().clone()
    }

    /// Record locate provenance for later rediscovery.
    pub fn set_anchor(&self, anchor: Anchor) {
        *self.anchor.lock() = Some(anchor);
    }
}

impl fmt::Debug for Decorated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decorated {{{}}}", self.original().describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilitySet;
    use crate::error::CallError;
    use crate::method::Method;
    use crate::topmost::Topmost;

    struct Named(&'static str);

    impl crate::target::Target for Named {
        fn capabilities(&self) -> CapabilitySet {
            CapabilitySet::new()
        }

        fn invoke(&self, method: &Method, _args: &[Value]) -> Result<Value, CallError> {
            Err(CallError::Unsupported {
                method: method.name(),
            })
        }

        fn describe(&self) -> String {
            self.0.into()
        }
    }

    #[test]
    fn test_swap_original_keeps_entity_identity() {
        let topmost = Topmost::new(CapabilitySet::new(), Vec::new());
        let entity = Decorated::new(Arc::new(Named("first")), topmost);

        assert_eq!(entity.original().describe(), "first");
        entity.swap_original(Arc::new(Named("second")));
        assert_eq!(entity.original().describe(), "second");
    }

    #[test]
    fn test_anchor_roundtrip() {
        static SEARCH: crate::Capability = crate::Capability::new("search", &[]);
        static FIND: Method = Method::new("find", &SEARCH, crate::Semantics::LocateOne);

        let topmost = Topmost::new(CapabilitySet::new(), Vec::new());
        let entity = Decorated::new(Arc::new(Named("widget")), topmost);
        assert!(entity.anchor().is_none());

        let context: Handle = Arc::new(Named("session"));
        entity.set_anchor(Anchor {
            context,
            method: FIND,
            args: vec![Value::from("#widget")],
        });

        let anchor = entity.anchor().expect("anchor should be recorded");
        assert_eq!(anchor.method, FIND);
        assert_eq!(anchor.args, vec![Value::from("#widget")]);
    }

    #[test]
    fn test_debug_shows_current_original() {
        let topmost = Topmost::new(CapabilitySet::new(), Vec::new());
        let entity = Decorated::new(Arc::new(Named("inner")), topmost);
        assert_eq!(format!("{entity:?}"), "Decorated {inner}");
    }
}
