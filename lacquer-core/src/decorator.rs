//! The decoration chain builder.
//!
//! A [`Decorator`] assembles one chain: the capabilities the decoration
//! intercepts and the behavior stack calls run through, then activates it
//! around an original handle.

use crate::behavior::Behavior;
use crate::capability::{Capability, CapabilitySet};
use crate::decorated::Decorated;
use crate::proxy::Proxy;
use crate::target::Handle;
use crate::topmost::Topmost;
use std::sync::Arc;

/// Builder for a decoration chain.
///
/// # Example
///
/// ```rust,ignore
/// let session = Decorator::new()
///     .intercept(&[&SESSION, &WIDGET])
///     .layer(CallLogger::new())
///     .layer(TimedRetry::new())
///     .layer(StaleRecovery::new())
///     .activate(original);
/// ```
///
/// Layers are outermost first: the first layer's Before hook runs first,
/// its After hook runs last.
#[derive(Default)]
pub struct Decorator {
    intercepts: CapabilitySet,
    layers: Vec<Box<dyn Behavior>>,
}

impl Decorator {
    /// Start an empty decoration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the capabilities this decoration owns. Methods declared by
    /// any of them (or their supertypes) are routed through the hook
    /// pipeline; everything else passes through to the original untouched.
    pub fn intercept(mut self, capabilities: &[&'static Capability]) -> Self {
        for capability in capabilities.iter().copied() {
            self.intercepts.insert(capability);
        }
        self
    }

    /// Push a behavior layer (outermost first).
    pub fn layer(mut self, behavior: impl Behavior) -> Self {
        self.layers.push(Box::new(behavior));
        self
    }

    /// Build the chain without activating a proxy.
    ///
    /// Useful when the entity is wrapped later, or never.
    pub fn decorate(self, original: Handle) -> Arc<Decorated> {
        let topmost = Topmost::new(self.intercepts, self.layers);
        Decorated::new(original, topmost)
    }

    /// Build the chain and activate it as a drop-in replacement handle.
    pub fn activate(self, original: Handle) -> Handle {
        Proxy::activate(self.decorate(original))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilitySet;
    use crate::error::CallError;
    use crate::method::{Method, Semantics};
    use crate::target::Target;
    use crate::value::Value;

    static SEARCH: Capability = Capability::new("search", &[]);
    static SESSION: Capability = Capability::new("session", &[&SEARCH]);
    static FIND: Method = Method::new("find", &SEARCH, Semantics::LocateOne);

    struct Stub;

    impl Target for Stub {
        fn capabilities(&self) -> CapabilitySet {
            CapabilitySet::from_declared(&[&SESSION])
        }

        fn invoke(&self, method: &Method, _args: &[Value]) -> Result<Value, CallError> {
            Ok(Value::from(method.name()))
        }
    }

    #[test]
    fn test_intercept_closes_over_supertypes() {
        // FIND is declared by SEARCH, a supertype of the intercepted SESSION.
        let entity = Decorator::new().intercept(&[&SESSION]).decorate(Arc::new(Stub));
        assert!(entity.topmost().owns(&SEARCH));
    }

    #[test]
    fn test_decorate_without_activation_is_legal() {
        let entity = Decorator::new().intercept(&[&SESSION]).decorate(Arc::new(Stub));
        assert_eq!(entity.original().describe(), "target");
        assert!(entity.anchor().is_none());
    }

    #[test]
    fn test_activate_produces_working_handle() {
        let handle = Decorator::new().intercept(&[&SESSION]).activate(Arc::new(Stub));
        assert_eq!(handle.invoke(&FIND, &[]).expect("dispatch"), Value::from("find"));
    }
}
