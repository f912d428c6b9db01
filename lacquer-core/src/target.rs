//! The target contract.
//!
//! A [`Target`] is the opaque resource being decorated. The engine knows
//! nothing about it beyond the two things this trait exposes: which
//! capabilities it declares, and how to execute an invocation. Behavior
//! stays entirely on the other side of the trait boundary.

use crate::capability::{Capability, CapabilitySet};
use crate::error::CallError;
use crate::method::{Method, Semantics};
use crate::value::Value;
use std::sync::Arc;

/// A shared handle to a target.
pub type Handle = Arc<dyn Target>;

/// An invocable resource with a declared capability set.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be decorated",
    label = "missing `Target` implementation",
    note = "Targets must report their capabilities and execute invocations."
)]
pub trait Target: Send + Sync + 'static {
    /// The capabilities this resource declares. Supertypes need not be
    /// listed; the engine closes the set where membership matters.
    fn capabilities(&self) -> CapabilitySet;

    /// Execute one method invocation.
    fn invoke(&self, method: &Method, args: &[Value]) -> Result<Value, CallError>;

    /// A short human-readable description, used in diagnostics.
    fn describe(&self) -> String {
        "target".into()
    }
}

/// The capability owning the privileged unwrap accessor.
pub static DECORATED: Capability = Capability::new("lacquer.decorated", &[]);

/// The privileged unwrap accessor.
///
/// Retrieving the original from a proxy is never hook-intercepted; proxies
/// answer this method directly with their underlying handle. Plain targets
/// are not expected to implement it.
pub static UNWRAP: Method = Method::new("unwrap", &DECORATED, Semantics::Query);

/// Resolve a possibly-proxied handle to its underlying original.
///
/// Identity on handles that are not proxies.
pub fn unwrap_handle(handle: &Handle) -> Handle {
    match handle.invoke(&UNWRAP, &[]) {
        Ok(Value::Resource(original)) => original,
        _ => handle.clone(),
    }
}
