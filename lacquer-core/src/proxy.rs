//! # Proxy Layer
//!
//! A [`Proxy`] is the drop-in replacement for a decorated resource: it
//! implements [`Target`] 1:1 over one [`Decorated`] entity and routes every
//! invocation through the interception engine.
//!
//! # Dispatch rule
//!
//! - The unwrap accessor short-circuits to the underlying handle. It is
//!   privileged and never hook-intercepted.
//! - A method whose declaring capability the decoration does not own is
//!   forwarded directly to the original: no hooks fire, no results are
//!   wrapped, and the outcome is identical to calling the original.
//! - Everything else runs the topmost's call state machine.
//!
//! # Advertised capabilities
//!
//! A proxy advertises the closure of its original's declared capabilities —
//! nothing more. Capabilities the decoration intercepts but the original
//! does not realize are dropped from the advertisement; invoking one of
//! their methods anyway fails at call time with
//! [`CallError::Unsupported`](crate::CallError::Unsupported).

use crate::behavior::CallCx;
use crate::capability::CapabilitySet;
use crate::decorated::Decorated;
use crate::error::CallError;
use crate::method::Method;
use crate::target::{Handle, Target, UNWRAP};
use crate::value::Value;
use std::sync::{Arc, Weak};

/// The activated face of a decorated entity.
pub struct Proxy {
    entity: Arc<Decorated>,
    advertised: CapabilitySet,
    this: Weak<Proxy>,
}

impl Proxy {
    /// Activate a decorated entity as a drop-in replacement handle.
    pub fn activate(entity: Arc<Decorated>) -> Handle {
        let advertised = entity.original().capabilities().close();
        Arc::new_cyclic(|this| Proxy {
            entity,
            advertised,
            this: this.clone(),
        })
    }

    /// The entity behind this proxy.
    pub fn entity(&self) -> &Arc<Decorated> {
        &self.entity
    }
}

impl Target for Proxy {
    fn capabilities(&self) -> CapabilitySet {
        self.advertised.clone()
    }

    fn invoke(&self, method: &Method, args: &[Value]) -> Result<Value, CallError> {
        if *method == UNWRAP {
            return Ok(Value::Resource(self.entity.original()));
        }

        if !self.entity.topmost().owns(method.capability()) {
            return self.entity.original().invoke(method, args);
        }

        // The upgrade cannot fail: invoke is only reachable through a live
        // strong handle to this proxy.
        let receiver: Handle = self
            .this
            .upgrade()
            .expect("proxy invoked through its own handle");
        let topmost = self.entity.topmost().clone();
        let cx = CallCx {
            entity: &self.entity,
            receiver: &receiver,
            method,
            args,
        };
        topmost.dispatch(&cx)
    }

    fn describe(&self) -> String {
        format!("decorated {{{}}}", self.entity.original().describe())
    }
}
