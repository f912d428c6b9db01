//! # lacquer - Runtime Decoration for Capability-Typed Resources
//!
//! `lacquer` wraps an opaque resource in a drop-in replacement whose calls
//! run through a configurable hook pipeline. Behavior — logging, event
//! broadcasting, automatic retry, stale-reference recovery — is composed
//! out of [`Behavior`] layers instead of modifying the wrapped resource.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lacquer::prelude::*;
//!
//! let observers = ObserverSet::new();
//! let session = Decorator::new()
//!     .intercept(&[&SESSION, &WIDGET])
//!     .layer(CallLogger::new())
//!     .layer(EventBroadcast::new(observers.clone()))
//!     .layer(TimedRetry::new())
//!     .layer(StaleRecovery::new())
//!     .activate(original);
//!
//! // `session` implements the same capabilities as `original`; every
//! // intercepted call now waits, recovers, broadcasts and logs.
//! let button = session.invoke(&FIND, &[Value::from("#save")])?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use lacquer_core::{
    // Capability model
    Anchor,
    // Hook surface
    Behavior,
    // Errors
    BoxError,
    CallCx,
    CallError,
    Capability,
    CapabilitySet,
    DECORATED,
    // Entities and chains
    Decorated,
    Decorator,
    Handle,
    Method,
    NextCall,
    NextError,
    Proxy,
    Semantics,
    // Targets
    Target,
    Topmost,
    UNWRAP,
    Value,
    unwrap_handle,
};

/// Event broadcast: observers and their registry.
pub mod events {
    pub use lacquer_std::events::{CallEvent, CallbackObserver, EventBroadcast, Observer, ObserverSet};
}

/// Structured call logging.
pub mod logging {
    pub use lacquer_std::logging::CallLogger;
}

/// Stale-reference recovery.
pub mod recovery {
    pub use lacquer_std::recovery::StaleRecovery;
}

/// Timed retry (implicit wait).
pub mod retry {
    pub use lacquer_std::retry::{
        Clock, DEFAULT_INTERVAL, DEFAULT_LIMIT, SystemClock, TimedRetry, Trier,
    };
}

/// Testing utilities.
pub mod testing {
    pub use lacquer_std::testing::{CallRecord, FakeClock, FakeResource, RecordingObserver};
}

/// Prelude module - common imports for Lacquer.
///
/// # Usage
///
/// ```rust,ignore
/// use lacquer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Hook surface
        Behavior,
        // Errors
        CallError,
        // Capability model
        Capability,
        CapabilitySet,
        // Chains
        Decorator,
        Handle,
        Method,
        Semantics,
        Target,
        Value,
        unwrap_handle,
    };
    pub use crate::events::{EventBroadcast, Observer, ObserverSet};
    pub use crate::logging::CallLogger;
    pub use crate::recovery::StaleRecovery;
    pub use crate::retry::TimedRetry;
}
