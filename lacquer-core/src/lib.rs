//! # lacquer-core
//!
//! Core traits and engine for the Lacquer decoration framework.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! behaviors and extensions that don't need the full `lacquer-std`
//! implementations.
//!
//! # Architecture
//!
//! Lacquer turns an opaque resource into a drop-in replacement whose calls
//! run through a configurable hook pipeline. Four layers, leaves first:
//!
//! ## Layer 1: Capabilities ([`Capability`], [`Method`])
//!
//! Static declarations of the abstract contracts a resource may realize and
//! the operations each contract owns. Nothing is discovered at runtime;
//! capability sets are closed over supertypes once, at construction.
//!
//! ## Layer 2: Targets ([`Target`], [`Value`])
//!
//! The opaque resource contract: report declared capabilities, execute
//! invocations over a small dynamic value model. The engine never looks at
//! a target beyond capability membership and failure classification.
//!
//! ## Layer 3: Decoration chain ([`Decorated`], [`Topmost`], [`Behavior`])
//!
//! One [`Topmost`] coordinator per wrapped resource owns the intercepted
//! capability set and a stack of [`Behavior`] strategy layers — the
//! replacement for the source system's inheritance-based hook overrides.
//! Every child entity created for a sub-resource shares the coordinator,
//! so hook dispatch is O(1) from anywhere in the chain.
//!
//! ## Layer 4: Proxies ([`Proxy`], [`Decorator`])
//!
//! The activated face: a [`Proxy`] implements [`Target`] over one entity
//! and routes intercepted methods through the Before → Call →
//! {After | Error} state machine; everything else forwards untouched.
//!
//! # Error Types
//!
//! - [`CallError`] - failure taxonomy of intercepted calls
//! - [`BoxError`] - boxed pass-through errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod behavior;
mod capability;
mod decorated;
mod decorator;
mod error;
mod method;
mod proxy;
mod target;
mod topmost;
mod value;

pub use behavior::{Behavior, CallCx, NextCall, NextError};
pub use capability::{Capability, CapabilitySet};
pub use decorated::{Anchor, Decorated};
pub use decorator::Decorator;
pub use error::{BoxError, CallError};
pub use method::{Method, Semantics};
pub use proxy::Proxy;
pub use target::{DECORATED, Handle, Target, UNWRAP, unwrap_handle};
pub use topmost::Topmost;
pub use value::Value;
