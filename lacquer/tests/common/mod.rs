//! Shared fixture domain for integration tests: a miniature browser-like
//! capability family (session → search ← widget) driven through
//! `FakeResource` scripts.

// Not every test binary exercises the whole fixture domain.
#![allow(dead_code)]

use lacquer::testing::FakeResource;
use lacquer::{Capability, Method, Semantics, Value};
use std::sync::Arc;

// ============================================================================
// Capability family
// ============================================================================

/// Anything that can locate sub-resources.
pub static SEARCH: Capability = Capability::new("search", &[]);
/// The root resource of a chain.
pub static SESSION: Capability = Capability::new("session", &[&SEARCH]);
/// A located sub-resource.
pub static WIDGET: Capability = Capability::new("widget", &[&SEARCH]);
/// An extra capability only some resources realize.
pub static SCRIPTING: Capability = Capability::new("scripting", &[]);

// ============================================================================
// Methods
// ============================================================================

pub static FIND: Method = Method::new("find", &SEARCH, Semantics::LocateOne);
pub static FIND_ALL: Method = Method::new("find_all", &SEARCH, Semantics::LocateMany);
pub static REFRESH: Method = Method::new("refresh", &SESSION, Semantics::Action);
pub static CLICK: Method = Method::new("click", &WIDGET, Semantics::Action);
pub static READ: Method = Method::new("read", &WIDGET, Semantics::Query);
pub static EVAL: Method = Method::new("eval", &SCRIPTING, Semantics::Query);

// ============================================================================
// Resources
// ============================================================================

pub fn session() -> Arc<FakeResource> {
    FakeResource::new("session", &[&SESSION])
}

pub fn widget(name: &str) -> Arc<FakeResource> {
    FakeResource::new(name, &[&WIDGET])
}

/// A locator argument.
pub fn by(selector: &str) -> Vec<Value> {
    vec![Value::from(selector)]
}
