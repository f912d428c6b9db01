//! Method declarations.
//!
//! A [`Method`] names one operation of one declaring [`Capability`], plus a
//! [`Semantics`] hint assigned at declaration time. The hint is what lets
//! behaviors reason about an operation without inspecting the wrapped
//! resource: a retry policy treats a locate differently from an action, and
//! recovery only records provenance for locates.

use crate::capability::Capability;
use std::fmt;

/// What kind of operation a method performs, declared up front.
///
/// The source system inferred this from method names and return types at
/// runtime; here it is part of the method declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semantics {
    /// Locates exactly one sub-resource; absence is an error.
    LocateOne,
    /// Locates any number of sub-resources; absence is an empty list.
    LocateMany,
    /// Mutates the resource and returns nothing interesting.
    Action,
    /// Reads state without mutating it.
    Query,
}

/// One operation declared by a capability.
///
/// Declared as `static` items next to the capability that owns them:
///
/// ```rust,ignore
/// static FIND: Method = Method::new("find", &SEARCH, Semantics::LocateOne);
/// ```
///
/// Identity is the (declaring capability, name) pair.
#[derive(Clone, Copy)]
pub struct Method {
    name: &'static str,
    capability: &'static Capability,
    semantics: Semantics,
}

impl Method {
    /// Declare a method.
    pub const fn new(
        name: &'static str,
        capability: &'static Capability,
        semantics: Semantics,
    ) -> Self {
        Self {
            name,
            capability,
            semantics,
        }
    }

    /// The method name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The capability that declares this method.
    pub fn capability(&self) -> &'static Capability {
        self.capability
    }

    /// The declared operation kind.
    pub fn semantics(&self) -> Semantics {
        self.semantics
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.capability == other.capability
    }
}

impl Eq for Method {}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.capability.name(), self.name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.capability.name(), self.name)
    }
}
