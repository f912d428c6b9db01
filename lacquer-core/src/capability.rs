//! # Capability Layer
//!
//! Capabilities are the abstract contracts a wrapped resource realizes.
//! They stand in for the interface hierarchy of the source system: a
//! capability is declared once as a `static`, may extend other capabilities,
//! and is identified by its name.
//!
//! # Layer Position
//!
//! This is the foundation of the Lacquer architecture. Everything above it
//! ([`Method`] declarations, dispatch routing, proxy advertisement) is
//! expressed in terms of capabilities and capability sets.
//!
//! # Design Philosophy
//!
//! - **Static**: capabilities are declared up front, not discovered by
//!   runtime type introspection.
//! - **Closed under inheritance**: [`CapabilitySet::close`] folds every
//!   supertype in, so membership questions never need to walk the hierarchy
//!   at call time.
//!
//! [`Method`]: crate::Method

use std::fmt;
use std::hash::{Hash, Hasher};

/// An abstract contract a resource may realize.
///
/// Declared as `static` items by the embedding domain:
///
/// ```rust,ignore
/// static SEARCH: Capability = Capability::new("search", &[]);
/// static SESSION: Capability = Capability::new("session", &[&SEARCH]);
/// ```
///
/// Identity is the capability name; two capabilities with the same name are
/// the same capability.
pub struct Capability {
    name: &'static str,
    extends: &'static [&'static Capability],
}

impl Capability {
    /// Declare a capability with the given supertypes.
    pub const fn new(name: &'static str, extends: &'static [&'static Capability]) -> Self {
        Self { name, extends }
    }

    /// The capability name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The directly declared supertypes.
    pub fn extends(&self) -> &'static [&'static Capability] {
        self.extends
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Capability {}

impl Hash for Capability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A deduplicated set of capabilities.
///
/// Insertion order is preserved so that diagnostics stay deterministic.
#[derive(Clone, Default)]
pub struct CapabilitySet {
    caps: Vec<&'static Capability>,
}

impl CapabilitySet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from the given capabilities, without closing over
    /// supertypes.
    pub fn from_declared(declared: &[&'static Capability]) -> Self {
        let mut set = Self::new();
        for cap in declared.iter().copied() {
            set.insert(cap);
        }
        set
    }

    /// Build the transitive supertype closure of the given capabilities.
    pub fn closure(declared: &[&'static Capability]) -> Self {
        Self::from_declared(declared).close()
    }

    /// Fold every (transitive) supertype of every member into the set.
    pub fn close(&self) -> Self {
        let mut closed = Self::new();
        let mut pending: Vec<&'static Capability> = self.caps.clone();
        while let Some(cap) = pending.pop() {
            if closed.insert(cap) {
                pending.extend_from_slice(cap.extends());
            }
        }
        closed
    }

    /// Insert a capability. Returns `false` if it was already present.
    pub fn insert(&mut self, capability: &'static Capability) -> bool {
        if self.contains(capability) {
            return false;
        }
        self.caps.push(capability);
        true
    }

    /// Membership test.
    pub fn contains(&self, capability: &Capability) -> bool {
        self.caps.iter().any(|c| *c == capability)
    }

    /// The union of two sets.
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for cap in other.iter() {
            merged.insert(cap);
        }
        merged
    }

    /// The members of `self` that are also members of `other`.
    pub fn intersect(&self, other: &Self) -> Self {
        let mut common = Self::new();
        for cap in self.iter() {
            if other.contains(cap) {
                common.insert(cap);
            }
        }
        common
    }

    /// Number of capabilities in the set.
    pub fn len(&self) -> usize {
        self.caps.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }

    /// Iterate over the members.
    pub fn iter(&self) -> impl Iterator<Item = &'static Capability> + '_ {
        self.caps.iter().copied()
    }
}

impl PartialEq for CapabilitySet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.caps.iter().all(|c| other.contains(c))
    }
}

impl Eq for CapabilitySet {}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.caps.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ROOT: Capability = Capability::new("root", &[]);
    static LEFT: Capability = Capability::new("left", &[&ROOT]);
    static RIGHT: Capability = Capability::new("right", &[&ROOT]);
    static LEAF: Capability = Capability::new("leaf", &[&LEFT, &RIGHT]);

    #[test]
    fn test_closure_is_transitive() {
        let set = CapabilitySet::closure(&[&LEAF]);
        assert!(set.contains(&LEAF));
        assert!(set.contains(&LEFT));
        assert!(set.contains(&RIGHT));
        assert!(set.contains(&ROOT));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_closure_deduplicates_diamonds() {
        // ROOT is reachable through both LEFT and RIGHT but appears once.
        let set = CapabilitySet::closure(&[&LEFT, &RIGHT]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_from_declared_does_not_close() {
        let set = CapabilitySet::from_declared(&[&LEAF]);
        assert!(set.contains(&LEAF));
        assert!(!set.contains(&ROOT));
    }

    #[test]
    fn test_union_and_intersect() {
        let a = CapabilitySet::from_declared(&[&LEFT, &ROOT]);
        let b = CapabilitySet::from_declared(&[&RIGHT, &ROOT]);

        let union = a.union(&b);
        assert_eq!(union.len(), 3);

        let common = a.intersect(&b);
        assert_eq!(common.len(), 1);
        assert!(common.contains(&ROOT));
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a = CapabilitySet::from_declared(&[&LEFT, &RIGHT]);
        let b = CapabilitySet::from_declared(&[&RIGHT, &LEFT]);
        assert_eq!(a, b);
    }
}
