//! The dynamic value model.
//!
//! Arguments and results of intercepted calls are [`Value`]s. The engine
//! never interprets a value beyond structure: the one variant it cares
//! about is [`Value::Resource`], which marks a capability-typed
//! sub-resource that must be unwrapped before hooks see it and re-wrapped
//! into the decoration chain before the caller does.

use crate::target::Handle;
use std::fmt;
use std::sync::Arc;

/// An argument or result of an intercepted call.
#[derive(Clone)]
pub enum Value {
    /// No interesting value.
    Unit,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A string.
    Text(String),
    /// A capability-typed sub-resource.
    Resource(Handle),
    /// An ordered collection of values.
    List(Vec<Value>),
}

impl Value {
    /// Whether this is [`Value::Unit`].
    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Unit)
    }

    /// The boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload, if any.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The string payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The sub-resource payload, if any.
    pub fn as_resource(&self) -> Option<&Handle> {
        match self {
            Value::Resource(h) => Some(h),
            _ => None,
        }
    }

    /// The sub-resource payload by value, if any.
    pub fn into_resource(self) -> Option<Handle> {
        match self {
            Value::Resource(h) => Some(h),
            _ => None,
        }
    }

    /// The list payload, if any.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Handle> for Value {
    fn from(h: Handle) -> Self {
        Value::Resource(h)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            // Resources compare by handle identity, not by content.
            (Value::Resource(a), Value::Resource(b)) => Arc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => f.write_str("()"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Resource(h) => write!(f, "<{}>", h.describe()),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilitySet;
    use crate::error::CallError;
    use crate::method::Method;
    use crate::target::Target;

    struct Dummy;

    impl Target for Dummy {
        fn capabilities(&self) -> CapabilitySet {
            CapabilitySet::new()
        }

        fn invoke(&self, method: &Method, _args: &[Value]) -> Result<Value, CallError> {
            Err(CallError::Unsupported {
                method: method.name(),
            })
        }

        fn describe(&self) -> String {
            "dummy".into()
        }
    }

    #[test]
    fn test_resource_equality_is_identity() {
        let a: Handle = Arc::new(Dummy);
        let b: Handle = Arc::new(Dummy);
        assert_eq!(Value::Resource(a.clone()), Value::Resource(a.clone()));
        assert_ne!(Value::Resource(a), Value::Resource(b));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(7i64).as_int(), Some(7));
        assert_eq!(Value::from("id").as_text(), Some("id"));
        assert!(Value::Unit.is_unit());
    }

    #[test]
    fn test_debug_renders_resources_by_description() {
        let handle: Handle = Arc::new(Dummy);
        let rendered = format!("{:?}", Value::Resource(handle));
        assert_eq!(rendered, "<dummy>");
    }
}
