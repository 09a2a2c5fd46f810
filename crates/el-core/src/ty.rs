use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::value::Value;

/// Declared type of a field, parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// Matches any value, including null.
    Any,
    /// Return type of members that produce no value.
    Void,
    Bool,
    Int,
    Float,
    String,
    /// A class known by its qualified name.
    Class(String),
}

/// How well a value fits a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Fit {
    /// Accepted after a widening conversion or by a catch-all type.
    Loose,
    /// The value's own type is the declared type.
    Exact,
}

impl TypeDescriptor {
    pub fn class(name: impl Into<String>) -> Self {
        TypeDescriptor::Class(name.into())
    }

    /// How `value` fits this type, or `None` when it cannot be passed at all.
    pub fn fit(&self, value: &Value) -> Option<Fit> {
        match (self, value) {
            (TypeDescriptor::Any, _) => Some(Fit::Loose),
            (TypeDescriptor::Void, _) => None,
            (TypeDescriptor::Bool, Value::Bool(_)) => Some(Fit::Exact),
            (TypeDescriptor::Int, Value::Int(_)) => Some(Fit::Exact),
            (TypeDescriptor::Float, Value::Float(_)) => Some(Fit::Exact),
            (TypeDescriptor::Float, Value::Int(_)) => Some(Fit::Loose),
            (TypeDescriptor::String, Value::String(_)) => Some(Fit::Exact),
            (TypeDescriptor::String | TypeDescriptor::Class(_), Value::Null) => Some(Fit::Loose),
            (TypeDescriptor::Class(name), Value::Object(object))
                if object.class().name() == name =>
            {
                Some(Fit::Exact)
            }
            _ => None,
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        self.fit(value).is_some()
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeDescriptor::Any => write!(f, "Object"),
            TypeDescriptor::Void => write!(f, "void"),
            TypeDescriptor::Bool => write!(f, "boolean"),
            TypeDescriptor::Int => write!(f, "long"),
            TypeDescriptor::Float => write!(f, "double"),
            TypeDescriptor::String => write!(f, "String"),
            TypeDescriptor::Class(name) => write!(f, "{}", name),
        }
    }
}
