use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::sync::{Arc, RwLock};

use itertools::Itertools;

use crate::class::ClassHandle;
use crate::ty::TypeDescriptor;

/// A value flowing through expression evaluation.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// A reference to a class, as produced from a type literal.
    Class(ClassHandle),
    Object(ObjectRef),
}

impl Value {
    pub const NULL: Value = Value::Null;

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassHandle> {
        match self {
            Value::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Runtime type of this value; `None` for null.
    pub fn type_descriptor(&self) -> Option<TypeDescriptor> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(TypeDescriptor::Bool),
            Value::Int(_) => Some(TypeDescriptor::Int),
            Value::Float(_) => Some(TypeDescriptor::Float),
            Value::String(_) => Some(TypeDescriptor::String),
            Value::Class(_) => Some(TypeDescriptor::class("Class")),
            Value::Object(object) => Some(TypeDescriptor::class(object.class().name())),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b) == std::cmp::Ordering::Equal,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Class(a), Value::Class(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Class(class) => write!(f, "class {}", class.name()),
            Value::Object(object) => write!(f, "{}", object),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<ClassHandle> for Value {
    fn from(v: ClassHandle) -> Self {
        Value::Class(v)
    }
}

impl From<ObjectRef> for Value {
    fn from(v: ObjectRef) -> Self {
        Value::Object(v)
    }
}

/// An instance created by a constructor. Compared by identity.
#[derive(Clone)]
pub struct ObjectRef(Arc<Instance>);

struct Instance {
    class: ClassHandle,
    fields: RwLock<BTreeMap<String, Value>>,
}

impl ObjectRef {
    pub fn new(class: ClassHandle, fields: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self(Arc::new(Instance {
            class,
            fields: RwLock::new(fields.into_iter().collect()),
        }))
    }

    pub fn class(&self) -> &ClassHandle {
        &self.0.class
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.0.fields.read() {
            Ok(fields) => fields.get(name).cloned(),
            Err(poison) => poison.into_inner().get(name).cloned(),
        }
    }

    pub fn set(&self, name: impl Into<String>, value: Value) {
        match self.0.fields.write() {
            Ok(mut fields) => fields.insert(name.into(), value),
            Err(poison) => poison.into_inner().insert(name.into(), value),
        };
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Display for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fields = match self.0.fields.read() {
            Ok(fields) => fields
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .join(", "),
            Err(_) => String::from(".."),
        };
        write!(f, "{} {{ {} }}", self.class().name(), fields)
    }
}

impl Debug for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectRef({})", self)
    }
}
