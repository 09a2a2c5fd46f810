//! Class tables that stand in for runtime reflection.
//!
//! A [`ClassDescriptor`] lists the fields, methods and constructors of one type.
//! Descriptors are immutable once built; the only mutable part is the value slot
//! of a static field, which the host may update between evaluations.

use std::fmt::{Debug, Display, Formatter};
use std::sync::{Arc, RwLock};

use derive_more::Deref;
use thiserror::Error;

use crate::error::Thrown;
use crate::ty::TypeDescriptor;
use crate::value::{ObjectRef, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// Whether a member belongs to the type itself or to its instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Static,
    Instance,
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

pub type NativeMethod =
    Arc<dyn Fn(Option<&Value>, &[Value]) -> Result<Value, Thrown> + Send + Sync>;
pub type NativeConstructor =
    Arc<dyn Fn(&ClassHandle, &[Value]) -> Result<Value, Thrown> + Send + Sync>;

/// Reflective lookup failures. These never leave the resolver crate as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("no such field: {0}")]
    NoSuchField(String),
    #[error("field {0} is not accessible")]
    IllegalAccess(String),
}

pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
    pub visibility: Visibility,
    pub binding: Binding,
    slot: RwLock<Value>,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        ty: TypeDescriptor,
        visibility: Visibility,
        binding: Binding,
        initial: Value,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility,
            binding,
            slot: RwLock::new(initial),
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_static(&self) -> bool {
        self.binding == Binding::Static
    }

    /// Current value of a static field.
    pub fn get_static(&self) -> Result<Value, LookupError> {
        if !self.is_static() {
            return Err(LookupError::IllegalAccess(self.name.clone()));
        }
        Ok(match self.slot.read() {
            Ok(value) => value.clone(),
            Err(poison) => poison.into_inner().clone(),
        })
    }

    fn store(&self, value: Value) {
        match self.slot.write() {
            Ok(mut slot) => *slot = value,
            Err(poison) => *poison.into_inner() = value,
        }
    }
}

impl Debug for FieldDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("visibility", &self.visibility)
            .field("binding", &self.binding)
            .finish()
    }
}

pub struct MethodDescriptor {
    pub name: String,
    pub params: Vec<TypeDescriptor>,
    pub ret: TypeDescriptor,
    pub visibility: Visibility,
    pub binding: Binding,
    body: NativeMethod,
}

impl MethodDescriptor {
    pub fn new(
        name: impl Into<String>,
        params: Vec<TypeDescriptor>,
        ret: TypeDescriptor,
        visibility: Visibility,
        binding: Binding,
        body: impl Fn(Option<&Value>, &[Value]) -> Result<Value, Thrown> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            ret,
            visibility,
            binding,
            body: Arc::new(body),
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_static(&self) -> bool {
        self.binding == Binding::Static
    }

    pub fn call(&self, receiver: Option<&Value>, args: &[Value]) -> Result<Value, Thrown> {
        let value = (self.body)(receiver, args)?;
        if self.ret == TypeDescriptor::Void {
            return Ok(Value::Null);
        }
        Ok(value)
    }
}

impl Debug for MethodDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("ret", &self.ret)
            .field("visibility", &self.visibility)
            .field("binding", &self.binding)
            .finish()
    }
}

pub struct ConstructorDescriptor {
    pub params: Vec<TypeDescriptor>,
    pub visibility: Visibility,
    body: NativeConstructor,
}

impl ConstructorDescriptor {
    pub fn new(
        params: Vec<TypeDescriptor>,
        visibility: Visibility,
        body: impl Fn(&ClassHandle, &[Value]) -> Result<Value, Thrown> + Send + Sync + 'static,
    ) -> Self {
        Self {
            params,
            visibility,
            body: Arc::new(body),
        }
    }

    /// A constructor that assigns its arguments to the instance fields in declaration order.
    pub fn field_wise(params: Vec<TypeDescriptor>, visibility: Visibility) -> Self {
        Self::new(params, visibility, |class, args| {
            let names = class
                .fields
                .iter()
                .filter(|field| !field.is_static())
                .map(|field| field.name.clone());
            Ok(Value::Object(ObjectRef::new(
                class.clone(),
                names.zip(args.iter().cloned()),
            )))
        })
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn construct(&self, class: &ClassHandle, args: &[Value]) -> Result<Value, Thrown> {
        (self.body)(class, args)
    }
}

impl Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("params", &self.params)
            .field("visibility", &self.visibility)
            .finish()
    }
}

#[derive(Debug)]
pub struct ClassDescriptor {
    pub name: String,
    pub fields: Vec<Arc<FieldDescriptor>>,
    pub methods: Vec<Arc<MethodDescriptor>>,
    pub constructors: Vec<Arc<ConstructorDescriptor>>,
}

/// Shared reference to a class. Two handles are equal when they point at the same descriptor.
#[derive(Clone, Deref)]
pub struct ClassHandle(Arc<ClassDescriptor>);

impl ClassHandle {
    pub fn new(descriptor: ClassDescriptor) -> Self {
        Self(Arc::new(descriptor))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Last segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        self.0.name.rsplit('.').next().unwrap_or(&self.0.name)
    }

    /// Public field lookup. Non-public fields are reported as missing.
    pub fn field(&self, name: &str) -> Result<&Arc<FieldDescriptor>, LookupError> {
        self.0
            .fields
            .iter()
            .find(|field| field.name == name && field.is_public())
            .ok_or_else(|| LookupError::NoSuchField(name.to_string()))
    }

    /// Field lookup regardless of visibility.
    pub fn declared_field(&self, name: &str) -> Option<&Arc<FieldDescriptor>> {
        self.0.fields.iter().find(|field| field.name == name)
    }

    pub fn methods_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Arc<MethodDescriptor>> + 'a {
        self.0.methods.iter().filter(move |method| method.name == name)
    }

    /// Host-side update of a static field. Returns `false` when no static field has that name.
    pub fn set_static(&self, name: &str, value: Value) -> bool {
        match self.declared_field(name) {
            Some(field) if field.is_static() => {
                field.store(value);
                true
            }
            _ => false,
        }
    }
}

impl PartialEq for ClassHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ClassHandle {}

impl Debug for ClassHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ClassHandle({})", self.0.name)
    }
}

/// Fluent builder for [`ClassHandle`]s.
pub struct ClassBuilder {
    descriptor: ClassDescriptor,
}

impl ClassBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            descriptor: ClassDescriptor {
                name: name.into(),
                fields: Vec::new(),
                methods: Vec::new(),
                constructors: Vec::new(),
            },
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.descriptor.fields.push(Arc::new(field));
        self
    }

    /// Public static field.
    pub fn static_field(self, name: impl Into<String>, ty: TypeDescriptor, value: Value) -> Self {
        self.field(FieldDescriptor::new(
            name,
            ty,
            Visibility::Public,
            Binding::Static,
            value,
        ))
    }

    /// Public instance field.
    pub fn instance_field(self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.field(FieldDescriptor::new(
            name,
            ty,
            Visibility::Public,
            Binding::Instance,
            Value::Null,
        ))
    }

    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.descriptor.methods.push(Arc::new(method));
        self
    }

    /// Public static method.
    pub fn static_method(
        self,
        name: impl Into<String>,
        params: Vec<TypeDescriptor>,
        ret: TypeDescriptor,
        body: impl Fn(&[Value]) -> Result<Value, Thrown> + Send + Sync + 'static,
    ) -> Self {
        self.method(MethodDescriptor::new(
            name,
            params,
            ret,
            Visibility::Public,
            Binding::Static,
            move |_, args| body(args),
        ))
    }

    pub fn constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.descriptor.constructors.push(Arc::new(constructor));
        self
    }

    pub fn build(self) -> ClassHandle {
        ClassHandle::new(self.descriptor)
    }
}
