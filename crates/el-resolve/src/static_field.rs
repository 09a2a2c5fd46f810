//! Resolver for static fields, static methods and constructors of a class.
//!
//! It handles accesses whose base is a [`Value::Class`] and whose property is a
//! [`Value::String`]. Static fields are read-only through this resolver; the
//! pseudo-method [`CONSTRUCTOR_NAME`] invokes a constructor.

use std::sync::Arc;

use el_core::class::{ClassHandle, FieldDescriptor, LookupError};
use el_core::error::MemberKind;
use el_core::messages::{CONSTRUCTOR_NOT_FOUND, STATIC_METHOD_NOT_FOUND};
use el_core::{debug, trace, ElContext, Result, TypeDescriptor, Value};

use crate::error::{field_not_found, invocation_failure, member_not_found, not_writable};
use crate::resolver::{ElResolver, FeatureDescriptor};
use crate::selector::{Member, MemberSelector, SelectionError, SignatureSelector};

/// Method name that requests a constructor call.
pub const CONSTRUCTOR_NAME: &str = "<init>";

#[derive(Clone)]
pub struct StaticFieldResolver {
    selector: Arc<dyn MemberSelector>,
}

impl Default for StaticFieldResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticFieldResolver {
    pub fn new() -> Self {
        Self::with_selector(Arc::new(SignatureSelector))
    }

    pub fn with_selector(selector: Arc<dyn MemberSelector>) -> Self {
        Self { selector }
    }

    /// The class and member name when this resolver applies to the access.
    fn target<'a>(base: &'a Value, property: &'a Value) -> Option<(&'a ClassHandle, &'a str)> {
        Some((base.as_class()?, property.as_str()?))
    }

    fn public_static_field<'a>(
        class: &'a ClassHandle,
        name: &str,
    ) -> std::result::Result<&'a Arc<FieldDescriptor>, LookupError> {
        let field = class.field(name)?;
        if field.is_public() && field.is_static() {
            Ok(field)
        } else {
            Err(LookupError::IllegalAccess(name.to_string()))
        }
    }

    fn log_attempt(ctx: &ElContext, op: &str, class: &ClassHandle, member: &str) {
        if ctx.trace_resolution() {
            debug!("static {} {}.{}", op, class.name(), member);
        } else {
            trace!("static {} {}.{}", op, class.name(), member);
        }
    }

    fn selection_error(
        ctx: &ElContext,
        class: &ClassHandle,
        member: &str,
        err: SelectionError,
    ) -> el_core::Error {
        debug!("selection failed for {}.{}: {}", class.name(), member, err);
        let (kind, message_id) = if member == CONSTRUCTOR_NAME {
            (MemberKind::Constructor, CONSTRUCTOR_NOT_FOUND)
        } else {
            (MemberKind::Method, STATIC_METHOD_NOT_FOUND)
        };
        member_not_found(ctx, kind, message_id, class, member, &err.to_string())
    }

    fn dispatch(
        &self,
        ctx: &ElContext,
        class: &ClassHandle,
        name: &str,
        param_types: Option<&[TypeDescriptor]>,
        params: &[Value],
    ) -> Result<Value> {
        let member = if name == CONSTRUCTOR_NAME {
            self.selector.find_constructor(class, param_types, params)
        } else {
            self.selector
                .find_method(class, name, param_types, params, true)
        }
        .map_err(|err| Self::selection_error(ctx, class, name, err))?;

        if let Member::Method(method) = &member {
            trace!("calling {}.{}{}", class.name(), method.name, member.signature());
        }
        self.selector
            .invoke(class, &member, None, params)
            .map_err(|cause| {
                debug!("{}.{} threw: {}", class.name(), name, cause);
                invocation_failure(ctx, class, name, cause)
            })
    }
}

impl ElResolver for StaticFieldResolver {
    fn get_value(
        &self,
        ctx: &mut ElContext,
        base: &Value,
        property: &Value,
    ) -> Result<Option<Value>> {
        let Some((class, field_name)) = Self::target(base, property) else {
            return Ok(None);
        };
        // resolved before the lookup: a miss is still this resolver's decision
        ctx.set_property_resolved_for(base, property);
        Self::log_attempt(ctx, "read", class, field_name);

        match Self::public_static_field(class, field_name).and_then(|field| field.get_static()) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                debug!("static read of {}.{} failed: {}", class.name(), field_name, err);
                Err(field_not_found(ctx, class, field_name))
            }
        }
    }

    fn set_value(
        &self,
        ctx: &mut ElContext,
        base: &Value,
        property: &Value,
        _value: Value,
    ) -> Result<()> {
        match Self::target(base, property) {
            Some((class, field_name)) => Err(not_writable(ctx, class, field_name)),
            None => Ok(()),
        }
    }

    fn invoke(
        &self,
        ctx: &mut ElContext,
        base: &Value,
        method: &Value,
        param_types: Option<&[TypeDescriptor]>,
        params: &[Value],
    ) -> Result<Option<Value>> {
        let Some((class, name)) = Self::target(base, method) else {
            return Ok(None);
        };
        Self::log_attempt(ctx, "invoke", class, name);

        let value = self.dispatch(ctx, class, name, param_types, params)?;
        ctx.set_property_resolved_for(base, method);
        Ok(Some(value))
    }

    fn get_type(
        &self,
        ctx: &mut ElContext,
        base: &Value,
        property: &Value,
    ) -> Result<Option<TypeDescriptor>> {
        let Some((class, field_name)) = Self::target(base, property) else {
            return Ok(None);
        };
        ctx.set_property_resolved(true);
        Self::log_attempt(ctx, "type", class, field_name);

        match Self::public_static_field(class, field_name) {
            Ok(field) => Ok(Some(field.ty.clone())),
            Err(_) => Err(field_not_found(ctx, class, field_name)),
        }
    }

    fn is_read_only(&self, ctx: &mut ElContext, base: &Value, property: &Value) -> Result<bool> {
        // existence of the field is not checked
        if Self::target(base, property).is_some() {
            ctx.set_property_resolved(true);
        }
        Ok(true)
    }

    fn feature_descriptors(
        &self,
        _ctx: &ElContext,
        _base: &Value,
    ) -> Option<Vec<FeatureDescriptor>> {
        None
    }

    fn common_property_type(&self, _ctx: &ElContext, _base: &Value) -> Option<TypeDescriptor> {
        Some(TypeDescriptor::String)
    }
}
