use el_core::{ElContext, Result, TypeDescriptor, Value};

/// A property that a resolver can enumerate for a base object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
    pub read_only: bool,
}

/// One strategy in the resolution pipeline.
///
/// Every operation either claims the access by setting
/// [`ElContext::is_property_resolved`] or returns without touching the flag,
/// in which case the returned value must be ignored by the caller.
pub trait ElResolver: Send + Sync {
    fn get_value(
        &self,
        ctx: &mut ElContext,
        base: &Value,
        property: &Value,
    ) -> Result<Option<Value>>;

    fn set_value(
        &self,
        ctx: &mut ElContext,
        base: &Value,
        property: &Value,
        value: Value,
    ) -> Result<()>;

    /// Invoke `method` on `base`. `param_types` of `None` means the signature is unknown.
    fn invoke(
        &self,
        _ctx: &mut ElContext,
        _base: &Value,
        _method: &Value,
        _param_types: Option<&[TypeDescriptor]>,
        _params: &[Value],
    ) -> Result<Option<Value>> {
        Ok(None)
    }

    fn get_type(
        &self,
        ctx: &mut ElContext,
        base: &Value,
        property: &Value,
    ) -> Result<Option<TypeDescriptor>>;

    fn is_read_only(&self, ctx: &mut ElContext, base: &Value, property: &Value) -> Result<bool>;

    /// Properties this resolver can enumerate for `base`, or `None` when it does not enumerate.
    fn feature_descriptors(
        &self,
        _ctx: &ElContext,
        _base: &Value,
    ) -> Option<Vec<FeatureDescriptor>> {
        None
    }

    /// Most general type of the property names this resolver accepts for `base`.
    fn common_property_type(&self, ctx: &ElContext, base: &Value) -> Option<TypeDescriptor>;
}
