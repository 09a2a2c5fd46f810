use std::sync::Arc;

use el_core::{trace, ElContext, Result, TypeDescriptor, Value};

use crate::resolver::{ElResolver, FeatureDescriptor};

/// The resolution pipeline: asks each resolver in order until one claims the access.
#[derive(Clone, Default)]
pub struct CompositeResolver {
    resolvers: Vec<Arc<dyn ElResolver>>,
}

pub struct CompositeResolverBuilder {
    resolvers: Vec<Arc<dyn ElResolver>>,
}

impl CompositeResolverBuilder {
    pub fn add(mut self, resolver: impl ElResolver + 'static) -> Self {
        self.resolvers.push(Arc::new(resolver));
        self
    }

    pub fn add_shared(mut self, resolver: Arc<dyn ElResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    pub fn build(self) -> CompositeResolver {
        CompositeResolver {
            resolvers: self.resolvers,
        }
    }
}

impl CompositeResolver {
    pub fn builder() -> CompositeResolverBuilder {
        CompositeResolverBuilder {
            resolvers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl ElResolver for CompositeResolver {
    fn get_value(
        &self,
        ctx: &mut ElContext,
        base: &Value,
        property: &Value,
    ) -> Result<Option<Value>> {
        ctx.set_property_resolved(false);
        for (idx, resolver) in self.resolvers.iter().enumerate() {
            let value = resolver.get_value(ctx, base, property)?;
            if ctx.is_property_resolved() {
                trace!("get_value resolved by resolver #{}", idx);
                return Ok(value);
            }
        }
        Ok(None)
    }

    fn set_value(
        &self,
        ctx: &mut ElContext,
        base: &Value,
        property: &Value,
        value: Value,
    ) -> Result<()> {
        ctx.set_property_resolved(false);
        for resolver in &self.resolvers {
            resolver.set_value(ctx, base, property, value.clone())?;
            if ctx.is_property_resolved() {
                return Ok(());
            }
        }
        Ok(())
    }

    fn invoke(
        &self,
        ctx: &mut ElContext,
        base: &Value,
        method: &Value,
        param_types: Option<&[TypeDescriptor]>,
        params: &[Value],
    ) -> Result<Option<Value>> {
        ctx.set_property_resolved(false);
        for (idx, resolver) in self.resolvers.iter().enumerate() {
            let value = resolver.invoke(ctx, base, method, param_types, params)?;
            if ctx.is_property_resolved() {
                trace!("invoke resolved by resolver #{}", idx);
                return Ok(value);
            }
        }
        Ok(None)
    }

    fn get_type(
        &self,
        ctx: &mut ElContext,
        base: &Value,
        property: &Value,
    ) -> Result<Option<TypeDescriptor>> {
        ctx.set_property_resolved(false);
        for resolver in &self.resolvers {
            let ty = resolver.get_type(ctx, base, property)?;
            if ctx.is_property_resolved() {
                return Ok(ty);
            }
        }
        Ok(None)
    }

    fn is_read_only(&self, ctx: &mut ElContext, base: &Value, property: &Value) -> Result<bool> {
        ctx.set_property_resolved(false);
        for resolver in &self.resolvers {
            let read_only = resolver.is_read_only(ctx, base, property)?;
            if ctx.is_property_resolved() {
                return Ok(read_only);
            }
        }
        Ok(false)
    }

    fn feature_descriptors(&self, ctx: &ElContext, base: &Value) -> Option<Vec<FeatureDescriptor>> {
        let mut found = None;
        for resolver in &self.resolvers {
            if let Some(features) = resolver.feature_descriptors(ctx, base) {
                found.get_or_insert_with(Vec::new).extend(features);
            }
        }
        found
    }

    /// The answer of the first resolver that has one.
    fn common_property_type(&self, ctx: &ElContext, base: &Value) -> Option<TypeDescriptor> {
        self.resolvers
            .iter()
            .find_map(|resolver| resolver.common_property_type(ctx, base))
    }
}
