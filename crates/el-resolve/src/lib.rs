//! Member resolution for the expression evaluation pipeline.
//!
//! Resolvers are chained by a [`CompositeResolver`]. Each one inspects a
//! `(base, property)` pair and either claims it by setting the context's
//! `property_resolved` flag or leaves it for the next resolver.

pub mod composite;
pub mod error;
pub mod resolver;
pub mod selector;
pub mod static_field;

pub use composite::CompositeResolver;
pub use resolver::{ElResolver, FeatureDescriptor};
pub use selector::{Member, MemberSelector, SelectionError, SignatureSelector};
pub use static_field::{StaticFieldResolver, CONSTRUCTOR_NAME};
