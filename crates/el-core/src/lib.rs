//! Core data model for static member resolution.
//!
//! This crate holds the values, type descriptors and class tables that the
//! resolvers in `el-resolve` operate on, together with the evaluation context,
//! message catalog and error taxonomy they share.

#[macro_use]
pub mod macros;

pub mod builtins;
pub mod class;
pub mod collections;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod messages;
pub mod registry;
pub mod ty;
pub mod value;

// Re-export commonly used items for convenience
pub use tracing;

pub use class::{ClassBuilder, ClassDescriptor, ClassHandle};
pub use context::{ElContext, EvaluationListener};
pub use ty::TypeDescriptor;
pub use value::Value;

// Alias for error types
pub type Error = crate::error::ElError;
pub type Result<T> = crate::error::Result<T>;
