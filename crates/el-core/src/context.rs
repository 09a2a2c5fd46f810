use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::class::ClassHandle;
use crate::config::ResolverConfig;
use crate::diagnostics::DiagnosticManager;
use crate::messages::MessageCatalog;
use crate::registry::ClassRegistry;
use crate::value::Value;

/// Observer notified when a resolver claims a `(base, property)` access.
pub trait EvaluationListener: Send + Sync {
    fn property_resolved(&self, base: &Value, property: &Value);
}

/// Per-evaluation state shared between the pipeline and its resolvers.
///
/// The `property_resolved` flag is how a resolver tells the pipeline that it
/// made a decision about the current access. The pipeline clears it before
/// asking each resolver.
pub struct ElContext {
    property_resolved: bool,
    locale: Option<String>,
    trace_resolution: bool,
    messages: Arc<MessageCatalog>,
    classes: Arc<ClassRegistry>,
    listeners: Vec<Arc<dyn EvaluationListener>>,
    diagnostics: DiagnosticManager,
}

impl Default for ElContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ElContext {
    /// Context configured from the environment, with the built-in classes imported.
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::from_env())
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        Self {
            property_resolved: false,
            locale: config.locale,
            trace_resolution: config.trace_resolution,
            messages: MessageCatalog::shared(),
            classes: ClassRegistry::shared(),
            listeners: Vec::new(),
            diagnostics: DiagnosticManager::new(),
        }
    }

    pub fn with_classes(mut self, classes: Arc<ClassRegistry>) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_messages(mut self, messages: Arc<MessageCatalog>) -> Self {
        self.messages = messages;
        self
    }

    pub fn add_listener(&mut self, listener: Arc<dyn EvaluationListener>) {
        self.listeners.push(listener);
    }

    pub fn is_property_resolved(&self) -> bool {
        self.property_resolved
    }

    pub fn set_property_resolved(&mut self, resolved: bool) {
        self.property_resolved = resolved;
    }

    /// Mark the access resolved and notify listeners about `(base, property)`.
    pub fn set_property_resolved_for(&mut self, base: &Value, property: &Value) {
        self.property_resolved = true;
        for listener in &self.listeners {
            listener.property_resolved(base, property);
        }
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = Some(locale.into());
    }

    pub fn trace_resolution(&self) -> bool {
        self.trace_resolution
    }

    /// Render an error message in this context's locale.
    pub fn message(&self, id: &str, args: &[&str]) -> String {
        self.messages.format(self.locale(), id, args)
    }

    /// Errors raised by resolvers during this evaluation.
    pub fn diagnostics(&self) -> &DiagnosticManager {
        &self.diagnostics
    }

    pub fn classes(&self) -> &Arc<ClassRegistry> {
        &self.classes
    }

    /// Turn a type literal into a class handle.
    pub fn resolve_class(&self, name: &str) -> Option<ClassHandle> {
        self.classes.resolve(name)
    }
}

impl Debug for ElContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElContext")
            .field("property_resolved", &self.property_resolved)
            .field("locale", &self.locale)
            .field("listeners", &self.listeners.len())
            .field("diagnostics", &self.diagnostics.get_diagnostics().len())
            .finish()
    }
}
