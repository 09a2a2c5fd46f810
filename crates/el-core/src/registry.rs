use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::class::ClassHandle;
use crate::collections::ConcurrentMap;

static SHARED_REGISTRY: Lazy<Arc<ClassRegistry>> =
    Lazy::new(|| Arc::new(ClassRegistry::with_builtins()));

/// Maps type names to class handles.
///
/// Classes are registered under their qualified name; the simple name is
/// imported as well unless another class already claimed it.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: ConcurrentMap<String, ClassHandle>,
    imports: ConcurrentMap<String, String>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with [`crate::builtins`].
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for class in crate::builtins::all() {
            registry.register(class);
        }
        registry
    }

    /// Process-wide registry holding the built-ins; contexts use it unless given another.
    pub fn shared() -> Arc<ClassRegistry> {
        SHARED_REGISTRY.clone()
    }

    pub fn register(&self, class: ClassHandle) {
        let simple = class.simple_name().to_string();
        let qualified = class.name().to_string();
        if simple != qualified && !self.imports.contains_key(&simple) {
            self.imports.insert(simple, qualified.clone());
        }
        if self.classes.insert(qualified.clone(), class).is_some() {
            warn!("class {} registered twice; keeping the latest", qualified);
        }
    }

    /// Look up by qualified name, falling back to imported simple names.
    pub fn resolve(&self, name: &str) -> Option<ClassHandle> {
        if let Some(class) = self.classes.get_cloned(name) {
            return Some(class);
        }
        let qualified = self.imports.get_cloned(name)?;
        self.classes.get_cloned(&qualified)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
