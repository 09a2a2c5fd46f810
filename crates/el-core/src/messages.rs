//! Localised error messages keyed by message id.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

use crate::collections::ConcurrentMap;

pub const STATIC_FIELD_READ_ERROR: &str = "static-field-read-error";
pub const STATIC_FIELD_WRITE_ERROR: &str = "static-field-write-error";
pub const STATIC_METHOD_NOT_FOUND: &str = "static-method-not-found";
pub const CONSTRUCTOR_NOT_FOUND: &str = "constructor-not-found";
pub const STATIC_INVOCATION_ERROR: &str = "static-invocation-error";

const ROOT_LOCALE: &str = "";

const DEFAULT_BUNDLE: &[(&str, &str)] = &[
    (
        STATIC_FIELD_READ_ERROR,
        "Either '{1}' is not a public static field of the class '{0}' or field is inaccessible",
    ),
    (
        STATIC_FIELD_WRITE_ERROR,
        "Cannot write to the field '{1}' of class '{0}': static fields are read-only",
    ),
    (
        STATIC_METHOD_NOT_FOUND,
        "Unable to find public static method '{1}' of class '{0}': {2}",
    ),
    (
        CONSTRUCTOR_NOT_FOUND,
        "Unable to find public constructor of class '{0}': {2}",
    ),
    (
        STATIC_INVOCATION_ERROR,
        "Invocation of '{1}' on class '{0}' failed: {2}",
    ),
];

type Bundle = HashMap<String, String>;

/// Message templates per locale. Templates use positional `{0}`, `{1}`, ... placeholders.
#[derive(Debug)]
pub struct MessageCatalog {
    bundles: ConcurrentMap<String, Arc<Bundle>>,
}

static SHARED_CATALOG: Lazy<Arc<MessageCatalog>> = Lazy::new(|| Arc::new(MessageCatalog::new()));

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageCatalog {
    /// Catalog holding the built-in root bundle.
    pub fn new() -> Self {
        let catalog = Self {
            bundles: ConcurrentMap::new(),
        };
        catalog.register_bundle(
            ROOT_LOCALE,
            DEFAULT_BUNDLE
                .iter()
                .map(|(id, template)| (id.to_string(), template.to_string())),
        );
        catalog
    }

    /// Process-wide catalog used by contexts that do not bring their own.
    pub fn shared() -> Arc<MessageCatalog> {
        SHARED_CATALOG.clone()
    }

    /// Register (or replace) the bundle for `locale`.
    pub fn register_bundle(
        &self,
        locale: &str,
        messages: impl IntoIterator<Item = (String, String)>,
    ) {
        self.bundles
            .insert(normalize_locale(locale), Arc::new(messages.into_iter().collect()));
    }

    fn template(&self, locale: &str, id: &str) -> Option<String> {
        candidate_locales(locale).into_iter().find_map(|candidate| {
            self.bundles
                .get_cloned(&candidate)
                .and_then(|bundle| bundle.get(id).cloned())
        })
    }

    /// Render message `id` for `locale` with positional arguments.
    pub fn format(&self, locale: Option<&str>, id: &str, args: &[&str]) -> String {
        let locale = locale.unwrap_or(ROOT_LOCALE);
        match self.template(locale, id) {
            Some(template) => substitute(&template, args),
            None => {
                let shown = if locale.is_empty() { "default" } else { locale };
                format!("Missing Resource: '{}' for Locale {}", id, shown)
            }
        }
    }
}

fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('-', "_")
}

/// `de_CH` -> [`de_CH`, `de`, ``]
fn candidate_locales(locale: &str) -> Vec<String> {
    let mut current = normalize_locale(locale);
    let mut candidates = Vec::new();
    while !current.is_empty() {
        candidates.push(current.clone());
        match current.rfind('_') {
            Some(idx) => current.truncate(idx),
            None => current.clear(),
        }
    }
    candidates.push(ROOT_LOCALE.to_string());
    candidates
}

fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let index = after
            .find('}')
            .and_then(|close| after[..close].parse::<usize>().ok().map(|idx| (idx, close)));
        match index {
            Some((idx, close)) if idx < args.len() => {
                out.push_str(args[idx]);
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
