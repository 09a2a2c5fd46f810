use serde::Deserialize;
use std::sync::OnceLock;

fn env_true(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|val| {
        let trimmed = val.trim();
        !trimmed.is_empty() && !matches!(trimmed, "0" | "false" | "FALSE" | "False")
    })
}

fn bool_from_env(key: &str) -> bool {
    env_true(key).unwrap_or(false)
}

/// Log resolution attempts at `debug` instead of `trace`.
pub fn trace_resolution() -> bool {
    static TRACE: OnceLock<bool> = OnceLock::new();
    *TRACE.get_or_init(|| bool_from_env("EL_TRACE_RESOLUTION"))
}

/// Locale used for error messages when a context does not set one.
pub fn default_locale() -> Option<&'static str> {
    static LOCALE: OnceLock<Option<String>> = OnceLock::new();
    LOCALE
        .get_or_init(|| {
            std::env::var("EL_LOCALE")
                .ok()
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
        })
        .as_deref()
}

/// Explicit configuration for an evaluation context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub locale: Option<String>,
    pub trace_resolution: bool,
}

impl ResolverConfig {
    /// Configuration taken from `EL_LOCALE` and `EL_TRACE_RESOLUTION`.
    pub fn from_env() -> Self {
        Self {
            locale: default_locale().map(str::to_string),
            trace_resolution: trace_resolution(),
        }
    }

    pub fn from_json(text: &str) -> crate::Result<Self> {
        if text.trim().is_empty() {
            bail!("empty resolver configuration");
        }
        Ok(serde_json::from_str(text)?)
    }
}
