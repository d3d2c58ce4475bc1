//! Persisted tracking-tags settings.
//!
//! The CLI reads `trackingtags.toml` at startup and rewrites it whenever a
//! persisted field changes. Every field has a serde default so partial or
//! older files still load.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical config file name.
pub const CONFIG_FILE_NAME: &str = "trackingtags.toml";

pub const DEFAULT_CATALOG_URL: &str = "https://vero.andydragon.com/static/data/pages.json";
pub const DEFAULT_VERSION_URL: &str =
    "https://vero.andydragon.com/static/data/trackingtags/version.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level settings document (persisted as `trackingtags.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub selection: SelectionSettings,
    #[serde(default)]
    pub remote: RemoteSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SelectionSettings {
    /// Id of the last selected page (`hub:name`, or `name` for hubless pages).
    #[serde(default, alias = "Page", skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default = "default_false", alias = "IncludeHash")]
    pub include_hash: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteSettings {
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,
    #[serde(default = "default_version_url")]
    pub version_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            version_url: default_version_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ── Serde default functions ─────────────────────────────────────────────

fn default_false() -> bool {
    false
}
fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}
fn default_version_url() -> String {
    DEFAULT_VERSION_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Apply compatibility fallbacks after loading raw TOML.
/// Returns true when any field was updated.
pub fn apply_compat_fallbacks(settings: &mut Settings) -> bool {
    let mut changed = false;

    if settings.remote.catalog_url.trim().is_empty() {
        settings.remote.catalog_url = default_catalog_url();
        changed = true;
    }

    if settings.remote.version_url.trim().is_empty() {
        settings.remote.version_url = default_version_url();
        changed = true;
    }

    if settings.remote.timeout_secs == 0 {
        settings.remote.timeout_secs = default_timeout_secs();
        changed = true;
    }

    if settings
        .selection
        .page
        .as_deref()
        .is_some_and(|page| page.trim().is_empty())
    {
        settings.selection.page = None;
        changed = true;
    }

    changed
}
