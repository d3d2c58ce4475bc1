use anyhow::{Context, Result};
use trackingtags_api_client::{CatalogClient, CatalogSession, ClientConfig};
use trackingtags_core::Catalog;
use trackingtags_runtime_config::Settings;

/// OS-reported user handle, used for catalog allow-lists.
pub fn current_user() -> Option<String> {
    ["USER", "USERNAME"]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

pub fn build_client(settings: &Settings, catalog_url: Option<&str>) -> Result<CatalogClient> {
    let config = ClientConfig {
        catalog_url: catalog_url
            .map(str::to_string)
            .unwrap_or_else(|| settings.remote.catalog_url.clone()),
        version_url: settings.remote.version_url.clone(),
        timeout: settings.remote.timeout(),
    };
    CatalogClient::new(config).context("Failed to build HTTP client")
}

/// Fetch the catalog once for this invocation.
pub async fn load_catalog(settings: &Settings, catalog_url: Option<&str>) -> Result<Catalog> {
    let client = build_client(settings, catalog_url)?;
    let session = CatalogSession::new(client, current_user());
    session.refresh().await.context("failed to load pages")
}
