use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use tracing::debug;

use trackingtags_core::version::VersionManifest;
use trackingtags_core::{Catalog, CatalogDocument};

use crate::error::{FetchError, Result};

/// Where the remote documents live and how long to wait for them.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub catalog_url: String,
    pub version_url: String,
    pub timeout: Duration,
}

/// HTTP client for the page catalog and version manifest.
///
/// Every request carries `no-cache` headers so the response always reflects
/// the live document.
pub struct CatalogClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl CatalogClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(FetchError::Network)?;
        Ok(Self { client, config })
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        debug!(url, "fetching remote document");
        let resp = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }
        Ok(resp.text().await?)
    }

    /// Fetch and parse the catalog without filtering or sorting.
    pub async fn fetch_document(&self) -> Result<CatalogDocument> {
        let body = self.get_text(&self.config.catalog_url).await?;
        Ok(CatalogDocument::from_json(&body)?)
    }

    /// Fetch the catalog and resolve it for `current_user`.
    pub async fn fetch_catalog(&self, current_user: Option<&str>) -> Result<Catalog> {
        let document = self.fetch_document().await?;
        Ok(Catalog::resolve(document, current_user))
    }

    pub async fn fetch_version_manifest(&self) -> Result<VersionManifest> {
        let body = self.get_text(&self.config.version_url).await?;
        VersionManifest::from_json(&body).map_err(FetchError::Manifest)
    }
}
