use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use trackingtags_core::Catalog;

use crate::client::CatalogClient;
use crate::error::Result;

/// Keeps the last successfully fetched catalog.
///
/// Refreshes are serialized: a caller that arrives while another refresh is
/// in flight waits for it and then performs its own fetch. A failed refresh
/// leaves the previous catalog in place and returns the error.
pub struct CatalogSession {
    client: CatalogClient,
    current_user: Option<String>,
    current: RwLock<Catalog>,
    refresh_gate: Mutex<()>,
}

impl CatalogSession {
    pub fn new(client: CatalogClient, current_user: Option<String>) -> Self {
        Self {
            client,
            current_user,
            current: RwLock::new(Catalog::empty()),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Snapshot of the catalog; empty until the first successful refresh.
    pub async fn catalog(&self) -> Catalog {
        self.current.read().await.clone()
    }

    pub async fn refresh(&self) -> Result<Catalog> {
        let _gate = self.refresh_gate.lock().await;
        match self.client.fetch_catalog(self.current_user.as_deref()).await {
            Ok(catalog) => {
                debug!(pages = catalog.len(), "catalog refreshed");
                *self.current.write().await = catalog.clone();
                Ok(catalog)
            }
            Err(err) => {
                warn!("failed to refresh page catalog: {err}");
                Err(err)
            }
        }
    }
}
