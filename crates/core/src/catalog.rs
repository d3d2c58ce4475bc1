//! Remote page catalog document.
//!
//! The catalog has been published in two shapes over time: a flat `pages`
//! list (no hubs) and a `hubs` object mapping hub names to page lists.
//! Both may appear in one document, in which case flat entries carry no hub.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One selectable entry as published in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub name: String,
    /// Overrides `name` in generated tag text.
    #[serde(default, rename = "pageName", skip_serializing_if = "Option::is_none")]
    pub display_page_name: Option<String>,
    /// Filled in from the `hubs` key; never read from the entry body.
    #[serde(skip)]
    pub hub: Option<String>,
    /// Case-insensitive allow-list of user handles. Empty means unrestricted.
    #[serde(default, rename = "users", skip_serializing_if = "Option::is_none")]
    pub restricted_to: Option<Vec<String>>,
}

impl PageEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_page_name: None,
            hub: None,
            restricted_to: None,
        }
    }

    pub fn with_hub(mut self, hub: impl Into<String>) -> Self {
        self.hub = Some(hub.into());
        self
    }

    pub fn with_page_name(mut self, page_name: impl Into<String>) -> Self {
        self.display_page_name = Some(page_name.into());
        self
    }

    pub fn with_allowed_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.restricted_to = Some(users.into_iter().map(Into::into).collect());
        self
    }

    /// Stable identifier: `hub:name`, or `name` for hubless entries.
    pub fn id(&self) -> String {
        match self.hub.as_deref() {
            Some(hub) => format!("{hub}:{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Whether `user` may see this entry.
    ///
    /// Entries without a (non-empty) allow-list are visible to everyone.
    /// Restricted entries are hidden when no user handle is known.
    pub fn is_visible_to(&self, user: Option<&str>) -> bool {
        let Some(allowed) = self.restricted_to.as_deref() else {
            return true;
        };
        if allowed.is_empty() {
            return true;
        }
        let Some(user) = user else {
            return false;
        };
        let user = user.to_lowercase();
        allowed.iter().any(|handle| handle.to_lowercase() == user)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog has neither `pages` nor `hubs`")]
    UnknownShape,
}

/// Which historical layout a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogShape {
    Flat,
    Grouped,
    Mixed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<PageEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hubs: Option<BTreeMap<String, Vec<PageEntry>>>,
}

impl CatalogDocument {
    pub fn from_json(body: &str) -> Result<Self, CatalogError> {
        let document: Self = serde_json::from_str(body)?;
        document.shape()?;
        Ok(document)
    }

    pub fn shape(&self) -> Result<CatalogShape, CatalogError> {
        match (self.pages.is_some(), self.hubs.is_some()) {
            (true, false) => Ok(CatalogShape::Flat),
            (false, true) => Ok(CatalogShape::Grouped),
            (true, true) => Ok(CatalogShape::Mixed),
            (false, false) => Err(CatalogError::UnknownShape),
        }
    }

    /// Flatten both layouts into entries with `hub` assigned.
    ///
    /// Blank names are dropped, as is any entry whose id repeats an earlier
    /// one (a flat `snap:a` and a grouped `snap` entry `a` collide). The
    /// `restricted_to` allow-list is only honored for grouped entries.
    pub fn into_entries(self) -> Vec<PageEntry> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut entries = Vec::new();

        let flat = self.pages.unwrap_or_default().into_iter().map(|mut entry| {
            entry.hub = None;
            entry.restricted_to = None;
            entry
        });
        let grouped = self
            .hubs
            .unwrap_or_default()
            .into_iter()
            .flat_map(|(hub, pages)| {
                pages.into_iter().map(move |mut entry| {
                    entry.hub = Some(hub.clone());
                    entry
                })
            });

        for entry in flat.chain(grouped) {
            if entry.name.trim().is_empty() {
                warn!(hub = ?entry.hub, "dropping catalog entry with empty name");
                continue;
            }
            let id = entry.id();
            if !seen.insert(id.clone()) {
                warn!(%id, hub = ?entry.hub, name = %entry.name, "dropping duplicate catalog entry");
                continue;
            }
            entries.push(entry);
        }
        entries
    }
}
