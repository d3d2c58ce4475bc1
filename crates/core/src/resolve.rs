use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{CatalogDocument, PageEntry};

/// Hub name used for ordering and tag rules when an entry has no hub.
pub const DEFAULT_HUB: &str = "snap";

/// Hub whose pages produce a bare `{label}_{user}` tag.
pub const OTHER_HUB: &str = "other";

/// Placeholder entry that is never offered for selection.
pub const PLACEHOLDER_PAGE: &str = "default";

/// A catalog entry with its stable id and display label computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPage {
    pub id: String,
    pub display_label: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_page_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hub: Option<String>,
}

impl ResolvedPage {
    pub fn from_entry(entry: PageEntry) -> Self {
        let id = entry.id();
        let display_label = match entry.hub.as_deref() {
            Some(OTHER_HUB) | None => entry.name.clone(),
            Some(hub) => format!("{hub}_{}", entry.name),
        };
        Self {
            id,
            display_label,
            name: entry.name,
            display_page_name: entry.display_page_name,
            hub: entry.hub,
        }
    }

    /// Text used in tags: the page-name override, else the name.
    pub fn label(&self) -> &str {
        self.display_page_name.as_deref().unwrap_or(&self.name)
    }

    /// Direct pages start with `_` and produce a single tag.
    pub fn is_direct(&self) -> bool {
        self.name.starts_with('_')
    }

    fn ordering_hub(&self) -> &str {
        self.hub.as_deref().unwrap_or(DEFAULT_HUB)
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Display order: direct pages last, everything else grouped by hub.
pub fn compare_pages(a: &ResolvedPage, b: &ResolvedPage) -> Ordering {
    let primary = match (a.is_direct(), b.is_direct()) {
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (true, true) => cmp_ignore_case(&a.name, &b.name),
        (false, false) => cmp_ignore_case(a.ordering_hub(), b.ordering_hub())
            .then_with(|| cmp_ignore_case(&a.name, &b.name)),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Ordered, filtered list of selectable pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    pages: Vec<ResolvedPage>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Filter, annotate and sort a parsed document for `current_user`.
    pub fn resolve(document: CatalogDocument, current_user: Option<&str>) -> Self {
        let entries = document.into_entries();
        let total = entries.len();
        let mut pages: Vec<ResolvedPage> = entries
            .into_iter()
            .filter(|entry| entry.is_visible_to(current_user))
            .map(ResolvedPage::from_entry)
            .collect();
        pages.sort_by(compare_pages);
        debug!(total, visible = pages.len(), "resolved page catalog");
        Self { pages }
    }

    /// Look up a page by its persisted id. No fallback.
    pub fn find(&self, id: &str) -> Option<&ResolvedPage> {
        self.pages.iter().find(|page| page.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedPage> {
        self.pages.iter()
    }

    /// Pages offered for selection (hides the placeholder entry).
    pub fn selectable(&self) -> impl Iterator<Item = &ResolvedPage> {
        self.pages
            .iter()
            .filter(|page| page.name != PLACEHOLDER_PAGE)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ResolvedPage;
    type IntoIter = std::slice::Iter<'a, ResolvedPage>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_json(body: &str, user: Option<&str>) -> Catalog {
        Catalog::resolve(CatalogDocument::from_json(body).expect("parse"), user)
    }

    fn ids(catalog: &Catalog) -> Vec<&str> {
        catalog.iter().map(|page| page.id.as_str()).collect()
    }

    #[test]
    fn computes_ids_and_labels() {
        let snap = ResolvedPage::from_entry(PageEntry::new("abandoned").with_hub("snap"));
        assert_eq!(snap.id, "snap:abandoned");
        assert_eq!(snap.display_label, "snap_abandoned");

        let other = ResolvedPage::from_entry(PageEntry::new("community").with_hub("other"));
        assert_eq!(other.id, "other:community");
        assert_eq!(other.display_label, "community");

        let legacy = ResolvedPage::from_entry(PageEntry::new("reflection"));
        assert_eq!(legacy.id, "reflection");
        assert_eq!(legacy.display_label, "reflection");
    }

    #[test]
    fn label_prefers_page_name_override() {
        let page = ResolvedPage::from_entry(
            PageEntry::new("longexposure")
                .with_hub("snap")
                .with_page_name("long_exposure"),
        );
        assert_eq!(page.label(), "long_exposure");
        assert_eq!(page.display_label, "snap_longexposure");
    }

    #[test]
    fn sorts_by_hub_then_name_with_direct_pages_last() {
        let catalog = resolve_json(
            r#"{
                "pages": [{"name": "Macro"}],
                "hubs": {
                    "snap": [{"name": "zebra"}, {"name": "_manual"}],
                    "click": [{"name": "street"}, {"name": "Bridges"}],
                    "other": [{"name": "community"}],
                    "macro": [{"name": "_Alpha"}]
                }
            }"#,
            None,
        );
        assert_eq!(
            ids(&catalog),
            vec![
                "click:Bridges",
                "click:street",
                "other:community",
                "Macro",
                "snap:zebra",
                "macro:_Alpha",
                "snap:_manual",
            ]
        );
    }

    #[test]
    fn hubless_entries_sort_with_snap_hub() {
        let catalog = resolve_json(
            r#"{"pages":[{"name":"b"}],"hubs":{"snap":[{"name":"a"},{"name":"c"}]}}"#,
            None,
        );
        assert_eq!(ids(&catalog), vec!["snap:a", "b", "snap:c"]);
    }

    #[test]
    fn ordering_is_total_for_case_only_differences() {
        let catalog = resolve_json(r#"{"hubs":{"snap":[{"name":"abc"},{"name":"ABC"}]}}"#, None);
        assert_eq!(ids(&catalog), vec!["snap:ABC", "snap:abc"]);

        let reversed =
            resolve_json(r#"{"hubs":{"snap":[{"name":"ABC"},{"name":"abc"}]}}"#, None);
        assert_eq!(ids(&reversed), ids(&catalog));
    }

    #[test]
    fn filters_restricted_entries_for_current_user() {
        let body = r#"{"hubs":{"snap":[{"name":"open"},{"name":"vip","users":["Alice"]}]}}"#;

        assert_eq!(ids(&resolve_json(body, Some("ALICE"))), vec!["snap:open", "snap:vip"]);
        assert_eq!(ids(&resolve_json(body, Some("bob"))), vec!["snap:open"]);
        assert_eq!(ids(&resolve_json(body, None)), vec!["snap:open"]);
    }

    #[test]
    fn find_round_trips_every_id() {
        let catalog = resolve_json(
            r#"{"pages":[{"name":"legacy"}],"hubs":{"snap":[{"name":"legacy"}],"other":[{"name":"x"}]}}"#,
            None,
        );
        for page in &catalog {
            assert_eq!(catalog.find(&page.id), Some(page));
        }
    }

    #[test]
    fn find_round_trips_when_flat_name_matches_grouped_id() {
        let catalog = resolve_json(
            r#"{"pages":[{"name":"snap:a"}],"hubs":{"snap":[{"name":"a"}],"click":[{"name":"a"}]}}"#,
            None,
        );
        assert_eq!(catalog.len(), 2);
        for page in &catalog {
            assert_eq!(catalog.find(&page.id), Some(page));
        }
    }

    #[test]
    fn find_has_no_fallback() {
        let catalog = resolve_json(r#"{"hubs":{"snap":[{"name":"a"}]}}"#, None);
        assert!(catalog.find("snap:missing").is_none());
        assert!(catalog.find("a").is_none());
        assert!(Catalog::empty().find("snap:a").is_none());
    }

    #[test]
    fn selectable_hides_placeholder_but_find_keeps_it() {
        let catalog = resolve_json(r#"{"pages":[{"name":"default"},{"name":"abandoned"}]}"#, None);
        let selectable: Vec<&str> = catalog.selectable().map(|page| page.id.as_str()).collect();
        assert_eq!(selectable, vec!["abandoned"]);
        assert!(catalog.find("default").is_some());
    }
}
