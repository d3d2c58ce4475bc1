//! User-owned selection state.
//!
//! Setters report what changed so the caller can regenerate tags and
//! persist settings only when something actually moved.

use crate::resolve::{Catalog, ResolvedPage};
use crate::tags::{Tag, TagOptions, generate_tags};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    UserName,
    Page,
    IncludeHashPrefix,
}

impl SelectionChange {
    /// Whether the change touches a persisted setting.
    pub fn is_persisted(self) -> bool {
        matches!(self, Self::Page | Self::IncludeHashPrefix)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    user_name: String,
    selected_page_id: Option<String>,
    include_hash_prefix: bool,
}

impl Selection {
    /// Restore from persisted settings. The user name always starts empty.
    pub fn restore(selected_page_id: Option<String>, include_hash_prefix: bool) -> Self {
        Self {
            user_name: String::new(),
            selected_page_id: selected_page_id.filter(|id| !id.trim().is_empty()),
            include_hash_prefix,
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn selected_page_id(&self) -> Option<&str> {
        self.selected_page_id.as_deref()
    }

    pub fn include_hash_prefix(&self) -> bool {
        self.include_hash_prefix
    }

    pub fn set_user_name(&mut self, user_name: impl Into<String>) -> Option<SelectionChange> {
        let user_name = user_name.into();
        if self.user_name == user_name {
            return None;
        }
        self.user_name = user_name;
        Some(SelectionChange::UserName)
    }

    pub fn set_selected_page_id(&mut self, id: Option<String>) -> Option<SelectionChange> {
        let id = id.filter(|id| !id.trim().is_empty());
        if self.selected_page_id == id {
            return None;
        }
        self.selected_page_id = id;
        Some(SelectionChange::Page)
    }

    pub fn set_include_hash_prefix(&mut self, include: bool) -> Option<SelectionChange> {
        if self.include_hash_prefix == include {
            return None;
        }
        self.include_hash_prefix = include;
        Some(SelectionChange::IncludeHashPrefix)
    }

    pub fn tag_options(&self) -> TagOptions {
        TagOptions {
            include_hash_prefix: self.include_hash_prefix,
        }
    }

    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Option<&'a ResolvedPage> {
        self.selected_page_id
            .as_deref()
            .and_then(|id| catalog.find(id))
    }

    /// Full tag list for the current state; always a fresh replacement.
    pub fn tags(&self, catalog: &Catalog) -> Vec<Tag> {
        generate_tags(self.resolve(catalog), &self.user_name, self.tag_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogDocument;

    fn catalog() -> Catalog {
        Catalog::resolve(
            CatalogDocument::from_json(
                r#"{"hubs":{"snap":[{"name":"abandoned"}],"click":[{"name":"street"}]}}"#,
            )
            .expect("parse"),
            None,
        )
    }

    #[test]
    fn setters_report_only_real_changes() {
        let mut selection = Selection::default();
        assert_eq!(
            selection.set_user_name("alice"),
            Some(SelectionChange::UserName)
        );
        assert_eq!(selection.set_user_name("alice"), None);
        assert_eq!(
            selection.set_selected_page_id(Some("snap:abandoned".into())),
            Some(SelectionChange::Page)
        );
        assert_eq!(
            selection.set_selected_page_id(Some("snap:abandoned".into())),
            None
        );
        assert_eq!(
            selection.set_include_hash_prefix(true),
            Some(SelectionChange::IncludeHashPrefix)
        );
        assert_eq!(selection.set_include_hash_prefix(true), None);
    }

    #[test]
    fn only_page_and_hash_changes_are_persisted() {
        assert!(!SelectionChange::UserName.is_persisted());
        assert!(SelectionChange::Page.is_persisted());
        assert!(SelectionChange::IncludeHashPrefix.is_persisted());
    }

    #[test]
    fn restore_treats_blank_page_as_unselected() {
        let selection = Selection::restore(Some("  ".into()), true);
        assert_eq!(selection.selected_page_id(), None);
        assert!(selection.include_hash_prefix());
        assert_eq!(selection.user_name(), "");
    }

    #[test]
    fn tags_follow_every_change() {
        let catalog = catalog();
        let mut selection = Selection::restore(Some("click:street".into()), false);
        assert!(selection.tags(&catalog).is_empty());

        selection.set_user_name("bo");
        let tags: Vec<String> = selection.tags(&catalog).into_iter().map(|t| t.text).collect();
        assert_eq!(tags, vec!["click_street_bo", "click_featured_bo"]);

        selection.set_include_hash_prefix(true);
        selection.set_selected_page_id(Some("snap:abandoned".into()));
        let tags: Vec<String> = selection.tags(&catalog).into_iter().map(|t| t.text).collect();
        assert_eq!(tags.len(), 4);
        assert!(tags.iter().all(|tag| tag.starts_with('#')));
    }

    #[test]
    fn unknown_selection_yields_no_tags() {
        let mut selection = Selection::restore(Some("snap:gone".into()), false);
        selection.set_user_name("alice");
        assert!(selection.resolve(&catalog()).is_none());
        assert!(selection.tags(&catalog()).is_empty());
        assert!(selection.tags(&Catalog::empty()).is_empty());
    }
}
