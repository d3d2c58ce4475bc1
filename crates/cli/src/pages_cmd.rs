use anyhow::{Result, bail};
use serde::Serialize;
use trackingtags_core::{Catalog, ResolvedPage, Selection};

use crate::config::{load_settings, save_settings};
use crate::remote::load_catalog;

#[derive(Debug, Serialize)]
struct PageRow<'a> {
    #[serde(flatten)]
    page: &'a ResolvedPage,
    selected: bool,
}

fn render_pages(catalog: &Catalog, selected: Option<&str>) -> Vec<String> {
    catalog
        .selectable()
        .map(|page| {
            let marker = if selected == Some(page.id.as_str()) { "*" } else { " " };
            format!("{marker} {:<32} {}", page.id, page.display_label)
        })
        .collect()
}

/// List selectable pages, marking the persisted selection.
pub async fn run_pages(catalog_url: Option<&str>, json: bool) -> Result<()> {
    let settings = load_settings()?;
    let catalog = load_catalog(&settings, catalog_url).await?;
    let selected = settings.selection.page.as_deref();

    if json {
        let rows: Vec<PageRow<'_>> = catalog
            .selectable()
            .map(|page| PageRow {
                page,
                selected: selected == Some(page.id.as_str()),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if catalog.is_empty() {
        eprintln!("No pages available.");
        return Ok(());
    }
    for line in render_pages(&catalog, selected) {
        println!("{line}");
    }
    Ok(())
}

/// Persist `id` as the selected page after checking it exists.
pub async fn run_select(id: &str, catalog_url: Option<&str>) -> Result<()> {
    let mut settings = load_settings()?;
    let catalog = load_catalog(&settings, catalog_url).await?;

    let Some(page) = catalog.find(id) else {
        bail!("unknown page `{id}` (run `trackingtags pages` to list ids)");
    };

    let mut selection = Selection::restore(
        settings.selection.page.clone(),
        settings.selection.include_hash,
    );
    if selection
        .set_selected_page_id(Some(page.id.clone()))
        .is_some_and(|change| change.is_persisted())
    {
        settings.selection.page = Some(page.id.clone());
        save_settings(&settings)?;
    }
    println!("Selected {} ({})", page.id, page.display_label);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackingtags_core::CatalogDocument;

    #[test]
    fn render_marks_selection_and_hides_placeholder() {
        let catalog = Catalog::resolve(
            CatalogDocument::from_json(
                r#"{"pages":[{"name":"default"}],"hubs":{"snap":[{"name":"abandoned"}],"other":[{"name":"community"}]}}"#,
            )
            .expect("parse"),
            None,
        );
        let lines = render_pages(&catalog, Some("snap:abandoned"));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  other:community"));
        assert!(lines[0].ends_with(" community"));
        assert!(lines[1].starts_with("* snap:abandoned"));
        assert!(lines[1].ends_with(" snap_abandoned"));
    }
}
