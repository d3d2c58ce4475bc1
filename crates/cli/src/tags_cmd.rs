use anyhow::Result;
use clap::Args;
use trackingtags_core::{Selection, SelectionChange, Tag};
use trackingtags_runtime_config::Settings;

use crate::config::{load_settings, save_settings};
use crate::remote::load_catalog;

#[derive(Debug, Clone, Args)]
pub struct TagsArgs {
    /// User name the tags are generated for (without '@')
    #[arg(long, short)]
    pub user: String,

    /// Page id to use (and remember); defaults to the saved selection
    #[arg(long, short)]
    pub page: Option<String>,

    /// Prefix every tag with '#' (remembered)
    #[arg(long, conflicts_with = "no_hash")]
    pub hash: bool,

    /// Do not prefix tags with '#' (remembered)
    #[arg(long)]
    pub no_hash: bool,

    /// Print tags as a JSON array
    #[arg(long)]
    pub json: bool,
}

impl TagsArgs {
    fn hash_override(&self) -> Option<bool> {
        match (self.hash, self.no_hash) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Apply flag overrides to the restored selection, returning the changes.
fn apply_overrides(selection: &mut Selection, args: &TagsArgs) -> Vec<SelectionChange> {
    let mut changes = Vec::new();
    changes.extend(selection.set_user_name(args.user.clone()));
    if let Some(page) = &args.page {
        changes.extend(selection.set_selected_page_id(Some(page.clone())));
    }
    if let Some(include) = args.hash_override() {
        changes.extend(selection.set_include_hash_prefix(include));
    }
    changes
}

fn persist_selection(settings: &mut Settings, selection: &Selection) -> Result<()> {
    settings.selection.page = selection.selected_page_id().map(str::to_string);
    settings.selection.include_hash = selection.include_hash_prefix();
    save_settings(settings)
}

pub async fn run_tags(args: TagsArgs, catalog_url: Option<&str>) -> Result<()> {
    let mut settings = load_settings()?;
    let mut selection = Selection::restore(
        settings.selection.page.clone(),
        settings.selection.include_hash,
    );

    let changes = apply_overrides(&mut selection, &args);
    if changes.iter().any(|change| change.is_persisted()) {
        persist_selection(&mut settings, &selection)?;
    }

    let catalog = load_catalog(&settings, catalog_url).await?;
    let tags: Vec<Tag> = selection.tags(&catalog);

    if args.json {
        let texts: Vec<&str> = tags.iter().map(Tag::as_str).collect();
        println!("{}", serde_json::to_string(&texts)?);
    } else {
        for tag in &tags {
            println!("{tag}");
        }
    }

    if tags.is_empty() {
        match selection.selected_page_id() {
            None => eprintln!("No page selected (use --page or `trackingtags select`)."),
            Some(id) if selection.resolve(&catalog).is_none() => {
                eprintln!("Page `{id}` is not in the catalog.");
            }
            Some(_) => eprintln!("No user name given."),
        }
    }
    Ok(())
}
