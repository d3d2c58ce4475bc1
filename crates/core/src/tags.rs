use std::fmt;

use serde::Serialize;

use crate::resolve::{DEFAULT_HUB, OTHER_HUB, ResolvedPage};

/// Generated tracking tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    pub text: String,
}

impl Tag {
    fn new(prefix: &str, body: fmt::Arguments<'_>) -> Self {
        Self {
            text: format!("{prefix}{body}"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagOptions {
    pub include_hash_prefix: bool,
}

impl TagOptions {
    fn prefix(self) -> &'static str {
        if self.include_hash_prefix { "#" } else { "" }
    }
}

/// Build the tag list for `page` and `user_name`.
///
/// Returns nothing until both a page and a non-blank user name are known.
pub fn generate_tags(
    page: Option<&ResolvedPage>,
    user_name: &str,
    options: TagOptions,
) -> Vec<Tag> {
    let user = user_name.trim();
    let Some(page) = page else {
        return Vec::new();
    };
    if user.is_empty() {
        return Vec::new();
    }

    let prefix = options.prefix();
    let label = page.label();

    if page.is_direct() {
        let label = label.strip_prefix('_').unwrap_or(label);
        return vec![Tag::new(prefix, format_args!("{label}_{user}"))];
    }

    match page.hub.as_deref() {
        Some(OTHER_HUB) => vec![Tag::new(prefix, format_args!("{label}_{user}"))],
        Some(DEFAULT_HUB) | None => vec![
            Tag::new(prefix, format_args!("snap_{label}_{user}")),
            Tag::new(prefix, format_args!("raw_{label}_{user}")),
            Tag::new(prefix, format_args!("snap_featured_{user}")),
            Tag::new(prefix, format_args!("raw_featured_{user}")),
        ],
        Some(hub) => vec![
            Tag::new(prefix, format_args!("{hub}_{label}_{user}")),
            Tag::new(prefix, format_args!("{hub}_featured_{user}")),
        ],
    }
}
