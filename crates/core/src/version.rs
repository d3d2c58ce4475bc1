//! Published version manifest and update evaluation.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    pub current: String,
    #[serde(default)]
    pub link: String,
    /// A vital release must be installed before the app keeps working.
    #[serde(default)]
    pub vital: bool,
}

/// Platform name (`macOS`, `windows`, ...) to its latest release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionManifest {
    pub platforms: BTreeMap<String, VersionEntry>,
}

impl VersionManifest {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Case-insensitive platform lookup.
    pub fn entry_for(&self, platform: &str) -> Option<&VersionEntry> {
        self.platforms
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(platform))
            .map(|(_, entry)| entry)
    }
}

/// Manifest key for the platform this binary was built for.
pub fn current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macOS"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

fn numeric_component(part: &str) -> u64 {
    let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Compare dotted version strings numerically (`1.10` > `1.9`).
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left: Vec<u64> = a.trim().split('.').map(numeric_component).collect();
    let right: Vec<u64> = b.trim().split('.').map(numeric_component).collect();
    let len = left.len().max(right.len());
    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate,
    Available { current: String, link: String },
    Required { current: String, link: String },
}

impl UpdateStatus {
    pub fn evaluate(app_version: &str, entry: &VersionEntry) -> Self {
        if compare_versions(app_version, &entry.current) != Ordering::Less {
            return Self::UpToDate;
        }
        let current = entry.current.clone();
        let link = entry.link.clone();
        if entry.vital {
            Self::Required { current, link }
        } else {
            Self::Available { current, link }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_numerically() {
        assert_eq!(compare_versions("1.10", "1.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.2.0", "1.2.1"), Ordering::Less);
        assert_eq!(compare_versions("2.0-beta", "2.0"), Ordering::Equal);
    }

    #[test]
    fn parses_manifest_and_finds_platform() {
        let manifest = VersionManifest::from_json(
            r#"{"macOS":{"current":"1.4.2","link":"https://example.test/mac","vital":false},
                "windows":{"current":"1.5","link":"","vital":true}}"#,
        )
        .expect("parse manifest");
        assert_eq!(
            manifest.entry_for("macos").map(|e| e.current.as_str()),
            Some("1.4.2")
        );
        assert!(manifest.entry_for("WINDOWS").expect("windows").vital);
        assert!(manifest.entry_for("linux").is_none());
    }

    #[test]
    fn evaluates_update_status() {
        let entry = VersionEntry {
            current: "1.4.2".into(),
            link: "https://example.test".into(),
            vital: false,
        };
        assert_eq!(UpdateStatus::evaluate("1.4.2", &entry), UpdateStatus::UpToDate);
        assert_eq!(UpdateStatus::evaluate("1.5.0", &entry), UpdateStatus::UpToDate);
        assert_eq!(
            UpdateStatus::evaluate("1.4.1", &entry),
            UpdateStatus::Available {
                current: "1.4.2".into(),
                link: "https://example.test".into(),
            }
        );

        let vital = VersionEntry {
            vital: true,
            ..entry
        };
        assert!(matches!(
            UpdateStatus::evaluate("1.0", &vital),
            UpdateStatus::Required { .. }
        ));
    }
}
