use anyhow::Result;
use tracing::warn;
use trackingtags_core::version::{UpdateStatus, current_platform};

use crate::config::load_settings;
use crate::remote::build_client;

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

fn describe(status: &UpdateStatus) -> String {
    match status {
        UpdateStatus::UpToDate => format!("You are using the latest version (v{APP_VERSION})."),
        UpdateStatus::Available { current, link } => {
            let mut line = format!("You are using v{APP_VERSION} and v{current} is available");
            if !link.is_empty() {
                line.push_str(&format!(": {link}"));
            }
            line
        }
        UpdateStatus::Required { current, link } => {
            let mut line = format!("You are using v{APP_VERSION} and v{current} is required");
            if !link.is_empty() {
                line.push_str(&format!(": {link}"));
            }
            line
        }
    }
}

/// Check the published manifest for a newer release. Never fails the process.
pub async fn run_check_update() -> Result<()> {
    let settings = load_settings()?;
    let client = build_client(&settings, None)?;

    let manifest = match client.fetch_version_manifest().await {
        Ok(manifest) => manifest,
        Err(err) => {
            warn!("version check failed: {err}");
            return Ok(());
        }
    };

    let platform = current_platform();
    let Some(entry) = manifest.entry_for(platform) else {
        println!("No published release for {platform}.");
        return Ok(());
    };
    println!("{}", describe(&UpdateStatus::evaluate(APP_VERSION, entry)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_available_and_required_updates() {
        let available = describe(&UpdateStatus::Available {
            current: "99.0".into(),
            link: "https://example.test".into(),
        });
        assert!(available.contains("v99.0 is available: https://example.test"));

        let required = describe(&UpdateStatus::Required {
            current: "99.0".into(),
            link: String::new(),
        });
        assert!(required.ends_with("v99.0 is required"));
    }
}
