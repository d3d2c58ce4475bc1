use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use trackingtags_runtime_config::{Settings, apply_compat_fallbacks};

/// Canonical config file path.
pub fn config_path() -> Result<PathBuf> {
    trackingtags_paths::config_path().context("Could not determine config directory")
}

fn read_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let mut settings = toml::from_str::<Settings>(&content)
        .with_context(|| format!("Failed to parse config at {}", path.display()))?;
    apply_compat_fallbacks(&mut settings);
    Ok(settings)
}

/// Load settings from disk, returning defaults if the file does not exist.
pub fn load_settings() -> Result<Settings> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Settings::default());
    }
    read_settings(&path)
}

/// Write the full settings document.
pub fn save_settings(settings: &Settings) -> Result<()> {
    let path = config_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config dir at {}", dir.display()))?;
    }
    let content = toml::to_string_pretty(settings).context("Failed to serialize config")?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write config at {}", path.display()))?;
    tracing::debug!(path = %path.display(), "saved settings");
    Ok(())
}

/// Print current config.
pub fn show_config() -> Result<()> {
    let settings = load_settings()?;
    let path = config_path()?;
    println!("Config file: {}", path.display());
    println!();
    println!("[selection]");
    println!(
        "  page         = {}",
        settings.selection.page.as_deref().unwrap_or("(not set)")
    );
    println!("  include_hash = {}", settings.selection.include_hash);
    println!();
    println!("[remote]");
    println!("  catalog_url  = {}", settings.remote.catalog_url);
    println!("  version_url  = {}", settings.remote.version_url);
    println!("  timeout_secs = {}", settings.remote.timeout_secs);
    Ok(())
}

/// Update config with provided values.
pub fn set_config(
    catalog_url: Option<String>,
    version_url: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let mut settings = load_settings()?;

    if let Some(url) = catalog_url {
        settings.remote.catalog_url = url;
    }
    if let Some(url) = version_url {
        settings.remote.version_url = url;
    }
    if let Some(secs) = timeout_secs {
        settings.remote.timeout_secs = secs;
    }
    apply_compat_fallbacks(&mut settings);

    save_settings(&settings)?;
    println!("Configuration updated.");
    show_config()?;
    Ok(())
}
