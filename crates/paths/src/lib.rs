//! Config directory resolution.
//!
//! `TRACKINGTAGS_CONFIG_DIR` wins when set; otherwise the platform config
//! directory (`$XDG_CONFIG_HOME`, `~/.config`, `%APPDATA%`, ...) gets a
//! `trackingtags` subdirectory.

use std::path::{Path, PathBuf};

use trackingtags_runtime_config::CONFIG_FILE_NAME;

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "TRACKINGTAGS_CONFIG_DIR";

const APP_DIR_NAME: &str = "trackingtags";

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("could not determine home directory")]
    NoHomeDir,
}

/// Directory holding `trackingtags.toml`.
pub fn config_dir() -> Result<PathBuf, PathError> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let base = directories::BaseDirs::new().ok_or(PathError::NoHomeDir)?;
    Ok(base.config_dir().join(APP_DIR_NAME))
}

/// Canonical config file path.
pub fn config_path() -> Result<PathBuf, PathError> {
    Ok(config_file_in(&config_dir()?))
}

pub fn config_file_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}
