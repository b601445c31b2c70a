//! Cross-platform application paths using the `dirs` crate.
//!
//! Everything lives in one config directory:
//!   Windows: %APPDATA%\fi-trainer\
//!   macOS:   ~/Library/Application Support/fi-trainer/
//!   Linux:   ~/.config/fi-trainer/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory holding every file below.
    pub config_dir: PathBuf,
    /// Full path to `config.toml` (application config).
    pub config_file: PathBuf,
    /// Full path to `training-settings.json` (user-editable session settings).
    pub training_settings_file: PathBuf,
    /// Full path to `api-token`.
    pub token_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "fi-trainer";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        Self {
            config_file: config_dir.join("config.toml"),
            training_settings_file: config_dir.join("training-settings.json"),
            token_file: config_dir.join("api-token"),
            config_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_share_config_dir() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths
            .training_settings_file
            .file_name()
            .is_some_and(|n| n == "training-settings.json"));
        assert!(paths.token_file.file_name().is_some_and(|n| n == "api-token"));
        assert_eq!(paths.config_file.parent(), Some(paths.config_dir.as_path()));
        assert_eq!(paths.token_file.parent(), Some(paths.config_dir.as_path()));
    }
}
