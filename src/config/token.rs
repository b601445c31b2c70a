//! API token persistence.
//!
//! The token lives in its own plain-text file next to the settings record so
//! it is never serialised together with them.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::AppPaths;

/// The API key for the conversation service, plus where it is stored.
#[derive(Debug, Clone)]
pub struct TokenStore {
    token: String,
    path: PathBuf,
}

impl TokenStore {
    /// Load from the platform config directory.
    pub fn load_or_default() -> Self {
        Self::load_from(AppPaths::new().token_file)
    }

    /// Load from an explicit path.  A missing or unreadable file yields an
    /// empty token.
    pub fn load_from(path: PathBuf) -> Self {
        let token = Self::read(&path);
        Self { token, path }
    }

    fn read(path: &Path) -> String {
        if !path.exists() {
            return String::new();
        }
        match std::fs::read_to_string(path) {
            Ok(s) => s.trim().to_string(),
            Err(e) => {
                log::warn!("Could not read API token at {}: {e}", path.display());
                String::new()
            }
        }
    }

    /// The current token; empty when not configured.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// `true` when a non-blank token is available.
    pub fn is_set(&self) -> bool {
        !self.token.is_empty()
    }

    /// Replace the token and write it to disk.
    pub fn save(&mut self, token: &str) -> Result<()> {
        let token = token.trim();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        self.token = token.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_unset() {
        let dir = tempdir().expect("temp dir");
        let store = TokenStore::load_from(dir.path().join("api-token"));
        assert!(!store.is_set());
        assert_eq!(store.token(), "");
    }

    #[test]
    fn save_then_reload() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("api-token");

        let mut store = TokenStore::load_from(path.clone());
        store.save("  tvs-key-123\n").expect("save");
        assert_eq!(store.token(), "tvs-key-123");

        let reloaded = TokenStore::load_from(path);
        assert!(reloaded.is_set());
        assert_eq!(reloaded.token(), "tvs-key-123");
    }
}
