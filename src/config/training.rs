//! User-editable training settings and their JSON persistence.
//!
//! [`Settings`] mirrors the persisted record field for field:
//!
//! ```json
//! { "language": "en", "interruptSensitivity": "low", "persona": "...", "replica": "..." }
//! ```
//!
//! Every field is always present in memory; "unset" is the empty string.
//! [`SettingsStore`] owns the single current value for the running app.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};

use super::fixed::{DEFAULT_PERSONA_ID, DEFAULT_REPLICA_ID};
use super::AppPaths;

/// Language the trainer listens and responds in.
pub const DEFAULT_LANGUAGE: &str = "en";

/// `(label, code)` pairs offered by the settings panel.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Spanish", "es"),
    ("French", "fr"),
    ("German", "de"),
    ("Italian", "it"),
    ("Portuguese", "pt"),
    ("Japanese", "ja"),
    ("Chinese (Mandarin)", "zh"),
];

/// `(label, value)` pairs offered by the settings panel, least to most
/// sensitive.
pub const INTERRUPT_SENSITIVITIES: &[(&str, &str)] = &[
    ("Super Low", "superlow"),
    ("Very Low", "verylow"),
    ("Low (Recommended for Training)", "low"),
    ("Medium", "medium"),
    ("High", "high"),
];

/// Display label for a stored code, falling back to the code itself.
pub fn label_for(choices: &[(&'static str, &'static str)], value: &str) -> String {
    choices
        .iter()
        .find(|(_, v)| *v == value)
        .map(|(label, _)| (*label).to_string())
        .unwrap_or_else(|| value.to_string())
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Session parameters the user may change from the settings panel.
///
/// A key missing from the stored record takes its default value; a `null`
/// value reads as the empty string (unset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// ISO-639-1 code from [`LANGUAGES`].
    #[serde(deserialize_with = "null_as_empty")]
    pub language: String,
    /// One of the values in [`INTERRUPT_SENSITIVITIES`].
    #[serde(deserialize_with = "null_as_empty")]
    pub interrupt_sensitivity: String,
    /// Remote persona identifier; empty means unset.
    #[serde(deserialize_with = "null_as_empty")]
    pub persona: String,
    /// Remote replica identifier; empty means unset.
    #[serde(deserialize_with = "null_as_empty")]
    pub replica: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.into(),
            interrupt_sensitivity: "low".into(),
            persona: DEFAULT_PERSONA_ID.into(),
            replica: DEFAULT_REPLICA_ID.into(),
        }
    }
}

impl Settings {
    /// Read the persisted record from `path`.
    ///
    /// Returns `Ok(Settings::default())` when the file does not exist.  A
    /// record that exists but does not parse is an error; see
    /// [`SettingsStore::open`] for the fallback policy.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Write the record to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SettingsStore
// ---------------------------------------------------------------------------

/// Owns the current [`Settings`] and knows where they are persisted.
///
/// `set` and `save` are deliberately independent: saving never changes the
/// in-memory value and setting never touches disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    current: Settings,
    path: PathBuf,
}

impl SettingsStore {
    /// Open the store at the platform-appropriate location.
    pub fn open_default() -> Self {
        Self::open(AppPaths::new().training_settings_file)
    }

    /// Open the store backed by `path`.
    ///
    /// A missing record yields the defaults.  A corrupt record is logged and
    /// also yields the defaults; it is left on disk until the next save.
    pub fn open(path: PathBuf) -> Self {
        let current = Self::load(&path);
        Self { current, path }
    }

    /// Read the persisted settings, falling back to defaults on any error.
    pub fn load(path: &Path) -> Settings {
        Settings::load_from(path).unwrap_or_else(|e| {
            log::warn!(
                "Stored settings at {} are unreadable ({e}); using defaults",
                path.display()
            );
            Settings::default()
        })
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> Settings {
        self.current.clone()
    }

    /// Borrow the current value without cloning.
    pub fn current(&self) -> &Settings {
        &self.current
    }

    /// Replace the current value wholesale.
    pub fn set(&mut self, settings: Settings) {
        self.current = settings;
    }

    /// Persist `settings`.  Does not change the in-memory value.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        settings.save_to(&self.path)?;
        log::info!("Settings saved to {}", self.path.display());
        Ok(())
    }

    /// Path of the backing record.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
