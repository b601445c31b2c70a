//! Configuration module for the F&I trainer.
//!
//! Provides `AppConfig` (operator config, TOML), `Settings` / `SettingsStore`
//! (user-editable training settings, JSON), `TokenStore` (API key),
//! `FixedConfig` (the compiled-in trainer) and `AppPaths` for the
//! cross-platform config directory.

pub mod fixed;
pub mod paths;
pub mod settings;
pub mod token;
pub mod training;

pub use fixed::{
    complete_settings, CompleteSettings, FixedConfig, Layers, CONVERSATION_NAME,
    DEFAULT_PERSONA_ID, DEFAULT_REPLICA_ID,
};
pub use paths::AppPaths;
pub use settings::{ApiConfig, AppConfig, UiConfig};
pub use token::TokenStore;
pub use training::{Settings, SettingsStore, INTERRUPT_SENSITIVITIES, LANGUAGES};
