//! # Drawkit Settings
//!
//! Drawing configuration: page defaults, interaction tuning and default item
//! properties, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, DrawingConfig, GridStyle, InteractionSettings, ItemDefaults,
    PageSettings, SceneRectSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
