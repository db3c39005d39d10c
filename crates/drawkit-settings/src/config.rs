//! Configuration for Drawkit drawings
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Page settings (name, units, scene bounds, background and grid)
//! - Interaction tuning (drag threshold, hit tolerance, panning, zoom step)
//! - Default properties applied to newly created items

pub use drawkit_core::{GridStyle, Unit};
use drawkit_core::constants;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Pen style tokens accepted in item defaults.
pub const PEN_STYLE_TOKENS: [&str; 6] = ["none", "solid", "dash", "dot", "dash-dot", "dash-dot-dot"];

/// Arrow style tokens accepted in item defaults.
pub const ARROW_STYLE_TOKENS: [&str; 8] = [
    "none",
    "normal",
    "triangle",
    "triangleFilled",
    "concave",
    "concaveFilled",
    "circle",
    "circleFilled",
];

const MAX_RECENT_FILES: usize = 10;

/// Scene bounds in drawing units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneRectSettings {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for SceneRectSettings {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            height: 800.0,
        }
    }
}

/// Page settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Drawing name
    pub name: String,
    /// Units used when reporting coordinates
    pub units: Unit,
    /// Scene bounds
    pub scene_rect: SceneRectSettings,
    /// Background color as `#RRGGBB` or `#RRGGBBAA`
    pub background_color: String,
    /// Snap grid size in drawing units (0 disables snapping)
    pub grid: f64,
    /// How the grid is drawn
    pub grid_style: GridStyle,
    /// Grid color as `#RRGGBB` or `#RRGGBBAA`
    pub grid_color: String,
    /// Number of grid cells between major grid lines
    pub grid_spacing_major: u32,
    /// Number of grid cells between minor grid lines
    pub grid_spacing_minor: u32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            units: Unit::Mm,
            scene_rect: SceneRectSettings::default(),
            background_color: "#FFFFFF".to_string(),
            grid: 10.0,
            grid_style: GridStyle::Dotted,
            grid_color: "#808080".to_string(),
            grid_spacing_major: 8,
            grid_spacing_minor: 2,
        }
    }
}

/// Interaction tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Pixels the pointer must travel before a press becomes a drag
    pub drag_threshold_px: f64,
    /// Minimum stroke width in pixels used for hit-testing
    pub min_hit_pen_width_px: f64,
    /// Middle-button pan tick interval
    pub pan_interval_ms: u64,
    /// Factor applied by one zoom step
    pub zoom_step: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            drag_threshold_px: constants::DRAG_THRESHOLD_PX,
            min_hit_pen_width_px: constants::MIN_HIT_PEN_WIDTH_PX,
            pan_interval_ms: constants::PAN_INTERVAL_MS,
            zoom_step: constants::ZOOM_STEP,
        }
    }
}

/// Properties applied to every item created by the item factory
///
/// Absent fields leave the item's own defaults untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDefaults {
    pub pen_color: Option<String>,
    pub pen_width: Option<f64>,
    pub pen_style: Option<String>,
    pub brush_color: Option<String>,
    pub start_arrow_style: Option<String>,
    pub start_arrow_size: Option<f64>,
    pub end_arrow_style: Option<String>,
    pub end_arrow_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub text_color: Option<String>,
}

impl ItemDefaults {
    /// True when no default is configured.
    pub fn is_empty(&self) -> bool {
        self == &ItemDefaults::default()
    }
}

/// Complete drawing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DrawingConfig {
    /// Page settings
    pub page: PageSettings,
    /// Interaction tuning
    pub interaction: InteractionSettings,
    /// Default item properties
    pub item_defaults: ItemDefaults,
    /// Recently opened drawings, most recent first
    pub recent_files: Vec<PathBuf>,
}

impl DrawingConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let page = &self.page;
        if page.scene_rect.width <= 0.0 || page.scene_rect.height <= 0.0 {
            return Err(SettingsError::invalid(
                "page.scene_rect",
                "width and height must be > 0",
            ));
        }
        if !page.grid.is_finite() || page.grid < 0.0 {
            return Err(SettingsError::invalid("page.grid", "must be >= 0"));
        }
        if page.grid_spacing_major == 0 || page.grid_spacing_minor == 0 {
            return Err(SettingsError::invalid(
                "page.grid_spacing",
                "major and minor spacing must be > 0",
            ));
        }
        check_color("page.background_color", Some(&page.background_color))?;
        check_color("page.grid_color", Some(&page.grid_color))?;

        let interaction = &self.interaction;
        if interaction.zoom_step <= 1.0 {
            return Err(SettingsError::invalid("interaction.zoom_step", "must be > 1"));
        }
        if interaction.drag_threshold_px < 0.0 || interaction.min_hit_pen_width_px < 0.0 {
            return Err(SettingsError::invalid(
                "interaction",
                "pixel tolerances must be >= 0",
            ));
        }
        if interaction.pan_interval_ms == 0 {
            return Err(SettingsError::invalid("interaction.pan_interval_ms", "must be > 0"));
        }

        let defaults = &self.item_defaults;
        check_color("item_defaults.pen_color", defaults.pen_color.as_deref())?;
        check_color("item_defaults.brush_color", defaults.brush_color.as_deref())?;
        check_color("item_defaults.text_color", defaults.text_color.as_deref())?;
        check_token(
            "item_defaults.pen_style",
            defaults.pen_style.as_deref(),
            &PEN_STYLE_TOKENS,
        )?;
        check_token(
            "item_defaults.start_arrow_style",
            defaults.start_arrow_style.as_deref(),
            &ARROW_STYLE_TOKENS,
        )?;
        check_token(
            "item_defaults.end_arrow_style",
            defaults.end_arrow_style.as_deref(),
            &ARROW_STYLE_TOKENS,
        )?;
        for (key, value) in [
            ("item_defaults.pen_width", defaults.pen_width),
            ("item_defaults.start_arrow_size", defaults.start_arrow_size),
            ("item_defaults.end_arrow_size", defaults.end_arrow_size),
        ] {
            if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
                return Err(SettingsError::invalid(key, "must be >= 0"));
            }
        }
        if defaults.font_size.is_some_and(|v| !v.is_finite() || v <= 0.0) {
            return Err(SettingsError::invalid("item_defaults.font_size", "must be > 0"));
        }

        Ok(())
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|f| f != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }
}

/// Default configuration file location: `<config dir>/drawkit/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| {
        ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
    })?;
    Ok(dir.join("drawkit").join("config.toml"))
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}

fn check_color(key: &str, value: Option<&str>) -> SettingsResult<()> {
    let Some(value) = value else {
        return Ok(());
    };
    let valid = value
        .strip_prefix('#')
        .is_some_and(|hex| (hex.len() == 6 || hex.len() == 8) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        Ok(())
    } else {
        Err(SettingsError::invalid(
            key,
            format!("'{}' is not a #RRGGBB or #RRGGBBAA color", value),
        ))
    }
}

fn check_token(key: &str, value: Option<&str>, allowed: &[&str]) -> SettingsResult<()> {
    match value {
        Some(token) if !allowed.contains(&token) => Err(SettingsError::invalid(
            key,
            format!("unknown style '{}'", token),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = DrawingConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.page.units, Unit::Mm);
        assert_eq!(config.interaction.drag_threshold_px, 4.0);
        assert!(config.item_defaults.is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drawing.toml");

        let mut config = DrawingConfig::new();
        config.page.name = "Floor plan".to_string();
        config.page.units = Unit::Ft;
        config.page.grid_style = GridStyle::Graph;
        config.item_defaults.pen_width = Some(2.0);
        config.item_defaults.end_arrow_style = Some("triangleFilled".to_string());
        config.save_to_file(&path).unwrap();

        let loaded = DrawingConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drawing.json");

        let mut config = DrawingConfig::new();
        config.interaction.zoom_step = 2.0;
        config.add_recent_file(PathBuf::from("/tmp/a.xml"));
        config.save_to_file(&path).unwrap();

        let loaded = DrawingConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[page]\nname = \"Sketch\"\nunits = \"in\"\n").unwrap();

        let loaded = DrawingConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.page.name, "Sketch");
        assert_eq!(loaded.page.units, Unit::In);
        assert_eq!(loaded.page.grid, 10.0);
        assert_eq!(loaded.interaction, InteractionSettings::default());
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[page]\nunits = \"furlong\"\n").unwrap();
        assert!(matches!(
            DrawingConfig::load_from_file(&path),
            Err(SettingsError::TomlError(_))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drawing.yaml");
        let err = DrawingConfig::new().save_to_file(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Config(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = DrawingConfig::new();
        config.page.scene_rect.width = 0.0;
        assert!(config.validate().is_err());

        let mut config = DrawingConfig::new();
        config.page.grid = -1.0;
        assert!(config.validate().is_err());

        let mut config = DrawingConfig::new();
        config.interaction.zoom_step = 1.0;
        assert!(config.validate().is_err());

        let mut config = DrawingConfig::new();
        config.item_defaults.pen_style = Some("wavy".to_string());
        assert!(config.validate().is_err());

        let mut config = DrawingConfig::new();
        config.item_defaults.pen_color = Some("red".to_string());
        assert!(config.validate().is_err());

        let mut config = DrawingConfig::new();
        config.item_defaults.text_color = Some("#11223344".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_recent_files_dedup_and_trim() {
        let mut config = DrawingConfig::new();
        for i in 0..12 {
            config.add_recent_file(PathBuf::from(format!("/tmp/{}.xml", i)));
        }
        config.add_recent_file(PathBuf::from("/tmp/5.xml"));
        assert_eq!(config.recent_files.len(), MAX_RECENT_FILES);
        assert_eq!(config.recent_files[0], PathBuf::from("/tmp/5.xml"));
        assert_eq!(
            config.recent_files.iter().filter(|p| p.ends_with("5.xml")).count(),
            1
        );
    }
}
