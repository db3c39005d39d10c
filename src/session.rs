//! Editing session assembled from a [`DrawingConfig`]
//!
//! A session owns the canvas and remembers which document it was loaded
//! from. Configuration sections map onto the designer as follows:
//! - `page` becomes the canvas [`PageSettings`]
//! - `interaction` becomes the [`CanvasSettings`]
//! - `item_defaults` become default properties of the [`ItemFactory`]

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use drawkit_designer::arrow::{Arrow, ArrowStyle};
use drawkit_designer::connections;
use drawkit_designer::geometry::Rect;
use drawkit_designer::properties::{self, PropertyValue};
use drawkit_designer::style::{Brush, Color, Font, Pen, PenStyle};
use drawkit_designer::{Canvas, CanvasSettings, ItemFactory, PageSettings};
use drawkit_settings::{DrawingConfig, InteractionSettings, ItemDefaults};

/// View size used when no window is attached.
pub const HEADLESS_VIEW: (f64, f64) = (1200.0, 800.0);

pub struct Session {
    config: DrawingConfig,
    canvas: Canvas,
    document: Option<PathBuf>,
}

impl Session {
    /// Build a session with an empty canvas configured from `config`.
    pub fn new(config: DrawingConfig, view_width: f64, view_height: f64) -> anyhow::Result<Self> {
        config.validate().context("invalid drawing configuration")?;

        let page = page_settings(&config.page)?;
        let settings = canvas_settings(&config.interaction);
        let mut factory = ItemFactory::with_standard_items();
        apply_item_defaults(&config.item_defaults, &mut factory)?;

        let canvas = Canvas::with_settings(view_width, view_height, page, settings, factory);
        Ok(Self {
            config,
            canvas,
            document: None,
        })
    }

    /// Session configured from the file at `path`, or from defaults when
    /// `path` is `None`.
    pub fn from_config_file(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => DrawingConfig::load_from_file(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?,
            None => DrawingConfig::default(),
        };
        Self::new(config, HEADLESS_VIEW.0, HEADLESS_VIEW.1)
    }

    pub fn config(&self) -> &DrawingConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Path of the document last opened or saved.
    pub fn document(&self) -> Option<&Path> {
        self.document.as_deref()
    }

    /// Replace the canvas items with the document at `path`. Returns the
    /// number of items loaded.
    pub fn open(&mut self, path: &Path) -> anyhow::Result<usize> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let count = self
            .canvas
            .load_items(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        self.remember(path);
        tracing::info!("Opened {} ({} items)", path.display(), count);
        Ok(count)
    }

    /// Write the canvas items to `path`.
    pub fn save(&mut self, path: &Path) -> anyhow::Result<()> {
        let text = self.canvas.items_to_string()?;
        std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;

        self.remember(path);
        tracing::info!("Saved {} ({} items)", path.display(), self.canvas.item_count());
        Ok(())
    }

    /// Write back to the document the session was opened from.
    pub fn save_current(&mut self) -> anyhow::Result<()> {
        let path = self
            .document
            .clone()
            .ok_or_else(|| anyhow!("session has no document"))?;
        self.save(&path)
    }

    /// One line per item plus totals, for the command-line `info` command.
    pub fn summary(&self) -> String {
        let items = self.canvas.items();
        let mut out = String::new();
        for (index, item) in items.iter().enumerate() {
            let bounds = item.scene_bounding_rect();
            out.push_str(&format!(
                "{:>3}  {:<12} {}  at ({:.2}, {:.2})  size {:.2} x {:.2}  rotation {}{}\n",
                index,
                item.key(),
                item.id(),
                item.position().x,
                item.position().y,
                bounds.width,
                bounds.height,
                u32::from(item.rotation()) * 90,
                if item.is_flipped() { "  flipped" } else { "" },
            ));
        }
        let links = connections::all_links(items).len() / 2;
        out.push_str(&format!("{} item(s), {} connection(s)\n", items.len(), links));
        out
    }

    fn remember(&mut self, path: &Path) {
        self.document = Some(path.to_path_buf());
        self.config.add_recent_file(path.to_path_buf());
    }
}

/// Canvas page settings from the configuration page section.
pub fn page_settings(page: &drawkit_settings::PageSettings) -> anyhow::Result<PageSettings> {
    let rect = page.scene_rect;
    Ok(PageSettings {
        name: page.name.clone(),
        units: page.units,
        scene_rect: Rect::new(rect.x, rect.y, rect.width, rect.height),
        background: Brush::new(parse_color("page.background_color", &page.background_color)?),
        grid: page.grid,
        grid_style: page.grid_style,
        grid_brush: Brush::new(parse_color("page.grid_color", &page.grid_color)?),
        grid_spacing_major: page.grid_spacing_major,
        grid_spacing_minor: page.grid_spacing_minor,
    })
}

pub fn canvas_settings(interaction: &InteractionSettings) -> CanvasSettings {
    CanvasSettings {
        drag_threshold_px: interaction.drag_threshold_px,
        min_hit_pen_width_px: interaction.min_hit_pen_width_px,
        pan_interval_ms: interaction.pan_interval_ms,
        zoom_step: interaction.zoom_step,
        ..CanvasSettings::default()
    }
}

/// Register the configured item defaults on `factory`.
///
/// Pen, arrow and font fields are partial: a pen width alone yields a solid
/// black pen of that width.
pub fn apply_item_defaults(defaults: &ItemDefaults, factory: &mut ItemFactory) -> anyhow::Result<()> {
    factory.clear_default_properties();
    if defaults.is_empty() {
        return Ok(());
    }

    if defaults.pen_color.is_some() || defaults.pen_width.is_some() || defaults.pen_style.is_some() {
        let color = match &defaults.pen_color {
            Some(hex) => parse_color("item_defaults.pen_color", hex)?,
            None => Color::black(),
        };
        let style = match &defaults.pen_style {
            Some(token) => token.parse::<PenStyle>()?,
            None => PenStyle::Solid,
        };
        let pen = Pen::new(color, defaults.pen_width.unwrap_or(1.0), style);
        factory.set_default_property(properties::PEN, PropertyValue::Pen(pen));
    }

    if let Some(hex) = &defaults.brush_color {
        let brush = Brush::new(parse_color("item_defaults.brush_color", hex)?);
        factory.set_default_property(properties::BRUSH, PropertyValue::Brush(brush));
    }

    for (name, style, size) in [
        (
            properties::START_ARROW,
            &defaults.start_arrow_style,
            defaults.start_arrow_size,
        ),
        (
            properties::END_ARROW,
            &defaults.end_arrow_style,
            defaults.end_arrow_size,
        ),
    ] {
        if style.is_none() && size.is_none() {
            continue;
        }
        let style = match style {
            Some(token) => token.parse::<ArrowStyle>()?,
            None => ArrowStyle::None,
        };
        let size = size.unwrap_or(Arrow::DEFAULT_SIZE);
        factory.set_default_property(name, PropertyValue::Arrow(Arrow::new(style, size)));
    }

    if defaults.font_family.is_some() || defaults.font_size.is_some() {
        let mut font = Font::default();
        if let Some(family) = &defaults.font_family {
            font.family = family.clone();
        }
        if let Some(size) = defaults.font_size {
            font.size = size;
        }
        factory.set_default_property(properties::FONT, PropertyValue::Font(font));
    }

    if let Some(hex) = &defaults.text_color {
        let color = parse_color("item_defaults.text_color", hex)?;
        factory.set_default_property(properties::TEXT_COLOR, PropertyValue::Color(color));
    }

    tracing::debug!("Applied configured item defaults");
    Ok(())
}

fn parse_color(key: &str, hex: &str) -> anyhow::Result<Color> {
    Color::from_hex(hex).ok_or_else(|| anyhow!("{}: invalid color '{}'", key, hex))
}
