//! Canvas: the scene container.
//!
//! The canvas owns the items (index 0 is back-most and painted first), the
//! selection, the items being placed, the viewport and the page settings.
//! Input arrives through the mouse handlers in `interaction`, editing
//! commands live in `operations`, and `render` draws everything through a
//! [`Painter`](crate::renderer::Painter). State changes are announced as
//! [`CanvasEvent`]s on the canvas's event bus.

mod interaction;
mod operations;
mod pan;
mod render;
mod types;

pub use pan::PanTimer;
pub use types::{
    CanvasEvent, CanvasSettings, Mode, Modifiers, MouseButton, MouseEvent, SelectState,
};

use drawkit_core::{EventBus, GridStyle, Unit};
use serde::Serialize;

use crate::factory::ItemFactory;
use crate::geometry::{Point, Rect};
use crate::model::{DrawingItem, ItemId};
use crate::selection_manager::SelectionManager;
use crate::style::{Brush, Color};
use crate::viewport::Viewport;
use interaction::Gesture;

/// Page property names used in [`CanvasEvent::PropertyChanged`].
pub mod page {
    pub const NAME: &str = "name";
    pub const UNITS: &str = "units";
    pub const SCENE_RECT: &str = "sceneRect";
    pub const BACKGROUND_BRUSH: &str = "backgroundBrush";
    pub const GRID: &str = "grid";
    pub const GRID_STYLE: &str = "gridStyle";
    pub const GRID_BRUSH: &str = "gridBrush";
    pub const GRID_SPACING_MAJOR: &str = "gridSpacingMajor";
    pub const GRID_SPACING_MINOR: &str = "gridSpacingMinor";
}

/// Page settings of a drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSettings {
    pub name: String,
    pub units: Unit,
    pub scene_rect: Rect,
    pub background: Brush,
    /// Snap spacing in scene units; zero disables snapping.
    pub grid: f64,
    pub grid_style: GridStyle,
    pub grid_brush: Brush,
    /// Major grid lines every this many grid steps.
    pub grid_spacing_major: u32,
    /// Minor grid lines every this many grid steps.
    pub grid_spacing_minor: u32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            units: Unit::default(),
            scene_rect: Rect::new(0.0, 0.0, 1000.0, 1000.0),
            background: Brush::default(),
            grid: 10.0,
            grid_style: GridStyle::default(),
            grid_brush: Brush::new(Color::rgb(0, 128, 128)),
            grid_spacing_major: 8,
            grid_spacing_minor: 2,
        }
    }
}

/// Scene container state.
#[derive(Debug)]
pub struct Canvas {
    items: Vec<DrawingItem>,
    selection: SelectionManager,
    place_items: Vec<DrawingItem>,
    place_prototypes: Vec<DrawingItem>,
    factory: ItemFactory,
    viewport: Viewport,
    settings: CanvasSettings,
    page: PageSettings,
    mode: Mode,
    gesture: Gesture,
    pan: PanTimer,
    mouse_info: String,
    events: EventBus<CanvasEvent>,
}

impl Canvas {
    /// Creates a canvas with default page settings and the standard items.
    pub fn new(view_width: f64, view_height: f64) -> Self {
        Self::with_settings(
            view_width,
            view_height,
            PageSettings::default(),
            CanvasSettings::default(),
            ItemFactory::with_standard_items(),
        )
    }

    pub fn with_settings(
        view_width: f64,
        view_height: f64,
        page: PageSettings,
        settings: CanvasSettings,
        factory: ItemFactory,
    ) -> Self {
        Self {
            items: Vec::new(),
            selection: SelectionManager::new(),
            place_items: Vec::new(),
            place_prototypes: Vec::new(),
            factory,
            viewport: Viewport::new(view_width, view_height, page.scene_rect),
            settings,
            page,
            mode: Mode::Select,
            gesture: Gesture::default(),
            pan: PanTimer::new(),
            mouse_info: String::new(),
            events: EventBus::new(),
        }
    }

    /// Bus on which the canvas publishes its [`CanvasEvent`]s.
    pub fn events(&self) -> &EventBus<CanvasEvent> {
        &self.events
    }

    fn emit(&self, event: CanvasEvent) {
        self.events.publish(event);
    }

    fn emit_property(&self, name: &str, value: impl Serialize) {
        self.emit(CanvasEvent::PropertyChanged {
            name: name.to_string(),
            value: serde_json::to_value(value).unwrap_or_default(),
        });
    }

    fn emit_current_items(&self) {
        let ids = if self.mode == Mode::Place {
            self.place_items.iter().map(DrawingItem::id).collect()
        } else {
            self.selection.ids().to_vec()
        };
        self.emit(CanvasEvent::CurrentItemsChanged(ids));
    }

    fn set_mouse_info(&mut self, text: String) {
        if text != self.mouse_info {
            self.mouse_info = text;
            self.emit(CanvasEvent::MouseInfoChanged(self.mouse_info.clone()));
        }
    }

    pub fn mouse_info(&self) -> &str {
        &self.mouse_info
    }

    pub fn factory(&self) -> &ItemFactory {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut ItemFactory {
        &mut self.factory
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: CanvasSettings) {
        self.settings = settings;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches mode, aborting any gesture. Leaving place mode discards the
    /// items being placed.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.abort_gesture();
        let had_place_items = !self.place_items.is_empty();
        if self.mode == Mode::Place {
            self.place_items.clear();
            self.place_prototypes.clear();
        }
        tracing::info!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.emit(CanvasEvent::ModeChanged(mode));
        if had_place_items || mode == Mode::Place {
            self.emit_current_items();
        }
    }

    // Items

    /// Items in z-order, back-most first.
    pub fn items(&self) -> &[DrawingItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, id: ItemId) -> Option<&DrawingItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn item_index(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Appends an item on top and returns its id.
    pub fn add_item(&mut self, item: DrawingItem) -> ItemId {
        let index = self.items.len();
        self.insert_item(index, item)
    }

    /// Inserts an item at `index` in z-order (clamped).
    pub fn insert_item(&mut self, index: usize, mut item: DrawingItem) -> ItemId {
        item.set_selected(false);
        let id = item.id();
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.emit(CanvasEvent::ItemsChanged);
        id
    }

    /// Removes an item, breaking its connections first.
    pub fn remove_item(&mut self, id: ItemId) -> Option<DrawingItem> {
        let index = self.item_index(id)?;
        crate::connections::disconnect_all(&mut self.items, id);
        let mut item = self.items.remove(index);
        item.set_selected(false);
        if self.selection.retain_existing(&self.items) {
            self.emit_current_items();
        }
        self.emit(CanvasEvent::ItemsChanged);
        Some(item)
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.abort_gesture();
        self.items.clear();
        if self.selection.deselect_all(&mut self.items) {
            self.emit_current_items();
        }
        self.emit(CanvasEvent::ItemsChanged);
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selected_items(&self) -> Vec<&DrawingItem> {
        self.items.iter().filter(|item| item.is_selected()).collect()
    }

    /// Items being positioned in place mode; not part of [`Canvas::items`].
    pub fn place_items(&self) -> &[DrawingItem] {
        &self.place_items
    }

    // Page

    pub fn page(&self) -> &PageSettings {
        &self.page
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name != self.page.name {
            self.page.name = name;
            self.emit_property(page::NAME, &self.page.name);
        }
    }

    pub fn set_units(&mut self, units: Unit) {
        if units != self.page.units {
            self.page.units = units;
            self.emit_property(page::UNITS, units);
        }
    }

    pub fn set_scene_rect(&mut self, rect: Rect) {
        let rect = rect.normalized();
        if rect != self.page.scene_rect {
            self.page.scene_rect = rect;
            self.viewport.set_scene_rect(rect);
            self.emit_property(page::SCENE_RECT, rect);
        }
    }

    pub fn set_background_brush(&mut self, brush: Brush) {
        if brush != self.page.background {
            self.page.background = brush;
            self.emit_property(page::BACKGROUND_BRUSH, brush);
        }
    }

    pub fn set_grid(&mut self, grid: f64) {
        let grid = grid.max(0.0);
        if grid != self.page.grid {
            self.page.grid = grid;
            self.emit_property(page::GRID, grid);
        }
    }

    pub fn set_grid_style(&mut self, style: GridStyle) {
        if style != self.page.grid_style {
            self.page.grid_style = style;
            self.emit_property(page::GRID_STYLE, style);
        }
    }

    pub fn set_grid_brush(&mut self, brush: Brush) {
        if brush != self.page.grid_brush {
            self.page.grid_brush = brush;
            self.emit_property(page::GRID_BRUSH, brush);
        }
    }

    pub fn set_grid_spacing_major(&mut self, spacing: u32) {
        let spacing = spacing.max(1);
        if spacing != self.page.grid_spacing_major {
            self.page.grid_spacing_major = spacing;
            self.emit_property(page::GRID_SPACING_MAJOR, spacing);
        }
    }

    pub fn set_grid_spacing_minor(&mut self, spacing: u32) {
        let spacing = spacing.max(1);
        if spacing != self.page.grid_spacing_minor {
            self.page.grid_spacing_minor = spacing;
            self.emit_property(page::GRID_SPACING_MINOR, spacing);
        }
    }

    /// Applies every page setting, announcing the ones that change.
    pub fn set_page(&mut self, page: PageSettings) {
        self.set_name(page.name);
        self.set_units(page.units);
        self.set_scene_rect(page.scene_rect);
        self.set_background_brush(page.background);
        self.set_grid(page.grid);
        self.set_grid_style(page.grid_style);
        self.set_grid_brush(page.grid_brush);
        self.set_grid_spacing_major(page.grid_spacing_major);
        self.set_grid_spacing_minor(page.grid_spacing_minor);
    }

    /// Rounds `p` to the grid; unchanged when the grid is off.
    pub fn snap_to_grid(&self, p: Point) -> Point {
        p.snapped(self.page.grid)
    }

    // Coordinates

    pub fn map_to_scene(&self, view_point: Point) -> Point {
        self.viewport.map_to_scene(view_point)
    }

    pub fn map_from_scene(&self, scene_point: Point) -> Point {
        self.viewport.map_from_scene(scene_point)
    }

    /// Topmost item whose shape contains `scene_point`, looking at selected
    /// items before all others. Pens thinner than the minimum hit width are
    /// widened for the query.
    pub fn item_at(&mut self, scene_point: Point) -> Option<ItemId> {
        let min_pen_width = self.viewport.scene_length(self.settings.min_hit_pen_width_px);
        let selected_hit = self
            .items
            .iter_mut()
            .rev()
            .filter(|item| item.is_selected())
            .find_map(|item| item.hit_test(scene_point, min_pen_width).then(|| item.id()));
        if selected_hit.is_some() {
            return selected_hit;
        }
        self.items
            .iter_mut()
            .rev()
            .find_map(|item| item.hit_test(scene_point, min_pen_width).then(|| item.id()))
    }

    /// Index of the control point of item `id` whose handle covers
    /// `scene_point`.
    pub fn control_point_at(&self, id: ItemId, scene_point: Point) -> Option<usize> {
        let item = self.item(id)?;
        let half = self.viewport.scene_length(self.settings.handle_size_px) / 2.0;
        item.points()
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, p)| p.is_control())
            .find(|(_, p)| {
                let d = item.map_to_scene(p.position()) - scene_point;
                d.x.abs() <= half && d.y.abs() <= half
            })
            .map(|(index, _)| index)
    }

    fn format_point(&self, p: Point) -> String {
        format!("({:.2}, {:.2})", p.x, p.y)
    }

    fn hover_info(&self, scene_point: Point) -> String {
        format!("{} {}", self.format_point(scene_point), self.page.units)
    }

    fn drag_info(&self, from: Point, to: Point) -> String {
        let d = to - from;
        format!(
            "{} - {}  \u{0394}({:.2}, {:.2})",
            self.format_point(from),
            self.format_point(to),
            d.x,
            d.y
        )
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
