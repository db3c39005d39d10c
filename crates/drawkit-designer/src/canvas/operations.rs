//! Editing and view operations on the canvas.

use drawkit_core::constants::CONNECT_EPSILON;
use drawkit_core::Result;

use super::{Canvas, CanvasEvent, Mode};
use crate::aggregator::{self, PropertyEdit};
use crate::connections;
use crate::factory::ItemFactory;
use crate::geometry::{Point, Rect};
use crate::model::{DrawingItem, ItemId, PointId};

impl Canvas {
    pub fn select_all(&mut self) {
        if self.selection.select_all(&mut self.items) {
            self.emit_current_items();
        }
    }

    pub fn select_none(&mut self) {
        if self.selection.deselect_all(&mut self.items) {
            self.emit_current_items();
        }
    }

    /// Replaces the selection with `ids`.
    pub fn select_items(&mut self, ids: &[ItemId]) {
        if self.selection.set(&mut self.items, ids) {
            self.emit_current_items();
        }
    }

    fn selected_ids(&self) -> Vec<ItemId> {
        self.selection.ids().to_vec()
    }

    /// Removes the selected items, breaking their connections, and returns
    /// them in z-order.
    pub fn delete_selection(&mut self) -> Vec<DrawingItem> {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return Vec::new();
        }
        for id in &ids {
            connections::disconnect_all(&mut self.items, *id);
        }
        let (removed, kept): (Vec<DrawingItem>, Vec<DrawingItem>) =
            std::mem::take(&mut self.items)
                .into_iter()
                .partition(|item| ids.contains(&item.id()));
        self.items = kept;
        self.selection.retain_existing(&self.items);
        tracing::debug!("Deleted {} item(s)", removed.len());
        self.emit_current_items();
        self.emit(CanvasEvent::ItemsChanged);
        removed
    }

    /// Moves the selected items by `delta` (keyboard nudge).
    pub fn move_selection(&mut self, delta: Point) {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return;
        }
        for item in self.items.iter_mut().filter(|item| item.is_selected()) {
            item.move_by(delta);
        }
        connections::drag_connected_points(&mut self.items, &ids);
        self.settle(&ids);
    }

    /// Grid-snapped center of the selection, the pivot for rotate and flip.
    pub fn selection_pivot(&self) -> Option<Point> {
        self.selection
            .center(&self.items)
            .map(|center| self.snap_to_grid(center))
    }

    fn transform_selection(&mut self, op: impl Fn(&mut DrawingItem, Point)) {
        let Some(pivot) = self.selection_pivot() else {
            return;
        };
        let ids = self.selected_ids();
        for item in self.items.iter_mut().filter(|item| item.is_selected()) {
            op(item, pivot);
        }
        connections::drag_connected_points(&mut self.items, &ids);
        self.settle(&ids);
    }

    /// Quarter turn clockwise about the selection pivot.
    pub fn rotate_selection(&mut self) {
        self.transform_selection(|item, pivot| item.rotate(pivot));
    }

    pub fn rotate_back_selection(&mut self) {
        self.transform_selection(|item, pivot| item.rotate_back(pivot));
    }

    pub fn flip_horizontal_selection(&mut self) {
        self.transform_selection(|item, pivot| item.flip_horizontal(pivot.x));
    }

    pub fn flip_vertical_selection(&mut self) {
        self.transform_selection(|item, pivot| item.flip_vertical(pivot));
    }

    // Z-order

    /// Moves each selected item one step toward the front, past an
    /// unselected neighbour.
    pub fn bring_forward(&mut self) {
        let mut changed = false;
        for i in (0..self.items.len().saturating_sub(1)).rev() {
            if self.items[i].is_selected() && !self.items[i + 1].is_selected() {
                self.items.swap(i, i + 1);
                changed = true;
            }
        }
        if changed {
            self.emit(CanvasEvent::ItemsChanged);
        }
    }

    pub fn send_backward(&mut self) {
        let mut changed = false;
        for i in 1..self.items.len() {
            if self.items[i].is_selected() && !self.items[i - 1].is_selected() {
                self.items.swap(i, i - 1);
                changed = true;
            }
        }
        if changed {
            self.emit(CanvasEvent::ItemsChanged);
        }
    }

    /// Moves the selection to the front, keeping its relative order.
    pub fn bring_to_front(&mut self) {
        let (selected, rest): (Vec<DrawingItem>, Vec<DrawingItem>) =
            std::mem::take(&mut self.items)
                .into_iter()
                .partition(DrawingItem::is_selected);
        self.items = rest;
        self.items.extend(selected);
        self.emit(CanvasEvent::ItemsChanged);
    }

    pub fn send_to_back(&mut self) {
        let (mut selected, rest): (Vec<DrawingItem>, Vec<DrawingItem>) =
            std::mem::take(&mut self.items)
                .into_iter()
                .partition(DrawingItem::is_selected);
        selected.extend(rest);
        self.items = selected;
        self.emit(CanvasEvent::ItemsChanged);
    }

    // Points

    /// Inserts a vertex at `scene_position` on the single selected item.
    pub fn insert_point_at(&mut self, scene_position: Point) -> Option<PointId> {
        let id = self.selection.single()?;
        let target = self.snap_to_grid(scene_position);
        let item = self.items.iter_mut().find(|item| item.id() == id)?;
        let point = item.insert_new_point(target)?;
        self.settle(&[id]);
        Some(point)
    }

    /// Removes the vertex of the single selected item under `scene_position`,
    /// releasing its connections.
    pub fn remove_point_at(&mut self, scene_position: Point) -> bool {
        let Some(id) = self.selection.single() else {
            return false;
        };
        let tolerance = self.viewport.scene_length(self.settings.handle_size_px) / 2.0;
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        let Some(removed) = item.remove_existing_point(scene_position, tolerance) else {
            return false;
        };
        connections::release_point(&mut self.items, id, &removed);
        self.settle(&[id]);
        true
    }

    // Clipboard

    /// Serializes the selection.
    pub fn copy(&self) -> Result<String> {
        let selected: Vec<DrawingItem> = self
            .items
            .iter()
            .filter(|item| item.is_selected())
            .cloned()
            .collect();
        ItemFactory::write_items_to_string(&selected)
    }

    /// Serializes the selection and deletes it.
    pub fn cut(&mut self) -> Result<String> {
        let text = self.copy()?;
        self.delete_selection();
        Ok(text)
    }

    /// Parses `text` and enters place mode with the parsed items. Returns
    /// the number of items being placed.
    pub fn paste(&mut self, text: &str) -> Result<usize> {
        let items = self.factory.read_items_from_string(text)?;
        let count = items.len();
        self.start_place(items);
        Ok(count)
    }

    /// Applies a property edit to the selection. Returns how many items
    /// changed.
    pub fn edit_selection(&mut self, edit: &PropertyEdit) -> usize {
        let ids = self.selected_ids();
        let changed = aggregator::apply_edit(&mut self.items, &ids, edit);
        if !changed.is_empty() {
            connections::drag_connected_points(&mut self.items, &changed);
            self.settle(&changed);
        }
        changed.len()
    }

    // Documents

    /// Serializes every item.
    pub fn items_to_string(&self) -> Result<String> {
        let text = ItemFactory::write_items_to_string(&self.items)?;
        tracing::info!("Saved {} item(s) from '{}'", self.items.len(), self.page.name);
        Ok(text)
    }

    /// Replaces the items with those parsed from `text`.
    pub fn load_items(&mut self, text: &str) -> Result<usize> {
        let items = self.factory.read_items_from_string(text)?;
        self.set_mode(Mode::Select);
        self.abort_gesture();
        self.items = items;
        self.selection.deselect_all(&mut self.items);
        tracing::info!("Loaded {} item(s) into '{}'", self.items.len(), self.page.name);
        self.emit_current_items();
        self.emit(CanvasEvent::ItemsChanged);
        Ok(self.items.len())
    }

    /// Re-runs the connection resolver over every item.
    pub fn reconnect_all(&mut self) -> usize {
        let ids: Vec<ItemId> = self.items.iter().map(DrawingItem::id).collect();
        connections::resolve(&mut self.items, &ids, CONNECT_EPSILON)
    }

    // View

    fn after_scale_change(&self, changed: bool) {
        if changed {
            self.emit(CanvasEvent::ScaleChanged(self.viewport.scale()));
        }
    }

    /// Sets the scale about the view center.
    pub fn set_scale(&mut self, scale: f64) {
        let changed = self.viewport.set_scale(scale);
        self.after_scale_change(changed);
    }

    pub fn zoom_in(&mut self) {
        let changed = self.viewport.zoom_in(self.settings.zoom_step);
        self.after_scale_change(changed);
    }

    pub fn zoom_out(&mut self) {
        let changed = self.viewport.zoom_out(self.settings.zoom_step);
        self.after_scale_change(changed);
    }

    /// Fits the scene rect into the view.
    pub fn zoom_fit(&mut self) {
        let changed = self.viewport.zoom_fit();
        self.after_scale_change(changed);
    }

    pub fn zoom_to_rect(&mut self, rect: Rect) {
        let changed = self.viewport.zoom_to_rect(rect);
        self.after_scale_change(changed);
    }

    pub fn center_on(&mut self, scene_point: Point) {
        self.viewport.center_on(scene_point);
    }

    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.viewport.scroll_by(dx, dy);
    }

    /// Called when the host view is resized.
    pub fn resize_view(&mut self, width: f64, height: f64) {
        self.viewport.set_view_size(width, height);
    }
}
