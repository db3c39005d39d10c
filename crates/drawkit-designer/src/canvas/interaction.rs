//! Mouse interaction state machine.
//!
//! One button gesture runs at a time. What a left-button gesture does
//! depends on the mode; in select mode it goes through [`SelectState`]:
//! a press enters `Select`, the first drag past the threshold picks
//! `ResizeItem`, `MoveItems` or `RubberBand`, and the release commits.
//! Geometry edits during a drag are provisional until release: connections
//! are only re-evaluated when the gesture settles, and `cancel` restores the
//! items captured when the drag began.

use drawkit_core::constants::{CONNECT_EPSILON, WHEEL_SCROLL_PX};

use super::types::{Modifiers, Mode, MouseButton, MouseEvent, SelectState};
use super::{Canvas, CanvasEvent};
use crate::connections;
use crate::factory::ItemFactory;
use crate::geometry::{Point, Rect};
use crate::model::{DrawingItem, ItemId, PlacementPolicy};

/// Button currently driving a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum ButtonState {
    #[default]
    Idle,
    Left,
    Right,
    Middle,
}

/// Transient state of the gesture in progress.
#[derive(Debug, Clone, Default)]
pub(super) struct Gesture {
    pub(super) button: ButtonState,
    pub(super) select_state: SelectState,
    pub(super) press_view: Point,
    pub(super) press_scene: Point,
    pub(super) press_item: Option<ItemId>,
    pub(super) resize_point: Option<usize>,
    /// Items as they were when a move or resize started.
    pub(super) snapshot: Option<Vec<DrawingItem>>,
    /// Scroll values when a scroll-mode drag started.
    pub(super) scroll_origin: Point,
    /// Band in scene coordinates for rubber-band and zoom gestures.
    pub(super) band: Option<Rect>,
    /// A press-and-release placement has been anchored.
    pub(super) placing: bool,
}

impl Canvas {
    pub fn select_state(&self) -> SelectState {
        self.gesture.select_state
    }

    /// Current rubber band or zoom band in scene coordinates.
    pub fn band(&self) -> Option<Rect> {
        self.gesture.band
    }

    pub fn mouse_press(&mut self, event: MouseEvent) {
        if self.gesture.button != ButtonState::Idle {
            return;
        }
        let scene = self.map_to_scene(event.position);
        self.gesture.press_view = event.position;
        self.gesture.press_scene = scene;

        match event.button {
            Some(MouseButton::Left) => {
                self.gesture.button = ButtonState::Left;
                match self.mode {
                    Mode::Select => self.select_press(scene),
                    Mode::Scroll => {
                        self.gesture.scroll_origin = Point::new(
                            self.viewport.horizontal().value,
                            self.viewport.vertical().value,
                        );
                    }
                    Mode::Zoom => {}
                    Mode::Place => self.place_press(scene),
                }
            }
            Some(MouseButton::Right) => {
                self.gesture.button = ButtonState::Right;
                self.right_press(scene);
            }
            Some(MouseButton::Middle) => {
                self.gesture.button = ButtonState::Middle;
                let generation = self.pan.start(event.position);
                tracing::debug!("Pan {} started", generation);
            }
            None => {}
        }
    }

    pub fn mouse_move(&mut self, event: MouseEvent) {
        let scene = self.map_to_scene(event.position);
        match self.gesture.button {
            ButtonState::Idle => self.hover(scene),
            ButtonState::Left => match self.mode {
                Mode::Select => self.select_drag(event, scene),
                Mode::Scroll => {
                    let delta = event.position - self.gesture.press_view;
                    let origin = self.gesture.scroll_origin;
                    self.viewport.set_scroll(origin.x - delta.x, origin.y - delta.y);
                }
                Mode::Zoom => {
                    self.gesture.band = Some(Rect::from_points(self.gesture.press_scene, scene));
                    let info = self.drag_info(self.gesture.press_scene, scene);
                    self.set_mouse_info(info);
                }
                Mode::Place => self.place_drag(scene),
            },
            ButtonState::Middle => self.pan.update(event.position),
            ButtonState::Right => {}
        }
    }

    pub fn mouse_release(&mut self, event: MouseEvent) {
        let scene = self.map_to_scene(event.position);
        match self.gesture.button {
            ButtonState::Left => match self.mode {
                Mode::Select => self.select_release(event),
                Mode::Scroll => {}
                Mode::Zoom => self.zoom_release(),
                Mode::Place => self.place_release(scene),
            },
            ButtonState::Middle => {
                self.pan.stop();
                tracing::debug!("Pan stopped");
            }
            ButtonState::Right | ButtonState::Idle => {}
        }
        self.gesture = Default::default();
        self.set_mouse_info(String::new());
    }

    /// Wheel input at `view_point`. `notches` is positive when rolling away
    /// from the user. Ctrl zooms about the cursor; shift scrolls sideways.
    pub fn wheel(&mut self, view_point: Point, notches: f64, modifiers: Modifiers) {
        if modifiers.ctrl {
            let scale = self.viewport.scale() * self.settings.zoom_step.powf(notches);
            if self.viewport.set_scale_about(scale, view_point) {
                self.emit(CanvasEvent::ScaleChanged(self.viewport.scale()));
            }
        } else if modifiers.shift {
            self.viewport.scroll_by(-notches * WHEEL_SCROLL_PX, 0.0);
        } else {
            self.viewport.scroll_by(0.0, -notches * WHEEL_SCROLL_PX);
        }
    }

    /// Generation of the pan tick the host should deliver next, while a
    /// middle-button pan is active.
    pub fn pending_pan_tick(&self) -> Option<u64> {
        self.pan.pending()
    }

    /// Applies one pan tick. Stale generations are ignored.
    pub fn pan_tick(&mut self, generation: u64) -> bool {
        match self.pan.tick(generation) {
            Some(delta) => {
                self.viewport.pan_by(delta.x, delta.y);
                true
            }
            None => false,
        }
    }

    /// Aborts the gesture in progress, restoring items moved or resized by
    /// it. Without a gesture, leaves any mode other than select.
    pub fn cancel(&mut self) {
        if self.gesture.button != ButtonState::Idle {
            self.abort_gesture();
        } else if self.mode != Mode::Select {
            self.set_mode(Mode::Select);
        }
    }

    pub(super) fn abort_gesture(&mut self) {
        if let Some(snapshot) = self.gesture.snapshot.take() {
            self.items = snapshot;
            tracing::debug!("Gesture cancelled, items restored");
        }
        self.pan.stop();
        self.gesture = Default::default();
        self.set_mouse_info(String::new());
    }

    fn exceeds_threshold(&self, view_point: Point) -> bool {
        (view_point - self.gesture.press_view).manhattan_length() >= self.settings.drag_threshold_px
    }

    fn hover(&mut self, scene: Point) {
        if self.mode == Mode::Place && !self.place_items.is_empty() {
            self.move_place_items_to(scene);
        }
        let info = self.hover_info(scene);
        self.set_mouse_info(info);
    }

    // Select mode

    fn select_press(&mut self, scene: Point) {
        self.gesture.select_state = SelectState::Select;
        if let Some(single) = self.selection.single() {
            if let Some(index) = self.control_point_at(single, scene) {
                self.gesture.press_item = Some(single);
                self.gesture.resize_point = Some(index);
                return;
            }
        }
        self.gesture.press_item = self.item_at(scene);
    }

    fn select_drag(&mut self, event: MouseEvent, scene: Point) {
        if self.gesture.select_state == SelectState::Select {
            if !self.exceeds_threshold(event.position) {
                return;
            }
            self.begin_drag(event);
        }

        let from = self.gesture.press_scene;
        match self.gesture.select_state {
            SelectState::MoveItems => {
                let delta = self.snap_to_grid(scene) - self.snap_to_grid(from);
                self.move_selection_from_snapshot(delta);
                let info = self.drag_info(from, from + delta);
                self.set_mouse_info(info);
            }
            SelectState::ResizeItem => {
                let (Some(id), Some(index)) = (self.gesture.press_item, self.gesture.resize_point)
                else {
                    return;
                };
                let target = self.snap_to_grid(scene);
                if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
                    item.resize(index, target, event.modifiers.shift);
                }
                connections::drag_connected_points(&mut self.items, &[id]);
                let info = self.drag_info(from, target);
                self.set_mouse_info(info);
            }
            SelectState::RubberBand => {
                self.gesture.band = Some(Rect::from_points(from, scene));
                let info = self.drag_info(from, scene);
                self.set_mouse_info(info);
            }
            SelectState::Idle | SelectState::Select => {}
        }
    }

    fn begin_drag(&mut self, event: MouseEvent) {
        let press_item = self.gesture.press_item;
        let next = match (press_item, self.gesture.resize_point) {
            (Some(_), Some(_)) => SelectState::ResizeItem,
            (Some(id), None) => {
                if !self.selection.contains(id) {
                    let changed = if event.modifiers.ctrl {
                        self.selection.add(&mut self.items, id)
                    } else {
                        self.selection.select(&mut self.items, id)
                    };
                    if changed {
                        self.emit_current_items();
                    }
                }
                SelectState::MoveItems
            }
            (None, _) => SelectState::RubberBand,
        };
        if matches!(next, SelectState::MoveItems | SelectState::ResizeItem) {
            self.gesture.snapshot = Some(self.items.clone());
        }
        tracing::debug!("Select gesture -> {:?}", next);
        self.gesture.select_state = next;
    }

    fn move_selection_from_snapshot(&mut self, delta: Point) {
        let Some(snapshot) = self.gesture.snapshot.as_ref() else {
            return;
        };
        for (item, original) in self.items.iter_mut().zip(snapshot) {
            if item.is_selected() {
                item.set_position(original.position() + delta);
            }
        }
        let moved: Vec<ItemId> = self.selection.ids().to_vec();
        connections::drag_connected_points(&mut self.items, &moved);
    }

    fn select_release(&mut self, event: MouseEvent) {
        let additive = event.modifiers.ctrl;
        match self.gesture.select_state {
            SelectState::Select => {
                if self
                    .selection
                    .click(&mut self.items, self.gesture.press_item, additive)
                {
                    self.emit_current_items();
                }
            }
            SelectState::MoveItems => {
                let moved = self.selection.ids().to_vec();
                self.settle(&moved);
            }
            SelectState::ResizeItem => {
                if let Some(id) = self.gesture.press_item {
                    self.settle(&[id]);
                }
            }
            SelectState::RubberBand => {
                let band_view = Rect::from_points(self.gesture.press_view, event.position);
                let threshold = self.settings.drag_threshold_px;
                let changed = match self.gesture.band {
                    Some(band) if band_view.width > threshold && band_view.height > threshold => {
                        self.selection.select_in_rect(&mut self.items, band, additive)
                    }
                    // too thin to select anything, but still replaces the selection
                    _ if !additive => self.selection.deselect_all(&mut self.items),
                    _ => false,
                };
                if changed {
                    self.emit_current_items();
                }
            }
            SelectState::Idle => {}
        }
        self.gesture.snapshot = None;
    }

    /// Commits a geometry change of `subjects`: connections are re-evaluated
    /// and listeners told.
    pub(super) fn settle(&mut self, subjects: &[ItemId]) {
        connections::resolve(&mut self.items, subjects, CONNECT_EPSILON);
        self.emit(CanvasEvent::ItemsChanged);
    }

    fn right_press(&mut self, scene: Point) {
        if self.mode != Mode::Select {
            self.set_mode(Mode::Select);
            return;
        }
        if let Some(id) = self.item_at(scene) {
            if !self.selection.contains(id) && self.selection.select(&mut self.items, id) {
                self.emit_current_items();
            }
        }
    }

    // Zoom mode

    fn zoom_release(&mut self) {
        let Some(band) = self.gesture.band else {
            return;
        };
        let band_view = self.viewport.map_rect_from_scene(&band.normalized());
        let threshold = self.settings.drag_threshold_px;
        if band_view.width > threshold && band_view.height > threshold {
            self.zoom_to_rect(band);
            self.set_mode(Mode::Select);
        }
    }

    // Place mode

    /// Enters place mode with `items` following the cursor. Each commit
    /// places copies of them, so placement can continue.
    pub fn start_place(&mut self, items: Vec<DrawingItem>) {
        if items.is_empty() {
            return;
        }
        self.set_mode(Mode::Select);
        self.place_prototypes = items;
        self.place_items = ItemFactory::clone_items(&self.place_prototypes);
        self.set_mode(Mode::Place);
    }

    /// Enters place mode with a new item of the factory type `key`.
    pub fn start_place_key(&mut self, key: &str) -> bool {
        match self.factory.create(key) {
            Some(item) => {
                self.start_place(vec![item]);
                true
            }
            None => {
                tracing::warn!("No item type registered as '{}'", key);
                false
            }
        }
    }

    fn press_and_release_item(&self) -> bool {
        matches!(self.place_items.as_slice(), [only] if only.placement_policy() == PlacementPolicy::ByPressAndRelease)
    }

    fn move_place_items_to(&mut self, scene: Point) {
        let Some(anchor) = self.place_items.first().map(DrawingItem::position) else {
            return;
        };
        let delta = self.snap_to_grid(scene) - anchor;
        for item in &mut self.place_items {
            item.move_by(delta);
        }
    }

    fn place_press(&mut self, scene: Point) {
        self.move_place_items_to(scene);
        if self.press_and_release_item() {
            self.gesture.placing = true;
        }
    }

    fn place_drag(&mut self, scene: Point) {
        let target = self.snap_to_grid(scene);
        if self.gesture.placing {
            if let Some(item) = self.place_items.first_mut() {
                item.place_resize(target);
            }
            let info = self.drag_info(self.snap_to_grid(self.gesture.press_scene), target);
            self.set_mouse_info(info);
        } else {
            self.move_place_items_to(scene);
        }
    }

    fn place_release(&mut self, scene: Point) {
        if !self.gesture.placing {
            self.move_place_items_to(scene);
        }
        self.commit_place_items();
    }

    fn commit_place_items(&mut self) {
        let batch = std::mem::take(&mut self.place_items);
        let mut ids = Vec::with_capacity(batch.len());
        for mut item in batch {
            if !item.is_valid() {
                tracing::debug!("Not placing degenerate {}", item.key());
                continue;
            }
            item.set_selected(false);
            ids.push(item.id());
            self.items.push(item);
        }
        if !ids.is_empty() {
            tracing::debug!("Placed {} item(s)", ids.len());
            self.settle(&ids);
        }

        self.place_items = ItemFactory::clone_items(&self.place_prototypes);
        self.emit_current_items();
    }
}
