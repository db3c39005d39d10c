//! Viewport and coordinate transformation for canvas rendering.
//!
//! Converts between view coordinates (pixels, origin at the top-left of the
//! visible area) and scene coordinates. The mapping is
//!
//! ```text
//! view = scale · (scene − scene_rect.origin) − scroll + centering
//! ```
//!
//! where `centering` is applied per axis when the scaled scene is smaller
//! than the view, in which case that axis does not scroll.

use std::fmt;

use drawkit_core::constants::{MAX_SCALE, MIN_SCALE};

use crate::geometry::{Cached, Point, Rect, Transform};

/// Scroll range and value along one axis, in view pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollBar {
    pub value: f64,
    pub minimum: f64,
    pub maximum: f64,
}

impl ScrollBar {
    fn clamp(&mut self) {
        self.value = self.value.clamp(self.minimum, self.maximum);
    }

    /// Reset the range to `0..=maximum`, dropping any growth from panning.
    fn set_range(&mut self, maximum: f64) {
        self.minimum = 0.0;
        self.maximum = maximum.max(0.0);
        self.clamp();
    }

    /// Move by `delta`, widening the range instead of clamping.
    fn push(&mut self, delta: f64) {
        self.value += delta;
        self.minimum = self.minimum.min(self.value);
        self.maximum = self.maximum.max(self.value);
    }
}

/// Scale, scroll state and view size of a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    view_width: f64,
    view_height: f64,
    scene_rect: Rect,
    horizontal: ScrollBar,
    vertical: ScrollBar,
    transform: Cached<Transform>,
    inverse: Cached<Transform>,
}

impl Viewport {
    /// Creates a viewport showing `scene_rect` at 1:1 in a view of the given size.
    pub fn new(view_width: f64, view_height: f64, scene_rect: Rect) -> Self {
        let mut viewport = Self {
            scale: 1.0,
            view_width: view_width.max(0.0),
            view_height: view_height.max(0.0),
            scene_rect: scene_rect.normalized(),
            horizontal: ScrollBar::default(),
            vertical: ScrollBar::default(),
            transform: Cached(Transform::identity()),
            inverse: Cached(Transform::identity()),
        };
        viewport.update_ranges();
        viewport
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn view_size(&self) -> (f64, f64) {
        (self.view_width, self.view_height)
    }

    pub fn scene_rect(&self) -> Rect {
        self.scene_rect
    }

    pub fn horizontal(&self) -> ScrollBar {
        self.horizontal
    }

    pub fn vertical(&self) -> ScrollBar {
        self.vertical
    }

    /// Scene → view mapping.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// View → scene mapping.
    pub fn inverse_transform(&self) -> &Transform {
        &self.inverse
    }

    /// Called when the host window resizes. Keeps the scene point at the
    /// view center in place.
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        let center = self.view_center_in_scene();
        self.view_width = width.max(0.0);
        self.view_height = height.max(0.0);
        self.update_ranges();
        self.center_on(center);
    }

    pub fn set_scene_rect(&mut self, rect: Rect) {
        self.scene_rect = rect.normalized();
        self.update_ranges();
    }

    /// Sets the scale, clamped to the allowed range, keeping the scene point
    /// at the view center fixed. Returns true when the scale changed.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        let center = self.view_center_in_scene();
        let changed = self.apply_scale(scale);
        self.center_on(center);
        changed
    }

    /// Sets the scale keeping the scene point under `view_point` fixed.
    pub fn set_scale_about(&mut self, scale: f64, view_point: Point) -> bool {
        let anchor = self.map_to_scene(view_point);
        let changed = self.apply_scale(scale);
        let moved = self.map_from_scene(anchor);
        self.scroll_by(moved.x - view_point.x, moved.y - view_point.y);
        changed
    }

    /// Multiplies the scale by `step`.
    pub fn zoom_in(&mut self, step: f64) -> bool {
        self.set_scale(self.scale * step)
    }

    /// Divides the scale by `step`.
    pub fn zoom_out(&mut self, step: f64) -> bool {
        self.set_scale(self.scale / step)
    }

    /// Fits `rect` into the view and centers it.
    pub fn zoom_to_rect(&mut self, rect: Rect) -> bool {
        let rect = rect.normalized();
        if rect.width <= 0.0 || rect.height <= 0.0 || self.view_width <= 0.0 {
            return false;
        }
        let scale = (self.view_width / rect.width).min(self.view_height / rect.height);
        let changed = self.apply_scale(scale);
        self.center_on(rect.center());
        changed
    }

    /// Fits the whole scene rect into the view.
    pub fn zoom_fit(&mut self) -> bool {
        self.zoom_to_rect(self.scene_rect)
    }

    /// Scrolls so that `scene_point` is at the view center, as far as the
    /// scroll ranges allow.
    pub fn center_on(&mut self, scene_point: Point) {
        self.horizontal.value =
            (scene_point.x - self.scene_rect.x) * self.scale - self.view_width / 2.0;
        self.vertical.value =
            (scene_point.y - self.scene_rect.y) * self.scale - self.view_height / 2.0;
        self.horizontal.clamp();
        self.vertical.clamp();
        self.update_transform();
    }

    /// Scrolls by a pixel delta, clamped to the scroll ranges.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.horizontal.value += dx;
        self.vertical.value += dy;
        self.horizontal.clamp();
        self.vertical.clamp();
        self.update_transform();
    }

    /// Sets both scroll values, clamped to the scroll ranges.
    pub fn set_scroll(&mut self, horizontal: f64, vertical: f64) {
        self.horizontal.value = horizontal;
        self.vertical.value = vertical;
        self.horizontal.clamp();
        self.vertical.clamp();
        self.update_transform();
    }

    /// Scrolls by a pixel delta, growing the scroll ranges when the delta
    /// would leave them.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.horizontal.push(dx);
        self.vertical.push(dy);
        self.update_transform();
    }

    pub fn map_to_scene(&self, view_point: Point) -> Point {
        view_point.transformed(&self.inverse)
    }

    pub fn map_from_scene(&self, scene_point: Point) -> Point {
        scene_point.transformed(&self.transform)
    }

    pub fn map_rect_to_scene(&self, rect: &Rect) -> Rect {
        rect.transformed(&self.inverse)
    }

    pub fn map_rect_from_scene(&self, rect: &Rect) -> Rect {
        rect.transformed(&self.transform)
    }

    /// Scene length covered by `pixels` view pixels.
    pub fn scene_length(&self, pixels: f64) -> f64 {
        pixels / self.scale
    }

    /// The part of the scene currently visible.
    pub fn visible_scene_rect(&self) -> Rect {
        self.map_rect_to_scene(&Rect::new(0.0, 0.0, self.view_width, self.view_height))
    }

    fn view_center_in_scene(&self) -> Point {
        self.map_to_scene(Point::new(self.view_width / 2.0, self.view_height / 2.0))
    }

    fn apply_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() {
            return false;
        }
        let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        let changed = scale != self.scale;
        self.scale = scale;
        self.update_ranges();
        changed
    }

    fn content_size(&self) -> (f64, f64) {
        (
            self.scene_rect.width * self.scale,
            self.scene_rect.height * self.scale,
        )
    }

    fn update_ranges(&mut self) {
        let (content_width, content_height) = self.content_size();
        self.horizontal.set_range(content_width - self.view_width);
        self.vertical.set_range(content_height - self.view_height);
        self.update_transform();
    }

    /// Per-axis offset applied when the content is narrower than the view.
    fn centering(&self) -> (f64, f64) {
        let (content_width, content_height) = self.content_size();
        (
            ((self.view_width - content_width) / 2.0).max(0.0),
            ((self.view_height - content_height) / 2.0).max(0.0),
        )
    }

    fn update_transform(&mut self) {
        let (cx, cy) = self.centering();
        let scroll_x = if cx > 0.0 { 0.0 } else { self.horizontal.value };
        let scroll_y = if cy > 0.0 { 0.0 } else { self.vertical.value };
        let dx = cx - scroll_x;
        let dy = cy - scroll_y;
        let origin = self.scene_rect.top_left();

        self.transform = Cached(
            Transform::translation(-origin.x, -origin.y)
                .then_scale(self.scale, self.scale)
                .then_translate(Point::new(dx, dy).to_vector()),
        );
        self.inverse = Cached(
            Transform::translation(-dx, -dy)
                .then_scale(1.0 / self.scale, 1.0 / self.scale)
                .then_translate(origin.to_vector()),
        );
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale: {:.2}x | Scroll: ({:.1}, {:.1})",
            self.scale, self.horizontal.value, self.vertical.value
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0, Rect::new(0.0, 0.0, 1000.0, 1000.0))
    }
}
