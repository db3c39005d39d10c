//! Drawing the canvas through a [`Painter`].
//!
//! Order: background, grid, items back to front, items being placed, then
//! view-space overlays (selection handles and the active band). Scene
//! content is drawn with the viewport transform; overlays use the identity
//! so handles keep a fixed pixel size at every scale.

use drawkit_core::constants::MIN_GRID_SPACING_PX;
use drawkit_core::GridStyle;

use super::Canvas;
use crate::geometry::{Point, Rect, Transform};
use crate::renderer::Painter;
use crate::style::{Brush, Color, Pen, PenStyle};

const HANDLE_COLOR: Color = Color::rgb(0, 128, 255);
const BAND_COLOR: Color = Color::rgb(0, 0, 0);

impl Canvas {
    pub fn render(&self, painter: &mut dyn Painter) {
        let scene_transform = *self.viewport.transform();

        painter.set_transform(scene_transform);
        self.draw_background(painter);
        self.draw_grid(painter);

        let background = self.page.background;
        for item in &self.items {
            item.paint(painter, &background);
        }
        for item in &self.place_items {
            item.paint(painter, &background);
        }

        painter.set_transform(Transform::identity());
        self.draw_handles(painter);
        self.draw_band(painter);
    }

    fn draw_background(&self, painter: &mut dyn Painter) {
        painter.set_pen(Pen::none());
        painter.set_brush(self.page.background);
        painter.draw_rect(self.page.scene_rect);
    }

    /// Visible part of the scene rect, or `None` when nothing of it shows.
    fn visible_page(&self) -> Option<Rect> {
        let visible = self.viewport.visible_scene_rect();
        let page = self.page.scene_rect;
        if !visible.intersects(&page) {
            return None;
        }
        let left = visible.left().max(page.left());
        let top = visible.top().max(page.top());
        let right = visible.right().min(page.right());
        let bottom = visible.bottom().min(page.bottom());
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    fn draw_grid(&self, painter: &mut dyn Painter) {
        let grid = self.page.grid;
        if self.page.grid_style == GridStyle::None || grid <= 0.0 {
            return;
        }
        let Some(area) = self.visible_page() else {
            return;
        };
        let origin = self.page.scene_rect.top_left();
        let major = grid * self.page.grid_spacing_major as f64;
        let minor = grid * self.page.grid_spacing_minor as f64;
        let hairline = self.viewport.scene_length(1.0);
        let color = self.page.grid_brush.color;

        painter.set_brush(Brush::none());
        match self.page.grid_style {
            GridStyle::None => {}
            GridStyle::Dotted => {
                if let Some((xs, ys)) = self.grid_lines(area, origin, major) {
                    let dots: Vec<Point> = ys
                        .iter()
                        .flat_map(|y| xs.iter().map(move |x| Point::new(*x, *y)))
                        .collect();
                    painter.set_pen(Pen::solid(color, hairline));
                    painter.draw_points(&dots);
                }
            }
            GridStyle::Lined => {
                painter.set_pen(Pen::solid(color, hairline));
                self.draw_grid_lines(painter, area, origin, major);
            }
            GridStyle::Graph => {
                painter.set_pen(Pen::new(color, hairline, PenStyle::Dot));
                self.draw_grid_lines(painter, area, origin, minor);
                painter.set_pen(Pen::solid(color, hairline));
                self.draw_grid_lines(painter, area, origin, major);
            }
        }
    }

    /// Grid coordinates inside `area` for lines every `spacing` from
    /// `origin`, or `None` when they would be too dense to draw.
    fn grid_lines(&self, area: Rect, origin: Point, spacing: f64) -> Option<(Vec<f64>, Vec<f64>)> {
        if spacing <= 0.0 || spacing * self.viewport.scale() < MIN_GRID_SPACING_PX {
            return None;
        }
        let steps = |from: f64, to: f64, base: f64| -> Vec<f64> {
            let first = ((from - base) / spacing).ceil() as i64;
            let last = ((to - base) / spacing).floor() as i64;
            (first..=last).map(|i| base + i as f64 * spacing).collect()
        };
        Some((
            steps(area.left(), area.right(), origin.x),
            steps(area.top(), area.bottom(), origin.y),
        ))
    }

    fn draw_grid_lines(&self, painter: &mut dyn Painter, area: Rect, origin: Point, spacing: f64) {
        let Some((xs, ys)) = self.grid_lines(area, origin, spacing) else {
            return;
        };
        for x in xs {
            painter.draw_line(Point::new(x, area.top()), Point::new(x, area.bottom()));
        }
        for y in ys {
            painter.draw_line(Point::new(area.left(), y), Point::new(area.right(), y));
        }
    }

    fn draw_handles(&self, painter: &mut dyn Painter) {
        let size = self.settings.handle_size_px;
        painter.set_pen(Pen::solid(HANDLE_COLOR, 1.0));
        painter.set_brush(Brush::new(Color::white()));
        for item in self.items.iter().filter(|item| item.is_selected()) {
            for point in item.points().iter().filter(|p| p.is_control()) {
                let view = self.map_from_scene(item.map_to_scene(point.position()));
                painter.draw_rect(Rect::new(view.x - size / 2.0, view.y - size / 2.0, size, size));
            }
        }
    }

    fn draw_band(&self, painter: &mut dyn Painter) {
        let Some(band) = self.gesture.band else {
            return;
        };
        painter.set_pen(Pen::new(BAND_COLOR, 1.0, PenStyle::Dash));
        painter.set_brush(Brush::none());
        painter.draw_rect(self.viewport.map_rect_from_scene(&band.normalized()));
    }
}
