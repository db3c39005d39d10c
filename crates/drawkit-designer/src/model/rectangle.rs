//! Rectangle with optional rounded corners.

use super::{ItemShape, PlacementPolicy, PointFlags, ShapeCache};
use crate::geometry::{Cached, Point, Rect};
use crate::outline::{rounded_rect_path, Outline};
use crate::properties::{self, apply, Accessor, PropertyValue};
use crate::renderer::Painter;
use crate::style::{Brush, Pen};
use crate::xml::{AttributeReader, AttributeWriter};

/// Corner and edge-midpoint handles, clockwise from top-left.
pub(crate) fn box_points(rect: &Rect) -> Vec<Point> {
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let (cx, cy) = ((l + r) / 2.0, (t + b) / 2.0);
    vec![
        Point::new(l, t),
        Point::new(cx, t),
        Point::new(r, t),
        Point::new(r, cy),
        Point::new(r, b),
        Point::new(cx, b),
        Point::new(l, b),
        Point::new(l, cy),
    ]
}

pub(crate) fn box_point_flags() -> Vec<PointFlags> {
    vec![PointFlags::CONTROL | PointFlags::CONNECTION; 8]
}

/// Move the edges attached to handle `index` to `position`. The result may
/// have negative extent when an edge is dragged past its opposite.
pub(crate) fn resize_box(rect: &Rect, index: usize, position: Point) -> Rect {
    let (mut l, mut t, mut r, mut b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    match index {
        0 => (l, t) = (position.x, position.y),
        1 => t = position.y,
        2 => (r, t) = (position.x, position.y),
        3 => r = position.x,
        4 => (r, b) = (position.x, position.y),
        5 => b = position.y,
        6 => (l, b) = (position.x, position.y),
        7 => l = position.x,
        _ => {}
    }
    Rect::new(l, t, r - l, b - t)
}

pub(crate) fn scale_rect(rect: &Rect, factor: f64) -> Rect {
    Rect::new(
        rect.x * factor,
        rect.y * factor,
        rect.width * factor,
        rect.height * factor,
    )
}

pub(crate) fn write_rect(writer: &mut AttributeWriter, rect: &Rect) {
    writer.write_f64("left", rect.x, 0.0);
    writer.write_f64("top", rect.y, 0.0);
    writer.write_f64("width", rect.width, 0.0);
    writer.write_f64("height", rect.height, 0.0);
}

pub(crate) fn read_rect(reader: &AttributeReader) -> Rect {
    Rect::new(
        reader.f64_or("left", 0.0),
        reader.f64_or("top", 0.0),
        reader.f64_or("width", 0.0),
        reader.f64_or("height", 0.0),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectItem {
    rect: Rect,
    corner_radius: f64,
    pen: Pen,
    brush: Brush,
    cache: Cached<ShapeCache>,
}

pub(crate) static RECT_PROPERTIES: &[Accessor<RectItem>] = &[
    Accessor {
        name: properties::PEN,
        get: |r| PropertyValue::Pen(r.pen),
        set: |r, v| apply(v, |pen| r.set_pen(pen)),
    },
    Accessor {
        name: properties::BRUSH,
        get: |r| PropertyValue::Brush(r.brush),
        set: |r, v| apply(v, |brush| r.set_brush(brush)),
    },
    Accessor {
        name: properties::CORNER_RADIUS,
        get: |r| PropertyValue::Number(r.corner_radius),
        set: |r, v| apply(v, |radius| r.set_corner_radius(radius)),
    },
];

impl RectItem {
    pub fn new(rect: Rect) -> Self {
        let mut item = Self {
            rect,
            corner_radius: 0.0,
            pen: Pen::default(),
            brush: Brush::default(),
            cache: Cached::default(),
        };
        item.update_geometry();
        item
    }

    /// The rectangle as dragged; see [`Rect::normalized`] for the drawn form.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.update_geometry();
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Negative radii are raised to zero.
    pub fn set_corner_radius(&mut self, radius: f64) {
        self.corner_radius = radius.max(0.0);
        self.update_geometry();
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
        self.update_geometry();
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
        self.update_geometry();
    }

    fn update_geometry(&mut self) {
        let rect = self.rect.normalized();
        let path = rounded_rect_path(rect, self.corner_radius);
        let mut outline = Outline::new();
        outline.add_stroke(path.clone(), self.pen.width);
        if self.brush.is_visible() {
            outline.add_fill(path);
        }
        let half = self.pen.width / 2.0;
        let bounding = rect.adjusted(-half, -half, half, half);
        self.cache = Cached(ShapeCache { bounding, outline });
    }
}

impl Default for RectItem {
    fn default() -> Self {
        RectItem::new(Rect::default())
    }
}

impl ItemShape for RectItem {
    fn key(&self) -> &'static str {
        "rect"
    }

    fn point_flags(&self) -> Vec<PointFlags> {
        box_point_flags()
    }

    fn point_positions(&self) -> Vec<Point> {
        box_points(&self.rect)
    }

    fn resize_point(&mut self, index: usize, position: Point, _snap45: bool) {
        self.set_rect(resize_box(&self.rect, index, position));
    }

    fn translate(&mut self, delta: Point) {
        self.set_rect(self.rect.translated(delta));
    }

    fn scale(&mut self, factor: f64) {
        self.rect = scale_rect(&self.rect, factor);
        self.corner_radius *= factor;
        self.pen.width *= factor;
        self.update_geometry();
    }

    fn bounding_rect(&self) -> Rect {
        self.cache.bounding
    }

    fn shape(&self) -> &Outline {
        &self.cache.outline
    }

    fn center(&self) -> Point {
        self.rect.center()
    }

    fn is_valid(&self) -> bool {
        self.rect.width != 0.0 && self.rect.height != 0.0
    }

    fn paint(&self, painter: &mut dyn Painter, _background: &Brush) {
        painter.set_pen(self.pen);
        painter.set_brush(self.brush);
        let rect = self.rect.normalized();
        if self.corner_radius > 0.0 {
            painter.draw_rounded_rect(rect, self.corner_radius);
        } else {
            painter.draw_rect(rect);
        }
    }

    fn write_attributes(&self, writer: &mut AttributeWriter) {
        write_rect(writer, &self.rect);
        writer.write_f64("cornerRadius", self.corner_radius, 0.0);
        writer.write_pen("pen", &self.pen);
        writer.write_brush("brush", &self.brush);
    }

    fn read_attributes(&mut self, reader: &AttributeReader) {
        self.rect = read_rect(reader);
        self.corner_radius = reader.f64_or("cornerRadius", 0.0).max(0.0);
        self.pen = reader.pen("pen");
        self.brush = reader.brush("brush");
        self.update_geometry();
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        properties::get(RECT_PROPERTIES, self, name)
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool {
        properties::set(RECT_PROPERTIES, self, name, value)
    }

    fn property_names(&self) -> Vec<&'static str> {
        properties::names(RECT_PROPERTIES)
    }

    fn placement_policy(&self) -> PlacementPolicy {
        PlacementPolicy::ByPressAndRelease
    }

    fn place_resize_index(&self) -> Option<usize> {
        Some(4)
    }
}
