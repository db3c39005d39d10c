//! Ellipse inscribed in a rectangle.

use super::rectangle::{box_point_flags, box_points, read_rect, resize_box, scale_rect, write_rect};
use super::{ItemShape, PlacementPolicy, PointFlags, ShapeCache};
use crate::geometry::{Cached, Point, Rect};
use crate::outline::{ellipse_path, Outline};
use crate::properties::{self, apply, Accessor, PropertyValue};
use crate::renderer::Painter;
use crate::style::{Brush, Pen};
use crate::xml::{AttributeReader, AttributeWriter};

#[derive(Debug, Clone, PartialEq)]
pub struct EllipseItem {
    rect: Rect,
    pen: Pen,
    brush: Brush,
    cache: Cached<ShapeCache>,
}

pub(crate) static ELLIPSE_PROPERTIES: &[Accessor<EllipseItem>] = &[
    Accessor {
        name: properties::PEN,
        get: |e| PropertyValue::Pen(e.pen),
        set: |e, v| apply(v, |pen| e.set_pen(pen)),
    },
    Accessor {
        name: properties::BRUSH,
        get: |e| PropertyValue::Brush(e.brush),
        set: |e, v| apply(v, |brush| e.set_brush(brush)),
    },
];

impl EllipseItem {
    pub fn new(rect: Rect) -> Self {
        let mut item = Self {
            rect,
            pen: Pen::default(),
            brush: Brush::default(),
            cache: Cached::default(),
        };
        item.update_geometry();
        item
    }

    pub fn ellipse(&self) -> Rect {
        self.rect
    }

    pub fn set_ellipse(&mut self, rect: Rect) {
        self.rect = rect;
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
        let mut outline = Outline::new();
        if !rect.is_empty() {
            let path = ellipse_path(rect);
            outline.add_stroke(path.clone(), self.pen.width);
            if self.brush.is_visible() {
                outline.add_fill(path);
            }
        }
        let half = self.pen.width / 2.0;
        let bounding = rect.adjusted(-half, -half, half, half);
        self.cache = Cached(ShapeCache { bounding, outline });
    }
}

impl Default for EllipseItem {
    fn default() -> Self {
        EllipseItem::new(Rect::default())
    }
}

impl ItemShape for EllipseItem {
    fn key(&self) -> &'static str {
        "ellipse"
    }

    fn point_flags(&self) -> Vec<PointFlags> {
        box_point_flags()
    }

    fn point_positions(&self) -> Vec<Point> {
        box_points(&self.rect)
    }

    fn resize_point(&mut self, index: usize, position: Point, _snap45: bool) {
        self.set_ellipse(resize_box(&self.rect, index, position));
    }

    fn translate(&mut self, delta: Point) {
        self.set_ellipse(self.rect.translated(delta));
    }

    fn scale(&mut self, factor: f64) {
        self.rect = scale_rect(&self.rect, factor);
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
        painter.draw_ellipse(self.rect.normalized());
    }

    fn write_attributes(&self, writer: &mut AttributeWriter) {
        write_rect(writer, &self.rect);
        writer.write_pen("pen", &self.pen);
        writer.write_brush("brush", &self.brush);
    }

    fn read_attributes(&mut self, reader: &AttributeReader) {
        self.rect = read_rect(reader);
        self.pen = reader.pen("pen");
        self.brush = reader.brush("brush");
        self.update_geometry();
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        properties::get(ELLIPSE_PROPERTIES, self, name)
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool {
        properties::set(ELLIPSE_PROPERTIES, self, name, value)
    }

    fn property_names(&self) -> Vec<&'static str> {
        properties::names(ELLIPSE_PROPERTIES)
    }

    fn placement_policy(&self) -> PlacementPolicy {
        PlacementPolicy::ByPressAndRelease
    }

    fn place_resize_index(&self) -> Option<usize> {
        Some(4)
    }
}
