//! Closed polygon.

use super::polyline::pad;
use super::{nearest_segment, stroked_bounds, ItemShape, PointFlags, ShapeCache};
use crate::geometry::{Cached, Point, Rect};
use crate::outline::{polyline_path, Outline};
use crate::properties::{self, apply, Accessor, PropertyValue};
use crate::renderer::Painter;
use crate::style::{Brush, Pen};
use crate::xml::{AttributeReader, AttributeWriter};

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonItem {
    points: Vec<Point>,
    pen: Pen,
    brush: Brush,
    cache: Cached<ShapeCache>,
}

static POLYGON_PROPERTIES: &[Accessor<PolygonItem>] = &[
    Accessor {
        name: properties::PEN,
        get: |p| PropertyValue::Pen(p.pen),
        set: |p, v| apply(v, |pen| p.set_pen(pen)),
    },
    Accessor {
        name: properties::BRUSH,
        get: |p| PropertyValue::Brush(p.brush),
        set: |p, v| apply(v, |brush| p.set_brush(brush)),
    },
];

impl PolygonItem {
    /// Fewer than three points are padded by repeating the last one.
    pub fn new(points: Vec<Point>) -> Self {
        let mut polygon = Self {
            points: pad(points, 3),
            pen: Pen::default(),
            brush: Brush::default(),
            cache: Cached::default(),
        };
        polygon.update_geometry();
        polygon
    }

    pub fn polygon(&self) -> &[Point] {
        &self.points
    }

    pub fn set_polygon(&mut self, points: Vec<Point>) {
        self.points = pad(points, 3);
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
        let mut outline = Outline::new();
        let path = polyline_path(&self.points, true);
        outline.add_stroke(path.clone(), self.pen.width);
        if self.brush.is_visible() {
            outline.add_fill(path);
        }
        let bounding = stroked_bounds(&self.points, self.pen.width, &[]);
        self.cache = Cached(ShapeCache { bounding, outline });
    }
}

impl Default for PolygonItem {
    fn default() -> Self {
        PolygonItem::new(vec![
            Point::new(0.0, -20.0),
            Point::new(20.0, 20.0),
            Point::new(-20.0, 20.0),
        ])
    }
}

impl ItemShape for PolygonItem {
    fn key(&self) -> &'static str {
        "polygon"
    }

    fn point_flags(&self) -> Vec<PointFlags> {
        vec![PointFlags::CONTROL | PointFlags::CONNECTION; self.points.len()]
    }

    fn point_positions(&self) -> Vec<Point> {
        self.points.clone()
    }

    fn resize_point(&mut self, index: usize, position: Point, _snap45: bool) {
        if index < self.points.len() {
            self.points[index] = position;
            self.update_geometry();
        }
    }

    fn translate(&mut self, delta: Point) {
        for p in &mut self.points {
            *p = *p + delta;
        }
        self.update_geometry();
    }

    fn scale(&mut self, factor: f64) {
        for p in &mut self.points {
            *p = *p * factor;
        }
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
        Rect::bounding(&self.points).unwrap_or_default().center()
    }

    /// Not collapsed onto a line.
    fn is_valid(&self) -> bool {
        Rect::bounding(&self.points).is_some_and(|r| !r.is_empty())
    }

    fn paint(&self, painter: &mut dyn Painter, _background: &Brush) {
        painter.set_pen(self.pen);
        painter.set_brush(self.brush);
        painter.draw_polygon(&self.points);
    }

    fn write_attributes(&self, writer: &mut AttributeWriter) {
        if self.points != PolygonItem::default().points {
            writer.write_points("points", &self.points);
        }
        writer.write_pen("pen", &self.pen);
        writer.write_brush("brush", &self.brush);
    }

    fn read_attributes(&mut self, reader: &AttributeReader) {
        self.points = reader
            .points("points")
            .map(|points| pad(points, 3))
            .unwrap_or_else(|| PolygonItem::default().points);
        self.pen = reader.pen("pen");
        self.brush = reader.brush("brush");
        self.update_geometry();
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        properties::get(POLYGON_PROPERTIES, self, name)
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool {
        properties::set(POLYGON_PROPERTIES, self, name, value)
    }

    fn property_names(&self) -> Vec<&'static str> {
        properties::names(POLYGON_PROPERTIES)
    }

    fn can_insert_points(&self) -> bool {
        true
    }

    fn can_remove_points(&self) -> bool {
        self.points.len() > 3
    }

    fn insert_vertex(&mut self, position: Point) -> Option<usize> {
        let segment = nearest_segment(&self.points, &position, true)?;
        self.points.insert(segment + 1, position);
        self.update_geometry();
        Some(segment + 1)
    }

    fn remove_vertex(&mut self, index: usize) -> bool {
        if self.points.len() <= 3 || index >= self.points.len() {
            return false;
        }
        self.points.remove(index);
        self.update_geometry();
        true
    }
}
