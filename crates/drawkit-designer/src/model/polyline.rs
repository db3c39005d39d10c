//! Open polyline with optional arrowheads.

use super::{nearest_segment, stroked_bounds, ItemShape, PlacementPolicy, PointFlags, ShapeCache};
use crate::arrow::{direction_angle, Arrow};
use crate::geometry::{Cached, Point, Rect};
use crate::outline::{polyline_path, Outline};
use crate::properties::{self, apply, Accessor, PropertyValue};
use crate::renderer::Painter;
use crate::style::{Brush, Pen};
use crate::xml::{AttributeReader, AttributeWriter};

/// Polyline through at least two points. The end points are free
/// connection points; interior vertices are control points only.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineItem {
    points: Vec<Point>,
    pen: Pen,
    start_arrow: Arrow,
    end_arrow: Arrow,
    cache: Cached<ShapeCache>,
}

static POLYLINE_PROPERTIES: &[Accessor<PolylineItem>] = &[
    Accessor {
        name: properties::PEN,
        get: |p| PropertyValue::Pen(p.pen),
        set: |p, v| apply(v, |pen| p.set_pen(pen)),
    },
    Accessor {
        name: properties::START_ARROW,
        get: |p| PropertyValue::Arrow(p.start_arrow.clone()),
        set: |p, v| apply(v, |arrow| p.set_start_arrow(arrow)),
    },
    Accessor {
        name: properties::END_ARROW,
        get: |p| PropertyValue::Arrow(p.end_arrow.clone()),
        set: |p, v| apply(v, |arrow| p.set_end_arrow(arrow)),
    },
];

impl PolylineItem {
    /// Fewer than two points are padded by repeating the last one.
    pub fn new(points: Vec<Point>) -> Self {
        let mut polyline = Self {
            points: pad(points, 2),
            pen: Pen::default(),
            start_arrow: Arrow::default(),
            end_arrow: Arrow::default(),
            cache: Cached::default(),
        };
        polyline.update_geometry();
        polyline
    }

    pub fn polyline(&self) -> &[Point] {
        &self.points
    }

    pub fn set_polyline(&mut self, points: Vec<Point>) {
        self.points = pad(points, 2);
        self.update_geometry();
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
        self.update_geometry();
    }

    pub fn start_arrow(&self) -> &Arrow {
        &self.start_arrow
    }

    pub fn set_start_arrow(&mut self, arrow: Arrow) {
        self.start_arrow = arrow;
        self.update_geometry();
    }

    pub fn end_arrow(&self) -> &Arrow {
        &self.end_arrow
    }

    pub fn set_end_arrow(&mut self, arrow: Arrow) {
        self.end_arrow = arrow;
        self.update_geometry();
    }

    fn first_segment(&self) -> (Point, Point) {
        (self.points[0], self.points[1])
    }

    fn last_segment(&self) -> (Point, Point) {
        let n = self.points.len();
        (self.points[n - 1], self.points[n - 2])
    }

    /// Arrowheads are placed on the end segments and only drawn when they
    /// fit on them.
    fn arrow_placements(&self) -> Vec<(&Arrow, Point, f64)> {
        let mut placements = Vec::new();
        for (arrow, (tip, toward)) in [
            (&self.start_arrow, self.first_segment()),
            (&self.end_arrow, self.last_segment()),
        ] {
            if !arrow.is_none() && tip.distance_to(&toward) >= arrow.size() {
                placements.push((arrow, tip, direction_angle(tip, toward)));
            }
        }
        placements
    }

    fn update_geometry(&mut self) {
        let mut outline = Outline::new();
        outline.add_stroke(polyline_path(&self.points, false), self.pen.width);

        let arrows: Vec<Outline> = self
            .arrow_placements()
            .into_iter()
            .map(|(arrow, tip, angle)| arrow.shape(&self.pen, tip, angle))
            .collect();
        let bounding = stroked_bounds(
            &self.points,
            self.pen.width,
            &arrows.iter().collect::<Vec<_>>(),
        );
        for arrow in arrows {
            outline.extend(arrow);
        }
        self.cache = Cached(ShapeCache { bounding, outline });
    }
}

pub(crate) fn pad(mut points: Vec<Point>, minimum: usize) -> Vec<Point> {
    let last = points.last().copied().unwrap_or_default();
    while points.len() < minimum {
        points.push(last);
    }
    points
}

impl Default for PolylineItem {
    fn default() -> Self {
        PolylineItem::new(vec![Point::zero(), Point::zero()])
    }
}

impl ItemShape for PolylineItem {
    fn key(&self) -> &'static str {
        "polyline"
    }

    fn point_flags(&self) -> Vec<PointFlags> {
        let last = self.points.len() - 1;
        (0..self.points.len())
            .map(|i| {
                if i == 0 || i == last {
                    PointFlags::endpoint()
                } else {
                    PointFlags::CONTROL
                }
            })
            .collect()
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
        self.start_arrow.set_size(self.start_arrow.size() * factor);
        self.end_arrow.set_size(self.end_arrow.size() * factor);
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

    /// At least two distinct points.
    fn is_valid(&self) -> bool {
        self.points.iter().any(|p| *p != self.points[0])
    }

    fn paint(&self, painter: &mut dyn Painter, background: &Brush) {
        painter.set_pen(self.pen);
        painter.set_brush(Brush::none());
        painter.draw_polyline(&self.points);
        for (arrow, tip, angle) in self.arrow_placements() {
            arrow.paint(painter, &self.pen, background, tip, angle);
        }
    }

    fn write_attributes(&self, writer: &mut AttributeWriter) {
        if self.points.len() != 2 || self.points.iter().any(|p| *p != Point::zero()) {
            writer.write_points("points", &self.points);
        }
        writer.write_pen("pen", &self.pen);
        writer.write_arrow("startArrow", &self.start_arrow);
        writer.write_arrow("endArrow", &self.end_arrow);
    }

    fn read_attributes(&mut self, reader: &AttributeReader) {
        self.points = pad(reader.points("points").unwrap_or_default(), 2);
        self.pen = reader.pen("pen");
        self.start_arrow = reader.arrow("startArrow");
        self.end_arrow = reader.arrow("endArrow");
        self.update_geometry();
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        properties::get(POLYLINE_PROPERTIES, self, name)
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool {
        properties::set(POLYLINE_PROPERTIES, self, name, value)
    }

    fn property_names(&self) -> Vec<&'static str> {
        properties::names(POLYLINE_PROPERTIES)
    }

    fn placement_policy(&self) -> PlacementPolicy {
        PlacementPolicy::ByPressAndRelease
    }

    fn place_resize_index(&self) -> Option<usize> {
        Some(self.points.len() - 1)
    }

    fn can_insert_points(&self) -> bool {
        true
    }

    fn can_remove_points(&self) -> bool {
        self.points.len() > 2
    }

    fn insert_vertex(&mut self, position: Point) -> Option<usize> {
        let segment = nearest_segment(&self.points, &position, false)?;
        self.points.insert(segment + 1, position);
        self.update_geometry();
        Some(segment + 1)
    }

    /// End points stay; only interior vertices can go.
    fn remove_vertex(&mut self, index: usize) -> bool {
        if self.points.len() <= 2 || index == 0 || index >= self.points.len() - 1 {
            return false;
        }
        self.points.remove(index);
        self.update_geometry();
        true
    }
}
