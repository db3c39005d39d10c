//! Cubic Bézier curve with optional arrowheads.

use super::{stroked_bounds, ItemShape, PlacementPolicy, PointFlags, ShapeCache};
use crate::arrow::{direction_angle, Arrow};
use crate::geometry::{Cached, Point, Rect};
use crate::outline::{cubic_path, Outline};
use crate::properties::{self, apply, Accessor, PropertyValue};
use crate::renderer::Painter;
use crate::style::{Brush, Pen};
use crate::xml::{AttributeReader, AttributeWriter};

/// Curve from `p1` to `p2` shaped by the control points `c1` and `c2`.
///
/// Moving an endpoint drags its control point along.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveItem {
    p1: Point,
    c1: Point,
    c2: Point,
    p2: Point,
    pen: Pen,
    start_arrow: Arrow,
    end_arrow: Arrow,
    cache: Cached<ShapeCache>,
}

static CURVE_PROPERTIES: &[Accessor<CurveItem>] = &[
    Accessor {
        name: properties::PEN,
        get: |c| PropertyValue::Pen(c.pen),
        set: |c, v| apply(v, |pen| c.set_pen(pen)),
    },
    Accessor {
        name: properties::START_ARROW,
        get: |c| PropertyValue::Arrow(c.start_arrow.clone()),
        set: |c, v| apply(v, |arrow| c.set_start_arrow(arrow)),
    },
    Accessor {
        name: properties::END_ARROW,
        get: |c| PropertyValue::Arrow(c.end_arrow.clone()),
        set: |c, v| apply(v, |arrow| c.set_end_arrow(arrow)),
    },
];

impl CurveItem {
    pub fn new(p1: Point, c1: Point, c2: Point, p2: Point) -> Self {
        let mut curve = Self {
            p1,
            c1,
            c2,
            p2,
            pen: Pen::default(),
            start_arrow: Arrow::default(),
            end_arrow: Arrow::default(),
            cache: Cached::default(),
        };
        curve.update_geometry();
        curve
    }

    /// Endpoints and control points, in point order.
    pub fn curve(&self) -> [Point; 4] {
        [self.p1, self.c1, self.c2, self.p2]
    }

    pub fn set_curve(&mut self, p1: Point, c1: Point, c2: Point, p2: Point) {
        self.p1 = p1;
        self.c1 = c1;
        self.c2 = c2;
        self.p2 = p2;
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

    fn shows(&self, arrow: &Arrow) -> bool {
        !arrow.is_none() && self.p1.distance_to(&self.p2) >= arrow.size()
    }

    fn start_angle(&self) -> f64 {
        let toward = if self.c1 == self.p1 { self.p2 } else { self.c1 };
        direction_angle(self.p1, toward)
    }

    fn end_angle(&self) -> f64 {
        let toward = if self.c2 == self.p2 { self.p1 } else { self.c2 };
        direction_angle(self.p2, toward)
    }

    fn update_geometry(&mut self) {
        let mut outline = Outline::new();
        outline.add_stroke(
            cubic_path(self.p1, self.c1, self.c2, self.p2),
            self.pen.width,
        );

        let mut arrows = Vec::new();
        if self.shows(&self.start_arrow) {
            arrows.push(self.start_arrow.shape(&self.pen, self.p1, self.start_angle()));
        }
        if self.shows(&self.end_arrow) {
            arrows.push(self.end_arrow.shape(&self.pen, self.p2, self.end_angle()));
        }

        let bounding = stroked_bounds(
            &self.curve(),
            self.pen.width,
            &arrows.iter().collect::<Vec<_>>(),
        );
        for arrow in arrows {
            outline.extend(arrow);
        }
        self.cache = Cached(ShapeCache { bounding, outline });
    }
}

impl Default for CurveItem {
    fn default() -> Self {
        let zero = Point::zero();
        CurveItem::new(zero, zero, zero, zero)
    }
}

impl ItemShape for CurveItem {
    fn key(&self) -> &'static str {
        "curve"
    }

    fn point_flags(&self) -> Vec<PointFlags> {
        vec![
            PointFlags::endpoint(),
            PointFlags::CONTROL,
            PointFlags::CONTROL,
            PointFlags::endpoint(),
        ]
    }

    fn point_positions(&self) -> Vec<Point> {
        self.curve().to_vec()
    }

    fn resize_point(&mut self, index: usize, position: Point, _snap45: bool) {
        let [p1, c1, c2, p2] = self.curve();
        match index {
            0 => self.set_curve(position, c1 + (position - p1), c2, p2),
            1 => self.set_curve(p1, position, c2, p2),
            2 => self.set_curve(p1, c1, position, p2),
            3 => self.set_curve(p1, c1, c2 + (position - p2), position),
            _ => {}
        }
    }

    /// Drags the end point and spreads the control points evenly along the
    /// chord.
    fn place_resize(&mut self, position: Point) {
        let chord = position - self.p1;
        self.set_curve(
            self.p1,
            self.p1 + chord * (1.0 / 3.0),
            self.p1 + chord * (2.0 / 3.0),
            position,
        );
    }

    fn translate(&mut self, delta: Point) {
        let [p1, c1, c2, p2] = self.curve();
        self.set_curve(p1 + delta, c1 + delta, c2 + delta, p2 + delta);
    }

    fn scale(&mut self, factor: f64) {
        let [p1, c1, c2, p2] = self.curve();
        self.pen.width *= factor;
        self.start_arrow.set_size(self.start_arrow.size() * factor);
        self.end_arrow.set_size(self.end_arrow.size() * factor);
        self.set_curve(p1 * factor, c1 * factor, c2 * factor, p2 * factor);
    }

    fn bounding_rect(&self) -> Rect {
        self.cache.bounding
    }

    fn shape(&self) -> &Outline {
        &self.cache.outline
    }

    fn center(&self) -> Point {
        Rect::bounding(&self.curve())
            .unwrap_or_default()
            .center()
    }

    fn is_valid(&self) -> bool {
        self.p1 != self.p2
    }

    fn paint(&self, painter: &mut dyn Painter, background: &Brush) {
        painter.set_pen(self.pen);
        painter.set_brush(Brush::none());
        painter.draw_path(&cubic_path(self.p1, self.c1, self.c2, self.p2));

        if self.shows(&self.start_arrow) {
            self.start_arrow
                .paint(painter, &self.pen, background, self.p1, self.start_angle());
        }
        if self.shows(&self.end_arrow) {
            self.end_arrow
                .paint(painter, &self.pen, background, self.p2, self.end_angle());
        }
    }

    fn write_attributes(&self, writer: &mut AttributeWriter) {
        writer.write_f64("x1", self.p1.x, 0.0);
        writer.write_f64("y1", self.p1.y, 0.0);
        writer.write_f64("cx1", self.c1.x, 0.0);
        writer.write_f64("cy1", self.c1.y, 0.0);
        writer.write_f64("cx2", self.c2.x, 0.0);
        writer.write_f64("cy2", self.c2.y, 0.0);
        writer.write_f64("x2", self.p2.x, 0.0);
        writer.write_f64("y2", self.p2.y, 0.0);
        writer.write_pen("pen", &self.pen);
        writer.write_arrow("startArrow", &self.start_arrow);
        writer.write_arrow("endArrow", &self.end_arrow);
    }

    fn read_attributes(&mut self, reader: &AttributeReader) {
        let point = |x: &str, y: &str| Point::new(reader.f64_or(x, 0.0), reader.f64_or(y, 0.0));
        self.p1 = point("x1", "y1");
        self.c1 = point("cx1", "cy1");
        self.c2 = point("cx2", "cy2");
        self.p2 = point("x2", "y2");
        self.pen = reader.pen("pen");
        self.start_arrow = reader.arrow("startArrow");
        self.end_arrow = reader.arrow("endArrow");
        self.update_geometry();
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        properties::get(CURVE_PROPERTIES, self, name)
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool {
        properties::set(CURVE_PROPERTIES, self, name, value)
    }

    fn property_names(&self) -> Vec<&'static str> {
        properties::names(CURVE_PROPERTIES)
    }

    fn placement_policy(&self) -> PlacementPolicy {
        PlacementPolicy::ByPressAndRelease
    }

    fn place_resize_index(&self) -> Option<usize> {
        Some(3)
    }
}
