//! Straight line with optional arrowheads.

use std::f64::consts::FRAC_PI_4;

use super::{stroked_bounds, ItemShape, PlacementPolicy, PointFlags, ShapeCache};
use crate::arrow::{direction_angle, Arrow};
use crate::geometry::{Cached, Point, Rect};
use crate::outline::{polyline_path, Outline};
use crate::properties::{self, apply, Accessor, PropertyValue};
use crate::renderer::Painter;
use crate::style::{Brush, Pen};
use crate::xml::{AttributeReader, AttributeWriter};

/// Position of `moving` snapped to the nearest 45° direction from `fixed`,
/// keeping its distance from `fixed`.
pub fn snap_to_45(fixed: Point, moving: Point) -> Point {
    let d = moving - fixed;
    let radius = d.length();
    if radius == 0.0 {
        return moving;
    }
    let step = (d.y.atan2(d.x) / FRAC_PI_4).round() as i64;
    let (sx, sy) = match step.rem_euclid(8) {
        0 => (1.0, 0.0),
        1 => (1.0, 1.0),
        2 => (0.0, 1.0),
        3 => (-1.0, 1.0),
        4 => (-1.0, 0.0),
        5 => (-1.0, -1.0),
        6 => (0.0, -1.0),
        _ => (1.0, -1.0),
    };
    // diagonal radius is max(|dx|, |dy|)·√2, i.e. both offsets equal the larger one
    let length = if step.rem_euclid(2) == 1 {
        d.x.abs().max(d.y.abs())
    } else {
        radius
    };
    fixed + Point::new(sx * length, sy * length)
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    p1: Point,
    p2: Point,
    pen: Pen,
    start_arrow: Arrow,
    end_arrow: Arrow,
    cache: Cached<ShapeCache>,
}

static LINE_PROPERTIES: &[Accessor<LineItem>] = &[
    Accessor {
        name: properties::PEN,
        get: |l| PropertyValue::Pen(l.pen),
        set: |l, v| apply(v, |pen| l.set_pen(pen)),
    },
    Accessor {
        name: properties::START_ARROW,
        get: |l| PropertyValue::Arrow(l.start_arrow.clone()),
        set: |l, v| apply(v, |arrow| l.set_start_arrow(arrow)),
    },
    Accessor {
        name: properties::END_ARROW,
        get: |l| PropertyValue::Arrow(l.end_arrow.clone()),
        set: |l, v| apply(v, |arrow| l.set_end_arrow(arrow)),
    },
];

impl LineItem {
    pub fn new(p1: Point, p2: Point) -> Self {
        let mut line = Self {
            p1,
            p2,
            pen: Pen::default(),
            start_arrow: Arrow::default(),
            end_arrow: Arrow::default(),
            cache: Cached::default(),
        };
        line.update_geometry();
        line
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    pub fn set_line(&mut self, p1: Point, p2: Point) {
        self.p1 = p1;
        self.p2 = p2;
        self.update_geometry();
    }

    pub fn length(&self) -> f64 {
        self.p1.distance_to(&self.p2)
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

    /// An arrowhead is only drawn when it fits on the line.
    fn shows(&self, arrow: &Arrow) -> bool {
        !arrow.is_none() && self.length() >= arrow.size()
    }

    fn update_geometry(&mut self) {
        let mut outline = Outline::new();
        outline.add_stroke(polyline_path(&[self.p1, self.p2], false), self.pen.width);

        let mut arrows = Vec::new();
        if self.shows(&self.start_arrow) {
            arrows.push(self.start_arrow.shape(
                &self.pen,
                self.p1,
                direction_angle(self.p1, self.p2),
            ));
        }
        if self.shows(&self.end_arrow) {
            arrows.push(
                self.end_arrow
                    .shape(&self.pen, self.p2, direction_angle(self.p2, self.p1)),
            );
        }

        let bounding = stroked_bounds(
            &[self.p1, self.p2],
            self.pen.width,
            &arrows.iter().collect::<Vec<_>>(),
        );
        for arrow in arrows {
            outline.extend(arrow);
        }
        self.cache = Cached(ShapeCache { bounding, outline });
    }
}

impl Default for LineItem {
    fn default() -> Self {
        LineItem::new(Point::zero(), Point::zero())
    }
}

impl ItemShape for LineItem {
    fn key(&self) -> &'static str {
        "line"
    }

    fn point_flags(&self) -> Vec<PointFlags> {
        vec![
            PointFlags::endpoint(),
            PointFlags::CONNECTION,
            PointFlags::endpoint(),
        ]
    }

    fn point_positions(&self) -> Vec<Point> {
        vec![self.p1, self.p1.midpoint(&self.p2), self.p2]
    }

    fn resize_point(&mut self, index: usize, position: Point, snap45: bool) {
        match index {
            0 => {
                let p1 = if snap45 {
                    snap_to_45(self.p2, position)
                } else {
                    position
                };
                self.set_line(p1, self.p2);
            }
            2 => {
                let p2 = if snap45 {
                    snap_to_45(self.p1, position)
                } else {
                    position
                };
                self.set_line(self.p1, p2);
            }
            _ => {}
        }
    }

    fn translate(&mut self, delta: Point) {
        self.set_line(self.p1 + delta, self.p2 + delta);
    }

    fn scale(&mut self, factor: f64) {
        self.p1 = self.p1 * factor;
        self.p2 = self.p2 * factor;
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
        self.p1.midpoint(&self.p2)
    }

    fn is_valid(&self) -> bool {
        self.p1 != self.p2
    }

    fn paint(&self, painter: &mut dyn Painter, background: &Brush) {
        painter.set_pen(self.pen);
        painter.set_brush(Brush::none());
        painter.draw_line(self.p1, self.p2);

        if self.shows(&self.start_arrow) {
            self.start_arrow.paint(
                painter,
                &self.pen,
                background,
                self.p1,
                direction_angle(self.p1, self.p2),
            );
        }
        if self.shows(&self.end_arrow) {
            self.end_arrow.paint(
                painter,
                &self.pen,
                background,
                self.p2,
                direction_angle(self.p2, self.p1),
            );
        }
    }

    fn write_attributes(&self, writer: &mut AttributeWriter) {
        writer.write_f64("x1", self.p1.x, 0.0);
        writer.write_f64("y1", self.p1.y, 0.0);
        writer.write_f64("x2", self.p2.x, 0.0);
        writer.write_f64("y2", self.p2.y, 0.0);
        writer.write_pen("pen", &self.pen);
        writer.write_arrow("startArrow", &self.start_arrow);
        writer.write_arrow("endArrow", &self.end_arrow);
    }

    fn read_attributes(&mut self, reader: &AttributeReader) {
        self.p1 = Point::new(reader.f64_or("x1", 0.0), reader.f64_or("y1", 0.0));
        self.p2 = Point::new(reader.f64_or("x2", 0.0), reader.f64_or("y2", 0.0));
        self.pen = reader.pen("pen");
        self.start_arrow = reader.arrow("startArrow");
        self.end_arrow = reader.arrow("endArrow");
        self.update_geometry();
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        properties::get(LINE_PROPERTIES, self, name)
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool {
        properties::set(LINE_PROPERTIES, self, name, value)
    }

    fn property_names(&self) -> Vec<&'static str> {
        properties::names(LINE_PROPERTIES)
    }

    fn placement_policy(&self) -> PlacementPolicy {
        PlacementPolicy::ByPressAndRelease
    }

    fn place_resize_index(&self) -> Option<usize> {
        Some(2)
    }
}
