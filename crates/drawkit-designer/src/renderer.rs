//! Painter interface used to draw the scene.
//!
//! The canvas and its items only talk to a [`Painter`]; the drawing backend
//! behind it is supplied by the host. [`RecordingPainter`] keeps every
//! primitive together with the painter state it was drawn with, which is
//! what headless tools and tests use.

use lyon::path::Path;

use crate::geometry::{Point, Rect, Transform};
use crate::outline::{path_bounds, polyline_path};
use crate::style::{Alignment, Brush, Font, Pen};

/// Primitive drawing capability with pen/brush/font/transform state.
pub trait Painter {
    fn pen(&self) -> Pen;
    fn set_pen(&mut self, pen: Pen);
    fn brush(&self) -> Brush;
    fn set_brush(&mut self, brush: Brush);
    fn font(&self) -> Font;
    fn set_font(&mut self, font: Font);
    /// Transform from the coordinates passed to draw calls to device pixels.
    fn transform(&self) -> Transform;
    fn set_transform(&mut self, transform: Transform);

    fn draw_line(&mut self, p1: Point, p2: Point);
    fn draw_path(&mut self, path: &Path);
    fn draw_rect(&mut self, rect: Rect);
    fn draw_rounded_rect(&mut self, rect: Rect, radius: f64);
    fn draw_ellipse(&mut self, rect: Rect);
    fn draw_text(&mut self, rect: Rect, alignment: Alignment, text: &str);

    fn draw_points(&mut self, points: &[Point]) {
        for p in points {
            self.draw_line(*p, *p);
        }
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        self.draw_path(&polyline_path(points, false));
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        self.draw_path(&polyline_path(points, true));
    }
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line(Point, Point),
    /// Path with its bounding rectangle.
    Path(Rect),
    Rect(Rect),
    RoundedRect(Rect, f64),
    Ellipse(Rect),
    Points(Vec<Point>),
    Polyline(Vec<Point>),
    Polygon(Vec<Point>),
    Text(Rect, Alignment, String),
}

/// A draw call plus the state active when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub command: DrawCommand,
    pub pen: Pen,
    pub brush: Brush,
    pub transform: Transform,
}

/// Painter that records draw calls instead of rasterising them.
#[derive(Debug, Clone)]
pub struct RecordingPainter {
    pen: Pen,
    brush: Brush,
    font: Font,
    transform: Transform,
    commands: Vec<Recorded>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self {
            pen: Pen::default(),
            brush: Brush::none(),
            font: Font::default(),
            transform: Transform::identity(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[Recorded] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded commands matching a predicate.
    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|r| pred(&r.command)).count()
    }

    fn record(&mut self, command: DrawCommand) {
        self.commands.push(Recorded {
            command,
            pen: self.pen,
            brush: self.brush,
            transform: self.transform,
        });
    }
}

impl Default for RecordingPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl Painter for RecordingPainter {
    fn pen(&self) -> Pen {
        self.pen
    }

    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn brush(&self) -> Brush {
        self.brush
    }

    fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    fn font(&self) -> Font {
        self.font.clone()
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn draw_line(&mut self, p1: Point, p2: Point) {
        self.record(DrawCommand::Line(p1, p2));
    }

    fn draw_path(&mut self, path: &Path) {
        let bounds = path_bounds(path).unwrap_or_default();
        self.record(DrawCommand::Path(bounds));
    }

    fn draw_rect(&mut self, rect: Rect) {
        self.record(DrawCommand::Rect(rect));
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: f64) {
        self.record(DrawCommand::RoundedRect(rect, radius));
    }

    fn draw_ellipse(&mut self, rect: Rect) {
        self.record(DrawCommand::Ellipse(rect));
    }

    fn draw_text(&mut self, rect: Rect, alignment: Alignment, text: &str) {
        self.record(DrawCommand::Text(rect, alignment, text.to_string()));
    }

    fn draw_points(&mut self, points: &[Point]) {
        self.record(DrawCommand::Points(points.to_vec()));
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        self.record(DrawCommand::Polyline(points.to_vec()));
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        self.record(DrawCommand::Polygon(points.to_vec()));
    }
}
