//! Arrowheads drawn at line ends.
//!
//! Every arrow path has its apex at the local origin and its body along
//! +X, so it points towards −X. Callers rotate the path by the angle of the
//! line direction away from the tip and translate it to the tip.

use lyon::path::Path;
use std::fmt;
use std::str::FromStr;

use drawkit_core::Error;

use crate::geometry::{Cached, Point, Transform};
use crate::outline::{circle_path, polyline_path, Outline};
use crate::renderer::Painter;
use crate::style::{Brush, Pen, PenStyle};

/// Arrowhead shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArrowStyle {
    #[default]
    None,
    Normal,
    Triangle,
    TriangleFilled,
    Concave,
    ConcaveFilled,
    Circle,
    CircleFilled,
}

impl ArrowStyle {
    pub const ALL: [ArrowStyle; 8] = [
        ArrowStyle::None,
        ArrowStyle::Normal,
        ArrowStyle::Triangle,
        ArrowStyle::TriangleFilled,
        ArrowStyle::Concave,
        ArrowStyle::ConcaveFilled,
        ArrowStyle::Circle,
        ArrowStyle::CircleFilled,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ArrowStyle::None => "none",
            ArrowStyle::Normal => "normal",
            ArrowStyle::Triangle => "triangle",
            ArrowStyle::TriangleFilled => "triangleFilled",
            ArrowStyle::Concave => "concave",
            ArrowStyle::ConcaveFilled => "concaveFilled",
            ArrowStyle::Circle => "circle",
            ArrowStyle::CircleFilled => "circleFilled",
        }
    }

    /// Filled styles use the pen color as brush.
    pub fn is_filled(self) -> bool {
        matches!(
            self,
            ArrowStyle::TriangleFilled | ArrowStyle::ConcaveFilled | ArrowStyle::CircleFilled
        )
    }
}

impl fmt::Display for ArrowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ArrowStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArrowStyle::ALL
            .into_iter()
            .find(|style| style.token() == s)
            .ok_or_else(|| Error::other(format!("Unknown arrow style: {}", s)))
    }
}

/// An arrowhead: style, size and the path derived from both.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    style: ArrowStyle,
    size: f64,
    path: Cached<Path>,
}

impl Arrow {
    pub const DEFAULT_SIZE: f64 = 10.0;

    pub fn new(style: ArrowStyle, size: f64) -> Self {
        let size = size.max(0.0);
        Self {
            style,
            size,
            path: Cached(compute_geometry(style, size)),
        }
    }

    pub fn style(&self) -> ArrowStyle {
        self.style
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_style(&mut self, style: ArrowStyle) {
        *self = Arrow::new(style, self.size);
    }

    pub fn set_size(&mut self, size: f64) {
        *self = Arrow::new(self.style, size);
    }

    /// Arrow path in its local frame.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_none(&self) -> bool {
        self.style == ArrowStyle::None
    }

    /// Hit outline of the arrow placed at `position` and rotated by `angle`
    /// radians. Empty when the style is `None` or the pen draws nothing.
    pub fn shape(&self, pen: &Pen, position: Point, angle: f64) -> Outline {
        let mut outline = Outline::new();
        if self.is_none() || pen.style == PenStyle::NoPen {
            return outline;
        }
        let placed = self.path.0.clone().transformed(&placement(position, angle).cast::<f32>());
        outline.add_stroke(placed.clone(), pen.width);
        outline.add_fill(placed);
        outline
    }

    /// Paint the arrowhead with a solid version of `pen`. Filled styles are
    /// filled with the pen color, others with `background`.
    pub fn paint(
        &self,
        painter: &mut dyn Painter,
        pen: &Pen,
        background: &Brush,
        position: Point,
        angle: f64,
    ) {
        if self.is_none() || pen.style == PenStyle::NoPen {
            return;
        }

        let saved_pen = painter.pen();
        let saved_brush = painter.brush();
        let saved_transform = painter.transform();

        painter.set_pen(pen.with_style(PenStyle::Solid));
        painter.set_brush(if self.style.is_filled() {
            Brush::new(pen.color)
        } else {
            *background
        });
        painter.set_transform(placement(position, angle).then(&saved_transform));
        painter.draw_path(&self.path);

        painter.set_transform(saved_transform);
        painter.set_brush(saved_brush);
        painter.set_pen(saved_pen);
    }
}

impl Default for Arrow {
    fn default() -> Self {
        Arrow::new(ArrowStyle::None, Arrow::DEFAULT_SIZE)
    }
}

/// Direction angle, in radians, of the vector `from → to`.
pub fn direction_angle(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

fn placement(position: Point, angle: f64) -> Transform {
    Transform::rotation(lyon::geom::euclid::Angle::radians(angle))
        .then_translate(position.to_vector())
}

/// Build the local-frame path for an arrow style and size.
pub fn compute_geometry(style: ArrowStyle, size: f64) -> Path {
    let half = size / 2.0;
    let depth = size * 3f64.sqrt() / 2.0;
    match style {
        ArrowStyle::None => Path::new(),
        ArrowStyle::Normal => polyline_path(
            &[
                Point::new(depth, -half),
                Point::new(0.0, 0.0),
                Point::new(depth, half),
            ],
            false,
        ),
        ArrowStyle::Triangle | ArrowStyle::TriangleFilled => polyline_path(
            &[
                Point::new(0.0, 0.0),
                Point::new(depth, -half),
                Point::new(depth, half),
            ],
            true,
        ),
        ArrowStyle::Concave | ArrowStyle::ConcaveFilled => polyline_path(
            &[
                Point::new(0.0, 0.0),
                Point::new(depth, -half),
                Point::new(depth / 2.0, 0.0),
                Point::new(depth, half),
            ],
            true,
        ),
        ArrowStyle::Circle | ArrowStyle::CircleFilled => circle_path(Point::new(half, 0.0), half),
    }
}
