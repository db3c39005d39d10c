//! Item outlines for hit-testing.
//!
//! An outline is a union of stroked and filled lyon paths. Strokes are
//! tested by distance to the flattened path, fills with the non-zero rule.

use lyon::algorithms::aabb::bounding_box;
use lyon::algorithms::hit_test::hit_test_path;
use lyon::math::{point, vector, Angle};
use lyon::path::builder::BorderRadii;
use lyon::path::iterator::PathIterator;
use lyon::path::{FillRule, Path, PathEvent, Winding};

use crate::geometry::{transform_scale, Point, Rect, Transform};
use drawkit_core::constants::MIN_STROKE_WIDTH;

const FLATTEN_TOLERANCE: f32 = 0.01;

/// One component of an [`Outline`].
#[derive(Debug, Clone)]
pub enum OutlinePart {
    /// Area within `half_width` of the path.
    Stroke { path: Path, half_width: f64 },
    /// Area enclosed by the path.
    Fill { path: Path },
}

/// Union of stroked and filled paths describing an item's hit area.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    parts: Vec<OutlinePart>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filled rectangle outline.
    pub fn from_rect(rect: Rect) -> Self {
        let mut outline = Outline::new();
        outline.add_fill(rect_path(rect));
        outline
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[OutlinePart] {
        &self.parts
    }

    /// Add the stroke of `path` with the given pen width. Widths below
    /// the minimum stroke width are raised to it.
    pub fn add_stroke(&mut self, path: Path, width: f64) {
        let width = width.max(MIN_STROKE_WIDTH);
        self.parts.push(OutlinePart::Stroke {
            path,
            half_width: width / 2.0,
        });
    }

    pub fn add_fill(&mut self, path: Path) {
        self.parts.push(OutlinePart::Fill { path });
    }

    /// Append all parts of another outline.
    pub fn extend(&mut self, other: Outline) {
        self.parts.extend(other.parts);
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.parts.iter().any(|part| match part {
            OutlinePart::Fill { path } => {
                hit_test_path(&p.to_lyon(), path.iter(), FillRule::NonZero, FLATTEN_TOLERANCE)
            }
            OutlinePart::Stroke { path, half_width } => stroke_contains(path, *half_width, p),
        })
    }

    /// Bounding rectangle of all parts, or `None` when the outline is empty.
    pub fn bounding_rect(&self) -> Option<Rect> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                OutlinePart::Fill { path } => path_bounds(path),
                OutlinePart::Stroke { path, half_width } => path_bounds(path)
                    .map(|r| r.adjusted(-half_width, -half_width, *half_width, *half_width)),
            })
            .reduce(|a, b| a.united(&b))
    }

    /// Outline mapped through an affine transform. Stroke widths follow the
    /// transform's linear scale.
    pub fn transformed(&self, transform: &Transform) -> Outline {
        let t32 = transform.cast::<f32>();
        let scale = transform_scale(transform);
        let parts = self
            .parts
            .iter()
            .map(|part| match part {
                OutlinePart::Fill { path } => OutlinePart::Fill {
                    path: path.clone().transformed(&t32),
                },
                OutlinePart::Stroke { path, half_width } => OutlinePart::Stroke {
                    path: path.clone().transformed(&t32),
                    half_width: half_width * scale,
                },
            })
            .collect();
        Outline { parts }
    }
}

/// Bounding rectangle of a path, or `None` for an empty path.
pub fn path_bounds(path: &Path) -> Option<Rect> {
    path.iter().next()?;
    let b = bounding_box(path.iter());
    Some(Rect::new(
        b.min.x as f64,
        b.min.y as f64,
        (b.max.x - b.min.x) as f64,
        (b.max.y - b.min.y) as f64,
    ))
}

fn stroke_contains(path: &Path, half_width: f64, p: &Point) -> bool {
    let near = |a: lyon::math::Point, b: lyon::math::Point| {
        segment_distance(
            p,
            &Point::new(a.x as f64, a.y as f64),
            &Point::new(b.x as f64, b.y as f64),
        ) <= half_width
    };
    path.iter().flattened(FLATTEN_TOLERANCE).any(|event| match event {
        PathEvent::Begin { at } => near(at, at),
        PathEvent::Line { from, to } => near(from, to),
        PathEvent::End { last, first, close } => close && near(last, first),
        _ => false,
    })
}

/// Distance from `p` to the segment `a`–`b`.
pub fn segment_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let ab = *b - *a;
    let len2 = ab.x * ab.x + ab.y * ab.y;
    if len2 == 0.0 {
        return p.distance_to(a);
    }
    let t = (((*p - *a).x * ab.x + (*p - *a).y * ab.y) / len2).clamp(0.0, 1.0);
    p.distance_to(&(*a + ab * t))
}

/// Open or closed polyline through `points`.
pub fn polyline_path(points: &[Point], closed: bool) -> Path {
    let mut builder = Path::builder();
    if let Some((first, rest)) = points.split_first() {
        builder.begin(first.to_lyon());
        for p in rest {
            builder.line_to(p.to_lyon());
        }
        builder.end(closed);
    }
    builder.build()
}

pub fn rect_path(rect: Rect) -> Path {
    let mut builder = Path::builder();
    builder.add_rectangle(&rect.to_lyon_box(), Winding::Positive);
    builder.build()
}

/// Rectangle with rounded corners; the radius is limited to half the shorter side.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> Path {
    let rect = rect.normalized();
    let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    if radius <= 0.0 {
        return rect_path(rect);
    }
    let mut builder = Path::builder();
    builder.add_rounded_rectangle(
        &rect.to_lyon_box(),
        &BorderRadii::new(radius as f32),
        Winding::Positive,
    );
    builder.build()
}

/// Ellipse inscribed in `rect`.
pub fn ellipse_path(rect: Rect) -> Path {
    let rect = rect.normalized();
    let mut builder = Path::builder();
    builder.add_ellipse(
        rect.center().to_lyon(),
        vector((rect.width / 2.0) as f32, (rect.height / 2.0) as f32),
        Angle::radians(0.0),
        Winding::Positive,
    );
    builder.build()
}

/// Single cubic Bézier segment.
pub fn cubic_path(p1: Point, c1: Point, c2: Point, p2: Point) -> Path {
    let mut builder = Path::builder();
    builder.begin(p1.to_lyon());
    builder.cubic_bezier_to(c1.to_lyon(), c2.to_lyon(), p2.to_lyon());
    builder.end(false);
    builder.build()
}

/// Circle of the given radius.
pub fn circle_path(center: Point, radius: f64) -> Path {
    let mut builder = Path::builder();
    builder.add_circle(
        point(center.x as f32, center.y as f32),
        radius as f32,
        Winding::Positive,
    );
    builder.build()
}
