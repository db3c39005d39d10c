//! Drawing items.
//!
//! A [`DrawingItem`] carries what every item has (identity, placement
//! transform, owned points, selection state). Its [`ItemKind`] holds the
//! variant geometry, reached through the [`ItemShape`] trait. Variant
//! geometry lives in the item's local frame; the item's points mirror the
//! variant's point positions and are kept in sync after every edit.

pub mod caption;
pub mod curve;
pub mod ellipse;
pub mod item;
pub mod line;
pub mod point;
pub mod polygon;
pub mod polyline;
pub mod rectangle;
pub mod text;
pub mod text_shapes;

pub use caption::Caption;
pub use curve::CurveItem;
pub use ellipse::EllipseItem;
pub use item::{DrawingItem, ItemId};
pub use line::{snap_to_45, LineItem};
pub use point::{ItemPoint, PointFlags, PointId, PointRef};
pub use polygon::PolygonItem;
pub use polyline::PolylineItem;
pub use rectangle::RectItem;
pub use text::TextItem;
pub use text_shapes::{TextEllipseItem, TextRectItem};

use crate::geometry::{Point, Rect};
use crate::outline::Outline;
use crate::properties::PropertyValue;
use crate::renderer::Painter;
use crate::style::Brush;
use crate::xml::{AttributeReader, AttributeWriter};

/// How an item in place mode is committed to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementPolicy {
    /// Committed where the mouse button is released.
    #[default]
    ByRelease,
    /// Anchored on press, sized by dragging, committed on release.
    ByPressAndRelease,
}

/// Cached derived geometry of a variant.
#[derive(Debug, Clone, Default)]
pub struct ShapeCache {
    pub bounding: Rect,
    pub outline: Outline,
}

/// Geometry contract implemented by every item variant.
///
/// All positions are in the item's local frame.
pub trait ItemShape {
    /// Element name used when persisting and key in the factory.
    fn key(&self) -> &'static str;

    /// Role flags of each point, in point order.
    fn point_flags(&self) -> Vec<PointFlags>;

    /// Position of each point, in point order.
    fn point_positions(&self) -> Vec<Point>;

    /// Move the point at `index`. `snap45` asks line-like variants to snap
    /// the segment to the nearest 45° direction.
    fn resize_point(&mut self, index: usize, position: Point, snap45: bool);

    /// Resize used while sizing a freshly placed item.
    fn place_resize(&mut self, position: Point) {
        if let Some(index) = self.place_resize_index() {
            self.resize_point(index, position, false);
        }
    }

    fn translate(&mut self, delta: Point);

    /// Scale geometry and every size-bearing attribute.
    fn scale(&mut self, factor: f64);

    fn bounding_rect(&self) -> Rect;

    fn shape(&self) -> &Outline;

    /// Anchor the item is re-centred on after a resize.
    fn center(&self) -> Point {
        self.bounding_rect().center()
    }

    fn is_valid(&self) -> bool;

    fn paint(&self, painter: &mut dyn Painter, background: &Brush);

    fn write_attributes(&self, writer: &mut AttributeWriter);

    /// Replace every field from `reader`, falling back to defaults.
    fn read_attributes(&mut self, reader: &AttributeReader);

    fn property(&self, name: &str) -> Option<PropertyValue>;

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool;

    fn property_names(&self) -> Vec<&'static str>;

    fn placement_policy(&self) -> PlacementPolicy {
        PlacementPolicy::ByRelease
    }

    /// Point dragged while placing with [`PlacementPolicy::ByPressAndRelease`].
    fn place_resize_index(&self) -> Option<usize> {
        None
    }

    fn can_insert_points(&self) -> bool {
        false
    }

    fn can_remove_points(&self) -> bool {
        false
    }

    /// Insert a vertex at `position`; returns its point index.
    fn insert_vertex(&mut self, _position: Point) -> Option<usize> {
        None
    }

    /// Remove the vertex at `index`; false when not allowed.
    fn remove_vertex(&mut self, _index: usize) -> bool {
        false
    }
}

/// Item variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Line(LineItem),
    Curve(CurveItem),
    Polyline(PolylineItem),
    Polygon(PolygonItem),
    Rect(RectItem),
    Ellipse(EllipseItem),
    Text(TextItem),
    TextRect(TextRectItem),
    TextEllipse(TextEllipseItem),
}

impl ItemKind {
    pub fn as_shape(&self) -> &dyn ItemShape {
        match self {
            ItemKind::Line(s) => s,
            ItemKind::Curve(s) => s,
            ItemKind::Polyline(s) => s,
            ItemKind::Polygon(s) => s,
            ItemKind::Rect(s) => s,
            ItemKind::Ellipse(s) => s,
            ItemKind::Text(s) => s,
            ItemKind::TextRect(s) => s,
            ItemKind::TextEllipse(s) => s,
        }
    }

    pub fn as_shape_mut(&mut self) -> &mut dyn ItemShape {
        match self {
            ItemKind::Line(s) => s,
            ItemKind::Curve(s) => s,
            ItemKind::Polyline(s) => s,
            ItemKind::Polygon(s) => s,
            ItemKind::Rect(s) => s,
            ItemKind::Ellipse(s) => s,
            ItemKind::Text(s) => s,
            ItemKind::TextRect(s) => s,
            ItemKind::TextEllipse(s) => s,
        }
    }

    /// One default-constructed instance of every variant.
    pub fn prototypes() -> Vec<ItemKind> {
        vec![
            ItemKind::Line(LineItem::default()),
            ItemKind::Curve(CurveItem::default()),
            ItemKind::Polyline(PolylineItem::default()),
            ItemKind::Polygon(PolygonItem::default()),
            ItemKind::Rect(RectItem::default()),
            ItemKind::Ellipse(EllipseItem::default()),
            ItemKind::Text(TextItem::default()),
            ItemKind::TextRect(TextRectItem::default()),
            ItemKind::TextEllipse(TextEllipseItem::default()),
        ]
    }
}

/// Bounding rectangle of a stroked point set united with extra outlines.
pub(crate) fn stroked_bounds(points: &[Point], pen_width: f64, extra: &[&Outline]) -> Rect {
    let half = pen_width / 2.0;
    let mut bounds = Rect::bounding(points)
        .unwrap_or_default()
        .adjusted(-half, -half, half, half);
    for outline in extra {
        if let Some(r) = outline.bounding_rect() {
            bounds = bounds.united(&r);
        }
    }
    bounds
}

/// Index of the segment of `points` closest to `p`, with `closed` adding
/// the segment from the last point back to the first.
pub(crate) fn nearest_segment(points: &[Point], p: &Point, closed: bool) -> Option<usize> {
    let count = if closed { points.len() } else { points.len().saturating_sub(1) };
    (0..count)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            (i, crate::outline::segment_distance(p, &a, &b))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}
