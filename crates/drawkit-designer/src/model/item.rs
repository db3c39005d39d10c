//! The drawing item: placement, owned points and the variant it wraps.

use std::fmt;
use uuid::Uuid;

use super::point::{ItemPoint, PointFlags, PointId};
use super::{ItemKind, ItemShape, PlacementPolicy};
use crate::geometry::{mirror_x, quarter_turn, Cached, Point, Rect, Transform};
use crate::outline::Outline;
use crate::properties::{self, PropertyValue};
use crate::renderer::Painter;
use crate::style::Brush;
use crate::xml::{AttributeReader, AttributeWriter};

/// Identity of an item, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        f.write_str(&simple[..8])
    }
}

/// A geometric entity placed in the scene.
///
/// The item→scene mapping is `quarter_turn(rotation)`, then a horizontal
/// mirror when `flipped`, then a translation by `position`. The mapping and
/// its inverse are rebuilt whenever one of those three fields changes.
///
/// Items compare by content: identity, selection and connections are
/// ignored.
#[derive(Debug, Clone)]
pub struct DrawingItem {
    id: ItemId,
    position: Point,
    rotation: u8,
    flipped: bool,
    transform: Cached<Transform>,
    inverse: Cached<Transform>,
    points: Vec<ItemPoint>,
    next_point_id: u32,
    selected: bool,
    kind: ItemKind,
}

impl PartialEq for DrawingItem {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.rotation == other.rotation
            && self.flipped == other.flipped
            && self.kind == other.kind
    }
}

impl DrawingItem {
    pub fn new(kind: ItemKind) -> Self {
        let mut item = Self {
            id: ItemId::new(),
            position: Point::zero(),
            rotation: 0,
            flipped: false,
            transform: Cached(Transform::identity()),
            inverse: Cached(Transform::identity()),
            points: Vec::new(),
            next_point_id: 0,
            selected: false,
            kind,
        };
        item.sync_points();
        item
    }

    /// Item with `kind` placed at `position`.
    pub fn at(kind: ItemKind, position: Point) -> Self {
        let mut item = Self::new(kind);
        item.set_position(position);
        item
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn key(&self) -> &'static str {
        self.kind.as_shape().key()
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn shape_ref(&self) -> &dyn ItemShape {
        self.kind.as_shape()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.update_transform();
    }

    pub fn move_by(&mut self, delta: Point) {
        self.set_position(self.position + delta);
    }

    /// Quarter turns clockwise, in `0..4`.
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Any integer is reduced into `0..4`.
    pub fn set_rotation(&mut self, rotation: i32) {
        self.rotation = rotation.rem_euclid(4) as u8;
        self.update_transform();
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
        self.update_transform();
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Item → scene mapping.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Scene → item mapping.
    pub fn inverse_transform(&self) -> &Transform {
        &self.inverse
    }

    fn update_transform(&mut self) {
        let mut linear = quarter_turn(self.rotation);
        let mut inverse_linear = quarter_turn((4 - self.rotation) % 4);
        if self.flipped {
            linear = linear.then(&mirror_x());
            inverse_linear = mirror_x().then(&inverse_linear);
        }
        self.transform = Cached(linear.then_translate(self.position.to_vector()));
        self.inverse = Cached(
            Transform::translation(-self.position.x, -self.position.y).then(&inverse_linear),
        );
    }

    pub fn map_to_scene(&self, p: Point) -> Point {
        p.transformed(&self.transform)
    }

    pub fn map_from_scene(&self, p: Point) -> Point {
        p.transformed(&self.inverse)
    }

    pub fn map_rect_to_scene(&self, rect: &Rect) -> Rect {
        rect.transformed(&self.transform)
    }

    pub fn map_rect_from_scene(&self, rect: &Rect) -> Rect {
        rect.transformed(&self.inverse)
    }

    pub fn map_outline_to_scene(&self, outline: &Outline) -> Outline {
        outline.transformed(&self.transform)
    }

    pub fn map_polygon_to_scene(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.map_to_scene(*p)).collect()
    }

    // Points

    pub fn points(&self) -> &[ItemPoint] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [ItemPoint] {
        &mut self.points
    }

    pub fn point(&self, id: PointId) -> Option<&ItemPoint> {
        self.points.iter().find(|p| p.id() == id)
    }

    pub(crate) fn point_mut(&mut self, id: PointId) -> Option<&mut ItemPoint> {
        self.points.iter_mut().find(|p| p.id() == id)
    }

    pub fn point_index(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id() == id)
    }

    pub fn point_scene_position(&self, index: usize) -> Option<Point> {
        self.points.get(index).map(|p| self.map_to_scene(p.position()))
    }

    fn allocate_point_id(&mut self) -> PointId {
        let id = PointId(self.next_point_id);
        self.next_point_id += 1;
        id
    }

    /// Append a point. A point whose id is already present is ignored.
    pub fn add_point(&mut self, point: ItemPoint) {
        self.insert_point(self.points.len(), point);
    }

    /// Insert a point at `index` (clamped). A point whose id is already
    /// present is ignored.
    pub fn insert_point(&mut self, index: usize, point: ItemPoint) {
        if self.point(point.id()).is_some() {
            return;
        }
        self.next_point_id = self.next_point_id.max(point.id().0 + 1);
        let index = index.min(self.points.len());
        self.points.insert(index, point);
    }

    /// Remove a point by id; `None` when it is not owned by this item.
    pub fn remove_point(&mut self, id: PointId) -> Option<ItemPoint> {
        let index = self.point_index(id)?;
        Some(self.points.remove(index))
    }

    /// Align the owned points with the variant's point positions.
    ///
    /// Matching counts update positions and flags in place so ids and
    /// connections survive. A different count rebuilds the list.
    fn sync_points(&mut self) {
        let positions = self.kind.as_shape().point_positions();
        let flags = self.kind.as_shape().point_flags();
        if positions.len() == self.points.len() {
            for ((point, position), flag) in self.points.iter_mut().zip(positions).zip(flags) {
                point.set_position(position);
                point.set_flags(flag);
            }
            return;
        }
        self.points.clear();
        for (position, flag) in positions.into_iter().zip(flags) {
            let id = self.allocate_point_id();
            self.points.push(ItemPoint::new(id, position, flag));
        }
    }

    // Geometry

    pub fn bounding_rect(&self) -> Rect {
        self.kind.as_shape().bounding_rect()
    }

    pub fn shape(&self) -> &Outline {
        self.kind.as_shape().shape()
    }

    pub fn scene_bounding_rect(&self) -> Rect {
        self.map_rect_to_scene(&self.bounding_rect())
    }

    pub fn scene_shape(&self) -> Outline {
        self.map_outline_to_scene(self.shape())
    }

    /// Center of the item in scene coordinates.
    pub fn center_position(&self) -> Point {
        self.map_to_scene(self.kind.as_shape().center())
    }

    pub fn is_valid(&self) -> bool {
        self.kind.as_shape().is_valid()
    }

    /// Whether the item's outline contains `scene_point`, with pens thinner
    /// than `min_pen_width` widened for the query.
    ///
    /// The pen is swapped in and restored around the shape query, so the
    /// call takes `&mut self`.
    pub fn hit_test(&mut self, scene_point: Point, min_pen_width: f64) -> bool {
        let local = self.map_from_scene(scene_point);
        let original = match self.kind.as_shape().property(properties::PEN) {
            Some(PropertyValue::Pen(pen)) if pen.width < min_pen_width => pen,
            _ => return self.shape().contains(&local),
        };
        let widened = PropertyValue::Pen(original.with_width(min_pen_width));
        self.kind.as_shape_mut().set_property(properties::PEN, &widened);
        let hit = self.shape().contains(&local);
        self.kind
            .as_shape_mut()
            .set_property(properties::PEN, &PropertyValue::Pen(original));
        hit
    }

    // Editing

    /// Move the point at `index` to `scene_position`, then re-centre the
    /// item so its position stays at the variant's center.
    pub fn resize(&mut self, index: usize, scene_position: Point, snap45: bool) {
        if index >= self.points.len() {
            return;
        }
        let local = self.map_from_scene(scene_position);
        self.kind.as_shape_mut().resize_point(index, local, snap45);
        self.recenter();
    }

    /// Resize used while placing a new item.
    pub fn place_resize(&mut self, scene_position: Point) {
        let local = self.map_from_scene(scene_position);
        self.kind.as_shape_mut().place_resize(local);
        self.recenter();
    }

    fn recenter(&mut self) {
        let center = self.kind.as_shape().center();
        if center != Point::zero() {
            let new_position = self.map_to_scene(center);
            self.kind.as_shape_mut().translate(-center);
            self.set_position(new_position);
        }
        self.sync_points();
    }

    /// Quarter turn clockwise about `pivot`.
    pub fn rotate(&mut self, pivot: Point) {
        let d = self.position - pivot;
        self.position = pivot + Point::new(-d.y, d.x);
        let step = if self.flipped { -1 } else { 1 };
        self.set_rotation(self.rotation as i32 + step);
    }

    /// Quarter turn counter-clockwise about `pivot`.
    pub fn rotate_back(&mut self, pivot: Point) {
        let d = self.position - pivot;
        self.position = pivot + Point::new(d.y, -d.x);
        let step = if self.flipped { 1 } else { -1 };
        self.set_rotation(self.rotation as i32 + step);
    }

    /// Mirror across the vertical line `x = pivot_x`.
    pub fn flip_horizontal(&mut self, pivot_x: f64) {
        self.position.x = 2.0 * pivot_x - self.position.x;
        self.set_flipped(!self.flipped);
    }

    /// Mirror across the horizontal line through `pivot`: a half turn about
    /// `pivot` followed by a horizontal flip.
    pub fn flip_vertical(&mut self, pivot: Point) {
        self.rotate(pivot);
        self.rotate(pivot);
        self.flip_horizontal(pivot.x);
    }

    /// Scale position and geometry about the scene origin.
    pub fn scale(&mut self, factor: f64) {
        self.kind.as_shape_mut().scale(factor);
        self.set_position(self.position * factor);
        self.sync_points();
    }

    pub fn can_insert_points(&self) -> bool {
        self.kind.as_shape().can_insert_points()
    }

    pub fn can_remove_points(&self) -> bool {
        self.kind.as_shape().can_remove_points()
    }

    /// Insert a vertex at `scene_position`. Returns the new point's id.
    pub fn insert_new_point(&mut self, scene_position: Point) -> Option<PointId> {
        if !self.can_insert_points() {
            return None;
        }
        let local = self.map_from_scene(scene_position);
        let index = self.kind.as_shape_mut().insert_vertex(local)?;
        let flags = self.kind.as_shape().point_flags();
        let id = self.allocate_point_id();
        let flag = flags.get(index).copied().unwrap_or(PointFlags::CONTROL);
        self.insert_point(index, ItemPoint::new(id, local, flag));
        self.sync_points();
        Some(id)
    }

    /// Remove the vertex within `tolerance` of `scene_position`. Returns the
    /// removed point, whose connections the caller must release.
    pub fn remove_existing_point(
        &mut self,
        scene_position: Point,
        tolerance: f64,
    ) -> Option<ItemPoint> {
        if !self.can_remove_points() {
            return None;
        }
        let index = self.points.iter().position(|p| {
            self.map_to_scene(p.position()).distance_to(&scene_position) <= tolerance
        })?;
        if !self.kind.as_shape_mut().remove_vertex(index) {
            return None;
        }
        let removed = self.points.remove(index);
        self.sync_points();
        Some(removed)
    }

    /// Copy with a fresh identity, unselected and without connections.
    pub fn duplicate(&self) -> DrawingItem {
        let mut copy = self.clone();
        copy.id = ItemId::new();
        copy.selected = false;
        for point in &mut copy.points {
            point.clear_connections();
        }
        copy
    }

    // Properties

    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        self.kind.as_shape().property(name)
    }

    /// Returns false for an unknown name or mismatched value type.
    pub fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool {
        let changed = self.kind.as_shape_mut().set_property(name, value);
        if changed {
            self.sync_points();
        }
        changed
    }

    pub fn property_names(&self) -> Vec<&'static str> {
        self.kind.as_shape().property_names()
    }

    pub fn placement_policy(&self) -> PlacementPolicy {
        self.kind.as_shape().placement_policy()
    }

    // Painting and persistence

    /// Paint in scene coordinates on top of the painter's current transform.
    pub fn paint(&self, painter: &mut dyn Painter, background: &Brush) {
        let saved = painter.transform();
        painter.set_transform(self.transform.then(&saved));
        self.kind.as_shape().paint(painter, background);
        painter.set_transform(saved);
    }

    pub fn write_attributes(&self, writer: &mut AttributeWriter) {
        writer.write_f64("translationX", self.position.x, 0.0);
        writer.write_f64("translationY", self.position.y, 0.0);
        if self.rotation != 0 {
            writer.write("rotation", self.rotation.to_string());
        }
        writer.write_bool("flipped", self.flipped, false);
        self.kind.as_shape().write_attributes(writer);
    }

    /// Replace placement and variant fields from `reader`.
    pub fn read_attributes(&mut self, reader: &AttributeReader) {
        self.position = Point::new(
            reader.f64_or("translationX", 0.0),
            reader.f64_or("translationY", 0.0),
        );
        self.rotation = reader.i64_or("rotation", 0).rem_euclid(4) as u8;
        self.flipped = reader.bool_or("flipped", false);
        self.update_transform();
        self.kind.as_shape_mut().read_attributes(reader);
        self.sync_points();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, RectItem};

    fn line() -> DrawingItem {
        DrawingItem::at(
            ItemKind::Line(LineItem::new(Point::new(-10.0, 0.0), Point::new(10.0, 0.0))),
            Point::new(50.0, 20.0),
        )
    }

    #[test]
    fn test_transform_round_trip() {
        let mut item = line();
        let p = Point::new(3.0, -7.0);
        for flipped in [false, true] {
            for rotation in 0..4 {
                item.set_flipped(flipped);
                item.set_rotation(rotation);
                let back = item.map_from_scene(item.map_to_scene(p));
                assert!(back.approx_eq(&p, 1e-9));
            }
        }
    }

    #[test]
    fn test_rotation_is_normalized() {
        let mut item = line();
        item.set_rotation(-1);
        assert_eq!(item.rotation(), 3);
        item.set_rotation(9);
        assert_eq!(item.rotation(), 1);
    }

    #[test]
    fn test_rotate_about_pivot_moves_geometry() {
        let mut item = line();
        let end = item.point_scene_position(2).unwrap();
        let pivot = Point::new(0.0, 0.0);
        item.rotate(pivot);
        let rotated = item.point_scene_position(2).unwrap();
        let d = end - pivot;
        assert!(rotated.approx_eq(&(pivot + Point::new(-d.y, d.x)), 1e-9));
    }

    #[test]
    fn test_flipped_rotation_follows_geometry() {
        let mut item = line();
        item.flip_horizontal(0.0);
        let end = item.point_scene_position(2).unwrap();
        item.rotate(Point::zero());
        assert_eq!(item.rotation(), 3);
        let rotated = item.point_scene_position(2).unwrap();
        assert!(rotated.approx_eq(&Point::new(-end.y, end.x), 1e-9));
    }

    #[test]
    fn test_flip_vertical_mirrors_about_pivot() {
        let mut item = line();
        let before: Vec<Point> = (0..3).map(|i| item.point_scene_position(i).unwrap()).collect();
        let pivot = Point::new(5.0, 5.0);
        item.flip_vertical(pivot);
        for (i, p) in before.iter().enumerate() {
            let after = item.point_scene_position(i).unwrap();
            assert!(after.approx_eq(&Point::new(p.x, 2.0 * pivot.y - p.y), 1e-9));
        }
    }

    #[test]
    fn test_resize_recenters_on_midpoint() {
        let mut item = line();
        item.resize(2, Point::new(80.0, 20.0), false);
        assert!(item.position().approx_eq(&Point::new(60.0, 20.0), 1e-9));
        assert!(item
            .point_scene_position(0)
            .unwrap()
            .approx_eq(&Point::new(40.0, 20.0), 1e-9));
        assert!(item
            .point_scene_position(2)
            .unwrap()
            .approx_eq(&Point::new(80.0, 20.0), 1e-9));
    }

    #[test]
    fn test_point_ids_survive_resize_and_duplicate() {
        let mut item = line();
        let ids: Vec<PointId> = item.points().iter().map(|p| p.id()).collect();
        item.resize(0, Point::new(0.0, 0.0), false);
        let after: Vec<PointId> = item.points().iter().map(|p| p.id()).collect();
        assert_eq!(ids, after);

        let copy = item.duplicate();
        assert_ne!(copy.id(), item.id());
        assert_eq!(copy, item);
        assert_eq!(copy.points()[0].id(), ids[0]);
    }

    #[test]
    fn test_add_and_remove_point_are_idempotent() {
        let mut item = line();
        let existing = item.points()[0].clone();
        item.add_point(existing.clone());
        assert_eq!(item.points().len(), 3);

        assert!(item.remove_point(existing.id()).is_some());
        assert!(item.remove_point(existing.id()).is_none());
        assert_eq!(item.points().len(), 2);
    }

    #[test]
    fn test_hit_test_widens_thin_pen_and_restores_it() {
        let mut item = DrawingItem::new(ItemKind::Line(LineItem::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        )));
        assert!(!item.hit_test(Point::new(50.0, 3.0), 0.0));
        assert!(item.hit_test(Point::new(50.0, 3.0), 8.0));
        match item.property(properties::PEN) {
            Some(PropertyValue::Pen(pen)) => assert_eq!(pen.width, 1.0),
            other => panic!("unexpected pen property: {:?}", other),
        }
    }

    #[test]
    fn test_scale_scales_position() {
        let mut item = DrawingItem::at(
            ItemKind::Rect(RectItem::new(Rect::new(-5.0, -5.0, 10.0, 10.0))),
            Point::new(10.0, 10.0),
        );
        item.scale(2.0);
        assert_eq!(item.position(), Point::new(20.0, 20.0));
        assert!(item
            .scene_bounding_rect()
            .approx_eq(&Rect::new(9.0, 9.0, 22.0, 22.0), 1e-9));
    }
}
