use drawkit_designer::geometry::{Point, Rect};
use drawkit_designer::model::{DrawingItem, ItemKind, LineItem, PolylineItem, RectItem};

fn rect_item(position: Point) -> DrawingItem {
    DrawingItem::at(
        ItemKind::Rect(RectItem::new(Rect::new(-20.0, -10.0, 40.0, 20.0))),
        position,
    )
}

#[test]
fn test_four_rotations_restore_item() {
    let mut item = rect_item(Point::new(50.0, 30.0));
    let before = item.scene_bounding_rect();
    let pivot = Point::new(10.0, 10.0);
    for _ in 0..4 {
        item.rotate(pivot);
    }
    assert_eq!(item.rotation(), 0);
    assert!(item.position().approx_eq(&Point::new(50.0, 30.0), 1e-9));
    assert!(item.scene_bounding_rect().approx_eq(&before, 1e-9));
}

#[test]
fn test_rotate_back_undoes_rotate() {
    let mut item = rect_item(Point::new(50.0, 30.0));
    item.set_flipped(true);
    let local = Point::new(7.0, -3.0);
    let before = item.map_to_scene(local);
    item.rotate(Point::zero());
    item.rotate_back(Point::zero());
    assert!(item.map_to_scene(local).approx_eq(&before, 1e-9));
}

#[test]
fn test_flipped_item_turns_clockwise_in_scene() {
    let mut item = rect_item(Point::new(50.0, 30.0));
    item.set_flipped(true);
    let local = Point::new(7.0, -3.0);
    assert!(item
        .map_to_scene(local)
        .approx_eq(&Point::new(43.0, 27.0), 1e-9));

    item.rotate(Point::zero());
    assert_eq!(item.rotation(), 3);
    assert!(item
        .map_to_scene(local)
        .approx_eq(&Point::new(-27.0, 43.0), 1e-9));
}

#[test]
fn test_rotation_swaps_bounding_extent() {
    let mut item = rect_item(Point::new(100.0, 100.0));
    item.rotate(Point::new(100.0, 100.0));
    let bounds = item.scene_bounding_rect();
    assert!((bounds.width - 21.0).abs() < 1e-9);
    assert!((bounds.height - 41.0).abs() < 1e-9);
}

#[test]
fn test_flip_horizontal_mirrors_about_pivot() {
    let mut item = rect_item(Point::new(30.0, 0.0));
    let local = Point::new(5.0, 3.0);
    let before = item.map_to_scene(local);
    item.flip_horizontal(10.0);
    let after = item.map_to_scene(local);
    assert!(after.approx_eq(&Point::new(20.0 - before.x, before.y), 1e-9));
    assert!(item.is_flipped());
}

#[test]
fn test_flip_vertical_mirrors_y_about_pivot() {
    let mut item = rect_item(Point::new(10.0, 20.0));
    let local = Point::new(5.0, 3.0);
    assert_eq!(item.map_to_scene(local), Point::new(15.0, 23.0));

    item.flip_vertical(Point::zero());
    assert!(item
        .map_to_scene(local)
        .approx_eq(&Point::new(15.0, -23.0), 1e-9));
}

#[test]
fn test_resize_recenters_item() {
    let mut item = rect_item(Point::new(100.0, 100.0));
    // bottom-right handle
    item.resize(4, Point::new(140.0, 130.0), false);
    assert_eq!(item.position(), Point::new(110.0, 110.0));
    assert_eq!(item.point_scene_position(0), Some(Point::new(80.0, 90.0)));
    assert_eq!(item.point_scene_position(4), Some(Point::new(140.0, 130.0)));
}

#[test]
fn test_duplicate_has_new_identity_and_no_connections() {
    let mut item = rect_item(Point::new(1.0, 2.0));
    item.set_selected(true);
    let copy = item.duplicate();
    assert_ne!(copy.id(), item.id());
    assert!(!copy.is_selected());
    assert_eq!(copy, item);
    assert!(copy.points().iter().all(|p| p.connections().is_empty()));
}

#[test]
fn test_point_ids_survive_insert_and_remove() {
    let mut item = DrawingItem::new(ItemKind::Polyline(PolylineItem::new(vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
    ])));
    let first = item.points()[0].id();
    let last = item.points()[1].id();

    let inserted = item.insert_new_point(Point::new(50.0, 0.0)).unwrap();
    assert_eq!(item.points().len(), 3);
    assert_eq!(item.point_index(inserted), Some(1));
    assert_eq!(item.point_index(first), Some(0));
    assert_eq!(item.point_index(last), Some(2));

    let removed = item.remove_existing_point(Point::new(50.0, 0.0), 1.0).unwrap();
    assert_eq!(removed.id(), inserted);
    assert_eq!(item.points().len(), 2);
    assert_eq!(item.point_index(last), Some(1));
}

#[test]
fn test_line_cannot_insert_points() {
    let mut item = DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::zero(),
        Point::new(10.0, 0.0),
    )));
    assert!(item.insert_new_point(Point::new(5.0, 0.0)).is_none());
    assert!(item.remove_existing_point(Point::zero(), 1.0).is_none());
}

#[test]
fn test_hit_test_widens_thin_pens() {
    let mut item = DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::zero(),
        Point::new(100.0, 0.0),
    )));
    assert!(!item.hit_test(Point::new(50.0, 3.0), 1.0));
    assert!(item.hit_test(Point::new(50.0, 3.0), 8.0));
    // the pen is restored afterwards
    assert!(!item.hit_test(Point::new(50.0, 3.0), 1.0));
}
