use drawkit_core::constants::CONNECT_EPSILON;
use drawkit_designer::connections;
use drawkit_designer::geometry::{Point, Rect};
use drawkit_designer::model::{DrawingItem, ItemKind, LineItem, PointRef, RectItem};

fn line(p1: Point, p2: Point) -> DrawingItem {
    DrawingItem::new(ItemKind::Line(LineItem::new(p1, p2)))
}

fn end_ref(item: &DrawingItem, index: usize) -> PointRef {
    PointRef::new(item.id(), item.points()[index].id())
}

#[test]
fn test_coincident_endpoints_connect_once() {
    let mut items = vec![
        line(Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
        line(Point::new(100.0, 0.0), Point::new(100.0, 80.0)),
    ];
    let ids: Vec<_> = items.iter().map(DrawingItem::id).collect();

    assert_eq!(connections::resolve(&mut items, &ids, CONNECT_EPSILON), 1);
    assert_eq!(connections::all_links(&items).len(), 2);

    let a = end_ref(&items[0], 2);
    let b = end_ref(&items[1], 0);
    assert!(connections::point(&items, &a).unwrap().is_connected_to(&b));
    assert!(connections::point(&items, &b).unwrap().is_connected_to(&a));

    // resolving again finds nothing new
    assert_eq!(connections::resolve(&mut items, &ids, CONNECT_EPSILON), 0);
}

#[test]
fn test_non_free_points_do_not_connect_to_each_other() {
    // both midpoints at (50, 0): connection points but not free
    let mut items = vec![
        line(Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
        line(Point::new(50.0, -50.0), Point::new(50.0, 50.0)),
    ];
    let ids: Vec<_> = items.iter().map(DrawingItem::id).collect();
    assert_eq!(connections::resolve(&mut items, &ids, CONNECT_EPSILON), 0);
}

#[test]
fn test_free_endpoint_connects_to_midpoint() {
    let mut items = vec![
        line(Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
        line(Point::new(50.0, 0.0), Point::new(50.0, 60.0)),
    ];
    let ids: Vec<_> = items.iter().map(DrawingItem::id).collect();
    assert_eq!(connections::resolve(&mut items, &ids, CONNECT_EPSILON), 1);
}

#[test]
fn test_dragging_pulls_connected_free_points() {
    let mut items = vec![
        line(Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
        line(Point::new(100.0, 0.0), Point::new(100.0, 80.0)),
    ];
    let ids: Vec<_> = items.iter().map(DrawingItem::id).collect();
    connections::resolve(&mut items, &ids, CONNECT_EPSILON);

    let moved = items[0].id();
    items[0].move_by(Point::new(0.0, 20.0));
    connections::drag_connected_points(&mut items, &[moved]);

    let follower = end_ref(&items[1], 0);
    let anchor = end_ref(&items[0], 2);
    let target = connections::scene_position(&items, &anchor).unwrap();
    assert!(connections::scene_position(&items, &follower)
        .unwrap()
        .approx_eq(&target, 1e-9));
    // the other end stays
    assert!(items[1]
        .point_scene_position(2)
        .unwrap()
        .approx_eq(&Point::new(100.0, 80.0), 1e-9));

    connections::resolve(&mut items, &[moved], CONNECT_EPSILON);
    assert_eq!(connections::all_links(&items).len(), 2);
}

#[test]
fn test_disconnect_all_clears_both_sides() {
    let mut items = vec![
        line(Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
        line(Point::new(100.0, 0.0), Point::new(200.0, 0.0)),
        line(Point::new(0.0, 0.0), Point::new(0.0, 100.0)),
    ];
    let ids: Vec<_> = items.iter().map(DrawingItem::id).collect();
    assert_eq!(connections::resolve(&mut items, &ids, CONNECT_EPSILON), 2);

    connections::disconnect_all(&mut items, ids[0]);
    assert!(connections::all_links(&items).is_empty());
}

#[test]
fn test_line_attaches_to_rect_corner() {
    let mut items = vec![
        DrawingItem::new(ItemKind::Rect(RectItem::new(Rect::new(0.0, 0.0, 50.0, 50.0)))),
        line(Point::new(0.0, 0.0), Point::new(-40.0, -40.0)),
    ];
    let rect = items[0].id();
    let wire = items[1].id();
    assert_eq!(connections::resolve(&mut items, &[wire], CONNECT_EPSILON), 1);

    // the free line end follows the corner
    items[0].move_by(Point::new(10.0, 0.0));
    connections::drag_connected_points(&mut items, &[rect]);
    assert!(items[1]
        .point_scene_position(0)
        .unwrap()
        .approx_eq(&Point::new(10.0, 0.0), 1e-9));

    // the corner cannot follow the line, so moving the line breaks the link
    items[1].move_by(Point::new(0.0, 30.0));
    connections::resolve(&mut items, &[wire], CONNECT_EPSILON);
    assert!(connections::all_links(&items).is_empty());
}

#[test]
fn test_should_connect_respects_epsilon() {
    let items = vec![
        line(Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
        line(Point::new(100.005, 0.0), Point::new(200.0, 0.0)),
    ];
    let a = end_ref(&items[0], 2);
    let b = end_ref(&items[1], 0);
    assert!(!connections::should_connect(&items, &a, &b, CONNECT_EPSILON));
    assert!(connections::should_connect(&items, &a, &b, 0.01));
    assert!(!connections::should_connect(&items, &a, &a, 0.01));
}
