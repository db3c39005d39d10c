use std::sync::{Arc, Mutex};

use drawkit_core::{EventCategory, EventFilter, GridStyle, Unit};
use drawkit_designer::canvas::{Canvas, CanvasEvent, Mode};
use drawkit_designer::connections;
use drawkit_designer::geometry::{Point, Rect};
use drawkit_designer::model::{DrawingItem, ItemKind, LineItem, PolylineItem, RectItem};
use drawkit_designer::properties::{self, PropertyValue};
use drawkit_designer::renderer::{DrawCommand, RecordingPainter};
use drawkit_designer::style::{Brush, Pen};

fn rect_at(x: f64, y: f64) -> DrawingItem {
    DrawingItem::at(
        ItemKind::Rect(RectItem::new(Rect::new(-20.0, -20.0, 40.0, 40.0))),
        Point::new(x, y),
    )
}

fn record(canvas: &Canvas, filter: EventFilter) -> Arc<Mutex<Vec<CanvasEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    canvas
        .events()
        .subscribe(filter, move |event| sink.lock().unwrap().push(event));
    seen
}

#[test]
fn test_z_order_operations() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let a = canvas.add_item(rect_at(100.0, 100.0));
    let b = canvas.add_item(rect_at(200.0, 100.0));
    let c = canvas.add_item(rect_at(300.0, 100.0));

    canvas.select_items(&[a]);
    canvas.bring_forward();
    assert_eq!(canvas.item_index(a), Some(1));
    canvas.bring_to_front();
    assert_eq!(canvas.item_index(a), Some(2));

    canvas.select_items(&[c]);
    canvas.send_to_back();
    assert_eq!(canvas.item_index(c), Some(0));
    canvas.send_backward();
    assert_eq!(canvas.item_index(c), Some(0));
    assert_eq!(canvas.item_index(b), Some(1));
}

#[test]
fn test_delete_selection_breaks_connections() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let first = canvas.add_item(DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
    ))));
    canvas.add_item(DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(100.0, 0.0),
        Point::new(200.0, 0.0),
    ))));
    assert_eq!(canvas.reconnect_all(), 1);

    canvas.select_items(&[first]);
    let removed = canvas.delete_selection();
    assert_eq!(removed.len(), 1);
    assert_eq!(canvas.item_count(), 1);
    assert!(canvas.selection().is_empty());
    assert!(canvas.items()[0]
        .points()
        .iter()
        .all(|p| p.connections().is_empty()));
}

#[test]
fn test_rotate_selection_about_snapped_center() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let id = canvas.add_item(DrawingItem::at(
        ItemKind::Rect(RectItem::new(Rect::new(-30.0, -10.0, 60.0, 20.0))),
        Point::new(100.0, 100.0),
    ));
    canvas.select_items(&[id]);
    assert_eq!(canvas.selection_pivot(), Some(Point::new(100.0, 100.0)));

    canvas.rotate_selection();
    let item = canvas.item(id).unwrap();
    assert_eq!(item.rotation(), 1);
    assert!(item
        .scene_bounding_rect()
        .approx_eq(&Rect::new(89.5, 69.5, 21.0, 61.0), 1e-9));

    canvas.rotate_back_selection();
    assert_eq!(canvas.item(id).unwrap().rotation(), 0);

    canvas.flip_horizontal_selection();
    assert!(canvas.item(id).unwrap().is_flipped());
    canvas.flip_vertical_selection();
    let item = canvas.item(id).unwrap();
    assert!(!item.is_flipped());
    assert_eq!(item.rotation(), 2);
}

#[test]
fn test_insert_and_remove_point_on_selection() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let id = canvas.add_item(DrawingItem::new(ItemKind::Polyline(PolylineItem::new(vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
    ]))));
    assert!(canvas.insert_point_at(Point::new(50.0, 0.0)).is_none());

    canvas.select_items(&[id]);
    let point = canvas.insert_point_at(Point::new(49.0, 2.0)).unwrap();
    let item = canvas.item(id).unwrap();
    assert_eq!(item.points().len(), 3);
    assert_eq!(item.point_index(point), Some(1));
    assert_eq!(item.point_scene_position(1), Some(Point::new(50.0, 0.0)));

    assert!(canvas.remove_point_at(Point::new(51.0, 1.0)));
    assert_eq!(canvas.item(id).unwrap().points().len(), 2);
    assert!(!canvas.remove_point_at(Point::new(0.0, 0.0)));
}

#[test]
fn test_page_properties_emit_on_change_only() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let seen = record(
        &canvas,
        EventFilter::Categories(vec![EventCategory::Property]),
    );

    canvas.set_grid(10.0);
    canvas.set_grid(20.0);
    canvas.set_units(Unit::default());
    canvas.set_grid_style(GridStyle::Graph);
    canvas.set_name("Plan");

    let events = seen.lock().unwrap();
    let names: Vec<&str> = events
        .iter()
        .map(|e| match e {
            CanvasEvent::PropertyChanged { name, .. } => name.as_str(),
            other => panic!("unexpected {:?}", other),
        })
        .collect();
    assert_eq!(names, vec!["grid", "gridStyle", "name"]);
    assert_eq!(
        events[0],
        CanvasEvent::PropertyChanged {
            name: "grid".to_string(),
            value: serde_json::json!(20.0),
        }
    );
}

#[test]
fn test_snap_to_grid_follows_page_grid() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    assert_eq!(canvas.snap_to_grid(Point::new(14.0, 16.0)), Point::new(10.0, 20.0));
    canvas.set_grid(0.0);
    assert_eq!(canvas.snap_to_grid(Point::new(14.0, 16.0)), Point::new(14.0, 16.0));
}

#[test]
fn test_mode_change_is_announced() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let seen = record(&canvas, EventFilter::Categories(vec![EventCategory::Mode]));
    canvas.set_mode(Mode::Zoom);
    canvas.set_mode(Mode::Zoom);
    canvas.cancel();
    assert_eq!(canvas.mode(), Mode::Select);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            CanvasEvent::ModeChanged(Mode::Zoom),
            CanvasEvent::ModeChanged(Mode::Select)
        ]
    );
}

#[test]
fn test_render_draws_items_and_handles() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    canvas.set_grid_style(GridStyle::Lined);
    let id = canvas.add_item(rect_at(100.0, 100.0));
    canvas.select_items(&[id]);

    let mut painter = RecordingPainter::new();
    canvas.render(&mut painter);
    let commands = painter.commands();

    // background first, with the page brush
    assert_eq!(commands[0].command, DrawCommand::Rect(Rect::new(0.0, 0.0, 1000.0, 1000.0)));
    assert_eq!(commands[0].brush, Brush::default());

    assert!(commands
        .iter()
        .any(|r| r.command == DrawCommand::Rect(Rect::new(-20.0, -20.0, 40.0, 40.0))));
    assert!(painter.count(|c| matches!(c, DrawCommand::Line(..))) > 0);

    // eight handles of 8 px in view space
    let handles = painter.count(|c| matches!(c, DrawCommand::Rect(r) if r.width == 8.0));
    assert_eq!(handles, 8);
}

#[test]
fn test_clear_removes_everything() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let id = canvas.add_item(rect_at(100.0, 100.0));
    canvas.select_items(&[id]);
    canvas.clear();
    assert_eq!(canvas.item_count(), 0);
    assert!(canvas.selection().is_empty());
}

#[test]
fn test_hit_margin_of_thin_line_follows_zoom() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let id = canvas.add_item(DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(100.0, 200.0),
        Point::new(300.0, 200.0),
    ))));

    // 8 px minimum stroke: 4 scene units either side at scale 1
    assert_eq!(canvas.item_at(Point::new(200.0, 203.9)), Some(id));
    assert_eq!(canvas.item_at(Point::new(200.0, 204.1)), None);

    // half the scale, twice the margin
    canvas.set_scale(0.5);
    assert_eq!(canvas.item_at(Point::new(200.0, 207.9)), Some(id));
    assert_eq!(canvas.item_at(Point::new(200.0, 196.1)), Some(id));
    assert_eq!(canvas.item_at(Point::new(200.0, 208.1)), None);

    // the pen itself is left untouched
    assert_eq!(
        canvas.item(id).unwrap().property(properties::PEN),
        Some(PropertyValue::Pen(Pen::default()))
    );
}

#[test]
fn test_item_at_prefers_selected_items() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let back = canvas.add_item(rect_at(100.0, 100.0));
    let front = canvas.add_item(rect_at(100.0, 100.0));
    let edge = Point::new(80.0, 100.0);

    assert_eq!(canvas.item_at(edge), Some(front));

    canvas.select_items(&[back]);
    assert_eq!(canvas.item_at(edge), Some(back));

    canvas.select_items(&[back, front]);
    assert_eq!(canvas.item_at(edge), Some(front));
}

#[test]
fn test_removing_interior_point_keeps_end_links() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let polyline = canvas.add_item(DrawingItem::new(ItemKind::Polyline(PolylineItem::new(vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(200.0, 0.0),
    ]))));
    canvas.add_item(DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(200.0, 0.0),
        Point::new(200.0, 100.0),
    ))));
    assert_eq!(canvas.reconnect_all(), 1);

    canvas.select_items(&[polyline]);
    assert!(canvas.remove_point_at(Point::new(100.0, 0.0)));

    let links = connections::all_links(canvas.items());
    assert_eq!(links.len(), 2);
    for (a, b) in &links {
        assert!(links.contains(&(*b, *a)));
    }
}
