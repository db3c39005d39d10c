use drawkit_designer::arrow::{Arrow, ArrowStyle};
use drawkit_designer::geometry::{Point, Rect};
use drawkit_designer::model::{DrawingItem, ItemKind, LineItem};
use drawkit_designer::properties::{self, PropertyValue};
use drawkit_designer::renderer::{DrawCommand, RecordingPainter};
use drawkit_designer::style::{Brush, Pen};

fn line_item() -> DrawingItem {
    let mut item = DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
    )));
    item.set_property(
        properties::PEN,
        &PropertyValue::Pen(Pen::default().with_width(2.0)),
    );
    item
}

fn line_of(item: &DrawingItem) -> &LineItem {
    match item.kind() {
        ItemKind::Line(line) => line,
        other => panic!("expected a line, got {:?}", other),
    }
}

#[test]
fn test_line_bounding_rect_covers_pen() {
    let item = line_item();
    assert!(item
        .bounding_rect()
        .approx_eq(&Rect::new(-1.0, -1.0, 102.0, 2.0), 1e-9));
    assert!(item.is_valid());
}

#[test]
fn test_start_arrow_joins_shape() {
    let mut item = line_item();
    assert!(!item.shape().contains(&Point::new(10.0, 4.0)));

    let arrow = Arrow::new(ArrowStyle::TriangleFilled, 20.0);
    assert!(item.set_property(properties::START_ARROW, &PropertyValue::Arrow(arrow)));

    assert!(item.shape().contains(&Point::new(10.0, 4.0)));
    assert!(item.bounding_rect().height > 2.0);
}

#[test]
fn test_line_paints_arrow_with_pen_color() {
    let mut item = line_item();
    item.set_property(
        properties::END_ARROW,
        &PropertyValue::Arrow(Arrow::new(ArrowStyle::TriangleFilled, 10.0)),
    );
    let mut painter = RecordingPainter::new();
    item.paint(&mut painter, &Brush::default());

    assert_eq!(
        painter.count(|c| matches!(c, DrawCommand::Line(..))),
        1
    );
    let arrow = painter
        .commands()
        .iter()
        .find(|r| matches!(r.command, DrawCommand::Path(_)))
        .expect("arrow path");
    assert_eq!(arrow.brush, Brush::new(Pen::default().color));
}

#[test]
fn test_scale_halves_geometry_pen_and_arrows() {
    let mut item = line_item();
    item.set_property(
        properties::START_ARROW,
        &PropertyValue::Arrow(Arrow::new(ArrowStyle::Triangle, 20.0)),
    );
    item.scale(0.5);

    let line = line_of(&item);
    assert_eq!(line.p1(), Point::new(0.0, 0.0));
    assert_eq!(line.p2(), Point::new(50.0, 0.0));
    assert_eq!(line.pen().width, 1.0);
    assert_eq!(line.start_arrow().size(), 10.0);
}

#[test]
fn test_shift_resize_snaps_to_45_degrees() {
    let mut item = line_item();
    item.resize(2, Point::new(70.0, 75.0), true);
    let start = item.point_scene_position(0).unwrap();
    let end = item.point_scene_position(2).unwrap();
    assert_eq!(start, Point::zero());
    assert_eq!(end, Point::new(75.0, 75.0));
}

#[test]
fn test_midpoint_follows_endpoints() {
    let mut item = line_item();
    item.resize(0, Point::new(0.0, 40.0), false);
    let mid = item.point_scene_position(1).unwrap();
    assert!(mid.approx_eq(&Point::new(50.0, 20.0), 1e-9));
    assert!(!item.points()[1].is_control());
    assert!(item.points()[1].is_connection());
}
