use drawkit_designer::arrow::{Arrow, ArrowStyle};
use drawkit_designer::canvas::Canvas;
use drawkit_designer::connections;
use drawkit_designer::geometry::{Point, Rect};
use drawkit_designer::model::{
    DrawingItem, EllipseItem, ItemKind, LineItem, PolygonItem, RectItem, TextItem,
};
use drawkit_designer::properties::{self, PropertyValue};
use drawkit_designer::style::{Color, Pen, PenStyle};
use tempfile::NamedTempFile;

fn sample_canvas() -> Canvas {
    let mut canvas = Canvas::new(1200.0, 800.0);

    let mut line = DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
    )));
    line.set_property(
        properties::PEN,
        &PropertyValue::Pen(Pen::new(Color::rgb(10, 20, 30), 2.5, PenStyle::Dash)),
    );
    line.set_property(
        properties::END_ARROW,
        &PropertyValue::Arrow(Arrow::new(ArrowStyle::ConcaveFilled, 12.0)),
    );
    canvas.add_item(line);

    canvas.add_item(DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(100.0, 0.0),
        Point::new(100.0, 50.0),
    ))));

    let mut rect = DrawingItem::at(
        ItemKind::Rect(RectItem::new(Rect::new(-30.0, -20.0, 60.0, 40.0))),
        Point::new(300.0, 300.0),
    );
    rect.set_rotation(1);
    rect.set_flipped(true);
    canvas.add_item(rect);

    canvas.add_item(DrawingItem::new(ItemKind::Ellipse(EllipseItem::new(Rect::new(
        500.0, 100.0, 80.0, 40.0,
    )))));
    canvas.add_item(DrawingItem::new(ItemKind::Polygon(PolygonItem::new(vec![
        Point::new(0.0, 200.0),
        Point::new(60.0, 200.0),
        Point::new(30.0, 250.0),
    ]))));
    canvas.add_item(DrawingItem::at(
        ItemKind::Text(TextItem::new("hello <world> & \"friends\"")),
        Point::new(50.0, 400.0),
    ));
    canvas.reconnect_all();
    canvas
}

#[test]
fn test_document_survives_save_and_load() {
    let source = sample_canvas();
    let text = source.items_to_string().unwrap();

    let mut target = Canvas::new(800.0, 600.0);
    assert_eq!(target.load_items(&text).unwrap(), source.item_count());

    for (a, b) in source.items().iter().zip(target.items()) {
        assert_eq!(a.key(), b.key());
        assert_eq!(a, b);
        assert_ne!(a.id(), b.id());
    }
    assert_eq!(
        connections::all_links(target.items()).len(),
        connections::all_links(source.items()).len()
    );
    assert!(!connections::all_links(target.items()).is_empty());
}

#[test]
fn test_document_through_file() {
    let source = sample_canvas();
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), source.items_to_string().unwrap()).unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    assert!(text.starts_with("<items>"));
    assert!(text.contains("<line "));
    assert!(text.contains("rotation=\"1\""));

    let mut target = Canvas::default();
    target.load_items(&text).unwrap();
    assert_eq!(target.items(), source.items());
}

#[test]
fn test_load_replaces_items_and_clears_selection() {
    let mut canvas = sample_canvas();
    canvas.select_all();
    let text = "<items><rect left=\"0\" top=\"0\" width=\"10\" height=\"10\"/></items>";
    assert_eq!(canvas.load_items(text).unwrap(), 1);
    assert!(canvas.selection().is_empty());
    assert_eq!(canvas.items()[0].key(), "rect");
}

#[test]
fn test_malformed_document_is_an_error() {
    let mut canvas = sample_canvas();
    let before = canvas.item_count();
    let result = canvas.load_items("<items><line x1=\"1\"></items>");
    assert!(result.is_err());
    assert!(result.unwrap_err().is_xml_error());
    assert_eq!(canvas.item_count(), before);
}

#[test]
fn test_copy_and_paste_keeps_internal_connections() {
    let mut canvas = sample_canvas();
    let ids: Vec<_> = canvas.items()[..2].iter().map(DrawingItem::id).collect();
    canvas.select_items(&ids);

    let text = canvas.copy().unwrap();
    assert_eq!(canvas.paste(&text).unwrap(), 2);
    let placing = canvas.place_items();
    assert_eq!(placing.len(), 2);
    assert_eq!(connections::all_links(placing).len(), 2);
}
