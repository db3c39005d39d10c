use drawkit_designer::aggregator::{self, Common, PropertyEdit};
use drawkit_designer::canvas::Canvas;
use drawkit_designer::geometry::{Point, Rect};
use drawkit_designer::model::{DrawingItem, ItemKind, LineItem, RectItem, TextRectItem};
use drawkit_designer::properties::{self, PropertyValue};
use drawkit_designer::style::{Brush, Color, Font, Pen};

fn canvas_with_three_items() -> Canvas {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let mut line = DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
    )));
    line.set_property(
        properties::PEN,
        &PropertyValue::Pen(Pen::solid(Color::rgb(255, 0, 0), 1.0)),
    );
    canvas.add_item(line);
    canvas.add_item(DrawingItem::at(
        ItemKind::Rect(RectItem::new(Rect::new(-10.0, -10.0, 20.0, 20.0))),
        Point::new(200.0, 200.0),
    ));
    canvas.add_item(DrawingItem::at(
        ItemKind::TextRect(TextRectItem::new(Rect::new(-40.0, -20.0, 80.0, 40.0), "label")),
        Point::new(400.0, 200.0),
    ));
    canvas
}

fn pen_of(item: &DrawingItem) -> Pen {
    match item.property(properties::PEN) {
        Some(PropertyValue::Pen(pen)) => pen,
        other => panic!("no pen: {:?}", other),
    }
}

#[test]
fn test_pen_width_edit_keeps_each_color() {
    let mut canvas = canvas_with_three_items();
    canvas.select_all();

    let changed = canvas.edit_selection(&PropertyEdit::PenWidth(3.0));
    assert_eq!(changed, 3);

    let items = canvas.items();
    assert_eq!(pen_of(&items[0]).width, 3.0);
    assert_eq!(pen_of(&items[0]).color, Color::rgb(255, 0, 0));
    assert_eq!(pen_of(&items[1]).width, 3.0);
    assert_eq!(pen_of(&items[1]).color, Color::black());
}

#[test]
fn test_brush_edit_skips_items_without_brush() {
    let mut canvas = canvas_with_three_items();
    canvas.select_all();

    let blue = Color::rgb(0, 0, 255);
    assert_eq!(canvas.edit_selection(&PropertyEdit::BrushColor(blue)), 2);
    assert_eq!(
        canvas.items()[1].property(properties::BRUSH),
        Some(PropertyValue::Brush(Brush::new(blue)))
    );
    assert!(canvas.items()[0].property(properties::BRUSH).is_none());
}

#[test]
fn test_invalid_font_size_is_rejected() {
    let mut canvas = canvas_with_three_items();
    canvas.select_all();
    assert_eq!(canvas.edit_selection(&PropertyEdit::FontSize(0.0)), 0);
    assert_eq!(canvas.edit_selection(&PropertyEdit::FontSize(18.0)), 1);

    let text = &canvas.items()[2];
    match text.property(properties::FONT) {
        Some(PropertyValue::Font(font)) => assert_eq!(font.size, 18.0),
        other => panic!("no font: {:?}", other),
    }
}

#[test]
fn test_repeated_edit_changes_nothing() {
    let mut canvas = canvas_with_three_items();
    canvas.select_all();
    assert_eq!(canvas.edit_selection(&PropertyEdit::FontBold(true)), 1);
    assert_eq!(canvas.edit_selection(&PropertyEdit::FontBold(true)), 0);
}

#[test]
fn test_common_property_reports_mixed_and_uniform() {
    let mut canvas = canvas_with_three_items();
    canvas.select_all();
    let ids: Vec<_> = canvas.selection().ids().to_vec();

    let pens = aggregator::common_property(canvas.items(), &ids, properties::PEN);
    assert!(pens.is_mixed());

    canvas.edit_selection(&PropertyEdit::PenColor(Color::rgb(0, 128, 0)));
    canvas.edit_selection(&PropertyEdit::PenWidth(2.0));
    let pens = aggregator::common_property(canvas.items(), &ids, properties::PEN);
    assert_eq!(
        pens,
        Common::Uniform(PropertyValue::Pen(Pen::solid(Color::rgb(0, 128, 0), 2.0)))
    );

    let fonts = aggregator::common_property(canvas.items(), &ids, properties::FONT);
    assert_eq!(fonts, Common::Uniform(PropertyValue::Font(Font::default())));
}

#[test]
fn test_shared_names_are_the_intersection() {
    let canvas = canvas_with_three_items();
    let ids: Vec<_> = canvas.items().iter().map(DrawingItem::id).collect();
    let names = aggregator::shared_property_names(canvas.items(), &ids);
    assert_eq!(names, vec![properties::PEN]);
}
