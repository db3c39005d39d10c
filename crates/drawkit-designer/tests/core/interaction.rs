use std::sync::{Arc, Mutex};

use drawkit_core::{EventCategory, EventFilter};
use drawkit_designer::canvas::{Canvas, CanvasEvent, Mode, MouseButton, MouseEvent, SelectState};
use drawkit_designer::connections;
use drawkit_designer::geometry::{Point, Rect};
use drawkit_designer::model::{DrawingItem, ItemId, ItemKind, LineItem, RectItem};

fn rect_at(x: f64, y: f64) -> DrawingItem {
    DrawingItem::at(
        ItemKind::Rect(RectItem::new(Rect::new(-20.0, -20.0, 40.0, 40.0))),
        Point::new(x, y),
    )
}

/// Canvas-level mouse driver working in scene coordinates.
struct Mouse<'a> {
    canvas: &'a mut Canvas,
}

impl<'a> Mouse<'a> {
    fn new(canvas: &'a mut Canvas) -> Self {
        Self { canvas }
    }

    fn view(&self, x: f64, y: f64) -> Point {
        self.canvas.map_from_scene(Point::new(x, y))
    }

    fn press(&mut self, x: f64, y: f64) -> &mut Self {
        let event = MouseEvent::left(self.view(x, y));
        self.canvas.mouse_press(event);
        self
    }

    fn press_ctrl(&mut self, x: f64, y: f64) -> &mut Self {
        let event = MouseEvent::left(self.view(x, y)).with_ctrl();
        self.canvas.mouse_press(event);
        self
    }

    fn drag(&mut self, x: f64, y: f64) -> &mut Self {
        let event = MouseEvent::left(self.view(x, y));
        self.canvas.mouse_move(event);
        self
    }

    fn drag_shift(&mut self, x: f64, y: f64) -> &mut Self {
        let event = MouseEvent::left(self.view(x, y)).with_shift();
        self.canvas.mouse_move(event);
        self
    }

    fn release(&mut self, x: f64, y: f64) -> &mut Self {
        let event = MouseEvent::left(self.view(x, y));
        self.canvas.mouse_release(event);
        self
    }

    fn release_ctrl(&mut self, x: f64, y: f64) -> &mut Self {
        let event = MouseEvent::left(self.view(x, y)).with_ctrl();
        self.canvas.mouse_release(event);
        self
    }

    fn click(&mut self, x: f64, y: f64) -> &mut Self {
        self.press(x, y).release(x, y)
    }

    fn hover(&mut self, x: f64, y: f64) -> &mut Self {
        let event = MouseEvent::hover(self.view(x, y));
        self.canvas.mouse_move(event);
        self
    }
}

fn selected(canvas: &Canvas) -> Vec<ItemId> {
    canvas.selection().ids().to_vec()
}

#[test]
fn test_click_selects_and_ctrl_click_toggles() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let a = canvas.add_item(rect_at(100.0, 100.0));
    let b = canvas.add_item(rect_at(300.0, 100.0));

    Mouse::new(&mut canvas).click(100.0, 100.0);
    assert_eq!(selected(&canvas), vec![a]);
    assert!(canvas.item(a).unwrap().is_selected());

    Mouse::new(&mut canvas)
        .press_ctrl(300.0, 100.0)
        .release_ctrl(300.0, 100.0);
    assert_eq!(selected(&canvas), vec![a, b]);

    Mouse::new(&mut canvas)
        .press_ctrl(100.0, 100.0)
        .release_ctrl(100.0, 100.0);
    assert_eq!(selected(&canvas), vec![b]);

    Mouse::new(&mut canvas).click(600.0, 600.0);
    assert!(canvas.selection().is_empty());
    assert!(!canvas.item(b).unwrap().is_selected());
}

#[test]
fn test_small_motion_is_still_a_click() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let a = canvas.add_item(rect_at(100.0, 100.0));
    Mouse::new(&mut canvas)
        .press(100.0, 100.0)
        .drag(101.0, 101.0)
        .release(101.0, 101.0);
    assert_eq!(selected(&canvas), vec![a]);
    assert_eq!(canvas.item(a).unwrap().position(), Point::new(100.0, 100.0));
}

#[test]
fn test_drag_moves_item_by_snapped_delta() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let a = canvas.add_item(rect_at(100.0, 100.0));

    let mut mouse = Mouse::new(&mut canvas);
    mouse.press(100.0, 100.0).drag(128.0, 121.0);
    assert_eq!(mouse.canvas.select_state(), SelectState::MoveItems);
    assert_eq!(
        mouse.canvas.mouse_info(),
        "(100.00, 100.00) - (130.00, 120.00)  \u{0394}(30.00, 20.00)"
    );
    mouse.release(128.0, 121.0);

    assert_eq!(canvas.item(a).unwrap().position(), Point::new(130.0, 120.0));
    assert_eq!(selected(&canvas), vec![a]);
    assert_eq!(canvas.mouse_info(), "");
    assert_eq!(canvas.select_state(), SelectState::Idle);
}

#[test]
fn test_moving_a_line_onto_another_connects_them() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    canvas.add_item(DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(100.0, 300.0),
        Point::new(200.0, 300.0),
    ))));
    let second = canvas.add_item(DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(200.0, 400.0),
        Point::new(300.0, 400.0),
    ))));

    Mouse::new(&mut canvas)
        .press(250.0, 400.0)
        .drag(250.0, 350.0)
        .drag(250.0, 300.0)
        .release(250.0, 300.0);

    assert_eq!(selected(&canvas), vec![second]);
    assert_eq!(connections::all_links(canvas.items()).len(), 2);

    // dragging the first line now pulls the attached end of the second
    Mouse::new(&mut canvas)
        .press(150.0, 300.0)
        .drag(150.0, 250.0)
        .release(150.0, 250.0);
    let follower = canvas.item(second).unwrap();
    assert_eq!(follower.point_scene_position(0), Some(Point::new(200.0, 250.0)));
    assert_eq!(follower.point_scene_position(2), Some(Point::new(300.0, 300.0)));
    assert_eq!(connections::all_links(canvas.items()).len(), 2);
}

#[test]
fn test_handle_drag_resizes_single_selection() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let a = canvas.add_item(rect_at(100.0, 100.0));
    Mouse::new(&mut canvas).click(100.0, 100.0);

    let mut mouse = Mouse::new(&mut canvas);
    mouse.press(120.0, 120.0).drag(150.0, 140.0);
    assert_eq!(mouse.canvas.select_state(), SelectState::ResizeItem);
    mouse.release(150.0, 140.0);

    let item = canvas.item(a).unwrap();
    assert_eq!(item.point_scene_position(0), Some(Point::new(80.0, 80.0)));
    assert_eq!(item.point_scene_position(4), Some(Point::new(150.0, 140.0)));
}

#[test]
fn test_shift_resize_of_line_snaps_to_diagonal() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let line = canvas.add_item(DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(100.0, 100.0),
        Point::new(200.0, 100.0),
    ))));
    canvas.select_items(&[line]);

    Mouse::new(&mut canvas)
        .press(200.0, 100.0)
        .drag_shift(200.0, 190.0)
        .release(200.0, 190.0);

    let item = canvas.item(line).unwrap();
    let start = item.point_scene_position(0).unwrap();
    let end = item.point_scene_position(2).unwrap();
    assert_eq!(start, Point::new(100.0, 100.0));
    // the larger offset (100) wins on both axes
    assert_eq!(end, Point::new(200.0, 200.0));
}

#[test]
fn test_rubber_band_selects_covered_items() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let a = canvas.add_item(rect_at(100.0, 100.0));
    let b = canvas.add_item(rect_at(300.0, 300.0));

    let mut mouse = Mouse::new(&mut canvas);
    mouse.press(50.0, 50.0).drag(200.0, 200.0);
    assert_eq!(mouse.canvas.select_state(), SelectState::RubberBand);
    assert_eq!(mouse.canvas.band(), Some(Rect::new(50.0, 50.0, 150.0, 150.0)));
    mouse.release(200.0, 200.0);
    assert_eq!(selected(&canvas), vec![a]);
    assert_eq!(canvas.band(), None);

    Mouse::new(&mut canvas)
        .press_ctrl(250.0, 250.0)
        .drag(350.0, 350.0)
        .release_ctrl(350.0, 350.0);
    assert_eq!(selected(&canvas), vec![a, b]);

    // a band that touches an item only partly selects nothing
    Mouse::new(&mut canvas)
        .press(250.0, 250.0)
        .drag(310.0, 310.0)
        .release(310.0, 310.0);
    assert!(canvas.selection().is_empty());
}

#[test]
fn test_thin_rubber_band_clears_selection() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let a = canvas.add_item(rect_at(100.0, 100.0));
    canvas.select_items(&[a]);

    // long but one pixel high: below the threshold on one axis
    let mut mouse = Mouse::new(&mut canvas);
    mouse.press(400.0, 400.0).drag(600.0, 401.0);
    assert_eq!(mouse.canvas.select_state(), SelectState::RubberBand);
    mouse.release(600.0, 401.0);
    assert!(canvas.selection().is_empty());
    assert!(!canvas.item(a).unwrap().is_selected());

    // with ctrl held the selection is kept
    canvas.select_items(&[a]);
    Mouse::new(&mut canvas)
        .press_ctrl(400.0, 400.0)
        .drag(600.0, 401.0)
        .release_ctrl(600.0, 401.0);
    assert_eq!(selected(&canvas), vec![a]);
}

#[test]
fn test_cancel_restores_items_mid_drag() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let a = canvas.add_item(rect_at(100.0, 100.0));

    let mut mouse = Mouse::new(&mut canvas);
    mouse.press(100.0, 100.0).drag(160.0, 100.0);
    assert_eq!(mouse.canvas.item(a).unwrap().position(), Point::new(160.0, 100.0));

    mouse.canvas.cancel();
    assert_eq!(mouse.canvas.item(a).unwrap().position(), Point::new(100.0, 100.0));
    assert_eq!(mouse.canvas.select_state(), SelectState::Idle);

    mouse.release(160.0, 100.0);
    assert_eq!(canvas.item(a).unwrap().position(), Point::new(100.0, 100.0));
}

#[test]
fn test_place_line_by_press_and_release() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    assert!(canvas.start_place_key("line"));
    assert_eq!(canvas.mode(), Mode::Place);
    assert_eq!(canvas.place_items().len(), 1);

    Mouse::new(&mut canvas)
        .hover(93.0, 98.0)
        .press(100.0, 100.0)
        .drag(150.0, 100.0)
        .drag(198.0, 103.0)
        .release(198.0, 103.0);

    assert_eq!(canvas.item_count(), 1);
    let line = &canvas.items()[0];
    assert_eq!(line.point_scene_position(0), Some(Point::new(100.0, 100.0)));
    assert_eq!(line.point_scene_position(2), Some(Point::new(200.0, 100.0)));
    assert!(!line.is_selected());

    // still placing, and the next line attaches to the first
    assert_eq!(canvas.mode(), Mode::Place);
    Mouse::new(&mut canvas)
        .press(200.0, 100.0)
        .drag(200.0, 200.0)
        .release(200.0, 200.0);
    assert_eq!(canvas.item_count(), 2);
    assert_eq!(connections::all_links(canvas.items()).len(), 2);
}

#[test]
fn test_place_click_without_drag_adds_nothing() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    canvas.start_place_key("line");
    Mouse::new(&mut canvas).click(100.0, 100.0);
    assert_eq!(canvas.item_count(), 0);
    assert_eq!(canvas.place_items().len(), 1);
}

#[test]
fn test_place_rect_by_dragging_corner() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    canvas.start_place_key("rect");
    Mouse::new(&mut canvas)
        .press(100.0, 100.0)
        .drag(160.0, 140.0)
        .release(160.0, 140.0);
    assert_eq!(canvas.item_count(), 1);
    assert!(canvas.items()[0]
        .scene_bounding_rect()
        .approx_eq(&Rect::new(99.5, 99.5, 61.0, 41.0), 1e-9));
}

#[test]
fn test_unknown_place_key_is_refused() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    assert!(!canvas.start_place_key("hexagon"));
    assert_eq!(canvas.mode(), Mode::Select);
}

#[test]
fn test_pasted_batch_is_placed_on_click() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let first = canvas.add_item(DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
    ))));
    let second = canvas.add_item(DrawingItem::new(ItemKind::Line(LineItem::new(
        Point::new(100.0, 0.0),
        Point::new(100.0, 50.0),
    ))));
    canvas.reconnect_all();
    canvas.select_items(&[first, second]);
    let text = canvas.copy().unwrap();

    canvas.paste(&text).unwrap();
    Mouse::new(&mut canvas).hover(300.0, 300.0).click(300.0, 300.0);

    assert_eq!(canvas.item_count(), 4);
    let placed = &canvas.items()[2];
    assert_eq!(placed.point_scene_position(0), Some(Point::new(300.0, 300.0)));
    assert_eq!(connections::all_links(canvas.items()).len(), 4);

    canvas.cancel();
    assert_eq!(canvas.mode(), Mode::Select);
    assert!(canvas.place_items().is_empty());
}

#[test]
fn test_zoom_band_zooms_and_returns_to_select() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    canvas.set_mode(Mode::Zoom);

    Mouse::new(&mut canvas)
        .press(100.0, 100.0)
        .drag(102.0, 101.0)
        .release(102.0, 101.0);
    assert_eq!(canvas.mode(), Mode::Zoom);
    assert_eq!(canvas.scale(), 1.0);

    Mouse::new(&mut canvas)
        .press(100.0, 100.0)
        .drag(300.0, 200.0)
        .release(300.0, 200.0);
    assert!((canvas.scale() - 6.0).abs() < 1e-12);
    assert_eq!(canvas.mode(), Mode::Select);
}

#[test]
fn test_right_press_leaves_other_modes() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    canvas.set_mode(Mode::Scroll);
    let view = canvas.map_from_scene(Point::new(10.0, 10.0));
    canvas.mouse_press(MouseEvent::new(view, Some(MouseButton::Right)));
    canvas.mouse_release(MouseEvent::new(view, Some(MouseButton::Right)));
    assert_eq!(canvas.mode(), Mode::Select);
}

#[test]
fn test_right_press_selects_unselected_item() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let a = canvas.add_item(rect_at(100.0, 100.0));
    let view = canvas.map_from_scene(Point::new(100.0, 100.0));
    canvas.mouse_press(MouseEvent::new(view, Some(MouseButton::Right)));
    canvas.mouse_release(MouseEvent::new(view, Some(MouseButton::Right)));
    assert_eq!(selected(&canvas), vec![a]);
}

#[test]
fn test_scroll_mode_drag_scrolls() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    canvas.set_mode(Mode::Scroll);
    canvas.mouse_press(MouseEvent::left(Point::new(600.0, 400.0)));
    canvas.mouse_move(MouseEvent::left(Point::new(600.0, 350.0)));
    canvas.mouse_release(MouseEvent::left(Point::new(600.0, 350.0)));
    assert_eq!(canvas.viewport().vertical().value, 50.0);
}

#[test]
fn test_middle_button_pans_on_ticks() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    assert_eq!(canvas.pending_pan_tick(), None);

    let middle = |x, y| MouseEvent::new(Point::new(x, y), Some(MouseButton::Middle));
    canvas.mouse_press(middle(600.0, 400.0));
    canvas.mouse_move(middle(600.0, 432.0));

    let generation = canvas.pending_pan_tick().unwrap();
    assert!(canvas.pan_tick(generation));
    assert!(canvas.pan_tick(generation));
    assert_eq!(canvas.viewport().vertical().value, 4.0);

    canvas.mouse_release(middle(600.0, 432.0));
    assert_eq!(canvas.pending_pan_tick(), None);
    assert!(!canvas.pan_tick(generation));
    assert_eq!(canvas.viewport().vertical().value, 4.0);
}

#[test]
fn test_selection_changes_are_published() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let a = canvas.add_item(rect_at(100.0, 100.0));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    canvas.events().subscribe(
        EventFilter::Categories(vec![EventCategory::Selection, EventCategory::Items]),
        move |event| sink.lock().unwrap().push(event),
    );

    Mouse::new(&mut canvas).click(100.0, 100.0);
    Mouse::new(&mut canvas).click(100.0, 100.0);
    Mouse::new(&mut canvas)
        .press(100.0, 100.0)
        .drag(150.0, 100.0)
        .release(150.0, 100.0);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![CanvasEvent::CurrentItemsChanged(vec![a]), CanvasEvent::ItemsChanged]
    );
}

#[test]
fn test_hover_reports_scene_position() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    Mouse::new(&mut canvas).hover(123.456, 78.9);
    assert!(canvas.mouse_info().starts_with("(123.46, 78.90)"));
}
