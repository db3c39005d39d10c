use drawkit_designer::canvas::{Canvas, Modifiers};
use drawkit_designer::geometry::{Point, Rect};
use drawkit_designer::viewport::Viewport;

#[test]
fn test_default_view_centers_narrow_axis() {
    let canvas = Canvas::new(1200.0, 800.0);
    // 1000 wide scene in a 1200 wide view: 100 px margin on each side
    assert_eq!(canvas.map_from_scene(Point::new(0.0, 0.0)), Point::new(100.0, 0.0));
    assert_eq!(canvas.viewport().horizontal().maximum, 0.0);
    assert_eq!(canvas.viewport().vertical().maximum, 200.0);
}

#[test]
fn test_wheel_scrolls_vertically_then_horizontally() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    canvas.wheel(Point::new(600.0, 400.0), -1.0, Modifiers::default());
    assert_eq!(canvas.viewport().vertical().value, 48.0);

    canvas.wheel(Point::new(600.0, 400.0), 10.0, Modifiers::default());
    assert_eq!(canvas.viewport().vertical().value, 0.0);

    canvas.set_scale(2.0);
    let before = canvas.viewport().horizontal().value;
    let shift = Modifiers {
        ctrl: false,
        shift: true,
    };
    canvas.wheel(Point::new(600.0, 400.0), -1.0, shift);
    assert_eq!(canvas.viewport().horizontal().value, before + 48.0);
}

#[test]
fn test_ctrl_wheel_zooms_about_cursor() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    let cursor = Point::new(600.0, 400.0);
    let anchor = canvas.map_to_scene(cursor);

    let ctrl = Modifiers {
        ctrl: true,
        shift: false,
    };
    canvas.wheel(cursor, 1.0, ctrl);
    assert!((canvas.scale() - 1.25).abs() < 1e-12);
    assert!(canvas.map_to_scene(cursor).approx_eq(&anchor, 1e-9));

    canvas.wheel(cursor, -1.0, ctrl);
    assert!((canvas.scale() - 1.0).abs() < 1e-12);
}

#[test]
fn test_zoom_fit_shows_whole_scene() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    canvas.set_scale(3.0);
    canvas.zoom_fit();
    assert!((canvas.scale() - 0.8).abs() < 1e-12);
    let visible = canvas.viewport().visible_scene_rect();
    assert!(visible.left() < 1e-6 && visible.top() < 1e-6);
    assert!(visible.right() > 1000.0 - 1e-6 && visible.bottom() > 1000.0 - 1e-6);
}

#[test]
fn test_resize_view_keeps_center() {
    let mut viewport = Viewport::new(400.0, 300.0, Rect::new(0.0, 0.0, 2000.0, 2000.0));
    viewport.center_on(Point::new(1000.0, 1000.0));
    viewport.set_view_size(600.0, 500.0);
    let center = viewport.map_to_scene(Point::new(300.0, 250.0));
    assert!(center.approx_eq(&Point::new(1000.0, 1000.0), 1e-9));
}

#[test]
fn test_scene_rect_change_updates_viewport() {
    let mut canvas = Canvas::new(1200.0, 800.0);
    canvas.set_scene_rect(Rect::new(-500.0, -500.0, 3000.0, 3000.0));
    assert_eq!(canvas.viewport().scene_rect(), Rect::new(-500.0, -500.0, 3000.0, 3000.0));
    assert_eq!(canvas.viewport().horizontal().maximum, 1800.0);
    assert_eq!(canvas.map_from_scene(Point::new(-500.0, -500.0)), Point::new(0.0, 0.0));
}
