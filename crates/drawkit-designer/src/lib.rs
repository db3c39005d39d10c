//! # Drawkit Designer
//!
//! Scene model and interaction engine for a vector diagram editor.
//!
//! ## Core Components
//!
//! - **Items** ([`model`]): lines, curves, polylines, polygons, rectangles,
//!   ellipses and text boxes. Each item owns its control points, pen, brush
//!   and a position/rotation/flip placement in the scene.
//! - **Connections** ([`connections`]): coincident points of different items
//!   are linked, and linked points follow each other when items move.
//! - **Canvas** ([`canvas`]): item store, selection, page settings and the
//!   mouse state machine for select, scroll, zoom and place modes.
//! - **Viewport** ([`viewport`]): scale, scroll and scene/view mapping.
//! - **Persistence** ([`xml`], [`factory`]): item batches read and written
//!   as XML, with connections rebuilt on load.
//! - **Rendering** ([`renderer`]): items draw themselves through the
//!   [`Painter`] trait; [`RecordingPainter`] captures draw calls.
//!
//! ## Architecture
//!
//! ```text
//! canvas ──┬── selection_manager
//!          ├── viewport
//!          ├── factory ── xml
//!          ├── aggregator ── properties
//!          └── connections ── model ── outline, arrow, style, geometry
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drawkit_designer::{Canvas, Mode, MouseEvent, Point};
//!
//! let mut canvas = Canvas::new(1200.0, 800.0);
//! canvas.start_place_key("line");
//! let view = canvas.map_from_scene(Point::new(100.0, 100.0));
//! canvas.mouse_press(MouseEvent::left(view));
//! canvas.mouse_release(MouseEvent::left(view));
//! assert_eq!(canvas.item_count(), 1);
//! ```

pub mod aggregator;
pub mod arrow;
pub mod canvas;
pub mod connections;
pub mod factory;
pub mod geometry;
pub mod model;
pub mod outline;
pub mod properties;
pub mod renderer;
pub mod selection_manager;
pub mod style;
pub mod viewport;
pub mod xml;

pub use aggregator::{Common, PropertyEdit};
pub use arrow::{Arrow, ArrowStyle};
pub use canvas::{
    Canvas, CanvasEvent, CanvasSettings, Mode, Modifiers, MouseButton, MouseEvent, PageSettings,
    SelectState,
};
pub use factory::ItemFactory;
pub use geometry::{Point, Rect, Transform};
pub use model::{DrawingItem, ItemId, ItemKind, ItemPoint, PlacementPolicy, PointId, PointRef};
pub use properties::PropertyValue;
pub use renderer::{DrawCommand, Painter, RecordingPainter};
pub use selection_manager::SelectionManager;
pub use style::{Alignment, Brush, Color, Font, HorizontalAlignment, Pen, PenStyle, VerticalAlignment};
pub use viewport::Viewport;
