//! Interaction and geometry constants shared across crates.

/// Manhattan distance in view pixels a press must travel before it becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 4.0;

/// Minimum stroke width in view pixels used when hit-testing thin items.
pub const MIN_HIT_PEN_WIDTH_PX: f64 = 8.0;

/// Side length in view pixels of a drawn selection handle.
pub const HANDLE_SIZE_PX: f64 = 8.0;

/// Distance within which points connect during live interaction.
pub const CONNECT_EPSILON: f64 = 1e-6;

/// Distance within which points connect when a batch is loaded from a document.
pub const LOAD_CONNECT_EPSILON: f64 = 0.01;

/// Width substituted for zero-width pens when stroking outlines.
pub const MIN_STROKE_WIDTH: f64 = 1e-6;

/// Interval between middle-button pan ticks.
pub const PAN_INTERVAL_MS: u64 = 16;

/// Divisor applied to the press-to-cursor offset on every pan tick.
pub const PAN_DIVISOR: f64 = 16.0;

/// Factor applied by a single zoom-in or zoom-out step.
pub const ZOOM_STEP: f64 = 1.25;

/// Smallest allowed view scale.
pub const MIN_SCALE: f64 = 1e-4;

/// Largest allowed view scale.
pub const MAX_SCALE: f64 = 1e4;

/// Approximate glyph advance as a fraction of the font size.
pub const GLYPH_ADVANCE_EM: f64 = 0.6;

/// Approximate line height as a fraction of the font size.
pub const LINE_HEIGHT_EM: f64 = 1.2;

/// View pixels scrolled by one wheel notch.
pub const WHEEL_SCROLL_PX: f64 = 48.0;

/// Grid lines or dots closer together than this many view pixels are not drawn.
pub const MIN_GRID_SPACING_PX: f64 = 4.0;
