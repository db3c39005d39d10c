//! # Drawkit
//!
//! A 2D vector drawing editor core: scene items with quarter-turn placement,
//! a connection graph between item points, and the mouse interaction state
//! machine that edits them.
//!
//! ## Architecture
//!
//! Drawkit is organized as a workspace with multiple crates:
//!
//! 1. **drawkit-core** - Units, errors, constants, grid styles, event bus
//! 2. **drawkit-settings** - Drawing configuration persisted as JSON or TOML
//! 3. **drawkit-designer** - Items, connections, XML persistence, viewport, canvas
//! 4. **drawkit** - Session assembly from configuration and a command-line driver

pub mod session;

pub use drawkit_core::{Error, GridStyle, Result, Unit};
pub use drawkit_designer as designer;
pub use drawkit_designer::{
    Canvas, CanvasEvent, CanvasSettings, DrawingItem, ItemFactory, Mode, PageSettings, Painter,
    RecordingPainter,
};
pub use drawkit_settings::{default_config_path, DrawingConfig};
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Installs a `tracing-subscriber` registry reading `RUST_LOG`, falling back
/// to `info`, with a pretty console layer.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
