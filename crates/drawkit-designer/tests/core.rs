#[path = "core/canvas.rs"]
mod canvas;
#[path = "core/connections.rs"]
mod connections;
#[path = "core/interaction.rs"]
mod interaction;
#[path = "core/items.rs"]
mod items;
#[path = "core/line.rs"]
mod line;
#[path = "core/properties.rs"]
mod properties;
#[path = "core/viewport.rs"]
mod viewport;
#[path = "core/xml.rs"]
mod xml;
