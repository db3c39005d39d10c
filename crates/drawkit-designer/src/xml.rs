//! XML persistence of drawing items.
//!
//! Each item is one element named after its key; all data is carried in
//! attributes, and attributes equal to their default are omitted. Reading
//! is tolerant: a missing or malformed attribute falls back to the default
//! for that field. Only a document that is not well-formed is an error.

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::HashMap;

use drawkit_core::{Error, Result};

use crate::arrow::{Arrow, ArrowStyle};
use crate::geometry::Point;
use crate::style::{
    Alignment, Brush, Color, Font, HorizontalAlignment, Pen, PenStyle, VerticalAlignment,
};

/// Name of the element wrapping a batch of items.
pub const ITEMS_ELEMENT: &str = "items";

/// Collects the attributes of one item element.
#[derive(Debug, Clone, Default)]
pub struct AttributeWriter {
    attributes: Vec<(String, String)>,
}

impl AttributeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn into_attributes(self) -> Vec<(String, String)> {
        self.attributes
    }

    pub fn write(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.push((name.to_string(), value.into()));
    }

    pub fn write_f64(&mut self, name: &str, value: f64, default: f64) {
        if value != default {
            self.write(name, format_number(value));
        }
    }

    pub fn write_bool(&mut self, name: &str, value: bool, default: bool) {
        if value != default {
            self.write(name, if value { "true" } else { "false" });
        }
    }

    pub fn write_string(&mut self, name: &str, value: &str, default: &str) {
        if value != default {
            self.write(name, value);
        }
    }

    /// Colors equal to opaque black are omitted.
    pub fn write_color(&mut self, name: &str, color: Color) {
        if color != Color::black() {
            self.write(name, color.to_hex());
        }
    }

    /// Writes `{prefix}Color`, `{prefix}Width` and `{prefix}Style`.
    pub fn write_pen(&mut self, prefix: &str, pen: &Pen) {
        self.write_color(&format!("{}Color", prefix), pen.color);
        self.write_f64(&format!("{}Width", prefix), pen.width, 1.0);
        if pen.style != PenStyle::Solid {
            self.write(&format!("{}Style", prefix), pen.style.token());
        }
    }

    /// Brushes default to white; the white brush is omitted.
    pub fn write_brush(&mut self, prefix: &str, brush: &Brush) {
        if *brush != Brush::default() {
            self.write(&format!("{}Color", prefix), brush.color.to_hex());
        }
    }

    /// Writes `{prefix}Style` and `{prefix}Size`.
    pub fn write_arrow(&mut self, prefix: &str, arrow: &Arrow) {
        if arrow.style() != ArrowStyle::None {
            self.write(&format!("{}Style", prefix), arrow.style().token());
        }
        self.write_f64(&format!("{}Size", prefix), arrow.size(), Arrow::DEFAULT_SIZE);
    }

    pub fn write_font(&mut self, font: &Font) {
        let default = Font::default();
        self.write_string("fontFamily", &font.family, &default.family);
        self.write_f64("fontSize", font.size, default.size);
        self.write_bool("fontBold", font.bold, false);
        self.write_bool("fontItalic", font.italic, false);
        self.write_bool("fontUnderline", font.underline, false);
        self.write_bool("fontStrikeOut", font.strike_out, false);
    }

    pub fn write_alignment(&mut self, prefix: &str, alignment: &Alignment) {
        if alignment.horizontal != HorizontalAlignment::default() {
            self.write(
                &format!("{}Horizontal", prefix),
                alignment.horizontal.token(),
            );
        }
        if alignment.vertical != VerticalAlignment::default() {
            self.write(&format!("{}Vertical", prefix), alignment.vertical.token());
        }
    }

    /// Space-separated `x,y` pairs.
    pub fn write_points(&mut self, name: &str, points: &[Point]) {
        let text = points
            .iter()
            .map(|p| format!("{},{}", format_number(p.x), format_number(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        self.write(name, text);
    }
}

/// Attributes of one item element with typed, defaulting accessors.
#[derive(Debug, Clone, Default)]
pub struct AttributeReader {
    attributes: HashMap<String, String>,
}

impl AttributeReader {
    pub fn new(attributes: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            attributes: attributes.into_iter().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn f64_or(&self, name: &str, default: f64) -> f64 {
        self.get(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }

    pub fn i64_or(&self, name: &str, default: i64) -> i64 {
        self.get(name)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(default)
    }

    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        match self.get(name).map(str::trim) {
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            _ => default,
        }
    }

    pub fn string_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or(default).to_string()
    }

    pub fn color_or(&self, name: &str, default: Color) -> Color {
        self.get(name).and_then(Color::from_hex).unwrap_or(default)
    }

    pub fn pen(&self, prefix: &str) -> Pen {
        Pen::new(
            self.color_or(&format!("{}Color", prefix), Color::black()),
            self.f64_or(&format!("{}Width", prefix), 1.0).max(0.0),
            self.get(&format!("{}Style", prefix))
                .and_then(|s| s.parse().ok())
                .unwrap_or(PenStyle::Solid),
        )
    }

    pub fn brush(&self, prefix: &str) -> Brush {
        Brush::new(self.color_or(&format!("{}Color", prefix), Brush::default().color))
    }

    pub fn arrow(&self, prefix: &str) -> Arrow {
        Arrow::new(
            self.get(&format!("{}Style", prefix))
                .and_then(|s| s.parse().ok())
                .unwrap_or(ArrowStyle::None),
            self.f64_or(&format!("{}Size", prefix), Arrow::DEFAULT_SIZE),
        )
    }

    pub fn font(&self) -> Font {
        let default = Font::default();
        let size = self.f64_or("fontSize", default.size);
        Font {
            family: self.string_or("fontFamily", &default.family),
            size: if size > 0.0 { size } else { default.size },
            bold: self.bool_or("fontBold", false),
            italic: self.bool_or("fontItalic", false),
            underline: self.bool_or("fontUnderline", false),
            strike_out: self.bool_or("fontStrikeOut", false),
        }
    }

    pub fn alignment(&self, prefix: &str) -> Alignment {
        Alignment::new(
            self.get(&format!("{}Horizontal", prefix))
                .and_then(HorizontalAlignment::from_token)
                .unwrap_or_default(),
            self.get(&format!("{}Vertical", prefix))
                .and_then(VerticalAlignment::from_token)
                .unwrap_or_default(),
        )
    }

    /// Parse a point list. Returns `None` if the attribute is absent or any
    /// pair is malformed.
    pub fn points(&self, name: &str) -> Option<Vec<Point>> {
        self.get(name)?
            .split_whitespace()
            .map(|pair| {
                let (x, y) = pair.split_once(',')?;
                let x = x.parse::<f64>().ok().filter(|v| v.is_finite())?;
                let y = y.parse::<f64>().ok().filter(|v| v.is_finite())?;
                Some(Point::new(x, y))
            })
            .collect()
    }
}

/// One parsed item element.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attributes: AttributeReader,
}

/// Shortest decimal text that parses back to the same value.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Serialize item elements inside an `items` element.
pub fn write_document<'a>(
    elements: impl IntoIterator<Item = (&'a str, AttributeWriter)>,
) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let io = |e: std::io::Error| Error::other(format!("Failed to write XML: {}", e));

    writer
        .write_event(Event::Start(BytesStart::new(ITEMS_ELEMENT)))
        .map_err(io)?;
    for (name, attributes) in elements {
        let mut element = BytesStart::new(name);
        for (key, value) in attributes.attributes() {
            element.push_attribute((key.as_str(), value.as_str()));
        }
        writer.write_event(Event::Empty(element)).map_err(io)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(ITEMS_ELEMENT)))
        .map_err(io)?;

    String::from_utf8(writer.into_inner()).map_err(|e| Error::other(e.to_string()))
}

/// Parse the child elements of the document's root element.
///
/// Attributes that cannot be decoded are skipped. Elements nested deeper
/// than the item level are ignored.
pub fn read_document(xml: &str) -> Result<Vec<Element>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut elements = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::xml(reader.error_position(), e.to_string()))?;
        match event {
            Event::Start(e) => {
                if depth == 1 {
                    elements.push(element_from(&e));
                }
                depth += 1;
                saw_root = true;
            }
            Event::Empty(e) => {
                if depth == 1 {
                    elements.push(element_from(&e));
                }
                saw_root = true;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Text(t) if depth == 0 && !t.is_empty() => {
                return Err(Error::xml(
                    reader.buffer_position(),
                    "text outside of the root element",
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Error::xml(
            reader.buffer_position(),
            "unexpected end of document",
        ));
    }
    if !saw_root && !xml.trim().is_empty() {
        return Err(Error::xml(0, "no root element"));
    }

    Ok(elements)
}

fn element_from(start: &BytesStart<'_>) -> Element {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let attributes = start
        .attributes()
        .filter_map(|attr| match attr {
            Ok(attr) => {
                let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                match attr.unescape_value() {
                    Ok(value) => Some((key, value.into_owned())),
                    Err(e) => {
                        tracing::warn!("Skipping attribute {} on <{}>: {}", key, name, e);
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Skipping malformed attribute on <{}>: {}", name, e);
                None
            }
        })
        .collect::<Vec<_>>();
    Element {
        name,
        attributes: AttributeReader::new(attributes),
    }
}
