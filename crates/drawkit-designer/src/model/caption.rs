//! Text carried by text items.

use drawkit_core::constants::{GLYPH_ADVANCE_EM, LINE_HEIGHT_EM};

use crate::geometry::{Point, Rect};
use crate::properties::{self, apply, Accessor, PropertyValue};
use crate::renderer::Painter;
use crate::style::{Alignment, Color, Font, HorizontalAlignment, Pen, VerticalAlignment};
use crate::xml::{AttributeReader, AttributeWriter};

/// Caption text with its font, color and alignment.
///
/// Text extents use a fixed-advance estimate of the font metrics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Caption {
    pub text: String,
    pub font: Font,
    pub color: Color,
    pub alignment: Alignment,
}

pub(crate) static CAPTION_PROPERTIES: &[Accessor<Caption>] = &[
    Accessor {
        name: properties::CAPTION,
        get: |c| PropertyValue::String(c.text.clone()),
        set: |c, v| apply(v, |text| c.text = text),
    },
    Accessor {
        name: properties::FONT,
        get: |c| PropertyValue::Font(c.font.clone()),
        set: |c, v| apply(v, |font| c.font = font),
    },
    Accessor {
        name: properties::TEXT_COLOR,
        get: |c| PropertyValue::Color(c.color),
        set: |c, v| apply(v, |color| c.color = color),
    },
    Accessor {
        name: properties::TEXT_ALIGNMENT,
        get: |c| PropertyValue::Alignment(c.alignment),
        set: |c, v| apply(v, |alignment| c.alignment = alignment),
    },
];

impl Caption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Estimated width and height of the laid-out text.
    pub fn text_size(&self) -> (f64, f64) {
        let lines: Vec<&str> = self.text.split('\n').collect();
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        (
            longest as f64 * GLYPH_ADVANCE_EM * self.font.size,
            lines.len() as f64 * LINE_HEIGHT_EM * self.font.size,
        )
    }

    /// Text rectangle placed relative to `anchor` according to the
    /// alignment: left-aligned text starts at the anchor, centered text is
    /// centered on it, right-aligned text ends at it.
    pub fn rect_about(&self, anchor: Point) -> Rect {
        let (w, h) = self.text_size();
        let x = match self.alignment.horizontal {
            HorizontalAlignment::Left => anchor.x,
            HorizontalAlignment::Center => anchor.x - w / 2.0,
            HorizontalAlignment::Right => anchor.x - w,
        };
        let y = match self.alignment.vertical {
            VerticalAlignment::Top => anchor.y,
            VerticalAlignment::Center => anchor.y - h / 2.0,
            VerticalAlignment::Bottom => anchor.y - h,
        };
        Rect::new(x, y, w, h)
    }

    pub fn paint(&self, painter: &mut dyn Painter, rect: Rect) {
        if self.text.is_empty() {
            return;
        }
        painter.set_font(self.font.clone());
        painter.set_pen(Pen::solid(self.color, 1.0));
        painter.draw_text(rect, self.alignment, &self.text);
    }

    pub fn scale(&mut self, factor: f64) {
        self.font.size *= factor;
    }

    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        properties::get(CAPTION_PROPERTIES, self, name)
    }

    pub fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool {
        properties::set(CAPTION_PROPERTIES, self, name, value)
    }

    pub fn property_names() -> Vec<&'static str> {
        properties::names(CAPTION_PROPERTIES)
    }

    /// Writes the caption text unless it equals `default_text`.
    pub fn write_attributes(&self, writer: &mut AttributeWriter, default_text: &str) {
        writer.write_string("caption", &self.text, default_text);
        writer.write_font(&self.font);
        writer.write_color("textColor", self.color);
        writer.write_alignment("textAlignment", &self.alignment);
    }

    pub fn read_attributes(&mut self, reader: &AttributeReader, default_text: &str) {
        self.text = reader.string_or("caption", default_text);
        self.font = reader.font();
        self.color = reader.color_or("textColor", Color::black());
        self.alignment = reader.alignment("textAlignment");
    }
}
