//! Free-standing text label.

use super::caption::Caption;
use super::{ItemShape, PointFlags, ShapeCache};
use crate::geometry::{Cached, Point, Rect};
use crate::outline::Outline;
use crate::properties::PropertyValue;
use crate::renderer::Painter;
use crate::style::Brush;
use crate::xml::{AttributeReader, AttributeWriter};

const DEFAULT_TEXT: &str = "Label";

/// Text laid out about a single anchor, which is also its connection point.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    anchor: Point,
    caption: Caption,
    cache: Cached<ShapeCache>,
}

impl TextItem {
    pub fn new(text: impl Into<String>) -> Self {
        let mut item = Self {
            anchor: Point::zero(),
            caption: Caption::new(text),
            cache: Cached::default(),
        };
        item.update_geometry();
        item
    }

    pub fn caption(&self) -> &Caption {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: Caption) {
        self.caption = caption;
        self.update_geometry();
    }

    pub fn text(&self) -> &str {
        &self.caption.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.caption.text = text.into();
        self.update_geometry();
    }

    fn update_geometry(&mut self) {
        let bounding = self.caption.rect_about(self.anchor);
        self.cache = Cached(ShapeCache {
            bounding,
            outline: Outline::from_rect(bounding),
        });
    }
}

impl Default for TextItem {
    fn default() -> Self {
        TextItem::new(DEFAULT_TEXT)
    }
}

impl ItemShape for TextItem {
    fn key(&self) -> &'static str {
        "text"
    }

    fn point_flags(&self) -> Vec<PointFlags> {
        vec![PointFlags::CONNECTION]
    }

    fn point_positions(&self) -> Vec<Point> {
        vec![self.anchor]
    }

    fn resize_point(&mut self, index: usize, position: Point, _snap45: bool) {
        if index == 0 {
            self.anchor = position;
            self.update_geometry();
        }
    }

    fn translate(&mut self, delta: Point) {
        self.anchor = self.anchor + delta;
        self.update_geometry();
    }

    fn scale(&mut self, factor: f64) {
        self.anchor = self.anchor * factor;
        self.caption.scale(factor);
        self.update_geometry();
    }

    fn bounding_rect(&self) -> Rect {
        self.cache.bounding
    }

    fn shape(&self) -> &Outline {
        &self.cache.outline
    }

    fn center(&self) -> Point {
        self.anchor
    }

    fn is_valid(&self) -> bool {
        !self.caption.text.is_empty()
    }

    fn paint(&self, painter: &mut dyn Painter, _background: &Brush) {
        painter.set_brush(Brush::none());
        self.caption.paint(painter, self.cache.bounding);
    }

    fn write_attributes(&self, writer: &mut AttributeWriter) {
        self.caption.write_attributes(writer, DEFAULT_TEXT);
    }

    fn read_attributes(&mut self, reader: &AttributeReader) {
        self.anchor = Point::zero();
        self.caption.read_attributes(reader, DEFAULT_TEXT);
        self.update_geometry();
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        self.caption.property(name)
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool {
        let changed = self.caption.set_property(name, value);
        if changed {
            self.update_geometry();
        }
        changed
    }

    fn property_names(&self) -> Vec<&'static str> {
        Caption::property_names()
    }
}
