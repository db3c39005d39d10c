//! Rectangle and ellipse items carrying a caption.

use super::caption::Caption;
use super::{EllipseItem, ItemShape, PlacementPolicy, PointFlags, RectItem};
use crate::geometry::{Point, Rect};
use crate::outline::Outline;
use crate::properties::PropertyValue;
use crate::renderer::Painter;
use crate::style::Brush;
use crate::xml::{AttributeReader, AttributeWriter};

const DEFAULT_TEXT: &str = "Text";

/// Forwards the geometry half of [`ItemShape`] to the wrapped box item and
/// layers the caption on top for painting, persistence and properties.
macro_rules! captioned_shape {
    ($ty:ident, $inner:ident, $key:literal) => {
        impl $ty {
            pub fn new(rect: Rect, text: impl Into<String>) -> Self {
                Self {
                    shape: $inner::new(rect),
                    caption: Caption::new(text),
                }
            }

            pub fn shape_item(&self) -> &$inner {
                &self.shape
            }

            pub fn caption(&self) -> &Caption {
                &self.caption
            }

            pub fn set_caption(&mut self, caption: Caption) {
                self.caption = caption;
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                $ty::new(Rect::default(), DEFAULT_TEXT)
            }
        }

        impl ItemShape for $ty {
            fn key(&self) -> &'static str {
                $key
            }

            fn point_flags(&self) -> Vec<PointFlags> {
                self.shape.point_flags()
            }

            fn point_positions(&self) -> Vec<Point> {
                self.shape.point_positions()
            }

            fn resize_point(&mut self, index: usize, position: Point, snap45: bool) {
                self.shape.resize_point(index, position, snap45);
            }

            fn translate(&mut self, delta: Point) {
                self.shape.translate(delta);
            }

            fn scale(&mut self, factor: f64) {
                self.shape.scale(factor);
                self.caption.scale(factor);
            }

            fn bounding_rect(&self) -> Rect {
                self.shape.bounding_rect()
            }

            fn shape(&self) -> &Outline {
                self.shape.shape()
            }

            fn center(&self) -> Point {
                self.shape.center()
            }

            fn is_valid(&self) -> bool {
                self.shape.is_valid()
            }

            fn paint(&self, painter: &mut dyn Painter, background: &Brush) {
                self.shape.paint(painter, background);
                self.caption.paint(painter, self.text_rect());
            }

            fn write_attributes(&self, writer: &mut AttributeWriter) {
                self.shape.write_attributes(writer);
                self.caption.write_attributes(writer, DEFAULT_TEXT);
            }

            fn read_attributes(&mut self, reader: &AttributeReader) {
                self.shape.read_attributes(reader);
                self.caption.read_attributes(reader, DEFAULT_TEXT);
            }

            fn property(&self, name: &str) -> Option<PropertyValue> {
                self.shape
                    .property(name)
                    .or_else(|| self.caption.property(name))
            }

            fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool {
                self.shape.set_property(name, value) || self.caption.set_property(name, value)
            }

            fn property_names(&self) -> Vec<&'static str> {
                let mut names = self.shape.property_names();
                names.extend(Caption::property_names());
                names
            }

            fn placement_policy(&self) -> PlacementPolicy {
                self.shape.placement_policy()
            }

            fn place_resize_index(&self) -> Option<usize> {
                self.shape.place_resize_index()
            }
        }
    };
}

/// Rectangle with a caption laid out inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRectItem {
    shape: RectItem,
    caption: Caption,
}

impl TextRectItem {
    fn text_rect(&self) -> Rect {
        self.shape.rect().normalized()
    }
}

captioned_shape!(TextRectItem, RectItem, "textRect");

/// Ellipse with a caption laid out inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEllipseItem {
    shape: EllipseItem,
    caption: Caption,
}

impl TextEllipseItem {
    fn text_rect(&self) -> Rect {
        self.shape.ellipse().normalized()
    }
}

captioned_shape!(TextEllipseItem, EllipseItem, "textEllipse");
