//! Item properties.
//!
//! Items expose their editable attributes by name as a [`PropertyValue`].
//! Each item type keeps a static table of [`Accessor`]s; looking a name up
//! in the table yields the getter and setter. Setting an unknown name, or a
//! value of the wrong type, does nothing.

use crate::arrow::Arrow;
use crate::style::{Alignment, Brush, Color, Font, Pen};

pub const PEN: &str = "pen";
pub const BRUSH: &str = "brush";
pub const START_ARROW: &str = "startArrow";
pub const END_ARROW: &str = "endArrow";
pub const CORNER_RADIUS: &str = "cornerRadius";
pub const FONT: &str = "font";
pub const TEXT_COLOR: &str = "textColor";
pub const TEXT_ALIGNMENT: &str = "textAlignment";
pub const CAPTION: &str = "caption";

/// Tagged property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    Bool(bool),
    String(String),
    Color(Color),
    Pen(Pen),
    Brush(Brush),
    Arrow(Arrow),
    Font(Font),
    Alignment(Alignment),
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Number(_) => "number",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::String(_) => "string",
            PropertyValue::Color(_) => "color",
            PropertyValue::Pen(_) => "pen",
            PropertyValue::Brush(_) => "brush",
            PropertyValue::Arrow(_) => "arrow",
            PropertyValue::Font(_) => "font",
            PropertyValue::Alignment(_) => "alignment",
        }
    }
}

/// Conversion out of a [`PropertyValue`] of the matching tag.
pub trait FromProperty: Sized {
    fn from_property(value: &PropertyValue) -> Option<Self>;
}

macro_rules! impl_from_property {
    ($ty:ty, $variant:ident) => {
        impl FromProperty for $ty {
            fn from_property(value: &PropertyValue) -> Option<Self> {
                match value {
                    PropertyValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }

        impl From<$ty> for PropertyValue {
            fn from(v: $ty) -> Self {
                PropertyValue::$variant(v)
            }
        }
    };
}

impl_from_property!(f64, Number);
impl_from_property!(bool, Bool);
impl_from_property!(String, String);
impl_from_property!(Color, Color);
impl_from_property!(Pen, Pen);
impl_from_property!(Brush, Brush);
impl_from_property!(Arrow, Arrow);
impl_from_property!(Font, Font);
impl_from_property!(Alignment, Alignment);

/// Named getter/setter pair for a property of `T`.
pub struct Accessor<T> {
    pub name: &'static str,
    pub get: fn(&T) -> PropertyValue,
    pub set: fn(&mut T, &PropertyValue) -> bool,
}

/// Convert `value` and hand it to `apply`. Returns false on a type mismatch.
pub fn apply<V: FromProperty>(value: &PropertyValue, apply: impl FnOnce(V)) -> bool {
    match V::from_property(value) {
        Some(v) => {
            apply(v);
            true
        }
        None => false,
    }
}

/// Read a property through an accessor table.
pub fn get<T>(table: &[Accessor<T>], target: &T, name: &str) -> Option<PropertyValue> {
    table
        .iter()
        .find(|accessor| accessor.name == name)
        .map(|accessor| (accessor.get)(target))
}

/// Write a property through an accessor table. Returns true when the name
/// was found and the value had the expected type.
pub fn set<T>(table: &[Accessor<T>], target: &mut T, name: &str, value: &PropertyValue) -> bool {
    table
        .iter()
        .find(|accessor| accessor.name == name)
        .is_some_and(|accessor| (accessor.set)(target, value))
}

/// Names listed in an accessor table.
pub fn names<T>(table: &[Accessor<T>]) -> Vec<&'static str> {
    table.iter().map(|accessor| accessor.name).collect()
}
