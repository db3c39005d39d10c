//! Editing one property across a heterogeneous selection.
//!
//! A property editor usually changes a single field of a compound value (the
//! width of a pen, the size of a font). Each selected item keeps its other
//! fields, so the edit is applied as read-modify-write per item rather than
//! by broadcasting one whole value. Items that do not carry the property are
//! left alone.

use crate::arrow::ArrowStyle;
use crate::model::{DrawingItem, ItemId};
use crate::properties::{self, PropertyValue};
use crate::style::{Color, HorizontalAlignment, PenStyle, VerticalAlignment};

/// Agreement of a property across several items.
#[derive(Debug, Clone, PartialEq)]
pub enum Common<T> {
    /// No item carries the property.
    None,
    /// Every item carrying the property has this value.
    Uniform(T),
    /// The items disagree.
    Mixed,
}

impl<T: PartialEq> Common<T> {
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let mut common = Common::None;
        for value in values {
            common = match common {
                Common::None => Common::Uniform(value),
                Common::Uniform(current) if current == value => Common::Uniform(current),
                _ => return Common::Mixed,
            };
        }
        common
    }

    pub fn uniform(&self) -> Option<&T> {
        match self {
            Common::Uniform(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Common::Mixed)
    }
}

/// A single-field change to a named property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    /// Replace the whole value.
    Set(&'static str, PropertyValue),
    PenColor(Color),
    PenWidth(f64),
    PenStyle(PenStyle),
    BrushColor(Color),
    StartArrowStyle(ArrowStyle),
    StartArrowSize(f64),
    EndArrowStyle(ArrowStyle),
    EndArrowSize(f64),
    CornerRadius(f64),
    Caption(String),
    FontFamily(String),
    FontSize(f64),
    FontBold(bool),
    FontItalic(bool),
    FontUnderline(bool),
    FontStrikeOut(bool),
    TextColor(Color),
    HorizontalAlignment(HorizontalAlignment),
    VerticalAlignment(VerticalAlignment),
}

impl PropertyEdit {
    /// Name of the property this edit touches.
    pub fn property_name(&self) -> &'static str {
        match self {
            PropertyEdit::Set(name, _) => *name,
            PropertyEdit::PenColor(_) | PropertyEdit::PenWidth(_) | PropertyEdit::PenStyle(_) => {
                properties::PEN
            }
            PropertyEdit::BrushColor(_) => properties::BRUSH,
            PropertyEdit::StartArrowStyle(_) | PropertyEdit::StartArrowSize(_) => {
                properties::START_ARROW
            }
            PropertyEdit::EndArrowStyle(_) | PropertyEdit::EndArrowSize(_) => {
                properties::END_ARROW
            }
            PropertyEdit::CornerRadius(_) => properties::CORNER_RADIUS,
            PropertyEdit::Caption(_) => properties::CAPTION,
            PropertyEdit::FontFamily(_)
            | PropertyEdit::FontSize(_)
            | PropertyEdit::FontBold(_)
            | PropertyEdit::FontItalic(_)
            | PropertyEdit::FontUnderline(_)
            | PropertyEdit::FontStrikeOut(_) => properties::FONT,
            PropertyEdit::TextColor(_) => properties::TEXT_COLOR,
            PropertyEdit::HorizontalAlignment(_) | PropertyEdit::VerticalAlignment(_) => {
                properties::TEXT_ALIGNMENT
            }
        }
    }

    /// The value `current` becomes under this edit, or `None` when the edit
    /// does not fit the value's type.
    pub fn apply_to(&self, current: &PropertyValue) -> Option<PropertyValue> {
        let value = match (self, current.clone()) {
            (PropertyEdit::Set(_, value), _) => value.clone(),
            (PropertyEdit::PenColor(c), PropertyValue::Pen(mut pen)) => {
                pen.color = *c;
                PropertyValue::Pen(pen)
            }
            (PropertyEdit::PenWidth(w), PropertyValue::Pen(mut pen)) => {
                pen.width = w.max(0.0);
                PropertyValue::Pen(pen)
            }
            (PropertyEdit::PenStyle(s), PropertyValue::Pen(mut pen)) => {
                pen.style = *s;
                PropertyValue::Pen(pen)
            }
            (PropertyEdit::BrushColor(c), PropertyValue::Brush(mut brush)) => {
                brush.color = *c;
                PropertyValue::Brush(brush)
            }
            (
                PropertyEdit::StartArrowStyle(s) | PropertyEdit::EndArrowStyle(s),
                PropertyValue::Arrow(mut arrow),
            ) => {
                arrow.set_style(*s);
                PropertyValue::Arrow(arrow)
            }
            (
                PropertyEdit::StartArrowSize(size) | PropertyEdit::EndArrowSize(size),
                PropertyValue::Arrow(mut arrow),
            ) => {
                arrow.set_size(*size);
                PropertyValue::Arrow(arrow)
            }
            (PropertyEdit::CornerRadius(r), PropertyValue::Number(_)) => PropertyValue::Number(*r),
            (PropertyEdit::Caption(text), PropertyValue::String(_)) => {
                PropertyValue::String(text.clone())
            }
            (PropertyEdit::FontFamily(family), PropertyValue::Font(mut font)) => {
                font.family = family.clone();
                PropertyValue::Font(font)
            }
            (PropertyEdit::FontSize(size), PropertyValue::Font(mut font)) => {
                if *size <= 0.0 {
                    return None;
                }
                font.size = *size;
                PropertyValue::Font(font)
            }
            (PropertyEdit::FontBold(on), PropertyValue::Font(mut font)) => {
                font.bold = *on;
                PropertyValue::Font(font)
            }
            (PropertyEdit::FontItalic(on), PropertyValue::Font(mut font)) => {
                font.italic = *on;
                PropertyValue::Font(font)
            }
            (PropertyEdit::FontUnderline(on), PropertyValue::Font(mut font)) => {
                font.underline = *on;
                PropertyValue::Font(font)
            }
            (PropertyEdit::FontStrikeOut(on), PropertyValue::Font(mut font)) => {
                font.strike_out = *on;
                PropertyValue::Font(font)
            }
            (PropertyEdit::TextColor(c), PropertyValue::Color(_)) => PropertyValue::Color(*c),
            (PropertyEdit::HorizontalAlignment(h), PropertyValue::Alignment(mut alignment)) => {
                alignment.horizontal = *h;
                PropertyValue::Alignment(alignment)
            }
            (PropertyEdit::VerticalAlignment(v), PropertyValue::Alignment(mut alignment)) => {
                alignment.vertical = *v;
                PropertyValue::Alignment(alignment)
            }
            _ => return None,
        };
        Some(value)
    }
}

fn targets<'a>(
    items: &'a [DrawingItem],
    ids: &'a [ItemId],
) -> impl Iterator<Item = &'a DrawingItem> + 'a {
    items.iter().filter(move |item| ids.contains(&item.id()))
}

/// Calculates the per-item values an edit would produce without modifying
/// the items. Items without the property, or whose value would not change,
/// are left out.
pub fn calculate_updates(
    items: &[DrawingItem],
    ids: &[ItemId],
    edit: &PropertyEdit,
) -> Vec<(ItemId, PropertyValue)> {
    let name = edit.property_name();
    targets(items, ids)
        .filter_map(|item| {
            let current = item.property(name)?;
            let next = edit.apply_to(&current)?;
            (next != current).then_some((item.id(), next))
        })
        .collect()
}

/// Applies `edit` to every item in `ids`. Returns the ids of the items that
/// changed.
pub fn apply_edit(items: &mut [DrawingItem], ids: &[ItemId], edit: &PropertyEdit) -> Vec<ItemId> {
    let name = edit.property_name();
    let updates = calculate_updates(items, ids, edit);
    let mut changed = Vec::with_capacity(updates.len());
    for (id, value) in updates {
        if let Some(item) = items.iter_mut().find(|item| item.id() == id) {
            if item.set_property(name, &value) {
                changed.push(id);
            }
        }
    }
    tracing::debug!(
        "Edited {} on {} of {} item(s)",
        name,
        changed.len(),
        ids.len()
    );
    changed
}

/// Agreement of the named property across the items in `ids`.
pub fn common_property(items: &[DrawingItem], ids: &[ItemId], name: &str) -> Common<PropertyValue> {
    Common::from_values(targets(items, ids).filter_map(|item| item.property(name)))
}

/// Property names carried by every item in `ids`, in the order of the first
/// of them.
pub fn shared_property_names(items: &[DrawingItem], ids: &[ItemId]) -> Vec<&'static str> {
    let mut iter = targets(items, ids);
    let Some(first) = iter.next() else {
        return Vec::new();
    };
    let mut names = first.property_names();
    for item in iter {
        let other = item.property_names();
        names.retain(|name| other.contains(name));
    }
    names
}
