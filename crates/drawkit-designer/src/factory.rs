//! Item registry, default properties and batch operations.
//!
//! The factory is owned by the session and handed to whoever creates or
//! loads items. It holds one prototype per item key and a map of property
//! defaults applied to every item it creates.

use std::collections::{BTreeMap, HashMap};

use drawkit_core::constants::LOAD_CONNECT_EPSILON;
use drawkit_core::Result;

use crate::connections;
use crate::model::{DrawingItem, ItemId, ItemKind, PointRef};
use crate::properties::PropertyValue;
use crate::xml::{self, AttributeWriter};

#[derive(Debug, Clone, Default)]
pub struct ItemFactory {
    prototypes: BTreeMap<String, DrawingItem>,
    defaults: BTreeMap<String, PropertyValue>,
}

impl ItemFactory {
    /// Empty factory; nothing can be created until prototypes are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory with every built-in item type registered.
    pub fn with_standard_items() -> Self {
        let mut factory = Self::new();
        for kind in ItemKind::prototypes() {
            factory.register(DrawingItem::new(kind));
        }
        factory
    }

    /// Register `prototype` under its key, replacing any earlier one.
    pub fn register(&mut self, prototype: DrawingItem) {
        self.prototypes
            .insert(prototype.key().to_string(), prototype);
    }

    pub fn keys(&self) -> Vec<&str> {
        self.prototypes.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.prototypes.contains_key(key)
    }

    pub fn set_default_property(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.defaults.insert(name.into(), value);
    }

    pub fn default_property(&self, name: &str) -> Option<&PropertyValue> {
        self.defaults.get(name)
    }

    pub fn clear_default_properties(&mut self) {
        self.defaults.clear();
    }

    /// New item cloned from the prototype for `key`, with the default
    /// properties applied. Defaults an item does not understand are skipped.
    pub fn create(&self, key: &str) -> Option<DrawingItem> {
        let mut item = self.prototypes.get(key)?.duplicate();
        for (name, value) in &self.defaults {
            item.set_property(name, value);
        }
        Some(item)
    }

    /// Deep copies of `items` with fresh identities. Connections between
    /// members of the batch are carried over to the copies; connections to
    /// items outside the batch are dropped.
    pub fn clone_items(items: &[DrawingItem]) -> Vec<DrawingItem> {
        let mut remap: HashMap<ItemId, ItemId> = HashMap::with_capacity(items.len());
        let mut copies: Vec<DrawingItem> = Vec::with_capacity(items.len());
        for item in items {
            let copy = item.duplicate();
            remap.insert(item.id(), copy.id());
            copies.push(copy);
        }

        for (original, copy) in items.iter().zip(copies.iter_mut()) {
            for (source, target) in original.points().iter().zip(copy.points_mut()) {
                for link in source.connections() {
                    if let Some(new_item) = remap.get(&link.item) {
                        target.add_connection(PointRef::new(*new_item, link.point));
                    }
                }
            }
        }
        copies
    }

    /// Serialize `items` as an `items` document. Items that fail
    /// [`DrawingItem::is_valid`] are left out.
    pub fn write_items_to_string(items: &[DrawingItem]) -> Result<String> {
        let mut skipped = 0usize;
        let elements: Vec<(&str, AttributeWriter)> = items
            .iter()
            .filter(|item| {
                let valid = item.is_valid();
                if !valid {
                    skipped += 1;
                }
                valid
            })
            .map(|item| {
                let mut writer = AttributeWriter::new();
                item.write_attributes(&mut writer);
                (item.key(), writer)
            })
            .collect();
        if skipped > 0 {
            tracing::debug!("Skipped {} invalid item(s) while writing", skipped);
        }
        xml::write_document(elements)
    }

    /// Parse an `items` document. Unknown element names are skipped with a
    /// warning. Points of the loaded items that coincide are reconnected.
    pub fn read_items_from_string(&self, text: &str) -> Result<Vec<DrawingItem>> {
        let mut items = Vec::new();
        for element in xml::read_document(text)? {
            let Some(prototype) = self.prototypes.get(&element.name) else {
                tracing::warn!("Skipping unknown item type <{}>", element.name);
                continue;
            };
            let mut item = prototype.duplicate();
            item.read_attributes(&element.attributes);
            items.push(item);
        }

        let ids: Vec<ItemId> = items.iter().map(DrawingItem::id).collect();
        connections::resolve(&mut items, &ids, LOAD_CONNECT_EPSILON);
        tracing::debug!("Read {} item(s)", items.len());
        Ok(items)
    }
}
