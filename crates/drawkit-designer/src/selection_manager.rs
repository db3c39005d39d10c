use std::collections::HashSet;

use crate::geometry::{Point, Rect};
use crate::model::{DrawingItem, ItemId};

/// Tracks which items are selected, in the order they were selected.
///
/// `SelectionManager` is responsible for:
/// - Keeping the ordered list of selected item ids
/// - Keeping each item's `selected` flag in step with that list
/// - Replacing, extending and toggling the selection from clicks
/// - Rubber-band selection of fully covered items
///
/// # Selection Model
///
/// The list is a view onto the canvas items, never an owner. Every id in it
/// names an item of the slice passed to the mutating calls; ids of items
/// that no longer exist are dropped by [`SelectionManager::retain_existing`].
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: Vec<ItemId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use drawkit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids, oldest selection first.
    pub fn ids(&self) -> &[ItemId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    /// The only selected item, if exactly one is selected.
    pub fn single(&self) -> Option<ItemId> {
        match self.selected.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Clears the selection and the `selected` flag of every item.
    pub fn deselect_all(&mut self, items: &mut [DrawingItem]) -> bool {
        let changed = !self.selected.is_empty();
        for item in items.iter_mut() {
            item.set_selected(false);
        }
        self.selected.clear();
        changed
    }

    /// Selects every item in z-order.
    pub fn select_all(&mut self, items: &mut [DrawingItem]) -> bool {
        let ids: Vec<ItemId> = items.iter().map(DrawingItem::id).collect();
        self.set(items, &ids)
    }

    /// Replaces the selection with `ids`. Unknown ids and duplicates are
    /// skipped. Returns true when the selection changed.
    pub fn set(&mut self, items: &mut [DrawingItem], ids: &[ItemId]) -> bool {
        let known: HashSet<ItemId> = items.iter().map(DrawingItem::id).collect();
        let mut next: Vec<ItemId> = Vec::with_capacity(ids.len());
        for id in ids {
            if known.contains(id) && !next.contains(id) {
                next.push(*id);
            }
        }
        if next == self.selected {
            return false;
        }
        for item in items.iter_mut() {
            item.set_selected(next.contains(&item.id()));
        }
        self.selected = next;
        true
    }

    /// Replaces the selection with the single item `id`.
    pub fn select(&mut self, items: &mut [DrawingItem], id: ItemId) -> bool {
        self.set(items, &[id])
    }

    /// Adds `id` to the selection.
    pub fn add(&mut self, items: &mut [DrawingItem], id: ItemId) -> bool {
        if self.contains(id) {
            return false;
        }
        let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        item.set_selected(true);
        self.selected.push(id);
        true
    }

    /// Adds `id` when it is not selected, removes it when it is.
    pub fn toggle(&mut self, items: &mut [DrawingItem], id: ItemId) -> bool {
        if !self.contains(id) {
            return self.add(items, id);
        }
        self.selected.retain(|s| *s != id);
        if let Some(item) = items.iter_mut().find(|item| item.id() == id) {
            item.set_selected(false);
        }
        true
    }

    /// Applies a click on `hit`.
    ///
    /// # Arguments
    ///
    /// * `items` - The canvas items
    /// * `hit` - The item under the cursor, if any
    /// * `additive` - Whether the additive modifier is held
    ///
    /// # Behavior
    ///
    /// - Additive: toggles `hit`; a click on empty space changes nothing
    /// - Otherwise: the selection becomes `hit` alone, or empty
    pub fn click(&mut self, items: &mut [DrawingItem], hit: Option<ItemId>, additive: bool) -> bool {
        match (hit, additive) {
            (Some(id), true) => self.toggle(items, id),
            (Some(id), false) => self.select(items, id),
            (None, true) => false,
            (None, false) => self.deselect_all(items),
        }
    }

    /// Selects the items whose scene bounding rect lies fully inside `band`.
    ///
    /// With `additive` the covered items are added to the current selection,
    /// otherwise they replace it.
    pub fn select_in_rect(&mut self, items: &mut [DrawingItem], band: Rect, additive: bool) -> bool {
        let band = band.normalized();
        let covered: Vec<ItemId> = items
            .iter()
            .filter(|item| band.contains_rect(&item.scene_bounding_rect()))
            .map(DrawingItem::id)
            .collect();
        if additive {
            let mut ids = self.selected.clone();
            ids.extend(covered);
            self.set(items, &ids)
        } else {
            self.set(items, &covered)
        }
    }

    /// Drops ids whose item is no longer in `items`.
    pub fn retain_existing(&mut self, items: &[DrawingItem]) -> bool {
        let before = self.selected.len();
        self.selected
            .retain(|id| items.iter().any(|item| item.id() == *id));
        before != self.selected.len()
    }

    /// Union of the scene bounding rects of the selected items.
    pub fn bounding_rect(&self, items: &[DrawingItem]) -> Option<Rect> {
        items
            .iter()
            .filter(|item| self.contains(item.id()))
            .map(DrawingItem::scene_bounding_rect)
            .reduce(|a, b| a.united(&b))
    }

    /// Center of the selection's bounding rect.
    pub fn center(&self, items: &[DrawingItem]) -> Option<Point> {
        self.bounding_rect(items).map(|r| r.center())
    }
}
