use std::collections::HashMap;

use crate::{Item, ItemCategory};

/// Stable handle to a registry slot. Ids are never reused within one
/// playfield, so a ray can keep pointing at its source lantern across
/// arbitrary remove/add sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(usize);

/// Ordered collection of placed items.
///
/// Slots are tombstoned on removal instead of shifted, keeping ids stable;
/// a cell index maintained alongside gives O(1) occupancy lookups. Category
/// counts are recomputed from the live slots at call time so they can never
/// drift from the registry contents.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    slots: Vec<Option<Item>>,
    by_cell: HashMap<(usize, usize), ItemId>,
}

impl ItemRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item, returning its id. The cell must be free; the
    /// placement validator checks that before calling.
    pub fn insert(&mut self, item: Item) -> ItemId {
        let id = ItemId(self.slots.len());
        let previous = self.by_cell.insert((item.row, item.col), id);
        debug_assert!(previous.is_none());
        self.slots.push(Some(item));
        id
    }

    /// Tombstones the item at the given cell and returns it.
    pub fn remove_at(&mut self, row: usize, col: usize) -> Option<Item> {
        let ItemId(index) = self.by_cell.remove(&(row, col))?;
        self.slots[index].take()
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    #[must_use]
    pub fn id_at(&self, row: usize, col: usize) -> Option<ItemId> {
        self.by_cell.get(&(row, col)).copied()
    }

    /// Live items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| Some((ItemId(index), slot.as_ref()?)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ItemId, &mut Item)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| Some((ItemId(index), slot.as_mut()?)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live items in the given budget category, counted on demand.
    #[must_use]
    pub fn category_count(&self, category: ItemCategory) -> usize {
        self.iter()
            .filter(|(_, item)| item.kind.category() == category)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemKind, PrimaryColor};

    fn lantern(row: usize, col: usize) -> Item {
        Item::new(row, col, ItemKind::Lantern(PrimaryColor::Blue))
    }

    #[test]
    fn test_ids_stay_stable_across_removal() {
        let mut registry = ItemRegistry::new();
        let a = registry.insert(lantern(0, 0));
        let b = registry.insert(Item::new(0, 1, ItemKind::MirrorForward));
        let c = registry.insert(lantern(0, 2));

        assert_eq!(registry.remove_at(0, 1).map(|item| item.kind), Some(ItemKind::MirrorForward));
        assert_eq!(registry.get(b), None);
        assert_eq!(registry.get(a).map(|item| item.col), Some(0));
        assert_eq!(registry.get(c).map(|item| item.col), Some(2));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut registry = ItemRegistry::new();
        registry.insert(lantern(0, 0));
        registry.insert(lantern(1, 0));
        registry.remove_at(0, 0);
        registry.insert(lantern(2, 0));

        let rows: Vec<_> = registry.iter().map(|(_, item)| item.row).collect();
        assert_eq!(rows, [1, 2]);
    }

    #[test]
    fn test_cell_lookup_tracks_removal() {
        let mut registry = ItemRegistry::new();
        let id = registry.insert(lantern(3, 4));
        assert_eq!(registry.id_at(3, 4), Some(id));
        registry.remove_at(3, 4);
        assert_eq!(registry.id_at(3, 4), None);
        assert_eq!(registry.remove_at(3, 4), None);
    }

    #[test]
    fn test_category_counts() {
        let mut registry = ItemRegistry::new();
        registry.insert(lantern(0, 0));
        registry.insert(Item::new(0, 1, ItemKind::MirrorForward));
        registry.insert(Item::new(0, 2, ItemKind::MirrorBackward));
        registry.insert(Item::new(0, 3, ItemKind::Obstacle));

        assert_eq!(registry.category_count(ItemCategory::Lantern), 1);
        assert_eq!(registry.category_count(ItemCategory::Mirror), 2);
        assert_eq!(registry.category_count(ItemCategory::Obstacle), 1);

        registry.remove_at(0, 1);
        assert_eq!(registry.category_count(ItemCategory::Mirror), 1);
    }
}
