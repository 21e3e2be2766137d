//! # Item Store
//!
//! The in-memory shopping list: an ordered collection of items plus the
//! single edit-mode flag.
//!
//! ## What it does
//!
//! - Appends new items with a fresh id and a parsed quantity
//! - Moves edit mode between items (at most one editing at a time)
//! - Commits or cancels an in-progress edit
//! - Deletes items by id
//! - Publishes an immutable snapshot after every change
//!
//! ## Ids
//!
//! Ids come from a counter that only ever grows, so an id is never handed
//! out twice, even after the item holding it has been deleted. Because new
//! items are always appended, the list stays sorted by id and lookups are a
//! binary search.
//!
//! ## Rendering
//!
//! The store knows nothing about the terminal. Renderers either borrow
//! [`ItemStore::items`] or hold a [`watch::Receiver`] from
//! [`ItemStore::subscribe`].

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

/// Quantity used when the entered text is not an integer
pub const DEFAULT_QUANTITY: i64 = 1;

/// Immutable view of the list at one point in time
pub type Snapshot = Arc<[Item]>;

/// Unique identifier of an item within a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single entry on the shopping list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
    pub is_editing: bool,
}

/// Parse quantity text, falling back to [`DEFAULT_QUANTITY`]
pub fn parse_quantity(text: &str) -> i64 {
    text.trim().parse().unwrap_or(DEFAULT_QUANTITY)
}

/// Whether a name is empty or whitespace only
pub fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}

/// Owner of the shopping list and the only place it is mutated
#[derive(Debug)]
pub struct ItemStore {
    items: Vec<Item>,
    next_id: u64,
    editing: Option<ItemId>,
    snapshots: watch::Sender<Snapshot>,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(Snapshot::from(Vec::new()));

        Self {
            items: Vec::new(),
            next_id: 1,
            editing: None,
            snapshots,
        }
    }

    /// Append a new item.
    ///
    /// Returns `None` without touching the list when `name` is blank. An
    /// unparsable `quantity_text` becomes [`DEFAULT_QUANTITY`].
    pub fn add(&mut self, name: &str, quantity_text: &str) -> Option<Item> {
        if is_blank(name) {
            debug!("rejected item with blank name");
            return None;
        }

        let item = Item {
            id: self.allocate_id(),
            name: name.to_string(),
            quantity: parse_quantity(quantity_text),
            is_editing: false,
        };
        self.items.push(item.clone());

        info!(id = %item.id, name = %item.name, quantity = item.quantity, "item added");
        self.publish();
        Some(item)
    }

    /// Put `id` into edit mode and take every other item out of it.
    ///
    /// Returns `false` if no item has that id.
    pub fn begin_edit(&mut self, id: ItemId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };

        if self.editing == Some(id) {
            return true;
        }

        if let Some(previous) = self.editing.take() {
            if let Some(previous_index) = self.index_of(previous) {
                self.items[previous_index].is_editing = false;
            }
        }

        self.items[index].is_editing = true;
        self.editing = Some(id);

        debug!(id = %id, "edit started");
        self.publish();
        true
    }

    /// Replace the name and quantity of `id` and leave edit mode.
    ///
    /// Returns `false` if no item has that id.
    pub fn commit_edit(&mut self, id: ItemId, name: &str, quantity_text: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };

        let item = &mut self.items[index];
        item.name = name.to_string();
        item.quantity = parse_quantity(quantity_text);
        item.is_editing = false;

        if self.editing == Some(id) {
            self.editing = None;
        }

        info!(id = %id, name = %name, quantity = self.items[index].quantity, "item updated");
        self.publish();
        true
    }

    /// Leave edit mode on `id` without changing its fields.
    ///
    /// Returns `false` if `id` was not being edited.
    pub fn cancel_edit(&mut self, id: ItemId) -> bool {
        if self.editing != Some(id) {
            return false;
        }

        if let Some(index) = self.index_of(id) {
            self.items[index].is_editing = false;
        }
        self.editing = None;

        debug!(id = %id, "edit cancelled");
        self.publish();
        true
    }

    /// Remove `id` from the list, keeping the order of the rest.
    pub fn delete(&mut self, id: ItemId) -> Option<Item> {
        let index = self.index_of(id)?;
        let removed = self.items.remove(index);

        if self.editing == Some(id) {
            self.editing = None;
        }

        info!(id = %id, name = %removed.name, "item deleted");
        self.publish();
        Some(removed)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.index_of(id).map(|index| &self.items[index])
    }

    /// Position of `id` in list order
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.binary_search_by_key(&id, |item| item.id).ok()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Id of the item currently in edit mode
    pub fn editing(&self) -> Option<ItemId> {
        self.editing
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self.items.as_slice())
    }

    /// Receive a new snapshot after every change
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(" 12 "), 12);
        assert_eq!(parse_quantity("-2"), -2);
        assert_eq!(parse_quantity("abc"), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity(""), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity("2.5"), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity("99999999999999999999"), DEFAULT_QUANTITY);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" milk "));
    }

    #[test]
    fn test_ids_stay_sorted_after_deletes() {
        let mut store = ItemStore::new();
        let a = store.add("a", "1").unwrap().id;
        let b = store.add("b", "1").unwrap().id;
        store.delete(a);
        let c = store.add("c", "1").unwrap().id;

        assert!(b < c);
        assert_eq!(store.index_of(b), Some(0));
        assert_eq!(store.index_of(c), Some(1));
        assert_eq!(store.index_of(a), None);
    }

    #[test]
    fn test_item_id_display() {
        let mut store = ItemStore::new();
        let item = store.add("milk", "1").unwrap();
        assert_eq!(item.id.to_string(), "#1");
        assert_eq!(item.id.get(), 1);
    }
}
