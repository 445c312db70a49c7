//! Ordered catalogue store.

use std::collections::HashMap;

use crate::error::CatalogueError;
use crate::item::{ItemDetail, ItemId};

/// A batch of items to append, in request order.
#[derive(Debug, Clone, Default)]
pub struct CatalogueBatch {
    /// Identifiers in the order they were requested.
    pub order: Vec<ItemId>,
    /// Detail records keyed by identifier.
    pub details: HashMap<ItemId, ItemDetail>,
}

impl CatalogueBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a batch from detail records, keeping their iteration order.
    pub fn from_details(details: impl IntoIterator<Item = ItemDetail>) -> Self {
        let mut batch = Self::new();
        for detail in details {
            batch.push(detail);
        }
        batch
    }

    /// Add a record to the end of the batch.
    pub fn push(&mut self, detail: ItemDetail) {
        self.order.push(detail.id.clone());
        self.details.insert(detail.id.clone(), detail);
    }

    /// Number of identifiers in the batch.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Insertion-ordered store of every loaded item.
///
/// The order is append-only and never reordered. Appending an identifier
/// that is already present is a caller error and is not guarded against.
#[derive(Debug, Clone, Default)]
pub struct CatalogueStore {
    order: Vec<ItemId>,
    details: HashMap<ItemId, ItemDetail>,
}

impl CatalogueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch to the end of the catalogue.
    ///
    /// Fails without modifying the store if any identifier in the batch
    /// has no detail record.
    pub fn append(&mut self, mut batch: CatalogueBatch) -> Result<(), CatalogueError> {
        if let Some(missing) = batch.order.iter().find(|id| !batch.details.contains_key(*id)) {
            return Err(CatalogueError::MissingDetail {
                id: missing.clone(),
            });
        }

        self.order.reserve(batch.order.len());
        for id in batch.order {
            if let Some(detail) = batch.details.remove(&id) {
                self.details.insert(id.clone(), detail);
            }
            self.order.push(id);
        }
        Ok(())
    }

    /// Look up the detail record for an identifier.
    pub fn get(&self, id: &ItemId) -> Result<&ItemDetail, CatalogueError> {
        self.details
            .get(id)
            .ok_or_else(|| CatalogueError::NotFound { id: id.clone() })
    }

    /// Full catalogue order.
    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    /// Check if an identifier has been loaded.
    pub fn contains(&self, id: &ItemId) -> bool {
        self.details.contains_key(id)
    }

    /// Number of loaded items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate detail records in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemDetail> {
        self.order.iter().filter_map(|id| self.details.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::StatBlock;

    fn detail(name: &str, number: u32) -> ItemDetail {
        ItemDetail {
            id: ItemId::new(name),
            number,
            image: None,
            types: vec!["normal".to_string()],
            stats: StatBlock::default(),
            height: 1,
            weight: 1,
            base_experience: None,
            abilities: Vec::new(),
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = CatalogueStore::new();
        store
            .append(CatalogueBatch::from_details([detail("b", 2), detail("a", 1)]))
            .unwrap();
        store
            .append(CatalogueBatch::from_details([detail("c", 3)]))
            .unwrap();

        let names: Vec<&str> = store.order().iter().map(ItemId::as_str).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(&ItemId::new("a")).unwrap().number, 1);
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let store = CatalogueStore::new();
        let err = store.get(&ItemId::new("ghost")).unwrap_err();
        assert!(matches!(err, CatalogueError::NotFound { .. }));
    }

    #[test]
    fn test_append_missing_detail_is_atomic() {
        let mut store = CatalogueStore::new();
        let mut batch = CatalogueBatch::from_details([detail("a", 1)]);
        batch.order.push(ItemId::new("orphan"));

        let err = store.append(batch).unwrap_err();
        assert_eq!(
            err,
            CatalogueError::MissingDetail {
                id: ItemId::new("orphan")
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_iter_in_order() {
        let mut store = CatalogueStore::new();
        store
            .append(CatalogueBatch::from_details([detail("x", 9), detail("y", 8)]))
            .unwrap();
        let numbers: Vec<u32> = store.iter().map(|d| d.number).collect();
        assert_eq!(numbers, [9, 8]);
    }
}
