//! Session state and the command interface driven by the view.

use crate::catalogue::{CatalogueBatch, CatalogueStore};
use crate::config::CatalogueConfig;
use crate::error::CatalogueError;
use crate::item::{ItemDetail, ItemId};
use crate::navigation::{self, Direction};
use crate::search::FilterState;

/// Point-in-time view of the session returned by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Currently focused identifier.
    pub focused: Option<ItemId>,
    /// Neighbours of the focused identifier in the active list.
    pub neighbors: Option<(ItemId, ItemId)>,
    /// The list navigation currently runs over.
    pub visible: Vec<ItemId>,
    /// Whether a search filter is applied.
    pub filter_active: bool,
    /// Number of matches of the applied filter.
    pub match_count: usize,
    /// Number of items loaded in total.
    pub loaded: usize,
}

/// All mutable state of a browsing session.
///
/// Owns the catalogue, the search filter and the focus. The focus is
/// cleared whenever the search query changes.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: CatalogueConfig,
    store: CatalogueStore,
    filter: FilterState,
    raw_query: String,
    focused: Option<ItemId>,
}

impl Session {
    /// Create an empty session.
    pub fn new(config: CatalogueConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &CatalogueConfig {
        &self.config
    }

    /// The catalogue store.
    pub fn store(&self) -> &CatalogueStore {
        &self.store
    }

    /// Current search filter.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The query as last typed, before normalization.
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    /// Currently focused identifier.
    pub fn focused(&self) -> Option<&ItemId> {
        self.focused.as_ref()
    }

    /// Detail record of the focused identifier.
    pub fn focused_detail(&self) -> Option<&ItemDetail> {
        self.focused.as_ref().and_then(|id| self.store.get(id).ok())
    }

    /// The list navigation currently runs over.
    pub fn active_list(&self) -> &[ItemId] {
        navigation::active_list(self.store.order(), &self.filter)
    }

    /// Whether more pages may be requested. Loading is paused while a
    /// search filter is applied.
    pub fn can_load_more(&self) -> bool {
        !self.filter.is_active()
    }

    /// Append a fetched batch and re-apply an active filter.
    pub fn append(&mut self, batch: CatalogueBatch) -> Result<Snapshot, CatalogueError> {
        self.store.append(batch)?;
        self.filter.refresh(self.store.order());
        Ok(self.snapshot())
    }

    /// Focus an item.
    pub fn open_item(&mut self, id: &ItemId) -> Result<Snapshot, CatalogueError> {
        if !self.store.contains(id) {
            return Err(CatalogueError::NotFound { id: id.clone() });
        }
        self.focused = Some(id.clone());
        Ok(self.snapshot())
    }

    /// Clear the focus.
    pub fn close_item(&mut self) -> Snapshot {
        self.focused = None;
        self.snapshot()
    }

    /// Move the focus one step over the active list.
    pub fn navigate(&mut self, direction: Direction) -> Result<Snapshot, CatalogueError> {
        let current = self.focused.as_ref().ok_or(CatalogueError::NoFocus)?;
        let target = navigation::advance(self.active_list(), direction, current)?.clone();
        self.focused = Some(target);
        Ok(self.snapshot())
    }

    /// Apply a new search query. Clears the focus.
    pub fn search(&mut self, query: &str) -> Snapshot {
        self.raw_query = query.to_string();
        self.filter = FilterState::apply(self.store.order(), query, self.config.min_query_len);
        self.focused = None;
        self.snapshot()
    }

    /// Build a snapshot of the current state.
    pub fn snapshot(&self) -> Snapshot {
        let active = self.active_list();
        let neighbors = self
            .focused
            .as_ref()
            .and_then(|id| navigation::neighbors(active, id).ok())
            .map(|n| (n.previous.clone(), n.next.clone()));

        Snapshot {
            focused: self.focused.clone(),
            neighbors,
            visible: active.to_vec(),
            filter_active: self.filter.is_active(),
            match_count: self.filter.matches().len(),
            loaded: self.store.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::StatBlock;

    fn detail(name: &str) -> ItemDetail {
        ItemDetail {
            id: ItemId::new(name),
            number: 0,
            image: None,
            types: Vec::new(),
            stats: StatBlock::default(),
            height: 0,
            weight: 0,
            base_experience: None,
            abilities: Vec::new(),
        }
    }

    fn session(names: &[&str]) -> Session {
        let mut session = Session::new(CatalogueConfig::default());
        session
            .append(CatalogueBatch::from_details(names.iter().map(|n| detail(n))))
            .unwrap();
        session
    }

    #[test]
    fn test_open_unknown_item() {
        let mut session = session(&["a"]);
        assert!(matches!(
            session.open_item(&ItemId::new("zz")),
            Err(CatalogueError::NotFound { .. })
        ));
        assert!(session.focused().is_none());
    }

    #[test]
    fn test_navigate_without_focus() {
        let mut session = session(&["a", "b"]);
        assert_eq!(session.navigate(Direction::Next), Err(CatalogueError::NoFocus));
    }

    #[test]
    fn test_snapshot_neighbors() {
        let mut session = session(&["a", "b", "c"]);
        let snapshot = session.open_item(&ItemId::new("a")).unwrap();
        assert_eq!(
            snapshot.neighbors,
            Some((ItemId::new("c"), ItemId::new("b")))
        );
        assert_eq!(snapshot.loaded, 3);
    }

    #[test]
    fn test_search_clears_focus() {
        let mut session = session(&["charmander", "squirtle", "charizard"]);
        session.open_item(&ItemId::new("squirtle")).unwrap();
        let snapshot = session.search("char");
        assert!(snapshot.focused.is_none());
        assert!(snapshot.filter_active);
        assert_eq!(snapshot.match_count, 2);
        assert!(!session.can_load_more());
    }

    #[test]
    fn test_close_item() {
        let mut session = session(&["a"]);
        session.open_item(&ItemId::new("a")).unwrap();
        assert!(session.close_item().focused.is_none());
    }
}
