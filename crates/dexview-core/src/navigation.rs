//! Circular previous/next resolution over the active list.
//!
//! The active list is the search filter's matches when a filter is active
//! and matched something, otherwise the full catalogue order. Navigation
//! wraps around at both ends: the element after the last is the first and
//! the element before the first is the last. A single-element list
//! resolves to itself in both directions, and a two-element list resolves
//! to the other element in both directions.

use serde::{Deserialize, Serialize};

use crate::error::CatalogueError;
use crate::item::ItemId;
use crate::search::FilterState;

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Previous,
    Next,
}

/// Identifiers immediately before and after the focused one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub previous: &'a ItemId,
    pub next: &'a ItemId,
}

impl<'a> Neighbors<'a> {
    /// Pick the neighbour in a direction.
    pub fn towards(&self, direction: Direction) -> &'a ItemId {
        match direction {
            Direction::Previous => self.previous,
            Direction::Next => self.next,
        }
    }
}

/// Select the list that navigation runs over.
pub fn active_list<'a>(order: &'a [ItemId], filter: &'a FilterState) -> &'a [ItemId] {
    let matches = filter.matches();
    if matches.is_empty() { order } else { matches }
}

/// Compute the circular neighbours of `focused` within `active`.
///
/// Fails with [`CatalogueError::NotInList`] if `focused` is absent, which
/// includes the empty list.
pub fn neighbors<'a>(
    active: &'a [ItemId],
    focused: &ItemId,
) -> Result<Neighbors<'a>, CatalogueError> {
    let index = active
        .iter()
        .position(|id| id == focused)
        .ok_or_else(|| CatalogueError::NotInList {
            id: focused.clone(),
        })?;

    let len = active.len();
    Ok(Neighbors {
        previous: &active[(index + len - 1) % len],
        next: &active[(index + 1) % len],
    })
}

/// Return the identifier one step from `focused` in `direction`.
pub fn advance<'a>(
    active: &'a [ItemId],
    direction: Direction,
    focused: &ItemId,
) -> Result<&'a ItemId, CatalogueError> {
    neighbors(active, focused).map(|n| n.towards(direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ItemId> {
        names.iter().map(|n| ItemId::new(*n)).collect()
    }

    fn pair<'a>(list: &'a [ItemId], focused: &str) -> (&'a str, &'a str) {
        let n = neighbors(list, &ItemId::new(focused)).unwrap();
        (n.previous.as_str(), n.next.as_str())
    }

    #[test]
    fn test_single_element_is_self() {
        let list = ids(&["a"]);
        assert_eq!(pair(&list, "a"), ("a", "a"));
    }

    #[test]
    fn test_two_elements_converge() {
        let list = ids(&["a", "b"]);
        assert_eq!(pair(&list, "a"), ("b", "b"));
        assert_eq!(pair(&list, "b"), ("a", "a"));
    }

    #[test]
    fn test_five_elements_wrap() {
        let list = ids(&["a", "b", "c", "d", "e"]);
        assert_eq!(pair(&list, "a"), ("e", "b"));
        assert_eq!(pair(&list, "c"), ("b", "d"));
        assert_eq!(pair(&list, "e"), ("d", "a"));
    }

    #[test]
    fn test_missing_focus_is_not_in_list() {
        let list = ids(&["a", "b"]);
        let err = neighbors(&list, &ItemId::new("z")).unwrap_err();
        assert_eq!(err, CatalogueError::not_in_list("z"));

        let err = neighbors(&[], &ItemId::new("a")).unwrap_err();
        assert!(matches!(err, CatalogueError::NotInList { .. }));
    }

    #[test]
    fn test_advance_direction() {
        let list = ids(&["a", "b", "c"]);
        let b = ItemId::new("b");
        assert_eq!(advance(&list, Direction::Next, &b).unwrap().as_str(), "c");
        assert_eq!(advance(&list, Direction::Previous, &b).unwrap().as_str(), "a");
    }

    #[test]
    fn test_active_list_selection() {
        let order = ids(&["charmander", "squirtle", "charizard"]);

        let inactive = FilterState::Inactive;
        assert_eq!(active_list(&order, &inactive), order.as_slice());

        let no_match = FilterState::apply(&order, "zzz", 3);
        assert_eq!(active_list(&order, &no_match), order.as_slice());

        let filtered = FilterState::apply(&order, "char", 3);
        assert_eq!(
            active_list(&order, &filtered),
            ids(&["charmander", "charizard"]).as_slice()
        );
    }
}
