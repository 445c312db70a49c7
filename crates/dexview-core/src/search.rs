//! Substring search over the catalogue order.
//!
//! Matching is a case-insensitive substring test against each identifier,
//! preserving catalogue order. There is no ranking and no fuzzy matching.

use crate::item::ItemId;

/// Normalize a raw query: trim surrounding whitespace and lower-case it.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Return the identifiers of `order` that contain `query`, in order.
///
/// The query is normalized before matching. This applies no length
/// threshold; use [`FilterState::apply`] for that.
pub fn filter(order: &[ItemId], query: &str) -> Vec<ItemId> {
    let needle = normalize_query(query);
    order
        .iter()
        .filter(|id| id.as_str().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Result of applying a search query to the catalogue.
///
/// `Inactive` (query below the length threshold) and `Active` with no
/// matches are distinct states: only a non-empty active filter replaces the
/// full catalogue as the navigation list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterState {
    /// No filter is applied.
    #[default]
    Inactive,
    /// A filter is applied.
    Active {
        /// Normalized query.
        query: String,
        /// Matching identifiers in catalogue order.
        matches: Vec<ItemId>,
    },
}

impl FilterState {
    /// Compute the filter state for a query.
    pub fn apply(order: &[ItemId], query: &str, min_len: usize) -> Self {
        let query = normalize_query(query);
        if query.chars().count() < min_len {
            return Self::Inactive;
        }
        let matches = filter(order, &query);
        Self::Active { query, matches }
    }

    /// Check if a filter is applied.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Check if an active filter matched nothing.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::Active { matches, .. } if matches.is_empty())
    }

    /// Matching identifiers, empty when inactive.
    pub fn matches(&self) -> &[ItemId] {
        match self {
            Self::Inactive => &[],
            Self::Active { matches, .. } => matches.as_slice(),
        }
    }

    /// The normalized query, if active.
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Inactive => None,
            Self::Active { query, .. } => Some(query.as_str()),
        }
    }

    /// Recompute matches against a new catalogue order.
    pub fn refresh(&mut self, order: &[ItemId]) {
        if let Self::Active { query, matches } = self {
            *matches = filter(order, query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ItemId> {
        names.iter().map(|n| ItemId::new(*n)).collect()
    }

    #[test]
    fn test_filter_preserves_order() {
        let order = ids(&["charmander", "squirtle", "bulbasaur", "charizard"]);
        assert_eq!(filter(&order, "char"), ids(&["charmander", "charizard"]));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let order = ids(&["Pikachu", "raichu"]);
        assert_eq!(filter(&order, "  CHU "), ids(&["Pikachu", "raichu"]));
    }

    #[test]
    fn test_short_query_is_inactive() {
        let order = ids(&["charmander"]);
        assert_eq!(FilterState::apply(&order, "ch", 3), FilterState::Inactive);
        assert_eq!(FilterState::apply(&order, "  ch  ", 3), FilterState::Inactive);
        assert!(FilterState::apply(&order, "cha", 3).is_active());
    }

    #[test]
    fn test_no_match_is_distinct_from_inactive() {
        let order = ids(&["charmander"]);
        let state = FilterState::apply(&order, "zzz", 3);
        assert!(state.is_active());
        assert!(state.is_no_match());
        assert!(state.matches().is_empty());
        assert_ne!(state, FilterState::Inactive);
    }

    #[test]
    fn test_empty_catalogue() {
        assert!(filter(&[], "char").is_empty());
        assert!(FilterState::apply(&[], "char", 3).is_no_match());
    }

    #[test]
    fn test_refresh_after_append() {
        let mut order = ids(&["pidgey"]);
        let mut state = FilterState::apply(&order, "pidg", 3);
        assert_eq!(state.matches().len(), 1);

        order.extend(ids(&["rattata", "pidgeotto"]));
        state.refresh(&order);
        assert_eq!(state.matches(), ids(&["pidgey", "pidgeotto"]).as_slice());
    }
}
