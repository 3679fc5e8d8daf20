//! Thread listing filters

use serde::{Deserialize, Serialize};

/// Search, category and sort applied to thread listings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_query: String,
    pub category: String,
    pub sort: String,
}

impl FilterState {
    /// Clear search and category on navigation; the chosen sort survives
    pub fn reset(&mut self) {
        self.search_query.clear();
        self.category.clear();
    }

    pub fn search(&self) -> Option<&str> {
        non_empty(&self.search_query)
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn sort(&self) -> Option<&str> {
        non_empty(&self.sort)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_sort() {
        let mut filters = FilterState {
            search_query: "lily".into(),
            category: "Frogs".into(),
            sort: "top".into(),
        };
        filters.reset();
        assert_eq!(filters.search(), None);
        assert_eq!(filters.category(), None);
        assert_eq!(filters.sort(), Some("top"));
    }

    #[test]
    fn blank_values_read_as_unset() {
        let filters = FilterState {
            search_query: "   ".into(),
            ..FilterState::default()
        };
        assert_eq!(filters.search(), None);
    }
}
