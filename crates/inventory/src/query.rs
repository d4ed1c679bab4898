//! Query predicates over items: keyword search and exact-match filtering.

use serde::Serialize;

use crate::item::Item;
use crate::status::ItemStatus;

/// Trim and lowercase a search keyword.
///
/// Returns `None` for an empty or all-whitespace keyword, which means
/// "match everything".
pub fn normalize_keyword(keyword: &str) -> Option<String> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Which searchable fields of an item contain a keyword.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordMatch {
    pub name: bool,
    pub location: bool,
    pub category: bool,
}

impl KeywordMatch {
    /// Case-insensitive substring match of an already normalized keyword.
    pub fn of(item: &Item, normalized: &str) -> Self {
        let contains = |value: &str| value.to_lowercase().contains(normalized);
        Self {
            name: contains(item.name()),
            location: contains(item.location()),
            category: contains(item.category()),
        }
    }

    /// Evaluate a raw keyword. A blank keyword matches but highlights nothing.
    pub fn for_keyword(item: &Item, keyword: &str) -> Option<Self> {
        match normalize_keyword(keyword) {
            None => Some(Self::default()),
            Some(normalized) => {
                let hit = Self::of(item, &normalized);
                hit.any().then_some(hit)
            }
        }
    }

    pub fn any(&self) -> bool {
        self.name || self.location || self.category
    }
}

/// Exact-match criteria on category and status; unset criteria are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExactFilter {
    pub category: Option<String>,
    pub status: Option<ItemStatus>,
}

impl ExactFilter {
    pub fn new(category: Option<String>, status: Option<ItemStatus>) -> Self {
        Self { category, status }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.status.is_none()
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.category.as_deref().is_none_or(|c| item.category() == c)
            && self.status.is_none_or(|s| item.status() == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lostfound_core::ItemId;

    fn item(name: &str, category: &str, location: &str, status: ItemStatus) -> Item {
        Item::from_stored(
            ItemId::new(1),
            name.to_string(),
            category.to_string(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            location.to_string(),
            status,
            "desk@uni.ac.uk".to_string(),
        )
    }

    #[test]
    fn blank_keyword_normalizes_to_none() {
        assert_eq!(normalize_keyword(""), None);
        assert_eq!(normalize_keyword(" \t "), None);
        assert_eq!(normalize_keyword("  Hall "), Some("hall".to_string()));
    }

    #[test]
    fn keyword_matches_substring_in_any_field() {
        let scarf = item("Checkered Scarf", "Clothing", "Hall A", ItemStatus::Lost);

        let by_name = KeywordMatch::for_keyword(&scarf, "kered").unwrap();
        assert!(by_name.name && !by_name.location && !by_name.category);

        let by_location = KeywordMatch::for_keyword(&scarf, "HALL").unwrap();
        assert!(by_location.location && !by_location.name);

        let by_category = KeywordMatch::for_keyword(&scarf, "cloth").unwrap();
        assert!(by_category.category);

        assert_eq!(KeywordMatch::for_keyword(&scarf, "bottle"), None);
    }

    #[test]
    fn contact_info_is_not_searched() {
        let scarf = item("Checkered Scarf", "Clothing", "Hall A", ItemStatus::Lost);
        assert_eq!(KeywordMatch::for_keyword(&scarf, "desk@"), None);
    }

    #[test]
    fn blank_keyword_matches_without_highlight() {
        let scarf = item("Checkered Scarf", "Clothing", "Hall A", ItemStatus::Lost);
        let hit = KeywordMatch::for_keyword(&scarf, "  ").unwrap();
        assert!(!hit.any());
    }

    #[test]
    fn exact_filter_ands_criteria() {
        let phone = item("Phone", "Electronics", "Gym", ItemStatus::Lost);

        assert!(ExactFilter::default().matches(&phone));
        assert!(ExactFilter::default().status(ItemStatus::Lost).matches(&phone));
        assert!(ExactFilter::default().category("Electronics").matches(&phone));
        assert!(
            !ExactFilter::default()
                .category("Electronics")
                .status(ItemStatus::Found)
                .matches(&phone)
        );
        assert!(!ExactFilter::default().category("electronics").matches(&phone));
        assert!(!ExactFilter::default().category("Electro").matches(&phone));
    }
}
