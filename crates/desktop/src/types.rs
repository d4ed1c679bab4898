//! View-facing types produced by the application layer.
//!
//! These carry no storage handles and serialize cleanly, so any front end
//! (terminal, JSON, a future GUI) can render them.

use lostfound_core::{ItemId, ValidationError};
use lostfound_inventory::{Item, KeywordMatch};
use serde::Serialize;

/// One entry in the item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemCard {
    pub item: Item,
    /// Fields containing the current search keyword.
    pub highlight: KeywordMatch,
    pub selected: bool,
}

/// Everything a front end needs to draw the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemListView {
    pub cards: Vec<ItemCard>,
    /// Number of stored items, regardless of search/filters.
    pub total: u64,
    /// Last status line (e.g. a validation message), shown verbatim.
    pub message: Option<String>,
}

impl ItemListView {
    pub fn visible(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Result of dispatching one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(ItemId),
    Updated(ItemId),
    Deleted(usize),
    /// The command referred to an item that is not stored (or had no id).
    NotFound(Option<ItemId>),
    /// Input failed validation; nothing was persisted.
    Rejected(ValidationError),
    /// Search, filter or selection state changed.
    ViewChanged,
}

impl Outcome {
    /// Human-readable status line for this outcome, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::Added(id) => Some(format!("Item {id} added")),
            Outcome::Updated(id) => Some(format!("Item {id} updated")),
            Outcome::Deleted(1) => Some("1 item deleted".to_string()),
            Outcome::Deleted(n) => Some(format!("{n} items deleted")),
            Outcome::NotFound(Some(id)) => Some(format!("No item with id {id}")),
            Outcome::NotFound(None) => Some("Item has not been saved yet".to_string()),
            Outcome::Rejected(err) => Some(err.to_string()),
            Outcome::ViewChanged => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Added(_) | Outcome::Updated(_) | Outcome::Deleted(_) | Outcome::ViewChanged
        )
    }
}
