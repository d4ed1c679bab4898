//! Lost-and-found record module.
//!
//! This crate contains the item record and its validation rules, plus the
//! keyword/exact-match predicates used when querying stored items. It is pure
//! domain logic (no IO, no storage, no UI).

pub mod item;
pub mod query;
pub mod status;

pub use item::{DATE_FORMAT, Item, ItemDraft, parse_date};
pub use query::{ExactFilter, KeywordMatch, normalize_keyword};
pub use status::ItemStatus;
