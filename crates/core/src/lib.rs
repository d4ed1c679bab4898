//! `lostfound-core` — foundation building blocks for the lost-and-found tracker.
//!
//! This crate contains **pure** primitives (no storage, no UI concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{Field, ValidationError, ValidationResult};
pub use id::ItemId;
