//! `lostfound-desktop`
//!
//! **Responsibility:** local item store and the application layer on top of it.
//!
//! This crate provides:
//! - The SQLite-backed item store (blocking API, one connection per call)
//! - Store configuration (database location)
//! - Explicit application state with command dispatch and a list view model
//! - The `lostfound` terminal front end

pub mod app;
pub mod cli;
pub mod config;
pub mod store;
pub mod types;

pub use app::{App, AppState, CATEGORIES, Command};
pub use config::StoreConfig;
pub use store::{ItemStore, StoreError, StoreResult};
pub use types::{ItemCard, ItemListView, Outcome};
