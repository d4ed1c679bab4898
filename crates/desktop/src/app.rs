//! Application state and command dispatch.
//!
//! The front end holds no state of its own: it turns user actions into
//! [`Command`]s, hands them to [`App::dispatch`], and draws whatever
//! [`App::render`] returns.

use std::collections::BTreeSet;

use lostfound_core::{Entity, ItemId};
use lostfound_inventory::{
    ExactFilter, Item, ItemDraft, ItemStatus, KeywordMatch, normalize_keyword,
};

use crate::store::{ItemStore, StoreResult};
use crate::types::{ItemCard, ItemListView, Outcome};

/// Categories offered by the front end. The record itself accepts any
/// non-blank category.
pub const CATEGORIES: [&str; 4] = ["Electronics", "Clothing", "Books", "Misc"];

/// Search, filter and selection state of the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub search: String,
    pub filter: ExactFilter,
    pub selected: BTreeSet<ItemId>,
    pub message: Option<String>,
}

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(ItemDraft),
    /// Re-validate and save an edited draft (the draft carries the id).
    Edit(ItemDraft),
    SetStatus { id: ItemId, status: ItemStatus },
    Delete(ItemId),
    DeleteSelected,
    Search(String),
    FilterCategory(Option<String>),
    FilterStatus(Option<ItemStatus>),
    ClearFilters,
    ToggleSelection(ItemId),
    ClearSelection,
}

/// The store plus the list view state.
#[derive(Debug)]
pub struct App {
    store: ItemStore,
    state: AppState,
}

impl App {
    pub fn new(store: ItemStore) -> Self {
        Self {
            store,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Apply one command.
    ///
    /// Validation failures come back as [`Outcome::Rejected`] and persist
    /// nothing; storage failures are returned as errors.
    pub fn dispatch(&mut self, command: Command) -> StoreResult<Outcome> {
        tracing::debug!(?command, "dispatch");

        let outcome = match command {
            Command::Add(draft) => match draft.validate() {
                Ok(mut item) => Outcome::Added(self.store.create(&mut item)?),
                Err(err) => Outcome::Rejected(err),
            },
            Command::Edit(draft) => match draft.validate() {
                Ok(item) => match item.id() {
                    Some(id) if self.store.update(&item)? => Outcome::Updated(id),
                    id => Outcome::NotFound(id),
                },
                Err(err) => Outcome::Rejected(err),
            },
            Command::SetStatus { id, status } => match self.store.get(id)? {
                Some(mut item) => {
                    item.set_status(status);
                    if self.store.update(&item)? {
                        Outcome::Updated(id)
                    } else {
                        Outcome::NotFound(Some(id))
                    }
                }
                None => Outcome::NotFound(Some(id)),
            },
            Command::Delete(id) => {
                self.state.selected.remove(&id);
                if self.store.delete(id)? {
                    Outcome::Deleted(1)
                } else {
                    Outcome::NotFound(Some(id))
                }
            }
            Command::DeleteSelected => {
                // Only what the list currently shows; hidden selections are dropped.
                let visible = self.visible_ids()?;
                let selected = std::mem::take(&mut self.state.selected);
                let mut deleted = 0;
                for id in selected.intersection(&visible) {
                    if self.store.delete(*id)? {
                        deleted += 1;
                    }
                }
                Outcome::Deleted(deleted)
            }
            Command::Search(keyword) => {
                self.state.search = keyword;
                self.prune_selection()?
            }
            Command::FilterCategory(category) => {
                self.state.filter.category = category;
                self.prune_selection()?
            }
            Command::FilterStatus(status) => {
                self.state.filter.status = status;
                self.prune_selection()?
            }
            Command::ClearFilters => {
                self.state.search.clear();
                self.state.filter = ExactFilter::default();
                Outcome::ViewChanged
            }
            Command::ToggleSelection(id) => {
                if !self.state.selected.remove(&id) {
                    self.state.selected.insert(id);
                }
                Outcome::ViewChanged
            }
            Command::ClearSelection => {
                self.state.selected.clear();
                Outcome::ViewChanged
            }
        };

        if let Outcome::Rejected(err) = &outcome {
            tracing::warn!(%err, "input rejected");
        }
        if let Some(message) = outcome.message() {
            self.state.message = Some(message);
        }
        Ok(outcome)
    }

    /// Items the list currently shows: keyword search first, then the exact filters.
    fn visible_items(&self) -> StoreResult<Vec<Item>> {
        Ok(match normalize_keyword(&self.state.search) {
            None => self.store.filter(&self.state.filter)?,
            Some(_) => self
                .store
                .search(&self.state.search)?
                .into_iter()
                .filter(|item| self.state.filter.matches(item))
                .collect(),
        })
    }

    fn visible_ids(&self) -> StoreResult<BTreeSet<ItemId>> {
        Ok(self.visible_items()?.iter().filter_map(|item| item.id()).collect())
    }

    /// Drop selected ids that the new search/filter hides.
    fn prune_selection(&mut self) -> StoreResult<Outcome> {
        if !self.state.selected.is_empty() {
            let visible = self.visible_ids()?;
            self.state.selected.retain(|id| visible.contains(id));
        }
        Ok(Outcome::ViewChanged)
    }

    pub fn render(&self) -> StoreResult<ItemListView> {
        let keyword = normalize_keyword(&self.state.search);
        let items = self.visible_items()?;

        let cards = items
            .into_iter()
            .map(|item| ItemCard {
                highlight: keyword
                    .as_deref()
                    .map(|k| KeywordMatch::of(&item, k))
                    .unwrap_or_default(),
                selected: item
                    .id()
                    .is_some_and(|id| self.state.selected.contains(&id)),
                item,
            })
            .collect();

        Ok(ItemListView {
            cards,
            total: self.store.count()?,
            message: self.state.message.clone(),
        })
    }
}
