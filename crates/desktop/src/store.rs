//! SQLite-backed item store.
//!
//! `ItemStore` owns the single `items` table. Its API is synchronous: every
//! operation opens a connection, runs its statement, closes the connection and
//! returns. Nothing is held open between calls, and each mutation commits on
//! its own.
//!
//! The store does not validate. It only accepts [`Item`] values, which can only
//! be obtained through validation, so invalid records cannot reach it.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use lostfound_core::{Entity, ItemId};
use lostfound_inventory::{
    ExactFilter, Item, ItemStatus, KeywordMatch, normalize_keyword, parse_date,
};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row};
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};

use crate::config::StoreConfig;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        name         TEXT NOT NULL,
        category     TEXT NOT NULL,
        date         TEXT NOT NULL,
        location     TEXT NOT NULL,
        status       TEXT NOT NULL,
        contact_info TEXT NOT NULL
    )
"#;

const SELECT_COLUMNS: &str = "SELECT id, name, category, date, location, status, contact_info FROM items";

/// Storage failure. Not retried; surfaced to the caller of the failing operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to start storage runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to create data directory at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored item {id} is unreadable: {reason}")]
    CorruptRow { id: i64, reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Blocking handle on the `items` table.
#[derive(Debug)]
pub struct ItemStore {
    path: PathBuf,
    options: SqliteConnectOptions,
    runtime: Runtime,
}

impl ItemStore {
    /// Open (creating if needed) the database file and ensure the `items` table exists.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let path = config.db_path.clone();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(StoreError::Runtime)?;

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);

        let store = Self {
            path,
            options,
            runtime,
        };

        store.runtime.block_on(async {
            let mut conn = store.connect().await?;
            let result = sqlx::query(CREATE_TABLE).execute(&mut conn).await;
            release(conn, result).await
        })?;

        tracing::debug!(path = %store.path.display(), "item store ready");
        Ok(store)
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a new row and write the allocated id back into `item`.
    ///
    /// Ids are never reused, even after deletes.
    pub fn create(&self, item: &mut Item) -> StoreResult<ItemId> {
        let rowid = self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let result = sqlx::query(
                r#"
                INSERT INTO items (name, category, date, location, status, contact_info)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(item.name())
            .bind(item.category())
            .bind(item.date_string())
            .bind(item.location())
            .bind(item.status().as_str())
            .bind(item.contact_info())
            .execute(&mut conn)
            .await;
            release(conn, result).await
        })?
        .last_insert_rowid();

        let id = ItemId::new(rowid);
        item.assign_id(id);
        tracing::info!(%id, name = item.name(), "item created");
        Ok(id)
    }

    /// Every stored item, ordered by id.
    pub fn get_all(&self) -> StoreResult<Vec<Item>> {
        self.runtime.block_on(self.fetch_all())
    }

    /// A single item by id.
    pub fn get(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let row = self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let result = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
                .bind(id.get())
                .fetch_optional(&mut conn)
                .await;
            release(conn, result).await
        })?;

        row.as_ref().map(row_to_item).transpose()
    }

    /// Number of stored items.
    pub fn count(&self) -> StoreResult<u64> {
        let count: i64 = self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM items")
                .fetch_one(&mut conn)
                .await;
            release(conn, result).await
        })?;
        Ok(count.max(0) as u64)
    }

    /// Overwrite every field of the row with `item`'s id.
    ///
    /// Returns `false` when no such row exists, or when `item` has no id (in
    /// which case storage is not touched).
    pub fn update(&self, item: &Item) -> StoreResult<bool> {
        let Some(id) = item.id() else {
            tracing::warn!(name = item.name(), "update requested for an item without id");
            return Ok(false);
        };

        let result = self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let result = sqlx::query(
                r#"
                UPDATE items
                SET name = ?1, category = ?2, date = ?3, location = ?4, status = ?5, contact_info = ?6
                WHERE id = ?7
                "#,
            )
            .bind(item.name())
            .bind(item.category())
            .bind(item.date_string())
            .bind(item.location())
            .bind(item.status().as_str())
            .bind(item.contact_info())
            .bind(id.get())
            .execute(&mut conn)
            .await;
            release(conn, result).await
        })?;

        let updated = result.rows_affected() > 0;
        if updated {
            tracing::info!(%id, "item updated");
        } else {
            tracing::warn!(%id, "update matched no item");
        }
        Ok(updated)
    }

    /// Remove the row with `id`. Returns `false` if there was none.
    pub fn delete(&self, id: ItemId) -> StoreResult<bool> {
        let result = self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let result = sqlx::query("DELETE FROM items WHERE id = ?1")
                .bind(id.get())
                .execute(&mut conn)
                .await;
            release(conn, result).await
        })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(%id, "item deleted");
        } else {
            tracing::warn!(%id, "delete matched no item");
        }
        Ok(deleted)
    }

    /// Case-insensitive substring search over name, location and category.
    ///
    /// A blank keyword returns every item.
    pub fn search(&self, keyword: &str) -> StoreResult<Vec<Item>> {
        let items = self.get_all()?;
        let Some(normalized) = normalize_keyword(keyword) else {
            return Ok(items);
        };

        let hits: Vec<Item> = items
            .into_iter()
            .filter(|item| KeywordMatch::of(item, &normalized).any())
            .collect();
        tracing::debug!(keyword = %normalized, hits = hits.len(), "search");
        Ok(hits)
    }

    /// Exact-match filter on category and/or status; omitted criteria are not applied.
    pub fn filter_by_exact_fields(
        &self,
        category: Option<&str>,
        status: Option<ItemStatus>,
    ) -> StoreResult<Vec<Item>> {
        let items = self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let result = sqlx::query(&format!(
                "{SELECT_COLUMNS} WHERE (?1 IS NULL OR category = ?1) AND (?2 IS NULL OR status = ?2) ORDER BY id"
            ))
            .bind(category)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&mut conn)
            .await;
            release(conn, result).await
        })?;

        let items = readable_items(&items);
        tracing::debug!(?category, ?status, hits = items.len(), "filter");
        Ok(items)
    }

    /// [`ItemStore::filter_by_exact_fields`] driven by an [`ExactFilter`].
    pub fn filter(&self, filter: &ExactFilter) -> StoreResult<Vec<Item>> {
        self.filter_by_exact_fields(filter.category.as_deref(), filter.status)
    }

    async fn connect(&self) -> StoreResult<SqliteConnection> {
        Ok(self.options.connect().await?)
    }

    async fn fetch_all(&self) -> StoreResult<Vec<Item>> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&mut conn)
            .await;
        let rows = release(conn, result).await?;

        Ok(readable_items(&rows))
    }
}

/// Rehydrate rows for a listing. Rows that cannot be read are skipped and
/// logged so one bad record does not hide the rest.
fn readable_items(rows: &[SqliteRow]) -> Vec<Item> {
    rows.iter()
        .filter_map(|row| match row_to_item(row) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable item row");
                None
            }
        })
        .collect()
}

/// Dates written by this store are strict `YYYY-MM-DD`; older databases may
/// hold unpadded forms such as `2023-1-5`, which are accepted on read.
fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = parse_date(raw) {
        return Some(date);
    }

    let mut parts = raw.trim().splitn(3, '-');
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Close the per-call connection, then report the statement's outcome.
async fn release<T>(conn: SqliteConnection, result: Result<T, sqlx::Error>) -> StoreResult<T> {
    let closed = conn.close().await;
    let value = result?;
    closed?;
    Ok(value)
}

fn row_to_item(row: &SqliteRow) -> StoreResult<Item> {
    let id: i64 = row.try_get("id")?;
    let corrupt = |reason: String| StoreError::CorruptRow { id, reason };

    let date: String = row.try_get("date")?;
    let date = parse_stored_date(&date)
        .ok_or_else(|| corrupt(format!("date {date:?} is not a calendar date")))?;

    let status: String = row.try_get("status")?;
    let status: ItemStatus = status
        .parse()
        .map_err(|e| corrupt(format!("status {status:?}: {e}")))?;

    Ok(Item::from_stored(
        ItemId::new(id),
        row.try_get("name")?,
        row.try_get("category")?,
        date,
        row.try_get("location")?,
        status,
        row.try_get("contact_info")?,
    ))
}
