//! Store configuration: where the SQLite database lives.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context;

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "LOSTFOUND_DB_PATH";

/// File name of the database inside the app data directory.
pub const DB_FILE_NAME: &str = "lost_and_found.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl StoreConfig {
    /// Use an explicit database file.
    pub fn at(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// `LOSTFOUND_DB_PATH` if set, otherwise `{app_data_dir}/lostfound/lost_and_found.db`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::resolve(std::env::var_os(DB_PATH_ENV))
    }

    fn resolve(override_path: Option<OsString>) -> anyhow::Result<Self> {
        match override_path.filter(|p| !p.is_empty()) {
            Some(path) => Ok(Self::at(path)),
            None => default_db_path().map(Self::at),
        }
    }
}

/// Resolve `{app_data_dir}/lostfound/lost_and_found.db`.
fn default_db_path() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    dir.push("lostfound");
    dir.push(DB_FILE_NAME);
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_path_wins() {
        let config = StoreConfig::resolve(Some(OsString::from("/tmp/items.db"))).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/items.db"));
    }

    #[test]
    fn empty_override_falls_back_to_default() {
        // Only meaningful where the platform exposes a data/home directory.
        if let Ok(config) = StoreConfig::resolve(Some(OsString::new())) {
            assert!(config.db_path.ends_with("lostfound/lost_and_found.db"));
        }
    }
}
