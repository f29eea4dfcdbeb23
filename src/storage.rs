//! # Storage
//!
//! Local key-value persistence.
//!
//! Core purpose is to durably mirror the in-memory stores so a restart picks
//! up where the last session left off. One JSON document per fixed key, one
//! file per key under the data directory.
//!
//! ## Requirements
//!
//! - Whole-document writes, no partial/incremental updates
//! - Synchronous write after every mutation so the persisted snapshot always
//!   matches what the last mutation left in memory
//! - Tiny dataset: a company list of at most a few hundred entries and a
//!   scholarship flag map
//!
//! ## Load semantics
//!
//! `load` distinguishes three outcomes instead of conflating them:
//! - `Ok(Some(value))`: the key exists and parsed
//! - `Ok(None)`: the key has never been written
//! - `Err(StorageParse)`: the key exists but the document is not valid JSON
//!
//! Callers decide what a corrupt entry degrades to (the stores fall back to
//! their seed), but corruption is always logged and never mistaken for an
//! empty store.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::AppError;

/// Key holding the serialized company list.
pub const COMPANIES_KEY: &str = "companies";
/// Key holding the scholarship id -> "applying" flag map.
pub const SCHOLARSHIPS_KEY: &str = "scholarship-applications";

pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let raw = match fs::read_to_string(self.entry_path(key)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Persisted entry for {key} is not valid JSON: {e}");
                Err(AppError::StorageParse {
                    key: key.to_string(),
                })
            }
        }
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value).map_err(std::io::Error::from)?;
        fs::write(self.entry_path(key), raw)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::CompanyRecord;

    fn record(name: &str, positive: u32, negative: u32) -> CompanyRecord {
        CompanyRecord {
            name: name.to_string(),
            apply_link: format!("https://{}.example.com/careers", name.to_lowercase()),
            positive_votes: positive,
            negative_votes: negative,
        }
    }

    #[test]
    fn round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        let records = vec![record("Google", 3, 1), record("IBM", 0, 0)];
        storage.save(COMPANIES_KEY, &records).unwrap();

        let loaded: Option<Vec<CompanyRecord>> = storage.load(COMPANIES_KEY).unwrap();
        assert_eq!(loaded, Some(records));
    }

    #[test]
    fn absent_key_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        let loaded: Option<Vec<CompanyRecord>> = storage.load(COMPANIES_KEY).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_entry_is_corrupt_not_absent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        fs::write(dir.path().join("companies.json"), "not json at all {").unwrap();

        let loaded: Result<Option<Vec<CompanyRecord>>, _> = storage.load(COMPANIES_KEY);
        assert!(matches!(
            loaded,
            Err(AppError::StorageParse { ref key }) if key == COMPANIES_KEY
        ));
    }

    #[test]
    fn save_overwrites_the_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        storage
            .save(COMPANIES_KEY, &vec![record("Apple", 1, 0)])
            .unwrap();
        storage
            .save(COMPANIES_KEY, &vec![record("Accenture", 0, 2)])
            .unwrap();

        let loaded: Vec<CompanyRecord> = storage.load(COMPANIES_KEY).unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Accenture");
    }
}
