//! redb-based storage layer for persisted collections
//!
//! # Layout
//!
//! A single `collections` table holds every named collection:
//! key = collection name, value = JSON-serialized array (JSON object for
//! `settings`). Missing keys default to an empty array / default settings.
//!
//! | Collection | Contents |
//! |------------|----------|
//! | `tables` | `Vec<Table>` |
//! | `categories` | `Vec<MenuCategory>` |
//! | `menu-items` | `Vec<MenuItem>` |
//! | `orders` | `Vec<Order>` |
//! | `stock-items` | `Vec<StockItem>` |
//! | `users` | `Vec<User>` |
//! | `settings` | `AppSettings` |
//!
//! # Semantics
//!
//! Whole-collection visibility, no partial query: every mutation reads the
//! entire collection, changes it in memory, and writes it back in one
//! committed transaction. redb's copy-on-write commit keeps the file
//! consistent even if the process dies mid-write.

use redb::{Database, ReadableDatabase, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Single table holding every named collection
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// Collection names
pub const TABLES: &str = "tables";
pub const CATEGORIES: &str = "categories";
pub const MENU_ITEMS: &str = "menu-items";
pub const ORDERS: &str = "orders";
pub const STOCK_ITEMS: &str = "stock-items";
pub const USERS: &str = "users";
pub const SETTINGS: &str = "settings";

/// All named collections, in backup order
pub const ALL_COLLECTIONS: &[&str] = &[
    TABLES, CATEGORIES, MENU_ITEMS, ORDERS, STOCK_ITEMS, USERS, SETTINGS,
];

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        let code = match err {
            StorageError::Serialization(_) => ErrorCode::SerializationError,
            _ => ErrorCode::StorageError,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// Collection store backed by redb
#[derive(Clone)]
pub struct CollectionStore {
    db: Arc<Database>,
}

impl CollectionStore {
    /// Open or create the database at the given path
    ///
    /// redb commits with `Durability::Immediate` by default: once a write
    /// returns, the collection is persistent and the file is in a
    /// consistent state regardless of crashes.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Read the raw JSON bytes of a collection, if present
    pub fn read_raw(&self, name: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;
        Ok(table.get(name)?.map(|guard| guard.value().to_vec()))
    }

    /// Replace the raw JSON bytes of a collection
    pub fn write_raw(&self, name: &str, bytes: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(name, bytes)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Load a whole collection; a missing key is an empty collection
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> StorageResult<Vec<T>> {
        match self.read_raw(name)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace a whole collection
    pub fn store<T: Serialize>(&self, name: &str, items: &[T]) -> StorageResult<()> {
        let bytes = serde_json::to_vec(items)?;
        self.write_raw(name, &bytes)
    }

    /// Load a singleton object; a missing key yields the default
    pub fn load_object<T: DeserializeOwned + Default>(&self, name: &str) -> StorageResult<T> {
        match self.read_raw(name)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(T::default()),
        }
    }

    /// Replace a singleton object
    pub fn store_object<T: Serialize>(&self, name: &str, value: &T) -> StorageResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.write_raw(name, &bytes)
    }
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_collection_is_empty() {
        let store = CollectionStore::open_in_memory().unwrap();
        let items: Vec<String> = store.load(TABLES).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_store_and_load_roundtrip() {
        let store = CollectionStore::open_in_memory().unwrap();
        let items = vec!["a".to_string(), "b".to_string()];
        store.store(TABLES, &items).unwrap();
        let back: Vec<String> = store.load(TABLES).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn test_store_replaces_whole_collection() {
        let store = CollectionStore::open_in_memory().unwrap();
        store.store(USERS, &["a", "b", "c"]).unwrap();
        store.store(USERS, &["d"]).unwrap();
        let back: Vec<String> = store.load(USERS).unwrap();
        assert_eq!(back, vec!["d".to_string()]);
    }

    #[test]
    fn test_load_object_defaults_when_missing() {
        let store = CollectionStore::open_in_memory().unwrap();
        let value: shared::models::AppSettings = store.load_object(SETTINGS).unwrap();
        assert_eq!(value, shared::models::AppSettings::default());
    }

    #[test]
    fn test_corrupt_bytes_surface_as_serialization_error() {
        let store = CollectionStore::open_in_memory().unwrap();
        store.write_raw(ORDERS, b"{not json").unwrap();
        let result: StorageResult<Vec<String>> = store.load(ORDERS);
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
