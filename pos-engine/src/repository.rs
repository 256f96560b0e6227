//! Generic repository over persisted collections
//!
//! Each entity type maps to one named collection. Operations keep the
//! whole-collection semantics of the storage layer: get-all, get-by-id,
//! insert, update (replace in place), remove (filter out).

use crate::storage::{self, CollectionStore};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MenuCategory, MenuItem, Order, StockItem, Table, User};
use std::marker::PhantomData;

/// A record stored in a named collection
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Name of the persisted collection
    const COLLECTION: &'static str;

    /// Error code used when a lookup misses
    const NOT_FOUND: ErrorCode;

    fn id(&self) -> &str;
}

impl Record for Table {
    const COLLECTION: &'static str = storage::TABLES;
    const NOT_FOUND: ErrorCode = ErrorCode::TableNotFound;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for MenuCategory {
    const COLLECTION: &'static str = storage::CATEGORIES;
    const NOT_FOUND: ErrorCode = ErrorCode::CategoryNotFound;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for MenuItem {
    const COLLECTION: &'static str = storage::MENU_ITEMS;
    const NOT_FOUND: ErrorCode = ErrorCode::MenuItemNotFound;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Order {
    const COLLECTION: &'static str = storage::ORDERS;
    const NOT_FOUND: ErrorCode = ErrorCode::OrderNotFound;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for StockItem {
    const COLLECTION: &'static str = storage::STOCK_ITEMS;
    const NOT_FOUND: ErrorCode = ErrorCode::StockRecordNotFound;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for User {
    const COLLECTION: &'static str = storage::USERS;
    const NOT_FOUND: ErrorCode = ErrorCode::UserNotFound;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Repository for one entity collection
#[derive(Clone)]
pub struct Repository<T: Record> {
    store: CollectionStore,
    _marker: PhantomData<T>,
}

impl<T: Record> Repository<T> {
    pub fn new(store: CollectionStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// All records in the collection
    pub fn list(&self) -> AppResult<Vec<T>> {
        Ok(self.store.load(T::COLLECTION)?)
    }

    /// Record by id, if present
    pub fn get(&self, id: &str) -> AppResult<Option<T>> {
        Ok(self.list()?.into_iter().find(|r| r.id() == id))
    }

    /// Record by id, or the entity's not-found error
    pub fn get_required(&self, id: &str) -> AppResult<T> {
        self.get(id)?
            .ok_or_else(|| AppError::new(T::NOT_FOUND).with_detail("id", id))
    }

    /// Append a new record
    pub fn insert(&self, record: T) -> AppResult<T> {
        let mut all = self.list()?;
        all.push(record.clone());
        self.store.store(T::COLLECTION, &all)?;
        Ok(record)
    }

    /// Replace the record with the same id; errors if absent
    pub fn update(&self, record: T) -> AppResult<T> {
        let mut all = self.list()?;
        let slot = all
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| AppError::new(T::NOT_FOUND).with_detail("id", record.id()))?;
        *slot = record.clone();
        self.store.store(T::COLLECTION, &all)?;
        Ok(record)
    }

    /// Filter the record out of the collection; errors if absent
    pub fn remove(&self, id: &str) -> AppResult<()> {
        let all = self.list()?;
        let remaining: Vec<T> = all.into_iter().filter(|r| r.id() != id).collect();
        self.store.store(T::COLLECTION, &remaining)?;
        Ok(())
    }

    /// Replace the entire collection
    pub fn replace_all(&self, records: &[T]) -> AppResult<()> {
        Ok(self.store.store(T::COLLECTION, records)?)
    }
}
