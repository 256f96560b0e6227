//! Backup and restore
//!
//! A backup is one JSON document holding every collection plus the
//! settings singleton. Restore parses the whole document before touching
//! the store; collections absent from the snapshot stay as they are.

use crate::storage::{self, CollectionStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{AppSettings, MenuCategory, MenuItem, Order, StockItem, Table, User};

/// Full snapshot of the store
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<AppSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<Table>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<MenuCategory>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_items: Option<Vec<MenuItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<Order>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_items: Option<Vec<StockItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
}

#[derive(Clone)]
pub struct BackupService {
    store: CollectionStore,
}

impl BackupService {
    pub fn new(store: CollectionStore) -> Self {
        Self { store }
    }

    /// Snapshot every collection into one pretty-printed JSON document
    pub fn export_backup(&self) -> AppResult<String> {
        let snapshot = BackupSnapshot {
            exported_at: Some(Utc::now()),
            settings: Some(self.store.load_object(storage::SETTINGS)?),
            tables: Some(self.store.load(storage::TABLES)?),
            categories: Some(self.store.load(storage::CATEGORIES)?),
            menu_items: Some(self.store.load(storage::MENU_ITEMS)?),
            orders: Some(self.store.load(storage::ORDERS)?),
            stock_items: Some(self.store.load(storage::STOCK_ITEMS)?),
            users: Some(self.store.load(storage::USERS)?),
        };
        tracing::info!("backup exported");
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Restore collections from a backup document.
    ///
    /// The document is parsed in full before any write; a malformed
    /// backup leaves the store untouched. Only collections present in
    /// the snapshot are overwritten.
    pub fn restore_backup(&self, json: &str) -> AppResult<()> {
        let snapshot: BackupSnapshot = serde_json::from_str(json).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("invalid backup: {}", e))
        })?;
        self.restore_snapshot(snapshot)
    }

    pub fn restore_snapshot(&self, snapshot: BackupSnapshot) -> AppResult<()> {
        if let Some(settings) = &snapshot.settings {
            self.store.store_object(storage::SETTINGS, settings)?;
        }
        if let Some(tables) = &snapshot.tables {
            self.store.store(storage::TABLES, tables)?;
        }
        if let Some(categories) = &snapshot.categories {
            self.store.store(storage::CATEGORIES, categories)?;
        }
        if let Some(menu_items) = &snapshot.menu_items {
            self.store.store(storage::MENU_ITEMS, menu_items)?;
        }
        if let Some(orders) = &snapshot.orders {
            self.store.store(storage::ORDERS, orders)?;
        }
        if let Some(stock_items) = &snapshot.stock_items {
            self.store.store(storage::STOCK_ITEMS, stock_items)?;
        }
        if let Some(users) = &snapshot.users {
            self.store.store(storage::USERS, users)?;
        }
        tracing::info!("backup restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Position, TableStatus};

    fn table(id: &str, name: &str) -> Table {
        Table {
            id: id.to_string(),
            name: name.to_string(),
            capacity: 4,
            status: TableStatus::Available,
            position: Position::default(),
            current_order: None,
        }
    }

    fn service() -> BackupService {
        BackupService::new(CollectionStore::open_in_memory().unwrap())
    }

    #[test]
    fn test_export_then_restore_roundtrip() {
        let svc = service();
        svc.store
            .store(storage::TABLES, &[table("t1", "Meja 1")])
            .unwrap();
        let json = svc.export_backup().unwrap();

        let other = service();
        other.restore_backup(&json).unwrap();
        let tables: Vec<Table> = other.store.load(storage::TABLES).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "Meja 1");
    }

    #[test]
    fn test_malformed_backup_rejected_without_writes() {
        let svc = service();
        svc.store
            .store(storage::TABLES, &[table("t1", "Meja 1")])
            .unwrap();

        let err = svc.restore_backup("{\"tables\": \"not an array\"}").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);

        let tables: Vec<Table> = svc.store.load(storage::TABLES).unwrap();
        assert_eq!(tables.len(), 1);
    }

    #[test]
    fn test_absent_collections_left_untouched() {
        let svc = service();
        svc.store
            .store(storage::TABLES, &[table("t1", "Meja 1")])
            .unwrap();

        // snapshot carries only settings
        svc.restore_backup("{\"settings\": {\"storeName\": \"Warung Kita\"}}")
            .unwrap();

        let tables: Vec<Table> = svc.store.load(storage::TABLES).unwrap();
        assert_eq!(tables.len(), 1);
        let settings: AppSettings = svc.store.load_object(storage::SETTINGS).unwrap();
        assert_eq!(settings.store_name, "Warung Kita");
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let svc = service();
        let json = svc.export_backup().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["menuItems"].is_array());
        assert!(value["stockItems"].is_array());
        assert!(value["exportedAt"].is_string());
    }
}
