//! Engine facade
//!
//! One handle over the whole engine: opens the store and hands out the
//! per-domain services, all sharing the same database.

use crate::backup::BackupService;
use crate::catalog::CatalogService;
use crate::export::ExportService;
use crate::orders::OrderService;
use crate::reports::ReportService;
use crate::settings::SettingsService;
use crate::stock::StockService;
use crate::storage::CollectionStore;
use crate::tables::TableService;
use crate::users::UserService;
use shared::error::AppResult;
use std::path::Path;

#[derive(Clone)]
pub struct Pos {
    settings: SettingsService,
    tables: TableService,
    catalog: CatalogService,
    orders: OrderService,
    stock: StockService,
    reports: ReportService,
    export: ExportService,
    backup: BackupService,
    users: UserService,
}

impl Pos {
    /// Open or create the engine database at the given path
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let store = CollectionStore::open(path)?;
        Ok(Self::with_store(store))
    }

    pub fn with_store(store: CollectionStore) -> Self {
        Self {
            settings: SettingsService::new(store.clone()),
            tables: TableService::new(store.clone()),
            catalog: CatalogService::new(store.clone()),
            orders: OrderService::new(store.clone()),
            stock: StockService::new(store.clone()),
            reports: ReportService::new(store.clone()),
            export: ExportService::new(store.clone()),
            backup: BackupService::new(store.clone()),
            users: UserService::new(store),
        }
    }

    pub fn settings(&self) -> &SettingsService {
        &self.settings
    }

    pub fn tables(&self) -> &TableService {
        &self.tables
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn orders(&self) -> &OrderService {
        &self.orders
    }

    pub fn stock(&self) -> &StockService {
        &self.stock
    }

    pub fn reports(&self) -> &ReportService {
        &self.reports
    }

    pub fn export(&self) -> &ExportService {
        &self.export
    }

    pub fn backup(&self) -> &BackupService {
        &self.backup
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }
}
