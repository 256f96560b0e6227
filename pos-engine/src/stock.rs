//! Stock service
//!
//! One stock record per stock-managed menu item. Levels are derived, not
//! stored; adjustments clamp at zero.

use crate::repository::Repository;
use crate::storage::CollectionStore;
use chrono::Utc;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MenuItem, StockItem, StockItemUpsert, StockLevel};
use shared::util::entity_id;
use validator::Validate;

#[derive(Clone)]
pub struct StockService {
    stock: Repository<StockItem>,
    items: Repository<MenuItem>,
}

impl StockService {
    pub fn new(store: CollectionStore) -> Self {
        Self {
            stock: Repository::new(store.clone()),
            items: Repository::new(store),
        }
    }

    pub fn list(&self) -> AppResult<Vec<StockItem>> {
        self.stock.list()
    }

    pub fn for_menu_item(&self, menu_item_id: &str) -> AppResult<Option<StockItem>> {
        Ok(self
            .stock
            .list()?
            .into_iter()
            .find(|s| s.menu_item_id == menu_item_id))
    }

    /// Create or replace the stock record for a menu item.
    ///
    /// The menu item must exist and be stock-managed.
    pub fn upsert(&self, menu_item_id: &str, payload: StockItemUpsert) -> AppResult<StockItem> {
        payload.validate()?;
        let item = self.items.get_required(menu_item_id)?;
        if !item.is_stock_managed {
            return Err(AppError::new(ErrorCode::NotStockManaged)
                .with_detail("menuItemId", menu_item_id));
        }

        let record = match self.for_menu_item(menu_item_id)? {
            Some(existing) => {
                let record = StockItem {
                    current_stock: payload.current_stock,
                    min_stock: payload.min_stock,
                    max_stock: payload.max_stock,
                    unit: payload.unit,
                    last_updated: Utc::now(),
                    ..existing
                };
                self.stock.update(record)?
            }
            None => self.stock.insert(StockItem {
                id: entity_id(),
                menu_item_id: menu_item_id.to_string(),
                current_stock: payload.current_stock,
                min_stock: payload.min_stock,
                max_stock: payload.max_stock,
                unit: payload.unit,
                last_updated: Utc::now(),
            })?,
        };
        tracing::info!(
            menu_item_id = %menu_item_id,
            current = record.current_stock,
            "stock record upserted"
        );
        Ok(record)
    }

    /// Apply a signed delta to the current stock, clamped at zero
    pub fn adjust(&self, menu_item_id: &str, delta: i32) -> AppResult<StockItem> {
        let mut record = self
            .for_menu_item(menu_item_id)?
            .ok_or_else(|| {
                AppError::new(ErrorCode::StockRecordNotFound)
                    .with_detail("menuItemId", menu_item_id)
            })?;
        record.current_stock = (record.current_stock + delta).max(0);
        record.last_updated = Utc::now();
        self.stock.update(record)
    }

    pub fn delete(&self, menu_item_id: &str) -> AppResult<()> {
        let record = self.for_menu_item(menu_item_id)?.ok_or_else(|| {
            AppError::new(ErrorCode::StockRecordNotFound).with_detail("menuItemId", menu_item_id)
        })?;
        self.stock.remove(&record.id)
    }

    /// Classification for a menu item; `Unknown` when the item or its
    /// stock record is missing
    pub fn level(&self, menu_item_id: &str) -> AppResult<StockLevel> {
        Ok(self
            .for_menu_item(menu_item_id)?
            .map(|s| s.level())
            .unwrap_or(StockLevel::Unknown))
    }

    /// Records currently out of or low on stock
    pub fn low_stock(&self) -> AppResult<Vec<StockItem>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|s| matches!(s.level(), StockLevel::Out | StockLevel::Low))
            .collect())
    }

    /// Total value of held stock: Σ currentStock × menu item price
    pub fn stock_value(&self) -> AppResult<f64> {
        let items = self.items.list()?;
        Ok(self
            .list()?
            .iter()
            .filter_map(|s| {
                items
                    .iter()
                    .find(|i| i.id == s.menu_item_id)
                    .map(|i| i.price * s.current_stock as f64)
            })
            .sum())
    }
}
