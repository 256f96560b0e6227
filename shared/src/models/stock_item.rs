//! Stock Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Derived stock classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    /// currentStock ≤ 0
    Out,
    /// 0 < currentStock ≤ minStock
    Low,
    /// currentStock > maxStock
    High,
    Normal,
    /// No stock record exists for the item
    Unknown,
}

/// Stock record for a stock-managed menu item (one-to-one)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: String,
    pub menu_item_id: String,
    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,
    pub unit: String,
    pub last_updated: DateTime<Utc>,
}

impl StockItem {
    /// Classify the current stock against the min/max thresholds
    pub fn level(&self) -> StockLevel {
        if self.current_stock <= 0 {
            StockLevel::Out
        } else if self.current_stock <= self.min_stock {
            StockLevel::Low
        } else if self.current_stock > self.max_stock {
            StockLevel::High
        } else {
            StockLevel::Normal
        }
    }
}

/// Upsert stock record payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockItemUpsert {
    #[validate(range(min = 0))]
    pub current_stock: i32,
    #[validate(range(min = 0))]
    pub min_stock: i32,
    #[validate(range(min = 0))]
    pub max_stock: i32,
    #[validate(length(min = 1))]
    pub unit: String,
}

impl Default for StockItemUpsert {
    fn default() -> Self {
        Self {
            current_stock: 0,
            min_stock: 0,
            max_stock: 0,
            unit: "pcs".to_string(),
        }
    }
}
