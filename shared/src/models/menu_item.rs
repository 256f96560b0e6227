//! Menu Item Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    /// Category reference (String ID, required)
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub is_active: bool,
    /// Denormalized current stock, present for stock-managed items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    pub is_stock_managed: bool,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub category_id: String,
    pub image: Option<String>,
    pub is_stock_managed: Option<bool>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub category_id: Option<String>,
    pub image: Option<String>,
    pub is_active: Option<bool>,
    pub is_stock_managed: Option<bool>,
}
