//! Application Settings Model
//!
//! Process-wide singleton configuration with explicit load/save lifecycle.
//! Rates are percentages (10 = 10%). The pricing calculation takes a
//! settings value as input rather than reading ambient global state.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Display language
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Bahasa Indonesia
    #[default]
    Id,
    /// English
    En,
}

/// Application settings singleton
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub store_name: String,
    pub store_address: String,
    pub store_phone: String,
    pub currency: String,
    /// Tax rate percentage (0–100)
    #[validate(range(min = 0.0, max = 100.0))]
    pub tax_rate: f64,
    /// Service charge rate percentage (0–100)
    #[validate(range(min = 0.0, max = 100.0))]
    pub service_charge_rate: f64,
    pub enable_tax: bool,
    pub enable_service_charge: bool,
    pub enable_stock_management: bool,
    pub print_receipt: bool,
    pub dark_mode: bool,
    pub language: Language,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            store_name: String::new(),
            store_address: String::new(),
            store_phone: String::new(),
            currency: "IDR".to_string(),
            tax_rate: 10.0,
            service_charge_rate: 5.0,
            enable_tax: true,
            enable_service_charge: true,
            enable_stock_management: true,
            print_receipt: true,
            dark_mode: false,
            language: Language::Id,
        }
    }
}
