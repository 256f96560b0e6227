//! Menu Category Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategoryCreate {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

/// Update category payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategoryUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
