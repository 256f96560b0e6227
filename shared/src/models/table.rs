//! Dining Table Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Table status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Cleaning,
}

/// Floor-plan position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub name: String,
    pub capacity: i32,
    pub status: TableStatus,
    pub position: Position,
    /// Weak back-reference to the order currently occupying this table.
    /// Maintained by the order lifecycle, cleared on terminal transitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_order: Option<String>,
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TableCreate {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub capacity: i32,
    pub position: Option<Position>,
}

/// Update table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub status: Option<TableStatus>,
    pub position: Option<Position>,
}
