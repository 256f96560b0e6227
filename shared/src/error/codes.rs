//! Unified error codes for the POS core
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Catalog errors
//! - 7xxx: Table errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and stable persistence across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order contains no line items
    OrderEmpty = 4002,
    /// Status transition not allowed by the order state machine
    OrderInvalidTransition = 4003,
    /// Order already in a terminal state
    OrderTerminal = 4004,
    /// Line item not found within the order
    OrderItemNotFound = 4005,

    // ==================== 6xxx: Catalog ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Category not found
    CategoryNotFound = 6002,
    /// Menu item is not stock managed
    NotStockManaged = 6003,
    /// No stock record exists for the menu item
    StockRecordNotFound = 6004,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table is not available for a new order
    TableOccupied = 7002,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage engine error
    StorageError = 9002,
    /// Serialization or deserialization error
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::ValueOutOfRange => "Value out of range",

            Self::OrderNotFound => "Order not found",
            Self::OrderEmpty => "Order contains no items",
            Self::OrderInvalidTransition => "Order status transition not allowed",
            Self::OrderTerminal => "Order is already in a terminal state",
            Self::OrderItemNotFound => "Order item not found",

            Self::MenuItemNotFound => "Menu item not found",
            Self::CategoryNotFound => "Category not found",
            Self::NotStockManaged => "Menu item is not stock managed",
            Self::StockRecordNotFound => "No stock record for menu item",

            Self::TableNotFound => "Table not found",
            Self::TableOccupied => "Table is not available",

            Self::UserNotFound => "User not found",

            Self::InternalError => "Internal error",
            Self::StorageError => "Storage engine error",
            Self::SerializationError => "Serialization error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            8 => Self::ValueOutOfRange,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderEmpty,
            4003 => Self::OrderInvalidTransition,
            4004 => Self::OrderTerminal,
            4005 => Self::OrderItemNotFound,

            6001 => Self::MenuItemNotFound,
            6002 => Self::CategoryNotFound,
            6003 => Self::NotStockManaged,
            6004 => Self::StockRecordNotFound,

            7001 => Self::TableNotFound,
            7002 => Self::TableOccupied,

            8001 => Self::UserNotFound,

            9001 => Self::InternalError,
            9002 => Self::StorageError,
            9003 => Self::SerializationError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::OrderInvalidTransition,
            ErrorCode::TableOccupied,
            ErrorCode::StorageError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(12345), Err(InvalidErrorCode(12345)));
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
        let back: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(back, ErrorCode::OrderNotFound);
    }
}
