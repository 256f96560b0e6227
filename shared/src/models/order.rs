//! Order Model
//!
//! Orders own their line items exclusively; the table reference is weak.
//! Status follows a forward-only state machine with cancellation allowed
//! from any non-terminal state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether this status is terminal (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// The single legal forward step from this status, if any
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Pending => Some(Self::Preparing),
            Self::Preparing => Some(Self::Ready),
            Self::Ready => Some(Self::Served),
            Self::Served => Some(Self::Completed),
            Self::Completed | Self::Cancelled => None,
        }
    }

    /// Whether a transition to `target` is legal.
    ///
    /// Transitions are one-directional, single-step forward only; no
    /// skipping, no reverting. Cancellation is allowed from any
    /// non-terminal state.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if target == Self::Cancelled {
            return true;
        }
        self.next() == Some(target)
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Partial,
}

/// Order line item
///
/// Price is captured from the menu item at add-time and never re-read
/// from the catalog afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub menu_item_id: String,
    pub quantity: i32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderItem {
    /// Line total (price × quantity), unrounded
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Weak reference to the table this order occupies (None = takeaway)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub subtotal: f64,
    pub tax: f64,
    pub service_charge: f64,
    pub discount: f64,
    pub total: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub cashier_id: String,
}

impl Order {
    /// Whether the order is still in the active pipeline
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}
