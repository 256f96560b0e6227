//! Order service
//!
//! Order creation from a cart, the status state machine, table occupancy
//! and transaction-history queries. Totals are computed once at creation
//! from the settings in effect; later settings changes never touch
//! existing orders.

pub mod cart;
pub mod pricing;

pub use cart::Cart;
pub use pricing::{OrderTotals, calculate_totals};

use crate::repository::Repository;
use crate::settings::SettingsService;
use crate::storage::CollectionStore;
use chrono::{NaiveDate, Utc};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderStatus, PaymentStatus, Table, TableStatus};
use shared::util::entity_id;

/// Parameters for creating an order from a cart
#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    /// Table to seat the order at; `None` means takeaway
    pub table_id: Option<String>,
    pub customer_id: Option<String>,
    pub cashier_id: String,
    pub discount: f64,
}

/// Filters for the transaction-history search; all optional, combined with AND
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    /// Case-insensitive substring over order id and table name
    pub term: Option<String>,
    /// Calendar day of `createdAt`
    pub date: Option<NaiveDate>,
    pub status: Option<OrderStatus>,
}

#[derive(Clone)]
pub struct OrderService {
    orders: Repository<Order>,
    tables: Repository<Table>,
    settings: SettingsService,
}

impl OrderService {
    pub fn new(store: CollectionStore) -> Self {
        Self {
            orders: Repository::new(store.clone()),
            tables: Repository::new(store.clone()),
            settings: SettingsService::new(store),
        }
    }

    pub fn list(&self) -> AppResult<Vec<Order>> {
        self.orders.list()
    }

    pub fn get(&self, id: &str) -> AppResult<Order> {
        self.orders.get_required(id)
    }

    /// Create an order from the cart's line items.
    ///
    /// The selected table must exist and be available; it is marked
    /// occupied with a back-reference to the new order. Nothing is
    /// persisted when validation fails.
    pub fn create_order(&self, cart: Cart, request: NewOrder) -> AppResult<Order> {
        if cart.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }

        let table = match &request.table_id {
            Some(table_id) => {
                let table = self.tables.get_required(table_id)?;
                if table.status != TableStatus::Available {
                    return Err(AppError::new(ErrorCode::TableOccupied)
                        .with_detail("tableId", table_id.as_str())
                        .with_detail("status", format!("{:?}", table.status).to_lowercase()));
                }
                Some(table)
            }
            None => None,
        };

        let settings = self.settings.get()?;
        let items = cart.into_items();
        let totals = calculate_totals(&items, &settings, request.discount);
        let now = Utc::now();

        let order = Order {
            id: entity_id(),
            table_id: request.table_id,
            items,
            status: OrderStatus::Pending,
            subtotal: totals.subtotal,
            tax: totals.tax,
            service_charge: totals.service_charge,
            discount: totals.discount,
            total: totals.total,
            created_at: now,
            updated_at: now,
            customer_id: request.customer_id,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            cashier_id: request.cashier_id,
        };
        let order = self.orders.insert(order)?;

        if let Some(mut table) = table {
            table.status = TableStatus::Occupied;
            table.current_order = Some(order.id.clone());
            self.tables.update(table)?;
        }

        tracing::info!(
            order_id = %order.id,
            table_id = ?order.table_id,
            total = order.total,
            "order created"
        );
        Ok(order)
    }

    /// Advance an order along the state machine.
    ///
    /// Illegal transitions are rejected and leave the order untouched.
    /// Reaching a terminal state releases the order's table.
    pub fn update_status(&self, id: &str, target: OrderStatus) -> AppResult<Order> {
        let mut order = self.orders.get_required(id)?;
        if !order.status.can_transition_to(target) {
            return Err(AppError::new(ErrorCode::OrderInvalidTransition)
                .with_detail("orderId", id)
                .with_detail("from", serde_json::json!(order.status))
                .with_detail("to", serde_json::json!(target)));
        }
        order.status = target;
        order.updated_at = Utc::now();
        let order = self.orders.update(order)?;

        if target.is_terminal() {
            self.release_table(&order)?;
        }
        tracing::info!(order_id = %id, status = ?target, "order status updated");
        Ok(order)
    }

    pub fn cancel(&self, id: &str) -> AppResult<Order> {
        self.update_status(id, OrderStatus::Cancelled)
    }

    pub fn set_payment(
        &self,
        id: &str,
        status: PaymentStatus,
        method: Option<String>,
    ) -> AppResult<Order> {
        let mut order = self.orders.get_required(id)?;
        order.payment_status = status;
        order.payment_method = method;
        order.updated_at = Utc::now();
        self.orders.update(order)
    }

    /// Delete an order outright, releasing its table if still held
    pub fn delete(&self, id: &str) -> AppResult<()> {
        let order = self.orders.get_required(id)?;
        self.release_table(&order)?;
        self.orders.remove(id)?;
        tracing::info!(order_id = %id, "order deleted");
        Ok(())
    }

    /// Orders still in the active pipeline
    pub fn active(&self) -> AppResult<Vec<Order>> {
        Ok(self.list()?.into_iter().filter(|o| o.is_active()).collect())
    }

    /// Completed and cancelled orders, newest first
    pub fn history(&self) -> AppResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .list()?
            .into_iter()
            .filter(|o| !o.is_active())
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// The active order seated at a table, if any
    pub fn order_for_table(&self, table_id: &str) -> AppResult<Option<Order>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|o| o.is_active() && o.table_id.as_deref() == Some(table_id)))
    }

    /// Transaction-history search, newest first
    pub fn search(&self, query: &TransactionQuery) -> AppResult<Vec<Order>> {
        let tables = self.tables.list()?;
        let term = query.term.as_ref().map(|t| t.to_lowercase());

        let mut orders: Vec<Order> = self
            .list()?
            .into_iter()
            .filter(|o| {
                query.status.is_none_or(|s| o.status == s)
                    && query
                        .date
                        .is_none_or(|d| o.created_at.date_naive() == d)
                    && term.as_ref().is_none_or(|t| {
                        if o.id.to_lowercase().contains(t) {
                            return true;
                        }
                        o.table_id
                            .as_ref()
                            .and_then(|tid| tables.iter().find(|tb| &tb.id == tid))
                            .is_some_and(|tb| tb.name.to_lowercase().contains(t))
                    })
            })
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Set the order's table back to available and clear the back-reference
    fn release_table(&self, order: &Order) -> AppResult<()> {
        let Some(table_id) = &order.table_id else {
            return Ok(());
        };
        // the table may have been deleted while the order was open
        if let Some(mut table) = self.tables.get(table_id)? {
            if table.current_order.as_deref() == Some(&order.id) {
                table.status = TableStatus::Available;
                table.current_order = None;
                self.tables.update(table)?;
            }
        }
        Ok(())
    }
}
