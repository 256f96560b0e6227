//! Draft order line items
//!
//! The cart holds line items before an order exists. Prices are captured
//! from the menu item when a line is added and never re-read from the
//! catalog afterwards.

use shared::models::{MenuItem, OrderItem};
use shared::util::entity_id;

/// Draft line items for a new order
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<OrderItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<OrderItem> {
        self.items
    }

    /// Add one unit of a menu item.
    ///
    /// If a line for the same menu item already exists its quantity is
    /// incremented; otherwise a new line is appended with quantity 1 and
    /// the item's current price captured.
    pub fn add_item(&mut self, menu_item: &MenuItem) -> &OrderItem {
        if let Some(idx) = self
            .items
            .iter()
            .position(|i| i.menu_item_id == menu_item.id)
        {
            self.items[idx].quantity += 1;
            &self.items[idx]
        } else {
            self.items.push(OrderItem {
                id: entity_id(),
                menu_item_id: menu_item.id.clone(),
                quantity: 1,
                price: menu_item.price,
                notes: None,
            });
            self.items.last().expect("just pushed")
        }
    }

    /// Set a line's quantity; a quantity ≤ 0 removes the line entirely
    pub fn update_quantity(&mut self, item_id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(item_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) {
            item.quantity = quantity;
        }
    }

    pub fn remove_item(&mut self, item_id: &str) {
        self.items.retain(|i| i.id != item_id);
    }
}
