//! Entity models for the POS core
//!
//! Each persisted collection has an entity struct plus create/update
//! payloads. JSON shapes use camelCase fields and lowercase enum variants
//! so stored collections and backups keep the documented wire format.

mod category;
mod menu_item;
mod order;
mod settings;
mod stock_item;
mod table;
mod user;

pub use category::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{Order, OrderItem, OrderStatus, PaymentStatus};
pub use settings::{AppSettings, Language};
pub use stock_item::{StockItem, StockItemUpsert, StockLevel};
pub use table::{Position, Table, TableCreate, TableStatus, TableUpdate};
pub use user::{User, UserCreate, UserRole, UserUpdate};
