//! POS engine for a small restaurant
//!
//! Embedded, single-process engine behind the point-of-sale UI: floor
//! plan, menu catalog, order lifecycle with pricing, stock tracking,
//! sales reporting and export/backup, persisted in redb.
//!
//! # Module structure
//!
//! ```text
//! pos-engine/src/
//! ├── storage/     # redb collection store
//! ├── repository/  # generic collection repository
//! ├── settings/    # app settings singleton
//! ├── tables/      # floor plan
//! ├── catalog/     # categories and menu items
//! ├── orders/      # cart, pricing, order lifecycle
//! ├── stock/       # stock records and levels
//! ├── reports/     # sales reporting
//! ├── export/      # CSV / JSON export
//! ├── backup/      # snapshot backup and restore
//! └── users/       # staff accounts
//! ```

pub mod backup;
pub mod catalog;
pub mod export;
pub mod logger;
pub mod orders;
pub mod pos;
pub mod reports;
pub mod repository;
pub mod settings;
pub mod stock;
pub mod storage;
pub mod tables;
pub mod users;

pub use pos::Pos;
pub use storage::CollectionStore;
