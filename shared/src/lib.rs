//! Shared types for the POS core
//!
//! Entity models, create/update payloads, the unified error system,
//! and time/ID utilities used across the workspace.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
