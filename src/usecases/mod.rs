//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates the domain types with the repository port.
//!
//! Use cases:
//! - `TradeService`: journal CRUD, bulk import/export, metrics

pub mod error;
pub mod trade_service;

pub use error::TradeError;
pub use trade_service::{Deletion, EXPORT_FILENAME, TradeService};
