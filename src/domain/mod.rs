//! Domain layer - Journal records and statistics.
//!
//! Pure types and calculations with no I/O (hexagonal architecture inner
//! ring). Everything here is testable in isolation.

pub mod metrics;
pub mod trade;

// Re-export core types for convenience
pub use metrics::TradeMetrics;
pub use trade::{Trade, TradeId, TradeIdGenerator, TradeStatus};
