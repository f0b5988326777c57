//! Monitoring Adapters
//!
//! Liveness/readiness probes and Prometheus counters for the trade
//! store, mounted on the main HTTP router under `/api`.

pub mod health;
pub mod prometheus;

pub use self::prometheus::MetricsRegistry;
