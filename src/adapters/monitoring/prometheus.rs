//! Prometheus Metrics Registry - Trade Store Observability
//!
//! Counts store operations by outcome, times them, tracks storage
//! failures and the size of the last-seen collection. Rendered in the
//! text exposition format on `/api/prometheus`.

use std::time::Instant;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

use crate::usecases::TradeError;

/// Centralized Prometheus metrics for the trade store.
///
/// All metrics follow the naming convention `trade_journal_*`.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Store operations by name and outcome.
    pub operations: IntCounterVec,
    /// Store operation latency (seconds).
    pub operation_latency: HistogramVec,
    /// Storage failures by kind (read/write).
    pub storage_errors: IntCounterVec,
    /// Records in the collection after the last list, create, delete,
    /// metrics or import.
    pub trades_stored: IntGauge,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let operations = IntCounterVec::new(
            Opts::new(
                "trade_journal_operations_total",
                "Trade store operations by outcome",
            ),
            &["operation", "outcome"],
        )?;

        let operation_latency = HistogramVec::new(
            HistogramOpts::new(
                "trade_journal_operation_latency_seconds",
                "Trade store operation latency in seconds",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
            &["operation"],
        )?;

        let storage_errors = IntCounterVec::new(
            Opts::new(
                "trade_journal_storage_errors_total",
                "Trade document read/write failures",
            ),
            &["kind"],
        )?;

        let trades_stored = IntGauge::new(
            "trade_journal_trades_stored",
            "Number of trades in the collection",
        )?;

        registry.register(Box::new(operations.clone()))?;
        registry.register(Box::new(operation_latency.clone()))?;
        registry.register(Box::new(storage_errors.clone()))?;
        registry.register(Box::new(trades_stored.clone()))?;

        Ok(Self {
            registry,
            operations,
            operation_latency,
            storage_errors,
            trades_stored,
        })
    }

    /// Record one finished store operation.
    pub fn observe<T>(
        &self,
        operation: &str,
        started: Instant,
        result: &Result<T, TradeError>,
    ) {
        self.operation_latency
            .with_label_values(&[operation])
            .observe(started.elapsed().as_secs_f64());

        let outcome = match result {
            Ok(_) => "ok",
            Err(TradeError::NotFound(_)) => "not_found",
            Err(TradeError::InvalidInput(_)) => "invalid_input",
            Err(TradeError::StorageRead(_)) => {
                self.storage_errors.with_label_values(&["read"]).inc();
                "storage_error"
            }
            Err(TradeError::StorageWrite(_)) => {
                self.storage_errors.with_label_values(&["write"]).inc();
                "storage_error"
            }
        };
        self.operations
            .with_label_values(&[operation, outcome])
            .inc();
    }

    pub fn set_trades_stored(&self, count: usize) {
        self.trades_stored
            .set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    /// Render all metrics in the Prometheus text format.
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
