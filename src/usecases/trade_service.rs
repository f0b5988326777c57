//! Trade Store Service - Journal CRUD, Bulk Transfer and Metrics
//!
//! Every operation reloads the collection from the repository, transforms
//! it in memory and (for mutations) writes the whole collection back:
//! - `list` / `export`: read back verbatim
//! - `create`: append with a store-assigned `id` and `createdAt`
//! - `update`: shallow-merge caller fields over one record
//! - `delete`: drop every record with the given id
//! - `import`: replace the collection wholesale
//! - `metrics`: aggregate statistics
//!
//! Mutations run one at a time behind a write lock so two concurrent
//! read-modify-write cycles cannot lose each other's changes.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use super::error::{Result, TradeError};
use crate::domain::metrics::TradeMetrics;
use crate::domain::trade::{Trade, TradeIdGenerator};
use crate::ports::repository::TradeRepository;

/// File name offered to the browser for `export`.
pub const EXPORT_FILENAME: &str = "trades-backup.json";

/// Outcome of [`TradeService::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deletion {
    /// Records that carried the id.
    pub removed: usize,
    /// Records left in the collection.
    pub remaining: usize,
}

/// The trade store: owns the repository and serializes writers.
pub struct TradeService<R: TradeRepository + ?Sized = dyn TradeRepository> {
    /// Persistence port.
    repository: Arc<R>,
    /// Held across load → mutate → save for every mutation.
    write_lock: Mutex<()>,
    /// Creation-ordered id source.
    ids: TradeIdGenerator,
}

impl<R: TradeRepository + ?Sized> TradeService<R> {
    /// Create a new trade service over a repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
            ids: TradeIdGenerator::new(),
        }
    }

    /// Full collection in stored order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Trade>> {
        self.load().await
    }

    /// Append a new record, stamping `id` and `createdAt`.
    ///
    /// Caller-supplied values for the two stamped fields are overwritten.
    /// Returns the stored record and the collection size after the append.
    #[instrument(skip(self, fields))]
    pub async fn create(&self, fields: Map<String, Value>) -> Result<(Trade, usize)> {
        let _guard = self.write_lock.lock().await;
        let mut trades = self.load().await?;

        let now = Utc::now();
        let id = self.ids.next_id(now, &trades);
        let mut trade = Trade::from_fields(fields);
        trade.assign_identity(id.clone(), now);

        trades.push(trade.clone());
        self.store(&trades).await?;

        info!(id = %id, total = trades.len(), "Trade created");
        Ok((trade, trades.len()))
    }

    /// Merge `patch` over the record with `id` and return the result.
    ///
    /// Fails with `NotFound` without touching storage if no record matches.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: Map<String, Value>) -> Result<Trade> {
        let _guard = self.write_lock.lock().await;
        let mut trades = self.load().await?;

        let Some(trade) = trades.iter_mut().find(|t| t.id() == Some(id)) else {
            warn!("Update for unknown trade");
            return Err(TradeError::NotFound(id.to_string()));
        };
        trade.merge(patch);
        let merged = trade.clone();

        self.store(&trades).await?;

        info!("Trade updated");
        Ok(merged)
    }

    /// Remove every record with `id`; zero matches is not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Deletion> {
        let _guard = self.write_lock.lock().await;
        let mut trades = self.load().await?;

        let before = trades.len();
        trades.retain(|t| t.id() != Some(id));
        let removed = before - trades.len();

        self.store(&trades).await?;

        let remaining = trades.len();
        info!(removed, remaining, "Trade delete applied");
        Ok(Deletion { removed, remaining })
    }

    /// Collection serialized with two-space indentation, ready to be
    /// offered as [`EXPORT_FILENAME`].
    #[instrument(skip(self))]
    pub async fn export(&self) -> Result<String> {
        let trades = self.load().await?;
        let body = serde_json::to_string_pretty(&trades).map_err(|e| {
            error!(error = %e, "Failed to serialize export");
            TradeError::StorageRead(anyhow::Error::new(e).context("Failed to serialize export"))
        })?;

        info!(count = trades.len(), "Trades exported");
        Ok(body)
    }

    /// Replace the whole collection with `payload`.
    ///
    /// `payload` must be a JSON array; anything else is rejected before
    /// storage is touched. Elements are stored verbatim, whatever their
    /// shape. Returns the number of records stored.
    #[instrument(skip(self, payload))]
    pub async fn import(&self, payload: Value) -> Result<usize> {
        let Value::Array(items) = payload else {
            warn!("Import payload is not an array");
            return Err(TradeError::InvalidInput(
                "Import payload must be an array of trades".to_string(),
            ));
        };

        let trades: Vec<Trade> = items.into_iter().map(Trade::from_value).collect();

        let _guard = self.write_lock.lock().await;
        self.store(&trades).await?;

        info!(count = trades.len(), "Trades imported");
        Ok(trades.len())
    }

    /// Aggregate statistics over the current collection.
    #[instrument(skip(self))]
    pub async fn metrics(&self) -> Result<TradeMetrics> {
        let trades = self.load().await?;
        Ok(TradeMetrics::from_trades(&trades))
    }

    /// Whether the repository is reachable (readiness probe).
    pub async fn is_healthy(&self) -> bool {
        self.repository.is_healthy().await
    }

    async fn load(&self) -> Result<Vec<Trade>> {
        self.repository.load().await.map_err(|e| {
            error!(error = format!("{e:#}"), "Trade document read failed");
            TradeError::StorageRead(e)
        })
    }

    async fn store(&self, trades: &[Trade]) -> Result<()> {
        self.repository.save(trades).await.map_err(|e| {
            error!(error = format!("{e:#}"), "Trade document write failed");
            TradeError::StorageWrite(e)
        })
    }
}
