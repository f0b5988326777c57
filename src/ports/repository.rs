//! Repository Port - Trade Collection Persistence Interface
//!
//! The whole journal is one ordered collection. Implementations load and
//! replace it wholesale; there is no per-record access path.

use async_trait::async_trait;

use crate::domain::trade::Trade;

/// Trait for trade collection storage providers.
///
/// `save` must replace the stored collection atomically: a reader that
/// races a writer sees either the old or the new collection, never a
/// partial one.
#[async_trait]
pub trait TradeRepository: Send + Sync + 'static {
  /// Load the full collection in stored order.
  ///
  /// Fails if the backing document is missing, unreadable, or not an
  /// array of records.
  async fn load(&self) -> anyhow::Result<Vec<Trade>>;

  /// Replace the stored collection with `trades`.
  async fn save(&self, trades: &[Trade]) -> anyhow::Result<()>;

  /// Check if the backing store is reachable (readiness probe).
  async fn is_healthy(&self) -> bool;
}
