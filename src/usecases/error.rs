//! Trade store error taxonomy.

use crate::domain::trade::TradeId;

pub type Result<T> = std::result::Result<T, TradeError>;

#[derive(thiserror::Error, Debug)]
pub enum TradeError {
    /// The trade document is missing, unreadable, or not an array of records.
    #[error("Failed to load trades")]
    StorageRead(#[source] anyhow::Error),

    /// The trade collection could not be serialized or written back.
    #[error("Failed to save trades")]
    StorageWrite(#[source] anyhow::Error),

    /// No record carries the requested id.
    #[error("Trade not found: {0}")]
    NotFound(TradeId),

    /// The caller payload has the wrong shape.
    #[error("{0}")]
    InvalidInput(String),
}
