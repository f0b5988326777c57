//! Persistence Adapters - JSON Document Storage
//!
//! Implements the `TradeRepository` port with a single pretty-printed
//! JSON array on disk, replaced atomically on every save.
//! No database dependency.

pub mod document;

pub use document::JsonFileRepository;
