//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) the use-case layer requires from the
//! outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `TradeRepository`: persistence of the trade collection document

pub mod repository;
