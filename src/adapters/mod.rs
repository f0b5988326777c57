//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` and exposes the
//! use cases to the outside world.
//!
//! Adapter categories:
//! - `http`: axum REST API and front-end fallback
//! - `monitoring`: health probes and Prometheus metrics
//! - `persistence`: JSON document trade repository

pub mod http;
pub mod monitoring;
pub mod persistence;
