//! weldtrack-core: record store, history ledger, and aggregation logic.
//!
//! # Conventions
//!
//! - **Errors**: typed [`Error`] variants for domain failures, `rusqlite`
//!   passthrough for storage failures.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).
//! - **Time**: `chrono::DateTime<Utc>`; callers pass `now` explicitly so
//!   the mutation protocol stays testable.

pub mod db;
pub mod error;
pub mod ledger;
pub mod model;
pub mod month;
pub mod norms;
pub mod summary;
pub mod transfer;

pub use error::{Error, Result};
