//! Data models
//!
//! Shared between the API server and its tests.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (PostgreSQL BIGSERIAL); timestamps are Unix millis.
//! JSON uses camelCase, which is what the admin panel reads.

pub mod admin;
pub mod business;
pub mod campaign;
pub mod customer;
pub mod ledger;
pub mod wallet;

// Re-exports
pub use admin::*;
pub use business::*;
pub use campaign::*;
pub use customer::*;
pub use ledger::*;
pub use wallet::*;
