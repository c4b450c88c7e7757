//! Shared types for the loyalty admin backend
//!
//! Error types, API response structures and the persistence models used by
//! the server crate.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
