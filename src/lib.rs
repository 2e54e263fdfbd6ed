//! # Rolodex - Customer Relationship Record-Keeper
//!
//! A small CRUD service for customer records and the addresses they own.
//!
//! Rolodex provides:
//! - Customer records with a searchable, sortable, paginated listing
//! - One-to-many address records per customer (removed with their owner)
//! - SQLite-backed storage with engine-enforced integrity rules
//! - A JSON API for the presentation layer

pub mod config;
pub mod listing;
pub mod model;
pub mod server;
pub mod storage;

// Re-exports for convenient access
pub use listing::{CustomerPage, ListParams, Pagination, SortColumn, SortOrder};
pub use model::{Address, AddressFields, AddressInput, Customer, CustomerInput};
pub use storage::SqliteStore;

/// Result type alias for Rolodex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Rolodex operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field was missing or empty; caller-correctable.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness rule was violated; caller-correctable.
    #[error("{0}")]
    Conflict(String),

    /// The referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
