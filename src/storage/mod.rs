//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - customers(id, first_name, last_name, phone_number)
//! - addresses(id, customer_id, address_details, city, state, pin_code)
//!
//! Phone-number uniqueness and the customer-to-address cascade delete are
//! enforced by the engine, not by callers.

pub mod schema;
pub mod sqlite;

pub use sqlite::{CountStats, SqliteStore};
