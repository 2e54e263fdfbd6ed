//! SQLite storage implementation

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use super::schema;
use crate::listing::{CustomerPage, ListParams, Pagination};
use crate::model::{Address, AddressFields, AddressInput, Customer, CustomerInput};
use crate::{Error, Result};

const CUSTOMER_COLUMNS: &str = "id, first_name, last_name, phone_number";
const ADDRESS_COLUMNS: &str = "id, customer_id, address_details, city, state, pin_code";
const SEARCH_PREDICATE: &str =
    "first_name LIKE ?1 OR last_name LIKE ?1 OR phone_number LIKE ?1";

/// SQLite-backed store for customer and address records.
///
/// This is the query/mutation service: it validates inputs, builds bounded
/// parameterized queries, and decodes engine constraint failures into the
/// crate error taxonomy. Each handle owns its connection; there is no
/// ambient global.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        // Cascade delete only fires with foreign keys switched on, and the
        // pragma is per-connection in SQLite.
        self.conn.pragma_update(None, "foreign_keys", true)?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Customer Operations ==========

    /// One page of customers matching the normalized parameters, together
    /// with the pagination envelope.
    ///
    /// Count and page fetch are separate statements; a write landing between
    /// them can briefly skew `total` against the returned rows.
    pub fn list_customers(&self, params: &ListParams) -> Result<CustomerPage> {
        let order = format!(
            " ORDER BY {} {}",
            params.sort_by.as_str(),
            params.sort_order.as_str()
        );

        let (total, rows) = if let Some(search) = &params.search {
            let pattern = format!("%{search}%");
            let total: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM customers WHERE {SEARCH_PREDICATE}"),
                [&pattern],
                |row| row.get(0),
            )?;

            let sql = format!(
                "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE {SEARCH_PREDICATE}{order} LIMIT ?2 OFFSET ?3"
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params![pattern, params.limit, params.offset()], |row| {
                    Self::row_to_customer(row)
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            (total, rows)
        } else {
            let total: i64 =
                self.conn
                    .query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?;

            let sql =
                format!("SELECT {CUSTOMER_COLUMNS} FROM customers{order} LIMIT ?1 OFFSET ?2");
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params![params.limit, params.offset()], |row| {
                    Self::row_to_customer(row)
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            (total, rows)
        };

        Ok(CustomerPage {
            rows,
            pagination: Pagination::new(params, total as u64),
        })
    }

    /// Get a customer by id
    pub fn get_customer(&self, id: i64) -> Result<Option<Customer>> {
        self.conn
            .query_row(
                &format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1"),
                [id],
                Self::row_to_customer,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Insert a new customer, returning it with the assigned id.
    pub fn create_customer(&self, input: &CustomerInput) -> Result<Customer> {
        input.validate()?;
        self.conn
            .execute(
                "INSERT INTO customers (first_name, last_name, phone_number) VALUES (?1, ?2, ?3)",
                params![input.first_name, input.last_name, input.phone_number],
            )
            .map_err(Self::decode_phone_conflict)?;

        Ok(Customer {
            id: self.conn.last_insert_rowid(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            phone_number: input.phone_number.clone(),
        })
    }

    /// Replace all three fields of an existing customer. Partial update is
    /// not supported.
    pub fn update_customer(&self, id: i64, input: &CustomerInput) -> Result<()> {
        input.validate()?;
        let changed = self
            .conn
            .execute(
                "UPDATE customers SET first_name = ?1, last_name = ?2, phone_number = ?3 WHERE id = ?4",
                params![input.first_name, input.last_name, input.phone_number, id],
            )
            .map_err(Self::decode_phone_conflict)?;

        if changed == 0 {
            return Err(Error::NotFound("Customer not found".to_string()));
        }
        Ok(())
    }

    /// Delete a customer; the engine cascades to its addresses.
    pub fn delete_customer(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM customers WHERE id = ?1", [id])?;

        if changed == 0 {
            return Err(Error::NotFound("Customer not found".to_string()));
        }
        Ok(())
    }

    /// Count all customers
    pub fn count_customers(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a Customer
    fn row_to_customer(row: &rusqlite::Row) -> rusqlite::Result<Customer> {
        Ok(Customer {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            phone_number: row.get(3)?,
        })
    }

    /// The only constraint on customers is the UNIQUE phone number; decode
    /// a violation of it into a conflict the caller can correct.
    fn decode_phone_conflict(err: rusqlite::Error) -> Error {
        if let rusqlite::Error::SqliteFailure(e, _) = &err {
            if e.code == rusqlite::ErrorCode::ConstraintViolation {
                return Error::Conflict("Phone number already exists".to_string());
            }
        }
        Error::Storage(err)
    }

    // ========== Address Operations ==========

    /// All addresses owned by a customer, in natural order.
    pub fn list_addresses(&self, customer_id: i64) -> Result<Vec<Address>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE customer_id = ?1"
        ))?;

        let addresses = stmt
            .query_map([customer_id], Self::row_to_address)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(addresses)
    }

    /// Insert a new address under an existing customer, returning it with
    /// the assigned id.
    pub fn create_address(&self, input: &AddressInput) -> Result<Address> {
        input.validate()?;
        self.conn
            .execute(
                "INSERT INTO addresses (customer_id, address_details, city, state, pin_code) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    input.customer_id,
                    input.fields.address_details,
                    input.fields.city,
                    input.fields.state,
                    input.fields.pin_code,
                ],
            )
            .map_err(Self::decode_missing_customer)?;

        Ok(Address {
            id: self.conn.last_insert_rowid(),
            customer_id: input.customer_id,
            address_details: input.fields.address_details.clone(),
            city: input.fields.city.clone(),
            state: input.fields.state.clone(),
            pin_code: input.fields.pin_code.clone(),
        })
    }

    /// Replace the four editable fields of an address. `customer_id` is
    /// immutable; ownership never changes after creation.
    pub fn update_address(&self, id: i64, fields: &AddressFields) -> Result<()> {
        fields.validate()?;
        let changed = self.conn.execute(
            "UPDATE addresses SET address_details = ?1, city = ?2, state = ?3, pin_code = ?4 WHERE id = ?5",
            params![
                fields.address_details,
                fields.city,
                fields.state,
                fields.pin_code,
                id
            ],
        )?;

        if changed == 0 {
            return Err(Error::NotFound("Address not found".to_string()));
        }
        Ok(())
    }

    /// Delete a single address
    pub fn delete_address(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM addresses WHERE id = ?1", [id])?;

        if changed == 0 {
            return Err(Error::NotFound("Address not found".to_string()));
        }
        Ok(())
    }

    /// Count all addresses
    pub fn count_addresses(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM addresses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to an Address
    fn row_to_address(row: &rusqlite::Row) -> rusqlite::Result<Address> {
        Ok(Address {
            id: row.get(0)?,
            customer_id: row.get(1)?,
            address_details: row.get(2)?,
            city: row.get(3)?,
            state: row.get(4)?,
            pin_code: row.get(5)?,
        })
    }

    /// The only constraint on addresses is the customer foreign key; decode
    /// a violation of it into a not-found for the referenced customer.
    fn decode_missing_customer(err: rusqlite::Error) -> Error {
        if let rusqlite::Error::SqliteFailure(e, _) = &err {
            if e.code == rusqlite::ErrorCode::ConstraintViolation {
                return Error::NotFound("Customer not found".to_string());
            }
        }
        Error::Storage(err)
    }

    // ========== Statistics ==========

    /// Get database statistics
    pub fn stats(&self) -> Result<CountStats> {
        Ok(CountStats {
            customers: self.count_customers()?,
            addresses: self.count_addresses()?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct CountStats {
    pub customers: usize,
    pub addresses: usize,
}

impl std::fmt::Display for CountStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Customers: {}", self.customers)?;
        writeln!(f, "  Addresses: {}", self.addresses)
    }
}
