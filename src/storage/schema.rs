//! Database schema definitions

/// SQL to create the customers table
///
/// AUTOINCREMENT keeps ids monotonically increasing and never reused within
/// a store's lifetime, even after deletes.
pub const CREATE_CUSTOMERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    phone_number TEXT NOT NULL UNIQUE
)
"#;

/// SQL to create the addresses table
pub const CREATE_ADDRESSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS addresses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id INTEGER NOT NULL,
    address_details TEXT NOT NULL,
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    pin_code TEXT NOT NULL,
    FOREIGN KEY (customer_id) REFERENCES customers (id) ON DELETE CASCADE
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_customers_last_name ON customers(last_name)",
    "CREATE INDEX IF NOT EXISTS idx_addresses_customer ON addresses(customer_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_CUSTOMERS_TABLE, CREATE_ADDRESSES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
