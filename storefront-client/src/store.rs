//! redb-based local store (the browser-localStorage equivalent)
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `session` | fixed `"current"` | `TableSession` | At-most-one active session |
//! | `carts` | session token | `Vec<CartLine>` | Cart persisted per token |
//! | `orders` | table number | `Vec<Order>` | Order history per table |
//!
//! Carts are keyed by session token and order lists by table number, so
//! switching sessions or tables can never read another key's state.
//!
//! A value that no longer deserializes is treated as absent: the entry is
//! deleted and the caller sees "no stored data" instead of an error.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use shared::models::{CartLine, Order, TableSession};

/// Table for the active session: key = "current", value = JSON-serialized TableSession
const SESSION_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("session");

/// Table for carts: key = session token, value = JSON-serialized Vec<CartLine>
const CARTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("carts");

/// Table for order history: key = table number (decimal string), value = JSON-serialized Vec<Order>
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

const SESSION_KEY: &str = "current";

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Local client state backed by redb
#[derive(Clone)]
pub struct TableStore {
    db: Arc<Database>,
}

impl TableStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        // Create all tables so later read transactions can open them
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SESSION_TABLE)?;
            let _ = write_txn.open_table(CARTS_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Session ==========

    /// Persist the active session
    pub fn save_session(&self, session: &TableSession) -> StoreResult<()> {
        self.write_value(SESSION_TABLE, SESSION_KEY, session)
    }

    /// Load the persisted session, if any
    pub fn load_session(&self) -> StoreResult<Option<TableSession>> {
        self.read_value(SESSION_TABLE, SESSION_KEY)
    }

    /// Forget the persisted session
    pub fn clear_session(&self) -> StoreResult<()> {
        self.remove_value(SESSION_TABLE, SESSION_KEY)
    }

    // ========== Cart ==========

    /// Persist the cart for a session token
    pub fn save_cart(&self, token: &str, cart: &[CartLine]) -> StoreResult<()> {
        self.write_value(CARTS_TABLE, token, &cart)
    }

    /// Load the cart persisted for a session token (empty when absent)
    pub fn load_cart(&self, token: &str) -> StoreResult<Vec<CartLine>> {
        Ok(self.read_value(CARTS_TABLE, token)?.unwrap_or_default())
    }

    /// Remove the persisted cart for a session token
    pub fn remove_cart(&self, token: &str) -> StoreResult<()> {
        self.remove_value(CARTS_TABLE, token)
    }

    // ========== Orders ==========

    /// Persist the order list for a table
    pub fn save_orders(&self, table_number: i64, orders: &[Order]) -> StoreResult<()> {
        self.write_value(ORDERS_TABLE, &table_number.to_string(), &orders)
    }

    /// Load the order list persisted for a table (empty when absent)
    pub fn load_orders(&self, table_number: i64) -> StoreResult<Vec<Order>> {
        Ok(self
            .read_value(ORDERS_TABLE, &table_number.to_string())?
            .unwrap_or_default())
    }

    /// Remove the persisted order list for a table
    pub fn remove_orders(&self, table_number: i64) -> StoreResult<()> {
        self.remove_value(ORDERS_TABLE, &table_number.to_string())
    }

    // ========== Generic helpers ==========

    fn write_value<T: Serialize>(
        &self,
        table: TableDefinition<&str, &[u8]>,
        key: &str,
        value: &T,
    ) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut t = write_txn.open_table(table)?;
            t.insert(key, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn read_value<T: DeserializeOwned>(
        &self,
        table: TableDefinition<&str, &[u8]>,
        key: &str,
    ) -> StoreResult<Option<T>> {
        let decoded = {
            let read_txn = self.db.begin_read()?;
            let t = read_txn.open_table(table)?;
            match t.get(key)? {
                Some(guard) => Some(serde_json::from_slice::<T>(guard.value())),
                None => None,
            }
        };

        match decoded {
            None => Ok(None),
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(err)) => {
                // Corrupt entry: reset it rather than surfacing a failure
                tracing::warn!(key = %key, error = %err, "Discarding corrupt store entry");
                self.remove_value(table, key)?;
                Ok(None)
            }
        }
    }

    fn remove_value(&self, table: TableDefinition<&str, &[u8]>, key: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut t = write_txn.open_table(table)?;
            t.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderItem, OrderStatus};

    fn sample_order(id: &str, table_number: i64) -> Order {
        Order {
            id: id.to_string(),
            table_number,
            items: vec![OrderItem {
                name: "Burger".to_string(),
                price: 9.5,
                quantity: 2,
            }],
            total_amount: 19.0,
            status: OrderStatus::Pending,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_session_round_trip() {
        let store = TableStore::open_in_memory().unwrap();
        assert!(store.load_session().unwrap().is_none());

        let session = TableSession::new("tok123", 5);
        store.save_session(&session).unwrap();

        let loaded = store.load_session().unwrap().unwrap();
        assert_eq!(loaded.token, "tok123");
        assert_eq!(loaded.table_number, 5);

        store.clear_session().unwrap();
        assert!(store.load_session().unwrap().is_none());
    }

    #[test]
    fn test_carts_are_scoped_by_token() {
        let store = TableStore::open_in_memory().unwrap();

        let line = CartLine {
            item_id: "m1".to_string(),
            name: "Burger".to_string(),
            description: String::new(),
            price: 9.5,
            quantity: 1,
            image: vec![],
        };
        store.save_cart("tokenA", std::slice::from_ref(&line)).unwrap();

        assert_eq!(store.load_cart("tokenA").unwrap().len(), 1);
        assert!(store.load_cart("tokenB").unwrap().is_empty());

        store.remove_cart("tokenA").unwrap();
        assert!(store.load_cart("tokenA").unwrap().is_empty());
    }

    #[test]
    fn test_orders_are_scoped_by_table() {
        let store = TableStore::open_in_memory().unwrap();

        store.save_orders(5, &[sample_order("o1", 5)]).unwrap();

        assert_eq!(store.load_orders(5).unwrap().len(), 1);
        assert!(store.load_orders(6).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_entry_is_reset() {
        let store = TableStore::open_in_memory().unwrap();

        // Write bytes that are not a Vec<CartLine>
        store
            .write_value(CARTS_TABLE, "tokenA", &"not a cart")
            .unwrap();

        assert!(store.load_cart("tokenA").unwrap().is_empty());
        // Entry was removed, second read is a clean miss
        assert!(store.load_cart("tokenA").unwrap().is_empty());
    }
}
