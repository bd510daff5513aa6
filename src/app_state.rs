//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::Error;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The bcrypt cost used when hashing new passwords.
    pub hash_cost: u32,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// The database schema is not touched here, call
    /// [initialize_db](crate::initialize_db) before serving requests.
    pub fn new(db_connection: Connection, hash_cost: u32) -> Self {
        Self {
            hash_cost,
            db_connection: Arc::new(Mutex::new(db_connection)),
        }
    }
}

/// Acquire the shared database connection.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned.
pub(crate) fn lock_connection(
    db_connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}
