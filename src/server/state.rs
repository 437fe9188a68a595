//! Application state shared across all request handlers.
//!
//! The state is initialized once after the store connection succeeds and then cloned for
//! each request handler through Axum's state extraction.

use sea_orm::DatabaseConnection;

/// Application state containing shared resources and dependencies.
///
/// Cloning is cheap: `DatabaseConnection` is a connection pool and clones share it.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    ///
    /// Created once during bootstrap and closed once at teardown.
    pub db: DatabaseConnection,
}

impl AppState {
    /// Creates a new application state around the connected store.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}
