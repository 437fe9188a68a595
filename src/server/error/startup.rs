use thiserror::Error;

use crate::server::error::{config::ConfigError, AppError};

/// Process exit code reported for any failed startup.
pub const STARTUP_FAILURE_EXIT_CODE: u8 = 1;

/// Fatal errors that end the process before or while serving.
///
/// None of these reach an HTTP client; they terminate the process with
/// [`STARTUP_FAILURE_EXIT_CODE`].
#[derive(Error, Debug)]
pub enum StartupError {
    /// Environment configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The persistent store refused the initial connection.
    ///
    /// The listener is never bound when this occurs.
    #[error("Database connection failed: {0}")]
    StoreConnection(#[source] sea_orm::DbErr),

    /// The background reminder service failed to start.
    #[error("Background service failed to start: {0}")]
    BackgroundService(#[source] AppError),

    /// The network listener could not be bound.
    #[error("Failed to bind listener on {addr}: {source}")]
    Bind {
        /// Address the listener was configured for
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Termination signal handlers could not be installed.
    #[error("Failed to install signal handlers: {0}")]
    Signal(#[source] std::io::Error),

    /// The HTTP server stopped with an I/O error.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl StartupError {
    /// Exit code the process should terminate with for this error.
    pub fn exit_code(&self) -> u8 {
        STARTUP_FAILURE_EXIT_CODE
    }
}
