//! Server-side bootstrap, error handling and request plumbing.
//!
//! This module contains everything the API process owns itself. Route business logic lives
//! in externally supplied handler groups; this layer mounts them, normalizes their errors,
//! and runs the process lifecycle around them.
//!
//! # Architecture
//!
//! - **Error Layer** (`error/`) - Application error types and the JSON error envelope
//! - **Middleware** (`middleware/`) - CORS policy and body extractors
//! - **Router** (`router`) - Route mount table, liveness route and decoy fallback
//! - **Scheduler** (`scheduler/`) - Background service lifecycle and the reminder cron job
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB connection pool)
//! - **Startup** (`startup`) - Store connection, bootstrap sequencing and serving
//! - **Shutdown** (`shutdown`) - Termination signal forwarding
//!
//! # Request Flow
//!
//! 1. **TraceLayer** logs the request
//! 2. **CORS** answers preflights and decorates responses
//! 3. **Router** dispatches on path prefix to a handler group, `GET /`, or the decoy
//! 4. **Handler** returns `Result<_, AppError>`
//! 5. **AppError** `IntoResponse` logs the failure and writes the JSON envelope

pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod scheduler;
pub mod shutdown;
pub mod startup;
pub mod state;

#[cfg(test)]
mod test;
