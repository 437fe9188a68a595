//! Doctrack Test Utils
//!
//! Shared testing utilities for the doctrack service. Provides a lazily connected in-memory
//! SQLite store standing in for the production database, plus small helpers for reading
//! axum responses and reserving local ports in bootstrap tests.
//!
//! # Overview
//!
//! - **TestContext**: Test environment holding the in-memory database connection
//! - **TestError**: Error types that can occur during test setup
//! - **net**: Local socket helpers for listener tests
//! - **response**: Body readers for `axum::response::Response`
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::context::TestContext;
//!
//! #[tokio::test]
//! async fn test_with_store() -> Result<(), TestError> {
//!     let mut test = TestContext::new();
//!     let db = test.database().await?;
//!     // Build an AppState from `db.clone()`...
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod error;
pub mod net;
pub mod response;
