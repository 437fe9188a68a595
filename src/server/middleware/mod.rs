//! Request processing shared by every handler group.
//!
//! - `body` - JSON and URL-encoded body extractors that fail with `AppError`
//! - `cors` - Cross-origin policy applied to the whole router

pub mod body;
pub mod cors;
