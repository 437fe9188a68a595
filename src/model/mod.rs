//! Wire-level data transfer objects shared by the HTTP surface.

pub mod api;
