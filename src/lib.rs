//! Doctrack API service.
//!
//! Bootstrap and error-handling core of the multi-tenant document tracking API. Handler
//! groups for the individual API areas are plugged in through
//! [`server::router::HandlerGroups`]; the background reminder job through
//! [`server::scheduler::document_reminders::ScheduledTask`].

pub mod model;
pub mod server;
