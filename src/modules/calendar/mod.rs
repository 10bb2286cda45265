//! Calendar module.
//!
//! Read-only views over the current calendar projection: filtered instances,
//! per-week grouping, filter options, integrity warnings and date lookups.

pub mod controller;
pub mod projection;
pub mod router;
pub mod service;
