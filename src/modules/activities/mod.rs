//! Activities module.
//!
//! Raw access to the `activities` collection. Every write triggers a
//! recomputation of the calendar projection before the response is sent.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
