//! Request extractors guarding the import endpoints.
//!
//! - [`auth`]: Bearer token extraction and permission checks

pub mod auth;
