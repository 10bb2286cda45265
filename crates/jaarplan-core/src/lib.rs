//! # Jaarplan Core
//!
//! Core types, errors, and utilities for the Jaarplan calendar API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`serde`]: Query-string deserialization helpers
//! - [`validation`]: Formatting of `validator` errors
//!
//! # Example
//!
//! ```ignore
//! use jaarplan_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Week not found"));
//! ```

pub mod errors;
pub mod serde;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use validation::format_errors;
