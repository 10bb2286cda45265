//! # Jaarplan Config
//!
//! Configuration types for the Jaarplan calendar API, loaded from environment
//! variables with development defaults.
//!
//! - [`calendar`]: Academic year used for date normalization
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`jwt`]: JWT configuration for the import endpoints
//! - [`server`]: Listener, storage and observability settings
//!
//! # Example
//!
//! ```ignore
//! use jaarplan_config::{CalendarConfig, CorsConfig, JwtConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env();
//! let calendar = CalendarConfig::from_env();
//! ```

pub mod calendar;
pub mod cors;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use calendar::CalendarConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
