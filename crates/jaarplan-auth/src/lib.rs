//! # Jaarplan Auth
//!
//! Bearer tokens guarding the collection import endpoints. Reading the
//! calendar is public; replacing or appending documents requires a token that
//! carries [`PERMISSION_IMPORT`].
//!
//! - [`claims`]: JWT claim structure and permission names
//! - [`jwt`]: Token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use jaarplan_auth::{PERMISSION_IMPORT, create_access_token, verify_token};
//! use jaarplan_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token("sheet-sync", vec![PERMISSION_IMPORT.to_string()], &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert!(claims.has_permission(PERMISSION_IMPORT));
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, PERMISSION_ALL, PERMISSION_IMPORT};
pub use jwt::{create_access_token, verify_token};
