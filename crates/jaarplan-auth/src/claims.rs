//! JWT claims for import tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Replace or append documents in the `activities` and `weeks` collections.
pub const PERMISSION_IMPORT: &str = "calendar:import";

/// Grants every permission.
pub const PERMISSION_ALL: &str = "*";

/// JWT claims for access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Token holder, e.g. the sync job or person it was issued to
    pub sub: String,
    /// Permission names granted to the holder
    pub permissions: Vec<String>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|granted| granted == permission || granted == PERMISSION_ALL)
    }
}
