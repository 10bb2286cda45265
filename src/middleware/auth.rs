use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jaarplan_auth::{Claims, verify_token};
use jaarplan_core::AppError;

use crate::state::AppState;

/// Extractor that validates the bearer token and exposes its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.0.has_permission(permission)
    }

    /// Token holder
    pub fn subject(&self) -> &str {
        &self.0.sub
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Declares an extractor that requires an authenticated token carrying
/// `$permission`.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = jaarplan_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                if !auth_user.has_permission($permission) {
                    return Err(jaarplan_core::AppError::forbidden(format!(
                        "Access denied. Missing required permission: {}",
                        $permission
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_permission!(RequireCalendarImport, jaarplan_auth::PERMISSION_IMPORT);

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(permissions: &[&str]) -> AuthUser {
        AuthUser(Claims {
            sub: "sheet-sync".to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_has_permission() {
        let user = auth_user(&["calendar:import"]);
        assert!(user.has_permission("calendar:import"));
        assert!(!user.has_permission("calendar:admin"));
        assert_eq!(user.subject(), "sheet-sync");
    }

    #[test]
    fn test_wildcard_grants_import() {
        assert!(auth_user(&["*"]).has_permission("calendar:import"));
    }
}
