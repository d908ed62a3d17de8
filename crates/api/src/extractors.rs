//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use hub_common::{AppError, AppResult, Permission};
use hub_db::entities::user;

/// Authenticated user extractor.
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get user from request extensions (set by auth middleware)
        parts
            .extensions
            .get::<user::Model>()
            .cloned()
            .map(AuthUser)
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

/// Optional authenticated user extractor.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<user::Model>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<user::Model>().cloned()))
    }
}

/// Reject with 403 unless the user's roles grant the permission.
pub fn require_permission(user: &user::Model, permission: Permission) -> AppResult<()> {
    if user.has_permission(permission) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Missing permission: {permission:?}"
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user_with_roles(roles: serde_json::Value) -> user::Model {
        user::Model {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            full_name: "Test User".to_string(),
            roles,
            department: None,
            avatar_url: None,
            stealth_mode: false,
            scheduled_to_delete: None,
            deleted_at: None,
            token: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_require_permission_passes_for_admin() {
        let admin = user_with_roles(serde_json::json!(["admin"]));
        assert!(require_permission(&admin, Permission::UsersAdminList).is_ok());
    }

    #[test]
    fn test_require_permission_forbids_regular_from_admin_routes() {
        let regular = user_with_roles(serde_json::json!(["regular"]));
        let result = require_permission(&regular, Permission::UsersAdminList);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
