//! Current-user endpoints.

use axum::{Json, Router, extract::State, routing::post};
use hub_common::AppResult;
use hub_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// The current user's profile.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub roles: Vec<String>,
    pub department: Option<String>,
    pub avatar_url: Option<String>,
    pub stealth_mode: bool,
    pub scheduled_to_delete: Option<String>,
}

impl From<user::Model> for ProfileResponse {
    fn from(user: user::Model) -> Self {
        let roles = user.role_ids();
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            roles,
            department: user.department,
            avatar_url: user.avatar_url,
            stealth_mode: user.stealth_mode,
            scheduled_to_delete: user.scheduled_to_delete.map(|d| d.to_string()),
        }
    }
}

/// Get the current user's profile.
async fn show(AuthUser(user): AuthUser) -> AppResult<ApiResponse<ProfileResponse>> {
    Ok(ApiResponse::ok(user.into()))
}

/// Stealth mode request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StealthRequest {
    pub enabled: bool,
}

/// Toggle whether the user appears in visitor listings.
async fn stealth(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<StealthRequest>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let updated = state
        .user_service
        .set_stealth_mode(&user.id, req.enabled)
        .await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// Schedule the current user's own account for deletion.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let updated = state.user_service.schedule_deletion(&user.id).await?;
    Ok(ApiResponse::ok(updated.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(show))
        .route("/stealth", post(stealth))
        .route("/delete", post(delete))
}
