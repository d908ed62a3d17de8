//! Admin endpoints: user lifecycle and tag imports.

use axum::{Json, Router, extract::State, routing::post};
use hub_common::{AppResult, Permission};
use hub_core::{TagImportEntry, TagImportGroup, TagImportSummary, UserFilter};
use hub_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, require_permission},
    middleware::AppState,
    response::ApiResponse,
};

/// Admin view of a user.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub roles: Vec<String>,
    pub department: Option<String>,
    pub avatar_url: Option<String>,
    pub scheduled_to_delete: Option<String>,
    pub deleted_at: Option<String>,
    pub created_at: String,
}

impl From<user::Model> for AdminUserResponse {
    fn from(user: user::Model) -> Self {
        let roles = user.role_ids();
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            roles,
            department: user.department,
            avatar_url: user.avatar_url,
            scheduled_to_delete: user.scheduled_to_delete.map(|d| d.to_string()),
            deleted_at: user.deleted_at.map(|t| t.to_rfc3339()),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// List users request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersRequest {
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub query: String,
}

/// List users matching the admin filters.
async fn list_users(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListUsersRequest>,
) -> AppResult<ApiResponse<Vec<AdminUserResponse>>> {
    require_permission(&user, Permission::UsersAdminList)?;

    let filter = UserFilter {
        roles: req.roles,
        departments: req.departments,
        query: req.query,
    };
    let users = state.user_service.list(&filter).await?;
    Ok(ApiResponse::ok(
        users.into_iter().map(AdminUserResponse::from).collect(),
    ))
}

/// Update roles request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolesRequest {
    pub user_id: String,
    pub roles: Vec<String>,
}

/// Replace a user's roles.
async fn update_roles(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateRolesRequest>,
) -> AppResult<ApiResponse<AdminUserResponse>> {
    require_permission(&user, Permission::UsersAdminAssignRoles)?;

    let updated = state
        .user_service
        .update_roles(&req.user_id, req.roles)
        .await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// Deletion scheduling request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionRequest {
    pub user_id: String,
}

/// Schedule a user for deletion after the grace period.
async fn schedule_deletion(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeletionRequest>,
) -> AppResult<ApiResponse<AdminUserResponse>> {
    require_permission(&user, Permission::UsersAdminManage)?;

    let updated = state.user_service.schedule_deletion(&req.user_id).await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// Cancel a pending deletion.
async fn revert_deletion(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeletionRequest>,
) -> AppResult<ApiResponse<AdminUserResponse>> {
    require_permission(&user, Permission::UsersAdminManage)?;

    let updated = state.user_service.revert_deletion(&req.user_id).await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// One tag entry of an import request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportTagRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub alt_names: Vec<String>,
}

/// One category block of an import request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportGroupRequest {
    pub category: String,
    pub tags: Vec<ImportTagRequest>,
}

/// Apply a bulk tag import.
async fn import_tags(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<Vec<ImportGroupRequest>>,
) -> AppResult<ApiResponse<TagImportSummary>> {
    require_permission(&user, Permission::UsersAdminManage)?;

    let groups = req
        .into_iter()
        .map(|group| TagImportGroup {
            category: group.category,
            tags: group
                .tags
                .into_iter()
                .map(|tag| TagImportEntry {
                    id: tag.id,
                    name: tag.name,
                    alt_names: tag.alt_names,
                })
                .collect(),
        })
        .collect();

    let summary = state.tag_service.import(groups).await?;
    Ok(ApiResponse::ok(summary))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/list", post(list_users))
        .route("/users/update-roles", post(update_roles))
        .route("/users/schedule-deletion", post(schedule_deletion))
        .route("/users/revert-deletion", post(revert_deletion))
        .route("/tags/import", post(import_tags))
}
