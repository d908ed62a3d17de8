//! Tag taxonomy endpoints.

use axum::{Router, extract::State, routing::post};
use hub_common::{AppResult, Permission};
use hub_db::entities::tag;
use serde::Serialize;

use crate::{
    extractors::{AuthUser, require_permission},
    middleware::AppState,
    response::ApiResponse,
};

/// Tag response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id: String,
    pub name: String,
    pub alt_names: Vec<String>,
}

impl From<tag::Model> for TagResponse {
    fn from(tag: tag::Model) -> Self {
        let alt_names = tag.alt_name_list();
        Self {
            id: tag.id,
            name: tag.name,
            alt_names,
        }
    }
}

/// Tags of one category.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagGroupResponse {
    pub category: String,
    pub tags: Vec<TagResponse>,
}

/// List all tags grouped by category.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<TagGroupResponse>>> {
    require_permission(&user, Permission::UsersManageProfile)?;

    let groups = state.tag_service.list_grouped().await?;
    Ok(ApiResponse::ok(
        groups
            .into_iter()
            .map(|group| TagGroupResponse {
                category: group.category,
                tags: group.tags.into_iter().map(TagResponse::from).collect(),
            })
            .collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/list", post(list))
}
