//! Hub map endpoints.

use std::collections::BTreeMap;

use axum::{Json, Router, extract::State, routing::post};
use chrono::{NaiveDate, Utc};
use hub_common::{AppResult, Permission};
use hub_db::entities::{desk, visit};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, require_permission},
    middleware::AppState,
    response::ApiResponse,
};

/// Desk on an area map.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskResponse {
    pub id: String,
    pub name: String,
    pub position_x: f64,
    pub position_y: f64,
}

impl From<desk::Model> for DeskResponse {
    fn from(desk: desk::Model) -> Self {
        Self {
            id: desk.id,
            name: desk.name,
            position_x: desk.position_x,
            position_y: desk.position_y,
        }
    }
}

/// Area with its desks.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaResponse {
    pub id: String,
    pub name: String,
    pub map_url: Option<String>,
    pub desks: Vec<DeskResponse>,
}

/// Visitor row on the hub map.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorResponse {
    pub user_id: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub area_id: String,
    pub desk_id: String,
}

/// A confirmed visit.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitResponse {
    pub id: String,
    pub office_id: String,
    pub area_id: String,
    pub desk_id: String,
    pub date: String,
}

impl From<visit::Model> for VisitResponse {
    fn from(visit: visit::Model) -> Self {
        Self {
            id: visit.id,
            office_id: visit.office_id,
            area_id: visit.area_id,
            desk_id: visit.desk_id,
            date: visit.date.to_string(),
        }
    }
}

/// Areas request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreasRequest {
    pub office_id: String,
}

/// Areas (with desks) of an office.
async fn areas(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<AreasRequest>,
) -> AppResult<ApiResponse<Vec<AreaResponse>>> {
    require_permission(&user, Permission::VisitsCreate)?;

    let areas = state.visit_service.areas(&req.office_id).await?;
    Ok(ApiResponse::ok(
        areas
            .into_iter()
            .map(|entry| AreaResponse {
                id: entry.area.id,
                name: entry.area.name,
                map_url: entry.area.map_url,
                desks: entry.desks.into_iter().map(DeskResponse::from).collect(),
            })
            .collect(),
    ))
}

/// Visitors request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorsRequest {
    pub office_id: String,
    pub date: NaiveDate,
}

/// Visitors of an office on a date.
async fn visitors(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<VisitorsRequest>,
) -> AppResult<ApiResponse<Vec<VisitorResponse>>> {
    require_permission(&user, Permission::VisitsList)?;

    let visitors = state
        .visit_service
        .visitors(&req.office_id, req.date)
        .await?;
    Ok(ApiResponse::ok(
        visitors
            .into_iter()
            .map(|v| VisitorResponse {
                user_id: v.user_id,
                full_name: v.full_name,
                avatar_url: v.avatar_url,
                area_id: v.area_id,
                desk_id: v.desk_id,
            })
            .collect(),
    ))
}

/// Available desks request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDesksRequest {
    pub office_id: String,
    pub dates: Vec<NaiveDate>,
}

/// Free desks per requested date.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub date: String,
    pub desk_ids: Vec<String>,
}

/// Free desks of an office for each date.
async fn available_desks(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<AvailableDesksRequest>,
) -> AppResult<ApiResponse<Vec<AvailabilityResponse>>> {
    require_permission(&user, Permission::VisitsCreate)?;

    let availability = state
        .visit_service
        .available_desks(&req.office_id, &req.dates)
        .await?;
    Ok(ApiResponse::ok(
        availability
            .into_iter()
            .map(|a| AvailabilityResponse {
                date: a.date.to_string(),
                desk_ids: a.desk_ids,
            })
            .collect(),
    ))
}

/// Upcoming visits request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRequest {
    /// First date to include; defaults to today (UTC).
    #[serde(default)]
    pub from: Option<NaiveDate>,
}

/// The current user's confirmed visits grouped by date.
async fn upcoming(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpcomingRequest>,
) -> AppResult<ApiResponse<BTreeMap<String, Vec<VisitResponse>>>> {
    require_permission(&user, Permission::VisitsList)?;

    let from = req.from.unwrap_or_else(|| Utc::now().date_naive());
    let grouped = state.visit_service.upcoming(&user.id, from).await?;
    Ok(ApiResponse::ok(
        grouped
            .into_iter()
            .map(|(date, visits)| {
                (
                    date.to_string(),
                    visits.into_iter().map(VisitResponse::from).collect(),
                )
            })
            .collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/areas", post(areas))
        .route("/visitors", post(visitors))
        .route("/available-desks", post(available_desks))
        .route("/upcoming", post(upcoming))
}
