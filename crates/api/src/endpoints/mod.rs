//! API endpoints.

mod admin;
mod map;
mod me;
mod tags;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/admin", admin::router())
        .nest("/tags", tags::router())
        .nest("/map", map::router())
        .nest("/me", me::router())
}
