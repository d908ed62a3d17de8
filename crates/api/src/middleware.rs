//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use hub_core::{TagService, UserService, VisitService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub tag_service: TagService,
    pub visit_service: VisitService,
}

/// Authentication middleware.
///
/// Resolves a bearer token into a user model stored in request
/// extensions. Routes decide themselves whether a missing user is fatal,
/// via the [`crate::extractors::AuthUser`] extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        if let Ok(user) = state.user_service.authenticate(token).await {
            req.extensions_mut().insert(user);
        }
    }

    next.run(req).await
}
