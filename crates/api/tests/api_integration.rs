//! API integration tests.
//!
//! These tests verify the routing, auth middleware and permission gates
//! work correctly together over a mock database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use hub_api::{middleware::AppState, middleware::auth_middleware, router as api_router};
use hub_core::{TagService, UserService, VisitService};
use hub_db::{
    entities::user,
    repositories::{
        OfficeRepository, TagRepository, UserRepository, UserTagRepository, VisitRepository,
    },
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;

fn test_user(id: &str, roles: serde_json::Value, token: &str) -> user::Model {
    user::Model {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        full_name: format!("User {id}"),
        roles,
        department: None,
        avatar_url: None,
        stealth_mode: false,
        scheduled_to_delete: None,
        deleted_at: None,
        token: Some(token.to_string()),
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

/// Build app state over a prepared mock connection.
fn create_state(db: DatabaseConnection) -> AppState {
    let db = Arc::new(db);

    let user_repo = UserRepository::new(Arc::clone(&db));
    let tag_repo = TagRepository::new(Arc::clone(&db));
    let user_tag_repo = UserTagRepository::new(Arc::clone(&db));
    let office_repo = OfficeRepository::new(Arc::clone(&db));
    let visit_repo = VisitRepository::new(Arc::clone(&db));

    AppState {
        user_service: UserService::new(user_repo.clone(), 3),
        tag_service: TagService::new(tag_repo, user_tag_repo),
        visit_service: VisitService::new(office_repo, visit_repo, user_repo),
    }
}

fn create_app(db: DatabaseConnection) -> Router {
    let state = create_state(db);
    api_router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

fn post_json(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_admin_list_requires_auth() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = create_app(db);

    let response = app
        .oneshot(post_json("/admin/users/list", None, "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_list_forbidden_for_regular_user() {
    let regular = test_user("u1", serde_json::json!(["regular"]), "token_regular");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // auth middleware: find_by_token
        .append_query_results([vec![regular]])
        .into_connection();
    let app = create_app(db);

    let response = app
        .oneshot(post_json("/admin/users/list", Some("token_regular"), "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_list_ok_for_admin() {
    let admin = test_user("u1", serde_json::json!(["admin"]), "token_admin");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // auth middleware: find_by_token
        .append_query_results([vec![admin]])
        // handler: find_all_active
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();
    let app = create_app(db);

    let response = app
        .oneshot(post_json("/admin/users/list", Some("token_admin"), "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_requires_auth() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = create_app(db);

    let response = app.oneshot(post_json("/me", None, "{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_profile() {
    let regular = test_user("u1", serde_json::json!(["regular"]), "token_regular");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![regular]])
        .into_connection();
    let app = create_app(db);

    let response = app
        .oneshot(post_json("/me", Some("token_regular"), "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_tags_list_forbidden_for_guest() {
    let guest = test_user("u1", serde_json::json!(["guest"]), "token_guest");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![guest]])
        .into_connection();
    let app = create_app(db);

    let response = app
        .oneshot(post_json("/tags/list", Some("token_guest"), "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_import_with_invalid_json_returns_error() {
    let admin = test_user("u1", serde_json::json!(["admin"]), "token_admin");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin]])
        .into_connection();
    let app = create_app(db);

    let response = app
        .oneshot(post_json(
            "/admin/tags/import",
            Some("token_admin"),
            "not json",
        ))
        .await
        .unwrap();

    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = create_app(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent/endpoint")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
