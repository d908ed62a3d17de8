//! Hub-office server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use hub_api::{middleware::AppState, router as api_router};
use hub_common::Config;
use hub_core::{RetentionService, TagService, UserService, VisitService};
use hub_db::repositories::{
    FormSubmissionRepository, OfficeRepository, TagRepository, UserRepository, UserTagRepository,
    VisitRepository,
};
use hub_scheduler::{RetentionExecutor, SchedulerConfig, run_scheduler};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hub=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting hub-office server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = hub_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    hub_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let form_submission_repo = FormSubmissionRepository::new(Arc::clone(&db));
    let tag_repo = TagRepository::new(Arc::clone(&db));
    let user_tag_repo = UserTagRepository::new(Arc::clone(&db));
    let office_repo = OfficeRepository::new(Arc::clone(&db));
    let visit_repo = VisitRepository::new(Arc::clone(&db));

    // Initialize services
    let user_service = UserService::new(user_repo.clone(), config.retention.grace_period_days);
    let tag_service = TagService::new(tag_repo, user_tag_repo.clone());
    let visit_service = VisitService::new(office_repo, visit_repo, user_repo.clone());
    let retention_service = RetentionService::new(
        Arc::clone(&db),
        user_repo,
        form_submission_repo,
        user_tag_repo,
    );

    // Create app state
    let state = AppState {
        user_service,
        tag_service,
        visit_service,
    };

    // Start the retention job scheduler
    let scheduler_config = SchedulerConfig::from(&config.retention);
    let executor = Arc::new(RetentionExecutor::new(retention_service));
    run_scheduler(scheduler_config, executor).await;
    info!("Retention job scheduler started");

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            hub_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
