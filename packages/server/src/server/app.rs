//! Application setup and router configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    business_handler, compose_handler, create_business_handler, create_contact_handler,
    create_message_handler, create_workflow_handler, health_handler, latest_business_handler,
    list_contacts_handler, list_messages_handler, list_workflows_handler,
    prompt_preview_handler, scan_handler, update_business_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

impl AppState {
    pub fn new(db_pool: PgPool, deps: ServerDeps) -> Self {
        Self {
            db_pool,
            deps: Arc::new(deps),
        }
    }
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, deps: ServerDeps) -> Router {
    let app_state = AppState::new(pool, deps);

    // CORS configuration - the dashboard is served from a separate origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/business",
            get(latest_business_handler).post(create_business_handler),
        )
        .route(
            "/api/business/:id",
            get(business_handler).put(update_business_handler),
        )
        .route(
            "/api/contacts",
            get(list_contacts_handler).post(create_contact_handler),
        )
        .route(
            "/api/workflows",
            get(list_workflows_handler).post(create_workflow_handler),
        )
        .route(
            "/api/messages",
            get(list_messages_handler).post(create_message_handler),
        )
        .route("/api/followup/compose", post(compose_handler))
        .route("/api/prompt-preview", post(prompt_preview_handler))
        .route("/api/scan", post(scan_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
