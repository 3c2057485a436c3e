//! Route definitions, all mounted under `/api`.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(tool_routes())
        .merge(user_routes())
        .merge(history_routes())
        .merge(loan_routes())
        .merge(dashboard_routes())
        .merge(export_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(handlers::auth::login_handler))
}

fn tool_routes() -> Router<AppState> {
    Router::new()
        .route("/tools", get(handlers::tools::list))
        .route("/tools", post(handlers::tools::create))
        .route("/tools/{id}", put(handlers::tools::update))
        .route("/tools/{id}", delete(handlers::tools::delete))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::users::list))
        .route("/users", post(handlers::users::create))
        .route("/users/{id}", put(handlers::users::update))
        .route("/users/{id}", delete(handlers::users::delete))
}

fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(handlers::history::list))
        .route("/history/{id}/receipt", get(handlers::history::receipt))
}

/// The only routes that flip tool status or append history.
fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/loans", post(handlers::loans::checkout))
        .route("/loans/active", get(handlers::loans::active))
        .route("/loans/{id}/return", post(handlers::loans::process_return))
        .route("/loans/{id}/deadline", put(handlers::loans::renew))
}

fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(handlers::dashboard::dashboard))
}

fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/export/history", get(handlers::export::history))
        .route("/export/tools", get(handlers::export::tools))
        .route("/export/users", get(handlers::export::users))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
