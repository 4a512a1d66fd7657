pub mod auth;
pub mod projects;
pub mod templates;
pub mod uploads;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/session", get(auth::session))
        // Templates
        .route("/api/v1/templates", get(templates::list))
        .route("/api/v1/preview", post(templates::preview))
        // Projects
        .route("/api/v1/projects", get(projects::list).post(projects::create))
        .route(
            "/api/v1/projects/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/api/v1/projects/{id}/html", get(projects::download))
}

/// Multipart upload route; carries its own body limit.
pub fn upload_routes(max_upload_size: usize) -> Router<SharedState> {
    Router::new()
        .route("/api/v1/uploads", post(uploads::upload))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_size))
}
