pub mod auth;
pub mod dashboard;
pub mod projects;

use askama::Template;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;

use crate::error::AppError;
use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        // Auth views
        .route("/", get(auth::index))
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/logout", post(auth::logout))
        // Dashboard
        .route("/dashboard", get(dashboard::index))
        // Projects
        .route("/projects", post(projects::create))
        .route("/projects/new", get(projects::new_page))
        .route("/projects/{id}", post(projects::update))
        .route("/projects/{id}/edit", get(projects::edit_page))
        .route("/projects/{id}/delete", post(projects::delete))
        .route("/projects/{id}/preview", get(projects::preview))
        .route("/projects/{id}/download", get(projects::download))
}

fn html(template: &impl Template) -> Result<Html<String>, AppError> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(format!("Failed to render view: {e}")))
}
