use axum::extract::State;
use axum::response::Html;
use axum::Json;

use crate::auth::extractor::AdminSession;
use crate::error::AppError;
use crate::models::{Project, ProjectInput};
use crate::render::TemplateInfo;
use crate::state::SharedState;

pub async fn list(
    _session: AdminSession,
    State(state): State<SharedState>,
) -> Json<Vec<TemplateInfo>> {
    Json(state.templates.list())
}

/// Render an unsaved record. Required fields are not enforced here so a
/// half-filled form can still be previewed.
pub async fn preview(
    _session: AdminSession,
    State(state): State<SharedState>,
    Json(input): Json<ProjectInput>,
) -> Result<Html<String>, AppError> {
    let project = Project::create(input.normalize());
    let html = state.templates.render(&project)?;
    Ok(Html(html))
}
