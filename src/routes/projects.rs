use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::response::Attachment;

use crate::auth::extractor::AdminSession;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{Project, ProjectInput};
use crate::render::download_file_name;
use crate::state::SharedState;

pub async fn list(
    _session: AdminSession,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = state.projects.list_all().await?;
    Ok(Json(projects))
}

pub async fn create(
    _session: AdminSession,
    State(state): State<SharedState>,
    Json(req): Json<ProjectInput>,
) -> Result<Json<Project>, AppError> {
    let input = validate_input(&state, req)?;
    let project = state.projects.upsert(Project::create(input)).await?;

    audit::log_event("project.created", Some(&project.id), None);

    Ok(Json(project))
}

pub async fn get(
    _session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    let project = find(&state, &id).await?;
    Ok(Json(project))
}

pub async fn update(
    _session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<ProjectInput>,
) -> Result<Json<Project>, AppError> {
    let input = validate_input(&state, req)?;
    let mut project = find(&state, &id).await?;
    project.apply(input);
    let project = state.projects.upsert(project).await?;

    audit::log_event("project.updated", Some(&project.id), None);

    Ok(Json(project))
}

pub async fn delete(
    _session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.projects.delete_by_id(&id).await? {
        return Err(AppError::NotFound("Project not found".to_string()));
    }

    audit::log_event("project.deleted", Some(&id), None);

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

/// Render the project's page and hand it out as `<site>_index.html`.
pub async fn download(
    _session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let project = find(&state, &id).await?;
    let html = state.templates.render(&project)?;

    audit::log_event(
        "project.generated",
        Some(&project.id),
        Some(serde_json::json!({ "template": project.template })),
    );

    Ok(Attachment::new(html)
        .filename(download_file_name(&project.website_name))
        .content_type("text/html; charset=utf-8"))
}

pub(crate) async fn find(state: &SharedState, id: &str) -> Result<Project, AppError> {
    state
        .projects
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
}

/// Normalize a submitted record and reject it if it cannot be saved.
pub(crate) fn validate_input(state: &SharedState, input: ProjectInput) -> Result<ProjectInput, AppError> {
    let input = input.normalize();

    let missing = input.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    if !state.templates.contains(&input.template) {
        return Err(AppError::BadRequest(format!(
            "Unknown template: {}",
            input.template
        )));
    }

    Ok(input)
}
