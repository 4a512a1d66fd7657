use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::Form;
use axum_extra::response::Attachment;
use serde::Deserialize;

use super::html;
use crate::auth::extractor::AdminSession;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{Project, ProjectInput};
use crate::render::{download_file_name, RenderError, TemplateInfo};
use crate::routes::projects::{find, validate_input};
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "admin/project_form.html")]
struct ProjectFormTemplate {
    heading: &'static str,
    action: String,
    project_id: Option<String>,
    values: FormValues,
    templates: Vec<TemplateInfo>,
    error: Option<String>,
    uploads_enabled: bool,
}

/// Form fields as plain text, ready to drop into `value=""` attributes.
struct FormValues {
    website_name: String,
    logo: String,
    product_photos: Vec<String>,
    product_title: String,
    short_description: String,
    full_description: String,
    price: String,
    buy_button_text: String,
    main_website_url: String,
    google_ads_script: String,
    google_tag_id: String,
    google_conversion_id: String,
    google_conversion_label: String,
    template: String,
}

impl From<&ProjectInput> for FormValues {
    fn from(input: &ProjectInput) -> Self {
        FormValues {
            website_name: input.website_name.clone(),
            logo: input.logo.clone().unwrap_or_default(),
            product_photos: input.product_photos.clone(),
            product_title: input.product_title.clone(),
            short_description: input.short_description.clone(),
            full_description: input.full_description.clone(),
            price: input.price.clone(),
            buy_button_text: input.buy_button_text.clone(),
            main_website_url: input.main_website_url.clone().unwrap_or_default(),
            google_ads_script: input.google_ads_script.clone().unwrap_or_default(),
            google_tag_id: input.google_tag_id.clone().unwrap_or_default(),
            google_conversion_id: input.google_conversion_id.clone().unwrap_or_default(),
            google_conversion_label: input.google_conversion_label.clone().unwrap_or_default(),
            template: input.template.clone(),
        }
    }
}

/// The editor posts one `product_photos` entry per photo row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub website_name: String,
    pub logo: String,
    pub product_photos: Vec<String>,
    pub product_title: String,
    pub short_description: String,
    pub full_description: String,
    pub price: String,
    pub buy_button_text: String,
    pub main_website_url: String,
    pub google_ads_script: String,
    pub google_tag_id: String,
    pub google_conversion_id: String,
    pub google_conversion_label: String,
    pub template: String,
}

impl ProjectForm {
    fn into_input(self) -> ProjectInput {
        ProjectInput {
            website_name: self.website_name,
            logo: Some(self.logo),
            product_photos: self.product_photos,
            product_title: self.product_title,
            short_description: self.short_description,
            full_description: self.full_description,
            price: self.price,
            buy_button_text: self.buy_button_text,
            main_website_url: Some(self.main_website_url),
            google_ads_script: Some(self.google_ads_script),
            google_tag_id: Some(self.google_tag_id),
            google_conversion_id: Some(self.google_conversion_id),
            google_conversion_label: Some(self.google_conversion_label),
            template: self.template,
            extra_fields: Default::default(),
        }
    }
}

fn form_page(
    state: &SharedState,
    project_id: Option<String>,
    input: &ProjectInput,
    error: Option<String>,
) -> ProjectFormTemplate {
    let (heading, action) = match &project_id {
        Some(id) => ("Edit Project", format!("/projects/{id}")),
        None => ("New Project", "/projects".to_string()),
    };
    ProjectFormTemplate {
        heading,
        action,
        project_id,
        values: FormValues::from(input),
        templates: state.templates.list(),
        error,
        uploads_enabled: state.config.imgbb_api_key.is_some(),
    }
}

/// Re-render the editor with the submitted values and the validation message.
fn rejected(
    state: &SharedState,
    project_id: Option<String>,
    input: &ProjectInput,
    err: AppError,
) -> Result<Response, AppError> {
    match err {
        AppError::BadRequest(msg) => {
            let page = form_page(state, project_id, &input.clone().normalize(), Some(msg));
            Ok((StatusCode::BAD_REQUEST, html(&page)?).into_response())
        }
        other => Err(other),
    }
}

pub async fn new_page(
    _session: AdminSession,
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let input = ProjectInput {
        template: "modern".to_string(),
        ..Default::default()
    };
    html(&form_page(&state, None, &input, None))
}

pub async fn edit_page(
    _session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let project = find(&state, &id).await?;
    html(&form_page(&state, Some(project.id.clone()), &project.to_input(), None))
}

pub async fn create(
    _session: AdminSession,
    State(state): State<SharedState>,
    Form(form): Form<ProjectForm>,
) -> Result<Response, AppError> {
    let submitted = form.into_input();
    let input = match validate_input(&state, submitted.clone()) {
        Ok(input) => input,
        Err(e) => return rejected(&state, None, &submitted, e),
    };

    let project = state.projects.upsert(Project::create(input)).await?;
    audit::log_event("project.created", Some(&project.id), None);

    Ok(Redirect::to("/dashboard?notice=created").into_response())
}

pub async fn update(
    _session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(form): Form<ProjectForm>,
) -> Result<Response, AppError> {
    let mut project = find(&state, &id).await?;

    // The form has no inputs for extra fields; carry the stored ones over.
    let mut submitted = form.into_input();
    submitted.extra_fields = project.extra_fields.clone();

    let input = match validate_input(&state, submitted.clone()) {
        Ok(input) => input,
        Err(e) => return rejected(&state, Some(id), &submitted, e),
    };

    project.apply(input);
    let project = state.projects.upsert(project).await?;
    audit::log_event("project.updated", Some(&project.id), None);

    Ok(Redirect::to("/dashboard?notice=saved").into_response())
}

pub async fn delete(
    _session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    if !state.projects.delete_by_id(&id).await? {
        return Ok(Redirect::to("/dashboard?notice=not-found"));
    }
    audit::log_event("project.deleted", Some(&id), None);
    Ok(Redirect::to("/dashboard?notice=deleted"))
}

/// Dashboard download. A record whose template is gone comes back to the
/// dashboard with a notice instead of a JSON error.
pub async fn download(
    _session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let project = find(&state, &id).await?;
    let html = match state.templates.render(&project) {
        Ok(html) => html,
        Err(RenderError::TemplateNotFound(template)) => {
            tracing::warn!(project_id = %project.id, %template, "Download of unrenderable project");
            return Ok(Redirect::to("/dashboard?notice=render-failed").into_response());
        }
        Err(e) => return Err(e.into()),
    };

    audit::log_event(
        "project.generated",
        Some(&project.id),
        Some(serde_json::json!({ "template": project.template })),
    );

    Ok(Attachment::new(html)
        .filename(download_file_name(&project.website_name))
        .content_type("text/html; charset=utf-8")
        .into_response())
}

/// Show the generated page exactly as it would be downloaded.
pub async fn preview(
    _session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let project = find(&state, &id).await?;
    let html = state.templates.render(&project)?;
    Ok(Html(html))
}
